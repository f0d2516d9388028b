use super::HandlerContext;
use crate::presentation::print_json;
use crate::presentation::views::OverviewView;
use anyhow::Result;
use bisoshi_api::Transport;
use bisoshi_sdk::Client;
use chrono::{Datelike, Utc};

pub async fn handle<T: Transport + Clone>(
    client: &Client<T>,
    year: Option<i32>,
    ctx: &HandlerContext,
) -> Result<()> {
    let year = year.unwrap_or_else(|| Utc::now().year());
    let overview = client.overview(year).await?;

    if ctx.is_json() {
        print_json(&overview)?;
    } else {
        print!(
            "{}",
            OverviewView {
                data: &overview,
                palette: ctx.palette,
            }
        );
    }
    Ok(())
}
