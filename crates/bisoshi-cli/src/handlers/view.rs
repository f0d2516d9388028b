use super::HandlerContext;
use crate::args::{CourseCommand, ListArgs, ResourceCommand};
use crate::presentation::print_json;
use anyhow::Result;
use bisoshi_api::Transport;
use bisoshi_sdk::Client;
use bisoshi_types::{Clients, Products, Route, Sales};
use serde_json::json;

/// Resolve a dashboard path against the session and render what it shows.
pub async fn handle<T: Transport + Clone>(
    client: &Client<T>,
    path: &str,
    ctx: &HandlerContext,
) -> Result<()> {
    let requested = Route::parse(path);
    let route = client.route(path);
    log::debug!("view {} resolved to {}", path, route);

    if ctx.is_json() {
        return print_json(&json!({
            "path": path,
            "requested": requested.path(),
            "route": route.path(),
            "redirected": requested != route,
        }));
    }

    if requested != route {
        println!(
            "{}",
            ctx.palette
                .dim(&format!("{} requires a session, showing {}", requested, route))
        );
    }

    match route {
        Route::SignIn => {
            println!("Sign in:  bisoshi auth login --email <EMAIL>");
            println!("No account yet?  bisoshi view /register");
        }
        Route::Register => {
            println!("Register:  bisoshi auth register --ruc <RUC> --company-name <NAME> \\");
            println!("           --email <EMAIL> --cellphone <PHONE>");
        }
        Route::Dashboard | Route::BoardClient => {
            super::overview::handle(client, None, ctx).await?;
        }
        Route::Product => first_page::<Products, T>(client, ctx).await?,
        Route::Client => first_page::<Clients, T>(client, ctx).await?,
        Route::Sale => first_page::<Sales, T>(client, ctx).await?,
        Route::Course => super::course::handle(client, CourseCommand::List, ctx)?,
        Route::Chatbot => {
            let status = if client.chat().is_online() {
                "online"
            } else {
                "offline (canned replies)"
            };
            println!("Assistant {}. Start with: bisoshi chat", status);
        }
        Route::NotFound => {
            println!("{}", ctx.palette.bad(&format!("404: nothing at {}", path)));
        }
    }
    Ok(())
}

async fn first_page<R, T>(client: &Client<T>, ctx: &HandlerContext) -> Result<()>
where
    R: bisoshi_types::Resource,
    T: Transport + Clone,
{
    let args = ListArgs {
        page: 1,
        ..ListArgs::default()
    };
    super::resource::handle::<R, T>(client, ResourceCommand::List(args), ctx).await
}
