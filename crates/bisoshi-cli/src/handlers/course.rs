use super::HandlerContext;
use crate::args::CourseCommand;
use crate::presentation::print_json;
use crate::presentation::views::{CourseListView, CourseView};
use anyhow::Result;
use bisoshi_api::Transport;
use bisoshi_sdk::Client;

pub fn handle<T: Transport + Clone>(
    client: &Client<T>,
    command: CourseCommand,
    ctx: &HandlerContext,
) -> Result<()> {
    match command {
        CourseCommand::List => {
            let courses = client.courses();
            if ctx.is_json() {
                print_json(&courses)?;
            } else {
                print!(
                    "{}",
                    CourseListView {
                        courses: &courses,
                        palette: ctx.palette,
                    }
                );
            }
        }
        CourseCommand::Show { id } => {
            let course = client.course(id)?;
            if ctx.is_json() {
                print_json(&course)?;
            } else {
                print!(
                    "{}",
                    CourseView {
                        course: &course,
                        palette: ctx.palette,
                    }
                );
            }
        }
    }
    Ok(())
}
