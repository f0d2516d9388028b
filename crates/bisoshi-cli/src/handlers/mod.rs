pub mod auth;
pub mod chat;
pub mod config;
pub mod course;
pub mod overview;
pub mod resource;
pub mod view;

use crate::args::OutputFormat;
use crate::presentation::Palette;
use bisoshi_api::Transport;
use bisoshi_runtime::{Completion, ListController};
use bisoshi_types::Resource;

/// Output settings shared by every handler.
#[derive(Debug, Clone, Copy)]
pub struct HandlerContext {
    pub format: OutputFormat,
    pub palette: Palette,
}

impl HandlerContext {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

/// Turn a controller completion into a command result.
///
/// A failed request surfaces the error the controller recorded.
pub(crate) fn ensure<R: Resource, T: Transport>(
    completion: Completion,
    controller: &ListController<R, T>,
) -> Result<(), bisoshi_sdk::Error> {
    match completion {
        Completion::Applied => Ok(()),
        Completion::Failed => match controller.error() {
            Some(view_error) => Err(view_error.error.clone().into()),
            None => Err(anyhow::anyhow!("request failed").into()),
        },
        Completion::Stale | Completion::Detached => {
            Err(anyhow::anyhow!("response arrived after the view was closed").into())
        }
    }
}
