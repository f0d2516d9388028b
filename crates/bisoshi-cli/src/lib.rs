mod args;
mod commands;
mod handlers;
pub mod logging;
pub mod presentation;

pub use args::{
    AuthCommand, Cli, Commands, ConfigCommand, CourseCommand, LogLevel, OutputFormat,
    ResourceCommand,
};
pub use commands::run;
