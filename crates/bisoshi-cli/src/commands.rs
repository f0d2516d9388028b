use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::logging;
use crate::presentation::Palette;
use anyhow::{Context, Result};
use bisoshi_sdk::Client;
use bisoshi_types::{Clients, Products, Sales};
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);
    let data_dir = bisoshi_core::resolve_data_dir(cli.data_dir.as_deref())?;

    let Some(command) = cli.command else {
        show_guidance(&data_dir);
        return Ok(());
    };

    let ctx = HandlerContext {
        format: cli.format,
        palette: Palette::detect(),
    };

    // Config commands never reach the backend.
    if let Commands::Config { command } = command {
        return handlers::config::handle(&data_dir, command, &ctx);
    }

    let client = Client::connect(data_dir.clone())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        match command {
            Commands::Auth { command } => handlers::auth::handle(&client, command, &ctx).await,
            Commands::Product { command } => {
                handlers::resource::handle::<Products, _>(&client, command, &ctx).await
            }
            Commands::Client { command } => {
                handlers::resource::handle::<Clients, _>(&client, command, &ctx).await
            }
            Commands::Sale { command } => {
                handlers::resource::handle::<Sales, _>(&client, command, &ctx).await
            }
            Commands::Course { command } => handlers::course::handle(&client, command, &ctx),
            Commands::Chat { question } => handlers::chat::handle(&client, question, &ctx).await,
            Commands::Overview { year } => handlers::overview::handle(&client, year, &ctx).await,
            Commands::View { path } => handlers::view::handle(&client, &path, &ctx).await,
            Commands::Config { command } => handlers::config::handle(&data_dir, command, &ctx),
        }
    })
}

fn show_guidance(data_dir: &Path) {
    let signed_in = bisoshi_core::session_path(data_dir).exists();

    println!("bisoshi - Business dashboard for products, clients and sales\n");

    if !signed_in {
        println!("Get started:");
        println!("  bisoshi config set api.base_url <URL>   # Point at your backend");
        println!("  bisoshi auth register ...               # Create an account");
        println!("  bisoshi auth login --email <EMAIL>      # Sign in\n");
    } else {
        println!("Quick commands:");
        println!("  bisoshi product list                    # Paged product table");
        println!("  bisoshi sale create -f clientId=.. -f productId=.. -f quantity=..");
        println!("  bisoshi overview                        # Yearly sales summary");
        println!("  bisoshi chat                            # Ask the assistant\n");
    }

    println!("For more commands:");
    println!("  bisoshi --help");
}
