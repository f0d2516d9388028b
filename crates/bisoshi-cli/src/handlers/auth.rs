use super::HandlerContext;
use crate::args::AuthCommand;
use crate::presentation::print_json;
use anyhow::Result;
use bisoshi_api::Transport;
use bisoshi_sdk::Client;
use bisoshi_types::RegisterRequest;
use serde_json::json;

pub async fn handle<T: Transport + Clone>(
    client: &Client<T>,
    command: AuthCommand,
    ctx: &HandlerContext,
) -> Result<()> {
    match command {
        AuthCommand::Login { email, password } => {
            client.login(&email, &password).await?;
            println!("{}", ctx.palette.good(&format!("Signed in as {}", email)));
        }
        AuthCommand::Register {
            ruc,
            company_name,
            email,
            password,
            cellphone,
        } => {
            let request = RegisterRequest {
                ruc,
                company_name,
                email,
                password,
                cellphone,
            };
            client.register(&request).await?;
            println!("Account created for {}", request.company_name);
            println!("Sign in with: bisoshi auth login --email {}", request.email);
        }
        AuthCommand::Logout => {
            let was_signed_in = client.session().is_signed_in();
            client.logout()?;
            if was_signed_in {
                println!("Signed out");
            } else {
                println!("Not signed in");
            }
        }
        AuthCommand::Status => {
            let signed_in = client.session().is_signed_in();
            if ctx.is_json() {
                print_json(&json!({
                    "signed_in": signed_in,
                    "base_url": client.config().api.base_url,
                }))?;
            } else if signed_in {
                println!("Signed in ({})", client.config().api.base_url);
            } else {
                println!("Not signed in");
            }
        }
    }
    Ok(())
}
