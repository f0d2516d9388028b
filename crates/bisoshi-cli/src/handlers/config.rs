use super::HandlerContext;
use crate::args::ConfigCommand;
use crate::presentation::print_json;
use anyhow::Result;
use bisoshi_runtime::Config;
use std::path::Path;

pub fn handle(data_dir: &Path, command: ConfigCommand, ctx: &HandlerContext) -> Result<()> {
    let path = bisoshi_core::config_path(data_dir);

    match command {
        ConfigCommand::Show => {
            let config = Config::load_from(&path)?.redacted();
            if ctx.is_json() {
                print_json(&config)?;
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.set(&key, &value)?;
            config.save_to(&path)?;
            let shown = if key.ends_with("token") { "********" } else { value.as_str() };
            println!("Set {} = {}", key, shown);
        }
        ConfigCommand::Path => println!("{}", path.display()),
    }
    Ok(())
}
