pub mod format;
pub mod style;
pub mod table;
pub mod views;

pub use style::Palette;
pub use table::{TableView, TableViewModel};

use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
