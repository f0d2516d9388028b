use super::enums::SortOrder;
use clap::Args;

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive substring of the name")]
    pub filter: Option<String>,

    #[arg(long, help = "Column to sort by")]
    pub sort: Option<String>,

    #[arg(long, requires = "sort")]
    pub order: Option<SortOrder>,

    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows_per_page: Option<u32>,

    #[arg(long, help = "Print every matching row instead of one page")]
    pub all: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    #[arg(
        long = "field",
        short = 'f',
        value_name = "NAME=VALUE",
        value_parser = parse_field,
        help = "Form field assignment (repeatable)"
    )]
    pub fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_keeps_equals_in_value() {
        assert_eq!(
            parse_field("contact=a=b").unwrap(),
            ("contact".to_string(), "a=b".to_string())
        );
        assert!(parse_field("price").is_err());
        assert!(parse_field("=3").is_err());
    }
}
