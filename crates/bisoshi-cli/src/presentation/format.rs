use bisoshi_types::{CellFormat, FieldRef, format_number};

pub const CURRENCY: &str = "S/.";

/// `1234.5` -> `S/. 1,234.50`
pub fn money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{} {}{}.{}", CURRENCY, sign, group_thousands(whole), cents)
}

pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn percent(value: f64) -> String {
    format!("{:+.1}%", value)
}

pub fn cell(value: Option<FieldRef<'_>>, format: CellFormat) -> String {
    match (value, format) {
        (None, _) => String::new(),
        (Some(FieldRef::Number(n)), CellFormat::Money) => money(n),
        (Some(FieldRef::Number(n)), _) => format_number(n),
        (Some(FieldRef::Text(s)), _) => s.to_string(),
    }
}

/// Cut to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_groups_thousands() {
        assert_eq!(money(0.0), "S/. 0.00");
        assert_eq!(money(999.5), "S/. 999.50");
        assert_eq!(money(1234567.891), "S/. 1,234,567.89");
        assert_eq!(money(-2500.0), "S/. -2,500.00");
    }

    #[test]
    fn test_cell_formats() {
        assert_eq!(cell(Some(FieldRef::Number(3.0)), CellFormat::Number), "3");
        assert_eq!(cell(Some(FieldRef::Number(2.5)), CellFormat::Money), "S/. 2.50");
        assert_eq!(cell(Some(FieldRef::Text("kg")), CellFormat::Text), "kg");
        assert_eq!(cell(None, CellFormat::Money), "");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Agroquímico", 20), "Agroquímico");
        assert_eq!(truncate("Agroquímico", 5), "Agro…");
    }
}
