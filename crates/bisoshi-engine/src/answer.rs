use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_REPLY: &str = "Sorry, I did not understand your question. Could you rephrase it?";

static BRACKET_CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]*【[^】]*】").unwrap());
static NUMERIC_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[\^?\d+(?:[,\s]+\d+)*\]").unwrap());
static CITE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<cite[^>]*/>|<cite[^>]*>.*?</cite>").unwrap());
static LIST_NUMBERING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+[.)][ \t]+").unwrap());
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*|__").unwrap());
static TRAILING_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Clean a chatbot answer for plain-text display.
///
/// Citation markers and markdown decoration are removed; line structure is
/// kept. An answer that is empty after cleaning becomes [`DEFAULT_REPLY`].
pub fn sanitize_answer(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let text = BRACKET_CITATION.replace_all(&text, "");
    let text = CITE_TAG.replace_all(&text, "");
    let text = NUMERIC_CITATION.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = LIST_NUMBERING.replace_all(&text, "");
    let text = EMPHASIS.replace_all(&text, "");
    let text = TRAILING_SPACE.replace_all(&text, "");
    let text = BLANK_RUN.replace_all(&text, "\n\n");

    let cleaned = text.trim();
    if cleaned.is_empty() {
        DEFAULT_REPLY.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_citations() {
        assert_eq!(
            sanitize_answer("Register with SUNAT first【4:0†source】 [1]."),
            "Register with SUNAT first."
        );
        assert_eq!(
            sanitize_answer("Use a CRM<cite>doc 3</cite> daily[^2]"),
            "Use a CRM daily"
        );
    }

    #[test]
    fn test_strips_markdown_numbering_and_emphasis() {
        let raw = "## Steps\n1. **Open** the app\n2) Sign in\n\n\n\nDone  ";
        insta::assert_snapshot!(sanitize_answer(raw), @r"
        Steps
        Open the app
        Sign in

        Done
        ");
    }

    #[test]
    fn test_empty_answer_falls_back() {
        assert_eq!(sanitize_answer("  【1†x】 "), DEFAULT_REPLY);
        assert_eq!(sanitize_answer(""), DEFAULT_REPLY);
    }
}
