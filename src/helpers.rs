//! Small text utilities shared across extraction code.

use std::sync::OnceLock;

use regex::Regex;

fn re_script_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap())
}

fn re_style_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap())
}

fn re_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Reduce HTML to visible text: drop script/style blocks, strip tags,
/// decode the common entities, collapse whitespace.
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let text = re_script_block().replace_all(html, "");
    let text = re_style_block().replace_all(&text, "");
    let text = re_tag().replace_all(&text, " ");
    let text = decode_entities(&text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// `&amp;` last, so "&amp;lt;" decodes to "&lt;" and stops there.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        let html = "<div><p>We   would like\nto <b>schedule</b> a call.</p></div>";
        assert_eq!(strip_html(html), "We would like to schedule a call.");
    }

    #[test]
    fn test_drops_script_and_style() {
        let html = "<style>p { color: red; }</style><p>Offer inside</p><script>track();</script>";
        assert_eq!(strip_html(html), "Offer inside");
    }

    #[test]
    fn test_decodes_common_entities() {
        assert_eq!(strip_html("Fish &amp; Chips &lt;Ltd&gt;"), "Fish & Chips <Ltd>");
    }

    #[test]
    fn test_double_encoded_ampersand_decodes_once() {
        assert_eq!(strip_html("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_html(""), "");
    }
}
