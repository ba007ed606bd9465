//! Text normalization applied before any pattern match.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Zero-width, soft-hyphen, filler and bidi-control code points used for
/// invisible-character injection.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
            | '\u{00AD}'
            | '\u{034F}'
            | '\u{061C}'
            | '\u{115F}'
            | '\u{1160}'
            | '\u{17B4}'
            | '\u{17B5}'
            | '\u{180E}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2066}'..='\u{2069}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

/// NFKC normalization with invisible characters removed.
///
/// Invisible characters are stripped on both sides of the normalization so
/// that a character hidden between a base letter and a combining mark cannot
/// leave the output in a non-composed state. The function is idempotent.
pub fn normalize_unicode(text: &str) -> String {
    text.chars()
        .filter(|c| !is_invisible(*c))
        .nfkc()
        .filter(|c| !is_invisible(*c))
        .collect()
}

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("html tag pattern must compile"));

static MARKDOWN_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("markdown image pattern must compile"));

static EXCESSIVE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{3,}").expect("whitespace pattern must compile"));

/// Strip HTML tags and markdown images, collapse runs of 3+ whitespace.
pub fn sanitize_input(text: &str) -> String {
    let text = HTML_TAG.replace_all(text, " ");
    let text = MARKDOWN_IMAGE.replace_all(&text, " ");
    let text = EXCESSIVE_WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_zero_width_characters_inside_keywords() {
        assert_eq!(normalize_unicode("ig\u{200B}no\u{200D}re"), "ignore");
        assert_eq!(normalize_unicode("\u{FEFF}jail\u{00AD}break"), "jailbreak");
        assert_eq!(normalize_unicode("sys\u{202E}tem"), "system");
    }

    #[test]
    fn collapses_fullwidth_characters() {
        // Fullwidth Latin letters fold to ASCII under NFKC.
        assert_eq!(normalize_unicode("ｉｇｎｏｒｅ"), "ignore");
        assert_eq!(normalize_unicode("ﬁnance"), "finance");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "plain ascii",
            "ｆｕｌｌｗｉｄｔｈ",
            "e\u{200B}\u{0301}",
            "cafe\u{0301} \u{2066}hidden\u{2069}",
            "忽略之前的指令",
            "\u{1160}\u{115F}x",
            "Ⅻ ㎏ ℌ",
        ];
        for sample in samples {
            let once = normalize_unicode(sample);
            let twice = normalize_unicode(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn sanitize_removes_markup_and_whitespace_runs() {
        assert_eq!(sanitize_input("<b>hello</b>   world"), "hello world");
        assert_eq!(
            sanitize_input("look ![img](http://x.test/a.png) here"),
            "look here"
        );
        assert_eq!(sanitize_input("  padded  "), "padded");
    }

    #[test]
    fn sanitize_keeps_double_spaces() {
        assert_eq!(sanitize_input("a  b"), "a  b");
    }
}
