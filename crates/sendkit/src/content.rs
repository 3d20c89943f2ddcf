//! Body content kinds and HTML detection.

use std::sync::Arc;

/// Content kind of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `text/plain` body.
    Plain,
    /// `text/html` body.
    Html,
}

/// Pluggable predicate deciding whether text contains HTML markup.
pub type HtmlClassifier = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Default HTML detection.
///
/// Reports true when the text contains something shaped like a tag: `<`,
/// optionally `/`, then a word character, space or dash, with a `>`
/// somewhere after it. Deliberately loose; substitute a classifier via
/// [`Email::set_html_classifier`](crate::Email::set_html_classifier) for
/// stricter rules.
#[must_use]
pub fn looks_like_html(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c != '<' {
            continue;
        }

        let mut j = i + 1;
        if chars.get(j) == Some(&'/') {
            j += 1;
        }

        let Some(&next) = chars.get(j) else {
            continue;
        };

        let tag_ish = next.is_alphanumeric() || matches!(next, '_' | ' ' | '-');
        if tag_ish && chars[j..].contains(&'>') {
            return true;
        }
    }

    false
}

/// Wraps body text in the default styled container used for HTML bodies
/// that carry no markup of their own.
#[must_use]
pub fn apply_default_styling(body: &str) -> String {
    format!("<div style=\"font-family: Verdana; font-color: #262626\">{body}</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_tags() {
        assert!(looks_like_html("<p>hello</p>"));
        assert!(looks_like_html("before <div class=\"x\">after"));
        assert!(looks_like_html("</div>"));
    }

    #[test]
    fn test_plain_text() {
        assert!(!looks_like_html("just words"));
        assert!(!looks_like_html(""));
        assert!(!looks_like_html("x < 3"));
    }

    #[test]
    fn test_loose_comparison_quirk() {
        // "< b" followed by a later ">" reads as a tag; the default
        // classifier is intentionally permissive
        assert!(looks_like_html("a < b and c > d"));
    }

    #[test]
    fn test_styling_wrapper() {
        let wrapped = apply_default_styling("hello");
        assert!(wrapped.starts_with("<div style="));
        assert!(wrapped.ends_with("hello</div>"));
        assert!(looks_like_html(&wrapped));
    }
}
