//! Group search extension point and input sanitizing.

pub mod cache;

pub use cache::{search_key, Clock, SearchCache, SearchKey, SystemClock};

use crate::types::{GroupDetails, PostId};

/// External group lookup used by the admin UI's "Find" box.
pub trait GroupSearch {
    /// Returns groups matching `text`. `previous` carries any result an earlier
    /// lookup produced for the same request; implementations may extend or
    /// replace it.
    fn search(&self, previous: Option<Vec<GroupDetails>>, text: &str, post_id: PostId) -> Vec<GroupDetails>;

    /// Enriches the basic record of an already assigned group. The default
    /// returns it unchanged.
    fn details(&self, details: GroupDetails) -> GroupDetails {
        details
    }
}

/// Search backend with no external source: returns whatever it was handed.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoSearch;

impl GroupSearch for NoSearch {
    fn search(&self, previous: Option<Vec<GroupDetails>>, _text: &str, _post_id: PostId) -> Vec<GroupDetails> {
        previous.unwrap_or_default()
    }
}

/// Cleans free text from a form field: control characters and complete
/// `<...>` tags are removed, whitespace runs collapse to a single space and
/// the result is trimmed.
///
/// A `<` that is not closed by a `>` before the next `<` or the end of the
/// input is ordinary text and is kept.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some(end) = tag_end(rest) {
                rest = &rest[end + 1..];
                continue;
            }
        }
        match ch {
            c if c.is_whitespace() => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Byte offset of the `>` closing the tag that opens at the start of `text`.
fn tag_end(text: &str) -> Option<usize> {
    let offset = text[1..].find(['<', '>'])? + 1;
    (text.as_bytes()[offset] == b'>').then_some(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  eng   dept \n"), "eng dept");
        assert_eq!(sanitize_text("<b>staff</b>"), "staff");
        assert_eq!(sanitize_text("a\u{0}b"), "ab");
        assert_eq!(sanitize_text("   "), "");
    }

    #[test]
    fn test_sanitize_keeps_unclosed_angle_bracket() {
        assert_eq!(sanitize_text("a<b staff"), "a<b staff");
        assert_eq!(sanitize_text("<3 team"), "<3 team");
        assert_eq!(sanitize_text("1 < 2 <i>x</i>"), "1 < 2 x");
        assert_eq!(sanitize_text("<<b>>"), "<>");
        assert_eq!(sanitize_text("trailing <"), "trailing <");
    }

    #[test]
    fn test_no_search_passes_previous_through() {
        assert!(NoSearch.search(None, "staff", 1).is_empty());
        let prev = vec![GroupDetails::basic("staff")];
        assert_eq!(NoSearch.search(Some(prev.clone()), "staff", 1), prev);
    }
}
