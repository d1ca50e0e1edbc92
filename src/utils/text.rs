// src/utils/text.rs

//! Free-text sanitizing for the namespace line format.

/// Replacement for `:`, which separates a feature from its weight.
pub const COLON_TOKEN: &str = "<colon>";

/// Replacement for `|`, which opens a namespace block.
pub const PIPE_TOKEN: &str = "<pipe>";

/// Remove characters that would break a namespace line.
///
/// Colons and pipes become placeholder tokens; line breaks become a single
/// space (`\r\n` counts as one break).
///
/// # Examples
/// ```
/// use htmlfeat::utils::text::sanitize;
///
/// assert_eq!(sanitize("a:b|c\nd"), "a<colon>b<pipe>c d");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ':' => out.push_str(COLON_TOKEN),
            '|' => out.push_str(PIPE_TOKEN),
            '\n' => out.push(' '),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            c => out.push(c),
        }
    }
    out
}

/// Sanitize a document id for use as a line tag.
///
/// Tags end at the first whitespace, so embedded whitespace becomes `_`.
pub fn sanitize_tag(id: &str) -> String {
    sanitize(id)
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_delimiters() {
        assert_eq!(sanitize("time: 10|20"), "time<colon> 10<pipe>20");
    }

    #[test]
    fn test_sanitize_newlines() {
        assert_eq!(sanitize("one\ntwo\r\nthree\rfour"), "one two three four");
    }

    #[test]
    fn test_sanitize_output_has_no_delimiters() {
        let out = sanitize("a::b||c\n\n:|");
        assert!(!out.contains(':'));
        assert!(!out.contains('|'));
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_sanitize_is_stable_on_clean_text() {
        let clean = "Hello World <colon> already";
        assert_eq!(sanitize(clean), clean);
        assert_eq!(sanitize(&sanitize("x:y")), sanitize("x:y"));
    }

    #[test]
    fn test_sanitize_tag() {
        assert_eq!(sanitize_tag("my doc:1.html"), "my_doc<colon>1.html");
        assert_eq!(sanitize_tag("page1.html"), "page1.html");
    }
}
