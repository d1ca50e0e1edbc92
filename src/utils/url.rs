// src/utils/url.rs

//! URL classification for link and image targets.
//!
//! Targets are decomposed into scheme, network location and path. Relative
//! references (including the empty string) classify successfully with empty
//! components; only strings that cannot be a URL reference at all are
//! rejected.

use url::{ParseError, Url};

/// Components of a classified URL reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Lowercased scheme, empty for relative references
    pub scheme: String,
    /// `[user[:password]@]host[:port]`, empty when there is no authority
    pub netloc: String,
    /// Path without query or fragment
    pub path: String,
}

impl UrlParts {
    /// Network location with `.` replaced by `_`.
    ///
    /// # Examples
    /// ```
    /// use htmlfeat::utils::url::classify;
    ///
    /// let parts = classify(Some("http://www.a.com/x")).unwrap();
    /// assert_eq!(parts.resource(), "www_a_com");
    /// ```
    pub fn resource(&self) -> String {
        self.netloc.replace('.', "_")
    }

    /// File extension of the last path segment, without the dot.
    ///
    /// Leading dots of the segment do not start an extension, so
    /// `/.hidden` has none.
    pub fn extension(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or("");
        let stem_start = name.len() - name.trim_start_matches('.').len();
        match name[stem_start..].rfind('.') {
            Some(idx) => &name[stem_start + idx + 1..],
            None => "",
        }
    }
}

/// Classify an attribute value as a URL reference.
///
/// A missing attribute is treated like an empty reference. Returns `None`
/// for malformed input; never panics.
pub fn classify(raw: Option<&str>) -> Option<UrlParts> {
    let raw = raw.unwrap_or("").trim_matches(|c: char| c <= ' ');

    // An empty authority is valid RFC 3986 but rejected (or skipped over)
    // by WHATWG host parsing.
    if let Some(parts) = split_authority(raw).filter(|p| p.netloc.is_empty()) {
        return Some(parts);
    }

    match Url::parse(raw) {
        Ok(url) => Some(from_absolute(&url)),
        Err(ParseError::RelativeUrlWithoutBase) => classify_relative(raw),
        Err(ParseError::EmptyHost) => split_authority(raw),
        Err(_) => None,
    }
}

fn from_absolute(url: &Url) -> UrlParts {
    UrlParts {
        scheme: url.scheme().to_string(),
        netloc: netloc(url),
        path: without_params(url.path()).to_string(),
    }
}

/// Split `[scheme:]//authority[/path]` without validating the authority.
fn split_authority(raw: &str) -> Option<UrlParts> {
    let (scheme, rest) = match raw.strip_prefix("//") {
        Some(rest) => ("", rest),
        None => {
            let colon = raw.find(':')?;
            let scheme = &raw[..colon];
            let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if !valid {
                return None;
            }
            (scheme, raw[colon + 1..].strip_prefix("//")?)
        }
    };

    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    let rest = &rest[..end];
    let authority_end = rest.find('/').unwrap_or(rest.len());

    Some(UrlParts {
        scheme: scheme.to_ascii_lowercase(),
        netloc: rest[..authority_end].to_string(),
        path: without_params(&rest[authority_end..]).to_string(),
    })
}

/// Drop `;params` from the last path segment.
fn without_params(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].find(';') {
        Some(idx) => &path[..segment_start + idx],
        None => path,
    }
}

fn netloc(url: &Url) -> String {
    let mut out = String::new();
    if !url.username().is_empty() {
        out.push_str(url.username());
        if let Some(password) = url.password() {
            out.push(':');
            out.push_str(password);
        }
        out.push('@');
    }
    out.push_str(url.host_str().unwrap_or(""));
    if let Some(port) = url.port() {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out
}

fn classify_relative(raw: &str) -> Option<UrlParts> {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let reference = &raw[..end];

    // Network-path reference: "//host/path"
    if let Some(rest) = reference.strip_prefix("//") {
        let authority_end = rest.find('/').unwrap_or(rest.len());
        Url::parse(&format!("http:{raw}")).ok()?;
        return Some(UrlParts {
            scheme: String::new(),
            netloc: rest[..authority_end].to_string(),
            path: without_params(&rest[authority_end..]).to_string(),
        });
    }

    // A scheme-less first segment may not contain a colon.
    let first_segment = reference.split('/').next().unwrap_or("");
    if first_segment.contains(':') {
        return None;
    }

    Some(UrlParts {
        scheme: String::new(),
        netloc: String::new(),
        path: without_params(reference).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_absolute() {
        let parts = classify(Some("http://a.com/x")).unwrap();
        assert_eq!(parts.scheme, "http");
        assert_eq!(parts.netloc, "a.com");
        assert_eq!(parts.path, "/x");
        assert_eq!(parts.resource(), "a_com");
    }

    #[test]
    fn test_classify_keeps_port_and_userinfo() {
        let parts = classify(Some("https://bob:pw@sub.example.com:8443/p?q=1")).unwrap();
        assert_eq!(parts.netloc, "bob:pw@sub.example.com:8443");
        assert_eq!(parts.path, "/p");
    }

    #[test]
    fn test_classify_empty_and_missing() {
        assert_eq!(classify(Some("")), Some(UrlParts::default()));
        assert_eq!(classify(None), Some(UrlParts::default()));
    }

    #[test]
    fn test_classify_relative_path() {
        let parts = classify(Some("images/logo.gif?v=2")).unwrap();
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "images/logo.gif");
        assert_eq!(parts.extension(), "gif");
    }

    #[test]
    fn test_classify_network_path_reference() {
        let parts = classify(Some("//cdn.b.com/y.jpg")).unwrap();
        assert_eq!(parts.scheme, "");
        assert_eq!(parts.netloc, "cdn.b.com");
        assert_eq!(parts.path, "/y.jpg");
    }

    #[test]
    fn test_classify_non_hierarchical_schemes() {
        let parts = classify(Some("mailto:someone@example.com")).unwrap();
        assert_eq!(parts.scheme, "mailto");
        assert_eq!(parts.netloc, "");

        let parts = classify(Some("javascript:void(0)")).unwrap();
        assert_eq!(parts.scheme, "javascript");
    }

    #[test]
    fn test_classify_rejects_malformed() {
        assert_eq!(classify(Some("not a url:::")), None);
        assert_eq!(classify(Some("http://[::1")), None);
        assert_eq!(classify(Some("http://a.com:99999/")), None);
        assert_eq!(classify(Some("//bad host/x")), None);
    }

    #[test]
    fn test_classify_empty_authority() {
        assert_eq!(classify(Some("//")), Some(UrlParts::default()));

        let parts = classify(Some("http://")).unwrap();
        assert_eq!(parts.scheme, "http");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "");

        let parts = classify(Some("https:///x.png")).unwrap();
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "/x.png");
        assert_eq!(parts.extension(), "png");

        let parts = classify(Some("///img/a.gif?x=1")).unwrap();
        assert_eq!(parts.netloc, "");
        assert_eq!(parts.path, "/img/a.gif");
    }

    #[test]
    fn test_path_params_dropped() {
        let parts = classify(Some("http://b.com/y.png;jsessionid=1")).unwrap();
        assert_eq!(parts.path, "/y.png");
        assert_eq!(parts.extension(), "png");

        let parts = classify(Some("img/z.gif;v=2?q")).unwrap();
        assert_eq!(parts.extension(), "gif");

        let parts = classify(Some("//cdn.c.org/a;b/w.jpg;s=9")).unwrap();
        assert_eq!(parts.path, "/a;b/w.jpg");
        assert_eq!(parts.extension(), "jpg");
    }

    #[test]
    fn test_extension_rules() {
        let ext = |path: &str| {
            UrlParts {
                path: path.to_string(),
                ..UrlParts::default()
            }
            .extension()
            .to_string()
        };
        assert_eq!(ext("/y.png"), "png");
        assert_eq!(ext("/a/b.tar.gz"), "gz");
        assert_eq!(ext("/dir.d/file"), "");
        assert_eq!(ext("/.hidden"), "");
        assert_eq!(ext("/..png"), "");
        assert_eq!(ext("/.a.png"), "png");
        assert_eq!(ext("/trailing."), "");
        assert_eq!(ext(""), "");
    }
}
