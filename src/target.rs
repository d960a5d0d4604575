//! Normalization of the website URL that is being rendered
//!
//! The website URL travels inside the `url=` parameter of the outer request,
//! so its own query has to survive one extra round of decoding on the
//! service side. A query that is not yet escaped gets escaped here; one that
//! already is stays as it is, so normalizing twice gives the same result as
//! normalizing once.

use crate::{Error, Result};
use url::{form_urlencoded, Url};

/// Parse `website_url` and escape its query component if it is still raw.
pub fn normalize(website_url: &str) -> Result<Url> {
    let mut parsed = Url::parse(website_url).map_err(|e| Error::InvalidUrl {
        url: website_url.to_string(),
        reason: e.to_string(),
    })?;

    if let Some(raw) = parsed.query().map(str::to_owned) {
        let decoded = unescape_query(&raw)?;
        if decoded == raw {
            let escaped: String = form_urlencoded::byte_serialize(raw.as_bytes()).collect();
            parsed.set_query(Some(&escaped));
        }
    }

    Ok(parsed)
}

/// Value for the outer `url=` parameter.
///
/// Reserved characters are percent-encoded; `%XX` sequences already in the
/// URL are kept so the inner escaping layer is not doubled.
pub fn encode_url_param(url: &Url) -> String {
    let s = url.as_str();
    let mut out = String::with_capacity(s.len() * 2);
    let mut rest = s;

    while let Some(pos) = rest.find('%') {
        out.push_str(&urlencoding::encode(&rest[..pos]));
        let tail = &rest[pos..];
        if is_escape_sequence(tail.as_bytes()) {
            out.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            out.push_str("%25");
            rest = &tail[1..];
        }
    }
    out.push_str(&urlencoding::encode(rest));
    out
}

/// Decode a query with form rules: `+` is a space and every `%` must start
/// a two-digit hex escape. The decoded bytes must be UTF-8.
pub(crate) fn unescape_query(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if !is_escape_sequence(&bytes[i..]) {
                let end = (i + 3).min(bytes.len());
                return Err(Error::MalformedQueryEscaping(format!(
                    "invalid escape {:?} in query {:?}",
                    String::from_utf8_lossy(&bytes[i..end]),
                    raw
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    urlencoding::decode(&raw.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::MalformedQueryEscaping(format!("query {:?} is not UTF-8: {}", raw, e)))
}

fn is_escape_sequence(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0] == b'%' && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_query_gets_escaped() {
        let url = normalize("https://example.com/page?a=1&b=2").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page?a%3D1%26b%3D2");
    }

    #[test]
    fn escaped_query_is_left_alone() {
        let once = normalize("https://example.com/page?a=1&b=2").unwrap();
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);

        let pre = normalize("https://example.com/search?q%3Drust%26page%3D2").unwrap();
        assert_eq!(pre.query(), Some("q%3Drust%26page%3D2"));
    }

    #[test]
    fn escaped_query_decodes_back_to_original() {
        let original = "q=rust&lang=en-US&tags=a,b";
        let url = normalize(&format!("https://example.com/?{}", original)).unwrap();
        let decoded = unescape_query(url.query().unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn url_without_query_is_unchanged() {
        let url = normalize("https://golang.org/pkg/fmt/").unwrap();
        assert_eq!(url.as_str(), "https://golang.org/pkg/fmt/");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn unparseable_url_is_rejected() {
        assert!(matches!(normalize("not a url"), Err(Error::InvalidUrl { .. })));
        assert!(matches!(normalize(""), Err(Error::InvalidUrl { .. })));
    }

    #[test]
    fn broken_escape_is_rejected() {
        assert!(matches!(
            normalize("https://example.com/?a=%zz"),
            Err(Error::MalformedQueryEscaping(_))
        ));
        assert!(matches!(
            normalize("https://example.com/?a=%4"),
            Err(Error::MalformedQueryEscaping(_))
        ));
        assert!(matches!(
            normalize("https://example.com/?a=%ff"),
            Err(Error::MalformedQueryEscaping(_))
        ));
    }

    #[test]
    fn url_param_keeps_existing_escapes() {
        let url = normalize("https://example.com/page?a=1&b=2").unwrap();
        assert_eq!(
            encode_url_param(&url),
            "https%3A%2F%2Fexample.com%2Fpage%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn url_param_escapes_plain_url() {
        let url = normalize("https://golang.org/pkg/fmt/").unwrap();
        assert_eq!(encode_url_param(&url), "https%3A%2F%2Fgolang.org%2Fpkg%2Ffmt%2F");
    }
}
