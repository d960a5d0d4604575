//! Outbound request assembly

use crate::query::Query;
use crate::{Error, Result};
use std::collections::HashMap;
use url::Url;

/// Render endpoint exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Png,
    Jpeg,
    Pdf,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Png => "/png",
            Endpoint::Jpeg => "/jpeg",
            Endpoint::Pdf => "/pdf",
        }
    }
}

/// A GET request ready to hand to a [`crate::Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub endpoint: Endpoint,
    pub url: Url,
    /// Caller headers, sorted by name
    pub headers: Vec<(String, String)>,
}

/// Build `<base><path>?<query>` and attach `headers` as given.
pub fn build(
    base_url: &str,
    endpoint: Endpoint,
    query: &Query,
    headers: &HashMap<String, String>,
) -> Result<OutboundRequest> {
    let raw = format!(
        "{}{}?{}",
        base_url.trim_end_matches('/'),
        endpoint.path(),
        query
    );
    let url = Url::parse(&raw)
        .map_err(|e| Error::RequestConstruction(format!("{:?} is not a valid URL: {}", raw, e)))?;

    let mut headers: Vec<(String, String)> = headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    headers.sort();

    Ok(OutboundRequest {
        endpoint,
        url,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ImageFormat, ImageOptions};
    use crate::query::encode_image;

    fn query() -> Query {
        encode_image("https://golang.org/pkg/fmt/", &ImageOptions::default(), ImageFormat::Png).unwrap()
    }

    #[test]
    fn joins_base_path_and_query() {
        let req = build("http://localhost:3000", Endpoint::Png, &query(), &HashMap::new()).unwrap();
        assert_eq!(
            req.url.as_str(),
            "http://localhost:3000/png?url=https%3A%2F%2Fgolang.org%2Fpkg%2Ffmt%2F"
        );
        assert!(req.headers.is_empty());
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let req = build("http://render.local:8080/", Endpoint::Pdf, &query(), &HashMap::new()).unwrap();
        assert_eq!(req.url.path(), "/pdf");
    }

    #[test]
    fn base_with_prefix_keeps_prefix() {
        let req = build("https://api.example.com/render/v1", Endpoint::Jpeg, &query(), &HashMap::new()).unwrap();
        assert_eq!(req.url.path(), "/render/v1/jpeg");
    }

    #[test]
    fn headers_pass_through_verbatim() {
        let mut headers = HashMap::new();
        headers.insert("X-Trace".to_string(), "abc".to_string());
        headers.insert("Cookie".to_string(), "session=1; theme=dark".to_string());
        headers.insert("Host".to_string(), "upstream.internal".to_string());

        let req = build("http://localhost:3000", Endpoint::Png, &query(), &headers).unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("Cookie".to_string(), "session=1; theme=dark".to_string()),
                ("Host".to_string(), "upstream.internal".to_string()),
                ("X-Trace".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn bad_base_url_is_a_construction_error() {
        for base in ["", "not a base", "http://[::1"] {
            let err = build(base, Endpoint::Png, &query(), &HashMap::new()).unwrap_err();
            assert!(matches!(err, Error::RequestConstruction(_)), "{:?}", base);
        }
    }
}
