//! High-level client for the rendering service

use crate::options::{ImageFormat, ImageOptions, PdfOptions};
use crate::query::{self, Query};
use crate::request::{self, Endpoint};
use crate::response::{self, Artifact};
use crate::transport::{HttpTransport, Transport};
use crate::{ClientConfig, Result};
use std::collections::HashMap;

/// Client for one rendering service
///
/// Holds immutable configuration and a transport handle, so a single
/// instance can be shared between threads. Every call is one blocking
/// round trip.
///
/// ```no_run
/// use screenshot_client::{Client, ImageOptions, Window};
///
/// # fn main() -> screenshot_client::Result<()> {
/// let client = Client::new("http://localhost:3000")?;
/// let opts = ImageOptions {
///     window: Some(Window::new(1000, 1000)),
///     wait_until: Some("networkidle0".into()),
///     ..Default::default()
/// };
/// let png = client.png("https://golang.org/pkg/fmt/", &opts)?.into_bytes()?;
/// assert!(!png.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl Client<HttpTransport> {
    /// Client for `base_url` with default timeout and user agent.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> Client<T> {
    /// Client that sends through a caller-provided transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Render `website_url` as PNG.
    pub fn png(&self, website_url: &str, opts: &ImageOptions) -> Result<Artifact> {
        let query = query::encode_image(website_url, opts, ImageFormat::Png)?;
        self.render(Endpoint::Png, &query, &opts.headers)
    }

    /// Render `website_url` as JPEG. `quality` is forwarded unchecked.
    pub fn jpeg(&self, website_url: &str, opts: &ImageOptions, quality: i32) -> Result<Artifact> {
        let query = query::encode_image(website_url, opts, ImageFormat::Jpeg { quality })?;
        self.render(Endpoint::Jpeg, &query, &opts.headers)
    }

    /// Render `website_url` as PDF.
    pub fn pdf(&self, website_url: &str, opts: &PdfOptions) -> Result<Artifact> {
        let query = query::encode_pdf(website_url, opts)?;
        self.render(Endpoint::Pdf, &query, &opts.headers)
    }

    /// Drop the transport and its pooled connections.
    pub fn close(self) -> Result<()> {
        Ok(())
    }

    fn render(&self, endpoint: Endpoint, query: &Query, headers: &HashMap<String, String>) -> Result<Artifact> {
        let req = request::build(&self.config.base_url, endpoint, query, headers)?;
        log::debug!("GET {} ({} headers)", req.url, req.headers.len());
        let res = self.transport.send(&req)?;
        response::interpret(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::OutboundRequest;
    use crate::transport::TransportResponse;
    use crate::{Crop, Error, Window};
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Records requests and answers with a fixed status.
    struct RecordingTransport {
        status: u16,
        seen: Mutex<Vec<OutboundRequest>>,
    }

    impl RecordingTransport {
        fn new(status: u16) -> Self {
            Self {
                status,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: &OutboundRequest) -> Result<TransportResponse> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(TransportResponse {
                status: self.status,
                body: Box::new(Cursor::new(b"artifact".to_vec())),
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn send(&self, _request: &OutboundRequest) -> Result<TransportResponse> {
            Err(Error::Timeout(10_000))
        }
    }

    fn client(status: u16) -> Client<RecordingTransport> {
        Client::with_transport(ClientConfig::default(), RecordingTransport::new(status))
    }

    #[test]
    fn png_hits_png_endpoint_with_headers() {
        let c = client(200);
        let mut opts = ImageOptions {
            window: Some(Window::new(1000, 1000)),
            crop: Some(Crop::new(100, 100).with_offset(50, 70)),
            ..Default::default()
        };
        opts.headers.insert("Key".into(), "Value".into());

        let body = c.png("https://golang.org/pkg/fmt/", &opts).unwrap().into_bytes().unwrap();
        assert_eq!(body, b"artifact");

        let seen = c.transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].endpoint, Endpoint::Png);
        assert_eq!(seen[0].url.path(), "/png");
        assert_eq!(seen[0].headers, vec![("Key".to_string(), "Value".to_string())]);
    }

    #[test]
    fn jpeg_and_pdf_use_their_endpoints() {
        let c = client(200);
        c.jpeg("https://example.com", &ImageOptions::default(), 90).unwrap();
        c.pdf("https://example.com", &PdfOptions::default()).unwrap();

        let seen = c.transport.seen.lock().unwrap();
        assert_eq!(seen[0].url.path(), "/jpeg");
        assert!(seen[0].url.query().unwrap().ends_with("jpegQuality=90"));
        assert_eq!(seen[1].url.path(), "/pdf");
    }

    #[test]
    fn validation_errors_never_reach_transport() {
        let c = client(200);
        let opts = ImageOptions {
            window: Some(Window {
                width: Some(10),
                height: None,
            }),
            ..Default::default()
        };
        assert!(matches!(
            c.png("https://example.com", &opts),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(c.transport.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn upstream_status_is_reported() {
        let c = client(500);
        let err = c.pdf("https://example.com", &PdfOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Upstream { status: 500 }));
    }

    #[test]
    fn transport_errors_propagate() {
        let c = Client::with_transport(ClientConfig::default(), FailingTransport);
        let err = c.png("https://example.com", &ImageOptions::default()).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Client>();
    }
}
