//! Screenshot Client
//!
//! A blocking client for a remote rendering service that turns a webpage
//! into a PNG, JPEG or PDF. The service does the rendering; this crate
//! validates the options and encodes them into the service's query format.
//!
//! # Endpoints
//!
//! - `GET {base}/png?url=...&crop=WxH&x=X&y=Y&window=WxH&waituntil=COND`
//! - `GET {base}/jpeg?...&jpegQuality=Q`
//! - `GET {base}/pdf?url=...&window=WxH&waituntil=COND&displayHeaderFooter=B&format=F&landscape=B&margin=...`
//!
//! # Example
//!
//! ```no_run
//! use screenshot_client::{Client, Margin, PdfOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://localhost:3000")?;
//! let opts = PdfOptions {
//!     format: "A5".to_string(),
//!     landscape: true,
//!     scale: Some(1.0),
//!     margin: Margin::new("10", "20", "55px", "94%"),
//!     ..Default::default()
//! };
//! let pdf = client.pdf("https://golang.org/pkg/fmt/", &opts)?.into_bytes()?;
//! std::fs::write("doc.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod options;
pub mod query;
pub mod request;
pub mod response;
pub mod target;
pub mod transport;

pub use client::Client;
pub use error::{Error, Result};
pub use options::{Crop, ImageFormat, ImageOptions, Margin, PdfOptions, Window};
pub use request::{Endpoint, OutboundRequest};
pub use response::Artifact;
pub use transport::{HttpTransport, Transport, TransportResponse};

/// Configuration for a [`Client`]
///
/// # Examples
///
/// ```
/// let cfg = screenshot_client::ClientConfig::default();
/// assert_eq!(cfg.timeout_ms, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Per-call timeout in milliseconds, enforced by the transport
    pub timeout_ms: u64,
    /// User agent sent to the rendering service
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_ms: 10_000,
            user_agent: concat!("screenshot-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
