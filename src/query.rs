//! Query-string encoding for the render endpoints
//!
//! Fragments are emitted in a fixed order so that identical options always
//! produce identical URLs. The service does not care about order.

use crate::options::{ImageFormat, ImageOptions, PdfOptions};
use crate::target;
use crate::Result;

/// Ordered `key=value` pairs with values already escaped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a free-form value, escaping only what would break the query.
    pub fn push(&mut self, key: &'static str, value: impl AsRef<str>) {
        self.pairs.push((key, escape_value(value.as_ref())));
    }

    /// Append a value that is already safe to place in a query.
    pub fn push_encoded(&mut self, key: &'static str, value: String) {
        self.pairs.push((key, value));
    }

    /// Append `value` only if it is non-empty.
    fn push_non_empty(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.push(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

/// Encode a PNG or JPEG request.
///
/// Order: `url`, `crop` (+ `x`/`y`), `window`, `waituntil`, `jpegQuality`.
pub fn encode_image(website_url: &str, opts: &ImageOptions, format: ImageFormat) -> Result<Query> {
    let mut query = target_query(website_url)?;

    if let Some(crop) = &opts.crop {
        let (w, h) = crop.dimensions()?;
        query.push_encoded("crop", format!("{}x{}", w, h));
        if let Some(x) = crop.x {
            query.push_encoded("x", x.to_string());
        }
        if let Some(y) = crop.y {
            query.push_encoded("y", y.to_string());
        }
    }

    if let Some(window) = &opts.window {
        let (w, h) = window.dimensions()?;
        query.push_encoded("window", format!("{}x{}", w, h));
    }

    query.push_non_empty("waituntil", opts.wait_until.as_deref());

    if let ImageFormat::Jpeg { quality } = format {
        query.push_encoded("jpegQuality", quality.to_string());
    }

    Ok(query)
}

/// Encode a PDF request.
///
/// `displayHeaderFooter`, `landscape` and `margin` are always present; the
/// service has no default for them that differs from "false"/empty.
pub fn encode_pdf(website_url: &str, opts: &PdfOptions) -> Result<Query> {
    let mut query = target_query(website_url)?;

    if let Some(window) = &opts.window {
        let (w, h) = window.dimensions()?;
        query.push_encoded("window", format!("{}x{}", w, h));
    }

    query.push_non_empty("waituntil", opts.wait_until.as_deref());
    query.push_encoded("displayHeaderFooter", opts.display_header_footer.to_string());
    query.push_non_empty("format", Some(opts.format.as_str()));
    query.push_encoded("landscape", opts.landscape.to_string());

    let m = &opts.margin;
    query.push_encoded(
        "margin",
        format!(
            "top:{};right:{};bottom:{};left:{}",
            escape_value(&m.top),
            escape_value(&m.right),
            escape_value(&m.bottom),
            escape_value(&m.left)
        ),
    );

    query.push_non_empty("pageRanges", Some(opts.page_ranges.as_str()));
    query.push_non_empty("path", Some(opts.path.as_str()));

    if let Some(scale) = opts.scale {
        query.push_encoded("scale", format!("{:.6}", scale));
    }

    if opts.print_background {
        query.push_encoded("printBackground", "true".to_string());
    }

    Ok(query)
}

fn target_query(website_url: &str) -> Result<Query> {
    let url = target::normalize(website_url)?;
    let mut query = Query::new();
    query.push_encoded("url", target::encode_url_param(&url));
    Ok(query)
}

/// Percent-encode the characters that would split or truncate a query value.
/// Separators the service parses itself (`:`, `;`, `,`) and CSS `%` stay literal.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut buf = [0u8; 4];
    for c in value.chars() {
        let breaks_query = matches!(c, '&' | '#' | '+' | '=') || c.is_whitespace() || c.is_control();
        if c.is_ascii() && !breaks_query {
            out.push(c);
        } else {
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}
