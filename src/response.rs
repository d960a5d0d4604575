//! Mapping of transport responses into artifacts or errors

use crate::transport::TransportResponse;
use crate::{Error, Result};
use std::io::Read;

/// Rendered PNG, JPEG or PDF bytes, streamed from the response body
///
/// Read it to the end or drop it; either releases the underlying connection.
pub struct Artifact {
    body: Box<dyn Read + Send>,
}

impl Artifact {
    pub fn new(body: Box<dyn Read + Send>) -> Self {
        Self { body }
    }

    /// Read the whole body into memory.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Read for Artifact {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.body.read(buf)
    }
}

impl std::fmt::Debug for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifact").finish_non_exhaustive()
    }
}

/// 200 yields the body; any other status is an upstream failure and the
/// body is discarded unread.
pub fn interpret(response: TransportResponse) -> Result<Artifact> {
    log::trace!("render service answered {}", response.status);
    match response.status {
        200 => Ok(Artifact::new(response.body)),
        status => Err(Error::Upstream { status }),
    }
}
