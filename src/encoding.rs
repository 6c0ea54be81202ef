//! Response body decompression.
//!
//! Providers answering a `Accept-Encoding: gzip, deflate` request may
//! compress the response body. The coding is a closed set selected by a
//! lookup on the normalized `Content-Encoding` header value; unrecognized
//! values fall back to identity.

use std::io::{self, Read};

use flate2::read::{DeflateDecoder, GzDecoder};

/// Content coding of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Identity,
    Gzip,
    Deflate,
}

impl ContentCoding {
    /// Select a coding from a `Content-Encoding` header value.
    ///
    /// Matching is case-insensitive; a missing or unrecognized header
    /// selects `Identity`.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("gzip") => Self::Gzip,
            Some("deflate") => Self::Deflate,
            _ => Self::Identity,
        }
    }

    /// Decode `body` according to this coding.
    pub fn decode(self, body: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            Self::Identity => Ok(body.to_vec()),
            Self::Gzip => {
                let mut out = Vec::new();
                GzDecoder::new(body).read_to_end(&mut out)?;
                Ok(out)
            }
            // Raw deflate without zlib framing. Most servers send a
            // zlib-wrapped stream for `Content-Encoding: deflate`; those
            // bodies will not decode here.
            Self::Deflate => {
                let mut out = Vec::new();
                DeflateDecoder::new(body).read_to_end(&mut out)?;
                Ok(out)
            }
        }
    }
}
