//! Labels describing the negotiated HTTP version.

use axum::http::Version;

/// Human- and ALPN-facing names for an HTTP version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolInfo {
    /// e.g. `HTTP/2`
    pub name: &'static str,
    /// e.g. `2.0`
    pub version: &'static str,
    /// ALPN identifier, e.g. `h2`
    pub alpn: &'static str,
}

impl From<Version> for ProtocolInfo {
    fn from(version: Version) -> Self {
        let (name, number, alpn) = match version {
            Version::HTTP_09 => ("HTTP/0.9", "0.9", "http/0.9"),
            Version::HTTP_10 => ("HTTP/1.0", "1.0", "http/1.0"),
            Version::HTTP_2 => ("HTTP/2", "2.0", "h2"),
            Version::HTTP_3 => ("HTTP/3", "3.0", "h3"),
            _ => ("HTTP/1.1", "1.1", "http/1.1"),
        };
        Self {
            name,
            version: number,
            alpn,
        }
    }
}
