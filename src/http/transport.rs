//! Classification of reqwest failures into [`TransportError`] variants.

use crate::error::TransportError;

/// Fragments that identify a TLS problem somewhere in an error's source chain.
///
/// The rustls entries match its protocol errors, e.g. "received corrupt
/// message of type InvalidContentType" when the peer does not speak TLS.
const TLS_MARKERS: [&str; 8] = [
    "tls",
    "certificate",
    "handshake",
    "ssl",
    "corrupt message",
    "fatal alert",
    "peer is incompatible",
    "peer misbehaved",
];

/// Maps a reqwest failure onto the transport error taxonomy.
///
/// Timeouts are recognised directly; TLS failures surface from rustls as
/// nested sources of a connect error, so they are detected from the
/// rendered chain. Everything else counts as a failed connection.
pub fn classify_transport_error(error: &reqwest::Error) -> TransportError {
    let detail = error_chain(error);

    if error.is_timeout() {
        TransportError::Timeout(detail)
    } else if looks_like_tls(&detail) {
        TransportError::TlsError(detail)
    } else {
        TransportError::ConnectionFailed(detail)
    }
}

/// Renders an error and all of its sources as "outer: inner: root".
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

fn looks_like_tls(detail: &str) -> bool {
    let lower = detail.to_ascii_lowercase();
    TLS_MARKERS.iter().any(|marker| lower.contains(marker))
}
