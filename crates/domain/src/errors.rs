use thiserror::Error;

/// Errors produced by the wire codec and the resolution engine.
#[derive(Error, Debug, Clone)]
pub enum DnsError {
    #[error("End of buffer at position {0}")]
    OutOfBounds(usize),

    #[error("Malformed domain name: {0}")]
    MalformedName(String),

    #[error("Label exceeds 63 bytes ({0})")]
    LabelTooLong(usize),

    #[error("Malformed packet: {0}")]
    Malformed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Recursion depth limit reached")]
    DepthExceeded,
}
