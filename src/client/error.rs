/// Licensing API error kinds
use thiserror::Error;

/// Failure modes of a licensing API call.
///
/// `Business` is a well-formed response the server chose to reject; the
/// payload is the server's own message. The other variants mean the call
/// never produced a usable answer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or timeout
    #[error("network error: {0}")]
    Network(String),

    /// Response was not the expected JSON shape
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Well-formed response with a non-success code
    #[error("server rejected request: {0}")]
    Business(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ApiError::Business("bad device".to_string());
        assert_eq!(err.to_string(), "server rejected request: bad device");

        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");

        let err = ApiError::Malformed("missing data field".to_string());
        assert_eq!(err.to_string(), "malformed response: missing data field");
    }
}
