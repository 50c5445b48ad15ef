//! Upstream client error types.

/// Errors from the tutu.ru HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum TutuError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-200 status code
    #[error("upstream returned status {status}")]
    Status { status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TutuError::Status { status: 503 };
        assert_eq!(err.to_string(), "upstream returned status 503");
    }
}
