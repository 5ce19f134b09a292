use thiserror::Error;

/// Failures reported by a metrics gateway.
///
/// The resolver hands these back to its caller unchanged.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The remote lookup failed
    #[error("Request failed: {operation} - {details}")]
    Request { operation: String, details: String },

    /// A key the lookup was scoped by does not exist
    #[error("{kind} not found: {key}")]
    NotFound { kind: String, key: String },

    /// The gateway does not understand this discovery query
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// Response or catalog document did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn request(operation: &str, details: impl Into<String>) -> Self {
        GatewayError::Request {
            operation: operation.to_string(),
            details: details.into(),
        }
    }

    pub fn not_found(kind: &str, key: &str) -> Self {
        GatewayError::NotFound {
            kind: kind.to_string(),
            key: key.to_string(),
        }
    }
}
