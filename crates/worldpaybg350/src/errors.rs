//! Error types surfaced by the connector

/// Type alias for `Result` with an `error_stack::Report` error variant
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Errors produced while building outbound requests or handling inbound
/// callbacks. Inbound authentication failures and unexpected gateway statuses
/// are not errors; they degrade to an acknowledgement instead.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Invalid connector configuration: {config}")]
    InvalidConnectorConfig { config: &'static str },
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid data format for field: {field_name}")]
    InvalidDataFormat { field_name: &'static str },
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to decode webhook event body")]
    WebhookBodyDecodingFailed,
}

/// Cryptographic algorithm errors
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The cryptographic algorithm was unable to encode the message
    #[error("Failed to encode given message")]
    EncodingFailed,
    /// The cryptographic algorithm was unable to sign the message
    #[error("Failed to sign message")]
    MessageSigningFailed,
}
