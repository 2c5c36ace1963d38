//! The gateway's tamper-evident signature scheme.
//!
//! A signature is the MD5 digest of `secret:value1:value2:...`, where the
//! values are taken from the outbound field set in the order given by the
//! configured colon-delimited pattern, rendered as lowercase hex. The remote
//! system's verification is hard-coded to this scheme; the algorithm must
//! stay MD5/lowercase-hex for wire compatibility.

use error_stack::ResultExt;
use masking::{PeekInterface, Secret};

use crate::{
    consts::SIGNATURE_PATTERN_DELIMITER,
    errors::{ConnectorError, CryptoError, CustomResult},
    types::FieldSet,
};

/// Trait for producing a message digest
pub trait GenerateDigest {
    /// Takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, CryptoError>;
}

/// MD5 hash function
#[derive(Debug)]
pub struct Md5;

impl GenerateDigest for Md5 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, CryptoError> {
        let digest = md5::compute(message);
        Ok(digest.as_ref().to_vec())
    }
}

/// Signs the field set with the configured secret and pattern, returning the
/// lowercase hex digest to place in the `signature` form field.
///
/// Fails when the pattern is empty or names a field missing from `fields`;
/// a silently substituted empty value would produce a signature the gateway
/// rejects, so the lookup failure is a hard error instead.
pub fn sign(
    secret: &Secret<String>,
    pattern: &str,
    fields: &FieldSet,
) -> CustomResult<String, ConnectorError> {
    let input = signature_input(secret, pattern, fields)?;
    let digest = Md5
        .generate_digest(input.peek().as_bytes())
        .change_context(ConnectorError::RequestEncodingFailed)?;
    Ok(hex::encode(digest))
}

/// Recomputes the signature and compares it with a presented one.
///
/// The merchant-side counterpart to [`sign`], for checking gateway-provided
/// signatures if ever required. Comparison is on the canonical lowercase hex
/// rendering.
pub fn verify(
    secret: &Secret<String>,
    pattern: &str,
    fields: &FieldSet,
    signature: &str,
) -> CustomResult<bool, ConnectorError> {
    let expected = sign(secret, pattern, fields)?;
    Ok(expected == signature.to_lowercase())
}

/// Assembles the digest input: the secret, then each pattern field's value,
/// joined by the pattern delimiter in pattern order.
fn signature_input(
    secret: &Secret<String>,
    pattern: &str,
    fields: &FieldSet,
) -> CustomResult<Secret<String>, ConnectorError> {
    if pattern.trim().is_empty() {
        return Err(ConnectorError::InvalidConnectorConfig {
            config: "signature_pattern",
        }
        .into());
    }

    let mut input = secret.peek().clone();
    for key in pattern.split(SIGNATURE_PATTERN_DELIMITER) {
        let value = fields
            .get(key)
            .ok_or(ConnectorError::InvalidConnectorConfig {
                config: "signature_pattern",
            })
            .attach_printable_lazy(|| {
                format!("pattern references field `{key}` absent from the request")
            })?;
        input.push(SIGNATURE_PATTERN_DELIMITER);
        input.push_str(value);
    }
    Ok(Secret::new(input))
}
