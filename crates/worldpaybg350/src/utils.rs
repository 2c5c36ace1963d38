//! Inbound request plumbing: one-shot parsing of query and form parameters

use std::collections::HashMap;

use error_stack::ResultExt;

use crate::errors::{ConnectorError, CustomResult};

pub(crate) fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<ConnectorError>> {
    Box::new(move || {
        ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Parsed query-string parameters of an inbound callback request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    /// Decodes a raw query string. Later duplicates of a key win.
    pub fn parse(raw_query: &str) -> CustomResult<Self, ConnectorError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw_query)
            .change_context(ConnectorError::WebhookBodyDecodingFailed)?;
        Ok(Self(pairs.into_iter().collect()))
    }

    /// Looks up a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Parsed body (form) parameters of an inbound callback request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormParams(HashMap<String, String>);

impl FormParams {
    /// Decodes a urlencoded request body. Later duplicates of a key win.
    pub fn parse(body: &[u8]) -> CustomResult<Self, ConnectorError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .change_context(ConnectorError::WebhookBodyDecodingFailed)?;
        Ok(Self(pairs.into_iter().collect()))
    }

    /// Looks up a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Renders `key=value` pairs for diagnostic logging.
    pub fn to_friendly_string(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An inbound callback request, parsed exactly once.
///
/// The hosting model's body stream is not rewindable, so the host parses the
/// request up front and passes this value in; the processor never re-reads
/// or re-parses anything. The value lives for one request and is never
/// shared across requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallbackRequest {
    /// Query-string parameters; only the message-type discriminator is read
    /// from here
    pub query: QueryParams,
    /// Form parameters; status, amounts, transaction id, password and order
    /// reference all come from here
    pub form: FormParams,
}

impl CallbackRequest {
    /// Decodes the raw query string and urlencoded body in one step.
    pub fn parse(raw_query: &str, body: &[u8]) -> CustomResult<Self, ConnectorError> {
        Ok(Self {
            query: QueryParams::parse(raw_query)?,
            form: FormParams::parse(body)?,
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_query_and_form_once() {
        let request = CallbackRequest::parse(
            "msgType=authResult",
            b"transStatus=Y&transId=12345&authAmount=10.50&MC_ctx.OrderRef=ref-1001",
        )
        .expect("request");

        assert_eq!(request.query.get("msgType"), Some("authResult"));
        assert_eq!(request.form.get("transStatus"), Some("Y"));
        assert_eq!(request.form.get("authAmount"), Some("10.50"));
        assert_eq!(request.form.get("MC_ctx.OrderRef"), Some("ref-1001"));
        assert_eq!(request.form.get("callbackPW"), None);
    }

    #[test]
    fn decodes_percent_escapes() {
        let form = FormParams::parse(b"callbackPW=p%40ss&name=Ada+Lovelace").expect("form");
        assert_eq!(form.get("callbackPW"), Some("p@ss"));
        assert_eq!(form.get("name"), Some("Ada Lovelace"));
    }

    #[test]
    fn empty_inputs_parse_to_empty_params() {
        let request = CallbackRequest::parse("", b"").expect("request");
        assert_eq!(request.query.get("msgType"), None);
        assert_eq!(request.form.get("transStatus"), None);
    }
}
