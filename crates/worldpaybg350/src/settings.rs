//! Connector configuration, as collected by the host's settings editor

use masking::Secret;

/// Configuration aggregate for the Business Gateway 350 connector.
///
/// Credentials are wrapped in [`Secret`] so they never leak through `Debug`
/// output. The "secret implies pattern" invariant is enforced at use (the
/// signing operation fails on an absent pattern), not at construction.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct WorldpayBg350Settings {
    /// Route requests to the gateway's test endpoint and send the test-mode
    /// sentinel
    pub test_mode: bool,
    /// Worldpay installation identifier; required to build any request
    pub installation_id: Option<String>,
    /// Shared MD5 secret; when present the outbound form carries a signature
    pub md5_secret: Option<Secret<String>>,
    /// Colon-delimited, ordered field names feeding the signature digest
    pub signature_pattern: Option<String>,
    /// Shared password the gateway echoes back on callbacks
    pub response_password: Option<Secret<String>>,
    /// Capture immediately (`true`) or authorise only (`false`)
    pub capture: bool,
    /// Order-property alias overriding the billing first name
    pub first_name_property_alias: Option<String>,
    /// Order-property alias overriding the billing last name
    pub last_name_property_alias: Option<String>,
    /// Order-property alias supplying billing address line 1
    pub address1_property_alias: Option<String>,
    /// Order-property alias supplying the billing town
    pub city_property_alias: Option<String>,
    /// Order-property alias supplying the billing postcode
    pub postcode_property_alias: Option<String>,
    /// Leave the `MC_cancelurl` field out of the request
    pub omit_cancel_url: bool,
    /// Leave the `MC_returnurl` field out of the request
    pub omit_return_url: bool,
    /// Leave the `MC_callbackurl` field out of the request
    pub omit_callback_url: bool,
    /// Emit high-volume diagnostics (form fields, raw callback data)
    pub verbose_logging: bool,
    /// Static redirect target after a completed payment
    pub continue_url: Option<String>,
    /// Static redirect target after a cancelled payment
    pub cancel_url: Option<String>,
    /// Static redirect target after a failed payment
    pub error_url: Option<String>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use masking::PeekInterface;

    use super::*;

    #[test]
    fn deserializes_with_defaults_for_absent_keys() {
        let settings: WorldpayBg350Settings = serde_json::from_value(serde_json::json!({
            "installation_id": "211616",
            "md5_secret": "s3cr3t",
            "signature_pattern": "instId:amount:currency:cartId",
            "capture": true
        }))
        .expect("settings");

        assert_eq!(settings.installation_id.as_deref(), Some("211616"));
        assert_eq!(
            settings.md5_secret.as_ref().map(|s| s.peek().as_str()),
            Some("s3cr3t")
        );
        assert!(settings.capture);
        assert!(!settings.test_mode);
        assert!(!settings.omit_callback_url);
        assert!(settings.response_password.is_none());
        assert!(settings.continue_url.is_none());
    }

    #[test]
    fn secrets_are_masked_in_debug_output() {
        let settings = WorldpayBg350Settings {
            md5_secret: Some(Secret::new("s3cr3t".to_owned())),
            response_password: Some(Secret::new("p@ss".to_owned())),
            ..Default::default()
        };

        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(!rendered.contains("p@ss"));
    }
}
