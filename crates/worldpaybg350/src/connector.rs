//! The connector surface the host integrates against

use error_stack::ResultExt;
use masking::PeekInterface;

use crate::{
    consts::{fields, values, LIVE_BASE_URL, TEST_BASE_URL},
    errors::{ConnectorError, CustomResult},
    settings::WorldpayBg350Settings,
    transformers::{self, payment_status_for_auth_mode},
    types::{
        AuthMode, CallbackOutcome, CallbackUrls, GatewayForm, OrderContext, OrderReference,
        TransactionResult, TransactionStatus,
    },
    utils::{missing_field_err, CallbackRequest, FormParams},
};

/// Worldpay Business Gateway 350 form-post connector.
///
/// Stateless; every operation is a pure function of its inputs. Concurrent
/// callbacks for the same order validate and report independently —
/// idempotent application of the results is the order-update collaborator's
/// concern.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorldpayBg350;

impl WorldpayBg350 {
    /// Returns the connector singleton.
    pub const fn new() -> &'static Self {
        &Self
    }

    /// Host registration identifier.
    pub const fn id(&self) -> &'static str {
        "worldpay-bs350"
    }

    /// Human-readable provider name.
    pub const fn display_name(&self) -> &'static str {
        "Worldpay Business Gateway 350"
    }

    /// Payment is finalized by the gateway callback, never at the
    /// continue-URL redirect.
    pub const fn finalize_at_continue_url(&self) -> bool {
        false
    }

    /// The purchase endpoint for the configured mode.
    pub const fn base_url(&self, settings: &WorldpayBg350Settings) -> &'static str {
        if settings.test_mode {
            TEST_BASE_URL
        } else {
            LIVE_BASE_URL
        }
    }

    /// Static redirect target after a completed payment.
    pub fn continue_url<'a>(
        &self,
        settings: &'a WorldpayBg350Settings,
    ) -> CustomResult<&'a str, ConnectorError> {
        configured_url(settings.continue_url.as_deref(), "continue_url")
    }

    /// Static redirect target after a cancelled payment.
    pub fn cancel_url<'a>(
        &self,
        settings: &'a WorldpayBg350Settings,
    ) -> CustomResult<&'a str, ConnectorError> {
        configured_url(settings.cancel_url.as_deref(), "cancel_url")
    }

    /// Static redirect target after a failed payment.
    pub fn error_url<'a>(
        &self,
        settings: &'a WorldpayBg350Settings,
    ) -> CustomResult<&'a str, ConnectorError> {
        configured_url(settings.error_url.as_deref(), "error_url")
    }

    /// Builds the purchase form to render to the shopper's browser.
    pub fn build_payment_form(
        &self,
        order: &OrderContext,
        settings: &WorldpayBg350Settings,
        urls: &CallbackUrls,
    ) -> CustomResult<GatewayForm, ConnectorError> {
        transformers::build_form(order, settings, urls)
    }

    /// Processes an inbound gateway callback.
    ///
    /// Malformed or unauthenticated gateway traffic degrades to
    /// [`CallbackOutcome::Ack`] — acknowledging is the correct protocol
    /// response and stops webhook retries. Only local contract violations
    /// (a success status with no usable amount) are hard errors.
    pub fn process_callback(
        &self,
        request: &CallbackRequest,
        order: &OrderContext,
        settings: &WorldpayBg350Settings,
    ) -> CustomResult<CallbackOutcome, ConnectorError> {
        let msg_type = request.query.get(fields::MESSAGE_TYPE);
        if msg_type != Some(values::MESSAGE_TYPE_AUTH_RESULT) {
            // Not a payment notification; a bare redirect hit lands here.
            tracing::info!(msg_type, "ignoring non-auth-result callback");
            return Ok(CallbackOutcome::Ack);
        }

        if settings.verbose_logging {
            tracing::debug!(
                order_number = %order.order_number,
                form = %request.form.to_friendly_string(),
                "received auth-result callback"
            );
        }

        if !response_password_matches(settings, &request.form) {
            tracing::warn!(
                order_number = %order.order_number,
                "callback password mismatch, acknowledging without processing"
            );
            return Ok(CallbackOutcome::Ack);
        }

        match TransactionStatus::from_raw(request.form.get(fields::TRANSACTION_STATUS)) {
            TransactionStatus::Succeeded => {
                let raw_amount = request
                    .form
                    .get(fields::AUTHORIZED_AMOUNT)
                    .ok_or_else(missing_field_err(fields::AUTHORIZED_AMOUNT))?;
                let amount = raw_amount
                    .parse::<rust_decimal::Decimal>()
                    .change_context(ConnectorError::InvalidDataFormat {
                        field_name: fields::AUTHORIZED_AMOUNT,
                    })?;
                let auth_mode = request
                    .form
                    .get(fields::AUTH_MODE)
                    .and_then(|raw| raw.parse::<AuthMode>().ok());
                let status = payment_status_for_auth_mode(auth_mode);
                let transaction_id = request
                    .form
                    .get(fields::TRANSACTION_ID)
                    .map(ToOwned::to_owned);

                tracing::info!(
                    order_number = %order.order_number,
                    transaction_id = transaction_id.as_deref(),
                    %amount,
                    %status,
                    "gateway reported a successful transaction"
                );
                Ok(CallbackOutcome::Transaction(TransactionResult {
                    amount,
                    fee: rust_decimal::Decimal::ZERO,
                    transaction_id,
                    status,
                }))
            }
            TransactionStatus::Cancelled => {
                tracing::info!(
                    order_number = %order.order_number,
                    "shopper cancelled at the gateway"
                );
                Ok(CallbackOutcome::Ack)
            }
            TransactionStatus::Unrecognised(raw) => {
                tracing::warn!(
                    order_number = %order.order_number,
                    raw_status = %raw,
                    "unexpected transaction status, acknowledging without processing"
                );
                Ok(CallbackOutcome::Ack)
            }
        }
    }

    /// Reads the order reference echoed in the callback.
    ///
    /// The inbound reference is trusted only past the same password gate as
    /// the callback itself; mismatch or an unparseable token yields `None`,
    /// deferring to the host's default reference resolution.
    pub fn resolve_order_reference(
        &self,
        request: &CallbackRequest,
        settings: &WorldpayBg350Settings,
    ) -> Option<OrderReference> {
        if !response_password_matches(settings, &request.form) {
            tracing::warn!("callback password mismatch, ignoring inbound order reference");
            return None;
        }
        request
            .form
            .get(fields::custom::ORDER_REFERENCE)
            .and_then(OrderReference::parse)
    }
}

/// The single place the response-password comparison lives. The gateway is
/// assumed to echo the password under the same `callbackPW` name the request
/// uses; correct it here if that assumption ever proves wrong.
fn response_password_matches(settings: &WorldpayBg350Settings, form: &FormParams) -> bool {
    match settings.response_password.as_ref() {
        None => true,
        Some(expected) => form.get(fields::CALLBACK_PASSWORD) == Some(expected.peek().as_str()),
    }
}

fn configured_url<'a>(
    url: Option<&'a str>,
    config: &'static str,
) -> CustomResult<&'a str, ConnectorError> {
    Ok(url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ConnectorError::InvalidConnectorConfig { config })?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use masking::Secret;

    use super::*;

    #[test]
    fn url_accessors_require_configuration() {
        let connector = WorldpayBg350::new();
        let settings = WorldpayBg350Settings {
            continue_url: Some("https://shop.example.com/done".to_owned()),
            ..Default::default()
        };

        assert_eq!(
            connector.continue_url(&settings).expect("continue url"),
            "https://shop.example.com/done"
        );
        assert_eq!(
            connector.cancel_url(&settings).unwrap_err().current_context(),
            &ConnectorError::InvalidConnectorConfig {
                config: "cancel_url"
            }
        );
        assert_eq!(
            connector.error_url(&settings).unwrap_err().current_context(),
            &ConnectorError::InvalidConnectorConfig { config: "error_url" }
        );
    }

    #[test]
    fn base_url_follows_test_mode() {
        let connector = WorldpayBg350::new();
        let mut settings = WorldpayBg350Settings::default();
        assert_eq!(connector.base_url(&settings), LIVE_BASE_URL);
        settings.test_mode = true;
        assert_eq!(connector.base_url(&settings), TEST_BASE_URL);
    }

    #[test]
    fn password_gate_covers_order_reference_resolution() {
        let connector = WorldpayBg350::new();
        let settings = WorldpayBg350Settings {
            response_password: Some(Secret::new("p@ss".to_owned())),
            ..Default::default()
        };

        let wrong = CallbackRequest::parse(
            "msgType=authResult",
            b"callbackPW=wrong&MC_ctx.OrderRef=ref-1001",
        )
        .expect("request");
        assert_eq!(connector.resolve_order_reference(&wrong, &settings), None);

        let right = CallbackRequest::parse(
            "msgType=authResult",
            b"callbackPW=p%40ss&MC_ctx.OrderRef=ref-1001",
        )
        .expect("request");
        assert_eq!(
            connector
                .resolve_order_reference(&right, &settings)
                .map(|r| r.as_str().to_owned()),
            Some("ref-1001".to_owned())
        );
    }

    #[test]
    fn blank_order_reference_defers_to_the_host() {
        let connector = WorldpayBg350::new();
        let request = CallbackRequest::parse("msgType=authResult", b"MC_ctx.OrderRef=+")
            .expect("request");
        assert_eq!(
            connector.resolve_order_reference(&request, &WorldpayBg350Settings::default()),
            None
        );
    }
}
