//! Mapping between the host's order model and the gateway's wire fields

use error_stack::ResultExt;

use crate::{
    consts::{fields, values, LIVE_BASE_URL, TEST_BASE_URL},
    crypto,
    errors::{ConnectorError, CustomResult},
    settings::WorldpayBg350Settings,
    types::{AuthMode, CallbackUrls, FieldSet, GatewayForm, Method, OrderContext, PaymentStatus},
    utils::missing_field_err,
};

impl TryFrom<PaymentStatus> for AuthMode {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(status: PaymentStatus) -> Result<Self, Self::Error> {
        match status {
            PaymentStatus::Authorized => Ok(Self::PreAuthorisation),
            PaymentStatus::Captured => Ok(Self::FullAuthorisation),
            PaymentStatus::Pending | PaymentStatus::Cancelled | PaymentStatus::Refunded => {
                Err(ConnectorError::NotSupported {
                    message: format!("payment status {status}"),
                    connector: "worldpay-bs350",
                }
                .into())
            }
        }
    }
}

/// Maps the callback's `authMode` echo to the domain status of a succeeded
/// transaction: full authorisation means the funds were captured, anything
/// else (pre-authorisation, post-authorisation, absent, unrecognised) means
/// a hold. The source history carries a conflicting legacy reading of this
/// table; this function is the single place to correct it if the gateway
/// proves otherwise.
pub fn payment_status_for_auth_mode(auth_mode: Option<AuthMode>) -> PaymentStatus {
    match auth_mode {
        Some(AuthMode::FullAuthorisation) => PaymentStatus::Captured,
        Some(AuthMode::PreAuthorisation | AuthMode::PostAuthorisation) | None => {
            PaymentStatus::Authorized
        }
    }
}

/// Builds the purchase form for an order: derives every field value, then
/// assembles the ordered field set, signing it when a secret is configured.
pub fn build_form(
    order: &OrderContext,
    settings: &WorldpayBg350Settings,
    urls: &CallbackUrls,
) -> CustomResult<GatewayForm, ConnectorError> {
    let installation_id = settings
        .installation_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or(ConnectorError::InvalidConnectorConfig {
            config: "installation_id",
        })?;

    let first_name =
        property_override(order, settings.first_name_property_alias.as_deref())
            .unwrap_or(order.first_name.as_str());
    let last_name = property_override(order, settings.last_name_property_alias.as_deref())
        .unwrap_or(order.last_name.as_str());
    // Address data is optional at the gateway; absent aliases become empty
    // fields rather than failures.
    let address1 =
        property_override(order, settings.address1_property_alias.as_deref()).unwrap_or_default();
    let town =
        property_override(order, settings.city_property_alias.as_deref()).unwrap_or_default();
    let postcode =
        property_override(order, settings.postcode_property_alias.as_deref()).unwrap_or_default();

    let amount = format_amount(order);
    let currency = validated_currency(&order.currency_code)?;
    let country = validated_country(
        order
            .billing_country_code
            .as_deref()
            .ok_or_else(missing_field_err("billing_country"))?,
    )?;

    let auth_mode = if settings.capture {
        AuthMode::FullAuthorisation
    } else {
        AuthMode::PreAuthorisation
    };
    let test_mode = if settings.test_mode {
        values::TEST_MODE_ENABLED
    } else {
        values::TEST_MODE_DISABLED
    };

    let required = [
        (fields::INSTALLATION_ID, installation_id.to_owned()),
        (fields::TEST_MODE, test_mode.to_owned()),
        (fields::AUTH_MODE, auth_mode.to_string()),
        (fields::CART_ID, order.order_number.clone()),
        (fields::AMOUNT, amount),
        (fields::CURRENCY, currency),
        (fields::NAME, format!("{first_name} {last_name}")),
        (fields::EMAIL, order.email.clone()),
        (fields::ADDRESS_1, address1.to_owned()),
        (fields::TOWN, town.to_owned()),
        (fields::POSTCODE, postcode.to_owned()),
        (fields::COUNTRY, country),
        (fields::custom::ORDER_REFERENCE, order.order_reference.clone()),
    ];
    let optional_urls = [
        (
            fields::custom::CANCEL_URL,
            urls.cancel_url.clone(),
            settings.omit_cancel_url,
        ),
        (
            fields::custom::RETURN_URL,
            urls.continue_url.clone(),
            settings.omit_return_url,
        ),
        (
            fields::custom::CALLBACK_URL,
            urls.callback_url.clone(),
            settings.omit_callback_url,
        ),
    ];

    let mut field_set: FieldSet = required
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .chain(
            optional_urls
                .into_iter()
                .filter(|(_, _, omit)| !omit)
                .map(|(name, value, _)| (name.to_owned(), value)),
        )
        .collect();

    if let Some(secret) = settings.md5_secret.as_ref() {
        let pattern = settings.signature_pattern.as_deref().unwrap_or_default();
        let signature = crypto::sign(secret, pattern, &field_set)
            .attach_printable("failed to sign the purchase form")?;
        if settings.verbose_logging {
            tracing::debug!(pattern, signature = %signature, "signed purchase form");
        }
        field_set.insert(fields::SIGNATURE, signature);
    }

    let endpoint = if settings.test_mode {
        TEST_BASE_URL
    } else {
        LIVE_BASE_URL
    };
    if settings.verbose_logging {
        tracing::debug!(
            endpoint,
            order_number = %order.order_number,
            fields = %field_set.to_friendly_string(),
            "assembled purchase form"
        );
    }

    Ok(GatewayForm {
        endpoint: endpoint.to_owned(),
        method: Method::Post,
        fields: field_set,
    })
}

fn property_override<'a>(order: &'a OrderContext, alias: Option<&str>) -> Option<&'a str> {
    alias.filter(|alias| !alias.is_empty()).and_then(|alias| order.property(alias))
}

/// Renders the amount with exactly two decimal places and an invariant
/// decimal point. The order pipeline has already rounded the value; this is
/// formatting, not re-rounding.
fn format_amount(order: &OrderContext) -> String {
    format!("{:.2}", order.amount)
}

fn validated_currency(code: &str) -> CustomResult<String, ConnectorError> {
    let code = code.to_uppercase();
    iso_currency::Currency::from_code(&code)
        .ok_or(ConnectorError::InvalidDataFormat {
            field_name: "currency",
        })
        .attach_printable_lazy(|| format!("`{code}` is not an ISO 4217 currency code"))?;
    Ok(code)
}

fn validated_country(code: &str) -> CustomResult<String, ConnectorError> {
    let code = code.to_uppercase();
    isocountry::CountryCode::for_alpha2(&code)
        .change_context(ConnectorError::InvalidDataFormat {
            field_name: "country",
        })
        .attach_printable_lazy(|| format!("`{code}` is not an ISO 3166 country code"))?;
    Ok(code)
}
