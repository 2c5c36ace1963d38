//! Domain and wire-level types shared across the connector

use std::collections::HashMap;

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Domain payment outcomes the host order model understands.
///
/// Only [`PaymentStatus::Authorized`] and [`PaymentStatus::Captured`] are
/// representable on the wire; the rest exist so inbound mapping stays a
/// closed, exhaustively matched union.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment initiated but not yet confirmed by the gateway
    Pending,
    /// Funds reserved (pre-authorisation), settlement pending
    Authorized,
    /// Funds captured (full authorisation)
    Captured,
    /// Shopper abandoned or cancelled the payment
    Cancelled,
    /// Payment refunded after capture
    Refunded,
}

/// The gateway's authorisation-mode code, shared between the outbound
/// `authMode` request field and its echo on the callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum AuthMode {
    /// `A`: authorise and capture in one step
    #[strum(serialize = "A")]
    FullAuthorisation,
    /// `E`: reserve funds only, capture later
    #[strum(serialize = "E")]
    PreAuthorisation,
    /// `O`: capture of an earlier pre-authorisation. Never emitted by this
    /// connector; carried so inbound parsing recognises the code.
    #[strum(serialize = "O")]
    PostAuthorisation,
}

/// The gateway's `transStatus` callback field as a closed union.
#[derive(Clone, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum TransactionStatus {
    /// `Y`: the transaction was authorised
    #[strum(serialize = "Y")]
    Succeeded,
    /// `C`: the shopper cancelled at the gateway's payment pages
    #[strum(serialize = "C")]
    Cancelled,
    /// Any other value, kept raw for diagnostics
    #[strum(default)]
    Unrecognised(String),
}

impl TransactionStatus {
    /// Maps the raw `transStatus` value, treating an absent field the same
    /// as an unrecognised one. Never fails; unknown codes are data, not
    /// errors, on this path.
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.unwrap_or_default()
            .parse()
            .unwrap_or_else(|_| Self::Unrecognised(String::new()))
    }
}

/// Read-only view of the order being paid for, supplied by the host.
#[derive(Clone, Debug)]
pub struct OrderContext {
    /// Merchant-visible order number, sent as `cartId`
    pub order_number: String,
    /// ISO 4217 alphabetic currency code, validated at mapping time
    pub currency_code: String,
    /// Transaction amount, already rounded by the order pipeline
    pub amount: Decimal,
    /// Customer first name fallback when no property alias is configured
    pub first_name: String,
    /// Customer last name fallback when no property alias is configured
    pub last_name: String,
    /// Customer email address
    pub email: String,
    /// ISO 3166 alpha-2 billing country, validated at mapping time
    pub billing_country_code: Option<String>,
    /// Arbitrary keyed order properties, read through configured aliases
    pub properties: HashMap<String, String>,
    /// Opaque token correlating the gateway callback with this order
    pub order_reference: String,
}

impl OrderContext {
    /// Looks up an order property by its configured alias.
    pub fn property(&self, alias: &str) -> Option<&str> {
        self.properties.get(alias).map(String::as_str)
    }
}

/// The continue/cancel/callback URL triple the host computes per payment
/// attempt, distinct from the static redirect URLs held in settings.
#[derive(Clone, Debug)]
pub struct CallbackUrls {
    /// Where the gateway sends the shopper after a completed payment
    pub continue_url: String,
    /// Where the gateway sends the shopper after cancelling
    pub cancel_url: String,
    /// Where the gateway posts the asynchronous payment notification
    pub callback_url: String,
}

/// Opaque order-reference token echoed back by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderReference(String);

impl OrderReference {
    /// Accepts any non-empty, non-whitespace token; anything else resolves
    /// to `None` so the host's fallback reference resolution runs.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim();
        (!token.is_empty()).then(|| Self(token.to_owned()))
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An insertion-ordered mapping from gateway field name to string value.
///
/// Order matters only for readability of the rendered form; the signature
/// input order is driven by the configured pattern, never by this map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSet(IndexMap<String, String>);

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Looks up a field value by wire name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether a field with this wire name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
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

impl FromIterator<(String, String)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// HTTP methods the connector renders forms with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Method {
    /// HTTP GET
    #[strum(serialize = "GET")]
    Get,
    /// HTTP POST
    #[strum(serialize = "POST")]
    Post,
}

/// The artifact returned to the caller for rendering to the shopper's
/// browser: endpoint, method (always POST for this gateway) and the
/// ordered form fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayForm {
    /// Purchase endpoint the form posts to
    pub endpoint: String,
    /// HTTP method, always [`Method::Post`]
    pub method: Method,
    /// Ordered form fields
    pub fields: FieldSet,
}

/// The outcome of a successfully authenticated payment notification.
///
/// Constructed once per callback and handed straight back to the caller;
/// the connector retains nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionResult {
    /// Authorised amount as reported by the gateway
    pub amount: Decimal,
    /// Transaction fee; always zero in this protocol
    pub fee: Decimal,
    /// Gateway transaction identifier, when supplied
    pub transaction_id: Option<String>,
    /// Mapped domain payment status
    pub status: PaymentStatus,
}

/// Tri-state callback outcome: a transaction to record, or acknowledge-only.
///
/// Returning [`CallbackOutcome::Ack`] is the deliberate protocol response to
/// unauthenticated or unexpected gateway traffic; it stops webhook retries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// An authorised payment to apply to the order
    Transaction(TransactionResult),
    /// Acknowledge the delivery and do nothing else
    Ack,
}
