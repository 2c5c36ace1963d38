//! Worldpay Business Gateway 350 form-post payment connector.
//!
//! The gateway's checkout protocol is a browser form post: the merchant
//! renders a POST form of flat key/value fields (optionally carrying an MD5
//! signature over a configured subset of them), the shopper pays on the
//! gateway's hosted pages, and the gateway reports the outcome through an
//! asynchronous urlencoded callback authenticated by a shared password.
//!
//! [`WorldpayBg350`] is the surface the host integrates against:
//! [`WorldpayBg350::build_payment_form`] for the outbound leg and
//! [`WorldpayBg350::process_callback`] /
//! [`WorldpayBg350::resolve_order_reference`] for the inbound one. The
//! connector is stateless; the host owns order storage, the web pipeline and
//! idempotent application of results.

pub mod connector;
pub mod consts;
pub mod crypto;
pub mod errors;
pub mod settings;
pub mod transformers;
pub mod types;
pub mod utils;

pub use connector::WorldpayBg350;
pub use errors::{ConnectorError, CustomResult};
pub use settings::WorldpayBg350Settings;
pub use types::{
    CallbackOutcome, CallbackUrls, GatewayForm, OrderContext, OrderReference, PaymentStatus,
    TransactionResult,
};
pub use utils::CallbackRequest;
