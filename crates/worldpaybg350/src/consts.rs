//! Wire-level constants of the Business Gateway 350 purchase protocol

/// Purchase endpoint for live transactions
pub const LIVE_BASE_URL: &str = "https://secure.worldpay.com/wcc/purchase";

/// Purchase endpoint for test-mode transactions
pub const TEST_BASE_URL: &str = "https://secure-test.worldpay.com/wcc/purchase";

/// Delimiter between field names in a configured signature pattern
pub const SIGNATURE_PATTERN_DELIMITER: char = ':';

/// Form field names, as the gateway spells them on the wire
pub mod fields {
    pub const INSTALLATION_ID: &str = "instId";
    pub const TEST_MODE: &str = "testMode";
    pub const AUTH_MODE: &str = "authMode";
    pub const CART_ID: &str = "cartId";
    pub const AMOUNT: &str = "amount";
    pub const CURRENCY: &str = "currency";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const ADDRESS_1: &str = "address1";
    pub const TOWN: &str = "town";
    pub const POSTCODE: &str = "postcode";
    pub const COUNTRY: &str = "country";
    pub const SIGNATURE: &str = "signature";
    pub const CALLBACK_PASSWORD: &str = "callbackPW";
    pub const MESSAGE_TYPE: &str = "msgType";
    pub const TRANSACTION_STATUS: &str = "transStatus";
    pub const TRANSACTION_ID: &str = "transId";
    pub const AUTHORIZED_AMOUNT: &str = "authAmount";

    /// Merchant-defined custom fields. The `MC_` prefix makes the gateway
    /// echo the field back in the payment response message.
    pub mod custom {
        pub const ORDER_REFERENCE: &str = "MC_ctx.OrderRef";
        pub const CANCEL_URL: &str = "MC_cancelurl";
        pub const RETURN_URL: &str = "MC_returnurl";
        pub const CALLBACK_URL: &str = "MC_callbackurl";
    }
}

/// Enumerated field values
pub mod values {
    pub const TEST_MODE_ENABLED: &str = "100";
    pub const TEST_MODE_DISABLED: &str = "0";
    pub const AUTH_MODE_FULL_AUTHORISATION: &str = "A";
    pub const AUTH_MODE_PRE_AUTHORISATION: &str = "E";
    pub const AUTH_MODE_POST_AUTHORISATION: &str = "O";
    pub const MESSAGE_TYPE_AUTH_RESULT: &str = "authResult";
    pub const TRANSACTION_STATUS_SUCCEEDED: &str = "Y";
    pub const TRANSACTION_STATUS_CANCELLED: &str = "C";
}
