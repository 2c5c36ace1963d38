#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use masking::Secret;
use rust_decimal::Decimal;
use worldpaybg350::{
    CallbackOutcome, CallbackRequest, ConnectorError, OrderContext, PaymentStatus,
    WorldpayBg350, WorldpayBg350Settings,
};

fn order() -> OrderContext {
    OrderContext {
        order_number: "1001".to_owned(),
        currency_code: "GBP".to_owned(),
        amount: Decimal::new(4250, 2),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: "ada@example.com".to_owned(),
        billing_country_code: Some("GB".to_owned()),
        properties: HashMap::new(),
        order_reference: "ref-1001".to_owned(),
    }
}

fn settings_with_password() -> WorldpayBg350Settings {
    WorldpayBg350Settings {
        installation_id: Some("211616".to_owned()),
        response_password: Some(Secret::new("p@ss".to_owned())),
        ..Default::default()
    }
}

#[test]
fn non_auth_result_message_type_is_acknowledged_unprocessed() {
    let connector = WorldpayBg350::new();
    // A bare redirect hit carries the full success payload but the wrong
    // message type; it must not produce a transaction.
    let request = CallbackRequest::parse(
        "msgType=continue",
        b"callbackPW=p%40ss&transStatus=Y&authMode=A&authAmount=42.50&transId=T-1",
    )
    .expect("request");

    let outcome = connector
        .process_callback(&request, &order(), &settings_with_password())
        .expect("outcome");
    assert_eq!(outcome, CallbackOutcome::Ack);
}

#[test]
fn wrong_password_is_acknowledged_unprocessed() {
    let connector = WorldpayBg350::new();
    let request = CallbackRequest::parse(
        "msgType=authResult",
        b"callbackPW=wrong&transStatus=Y&authMode=A&authAmount=42.50&transId=T-1",
    )
    .expect("request");

    let outcome = connector
        .process_callback(&request, &order(), &settings_with_password())
        .expect("outcome");
    assert_eq!(outcome, CallbackOutcome::Ack);
}

#[test]
fn matching_password_proceeds_to_a_captured_transaction() {
    let connector = WorldpayBg350::new();
    let request = CallbackRequest::parse(
        "msgType=authResult",
        b"callbackPW=p%40ss&transStatus=Y&authMode=A&authAmount=42.50&transId=T-1",
    )
    .expect("request");

    let outcome = connector
        .process_callback(&request, &order(), &settings_with_password())
        .expect("outcome");
    match outcome {
        CallbackOutcome::Transaction(result) => {
            assert_eq!(result.amount, Decimal::new(4250, 2));
            assert_eq!(result.fee, Decimal::ZERO);
            assert_eq!(result.transaction_id.as_deref(), Some("T-1"));
            assert_eq!(result.status, PaymentStatus::Captured);
        }
        CallbackOutcome::Ack => panic!("expected a transaction"),
    }
}

#[test]
fn pre_authorisation_and_absent_auth_mode_map_to_authorized() {
    let connector = WorldpayBg350::new();
    let settings = WorldpayBg350Settings::default();

    for body in [
        b"transStatus=Y&authMode=E&authAmount=10.00".as_slice(),
        b"transStatus=Y&authAmount=10.00".as_slice(),
    ] {
        let request = CallbackRequest::parse("msgType=authResult", body).expect("request");
        let outcome = connector
            .process_callback(&request, &order(), &settings)
            .expect("outcome");
        match outcome {
            CallbackOutcome::Transaction(result) => {
                assert_eq!(result.status, PaymentStatus::Authorized);
                assert_eq!(result.transaction_id, None);
            }
            CallbackOutcome::Ack => panic!("expected a transaction"),
        }
    }
}

#[test]
fn cancelled_and_unknown_statuses_are_acknowledged() {
    let connector = WorldpayBg350::new();
    let settings = WorldpayBg350Settings::default();

    for body in [
        b"transStatus=C".as_slice(),
        b"transStatus=N".as_slice(),
        b"authAmount=10.00".as_slice(),
    ] {
        let request = CallbackRequest::parse("msgType=authResult", body).expect("request");
        let outcome = connector
            .process_callback(&request, &order(), &settings)
            .expect("outcome");
        assert_eq!(outcome, CallbackOutcome::Ack, "body: {body:?}");
    }
}

#[test]
fn success_without_an_amount_is_a_hard_error() {
    let connector = WorldpayBg350::new();
    let request = CallbackRequest::parse("msgType=authResult", b"transStatus=Y&transId=T-2")
        .expect("request");

    let error = connector
        .process_callback(&request, &order(), &WorldpayBg350Settings::default())
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::MissingRequiredField {
            field_name: "authAmount"
        }
    );
}

#[test]
fn success_with_a_malformed_amount_is_a_hard_error() {
    let connector = WorldpayBg350::new();
    let request =
        CallbackRequest::parse("msgType=authResult", b"transStatus=Y&authAmount=ten")
            .expect("request");

    let error = connector
        .process_callback(&request, &order(), &WorldpayBg350Settings::default())
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ConnectorError::InvalidDataFormat {
            field_name: "authAmount"
        }
    );
}

#[test]
fn processing_is_idempotent_over_identical_inputs() {
    let connector = WorldpayBg350::new();
    let request = CallbackRequest::parse(
        "msgType=authResult",
        b"callbackPW=p%40ss&transStatus=Y&authMode=A&authAmount=42.50&transId=T-1",
    )
    .expect("request");
    let settings = settings_with_password();

    let first = connector
        .process_callback(&request, &order(), &settings)
        .expect("outcome");
    let second = connector
        .process_callback(&request, &order(), &settings)
        .expect("outcome");
    assert_eq!(first, second);
}
