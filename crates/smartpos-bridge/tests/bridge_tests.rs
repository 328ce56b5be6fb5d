// SPDX-License-Identifier: MIT
//
// End-to-end bridge tests against the mock terminal: launch
// parameterisation, completion settlement, the pending-slot contract, and
// the print pipeline.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use smartpos_bridge::PaymentBridge;
use smartpos_core::config::BridgeConfig;
use smartpos_core::error::BridgeError;
use smartpos_core::messages;
use smartpos_core::types::{
    CompletionEvent, Launch, PaymentKind, PaymentResult, PaymentStatus, Receipt, RequestCode,
    ResultCode,
};
use smartpos_terminal::mock::{MockHost, MockTerminal};
use smartpos_terminal::stub::StubHost;
use smartpos_terminal::traits::ActivityHost;

fn setup() -> (Arc<PaymentBridge>, Arc<MockHost>, MockTerminal) {
    setup_with_config(BridgeConfig::default())
}

fn setup_with_config(config: BridgeConfig) -> (Arc<PaymentBridge>, Arc<MockHost>, MockTerminal) {
    let terminal = MockTerminal::new();
    let host = Arc::new(MockHost::new());
    let bridge = Arc::new(PaymentBridge::new(
        &terminal,
        host.clone() as Arc<dyn ActivityHost>,
        config,
    ));
    (bridge, host, terminal)
}

/// Poll until `cond` holds — the launch happens inside a spawned task, so
/// tests wait for it before delivering the completion event.
async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..500 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!("condition not reached in time");
}

fn authorized_event(code: RequestCode, nsu: &str) -> CompletionEvent {
    CompletionEvent::new(code, ResultCode::Ok)
        .with_payload(PaymentResult::new(PaymentStatus::Authorized).with_receipt(Receipt::new(nsu)))
}

/// A small valid PNG, base64-encoded.
fn png_base64() -> String {
    let bitmap = image::DynamicImage::new_rgba8(4, 4);
    let mut bytes = Vec::new();
    bitmap
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    STANDARD.encode(&bytes)
}

// ---------------------------------------------------------------------------
// Launch construction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payment_launch_carries_kind_amount_and_installments() {
    let (bridge, host, _terminal) = setup();

    for (i, kind) in PaymentKind::ALL.into_iter().enumerate() {
        let b = bridge.clone();
        let name = kind.as_str().to_string();
        let _task = tokio::spawn(async move { b.payment(&name, 2_550, 3).await });
        wait_until(|| host.started().len() == i + 1).await;
    }

    let started = host.started();
    assert_eq!(started.len(), PaymentKind::ALL.len());
    for (launch_entry, kind) in started.iter().zip(PaymentKind::ALL) {
        assert_eq!(
            *launch_entry,
            (
                Launch::Payment {
                    kind,
                    amount_minor: 2_550,
                    installments: 3,
                },
                RequestCode::Payment
            )
        );
    }
}

#[tokio::test]
async fn invalid_payment_type_rejects_before_any_launch() {
    let (bridge, host, _terminal) = setup();

    let err = bridge
        .payment("NOT_A_TYPE", 100, 1)
        .await
        .expect_err("must reject");
    assert!(matches!(err, BridgeError::InvalidPaymentType(ref s) if s == "NOT_A_TYPE"));
    assert_eq!(err.code(), "error");
    assert!(host.started().is_empty());
}

#[tokio::test]
async fn missing_activity_rejects_at_call_time() {
    let (bridge, host, _terminal) = setup();
    host.set_missing_activity(true);

    let err = bridge.payment("PIX", 100, 0).await.expect_err("must reject");
    assert!(matches!(err, BridgeError::ActivityNotFound(_)));

    let err = bridge.reversal().await.expect_err("must reject");
    assert!(matches!(err, BridgeError::ActivityNotFound(_)));

    let err = bridge.reprint().await.expect_err("must reject");
    assert!(matches!(err, BridgeError::ActivityNotFound(_)));
}

// ---------------------------------------------------------------------------
// Completion settlement
// ---------------------------------------------------------------------------

#[tokio::test]
async fn authorized_payment_resolves_with_the_mirrored_nsu_map() {
    let (bridge, host, _terminal) = setup();

    let b = bridge.clone();
    let task = tokio::spawn(async move { b.payment("DEBITO", 990, 1).await });
    wait_until(|| !host.started().is_empty()).await;

    bridge.handle_completion(authorized_event(RequestCode::Payment, "000123"));

    let map = task.await.expect("join").expect("must resolve");
    let json = serde_json::to_value(&map).expect("serialize");
    for key in ["retCode", "transactionCode", "transactionId", "message", "nsu"] {
        assert_eq!(json[key], "000123");
    }
}

#[tokio::test]
async fn operator_cancellation_rejects_with_the_exact_message() {
    let (bridge, host, _terminal) = setup();

    let b = bridge.clone();
    let task = tokio::spawn(async move { b.payment("PIX", 500, 1).await });
    wait_until(|| !host.started().is_empty()).await;

    // Payload present but the result code is not OK — the payload must lose.
    let event = CompletionEvent::new(RequestCode::Payment, ResultCode::Canceled)
        .with_payload(PaymentResult::new(PaymentStatus::Authorized).with_receipt(Receipt::new("9")));
    bridge.handle_completion(event);

    let err = task.await.expect("join").expect_err("must reject");
    assert!(matches!(err, BridgeError::Canceled(ref m) if m == messages::PAYMENT_CANCELED));
}

#[tokio::test]
async fn reversal_authorized_resolves_autorizado_exactly_once() {
    let (bridge, host, _terminal) = setup();

    let b = bridge.clone();
    let task = tokio::spawn(async move { b.reversal().await });
    wait_until(|| !host.started().is_empty()).await;
    assert_eq!(host.started()[0], (Launch::Reversal, RequestCode::Reversal));

    bridge.handle_completion(authorized_event(RequestCode::Reversal, "42"));
    let text = task.await.expect("join").expect("must resolve");
    assert_eq!(text, messages::REVERSAL_AUTHORIZED);

    // The slot is cleared on settlement — a duplicate completion event has
    // nothing left to settle and is dropped.
    bridge.handle_completion(CompletionEvent::new(RequestCode::Reversal, ResultCode::Canceled));
}

#[tokio::test]
async fn reprint_resolves_and_rejects_on_result_code() {
    let (bridge, host, _terminal) = setup();

    let b = bridge.clone();
    let task = tokio::spawn(async move { b.reprint().await });
    wait_until(|| !host.started().is_empty()).await;
    bridge.handle_completion(CompletionEvent::new(RequestCode::Reprint, ResultCode::Ok));
    let text = task.await.expect("join").expect("must resolve");
    assert_eq!(text, messages::REPRINT_OK);

    let b = bridge.clone();
    let task = tokio::spawn(async move { b.reprint().await });
    wait_until(|| host.started().len() == 2).await;
    bridge.handle_completion(CompletionEvent::new(RequestCode::Reprint, ResultCode::Canceled));
    let err = task.await.expect("join").expect_err("must reject");
    assert!(matches!(err, BridgeError::Canceled(ref m) if m == messages::REPRINT_CANCELED));
}

// ---------------------------------------------------------------------------
// Pending-slot contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_operation_overwrites_the_pending_slot() {
    // Documented single-slot behavior: the first caller is superseded, the
    // completion event settles the most recently launched operation.
    let (bridge, host, _terminal) = setup();

    let b = bridge.clone();
    let first = tokio::spawn(async move { b.payment("PIX", 100, 1).await });
    wait_until(|| host.started().len() == 1).await;

    let b = bridge.clone();
    let second = tokio::spawn(async move { b.payment("DEBITO", 200, 1).await });
    wait_until(|| host.started().len() == 2).await;

    let err = first.await.expect("join").expect_err("superseded caller");
    assert!(matches!(err, BridgeError::Superseded));

    bridge.handle_completion(authorized_event(RequestCode::Payment, "7"));
    let map = second.await.expect("join").expect("must resolve");
    assert_eq!(map.nsu, "7");
}

#[tokio::test]
async fn unknown_request_code_is_dropped_and_leaves_the_slot_intact() {
    let (bridge, host, _terminal) = setup();

    let b = bridge.clone();
    let task = tokio::spawn(async move { b.reprint().await });
    wait_until(|| !host.started().is_empty()).await;

    bridge.handle_completion(CompletionEvent {
        request_code: 4242,
        result_code: ResultCode::Ok,
        payload: None,
    });

    // The reprint is still pending and settles normally afterwards.
    bridge.handle_completion(CompletionEvent::new(RequestCode::Reprint, ResultCode::Ok));
    let text = task.await.expect("join").expect("must resolve");
    assert_eq!(text, messages::REPRINT_OK);
}

// ---------------------------------------------------------------------------
// Notifications and print pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn show_raises_a_notification() {
    let (bridge, host, _terminal) = setup();
    bridge.show("Bem-vindo");
    assert_eq!(host.notifications(), vec!["Bem-vindo".to_string()]);
}

#[tokio::test]
async fn print_decodes_and_prints_on_a_separate_thread() {
    let (bridge, host, terminal) = setup();
    let caller_thread = std::thread::current().id();

    bridge.print(&png_base64()).await.expect("print");

    let printed = terminal.printer().printed();
    assert_eq!(printed.len(), 1);
    assert_eq!((printed[0].width, printed[0].height), (4, 4));
    assert_ne!(printed[0].thread, caller_thread);
    assert_eq!(host.notifications(), vec![messages::PRINT_OK.to_string()]);
}

#[tokio::test]
async fn print_with_invalid_base64_never_reaches_the_printer() {
    let (bridge, host, terminal) = setup();

    let err = bridge.print("not-base64!!!").await.expect_err("must reject");
    assert!(matches!(err, BridgeError::Decode(_)));
    assert!(terminal.printer().printed().is_empty());
    // Decode failures are not shown to the user, only rejected to the caller.
    assert!(host.notifications().is_empty());
}

#[tokio::test]
async fn print_with_undecodable_bitmap_rejects() {
    let (bridge, _host, terminal) = setup();

    let err = bridge
        .print(&STANDARD.encode(b"these bytes are no bitmap"))
        .await
        .expect_err("must reject");
    assert!(matches!(err, BridgeError::Decode(_)));
    assert!(terminal.printer().printed().is_empty());
}

#[tokio::test]
async fn printer_error_rejects_the_caller_and_notifies_the_user() {
    let (bridge, host, terminal) = setup();
    terminal.printer().fail_next_print("sem papel");

    let err = bridge.print(&png_base64()).await.expect_err("must reject");
    assert!(matches!(err, BridgeError::Printer(ref m) if m == "sem papel"));
    assert_eq!(host.notifications(), vec!["sem papel".to_string()]);
}

#[tokio::test]
async fn config_can_silence_print_notifications() {
    let config = BridgeConfig {
        notify_print_success: false,
        notify_print_errors: false,
    };
    let (bridge, host, terminal) = setup_with_config(config);

    bridge.print(&png_base64()).await.expect("print");
    terminal.printer().fail_next_print("sem papel");
    bridge.print(&png_base64()).await.expect_err("must reject");

    assert!(host.notifications().is_empty());
}

// ---------------------------------------------------------------------------
// Stub platform
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stub_terminal_fails_with_terminal_unavailable() {
    let terminal = smartpos_terminal::platform_terminal();
    let host = Arc::new(MockHost::new());
    let bridge = PaymentBridge::new(
        terminal.as_ref(),
        host as Arc<dyn ActivityHost>,
        BridgeConfig::default(),
    );

    let err = bridge.print(&png_base64()).await.expect_err("must fail");
    assert!(matches!(err, BridgeError::TerminalUnavailable));
}

#[tokio::test]
async fn stub_host_has_no_activity_to_launch() {
    let terminal = MockTerminal::new();
    let bridge = PaymentBridge::new(
        &terminal,
        Arc::new(StubHost) as Arc<dyn ActivityHost>,
        BridgeConfig::default(),
    );

    let err = bridge.payment("PIX", 100, 1).await.expect_err("must fail");
    assert!(matches!(err, BridgeError::ActivityNotFound(_)));
}
