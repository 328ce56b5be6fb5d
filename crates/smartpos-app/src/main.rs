// SPDX-License-Identifier: MIT
//
// smartpos demo.
//
// Entry point. Initialises logging, wires the bridge over the mock terminal,
// and drives one payment, one reversal, and one receipt print. On a device
// the mock is replaced by the vendor SDK bindings and completion events come
// from the OS activity mechanism instead of the simulator task below.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use smartpos_bridge::PaymentBridge;
use smartpos_core::config::BridgeConfig;
use smartpos_core::types::{
    CompletionEvent, PaymentResult, PaymentStatus, Receipt, RequestCode, ResultCode,
};
use smartpos_terminal::mock::{MockHost, MockTerminal};
use smartpos_terminal::traits::ActivityHost;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("smartpos demo starting");
    tracing::info!(constants = ?PaymentBridge::constants(), "constants exposed to the app");

    let terminal = MockTerminal::new();
    let host = Arc::new(MockHost::new());
    let bridge = Arc::new(PaymentBridge::new(
        &terminal,
        host.clone() as Arc<dyn ActivityHost>,
        BridgeConfig::default(),
    ));

    bridge.show("Terminal pronto");

    // Simulated terminal: answers every launched flow with an authorized
    // completion after a short delay.
    let simulator = {
        let bridge = bridge.clone();
        let host = host.clone();
        tokio::spawn(async move {
            let mut settled = 0;
            loop {
                let started = host.started();
                if started.len() > settled {
                    let (_, code) = started[settled].clone();
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    let event = CompletionEvent::new(code, ResultCode::Ok).with_payload(
                        PaymentResult::new(PaymentStatus::Authorized)
                            .with_receipt(Receipt::new(format!("{:06}", settled + 1))),
                    );
                    bridge.handle_completion(event);
                    settled += 1;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
    };

    match bridge.payment("CREDITO_PARCELADO", 15_000, 3).await {
        Ok(map) => {
            let json = serde_json::to_string(&map).unwrap_or_default();
            tracing::info!(%json, "payment authorized");
        }
        Err(e) => tracing::error!(code = e.code(), error = %e, "payment rejected"),
    }

    match bridge.reversal().await {
        Ok(text) => tracing::info!(%text, "reversal settled"),
        Err(e) => tracing::error!(code = e.code(), error = %e, "reversal rejected"),
    }

    match bridge.print(&receipt_png_base64()).await {
        Ok(()) => tracing::info!("receipt printed"),
        Err(e) => tracing::error!(code = e.code(), error = %e, "print rejected"),
    }

    simulator.abort();
    for note in host.notifications() {
        tracing::info!(%note, "notification shown");
    }
    tracing::info!("smartpos demo finished");
}

/// A blank receipt-sized bitmap, base64-encoded the way the app would hand
/// it to `print`.
fn receipt_png_base64() -> String {
    let bitmap = image::DynamicImage::new_luma8(384, 120);
    let mut bytes = Vec::new();
    if let Err(e) = bitmap.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png) {
        tracing::error!(error = %e, "failed to encode demo receipt");
    }
    STANDARD.encode(&bytes)
}
