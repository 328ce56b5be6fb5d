// SPDX-License-Identifier: MIT
//
// Stub terminal for desktop/CI builds where the vendor SDK is unavailable.
//
// Every operation that would reach hardware fails with
// `TerminalUnavailable` — real implementations are linked on the device.

use std::sync::Arc;

use image::DynamicImage;

use smartpos_core::error::{BridgeError, Result};
use smartpos_core::types::{
    CompletionEvent, Launch, PaymentKind, PaymentLaunchBuilder, PaymentResult, RequestCode,
};

use crate::traits::{ActivityHost, PaymentOperations, PrinterCallback, PrinterConnector, TerminalSdk};

/// No-op terminal returned on non-device platforms.
pub struct StubTerminal {
    payments: Arc<StubPayments>,
    printer: Arc<StubPrinter>,
}

impl StubTerminal {
    pub fn new() -> Self {
        Self {
            payments: Arc::new(StubPayments),
            printer: Arc::new(StubPrinter),
        }
    }
}

impl Default for StubTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSdk for StubTerminal {
    fn payment_operations(&self) -> Arc<dyn PaymentOperations> {
        Arc::clone(&self.payments) as Arc<dyn PaymentOperations>
    }

    fn printer_connector(&self) -> Arc<dyn PrinterConnector> {
        Arc::clone(&self.printer) as Arc<dyn PrinterConnector>
    }
}

/// Payment operations on the stub — launch descriptors are pure data and
/// still constructible, but no event ever carries a result.
pub struct StubPayments;

impl PaymentOperations for StubPayments {
    fn payment_builder(&self, kind: PaymentKind, amount_minor: i64) -> PaymentLaunchBuilder {
        PaymentLaunchBuilder::new(kind, amount_minor)
    }

    fn reversal_launch(&self) -> Launch {
        Launch::Reversal
    }

    fn reprint_launch(&self) -> Launch {
        Launch::Reprint
    }

    fn payment_from_event(&self, _event: &CompletionEvent) -> Option<PaymentResult> {
        tracing::warn!("PaymentOperations::payment_from_event called on stub terminal");
        None
    }
}

pub struct StubPrinter;

impl PrinterConnector for StubPrinter {
    fn set_callback(&self, _callback: Arc<dyn PrinterCallback>) {}

    fn print_bitmap(&self, _bitmap: &DynamicImage) -> Result<()> {
        tracing::warn!("PrinterConnector::print_bitmap called on stub terminal");
        Err(BridgeError::TerminalUnavailable)
    }
}

/// Activity host for builds without a hosting application: no activity can
/// ever be found, and notifications go to the log.
pub struct StubHost;

impl ActivityHost for StubHost {
    fn start_activity_for_result(&self, _launch: &Launch, code: RequestCode) -> Result<()> {
        tracing::warn!(code = code.as_raw(), "no activity host on this platform");
        Err(BridgeError::ActivityNotFound(format!("{code:?}")))
    }

    fn notify(&self, message: &str) {
        tracing::info!(message, "notification (stub host)");
    }
}
