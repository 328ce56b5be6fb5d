// SPDX-License-Identifier: MIT
//
// The payment bridge: caller-facing operations and the pending-request slot.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;
use tracing::{debug, instrument, warn};

use smartpos_core::config::BridgeConfig;
use smartpos_core::error::{BridgeError, Result};
use smartpos_core::types::{
    AuthorizedPayment, CompletionEvent, Launch, PaymentKind, PaymentStatus, RequestCode,
};
use smartpos_terminal::traits::{ActivityHost, PaymentOperations, PrinterConnector, TerminalSdk};

use crate::dispatch::{self, Settlement};

/// The outstanding request: which flow is in flight and how to settle it.
struct Pending {
    code: RequestCode,
    tx: oneshot::Sender<Result<Settlement>>,
}

/// Bridge between the hosting application and the vendor terminal SDK.
///
/// Holds the two long-lived SDK handles (payment operations, printer
/// connector) obtained once at construction, plus the single pending-request
/// slot. At most one terminal flow is outstanding at a time: launching a new
/// flow overwrites the slot and the superseded caller's request settles with
/// `BridgeError::Superseded`. This mirrors the consuming application's
/// one-flow-at-a-time contract; a multi-request design would key the slot by
/// correlation id instead.
pub struct PaymentBridge {
    payments: Arc<dyn PaymentOperations>,
    printer: Arc<dyn PrinterConnector>,
    host: Arc<dyn ActivityHost>,
    config: BridgeConfig,
    pending: Mutex<Option<Pending>>,
}

impl PaymentBridge {
    /// Derive the payment and printer handles from the SDK root and bind the
    /// bridge to the hosting application's activity surface.
    pub fn new(sdk: &dyn TerminalSdk, host: Arc<dyn ActivityHost>, config: BridgeConfig) -> Self {
        Self {
            payments: sdk.payment_operations(),
            printer: sdk.printer_connector(),
            host,
            config,
            pending: Mutex::new(None),
        }
    }

    /// Constants surface exposed to the consuming application: every payment
    /// kind plus the status names the app matches on.
    pub fn constants() -> BTreeMap<&'static str, &'static str> {
        let mut constants = BTreeMap::new();
        for kind in PaymentKind::ALL {
            constants.insert(kind.as_str(), kind.as_str());
        }
        constants.insert("FAILED", PaymentStatus::Failed.as_str());
        constants.insert("DECLINED", PaymentStatus::Declined.as_str());
        constants
    }

    /// Display a transient user notification. Fire-and-forget, no error path.
    pub fn show(&self, title: &str) {
        self.host.notify(title);
    }

    /// Collect a payment on the terminal.
    ///
    /// `kind` must be one of the vendor payment-type names, `value` is the
    /// amount in minor currency units, `installments` the installment count.
    /// Resolves with the authorized-payment map once the terminal flow
    /// completes; rejects at call time on an unknown kind or a missing
    /// activity handler.
    #[instrument(skip(self))]
    pub async fn payment(
        &self,
        kind: &str,
        value: i64,
        installments: u32,
    ) -> Result<AuthorizedPayment> {
        let kind: PaymentKind = kind.parse()?;
        let launch = self
            .payments
            .payment_builder(kind, value)
            .with_installments(installments)
            .build();
        let rx = self.launch(launch, RequestCode::Payment)?;
        match Self::settled(rx).await? {
            Settlement::Payment(map) => Ok(map),
            Settlement::Text(text) => Err(BridgeError::Failed(text)),
        }
    }

    /// Reverse the previous payment on the terminal.
    #[instrument(skip(self))]
    pub async fn reversal(&self) -> Result<String> {
        let launch = self.payments.reversal_launch();
        let rx = self.launch(launch, RequestCode::Reversal)?;
        Self::text_settlement(rx).await
    }

    /// Reprint the last receipt on the terminal.
    #[instrument(skip(self))]
    pub async fn reprint(&self) -> Result<String> {
        let launch = self.payments.reprint_launch();
        let rx = self.launch(launch, RequestCode::Reprint)?;
        Self::text_settlement(rx).await
    }

    /// Handle the OS completion event for a previously launched flow.
    ///
    /// Routes on the event's request code, computes the single settlement
    /// outcome, and clears the pending slot. Events with an unknown request
    /// code are dropped without touching the slot; events arriving with no
    /// pending request are logged and dropped.
    #[instrument(skip(self, event), fields(request_code = event.request_code))]
    pub fn handle_completion(&self, event: CompletionEvent) {
        let Some(code) = RequestCode::from_raw(event.request_code) else {
            debug!("completion event for unknown request code dropped");
            return;
        };

        let payment = self.payments.payment_from_event(&event);
        let outcome = dispatch::outcome(code, event.result_code, payment);

        let Some(pending) = self.take_pending() else {
            warn!(?code, "completion event arrived with no pending request");
            return;
        };
        if pending.code != code {
            // The slot was overwritten between launch and completion; the
            // stored request is settled with whatever the event produced,
            // exactly as the single-slot contract says.
            warn!(stored = ?pending.code, event = ?code, "completion settles a different request kind");
        }
        if pending.tx.send(outcome).is_err() {
            debug!(?code, "caller stopped waiting before settlement");
        }
    }

    pub(crate) fn printer(&self) -> Arc<dyn PrinterConnector> {
        Arc::clone(&self.printer)
    }

    pub(crate) fn host(&self) -> Arc<dyn ActivityHost> {
        Arc::clone(&self.host)
    }

    pub(crate) fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Launch a terminal flow and store the pending request, overwriting any
    /// previous one.
    fn launch(
        &self,
        launch: Launch,
        code: RequestCode,
    ) -> Result<oneshot::Receiver<Result<Settlement>>> {
        self.host.start_activity_for_result(&launch, code)?;

        let (tx, rx) = oneshot::channel();
        let mut slot = self.lock_pending();
        if let Some(previous) = slot.replace(Pending { code, tx }) {
            // Dropping the previous sender settles that caller with
            // `Superseded`.
            warn!(superseded = ?previous.code, new = ?code, "pending request overwritten");
        }
        Ok(rx)
    }

    async fn settled(rx: oneshot::Receiver<Result<Settlement>>) -> Result<Settlement> {
        rx.await.map_err(|_| BridgeError::Superseded)?
    }

    async fn text_settlement(rx: oneshot::Receiver<Result<Settlement>>) -> Result<String> {
        match Self::settled(rx).await? {
            Settlement::Text(text) => Ok(text),
            Settlement::Payment(map) => Err(BridgeError::Failed(map.message)),
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<Pending>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_pending(&self) -> Option<Pending> {
        self.lock_pending().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_expose_payment_kinds_and_status_subset() {
        let constants = PaymentBridge::constants();
        assert_eq!(constants.len(), 8);
        assert_eq!(constants["PIX"], "PIX");
        assert_eq!(constants["CREDITO_PARCELADO_EMISSOR"], "CREDITO_PARCELADO_EMISSOR");
        assert_eq!(constants["FAILED"], "FAILED");
        assert_eq!(constants["DECLINED"], "DECLINED");
    }
}
