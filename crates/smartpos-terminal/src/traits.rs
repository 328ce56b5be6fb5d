// SPDX-License-Identifier: MIT
//
// Platform-agnostic trait definitions for the vendor terminal SDK.
//
// The SDK is an opaque external collaborator: the bridge only ever talks to
// it through these contracts, which keeps the dispatch logic testable
// without terminal hardware.

use std::sync::Arc;

use image::DynamicImage;

use smartpos_core::error::Result;
use smartpos_core::types::{
    CompletionEvent, Launch, PaymentKind, PaymentLaunchBuilder, PaymentResult, RequestCode,
};

/// Root handle to the vendor SDK, created once per application context.
///
/// Both derived handles are long-lived and shared across all bridge calls,
/// read-only after construction.
pub trait TerminalSdk: Send + Sync {
    fn payment_operations(&self) -> Arc<dyn PaymentOperations>;
    fn printer_connector(&self) -> Arc<dyn PrinterConnector>;
}

/// Payment-side operations of the vendor SDK.
pub trait PaymentOperations: Send + Sync {
    /// Start building a payment launch for the given kind and amount
    /// (minor currency units).
    fn payment_builder(&self, kind: PaymentKind, amount_minor: i64) -> PaymentLaunchBuilder;

    /// Launch descriptor for a reversal flow.
    fn reversal_launch(&self) -> Launch;

    /// Launch descriptor for a receipt reprint flow.
    fn reprint_launch(&self) -> Launch;

    /// Extract the vendor result object from a completion event.
    /// Returns `None` when the event carries no result.
    fn payment_from_event(&self, event: &CompletionEvent) -> Option<PaymentResult>;
}

/// Printer-side operations of the vendor SDK.
pub trait PrinterConnector: Send + Sync {
    /// Register the callback invoked when a print finishes or fails.
    fn set_callback(&self, callback: Arc<dyn PrinterCallback>);

    /// Hand a decoded bitmap to the printer.
    fn print_bitmap(&self, bitmap: &DynamicImage) -> Result<()>;
}

/// Completion callback for bitmap prints.
pub trait PrinterCallback: Send + Sync {
    fn on_completed(&self);
    fn on_error(&self, message: &str);
}

/// The hosting application's activity surface.
///
/// Launching a terminal flow hands a `Launch` to the OS activity mechanism;
/// the eventual completion event comes back through the bridge's
/// `handle_completion`.
pub trait ActivityHost: Send + Sync {
    /// Start a user-facing terminal flow. Fails with
    /// `BridgeError::ActivityNotFound` when no handler exists for it.
    fn start_activity_for_result(&self, launch: &Launch, code: RequestCode) -> Result<()>;

    /// Show a transient, fire-and-forget user notification.
    fn notify(&self, message: &str);
}
