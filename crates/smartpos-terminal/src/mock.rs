// SPDX-License-Identifier: MIT
//
// In-memory terminal for tests and the demo binary.
//
// Records every launched intent, printed bitmap, and notification, and can
// inject the failure modes the bridge has to survive (missing activity
// handler, printer error).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::ThreadId;

use image::DynamicImage;

use smartpos_core::error::{BridgeError, Result};
use smartpos_core::types::{
    CompletionEvent, Launch, PaymentKind, PaymentLaunchBuilder, PaymentResult, RequestCode,
};

use crate::traits::{
    ActivityHost, PaymentOperations, PrinterCallback, PrinterConnector, TerminalSdk,
};

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock vendor SDK root handle.
pub struct MockTerminal {
    payments: Arc<MockPayments>,
    printer: Arc<MockPrinter>,
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            payments: Arc::new(MockPayments),
            printer: Arc::new(MockPrinter::new()),
        }
    }

    /// The mock printer, for inspection and failure injection.
    pub fn printer(&self) -> Arc<MockPrinter> {
        Arc::clone(&self.printer)
    }
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSdk for MockTerminal {
    fn payment_operations(&self) -> Arc<dyn PaymentOperations> {
        Arc::clone(&self.payments) as Arc<dyn PaymentOperations>
    }

    fn printer_connector(&self) -> Arc<dyn PrinterConnector> {
        Arc::clone(&self.printer) as Arc<dyn PrinterConnector>
    }
}

/// Mock payment operations: launches are plain descriptors and result
/// extraction just hands back the payload carried by the event.
pub struct MockPayments;

impl PaymentOperations for MockPayments {
    fn payment_builder(&self, kind: PaymentKind, amount_minor: i64) -> PaymentLaunchBuilder {
        PaymentLaunchBuilder::new(kind, amount_minor)
    }

    fn reversal_launch(&self) -> Launch {
        Launch::Reversal
    }

    fn reprint_launch(&self) -> Launch {
        Launch::Reprint
    }

    fn payment_from_event(&self, event: &CompletionEvent) -> Option<PaymentResult> {
        event.payload.clone()
    }
}

/// A bitmap the mock printer "printed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedBitmap {
    pub width: u32,
    pub height: u32,
    /// Thread the print call ran on — asserted distinct from the caller's.
    pub thread: ThreadId,
}

/// Mock printer connector recording print calls.
pub struct MockPrinter {
    printed: Mutex<Vec<PrintedBitmap>>,
    callback: Mutex<Option<Arc<dyn PrinterCallback>>>,
    fail_with: Mutex<Option<String>>,
}

impl MockPrinter {
    fn new() -> Self {
        Self {
            printed: Mutex::new(Vec::new()),
            callback: Mutex::new(None),
            fail_with: Mutex::new(None),
        }
    }

    /// Make the next `print_bitmap` call report this printer error.
    pub fn fail_next_print(&self, message: impl Into<String>) {
        *lock(&self.fail_with) = Some(message.into());
    }

    /// Bitmaps printed so far.
    pub fn printed(&self) -> Vec<PrintedBitmap> {
        lock(&self.printed).clone()
    }
}

impl PrinterConnector for MockPrinter {
    fn set_callback(&self, callback: Arc<dyn PrinterCallback>) {
        *lock(&self.callback) = Some(callback);
    }

    fn print_bitmap(&self, bitmap: &DynamicImage) -> Result<()> {
        let callback = lock(&self.callback).clone();
        if let Some(message) = lock(&self.fail_with).take() {
            if let Some(cb) = callback {
                cb.on_error(&message);
            }
            return Err(BridgeError::Printer(message));
        }

        lock(&self.printed).push(PrintedBitmap {
            width: bitmap.width(),
            height: bitmap.height(),
            thread: std::thread::current().id(),
        });
        if let Some(cb) = callback {
            cb.on_completed();
        }
        Ok(())
    }
}

/// Mock hosting application: records launched flows and notifications.
pub struct MockHost {
    started: Mutex<Vec<(Launch, RequestCode)>>,
    notifications: Mutex<Vec<String>>,
    missing_activity: AtomicBool,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            started: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            missing_activity: AtomicBool::new(false),
        }
    }

    /// Simulate a device with no activity able to handle terminal flows.
    pub fn set_missing_activity(&self, missing: bool) {
        self.missing_activity.store(missing, Ordering::SeqCst);
    }

    /// Flows launched so far, in order.
    pub fn started(&self) -> Vec<(Launch, RequestCode)> {
        lock(&self.started).clone()
    }

    /// Notifications shown so far, in order.
    pub fn notifications(&self) -> Vec<String> {
        lock(&self.notifications).clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityHost for MockHost {
    fn start_activity_for_result(&self, launch: &Launch, code: RequestCode) -> Result<()> {
        if self.missing_activity.load(Ordering::SeqCst) {
            return Err(BridgeError::ActivityNotFound(format!("{code:?}")));
        }
        lock(&self.started).push((launch.clone(), code));
        Ok(())
    }

    fn notify(&self, message: &str) {
        lock(&self.notifications).push(message.to_string());
    }
}
