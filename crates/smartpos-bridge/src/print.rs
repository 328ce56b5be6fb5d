// SPDX-License-Identifier: MIT
//
// Print pipeline: base64 → bytes → bitmap → printer, off the caller's thread.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, instrument};

use smartpos_core::config::BridgeConfig;
use smartpos_core::error::{BridgeError, Result};
use smartpos_core::messages;
use smartpos_terminal::traits::{ActivityHost, PrinterCallback};

use crate::bridge::PaymentBridge;

/// Printer callback that surfaces completion to the user as a notification.
///
/// The printer reports out-of-band; the caller's own result comes from the
/// `print_bitmap` return value.
struct NotifyCallback {
    host: Arc<dyn ActivityHost>,
    config: BridgeConfig,
}

impl PrinterCallback for NotifyCallback {
    fn on_completed(&self) {
        if self.config.notify_print_success {
            self.host.notify(messages::PRINT_OK);
        }
    }

    fn on_error(&self, message: &str) {
        if self.config.notify_print_errors {
            self.host.notify(message);
        }
    }
}

impl PaymentBridge {
    /// Decode a base64 bitmap and print it.
    ///
    /// The whole pipeline runs on the blocking pool so the caller is never
    /// blocked by image decoding or the printer. Decode failures reject the
    /// caller without reaching the printer and without notifying the user;
    /// printer results additionally raise a user notification through the
    /// registered callback.
    #[instrument(skip_all, fields(payload_len = image_base64.len()))]
    pub async fn print(&self, image_base64: &str) -> Result<()> {
        let printer = self.printer();
        let host = self.host();
        let config = self.config().clone();
        let payload = image_base64.to_owned();

        tokio::task::spawn_blocking(move || {
            let bytes = STANDARD
                .decode(payload.as_bytes())
                .map_err(|e| BridgeError::Decode(e.to_string()))?;
            let bitmap =
                image::load_from_memory(&bytes).map_err(|e| BridgeError::Decode(e.to_string()))?;
            debug!(
                width = bitmap.width(),
                height = bitmap.height(),
                "bitmap decoded, handing to printer"
            );
            printer.set_callback(Arc::new(NotifyCallback { host, config }));
            printer.print_bitmap(&bitmap)
        })
        .await
        .map_err(|e| BridgeError::Worker(e.to_string()))?
    }
}
