// SPDX-License-Identifier: MIT
//
// Unified error type for the smartpos bridge.

use thiserror::Error;

use crate::types::PaymentStatus;

/// Top-level error type for all bridge operations.
///
/// Every failure path settles the caller's outstanding request with one of
/// these variants; nothing here is fatal to the process.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Call-time rejections --
    #[error("invalid payment type: {0}")]
    InvalidPaymentType(String),

    #[error("no activity found to handle {0}")]
    ActivityNotFound(String),

    // -- Completion-time rejections --
    #[error("{0}")]
    Canceled(String),

    #[error("{0}")]
    Declined(String),

    #[error("{0}")]
    Failed(String),

    /// The terminal reported a status this bridge has not been extended to
    /// handle. Fails loudly instead of silently succeeding.
    #[error("payment status {0} not implemented")]
    UnsupportedStatus(PaymentStatus),

    #[error("completion event carried no payment result")]
    MissingResult,

    /// A newer operation overwrote the pending-request slot before this
    /// one completed.
    #[error("request superseded by a newer operation")]
    Superseded,

    // -- Print pipeline --
    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("printer error: {0}")]
    Printer(String),

    #[error("print worker failed: {0}")]
    Worker(String),

    // -- Platform --
    #[error("terminal SDK not available on this platform")]
    TerminalUnavailable,
}

impl BridgeError {
    /// The wire-level error code surfaced to callers alongside the message.
    ///
    /// The consuming application contract uses a single generic code for
    /// every rejection; the message carries the detail.
    pub fn code(&self) -> &'static str {
        "error"
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_uses_the_generic_wire_code() {
        let errors = [
            BridgeError::InvalidPaymentType("FOO".into()),
            BridgeError::ActivityNotFound("Payment".into()),
            BridgeError::Canceled("msg".into()),
            BridgeError::UnsupportedStatus(PaymentStatus::Hold),
            BridgeError::Superseded,
        ];
        for err in errors {
            assert_eq!(err.code(), "error");
        }
    }

    #[test]
    fn unsupported_status_names_the_status() {
        let err = BridgeError::UnsupportedStatus(PaymentStatus::Voided);
        assert_eq!(err.to_string(), "payment status VOIDED not implemented");
    }
}
