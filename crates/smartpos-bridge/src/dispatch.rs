// SPDX-License-Identifier: MIT
//
// Completion-event dispatch: the one piece of real control flow in the
// bridge. Maps a (request code, result code, payment result) triple to
// exactly one settlement outcome.

use smartpos_core::error::{BridgeError, Result};
use smartpos_core::messages;
use smartpos_core::types::{
    AuthorizedPayment, PaymentResult, PaymentStatus, RequestCode, ResultCode,
};

/// Value a completion event settles the pending request with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Settlement {
    /// Authorized payment — the resolution map handed to the application.
    Payment(AuthorizedPayment),
    /// Reversal / reprint completion text.
    Text(String),
}

/// Compute the settlement outcome for a completion event.
///
/// Each branch produces exactly one outcome; the reversal arm in particular
/// is a single expression so a second settlement cannot be issued. Statuses
/// the bridge has not been extended to handle reject with
/// `UnsupportedStatus` — the exhaustive match ensures a new vendor status
/// cannot be swallowed silently.
pub(crate) fn outcome(
    code: RequestCode,
    result_code: ResultCode,
    payment: Option<PaymentResult>,
) -> Result<Settlement> {
    match code {
        RequestCode::Payment => match result_code {
            ResultCode::Canceled => Err(BridgeError::Canceled(messages::PAYMENT_CANCELED.into())),
            ResultCode::Ok => match payment {
                None => Err(BridgeError::Failed("error".into())),
                Some(result) => match result.status {
                    PaymentStatus::Authorized => result
                        .receipt
                        .map(|receipt| Settlement::Payment(AuthorizedPayment::from_nsu(&receipt.nsu)))
                        .ok_or(BridgeError::MissingResult),
                    PaymentStatus::Failed => {
                        Err(BridgeError::Failed(messages::PAYMENT_FAILED.into()))
                    }
                    PaymentStatus::Declined => {
                        Err(BridgeError::Declined(messages::PAYMENT_DECLINED.into()))
                    }
                    status @ (PaymentStatus::Completed
                    | PaymentStatus::Voided
                    | PaymentStatus::Refunded
                    | PaymentStatus::Canceled
                    | PaymentStatus::Hold) => Err(BridgeError::UnsupportedStatus(status)),
                },
            },
        },

        RequestCode::Reversal => match result_code {
            ResultCode::Canceled => Err(BridgeError::Failed(messages::PAYMENT_FAILED.into())),
            ResultCode::Ok => match payment {
                None => Err(BridgeError::Canceled(messages::REVERSAL_CANCELED.into())),
                Some(result) => match result.status {
                    PaymentStatus::Authorized => {
                        Ok(Settlement::Text(messages::REVERSAL_AUTHORIZED.into()))
                    }
                    PaymentStatus::Declined => {
                        Err(BridgeError::Declined(messages::REVERSAL_DECLINED.into()))
                    }
                    _ => Err(BridgeError::Failed(messages::REVERSAL_FAILED.into())),
                },
            },
        },

        RequestCode::Reprint => match result_code {
            ResultCode::Ok => Ok(Settlement::Text(messages::REPRINT_OK.into())),
            ResultCode::Canceled => {
                Err(BridgeError::Canceled(messages::REPRINT_CANCELED.into()))
            }
        },
    }
}
