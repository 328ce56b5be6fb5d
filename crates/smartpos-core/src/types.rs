// SPDX-License-Identifier: MIT
//
// Core domain types for the smartpos terminal bridge.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BridgeError;

/// Payment modality accepted by the terminal.
///
/// Names mirror the vendor SDK's enumeration exactly — these strings are the
/// constants exposed to the consuming application and the values it passes
/// back into `payment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentKind {
    Pix,
    CreditoAVista,
    CreditoParcelado,
    CreditoParceladoEmissor,
    Debito,
    Voucher,
}

impl PaymentKind {
    /// All payment kinds, in constant-table order.
    pub const ALL: [PaymentKind; 6] = [
        PaymentKind::Pix,
        PaymentKind::CreditoAVista,
        PaymentKind::CreditoParcelado,
        PaymentKind::CreditoParceladoEmissor,
        PaymentKind::Debito,
        PaymentKind::Voucher,
    ];

    /// Vendor name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pix => "PIX",
            Self::CreditoAVista => "CREDITO_A_VISTA",
            Self::CreditoParcelado => "CREDITO_PARCELADO",
            Self::CreditoParceladoEmissor => "CREDITO_PARCELADO_EMISSOR",
            Self::Debito => "DEBITO",
            Self::Voucher => "VOUCHER",
        }
    }
}

impl FromStr for PaymentKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PIX" => Ok(Self::Pix),
            "CREDITO_A_VISTA" => Ok(Self::CreditoAVista),
            "CREDITO_PARCELADO" => Ok(Self::CreditoParcelado),
            "CREDITO_PARCELADO_EMISSOR" => Ok(Self::CreditoParceladoEmissor),
            "DEBITO" => Ok(Self::Debito),
            "VOUCHER" => Ok(Self::Voucher),
            other => Err(BridgeError::InvalidPaymentType(other.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome status reported by the terminal for a completed flow.
///
/// Closed enumeration — the dispatcher matches exhaustively so that a new
/// vendor status cannot be silently swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Failed,
    Declined,
    Completed,
    Voided,
    Refunded,
    Canceled,
    Hold,
}

impl PaymentStatus {
    /// Vendor name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authorized => "AUTHORIZED",
            Self::Failed => "FAILED",
            Self::Declined => "DECLINED",
            Self::Completed => "COMPLETED",
            Self::Voided => "VOIDED",
            Self::Refunded => "REFUNDED",
            Self::Canceled => "CANCELED",
            Self::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receipt attached to an authorized payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Número Sequencial Único — the transaction's unique sequential
    /// reference issued by the payment network.
    pub nsu: String,
    /// Receipt text destined for the cardholder, when the terminal provides one.
    pub cardholder_message: Option<String>,
    /// Receipt text destined for the merchant, when the terminal provides one.
    pub merchant_message: Option<String>,
}

impl Receipt {
    pub fn new(nsu: impl Into<String>) -> Self {
        Self {
            nsu: nsu.into(),
            cardholder_message: None,
            merchant_message: None,
        }
    }
}

/// Result object the vendor SDK extracts from a completion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub status: PaymentStatus,
    pub receipt: Option<Receipt>,
}

impl PaymentResult {
    pub fn new(status: PaymentStatus) -> Self {
        Self {
            status,
            receipt: None,
        }
    }

    pub fn with_receipt(mut self, receipt: Receipt) -> Self {
        self.receipt = Some(receipt);
        self
    }
}

/// Tag identifying which kind of terminal flow is in flight.
///
/// Raw values match the activity request codes used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum RequestCode {
    Payment = 1001,
    Reversal = 1002,
    Reprint = 1003,
}

impl RequestCode {
    /// Decode a raw activity request code. Unknown codes yield `None` and
    /// the corresponding completion event is dropped by the dispatcher.
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            1001 => Some(Self::Payment),
            1002 => Some(Self::Reversal),
            1003 => Some(Self::Reprint),
            _ => None,
        }
    }

    pub fn as_raw(self) -> u16 {
        self as u16
    }
}

/// Result code delivered with a completion event — the host OS's
/// RESULT_OK / not-OK pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    Ok,
    /// User or OS aborted the flow before it finished.
    Canceled,
}

/// OS-delivered notification that a previously launched terminal flow has
/// finished.
///
/// `request_code` is the raw wire value so that events for flows this bridge
/// never launched can be represented (and dropped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    pub request_code: u16,
    pub result_code: ResultCode,
    /// Vendor payload, decoded by `PaymentOperations::payment_from_event`.
    pub payload: Option<PaymentResult>,
}

impl CompletionEvent {
    pub fn new(request_code: RequestCode, result_code: ResultCode) -> Self {
        Self {
            request_code: request_code.as_raw(),
            result_code,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: PaymentResult) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Intent descriptor for a user-facing terminal flow.
///
/// Inspectable on purpose: tests verify launch parameterisation against this
/// value instead of executing a real terminal flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Launch {
    Payment {
        kind: PaymentKind,
        /// Amount in minor currency units (centavos).
        amount_minor: i64,
        installments: u32,
    },
    Reversal,
    Reprint,
}

/// Builder for a payment launch, mirroring the vendor SDK's
/// `intentForPaymentBuilder(...).setInstallments(...).build()` contract.
#[derive(Debug, Clone)]
pub struct PaymentLaunchBuilder {
    kind: PaymentKind,
    amount_minor: i64,
    installments: u32,
}

impl PaymentLaunchBuilder {
    pub fn new(kind: PaymentKind, amount_minor: i64) -> Self {
        Self {
            kind,
            amount_minor,
            installments: 0,
        }
    }

    pub fn with_installments(mut self, installments: u32) -> Self {
        self.installments = installments;
        self
    }

    pub fn build(self) -> Launch {
        Launch::Payment {
            kind: self.kind,
            amount_minor: self.amount_minor,
            installments: self.installments,
        }
    }
}

/// Resolution map for an authorized payment, as handed to the consuming
/// application.
///
/// All five fields are populated from the same receipt NSU. The mirroring is
/// a deliberate legacy contract with the consuming application — do not
/// diverge the fields without a coordinated contract change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedPayment {
    pub ret_code: String,
    pub transaction_code: String,
    pub transaction_id: String,
    pub message: String,
    pub nsu: String,
}

impl AuthorizedPayment {
    /// Build the resolution map from a receipt NSU.
    pub fn from_nsu(nsu: &str) -> Self {
        Self {
            ret_code: nsu.to_string(),
            transaction_code: nsu.to_string(),
            transaction_id: nsu.to_string(),
            message: nsu.to_string(),
            nsu: nsu.to_string(),
        }
    }
}
