// SPDX-License-Identifier: MIT
//
// Operator-facing message catalogue.
//
// These strings are part of the contract with the consuming application: the
// Portuguese texts are shown verbatim to the terminal operator, the English
// ones are legacy rejection messages the app already matches on. Change them
// only together with the app.

/// Payment flow aborted by the operator or the OS.
pub const PAYMENT_CANCELED: &str = "Pagamento Cancelado pelo operador";

/// Terminal reported a definitive payment failure.
pub const PAYMENT_FAILED: &str = "Payment failed";

/// Terminal declined the payment.
pub const PAYMENT_DECLINED: &str = "Payment declined";

/// Reversal authorized by the terminal.
pub const REVERSAL_AUTHORIZED: &str = "Autorizado";

/// Reversal declined by the terminal.
pub const REVERSAL_DECLINED: &str = "Reembolso Recusado";

/// Reversal finished with any non-authorized, non-declined status.
pub const REVERSAL_FAILED: &str = "Reembolso Falhou";

/// Reversal flow aborted before the terminal produced a result.
pub const REVERSAL_CANCELED: &str = "Reembolso Cancelado pelo operador";

/// Receipt reprint completed.
pub const REPRINT_OK: &str = "Reimpressão realizada com sucesso";

/// Reprint flow aborted by the operator.
pub const REPRINT_CANCELED: &str = "Reimpressão cancelada pelo operador";

/// Bitmap print completed.
pub const PRINT_OK: &str = "Impressão realizada com sucesso";
