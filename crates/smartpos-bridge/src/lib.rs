// SPDX-License-Identifier: MIT
//
// smartpos — The payment bridge.
//
// Translates application-level payment requests into terminal launches and
// OS completion events back into settled async results. The vendor SDK and
// the hosting activity surface are injected through the traits in
// `smartpos-terminal`.

mod bridge;
mod dispatch;
mod print;

pub use bridge::PaymentBridge;
