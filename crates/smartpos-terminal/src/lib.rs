// SPDX-License-Identifier: MIT
//
// smartpos — Vendor terminal SDK abstractions.
//
// This crate defines the trait seam between the bridge logic and the
// proprietary terminal SDK. The real payment protocol, EMV handling, and
// printer firmware live behind these traits on the device; everything on
// this side only builds launch descriptors and consumes completion events.

pub mod mock;
pub mod stub;
pub mod traits;

use std::sync::Arc;

use traits::TerminalSdk;

/// Retrieves the terminal SDK implementation for the current build.
///
/// Device builds link the vendor bindings and return them here; desktop and
/// CI builds get a stub whose every operation fails with
/// `BridgeError::TerminalUnavailable`.
pub fn platform_terminal() -> Arc<dyn TerminalSdk> {
    Arc::new(stub::StubTerminal::new())
}
