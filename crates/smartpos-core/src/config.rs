// SPDX-License-Identifier: MIT
//
// Bridge configuration.

use serde::{Deserialize, Serialize};

/// Behavioural settings for the payment bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Show a transient notification when a bitmap print completes.
    pub notify_print_success: bool,
    /// Show a transient notification when the printer reports an error.
    pub notify_print_errors: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            notify_print_success: true,
            notify_print_errors: true,
        }
    }
}
