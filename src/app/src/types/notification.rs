use serde::{Deserialize, Serialize};

/// Severity of a transient notification (toast)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Info,
    Negative,
}

/// Outcome of a single operation, shown to the operator once.
///
/// `id` increases with every notification so a shell can tell two equal
/// messages apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub severity: Severity,
    pub icon: String,
    pub message: String,
}

impl Notification {
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Negative
    }
}

/// Material icon names used by the web shell
pub mod icon {
    pub const WIFI_CONNECTED: &str = "signal_wifi_4_bar_lock";
    pub const WIFI_OFF: &str = "signal_wifi_off";
    pub const SUCCESS: &str = "check_circle_outline";
    pub const ERROR: &str = "error_outline";
    pub const REBOOT: &str = "autorenew";
}
