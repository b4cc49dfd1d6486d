use serde::{Deserialize, Serialize};

use crate::types::*;

/// Application Model - the complete state of the settings panel
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    pub settings: SettingsRecord,

    // Panel state
    pub panel_open: bool,
    pub password_visible: bool,

    /// Single authoritative reboot gate, set by a successful MQTT test or save
    pub reboot_allowed: bool,
    pub reboot_confirmation_pending: bool,

    // UI state
    pub is_loading: bool,
    pub notification: Option<Notification>,
    pub(crate) notification_count: u32,
}

impl Model {
    pub fn start_loading(&mut self) {
        self.is_loading = true;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
    }

    /// Show an info notification and stop loading
    pub fn notify(&mut self, icon: &str, message: impl Into<String>) {
        self.push_notification(Severity::Info, icon, message.into());
    }

    /// Show a negative notification, log the underlying error and stop loading
    pub fn notify_failure(&mut self, icon: &str, message: impl Into<String>, error: &str) {
        let message = message.into();
        log::error!("{message}: {error}");
        self.push_notification(Severity::Negative, icon, message);
    }

    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Close the panel and drop unsaved edits
    pub fn close_panel(&mut self) {
        self.panel_open = false;
        self.reboot_confirmation_pending = false;
        self.settings = SettingsRecord::default();
    }

    fn push_notification(&mut self, severity: Severity, icon: &str, message: String) {
        self.is_loading = false;
        self.notification_count = self.notification_count.wrapping_add(1);
        self.notification = Some(Notification {
            id: self.notification_count,
            severity,
            icon: icon.to_string(),
            message,
        });
    }
}

/// What a shell renders: the model plus the derived form state
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub model: Model,
    pub uplink: UplinkMode,
    pub interval_minutes: u64,
    pub interval_warning: Option<String>,
    pub can_save: bool,
    pub can_test_mqtt: bool,
    pub can_connect_wifi: bool,
    pub can_connect_fermenter_ap: bool,
    pub can_reboot: bool,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let settings = &model.settings;
        Self {
            uplink: settings.uplink(),
            interval_minutes: settings.interval_minutes(),
            interval_warning: settings.interval_warning(),
            can_save: settings.can_save(),
            can_test_mqtt: settings.can_test_mqtt(),
            can_connect_wifi: settings.can_connect_wifi(),
            can_connect_fermenter_ap: settings.can_connect_fermenter_ap(),
            can_reboot: model.reboot_allowed,
            model: model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_get_increasing_ids() {
        let mut model = Model::default();

        model.notify(icon::SUCCESS, "first");
        let first = model.notification.clone().expect("notification");
        model.notify(icon::SUCCESS, "first");
        let second = model.notification.clone().expect("notification");

        assert_eq!(first.message, second.message);
        assert!(second.id > first.id);
    }

    #[test]
    fn failure_notification_stops_loading() {
        let mut model = Model::default();
        model.start_loading();

        model.notify_failure(icon::ERROR, "Error: could not save settings", "HTTP 500");

        assert!(!model.is_loading);
        assert!(model.notification.as_ref().is_some_and(Notification::is_failure));
    }

    #[test]
    fn close_panel_discards_edits() {
        let mut model = Model {
            panel_open: true,
            ..Default::default()
        };
        model.settings.ap_ssid = "Edited".to_string();

        model.close_panel();

        assert!(!model.panel_open);
        assert_eq!(model.settings, SettingsRecord::default());
    }

    #[test]
    fn view_model_reflects_reboot_gate() {
        let model = Model {
            reboot_allowed: true,
            ..Default::default()
        };

        let view = ViewModel::from(&model);

        assert!(view.can_reboot);
        assert!(view.can_save);
        assert_eq!(view.interval_minutes, 20);
        assert!(!view.can_test_mqtt);
    }
}
