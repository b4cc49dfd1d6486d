use crux_core::{render::render, Command};
use log::debug;
use serde_valid::Validate;

use crate::events::{Event, SettingsEvent};
use crate::model::Model;
use crate::types::{icon, minutes_to_ms, ApiSettings, SaveSettingsRequest, SettingsRecord};
use crate::Effect;
use crate::{device_get, device_post, handle_response, update_field};

/// Handle the settings panel lifecycle and edits of the settings record
pub fn handle(event: SettingsEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        SettingsEvent::TogglePanel => {
            if model.panel_open {
                model.close_panel();
                return render();
            }

            model.panel_open = true;
            device_get!(Settings, SettingsEvent, model, "/settings", FetchResponse, "Fetch settings",
                expect_json: ApiSettings,
                map: SettingsRecord::from
            )
        }

        SettingsEvent::FetchResponse(result) => handle_response!(model, result, {
            on_success: |model, settings| {
                if model.panel_open {
                    model.settings = settings;
                } else {
                    debug!("panel closed before settings arrived, discarding them");
                }
            },
            success: (icon::SUCCESS, "Settings loaded from the device"),
            failure: (icon::ERROR, "Error: could not load settings from the device"),
        }),

        SettingsEvent::SetApSsid(ssid) => update_field!(model.settings.ap_ssid, ssid),

        SettingsEvent::SetUplink(uplink) => {
            if model.settings.uplink() == uplink {
                return Command::done();
            }
            model.settings.set_uplink(uplink);
            render()
        }

        SettingsEvent::SetFermenterApEnabled(enabled) => {
            model.settings.set_fermenter_ap_enabled(enabled);
            render()
        }

        SettingsEvent::SetMqttEnabled(enabled) => {
            model.settings.set_mqtt_enabled(enabled);
            render()
        }

        SettingsEvent::SetIntervalMinutes(minutes) => {
            update_field!(model.settings.deep_sleep_interval_ms, minutes_to_ms(minutes))
        }

        SettingsEvent::Save => {
            let request = SaveSettingsRequest::from(&model.settings);
            if let Err(e) = request.validate() {
                debug!("save not possible: {e}");
                return Command::done();
            }
            device_post!(Settings, SettingsEvent, model, "/settings", SaveResponse, "Save settings",
                body_json: &request
            )
        }

        SettingsEvent::SaveResponse(result) => handle_response!(model, result, {
            on_success: |model, _| {
                model.reboot_allowed = true;
            },
            success: (icon::SUCCESS, "Settings saved"),
            failure: (icon::ERROR, "Error: could not save settings"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Severity, UplinkMode};

    fn open_model() -> Model {
        Model {
            panel_open: true,
            ..Default::default()
        }
    }

    #[test]
    fn opening_panel_starts_fetch() {
        let mut model = Model::default();

        let _ = handle(SettingsEvent::TogglePanel, &mut model);

        assert!(model.panel_open);
        assert!(model.is_loading);
    }

    #[test]
    fn closing_panel_discards_unsaved_edits() {
        let mut model = open_model();
        model.settings.ap_ssid = "Unsaved".to_string();

        let _ = handle(SettingsEvent::TogglePanel, &mut model);

        assert!(!model.panel_open);
        assert_eq!(model.settings, SettingsRecord::default());
    }

    #[test]
    fn fetched_settings_replace_record() {
        let mut model = open_model();
        let mut fetched = SettingsRecord::default();
        fetched.ap_ssid = "Cellar".to_string();
        fetched.set_uplink(UplinkMode::Mqtt);

        let _ = handle(SettingsEvent::FetchResponse(Ok(fetched.clone())), &mut model);

        assert_eq!(model.settings, fetched);
        assert_eq!(
            model.notification.as_ref().map(|n| n.severity),
            Some(Severity::Info)
        );
    }

    #[test]
    fn failed_fetch_keeps_record() {
        let mut model = open_model();
        model.settings.ap_ssid = "Before".to_string();
        let before = model.settings.clone();

        let _ = handle(
            SettingsEvent::FetchResponse(Err("Fetch settings failed: IO error".to_string())),
            &mut model,
        );

        assert_eq!(model.settings, before);
        assert!(model.panel_open);
        assert!(model.notification.as_ref().is_some_and(|n| n.is_failure()));
    }

    #[test]
    fn late_fetch_for_closed_panel_is_dropped() {
        let mut model = Model::default();
        let mut fetched = SettingsRecord::default();
        fetched.ap_ssid = "Late".to_string();

        let _ = handle(SettingsEvent::FetchResponse(Ok(fetched)), &mut model);

        assert_eq!(model.settings, SettingsRecord::default());
    }

    #[test]
    fn uplink_setters_keep_exclusivity() {
        let mut model = open_model();

        let _ = handle(SettingsEvent::SetMqttEnabled(true), &mut model);
        assert_eq!(model.settings.uplink(), UplinkMode::Mqtt);

        let _ = handle(SettingsEvent::SetFermenterApEnabled(true), &mut model);
        assert_eq!(model.settings.uplink(), UplinkMode::FermenterAp);
        assert!(!model.settings.uplink().mqtt_enabled());

        let _ = handle(SettingsEvent::SetFermenterApEnabled(false), &mut model);
        assert_eq!(model.settings.uplink(), UplinkMode::None);
    }

    #[test]
    fn interval_is_stored_in_milliseconds() {
        let mut model = open_model();

        let _ = handle(SettingsEvent::SetIntervalMinutes(15), &mut model);

        assert_eq!(model.settings.deep_sleep_interval_ms, 900_000);
    }

    #[test]
    fn save_without_ap_ssid_does_nothing() {
        let mut model = open_model();
        model.settings.ap_ssid.clear();

        let _ = handle(SettingsEvent::Save, &mut model);

        assert!(!model.is_loading);
        assert_eq!(model.notification, None);
    }

    #[test]
    fn save_without_interval_does_nothing() {
        let mut model = open_model();
        model.settings.deep_sleep_interval_ms = 0;

        let _ = handle(SettingsEvent::Save, &mut model);

        assert!(!model.is_loading);
    }

    #[test]
    fn successful_save_allows_reboot() {
        let mut model = open_model();
        assert!(!model.reboot_allowed);

        let _ = handle(SettingsEvent::SaveResponse(Ok(())), &mut model);

        assert!(model.reboot_allowed);
    }

    #[test]
    fn failed_save_keeps_reboot_locked() {
        let mut model = open_model();

        let _ = handle(
            SettingsEvent::SaveResponse(Err("Save settings failed: HTTP 500".to_string())),
            &mut model,
        );

        assert!(!model.reboot_allowed);
        assert!(model.notification.as_ref().is_some_and(|n| n.is_failure()));
    }
}
