use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_valid::Validate;
use std::ops::RangeInclusive;

/// Name of the access point the device broadcasts out of the box
pub const DEFAULT_AP_SSID: &str = "Hydrometer";
pub const DEFAULT_MQTT_PORT: u16 = 1883;
/// 20 minutes
pub const DEFAULT_DEEP_SLEEP_INTERVAL_MS: u64 = 1_200_000;
/// Sampling intervals outside this range are accepted but flagged
pub const RECOMMENDED_INTERVAL_MINUTES: RangeInclusive<u64> = 5..=60;

const MS_PER_MINUTE: u64 = 60 * 1000;

/// Convert the deep sleep interval to whole minutes, rounding up.
///
/// ```
/// use hydrometer_ui_core::types::ms_to_minutes;
/// assert_eq!(ms_to_minutes(1_200_000), 20);
/// assert_eq!(ms_to_minutes(61_000), 2);
/// ```
pub fn ms_to_minutes(ms: u64) -> u64 {
    ms.div_ceil(MS_PER_MINUTE)
}

/// Convert whole minutes back to the device's millisecond representation.
pub fn minutes_to_ms(minutes: u64) -> u64 {
    minutes.saturating_mul(MS_PER_MINUTE)
}

/// Credentials for a network the device should join
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct WifiCredentials {
    #[validate(min_length = 1)]
    pub ssid: String,
    pub pass: String,
    /// Keys of the device's section this record does not model, written
    /// back unchanged on save
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl WifiCredentials {
    pub fn new(ssid: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            pass: pass.into(),
            extra: Map::new(),
        }
    }
}

/// MQTT broker configuration
///
/// A `broker_port` of `0` stands for an empty port field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MqttBroker {
    #[validate(min_length = 1)]
    pub broker_addr: String,
    #[validate(minimum = 1)]
    pub broker_port: u16,
    #[validate(min_length = 1)]
    pub username: String,
    pub password: String,
    #[validate(min_length = 1)]
    pub topic: String,
    /// Device-only keys such as `pubIntervalMs`
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl Default for MqttBroker {
    fn default() -> Self {
        Self {
            broker_addr: String::new(),
            broker_port: DEFAULT_MQTT_PORT,
            username: String::new(),
            password: String::new(),
            topic: String::new(),
            extra: Map::new(),
        }
    }
}

/// Where the device delivers its measurements.
///
/// The fermenter AP and MQTT targets are mutually exclusive, so they are a
/// single state instead of two flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UplinkMode {
    None,
    #[default]
    FermenterAp,
    Mqtt,
}

impl UplinkMode {
    pub fn fermenter_ap_enabled(self) -> bool {
        self == Self::FermenterAp
    }

    pub fn mqtt_enabled(self) -> bool {
        self == Self::Mqtt
    }

    /// Resolve the two device flags into one mode.
    ///
    /// Both flags set is not a valid device state; the fermenter AP wins.
    pub fn from_flags(fermenter_ap_enabled: bool, mqtt_enabled: bool) -> Self {
        match (fermenter_ap_enabled, mqtt_enabled) {
            (true, true) => {
                log::warn!("device reported fermenter AP and MQTT both enabled, using fermenter AP");
                Self::FermenterAp
            }
            (true, false) => Self::FermenterAp,
            (false, true) => Self::Mqtt,
            (false, false) => Self::None,
        }
    }

    /// Result of flipping the fermenter AP toggle.
    ///
    /// Enabling it switches MQTT off; disabling it leaves no uplink.
    pub fn with_fermenter_ap(self, enabled: bool) -> Self {
        match (self, enabled) {
            (_, true) => Self::FermenterAp,
            (Self::FermenterAp, false) => Self::None,
            (other, false) => other,
        }
    }

    /// Result of flipping the MQTT toggle.
    pub fn with_mqtt(self, enabled: bool) -> Self {
        match (self, enabled) {
            (_, true) => Self::Mqtt,
            (Self::Mqtt, false) => Self::None,
            (other, false) => other,
        }
    }
}

/// The settings record edited in the settings panel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub ap_ssid: String,
    pub wifi: WifiCredentials,
    pub fermenter_ap: WifiCredentials,
    pub mqtt: MqttBroker,
    pub(crate) uplink: UplinkMode,
    pub deep_sleep_interval_ms: u64,
    /// Networks seen by the last scan, never persisted
    pub wifi_list: Vec<String>,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            ap_ssid: DEFAULT_AP_SSID.to_string(),
            wifi: WifiCredentials::default(),
            fermenter_ap: WifiCredentials::default(),
            mqtt: MqttBroker::default(),
            uplink: UplinkMode::default(),
            deep_sleep_interval_ms: DEFAULT_DEEP_SLEEP_INTERVAL_MS,
            wifi_list: Vec::new(),
        }
    }
}

impl SettingsRecord {
    pub fn uplink(&self) -> UplinkMode {
        self.uplink
    }

    /// The only way to change which uplink is active.
    pub fn set_uplink(&mut self, uplink: UplinkMode) {
        self.uplink = uplink;
    }

    pub fn set_fermenter_ap_enabled(&mut self, enabled: bool) {
        self.uplink = self.uplink.with_fermenter_ap(enabled);
    }

    pub fn set_mqtt_enabled(&mut self, enabled: bool) {
        self.uplink = self.uplink.with_mqtt(enabled);
    }

    pub fn interval_minutes(&self) -> u64 {
        ms_to_minutes(self.deep_sleep_interval_ms)
    }

    pub fn set_interval_minutes(&mut self, minutes: u64) {
        self.deep_sleep_interval_ms = minutes_to_ms(minutes);
    }

    /// Soft warning for intervals outside the recommended range
    pub fn interval_warning(&self) -> Option<String> {
        let minutes = self.interval_minutes();
        if RECOMMENDED_INTERVAL_MINUTES.contains(&minutes) {
            None
        } else {
            Some(format!(
                "Recommended interval is {}-{} minutes",
                RECOMMENDED_INTERVAL_MINUTES.start(),
                RECOMMENDED_INTERVAL_MINUTES.end()
            ))
        }
    }

    /// Saving needs an AP name and a non-zero interval
    pub fn can_save(&self) -> bool {
        crate::types::SaveSettingsRequest::from(self).validate().is_ok()
    }

    /// Testing MQTT needs broker address, port, username and topic
    pub fn can_test_mqtt(&self) -> bool {
        self.mqtt.validate().is_ok()
    }

    pub fn can_connect_wifi(&self) -> bool {
        self.wifi.validate().is_ok()
    }

    pub fn can_connect_fermenter_ap(&self) -> bool {
        self.uplink.fermenter_ap_enabled() && self.fermenter_ap.validate().is_ok()
    }
}
