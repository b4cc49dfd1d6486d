//! Wire format of the hydrometer's local HTTP API
//!
//! The device stores and returns the two uplink targets as independent
//! `enabled` flags. These types carry that shape across the wire and are
//! converted into [`SettingsRecord`] (via `From`) before anything else in the
//! core sees them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use serde_valid::Validate;

use crate::types::{
    MqttBroker, SettingsRecord, UplinkMode, WifiCredentials, DEFAULT_AP_SSID,
    DEFAULT_DEEP_SLEEP_INTERVAL_MS, DEFAULT_MQTT_PORT,
};

/// WiFi section as stored on the device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiWifi {
    pub ssid: String,
    pub pass: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fermenter access point as stored on the device
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiFermenterAp {
    pub enabled: bool,
    pub ssid: String,
    pub pass: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// MQTT section as stored on the device
///
/// The device persists the posted body as is, so keys this crate does not
/// know about are kept in `extra` and sent back with every save and test.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiMqtt {
    pub enabled: bool,
    pub broker_addr: String,
    /// Always serialized as a number. An empty port received as `""` goes
    /// back as `0`, which the device's MQTT client treats as its default port.
    #[serde(deserialize_with = "port_from_number_or_text")]
    pub broker_port: u16,
    pub username: String,
    pub password: String,
    pub topic: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ApiMqtt {
    fn default() -> Self {
        Self {
            enabled: false,
            broker_addr: String::new(),
            broker_port: DEFAULT_MQTT_PORT,
            username: String::new(),
            password: String::new(),
            topic: String::new(),
            extra: Map::new(),
        }
    }
}

/// `GET /settings` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiSettings {
    pub ap_ssid: String,
    pub wifi: ApiWifi,
    pub fermenter_ap: ApiFermenterAp,
    pub mqtt: ApiMqtt,
    pub deep_sleep_interval_ms: u64,
    pub wifi_list: Vec<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            ap_ssid: DEFAULT_AP_SSID.to_string(),
            wifi: ApiWifi::default(),
            fermenter_ap: ApiFermenterAp::default(),
            mqtt: ApiMqtt::default(),
            deep_sleep_interval_ms: DEFAULT_DEEP_SLEEP_INTERVAL_MS,
            wifi_list: Vec::new(),
        }
    }
}

/// `GET /wifi` response
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WifiList {
    pub wifi_list: Vec<String>,
}

/// `POST /settings` body
///
/// `wifiList` is intentionally absent: scan results are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    #[validate(min_length = 1)]
    pub ap_ssid: String,
    pub wifi: ApiWifi,
    pub fermenter_ap: ApiFermenterAp,
    pub mqtt: ApiMqtt,
    /// Anything below one minute rounds up, so only zero is rejected
    #[validate(minimum = 1)]
    pub deep_sleep_interval_ms: u64,
}

/// `POST /mqtttest` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MqttTestRequest {
    pub mqtt: ApiMqtt,
}

impl From<ApiWifi> for WifiCredentials {
    fn from(api: ApiWifi) -> Self {
        Self {
            ssid: api.ssid,
            pass: api.pass,
            extra: api.extra,
        }
    }
}

impl From<&WifiCredentials> for ApiWifi {
    fn from(credentials: &WifiCredentials) -> Self {
        Self {
            ssid: credentials.ssid.clone(),
            pass: credentials.pass.clone(),
            extra: credentials.extra.clone(),
        }
    }
}

impl From<ApiSettings> for SettingsRecord {
    fn from(api: ApiSettings) -> Self {
        let uplink = UplinkMode::from_flags(api.fermenter_ap.enabled, api.mqtt.enabled);
        Self {
            ap_ssid: api.ap_ssid,
            wifi: api.wifi.into(),
            fermenter_ap: WifiCredentials {
                ssid: api.fermenter_ap.ssid,
                pass: api.fermenter_ap.pass,
                extra: api.fermenter_ap.extra,
            },
            mqtt: MqttBroker {
                broker_addr: api.mqtt.broker_addr,
                broker_port: api.mqtt.broker_port,
                username: api.mqtt.username,
                password: api.mqtt.password,
                topic: api.mqtt.topic,
                extra: api.mqtt.extra,
            },
            uplink,
            deep_sleep_interval_ms: api.deep_sleep_interval_ms,
            wifi_list: api.wifi_list,
        }
    }
}

impl ApiFermenterAp {
    pub fn new(credentials: &WifiCredentials, enabled: bool) -> Self {
        Self {
            enabled,
            ssid: credentials.ssid.clone(),
            pass: credentials.pass.clone(),
            extra: credentials.extra.clone(),
        }
    }
}

impl ApiMqtt {
    pub fn new(broker: &MqttBroker, enabled: bool) -> Self {
        Self {
            enabled,
            broker_addr: broker.broker_addr.clone(),
            broker_port: broker.broker_port,
            username: broker.username.clone(),
            password: broker.password.clone(),
            topic: broker.topic.clone(),
            extra: broker.extra.clone(),
        }
    }
}

impl From<&SettingsRecord> for SaveSettingsRequest {
    fn from(settings: &SettingsRecord) -> Self {
        let uplink = settings.uplink();
        Self {
            ap_ssid: settings.ap_ssid.clone(),
            wifi: ApiWifi::from(&settings.wifi),
            fermenter_ap: ApiFermenterAp::new(
                &settings.fermenter_ap,
                uplink.fermenter_ap_enabled(),
            ),
            mqtt: ApiMqtt::new(&settings.mqtt, uplink.mqtt_enabled()),
            deep_sleep_interval_ms: settings.deep_sleep_interval_ms,
        }
    }
}

impl From<&SettingsRecord> for MqttTestRequest {
    fn from(settings: &SettingsRecord) -> Self {
        Self {
            mqtt: ApiMqtt::new(&settings.mqtt, settings.uplink().mqtt_enabled()),
        }
    }
}

/// The page posts the port straight from a text input, so the device may
/// hand it back as a string. An empty string maps to `0`.
fn port_from_number_or_text<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) if text.trim().is_empty() => Ok(0),
        Port::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid broker port {text:?}: {e}"))),
    }
}
