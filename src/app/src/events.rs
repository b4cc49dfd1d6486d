use serde::{Deserialize, Serialize};

use crate::types::*;

/// Which network a WiFi connect request targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WifiTarget {
    /// The external network the device joins to reach the internet
    Primary,
    /// The fermentation chamber controller's own access point
    FermenterAp,
}

/// Settings panel lifecycle and record edits
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Open the panel (fetching settings) or close it (discarding edits)
    TogglePanel,
    SetApSsid(String),
    SetUplink(UplinkMode),
    SetFermenterApEnabled(bool),
    SetMqttEnabled(bool),
    SetIntervalMinutes(u64),
    Save,

    #[serde(skip)]
    FetchResponse(Result<SettingsRecord, String>),
    #[serde(skip)]
    SaveResponse(Result<(), String>),
}

/// Network scan and join
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WifiEvent {
    SetSsid(String),
    SetPassword(String),
    SetFermenterSsid(String),
    SetFermenterPassword(String),
    Refresh,
    Connect(WifiTarget),

    #[serde(skip)]
    RefreshResponse(Result<WifiList, String>),
    #[serde(skip)]
    ConnectResponse {
        target: WifiTarget,
        ssid: String,
        result: Result<(), String>,
    },
}

/// MQTT broker edits and test publish
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum MqttEvent {
    SetBrokerAddr(String),
    SetBrokerPort(u16),
    SetUsername(String),
    SetPassword(String),
    SetTopic(String),
    Test,

    #[serde(skip)]
    TestResponse(Result<(), String>),
}

/// Device actions
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    EnableFtp,
    /// Show the reboot confirmation
    RequestReboot,
    ConfirmReboot,
    CancelReboot,

    #[serde(skip)]
    EnableFtpResponse(Result<(), String>),
    #[serde(skip)]
    RebootResponse(Result<(), String>),
}

/// Pure UI state
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TogglePasswordVisibility,
    DismissNotification,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize,
    Settings(SettingsEvent),
    Wifi(WifiEvent),
    Mqtt(MqttEvent),
    Device(DeviceEvent),
    Ui(UiEvent),
}
