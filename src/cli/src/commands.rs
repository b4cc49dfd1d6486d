//! Command flows of the CLI, expressed as sequences of core events.

use crate::{shell::Shell, transport::DeviceTransport};
use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use hydrometer_ui_core::{
    DeviceEvent, Event, MqttEvent, SettingsEvent, UplinkMode, ViewModel, WifiEvent, WifiTarget,
};
use log::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UplinkArg {
    /// No uplink, measurements stay on the device
    None,
    /// Send to the fermenter controller's access point
    Fermenter,
    /// Publish to an MQTT broker
    Mqtt,
}

impl From<UplinkArg> for UplinkMode {
    fn from(arg: UplinkArg) -> Self {
        match arg {
            UplinkArg::None => UplinkMode::None,
            UplinkArg::Fermenter => UplinkMode::FermenterAp,
            UplinkArg::Mqtt => UplinkMode::Mqtt,
        }
    }
}

/// Changes applied on top of the settings loaded from the device
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsEdits {
    /// Name of the hydrometer's own access point
    #[arg(long)]
    pub ap_ssid: Option<String>,
    #[arg(long)]
    pub wifi_ssid: Option<String>,
    #[arg(long)]
    pub wifi_pass: Option<String>,
    #[arg(long)]
    pub fermenter_ssid: Option<String>,
    #[arg(long)]
    pub fermenter_pass: Option<String>,
    /// Where measurements are sent
    #[arg(long, value_enum)]
    pub uplink: Option<UplinkArg>,
    #[arg(long)]
    pub broker_addr: Option<String>,
    #[arg(long)]
    pub broker_port: Option<u16>,
    #[arg(long)]
    pub mqtt_username: Option<String>,
    #[arg(long)]
    pub mqtt_password: Option<String>,
    #[arg(long)]
    pub topic: Option<String>,
    /// Measurement interval in minutes
    #[arg(long)]
    pub interval_minutes: Option<u64>,
}

impl SettingsEdits {
    /// The editing events for every field that was given
    pub fn into_events(self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(ssid) = self.ap_ssid {
            events.push(Event::Settings(SettingsEvent::SetApSsid(ssid)));
        }
        if let Some(ssid) = self.wifi_ssid {
            events.push(Event::Wifi(WifiEvent::SetSsid(ssid)));
        }
        if let Some(pass) = self.wifi_pass {
            events.push(Event::Wifi(WifiEvent::SetPassword(pass)));
        }
        if let Some(ssid) = self.fermenter_ssid {
            events.push(Event::Wifi(WifiEvent::SetFermenterSsid(ssid)));
        }
        if let Some(pass) = self.fermenter_pass {
            events.push(Event::Wifi(WifiEvent::SetFermenterPassword(pass)));
        }
        if let Some(uplink) = self.uplink {
            events.push(Event::Settings(SettingsEvent::SetUplink(uplink.into())));
        }
        if let Some(addr) = self.broker_addr {
            events.push(Event::Mqtt(MqttEvent::SetBrokerAddr(addr)));
        }
        if let Some(port) = self.broker_port {
            events.push(Event::Mqtt(MqttEvent::SetBrokerPort(port)));
        }
        if let Some(username) = self.mqtt_username {
            events.push(Event::Mqtt(MqttEvent::SetUsername(username)));
        }
        if let Some(password) = self.mqtt_password {
            events.push(Event::Mqtt(MqttEvent::SetPassword(password)));
        }
        if let Some(topic) = self.topic {
            events.push(Event::Mqtt(MqttEvent::SetTopic(topic)));
        }
        if let Some(minutes) = self.interval_minutes {
            events.push(Event::Settings(SettingsEvent::SetIntervalMinutes(minutes)));
        }
        events
    }
}

/// What happened to a reboot request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebootOutcome {
    Restarting,
    Cancelled,
}

/// Dispatch `event` and fail unless it ended in a positive notification.
///
/// An event the core refuses to act on raises no notification at all.
async fn perform<T: DeviceTransport>(shell: &mut Shell<T>, event: Event, what: &str) -> Result<()> {
    let raised = shell.dispatch(event).await?;
    match raised.last() {
        Some(notification) if notification.is_failure() => bail!("{}", notification.message),
        Some(_) => Ok(()),
        None => bail!("cannot {what} with the current settings"),
    }
}

/// Open the settings panel, loading the current settings from the device
pub async fn load<T: DeviceTransport>(shell: &mut Shell<T>) -> Result<ViewModel> {
    if shell.view().model.panel_open {
        debug!("settings already loaded");
    } else {
        perform(shell, Event::Settings(SettingsEvent::TogglePanel), "load settings").await?;
    }
    Ok(shell.view())
}

pub async fn scan<T: DeviceTransport>(shell: &mut Shell<T>) -> Result<Vec<String>> {
    perform(shell, Event::Wifi(WifiEvent::Refresh), "scan for networks").await?;
    Ok(shell.view().model.settings.wifi_list)
}

pub async fn connect_wifi<T: DeviceTransport>(
    shell: &mut Shell<T>,
    ssid: String,
    pass: String,
) -> Result<()> {
    for event in [
        Event::Wifi(WifiEvent::SetSsid(ssid)),
        Event::Wifi(WifiEvent::SetPassword(pass)),
    ] {
        shell.dispatch(event).await?;
    }
    perform(
        shell,
        Event::Wifi(WifiEvent::Connect(WifiTarget::Primary)),
        "connect without an SSID",
    )
    .await
}

/// Connect to the fermenter AP stored on the device
pub async fn connect_fermenter<T: DeviceTransport>(shell: &mut Shell<T>) -> Result<()> {
    load(shell).await?;
    perform(
        shell,
        Event::Wifi(WifiEvent::Connect(WifiTarget::FermenterAp)),
        "connect to the fermenter AP (uplink and SSID required)",
    )
    .await
}

pub async fn enable_ftp<T: DeviceTransport>(shell: &mut Shell<T>) -> Result<()> {
    perform(shell, Event::Device(DeviceEvent::EnableFtp), "enable FTP").await
}

/// Test the MQTT broker configuration stored on the device, with `edits` applied
pub async fn mqtt_test<T: DeviceTransport>(
    shell: &mut Shell<T>,
    edits: SettingsEdits,
) -> Result<()> {
    load(shell).await?;
    for event in edits.into_events() {
        shell.dispatch(event).await?;
    }
    perform(
        shell,
        Event::Mqtt(MqttEvent::Test),
        "test MQTT (broker address, port, username and topic required)",
    )
    .await
}

/// Load, edit and save the settings
pub async fn save<T: DeviceTransport>(
    shell: &mut Shell<T>,
    edits: SettingsEdits,
) -> Result<ViewModel> {
    load(shell).await?;
    for event in edits.into_events() {
        shell.dispatch(event).await?;
    }

    let view = shell.view();
    if let Some(warning) = &view.interval_warning {
        warn!("{warning}");
    }

    perform(
        shell,
        Event::Settings(SettingsEvent::Save),
        "save (the access point SSID must not be empty)",
    )
    .await?;
    Ok(shell.view())
}

/// Ask for a reboot and send it once `confirm` agrees.
///
/// The device only accepts this after a successful save or MQTT test in the
/// same session.
pub async fn reboot<T: DeviceTransport>(
    shell: &mut Shell<T>,
    confirm: impl FnOnce() -> Result<bool>,
) -> Result<RebootOutcome> {
    shell
        .dispatch(Event::Device(DeviceEvent::RequestReboot))
        .await?;
    if !shell.view().model.reboot_confirmation_pending {
        bail!("reboot is only possible after saving the settings or a successful MQTT test");
    }

    if confirm()? {
        perform(shell, Event::Device(DeviceEvent::ConfirmReboot), "reboot").await?;
        Ok(RebootOutcome::Restarting)
    } else {
        shell
            .dispatch(Event::Device(DeviceEvent::CancelReboot))
            .await?;
        Ok(RebootOutcome::Cancelled)
    }
}
