use crux_core::{render::render, Command};
use log::debug;

use crate::events::{Event, WifiEvent, WifiTarget};
use crate::model::Model;
use crate::types::{icon, WifiCredentials, WifiList};
use crate::{build_url, process_status_response, Effect, HttpCmd};
use crate::{device_get, handle_response, update_field};

/// Handle network scan, join and credential edits
pub fn handle(event: WifiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WifiEvent::SetSsid(ssid) => update_field!(model.settings.wifi.ssid, ssid),
        WifiEvent::SetPassword(pass) => update_field!(model.settings.wifi.pass, pass),
        WifiEvent::SetFermenterSsid(ssid) => update_field!(model.settings.fermenter_ap.ssid, ssid),
        WifiEvent::SetFermenterPassword(pass) => {
            update_field!(model.settings.fermenter_ap.pass, pass)
        }

        WifiEvent::Refresh => {
            device_get!(Wifi, WifiEvent, model, "/wifi", RefreshResponse, "Scan WiFi",
                expect_json: WifiList
            )
        }

        WifiEvent::RefreshResponse(result) => handle_response!(model, result, {
            on_success: |model, list| {
                model.settings.wifi_list = list.wifi_list;
            },
            success: (icon::WIFI_CONNECTED, "WiFi network list refreshed"),
            failure: (icon::WIFI_OFF, "Error: could not refresh the WiFi network list"),
        }),

        WifiEvent::Connect(target) => handle_connect(target, model),

        WifiEvent::ConnectResponse {
            target,
            ssid,
            result,
        } => {
            match result {
                Ok(()) => model.notify(icon::WIFI_CONNECTED, connected_message(target, &ssid)),
                Err(e) => model.notify_failure(icon::WIFI_OFF, failed_message(target, &ssid), &e),
            }
            render()
        }
    }
}

/// `POST /wifi` with the credentials of the chosen target
fn handle_connect(target: WifiTarget, model: &mut Model) -> Command<Effect, Event> {
    let settings = &model.settings;
    let credentials: WifiCredentials = match target {
        WifiTarget::Primary if settings.can_connect_wifi() => settings.wifi.clone(),
        WifiTarget::FermenterAp if settings.can_connect_fermenter_ap() => {
            settings.fermenter_ap.clone()
        }
        _ => {
            debug!("connect to {target:?} not possible with current settings");
            return Command::done();
        }
    };
    let ssid = credentials.ssid.clone();

    model.start_loading();
    match HttpCmd::post(build_url("/wifi"))
        .header("Content-Type", "application/json")
        .body_json(&credentials)
    {
        Ok(builder) => Command::all([
            render(),
            builder.build().then_send(move |result| {
                let result = process_status_response("Connect WiFi", result);
                Event::Wifi(WifiEvent::ConnectResponse {
                    target,
                    ssid,
                    result,
                })
            }),
        ]),
        Err(e) => {
            model.notify_failure(icon::WIFI_OFF, failed_message(target, &ssid), &e.to_string());
            render()
        }
    }
}

fn connected_message(target: WifiTarget, ssid: &str) -> String {
    match target {
        WifiTarget::Primary => format!("Connected to WiFi network \u{201c}{ssid}\u{201d}"),
        WifiTarget::FermenterAp => format!("Connected to fermenter AP \u{201c}{ssid}\u{201d}"),
    }
}

fn failed_message(target: WifiTarget, ssid: &str) -> String {
    match target {
        WifiTarget::Primary => {
            format!("Error: could not connect to WiFi network \u{201c}{ssid}\u{201d}")
        }
        WifiTarget::FermenterAp => {
            format!("Error: could not connect to fermenter AP \u{201c}{ssid}\u{201d}")
        }
    }
}
