use hydrometer_settings::{
    commands::{self, RebootOutcome, SettingsEdits, UplinkArg},
    config::DeviceConfig,
    shell::Shell,
    transport::ReqwestTransport,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
struct Recorded {
    method: String,
    path: String,
    body: String,
}

/// (method, path, status, response body)
type Route = (&'static str, &'static str, u16, &'static str);

const STORED_SETTINGS: &str = r#"{
    "apSsid": "Hydrometer",
    "wifi": {"ssid": "home", "pass": "secret"},
    "fermenterAp": {"enabled": true, "ssid": "Fermenter", "pass": "brew"},
    "mqtt": {"enabled": false, "brokerAddr": "", "brokerPort": "", "username": "", "password": "", "topic": ""},
    "deepSleepIntervalMs": 1200000,
    "wifiList": ["home", "Fermenter"]
}"#;

// Minimal HTTP/1.1 device stand-in: one request per connection
async fn start_mock_device(routes: Vec<Route>) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock device");
    let addr = listener.local_addr().expect("failed to get local address");
    let recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            let log = log.clone();

            tokio::spawn(async move {
                let mut reader = BufReader::new(&mut stream);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).await.is_err() {
                    return;
                }
                let mut parts = request_line.split_whitespace();
                let method = parts.next().unwrap_or_default().to_string();
                let path = parts.next().unwrap_or_default().to_string();

                // Read HTTP headers
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).await.is_err() {
                        return;
                    }
                    if line.trim().is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap_or(0);
                        }
                    }
                }

                let mut body = vec![0; content_length];
                if reader.read_exact(&mut body).await.is_err() {
                    return;
                }

                let (status, response_body) = routes
                    .iter()
                    .find(|(m, p, _, _)| *m == method && *p == path)
                    .map(|(_, _, status, body)| (*status, *body))
                    .unwrap_or((404, ""));

                log.lock().unwrap().push(Recorded {
                    method,
                    path,
                    body: String::from_utf8_lossy(&body).to_string(),
                });

                let http_response = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response_body.len(),
                    response_body
                );
                let _ = stream.write_all(http_response.as_bytes()).await;
            });
        }
    });

    (format!("http://{addr}"), recorded)
}

fn shell_for(base_url: String) -> Shell<ReqwestTransport> {
    let config = DeviceConfig {
        base_url,
        timeout: Duration::from_secs(5),
    };
    Shell::new(ReqwestTransport::new(&config).expect("failed to create transport"))
}

fn requests(recorded: &Arc<Mutex<Vec<Recorded>>>) -> Vec<String> {
    recorded
        .lock()
        .unwrap()
        .iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect()
}

#[tokio::test]
async fn show_loads_settings_from_device() {
    let (url, recorded) = start_mock_device(vec![("GET", "/settings", 200, STORED_SETTINGS)]).await;
    let mut shell = shell_for(url);

    let view = commands::load(&mut shell).await.expect("failed to load");

    assert_eq!(view.model.settings.wifi.ssid, "home");
    assert_eq!(view.model.settings.fermenter_ap.ssid, "Fermenter");
    assert_eq!(view.model.settings.mqtt.broker_port, 0);
    assert_eq!(view.interval_minutes, 20);
    assert_eq!(requests(&recorded), vec!["GET /settings"]);
}

#[tokio::test]
async fn set_saves_edits_and_reboots_after_confirmation() {
    let (url, recorded) = start_mock_device(vec![
        ("GET", "/settings", 200, STORED_SETTINGS),
        ("POST", "/settings", 200, ""),
        ("GET", "/reboot", 200, ""),
    ])
    .await;
    let mut shell = shell_for(url);

    let edits = SettingsEdits {
        uplink: Some(UplinkArg::Mqtt),
        broker_addr: Some("10.0.0.5".to_string()),
        topic: Some("hydrometer".to_string()),
        interval_minutes: Some(30),
        ..Default::default()
    };
    let view = commands::save(&mut shell, edits).await.expect("failed to save");
    assert!(view.can_reboot);

    let outcome = commands::reboot(&mut shell, || Ok(true))
        .await
        .expect("failed to reboot");
    assert_eq!(outcome, RebootOutcome::Restarting);

    assert_eq!(
        requests(&recorded),
        vec!["GET /settings", "POST /settings", "GET /reboot"]
    );

    let saved: serde_json::Value =
        serde_json::from_str(&recorded.lock().unwrap()[1].body).expect("JSON body");
    assert_eq!(saved["deepSleepIntervalMs"], 1_800_000);
    assert_eq!(saved["mqtt"]["enabled"], true);
    assert_eq!(saved["mqtt"]["brokerAddr"], "10.0.0.5");
    assert_eq!(saved["fermenterAp"]["enabled"], false);
    assert_eq!(saved["fermenterAp"]["ssid"], "Fermenter");
}

#[tokio::test]
async fn declined_reboot_is_never_sent() {
    let (url, recorded) = start_mock_device(vec![
        ("GET", "/settings", 200, STORED_SETTINGS),
        ("POST", "/settings", 200, ""),
        ("GET", "/reboot", 200, ""),
    ])
    .await;
    let mut shell = shell_for(url);

    commands::save(&mut shell, SettingsEdits::default())
        .await
        .expect("failed to save");
    let outcome = commands::reboot(&mut shell, || Ok(false))
        .await
        .expect("failed to handle reboot");

    assert_eq!(outcome, RebootOutcome::Cancelled);
    assert!(!requests(&recorded).contains(&"GET /reboot".to_string()));
}

#[tokio::test]
async fn failed_mqtt_test_keeps_reboot_locked() {
    let (url, recorded) = start_mock_device(vec![
        ("GET", "/settings", 200, STORED_SETTINGS),
        ("POST", "/mqtttest", 500, ""),
    ])
    .await;
    let mut shell = shell_for(url);

    let edits = SettingsEdits {
        broker_addr: Some("10.0.0.5".to_string()),
        broker_port: Some(1883),
        mqtt_username: Some("brewer".to_string()),
        topic: Some("hydrometer".to_string()),
        ..Default::default()
    };
    assert!(commands::mqtt_test(&mut shell, edits).await.is_err());
    assert!(commands::reboot(&mut shell, || Ok(true)).await.is_err());

    assert_eq!(requests(&recorded), vec!["GET /settings", "POST /mqtttest"]);
    let sent: serde_json::Value =
        serde_json::from_str(&recorded.lock().unwrap()[1].body).expect("JSON body");
    assert_eq!(sent["mqtt"]["username"], "brewer");
}

#[tokio::test]
async fn scan_lists_networks() {
    let (url, _) = start_mock_device(vec![(
        "GET",
        "/wifi",
        200,
        r#"{"wifiList":["Fermenter","28#301"]}"#,
    )])
    .await;
    let mut shell = shell_for(url);

    let networks = commands::scan(&mut shell).await.expect("failed to scan");

    assert_eq!(networks, vec!["Fermenter", "28#301"]);
}

#[tokio::test]
async fn connect_posts_credentials() {
    let (url, recorded) = start_mock_device(vec![("POST", "/wifi", 200, "")]).await;
    let mut shell = shell_for(url);

    commands::connect_wifi(&mut shell, "28#301".to_string(), "secret".to_string())
        .await
        .expect("failed to connect");

    let body: serde_json::Value =
        serde_json::from_str(&recorded.lock().unwrap()[0].body).expect("JSON body");
    assert_eq!(body, serde_json::json!({"ssid": "28#301", "pass": "secret"}));
}

#[tokio::test]
async fn unreachable_device_fails_load() {
    // bind and drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("failed to get local address");
    drop(listener);
    let mut shell = shell_for(format!("http://{addr}"));

    let err = commands::load(&mut shell).await.expect_err("load should fail");

    assert!(format!("{err:#}").contains("could not load settings"));
    assert!(!shell.view().model.is_loading);
}
