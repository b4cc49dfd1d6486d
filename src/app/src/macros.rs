/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.settings.ap_ssid, ssid)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.panel_open, true;
///     model.is_loading, false
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    build_url, check_response_status, extract_error_message, is_response_success,
    map_http_error, parse_json_response, process_json_response, process_status_response,
    BASE_URL,
};

/// Macro for GET requests against the device API with standard error handling.
/// Requires domain parameters for event wrapping.
///
/// NOTE: URLs are prefixed with [`BASE_URL`](crate::http_helpers::BASE_URL);
/// shells strip it before sending.
///
/// # Patterns
///
/// Pattern 1: GET expecting status only
/// ```ignore
/// device_get!(Device, DeviceEvent, model, "/ftp", EnableFtpResponse, "Enable FTP")
/// ```
///
/// Pattern 2: GET expecting JSON response
/// ```ignore
/// device_get!(Wifi, WifiEvent, model, "/wifi", RefreshResponse, "Scan WiFi",
///     expect_json: WifiList
/// )
/// ```
///
/// Pattern 3: GET expecting JSON response, converted before it is sent back
/// ```ignore
/// device_get!(Settings, SettingsEvent, model, "/settings", FetchResponse, "Fetch settings",
///     expect_json: ApiSettings,
///     map: SettingsRecord::from
/// )
/// ```
#[macro_export]
macro_rules! device_get {
    // Pattern 1: GET expecting status only
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::get($crate::build_url($endpoint))
                .build()
                .then_send(|result| {
                    let event_result = $crate::process_status_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};

    // Pattern 2: GET expecting JSON response
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, expect_json: $response_type:ty) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::get($crate::build_url($endpoint))
                .build()
                .then_send(|result| {
                    let event_result: Result<$response_type, String> =
                        $crate::process_json_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};

    // Pattern 3: GET expecting JSON response with conversion
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, expect_json: $response_type:ty, map: $mapper:expr) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::get($crate::build_url($endpoint))
                .build()
                .then_send(|result| {
                    let event_result = $crate::process_json_response::<$response_type>($action, result)
                        .map($mapper);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};
}

/// Macro for POST requests with a JSON body against the device API.
///
/// The device answers with an empty 2xx on success, so only the status is checked.
///
/// # Example
/// ```ignore
/// device_post!(Mqtt, MqttEvent, model, "/mqtttest", TestResponse, "MQTT test",
///     body_json: &request
/// )
/// ```
#[macro_export]
macro_rules! device_post {
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr) => {{
        $model.start_loading();
        match $crate::HttpCmd::post($crate::build_url($endpoint))
            .header("Content-Type", "application/json")
            .body_json($body)
        {
            Ok(builder) => crux_core::Command::all([
                crux_core::render::render(),
                builder.build().then_send(|result| {
                    let event_result = $crate::process_status_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
            ]),
            Err(e) => {
                $model.notify_failure(
                    $crate::types::icon::ERROR,
                    format!("Error: could not create {} request", $action),
                    &e.to_string(),
                );
                crux_core::render::render()
            }
        }
    }};
}

/// Macro for handling response events: exactly one notification per outcome.
///
/// # Patterns
///
/// Pattern 1: Notifications only (for `Result<(), String>`)
/// ```ignore
/// handle_response!(model, result, {
///     success: (icon::SUCCESS, "FTP service is active"),
///     failure: (icon::ERROR, "Error: could not enable FTP service"),
/// })
/// ```
///
/// Pattern 2: Custom success handling plus notifications
/// ```ignore
/// handle_response!(model, result, {
///     on_success: |model, list| {
///         model.settings.wifi_list = list.wifi_list;
///     },
///     success: (icon::WIFI_CONNECTED, "WiFi list refreshed"),
///     failure: (icon::WIFI_OFF, "Error: could not refresh the WiFi list"),
/// })
/// ```
#[macro_export]
macro_rules! handle_response {
    // Pattern 1: Notifications only (for Result<(), String>)
    ($model:expr, $result:expr, {
        success: ($success_icon:expr, $success_msg:expr),
        failure: ($failure_icon:expr, $failure_msg:expr) $(,)?
    }) => {{
        match $result {
            Ok(()) => $model.notify($success_icon, $success_msg),
            Err(e) => $model.notify_failure($failure_icon, $failure_msg, &e),
        }
        crux_core::render::render()
    }};

    // Pattern 2: Custom success handler plus notifications
    ($model:expr, $result:expr, {
        on_success: |$success_model:ident, $value:tt| $success_body:block,
        success: ($success_icon:expr, $success_msg:expr),
        failure: ($failure_icon:expr, $failure_msg:expr) $(,)?
    }) => {{
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_model = $model;
                $success_body
                $model.notify($success_icon, $success_msg);
            }
            Err(e) => $model.notify_failure($failure_icon, $failure_msg, &e),
        }
        crux_core::render::render()
    }};
}
