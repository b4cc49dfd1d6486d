use crux_core::Command;
use log::debug;

use crate::events::{Event, MqttEvent};
use crate::model::Model;
use crate::types::{icon, MqttTestRequest};
use crate::Effect;
use crate::{device_post, handle_response, update_field};

/// Handle MQTT broker edits and the test publish
pub fn handle(event: MqttEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        MqttEvent::SetBrokerAddr(addr) => update_field!(model.settings.mqtt.broker_addr, addr),
        MqttEvent::SetBrokerPort(port) => update_field!(model.settings.mqtt.broker_port, port),
        MqttEvent::SetUsername(username) => update_field!(model.settings.mqtt.username, username),
        MqttEvent::SetPassword(password) => update_field!(model.settings.mqtt.password, password),
        MqttEvent::SetTopic(topic) => update_field!(model.settings.mqtt.topic, topic),

        MqttEvent::Test => {
            if !model.settings.can_test_mqtt() {
                debug!("MQTT test needs broker address, port, username and topic");
                return Command::done();
            }
            let request = MqttTestRequest::from(&model.settings);
            device_post!(Mqtt, MqttEvent, model, "/mqtttest", TestResponse, "MQTT test",
                body_json: &request
            )
        }

        MqttEvent::TestResponse(result) => handle_response!(model, result, {
            on_success: |model, _| {
                model.reboot_allowed = true;
            },
            success: (icon::SUCCESS, "Test message sent to the MQTT broker"),
            failure: (icon::ERROR, "Error: could not send the test message to the MQTT broker"),
        }),
    }
}
