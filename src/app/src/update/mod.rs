mod device;
mod mqtt;
mod settings;
mod ui;
mod wifi;

use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        // The shell draws the closed panel with default settings
        Event::Initialize => render(),

        Event::Settings(event) => settings::handle(event, model),
        Event::Wifi(event) => wifi::handle(event, model),
        Event::Mqtt(event) => mqtt::handle(event, model),
        Event::Device(event) => device::handle(event, model),
        Event::Ui(event) => ui::handle(event, model),
    }
}
