//! WebAssembly FFI bindings for the settings panel core
//!
//! The page served by the hydrometer loads this module and forwards its
//! form events here; HTTP effects come back to the page, which performs them
//! against its own origin.

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{bridge::Bridge, Core};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Route `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    // a page that embeds the module twice already has a logger
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already initialized");
    }
}

/// Process a bincode-serialized `Event` from the page.
///
/// Returns the bincode-serialized effects, or nothing if the event could not
/// be decoded.
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.update(event_bytes, &mut effects) {
        log::error!("failed to process event: {e:?}");
        effects.clear();
    }
    effects
}

/// Current bincode-serialized `ViewModel`
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    if let Err(e) = CORE.view(&mut view) {
        log::error!("failed to serialize view model: {e:?}");
        view.clear();
    }
    view
}

/// Resolve the effect `id` with the page's bincode-serialized response.
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.resolve(
        crux_core::bridge::EffectId(id),
        response_bytes,
        &mut effects,
    ) {
        log::error!("failed to resolve effect {id}: {e:?}");
        effects.clear();
    }
    effects
}
