//! Domain-based type organization
//!
//! - settings: the settings record and its validation rules
//! - device_api: wire format of the device's HTTP API
//! - notification: transient operator notifications

pub mod device_api;
pub mod notification;
pub mod settings;

pub use device_api::*;
pub use notification::*;
pub use settings::*;
