use crux_core::{render::render, Command};
use log::debug;

use crate::events::{DeviceEvent, Event};
use crate::model::Model;
use crate::types::icon;
use crate::Effect;
use crate::{device_get, handle_response};

/// Where the device serves FTP once it has been enabled
pub const FTP_ADDRESS: &str = "ftp://192.168.4.1:21";

/// Handle device actions (FTP, reboot)
pub fn handle(event: DeviceEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        DeviceEvent::EnableFtp => {
            device_get!(Device, DeviceEvent, model, "/ftp", EnableFtpResponse, "Enable FTP")
        }

        DeviceEvent::EnableFtpResponse(result) => handle_response!(model, result, {
            success: (icon::SUCCESS, format!("FTP service is active at {FTP_ADDRESS}")),
            failure: (icon::ERROR, "Error: could not enable the FTP service"),
        }),

        DeviceEvent::RequestReboot => {
            if !model.reboot_allowed {
                debug!("reboot is locked until settings are saved or MQTT is tested");
                return Command::done();
            }
            model.reboot_confirmation_pending = true;
            render()
        }

        DeviceEvent::CancelReboot => {
            model.reboot_confirmation_pending = false;
            render()
        }

        DeviceEvent::ConfirmReboot => {
            if !model.reboot_confirmation_pending {
                debug!("reboot confirmed without a pending confirmation, ignoring");
                return Command::done();
            }
            model.reboot_confirmation_pending = false;
            device_get!(Device, DeviceEvent, model, "/reboot", RebootResponse, "Reboot")
        }

        DeviceEvent::RebootResponse(result) => handle_response!(model, result, {
            success: (icon::REBOOT, "Restarting the device, please wait..."),
            failure: (
                icon::ERROR,
                "Error: could not reach the controller board, the device was not restarted"
            ),
        }),
    }
}
