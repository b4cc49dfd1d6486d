use crate::transport::DeviceTransport;
use anyhow::{Result, anyhow};
use crux_core::Core;
use hydrometer_ui_core::{App, Effect, Event, Notification, Severity, ViewModel};
use log::debug;
use std::collections::VecDeque;

/// Native shell around the settings core.
///
/// Effects are processed in order until the core is idle, so a dispatched
/// event has fully settled when [`Shell::dispatch`] returns.
pub struct Shell<T> {
    core: Core<App>,
    transport: T,
    last_notification_id: Option<u32>,
}

impl<T: DeviceTransport> Shell<T> {
    pub fn new(transport: T) -> Self {
        Self {
            core: Core::new(),
            transport,
            last_notification_id: None,
        }
    }

    /// Process `event` and every effect that follows from it.
    ///
    /// Returns the notifications raised along the way, oldest first.
    pub async fn dispatch(&mut self, event: Event) -> Result<Vec<Notification>> {
        let mut pending: VecDeque<Effect> = self.core.process_event(event).into();
        let mut raised = Vec::new();

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Render(_) => {
                    if let Some(notification) = self.take_new_notification() {
                        report(&notification);
                        raised.push(notification);
                    }
                }
                Effect::Http(mut request) => {
                    debug!(
                        "executing {} {}",
                        request.operation.method, request.operation.url
                    );
                    let result = self.transport.execute(&request.operation).await;
                    let effects = self
                        .core
                        .resolve(&mut request, result)
                        .map_err(|e| anyhow!("failed to resolve HTTP effect: {e:?}"))?;
                    pending.extend(effects);
                }
            }
        }

        Ok(raised)
    }

    pub fn view(&self) -> ViewModel {
        self.core.view()
    }

    fn take_new_notification(&mut self) -> Option<Notification> {
        let notification = self.core.view().model.notification?;
        if self.last_notification_id == Some(notification.id) {
            return None;
        }
        self.last_notification_id = Some(notification.id);
        Some(notification)
    }
}

fn report(notification: &Notification) {
    match notification.severity {
        Severity::Info => println!("{}", notification.message),
        Severity::Negative => eprintln!("{}", notification.message),
    }
}
