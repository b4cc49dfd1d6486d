use crux_core::Command;

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (password visibility, notifications)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::TogglePasswordVisibility => {
            update_field!(model.password_visible, !model.password_visible)
        }
        UiEvent::DismissNotification => update_field!(model.notification, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::icon;

    #[test]
    fn toggle_password_visibility_flips_flag() {
        let mut model = Model::default();

        let _ = handle(UiEvent::TogglePasswordVisibility, &mut model);
        assert!(model.password_visible);

        let _ = handle(UiEvent::TogglePasswordVisibility, &mut model);
        assert!(!model.password_visible);
    }

    #[test]
    fn dismiss_notification_clears_it() {
        let mut model = Model::default();
        model.notify(icon::SUCCESS, "Settings saved");

        let _ = handle(UiEvent::DismissNotification, &mut model);

        assert_eq!(model.notification, None);
    }
}
