//! Button surface
//!
//! Two stateless buttons per instance. A press goes through the aggregate
//! with no explicit date, so it lands on today.

use std::sync::Arc;

use mattress_core::Context;
use mattress_registry::MattressInstance;
use tracing::debug;

use crate::description::{button_description, EntityDescription};

/// The two button entities of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    /// Flip to the other side
    Flip,
    /// Rotate head-to-foot
    Rotate,
}

impl ButtonKind {
    /// Display label for this button
    pub fn label(self) -> &'static str {
        match self {
            ButtonKind::Flip => "Flip",
            ButtonKind::Rotate => "Rotate",
        }
    }
}

/// One of the two buttons of an instance
pub struct MattressButton {
    instance: Arc<MattressInstance>,
    kind: ButtonKind,
    description: EntityDescription,
}

impl MattressButton {
    /// Create the button of the given kind
    pub fn new(instance: Arc<MattressInstance>, kind: ButtonKind) -> Self {
        let description = button_description(instance.config(), instance.entry_id(), kind);
        Self {
            instance,
            kind,
            description,
        }
    }

    /// Which button this is
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    /// Naming and device metadata
    pub fn description(&self) -> &EntityDescription {
        &self.description
    }

    /// Handle a press: flip or rotate on today's date
    pub async fn press(&self, context: Context) {
        debug!(
            entry_id = %self.instance.entry_id(),
            button = self.kind.label(),
            "button pressed"
        );
        match self.kind {
            ButtonKind::Flip => self.instance.flip(None, context).await,
            ButtonKind::Rotate => self.instance.rotate(None, context).await,
        }
    }
}

/// Both buttons of an instance
pub fn buttons_for(instance: &Arc<MattressInstance>) -> Vec<MattressButton> {
    [ButtonKind::Flip, ButtonKind::Rotate]
        .iter()
        .map(|kind| MattressButton::new(instance.clone(), *kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mattress_core::{FixedClock, MattressConfig, Rotation, StateField};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn instance() -> Arc<MattressInstance> {
        Arc::new(MattressInstance::new(
            "entry1",
            MattressConfig::with_default_sides("Master Bed").unwrap(),
            Arc::new(FixedClock::at(date("2024-01-11"))),
        ))
    }

    #[tokio::test]
    async fn test_flip_button_press() {
        let instance = instance();
        let button = MattressButton::new(instance.clone(), ButtonKind::Flip);

        button.press(Context::new()).await;

        let state = instance.state().await;
        assert_eq!(state.current_side(), "Side B");
        assert_eq!(state.last_flipped(), Some(date("2024-01-11")));
        // Rotation pair untouched
        assert_eq!(state.current_rotation(), Rotation::TopAtHead);
        assert_eq!(state.last_rotated(), None);
    }

    #[tokio::test]
    async fn test_rotate_button_press() {
        let instance = instance();
        let button = MattressButton::new(instance.clone(), ButtonKind::Rotate);

        button.press(Context::new()).await;

        let state = instance.state().await;
        assert_eq!(state.current_rotation(), Rotation::TopAtFoot);
        assert_eq!(state.last_rotated(), Some(date("2024-01-11")));
        assert_eq!(state.current_side(), "Side A");
    }

    #[tokio::test]
    async fn test_press_notifies_the_paired_sensors() {
        let instance = instance();
        let mut updates = instance.subscribe();
        let button = MattressButton::new(instance.clone(), ButtonKind::Rotate);

        button.press(Context::new()).await;

        assert_eq!(updates.try_recv().unwrap().field, StateField::CurrentRotation);
        assert_eq!(updates.try_recv().unwrap().field, StateField::LastRotated);
        assert!(updates.try_recv().is_err());
    }

    #[test]
    fn test_buttons_for() {
        let instance = instance();
        let buttons = buttons_for(&instance);
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].kind(), ButtonKind::Flip);
        assert_eq!(buttons[1].kind(), ButtonKind::Rotate);
    }
}
