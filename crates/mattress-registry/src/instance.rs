//! A configured mattress instance
//!
//! Wraps the MattressState aggregate with the pieces the trigger surfaces
//! need: a lock serializing mutations, a clock for resolving "today", and
//! a broadcast channel announcing which exposed entity values changed.

use std::sync::Arc;

use chrono::NaiveDate;
use mattress_core::{
    Clock, Context, InvalidRotation, InvalidSide, MattressConfig, MattressState, StateField,
    StateSnapshot,
};
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

/// Capacity of the per-instance update broadcast channel
pub const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Notification that one exposed entity value changed
///
/// Carries the context of the triggering call so the host surface can
/// attribute the change.
#[derive(Debug, Clone)]
pub struct StateUpdate {
    /// Entry the change belongs to
    pub entry_id: String,
    /// Which exposed value changed
    pub field: StateField,
    /// Context of the trigger that caused the change
    pub context: Context,
}

/// One tracked mattress: immutable configuration plus guarded state
pub struct MattressInstance {
    entry_id: String,
    config: MattressConfig,
    state: Mutex<MattressState>,
    updates: broadcast::Sender<StateUpdate>,
    clock: Arc<dyn Clock>,
}

impl MattressInstance {
    /// Create an instance in its initial state
    pub fn new(entry_id: impl Into<String>, config: MattressConfig, clock: Arc<dyn Clock>) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            entry_id: entry_id.into(),
            config: config.clone(),
            state: Mutex::new(MattressState::new(config)),
            updates,
            clock,
        }
    }

    /// The configuration entry id this instance belongs to
    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }

    /// The instance configuration
    pub fn config(&self) -> &MattressConfig {
        &self.config
    }

    /// Subscribe to update notifications for this instance's entities
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.updates.subscribe()
    }

    /// A copy of the current state
    pub async fn state(&self) -> MattressState {
        self.state.lock().await.clone()
    }

    /// Flip to the other side; `None` flips on today's date
    pub async fn flip(&self, on: Option<NaiveDate>, context: Context) {
        let on = self.resolve_date(on);
        {
            let mut state = self.state.lock().await;
            state.flip(on);
            debug!(entry_id = %self.entry_id, side = %state.current_side(), %on, "flipped mattress");
        }
        self.notify(&[StateField::CurrentSide, StateField::LastFlipped], &context);
    }

    /// Rotate to the other orientation; `None` rotates on today's date
    pub async fn rotate(&self, on: Option<NaiveDate>, context: Context) {
        let on = self.resolve_date(on);
        {
            let mut state = self.state.lock().await;
            state.rotate(on);
            debug!(
                entry_id = %self.entry_id,
                rotation = %state.current_rotation(),
                %on,
                "rotated mattress"
            );
        }
        self.notify(
            &[StateField::CurrentRotation, StateField::LastRotated],
            &context,
        );
    }

    /// Set the side facing up; rejects values outside the configured pair
    pub async fn set_side(
        &self,
        side: &str,
        on: Option<NaiveDate>,
        context: Context,
    ) -> Result<(), InvalidSide> {
        let on = self.resolve_date(on);
        self.state.lock().await.set_side(side, on)?;
        debug!(entry_id = %self.entry_id, side, %on, "set mattress side");
        self.notify(&[StateField::CurrentSide, StateField::LastFlipped], &context);
        Ok(())
    }

    /// Set the rotation orientation; rejects unknown state strings
    pub async fn set_rotation(
        &self,
        rotation: &str,
        on: Option<NaiveDate>,
        context: Context,
    ) -> Result<(), InvalidRotation> {
        let on = self.resolve_date(on);
        self.state.lock().await.set_rotation(rotation, on)?;
        debug!(entry_id = %self.entry_id, rotation, %on, "set mattress rotation");
        self.notify(
            &[StateField::CurrentRotation, StateField::LastRotated],
            &context,
        );
        Ok(())
    }

    /// Adopt persisted values after a restart
    ///
    /// Notifies all four entities; per-field parse failures are handled
    /// inside the aggregate and never surface here.
    pub async fn restore(&self, snapshot: &StateSnapshot, context: Context) {
        self.state.lock().await.restore(snapshot);
        debug!(entry_id = %self.entry_id, "restored mattress state");
        self.notify(&StateField::ALL, &context);
    }

    fn resolve_date(&self, on: Option<NaiveDate>) -> NaiveDate {
        on.unwrap_or_else(|| self.clock.today())
    }

    fn notify(&self, fields: &[StateField], context: &Context) {
        for field in fields {
            // Send errors just mean no active receivers
            let _ = self.updates.send(StateUpdate {
                entry_id: self.entry_id.clone(),
                field: *field,
                context: context.clone(),
            });
        }
    }
}

impl std::fmt::Debug for MattressInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MattressInstance")
            .field("entry_id", &self.entry_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mattress_core::{FixedClock, Rotation};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn instance() -> MattressInstance {
        MattressInstance::new(
            "entry1",
            MattressConfig::with_default_sides("Bed").unwrap(),
            Arc::new(FixedClock::at(date("2024-01-11"))),
        )
    }

    #[tokio::test]
    async fn test_flip_with_explicit_date() {
        let instance = instance();
        instance.flip(Some(date("2024-01-10")), Context::new()).await;

        let state = instance.state().await;
        assert_eq!(state.current_side(), "Side B");
        assert_eq!(state.last_flipped(), Some(date("2024-01-10")));
    }

    #[tokio::test]
    async fn test_flip_defaults_to_today() {
        let instance = instance();
        instance.flip(None, Context::new()).await;

        assert_eq!(instance.state().await.last_flipped(), Some(date("2024-01-11")));
    }

    #[tokio::test]
    async fn test_rotate_defaults_to_today() {
        let instance = instance();
        instance.rotate(None, Context::new()).await;

        let state = instance.state().await;
        assert_eq!(state.current_rotation(), Rotation::TopAtFoot);
        assert_eq!(state.last_rotated(), Some(date("2024-01-11")));
    }

    #[tokio::test]
    async fn test_flip_notifies_side_and_flip_date() {
        let instance = instance();
        let mut updates = instance.subscribe();

        let context = Context::with_user("user1");
        instance.flip(None, context.clone()).await;

        let first = updates.try_recv().unwrap();
        assert_eq!(first.field, StateField::CurrentSide);
        assert_eq!(first.entry_id, "entry1");
        assert_eq!(first.context, context);

        let second = updates.try_recv().unwrap();
        assert_eq!(second.field, StateField::LastFlipped);

        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_rotate_notifies_rotation_pair_only() {
        let instance = instance();
        let mut updates = instance.subscribe();

        instance.rotate(None, Context::new()).await;

        assert_eq!(updates.try_recv().unwrap().field, StateField::CurrentRotation);
        assert_eq!(updates.try_recv().unwrap().field, StateField::LastRotated);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_set_side_invalid_notifies_nothing() {
        let instance = instance();
        let mut updates = instance.subscribe();

        let err = instance
            .set_side("Side C", None, Context::new())
            .await
            .unwrap_err();
        assert_eq!(err.value, "Side C");
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_mutation_without_subscribers_succeeds() {
        let instance = instance();
        instance.flip(None, Context::new()).await;
        assert_eq!(instance.state().await.current_side(), "Side B");
    }

    #[tokio::test]
    async fn test_restore_notifies_all_fields() {
        let instance = instance();
        let mut updates = instance.subscribe();

        let snapshot = StateSnapshot::new().with(StateField::CurrentSide, "Side B");
        instance.restore(&snapshot, Context::new()).await;

        let mut fields = Vec::new();
        while let Ok(update) = updates.try_recv() {
            fields.push(update.field);
        }
        assert_eq!(fields, StateField::ALL.to_vec());
    }
}
