//! Style-change notifications.
//!
//! Every successful configuration mutation queues a [`ColorEvent`] on the
//! engine. The display layer drains the queue and redraws the affected
//! regions. The queue replaces the original's global notification bus with
//! state owned by the engine.

use crate::category::CategoryId;

/// A change to the configured styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorEvent {
    /// A category's style was set or a rule was installed.
    Set(CategoryId),
    /// A category's style or rules were cleared.
    Reset(CategoryId),
    /// The whole configuration was cleared (`uncolor *`).
    ClearedAll,
}

/// Pending notifications, drained by the display layer.
#[derive(Debug, Default)]
pub struct Notifications {
    pending: Vec<ColorEvent>,
}

impl Notifications {
    /// Queue one event.
    pub fn push(&mut self, event: ColorEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<ColorEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any events are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_queue() {
        let mut notifications = Notifications::default();
        notifications.push(ColorEvent::Set(CategoryId::Header));
        notifications.push(ColorEvent::ClearedAll);

        let events = notifications.drain();
        assert_eq!(
            events,
            vec![ColorEvent::Set(CategoryId::Header), ColorEvent::ClearedAll]
        );
        assert!(notifications.is_empty());
    }
}
