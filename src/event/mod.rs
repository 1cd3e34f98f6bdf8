mod bus;
mod events;

pub use bus::{EventBus, SubscriptionId};
pub use events::DrawEvent;

/// Receives a [`DrawEvent`] after every state change of a
/// [`crate::DrawController`].
pub trait EventHandler {
    fn handle_event(&mut self, event: &DrawEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&DrawEvent),
{
    fn handle_event(&mut self, event: &DrawEvent) {
        self(event)
    }
}
