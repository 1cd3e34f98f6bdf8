use crate::event::{DrawEvent, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered subscription list. Handlers are called synchronously, in the
/// order they subscribed.
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Box<dyn EventHandler>)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Emit an event to all registered handlers
    pub fn emit(&mut self, event: DrawEvent) {
        for (_, handler) in &mut self.handlers {
            handler.handle_event(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_delivery_follows_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            bus.subscribe(Box::new(move |_: &DrawEvent| log.borrow_mut().push(name)));
        }
        bus.emit(DrawEvent::Cleared);

        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let id = {
            let count = Rc::clone(&count);
            bus.subscribe(Box::new(move |_: &DrawEvent| *count.borrow_mut() += 1))
        };

        bus.emit(DrawEvent::Undone);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(DrawEvent::Redone);

        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }
}
