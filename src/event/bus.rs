use std::cell::RefCell;

use crate::event::{EditorEvent, EventHandler};

/// Delivers editor events to registered handlers, synchronously and in subscription order.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
    /// Handlers subscribed while an emit was running
    pending: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events.
    ///
    /// A handler subscribed from inside another handler starts receiving with the next emit.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        match self.handlers.try_borrow_mut() {
            Ok(mut handlers) => handlers.push(handler),
            Err(_) => self.pending.borrow_mut().push(handler),
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.borrow().len() + self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Emit an event to all registered handlers.
    ///
    /// Handlers run before this returns; a handler must not emit on the same bus.
    pub fn emit(&self, event: &EditorEvent) {
        let mut handlers = self.handlers.borrow_mut();
        for handler in handlers.iter_mut() {
            handler.handle_event(event);
        }
        handlers.append(&mut self.pending.borrow_mut());
    }
}
