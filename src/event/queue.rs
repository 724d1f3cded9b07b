use std::collections::VecDeque;

use super::EventEnvelope;

/// Bounded FIFO of canvas events. Producers never block: when the queue is
/// full new events are dropped.
#[derive(Debug, Clone)]
pub struct EventQueue {
    name: String,
    capacity: usize,
    events: VecDeque<EventEnvelope>,
}

impl EventQueue {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    /// Returns `false` if the event was dropped.
    pub fn put(&mut self, event: EventEnvelope) -> bool {
        if self.is_full() {
            log::warn!(
                "{}: queue full ({}), dropping event {}",
                self.name,
                self.capacity,
                event.id
            );
            return false;
        }
        self.events.push_back(event);
        true
    }

    pub fn get(&mut self) -> Option<EventEnvelope> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::CanvasEvent;

    fn envelope(id: u64) -> EventEnvelope {
        EventEnvelope {
            id,
            event: CanvasEvent::ZoomChanged { zoom_level: 1.0 },
        }
    }

    #[test]
    fn fifo_order() {
        let mut queue = EventQueue::new("test", 4);
        assert!(queue.put(envelope(1)));
        assert!(queue.put(envelope(2)));
        assert_eq!(queue.get().map(|e| e.id), Some(1));
        assert_eq!(queue.get().map(|e| e.id), Some(2));
        assert_eq!(queue.get(), None);
    }

    #[test]
    fn full_queue_drops_new_events() {
        let mut queue = EventQueue::new("test", 2);
        assert!(queue.put(envelope(1)));
        assert!(queue.put(envelope(2)));
        assert!(queue.is_full());
        assert!(!queue.put(envelope(3)));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get().map(|e| e.id), Some(1));
        assert!(!queue.is_full());
    }

    #[test]
    fn zero_capacity_never_accepts() {
        let mut queue = EventQueue::new("closed", 0);
        assert!(queue.is_empty());
        assert!(queue.is_full());
        assert!(!queue.put(envelope(1)));
        assert_eq!(queue.name(), "closed");
    }
}
