//! Fire-and-forget event queue.

/// Ordered queue of published events.
///
/// Systems `publish` as they run; the tick driver drains the queue once per
/// tick and forwards every event to whoever is listening.  Delivery order is
/// publish order.  Nothing is returned to the publisher.
#[derive(Debug)]
pub struct Events<E> {
    queue: Vec<E>,
}

impl<E> Default for Events<E> {
    fn default() -> Self {
        Self { queue: Vec::new() }
    }
}

impl<E> Events<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn publish(&mut self, event: E) {
        self.queue.push(event);
    }

    /// Remove and yield every pending event in publish order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, E> {
        self.queue.drain(..)
    }

    /// Pending events, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
