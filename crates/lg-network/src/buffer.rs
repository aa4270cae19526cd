//! The network's shared queue of unassigned orders.

use lg_world::World;

use crate::Order;

/// Fixed-capacity order queue with a consume cursor.
///
/// The matcher fills slots `[0, count)` directly and then fixes the tail with
/// [`set_count`](Self::set_count).  Consumers dequeue from `next`, possibly
/// splitting the head order.  Invariant: `0 <= next <= count <= capacity`.
#[derive(Clone, Debug)]
pub struct OrderBuffer {
    slots: Vec<Option<Order>>,
    next:  usize,
    count: usize,
}

impl OrderBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            next:  0,
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Orders still waiting in the active window.
    #[inline]
    pub fn len(&self) -> usize {
        self.count - self.next
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next == self.count
    }

    #[inline]
    pub fn next_index(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Head of the active window, untouched.
    pub fn peek(&self) -> Option<&Order> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.next].as_ref()
    }

    /// Every order in the backing storage, including consumed ones.
    pub fn iter_all(&self) -> impl Iterator<Item = &Order> + '_ {
        self.slots.iter().flatten()
    }

    /// Orders in `[next, count)`.
    pub fn iter_active(&self) -> impl Iterator<Item = &Order> + '_ {
        self.slots[self.next..self.count].iter().flatten()
    }

    /// Take up to `max_amount` units from the head order.
    ///
    /// The stored order shrinks by what was taken and the cursor only moves
    /// once it is exhausted.  The returned order carries exactly the taken
    /// amount; the caller now owns fulfilling it.
    pub fn try_dequeue(&mut self, max_amount: i32) -> Option<Order> {
        if self.is_empty() || max_amount <= 0 {
            return None;
        }
        let head = self.slots[self.next].as_mut()?;
        let amount = max_amount.min(head.amount);
        head.amount -= amount;
        let taken = head.with_amount(amount);
        if head.amount == 0 {
            self.next += 1;
        }
        Some(taken)
    }

    /// Cancel every active order, then empty the buffer.
    ///
    /// An order with a vanished endpoint cannot be cancelled; its surviving
    /// side is released instead.  Returns how many such stale orders there
    /// were.
    pub fn clear_and_cancel(&mut self, world: &mut World) -> usize {
        let mut stale = 0;
        for order in self.slots[self.next..self.count].iter().flatten() {
            if !order.cancel(world) {
                order.release_surviving(world);
                stale += 1;
            }
        }
        self.slots.fill(None);
        self.next = 0;
        self.count = 0;
        stale
    }

    /// Write `order` into slot `index` ahead of [`set_count`](Self::set_count).
    pub(crate) fn write(&mut self, index: usize, order: Order) {
        self.slots[index] = Some(order);
    }

    /// Fix the tail after a matching pass.
    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count.min(self.capacity());
    }
}
