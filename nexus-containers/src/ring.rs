//! Circular index arithmetic and the ring slot store behind [`Queue`] and
//! [`Deque`].
//!
//! Indices always stay in `[0, capacity)`. Every move of `front` or `back`
//! goes through [`advance`] or [`retreat`]:
//!
//! ```text
//!  capacity = 6, front = 4, back = 1, count = 3
//!
//!  index:   0     1     2     3     4     5
//!         ┌─────┬─────┬─────┬─────┬─────┬─────┐
//!         │  c  │     │     │     │  a  │  b  │
//!         └─────┴─────┴─────┴─────┴─────┴─────┘
//!                  ▲                 ▲
//!                 back             front
//!
//!  logical order: a, b, c
//! ```
//!
//! `back` points one past the last element, so the last element lives at
//! `retreat(back)`.
//!
//! [`Queue`]: crate::Queue
//! [`Deque`]: crate::Deque

use crate::slots::{self, Slots};
use crate::{CollectionError, Full};

/// Moves `index` one slot forward, wrapping to 0 at `capacity`.
///
/// `capacity` must be non-zero.
#[inline]
pub const fn advance(index: usize, capacity: usize) -> usize {
    if index + 1 == capacity { 0 } else { index + 1 }
}

/// Moves `index` one slot backward, wrapping to `capacity - 1` at 0.
///
/// `capacity` must be non-zero.
#[inline]
pub const fn retreat(index: usize, capacity: usize) -> usize {
    if index == 0 { capacity - 1 } else { index - 1 }
}

/// Fixed circular buffer of slots.
///
/// Holds the elements `[front, front + count)` modulo capacity. Full/empty
/// guards are checked here before any index moves, so a rejected call leaves
/// the ring untouched.
pub(crate) struct Ring<V> {
    slots: Slots<V>,
    front: usize,
    back: usize,
    count: usize,
}

impl<V> Ring<V> {
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            slots: slots::allocate(capacity)?,
            front: 0,
            back: 0,
            count: 0,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    #[inline]
    pub(crate) fn front_index(&self) -> usize {
        self.front
    }

    #[inline]
    pub(crate) fn back_index(&self) -> usize {
        self.back
    }

    /// Writes at `back`, then advances `back`.
    pub(crate) fn push_back(&mut self, value: V) -> Result<(), Full<V>> {
        if self.is_full() {
            return Err(Full(value));
        }
        self.slots[self.back] = Some(value);
        self.back = advance(self.back, self.capacity());
        self.count += 1;
        Ok(())
    }

    /// Retreats `front`, then writes there.
    pub(crate) fn push_front(&mut self, value: V) -> Result<(), Full<V>> {
        if self.is_full() {
            return Err(Full(value));
        }
        self.front = retreat(self.front, self.capacity());
        self.slots[self.front] = Some(value);
        self.count += 1;
        Ok(())
    }

    /// Takes the slot at `front`, then advances `front`.
    pub(crate) fn pop_front(&mut self) -> Option<V> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.front].take();
        self.front = advance(self.front, self.capacity());
        self.count -= 1;
        value
    }

    /// Retreats `back`, then takes the slot there.
    pub(crate) fn pop_back(&mut self) -> Option<V> {
        if self.is_empty() {
            return None;
        }
        self.back = retreat(self.back, self.capacity());
        let value = self.slots[self.back].take();
        self.count -= 1;
        value
    }

    pub(crate) fn front(&self) -> Option<&V> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.front].as_ref()
    }

    pub(crate) fn back(&self) -> Option<&V> {
        if self.is_empty() {
            return None;
        }
        self.slots[retreat(self.back, self.capacity())].as_ref()
    }

    /// Returns the element at logical position `index` (0 = front).
    pub(crate) fn get(&self, index: usize) -> Option<&V> {
        if index >= self.count {
            return None;
        }
        let physical = (self.front + index) % self.capacity();
        self.slots[physical].as_ref()
    }

    /// Iterates the logical window from front to back.
    pub(crate) fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: &self.slots,
            index: self.front,
            remaining: self.count,
        }
    }

    /// Empties the ring, handing each live value to `dispose`.
    pub(crate) fn clear(&mut self, dispose: impl FnMut(V)) {
        slots::drain_into(&mut self.slots, dispose);
        self.front = 0;
        self.back = 0;
        self.count = 0;
    }

    /// Copies the logical window into a new ring of the same capacity,
    /// re-based so the copy starts at index 0.
    pub(crate) fn rebased(&self, mut copy: impl FnMut(&V) -> V) -> Result<Self, CollectionError> {
        let mut ring = Self::with_capacity(self.capacity())?;
        for (slot, value) in ring.slots.iter_mut().zip(self.iter()) {
            *slot = Some(copy(value));
        }
        ring.count = self.count;
        ring.back = if self.count == ring.capacity() { 0 } else { self.count };
        Ok(ring)
    }
}

/// Front-to-back iterator over a ring.
pub struct Iter<'r, V> {
    slots: &'r [Option<V>],
    index: usize,
    remaining: usize,
}

impl<'r, V> Iterator for Iter<'r, V> {
    type Item = &'r V;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining > 0 {
            let slot = &self.slots[self.index];
            self.index = advance(self.index, self.slots.len());
            self.remaining -= 1;
            if let Some(value) = slot.as_ref() {
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
