//! Fixed-capacity double-ended queue over a circular buffer.
//!
//! `push_front` retreats `front` before writing; `push_back` writes at `back`
//! before advancing it. The pops mirror those moves, so both ends wrap
//! independently.
//!
//! ```
//! use nexus_containers::{Deque, ValuePolicy};
//!
//! let policy = ValuePolicy::<i32>::ordered();
//! let mut deque = Deque::with_capacity(4, &policy).unwrap();
//!
//! deque.push_back(2).unwrap();
//! deque.push_front(1).unwrap();
//! deque.push_back(3).unwrap();
//!
//! assert_eq!(deque.front(), Some(&1));
//! assert_eq!(deque.back(), Some(&3));
//! assert_eq!(deque.pop_back(), Some(3));
//! assert_eq!(deque.pop_front(), Some(1));
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::hooks::{CallbackHooks, Hook, Status};
use crate::policy::{CompareFn, ValuePolicy};
use crate::ring::{self, Ring};
use crate::{CollectionError, Flag, Full};

/// A fixed-capacity double-ended queue.
pub struct Deque<'a, V> {
    ring: Ring<V>,
    compare: CompareFn<V>,
    policy: &'a ValuePolicy<V>,
    status: Status<'a>,
}

impl<'a, V> Deque<'a, V> {
    /// Creates an empty deque holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Rejects a policy without compare, a zero capacity, or a capacity whose
    /// buffer size overflows.
    pub fn with_capacity(
        capacity: usize,
        policy: &'a ValuePolicy<V>,
    ) -> Result<Self, CollectionError> {
        Self::build(capacity, policy, None)
    }

    /// Like [`with_capacity`](Self::with_capacity), with hooks attached.
    pub fn with_hooks(
        capacity: usize,
        policy: &'a ValuePolicy<V>,
        hooks: &'a CallbackHooks<'a>,
    ) -> Result<Self, CollectionError> {
        Self::build(capacity, policy, Some(hooks))
    }

    fn build(
        capacity: usize,
        policy: &'a ValuePolicy<V>,
        hooks: Option<&'a CallbackHooks<'a>>,
    ) -> Result<Self, CollectionError> {
        let (compare, ring) = policy
            .comparator()
            .and_then(|compare| Ok((compare, Ring::with_capacity(capacity)?)))
            .inspect_err(|err| {
                tracing::debug!(capacity, error = %err, "deque construction rejected");
            })?;

        Ok(Self {
            ring,
            compare,
            policy,
            status: Status::new(hooks),
        })
    }

    /// Replaces the hook set. Passing `None` detaches all hooks.
    pub fn customize(&mut self, hooks: Option<&'a CallbackHooks<'a>>) {
        self.status.customize(hooks);
    }

    // =========================================================================
    // Ends
    // =========================================================================

    /// Inserts a value before the front.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the deque is at capacity.
    pub fn push_front(&mut self, value: V) -> Result<(), Full<V>> {
        let result = self.ring.push_front(value);
        self.inserted(result)
    }

    /// Inserts a value after the back.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the deque is at capacity.
    pub fn push_back(&mut self, value: V) -> Result<(), Full<V>> {
        let result = self.ring.push_back(value);
        self.inserted(result)
    }

    /// Removes and returns the front element.
    pub fn pop_front(&mut self) -> Option<V> {
        let value = self.ring.pop_front();
        self.finish(value.is_some(), Hook::Delete);
        value
    }

    /// Removes and returns the back element.
    pub fn pop_back(&mut self) -> Option<V> {
        let value = self.ring.pop_back();
        self.finish(value.is_some(), Hook::Delete);
        value
    }

    /// Returns the front element without removing it.
    pub fn front(&self) -> Option<&V> {
        let value = self.ring.front();
        self.finish(value.is_some(), Hook::Read);
        value
    }

    /// Returns the back element without removing it.
    pub fn back(&self) -> Option<&V> {
        let value = self.ring.back();
        self.finish(value.is_some(), Hook::Read);
        value
    }

    // =========================================================================
    // Whole-deque operations
    // =========================================================================

    /// Returns the element `index` positions behind the front.
    ///
    /// Records [`Flag::Empty`] on an empty deque and [`Flag::Error`] when
    /// `index` is past the back.
    pub fn get(&self, index: usize) -> Option<&V> {
        if self.is_empty() {
            self.status.fail(Flag::Empty);
            return None;
        }
        match self.ring.get(index) {
            Some(value) => {
                self.status.done(Hook::Read);
                Some(value)
            }
            None => {
                tracing::trace!(index, count = self.count(), "deque get out of range");
                self.status.fail(Flag::Error);
                None
            }
        }
    }

    /// Returns `true` if any element compares equal to `value`.
    pub fn contains(&self, value: &V) -> bool {
        let compare = self.compare;
        let found = self.ring.iter().any(|v| compare(v, value) == Ordering::Equal);
        self.status.done(Hook::Read);
        found
    }

    /// Destroys every element and resets both ends. Capacity is unchanged.
    pub fn clear(&mut self) {
        let policy = self.policy;
        self.ring.clear(|v| policy.destroy(v));
        self.status.ok();
    }

    /// Iterates from front to back.
    pub fn iter(&self) -> ring::Iter<'_, V> {
        self.ring.iter()
    }

    /// Number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.ring.len()
    }

    /// Maximum number of elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns `true` if the deque holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns `true` if the deque is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Outcome of the most recent operation.
    #[inline]
    pub fn flag(&self) -> Flag {
        self.status.flag()
    }

    /// Returns a copy with the same capacity, policy and hooks, re-based so
    /// its front is slot 0. Elements are copied with the policy's `duplicate`.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::MissingDuplicate`] if the policy has no duplicate
    /// - [`CollectionError::AllocationFailed`] if the new buffer cannot be
    ///   allocated
    pub fn copy_of(&self) -> Result<Self, CollectionError> {
        let duplicate = self.policy.duplicator().map_err(|err| self.status.reject(err))?;
        self.copy_with(duplicate)
    }

    /// Like [`copy_of`](Self::copy_of), falling back to `Clone` when the
    /// policy has no duplicate function.
    pub fn copy_of_cloned(&self) -> Result<Self, CollectionError>
    where
        V: Clone,
    {
        let policy = self.policy;
        self.copy_with(|v| policy.duplicate(v))
    }

    fn copy_with(&self, duplicate: impl Fn(&V) -> V) -> Result<Self, CollectionError> {
        let ring = self
            .ring
            .rebased(duplicate)
            .map_err(|err| self.status.reject(err))?;

        self.status.ok();
        Ok(Self {
            ring,
            compare: self.compare,
            policy: self.policy,
            status: Status::new(self.status.hooks()),
        })
    }

    /// Element-wise comparison, front to back. Records [`Flag::Ok`] on both.
    pub fn equals(&self, other: &Self) -> bool {
        self.status.ok();
        other.status.ok();

        let compare = self.compare;
        self.count() == other.count()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| compare(a, b) == Ordering::Equal)
    }

    fn inserted(&self, result: Result<(), Full<V>>) -> Result<(), Full<V>> {
        match result {
            Ok(()) => self.status.done(Hook::Create),
            Err(_) => {
                tracing::trace!(capacity = self.capacity(), "deque push rejected: full");
                self.status.fail(Flag::Full);
            }
        }
        result
    }

    fn finish(&self, found: bool, hook: Hook) {
        if found {
            self.status.done(hook);
        } else {
            self.status.fail(Flag::Empty);
        }
    }
}

impl<V> PartialEq for Deque<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<V> Drop for Deque<'_, V> {
    fn drop(&mut self) {
        if self.policy.has_destroy() {
            let policy = self.policy;
            self.ring.clear(|v| policy.destroy(v));
        }
    }
}

impl<V> fmt::Debug for Deque<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Deque");
        s.field("count", &self.count())
            .field("capacity", &self.capacity())
            .field("front", &self.ring.front_index())
            .field("back", &self.ring.back_index())
            .field("flag", &self.flag());
        match self.policy.debug_values(self.iter()) {
            Some(values) => s.field("values", &values).finish(),
            None => s.finish_non_exhaustive(),
        }
    }
}
