//! Fixed-capacity LIFO stack.
//!
//! Elements live in `slots[0..count)`; the top is `slots[count - 1]`. The
//! slot buffer is allocated once and never grows.
//!
//! # Example
//!
//! ```
//! use nexus_containers::{Flag, Stack, ValuePolicy};
//!
//! let policy = ValuePolicy::<u64>::ordered();
//! let mut stack = Stack::with_capacity(2, &policy).unwrap();
//!
//! stack.push(1).unwrap();
//! stack.push(2).unwrap();
//!
//! // Full is reported, and the value comes back.
//! assert_eq!(stack.push(3).unwrap_err().into_inner(), 3);
//! assert_eq!(stack.flag(), Flag::Full);
//!
//! assert_eq!(stack.top(), Some(&2));
//! assert_eq!(stack.pop(), Some(2));
//! assert_eq!(stack.pop(), Some(1));
//! assert_eq!(stack.pop(), None);
//! assert_eq!(stack.flag(), Flag::Empty);
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::hooks::{CallbackHooks, Hook, Status};
use crate::policy::{CompareFn, ValuePolicy};
use crate::slots::{self, Slots};
use crate::{CollectionError, Flag, Full};

/// A fixed-capacity stack.
pub struct Stack<'a, V> {
    slots: Slots<V>,
    count: usize,
    compare: CompareFn<V>,
    policy: &'a ValuePolicy<V>,
    status: Status<'a>,
}

impl<'a, V> Stack<'a, V> {
    /// Creates an empty stack holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::MissingCompare`] if the policy has no compare
    /// - [`CollectionError::ZeroCapacity`] if `capacity` is 0
    /// - [`CollectionError::CapacityOverflow`] if the buffer size overflows
    /// - [`CollectionError::AllocationFailed`] if the buffer cannot be allocated
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
        let (compare, slots) = policy
            .comparator()
            .and_then(|compare| Ok((compare, slots::allocate(capacity)?)))
            .inspect_err(|err| {
                tracing::debug!(capacity, error = %err, "stack construction rejected");
            })?;

        Ok(Self {
            slots,
            count: 0,
            compare,
            policy,
            status: Status::new(hooks),
        })
    }

    /// Replaces the hook set. Passing `None` detaches all hooks.
    pub fn customize(&mut self, hooks: Option<&'a CallbackHooks<'a>>) {
        self.status.customize(hooks);
    }

    /// Pushes a value on top.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the stack is at capacity.
    pub fn push(&mut self, value: V) -> Result<(), Full<V>> {
        if self.is_full() {
            tracing::trace!(capacity = self.capacity(), "stack push rejected: full");
            self.status.fail(Flag::Full);
            return Err(Full(value));
        }

        self.slots[self.count] = Some(value);
        self.count += 1;

        self.status.done(Hook::Create);
        Ok(())
    }

    /// Removes and returns the top element.
    ///
    /// Returns `None` and records [`Flag::Empty`] if the stack is empty.
    pub fn pop(&mut self) -> Option<V> {
        if self.is_empty() {
            self.status.fail(Flag::Empty);
            return None;
        }

        self.count -= 1;
        let value = self.slots[self.count].take();

        self.status.done(Hook::Delete);
        value
    }

    /// Returns the top element without removing it.
    pub fn top(&self) -> Option<&V> {
        if self.is_empty() {
            self.status.fail(Flag::Empty);
            return None;
        }

        self.status.done(Hook::Read);
        self.slots[self.count - 1].as_ref()
    }

    /// Returns `true` if any element compares equal to `value`.
    pub fn contains(&self, value: &V) -> bool {
        let compare = self.compare;
        let found = self.iter().any(|v| compare(v, value) == Ordering::Equal);

        self.status.done(Hook::Read);
        found
    }

    /// Destroys every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        let policy = self.policy;
        slots::drain_into(&mut self.slots[..self.count], |v| policy.destroy(v));
        self.count = 0;
        self.status.ok();
    }

    /// Iterates from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.slots[..self.count].iter().flatten()
    }

    /// Number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Maximum number of elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if the stack is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity()
    }

    /// Outcome of the most recent operation.
    #[inline]
    pub fn flag(&self) -> Flag {
        self.status.flag()
    }

    /// Returns a copy with the same capacity, policy and hooks.
    ///
    /// Elements are copied with the policy's `duplicate`.
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
        let mut copy = Self::build(self.capacity(), self.policy, self.status.hooks())
            .map_err(|err| self.status.reject(err))?;

        for (slot, value) in copy.slots.iter_mut().zip(self.iter()) {
            *slot = Some(duplicate(value));
        }
        copy.count = self.count;

        self.status.ok();
        Ok(copy)
    }

    /// Element-wise comparison, bottom to top.
    ///
    /// Records [`Flag::Ok`] on both stacks.
    pub fn equals(&self, other: &Self) -> bool {
        self.status.ok();
        other.status.ok();

        let compare = self.compare;
        self.count == other.count
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| compare(a, b) == Ordering::Equal)
    }
}

impl<V> PartialEq for Stack<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<V> Drop for Stack<'_, V> {
    fn drop(&mut self) {
        if self.policy.has_destroy() {
            let policy = self.policy;
            slots::drain_into(&mut self.slots[..self.count], |v| policy.destroy(v));
        }
    }
}

impl<V> fmt::Debug for Stack<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Stack");
        s.field("count", &self.count)
            .field("capacity", &self.capacity())
            .field("flag", &self.flag());
        match self.policy.debug_values(self.iter()) {
            Some(values) => s.field("values", &values).finish(),
            None => s.finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn new_is_empty() {
        let policy = ValuePolicy::<u32>::ordered();
        let stack = Stack::with_capacity(8, &policy).unwrap();
        assert!(stack.is_empty());
        assert_eq!(stack.count(), 0);
        assert_eq!(stack.capacity(), 8);
        assert_eq!(stack.flag(), Flag::Ok);
    }

    #[test]
    fn construction_rejected() {
        let policy = ValuePolicy::<u32>::ordered();
        assert_eq!(
            Stack::with_capacity(0, &policy).unwrap_err(),
            CollectionError::ZeroCapacity
        );
        assert!(matches!(
            Stack::with_capacity(usize::MAX, &policy),
            Err(CollectionError::CapacityOverflow { .. })
        ));

        let no_compare = ValuePolicy::<u32>::default();
        assert_eq!(
            Stack::with_capacity(4, &no_compare).unwrap_err(),
            CollectionError::MissingCompare
        );
    }

    #[test]
    fn lifo_order() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut stack = Stack::with_capacity(4, &policy).unwrap();
        for i in 0..4 {
            stack.push(i).unwrap();
        }
        assert!(stack.is_full());
        for i in (0..4).rev() {
            assert_eq!(stack.top(), Some(&i));
            assert_eq!(stack.pop(), Some(i));
        }
        assert!(stack.is_empty());
    }

    #[test]
    fn full_leaves_state_unchanged() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut stack = Stack::with_capacity(2, &policy).unwrap();
        stack.push(1).unwrap();
        stack.push(2).unwrap();

        assert_eq!(stack.push(3), Err(Full(3)));
        assert_eq!(stack.flag(), Flag::Full);
        assert_eq!(stack.count(), 2);
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![1, 2]);

        // Next success clears the flag.
        assert!(stack.contains(&1));
        assert_eq!(stack.flag(), Flag::Ok);
    }

    #[test]
    fn empty_guards() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut stack = Stack::with_capacity(2, &policy).unwrap();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.flag(), Flag::Empty);
        assert_eq!(stack.top(), None);
        assert_eq!(stack.flag(), Flag::Empty);
    }

    #[test]
    fn contains_uses_compare() {
        // Compare on the low byte only.
        let policy = ValuePolicy::<u32>::new(|a, b| (a & 0xFF).cmp(&(b & 0xFF)));
        let mut stack = Stack::with_capacity(4, &policy).unwrap();
        stack.push(0x101).unwrap();
        assert!(stack.contains(&0x001));
        assert!(!stack.contains(&0x002));
    }

    #[test]
    fn copy_and_equality() {
        let policy = ValuePolicy::<String>::ordered().cloning();
        let mut stack = Stack::with_capacity(4, &policy).unwrap();
        stack.push("a".to_string()).unwrap();
        stack.push("b".to_string()).unwrap();

        let mut copy = stack.copy_of().unwrap();
        assert!(stack.equals(&copy));
        assert_eq!(copy.capacity(), 4);

        copy.pop();
        copy.push("c".to_string()).unwrap();
        assert!(stack != copy);
        assert_eq!(stack.top().map(String::as_str), Some("b"));
    }

    #[test]
    fn equality_requires_equal_counts() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut a = Stack::with_capacity(4, &policy).unwrap();
        let mut b = Stack::with_capacity(8, &policy).unwrap();
        a.push(1).unwrap();
        b.push(1).unwrap();
        assert!(a == b);
        b.push(2).unwrap();
        assert!(a != b);
    }

    thread_local! {
        static DESTROYED: Cell<u32> = const { Cell::new(0) };
    }

    #[test]
    fn clear_and_drop_destroy_live_elements() {
        let policy = ValuePolicy::<u32>::ordered().with_destroy(|_| {
            DESTROYED.with(|d| d.set(d.get() + 1));
        });

        let mut stack = Stack::with_capacity(4, &policy).unwrap();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.clear();
        assert_eq!(DESTROYED.with(Cell::get), 2);
        assert_eq!(stack.capacity(), 4);
        assert!(stack.is_empty());

        stack.push(3).unwrap();
        // Popped values belong to the caller and are not destroyed.
        stack.push(4).unwrap();
        assert_eq!(stack.pop(), Some(4));
        drop(stack);
        assert_eq!(DESTROYED.with(Cell::get), 3);
    }

    #[test]
    fn hooks_fire_on_success_only() {
        let counts = Cell::new((0, 0, 0));
        let hooks = CallbackHooks::new()
            .on_create(|| {
                let (c, r, d) = counts.get();
                counts.set((c + 1, r, d));
            })
            .on_read(|| {
                let (c, r, d) = counts.get();
                counts.set((c, r + 1, d));
            })
            .on_delete(|| {
                let (c, r, d) = counts.get();
                counts.set((c, r, d + 1));
            });
        let policy = ValuePolicy::<u32>::ordered();
        let mut stack = Stack::with_hooks(1, &policy, &hooks).unwrap();

        stack.push(1).unwrap();
        let _ = stack.push(2);
        stack.top();
        stack.pop();
        stack.pop();
        stack.top();

        assert_eq!(counts.get(), (1, 1, 1));

        stack.customize(None);
        stack.push(5).unwrap();
        assert_eq!(counts.get(), (1, 1, 1));
    }

    #[test]
    fn debug_renders_values() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut stack = Stack::with_capacity(2, &policy).unwrap();
        stack.push(1).unwrap();
        assert_eq!(
            format!("{stack:?}"),
            "Stack { count: 1, capacity: 2, flag: Ok, .. }"
        );

        let policy = ValuePolicy::<u32>::ordered().with_render(|v| format!("#{v}"));
        let mut stack = Stack::with_capacity(2, &policy).unwrap();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(
            format!("{stack:?}"),
            "Stack { count: 2, capacity: 2, flag: Ok, values: [#1, #2] }"
        );
    }
}
