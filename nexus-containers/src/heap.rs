//! Fixed-capacity binary heap with selectable ordering.
//!
//! The heap is a complete binary tree stored level by level in a slot
//! buffer. The children of `i` are `2i + 1` and `2i + 2`; the parent of `i`
//! is `(i - 1) / 2`.
//!
//! ```text
//!  Max heap, count = 5
//!
//!            [0] 9
//!           /     \
//!       [1] 7     [2] 8
//!       /   \
//!   [3] 3  [4] 5
//! ```
//!
//! A node *outranks* another when it should sit closer to the root: greater
//! for [`HeapOrder::Max`], smaller for [`HeapOrder::Min`]. The invariant is
//! that no child outranks its parent, so the root is always the extremal
//! element.
//!
//! # Example
//!
//! ```
//! use nexus_containers::{Heap, HeapOrder, ValuePolicy};
//!
//! let policy = ValuePolicy::<u32>::ordered();
//! let mut heap = Heap::with_capacity(8, HeapOrder::Min, &policy).unwrap();
//!
//! for v in [5, 1, 4, 2, 3] {
//!     heap.insert(v).unwrap();
//! }
//!
//! assert_eq!(heap.peek(), Some(&1));
//! let drained: Vec<_> = std::iter::from_fn(|| heap.remove()).collect();
//! assert_eq!(drained, vec![1, 2, 3, 4, 5]);
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::hooks::{CallbackHooks, Hook, Status};
use crate::policy::{CompareFn, ValuePolicy};
use crate::slots::{self, Slots};
use crate::{CollectionError, Flag, Full};

/// Which end of the ordering sits at the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapOrder {
    /// Smallest element at the root.
    Min,
    /// Largest element at the root.
    Max,
}

impl HeapOrder {
    /// The raw discriminant: `-1` for `Min`, `1` for `Max`.
    pub const fn sign(self) -> i32 {
        match self {
            HeapOrder::Min => -1,
            HeapOrder::Max => 1,
        }
    }

    /// The comparison result that moves a node toward the root.
    #[inline]
    const fn rising(self) -> Ordering {
        match self {
            HeapOrder::Min => Ordering::Less,
            HeapOrder::Max => Ordering::Greater,
        }
    }
}

impl TryFrom<i32> for HeapOrder {
    type Error = CollectionError;

    /// Accepts exactly `-1` (min) and `1` (max).
    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            -1 => Ok(HeapOrder::Min),
            1 => Ok(HeapOrder::Max),
            other => Err(CollectionError::InvalidOrder(other)),
        }
    }
}

/// A fixed-capacity binary heap.
pub struct Heap<'a, V> {
    slots: Slots<V>,
    count: usize,
    order: HeapOrder,
    compare: CompareFn<V>,
    policy: &'a ValuePolicy<V>,
    status: Status<'a>,
}

impl<'a, V> Heap<'a, V> {
    /// Creates an empty heap holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Rejects a policy without compare, a zero capacity, or a capacity whose
    /// buffer size overflows.
    pub fn with_capacity(
        capacity: usize,
        order: HeapOrder,
        policy: &'a ValuePolicy<V>,
    ) -> Result<Self, CollectionError> {
        Self::build(capacity, order, policy, None)
    }

    /// Like [`with_capacity`](Self::with_capacity), with hooks attached.
    pub fn with_hooks(
        capacity: usize,
        order: HeapOrder,
        policy: &'a ValuePolicy<V>,
        hooks: &'a CallbackHooks<'a>,
    ) -> Result<Self, CollectionError> {
        Self::build(capacity, order, policy, Some(hooks))
    }

    fn build(
        capacity: usize,
        order: HeapOrder,
        policy: &'a ValuePolicy<V>,
        hooks: Option<&'a CallbackHooks<'a>>,
    ) -> Result<Self, CollectionError> {
        let (compare, slots) = policy
            .comparator()
            .and_then(|compare| Ok((compare, slots::allocate(capacity)?)))
            .inspect_err(|err| {
                tracing::debug!(capacity, ?order, error = %err, "heap construction rejected");
            })?;

        Ok(Self {
            slots,
            count: 0,
            order,
            compare,
            policy,
            status: Status::new(hooks),
        })
    }

    /// Replaces the hook set. Passing `None` detaches all hooks.
    pub fn customize(&mut self, hooks: Option<&'a CallbackHooks<'a>>) {
        self.status.customize(hooks);
    }

    /// Inserts a value and restores the heap order.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the heap is at capacity.
    pub fn insert(&mut self, value: V) -> Result<(), Full<V>> {
        if self.is_full() {
            tracing::trace!(capacity = self.capacity(), "heap insert rejected: full");
            self.status.fail(Flag::Full);
            return Err(Full(value));
        }

        let pos = self.count;
        self.slots[pos] = Some(value);
        self.count += 1;
        self.sift_up(pos);

        self.status.done(Hook::Create);
        Ok(())
    }

    /// Removes and returns the root (the extremal element).
    pub fn remove(&mut self) -> Option<V> {
        if self.is_empty() {
            self.status.fail(Flag::Empty);
            return None;
        }

        self.count -= 1;
        let last = self.count;
        self.slots.swap(0, last);
        let root = self.slots[last].take();
        self.sift_down(0);

        self.status.done(Hook::Delete);
        root
    }

    /// Returns the root without removing it.
    pub fn peek(&self) -> Option<&V> {
        if self.is_empty() {
            self.status.fail(Flag::Empty);
            return None;
        }

        self.status.done(Hook::Read);
        self.slots[0].as_ref()
    }

    /// Returns `true` if any element compares equal to `value`.
    pub fn contains(&self, value: &V) -> bool {
        let compare = self.compare;
        let found = self.iter().any(|v| compare(v, value) == Ordering::Equal);
        self.status.done(Hook::Read);
        found
    }

    /// Destroys every element. Capacity and ordering are unchanged.
    pub fn clear(&mut self) {
        let policy = self.policy;
        slots::drain_into(&mut self.slots[..self.count], |v| policy.destroy(v));
        self.count = 0;
        self.status.ok();
    }

    /// Iterates in storage (level) order, root first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.slots[..self.count].iter().flatten()
    }

    /// The ordering fixed at construction.
    #[inline]
    pub fn order(&self) -> HeapOrder {
        self.order
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

    /// Returns `true` if the heap holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` if the heap is at capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count >= self.capacity()
    }

    /// Outcome of the most recent operation.
    #[inline]
    pub fn flag(&self) -> Flag {
        self.status.flag()
    }

    /// Returns a positional copy with the same capacity, ordering, policy and
    /// hooks. Elements are copied with the policy's `duplicate`.
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
        let mut copy = Self::build(self.capacity(), self.order, self.policy, self.status.hooks())
            .map_err(|err| self.status.reject(err))?;

        for (slot, value) in copy.slots.iter_mut().zip(self.iter()) {
            *slot = Some(duplicate(value));
        }
        copy.count = self.count;

        self.status.ok();
        Ok(copy)
    }

    /// Positional comparison of the two buffers. Records [`Flag::Ok`] on both.
    ///
    /// Two heaps holding the same elements in a different layout are not
    /// equal.
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

    // =========================================================================
    // Heap repair
    // =========================================================================

    /// Returns `true` if the element at `a` belongs above the element at `b`.
    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        match (&self.slots[a], &self.slots[b]) {
            (Some(a), Some(b)) => (self.compare)(a, b) == self.order.rising(),
            _ => false,
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.outranks(pos, parent) {
                break;
            }
            self.slots.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut target = pos;

            if left < self.count && self.outranks(left, target) {
                target = left;
            }
            if right < self.count && self.outranks(right, target) {
                target = right;
            }
            if target == pos {
                break;
            }

            self.slots.swap(pos, target);
            pos = target;
        }
    }
}

impl<V> PartialEq for Heap<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<V> Drop for Heap<'_, V> {
    fn drop(&mut self) {
        if self.policy.has_destroy() {
            let policy = self.policy;
            slots::drain_into(&mut self.slots[..self.count], |v| policy.destroy(v));
        }
    }
}

impl<V> fmt::Debug for Heap<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Heap");
        s.field("count", &self.count)
            .field("capacity", &self.capacity())
            .field("order", &self.order)
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

    fn assert_heap_order<V>(heap: &Heap<'_, V>) {
        for i in 1..heap.count {
            assert!(
                !heap.outranks(i, (i - 1) / 2),
                "child {i} outranks its parent"
            );
        }
    }

    #[test]
    fn order_from_raw() {
        assert_eq!(HeapOrder::try_from(-1), Ok(HeapOrder::Min));
        assert_eq!(HeapOrder::try_from(1), Ok(HeapOrder::Max));
        assert_eq!(
            HeapOrder::try_from(0),
            Err(CollectionError::InvalidOrder(0))
        );
        assert_eq!(
            HeapOrder::try_from(2),
            Err(CollectionError::InvalidOrder(2))
        );
        assert_eq!(HeapOrder::Max.sign(), 1);
        assert_eq!(HeapOrder::Min.sign(), -1);
    }

    #[test]
    fn max_heap_sorts_descending() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut heap = Heap::with_capacity(16, HeapOrder::Max, &policy).unwrap();

        for v in [5, 3, 8, 1, 9, 2, 7] {
            heap.insert(v).unwrap();
            assert_heap_order(&heap);
        }
        assert_eq!(heap.peek(), Some(&9));

        let mut out = Vec::new();
        while let Some(v) = heap.remove() {
            assert_heap_order(&heap);
            out.push(v);
        }
        assert_eq!(out, vec![9, 8, 7, 5, 3, 2, 1]);
        assert_eq!(heap.flag(), Flag::Empty);
    }

    #[test]
    fn min_heap_sorts_ascending() {
        let policy = ValuePolicy::<i64>::ordered();
        let mut heap = Heap::with_capacity(16, HeapOrder::Min, &policy).unwrap();

        for v in [4, -2, 7, 0, -2, 9] {
            heap.insert(v).unwrap();
        }
        let out: Vec<_> = core::iter::from_fn(|| heap.remove()).collect();
        assert_eq!(out, vec![-2, -2, 0, 4, 7, 9]);
    }

    #[test]
    fn full_and_empty() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut heap = Heap::with_capacity(2, HeapOrder::Max, &policy).unwrap();

        assert_eq!(heap.peek(), None);
        assert_eq!(heap.flag(), Flag::Empty);

        heap.insert(1).unwrap();
        heap.insert(2).unwrap();
        assert_eq!(heap.insert(3), Err(Full(3)));
        assert_eq!(heap.flag(), Flag::Full);
        assert_eq!(heap.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn single_element() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut heap = Heap::with_capacity(1, HeapOrder::Min, &policy).unwrap();
        heap.insert(42).unwrap();
        assert_eq!(heap.remove(), Some(42));
        assert!(heap.is_empty());
        assert_eq!(heap.flag(), Flag::Ok);
    }

    #[test]
    fn rejects_bad_construction() {
        let policy = ValuePolicy::<u32>::ordered();
        assert_eq!(
            Heap::with_capacity(0, HeapOrder::Max, &policy).unwrap_err(),
            CollectionError::ZeroCapacity
        );
        let bare = ValuePolicy::<u32>::default();
        assert_eq!(
            Heap::with_capacity(4, HeapOrder::Max, &bare).unwrap_err(),
            CollectionError::MissingCompare
        );
    }

    #[test]
    fn custom_compare() {
        // Order by string length.
        let policy = ValuePolicy::<&str>::new(|a, b| a.len().cmp(&b.len()));
        let mut heap = Heap::with_capacity(4, HeapOrder::Max, &policy).unwrap();
        for s in ["a", "abcd", "ab", "abc"] {
            heap.insert(s).unwrap();
        }
        assert_eq!(heap.remove(), Some("abcd"));
        assert_eq!(heap.peek(), Some(&"abc"));
        assert!(heap.contains(&"zz"));
        assert!(!heap.contains(&"zzzzz"));
    }

    #[test]
    fn copy_is_positional() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut heap = Heap::with_capacity(8, HeapOrder::Max, &policy).unwrap();
        for v in [3, 1, 4, 1, 5] {
            heap.insert(v).unwrap();
        }

        let mut copy = heap.copy_of_cloned().unwrap();
        assert_eq!(copy.order(), HeapOrder::Max);
        assert!(copy == heap);
        assert!(copy.iter().eq(heap.iter()));

        copy.remove();
        assert!(copy != heap);
        assert_eq!(heap.count(), 5);
    }

    #[test]
    fn same_elements_different_layout_are_not_equal() {
        let policy = ValuePolicy::<u32>::ordered();
        let mut a = Heap::with_capacity(4, HeapOrder::Max, &policy).unwrap();
        let mut b = Heap::with_capacity(4, HeapOrder::Max, &policy).unwrap();
        for v in [3, 1, 2] {
            a.insert(v).unwrap();
        }
        for v in [3, 2, 1] {
            b.insert(v).unwrap();
        }
        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(b.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert!(a != b);
    }

    #[test]
    fn hooks() {
        let fired = Cell::new([0u32; 4]);
        let bump = |i: usize| {
            let mut c = fired.get();
            c[i] += 1;
            fired.set(c);
        };
        let hooks = CallbackHooks::new()
            .on_create(|| bump(0))
            .on_read(|| bump(1))
            .on_update(|| bump(2))
            .on_delete(|| bump(3));
        let policy = ValuePolicy::<u32>::ordered();
        let mut heap = Heap::with_hooks(1, HeapOrder::Min, &policy, &hooks).unwrap();

        heap.insert(1).unwrap();
        let _ = heap.insert(2);
        heap.peek();
        heap.remove();
        heap.remove();
        heap.peek();

        assert_eq!(fired.get(), [1, 1, 0, 1]);
    }

    #[test]
    fn debug() {
        let policy = ValuePolicy::<u32>::ordered().with_render(|v| v.to_string());
        let mut heap = Heap::with_capacity(4, HeapOrder::Min, &policy).unwrap();
        heap.insert(2).unwrap();
        heap.insert(1).unwrap();
        assert_eq!(
            format!("{heap:?}"),
            "Heap { count: 2, capacity: 4, order: Min, flag: Ok, values: [1, 2] }"
        );
    }
}
