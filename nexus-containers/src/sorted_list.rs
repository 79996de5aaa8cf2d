//! Growable list kept in sorted order lazily.
//!
//! Inserts append and mark the list unsorted. Any operation that needs order
//! (`index_of`, `get`, `min`, `max`, `range`, `contains`, `remove`) sorts
//! first, so a burst of inserts costs one sort rather than one per insert.
//!
//! # Duplicates
//!
//! [`index_of`](SortedList::index_of) picks between the leftmost and
//! rightmost of a run of equal elements:
//!
//! ```
//! use nexus_containers::{SortedList, ValuePolicy};
//!
//! let policy = ValuePolicy::<u32>::ordered();
//! let mut list = SortedList::with_capacity(4, &policy).unwrap();
//!
//! for v in [3, 1, 2, 1, 3, 2] {
//!     list.insert(v).unwrap();
//! }
//! // sorted: 1 1 2 2 3 3
//! assert_eq!(list.index_of(&2, true), 2);
//! assert_eq!(list.index_of(&2, false), 3);
//! assert_eq!(list.index_of(&7, true), list.count()); // not found
//! ```
//!
//! # Growth
//!
//! When an insert finds the list at capacity, capacity is multiplied by the
//! growth factor (2 unless configured through [`SortedListBuilder`]).

use core::cmp::Ordering;
use core::fmt;

use crate::hooks::{CallbackHooks, Hook, Status};
use crate::policy::{CompareFn, ValuePolicy};
use crate::slots;
use crate::{CollectionError, Flag, Rejected};

const DEFAULT_CAPACITY: usize = 32;
const DEFAULT_GROWTH_FACTOR: usize = 2;

// =============================================================================
// Builder
// =============================================================================

/// Configures a [`SortedList`].
///
/// ```
/// use nexus_containers::{SortedListBuilder, ValuePolicy};
///
/// let policy = ValuePolicy::<i32>::ordered();
/// let list = SortedListBuilder::new()
///     .initial_capacity(100)
///     .growth_factor(4)
///     .build(&policy)
///     .unwrap();
///
/// assert_eq!(list.capacity(), 100);
/// assert_eq!(list.growth_factor(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SortedListBuilder<'a> {
    initial_capacity: usize,
    growth_factor: usize,
    hooks: Option<&'a CallbackHooks<'a>>,
}

impl Default for SortedListBuilder<'_> {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            hooks: None,
        }
    }
}

impl<'a> SortedListBuilder<'a> {
    /// Creates a builder with capacity 32 and growth factor 2.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity. Must be non-zero.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the growth multiplier. Values below 2 are raised to 2.
    #[must_use]
    pub fn growth_factor(mut self, factor: usize) -> Self {
        self.growth_factor = factor.max(DEFAULT_GROWTH_FACTOR);
        self
    }

    /// Attaches hooks.
    #[must_use]
    pub fn hooks(mut self, hooks: &'a CallbackHooks<'a>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Builds the list.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::MissingCompare`] if the policy has no compare
    /// - [`CollectionError::ZeroCapacity`] if the initial capacity is 0
    /// - [`CollectionError::CapacityOverflow`] if the buffer size overflows
    /// - [`CollectionError::AllocationFailed`] if the buffer cannot be allocated
    pub fn build<V>(
        self,
        policy: &'a ValuePolicy<V>,
    ) -> Result<SortedList<'a, V>, CollectionError> {
        let capacity = self.initial_capacity;
        let (compare, buffer) = policy
            .comparator()
            .and_then(|compare| Ok((compare, reserve::<V>(capacity)?)))
            .inspect_err(|err| {
                tracing::debug!(capacity, error = %err, "sorted list construction rejected");
            })?;

        Ok(SortedList {
            buffer,
            capacity,
            growth_factor: self.growth_factor,
            sorted: true,
            compare,
            policy,
            status: Status::new(self.hooks),
        })
    }
}

/// Allocates an empty buffer with room for exactly `capacity` elements.
fn reserve<V>(capacity: usize) -> Result<Vec<V>, CollectionError> {
    let capacity = slots::check_capacity::<V>(capacity)?;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| CollectionError::AllocationFailed)?;
    Ok(buffer)
}

// =============================================================================
// SortedList
// =============================================================================

/// A growable list sorted on demand.
pub struct SortedList<'a, V> {
    buffer: Vec<V>,
    capacity: usize,
    growth_factor: usize,
    sorted: bool,
    compare: CompareFn<V>,
    policy: &'a ValuePolicy<V>,
    status: Status<'a>,
}

impl<'a, V> SortedList<'a, V> {
    /// Creates an empty list with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// See [`SortedListBuilder::build`].
    pub fn with_capacity(
        capacity: usize,
        policy: &'a ValuePolicy<V>,
    ) -> Result<Self, CollectionError> {
        SortedListBuilder::new().initial_capacity(capacity).build(policy)
    }

    /// Like [`with_capacity`](Self::with_capacity), with hooks attached.
    pub fn with_hooks(
        capacity: usize,
        policy: &'a ValuePolicy<V>,
        hooks: &'a CallbackHooks<'a>,
    ) -> Result<Self, CollectionError> {
        SortedListBuilder::new()
            .initial_capacity(capacity)
            .hooks(hooks)
            .build(policy)
    }

    /// Replaces the hook set. Passing `None` detaches all hooks.
    pub fn customize(&mut self, hooks: Option<&'a CallbackHooks<'a>>) {
        self.status.customize(hooks);
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends a value and marks the list unsorted, growing if at capacity.
    ///
    /// # Errors
    ///
    /// Returns the value in [`Rejected`] with
    /// [`CollectionError::CapacityOverflow`] or
    /// [`CollectionError::AllocationFailed`] if growth fails. The list is
    /// unchanged in that case.
    pub fn insert(&mut self, value: V) -> Result<(), Rejected<V>> {
        if self.is_full() {
            if let Err(err) = self.grow() {
                tracing::trace!(
                    capacity = self.capacity,
                    error = %err,
                    "sorted list insert rejected"
                );
                let error = self.status.reject(err);
                return Err(Rejected { error, value });
            }
        }

        self.buffer.push(value);
        self.sorted = self.buffer.len() == 1;

        self.status.done(Hook::Create);
        Ok(())
    }

    /// Removes and returns the element at `index` of the sorted order.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::Empty`] if the list is empty
    /// - [`CollectionError::OutOfRange`] if `index >= count`
    pub fn remove(&mut self, index: usize) -> Result<V, CollectionError> {
        self.check_index(index).map_err(|err| self.status.reject(err))?;

        self.ensure_sorted();
        let value = self.buffer.remove(index);

        self.status.done(Hook::Delete);
        Ok(value)
    }

    /// Sorts the list if it is not already sorted.
    ///
    /// Fires the update hook when elements were actually sorted.
    pub fn sort(&mut self) {
        if self.ensure_sorted() {
            self.status.done(Hook::Update);
        } else {
            self.status.ok();
        }
    }

    /// Changes the capacity.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::CapacityBelowCount`] if `capacity < count`
    /// - [`CollectionError::ZeroCapacity`] if `capacity` is 0
    /// - [`CollectionError::CapacityOverflow`] or
    ///   [`CollectionError::AllocationFailed`] if growing fails
    pub fn resize(&mut self, capacity: usize) -> Result<(), CollectionError> {
        self.set_capacity(capacity).map_err(|err| self.status.reject(err))?;
        self.status.ok();
        Ok(())
    }

    /// Destroys every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        let policy = self.policy;
        self.buffer.drain(..).for_each(|v| policy.destroy(v));
        self.sorted = true;
        self.status.ok();
    }

    // =========================================================================
    // Ordered queries
    // =========================================================================

    /// Returns the position of `value` in sorted order.
    ///
    /// With `leftmost`, returns the first of a run of equal elements;
    /// otherwise the last. Returns [`count`](Self::count) if no element
    /// compares equal.
    pub fn index_of(&mut self, value: &V, leftmost: bool) -> usize {
        self.ensure_sorted();
        let compare = self.compare;
        let count = self.buffer.len();

        let lower = self
            .buffer
            .partition_point(|v| compare(v, value) == Ordering::Less);
        let found = self
            .buffer
            .get(lower)
            .is_some_and(|v| compare(v, value) == Ordering::Equal);

        let index = match (found, leftmost) {
            (false, _) => count,
            (true, true) => lower,
            (true, false) => {
                let run = self.buffer[lower..]
                    .partition_point(|v| compare(v, value) == Ordering::Equal);
                lower + run - 1
            }
        };

        self.status.done(Hook::Read);
        index
    }

    /// Returns `true` if any element compares equal to `value`.
    pub fn contains(&mut self, value: &V) -> bool {
        self.ensure_sorted();
        let compare = self.compare;
        let found = self.buffer.binary_search_by(|v| compare(v, value)).is_ok();

        self.status.done(Hook::Read);
        found
    }

    /// Returns the element at `index` of the sorted order.
    ///
    /// Records [`Flag::Empty`] on an empty list and [`Flag::Error`] when
    /// `index >= count`.
    pub fn get(&mut self, index: usize) -> Option<&V> {
        if let Err(err) = self.check_index(index) {
            self.status.reject(err);
            return None;
        }

        self.ensure_sorted();
        self.status.done(Hook::Read);
        self.buffer.get(index)
    }

    /// Returns the smallest element.
    pub fn min(&mut self) -> Option<&V> {
        self.get_end(|buffer| buffer.first())
    }

    /// Returns the largest element.
    pub fn max(&mut self) -> Option<&V> {
        self.get_end(|buffer| buffer.last())
    }

    /// Returns the sorted run of elements `v` with `lo <= v <= hi`.
    ///
    /// An inverted range yields an empty slice.
    pub fn range(&mut self, lo: &V, hi: &V) -> &[V] {
        self.ensure_sorted();
        let compare = self.compare;

        let start = self
            .buffer
            .partition_point(|v| compare(v, lo) == Ordering::Less);
        let end = self
            .buffer
            .partition_point(|v| compare(v, hi) != Ordering::Greater)
            .max(start);

        self.status.done(Hook::Read);
        &self.buffer[start..end]
    }

    /// Iterates in sorted order.
    pub fn iter(&mut self) -> core::slice::Iter<'_, V> {
        self.ensure_sorted();
        self.buffer.iter()
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.buffer.len()
    }

    /// Current capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth multiplier applied when an insert finds the list full.
    #[inline]
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns `true` if the next insert will grow the buffer.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.capacity
    }

    /// Returns `true` if no insert happened since the last sort.
    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Outcome of the most recent operation.
    #[inline]
    pub fn flag(&self) -> Flag {
        self.status.flag()
    }

    /// Returns a copy with the same capacity, growth factor, policy and hooks.
    ///
    /// The copy keeps the source's element order and sortedness. Elements are
    /// copied with the policy's `duplicate`.
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
        let mut buffer = reserve::<V>(self.capacity).map_err(|err| self.status.reject(err))?;
        buffer.extend(self.buffer.iter().map(duplicate));

        self.status.ok();
        Ok(Self {
            buffer,
            capacity: self.capacity,
            growth_factor: self.growth_factor,
            sorted: self.sorted,
            compare: self.compare,
            policy: self.policy,
            status: Status::new(self.status.hooks()),
        })
    }

    /// Sorts both lists and compares them element-wise.
    ///
    /// Records [`Flag::Ok`] on both.
    pub fn equals(&mut self, other: &mut Self) -> bool {
        self.ensure_sorted();
        other.ensure_sorted();
        self.status.ok();
        other.status.ok();

        let compare = self.compare;
        self.buffer.len() == other.buffer.len()
            && self
                .buffer
                .iter()
                .zip(&other.buffer)
                .all(|(a, b)| compare(a, b) == Ordering::Equal)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Sorts if needed. Returns `true` if a sort ran.
    fn ensure_sorted(&mut self) -> bool {
        if self.sorted {
            return false;
        }
        tracing::trace!(count = self.buffer.len(), "sorted list: deferred sort");
        self.buffer.sort_by(self.compare);
        self.sorted = true;
        true
    }

    fn check_index(&self, index: usize) -> Result<(), CollectionError> {
        let count = self.buffer.len();
        if count == 0 {
            return Err(CollectionError::Empty);
        }
        if index >= count {
            tracing::trace!(index, count, "sorted list index out of range");
            return Err(CollectionError::OutOfRange { index, count });
        }
        Ok(())
    }

    fn get_end(&mut self, pick: impl FnOnce(&[V]) -> Option<&V>) -> Option<&V> {
        if self.buffer.is_empty() {
            self.status.fail(Flag::Empty);
            return None;
        }
        self.ensure_sorted();
        self.status.done(Hook::Read);
        pick(self.buffer.as_slice())
    }

    fn grow(&mut self) -> Result<(), CollectionError> {
        let target = self
            .capacity
            .checked_mul(self.growth_factor)
            .ok_or(CollectionError::CapacityOverflow {
                capacity: self.capacity,
            })?;
        self.set_capacity(target)
    }

    fn set_capacity(&mut self, capacity: usize) -> Result<(), CollectionError> {
        let count = self.buffer.len();
        if capacity < count {
            return Err(CollectionError::CapacityBelowCount { capacity, count });
        }
        let capacity = slots::check_capacity::<V>(capacity)?;

        if capacity > self.buffer.capacity() {
            self.buffer
                .try_reserve_exact(capacity - count)
                .map_err(|_| CollectionError::AllocationFailed)?;
        } else {
            self.buffer.shrink_to(capacity);
        }

        tracing::debug!(from = self.capacity, to = capacity, count, "sorted list resized");
        self.capacity = capacity;
        Ok(())
    }
}

impl<V> Drop for SortedList<'_, V> {
    fn drop(&mut self) {
        if self.policy.has_destroy() {
            let policy = self.policy;
            self.buffer.drain(..).for_each(|v| policy.destroy(v));
        }
    }
}

impl<V> fmt::Debug for SortedList<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("SortedList");
        s.field("count", &self.count())
            .field("capacity", &self.capacity)
            .field("sorted", &self.sorted)
            .field("flag", &self.flag());
        match self.policy.debug_values(&self.buffer) {
            Some(values) => s.field("values", &values).finish(),
            None => s.finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn sorted(list: &mut SortedList<'_, usize>) -> Vec<usize> {
        list.iter().copied().collect()
    }

    #[test]
    fn tie_break_scenario() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(1, &policy).unwrap();

        for i in 0..20 {
            list.insert(i % 10).unwrap();
        }
        assert!(!list.is_sorted());

        let expected: Vec<usize> = (0..10).flat_map(|v| [v, v]).collect();
        assert_eq!(sorted(&mut list), expected);

        assert_eq!(list.index_of(&2, true), 4);
        assert_eq!(list.index_of(&2, false), 5);
        assert_eq!(list.index_of(&0, true), 0);
        assert_eq!(list.index_of(&0, false), 1);

        assert_eq!(list.remove(0), Ok(0));
        assert_eq!(list.index_of(&0, true), 0);
        assert_eq!(list.index_of(&0, false), 0);

        assert_eq!(list.remove(0), Ok(0));
        let count = list.count();
        assert_eq!(count, 18);
        assert_eq!(list.index_of(&0, true), count);
        assert_eq!(list.index_of(&0, false), count);
    }

    #[test]
    fn rejects_bad_capacity() {
        let policy = ValuePolicy::<usize>::ordered();
        assert_eq!(
            SortedList::with_capacity(0, &policy).unwrap_err(),
            CollectionError::ZeroCapacity
        );
        assert_eq!(
            SortedList::with_capacity(usize::MAX, &policy).unwrap_err(),
            CollectionError::CapacityOverflow {
                capacity: usize::MAX
            }
        );
    }

    #[test]
    fn grows_by_factor() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(1, &policy).unwrap();

        for i in (0..50).rev() {
            list.insert(i).unwrap();
        }
        assert_eq!(list.count(), 50);
        assert_eq!(list.capacity(), 64);
        assert_eq!(sorted(&mut list), (0..50).collect::<Vec<_>>());

        let mut list = SortedListBuilder::new()
            .initial_capacity(2)
            .growth_factor(3)
            .build(&policy)
            .unwrap();
        for i in 0..3 {
            list.insert(i).unwrap();
        }
        assert_eq!(list.capacity(), 6);
    }

    #[test]
    fn growth_factor_floor() {
        let policy = ValuePolicy::<usize>::ordered();
        let list = SortedListBuilder::new().growth_factor(1).build(&policy).unwrap();
        assert_eq!(list.growth_factor(), 2);
        assert_eq!(list.capacity(), 32);
    }

    #[test]
    fn failed_growth_hands_value_back() {
        let policy = ValuePolicy::<u64>::ordered();
        let mut list = SortedListBuilder::new()
            .initial_capacity(1)
            .growth_factor(usize::MAX)
            .build(&policy)
            .unwrap();
        list.insert(1).unwrap();

        let err = list.insert(2).unwrap_err();
        assert_eq!(
            err.error,
            CollectionError::CapacityOverflow { capacity: usize::MAX }
        );
        assert_eq!(err.into_inner(), 2);
        assert_eq!(list.flag(), Flag::Error);
        assert_eq!(list.count(), 1);
        assert_eq!(list.capacity(), 1);

        assert!(list.insert(3).is_err());
        assert_eq!(list.get(0), Some(&1));
        assert_eq!(list.flag(), Flag::Ok);
    }

    #[test]
    fn remove_guards() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(4, &policy).unwrap();

        assert_eq!(list.remove(0), Err(CollectionError::Empty));
        assert_eq!(list.flag(), Flag::Empty);

        list.insert(32).unwrap();
        assert_eq!(
            list.remove(2),
            Err(CollectionError::OutOfRange { index: 2, count: 1 })
        );
        assert_eq!(list.flag(), Flag::Error);
        assert_eq!(list.count(), 1);

        assert_eq!(list.remove(0), Ok(32));
        assert_eq!(list.flag(), Flag::Ok);
    }

    #[test]
    fn min_max_get() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(8, &policy).unwrap();

        assert_eq!(list.min(), None);
        assert_eq!(list.flag(), Flag::Empty);

        for v in [7, 3, 9, 1] {
            list.insert(v).unwrap();
        }
        assert_eq!(list.min(), Some(&1));
        assert_eq!(list.max(), Some(&9));
        assert_eq!(list.get(1), Some(&3));
        assert_eq!(list.get(4), None);
        assert_eq!(list.flag(), Flag::Error);
    }

    #[test]
    fn range_is_inclusive() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(8, &policy).unwrap();
        for v in [5, 1, 3, 3, 8, 2] {
            list.insert(v).unwrap();
        }
        assert_eq!(list.range(&2, &5), &[2, 3, 3, 5]);
        assert_eq!(list.range(&4, &4), &[] as &[usize]);
        assert_eq!(list.range(&6, &2), &[] as &[usize]);
        assert_eq!(list.range(&0, &100).len(), 6);
    }

    #[test]
    fn contains_after_insert() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(2, &policy).unwrap();
        list.insert(10).unwrap();
        list.insert(4).unwrap();
        assert!(list.contains(&4));
        assert!(list.is_sorted());
        assert!(!list.contains(&5));
    }

    #[test]
    fn resize() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(4, &policy).unwrap();
        for v in 0..3 {
            list.insert(v).unwrap();
        }

        assert_eq!(
            list.resize(2),
            Err(CollectionError::CapacityBelowCount {
                capacity: 2,
                count: 3
            })
        );
        assert_eq!(list.flag(), Flag::Error);
        assert_eq!(list.capacity(), 4);

        list.resize(100).unwrap();
        assert_eq!(list.capacity(), 100);
        list.resize(3).unwrap();
        assert_eq!(list.capacity(), 3);
        assert!(list.is_full());
        assert_eq!(sorted(&mut list), vec![0, 1, 2]);
    }

    #[test]
    fn clear_keeps_capacity() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_capacity(100, &policy).unwrap();
        for i in 0..50 {
            list.insert(i).unwrap();
        }
        list.clear();
        assert_eq!(list.count(), 0);
        assert_eq!(list.capacity(), 100);
        assert!(list.is_sorted());
    }

    #[test]
    fn copy_and_equals() {
        let policy = ValuePolicy::<String>::ordered().with_duplicate(|s| s.clone());
        let mut list = SortedList::with_capacity(4, &policy).unwrap();
        for s in ["pear", "apple", "fig"] {
            list.insert(s.to_string()).unwrap();
        }

        let mut copy = list.copy_of().unwrap();
        assert!(!copy.is_sorted());
        assert!(list.equals(&mut copy));

        copy.insert("kiwi".to_string()).unwrap();
        assert!(!list.equals(&mut copy));
        assert_eq!(list.count(), 3);
    }

    #[test]
    fn equals_ignores_insertion_order() {
        let policy = ValuePolicy::<usize>::ordered();
        let mut a = SortedList::with_capacity(4, &policy).unwrap();
        let mut b = SortedList::with_capacity(16, &policy).unwrap();
        for v in [3, 1, 2] {
            a.insert(v).unwrap();
        }
        for v in [2, 3, 1] {
            b.insert(v).unwrap();
        }
        assert!(a.equals(&mut b));
    }

    #[test]
    fn update_hook_fires_on_real_sort() {
        let updates = Cell::new(0);
        let reads = Cell::new(0);
        let hooks = CallbackHooks::new()
            .on_update(|| updates.set(updates.get() + 1))
            .on_read(|| reads.set(reads.get() + 1));
        let policy = ValuePolicy::<usize>::ordered();
        let mut list = SortedList::with_hooks(4, &policy, &hooks).unwrap();

        list.insert(2).unwrap();
        list.sort();
        assert_eq!(updates.get(), 0);

        list.insert(1).unwrap();
        list.sort();
        list.sort();
        assert_eq!(updates.get(), 1);

        list.index_of(&1, true);
        assert_eq!(reads.get(), 1);

        // Guarded failures fire nothing.
        list.get(10);
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn debug() {
        let policy = ValuePolicy::<usize>::ordered().with_render(|v| v.to_string());
        let mut list = SortedList::with_capacity(4, &policy).unwrap();
        list.insert(2).unwrap();
        list.insert(1).unwrap();
        assert_eq!(
            format!("{list:?}"),
            "SortedList { count: 2, capacity: 4, sorted: false, flag: Ok, values: [2, 1] }"
        );
        list.sort();
        assert_eq!(
            format!("{list:?}"),
            "SortedList { count: 2, capacity: 4, sorted: true, flag: Ok, values: [1, 2] }"
        );
    }
}
