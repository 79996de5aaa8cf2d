//! Value policies: the operations a container needs to handle an opaque `V`.
//!
//! A [`ValuePolicy`] is built once by the caller and borrowed by every
//! container that uses it. Only `compare` is mandatory; constructors reject a
//! policy without one. The remaining operations are optional and fall back to
//! plain Rust semantics when absent:
//!
//! | Operation   | When absent                                  |
//! |-------------|----------------------------------------------|
//! | `duplicate` | `copy_of` fails; `copy_of_cloned` uses Clone |
//! | `render`    | elements omitted from `Debug` output         |
//! | `destroy`   | values are dropped normally                  |
//! | `hash`      | unused by these containers                   |
//! | `priority`  | unused by these containers                   |
//!
//! # Example
//!
//! ```
//! use nexus_containers::{Stack, ValuePolicy};
//!
//! let policy = ValuePolicy::<u64>::ordered().with_render(|v| v.to_string());
//!
//! let mut stack = Stack::with_capacity(4, &policy).unwrap();
//! stack.push(7).unwrap();
//! assert_eq!(format!("{stack:?}"), "Stack { count: 1, capacity: 4, flag: Ok, values: [7] }");
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::CollectionError;

/// Three-way comparison of two values.
pub type CompareFn<V> = fn(&V, &V) -> Ordering;
/// Deep copy of a value.
pub type DuplicateFn<V> = fn(&V) -> V;
/// Textual rendering of a value.
pub type RenderFn<V> = fn(&V) -> String;
/// Per-element cleanup run when a container discards a live value.
pub type DestroyFn<V> = fn(V);
/// Hash of a value, consumed by hash-based collaborators.
pub type HashFn<V> = fn(&V) -> u64;
/// Priority comparison, consumed by priority-aware collaborators.
pub type PriorityFn<V> = fn(&V, &V) -> Ordering;

/// The set of value operations shared by every container.
pub struct ValuePolicy<V> {
    compare: Option<CompareFn<V>>,
    duplicate: Option<DuplicateFn<V>>,
    render: Option<RenderFn<V>>,
    destroy: Option<DestroyFn<V>>,
    hash: Option<HashFn<V>>,
    priority: Option<PriorityFn<V>>,
}

impl<V> ValuePolicy<V> {
    /// Creates a policy with the given compare function and nothing else.
    pub const fn new(compare: CompareFn<V>) -> Self {
        Self {
            compare: Some(compare),
            duplicate: None,
            render: None,
            destroy: None,
            hash: None,
            priority: None,
        }
    }

    /// Creates a policy whose compare function is `Ord::cmp`.
    pub fn ordered() -> Self
    where
        V: Ord,
    {
        Self::new(V::cmp)
    }

    /// Sets the compare function.
    #[must_use]
    pub const fn with_compare(mut self, compare: CompareFn<V>) -> Self {
        self.compare = Some(compare);
        self
    }

    /// Sets the duplicate function used by `copy_of`.
    #[must_use]
    pub const fn with_duplicate(mut self, duplicate: DuplicateFn<V>) -> Self {
        self.duplicate = Some(duplicate);
        self
    }

    /// Uses `Clone::clone` as the duplicate function.
    #[must_use]
    pub fn cloning(self) -> Self
    where
        V: Clone,
    {
        self.with_duplicate(V::clone)
    }

    /// Sets the render function.
    #[must_use]
    pub const fn with_render(mut self, render: RenderFn<V>) -> Self {
        self.render = Some(render);
        self
    }

    /// Sets the destroy function.
    #[must_use]
    pub const fn with_destroy(mut self, destroy: DestroyFn<V>) -> Self {
        self.destroy = Some(destroy);
        self
    }

    /// Sets the hash function.
    #[must_use]
    pub const fn with_hash(mut self, hash: HashFn<V>) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Sets the priority function.
    #[must_use]
    pub const fn with_priority(mut self, priority: PriorityFn<V>) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns the compare function, or an error if none was supplied.
    ///
    /// Constructors call this once and keep the resolved function.
    pub fn comparator(&self) -> Result<CompareFn<V>, CollectionError> {
        self.compare.ok_or(CollectionError::MissingCompare)
    }

    /// Returns the duplicate function, or an error if none was supplied.
    pub fn duplicator(&self) -> Result<DuplicateFn<V>, CollectionError> {
        self.duplicate.ok_or(CollectionError::MissingDuplicate)
    }

    /// Returns `true` if a duplicate function is set.
    #[inline]
    pub const fn has_duplicate(&self) -> bool {
        self.duplicate.is_some()
    }

    /// Returns `true` if a destroy function is set.
    #[inline]
    pub const fn has_destroy(&self) -> bool {
        self.destroy.is_some()
    }

    /// Copies a value with `duplicate`, or `Clone` when none is set.
    pub fn duplicate(&self, value: &V) -> V
    where
        V: Clone,
    {
        match self.duplicate {
            Some(duplicate) => duplicate(value),
            None => value.clone(),
        }
    }

    /// Renders a value, if a render function is set.
    pub fn render(&self, value: &V) -> Option<String> {
        self.render.map(|render| render(value))
    }

    /// Disposes of a value the container no longer holds.
    ///
    /// Runs `destroy` when set, otherwise drops the value.
    pub fn destroy(&self, value: V) {
        if let Some(destroy) = self.destroy {
            destroy(value);
        }
    }

    /// Hashes a value, if a hash function is set.
    pub fn hash_of(&self, value: &V) -> Option<u64> {
        self.hash.map(|hash| hash(value))
    }

    /// Compares two values by priority, if a priority function is set.
    pub fn priority_cmp(&self, a: &V, b: &V) -> Option<Ordering> {
        self.priority.map(|priority| priority(a, b))
    }

    /// Writes `values` as a debug list when a render function is set.
    pub(crate) fn debug_values<'v, I>(&self, values: I) -> Option<RenderedValues>
    where
        I: IntoIterator<Item = &'v V>,
        V: 'v,
    {
        let render = self.render?;
        Some(RenderedValues(values.into_iter().map(render).collect()))
    }
}

impl<V> Default for ValuePolicy<V> {
    /// A policy with no operations at all. Constructors reject it until a
    /// compare function is added with [`with_compare`](Self::with_compare).
    fn default() -> Self {
        Self {
            compare: None,
            duplicate: None,
            render: None,
            destroy: None,
            hash: None,
            priority: None,
        }
    }
}

impl<V> fmt::Debug for ValuePolicy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuePolicy")
            .field("compare", &self.compare.is_some())
            .field("duplicate", &self.duplicate.is_some())
            .field("render", &self.render.is_some())
            .field("destroy", &self.destroy.is_some())
            .field("hash", &self.hash.is_some())
            .field("priority", &self.priority.is_some())
            .finish()
    }
}

/// Rendered element list used by container `Debug` impls.
pub(crate) struct RenderedValues(Vec<String>);

impl fmt::Debug for RenderedValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|s| DisplayStr(s.as_str())))
            .finish()
    }
}

struct DisplayStr<'s>(&'s str);

impl fmt::Debug for DisplayStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_compare() {
        let policy: ValuePolicy<u32> = ValuePolicy::default();
        assert_eq!(policy.comparator(), Err(CollectionError::MissingCompare));

        let policy = policy.with_compare(u32::cmp);
        assert!(policy.comparator().is_ok());
    }

    #[test]
    fn duplicate_falls_back_to_clone() {
        let policy = ValuePolicy::<String>::ordered();
        assert!(!policy.has_duplicate());
        assert_eq!(policy.duplicate(&"abc".to_string()), "abc");

        let policy = policy.with_duplicate(|s| s.to_uppercase());
        assert_eq!(policy.duplicate(&"abc".to_string()), "ABC");
    }

    #[test]
    fn duplicator_requires_a_function() {
        struct Handle(u32);

        let policy = ValuePolicy::<Handle>::new(|a, b| a.0.cmp(&b.0));
        assert!(matches!(
            policy.duplicator(),
            Err(CollectionError::MissingDuplicate)
        ));

        let policy = policy.with_duplicate(|h| Handle(h.0 + 1));
        let duplicate = policy.duplicator().unwrap();
        assert_eq!(duplicate(&Handle(1)).0, 2);
    }

    #[test]
    fn optional_operations() {
        let policy = ValuePolicy::<u64>::ordered();
        assert_eq!(policy.render(&1), None);
        assert_eq!(policy.hash_of(&1), None);
        assert_eq!(policy.priority_cmp(&1, &2), None);

        let policy = policy
            .with_render(|v| format!("<{v}>"))
            .with_hash(|v| v.wrapping_mul(31))
            .with_priority(|a, b| b.cmp(a));
        assert_eq!(policy.render(&1).as_deref(), Some("<1>"));
        assert_eq!(policy.hash_of(&2), Some(62));
        assert_eq!(policy.priority_cmp(&1, &2), Some(Ordering::Greater));
    }

    #[test]
    fn debug_lists_capabilities() {
        let policy = ValuePolicy::<u8>::ordered().cloning();
        let text = format!("{policy:?}");
        assert!(text.contains("compare: true"));
        assert!(text.contains("duplicate: true"));
        assert!(text.contains("destroy: false"));
    }
}
