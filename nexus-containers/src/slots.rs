//! Fixed slot buffers for the bounded containers.
//!
//! A slot buffer is a single boxed slice of `Option<V>`, allocated once at
//! construction and never resized. Vacated slots are reset to `None`, so a
//! value is dropped (or destroyed) exactly once.

use std::alloc::Layout;

use crate::CollectionError;

/// A boxed slice of value slots.
pub(crate) type Slots<V> = Box<[Option<V>]>;

/// Validates `capacity` for a buffer of `T`.
///
/// Rejects zero, and any capacity whose byte size does not fit in `isize`.
pub(crate) fn check_capacity<T>(capacity: usize) -> Result<usize, CollectionError> {
    if capacity == 0 {
        return Err(CollectionError::ZeroCapacity);
    }
    Layout::array::<T>(capacity).map_err(|_| CollectionError::CapacityOverflow { capacity })?;
    Ok(capacity)
}

/// Allocates `capacity` empty slots.
///
/// Allocation failure is reported instead of aborting.
pub(crate) fn allocate<V>(capacity: usize) -> Result<Slots<V>, CollectionError> {
    let capacity = check_capacity::<Option<V>>(capacity)?;

    let mut slots: Vec<Option<V>> = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| CollectionError::AllocationFailed)?;
    slots.resize_with(capacity, || None);

    Ok(slots.into_boxed_slice())
}

/// Empties every slot, handing each live value to `dispose`.
pub(crate) fn drain_into<V>(slots: &mut [Option<V>], mut dispose: impl FnMut(V)) {
    for slot in slots.iter_mut() {
        if let Some(value) = slot.take() {
            dispose(value);
        }
    }
}
