//! Allocation-disciplined containers over caller-described values.
//!
//! Five containers share one model: the caller describes how to handle a
//! value once, in a [`ValuePolicy`], and every container borrows that policy
//! instead of requiring trait bounds on `V`.
//!
//! # Design
//!
//! Two storage disciplines sit side by side:
//!
//! ```text
//! Fixed capacity (allocated once, never grows)
//!     Stack  - LIFO
//!     Queue  - FIFO over a ring
//!     Deque  - both ends over a ring
//!     Heap   - binary heap, min or max
//!
//! Growable (reallocates on demand)
//!     SortedList - appends, sorts lazily when order is needed
//! ```
//!
//! Running out of room in a fixed container is a reportable condition, not a
//! resize trigger: inserts return `Err(Full(value))` and hand the value back.
//!
//! # Outcome Reporting
//!
//! Every operation reports failure through its return value **and** records
//! the outcome of the most recent operation as a [`Flag`]:
//!
//! | Flag    | Meaning                                              |
//! |---------|------------------------------------------------------|
//! | `Ok`    | last operation succeeded                             |
//! | `Full`  | insert into a fixed container at capacity            |
//! | `Empty` | read or removal on an empty container                |
//! | `Error` | invalid argument, out-of-range index, allocation     |
//!
//! Guards run before any mutation, so a failed operation never leaves a
//! container half-updated.
//!
//! # Quick Start
//!
//! ```
//! use nexus_containers::{Flag, Heap, HeapOrder, ValuePolicy};
//!
//! let policy = ValuePolicy::<u64>::ordered();
//! let mut heap = Heap::with_capacity(3, HeapOrder::Max, &policy).unwrap();
//!
//! heap.insert(10).unwrap();
//! heap.insert(30).unwrap();
//! heap.insert(20).unwrap();
//! assert!(heap.insert(40).is_err());
//! assert_eq!(heap.flag(), Flag::Full);
//!
//! assert_eq!(heap.remove(), Some(30));
//! assert_eq!(heap.peek(), Some(&20));
//! ```
//!
//! # Hooks
//!
//! [`CallbackHooks`] attach optional notifications (create, read, update,
//! delete) fired after successful operations. They are borrowed like the
//! policy and can be swapped later with `customize`.
//!
//! # Threading
//!
//! Containers are single-threaded. The last-operation flag lives in a `Cell`,
//! so no container is `Sync`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod deque;
pub mod error;
pub mod heap;
pub mod hooks;
pub mod policy;
pub mod queue;
pub mod ring;
pub mod sorted_list;
pub mod stack;

mod slots;

pub use deque::Deque;
pub use error::{CollectionError, Flag, Full, Rejected};
pub use heap::{Heap, HeapOrder};
pub use hooks::{CallbackHooks, Hook};
pub use policy::{CompareFn, DestroyFn, DuplicateFn, HashFn, PriorityFn, RenderFn, ValuePolicy};
pub use queue::Queue;
pub use sorted_list::{SortedList, SortedListBuilder};
pub use stack::Stack;
