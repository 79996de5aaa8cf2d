//! Lifecycle hooks and last-operation bookkeeping.
//!
//! [`CallbackHooks`] is a caller-owned set of up to four notifications. A
//! container borrows it and fires the matching hook after an operation has
//! completed successfully. Hooks never fire on a guarded failure and never
//! more than once per operation.
//!
//! ```
//! use std::cell::Cell;
//! use nexus_containers::{CallbackHooks, Queue, ValuePolicy};
//!
//! let created = Cell::new(0);
//! let hooks = CallbackHooks::new().on_create(|| created.set(created.get() + 1));
//! let policy = ValuePolicy::<u32>::ordered();
//!
//! let mut queue = Queue::with_hooks(2, &policy, &hooks).unwrap();
//! queue.enqueue(1).unwrap();
//! queue.enqueue(2).unwrap();
//! assert!(queue.enqueue(3).is_err());
//!
//! // The rejected enqueue did not fire.
//! assert_eq!(created.get(), 2);
//! ```

use core::cell::Cell;
use core::fmt;

use crate::{CollectionError, Flag};

type HookFn<'h> = Box<dyn Fn() + 'h>;

/// Which hook an operation fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    /// An element was inserted.
    Create,
    /// An element was read.
    Read,
    /// Stored elements were rearranged in place.
    Update,
    /// An element was removed.
    Delete,
}

/// Optional notifications fired after successful container operations.
#[derive(Default)]
pub struct CallbackHooks<'h> {
    create: Option<HookFn<'h>>,
    read: Option<HookFn<'h>>,
    update: Option<HookFn<'h>>,
    delete: Option<HookFn<'h>>,
}

impl<'h> CallbackHooks<'h> {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hook fired after a successful insert.
    #[must_use]
    pub fn on_create(mut self, f: impl Fn() + 'h) -> Self {
        self.create = Some(Box::new(f));
        self
    }

    /// Sets the hook fired after a successful read.
    #[must_use]
    pub fn on_read(mut self, f: impl Fn() + 'h) -> Self {
        self.read = Some(Box::new(f));
        self
    }

    /// Sets the hook fired after elements are rearranged in place.
    #[must_use]
    pub fn on_update(mut self, f: impl Fn() + 'h) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    /// Sets the hook fired after a successful removal.
    #[must_use]
    pub fn on_delete(mut self, f: impl Fn() + 'h) -> Self {
        self.delete = Some(Box::new(f));
        self
    }

    /// Invokes the hook for `hook`, if one is set.
    pub fn fire(&self, hook: Hook) {
        let f = match hook {
            Hook::Create => &self.create,
            Hook::Read => &self.read,
            Hook::Update => &self.update,
            Hook::Delete => &self.delete,
        };
        if let Some(f) = f {
            f();
        }
    }
}

impl fmt::Debug for CallbackHooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHooks")
            .field("create", &self.create.is_some())
            .field("read", &self.read.is_some())
            .field("update", &self.update.is_some())
            .field("delete", &self.delete.is_some())
            .finish()
    }
}

// =============================================================================
// Status - flag + hooks, shared by every container
// =============================================================================

/// Last-operation flag plus the borrowed hook set.
///
/// The flag lives in a `Cell` so read-only operations (`peek`, `contains`,
/// `equals`) can record their outcome through `&self`.
pub(crate) struct Status<'a> {
    flag: Cell<Flag>,
    hooks: Option<&'a CallbackHooks<'a>>,
}

impl<'a> Status<'a> {
    pub(crate) const fn new(hooks: Option<&'a CallbackHooks<'a>>) -> Self {
        Self {
            flag: Cell::new(Flag::Ok),
            hooks,
        }
    }

    #[inline]
    pub(crate) fn flag(&self) -> Flag {
        self.flag.get()
    }

    #[inline]
    pub(crate) fn hooks(&self) -> Option<&'a CallbackHooks<'a>> {
        self.hooks
    }

    /// Replaces the hook set.
    pub(crate) fn customize(&mut self, hooks: Option<&'a CallbackHooks<'a>>) {
        self.hooks = hooks;
        self.flag.set(Flag::Ok);
    }

    /// Records success without firing a hook.
    #[inline]
    pub(crate) fn ok(&self) {
        self.flag.set(Flag::Ok);
    }

    /// Records success, then fires `hook`.
    #[inline]
    pub(crate) fn done(&self, hook: Hook) {
        self.flag.set(Flag::Ok);
        if let Some(hooks) = self.hooks {
            hooks.fire(hook);
        }
    }

    /// Records a guarded failure. Never fires a hook.
    #[inline]
    pub(crate) fn fail(&self, flag: Flag) {
        self.flag.set(flag);
    }

    /// Records `err` and hands it back for propagation.
    #[inline]
    pub(crate) fn reject(&self, err: CollectionError) -> CollectionError {
        self.flag.set(err.flag());
        err
    }
}
