//! # Composition locals
//!
//! A thread-local stack of typed values scoped to a subtree of the
//! composition. A component publishes a value for its children with
//! [`with_local`], and any descendant composing inside that call reads it
//! back synchronously with [`try_local`]:
//!
//! ```rust
//! use carta_core::*;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Tooling(&'static str);
//!
//! let seen = with_local(Tooling("inner"), || try_local::<Tooling>());
//! assert_eq!(seen, Some(Tooling("inner")));
//! assert_eq!(try_local::<Tooling>(), None);
//! ```
//!
//! Frames are pushed and popped around the provider closure, so a local never
//! outlives the subtree it was provided for, panics included. Lookup is by
//! `TypeId`; wrap raw values in a newtype when two locals share a type.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// Provides `value` to everything composed inside `f`.
pub fn with_local<T: Clone + 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

/// Reads the nearest provided `T`, if any subtree above provides one.
pub fn try_local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|stack| {
        for frame in stack.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

/// Like [`try_local`], falling back to `T::default()`.
pub fn local_or_default<T: Clone + Default + 'static>() -> T {
    try_local::<T>().unwrap_or_default()
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Pop on unwind as well.
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|stack| stack.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|stack| {
        if let Some(top) = stack.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            let mut frame = HashMap::new();
            frame.insert(t, v);
            stack.borrow_mut().push(frame);
        }
    });
}
