use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::EffectError;
use crate::runtime::{self, remember};
use crate::scope::current_scope;

/// Idempotent cleanup guard.
#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// A guard with nothing to do.
    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        if let Some(f) = self.0.borrow_mut().take() {
            f()
        }
    }
}

/// Names the cleanup half of a mount effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// Keyed two-phase lifecycle effect.
///
/// The body is queued during composition and runs after the element tree of
/// the current frame has committed, so element refs taken during composition
/// are resolved by the time it executes. The returned [`Dispose`] bundles
/// whatever the body bound (subscriptions, an attached target) and runs:
///
/// - before the body runs again because `key` changed, and
/// - on unmount, via the owning scope.
///
/// While `key` compares equal across recompositions, neither half runs.
pub fn mount_effect<K: PartialEq + 'static>(
    key: K,
    effect: impl FnOnce() -> Result<Dispose, EffectError> + 'static,
) {
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| Cell::new(false));

    // One unmount disposer per callsite, installed on first composition.
    if !installed.get() {
        installed.set(true);
        match current_scope() {
            Some(scope) => {
                let cleanup_slot = cleanup_slot.clone();
                scope.add_disposer(move || {
                    if let Some(cleanup) = cleanup_slot.borrow_mut().take() {
                        cleanup.run();
                    }
                });
            }
            None => log::warn!("mount_effect outside a scope; cleanup will not run on unmount"),
        }
    }

    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        let cleanup_slot = cleanup_slot.clone();
        runtime::queue_effect(Box::new(move || {
            if let Some(previous) = cleanup_slot.borrow_mut().take() {
                previous.run();
            }
            let cleanup = effect()?;
            *cleanup_slot.borrow_mut() = Some(cleanup);
            Ok(())
        }));
    }
}
