use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::element::{ElementArena, ElementKey};
use crate::error::{EffectError, HostError};
use crate::scope::Scope;
use crate::view::View;

thread_local! {
    pub static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

type QueuedEffect = Box<dyn FnOnce() -> Result<(), EffectError>>;

/// Slot storage backing `remember` between compose passes.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
    pending_effects: Vec<QueuedEffect>,
}

pub(crate) fn queue_effect(effect: QueuedEffect) {
    COMPOSER.with(|c| c.borrow_mut().pending_effects.push(effect));
}

/// Slot-based remember (sequential composition only).
///
/// The Nth call within a compose pass always addresses the Nth slot, so the
/// initializer runs once per component instance, not once per render.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;

        if cursor >= c.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            c.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = c.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            c.slots[cursor] = Box::new(rc.clone());
            rc
        }
    })
}

/// Key-based remember, stable across conditional branches.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        let key = key.into();

        if let Some(existing) = c.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            } else {
                log::warn!(
                    "remember_with_key: key '{}' reused with a different type; replacing.",
                    key
                );
            }
        }

        let rc: Rc<T> = Rc::new(init());
        c.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

/// Output of one committed frame.
pub struct Frame {
    pub root: ElementKey,
}

/// Drives compose → commit → effect flush, and owns everything a mounted
/// tree holds: the root scope and the realized element arena.
///
/// One live host per thread; constructing a new one resets the thread's
/// composition memory, so a fresh host is a fresh mount.
pub struct CompositionHost {
    scope: Scope,
    arena: ElementArena,
}

impl CompositionHost {
    pub fn new() -> Self {
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.slots.clear();
            c.keyed_slots.clear();
            c.cursor = 0;
            c.pending_effects.clear();
        });
        Self {
            scope: Scope::new(),
            arena: ElementArena::new(),
        }
    }

    /// Runs one frame: composes the tree, commits it into the element
    /// arena (resolving element refs), then flushes queued mount effects.
    ///
    /// A failure from `build` or from an effect aborts the frame; effects
    /// queued after the failing one do not run this frame.
    pub fn compose(
        &mut self,
        build: impl FnOnce() -> Result<View, EffectError>,
    ) -> Result<Frame, HostError> {
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.cursor = 0;
            // Anything left over from an aborted frame is stale.
            c.pending_effects.clear();
        });

        let view = self.scope.run(build).map_err(HostError::Compose)?;
        let root = self.arena.commit(&view);

        let pending = COMPOSER.with(|c| std::mem::take(&mut c.borrow_mut().pending_effects));
        for effect in pending {
            effect().map_err(HostError::Effect)?;
        }

        Ok(Frame { root })
    }

    pub fn elements(&self) -> &ElementArena {
        &self.arena
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Tears the tree down: every scope disposer runs, mount-effect
    /// cleanups included, then the realized elements are dropped.
    pub fn unmount(self) {
        self.scope.dispose();
    }
}

impl Default for CompositionHost {
    fn default() -> Self {
        Self::new()
    }
}
