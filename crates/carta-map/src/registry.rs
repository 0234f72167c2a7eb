use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::engine::MapHandle;

/// Injectable collaborator mapping identifiers to live engines.
///
/// Registration happens synchronously during the render that creates the
/// engine; deregistration runs in the matching teardown, so an identifier
/// never points at an unmounted engine.
pub trait MapRegistry {
    fn register(&self, id: &str, map: MapHandle);
    fn deregister(&self, id: &str);
}

/// Plain shared-map registry for single-threaded hosts.
#[derive(Clone, Default)]
pub struct SharedMapRegistry {
    inner: Rc<RefCell<HashMap<String, MapHandle>>>,
}

impl SharedMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a mounted engine by identifier.
    pub fn get(&self, id: &str) -> Option<MapHandle> {
        self.inner.borrow().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl MapRegistry for SharedMapRegistry {
    fn register(&self, id: &str, map: MapHandle) {
        if self
            .inner
            .borrow_mut()
            .insert(id.to_owned(), map)
            .is_some()
        {
            // Collision policy: last writer wins.
            log::warn!("map id `{id}` registered twice; replacing the earlier entry");
        }
    }

    fn deregister(&self, id: &str) {
        if self.inner.borrow_mut().remove(id).is_none() {
            log::warn!("deregister of unknown map id `{id}`");
        }
    }
}
