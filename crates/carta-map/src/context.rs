use carta_core::{try_local, with_local};

use crate::engine::MapHandle;

/// Context value descendants read to reach the engine that hosts them.
///
/// Published fresh when (and only when) a new engine is created — once per
/// mount. The engine is fully constructed by the time children compose, but
/// not necessarily attached to its target or event-bound yet.
#[derive(Clone)]
pub struct CurrentMap {
    pub map: MapHandle,
}

/// Makes `value` the current map for everything composed inside `f`.
pub fn with_current_map<R>(value: CurrentMap, f: impl FnOnce() -> R) -> R {
    with_local(value, f)
}

/// The nearest enclosing map, if composing inside one.
pub fn current_map() -> Option<CurrentMap> {
    try_local::<CurrentMap>()
}
