#![allow(non_snake_case)]
//! # Declarative mounting for an imperative map engine
//!
//! A [`MapView`] owns one live [`MapEngine`] for exactly as long as its spot
//! in the composition exists: the engine is created once at mount, announced
//! to an optional [`registry`](MapRegistry), exposed to descendants through
//! [`CurrentMap`], event-bound and attached to its container element after
//! the frame commits, and fully torn down on unmount.
//!
//! ```rust
//! use std::rc::Rc;
//! use carta_core::*;
//! use carta_map::*;
//!
//! struct NullEngine;
//!
//! impl MapEngine for NullEngine {
//!     fn create(_options: &MapOptions) -> Result<Self, MapError> {
//!         Ok(NullEngine)
//!     }
//!     fn on(&self, _kind: MapEventKind, _handler: EventHandler) -> Result<Subscription, MapError> {
//!         Ok(Subscription(0))
//!     }
//!     fn off(&self, _subscription: Subscription) {}
//!     fn render(&self) {}
//!     fn set_target(&self, _target: Option<ElementKey>) -> Result<(), MapError> {
//!         Ok(())
//!     }
//! }
//!
//! let registry = SharedMapRegistry::new();
//! let mut host = CompositionHost::new();
//!
//! let props_registry = registry.clone();
//! let frame = host
//!     .compose(move || {
//!         let props = MapProps::new(MapOptions::default())
//!             .map_id("overview")
//!             .registry(Rc::new(props_registry))
//!             .callbacks(MapCallbacks::new().on_click(|event| {
//!                 log::info!("clicked at {:?}", event.pointer);
//!             }));
//!         Ok(MapView::<NullEngine>(props, || vec![View::label("legend")])?)
//!     })
//!     .unwrap();
//!
//! assert!(registry.get("overview").is_some());
//! assert!(host.elements().contains(frame.root));
//!
//! host.unmount();
//! assert!(registry.get("overview").is_none());
//! ```

pub mod context;
pub mod engine;
pub mod events;
pub mod options;
pub mod registry;

use std::cell::Cell;
use std::rc::Rc;

use carta_core::*;
use smallvec::SmallVec;

pub use context::{CurrentMap, current_map, with_current_map};
pub use engine::{EventHandler, MapEngine, MapError, MapHandle, Subscription};
pub use events::{MapCallbacks, MapEvent, MapEventKind, MapEventSet};
pub use options::{ControlSpec, InteractionSpec, LayerSpec, MapOptions, OverlaySpec, ViewSpec};
pub use registry::{MapRegistry, SharedMapRegistry};

use events::EVENT_TABLE;

/// Everything a [`MapView`] accepts at mount.
///
/// `options` is captured by the engine once; `attrs` pass through to the
/// container element untouched and may change freely between renders.
pub struct MapProps {
    pub map_id: Option<String>,
    pub options: MapOptions,
    pub callbacks: MapCallbacks,
    pub attrs: Attrs,
    pub registry: Option<Rc<dyn MapRegistry>>,
}

impl MapProps {
    pub fn new(options: MapOptions) -> Self {
        Self {
            map_id: None,
            options,
            callbacks: MapCallbacks::new(),
            attrs: Attrs::new(),
            registry: None,
        }
    }

    pub fn map_id(mut self, id: impl Into<String>) -> Self {
        self.map_id = Some(id.into());
        self
    }

    pub fn callbacks(mut self, callbacks: MapCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn registry(mut self, registry: Rc<dyn MapRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// Mounts one engine of type `E` and keeps it in step with the composition.
///
/// Per mounted instance:
/// - `E::create` runs exactly once, on the first compose pass; a failure is
///   returned synchronously and remembered, never retried.
/// - with a `map_id` and a registry, the engine is announced once during the
///   creating render — before `children` composes — and deregistered in the
///   matching teardown.
/// - after each frame commits, a keyed mount effect binds every present
///   callback through the event table, kicks a render, and attaches the
///   container element. Its cleanup unbinds exactly what it bound and
///   detaches the target unconditionally; it re-runs only when the set of
///   present callback kinds changes.
///
/// `children` composes inside the [`CurrentMap`] context and renders into
/// the container element.
pub fn MapView<E: MapEngine>(
    props: MapProps,
    children: impl FnOnce() -> Vec<View>,
) -> Result<View, MapError> {
    let MapProps {
        map_id,
        options,
        callbacks,
        attrs,
        registry,
    } = props;

    let created: Rc<Result<MapHandle, MapError>> =
        remember(move || E::create(&options).map(|engine| Rc::new(engine) as MapHandle));
    let map = match &*created {
        Ok(handle) => handle.clone(),
        Err(err) => return Err(err.clone()),
    };

    if let (Some(id), Some(registry)) = (map_id.as_ref(), registry.as_ref()) {
        let announced = remember(|| Cell::new(false));
        if !announced.get() {
            announced.set(true);
            registry.register(id, map.clone());
            log::debug!("registered map `{id}`");
            match current_scope() {
                Some(scope) => {
                    let registry = registry.clone();
                    let id = id.clone();
                    scope.add_disposer(move || registry.deregister(&id));
                }
                None => log::warn!("map `{id}` registered outside a scope; never deregistered"),
            }
        }
    }

    let target = remember_element_ref();

    {
        let map = map.clone();
        let target = target.clone();
        let callbacks = callbacks.clone();
        mount_effect(callbacks.present_set(), move || {
            let mut subscriptions: SmallVec<[Subscription; 4]> = SmallVec::new();
            for (kind, get) in EVENT_TABLE {
                if let Some(handler) = get(&callbacks) {
                    subscriptions.push(map.on(*kind, handler.clone())?);
                }
            }

            map.render();

            if let Some(element) = target.get() {
                map.set_target(Some(element))?;
            }
            log::debug!("mounted map: {} event bindings", subscriptions.len());

            let map = map.clone();
            Ok(on_unmount(move || {
                for subscription in subscriptions {
                    map.off(subscription);
                }
                if let Err(err) = map.set_target(None) {
                    log::warn!("detaching target during cleanup failed: {err}");
                }
            }))
        });
    }

    let children = with_current_map(CurrentMap { map }, children);

    Ok(View::container(attrs)
        .element_ref(target)
        .with_children(children))
}
