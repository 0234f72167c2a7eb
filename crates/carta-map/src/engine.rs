use std::rc::Rc;

use carta_core::ElementKey;
use thiserror::Error;

use crate::events::{MapEvent, MapEventKind};
use crate::options::MapOptions;

/// Handle returned by [`MapEngine::on`], used to tear the binding down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

pub type EventHandler = Rc<dyn Fn(&MapEvent)>;

/// Failures surfaced by an engine. This layer never recovers or retries;
/// every variant propagates to whoever drove the frame.
#[derive(Clone, Debug, Error)]
pub enum MapError {
    #[error("engine construction failed: {0}")]
    Construction(String),

    #[error("target attachment failed: {0}")]
    Attachment(String),

    #[error("subscribing `{kind}` failed: {reason}")]
    Subscription { kind: MapEventKind, reason: String },
}

/// The imperative map library, seen from the mounting layer.
///
/// An engine is constructed once from an immutable [`MapOptions`] bundle and
/// owns its own internals (layers, interactions, render loop). This layer
/// only sequences it: subscribe/unsubscribe handlers, kick a render, and
/// point the output at a host element — at most one target at a time, and a
/// new target implicitly replaces the previous one.
pub trait MapEngine: 'static {
    fn create(options: &MapOptions) -> Result<Self, MapError>
    where
        Self: Sized;

    fn on(&self, kind: MapEventKind, handler: EventHandler) -> Result<Subscription, MapError>;

    fn off(&self, subscription: Subscription);

    fn render(&self);

    fn set_target(&self, target: Option<ElementKey>) -> Result<(), MapError>;
}

/// Shared read capability on a live engine, as handed to the registry and to
/// descendants. Lifecycle-affecting calls stay with the owning component.
pub type MapHandle = Rc<dyn MapEngine>;
