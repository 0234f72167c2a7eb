//! # Composition runtime
//!
//! Carta hosts imperative, long-lived objects inside a declarative tree.
//! The runtime is deliberately small; there are four pieces:
//!
//! - `remember*` — lifecycle-aware storage bound to composition.
//! - `Scope` / `Dispose` — ownership of teardown work.
//! - `mount_effect` — keyed two-phase effects that run after commit.
//! - composition locals — a synchronous read channel down the tree.
//!
//! ## Remembered values
//!
//! `remember` memoizes by component identity: the Nth call of a compose pass
//! addresses the Nth slot, so the initializer runs once per mounted instance
//! no matter how often the tree recomposes:
//!
//! ```rust
//! use carta_core::*;
//!
//! let first = remember(|| 42);
//! let second = remember(|| 7);
//! assert_eq!((*first, *second), (42, 7));
//! ```
//!
//! ## Frames
//!
//! [`CompositionHost`] drives a frame in three phases: compose the [`View`]
//! tree, commit it into the element arena (resolving every [`ElementRef`]),
//! then flush mount effects. Cleanup runs before an effect re-runs for a new
//! key, and on unmount through the root scope:
//!
//! ```rust
//! use carta_core::*;
//!
//! let mut host = CompositionHost::new();
//! let frame = host
//!     .compose(|| {
//!         let target = remember_element_ref();
//!         mount_effect((), move || {
//!             // resources bound here are released by the returned guard
//!             Ok(on_unmount(|| log::debug!("released")))
//!         });
//!         Ok(View::container(Attrs::new().id("root")).element_ref(target))
//!     })
//!     .unwrap();
//! assert!(host.elements().contains(frame.root));
//! host.unmount();
//! ```
//!
//! Failures from a build closure or an effect abort the frame and surface as
//! [`HostError`]; the runtime performs no recovery of its own.

pub mod color;
pub mod effects;
pub mod element;
pub mod error;
pub mod geometry;
pub mod locals;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod tests;
pub mod view;

pub use color::*;
pub use effects::*;
pub use element::*;
pub use error::*;
pub use geometry::*;
pub use locals::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use view::*;
