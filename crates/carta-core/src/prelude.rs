pub use crate::color::Color;
pub use crate::effects::{Dispose, mount_effect, on_unmount};
pub use crate::element::{Attrs, Element, ElementArena, ElementKey, ElementRef, remember_element_ref};
pub use crate::error::{EffectError, HostError};
pub use crate::geometry::{Size, Vec2};
pub use crate::locals::{local_or_default, try_local, with_local};
pub use crate::runtime::{CompositionHost, Frame, remember, remember_state, remember_with_key};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::view::{View, ViewKind};
