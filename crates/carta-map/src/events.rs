use std::rc::Rc;

use carta_core::Vec2;

use crate::engine::EventHandler;

/// Declares the enumerated event surface in one place: the kind enum, its
/// wire names, the bitflags set, the callback bundle with its builder
/// setters, and the table the binder iterates. Adding an event here is the
/// whole change.
macro_rules! declare_map_events {
    ($( ($variant:ident, $field:ident, $setter:ident, $flag:ident, $bit:expr, $wire:literal) ),+ $(,)?) => {
        /// A lifecycle or interaction event an engine can emit.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum MapEventKind {
            $( $variant ),+
        }

        bitflags::bitflags! {
            /// Set of event kinds, used to key the binding effect.
            #[derive(Clone, Copy, Debug, PartialEq, Eq)]
            pub struct MapEventSet: u32 {
                $( const $flag = 1 << $bit; )+
            }
        }

        impl MapEventKind {
            pub const ALL: &[MapEventKind] = &[ $( MapEventKind::$variant ),+ ];

            /// Wire name, spelled the way engines spell it.
            pub fn name(self) -> &'static str {
                match self {
                    $( MapEventKind::$variant => $wire ),+
                }
            }

            pub fn flag(self) -> MapEventSet {
                match self {
                    $( MapEventKind::$variant => MapEventSet::$flag ),+
                }
            }
        }

        /// One optional handler per event kind; unset entries are never
        /// subscribed.
        ///
        /// Handler identities are expected to stay stable for the lifetime
        /// of a mount: rebinding is triggered by the *set* of present kinds
        /// changing, not by a handler being swapped for a new closure behind
        /// the same kind.
        #[derive(Clone, Default)]
        pub struct MapCallbacks {
            $( pub $field: Option<EventHandler> ),+
        }

        impl MapCallbacks {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $setter(mut self, handler: impl Fn(&MapEvent) + 'static) -> Self {
                    self.$field = Some(Rc::new(handler));
                    self
                }
            )+
        }

        pub(crate) const EVENT_TABLE: &[(MapEventKind, fn(&MapCallbacks) -> Option<&EventHandler>)] = &[
            $( (MapEventKind::$variant, |callbacks: &MapCallbacks| callbacks.$field.as_ref()) ),+
        ];
    };
}

declare_map_events! {
    (Change, change, on_change, CHANGE, 0, "change"),
    (ChangeLayerGroup, change_layer_group, on_change_layer_group, CHANGE_LAYER_GROUP, 1, "change:layerGroup"),
    (ChangeSize, change_size, on_change_size, CHANGE_SIZE, 2, "change:size"),
    (ChangeTarget, change_target, on_change_target, CHANGE_TARGET, 3, "change:target"),
    (ChangeView, change_view, on_change_view, CHANGE_VIEW, 4, "change:view"),
    (Click, click, on_click, CLICK, 5, "click"),
    (DblClick, dbl_click, on_dbl_click, DBL_CLICK, 6, "dblclick"),
    (MoveStart, move_start, on_move_start, MOVE_START, 7, "movestart"),
    (MoveEnd, move_end, on_move_end, MOVE_END, 8, "moveend"),
    (PointerDrag, pointer_drag, on_pointer_drag, POINTER_DRAG, 9, "pointerdrag"),
    (PointerMove, pointer_move, on_pointer_move, POINTER_MOVE, 10, "pointermove"),
    (PostCompose, post_compose, on_post_compose, POST_COMPOSE, 11, "postcompose"),
    (PostRender, post_render, on_post_render, POST_RENDER, 12, "postrender"),
    (PreCompose, pre_compose, on_pre_compose, PRE_COMPOSE, 13, "precompose"),
    (PropertyChange, property_change, on_property_change, PROPERTY_CHANGE, 14, "propertychange"),
    (RenderComplete, render_complete, on_render_complete, RENDER_COMPLETE, 15, "rendercomplete"),
    (SingleClick, single_click, on_single_click, SINGLE_CLICK, 16, "singleclick"),
}

impl std::fmt::Display for MapEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl MapCallbacks {
    /// The kinds that currently have a handler bound.
    pub fn present_set(&self) -> MapEventSet {
        EVENT_TABLE
            .iter()
            .filter(|(_, get)| get(self).is_some())
            .fold(MapEventSet::empty(), |set, (kind, _)| set | kind.flag())
    }
}

impl std::fmt::Debug for MapCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MapCallbacks")
            .field(&self.present_set())
            .finish()
    }
}

/// Payload relayed to callbacks.
#[derive(Clone, Debug)]
pub struct MapEvent {
    pub kind: MapEventKind,
    pub pointer: Option<Vec2>,
}

impl MapEvent {
    pub fn of(kind: MapEventKind) -> Self {
        Self {
            kind,
            pointer: None,
        }
    }

    pub fn at(kind: MapEventKind, pointer: Vec2) -> Self {
        Self {
            kind,
            pointer: Some(pointer),
        }
    }
}
