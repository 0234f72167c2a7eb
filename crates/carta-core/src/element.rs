use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::runtime::remember;
use crate::view::{View, ViewKind};
use crate::{Color, Size};

slotmap::new_key_type! {
    /// Handle to a realized container element in the host arena.
    pub struct ElementKey;
}

/// Pass-through container attributes, forwarded verbatim to the element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs {
    pub id: Option<String>,
    pub class: Option<String>,
    pub size: Option<Size>,
    pub background: Option<Color>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size { width, height });
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

/// A committed node in the host tree.
#[derive(Debug)]
pub struct Element {
    pub attrs: Attrs,
    pub text: Option<String>,
    pub children: SmallVec<[ElementKey; 4]>,
}

/// Shared cell that resolves to a concrete element during commit.
///
/// Empty while composing the first frame; resolved before mount effects
/// flush, and stable across recompositions of the same component instance.
#[derive(Clone, Debug, Default)]
pub struct ElementRef(Rc<Cell<Option<ElementKey>>>);

impl ElementRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<ElementKey> {
        self.0.get()
    }

    pub(crate) fn set(&self, key: Option<ElementKey>) {
        self.0.set(key);
    }
}

/// Remembers one [`ElementRef`] per callsite across recompositions.
pub fn remember_element_ref() -> ElementRef {
    remember(ElementRef::new).as_ref().clone()
}

/// Storage for realized elements, keyed stably across frames.
#[derive(Default)]
pub struct ElementArena {
    nodes: SlotMap<ElementKey, Element>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: ElementKey) -> Option<&Element> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: ElementKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Realizes `root` into the arena and returns its key.
    ///
    /// A view carrying an already resolved [`ElementRef`] keeps its element
    /// (attributes and children are rewritten in place); everything not
    /// visited this frame is removed.
    pub fn commit(&mut self, root: &View) -> ElementKey {
        let mut visited = HashSet::new();
        let key = self.commit_node(root, &mut visited);
        self.nodes.retain(|k, _| visited.contains(&k));
        key
    }

    fn commit_node(&mut self, view: &View, visited: &mut HashSet<ElementKey>) -> ElementKey {
        let children: SmallVec<[ElementKey; 4]> = view
            .children
            .iter()
            .map(|child| self.commit_node(child, visited))
            .collect();

        let text = match &view.kind {
            ViewKind::Label { text } => Some(text.clone()),
            ViewKind::Container => None,
        };

        let reused = view
            .element_ref
            .as_ref()
            .and_then(|r| r.get())
            .filter(|k| self.nodes.contains_key(*k));

        let key = match reused {
            Some(key) => {
                let node = &mut self.nodes[key];
                node.attrs = view.attrs.clone();
                node.text = text;
                node.children = children;
                key
            }
            None => {
                let key = self.nodes.insert(Element {
                    attrs: view.attrs.clone(),
                    text,
                    children,
                });
                if let Some(r) = &view.element_ref {
                    r.set(Some(key));
                }
                key
            }
        };

        visited.insert(key);
        key
    }
}
