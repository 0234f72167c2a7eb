use crate::element::{Attrs, ElementRef};

#[derive(Clone, Debug)]
pub enum ViewKind {
    Container,
    Label { text: String },
}

/// One node of the declarative host tree produced by a compose pass.
#[derive(Clone, Debug)]
pub struct View {
    pub kind: ViewKind,
    pub attrs: Attrs,
    pub element_ref: Option<ElementRef>,
    pub children: Vec<View>,
}

impl View {
    pub fn container(attrs: Attrs) -> Self {
        View {
            kind: ViewKind::Container,
            attrs,
            element_ref: None,
            children: vec![],
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        View {
            kind: ViewKind::Label { text: text.into() },
            attrs: Attrs::default(),
            element_ref: None,
            children: vec![],
        }
    }

    /// Resolves `r` to this node's element at commit.
    pub fn element_ref(mut self, r: ElementRef) -> Self {
        self.element_ref = Some(r);
        self
    }

    pub fn with_children(mut self, children: Vec<View>) -> Self {
        self.children = children;
        self
    }
}
