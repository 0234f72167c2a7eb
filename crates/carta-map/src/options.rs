use carta_core::Vec2;

/// A content layer, bottom to top in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerSpec {
    Tile { source_url: String },
    Image { source_url: String },
    Vector { name: String },
}

/// Built-in pointer/gesture interactions an engine may install.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionSpec {
    DragPan,
    PinchZoom,
    DoubleClickZoom,
    MouseWheelZoom,
}

/// Initial viewport state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSpec {
    pub center: Vec2,
    pub zoom: f32,
    pub rotation: f32,
}

impl ViewSpec {
    pub fn new(center: Vec2, zoom: f32) -> Self {
        Self {
            center,
            zoom,
            rotation: 0.0,
        }
    }

    pub fn rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self::new(Vec2::default(), 0.0)
    }
}

/// An anchored element floating above the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlaySpec {
    pub id: String,
    pub position: Vec2,
}

/// On-surface widgets owned by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlSpec {
    Zoom,
    Rotate,
    Attribution,
    ScaleLine,
}

/// Immutable construction bundle for an engine.
///
/// Captured once at mount; changing the value passed on later renders has no
/// effect on the already constructed engine.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapOptions {
    pub layers: Vec<LayerSpec>,
    pub interactions: Vec<InteractionSpec>,
    pub view: ViewSpec,
    pub overlays: Vec<OverlaySpec>,
    pub controls: Vec<ControlSpec>,
}

impl MapOptions {
    pub fn new(view: ViewSpec) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn layer(mut self, layer: LayerSpec) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn interaction(mut self, interaction: InteractionSpec) -> Self {
        self.interactions.push(interaction);
        self
    }

    pub fn overlay(mut self, overlay: OverlaySpec) -> Self {
        self.overlays.push(overlay);
        self
    }

    pub fn control(mut self, control: ControlSpec) -> Self {
        self.controls.push(control);
        self
    }
}
