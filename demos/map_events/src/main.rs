//! Mounts a narrating engine, pokes it with synthetic events, grows the
//! callback set to show a rebind, then unmounts. Run with
//! `RUST_LOG=info cargo run -p map_events`.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use carta_core::*;
use carta_map::*;

#[derive(Default)]
struct WireState {
    subs: Vec<(u64, MapEventKind, EventHandler)>,
    next: u64,
}

/// Shared event channel between `main` and the engine it mounts.
#[derive(Clone, Default)]
struct Wire(Rc<RefCell<WireState>>);

thread_local! {
    static WIRE: Wire = Wire::default();
}

impl Wire {
    fn current() -> Wire {
        WIRE.with(|wire| wire.clone())
    }

    fn emit(&self, event: &MapEvent) {
        let handlers: Vec<EventHandler> = self
            .0
            .borrow()
            .subs
            .iter()
            .filter(|(_, kind, _)| *kind == event.kind)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}

/// Engine that narrates every lifecycle call it receives.
struct ConsoleEngine {
    wire: Wire,
}

impl MapEngine for ConsoleEngine {
    fn create(options: &MapOptions) -> Result<Self, MapError> {
        log::info!(
            "engine up: {} layers, {} interactions, {} controls, zoom {}",
            options.layers.len(),
            options.interactions.len(),
            options.controls.len(),
            options.view.zoom,
        );
        Ok(ConsoleEngine {
            wire: Wire::current(),
        })
    }

    fn on(&self, kind: MapEventKind, handler: EventHandler) -> Result<Subscription, MapError> {
        let mut state = self.wire.0.borrow_mut();
        state.next += 1;
        let id = state.next;
        state.subs.push((id, kind, handler));
        log::info!("bind `{kind}`");
        Ok(Subscription(id))
    }

    fn off(&self, subscription: Subscription) {
        let mut state = self.wire.0.borrow_mut();
        if let Some(pos) = state
            .subs
            .iter()
            .position(|(id, _, _)| *id == subscription.0)
        {
            let (_, kind, _) = state.subs.remove(pos);
            log::info!("unbind `{kind}`");
        }
    }

    fn render(&self) {
        log::info!("render pass");
    }

    fn set_target(&self, target: Option<ElementKey>) -> Result<(), MapError> {
        match target {
            Some(key) => log::info!("attached to {key:?}"),
            None => log::info!("detached"),
        }
        Ok(())
    }
}

fn build(registry: SharedMapRegistry, track_pointer: bool) -> Result<View, EffectError> {
    let mut callbacks = MapCallbacks::new()
        .on_single_click(|event| log::info!("single click at {:?}", event.pointer))
        .on_move_end(|_| log::info!("viewport settled"));
    if track_pointer {
        callbacks = callbacks.on_pointer_move(|event| log::info!("pointer at {:?}", event.pointer));
    }

    let options = MapOptions::new(ViewSpec::new(Vec2::new(13.40, 52.52), 11.0))
        .layer(LayerSpec::Tile {
            source_url: "https://tile.example/{z}/{x}/{y}.png".into(),
        })
        .layer(LayerSpec::Vector {
            name: "districts".into(),
        })
        .interaction(InteractionSpec::DragPan)
        .interaction(InteractionSpec::MouseWheelZoom)
        .control(ControlSpec::Zoom)
        .control(ControlSpec::Attribution);

    let props = MapProps::new(options)
        .map_id("city")
        .registry(Rc::new(registry))
        .attrs(
            Attrs::new()
                .id("city-map")
                .size(800.0, 600.0)
                .background(Color::from_hex("#0B1D2A")),
        )
        .callbacks(callbacks);

    Ok(MapView::<ConsoleEngine>(props, || {
        vec![View::label("© demo tiles")]
    })?)
}

fn main() -> Result<()> {
    env_logger::init();

    let registry = SharedMapRegistry::new();
    let mut host = CompositionHost::new();

    {
        let registry = registry.clone();
        host.compose(move || build(registry, false))?;
    }

    let wire = Wire::current();
    wire.emit(&MapEvent::at(MapEventKind::SingleClick, Vec2::new(140.0, 260.0)));
    wire.emit(&MapEvent::of(MapEventKind::MoveEnd));

    // A third callback kind appears: the binding effect tears down and rebinds.
    {
        let registry = registry.clone();
        host.compose(move || build(registry, true))?;
    }
    wire.emit(&MapEvent::at(MapEventKind::PointerMove, Vec2::new(10.0, 20.0)));

    if registry.get("city").is_some() {
        log::info!("registry resolves `city`");
    }

    host.unmount();
    log::info!("maps registered after unmount: {}", registry.len());

    Ok(())
}
