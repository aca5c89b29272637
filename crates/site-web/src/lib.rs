#![cfg(target_arch = "wasm32")]

mod cursor;
mod dom;
mod effects;
mod events;
mod frame;
mod render;
mod reveal;
mod scene;
mod viz;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use site_core::InputState;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("site-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let (vw, vh) = dom::inner_size(&window);
    let input = Rc::new(RefCell::new(InputState::new(vw, vh)));
    {
        // Seed the scroll reading so a session restored mid-page starts with
        // the right background color
        let y = window.scroll_y().unwrap_or(0.0) as f32;
        let max = dom::scroll_max(&window, &document);
        input.borrow_mut().set_scroll(y, max);
    }

    let burst_queued: Rc<Cell<bool>> = Rc::new(Cell::new(false));
    let resize_dirty: Rc<Cell<bool>> = Rc::new(Cell::new(false));

    events::wire_pointer_handlers(events::InputWiring {
        input: input.clone(),
        burst_queued: burst_queued.clone(),
    });
    events::wire_scroll_handlers(&document, input.clone(), resize_dirty.clone());

    // The interaction controller owns the one per-frame input step; its loop
    // starts before the scene's so the snapshot is fresh when the field reads
    // it. Dropping the handle leaves the loop running for the page lifetime;
    // an embedder that needs teardown keeps it and calls destroy().
    let fx = effects::InteractionEffects::new(&document, input.clone());
    fx.start();
    drop(fx);

    if cursor::CursorEffects::init(&document).is_none() {
        log::debug!("no #cursor element; cursor effects disabled");
    }

    let seed = js_sys::Date::now() as u64;
    viz::spawn_gated_looper(&document, "eeg-canvas", viz::VizKind::eeg(seed));
    viz::spawn_gated_looper(&document, "voice-canvas", viz::VizKind::voice());
    viz::spawn_gated_looper(
        &document,
        "hex-canvas",
        viz::VizKind::hex(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
    );

    reveal::init(&document);

    if let Some(canvas) = dom::canvas_by_id(&document, "webgl-canvas") {
        dom::sync_canvas_backing_size(&canvas);
        let layer = scene::ParticleLayer::new(input.clone(), burst_queued, seed ^ 0xA5A5);
        let max_instances = layer.particle_count();
        if let Some(gpu) = scene::init_gpu(&canvas, max_instances).await {
            let mut s = scene::Scene::new(canvas, gpu, input, resize_dirty);
            s.add(Box::new(layer));
            scene::start_loop(Rc::new(RefCell::new(s)));
        }
    } else {
        log::warn!("missing #webgl-canvas; particle backdrop disabled");
    }

    Ok(())
}
