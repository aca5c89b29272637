use std::cell::{Cell, RefCell};
use std::rc::Rc;

use site_core::InputState;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub input: Rc<RefCell<InputState>>,
    /// Set on any click; the particle layer consumes it to trigger a burst.
    pub burst_queued: Rc<Cell<bool>>,
}

pub fn wire_pointer_handlers(w: InputWiring) {
    let Some(window) = web::window() else {
        return;
    };

    // pointermove: record the raw reading only; smoothing happens per frame
    {
        let input = w.input.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            input
                .borrow_mut()
                .set_pointer_px(ev.client_x() as f32, ev.client_y() as f32);
        }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // click: queue a particle burst
    {
        let burst = w.burst_queued.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            burst.set(true);
        }) as Box<dyn FnMut(_)>);
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
