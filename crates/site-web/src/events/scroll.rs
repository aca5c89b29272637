use std::cell::{Cell, RefCell};
use std::rc::Rc;

use site_core::InputState;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// Wire scroll and resize. Resize only flips the dirty flag; the frame loops
/// recompute pixel dimensions lazily so rapid resizing cannot thrash layout.
pub fn wire_scroll_handlers(
    document: &web::Document,
    input: Rc<RefCell<InputState>>,
    resize_dirty: Rc<Cell<bool>>,
) {
    let Some(window) = web::window() else {
        return;
    };

    {
        let input = input.clone();
        let document = document.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = web::window() {
                let y = w.scroll_y().unwrap_or(0.0) as f32;
                let max = dom::scroll_max(&w, &document);
                input.borrow_mut().set_scroll(y, max);
            }
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let closure = Closure::wrap(Box::new(move || {
            if let Some(w) = web::window() {
                let (vw, vh) = dom::inner_size(&w);
                input.borrow_mut().set_viewport(vw, vh);
            }
            resize_dirty.set(true);
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
