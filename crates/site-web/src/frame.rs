//! requestAnimationFrame loop with an explicit cancel.
//!
//! The tick closure keeps itself alive through the shared `Rc`, so dropping a
//! `FrameLoop` handle leaves the loop running for the page lifetime (the same
//! contract as a forgotten closure); `cancel` stops it and releases the
//! captured state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start(mut f: impl FnMut() + 'static) -> Self {
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let raf_clone = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            f();
            let next = {
                let tick_ref = tick_clone.borrow();
                match tick_ref.as_ref() {
                    Some(closure) => request_frame(closure),
                    None => None,
                }
            };
            raf_clone.set(next);
        }) as Box<dyn FnMut()>));
        if let Some(closure) = tick.borrow().as_ref() {
            raf_id.set(request_frame(closure));
        }
        Self { raf_id, tick }
    }

    /// Cancel the pending frame and drop the tick closure. Must not be called
    /// from inside the tick itself.
    pub fn cancel(&self) {
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(closure: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window().and_then(|w| w.request_animation_frame(closure.as_ref().unchecked_ref()).ok())
}
