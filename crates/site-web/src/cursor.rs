//! Custom cursor: a glyph that lags the pointer, a follow-the-leader trail,
//! and transient click ripples. The whole module no-ops when the page has no
//! `#cursor` element.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use instant::Instant;
use site_core::{
    approach_vec2, TrailChain, CURSOR_SMOOTHING, RIPPLE_DURATION_SEC, RIPPLE_MAX_DIAMETER_PX,
    RIPPLE_START_OPACITY, TRAIL_LENGTH, TRAIL_SMOOTHING,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::frame::FrameLoop;

const HOVER_TARGETS: &str = "a, button, .case__card, .evidence__card, .credential__card, \
                             .pipeline__node, .contact__link, .hero__stat";

struct Ripple {
    el: web::HtmlElement,
    age: f32,
}

struct CursorState {
    cursor: web::HtmlElement,
    visible: bool,
    pos: Vec2,
    target: Vec2,
    trail: TrailChain,
    trail_els: Vec<web::HtmlElement>,
    ripples: Vec<Ripple>,
    last: Instant,
}

pub struct CursorEffects {
    state: Rc<RefCell<CursorState>>,
    frame_loop: RefCell<Option<FrameLoop>>,
}

impl CursorEffects {
    /// Returns `None` when the cursor markup is absent (touch layouts).
    pub fn init(document: &web::Document) -> Option<Self> {
        let cursor = document
            .get_element_by_id("cursor")?
            .dyn_into::<web::HtmlElement>()
            .ok()?;

        let trail_els = spawn_trail_dots(document)?;
        let state = Rc::new(RefCell::new(CursorState {
            cursor,
            visible: false,
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            trail: TrailChain::new(TRAIL_LENGTH, TRAIL_SMOOTHING),
            trail_els,
            ripples: Vec::new(),
            last: Instant::now(),
        }));

        wire_pointer(document, &state);
        wire_hover_class(document, &state);

        let effects = Self {
            state: state.clone(),
            frame_loop: RefCell::new(None),
        };
        *effects.frame_loop.borrow_mut() =
            Some(FrameLoop::start(move || state.borrow_mut().tick()));
        Some(effects)
    }

    pub fn destroy(&self) {
        if let Some(frame_loop) = self.frame_loop.borrow_mut().take() {
            frame_loop.cancel();
        }
    }
}

impl CursorState {
    fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;

        self.pos = approach_vec2(self.pos, self.target, CURSOR_SMOOTHING);
        dom::set_transform(
            &self.cursor,
            &format!("translate({:.2}px, {:.2}px)", self.pos.x, self.pos.y),
        );

        self.trail.step(self.pos);
        for (el, node) in self.trail_els.iter().zip(self.trail.nodes()) {
            dom::set_transform(
                el,
                &format!(
                    "translate({:.2}px, {:.2}px) translate(-50%, -50%)",
                    node.x, node.y
                ),
            );
        }

        self.ripples.retain_mut(|r| {
            r.age += dt;
            let t = r.age / RIPPLE_DURATION_SEC;
            if t >= 1.0 {
                r.el.remove();
                return false;
            }
            // Ease out hard at the start, coast to the final diameter
            let eased = 1.0 - (1.0 - t).powi(3);
            let d = RIPPLE_MAX_DIAMETER_PX * eased;
            dom::set_style(&r.el, "width", &format!("{:.1}px", d));
            dom::set_style(&r.el, "height", &format!("{:.1}px", d));
            dom::set_style(&r.el, "opacity", &format!("{:.3}", RIPPLE_START_OPACITY * (1.0 - t)));
            true
        });
    }
}

fn spawn_trail_dots(document: &web::Document) -> Option<Vec<web::HtmlElement>> {
    let body = document.body()?;
    let mut els = Vec::with_capacity(TRAIL_LENGTH);
    for i in 0..TRAIL_LENGTH {
        let Ok(el) = document.create_element("div") else {
            continue;
        };
        el.set_class_name("cursor__trail-dot");
        let size = 4.0 - i as f32 * 0.4;
        let opacity = trail_dot_opacity(i);
        let _ = el.set_attribute(
            "style",
            &format!(
                "position: fixed; top: 0; left: 0; width: {size}px; height: {size}px; \
                 background: var(--color-primary); border-radius: 50%; pointer-events: none; \
                 z-index: 9999; opacity: {opacity}; mix-blend-mode: difference; transition: none;"
            ),
        );
        if body.append_child(&el).is_err() {
            continue;
        }
        if let Ok(el) = el.dyn_into::<web::HtmlElement>() {
            els.push(el);
        }
    }
    Some(els)
}

fn trail_dot_opacity(index: usize) -> f32 {
    0.5 - index as f32 * 0.06
}

fn wire_pointer(document: &web::Document, state: &Rc<RefCell<CursorState>>) {
    // mousemove: retarget, and snap everything on first appearance
    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let mut s = state.borrow_mut();
            let p = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            s.target = p;
            if !s.visible {
                s.visible = true;
                s.pos = p;
                s.trail.snap_to(p);
                dom::set_style(&s.cursor, "opacity", "1");
            }
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // mouseleave: fade out glyph and trail
    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            let mut s = state.borrow_mut();
            s.visible = false;
            dom::set_style(&s.cursor, "opacity", "0");
            for el in &s.trail_els {
                dom::set_style(el, "opacity", "0");
            }
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // mouseenter: restore the tapered trail opacities
    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            let s = state.borrow();
            for (i, el) in s.trail_els.iter().enumerate() {
                dom::set_style(el, "opacity", &format!("{:.2}", trail_dot_opacity(i)));
            }
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // click: fire-and-forget expanding ring
    {
        let state = state.clone();
        let document = document.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            if let Some(ripple) = spawn_ripple(&document, ev.client_x(), ev.client_y()) {
                state.borrow_mut().ripples.push(Ripple {
                    el: ripple,
                    age: 0.0,
                });
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn spawn_ripple(document: &web::Document, x: i32, y: i32) -> Option<web::HtmlElement> {
    let body = document.body()?;
    let el = document.create_element("div").ok()?;
    let _ = el.set_attribute(
        "style",
        &format!(
            "position: fixed; top: {y}px; left: {x}px; width: 0; height: 0; \
             border: 2px solid var(--color-primary); border-radius: 50%; \
             transform: translate(-50%, -50%); pointer-events: none; z-index: 9998; \
             opacity: {RIPPLE_START_OPACITY};"
        ),
    );
    body.append_child(&el).ok()?;
    el.dyn_into::<web::HtmlElement>().ok()
}

/// Interactive elements morph the glyph via a class the stylesheet picks up.
fn wire_hover_class(document: &web::Document, state: &Rc<RefCell<CursorState>>) {
    dom::for_each_selected(document, HOVER_TARGETS, |el| {
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
                let _ = state.borrow().cursor.class_list().add_1("is-hovering");
            }) as Box<dyn FnMut(_)>);
            let _ =
                el.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let state = state.clone();
            let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
                let _ = state.borrow().cursor.class_list().remove_1("is-hovering");
            }) as Box<dyn FnMut(_)>);
            let _ =
                el.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });
}
