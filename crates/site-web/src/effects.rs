//! Interaction effects controller: one shared per-frame tick drives parallax,
//! magnetic pull, 3D tilt and the section color morph from a single input
//! snapshot, which the tick itself advances (the page's one step per frame).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use site_core::{
    magnetic_target, parallax_offset, section_color, tilt_target, EasedTilt, EasedVec2,
    InputState, MAGNETIC_SMOOTHING, MAGNETIC_STRENGTH, MAGNETIC_STRENGTH_STRONG, SECTION_COLORS,
    TILT_HOVER_SCALE, TILT_SMOOTHING,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::frame::FrameLoop;

// Depth layering for the hero: higher sensitivity moves more
const PARALLAX_LAYERS: &[(&str, f32)] = &[
    (".hero__blob--1", 0.04),
    (".hero__blob--2", 0.06),
    (".hero__blob--3", 0.03),
    (".floating-marker--1", 0.025),
    (".floating-marker--2", 0.035),
    (".floating-marker--3", 0.045),
    (".floating-marker--4", 0.03),
    (".hero__orbit", 0.015),
    (".hero__name", 0.008),
    (".hero__tagline", 0.012),
];

const MAGNETIC_SELECTORS: &str =
    ".case__toggle, .hero__badge, .contact__link, .hero__stat, .credential__card";
const TILT_SELECTORS: &str = ".evidence__card, .capability__card";
const GLARE_SELECTORS: &str = ".evidence__card, .credential__card";

/// Element bounds captured at hover entry; not live-tracked while hovering.
#[derive(Clone, Copy, Default)]
struct HoverCapture {
    hovering: bool,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
}

impl HoverCapture {
    #[inline]
    fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

struct ParallaxLayer {
    el: web::HtmlElement,
    sensitivity: f32,
}

struct MagneticEntry {
    el: web::HtmlElement,
    hover: Rc<Cell<HoverCapture>>,
    strength: f32,
    eased: EasedVec2,
}

struct TiltEntry {
    el: web::HtmlElement,
    hover: Rc<Cell<HoverCapture>>,
    eased: EasedTilt,
}

struct EffectsState {
    input: Rc<RefCell<InputState>>,
    parallax: Vec<ParallaxLayer>,
    magnetic: Vec<MagneticEntry>,
    tilt: Vec<TiltEntry>,
    body: Option<web::HtmlElement>,
    last_bg: Option<[u8; 3]>,
}

pub struct InteractionEffects {
    state: Rc<RefCell<EffectsState>>,
    frame_loop: RefCell<Option<FrameLoop>>,
}

impl InteractionEffects {
    pub fn new(document: &web::Document, input: Rc<RefCell<InputState>>) -> Self {
        let mut parallax = Vec::new();
        for (selector, sensitivity) in PARALLAX_LAYERS {
            if let Ok(Some(el)) = document.query_selector(selector) {
                if let Ok(el) = el.dyn_into::<web::HtmlElement>() {
                    parallax.push(ParallaxLayer {
                        el,
                        sensitivity: *sensitivity,
                    });
                }
            }
        }

        let mut magnetic = Vec::new();
        dom::for_each_selected(document, MAGNETIC_SELECTORS, |el| {
            let strength = if el.class_list().contains("contact__link") {
                MAGNETIC_STRENGTH_STRONG
            } else {
                MAGNETIC_STRENGTH
            };
            dom::set_style(&el, "transition", "none");
            dom::set_style(&el, "will-change", "transform");
            let hover = wire_hover_capture(&el);
            magnetic.push(MagneticEntry {
                el,
                hover,
                strength,
                eased: EasedVec2::new(MAGNETIC_SMOOTHING),
            });
        });

        let mut tilt = Vec::new();
        dom::for_each_selected(document, TILT_SELECTORS, |el| {
            dom::set_style(&el, "transform-style", "preserve-3d");
            dom::set_style(&el, "will-change", "transform");
            let hover = wire_hover_capture(&el);
            tilt.push(TiltEntry {
                el,
                hover,
                eased: EasedTilt::new(TILT_SMOOTHING),
            });
        });

        dom::for_each_selected(document, GLARE_SELECTORS, |el| {
            wire_glare(document, &el);
        });

        log::info!(
            "interaction effects: {} parallax, {} magnetic, {} tilt",
            parallax.len(),
            magnetic.len(),
            tilt.len()
        );

        Self {
            state: Rc::new(RefCell::new(EffectsState {
                input,
                parallax,
                magnetic,
                tilt,
                body: document.body(),
                last_bg: None,
            })),
            frame_loop: RefCell::new(None),
        }
    }

    /// Begin the shared tick. Idempotent.
    pub fn start(&self) {
        let mut slot = self.frame_loop.borrow_mut();
        if slot.is_some() {
            return;
        }
        let state = self.state.clone();
        *slot = Some(FrameLoop::start(move || state.borrow_mut().tick()));
    }

    /// Cancel the frame loop so a torn-down page leaks nothing that ticks.
    pub fn destroy(&self) {
        if let Some(frame_loop) = self.frame_loop.borrow_mut().take() {
            frame_loop.cancel();
        }
    }
}

impl EffectsState {
    fn tick(&mut self) {
        // The one per-frame advance of the shared snapshot
        self.input.borrow_mut().step();
        let (smoothed, raw_px, progress) = {
            let inp = self.input.borrow();
            (
                inp.pointer.smoothed,
                inp.pointer.raw_px,
                inp.scroll.progress(),
            )
        };

        for layer in &self.parallax {
            let off = parallax_offset(smoothed, layer.sensitivity);
            dom::set_transform(&layer.el, &format!("translate({:.2}px, {:.2}px)", off.x, off.y));
        }

        for entry in &mut self.magnetic {
            let h = entry.hover.get();
            entry.eased.target = if h.hovering {
                magnetic_target(raw_px, h.center(), entry.strength)
            } else {
                Vec2::ZERO
            };
            entry.eased.step();
            let cur = entry.eased.current;
            dom::set_transform(&entry.el, &format!("translate({:.2}px, {:.2}px)", cur.x, cur.y));
        }

        for entry in &mut self.tilt {
            let h = entry.hover.get();
            let (rx, ry) = if h.hovering && h.width > 0.0 && h.height > 0.0 {
                let fx = (raw_px.x - h.left) / h.width;
                let fy = (raw_px.y - h.top) / h.height;
                tilt_target(fx, fy)
            } else {
                (0.0, 0.0)
            };
            entry.eased.target_rx = rx;
            entry.eased.target_ry = ry;
            entry.eased.step();
            let scale = if h.hovering { TILT_HOVER_SCALE } else { 1.0 };
            dom::set_transform(
                &entry.el,
                &format!(
                    "perspective(800px) rotateX({:.2}deg) rotateY({:.2}deg) scale({})",
                    entry.eased.rx, entry.eased.ry, scale
                ),
            );
        }

        let bg = section_color(progress, &SECTION_COLORS);
        if self.last_bg != Some(bg) {
            self.last_bg = Some(bg);
            if let Some(body) = &self.body {
                dom::set_style(
                    body,
                    "background-color",
                    &format!("rgb({}, {}, {})", bg[0], bg[1], bg[2]),
                );
            }
        }
    }
}

/// Hover bookkeeping: bounds are captured once at entry, cleared at exit. The
/// tick computes targets from these so every element sees the same per-frame
/// pointer snapshot.
fn wire_hover_capture(el: &web::HtmlElement) -> Rc<Cell<HoverCapture>> {
    let capture: Rc<Cell<HoverCapture>> = Rc::new(Cell::new(HoverCapture::default()));
    {
        let capture = capture.clone();
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            let rect = target.get_bounding_client_rect();
            capture.set(HoverCapture {
                hovering: true,
                left: rect.left() as f32,
                top: rect.top() as f32,
                width: rect.width() as f32,
                height: rect.height() as f32,
            });
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let capture = capture.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            let mut c = capture.get();
            c.hovering = false;
            capture.set(c);
        }) as Box<dyn FnMut(_)>);
        let _ = el.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    capture
}

/// Radial highlight that follows the pointer inside the card. Event-driven on
/// purpose: the position needs no smoothing, the CSS transition hides it.
fn wire_glare(document: &web::Document, card: &web::HtmlElement) {
    let Ok(glare) = document.create_element("div") else {
        return;
    };
    glare.set_class_name("card-glare");
    let _ = glare.set_attribute(
        "style",
        "position: absolute; inset: 0; border-radius: inherit; pointer-events: none; \
         opacity: 0; transition: opacity 0.3s ease; z-index: 2; \
         background: radial-gradient(circle at var(--glare-x, 50%) var(--glare-y, 50%), \
         rgba(37, 99, 235, 0.12) 0%, transparent 60%);",
    );
    dom::set_style(card, "position", "relative");
    if card.append_child(&glare).is_err() {
        return;
    }
    let Ok(glare) = glare.dyn_into::<web::HtmlElement>() else {
        return;
    };

    {
        let glare = glare.clone();
        let card = card.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let rect = card.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let x = (ev.client_x() as f64 - rect.left()) / rect.width() * 100.0;
            let y = (ev.client_y() as f64 - rect.top()) / rect.height() * 100.0;
            dom::set_style(&glare, "--glare-x", &format!("{:.1}%", x));
            dom::set_style(&glare, "--glare-y", &format!("{:.1}%", y));
            dom::set_style(&glare, "opacity", "1");
        }) as Box<dyn FnMut(_)>);
        let _ =
            card.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            dom::set_style(&glare, "opacity", "0");
        }) as Box<dyn FnMut(_)>);
        let _ =
            card.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
