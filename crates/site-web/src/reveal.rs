//! One-shot scroll reveals, kept deliberately thin: a declarative table of
//! (selector, trigger, deltas, stagger) rows interpreted by a single runner,
//! plus the scramble hookup for `[data-scramble]` headings.

use std::cell::RefCell;
use std::rc::Rc;

use site_core::text::{Scrambler, SCRAMBLE_FRAMES};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;

struct RevealBinding {
    selector: &'static str,
    from_x: f32,
    from_y: f32,
    from_opacity: f32,
    from_scale: f32,
    stagger_ms: u32,
    /// How far into the viewport the element must rise before triggering,
    /// as a percentage shaved off the bottom of the observer root.
    trigger_pct: u32,
}

const EASE: &str = "cubic-bezier(0.22, 1, 0.36, 1)";

const REVEAL_BINDINGS: &[RevealBinding] = &[
    RevealBinding { selector: ".section__title", from_x: 0.0, from_y: 40.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 15 },
    RevealBinding { selector: ".section__number", from_x: -20.0, from_y: 0.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 15 },
    RevealBinding { selector: ".profile__lead", from_x: 0.0, from_y: 30.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 20 },
    RevealBinding { selector: ".profile__bio p", from_x: 0.0, from_y: 20.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 150, trigger_pct: 25 },
    RevealBinding { selector: ".profile__philosophy", from_x: -30.0, from_y: 0.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 20 },
    RevealBinding { selector: ".timeline__item", from_x: 30.0, from_y: 0.0, from_opacity: 1.0, from_scale: 1.0, stagger_ms: 200, trigger_pct: 5 },
    RevealBinding { selector: ".profile__domain-block", from_x: 0.0, from_y: 40.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 15 },
    RevealBinding { selector: ".evidence__card", from_x: 60.0, from_y: 0.0, from_opacity: 1.0, from_scale: 1.0, stagger_ms: 120, trigger_pct: 10 },
    RevealBinding { selector: ".pipeline__tab", from_x: 0.0, from_y: 20.0, from_opacity: 1.0, from_scale: 1.0, stagger_ms: 80, trigger_pct: 15 },
    RevealBinding { selector: ".case__card", from_x: 0.0, from_y: 30.0, from_opacity: 1.0, from_scale: 1.0, stagger_ms: 150, trigger_pct: 10 },
    RevealBinding { selector: ".experience__item", from_x: 0.0, from_y: 30.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 150, trigger_pct: 15 },
    RevealBinding { selector: ".credential__card", from_x: 0.0, from_y: 40.0, from_opacity: 0.0, from_scale: 0.95, stagger_ms: 100, trigger_pct: 20 },
    RevealBinding { selector: ".contact__prompt", from_x: 0.0, from_y: 30.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 15 },
    RevealBinding { selector: ".contact__description", from_x: 0.0, from_y: 20.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 200, trigger_pct: 20 },
    RevealBinding { selector: ".contact__link", from_x: 0.0, from_y: 20.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 120, trigger_pct: 5 },
    RevealBinding { selector: ".contact__footer", from_x: 0.0, from_y: 20.0, from_opacity: 0.0, from_scale: 1.0, stagger_ms: 0, trigger_pct: 10 },
];

pub fn init(document: &web::Document) {
    for binding in REVEAL_BINDINGS {
        wire_binding(document, binding);
    }
    wire_scramble(document);
}

fn wire_binding(document: &web::Document, binding: &'static RevealBinding) {
    let mut index = 0u32;
    let mut elements = Vec::new();
    dom::for_each_selected(document, binding.selector, |el| {
        let _ = el.set_attribute(
            "data-reveal-delay",
            &(index * binding.stagger_ms).to_string(),
        );
        dom::set_style(&el, "transition", "none");
        dom::set_transform(
            &el,
            &format!(
                "translate({}px, {}px) scale({})",
                binding.from_x, binding.from_y, binding.from_scale
            ),
        );
        if binding.from_opacity < 1.0 {
            dom::set_style(&el, "opacity", &binding.from_opacity.to_string());
        }
        elements.push(el);
        index += 1;
    });
    if elements.is_empty() {
        return;
    }

    observe_once(&elements, binding.trigger_pct, move |el| {
        let delay = el
            .get_attribute("data-reveal-delay")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);
        dom::set_style(
            &el,
            "transition",
            &format!("transform 0.8s {EASE} {delay}ms, opacity 0.8s ease {delay}ms"),
        );
        dom::set_transform(&el, "translate(0px, 0px) scale(1)");
        dom::set_style(&el, "opacity", "1");
    });
}

/// Observe every element once: the callback fires at first intersection and
/// the element is immediately unobserved.
fn observe_once(
    elements: &[web::HtmlElement],
    trigger_pct: u32,
    on_trigger: impl Fn(web::HtmlElement) + 'static,
) {
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                if let Ok(el) = target.dyn_into::<web::HtmlElement>() {
                    on_trigger(el);
                }
            }
        },
    ) as Box<dyn FnMut(_, _)>);

    let options = web::IntersectionObserverInit::new();
    // Shrink the root from the bottom so "top at N% of viewport" triggers
    options.set_root_margin(&format!("0px 0px -{trigger_pct}% 0px"));
    options.set_threshold(&JsValue::from(0.0));
    match web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    {
        Ok(observer) => {
            for el in elements {
                observer.observe(el);
            }
        }
        Err(e) => log::warn!("IntersectionObserver error for reveals: {:?}", e),
    }
    callback.forget();
}

/// Headings opt in with `data-scramble`; the final text cycles through random
/// glyphs and resolves left to right once the element scrolls into view.
fn wire_scramble(document: &web::Document) {
    let mut elements = Vec::new();
    dom::for_each_selected(document, "[data-scramble]", |el| elements.push(el));
    if elements.is_empty() {
        return;
    }

    let scrambler = Rc::new(RefCell::new(Scrambler::new(js_sys::Date::now() as u64)));
    observe_once(&elements, 10, move |el| {
        let Some(final_text) = el.text_content() else {
            return;
        };
        run_scramble(el, final_text, scrambler.clone());
    });
}

fn run_scramble(el: web::HtmlElement, final_text: String, scrambler: Rc<RefCell<Scrambler>>) {
    let frame: Rc<RefCell<u32>> = Rc::new(RefCell::new(0));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut f = frame.borrow_mut();
        let progress = *f as f32 / SCRAMBLE_FRAMES as f32;
        el.set_text_content(Some(&scrambler.borrow_mut().frame(&final_text, progress)));
        if *f >= SCRAMBLE_FRAMES {
            // Done; stop requesting frames
            return;
        }
        *f += 1;
        drop(f);
        if let Some(w) = web::window() {
            if let Some(c) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(c.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(c) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(c.as_ref().unchecked_ref());
        }
    }
}
