//! Visibility-gated canvas visualizers.
//!
//! The EEG trace, voice spectrum and hex stream share one looper: an
//! IntersectionObserver flips the gate, the RAF cycle stops requesting frames
//! while the canvas is off-screen, and backing-store sizing is recomputed
//! lazily from a resize-dirty flag. Only the draw arm differs per kind.

use std::cell::RefCell;
use std::rc::Rc;

use site_core::viz::{EegTrace, HexStream, LoopGate, VoiceBars, VOICE_BAR_COUNT};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;

pub enum VizKind {
    Eeg(EegTrace),
    Voice(VoiceBars),
    Hex(HexStream),
}

impl VizKind {
    pub fn eeg(seed: u64) -> Self {
        Self::Eeg(EegTrace::new(seed))
    }
    pub fn voice() -> Self {
        Self::Voice(VoiceBars::new(VOICE_BAR_COUNT))
    }
    pub fn hex(seed: u64) -> Self {
        Self::Hex(HexStream::new(seed))
    }
}

struct Looper {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    gate: LoopGate,
    dirty: bool,
    css_w: f64,
    css_h: f64,
    kind: VizKind,
}

/// Wire one visualizer canvas. Missing markup or a failed 2D context skips
/// the visualizer and leaves the rest of the page alone.
pub fn spawn_gated_looper(document: &web::Document, canvas_id: &str, kind: VizKind) {
    let Some(canvas) = dom::canvas_by_id(document, canvas_id) else {
        log::debug!("missing #{canvas_id}; visualizer skipped");
        return;
    };
    let ctx = match canvas.get_context("2d") {
        Ok(Some(obj)) => match obj.dyn_into::<web::CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => {
            log::warn!("2d context unavailable for #{canvas_id}");
            return;
        }
    };

    let state = Rc::new(RefCell::new(Looper {
        canvas: canvas.clone(),
        ctx,
        gate: LoopGate::new(),
        dirty: false,
        css_w: 0.0,
        css_h: 0.0,
        kind,
    }));
    state.borrow_mut().apply_backing_size();

    {
        let state = state.clone();
        let closure = Closure::wrap(Box::new(move || {
            state.borrow_mut().dirty = true;
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            let _ = w.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // Self-requeueing tick; the gate decides whether it keeps going
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let state_tick = state.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut s = state_tick.borrow_mut();
        if !s.gate.frame() {
            return;
        }
        if s.dirty {
            s.dirty = false;
            s.apply_backing_size();
        }
        s.draw(js_sys::Date::now());
        drop(s);
        if let Some(w) = web::window() {
            if let Some(c) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(c.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));

    let observer_cb = {
        let state = state.clone();
        let tick = tick.clone();
        Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                        continue;
                    };
                    let start = state.borrow_mut().gate.set_visible(entry.is_intersecting());
                    if start {
                        if let Some(w) = web::window() {
                            if let Some(c) = tick.borrow().as_ref() {
                                let _ = w.request_animation_frame(c.as_ref().unchecked_ref());
                            }
                        }
                    }
                }
            },
        ) as Box<dyn FnMut(_, _)>)
    };
    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from(0.2));
    match web::IntersectionObserver::new_with_options(
        observer_cb.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer.observe(&canvas),
        Err(e) => log::warn!("IntersectionObserver error for #{canvas_id}: {:?}", e),
    }
    observer_cb.forget();
}

impl Looper {
    fn apply_backing_size(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        let dpr = dom::pixel_ratio(&window);
        let rect = self.canvas.get_bounding_client_rect();
        self.css_w = rect.width();
        self.css_h = rect.height();
        self.canvas.set_width((rect.width() * dpr).max(1.0) as u32);
        self.canvas.set_height((rect.height() * dpr).max(1.0) as u32);
        // set_width resets the context transform; re-apply the dpr scale
        let _ = self.ctx.scale(dpr, dpr);
    }

    fn draw(&mut self, now_ms: f64) {
        let (w, h) = (self.css_w, self.css_h);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        match &mut self.kind {
            VizKind::Eeg(trace) => {
                for i in 0..trace.channels().len() {
                    let ch = trace.channels()[i];
                    let color = if ch.accent {
                        format!("rgba(5, 150, 105, {})", ch.alpha)
                    } else {
                        format!("rgba(37, 99, 235, {})", ch.alpha)
                    };
                    self.ctx.begin_path();
                    self.ctx.set_stroke_style_str(&color);
                    self.ctx.set_line_width(1.5);
                    self.ctx.set_line_join("round");
                    let baseline = h * f64::from(ch.y_frac);
                    for x in 0..w.max(0.0) as i32 {
                        let y = baseline + f64::from(trace.sample(x as f32, ch));
                        if x == 0 {
                            self.ctx.move_to(f64::from(x), y);
                        } else {
                            self.ctx.line_to(f64::from(x), y);
                        }
                    }
                    self.ctx.stroke();
                }
                trace.advance();
            }
            VizKind::Voice(bars) => {
                bars.step(now_ms);
                let count = bars.heights().len().max(1);
                let bar_width = w / count as f64;
                let padding = 2.0;
                for (i, height) in bars.heights().iter().enumerate() {
                    let bar_h = f64::from(*height);
                    let x = i as f64 * bar_width + padding;
                    let y = (h - bar_h) / 2.0;
                    let gradient = self.ctx.create_linear_gradient(0.0, y, 0.0, y + bar_h);
                    let _ = gradient.add_color_stop(0.0, "rgba(37, 99, 235, 0.8)");
                    let _ = gradient.add_color_stop(1.0, "rgba(5, 150, 105, 0.8)");
                    self.ctx.set_fill_style_canvas_gradient(&gradient);
                    self.ctx
                        .fill_rect(x, y, (bar_width - padding * 2.0).max(0.0), bar_h);
                }
            }
            VizKind::Hex(stream) => {
                stream.tick(now_ms);
                self.ctx.set_font("12px \"JetBrains Mono\", monospace");
                for (i, row) in stream.rows().enumerate() {
                    let y = (i + 1) as f64 * 20.0;
                    let opacity = HexStream::opacity_for(i);
                    let color = if row.critical {
                        format!("rgba(220, 38, 38, {})", opacity)
                    } else {
                        format!("rgba(37, 99, 235, {})", opacity * 0.6)
                    };
                    self.ctx.set_fill_style_str(&color);
                    let _ = self.ctx.fill_text(&row.text, 10.0, y);
                    if row.critical && i == 0 {
                        self.ctx
                            .set_fill_style_str(&format!("rgba(5, 150, 105, {})", opacity));
                        let _ = self.ctx.fill_text("REPAIRING...", 160.0, y);
                    }
                }
            }
        }
    }
}
