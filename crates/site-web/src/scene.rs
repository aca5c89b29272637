//! Render surface: owns the frame loop, the camera and the registered
//! drawables, and issues one render call per frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Mat4;
use instant::Instant;
use site_core::{particle_count_for, Camera, InputState, ParticleField};
use web_sys as web;

use crate::dom;
use crate::frame::FrameLoop;
use crate::render::{GpuState, Instance};

/// Drawable contract: advanced in registration order every frame, then asked
/// for its world-space instances.
pub trait SceneObject {
    fn update(&mut self, elapsed: f32, dt: f32);
    fn emit(&self, out: &mut Vec<Instance>);
}

/// The particle field wired to the shared input snapshot.
pub struct ParticleLayer {
    field: ParticleField,
    input: Rc<RefCell<InputState>>,
    burst_queued: Rc<Cell<bool>>,
}

impl ParticleLayer {
    pub fn new(
        input: Rc<RefCell<InputState>>,
        burst_queued: Rc<Cell<bool>>,
        seed: u64,
    ) -> Self {
        let (dpr, vw) = match web::window() {
            Some(w) => (w.device_pixel_ratio(), dom::inner_size(&w).0 as f64),
            None => (1.0, f64::from(u16::MAX)),
        };
        let count = particle_count_for(dpr, vw);
        log::info!("particle field: {} points", count);
        Self {
            field: ParticleField::new(count, seed),
            input,
            burst_queued,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }
}

impl SceneObject for ParticleLayer {
    fn update(&mut self, elapsed: f32, dt: f32) {
        if self.burst_queued.take() {
            self.field.trigger_burst();
        }
        let (pointer, speed, scroll_y) = {
            let inp = self.input.borrow();
            (
                inp.pointer.smoothed_y_up(),
                inp.pointer.speed,
                inp.scroll.y,
            )
        };
        self.field.update(elapsed, dt, pointer, speed, scroll_y);
    }

    fn emit(&self, out: &mut Vec<Instance>) {
        let model: Mat4 = self.field.model_matrix();
        for p in self.field.particles() {
            out.push(Instance::new(model.transform_point3(p.current), p.size, p.color));
        }
    }
}

pub struct Scene {
    canvas: web::HtmlCanvasElement,
    gpu: GpuState<'static>,
    camera: Camera,
    objects: Vec<Box<dyn SceneObject>>,
    input: Rc<RefCell<InputState>>,
    resize_dirty: Rc<Cell<bool>>,
    started: Instant,
    last: Instant,
    scratch: Vec<Instance>,
}

impl Scene {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        gpu: GpuState<'static>,
        input: Rc<RefCell<InputState>>,
        resize_dirty: Rc<Cell<bool>>,
    ) -> Self {
        let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;
        let now = Instant::now();
        Self {
            canvas,
            gpu,
            camera: Camera::backdrop(aspect),
            objects: Vec::new(),
            input,
            resize_dirty,
            started: now,
            last: now,
            scratch: Vec::new(),
        }
    }

    pub fn add(&mut self, object: Box<dyn SceneObject>) {
        self.objects.push(object);
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last).as_secs_f32();
        let elapsed = (now - self.started).as_secs_f32();
        self.last = now;

        // Resize work deferred to the frame so event storms cost one relayout
        if self.resize_dirty.take() {
            dom::sync_canvas_backing_size(&self.canvas);
        }
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.camera.set_aspect(w as f32 / h.max(1) as f32);
        self.gpu.resize_if_needed(w, h);

        for obj in &mut self.objects {
            obj.update(elapsed, dt);
        }

        self.scratch.clear();
        for obj in &self.objects {
            obj.emit(&mut self.scratch);
        }

        let speed = self.input.borrow().pointer.speed;
        let pixel_ratio = web::window().map(|w| dom::pixel_ratio(&w)).unwrap_or(1.0) as f32;
        if let Err(e) = self
            .gpu
            .render(&self.camera, &self.scratch, elapsed, speed, pixel_ratio)
        {
            log::error!("render error: {:?}", e);
        }
    }
}

/// Leak a canvas clone so the surface can borrow it for 'static, then bring
/// up the device; `None` disables the backdrop without touching the page.
pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    max_instances: usize,
) -> Option<GpuState<'static>> {
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match GpuState::new(leaked_canvas, max_instances).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(scene: Rc<RefCell<Scene>>) -> FrameLoop {
    FrameLoop::start(move || scene.borrow_mut().frame())
}
