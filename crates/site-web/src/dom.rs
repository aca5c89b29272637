use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn canvas_by_id(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Viewport size in CSS pixels.
pub fn inner_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w as f32, h as f32)
}

/// Maximum scrollable distance of the page, in CSS pixels.
pub fn scroll_max(window: &web::Window, document: &web::Document) -> f32 {
    let doc_height = document
        .body()
        .map(|b| b.scroll_height() as f32)
        .unwrap_or(0.0);
    let (_, vh) = inner_size(window);
    (doc_height - vh).max(0.0)
}

/// Renderer pixel ratio, capped at 2 like the rest of the site.
pub fn pixel_ratio(window: &web::Window) -> f64 {
    window.device_pixel_ratio().min(2.0)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

#[inline]
pub fn set_transform(el: &web::HtmlElement, value: &str) {
    set_style(el, "transform", value);
}

/// Run `f` for every element matched by `selector`. Missing or non-HTML
/// matches are silently skipped so partial markup never wires anything.
pub fn for_each_selected(
    document: &web::Document,
    selector: &str,
    mut f: impl FnMut(web::HtmlElement),
) {
    let Ok(list) = document.query_selector_all(selector) else {
        return;
    };
    for i in 0..list.length() {
        if let Some(node) = list.item(i) {
            if let Ok(el) = node.dyn_into::<web::HtmlElement>() {
                f(el);
            }
        }
    }
}
