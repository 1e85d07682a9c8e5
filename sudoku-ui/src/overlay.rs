//! Aligns the solution overlay with the uploaded photo: positions the
//! external perspective-handle widget at the solver-detected corners and
//! paints a static marker layer over them.

use sudoku_types::geometry::{map_corners_to_display, Size, CORNER_NAMES};
use sudoku_types::Point;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement};

use crate::interop;

/// Marker radius in device pixels of the source image.
pub const MARKER_RADIUS: f64 = 10.0;

const MARKER_FILL: &str = "rgba(220, 38, 38, 0.85)";

#[wasm_bindgen]
extern "C" {
    /// Four-point perspective-handle widget. External JS; only its
    /// manipulation contract is consumed here.
    pub type CornerPin;

    #[wasm_bindgen(constructor)]
    pub fn new(container: &Element, width: f64, height: f64) -> CornerPin;

    /// Moves one named corner handle, display-space coordinates.
    #[wasm_bindgen(method, js_name = setCorner)]
    pub fn set_corner(this: &CornerPin, name: &str, x: f64, y: f64);

    /// Returns 0 when the current corner layout is valid.
    #[wasm_bindgen(method, js_name = checkError)]
    pub fn check_error(this: &CornerPin) -> i32;

    /// Commits the pending corner positions to the screen.
    #[wasm_bindgen(method)]
    pub fn update(this: &CornerPin);
}

/// Owns the handle widget instance for the page's single puzzle stage.
pub struct HandleOverlay {
    pin: CornerPin,
}

impl HandleOverlay {
    /// Builds the handle widget over the grid container. `None` until the
    /// container is mounted with a measurable layout.
    pub fn mount(container_id: &str) -> Option<Self> {
        let container = interop::element_by_id(container_id)?;
        let (width, height) = interop::client_size(container_id)?;
        if !Size::new(width, height).is_measurable() {
            return None;
        }
        Some(Self {
            pin: CornerPin::new(&container, width, height),
        })
    }

    /// Repositions the four handles for corners given in source-image pixel
    /// space. Returns `false` without touching the handles when the image
    /// has not loaded, the container has no layout, or the widget rejects
    /// the layout.
    pub fn reposition(&self, corners: &[Point; 4], image_id: &str, container_id: &str) -> bool {
        let Some((natural_w, natural_h)) = interop::natural_image_size(image_id) else {
            return false;
        };
        let Some((display_w, display_h)) = interop::client_size(container_id) else {
            return false;
        };

        let natural = Size::new(natural_w, natural_h);
        let display = Size::new(display_w, display_h);
        let Some(mapped) = map_corners_to_display(corners, natural, display) else {
            log::debug!(
                "overlay skipped: image {natural_w}x{natural_h}, container {display_w}x{display_h}"
            );
            return false;
        };

        for (name, point) in CORNER_NAMES.iter().zip(mapped.iter()) {
            self.pin.set_corner(name, point.x, point.y);
        }

        if self.pin.check_error() != 0 {
            log::warn!("handle widget rejected the corner layout");
            return false;
        }
        self.pin.update();
        true
    }
}

/// Paints solid circular markers at the solver corners onto a canvas sized
/// to the source image, returned as a data URL for an overlay image.
pub fn corner_marker_layer(corners: &[Point; 4], image_id: &str) -> Option<String> {
    let (natural_w, natural_h) = interop::natural_image_size(image_id)?;
    if !Size::new(natural_w, natural_h).is_measurable() {
        return None;
    }

    let document = web_sys::window()?.document()?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    canvas.set_width(natural_w as u32);
    canvas.set_height(natural_h as u32);

    let context = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .ok()?;

    context.set_fill_style_str(MARKER_FILL);
    for point in corners {
        context.begin_path();
        context
            .arc(point.x, point.y, MARKER_RADIUS, 0.0, std::f64::consts::TAU)
            .ok()?;
        context.fill();
    }

    canvas.to_data_url().ok()
}
