use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, PointerEvent};

use crate::engine::{rand::MathRandom, Engine};
use crate::window;

/// Launches a shell from the bottom edge towards the pointer location.
pub fn on_pointer_down(engine: &Rc<RefCell<Engine>>, container: &HtmlElement, event: PointerEvent) {
    let bound = container.get_bounding_client_rect();

    let x = event.client_x() as f64 - bound.left();
    let target_y = event.client_y() as f64 - bound.top();

    engine
        .borrow_mut()
        .launch(&mut MathRandom, x, bound.height(), target_y);
}

/// Matches the canvas backing store to the container at the current
/// device pixel ratio, keeping drawing coordinates in logical units.
pub fn on_resize(
    container: &HtmlElement,
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    size: &Rc<Cell<(f64, f64)>>,
) -> Result<(), JsValue> {
    let bound = container.get_bounding_client_rect();
    let ratio = pixel_ratio();
    let (backing_width, backing_height) = backing_size(bound.width(), bound.height(), ratio);

    canvas.set_width(backing_width);
    canvas.set_height(backing_height);

    let style = canvas.style();
    style.set_property("width", &format!("{}px", bound.width()))?;
    style.set_property("height", &format!("{}px", bound.height()))?;

    context.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0)?;
    size.set((bound.width(), bound.height()));

    Ok(())
}

fn pixel_ratio() -> f64 {
    let ratio = window().device_pixel_ratio();

    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// Backing resolution for a logical size at a device pixel ratio,
/// floored per axis and never smaller than 1x1.
pub fn backing_size(width: f64, height: f64, ratio: f64) -> (u32, u32) {
    (
        ((width * ratio).floor() as u32).max(1),
        ((height * ratio).floor() as u32).max(1),
    )
}
