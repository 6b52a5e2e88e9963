use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

/// Drawing surface for the simulation, in logical units.
///
/// The engine never touches the canvas directly; production wraps a 2d
/// context, tests record calls instead.
pub trait Painter {
    fn clear(&mut self, width: f64, height: f64);
    fn stroke_trail(&mut self, trail: &[(f64, f64)], color: &str, width: f64)
        -> Result<(), JsValue>;
    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: &str,
        alpha: f64,
    ) -> Result<(), JsValue>;
}

/// Paints onto a 2d canvas context.
pub struct CanvasPainter<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(context: &'a CanvasRenderingContext2d) -> CanvasPainter<'a> {
        CanvasPainter { context }
    }
}

impl Painter for CanvasPainter<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn stroke_trail(
        &mut self,
        trail: &[(f64, f64)],
        color: &str,
        width: f64,
    ) -> Result<(), JsValue> {
        if trail.len() < 2 {
            return Ok(());
        }

        self.context.save();
        self.context.begin_path();
        self.context.move_to(trail[0].0, trail[0].1);

        for (x, y) in trail {
            self.context.line_to(*x, *y);
        }

        #[allow(deprecated)]
        self.context.set_stroke_style(&JsValue::from_str(color));
        self.context.set_line_width(width);
        self.context.set_line_cap("round");
        self.context.stroke();
        self.context.restore();

        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        color: &str,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.context.save();
        self.context.set_global_alpha(alpha);
        self.context.begin_path();
        self.context.arc(x, y, radius, 0.0, TAU)?;
        #[allow(deprecated)]
        self.context.set_fill_style(&JsValue::from_str(color));
        self.context.fill();
        self.context.restore();

        Ok(())
    }
}

#[cfg(test)]
pub(crate) struct RecordedCircle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub alpha: f64,
}

/// Records draw calls so simulation tests can assert on them.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingPainter {
    pub clears: usize,
    pub trails: Vec<(usize, f64)>,
    pub circles: Vec<RecordedCircle>,
}

#[cfg(test)]
impl Painter for RecordingPainter {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
    }

    fn stroke_trail(
        &mut self,
        trail: &[(f64, f64)],
        _color: &str,
        width: f64,
    ) -> Result<(), JsValue> {
        self.trails.push((trail.len(), width));

        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        _color: &str,
        alpha: f64,
    ) -> Result<(), JsValue> {
        self.circles.push(RecordedCircle {
            x,
            y,
            radius,
            alpha,
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_painter_counts_calls() {
        let mut painter = RecordingPainter::default();

        painter.clear(800.0, 600.0);
        painter
            .stroke_trail(&[(0.0, 0.0), (1.0, 1.0)], "red", 2.0)
            .unwrap();
        painter.fill_circle(5.0, 6.0, 1.5, "red", 0.5).unwrap();

        assert_eq!(painter.clears, 1);
        assert_eq!(painter.trails, vec![(2, 2.0)]);
        assert_eq!(painter.circles.len(), 1);
        assert_eq!(painter.circles[0].x, 5.0);
        assert_eq!(painter.circles[0].y, 6.0);
        assert_eq!(painter.circles[0].radius, 1.5);
    }
}
