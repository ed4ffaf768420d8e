//! Software-rendered drawing surface using `minifb`.
//!
//! Scene bookkeeping (which shapes exist, their parameters, visibility) is
//! delegated to a [`Canvas`]; this module only owns the window and turns
//! the visible circles into pixels on `render_all`.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use shape_pool::{Canvas, CircleParams, DrawingSurface, Point2, ShapeId, SurfaceError};

use crate::error::AppError;

pub const BG_COLOR: u32 = 0xFF1A1A2E;

// ════════════════════════════════════════════════════════════════════════════
// WindowSurface
// ════════════════════════════════════════════════════════════════════════════

pub struct WindowSurface {
    window: Window,
    buf:    Vec<u32>,
    canvas: Canvas,
    title:  String,
}

impl WindowSurface {
    pub fn new(
        title:      &str,
        width:      usize,
        height:     usize,
        max_shapes: Option<usize>,
    ) -> Result<Self, AppError> {
        let mut window = Window::new(
            title,
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        let mut canvas = Canvas::new(width, height);
        if let Some(max) = max_shapes {
            canvas = canvas.with_max_shapes(max);
        }

        Ok(WindowSurface {
            window,
            buf: vec![BG_COLOR; width * height],
            canvas,
            title: title.to_string(),
        })
    }

    /// True once the user closed the window or pressed `Q` / `Escape`.
    pub fn poll_quit(&self) -> bool {
        !self.window.is_open()
            || self.window.is_key_down(Key::Escape)
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
    }

    /// Keep the window responsive between redraws by re-presenting the
    /// last frame.
    pub fn pump(&mut self) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window.update_with_buffer(&self.buf, w, h).ok();
    }
}

impl DrawingSurface for WindowSurface {
    fn add(&mut self, params: CircleParams) -> Result<ShapeId, SurfaceError> {
        self.canvas.add(params)
    }

    fn set(&mut self, id: ShapeId, params: CircleParams) -> Result<(), SurfaceError> {
        self.canvas.set(id, params)
    }

    fn set_visible(&mut self, id: ShapeId, visible: bool) -> Result<(), SurfaceError> {
        self.canvas.set_visible(id, visible)
    }

    fn render_all(&mut self) -> Result<(), SurfaceError> {
        self.canvas.render_all()?;
        let (w, h) = (self.canvas.width(), self.canvas.height());
        paint(&mut self.buf, w, h, &self.canvas);

        self.window.set_title(&format!(
            "{}  |  {} / {} shapes visible",
            self.title,
            self.canvas.visible_count(),
            self.canvas.len(),
        ));
        self.window
            .update_with_buffer(&self.buf, w, h)
            .map_err(|e| SurfaceError::Backend(e.to_string()))
    }

    fn center(&self) -> Point2 {
        self.canvas.center()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rasterization
// ════════════════════════════════════════════════════════════════════════════

/// Clear `buf` and paint every visible shape of `canvas` in registration
/// order (later shapes on top).
pub fn paint(buf: &mut [u32], w: usize, h: usize, canvas: &Canvas) {
    buf.fill(BG_COLOR);
    for shape in canvas.shapes().iter().filter(|s| s.visible) {
        fill_circle(buf, w, h, shape);
    }
}

/// Fill one circle, clipped to the `w × h` buffer.
///
/// Shapes with non-finite geometry are skipped; the projection passes
/// NaN/∞ through untouched and there is nothing sensible to draw.
pub fn fill_circle(buf: &mut [u32], w: usize, h: usize, c: &CircleParams) {
    if !(c.left.is_finite() && c.top.is_finite() && c.radius.is_finite()) || c.radius <= 0.0 {
        return;
    }
    let color = c.fill.argb();
    let r2 = c.radius * c.radius;

    let y0 = (c.top  - c.radius).floor().max(0.0) as usize;
    let y1 = (c.top  + c.radius).ceil().min(h as f64);
    let x0 = (c.left - c.radius).floor().max(0.0) as usize;
    let x1 = (c.left + c.radius).ceil().min(w as f64);
    if y1 <= 0.0 || x1 <= 0.0 { return; }
    let (y1, x1) = (y1 as usize, x1 as usize);

    for row in y0..y1 {
        let dy = row as f64 + 0.5 - c.top;
        for col in x0..x1 {
            let dx = col as f64 + 0.5 - c.left;
            if dx * dx + dy * dy <= r2 {
                buf[row * w + col] = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_pool::Color;

    const W: usize = 40;
    const H: usize = 30;

    fn circle(left: f64, top: f64, radius: f64, fill: Color) -> CircleParams {
        CircleParams { left, top, radius, fill, visible: true }
    }

    fn count(buf: &[u32], color: u32) -> usize {
        buf.iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn fills_pixels_inside_radius() {
        let mut buf = vec![BG_COLOR; W * H];
        fill_circle(&mut buf, W, H, &circle(20.0, 15.0, 5.0, Color::Green));
        assert_eq!(buf[15 * W + 20], Color::Green.argb());
        assert_eq!(buf[0], BG_COLOR);
        // Area ≈ πr² ≈ 78.5
        let n = count(&buf, Color::Green.argb());
        assert!((70..=90).contains(&n), "filled {n}");
    }

    #[test]
    fn clips_at_edges() {
        let mut buf = vec![BG_COLOR; W * H];
        fill_circle(&mut buf, W, H, &circle(0.0, 0.0, 8.0, Color::Red));
        fill_circle(&mut buf, W, H, &circle(W as f64, H as f64, 8.0, Color::Red));
        assert_eq!(buf[0], Color::Red.argb());
        assert_eq!(buf[W * H - 1], Color::Red.argb());
    }

    #[test]
    fn fully_off_screen_draws_nothing() {
        let mut buf = vec![BG_COLOR; W * H];
        fill_circle(&mut buf, W, H, &circle(-50.0, -50.0, 5.0, Color::Red));
        fill_circle(&mut buf, W, H, &circle(500.0, 10.0, 5.0, Color::Red));
        assert_eq!(count(&buf, BG_COLOR), W * H);
    }

    #[test]
    fn non_finite_is_skipped() {
        let mut buf = vec![BG_COLOR; W * H];
        fill_circle(&mut buf, W, H, &circle(f64::NAN, 10.0, 5.0, Color::Red));
        fill_circle(&mut buf, W, H, &circle(10.0, 10.0, f64::INFINITY, Color::Red));
        assert_eq!(count(&buf, BG_COLOR), W * H);
    }

    #[test]
    fn paint_skips_hidden_and_layers_in_order() {
        let mut canvas = Canvas::new(W, H);
        canvas.add(circle(10.0, 10.0, 4.0, Color::Blue)).unwrap();
        canvas.add(circle(10.0, 10.0, 2.0, Color::Purple)).unwrap();
        let hidden = canvas.add(circle(30.0, 20.0, 4.0, Color::Green)).unwrap();
        canvas.set_visible(hidden, false).unwrap();

        let mut buf = vec![0; W * H];
        paint(&mut buf, W, H, &canvas);
        assert_eq!(buf[10 * W + 10], Color::Purple.argb());
        assert_eq!(count(&buf, Color::Green.argb()), 0);
        assert!(count(&buf, Color::Blue.argb()) > 0);
    }
}
