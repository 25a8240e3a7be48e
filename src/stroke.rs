// The drawing canvas: a fixed-size RGB32 bitmap plus the stroke state machine.
// Strokes are rasterized in software as round-capped thick segments; since each
// segment's disc-swept shape covers its endpoints, consecutive segments also get
// round joins for free.

use crate::input::{PointerEvent, StrokeAction, StrokeState};
use crate::types::{FrameBuffer, Point, Rgb32, DODGER_BLUE, WHITE};

/// Fixed rendering parameters applied to every segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    pub width: f32,   // full stroke width in pixels
    pub color: Rgb32,
}

impl Default for Pen {
    fn default() -> Self {
        Self { width: 15.0, color: DODGER_BLUE }
    }
}

pub struct StrokeSurface {
    bitmap: FrameBuffer,
    state: StrokeState,
    pen: Pen,
    background: Rgb32,
    needs_redraw: bool,
}

impl StrokeSurface {
    /// A white `width x height` canvas with the default pen.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_pen(width, height, Pen::default())
    }

    pub fn with_pen(width: usize, height: usize, pen: Pen) -> Self {
        assert!(width > 0 && height > 0, "canvas must not be empty");
        Self {
            bitmap: FrameBuffer::filled(width, height, WHITE),
            state: StrokeState::Idle,
            pen,
            background: WHITE,
            needs_redraw: true,
        }
    }

    pub fn state(&self) -> StrokeState { self.state }
    pub fn is_stroking(&self) -> bool { self.state.is_active() }

    /// Start a stroke at `point`. Ignored if one is already in progress.
    pub fn begin_stroke(&mut self, point: Point) {
        self.dispatch(PointerEvent::Press(point));
    }

    /// Draw from the last point to `point`. Ignored when no stroke is active.
    pub fn extend_stroke(&mut self, point: Point) {
        self.dispatch(PointerEvent::Move(point));
    }

    /// Finish the current stroke, if any.
    pub fn end_stroke(&mut self) {
        self.dispatch(PointerEvent::Release);
    }

    /// Feed one pointer event through the state machine, painting if it produced a segment.
    pub fn dispatch(&mut self, event: PointerEvent) {
        if let StrokeAction::Segment { from, to } = self.state.step(event) {
            draw_segment(&mut self.bitmap, from, to, &self.pen);
            self.needs_redraw = true;
        }
    }

    /// Wipe every pixel back to the background. The stroke state is left alone.
    pub fn clear(&mut self) {
        self.bitmap.fill(self.background);
        self.needs_redraw = true;
    }

    /// Read-only view of the bitmap for export or display.
    pub fn snapshot(&self) -> &FrameBuffer {
        &self.bitmap
    }

    /// True once after any change to the bitmap; resets the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }
}

/// Paint every pixel lying within `pen.width / 2` of the segment a-b.
/// Pixel (x, y) is sampled at integer coordinates, so an integer pointer
/// position lands on a pixel center. Pixels outside the framebuffer are clipped.
pub fn draw_segment(fb: &mut FrameBuffer, a: Point, b: Point, pen: &Pen) {
    let r = pen.width * 0.5;
    if r <= 0.0 {
        return;
    }
    let r2 = r * r;

    // Scan only the bounding box of the capsule, clamped to the buffer.
    let x0 = ((a.x.min(b.x) - r).floor() as i32).max(0);
    let y0 = ((a.y.min(b.y) - r).floor() as i32).max(0);
    let x1 = ((a.x.max(b.x) + r).ceil() as i32).min(fb.width as i32 - 1);
    let y1 = ((a.y.max(b.y) + r).ceil() as i32).min(fb.height as i32 - 1);

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len2 = dx * dx + dy * dy;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let px = x as f32;
            let py = y as f32;
            // Closest point on the segment (degenerates to `a` for a dot).
            let t = if len2 > 0.0 {
                (((px - a.x) * dx + (py - a.y) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let cx = a.x + t * dx - px;
            let cy = a.y + t * dy - py;
            if cx * cx + cy * cy <= r2 {
                fb.put_pixel(x, y, pen.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(fb: &FrameBuffer, color: Rgb32) -> usize {
        fb.pixels.iter().filter(|&&p| p == color).count()
    }

    fn scribble(s: &mut StrokeSurface) {
        s.begin_stroke(Point::new(20.0, 30.0));
        s.extend_stroke(Point::new(60.0, 35.0));
        s.extend_stroke(Point::new(70.0, 80.0));
        s.end_stroke();
    }

    #[test]
    fn test_new_surface_is_white() {
        let s = StrokeSurface::new(300, 300);
        assert_eq!(count(s.snapshot(), WHITE), 300 * 300);
        assert!(!s.is_stroking());
    }

    #[test]
    fn test_press_alone_paints_nothing() {
        let mut s = StrokeSurface::new(50, 50);
        s.begin_stroke(Point::new(10.0, 10.0));
        assert_eq!(count(s.snapshot(), WHITE), 50 * 50);
        assert!(s.is_stroking());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let mut a = StrokeSurface::new(100, 100);
        let mut b = StrokeSurface::new(100, 100);
        scribble(&mut a);
        scribble(&mut b);
        assert_eq!(a.snapshot(), b.snapshot());
        assert!(count(a.snapshot(), DODGER_BLUE) > 0);
    }

    #[test]
    fn test_clear_restores_initial_bitmap() {
        let fresh = StrokeSurface::new(100, 100);
        let mut s = StrokeSurface::new(100, 100);
        scribble(&mut s);
        s.clear();
        assert_eq!(s.snapshot(), fresh.snapshot());
    }

    #[test]
    fn test_clear_keeps_stroke_active() {
        let mut s = StrokeSurface::new(100, 100);
        s.begin_stroke(Point::new(10.0, 10.0));
        s.extend_stroke(Point::new(40.0, 10.0));
        s.clear();
        assert!(s.is_stroking());
        assert_eq!(s.state().last_point(), Some(Point::new(40.0, 10.0)));
    }

    #[test]
    fn test_end_stroke_twice_is_same_as_once() {
        let mut once = StrokeSurface::new(100, 100);
        let mut twice = StrokeSurface::new(100, 100);
        scribble(&mut once);
        scribble(&mut twice);
        twice.end_stroke();
        assert_eq!(once.snapshot(), twice.snapshot());
        assert_eq!(twice.state(), StrokeState::Idle);
    }

    #[test]
    fn test_extend_without_stroke_is_noop() {
        let mut s = StrokeSurface::new(60, 60);
        s.take_redraw();
        s.extend_stroke(Point::new(30.0, 30.0));
        assert_eq!(count(s.snapshot(), WHITE), 60 * 60);
        assert!(!s.take_redraw());
    }

    #[test]
    fn test_horizontal_segment_has_pen_width_and_round_caps() {
        let mut s = StrokeSurface::new(100, 100);
        s.begin_stroke(Point::new(30.0, 50.0));
        s.extend_stroke(Point::new(70.0, 50.0));
        let fb = s.snapshot();

        // Column through the middle: 15 pixels tall (43..=57).
        let tall = (0..100).filter(|&y| fb.get_pixel(50, y) == DODGER_BLUE).count();
        assert_eq!(tall, 15);

        // The cap reaches 7.5px past the endpoint on the axis but not the corners.
        assert_eq!(fb.get_pixel(77, 50), DODGER_BLUE);
        assert_eq!(fb.get_pixel(78, 50), WHITE);
        assert_eq!(fb.get_pixel(77, 44), WHITE);
    }

    #[test]
    fn test_segment_is_clipped_at_edges() {
        let mut fb = FrameBuffer::filled(20, 20, WHITE);
        draw_segment(&mut fb, Point::new(-30.0, 10.0), Point::new(50.0, 10.0), &Pen::default());
        let row = (0..20).filter(|&x| fb.get_pixel(x, 10) == DODGER_BLUE).count();
        assert_eq!(row, 20);
    }

    #[test]
    fn test_redraw_flag_follows_mutations() {
        let mut s = StrokeSurface::new(40, 40);
        assert!(s.take_redraw());
        assert!(!s.take_redraw());
        s.begin_stroke(Point::new(5.0, 5.0));
        assert!(!s.take_redraw());
        s.extend_stroke(Point::new(10.0, 10.0));
        assert!(s.take_redraw());
        s.clear();
        assert!(s.take_redraw());
    }
}
