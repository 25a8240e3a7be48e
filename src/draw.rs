// Window + software drawing utilities.
// 1) A window that shows the canvas and the control strip.
// 2) Filled (rounded) rectangles for the buttons.
// 3) A tiny 5x7 bitmap font, optionally scaled, for labels and status.

use crate::error::Error;
use crate::types::{rgb, FrameBuffer, Point, Rgb32, BLACK, WHITE};
use crate::ui::{Button, Layout, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const STRIP_BG: Rgb32 = 0x00_F4_F1_EA;
pub const STATUS_TEXT: Rgb32 = 0x00_33_33_33;
pub const WARNING_TEXT: Rgb32 = 0x00_C0_39_2B;

pub fn button_fill(b: Button, hovered: bool) -> Rgb32 {
    if hovered {
        return rgb(0xFF, 0xC3, 0x12);
    }
    match b {
        Button::Predict => rgb(0xFF, 0xDD, 0x59),
        Button::Clear => rgb(0xFF, 0x6B, 0x6B),
    }
}

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Open a window of the given size. Nothing is drawn until `present`.
    pub fn new(title: &str, width: usize, height: usize, fps: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(fps);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Process input without touching the displayed image.
    pub fn pump(&mut self) {
        self.window.update();
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn p_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::P, KeyRepeat::No)
    }

    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// Mouse position in window pixels. Not clamped: a drag that leaves the
    /// canvas keeps reporting, and the rasterizer clips.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| Point::new(x.round(), y.round()))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/* ---------- Composition ---------- */

/// Build the full window image: canvas on top, buttons and status below.
/// A warning gets its own line under the status, which it never replaces.
pub fn compose(
    screen: &mut FrameBuffer,
    canvas: &FrameBuffer,
    layout: &Layout,
    hovered: Option<Button>,
    status: &str,
    warning: Option<&str>,
) {
    screen.fill(STRIP_BG);

    // Canvas rows go straight across; both buffers share the same row width.
    let w = canvas.width.min(screen.width);
    for y in 0..canvas.height.min(screen.height) {
        let src = &canvas.pixels[y * canvas.width..y * canvas.width + w];
        screen.pixels[y * screen.width..y * screen.width + w].copy_from_slice(src);
    }

    for b in [Button::Predict, Button::Clear] {
        let r = layout.button_rect(b);
        fill_rounded_rect(screen, r, 12, button_fill(b, hovered == Some(b)));
        let scale = 2;
        let tw = text_width(b.label(), scale);
        let tx = r.x + (r.w - tw) / 2;
        let ty = r.y + (r.h - 7 * scale) / 2;
        draw_text(screen, tx, ty, b.label(), TextStyle { color: WHITE, scale, shadow: Some(BLACK) });
    }

    let style = TextStyle { color: STATUS_TEXT, scale: 1, shadow: None };
    draw_text(screen, 10, layout.status_y, status, style);
    if let Some(w) = warning {
        let style = TextStyle { color: WARNING_TEXT, scale: 1, shadow: None };
        draw_text(screen, 10, layout.warning_y, w, style);
    }
}

/// Fill `r`, leaving out the corners beyond a quarter circle of `radius`.
pub fn fill_rounded_rect(fb: &mut FrameBuffer, r: Rect, radius: i32, color: Rgb32) {
    let radius = radius.min(r.w / 2).min(r.h / 2).max(0);
    for y in r.y..r.y + r.h {
        for x in r.x..r.x + r.w {
            // Distance to the nearest corner center, only relevant in corner boxes.
            let cx = if x < r.x + radius { r.x + radius } else if x >= r.x + r.w - radius { r.x + r.w - radius - 1 } else { x };
            let cy = if y < r.y + radius { r.y + radius } else if y >= r.y + r.h - radius { r.y + r.h - radius - 1 } else { y };
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                fb.put_pixel(x, y, color);
            }
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

#[derive(Clone, Copy, Debug)]
pub struct TextStyle {
    pub color: Rgb32,
    pub scale: i32,             // each font pixel becomes scale x scale
    pub shadow: Option<Rgb32>,  // drawn offset by one scaled pixel
}

/// Return a 5x7 glyph bitmap. Lowercase letters use the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b01000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),

        _ => None,
    }
}

fn fill_block(fb: &mut FrameBuffer, x: i32, y: i32, scale: i32, color: Rgb32) {
    for dy in 0..scale {
        for dx in 0..scale {
            fb.put_pixel(x + dx, y + dy, color);
        }
    }
}

fn draw_glyph(fb: &mut FrameBuffer, x: i32, y: i32, rows: &[u8; 7], scale: i32, color: Rgb32) {
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) != 0 {
                fill_block(fb, x + rx * scale, y + ry as i32 * scale, scale, color);
            }
        }
    }
}

/// Horizontal advance of one glyph cell (5 pixels + 1 spacing, scaled).
pub fn advance(scale: i32) -> i32 {
    6 * scale
}

/// Width of `text` without the trailing spacing column.
pub fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * advance(scale) - scale }
}

/// Draw a string; characters without a glyph leave a blank cell.
pub fn draw_text(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, style: TextStyle) {
    for ch in text.chars() {
        if let Some(rows) = glyph5x7(ch) {
            if let Some(shadow) = style.shadow {
                draw_glyph(fb, x + style.scale, y + style.scale, &rows, style.scale, shadow);
            }
            draw_glyph(fb, x, y, &rows, style.scale, style.color);
        }
        x += advance(style.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeSurface;
    use crate::types::{Point, DODGER_BLUE};

    #[test]
    fn test_every_status_character_has_a_glyph() {
        let texts = [
            "Predicted: 9 (Confidence: 0.87)",
            "Model is not loaded.",
            "Draw a digit, then press PREDICT!",
            "PREDICT DIGIT",
            "CLEAR CANVAS",
        ];
        for t in texts {
            for ch in t.chars() {
                assert!(glyph5x7(ch).is_some(), "missing glyph for {ch:?}");
            }
        }
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 1), 5);
        assert_eq!(text_width("AB", 2), 22);
    }

    #[test]
    fn test_draw_text_scales_glyphs() {
        let mut fb = FrameBuffer::filled(20, 20, WHITE);
        draw_text(&mut fb, 0, 0, "I", TextStyle { color: BLACK, scale: 2, shadow: None });
        // Top row of 'I' is 01110: columns 1..=3 -> pixels 2..=7 at scale 2.
        assert_eq!(fb.get_pixel(1, 0), WHITE);
        assert_eq!(fb.get_pixel(2, 0), BLACK);
        assert_eq!(fb.get_pixel(7, 1), BLACK);
        assert_eq!(fb.get_pixel(8, 0), WHITE);
    }

    #[test]
    fn test_rounded_rect_skips_corners() {
        let mut fb = FrameBuffer::filled(30, 30, WHITE);
        fill_rounded_rect(&mut fb, Rect { x: 0, y: 0, w: 30, h: 20 }, 6, BLACK);
        assert_eq!(fb.get_pixel(0, 0), WHITE);
        assert_eq!(fb.get_pixel(29, 19), WHITE);
        assert_eq!(fb.get_pixel(15, 0), BLACK);
        assert_eq!(fb.get_pixel(0, 10), BLACK);
        assert_eq!(fb.get_pixel(15, 25), WHITE);
    }

    #[test]
    fn test_compose_copies_canvas_and_paints_buttons() {
        let layout = Layout::new(300);
        let mut surface = StrokeSurface::new(300, 300);
        surface.begin_stroke(Point::new(20.0, 20.0));
        surface.extend_stroke(Point::new(60.0, 20.0));

        let mut screen = FrameBuffer::filled(layout.width, layout.height, BLACK);
        compose(&mut screen, surface.snapshot(), &layout, None, "", None);
        assert_eq!(screen.get_pixel(40, 20), DODGER_BLUE);
        assert_eq!(screen.get_pixel(200, 200), WHITE);
        assert_eq!(screen.get_pixel(5, 305), STRIP_BG);
        // Left edge midline of the predict button is outside any corner.
        let r = layout.predict;
        assert_eq!(
            screen.get_pixel(r.x as usize, (r.y + r.h / 2) as usize),
            button_fill(Button::Predict, false)
        );

        compose(&mut screen, surface.snapshot(), &layout, Some(Button::Clear), "", None);
        let r = layout.clear;
        assert_eq!(
            screen.get_pixel(r.x as usize, (r.y + r.h / 2) as usize),
            button_fill(Button::Clear, true)
        );
    }

    #[test]
    fn test_warning_leaves_status_line_intact() {
        let layout = Layout::new(300);
        let surface = StrokeSurface::new(300, 300);
        let rows = |fb: &FrameBuffer, y: i32| {
            let start = y as usize * fb.width;
            fb.pixels[start..start + 7 * fb.width].to_vec()
        };

        let mut plain = FrameBuffer::filled(layout.width, layout.height, BLACK);
        compose(&mut plain, surface.snapshot(), &layout, None, "Predicted: 3 (Confidence: 0.70)", None);
        let mut warned = plain.clone();
        compose(
            &mut warned,
            surface.snapshot(),
            &layout,
            None,
            "Predicted: 3 (Confidence: 0.70)",
            Some("Model is not loaded."),
        );

        assert_eq!(rows(&warned, layout.status_y), rows(&plain, layout.status_y));
        assert!(rows(&plain, layout.status_y).contains(&STATUS_TEXT));
        assert!(rows(&plain, layout.warning_y).iter().all(|&c| c == STRIP_BG));
        assert!(rows(&warned, layout.warning_y).contains(&WARNING_TEXT));
    }
}
