// Core types shared by the canvas, the exporter and the window.

/// Packed pixel in minifb's 0x00RRGGBB layout.
pub type Rgb32 = u32;

pub const WHITE: Rgb32 = 0x00_FF_FF_FF;
pub const BLACK: Rgb32 = 0x00_00_00_00;
/// Dodger blue, the pen color.
pub const DODGER_BLUE: Rgb32 = 0x00_1E_90_FF;

#[inline]
pub fn rgb(r: u8, g: u8, b: u8) -> Rgb32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split a packed pixel into (r, g, b). The top byte is ignored.
#[inline]
pub fn channels(px: Rgb32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is (pixels)
    pub height: usize,     // how tall the frame is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn filled(width: usize, height: usize, color: Rgb32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    pub fn fill(&mut self, color: Rgb32) {
        for px in &mut self.pixels { *px = color; }
    }

    /// Set (x,y) if it is inside bounds; out-of-range writes are dropped.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgb32 {
        self.pixels[y * self.width + x]
    }
}

/// Pointer position in canvas (or window) coordinates. Sub-pixel precision is kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the classifier said about one drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    pub label: u8,       // digit 0..=9
    pub confidence: f32, // probability assigned to `label`
}

impl Prediction {
    /// Text shown in the title bar and the HUD.
    pub fn caption(&self) -> String {
        format!("Predicted: {} (Confidence: {:.2})", self.label, self.confidence)
    }
}
