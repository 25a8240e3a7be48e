// Window layout and pointer routing.
// The canvas sits at the window origin, so window and canvas coordinates agree.
// Below it is a control strip with two buttons, a status line and a warning line.

use crate::input::PointerEvent;
use crate::types::Point;

const PAD: i32 = 10;
const BUTTON_H: i32 = 36;
const GAP: i32 = 8;
const STATUS_H: i32 = 7; // one row of 5x7 text
const LINE_GAP: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x as f32
            && p.y >= self.y as f32
            && p.x < (self.x + self.w) as f32
            && p.y < (self.y + self.h) as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Predict,
    Clear,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Predict => "PREDICT DIGIT",
            Button::Clear => "CLEAR CANVAS",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Canvas,
    Button(Button),
    Strip,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub canvas: Rect,
    pub predict: Rect,
    pub clear: Rect,
    pub status_y: i32,
    pub warning_y: i32,
}

impl Layout {
    pub fn new(canvas_side: usize) -> Self {
        let side = canvas_side as i32;
        let predict = Rect { x: PAD, y: side + PAD, w: side - 2 * PAD, h: BUTTON_H };
        let clear = Rect { y: predict.y + BUTTON_H + GAP, ..predict };
        let status_y = clear.y + BUTTON_H + PAD;
        let warning_y = status_y + STATUS_H + LINE_GAP;
        Self {
            width: canvas_side,
            height: (warning_y + STATUS_H + PAD) as usize,
            canvas: Rect { x: 0, y: 0, w: side, h: side },
            predict,
            clear,
            status_y,
            warning_y,
        }
    }

    pub fn hit(&self, p: Point) -> Region {
        if self.canvas.contains(p) {
            Region::Canvas
        } else if self.predict.contains(p) {
            Region::Button(Button::Predict)
        } else if self.clear.contains(p) {
            Region::Button(Button::Clear)
        } else {
            Region::Strip
        }
    }

    pub fn button_at(&self, p: Point) -> Option<Button> {
        match self.hit(p) {
            Region::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn button_rect(&self, b: Button) -> Rect {
        match b {
            Button::Predict => self.predict,
            Button::Clear => self.clear,
        }
    }
}

/// User intent that isn't drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiAction {
    Predict,
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Routed {
    Canvas(PointerEvent),
    Action(UiAction),
    Nothing,
}

/// Turns polled mouse state into pointer events (window coordinates).
/// Only edges of the left button and actual movement produce events.
#[derive(Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    pub fn poll(&mut self, button_down: bool, pos: Option<Point>) -> Option<PointerEvent> {
        match (self.down, button_down) {
            (false, true) => {
                // Wait for a known position before starting.
                let p = pos?;
                self.down = true;
                self.last = Some(p);
                Some(PointerEvent::Press(p))
            }
            (true, true) => {
                let p = pos?;
                if self.last == Some(p) {
                    return None;
                }
                self.last = Some(p);
                Some(PointerEvent::Move(p))
            }
            (true, false) => {
                self.down = false;
                if pos.is_some() {
                    self.last = pos;
                }
                Some(PointerEvent::Release)
            }
            (false, false) => {
                self.last = pos;
                None
            }
        }
    }

    /// Most recent known pointer position.
    pub fn position(&self) -> Option<Point> {
        self.last
    }
}

/// Decides whether a pointer event belongs to the canvas or a button.
/// A button fires on release if the press also started on it.
pub struct Router {
    layout: Layout,
    armed: Option<Button>,
}

impl Router {
    pub fn new(layout: Layout) -> Self {
        Self { layout, armed: None }
    }

    pub fn route(&mut self, event: PointerEvent, pos: Option<Point>) -> Routed {
        match event {
            PointerEvent::Press(p) => match self.layout.hit(p) {
                Region::Canvas => Routed::Canvas(event),
                Region::Button(b) => {
                    self.armed = Some(b);
                    Routed::Nothing
                }
                Region::Strip => Routed::Nothing,
            },
            PointerEvent::Move(_) => Routed::Canvas(event),
            PointerEvent::Release => match self.armed.take() {
                Some(b) if pos.and_then(|p| self.layout.button_at(p)) == Some(b) => {
                    Routed::Action(match b {
                        Button::Predict => UiAction::Predict,
                        Button::Clear => UiAction::Clear,
                    })
                }
                _ => Routed::Canvas(event),
            },
        }
    }
}
