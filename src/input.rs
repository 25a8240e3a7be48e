// Platform-agnostic pointer input.
// Whatever the windowing layer is, it reports press/move/release; the canvas
// only ever sees these events and the two-state machine below.

use crate::types::Point;

/// One event from a single pointing device (left button only).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Point),
    Move(Point),
    Release,
}

/// Stroke state: `last` exists exactly while a stroke is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StrokeState {
    #[default]
    Idle,
    Stroking { last: Point },
}

/// What the canvas must do in response to a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokeAction {
    /// Nothing to paint (begin, end, or an ignored stray event).
    None,
    /// Paint a segment from `from` to `to`.
    Segment { from: Point, to: Point },
}

impl StrokeState {
    pub fn is_active(&self) -> bool {
        matches!(self, StrokeState::Stroking { .. })
    }

    pub fn last_point(&self) -> Option<Point> {
        match self {
            StrokeState::Idle => None,
            StrokeState::Stroking { last } => Some(*last),
        }
    }

    /// Advance the machine by one event.
    ///
    /// A press while already stroking is ignored (the stroke keeps its anchor),
    /// and moves/releases while idle are ignored.
    pub fn step(&mut self, event: PointerEvent) -> StrokeAction {
        match (*self, event) {
            (StrokeState::Idle, PointerEvent::Press(p)) => {
                *self = StrokeState::Stroking { last: p };
                StrokeAction::None
            }
            (StrokeState::Stroking { last }, PointerEvent::Move(p)) => {
                *self = StrokeState::Stroking { last: p };
                StrokeAction::Segment { from: last, to: p }
            }
            (StrokeState::Stroking { .. }, PointerEvent::Release) => {
                *self = StrokeState::Idle;
                StrokeAction::None
            }
            _ => StrokeAction::None,
        }
    }
}
