#![forbid(unsafe_code)]

//! Touch and pinch input, plus a single-touch drag recognizer.
//!
//! The host translates its platform events into [`TouchEvent`] and
//! [`PinchEvent`]. [`DragTracker`] turns a stream of touches into
//! [`DragEvent`]s with these rules:
//!
//! 1. A drag begins on the first single-finger touch-down.
//! 2. Any event reporting more than one touch ends the drag with
//!    [`DragEvent::Cancelled`]; the rest of that sequence is ignored until
//!    every finger lifts.
//! 3. `Moved` and `Ended` carry the translation from the touch-down point.

use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Lifecycle phase shared by touch and pinch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// A raw touch sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: GesturePhase,
    pub location: Point,
    /// Number of fingers currently down.
    pub touch_count: u32,
}

impl TouchEvent {
    pub const fn new(phase: GesturePhase, location: Point) -> Self {
        Self {
            phase,
            location,
            touch_count: 1,
        }
    }

    #[must_use]
    pub const fn with_touch_count(mut self, touch_count: u32) -> Self {
        self.touch_count = touch_count;
        self
    }
}

/// A pinch sample. `scale` is relative to the start of the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchEvent {
    pub phase: GesturePhase,
    pub scale: f64,
    /// Centroid of the touches in container coordinates.
    pub location: Point,
}

impl PinchEvent {
    pub const fn new(phase: GesturePhase, scale: f64, location: Point) -> Self {
        Self {
            phase,
            scale,
            location,
        }
    }
}

/// Recognized single-touch drag events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Began { location: Point },
    Moved { location: Point, translation: Point },
    Ended { location: Point, translation: Point },
    Cancelled,
}

// ---------------------------------------------------------------------------
// DragTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Tracking { start: Point },
    /// A multi-touch sequence is in progress; wait for all fingers to lift.
    Failed,
}

/// Recognizes single-finger drags and fails them on multi-touch.
#[derive(Debug, Clone)]
pub struct DragTracker {
    state: DragState,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// True between `Began` and `Ended`/`Cancelled`.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Tracking { .. })
    }

    /// Drop any in-progress drag without emitting an event.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// Feed one touch sample.
    pub fn process(&mut self, event: &TouchEvent) -> Option<DragEvent> {
        let lifting = matches!(event.phase, GesturePhase::Ended | GesturePhase::Cancelled);

        if event.touch_count > 1 {
            let was_tracking = self.is_dragging();
            self.state = if lifting {
                DragState::Idle
            } else {
                DragState::Failed
            };
            return was_tracking.then_some(DragEvent::Cancelled);
        }

        match (self.state, event.phase) {
            (DragState::Failed, _) => {
                if lifting {
                    self.state = DragState::Idle;
                }
                None
            }
            (DragState::Idle, GesturePhase::Began | GesturePhase::Changed) => {
                self.state = DragState::Tracking {
                    start: event.location,
                };
                Some(DragEvent::Began {
                    location: event.location,
                })
            }
            (DragState::Idle, _) => None,
            (DragState::Tracking { start }, phase) => {
                let translation =
                    Point::new(event.location.x - start.x, event.location.y - start.y);
                match phase {
                    GesturePhase::Began | GesturePhase::Changed => Some(DragEvent::Moved {
                        location: event.location,
                        translation,
                    }),
                    GesturePhase::Ended => {
                        self.state = DragState::Idle;
                        Some(DragEvent::Ended {
                            location: event.location,
                            translation,
                        })
                    }
                    GesturePhase::Cancelled => {
                        self.state = DragState::Idle;
                        Some(DragEvent::Cancelled)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(phase: GesturePhase, x: f64, y: f64) -> TouchEvent {
        TouchEvent::new(phase, Point::new(x, y))
    }

    #[test]
    fn single_touch_drag_lifecycle() {
        let mut t = DragTracker::new();
        assert_eq!(
            t.process(&touch(GesturePhase::Began, 10.0, 10.0)),
            Some(DragEvent::Began {
                location: Point::new(10.0, 10.0)
            })
        );
        assert!(t.is_dragging());
        assert_eq!(
            t.process(&touch(GesturePhase::Changed, 12.0, 40.0)),
            Some(DragEvent::Moved {
                location: Point::new(12.0, 40.0),
                translation: Point::new(2.0, 30.0),
            })
        );
        assert_eq!(
            t.process(&touch(GesturePhase::Ended, 12.0, 50.0)),
            Some(DragEvent::Ended {
                location: Point::new(12.0, 50.0),
                translation: Point::new(2.0, 40.0),
            })
        );
        assert!(!t.is_dragging());
    }

    #[test]
    fn second_finger_cancels_and_suppresses_rest() {
        let mut t = DragTracker::new();
        t.process(&touch(GesturePhase::Began, 0.0, 0.0));
        let two = touch(GesturePhase::Changed, 5.0, 5.0).with_touch_count(2);
        assert_eq!(t.process(&two), Some(DragEvent::Cancelled));
        assert_eq!(t.process(&two), None);
        // Back to one finger, still the same sequence.
        assert_eq!(t.process(&touch(GesturePhase::Changed, 6.0, 6.0)), None);
        assert_eq!(t.process(&touch(GesturePhase::Ended, 6.0, 6.0)), None);
        // A fresh touch starts a new drag.
        assert!(matches!(
            t.process(&touch(GesturePhase::Began, 1.0, 1.0)),
            Some(DragEvent::Began { .. })
        ));
    }

    #[test]
    fn multi_touch_from_idle_never_begins() {
        let mut t = DragTracker::new();
        let two = touch(GesturePhase::Began, 0.0, 0.0).with_touch_count(2);
        assert_eq!(t.process(&two), None);
        assert!(!t.is_dragging());
    }

    #[test]
    fn stray_end_is_ignored() {
        let mut t = DragTracker::new();
        assert_eq!(t.process(&touch(GesturePhase::Ended, 0.0, 0.0)), None);
    }
}
