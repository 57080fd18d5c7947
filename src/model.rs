//! View model for the gesture canvas.
//! Gestures are relative to their start, so the transform in effect when a
//! gesture starts is kept as an anchor and each change is applied on top of it.

use std::rc::Rc;

use yew::Reducible;

use crate::gesture::{Gesture, Point};
use crate::state::camera::{MAX_SCALE, MIN_SCALE};
use crate::state::ViewTransform;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub transform: ViewTransform,
    /// Transform at gesture start; `Some` while a gesture is running.
    pub anchor: Option<ViewTransform>,
    pub gesture: Option<Gesture>,
    pub gesture_count: u32,
    /// Bumped on every effective change so the canvas knows to redraw.
    pub version: u64,
}

impl ViewState {
    pub fn is_gesturing(&self) -> bool {
        self.anchor.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    GestureStart(Gesture),
    GestureChange(Gesture),
    GestureEnd(Gesture),
    ZoomBy { factor: f64, at: Point },
    PanBy { dx: f64, dy: f64 },
    Reset,
}

impl Reducible for ViewState {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewAction::*;
        let mut new = (*self).clone();
        match action {
            GestureStart(gesture) => {
                new.anchor = Some(new.transform);
                new.gesture = Some(gesture);
                new.gesture_count = new.gesture_count.saturating_add(1);
            }
            GestureChange(gesture) => {
                let Some(anchor) = new.anchor else { return self };
                new.transform = ViewTransform {
                    translation: anchor.translation + gesture.translation,
                    scale: (anchor.scale * gesture.scale).clamp(MIN_SCALE, MAX_SCALE),
                    origin: gesture.origin,
                };
                new.gesture = Some(gesture);
            }
            GestureEnd(_) => {
                if new.anchor.is_none() {
                    return self;
                }
                new.anchor = None;
                new.gesture = None;
            }
            ZoomBy { factor, at } => {
                if new.is_gesturing() {
                    return self;
                }
                new.transform.zoom_at(factor, at);
            }
            PanBy { dx, dy } => {
                if new.is_gesturing() {
                    return self;
                }
                new.transform.pan_by(dx, dy);
            }
            Reset => {
                new.transform = ViewTransform::default();
                new.anchor = new.anchor.map(|_| ViewTransform::default());
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}
