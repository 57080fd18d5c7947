use tracing::{debug, trace};
use yew::Callback;

use super::input::WheelInput;
use super::math::{angle, distance, midpoint};
use super::types::{Gesture, Point, SessionOwner, TouchPoint};
use crate::config::GestureConfig;

#[derive(Clone, Default, PartialEq)]
pub struct GestureHandlers {
    pub on_gesture_start: Option<Callback<Gesture>>,
    pub on_gesture_change: Option<Callback<Gesture>>,
    pub on_gesture_end: Option<Callback<Gesture>>,
}

/// Handle for the pending wheel-end timer.
///
/// Every wheel event issues a new ticket; only the most recent one can end the
/// session. The host schedules a single timer for `delay_ms` and hands the
/// ticket back through [`GestureRecognizer::debounce_elapsed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceTicket {
    pub id: u64,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
enum Session {
    Touch {
        initial: [TouchPoint; 2],
        gesture: Gesture,
    },
    Wheel {
        gesture: Gesture,
        ticket: u64,
    },
}

impl Session {
    fn gesture(&self) -> Gesture {
        match self {
            Session::Touch { gesture, .. } | Session::Wheel { gesture, .. } => *gesture,
        }
    }

    fn owner(&self) -> SessionOwner {
        match self {
            Session::Touch { .. } => SessionOwner::Touch,
            Session::Wheel { .. } => SessionOwner::Wheel,
        }
    }
}

/// Turns wheel and two-finger touch input into start/change/end gestures.
///
/// At most one session is active. Wheel input yields to touch: wheel events
/// are dropped while a touch session runs, and a two-finger touch start ends
/// any wheel session before beginning its own.
pub struct GestureRecognizer {
    config: GestureConfig,
    handlers: GestureHandlers,
    session: Option<Session>,
    next_ticket: u64,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig, handlers: GestureHandlers) -> Self {
        Self {
            config,
            handlers,
            session: None,
            next_ticket: 0,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Applies to the next event; an active session keeps its accumulated values.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    pub fn set_handlers(&mut self, handlers: GestureHandlers) {
        self.handlers = handlers;
    }

    pub fn gesture(&self) -> Option<Gesture> {
        self.session.as_ref().map(Session::gesture)
    }

    pub fn is_gesturing(&self) -> bool {
        self.session.is_some()
    }

    pub fn owner(&self) -> Option<SessionOwner> {
        self.session.as_ref().map(Session::owner)
    }

    // ---- touch ----

    /// Returns true when the event started a session.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        let [a, b] = match touches {
            [a, b] => [*a, *b],
            _ => return false,
        };
        if self.session.is_some() {
            self.end_session();
        }
        let gesture = Gesture::identity(midpoint(a.position(), b.position()));
        self.session = Some(Session::Touch {
            initial: [a, b],
            gesture,
        });
        debug!(owner = "touch", x = gesture.origin.x, y = gesture.origin.y, "gesture start");
        emit(&self.handlers.on_gesture_start, gesture);
        true
    }

    /// Returns true when the event updated the touch session.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> bool {
        let [t1, t2] = match touches {
            [a, b] => [*a, *b],
            _ => return false,
        };
        let Some(Session::Touch { initial, gesture }) = self.session.as_mut() else {
            return false;
        };
        let [i1, i2] = *initial;
        let (t1, t2) = if t1.id == i2.id && t2.id == i1.id {
            (t2, t1)
        } else {
            (t1, t2)
        };
        let (i1, i2) = (i1.position(), i2.position());
        let (t1, t2) = (t1.position(), t2.position());

        let start_dist = distance(i1, i2);
        let scale = if start_dist > 0.0 {
            distance(t1, t2) / start_dist
        } else {
            1.0
        };
        let next = Gesture {
            origin: gesture.origin,
            translation: midpoint(t1, t2) - midpoint(i1, i2),
            scale,
            rotation: angle(t1, t2) - angle(i1, i2),
        };
        *gesture = next;
        trace!(scale = next.scale, rotation = next.rotation, "touch change");
        emit(&self.handlers.on_gesture_change, next);
        true
    }

    /// Handles both `touchend` and `touchcancel`. Only ends touch sessions.
    pub fn touch_end(&mut self, touches: &[TouchPoint]) -> bool {
        if touches.len() < 2 && self.owner() == Some(SessionOwner::Touch) {
            self.end_session();
            return true;
        }
        false
    }

    // ---- wheel ----

    /// Applies one wheel event. `None` means the event was ignored because a
    /// touch session is active; otherwise the returned ticket replaces any
    /// earlier pending timer.
    pub fn wheel(&mut self, input: &WheelInput) -> Option<DebounceTicket> {
        if self.owner() == Some(SessionOwner::Touch) {
            trace!("wheel ignored during touch gesture");
            return None;
        }
        let (dx, dy) = input.normalized(&self.config);

        self.next_ticket += 1;
        let ticket = DebounceTicket {
            id: self.next_ticket,
            delay_ms: self.config.debounce_ms,
        };

        if self.session.is_none() {
            let gesture = Gesture::identity(Point::new(input.client_x, input.client_y));
            self.session = Some(Session::Wheel {
                gesture,
                ticket: ticket.id,
            });
            debug!(owner = "wheel", x = gesture.origin.x, y = gesture.origin.y, "gesture start");
            emit(&self.handlers.on_gesture_start, gesture);
        }

        let Some(Session::Wheel { gesture, ticket: live }) = self.session.as_mut() else {
            return None;
        };
        *live = ticket.id;

        if input.ctrl_key {
            let k = self.config.wheel_scale_speedup;
            let factor = if dy <= 0.0 {
                1.0 - (k * dy) / 100.0
            } else {
                1.0 / (1.0 + (k * dy) / 100.0)
            };
            gesture.scale *= factor;
        } else {
            let m = self.config.wheel_translation_speedup;
            gesture.translation.x -= m * dx;
            gesture.translation.y -= m * dy;
        }
        let next = *gesture;
        trace!(dx, dy, scale = next.scale, "wheel change");
        emit(&self.handlers.on_gesture_change, next);
        Some(ticket)
    }

    /// Ends the wheel session if `ticket` is still the live one.
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> bool {
        match &self.session {
            Some(Session::Wheel { ticket: live, .. }) if *live == ticket.id => {
                self.end_session();
                true
            }
            _ => false,
        }
    }

    /// Ends whatever session is active. Outstanding tickets become stale.
    pub fn cancel(&mut self) -> bool {
        if self.session.is_some() {
            self.end_session();
            return true;
        }
        false
    }

    fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            let gesture = session.gesture();
            debug!(
                owner = session.owner().label(),
                scale = gesture.scale,
                rotation = gesture.rotation,
                tx = gesture.translation.x,
                ty = gesture.translation.y,
                "gesture end"
            );
            emit(&self.handlers.on_gesture_end, gesture);
        }
    }
}

fn emit(cb: &Option<Callback<Gesture>>, gesture: Gesture) {
    if let Some(cb) = cb {
        cb.emit(gesture);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::gesture::DeltaMode;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Phase {
        Start,
        Change,
        End,
    }

    type Log = Rc<RefCell<Vec<(Phase, Gesture)>>>;

    fn recorder() -> (GestureRecognizer, Log) {
        let log: Log = Rc::default();
        let cb = |phase: Phase| {
            let log = log.clone();
            Some(Callback::from(move |g: Gesture| log.borrow_mut().push((phase, g))))
        };
        let handlers = GestureHandlers {
            on_gesture_start: cb(Phase::Start),
            on_gesture_change: cb(Phase::Change),
            on_gesture_end: cb(Phase::End),
        };
        (GestureRecognizer::new(GestureConfig::default(), handlers), log)
    }

    fn phases(log: &Log) -> Vec<Phase> {
        log.borrow().iter().map(|(p, _)| *p).collect()
    }

    fn tp(id: i32, x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(id, x, y)
    }

    fn wheel_y(dy: f64, ctrl: bool) -> WheelInput {
        WheelInput {
            delta_y: dy,
            ctrl_key: ctrl,
            client_x: 40.0,
            client_y: 60.0,
            ..Default::default()
        }
    }

    /// Single pending timer, like the browser host keeps.
    #[derive(Default)]
    struct FakeTimer {
        now: u64,
        pending: Option<(u64, DebounceTicket)>,
    }

    impl FakeTimer {
        fn schedule(&mut self, ticket: Option<DebounceTicket>) {
            if let Some(t) = ticket {
                self.pending = Some((self.now + t.delay_ms as u64, t));
            }
        }

        fn advance(&mut self, ms: u64, rec: &mut GestureRecognizer) {
            self.now += ms;
            if let Some((due, ticket)) = self.pending {
                if due <= self.now {
                    self.pending = None;
                    rec.debounce_elapsed(ticket);
                }
            }
        }
    }

    #[test]
    fn pinch_out_doubles_scale() {
        let (mut rec, log) = recorder();
        assert!(rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]));
        assert!(rec.touch_move(&[tp(0, 0.0, 0.0), tp(1, 20.0, 0.0)]));

        let g = rec.gesture().unwrap();
        assert_eq!(g.scale, 2.0);
        assert_eq!(g.rotation, 0.0);
        assert_eq!(g.translation, Point::new(5.0, 0.0));
        assert_eq!(g.origin, Point::new(5.0, 0.0));

        let log = log.borrow();
        assert_eq!(log[0], (Phase::Start, Gesture::identity(Point::new(5.0, 0.0))));
        assert_eq!(log[1].0, Phase::Change);
    }

    #[test]
    fn quarter_turn_is_positive_ninety() {
        let (mut rec, _log) = recorder();
        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]);
        rec.touch_move(&[tp(0, 0.0, 0.0), tp(1, 0.0, 10.0)]);
        let g = rec.gesture().unwrap();
        assert!((g.rotation - 90.0).abs() < 1e-9);
        assert!((g.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_is_not_wrapped() {
        let (mut rec, _log) = recorder();
        // start pointing at ~179 degrees, move to ~-179
        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, -10.0, 0.1)]);
        rec.touch_move(&[tp(0, 0.0, 0.0), tp(1, -10.0, -0.1)]);
        let g = rec.gesture().unwrap();
        assert!(g.rotation < -350.0 && g.rotation > -360.0, "{}", g.rotation);
    }

    #[test]
    fn origin_stays_at_initial_midpoint() {
        let (mut rec, _log) = recorder();
        rec.touch_start(&[tp(0, 10.0, 10.0), tp(1, 30.0, 10.0)]);
        rec.touch_move(&[tp(0, 50.0, 50.0), tp(1, 90.0, 80.0)]);
        rec.touch_move(&[tp(0, 60.0, 20.0), tp(1, 70.0, 25.0)]);
        assert_eq!(rec.gesture().unwrap().origin, Point::new(20.0, 10.0));
    }

    #[test]
    fn reordered_touches_pair_by_id() {
        let (mut rec, _log) = recorder();
        rec.touch_start(&[tp(4, 0.0, 0.0), tp(9, 10.0, 0.0)]);
        rec.touch_move(&[tp(9, 20.0, 0.0), tp(4, 0.0, 0.0)]);
        let g = rec.gesture().unwrap();
        assert_eq!(g.scale, 2.0);
        assert_eq!(g.rotation, 0.0);
    }

    #[test]
    fn coincident_start_points_keep_unit_scale() {
        let (mut rec, _log) = recorder();
        rec.touch_start(&[tp(0, 5.0, 5.0), tp(1, 5.0, 5.0)]);
        rec.touch_move(&[tp(0, 0.0, 5.0), tp(1, 10.0, 5.0)]);
        assert_eq!(rec.gesture().unwrap().scale, 1.0);
    }

    #[test]
    fn other_touch_counts_are_ignored() {
        let (mut rec, log) = recorder();
        assert!(!rec.touch_start(&[tp(0, 1.0, 1.0)]));
        assert!(!rec.touch_start(&[tp(0, 1.0, 1.0), tp(1, 2.0, 2.0), tp(2, 3.0, 3.0)]));
        assert!(!rec.touch_move(&[tp(0, 1.0, 1.0), tp(1, 2.0, 2.0)]));
        assert!(log.borrow().is_empty());
        assert!(!rec.is_gesturing());

        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]);
        assert!(!rec.touch_move(&[tp(0, 3.0, 3.0)]));
        assert_eq!(phases(&log), vec![Phase::Start]);
    }

    #[test]
    fn lifting_a_finger_ends_once() {
        let (mut rec, log) = recorder();
        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]);
        rec.touch_move(&[tp(0, 0.0, 0.0), tp(1, 20.0, 0.0)]);
        let last = rec.gesture().unwrap();

        assert!(rec.touch_end(&[tp(0, 0.0, 0.0)]));
        assert!(!rec.touch_end(&[]));
        assert!(!rec.touch_move(&[tp(0, 0.0, 0.0), tp(1, 30.0, 0.0)]));

        assert_eq!(phases(&log), vec![Phase::Start, Phase::Change, Phase::End]);
        assert_eq!(log.borrow()[2].1, last);
        assert!(rec.gesture().is_none());
        assert!(!rec.is_gesturing());
    }

    #[test]
    fn second_two_finger_start_replaces_session() {
        let (mut rec, log) = recorder();
        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]);
        rec.touch_start(&[tp(2, 100.0, 0.0), tp(3, 110.0, 0.0)]);
        assert_eq!(phases(&log), vec![Phase::Start, Phase::End, Phase::Start]);
        assert_eq!(rec.gesture().unwrap().origin, Point::new(105.0, 0.0));
    }

    #[test]
    fn wheel_pan_subtracts_twice_the_delta() {
        let (mut rec, log) = recorder();
        let mut input = wheel_y(100.0, false);
        input.delta_x = 3.0;
        rec.wheel(&input);
        let g = rec.gesture().unwrap();
        // dy clamps to 24 before the speedup
        assert_eq!(g.translation, Point::new(-6.0, -48.0));
        assert_eq!(g.origin, Point::new(40.0, 60.0));
        assert_eq!(phases(&log), vec![Phase::Start, Phase::Change]);
    }

    #[test]
    fn wheel_pan_uses_unclamped_value_within_limit() {
        let mut cfg = GestureConfig::default();
        cfg.max_wheel_delta = 1000.0;
        let mut rec = GestureRecognizer::new(cfg, GestureHandlers::default());
        rec.wheel(&wheel_y(10.0, false));
        rec.wheel(&wheel_y(100.0, false));
        assert_eq!(rec.gesture().unwrap().translation.y, -20.0 - 200.0);
    }

    #[test]
    fn ctrl_wheel_zooms() {
        let (mut rec, _log) = recorder();
        rec.wheel(&wheel_y(-50.0, true));
        // clamped to -24: 1 - 2 * -24 / 100
        assert!((rec.gesture().unwrap().scale - 1.48).abs() < 1e-12);

        let mut cfg = GestureConfig::default();
        cfg.max_wheel_delta = 100.0;
        let mut rec = GestureRecognizer::new(cfg, GestureHandlers::default());
        rec.wheel(&wheel_y(-50.0, true));
        assert!((rec.gesture().unwrap().scale - 2.0).abs() < 1e-12);
        rec.wheel(&wheel_y(50.0, true));
        assert!((rec.gesture().unwrap().scale - 1.0).abs() < 1e-12);
        assert_eq!(rec.gesture().unwrap().translation, Point::ZERO);
    }

    #[test]
    fn wheel_burst_is_one_session() {
        let (mut rec, log) = recorder();
        let mut timer = FakeTimer::default();

        timer.schedule(rec.wheel(&wheel_y(4.0, false)));
        timer.advance(50, &mut rec);
        timer.schedule(rec.wheel(&wheel_y(4.0, false)));
        assert_eq!(phases(&log), vec![Phase::Start, Phase::Change, Phase::Change]);

        timer.advance(199, &mut rec);
        assert!(rec.is_gesturing());
        timer.advance(51, &mut rec);
        assert!(!rec.is_gesturing());

        let log = log.borrow();
        let ends: Vec<_> = log.iter().filter(|(p, _)| *p == Phase::End).collect();
        assert_eq!(ends.len(), 1);
        assert_eq!(ends[0].1.translation, Point::new(0.0, -16.0));
    }

    #[test]
    fn stale_ticket_does_not_end_session() {
        let (mut rec, log) = recorder();
        let first = rec.wheel(&wheel_y(1.0, false)).unwrap();
        let second = rec.wheel(&wheel_y(1.0, false)).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.delay_ms, 200);

        assert!(!rec.debounce_elapsed(first));
        assert!(rec.is_gesturing());
        assert!(rec.debounce_elapsed(second));
        assert!(!rec.debounce_elapsed(second));
        assert_eq!(phases(&log).iter().filter(|p| **p == Phase::End).count(), 1);
    }

    #[test]
    fn new_burst_after_end_restarts_at_pointer() {
        let (mut rec, log) = recorder();
        let t = rec.wheel(&wheel_y(2.0, false)).unwrap();
        rec.debounce_elapsed(t);
        let mut input = wheel_y(2.0, false);
        input.client_x = 5.0;
        rec.wheel(&input);
        assert_eq!(rec.gesture().unwrap().origin, Point::new(5.0, 60.0));
        assert_eq!(rec.gesture().unwrap().translation, Point::new(0.0, -4.0));
        assert_eq!(
            phases(&log),
            vec![Phase::Start, Phase::Change, Phase::End, Phase::Start, Phase::Change]
        );
    }

    #[test]
    fn wheel_yields_to_touch() {
        let (mut rec, log) = recorder();
        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]);
        assert_eq!(rec.wheel(&wheel_y(10.0, false)), None);
        assert_eq!(rec.owner(), Some(SessionOwner::Touch));
        assert_eq!(rec.gesture().unwrap().translation, Point::ZERO);
        assert_eq!(phases(&log), vec![Phase::Start]);
    }

    #[test]
    fn touch_start_ends_wheel_session() {
        let (mut rec, log) = recorder();
        let ticket = rec.wheel(&wheel_y(10.0, false)).unwrap();
        rec.touch_start(&[tp(0, 0.0, 0.0), tp(1, 10.0, 0.0)]);
        assert_eq!(rec.owner(), Some(SessionOwner::Touch));
        assert_eq!(
            phases(&log),
            vec![Phase::Start, Phase::Change, Phase::End, Phase::Start]
        );
        // the wheel timer firing late must not touch the new session
        assert!(!rec.debounce_elapsed(ticket));
        assert_eq!(rec.owner(), Some(SessionOwner::Touch));
    }

    #[test]
    fn touch_end_leaves_wheel_session_alone() {
        let (mut rec, log) = recorder();
        rec.wheel(&wheel_y(10.0, false));
        assert!(!rec.touch_end(&[]));
        assert_eq!(rec.owner(), Some(SessionOwner::Wheel));
        assert_eq!(phases(&log), vec![Phase::Start, Phase::Change]);
    }

    #[test]
    fn cancel_ends_once_and_invalidates_ticket() {
        let (mut rec, log) = recorder();
        let ticket = rec.wheel(&wheel_y(10.0, false)).unwrap();
        assert!(rec.cancel());
        assert!(!rec.cancel());
        assert!(!rec.debounce_elapsed(ticket));
        assert_eq!(phases(&log), vec![Phase::Start, Phase::Change, Phase::End]);
    }

    #[test]
    fn config_controls_wheel_tuning() {
        let mut cfg = GestureConfig::default();
        cfg.debounce_ms = 500;
        cfg.wheel_translation_speedup = 1.0;
        let mut rec = GestureRecognizer::new(cfg, GestureHandlers::default());
        let input = WheelInput {
            delta_x: 1.0,
            delta_mode: DeltaMode::Line,
            ..Default::default()
        };
        let ticket = rec.wheel(&input).unwrap();
        assert_eq!(ticket.delay_ms, 500);
        assert_eq!(rec.gesture().unwrap().translation, Point::new(-8.0, 0.0));
    }
}
