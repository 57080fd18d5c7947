//! Binds a [`GestureRecognizer`] to a DOM element.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, Touch, TouchEvent, TouchList, WheelEvent};

use crate::gesture::{
    DebounceTicket, GestureRecognizer, TouchPoint, TouchSource, WheelInput, WheelSource,
};

/// Live listeners on an element. Dropping it detaches everything and ends any
/// active gesture.
pub struct GestureSurface {
    recognizer: Rc<RefCell<GestureRecognizer>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    _listeners: Vec<EventListener>,
}

impl GestureSurface {
    pub fn attach(element: &HtmlElement, recognizer: Rc<RefCell<GestureRecognizer>>) -> Self {
        let timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let mut listeners = Vec::new();

        let listener = {
            let recognizer = recognizer.clone();
            let timer = timer.clone();
            active_listener(element, "wheel", move |event: &Event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                if event.cancelable() {
                    event.prevent_default();
                }
                let ticket = recognizer.borrow_mut().wheel(&WheelInput::read(event));
                if let Some(ticket) = ticket {
                    // replacing the Timeout drops, and so cancels, the previous one
                    *timer.borrow_mut() = Some(schedule_end(recognizer.clone(), ticket));
                }
            })
        };
        listeners.push(listener);

        let listener = {
            let recognizer = recognizer.clone();
            active_listener(element, "touchstart", move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let consumed = recognizer
                    .borrow_mut()
                    .touch_start(&touch_points(&event.touches()));
                if consumed && event.cancelable() {
                    event.prevent_default();
                }
            })
        };
        listeners.push(listener);

        let listener = {
            let recognizer = recognizer.clone();
            active_listener(element, "touchmove", move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let consumed = recognizer
                    .borrow_mut()
                    .touch_move(&touch_points(&event.touches()));
                if consumed && event.cancelable() {
                    event.prevent_default();
                }
            })
        };
        listeners.push(listener);

        for event_type in ["touchend", "touchcancel"] {
            let recognizer = recognizer.clone();
            let listener = EventListener::new(element, event_type, move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                recognizer
                    .borrow_mut()
                    .touch_end(&touch_points(&event.touches()));
            });
            listeners.push(listener);
        }

        tracing::debug!(listeners = listeners.len(), "gesture surface attached");
        Self {
            recognizer,
            timer,
            _listeners: listeners,
        }
    }
}

impl Drop for GestureSurface {
    fn drop(&mut self) {
        self.timer.borrow_mut().take();
        if let Ok(mut rec) = self.recognizer.try_borrow_mut() {
            rec.cancel();
        }
        tracing::debug!("gesture surface detached");
    }
}

/// Non-passive listener, so the handler may call `preventDefault`.
fn active_listener<F>(
    element: &HtmlElement,
    event_type: &'static str,
    callback: F,
) -> EventListener
where
    F: FnMut(&Event) + 'static,
{
    EventListener::new_with_options(
        element,
        event_type,
        EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        },
        callback,
    )
}

fn schedule_end(recognizer: Rc<RefCell<GestureRecognizer>>, ticket: DebounceTicket) -> Timeout {
    Timeout::new(ticket.delay_ms, move || {
        if let Ok(mut rec) = recognizer.try_borrow_mut() {
            rec.debounce_elapsed(ticket);
        }
    })
}

fn touch_points(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint::read(&t))
        .collect()
}

impl WheelSource for WheelEvent {
    fn delta_x(&self) -> f64 {
        WheelEvent::delta_x(self)
    }
    fn delta_y(&self) -> f64 {
        WheelEvent::delta_y(self)
    }
    fn delta_mode(&self) -> u32 {
        WheelEvent::delta_mode(self)
    }
    fn ctrl_key(&self) -> bool {
        MouseEvent::ctrl_key(self)
    }
    fn shift_key(&self) -> bool {
        MouseEvent::shift_key(self)
    }
    fn client_x(&self) -> i32 {
        MouseEvent::client_x(self)
    }
    fn client_y(&self) -> i32 {
        MouseEvent::client_y(self)
    }
}

impl TouchSource for Touch {
    fn identifier(&self) -> i32 {
        Touch::identifier(self)
    }
    fn client_x(&self) -> i32 {
        Touch::client_x(self)
    }
    fn client_y(&self) -> i32 {
        Touch::client_y(self)
    }
}
