use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use d20_tray::config::GestureConfig;
use d20_tray::gesture::{Gesture, GestureHandlers, GestureRecognizer, Point};
use d20_tray::model::{ViewAction, ViewState};
use d20_tray::surface::GestureSurface;

use super::{
    camera_controls::CameraControls, gesture_panel::GesturePanel, settings_modal::SettingsModal,
};

const SHOW_HUD_KEY: &str = "d20_show_hud";
const GRID_STEP: f64 = 50.0;
const BOX_SIZE: f64 = 100.0;

#[derive(Properties, PartialEq, Clone)]
pub struct TrayViewProps {
    pub view_state: UseReducerHandle<ViewState>,
    pub config: GestureConfig,
    pub on_config: Callback<GestureConfig>,
    pub on_reset_settings: Callback<()>,
}

#[function_component(TrayView)]
pub fn tray_view(props: &TrayViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let view_ref = use_mut_ref(|| props.view_state.clone());
    let recognizer = {
        let dispatcher = props.view_state.dispatcher();
        let config = props.config.clone();
        use_mut_ref(move || GestureRecognizer::new(config, view_handlers(dispatcher)))
    };
    let open_settings = use_state(|| false);
    let show_hud = use_state(|| {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(SHOW_HUD_KEY).ok().flatten())
            .map(|v| v != "0")
            .unwrap_or(true)
    });

    // Keep the draw loop pointed at the latest state handle
    {
        let view_ref = view_ref.clone();
        let current = props.view_state.clone();
        use_effect_with(props.view_state.version, move |_| {
            *view_ref.borrow_mut() = current;
            || ()
        });
    }

    // Config edits apply to the next input event
    {
        let recognizer = recognizer.clone();
        use_effect_with(props.config.clone(), move |cfg| {
            if let Ok(mut rec) = recognizer.try_borrow_mut() {
                rec.set_config(cfg.clone());
            }
            || ()
        });
    }

    // Persist HUD toggle
    {
        let flag = *show_hud;
        use_effect_with(flag, move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    let _ = store.set_item(SHOW_HUD_KEY, if flag { "1" } else { "0" });
                }
            }
            || ()
        });
    }

    {
        let canvas_ref = canvas_ref.clone();
        let view_ref = view_ref.clone();
        let recognizer = recognizer.clone();
        use_effect_with((), move |_| {
            let setup = (|| {
                let window = web_sys::window()?;
                let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
                let ctx = canvas
                    .get_context("2d")
                    .ok()
                    .flatten()?
                    .dyn_into::<CanvasRenderingContext2d>()
                    .ok()?;
                Some((window, canvas, ctx))
            })();
            let Some((window, canvas, ctx)) = setup else {
                tracing::warn!("canvas not available; gestures disabled");
                return Box::new(|| ()) as Box<dyn FnOnce()>;
            };

            let fit_canvas = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            fit_canvas();
            let resize = EventListener::new(&window, "resize", move |_event| fit_canvas());
            let surface = GestureSurface::attach(&canvas, recognizer.clone());

            // RAF loop; `running` breaks the self-referencing closure on cleanup
            let running = Rc::new(Cell::new(true));
            let raf_id = Rc::new(Cell::new(None::<i32>));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let running = running.clone();
                let raf_id = raf_id.clone();
                let frame_cell_loop = frame_cell.clone();
                let window_loop = window.clone();
                let canvas = canvas.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if !running.get() {
                        return;
                    }
                    let state = (**view_ref.borrow()).clone();
                    draw(&ctx, &canvas, &state);
                    if let Some(cb) = frame_cell_loop.borrow().as_ref() {
                        let next = cb.as_ref().unchecked_ref();
                        if let Ok(id) = window_loop.request_animation_frame(next) {
                            raf_id.set(Some(id));
                        }
                    }
                }) as Box<dyn FnMut()>));
            }
            if let Some(cb) = frame_cell.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }

            // Cleanup
            Box::new(move || {
                running.set(false);
                if let Some(id) = raf_id.get() {
                    let _ = window.cancel_animation_frame(id);
                }
                frame_cell.borrow_mut().take();
                drop(resize);
                drop(surface);
            }) as Box<dyn FnOnce()>
        });
    }

    let state = &*props.view_state;
    // skipped if a recognizer callback is still on the stack
    let owner = recognizer.try_borrow().ok().and_then(|r| r.owner());

    let zoom_cb = |factor: f64| {
        let view_state = props.view_state.clone();
        let canvas_ref = canvas_ref.clone();
        Callback::from(move |()| {
            let at = canvas_ref
                .cast::<HtmlCanvasElement>()
                .map(|c| Point::new(c.width() as f64 / 2.0, c.height() as f64 / 2.0))
                .unwrap_or(Point::ZERO);
            view_state.dispatch(ViewAction::ZoomBy { factor, at });
        })
    };
    let pan_cb = |dx: f64, dy: f64| {
        let view_state = props.view_state.clone();
        Callback::from(move |()| view_state.dispatch(ViewAction::PanBy { dx, dy }))
    };
    let center_cb = {
        let view_state = props.view_state.clone();
        Callback::from(move |()| view_state.dispatch(ViewAction::Reset))
    };
    let open_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: MouseEvent| open_settings.set(true))
    };
    let close_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };
    let toggle_hud_cb = {
        let show_hud = show_hud.clone();
        Callback::from(move |()| show_hud.set(!*show_hud))
    };

    html! {<div style="position:relative; width:100vw; height:100vh; overflow:hidden; touch-action:none;">
        <canvas ref={canvas_ref.clone()} id="tray-canvas" style="display:block; width:100%; height:100%;"></canvas>
        if *show_hud {
            <GesturePanel
                gesture={state.gesture}
                owner={owner}
                transform={state.transform}
                gesture_count={state.gesture_count}
            />
        }
        <div style="position:absolute; top:12px; right:12px;">
            <button onclick={open_settings_cb}>{"Settings"}</button>
        </div>
        <CameraControls
            on_zoom_in={zoom_cb(1.25)}
            on_zoom_out={zoom_cb(0.8)}
            on_pan_left={pan_cb(-64.0, 0.0)}
            on_pan_right={pan_cb(64.0, 0.0)}
            on_pan_up={pan_cb(0.0, -64.0)}
            on_pan_down={pan_cb(0.0, 64.0)}
            on_center={center_cb}
        />
        <SettingsModal
            show={*open_settings}
            on_close={close_settings_cb}
            show_hud={*show_hud}
            on_toggle_hud={toggle_hud_cb}
            config={props.config.clone()}
            on_config={props.on_config.clone()}
            on_reset_settings={props.on_reset_settings.clone()}
        />
    </div>}
}

/// Feeds recognizer callbacks into the view reducer.
fn view_handlers(dispatcher: UseReducerDispatcher<ViewState>) -> GestureHandlers {
    let start = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |g: Gesture| dispatcher.dispatch(ViewAction::GestureStart(g)))
    };
    let change = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |g: Gesture| dispatcher.dispatch(ViewAction::GestureChange(g)))
    };
    let end = Callback::from(move |g: Gesture| dispatcher.dispatch(ViewAction::GestureEnd(g)));
    GestureHandlers {
        on_gesture_start: Some(start),
        on_gesture_change: Some(change),
        on_gesture_end: Some(end),
    }
}

fn draw(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, state: &ViewState) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);

    let [a, b, c, d, e, f] = state.transform.matrix();
    ctx.set_transform(a, b, c, d, e, f).ok();

    // grid over the visible area, in content coordinates
    let top_left = state.transform.unapply(Point::ZERO);
    let bottom_right = state.transform.unapply(Point::new(w, h));
    ctx.set_stroke_style_str("#2f3641");
    ctx.set_line_width((1.0 / a).max(0.001));
    let mut x = (top_left.x / GRID_STEP).floor() * GRID_STEP;
    while x <= bottom_right.x {
        ctx.begin_path();
        ctx.move_to(x, top_left.y);
        ctx.line_to(x, bottom_right.y);
        ctx.stroke();
        x += GRID_STEP;
    }
    let mut y = (top_left.y / GRID_STEP).floor() * GRID_STEP;
    while y <= bottom_right.y {
        ctx.begin_path();
        ctx.move_to(top_left.x, y);
        ctx.line_to(bottom_right.x, y);
        ctx.stroke();
        y += GRID_STEP;
    }

    // starting box
    ctx.set_fill_style_str("#15803d");
    ctx.fill_rect(0.0, 0.0, BOX_SIZE, BOX_SIZE);

    // pivot marker while a gesture is running, in screen space
    if let Some(g) = state.gesture {
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.set_stroke_style_str("#58a6ff");
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let _ = ctx.arc(g.origin.x, g.origin.y, 8.0, 0.0, std::f64::consts::TAU);
        ctx.stroke();
    }
}
