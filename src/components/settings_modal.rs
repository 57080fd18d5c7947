use d20_tray::config::GestureConfig;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub show_hud: bool,
    pub on_toggle_hud: Callback<()>,
    pub config: GestureConfig,
    pub on_config: Callback<GestureConfig>,
    pub on_reset_settings: Callback<()>,
}

/// Number input bound to one config field. Unparseable input is ignored.
fn number_field(
    label: &'static str,
    value: f64,
    step: &'static str,
    config: &GestureConfig,
    on_config: &Callback<GestureConfig>,
    apply: fn(&mut GestureConfig, f64),
) -> Html {
    let onchange = {
        let config = config.clone();
        let on_config = on_config.clone();
        Callback::from(move |e: Event| {
            let input = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok());
            let Some(input) = input else {
                return;
            };
            if let Ok(v) = input.value().parse::<f64>() {
                if v.is_finite() && v >= 0.0 {
                    let mut next = config.clone();
                    apply(&mut next, v);
                    on_config.emit(next);
                }
            }
        })
    };
    html! {
        <label style="display:flex; align-items:center; justify-content:space-between; gap:8px;">
            <span>{ label }</span>
            <input
                type="number"
                min="0"
                step={step}
                style="width:90px;"
                value={value.to_string()}
                {onchange}
            />
        </label>
    }
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_hud_cb = {
        let cb = props.on_toggle_hud.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset_settings.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .map(|win| {
                    win.confirm_with_message("Restore default gesture settings?")
                        .unwrap_or(false)
                })
                .unwrap_or(true);
            if confirmed {
                cb.emit(());
            }
        })
    };

    let cfg = &props.config;
    let field =
        |label: &'static str, value: f64, step: &'static str, apply: fn(&mut GestureConfig, f64)| {
            number_field(label, value, step, cfg, &props.on_config, apply)
        };
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                <input type="checkbox" checked={props.show_hud} onclick={toggle_hud_cb} />
                <span>{"Show gesture HUD"}</span>
            </label>
            <div style="display:flex; flex-direction:column; gap:10px;">
                { field("Wheel end delay (ms)", cfg.debounce_ms as f64, "10",
                    |c, v| c.debounce_ms = v.round() as u32) }
                { field("Wheel zoom speed", cfg.wheel_scale_speedup, "0.5",
                    |c, v| c.wheel_scale_speedup = v) }
                { field("Wheel pan speed", cfg.wheel_translation_speedup, "0.5",
                    |c, v| c.wheel_translation_speedup = v) }
                { field("Max wheel step (px)", cfg.max_wheel_delta, "1",
                    |c, v| c.max_wheel_delta = v) }
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Reset Settings"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
