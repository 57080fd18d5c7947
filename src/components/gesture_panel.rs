use d20_tray::gesture::{Gesture, SessionOwner};
use d20_tray::state::ViewTransform;
use d20_tray::util::{format_degrees, format_point, format_scale};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GesturePanelProps {
    pub gesture: Option<Gesture>,
    pub owner: Option<SessionOwner>,
    pub transform: ViewTransform,
    pub gesture_count: u32,
}

#[function_component]
pub fn GesturePanel(props: &GesturePanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500; opacity:0.8;";
    let value_style =
        "min-width:110px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";

    let row = |label: &str, value: String, color: &str| {
        html! {
            <div style={row_style}>
                <span style={format!("{} color:{};", label_style, color)}>{ label.to_string() }</span>
                <span style={format!("{} color:{};", value_style, color)}>{ value }</span>
            </div>
        }
    };

    let status = match (props.gesture.is_some(), props.owner) {
        (true, Some(owner)) => format!("active ({})", owner.label()),
        (true, None) => "active".to_string(),
        (false, _) => "idle".to_string(),
    };
    let live = props.gesture.unwrap_or(Gesture::identity(props.transform.origin));

    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:260px; display:flex; flex-direction:column; gap:8px; font-size:14px; pointer-events:none;">
            { row("Gesture", status, "#d4af37") }
            { row("Scale", format_scale(live.scale), "#58a6ff") }
            { row("Rotation", format_degrees(live.rotation), "#58a6ff") }
            { row("Translation", format_point(live.translation), "#58a6ff") }
            { row("Origin", format_point(live.origin), "#58a6ff") }
            <div style="height:1px; background:#30363d;"></div>
            { row("View scale", format_scale(props.transform.scale), "#8b949e") }
            { row("View offset", format_point(props.transform.translation), "#8b949e") }
            { row("Gestures", props.gesture_count.to_string(), "#8b949e") }
        </div>
    }
}
