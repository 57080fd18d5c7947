use super::tray_view::TrayView;
use d20_tray::config::GestureConfig;
use d20_tray::model::ViewState;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let view_state = use_reducer(ViewState::default);
    let config = use_state(GestureConfig::load_or_default);

    // Persist config changes
    {
        let cfg = (*config).clone();
        use_effect_with(cfg, move |cfg| {
            if let Err(err) = cfg.save() {
                tracing::warn!(%err, "could not save gesture config");
            }
            || ()
        });
    }

    let on_config = {
        let config = config.clone();
        Callback::from(move |cfg: GestureConfig| config.set(cfg))
    };
    let on_reset_settings = {
        let config = config.clone();
        Callback::from(move |()| {
            if let Err(err) = GestureConfig::clear() {
                tracing::warn!(%err, "could not clear gesture config");
            }
            config.set(GestureConfig::default());
        })
    };

    html! { <TrayView
        view_state={view_state}
        config={(*config).clone()}
        on_config={on_config}
        on_reset_settings={on_reset_settings}
    /> }
}
