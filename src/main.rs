mod components;

use components::app::App;

fn main() {
    d20_tray::logging::init(tracing::Level::DEBUG);
    tracing::info!("d20-tray starting");
    yew::Renderer::<App>::new().render();
}
