pub mod app;
pub mod shared;
pub mod usecases;

use app::App;
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let config = shared::config::load_config_or_default();
    log::info!("generation endpoint: {}", config.api.generate_url);

    leptos::mount::mount_to_body(move || view! { <App config=config /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
