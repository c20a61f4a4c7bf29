#![forbid(unsafe_code)]
//! Dexview web front end: a Yew single-page app over the static dataset.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod fetch;
pub mod pages;
pub mod paths;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        dom::console_error("console logger already initialised");
    }
    yew::Renderer::<app::App>::new().render();
}
