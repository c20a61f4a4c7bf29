#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
#[cfg(any(target_arch = "wasm32", test))]
use dexview_core::{Datasets, JsonFetcher, LoadState, Shell};
#[cfg(any(target_arch = "wasm32", test))]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

/// Datasets and load state the tree receives once startup settles.
#[cfg(any(target_arch = "wasm32", test))]
fn settle<F: JsonFetcher + ?Sized + 'static>(shell: &Shell<F>, outcome: LoadState) -> (Rc<Datasets>, LoadState) {
    if let LoadState::Failed(message) = &outcome {
        log::error!("{message}");
    }
    (shell.datasets(), outcome)
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let datasets = app_state.datasets.clone();
    let load_state = app_state.load_state.clone();
    let shell = Rc::clone(&app_state.shell);

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = shell.load().await;
            let (loaded, state) = settle(&*shell, outcome);
            datasets.set(loaded);
            load_state.set(state);
        });
        || {}
    });
}
