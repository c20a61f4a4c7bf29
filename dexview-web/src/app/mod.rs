#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

pub mod bootstrap;
pub mod routing;
pub mod state;
pub mod view;

pub use state::{AppState, Handle};
pub use view::{ShellView, ShellViewProps};

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    bootstrap::use_bootstrap(&app_state);
    routing::use_hash_routing(&app_state);
    routing::use_no_spawns_shortcut(&app_state);

    let on_toggle_no_spawns = {
        let route = app_state.route.clone();
        Callback::from(move |()| routing::toggle_no_spawns(&route))
    };
    html! {
        <ShellView
            load_state={(*app_state.load_state).clone()}
            datasets={Handle::new(std::rc::Rc::clone(&*app_state.datasets))}
            cache={Handle::new(std::rc::Rc::clone(&app_state.shell.cache))}
            route={(*app_state.route).clone()}
            on_toggle_no_spawns={on_toggle_no_spawns}
        />
    }
}
