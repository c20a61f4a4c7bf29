use dexview_core::Route;
use dexview_core::route::{NO_SPAWNS_PARAM, with_hash_param};
#[cfg(target_arch = "wasm32")]
use {
    crate::app::state::AppState,
    crate::dom,
    std::rc::Rc,
    wasm_bindgen::JsCast,
    wasm_bindgen::prelude::Closure,
    yew::prelude::*,
};

/// Key that flips the hidden "no spawns" dex filter.
pub const NO_SPAWNS_KEY: &str = "n";

/// Whether a keydown should flip the flag. Typing into form fields and modified
/// keys never do.
#[must_use]
pub fn should_toggle_no_spawns(key: &str, ctrl: bool, meta: bool, alt: bool, editable: bool) -> bool {
    !editable && !ctrl && !meta && !alt && key.eq_ignore_ascii_case(NO_SPAWNS_KEY)
}

/// Fragment with the flag flipped relative to `current`.
#[must_use]
pub fn toggled_fragment(hash: &str, current: &Route) -> String {
    let hash = if hash.trim().is_empty() { "#/" } else { hash };
    with_hash_param(hash, NO_SPAWNS_PARAM, !current.no_spawns())
}

/// Only the dex listing reacts to the shortcut.
#[must_use]
pub fn shortcut_applies(route: &Route) -> bool {
    matches!(route.app_view(), dexview_core::AppView::Dex { .. })
}

#[cfg(target_arch = "wasm32")]
pub fn toggle_no_spawns(route: &Route) {
    dom::set_hash(&toggled_fragment(&dom::current_hash(), route));
}

/// Keep the shell route in step with `hashchange` and prefetch detail records.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_hash_routing(app_state: &AppState) {
    let shell = Rc::clone(&app_state.shell);
    let route = app_state.route.clone();

    use_effect_with((), move |()| {
        let listener = Closure::<dyn Fn(web_sys::HashChangeEvent)>::new(move |_| {
            if let Some(id) = shell.navigate(&dom::current_hash()) {
                let cache = Rc::clone(&shell.cache);
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = cache.get(&id).await {
                        log::debug!("prefetch of {id} failed: {err}");
                    }
                });
            }
            route.set(shell.route.get());
        });
        let window = dom::window();
        if let Err(err) = window
            .add_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref())
        {
            dom::console_error(&dom::js_error_message(&err));
        }
        move || {
            let _ = window.remove_event_listener_with_callback(
                "hashchange",
                listener.as_ref().unchecked_ref(),
            );
            drop(listener);
        }
    });
}

/// Global `n` shortcut for the hidden dex flag.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_no_spawns_shortcut(app_state: &AppState) {
    let shell = Rc::clone(&app_state.shell);

    use_effect_with((), move |()| {
        let listener = Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |event: web_sys::KeyboardEvent| {
            let editable = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
                .is_some_and(|el| {
                    el.is_content_editable()
                        || matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
                });
            if !should_toggle_no_spawns(
                &event.key(),
                event.ctrl_key(),
                event.meta_key(),
                event.alt_key(),
                editable,
            ) {
                return;
            }
            let route = shell.route.get();
            if shortcut_applies(&route) {
                event.prevent_default();
                toggle_no_spawns(&route);
            }
        });
        let window = dom::window();
        if let Err(err) = window
            .add_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref())
        {
            dom::console_error(&dom::js_error_message(&err));
        }
        move || {
            let _ = window
                .remove_event_listener_with_callback("keydown", listener.as_ref().unchecked_ref());
            drop(listener);
        }
    });
}
