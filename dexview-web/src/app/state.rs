use crate::fetch::WebFetcher;
use dexview_core::{Datasets, JsonFetcher, LoadState, Route, Shell};
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;

/// Shared value compared by identity, so props carrying whole datasets diff in O(1).
pub struct Handle<T: ?Sized>(Rc<T>);

impl<T: ?Sized> Handle<T> {
    #[must_use]
    pub const fn new(inner: Rc<T>) -> Self {
        Self(inner)
    }

    #[must_use]
    pub fn rc(&self) -> Rc<T> {
        Rc::clone(&self.0)
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Deref for Handle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

pub type WebShell = Shell<dyn JsonFetcher>;

#[derive(Clone)]
pub struct AppState {
    pub shell: Rc<WebShell>,
    pub datasets: UseStateHandle<Rc<Datasets>>,
    pub load_state: UseStateHandle<LoadState>,
    pub route: UseStateHandle<Route>,
}

/// Shell over the browser fetcher, rooted at this deployment's data directory.
#[must_use]
pub fn web_shell(fragment: &str) -> WebShell {
    let fetcher: Rc<dyn JsonFetcher> = Rc::new(WebFetcher);
    Shell::new(fetcher, crate::paths::data_paths(), fragment)
}

#[hook]
pub fn use_app_state() -> AppState {
    let shell = use_memo((), |()| web_shell(&initial_fragment()));
    let datasets = use_state({
        let shell = Rc::clone(&shell);
        move || shell.datasets()
    });
    let route = use_state({
        let shell = Rc::clone(&shell);
        move || shell.route.get()
    });
    AppState {
        shell,
        datasets,
        load_state: use_state(|| LoadState::Loading),
        route,
    }
}

#[cfg(target_arch = "wasm32")]
fn initial_fragment() -> String {
    crate::dom::current_hash()
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_fragment() -> String {
    String::new()
}
