//! Application shell: owns the loaded datasets, the current route and the detail cache.
//!
//! Front ends drive it through two entry points. [`Shell::load`] runs once at
//! startup, and [`Shell::navigate`] runs on every fragment change.

use crate::cache::DetailCache;
use crate::config::DataPaths;
use crate::data::{BiomeIndex, DropsIndex, IndexRecord, MonDetail, Preset, SpriteIndex};
use crate::error::LoadError;
use crate::route::{AppView, Route, parse_route};
use crate::{JsonFetcher, fetch_json};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Everything loaded at startup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Datasets {
    pub index: Vec<IndexRecord>,
    pub presets: BTreeMap<String, Preset>,
    pub biomes: BiomeIndex,
    pub sprites: SpriteIndex,
    pub drops: DropsIndex,
}

async fn optional<T, F>(fetcher: &F, path: String) -> T
where
    T: DeserializeOwned + Default,
    F: JsonFetcher + ?Sized,
{
    match fetch_json(fetcher, &path).await {
        Ok(value) => value,
        Err(err) => {
            warn!("{err}; continuing without it");
            T::default()
        }
    }
}

/// Load the five startup documents concurrently.
///
/// Optional datasets that fail to load are replaced by empty defaults.
///
/// # Errors
///
/// Returns the index load failure, which no listing can do without.
pub async fn load_datasets<F>(fetcher: &F, paths: &DataPaths) -> Result<Datasets, LoadError>
where
    F: JsonFetcher + ?Sized,
{
    let index_path = paths.index_path();
    let (index, presets, biomes, sprites, drops) = futures::join!(
        fetch_json::<Vec<IndexRecord>, F>(fetcher, &index_path),
        optional::<BTreeMap<String, Preset>, F>(fetcher, paths.presets_path()),
        optional::<BiomeIndex, F>(fetcher, paths.biomes_path()),
        optional::<SpriteIndex, F>(fetcher, paths.sprites_path()),
        optional::<DropsIndex, F>(fetcher, paths.drops_path()),
    );
    let index = index?;
    info!(
        "loaded {} mons, {} presets, {} biome tags, {} sprite sets, {} drop items",
        index.len(),
        presets.len(),
        biomes.tags.len(),
        sprites.images.len(),
        drops.items.len()
    );
    Ok(Datasets {
        index,
        presets,
        biomes,
        sprites,
        drops,
    })
}

/// Startup progress. `Failed` carries the fatal index error message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

type RouteListener = Rc<dyn Fn(&Route)>;

/// The current route, updated only through [`CurrentRoute::navigate`].
///
/// Listeners are called after every navigation with the new route.
#[derive(Default)]
pub struct CurrentRoute {
    route: RefCell<Route>,
    listeners: RefCell<Vec<(usize, RouteListener)>>,
    next_id: Cell<usize>,
}

impl CurrentRoute {
    #[must_use]
    pub fn new(fragment: &str) -> Self {
        Self {
            route: RefCell::new(parse_route(fragment)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn get(&self) -> Route {
        self.route.borrow().clone()
    }

    /// Register `listener`; the returned id unsubscribes it.
    pub fn subscribe(&self, listener: impl Fn(&Route) + 'static) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: usize) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    /// Re-parse `fragment`, replace the route in place and notify listeners.
    pub fn navigate(&self, fragment: &str) -> Route {
        let route = parse_route(fragment);
        debug!("route -> {}/{}", route.view, route.param);
        *self.route.borrow_mut() = route.clone();
        let listeners: Vec<RouteListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&route);
        }
        route
    }
}

/// What the detail view currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DetailState {
    #[default]
    Loading,
    Loaded(Rc<MonDetail>),
    /// Load failed; retrying is allowed.
    Failed(String),
    /// The route names no id.
    NotFound,
}

/// Display state of the detail view, guarded against late results for an old id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailSlot {
    pub requested: String,
    pub state: DetailState,
}

impl DetailSlot {
    /// Start showing `id`.
    pub fn request(&mut self, id: &str) {
        self.requested = id.to_string();
        self.state = if id.is_empty() {
            DetailState::NotFound
        } else {
            DetailState::Loading
        };
    }

    /// Commit a fetch result for `id`. Results for anything but the requested id are
    /// dropped; returns whether the state changed.
    pub fn commit(&mut self, id: &str, result: Result<Rc<MonDetail>, LoadError>) -> bool {
        if id != self.requested {
            debug!("dropping stale detail result for {id}");
            return false;
        }
        self.state = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(err) => {
                warn!("{err}");
                DetailState::Failed(err.to_string())
            }
        };
        true
    }

    /// What to draw while the route names `id`. A slot still holding another id
    /// draws `Loading`, never that other record.
    #[must_use]
    pub fn state_for(&self, id: &str) -> DetailState {
        if id == self.requested {
            self.state.clone()
        } else if id.is_empty() {
            DetailState::NotFound
        } else {
            DetailState::Loading
        }
    }
}

/// Process-wide application state.
pub struct Shell<F: ?Sized> {
    pub datasets: RefCell<Rc<Datasets>>,
    pub load_state: RefCell<LoadState>,
    pub route: CurrentRoute,
    pub cache: Rc<DetailCache<F>>,
    fetcher: Rc<F>,
    paths: DataPaths,
}

impl<F: JsonFetcher + ?Sized + 'static> Shell<F> {
    #[must_use]
    pub fn new(fetcher: Rc<F>, paths: DataPaths, fragment: &str) -> Self {
        Self {
            datasets: RefCell::new(Rc::new(Datasets::default())),
            load_state: RefCell::new(LoadState::Loading),
            route: CurrentRoute::new(fragment),
            cache: Rc::new(DetailCache::new(Rc::clone(&fetcher), paths.clone())),
            fetcher,
            paths,
        }
    }

    /// Load every startup dataset and record the outcome in `load_state`.
    pub async fn load(&self) -> LoadState {
        let state = match load_datasets(&*self.fetcher, &self.paths).await {
            Ok(datasets) => {
                *self.datasets.borrow_mut() = Rc::new(datasets);
                LoadState::Ready
            }
            Err(err) => LoadState::Failed(err.to_string()),
        };
        *self.load_state.borrow_mut() = state.clone();
        state
    }

    #[must_use]
    pub fn datasets(&self) -> Rc<Datasets> {
        Rc::clone(&self.datasets.borrow())
    }

    /// Apply a fragment change. Returns the detail id to prefetch, if the new route
    /// shows a detail record that is not cached yet.
    pub fn navigate(&self, fragment: &str) -> Option<String> {
        let route = self.route.navigate(fragment);
        route
            .detail_id()
            .filter(|id| !self.cache.contains(id))
            .map(str::to_string)
    }

    #[must_use]
    pub fn current_view(&self) -> AppView {
        self.route.get().app_view()
    }

    #[must_use]
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}
