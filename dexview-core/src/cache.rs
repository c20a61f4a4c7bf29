//! Lazily populated, session-lived cache of per-mon detail records.

use crate::config::DataPaths;
use crate::data::MonDetail;
use crate::error::LoadError;
use crate::{JsonFetcher, fetch_json};
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type DetailResult = Result<Rc<MonDetail>, LoadError>;
type InFlight = Shared<LocalBoxFuture<'static, DetailResult>>;

/// Memoizing loader for [`MonDetail`] records keyed by id.
///
/// Records are immutable once stored and are never evicted. Failed loads leave no
/// trace, so the next `get` for the same id fetches again. Concurrent requests for
/// the same uncached id share one fetch.
pub struct DetailCache<F: ?Sized> {
    fetcher: Rc<F>,
    paths: DataPaths,
    entries: RefCell<HashMap<String, Rc<MonDetail>>>,
    in_flight: RefCell<HashMap<String, InFlight>>,
}

impl<F: JsonFetcher + ?Sized + 'static> DetailCache<F> {
    #[must_use]
    pub fn new(fetcher: Rc<F>, paths: DataPaths) -> Self {
        Self {
            fetcher,
            paths,
            entries: RefCell::new(HashMap::new()),
            in_flight: RefCell::new(HashMap::new()),
        }
    }

    /// Return the detail record for `id`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] of the underlying fetch. The cache is not populated
    /// on failure.
    pub async fn get(&self, id: &str) -> Result<Rc<MonDetail>, LoadError> {
        if let Some(hit) = self.peek(id) {
            debug!("detail cache hit: {id}");
            return Ok(hit);
        }

        let pending = self.in_flight_for(id);
        let result = pending.clone().await;

        {
            let mut in_flight = self.in_flight.borrow_mut();
            if in_flight
                .get(id)
                .is_some_and(|current| Shared::ptr_eq(current, &pending))
            {
                in_flight.remove(id);
            }
        }

        if let Ok(detail) = &result {
            self.entries
                .borrow_mut()
                .insert(id.to_string(), Rc::clone(detail));
        }
        result
    }

    fn in_flight_for(&self, id: &str) -> InFlight {
        if let Some(existing) = self.in_flight.borrow().get(id) {
            debug!("joining in-flight detail fetch: {id}");
            return existing.clone();
        }
        debug!("detail cache miss: {id}");
        let fetcher = Rc::clone(&self.fetcher);
        let path = self.paths.detail_path(id);
        let fut = async move { fetch_json::<MonDetail, F>(&*fetcher, &path).await.map(Rc::new) }
            .boxed_local()
            .shared();
        self.in_flight
            .borrow_mut()
            .insert(id.to_string(), fut.clone());
        fut
    }

    /// Cached record for `id` without fetching.
    #[must_use]
    pub fn peek(&self, id: &str) -> Option<Rc<MonDetail>> {
        self.entries.borrow().get(id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.borrow().contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    #[must_use]
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }
}
