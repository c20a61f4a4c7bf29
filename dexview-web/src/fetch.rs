use dexview_core::{JsonFetcher, LoadError};

/// [`JsonFetcher`] backed by the browser `fetch` API.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebFetcher;

#[async_trait::async_trait(?Send)]
impl JsonFetcher for WebFetcher {
    #[cfg(target_arch = "wasm32")]
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        use crate::dom::{FetchFailure, fetch_text};
        log::debug!("fetch {path}");
        fetch_text(path).await.map_err(|failure| match failure {
            FetchFailure::Status(status) => LoadError::Status {
                path: path.to_string(),
                status,
            },
            FetchFailure::Network(message) => LoadError::network(path, message),
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        Err(LoadError::network(path, "fetch is only available in the browser"))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn native_builds_report_fetch_as_unavailable() {
        let err = block_on(WebFetcher.fetch_text("./out/dex.json")).unwrap_err();
        assert!(matches!(err, LoadError::Network { ref path, .. } if path == "./out/dex.json"));
    }
}
