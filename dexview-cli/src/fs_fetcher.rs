use async_trait::async_trait;
use dexview_core::{JsonFetcher, LoadError};
use std::io::ErrorKind;

/// Serves dataset paths from the local filesystem, relative to the working directory.
///
/// A missing file reports as HTTP 404 so the CLI sees the same failures the
/// browser would for a missing static asset.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFetcher;

#[async_trait(?Send)]
impl JsonFetcher for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        log::debug!("read {path}");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => LoadError::Status {
                    path: path.to_string(),
                    status: 404,
                },
                ErrorKind::PermissionDenied => LoadError::Status {
                    path: path.to_string(),
                    status: 403,
                },
                _ => LoadError::network(path, err.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "dexview-fs-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_dataset_files() {
        let path = scratch_dir("read").join("dex.json");
        std::fs::write(&path, "[]").unwrap();
        let body = FsFetcher.fetch_text(path.to_str().unwrap()).await.unwrap();
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn missing_files_look_like_http_404() {
        let path = scratch_dir("missing").join("mons").join("nobody.json");
        let path = path.to_str().unwrap();
        let err = FsFetcher.fetch_text(path).await.unwrap_err();
        assert_eq!(
            err,
            LoadError::Status {
                path: path.to_string(),
                status: 404
            }
        );
    }
}
