//! Helpers for constructing URLs to static assets that respect the deployment base path.
//!
//! When `PUBLIC_URL` is set at compile time (e.g., `/dex` for GitHub Pages),
//! generated URLs are prefixed accordingly. Local builds without `PUBLIC_URL`
//! fall back to the page-relative `./out` data root.
use dexview_core::DataPaths;

const DATA_DIR: &str = "out";

/// Dataset layout for this deployment.
#[must_use]
pub fn data_paths() -> DataPaths {
    data_paths_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL for a static asset such as a sprite path taken from the dataset.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

fn data_paths_with_base(base: &str) -> DataPaths {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        DataPaths::rooted(&format!("./{DATA_DIR}"))
    } else {
        DataPaths::rooted(&format!("{base}/{DATA_DIR}"))
    }
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    if relative.contains("://") || relative.starts_with("data:") {
        return relative.to_string();
    }
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches("./").trim_start_matches('/');

    if base.is_empty() {
        format!("./{DATA_DIR}/{rel}")
    } else {
        format!("{base}/{DATA_DIR}/{rel}")
    }
}
