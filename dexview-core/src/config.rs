use serde::{Deserialize, Serialize};

/// Locations of the static dataset documents, relative to a data root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub root: String,
    pub index: String,
    pub presets: String,
    pub biomes: String,
    pub sprites: String,
    pub drops: String,
    pub mons_dir: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            root: String::from("./out"),
            index: String::from("dex.json"),
            presets: String::from("presets.json"),
            biomes: String::from("biomes.json"),
            sprites: String::from("sprites.json"),
            drops: String::from("drops_index.json"),
            mons_dir: String::from("mons"),
        }
    }
}

impl DataPaths {
    /// Default layout rooted somewhere else (a filesystem dir or a public URL prefix).
    #[must_use]
    pub fn rooted(root: &str) -> Self {
        Self {
            root: root.to_string(),
            ..Self::default()
        }
    }

    fn join(&self, relative: &str) -> String {
        let root = self.root.trim_end_matches('/');
        let rel = relative.trim_start_matches('/');
        if root.is_empty() {
            rel.to_string()
        } else {
            format!("{root}/{rel}")
        }
    }

    #[must_use]
    pub fn index_path(&self) -> String {
        self.join(&self.index)
    }

    #[must_use]
    pub fn presets_path(&self) -> String {
        self.join(&self.presets)
    }

    #[must_use]
    pub fn biomes_path(&self) -> String {
        self.join(&self.biomes)
    }

    #[must_use]
    pub fn sprites_path(&self) -> String {
        self.join(&self.sprites)
    }

    #[must_use]
    pub fn drops_path(&self) -> String {
        self.join(&self.drops)
    }

    /// Per-mon detail document: `<root>/<mons_dir>/<id>.json`.
    #[must_use]
    pub fn detail_path(&self, id: &str) -> String {
        let dir = self.mons_dir.trim_matches('/');
        self.join(&format!("{dir}/{id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_published_site() {
        let paths = DataPaths::default();
        assert_eq!(paths.index_path(), "./out/dex.json");
        assert_eq!(paths.drops_path(), "./out/drops_index.json");
        assert_eq!(paths.detail_path("raichu_alola"), "./out/mons/raichu_alola.json");
    }

    #[test]
    fn rooted_layout_trims_slashes() {
        let paths = DataPaths::rooted("/play/out/");
        assert_eq!(paths.presets_path(), "/play/out/presets.json");
        let bare = DataPaths::rooted("");
        assert_eq!(bare.sprites_path(), "sprites.json");
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let paths: DataPaths = serde_json::from_str(r#"{"root":"data"}"#).unwrap();
        assert_eq!(paths.biomes_path(), "data/biomes.json");
    }
}
