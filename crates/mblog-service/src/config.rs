use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use mblog_storage_json::{BOOKMARKS_FILE, COMMENTS_FILE, POSTS_FILE};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON collections. Tilde-expanded; relative
    /// paths are resolved against the app root.
    pub root: String,
    #[serde(default)]
    pub posts_file: Option<String>,
    #[serde(default)]
    pub comments_file: Option<String>,
    #[serde(default)]
    pub bookmarks_file: Option<String>,
}

impl Config {
    pub fn default_for_root() -> Self {
        Self {
            data: DataConfig {
                root: "data".to_string(),
                posts_file: None,
                comments_file: None,
                bookmarks_file: None,
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse mblog.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join("mblog.toml")
    }

    pub fn data_dir(&self, root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.data.root).to_string();
        let dir = PathBuf::from(expanded);
        if dir.is_absolute() {
            dir
        } else {
            root.join(dir)
        }
    }

    pub fn posts_file(&self) -> &str {
        self.data.posts_file.as_deref().unwrap_or(POSTS_FILE)
    }

    pub fn comments_file(&self) -> &str {
        self.data.comments_file.as_deref().unwrap_or(COMMENTS_FILE)
    }

    pub fn bookmarks_file(&self) -> &str {
        self.data.bookmarks_file.as_deref().unwrap_or(BOOKMARKS_FILE)
    }
}
