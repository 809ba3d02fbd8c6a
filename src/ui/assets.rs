//! Filesystem-based asset source for the piece SVGs.
//!
//! Glyphs are looked up next to the executable, then relative to the
//! working directory. Missing files resolve to `None` so the board falls
//! back to text symbols.

use gpui::{AssetSource, SharedString};
use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

pub struct FileAssets {
    base_path: PathBuf,
}

impl FileAssets {
    pub fn new() -> Self {
        let base_path = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        Self { base_path }
    }

    fn candidates(&self, path: &str) -> Vec<PathBuf> {
        let mut paths = vec![self.base_path.join(path), PathBuf::from(path)];
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(path));
        }
        paths
    }
}

impl Default for FileAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for FileAssets {
    fn load(&self, path: &str) -> gpui::Result<Option<Cow<'static, [u8]>>> {
        for p in self.candidates(path) {
            if let Ok(data) = fs::read(&p) {
                return Ok(Some(Cow::Owned(data)));
            }
        }
        log::debug!("asset {} not found", path);
        Ok(None)
    }

    fn list(&self, path: &str) -> gpui::Result<Vec<SharedString>> {
        let dir_path = self.base_path.join(path);
        let mut results = Vec::new();

        if let Ok(entries) = fs::read_dir(&dir_path) {
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str() {
                    results.push(SharedString::from(name.to_string()));
                }
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_is_none() {
        let assets = FileAssets::new();
        let loaded = assets.load("assets/no-such-piece.svg").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_loads_relative_to_working_dir() {
        let assets = FileAssets::new();
        let loaded = assets.load("Cargo.toml").unwrap();
        assert!(loaded.is_some_and(|data| !data.is_empty()));
    }
}
