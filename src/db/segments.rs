use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::FilterMap;
use crate::error::Result;

/// Named saved filters, persisted as one JSON document beside the database:
/// segment name → filter map. Every operation reads or rewrites the whole
/// document — fine at tens to low hundreds of segments, not built for
/// write concurrency.
pub struct Segments {
    path: PathBuf,
}

impl Segments {
    /// Open the sidecar at its default per-user location.
    pub fn open() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not locate a config directory",
            )
        })?;
        Self::open_at(config_dir.join("leadbook").join("segments.json"))
    }

    /// Open the sidecar, creating an empty document if none exists.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            fs::write(&path, "{}")?;
        }
        Ok(Self { path })
    }

    /// The full name → filter map. A missing or unparseable document
    /// degrades to an empty map rather than failing — segments are an
    /// auxiliary feature and resilience beats strictness here.
    pub fn load(&self) -> BTreeMap<String, FilterMap> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(_) => BTreeMap::new(),
        }
    }

    /// Create or overwrite one segment. No merge: the new filter map
    /// replaces whatever was stored under the name.
    pub fn save(&self, name: &str, filters: FilterMap) -> Result<()> {
        let mut all = self.load();
        all.insert(name.to_string(), filters);
        self.write(&all)
    }

    /// Remove one segment; a name that was never saved is a no-op.
    pub fn delete(&self, name: &str) -> Result<()> {
        let mut all = self.load();
        if all.remove(name).is_some() {
            self.write(&all)?;
        }
        Ok(())
    }

    fn write(&self, all: &BTreeMap<String, FilterMap>) -> Result<()> {
        let text = serde_json::to_string_pretty(all)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    fn temp_segments() -> (tempfile::TempDir, Segments) {
        let dir = tempfile::tempdir().unwrap();
        let segments = Segments::open_at(dir.path().join("segments.json")).unwrap();
        (dir, segments)
    }

    #[test]
    fn test_open_creates_empty_document() {
        let (dir, segments) = temp_segments();
        assert!(dir.path().join("segments.json").exists());
        assert!(segments.load().is_empty());
    }

    #[test]
    fn test_save_load_delete_round_trip() {
        let (_dir, segments) = temp_segments();

        let mut filters = FilterMap::new();
        filters.insert(Field::LeadTemperature, vec!["Hot".to_string()].into());
        segments.save("hot-leads", filters.clone()).unwrap();

        let loaded = segments.load();
        assert_eq!(loaded.get("hot-leads"), Some(&filters));

        segments.delete("hot-leads").unwrap();
        assert!(!segments.load().contains_key("hot-leads"));
    }

    #[test]
    fn test_save_overwrites_existing_name() {
        let (_dir, segments) = temp_segments();

        let mut first = FilterMap::new();
        first.insert(Field::Country, "Namibia".into());
        segments.save("focus", first).unwrap();

        let mut second = FilterMap::new();
        second.insert(Field::City, "Windhoek".into());
        segments.save("focus", second.clone()).unwrap();

        let loaded = segments.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("focus"), Some(&second));
    }

    #[test]
    fn test_delete_unknown_name_is_noop() {
        let (_dir, segments) = temp_segments();
        segments.delete("never-saved").unwrap();
        assert!(segments.load().is_empty());
    }

    #[test]
    fn test_corrupt_document_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segments.json");
        fs::write(&path, "{ not json").unwrap();

        let segments = Segments::open_at(&path).unwrap();
        assert!(segments.load().is_empty());

        // saving over the corrupt document repairs it
        let mut filters = FilterMap::new();
        filters.insert(Field::Country, "Lesotho".into());
        segments.save("fresh", filters).unwrap();
        assert_eq!(segments.load().len(), 1);
    }
}
