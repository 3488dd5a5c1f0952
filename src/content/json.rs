use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::{ContentSource, WorldContent};
use crate::error::ContentError;
use crate::model::World;

/// Reads worlds from `<worlds_dir>/<world_id>/*.json`.
///
/// `world.json`, `provinces.json`, `factions.json` and `units.json` are
/// required. Every other collection file is optional and defaults to empty.
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    worlds_dir: PathBuf,
}

impl JsonContentSource {
    pub fn new(worlds_dir: impl Into<PathBuf>) -> Self {
        Self {
            worlds_dir: worlds_dir.into(),
        }
    }

    pub fn world_dir(&self, world_id: &str) -> PathBuf {
        self.worlds_dir.join(world_id)
    }
}

impl ContentSource for JsonContentSource {
    fn load(&self, world_id: &str) -> Result<WorldContent, ContentError> {
        let dir = self.world_dir(world_id);
        if !dir.is_dir() {
            return Err(ContentError::UnknownWorld(world_id.to_string()));
        }

        let world: World = read_json(&dir.join("world.json"))?;
        Ok(WorldContent {
            world,
            provinces: read_json(&dir.join("provinces.json"))?,
            factions: read_json(&dir.join("factions.json"))?,
            units: read_json(&dir.join("units.json"))?,
            resources: read_optional(&dir.join("resources.json"))?,
            holdings: read_optional(&dir.join("holdings.json"))?,
            borders: read_optional(&dir.join("borders.json"))?,
            relations: read_optional(&dir.join("relations.json"))?,
            cultures: read_optional(&dir.join("cultures.json"))?,
            flags: read_optional(&dir.join("flags.json"))?,
            terrains: read_optional(&dir.join("terrains.json"))?,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ContentError> {
    let text = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ContentError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    match read_json(path) {
        Err(ContentError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(Vec::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_world_directory_is_unknown_world() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonContentSource::new(dir.path());
        let err = source.load("nowhere").unwrap_err();
        assert!(matches!(err, ContentError::UnknownWorld(id) if id == "nowhere"));
    }

    #[test]
    fn missing_required_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let err = JsonContentSource::new(dir.path()).load("empty").unwrap_err();
        match err {
            ContentError::Io { path, .. } => assert!(path.ends_with("world.json")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let world_dir = dir.path().join("broken");
        fs::create_dir(&world_dir).unwrap();
        fs::write(world_dir.join("world.json"), "{ not json").unwrap();
        let err = JsonContentSource::new(dir.path()).load("broken").unwrap_err();
        assert!(matches!(err, ContentError::Json { .. }));
    }
}
