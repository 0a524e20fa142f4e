//! Game asset definitions

use std::path::{Path, PathBuf};

use road_engine::assets::{AssetError, ObjLoader};
use road_engine::render::Mesh;

/// Models used by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Traffic cone obstacle
    TrafficCone,
    /// Collectable coin
    GoldCoin,
}

impl ModelKind {
    /// File name inside the model directory
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::TrafficCone => "traffic.obj",
            Self::GoldCoin => "SimpleGoldCoin.obj",
        }
    }

    /// Full path of the model under `model_dir`
    pub fn path_in(self, model_dir: &Path) -> PathBuf {
        model_dir.join(self.file_name())
    }

    /// Load the model's mesh from `model_dir`
    pub fn load(self, model_dir: &Path) -> Result<Mesh, AssetError> {
        let path = self.path_in(model_dir);
        ObjLoader::load_obj(&path).map_err(|e| {
            log::error!("Failed to load {:?} from {}: {}", self, path.display(), e);
            e
        })
    }
}

/// Models shipped with the game crate
pub fn default_model_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources").join("models")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_models_load() {
        for kind in [ModelKind::TrafficCone, ModelKind::GoldCoin] {
            let mesh = kind.load(&default_model_dir()).unwrap();
            assert!(mesh.triangle_count() > 0, "{kind:?} has no triangles");
        }
    }

    #[test]
    fn test_missing_model_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match ModelKind::GoldCoin.load(dir.path()) {
            Err(AssetError::NotFound(path)) => assert!(path.ends_with("SimpleGoldCoin.obj")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
