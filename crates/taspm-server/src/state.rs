use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;

use taspm::Pipeline;

use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelCache>,
}

impl AppState {
    /// State whose pipeline is loaded from `artifact` on first use.
    pub fn new(artifact: impl Into<PathBuf>) -> Self {
        Self {
            models: Arc::new(ModelCache::new(artifact)),
        }
    }

    /// State serving an already fitted pipeline.
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self {
            models: Arc::new(ModelCache::preloaded(pipeline)),
        }
    }
}

/// Process-wide, load-once pipeline.
///
/// A failed load leaves the cell empty, so the next request retries it.
pub struct ModelCache {
    path: PathBuf,
    cell: OnceCell<Arc<Pipeline>>,
}

impl ModelCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn preloaded(pipeline: Pipeline) -> Self {
        Self {
            path: PathBuf::new(),
            cell: OnceCell::new_with(Some(Arc::new(pipeline))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get(&self) -> Result<Arc<Pipeline>, ServerError> {
        let pipeline = self
            .cell
            .get_or_try_init(|| async {
                let path = self.path.clone();
                let pipeline = tokio::task::spawn_blocking(move || Pipeline::load(&path)).await??;
                tracing::info!(path = %self.path.display(), width = pipeline.transform().width(), "loaded pipeline");
                Ok::<_, ServerError>(Arc::new(pipeline))
            })
            .await?;
        Ok(Arc::clone(pipeline))
    }
}
