//! Single-flight loading of the cipher reference

use super::{CheatSheetSource, CipherReference, FileSource};
use crate::config::ReferenceSettings;
use crate::utils::ReferenceError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Somewhere a cipher reference can be obtained from
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Human readable origin, used in logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<CipherReference, ReferenceError>;
}

/// Caches the first successfully loaded reference for the lifetime of the loader.
///
/// Concurrent callers of [`load`](Self::load) wait on the same fetch. A failed
/// fetch is not cached; the next caller tries the source again.
pub struct CipherReferenceLoader {
    source: Box<dyn ReferenceSource>,
    cache: OnceCell<Arc<CipherReference>>,
}

impl CipherReferenceLoader {
    pub fn new<S: ReferenceSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            cache: OnceCell::new(),
        }
    }

    /// Build the loader described by the reference settings
    pub fn from_settings(settings: &ReferenceSettings) -> Result<Self, ReferenceError> {
        match &settings.dataset {
            Some(path) => Ok(Self::new(FileSource::new(path))),
            None => Ok(Self::new(CheatSheetSource::new(
                &settings.url,
                settings.timeout(),
            )?)),
        }
    }

    /// Return the reference, fetching it on first use
    pub async fn load(&self) -> Result<Arc<CipherReference>, ReferenceError> {
        let reference = self
            .cache
            .get_or_try_init(|| async {
                tracing::debug!("Loading cipher reference from {}", self.source.describe());
                let reference = self.source.fetch().await?;
                if reference.is_empty() {
                    return Err(ReferenceError::Parse {
                        message: format!("{} yielded no strength tiers", self.source.describe()),
                    });
                }
                tracing::info!(
                    "Loaded {} cipher strength tiers from {}",
                    reference.len(),
                    self.source.describe()
                );
                Ok::<_, ReferenceError>(Arc::new(reference))
            })
            .await?;
        Ok(Arc::clone(reference))
    }

    /// The cached reference, if a load has succeeded
    pub fn cached(&self) -> Option<Arc<CipherReference>> {
        self.cache.get().cloned()
    }
}
