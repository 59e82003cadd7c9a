//! Static cipher reference sources

use super::{CipherReference, ReferenceSource};
use crate::utils::ReferenceError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct Dataset {
    tiers: BTreeMap<String, Vec<String>>,
}

/// Reads tiers from a TOML dataset:
///
/// ```toml
/// [tiers]
/// "Advanced" = ["ECDHE-RSA-AES256-GCM-SHA384"]
/// ```
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn parse(content: &str) -> Result<CipherReference, toml::de::Error> {
        let dataset: Dataset = toml::from_str(content)?;
        let mut reference = CipherReference::new();
        for (label, ciphers) in dataset.tiers {
            reference.insert(&label, ciphers);
        }
        Ok(reference)
    }
}

#[async_trait]
impl ReferenceSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<CipherReference, ReferenceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ReferenceError::Dataset {
                path: self.describe(),
                message: e.to_string(),
            })?;
        Self::parse(&content).map_err(|e| ReferenceError::Dataset {
            path: self.describe(),
            message: e.to_string(),
        })
    }
}

/// Serves a reference held in memory
pub struct StaticSource {
    reference: CipherReference,
}

impl StaticSource {
    pub fn new(reference: CipherReference) -> Self {
        Self { reference }
    }
}

#[async_trait]
impl ReferenceSource for StaticSource {
    fn describe(&self) -> String {
        "static reference".to_string()
    }

    async fn fetch(&self) -> Result<CipherReference, ReferenceError> {
        Ok(self.reference.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[tiers]\n\"Advanced\" = [\"AES256-GCM\"]\n\"Legacy\" = [\"DES-CBC3-SHA\", \"RC4-SHA\"]\n"
        )
        .unwrap();

        let reference = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(reference.len(), 2);
        assert!(reference.tier("D").unwrap().contains("RC4-SHA"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let err = FileSource::new("/nonexistent/tiers.toml")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, ReferenceError::Dataset { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(FileSource::parse("tiers = 3").is_err());
    }
}
