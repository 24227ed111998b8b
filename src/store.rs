use crate::model::{RawSubmission, Submission};
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Dépôt de soumissions : collaborateur externe du moteur.
pub trait SubmissionStore {
    /// Liste les enregistrements bruts, filtrés par étiquettes le cas échéant.
    fn list(&self, filter_labels: Option<&[String]>) -> anyhow::Result<Vec<RawSubmission>>;

    /// Enregistre une soumission et retourne son identifiant d'origine.
    ///
    /// Les doublons sont acceptés tels quels : la résolution se fait à la
    /// lecture, par la déduplication dernier-horodatage du moteur.
    fn create(&self, submission: &Submission) -> anyhow::Result<String>;
}

/// Étiquettes apposées sur chaque enregistrement créé.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub labels: Vec<String>,
}

/// Dépôt fichier unique ; un fichier absent se liste vide.
pub struct JsonStore {
    path: PathBuf,
    config: StoreConfig,
}

impl JsonStore {
    pub fn open<P: AsRef<Path>>(path: P, config: StoreConfig) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            config,
        })
    }

    fn read_all(&self) -> anyhow::Result<Vec<RawSubmission>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let records: Vec<RawSubmission> =
            serde_json::from_slice(&data).with_context(|| "parsing submissions file")?;
        Ok(records)
    }

    fn write_all(&self, records: &[RawSubmission]) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(records)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}

impl SubmissionStore for JsonStore {
    fn list(&self, filter_labels: Option<&[String]>) -> anyhow::Result<Vec<RawSubmission>> {
        let records = self.read_all()?;
        let Some(wanted) = filter_labels else {
            return Ok(records);
        };
        Ok(records
            .into_iter()
            .filter(|record| wanted.iter().all(|label| record.labels.contains(label)))
            .collect())
    }

    fn create(&self, submission: &Submission) -> anyhow::Result<String> {
        let mut records = self.read_all()?;
        let origin_id = Uuid::new_v4().to_string();
        let body = serde_json::to_string_pretty(submission)?;
        records.push(RawSubmission {
            origin_id: origin_id.clone(),
            labels: self.config.labels.clone(),
            body,
        });
        self.write_all(&records)?;
        Ok(origin_id)
    }
}
