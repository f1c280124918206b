use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::app::ports::{DocumentStorePort, HttpClientPort};
use crate::config::{Config, RecordErrorPolicy};
use crate::error::{EtlError, Result};
use crate::observability::metrics;
use crate::pipeline::ingestion::{fetch_payload, sha256_hex, to_pretty_json};
use crate::pipeline::processing::normalize::{DrinkNormalizer, Normalizer};
use crate::pipeline::processing::schema_gate::SchemaGate;
use crate::pipeline::{transform_batch, RecordDiagnostic};
use crate::types::{CocktailsDocument, DrinksPayload};

/// Where the raw drinks payload comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch over HTTP and keep a raw snapshot on disk
    Remote(String),
    /// Read an already fetched payload
    LocalFile(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConvertSettings {
    pub raw_path: PathBuf,
    pub output_path: PathBuf,
    pub on_record_error: RecordErrorPolicy,
}

impl From<&Config> for ConvertSettings {
    fn from(config: &Config) -> Self {
        Self {
            raw_path: config.output.raw_path.clone(),
            output_path: config.output.path.clone(),
            on_record_error: config.transform.on_record_error,
        }
    }
}

/// Summary of a complete conversion run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_records: usize,
    pub converted: usize,
    pub skipped: usize,
    pub errors: Vec<RecordDiagnostic>,
    /// SHA-256 of the raw payload bytes as stored: the snapshot file written
    /// for a remote fetch, or the input file as read for a local source
    pub raw_sha256: String,
    pub output_file: String,
}

/// Snapshot of a fetched payload written to disk
#[derive(Debug, Serialize)]
pub struct FetchSummary {
    pub raw_file: String,
    /// SHA-256 of the snapshot bytes written to `raw_file`
    pub raw_sha256: String,
    pub bytes: usize,
}

/// Use case for fetching drinks and converting them into the cocktail schema
pub struct ConvertUseCase {
    http: Box<dyn HttpClientPort>,
    store: Box<dyn DocumentStorePort>,
    gate: SchemaGate,
    normalizer: Box<dyn Normalizer + Send + Sync>,
    settings: ConvertSettings,
}

impl ConvertUseCase {
    pub fn new(
        http: Box<dyn HttpClientPort>,
        store: Box<dyn DocumentStorePort>,
        gate: SchemaGate,
        normalizer: Box<dyn Normalizer + Send + Sync>,
        settings: ConvertSettings,
    ) -> Self {
        Self {
            http,
            store,
            gate,
            normalizer,
            settings,
        }
    }

    /// Create a use case with the bundled CocktailDB schema and default normalizer
    pub fn with_defaults(
        http: Box<dyn HttpClientPort>,
        store: Box<dyn DocumentStorePort>,
        settings: ConvertSettings,
    ) -> Result<Self> {
        Ok(Self::new(
            http,
            store,
            SchemaGate::cocktail_db()?,
            Box::new(DrinkNormalizer),
            settings,
        ))
    }

    /// Fetch the payload and write it, pretty-printed, to the raw snapshot path
    #[instrument(skip(self))]
    pub async fn fetch_snapshot(&self, url: &str) -> Result<(Value, FetchSummary)> {
        let bytes = fetch_payload(self.http.as_ref(), url).await?;
        let payload: Value = serde_json::from_slice(&bytes)?;

        let snapshot = to_pretty_json(&payload)?;
        self.store.write(&self.settings.raw_path, &snapshot).await?;
        let summary = FetchSummary {
            raw_file: self.settings.raw_path.display().to_string(),
            raw_sha256: sha256_hex(&snapshot),
            bytes: snapshot.len(),
        };
        info!(
            sha256 = %summary.raw_sha256,
            "Unscrubbed cocktail data written to {}",
            summary.raw_file
        );
        Ok((payload, summary))
    }

    async fn load_local(&self, path: &Path) -> Result<(Value, String)> {
        let bytes = self.store.read(path).await?;
        let payload: Value = serde_json::from_slice(&bytes)?;
        info!("Loaded drinks payload from {}", path.display());
        Ok((payload, sha256_hex(&bytes)))
    }

    /// Run fetch (or load), validate, transform and write.
    ///
    /// Nothing is written to the output path unless validation passes and the
    /// record error policy allows the batch to complete.
    #[instrument(skip(self))]
    pub async fn run(&self, source: &InputSource) -> Result<RunSummary> {
        let started_at = Utc::now();
        info!("Record error policy: {:?}", self.settings.on_record_error);

        let (payload, raw_sha256) = match source {
            InputSource::Remote(url) => {
                let (payload, fetched) = self.fetch_snapshot(url).await?;
                (payload, fetched.raw_sha256)
            }
            InputSource::LocalFile(path) => self.load_local(path).await?,
        };

        if let Err(e) = self.gate.check(&payload) {
            if let EtlError::SchemaViolation(violations) = &e {
                metrics::schema::payload_rejected(violations.len());
            }
            return Err(e);
        }

        let DrinksPayload { drinks } = serde_json::from_value(payload)?;
        let outcome = transform_batch(
            self.normalizer.as_ref(),
            &drinks,
            self.settings.on_record_error,
        )?;

        let converted = outcome.cocktails.len();
        let document = CocktailsDocument {
            cocktails: outcome.cocktails,
        };
        self.store
            .write(&self.settings.output_path, &to_pretty_json(&document)?)
            .await?;
        let output_file = self.settings.output_path.display().to_string();
        info!("Scrubbed cocktail data exported to {}", output_file);

        Ok(RunSummary {
            started_at,
            finished_at: Utc::now(),
            total_records: drinks.len(),
            converted,
            skipped: outcome.skipped.len(),
            errors: outcome.skipped,
            raw_sha256,
            output_file,
        })
    }
}
