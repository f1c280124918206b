//! Metric recording helpers for the conversion pipeline.
//!
//! Uses the `metrics` facade; nothing is exported unless the embedding
//! process installs a recorder.

/// Fetch phase metrics
pub mod ingest {
    /// Record the size of a fetched payload
    pub fn payload_fetched(bytes: usize) {
        ::metrics::histogram!("cocktail_fetch_payload_bytes").record(bytes as f64);
    }

    /// Record a non-200 response
    pub fn unexpected_status(status: u16) {
        ::metrics::counter!("cocktail_fetch_unexpected_status_total", "status" => status.to_string())
            .increment(1);
    }
}

/// Schema validation metrics
pub mod schema {
    pub fn payload_rejected(violations: usize) {
        ::metrics::counter!("cocktail_schema_rejections_total").increment(1);
        ::metrics::histogram!("cocktail_schema_violations").record(violations as f64);
    }
}

/// Transform phase metrics
pub mod transform {
    pub fn record_transformed() {
        ::metrics::counter!("cocktail_records_transformed_total").increment(1);
    }

    pub fn record_failed(reason: &'static str) {
        ::metrics::counter!("cocktail_records_failed_total", "reason" => reason).increment(1);
    }

    /// Record that a drink's ingredient list was dropped due to a pairing mismatch
    pub fn ingredients_discarded() {
        ::metrics::counter!("cocktail_ingredients_discarded_total").increment(1);
    }

    pub fn batch_processed(batch_size: usize, duration_secs: f64) {
        ::metrics::histogram!("cocktail_transform_batch_size").record(batch_size as f64);
        ::metrics::histogram!("cocktail_transform_duration_seconds").record(duration_secs);
    }
}
