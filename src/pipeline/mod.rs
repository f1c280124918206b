pub mod ingestion;
pub mod processing;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::config::RecordErrorPolicy;
use crate::constants::record_label;
use crate::error::{EtlError, Result};
use crate::observability::metrics;
use crate::pipeline::processing::normalize::Normalizer;
use crate::types::{NormalizedDrink, RawDrinkRecord};

/// A drink that was left out of the output under `RecordErrorPolicy::Skip`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDiagnostic {
    pub index: usize,
    pub record: String,
    pub kind: &'static str,
    pub message: String,
}

/// Result of transforming a whole `drinks` array
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub cocktails: Vec<NormalizedDrink>,
    pub skipped: Vec<RecordDiagnostic>,
}

/// Transform every drink in input order.
///
/// Under `Abort` the first failure is returned as `EtlError::Transform` and
/// nothing is kept; under `Skip` the failing drink is dropped and recorded.
#[instrument(skip(normalizer, drinks), fields(total = drinks.len()))]
pub fn transform_batch(
    normalizer: &dyn Normalizer,
    drinks: &[Value],
    policy: RecordErrorPolicy,
) -> Result<BatchOutcome> {
    let started = std::time::Instant::now();
    let mut outcome = BatchOutcome::default();

    for (i, value) in drinks.iter().enumerate() {
        let raw = RawDrinkRecord::from_json(value);
        let label = record_label(raw.id_drink.as_deref(), i);

        match normalizer.normalize(&raw) {
            Ok(drink) => {
                if drink.ingredients.is_none() {
                    metrics::transform::ingredients_discarded();
                }
                metrics::transform::record_transformed();
                debug!("Transformed drink {}", label);
                outcome.cocktails.push(drink);
            }
            Err(e) => {
                metrics::transform::record_failed(e.kind());
                match policy {
                    RecordErrorPolicy::Abort => {
                        error!("Transform failed for drink {}: {}", label, e);
                        return Err(EtlError::Transform { record: label, source: e });
                    }
                    RecordErrorPolicy::Skip => {
                        warn!("Skipping drink {}: {}", label, e);
                        outcome.skipped.push(RecordDiagnostic {
                            index: i,
                            record: label,
                            kind: e.kind(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    metrics::transform::batch_processed(drinks.len(), started.elapsed().as_secs_f64());
    info!(
        "Transformed {} drinks ({} skipped)",
        outcome.cocktails.len(),
        outcome.skipped.len()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::processing::normalize::DrinkNormalizer;
    use serde_json::json;

    fn drinks() -> Vec<Value> {
        vec![
            json!({
                "idDrink": "1", "strDrink": "One", "strCategory": "Shot",
                "strAlcoholic": "Alcoholic", "strGlass": "Shot glass",
                "strInstructions": "Pour.", "strIngredient1": "Vodka", "strMeasure1": "1 oz"
            }),
            json!({
                "idDrink": "2", "strDrink": "Two", "strCategory": "Shot",
                "strAlcoholic": "Alcoholic", "strGlass": "Shot glass",
                "strInstructions": "Pour.", "strIngredient1": "Rum", "strMeasure1": "1/0 oz"
            }),
            json!({
                "idDrink": "3", "strDrink": "Three", "strCategory": "Shot",
                "strAlcoholic": "Non alcoholic", "strGlass": "Shot glass",
                "strInstructions": "Pour.", "strIngredient1": "Water", "strMeasure1": "2 oz"
            }),
        ]
    }

    #[test]
    fn test_skip_policy_keeps_order_and_records_diagnostic() {
        let outcome = transform_batch(&DrinkNormalizer, &drinks(), RecordErrorPolicy::Skip).unwrap();

        let ids: Vec<_> = outcome.cocktails.iter().map(|d| d.cocktail_id).collect();
        assert_eq!(ids, [Some(1), Some(3)]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].index, 1);
        assert_eq!(outcome.skipped[0].record, "2");
        assert_eq!(outcome.skipped[0].kind, "arithmetic_fault");
    }

    #[test]
    fn test_abort_policy_names_failing_record() {
        let err = transform_batch(&DrinkNormalizer, &drinks(), RecordErrorPolicy::Abort).unwrap_err();
        match err {
            EtlError::Transform { record, source } => {
                assert_eq!(record, "2");
                assert_eq!(source.kind(), "arithmetic_fault");
            }
            other => panic!("expected transform error, got {other:?}"),
        }
    }

    #[test]
    fn test_record_without_id_is_labelled_by_position() {
        let mut batch = drinks();
        batch[1]["idDrink"] = Value::Null;
        let outcome = transform_batch(&DrinkNormalizer, &batch, RecordErrorPolicy::Skip).unwrap();
        assert_eq!(outcome.skipped[0].record, "#1");
    }
}
