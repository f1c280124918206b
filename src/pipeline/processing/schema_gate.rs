use jsonschema::JSONSchema;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{EtlError, Result};

/// Bundled schema for the TheCocktailDB search response
pub const COCKTAIL_DB_SCHEMA: &str = include_str!("../../../schemas/cocktaildb.drinks.v1.json");

/// Structural gate run on the raw payload before any record is transformed
pub struct SchemaGate {
    compiled: JSONSchema,
}

impl SchemaGate {
    pub fn from_schema(schema: &Value) -> Result<Self> {
        let compiled = JSONSchema::options()
            .compile(schema)
            .map_err(|e| EtlError::Config(format!("Failed to compile JSON Schema: {e}")))?;
        Ok(Self { compiled })
    }

    pub fn cocktail_db() -> Result<Self> {
        let schema: Value = serde_json::from_str(COCKTAIL_DB_SCHEMA)?;
        Self::from_schema(&schema)
    }

    /// Validate the whole payload, collecting every violation.
    pub fn check(&self, payload: &Value) -> Result<()> {
        if let Err(errors) = self.compiled.validate(payload) {
            let violations: Vec<String> = errors
                .map(|error| format!("{} at {}", error, error.instance_path))
                .collect();
            warn!(count = violations.len(), "payload failed schema validation");
            return Err(EtlError::SchemaViolation(violations));
        }
        info!("Mandatory data is populated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn drink() -> Value {
        json!({
            "idDrink": "17222",
            "strDrink": "A1",
            "strCategory": "Cocktail",
            "strAlcoholic": "Alcoholic",
            "strGlass": "Cocktail glass",
            "strInstructions": "Pour all ingredients into a cocktail shaker.",
            "strDrinkThumb": null,
            "strIngredient1": "Gin",
            "strMeasure1": "1 3/4 shot "
        })
    }

    #[test]
    fn accepts_well_formed_payload() {
        let gate = SchemaGate::cocktail_db().unwrap();
        assert!(gate.check(&json!({ "drinks": [drink()] })).is_ok());
        assert!(gate.check(&json!({ "drinks": [] })).is_ok());
    }

    #[test]
    fn rejects_missing_drinks_array() {
        let gate = SchemaGate::cocktail_db().unwrap();
        assert!(matches!(
            gate.check(&json!({})),
            Err(EtlError::SchemaViolation(_))
        ));
        // The API answers `{"drinks": null}` when nothing matches
        assert!(gate.check(&json!({ "drinks": null })).is_err());
    }

    #[test]
    fn reports_each_violation_with_its_path() {
        let gate = SchemaGate::cocktail_db().unwrap();
        let mut missing = drink();
        missing.as_object_mut().unwrap().remove("strMeasure1");
        let mut wrong_type = drink();
        wrong_type["idDrink"] = json!(17222);

        match gate.check(&json!({ "drinks": [missing, wrong_type] })) {
            Err(EtlError::SchemaViolation(violations)) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.iter().any(|v| v.contains("/drinks/0")));
                assert!(violations.iter().any(|v| v.contains("/drinks/1/idDrink")));
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn nullable_fields_accept_null() {
        let gate = SchemaGate::cocktail_db().unwrap();
        let mut d = drink();
        d["strGlass"] = Value::Null;
        d["strIngredient1"] = Value::Null;
        assert!(gate.check(&json!({ "drinks": [d] })).is_ok());
    }
}
