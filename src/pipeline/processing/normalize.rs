use tracing::debug;

use crate::constants::OUNCE_SUFFIX;
use crate::error::TransformError;
use crate::pipeline::processing::quantity::{checked_ounces_to_milliliters, parse_mixed_number};
use crate::types::{Alcoholic, IngredientEntry, IngredientSlot, NormalizedDrink, RawDrinkRecord};

/// Trait for turning raw drink records into the normalized cocktail schema
pub trait Normalizer {
    fn normalize(&self, raw: &RawDrinkRecord) -> Result<NormalizedDrink, TransformError>;
}

/// Normalizer for TheCocktailDB drink records.
///
/// Stateless; the same record always yields the same output.
#[derive(Debug, Default, Clone, Copy)]
pub struct DrinkNormalizer;

impl Normalizer for DrinkNormalizer {
    fn normalize(&self, raw: &RawDrinkRecord) -> Result<NormalizedDrink, TransformError> {
        let ingredients = collect_ingredients(&raw.slots)?;
        if ingredients.is_none() {
            debug!(id = ?raw.id_drink, "ingredient/measure mismatch, discarding ingredient list");
        }

        Ok(NormalizedDrink {
            cocktail_id: parse_cocktail_id(raw.id_drink.as_deref()),
            name: required(raw.name.as_deref(), "strDrink")?,
            category: required(raw.category.as_deref(), "strCategory")?,
            is_alcoholic: Alcoholic::from_label(raw.alcoholic.as_deref()),
            glass: required(raw.glass.as_deref(), "strGlass")?,
            instructions: required(raw.instructions.as_deref(), "strInstructions")?,
            image_url: raw.thumbnail.clone(),
            ingredients,
        })
    }
}

/// Numeric id, or `None` unless the trimmed text is all ASCII digits.
pub fn parse_cocktail_id(id: Option<&str>) -> Option<u64> {
    let id = id?.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse().ok()
}

fn required(field: Option<&str>, name: &'static str) -> Result<String, TransformError> {
    field
        .map(|s| s.trim().to_string())
        .ok_or(TransformError::MissingField(name))
}

/// Pair ingredients with measures in slot order.
///
/// Returns `Ok(None)` as soon as a slot has only one half of the pair; later
/// slots are not inspected. Ounce measures are converted before that check,
/// so a malformed ounce value fails the record even on a mismatched slot.
fn collect_ingredients(
    slots: &[IngredientSlot],
) -> Result<Option<Vec<IngredientEntry>>, TransformError> {
    let mut entries = Vec::new();

    for (i, slot) in slots.iter().enumerate() {
        let measure = match slot.measure.as_deref() {
            Some(m) => Some(convert_measure(i + 1, m)?),
            None => None,
        };

        match (slot.ingredient.as_deref(), measure) {
            (Some(_), None) | (None, Some(_)) => return Ok(None),
            (Some(ingredient), measure) => {
                let ingredient = ingredient.trim();
                if !ingredient.is_empty() {
                    entries.push(IngredientEntry {
                        ingredient: ingredient.to_string(),
                        measure,
                    });
                }
            }
            (None, None) => {}
        }
    }

    Ok(Some(entries))
}

/// Replace an ounce measure with its milliliter rendering; other text passes through.
fn convert_measure(slot: usize, measure: &str) -> Result<String, TransformError> {
    match measure.trim().strip_suffix(OUNCE_SUFFIX) {
        Some(amount) => parse_mixed_number(amount)
            .and_then(checked_ounces_to_milliliters)
            .map_err(|e| TransformError::from_quantity(slot, measure, e)),
        None => Ok(measure.to_string()),
    }
}
