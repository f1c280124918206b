use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::constants::INGREDIENT_SLOTS;

/// Raw drink payload as returned by TheCocktailDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrinksPayload {
    pub drinks: Vec<Value>,
}

/// One indexed ingredient/measure pair from a raw drink
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

/// A single drink as it appears in the source payload.
///
/// The fifteen numbered `strIngredientN`/`strMeasureN` keys are folded into
/// `slots`, where `slots[0]` is slot 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDrinkRecord {
    pub id_drink: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub alcoholic: Option<String>,
    pub glass: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub slots: [IngredientSlot; INGREDIENT_SLOTS],
}

impl RawDrinkRecord {
    /// Build a record from one element of the `drinks` array.
    ///
    /// Keys that are missing, null or not strings are treated as absent.
    pub fn from_json(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        let mut slots: [IngredientSlot; INGREDIENT_SLOTS] = Default::default();
        for (i, slot) in slots.iter_mut().enumerate() {
            let n = i + 1;
            slot.ingredient = text(&format!("strIngredient{n}"));
            slot.measure = text(&format!("strMeasure{n}"));
        }

        Self {
            id_drink: text("idDrink"),
            name: text("strDrink"),
            category: text("strCategory"),
            alcoholic: text("strAlcoholic"),
            glass: text("strGlass"),
            instructions: text("strInstructions"),
            thumbnail: text("strDrinkThumb"),
            slots,
        }
    }
}

/// Tri-state alcohol flag. Serialized as `true`, `false` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alcoholic {
    Alcoholic,
    NonAlcoholic,
    Unknown,
}

impl Alcoholic {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("alcoholic") => Alcoholic::Alcoholic,
            Some("non alcoholic") | Some("non-alcoholic") => Alcoholic::NonAlcoholic,
            _ => Alcoholic::Unknown,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Alcoholic::Alcoholic => Some(true),
            Alcoholic::NonAlcoholic => Some(false),
            Alcoholic::Unknown => None,
        }
    }
}

impl Serialize for Alcoholic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Alcoholic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<bool>::deserialize(deserializer)? {
            Some(true) => Alcoholic::Alcoholic,
            Some(false) => Alcoholic::NonAlcoholic,
            None => Alcoholic::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    #[serde(rename = "Ingredient")]
    pub ingredient: String,
    #[serde(rename = "Measure")]
    pub measure: Option<String>,
}

/// A drink in the normalized cocktail schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDrink {
    #[serde(rename = "CocktailID")]
    pub cocktail_id: Option<u64>,
    #[serde(rename = "CocktailName")]
    pub name: String,
    #[serde(rename = "CocktailCategory")]
    pub category: String,
    #[serde(rename = "IsAlcoholic")]
    pub is_alcoholic: Alcoholic,
    #[serde(rename = "GlassType")]
    pub glass: String,
    #[serde(rename = "Instructions")]
    pub instructions: String,
    #[serde(rename = "ImageURL")]
    pub image_url: Option<String>,
    /// `None` when ingredient/measure pairing could not be trusted
    #[serde(rename = "Ingredients")]
    pub ingredients: Option<Vec<IngredientEntry>>,
}

/// Output document written to disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocktailsDocument {
    #[serde(rename = "Cocktails")]
    pub cocktails: Vec<NormalizedDrink>,
}
