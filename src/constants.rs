//! Constants shared between the CLI, configuration defaults and the pipeline.

// Source
pub const DEFAULT_SOURCE_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1/search.php?f=a";

// Output artifacts
pub const DEFAULT_RAW_PATH: &str = "cocktails_in.json";
pub const DEFAULT_OUTPUT_PATH: &str = "cocktails_out.json";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "COCKTAIL_ETL_CONFIG";

// Raw record layout
pub const INGREDIENT_SLOTS: usize = 15;
pub const OUNCE_SUFFIX: &str = "oz";

/// 1 US fluid ounce in milliliters.
pub const ML_PER_FLUID_OUNCE: f64 = 29.5735;

/// Label used in diagnostics for records without a usable `idDrink`
pub fn record_label(id: Option<&str>, index: usize) -> String {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("#{index}"),
    }
}
