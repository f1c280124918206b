use anyhow::Result;
use cocktail_etl::app::convert_use_case::{ConvertSettings, ConvertUseCase, InputSource};
use cocktail_etl::config::RecordErrorPolicy;
use cocktail_etl::error::EtlError;
use cocktail_etl::infra::document_store::FsDocumentStore;
use cocktail_etl::infra::http_client::ReqwestHttp;
use cocktail_etl::types::{Alcoholic, CocktailsDocument};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn use_case(dir: &Path, policy: RecordErrorPolicy) -> ConvertUseCase {
    ConvertUseCase::with_defaults(
        Box::new(ReqwestHttp::new()),
        Box::new(FsDocumentStore),
        ConvertSettings {
            raw_path: dir.join("cocktails_in.json"),
            output_path: dir.join("out/cocktails_out.json"),
            on_record_error: policy,
        },
    )
    .unwrap()
}

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources/drinks_sample.json")
}

#[tokio::test]
async fn test_convert_sample_file() -> Result<()> {
    let temp_dir = tempdir()?;
    let uc = use_case(temp_dir.path(), RecordErrorPolicy::Abort);

    let summary = uc.run(&InputSource::LocalFile(sample_path())).await?;
    assert_eq!(summary.total_records, 7);
    assert_eq!(summary.converted, 7);
    assert_eq!(summary.skipped, 0);

    let written = std::fs::read(temp_dir.path().join("out/cocktails_out.json"))?;
    let doc: CocktailsDocument = serde_json::from_slice(&written)?;
    let names: Vec<_> = doc.cocktails.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        ["A1", "ABC", "Ace", "ACID", "Adam", "Apple Karate", "Unnamed Punch"]
    );

    // Non-ounce measures pass through untouched
    let a1 = &doc.cocktails[0];
    assert_eq!(a1.cocktail_id, Some(17222));
    assert_eq!(a1.ingredients.as_ref().map(Vec::len), Some(4));

    // Cognac has no measure, so the whole list is discarded
    assert_eq!(doc.cocktails[1].ingredients, None);

    let acid = &doc.cocktails[3];
    let acid_measures: Vec<_> = acid
        .ingredients
        .as_ref()
        .unwrap()
        .iter()
        .map(|e| e.measure.as_deref())
        .collect();
    assert_eq!(acid_measures, [Some("1 oz Bacardi "), Some("29 ml")]);

    let adam = &doc.cocktails[4];
    let adam_measures: Vec<_> = adam
        .ingredients
        .as_ref()
        .unwrap()
        .iter()
        .map(|e| e.measure.as_deref())
        .collect();
    assert_eq!(adam_measures, [Some("59 ml"), Some("29 ml"), Some("1 tsp ")]);

    assert_eq!(doc.cocktails[5].is_alcoholic, Alcoholic::NonAlcoholic);

    let punch = &doc.cocktails[6];
    assert_eq!(punch.cocktail_id, None);
    assert_eq!(punch.is_alcoholic, Alcoholic::Unknown);

    // Raw JSON shape: null flag and null ingredient list are kept explicitly
    let raw: Value = serde_json::from_slice(&written)?;
    assert_eq!(raw["Cocktails"][6]["IsAlcoholic"], Value::Null);
    assert_eq!(raw["Cocktails"][6]["CocktailID"], Value::Null);
    assert_eq!(raw["Cocktails"][1]["Ingredients"], Value::Null);
    assert_eq!(raw["Cocktails"][3]["ImageURL"], Value::Null);
    assert_eq!(
        raw["Cocktails"][6]["Ingredients"],
        json!([{ "Ingredient": "Orange juice", "Measure": "14 ml" }])
    );
    Ok(())
}

#[tokio::test]
async fn test_converting_twice_is_identical() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    use_case(first.path(), RecordErrorPolicy::Skip)
        .run(&InputSource::LocalFile(sample_path()))
        .await?;
    use_case(second.path(), RecordErrorPolicy::Skip)
        .run(&InputSource::LocalFile(sample_path()))
        .await?;

    assert_eq!(
        std::fs::read(first.path().join("out/cocktails_out.json"))?,
        std::fs::read(second.path().join("out/cocktails_out.json"))?
    );
    Ok(())
}

#[tokio::test]
async fn test_bad_record_policies() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut payload: Value = serde_json::from_str(&std::fs::read_to_string(sample_path())?)?;
    payload["drinks"][2]["strMeasure1"] = json!("2 shots oz");
    let input = temp_dir.path().join("bad.json");
    std::fs::write(&input, serde_json::to_vec(&payload)?)?;

    let skip = use_case(temp_dir.path(), RecordErrorPolicy::Skip)
        .run(&InputSource::LocalFile(input.clone()))
        .await?;
    assert_eq!(skip.converted, 6);
    assert_eq!(skip.errors.len(), 1);
    assert_eq!(skip.errors[0].record, "17225");
    assert_eq!(skip.errors[0].kind, "invalid_measure_format");

    let abort_dir = tempdir()?;
    let err = use_case(abort_dir.path(), RecordErrorPolicy::Abort)
        .run(&InputSource::LocalFile(input))
        .await
        .unwrap_err();
    assert!(matches!(err, EtlError::Transform { ref record, .. } if record == "17225"));
    assert!(err.to_string().contains("17225"));
    assert!(!abort_dir.path().join("out/cocktails_out.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_schema_violation_writes_no_output() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("empty.json");
    std::fs::write(&input, br#"{"drinks": null}"#)?;

    let err = use_case(temp_dir.path(), RecordErrorPolicy::Skip)
        .run(&InputSource::LocalFile(input))
        .await
        .unwrap_err();
    assert!(matches!(err, EtlError::SchemaViolation(_)));
    assert!(!temp_dir.path().join("out/cocktails_out.json").exists());
    Ok(())
}
