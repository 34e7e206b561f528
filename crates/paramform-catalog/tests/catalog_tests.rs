// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use paramform_app::{
    EditableField, EditorCommand, ParameterEditor, RecommendationService, RowKey,
};
use paramform_catalog::Catalog;

fn write_catalog(content: &str) -> Result<(tempfile::TempDir, std::path::PathBuf)> {
    let temp = tempfile::tempdir()?;
    let path = temp.path().join("names.json");
    std::fs::write(&path, content)?;
    Ok((temp, path))
}

#[test]
fn loads_catalog_from_disk_and_searches_it() -> Result<()> {
    let (_temp, path) = write_catalog(
        r#"[
            {"standard_name": "lake_ice_thickness", "display_description": {"en": "Ice thickness"}},
            {"standard_name": "air_temperature", "display_description": {"en": "Air temp"}}
        ]"#,
    )?;
    let mut catalog = Catalog::load(&path)?;
    assert_eq!(catalog.len(), 2);

    let results = catalog.search("ice")?;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].standard_name, "lake_ice_thickness");
    Ok(())
}

#[test]
fn missing_catalog_file_names_the_path() {
    let error = Catalog::load(std::path::Path::new("/nonexistent/names.json"))
        .expect_err("missing file should fail");
    assert!(format!("{error:#}").contains("/nonexistent/names.json"));
}

#[test]
fn malformed_catalog_explains_the_expected_shape() -> Result<()> {
    let (_temp, path) = write_catalog("{\"standard_name\": 3}")?;
    let error = Catalog::load(&path).expect_err("object instead of array should fail");
    assert!(error.to_string().contains("expected a JSON array"));
    Ok(())
}

#[test]
fn max_results_caps_the_list() -> Result<()> {
    let mut catalog = Catalog::builtin()?.with_max_results(2);
    assert_eq!(catalog.search("sea water")?.len(), 2);
    Ok(())
}

#[test]
fn catalog_drives_editor_recommendations() -> Result<()> {
    let mut catalog = Catalog::builtin()?;
    let mut editor = ParameterEditor::default();
    editor.dispatch(EditorCommand::Edit(RowKey::new(1)), &mut catalog)?;
    editor.dispatch(
        EditorCommand::SetField(EditableField::StandardName, "wind".to_owned()),
        &mut catalog,
    )?;
    editor.dispatch(EditorCommand::Recommend, &mut catalog)?;

    let candidates = editor.recommendations().candidates();
    assert!(!candidates.is_empty());
    assert_eq!(candidates[0].key, 1);
    assert!(candidates[0].standard_name.starts_with("wind"));
    assert!(!candidates[0].description.is_empty());
    Ok(())
}
