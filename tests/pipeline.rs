use modelexport::{
    Config, ExportError, ExportFormat, ExportPipeline, ExportRequest, OutputManager,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_models(dir: &TempDir, records: serde_json::Value) -> PathBuf {
    let path = dir.path().join("models.json");
    fs::write(&path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
    path
}

fn sample_records() -> serde_json::Value {
    json!([
        {
            "id": "alpha-1",
            "name": "Alpha Assistant",
            "owned_by": "openai",
            "info": {
                "meta": {"description": "General helper"},
                "params": {"system": "You are Alpha."}
            }
        },
        {
            "id": "beta-2",
            "name": "Beta Coder",
            "owned_by": "openai",
            "info": {
                "meta": {"description": "Writes code"},
                "params": {"system": "You are Beta."}
            }
        },
        {
            "id": "gamma-3",
            "name": "Gamma Writer",
            "owned_by": "anthropic",
            "info": {
                "meta": {"description": "Writes prose"},
                "params": {"system": "You are Gamma."}
            }
        }
    ])
}

fn config_with_base(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.output.base_directory = dir.path().join("exports");
    config
}

fn selection(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[test]
fn all_formats_produce_consistent_files() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_models(&temp_dir, sample_records());
    let config = config_with_base(&temp_dir);

    let pipeline = ExportPipeline::new(config.clone());
    let manager = OutputManager::new(config.output.base_directory.clone())
        .unwrap()
        .with_timestamp("250101_120000");

    let request = ExportRequest {
        input,
        selection: selection(&["name", "info.meta.description", "owned_by"]),
        filter_personal: true,
        formats: ExportFormat::ALL.to_vec(),
    };

    let manifest = pipeline.run_with_manager(&request, &manager, None).unwrap();

    assert_eq!(manifest.records_exported, 3);
    assert_eq!(manifest.files.len(), 6);
    assert_eq!(manifest.individual_documents, 3);

    // Every bulk file lands in the same timestamped directory and shares
    // its timestamp in the file name.
    for file in &manifest.files {
        assert!(file.exists(), "missing {}", file.display());
        assert!(file
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("export_250101_120000."));
        assert_eq!(file.parent().unwrap(), manifest.run_directory);
    }

    // The same records, in the same order, appear in each text format.
    let csv_content = fs::read_to_string(manager.format_path(ExportFormat::Csv)).unwrap();
    assert!(csv_content.starts_with("name,description,owned_by"));
    assert!(csv_content.contains("Alpha Assistant"));
    assert!(csv_content.contains("Gamma Writer"));

    let json_content = fs::read_to_string(manager.format_path(ExportFormat::Json)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json_content).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "Alpha Assistant");
    assert_eq!(items[0]["info.meta.description"], "General helper");

    let yaml_content = fs::read_to_string(manager.format_path(ExportFormat::Yaml)).unwrap();
    assert!(yaml_content.contains("name: Alpha Assistant"));

    let xml_content = fs::read_to_string(manager.format_path(ExportFormat::Xml)).unwrap();
    assert_eq!(xml_content.matches("<model>").count(), 3);
    assert!(xml_content.contains("<description>Writes code</description>"));

    let md_content = fs::read_to_string(manager.format_path(ExportFormat::Markdown)).unwrap();
    assert!(md_content.contains("| name | description | owned_by |"));
    assert!(md_content.contains("| Beta Coder | Writes code | openai |"));

    // Excel output is a zip container.
    let xlsx_bytes = fs::read(manager.format_path(ExportFormat::Excel)).unwrap();
    assert_eq!(&xlsx_bytes[..2], b"PK");

    // One document per record, named from the model name.
    assert!(manifest
        .individual_directory
        .join("alpha-assistant.md")
        .exists());
    assert!(manifest.individual_directory.join("beta-coder.md").exists());
    assert!(manifest
        .individual_directory
        .join("gamma-writer.md")
        .exists());

    let doc = fs::read_to_string(manifest.individual_directory.join("beta-coder.md")).unwrap();
    assert!(doc.contains("## Beta Coder"));
    assert!(doc.contains("Writes code"));
    assert!(doc.contains("You are Beta."));
}

#[test]
fn personal_filter_drops_matching_records_everywhere() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_models(
        &temp_dir,
        json!([
            {"id": "a", "name": "Daniel's Helper"},
            {"id": "b", "name": "Neutral Bot"}
        ]),
    );
    let config = config_with_base(&temp_dir);
    let pipeline = ExportPipeline::new(config);

    let request = ExportRequest {
        input,
        selection: selection(&["id", "name"]),
        filter_personal: true,
        formats: vec![ExportFormat::Json, ExportFormat::Csv],
    };

    let manifest = pipeline.run(&request, None).unwrap();
    assert_eq!(manifest.records_exported, 1);
    assert_eq!(manifest.records_skipped, 1);

    for file in &manifest.files {
        let content = fs::read_to_string(file).unwrap();
        assert!(!content.contains("Daniel"));
        assert!(content.contains("Neutral Bot"));
    }

    // The filtered record gets no individual document either.
    assert!(!manifest
        .individual_directory
        .join("daniels-helper.md")
        .exists());
    assert!(manifest.individual_directory.join("neutral-bot.md").exists());
}

#[test]
fn empty_survivor_set_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_models(&temp_dir, json!([{"name": "Rosehill Bot"}]));
    let config = config_with_base(&temp_dir);
    let base = config.output.base_directory.clone();
    let pipeline = ExportPipeline::new(config);

    let request = ExportRequest {
        input,
        selection: selection(&["name"]),
        filter_personal: true,
        formats: vec![ExportFormat::Csv],
    };

    let result = pipeline.run(&request, None);
    assert!(matches!(result, Err(ExportError::Render { .. })));

    let entries: Vec<_> = fs::read_dir(&base).unwrap().collect();
    assert!(entries.is_empty(), "no run directory should be created");
}

#[test]
fn non_array_input_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_models(&temp_dir, json!({"data": []}));
    let pipeline = ExportPipeline::new(config_with_base(&temp_dir));

    let request = ExportRequest {
        input,
        selection: selection(&["name"]),
        filter_personal: false,
        formats: vec![ExportFormat::Json],
    };

    let result = pipeline.run(&request, None);
    assert!(matches!(result, Err(ExportError::InputFormat { .. })));
}

#[test]
fn missing_fields_render_as_empty_cells() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_models(
        &temp_dir,
        json!([
            {"name": "Full", "owned_by": "acme"},
            {"name": "Sparse"}
        ]),
    );
    let config = config_with_base(&temp_dir);
    let pipeline = ExportPipeline::new(config.clone());
    let manager = OutputManager::new(config.output.base_directory.clone())
        .unwrap()
        .with_timestamp("250101_130000");

    let request = ExportRequest {
        input,
        selection: selection(&["name", "owned_by"]),
        filter_personal: false,
        formats: vec![ExportFormat::Csv],
    };

    pipeline.run_with_manager(&request, &manager, None).unwrap();

    let csv_content = fs::read_to_string(manager.format_path(ExportFormat::Csv)).unwrap();
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines[0], "name,owned_by");
    assert_eq!(lines[1], "Full,acme");
    assert_eq!(lines[2], "Sparse,");
}

#[test]
fn primary_fields_lead_the_column_order() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_models(
        &temp_dir,
        json!([{
            "id": "a",
            "name": "Alpha",
            "owned_by": "acme",
            "info": {"meta": {"description": "d"}}
        }]),
    );
    let config = config_with_base(&temp_dir);
    let pipeline = ExportPipeline::new(config.clone());
    let manager = OutputManager::new(config.output.base_directory.clone())
        .unwrap()
        .with_timestamp("250101_140000");

    // Selection order deliberately scrambled; output order must not
    // depend on it.
    let request = ExportRequest {
        input,
        selection: selection(&["owned_by", "id", "info.meta.description", "name"]),
        filter_personal: false,
        formats: vec![ExportFormat::Csv],
    };

    pipeline.run_with_manager(&request, &manager, None).unwrap();

    let csv_content = fs::read_to_string(manager.format_path(ExportFormat::Csv)).unwrap();
    let header = csv_content.lines().next().unwrap();
    // Primary fields first (name, description), then the rest sorted.
    assert_eq!(header, "name,description,id,owned_by");
}
