//! Tests for template providers, the bracket service and settings wiring

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use bracket_tree::infrastructure::di::ServiceContainer;
use bracket_tree::infrastructure::traits::RealFileSystem;
use bracket_tree::{
    ApplicationError, BracketService, DirectoryTemplates, Format, InfraError, Settings,
    TemplateProvider,
};

fn write_template(dir: &Path, size: usize, content: &str) {
    fs::create_dir_all(dir).expect("create template dir");
    fs::write(dir.join(format!("{size}.json")), content).expect("write template");
}

fn directory(dir: &Path) -> DirectoryTemplates {
    DirectoryTemplates::new(dir, Arc::new(RealFileSystem))
}

#[test]
fn given_template_file_when_reading_then_returns_seats_in_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_template(
        temp.path(),
        2,
        r#"{"seats": [{"position": 2}, {"position": 1}, {"position": 3}]}"#,
    );

    // Act
    let seats = directory(temp.path()).seats(2).unwrap();

    // Assert
    let positions: Vec<i64> = seats.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![2, 1, 3]);
}

#[test]
fn given_missing_template_when_reading_then_not_found() {
    let temp = TempDir::new().unwrap();

    let err = directory(temp.path()).seats(16).unwrap_err();

    match err {
        InfraError::TemplateNotFound { size, path } => {
            assert_eq!(size, 16);
            assert!(path.ends_with("16.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn given_malformed_template_when_building_then_errors_before_insert() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), 4, r#"{"seats": [{"position": 1}, {"position": "#);
    let service = BracketService::new(Arc::new(directory(temp.path())));

    let result = service.by_size(4);

    assert!(matches!(
        result,
        Err(ApplicationError::Infra(InfraError::Parse { .. }))
    ));
}

#[test]
fn given_template_directory_when_listing_then_returns_numeric_sizes() {
    let temp = TempDir::new().unwrap();
    write_template(temp.path(), 8, r#"{"seats": []}"#);
    write_template(temp.path(), 4, r#"{"seats": []}"#);
    fs::write(temp.path().join("notes.json"), "{}").unwrap();
    fs::write(temp.path().join("16.txt"), "").unwrap();

    let sizes = directory(temp.path()).available_sizes().unwrap();

    assert_eq!(sizes, vec![4, 8]);
}

#[test]
fn given_template_dir_setting_when_building_then_reads_format_subdirectory() {
    let temp = TempDir::new().unwrap();
    write_template(
        &temp.path().join("single_elimination"),
        2,
        r#"{"seats": [{"position": 2}, {"position": 1}, {"position": 3}]}"#,
    );
    let settings = Settings {
        format: Format::SingleElimination,
        template_dir: Some(temp.path().to_path_buf()),
    };

    let container = ServiceContainer::new(settings);
    let bracket = container.brackets.by_size(2).unwrap();

    assert_eq!(bracket.size(), 3);
    assert_eq!(bracket.root_node().map(|n| n.position()), Some(2));
}

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".bracket_tree.toml"),
        "format = \"single_elimination\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(temp.path())).expect("load settings");

    assert_eq!(settings.format, Format::SingleElimination);
}

#[test]
fn given_invalid_local_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".bracket_tree.toml"), "format = 42\n").unwrap();

    let result = Settings::load(Some(temp.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
