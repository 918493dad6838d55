use std::fmt;

use discogen_core::error::{FetchError, GenerateError};
use discogen_core::fetch::{DiscoverySource, FileDiscoverySource};
use discogen_core::ir::{IrSpec, dedup_by_name};
use discogen_core::overrides::OverrideRegistry;
use discogen_core::parse::document::DiscoveryDocument;
use discogen_core::pipeline::{GenerationRequest, Pipeline, RunState};
use discogen_core::{CodeGenerator, GeneratedFile};

const BOOKS: &str = include_str!("fixtures/books.json");

/// Lists declaration names, one file per group.
struct NameListGenerator;

#[derive(Debug)]
struct NeverFails;

impl fmt::Display for NeverFails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("never")
    }
}

impl std::error::Error for NeverFails {}

impl CodeGenerator for NameListGenerator {
    type Config = ();
    type Error = NeverFails;

    fn generate(&self, ir: &IrSpec, _config: &()) -> Result<Vec<GeneratedFile>, NeverFails> {
        Ok(ir
            .groups
            .iter()
            .map(|(group, decls)| GeneratedFile {
                path: format!("{group}.txt"),
                content: dedup_by_name(decls)
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect())
    }
}

struct UnreachableSource;

impl DiscoverySource for UnreachableSource {
    fn fetch(&self, _service: &str, _version: &str) -> Result<DiscoveryDocument, FetchError> {
        Err(FetchError::Http("connection refused".to_string()))
    }
}

#[test]
fn run_writes_one_file_per_group() {
    let input = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("books.v1.json"), BOOKS).unwrap();
    let output = tempfile::tempdir().unwrap();

    let mut pipeline = Pipeline::new(FileDiscoverySource::new(input.path()), NameListGenerator);
    assert_eq!(pipeline.state(), RunState::Idle);

    let request = GenerationRequest {
        service: "books".to_string(),
        version: "v1".to_string(),
        output_dir: output.path().join("Generated"),
    };
    let report = pipeline
        .run(&request, &OverrideRegistry::empty(), &())
        .unwrap();

    assert_eq!(pipeline.state(), RunState::Done);
    assert_eq!(report.service_name, "Books");
    assert_eq!(report.written.len(), 6);
    let service_file =
        std::fs::read_to_string(output.path().join("Generated/Books.txt")).unwrap();
    assert_eq!(
        service_file,
        "Books\nBooksAlt\nBooksVolumesProjection\nBooksOAuthScopes"
    );
}

#[test]
fn fetch_failure_leaves_no_output() {
    let output = tempfile::tempdir().unwrap();
    let out_dir = output.path().join("Generated");
    let mut pipeline = Pipeline::new(UnreachableSource, NameListGenerator);
    let request = GenerationRequest {
        service: "books".to_string(),
        version: "v1".to_string(),
        output_dir: out_dir.clone(),
    };
    let err = pipeline
        .run(&request, &OverrideRegistry::empty(), &())
        .unwrap_err();
    assert!(matches!(err, GenerateError::FetchFailed(FetchError::Http(_))));
    assert_eq!(pipeline.state(), RunState::Failed);
    assert!(!out_dir.exists());
}

#[test]
fn overrides_load_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("books.override.json"),
        include_str!("fixtures/books.override.json"),
    )
    .unwrap();
    let overrides = OverrideRegistry::load(dir.path(), "books").unwrap();
    assert_eq!(
        overrides.method_base_name("books.volumes.list"),
        Some("searchVolumes")
    );
}
