//! Generation Orchestrator: fetch, transform, emit, write.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::GenerateError;
use crate::fetch::DiscoverySource;
use crate::overrides::OverrideRegistry;
use crate::transform;
use crate::{CodeGenerator, GeneratedFile};

/// Where a run currently is. Runs move strictly forward; there is no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    FetchingDocument,
    Transforming,
    Emitting,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::FetchingDocument => "fetching document",
            RunState::Transforming => "transforming",
            RunState::Emitting => "emitting",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What to generate and where to put it.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub service: String,
    pub version: String,
    pub output_dir: PathBuf,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub service_name: String,
    pub declarations: usize,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
}

/// Drives one generation run at a time over a discovery source and a generator.
pub struct Pipeline<S, G> {
    source: S,
    generator: G,
    state: RunState,
}

impl<S, G> Pipeline<S, G>
where
    S: DiscoverySource,
    G: CodeGenerator,
{
    pub fn new(source: S, generator: G) -> Self {
        Self {
            source,
            generator,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn enter(&mut self, state: RunState) {
        info!("{} -> {}", self.state, state);
        self.state = state;
    }

    /// Run the pipeline once. On failure nothing after the failing step runs;
    /// files already written stay on disk.
    pub fn run(
        &mut self,
        request: &GenerationRequest,
        overrides: &OverrideRegistry,
        config: &G::Config,
    ) -> Result<GenerationReport, GenerateError> {
        let result = self.run_steps(request, overrides, config);
        match &result {
            Ok(report) => {
                self.enter(RunState::Done);
                info!(
                    "generated {} files for {}",
                    report.written.len(),
                    report.service_name
                );
            }
            Err(err) => {
                self.enter(RunState::Failed);
                error!("generation failed: {err}");
            }
        }
        result
    }

    fn run_steps(
        &mut self,
        request: &GenerationRequest,
        overrides: &OverrideRegistry,
        config: &G::Config,
    ) -> Result<GenerationReport, GenerateError> {
        self.enter(RunState::FetchingDocument);
        let doc = self.source.fetch(&request.service, &request.version)?;

        self.enter(RunState::Transforming);
        let spec = transform::transform(&doc, overrides)?;

        self.enter(RunState::Emitting);
        let files = self
            .generator
            .generate(&spec, config)
            .map_err(|e| GenerateError::Emit(Box::new(e)))?;
        let written = write_files(&request.output_dir, &files)?;

        Ok(GenerationReport {
            service_name: spec.info.service_name.clone(),
            declarations: spec.declaration_count(),
            written,
        })
    }
}

/// Write every file under `base`, stopping at the first failure.
pub fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerateError::WriteFailed {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| GenerateError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![GeneratedFile {
            path: "Sources/Books.swift".to_string(),
            content: "import Foundation\n".to_string(),
        }];
        let written = write_files(dir.path(), &files).unwrap();
        assert_eq!(written, vec![dir.path().join("Sources/Books.swift")]);
        assert!(written[0].exists());
    }

    #[test]
    fn test_write_failure_stops_remaining_writes() {
        let dir = tempfile::tempdir().unwrap();
        // A plain file where a directory is expected.
        fs::write(dir.path().join("blocked"), "").unwrap();
        let files = vec![
            GeneratedFile {
                path: "First.swift".to_string(),
                content: String::new(),
            },
            GeneratedFile {
                path: "blocked/Second.swift".to_string(),
                content: String::new(),
            },
            GeneratedFile {
                path: "Third.swift".to_string(),
                content: String::new(),
            },
        ];
        let err = write_files(dir.path(), &files).unwrap_err();
        assert!(matches!(err, GenerateError::WriteFailed { .. }));
        assert!(dir.path().join("First.swift").exists());
        assert!(!dir.path().join("Third.swift").exists());
    }
}
