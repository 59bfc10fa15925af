#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
//! Filesystem fixtures for extraction tests: a temporary tree of Go modules
//! and packages, an output directory, and an optional consumer manifest.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use typeprune::{ExtractError, ExtractOptions, Extractor, Summary, TypeRequest};

/// A self-contained workspace on disk. Sources go under `src/`, generated
/// output under `generated/`, and the consumer module under `consumer/`.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root().join("generated")
    }

    pub fn consumer_dir(&self) -> PathBuf {
        self.root().join("consumer")
    }

    /// Write a Go source file under `src/`.
    pub fn write_source(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.src_dir().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Declare a module by writing `src/<dir>/go.mod`.
    pub fn write_module(&self, dir: &str, module_path: &str) {
        self.write_source(
            &format!("{dir}/go.mod"),
            &format!("module {module_path}\n\ngo 1.21\n"),
        );
    }

    /// Write the consumer's go.mod under `consumer/`.
    pub fn write_consumer_manifest(&self, content: &str) -> PathBuf {
        let dir = self.consumer_dir();
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("go.mod");
        fs::write(&path, content).unwrap();
        path
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            output_dir: self.out_dir(),
            roots: vec![self.src_dir()],
            manifest_dir: Some(self.consumer_dir()),
        }
    }

    /// Run a fresh extraction over the given (package, type) requests.
    pub fn run(&self, requests: &[(&str, &str)]) -> Result<Summary, ExtractError> {
        let requests: Vec<TypeRequest> = requests
            .iter()
            .map(|(package, type_name)| TypeRequest {
                package: (*package).to_string(),
                type_name: (*type_name).to_string(),
            })
            .collect();
        Extractor::new(self.options()).run(&requests)
    }

    /// Read a generated file, relative to the output directory.
    pub fn read_out(&self, rel: &str) -> String {
        let path = self.out_dir().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
    }

    pub fn out_exists(&self, rel: &str) -> bool {
        self.out_dir().join(rel).exists()
    }

    pub fn read_consumer_manifest(&self) -> String {
        fs::read_to_string(self.consumer_dir().join("go.mod")).unwrap()
    }
}
