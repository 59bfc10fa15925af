//! Configuration-file driven runs.

mod helpers;

use helpers::Workspace;
use typeprune::{ConfigError, ExtractConfig, run_config};

#[test]
fn test_config_driven_batch_run() {
    let ws = Workspace::new();
    ws.write_module("core", "example.com/core");
    ws.write_source(
        "core/health/health.go",
        "package health\n\ntype Status struct {\n\tCode string\n}\n\ntype Probe string\n",
    );

    let yaml = format!(
        "output: {out}\nroots:\n  - {src}\npackages:\n  - package: example.com/core/health\n    types:\n      - Status\n      - Probe\n",
        out = ws.out_dir().display(),
        src = ws.src_dir().display(),
    );
    let config_path = ws.root().join("typeprune.yaml");
    std::fs::write(&config_path, yaml).unwrap();

    let config = ExtractConfig::load(&config_path).unwrap();
    let summary = run_config(&config).unwrap();
    assert_eq!(summary.types, 2);
    assert_eq!(summary.packages, 1);
    assert_eq!(summary.modules, 1);

    let out = ws.read_out("example.com/core/health/types.go");
    assert!(out.contains("type Status struct"));
    assert!(out.contains("type Probe string"));
}

#[test]
fn test_config_missing_file_is_io_error() {
    let err = ExtractConfig::load("/definitely/not/here.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_config_malformed_yaml_is_parse_error() {
    let ws = Workspace::new();
    let path = ws.root().join("broken.yaml");
    std::fs::write(&path, "output: [unclosed\n").unwrap();
    let err = ExtractConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn test_config_without_types_rejected_at_load() {
    let ws = Workspace::new();
    let path = ws.root().join("empty.yaml");
    std::fs::write(&path, "output: out\npackages:\n  - package: example.com/x\n").unwrap();
    let err = ExtractConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
