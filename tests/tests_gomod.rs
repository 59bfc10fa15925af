//! Consumer go.mod patching: clean-slate replacement of redirect
//! directives after a run.

mod helpers;

use helpers::Workspace;
use typeprune::gomod;

const CONSUMER: &str = "module example.com/consumer\n\ngo 1.21\n\nrequire (\n\texample.com/app v0.0.0\n\texample.com/core v0.0.0\n)\n\nreplace example.com/stale => ../somewhere/else\n\nreplace (\n\texample.com/app => ../old/app\n\texample.com/other v1.2.3 => ../old/other\n)\n";

fn populated(ws: &Workspace) {
    ws.write_module("app", "example.com/app");
    ws.write_source(
        "app/api/app.go",
        "package api\n\nimport \"example.com/core/health\"\n\ntype App struct {\n\tStatus health.Status\n}\n",
    );
    ws.write_module("core", "example.com/core");
    ws.write_source("core/health/health.go", "package health\n\ntype Status string\n");
}

#[test]
fn test_run_patches_consumer_replaces_clean_slate() {
    let ws = Workspace::new();
    populated(&ws);
    ws.write_consumer_manifest(CONSUMER);

    ws.run(&[("example.com/app/api", "App")]).unwrap();

    let manifest = ws.read_consumer_manifest();
    // Every pre-existing redirect is gone, wherever it pointed.
    assert!(!manifest.contains("example.com/stale"));
    assert!(!manifest.contains("../old/app"));
    assert!(!manifest.contains("example.com/other"));
    // The require block is untouched.
    assert!(manifest.contains("require (\n\texample.com/app v0.0.0\n\texample.com/core v0.0.0\n)\n"));

    let app_redirect = ws.out_dir().join("example.com/app");
    let core_redirect = ws.out_dir().join("example.com/core");
    assert!(manifest.contains(&format!(
        "replace example.com/app => {}\n",
        app_redirect.display()
    )));
    assert!(manifest.contains(&format!(
        "replace example.com/core => {}\n",
        core_redirect.display()
    )));
}

#[test]
fn test_run_without_consumer_manifest_still_succeeds() {
    let ws = Workspace::new();
    populated(&ws);
    // No go.mod anywhere under the consumer directory: patching is skipped
    // with a warning and the run still reports success.
    let summary = ws.run(&[("example.com/app/api", "App")]).unwrap();
    assert_eq!(summary.modules, 2);
    assert!(ws.out_exists("example.com/app/api/types.go"));
}

#[test]
fn test_patch_replaces_relative_output_gets_dot_prefix() {
    let ws = Workspace::new();
    ws.write_consumer_manifest("module example.com/consumer\n\ngo 1.21\n");

    let modules = vec!["example.com/core".to_string()];
    let count = gomod::patch_replaces(
        &ws.consumer_dir(),
        std::path::Path::new("generated"),
        &modules,
    )
    .unwrap();
    assert_eq!(count, 1);

    let manifest = ws.read_consumer_manifest();
    assert!(manifest.contains("replace example.com/core => ./generated/example.com/core\n"));
}

#[test]
fn test_patch_replaces_without_manifest_is_an_error() {
    let ws = Workspace::new();
    let modules = vec!["example.com/core".to_string()];
    let err = gomod::patch_replaces(
        &ws.consumer_dir(),
        std::path::Path::new("generated"),
        &modules,
    )
    .unwrap_err();
    assert!(matches!(err, gomod::ManifestError::NotFound(_)));
}

#[test]
fn test_repatching_does_not_accumulate_directives() {
    let ws = Workspace::new();
    populated(&ws);
    ws.write_consumer_manifest("module example.com/consumer\n\ngo 1.21\n");

    ws.run(&[("example.com/app/api", "App")]).unwrap();
    let first = ws.read_consumer_manifest();
    ws.run(&[("example.com/app/api", "App")]).unwrap();
    let second = ws.read_consumer_manifest();

    assert_eq!(first, second);
    assert_eq!(second.matches("replace example.com/app =>").count(), 1);
}
