//! Context detection against real directory fixtures.

use std::fs;
use std::path::Path;

use rule_pilot::context::{ContextDetector, Maturity};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn detects_python_fastapi_from_requirements() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "requirements.txt", "fastapi==0.110.0\npydantic\n");

    let context = ContextDetector::new().detect(temp.path());

    assert_eq!(
        context.languages.iter().collect::<Vec<_>>(),
        vec!["python"]
    );
    assert!(context.frameworks.contains("fastapi"));
    assert!(context.confidence > 0.0);
}

#[test]
fn detection_never_fails_on_empty_directory() {
    let temp = TempDir::new().unwrap();
    let context = ContextDetector::new().detect(temp.path());

    assert!(context.is_empty());
    assert_eq!(context.maturity, Maturity::Mvp);
}

#[test]
fn detection_never_fails_on_missing_directory() {
    let temp = TempDir::new().unwrap();
    let gone = temp.path().join("does-not-exist");

    let context = ContextDetector::new().detect(&gone);
    assert!(context.is_empty());
}

#[test]
fn malformed_manifest_does_not_abort_detection() {
    let temp = TempDir::new().unwrap();
    // Invalid UTF-8 manifest: framework parsing skips it, language marker
    // detection and the rest of the pipeline still run.
    fs::write(temp.path().join("requirements.txt"), [0xff, 0xfe, 0x00]).unwrap();
    write(temp.path(), "go.mod", "module example.com/app\nrequire github.com/gin-gonic/gin v1.9.0\n");

    let context = ContextDetector::new().detect(temp.path());

    assert!(context.languages.contains("python"));
    assert!(context.languages.contains("go"));
    assert!(context.frameworks.contains("gin"));
}

#[test]
fn typescript_supersedes_javascript() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "package.json",
        r#"{"dependencies": {"react": "^18", "next": "14.0.0"}}"#,
    );
    write(temp.path(), "tsconfig.json", "{\"strict\": true}");

    let context = ContextDetector::new().detect(temp.path());

    assert!(context.languages.contains("typescript"));
    assert!(!context.languages.contains("javascript"));
    assert!(context.frameworks.contains("react"));
    assert!(context.frameworks.contains("nextjs"));
}

#[test]
fn cloud_detected_from_config_and_dependencies() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "requirements.txt", "boto3\n");
    write(temp.path(), "wrangler.toml", "name = \"worker\"\n");

    let context = ContextDetector::new().detect(temp.path());

    assert!(context.cloud_providers.contains("aws"));
    assert!(context.cloud_providers.contains("cloudflare"));
}

#[test]
fn maturity_climbs_with_evidence() {
    let temp = TempDir::new().unwrap();
    let detector = ContextDetector::new();

    write(temp.path(), "requirements.txt", "flask\n");
    assert_eq!(detector.detect(temp.path()).maturity, Maturity::Mvp);

    write(temp.path(), ".github/workflows/ci.yml", "on: push\n");
    assert_eq!(detector.detect(temp.path()).maturity, Maturity::PreProduction);

    write(temp.path(), "Dockerfile", "FROM python:3.12\n");
    fs::create_dir_all(temp.path().join("tests")).unwrap();
    assert_eq!(detector.detect(temp.path()).maturity, Maturity::Production);
}

#[test]
fn adding_markers_is_monotonic() {
    let temp = TempDir::new().unwrap();
    let detector = ContextDetector::new();

    write(temp.path(), "requirements.txt", "fastapi\n");
    let before = detector.detect(temp.path());

    write(temp.path(), "Cargo.toml", "[package]\nname = \"svc\"\nversion = \"0.1.0\"\n");
    write(temp.path(), "go.mod", "module example.com/app\n");
    let after = detector.detect(temp.path());

    assert!(after.languages.is_superset(&before.languages));
    assert!(after.confidence >= before.confidence);
}

#[test]
fn detection_is_pure_function_of_directory_state() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "requirements.txt", "django\n");

    let detector = ContextDetector::new();
    let a = detector.detect(temp.path());
    let b = detector.detect(temp.path());

    assert_eq!(a.languages, b.languages);
    assert_eq!(a.frameworks, b.frameworks);
    assert_eq!(a.maturity, b.maturity);
    assert_eq!(a.confidence, b.confidence);
}
