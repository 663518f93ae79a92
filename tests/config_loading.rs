// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;
use syncwatch::config::{load, load_and_validate};
use syncwatch::errors::SyncError;

fn write_config(doc: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{doc}").unwrap();
    file
}

#[test]
fn loads_profiles_in_document_order() {
    let file = write_config(
        r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"

[api]
path = "/srv/api"
remote_path = "/backup/api"
remote_server_cs = "deploy@host2"
remote_server_cs_port = 2200
"#,
    );

    let profiles = load(file.path()).unwrap();
    let names: Vec<&str> = profiles.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["web", "api"]);

    let (_, api) = &profiles[1];
    assert_eq!(api.remote_host, "deploy@host2");
    assert_eq!(api.remote_port, 2200);
    assert_eq!(api.local_path.to_str(), Some("/srv/api"));
}

#[test]
fn malformed_toml_is_a_config_error() {
    let file = write_config("[web\npath = ");

    match load_and_validate(file.path()) {
        Err(err @ SyncError::ConfigParse(_)) => assert!(err.is_config_error()),
        Err(e) => panic!("Expected ConfigParse, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn wrong_field_type_is_a_config_error() {
    let file = write_config(
        r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"
remote_server_cs_port = "twenty-two"
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, SyncError::ConfigParse(_)));
}

#[test]
fn empty_pattern_list_is_rejected() {
    let file = write_config(
        r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"
patterns = []
"#,
    );

    match load_and_validate(file.path()) {
        Err(SyncError::Config(msg)) => {
            assert!(msg.contains("web"));
            assert!(msg.contains("patterns"));
        }
        Err(e) => panic!("Expected Config error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_keys_are_ignored() {
    let file = write_config(
        r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"
comment = "legacy key"
"#,
    );

    assert_eq!(load(file.path()).unwrap().len(), 1);
}

#[test]
fn demo_config_is_valid() {
    let manifest = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let profiles = load(manifest.join("demos/sync.toml")).unwrap();

    let names: Vec<&str> = profiles.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["web", "scripts"]);

    let (_, scripts) = &profiles[1];
    assert_eq!(scripts.remote_port, 2022);
    assert_eq!(scripts.include_patterns, vec!["*.sh", "*.py"]);
    assert!(scripts.case_sensitive);
}
