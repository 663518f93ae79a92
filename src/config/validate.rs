// src/config/validate.rs

use std::path::PathBuf;

use crate::config::model::{ConfigFile, ProfileConfig, RawConfigFile, SyncProfile};
use crate::errors::{Result, SyncError};
use crate::watch::patterns::ProfileMatcher;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SyncError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        ensure_has_profiles(&raw)?;

        let mut profiles = Vec::with_capacity(raw.profiles.len());
        for (name, cfg) in raw.profiles {
            profiles.push(validate_profile(name, cfg)?);
        }

        Ok(ConfigFile::new_unchecked(profiles))
    }
}

fn ensure_has_profiles(raw: &RawConfigFile) -> Result<()> {
    if raw.profiles.is_empty() {
        return Err(SyncError::Config(
            "config must contain at least one [<profile>] table".to_string(),
        ));
    }
    Ok(())
}

fn validate_profile(name: String, cfg: ProfileConfig) -> Result<SyncProfile> {
    require_non_empty(&name, "path", &cfg.path)?;
    require_non_empty(&name, "remote_path", &cfg.remote_path)?;
    require_non_empty(&name, "remote_server_cs", &cfg.remote_server_cs)?;

    let remote_port = validate_port(&name, cfg.remote_server_cs_port)?;

    let include_patterns = cfg.effective_patterns();
    if include_patterns.is_empty() {
        return Err(SyncError::Config(format!(
            "profile '{name}': `patterns` must not be empty"
        )));
    }

    let profile = SyncProfile {
        local_path: PathBuf::from(&cfg.path),
        remote_path: cfg.remote_path.trim().to_string(),
        remote_host: cfg.remote_server_cs.trim().to_string(),
        remote_port,
        include_patterns,
        ignore_patterns: cfg.ignore_patterns,
        include_directories: cfg.include_directories,
        case_sensitive: cfg.case_sensitive,
        name,
    };

    // Compile once here so bad globs fail at startup, not on the first event.
    ProfileMatcher::from_profile(&profile)
        .map_err(|e| SyncError::Config(format!("profile '{}': {e:#}", profile.name)))?;

    Ok(profile)
}

fn require_non_empty(profile: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::Config(format!(
            "profile '{profile}': `{field}` must not be empty"
        )));
    }
    Ok(())
}

fn validate_port(profile: &str, port: i64) -> Result<u16> {
    match u16::try_from(port) {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(SyncError::Config(format!(
            "profile '{profile}': `remote_server_cs_port` must be in 1..=65535 (got {port})"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_from_str;

    fn validate(doc: &str) -> Result<ConfigFile> {
        ConfigFile::try_from(load_from_str(doc)?)
    }

    #[test]
    fn applies_defaults() {
        let cfg = validate(
            r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"
"#,
        )
        .unwrap();

        let web = &cfg.profiles()[0];
        assert_eq!(web.name, "web");
        assert_eq!(web.remote_port, 22);
        assert_eq!(
            web.include_patterns,
            vec!["*.py", "*.sh", "*.yaml", "*.capnp", "*.go"]
        );
        assert_eq!(web.ignore_patterns, None);
        assert!(!web.include_directories);
        assert!(!web.case_sensitive);
    }

    #[test]
    fn reads_optional_fields() {
        let cfg = validate(
            r#"
[docs]
path = "./docs"
remote_path = "/var/www/docs"
remote_server_cs = "www@web1"
remote_server_cs_port = 2222
patterns = ["*.md"]
ignore_patterns = ["drafts/*"]
include_directories = true
case_sensitive = true
"#,
        )
        .unwrap();

        let docs = &cfg.profiles()[0];
        assert_eq!(docs.remote_port, 2222);
        assert_eq!(docs.include_patterns, vec!["*.md"]);
        assert_eq!(docs.ignore_patterns, Some(vec!["drafts/*".to_string()]));
        assert!(docs.include_directories);
        assert!(docs.case_sensitive);
    }

    #[test]
    fn empty_document_is_rejected() {
        let err = validate("").unwrap_err();
        assert!(matches!(err, SyncError::Config(ref m) if m.contains("at least one")));
    }

    #[test]
    fn empty_host_is_rejected() {
        let err = validate(
            r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "  "
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Config(ref m) if m.contains("remote_server_cs")));
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        for port in ["0", "70000", "-1"] {
            let doc = format!(
                r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"
remote_server_cs_port = {port}
"#
            );
            let err = validate(&doc).unwrap_err();
            assert!(
                matches!(err, SyncError::Config(ref m) if m.contains("remote_server_cs_port")),
                "port {port} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let err = validate(
            r#"
[web]
path = "/srv/app"
remote_path = "/backup/app"
remote_server_cs = "deploy@host1"
ignore_patterns = ["[unclosed"]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::Config(ref m) if m.contains("web")));
    }
}
