use std::path::{Path, PathBuf};

use syncwatch::config::SyncProfile;

/// Builder for `SyncProfile` to simplify test setup.
pub struct ProfileBuilder {
    profile: SyncProfile,
    custom_patterns: bool,
}

impl ProfileBuilder {
    pub fn new(name: &str, local_path: impl Into<PathBuf>) -> Self {
        Self {
            profile: SyncProfile::new(name, local_path, "/backup", "deploy@host1"),
            custom_patterns: false,
        }
    }

    pub fn remote_path(mut self, path: &str) -> Self {
        self.profile.remote_path = path.to_string();
        self
    }

    pub fn remote_host(mut self, host: &str) -> Self {
        self.profile.remote_host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.profile.remote_port = port;
        self
    }

    /// Replace the include patterns (first call drops the defaults).
    pub fn pattern(mut self, pattern: &str) -> Self {
        if !self.custom_patterns {
            self.profile.include_patterns.clear();
            self.custom_patterns = true;
        }
        self.profile.include_patterns.push(pattern.to_string());
        self
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.profile
            .ignore_patterns
            .get_or_insert_with(Vec::new)
            .push(pattern.to_string());
        self
    }

    pub fn build(self) -> SyncProfile {
        self.profile
    }

    pub fn named(self) -> (String, SyncProfile) {
        (self.profile.name.clone(), self.profile)
    }
}

/// Builder for a TOML config document.
#[derive(Default)]
pub struct ConfigDocBuilder {
    doc: String,
}

impl ConfigDocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a profile table with the three required keys.
    pub fn profile(mut self, name: &str, path: &Path, remote_path: &str, host: &str) -> Self {
        // Literal strings so Windows backslashes survive.
        self.doc.push_str(&format!(
            "[{name}]\npath = '{}'\nremote_path = '{remote_path}'\nremote_server_cs = '{host}'\n",
            path.display()
        ));
        self
    }

    /// Append a raw `key = value` line to the last profile.
    pub fn line(mut self, line: &str) -> Self {
        self.doc.push_str(line);
        self.doc.push('\n');
        self
    }

    pub fn build(mut self) -> String {
        self.doc.push('\n');
        self.doc
    }

    /// Write the document to `dir/syncwatch.toml` and return its path.
    pub fn write_to(self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join("syncwatch.toml");
        std::fs::write(&path, self.build())?;
        Ok(path)
    }
}
