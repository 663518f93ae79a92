// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::config::SyncProfile;

/// Compiled include/ignore globs for a single profile.
///
/// Patterns follow shell `fnmatch` rules: `*` also matches `/`, so `*.go`
/// matches both `main.go` and `src/main.go`. Each candidate is tested as a
/// root-relative path (forward slashes) and as a bare file name.
#[derive(Clone)]
pub struct ProfileMatcher {
    include_set: GlobSet,
    ignore_set: Option<GlobSet>,
    include_directories: bool,
}

impl fmt::Debug for ProfileMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileMatcher")
            .field("include", &self.include_set.len())
            .field(
                "ignore",
                &self.ignore_set.as_ref().map(|s| s.len()).unwrap_or(0),
            )
            .field("include_directories", &self.include_directories)
            .finish()
    }
}

impl ProfileMatcher {
    pub fn new(
        include: &[String],
        ignore: Option<&[String]>,
        case_sensitive: bool,
        include_directories: bool,
    ) -> Result<Self> {
        let include_set = build_globset(include, case_sensitive)
            .context("building include globset")?;

        let ignore_set = match ignore {
            Some(list) if !list.is_empty() => Some(
                build_globset(list, case_sensitive).context("building ignore globset")?,
            ),
            _ => None,
        };

        Ok(Self {
            include_set,
            ignore_set,
            include_directories,
        })
    }

    pub fn from_profile(profile: &SyncProfile) -> Result<Self> {
        Self::new(
            &profile.include_patterns,
            profile.ignore_patterns.as_deref(),
            profile.case_sensitive,
            profile.include_directories,
        )
        .with_context(|| format!("compiling patterns for profile {}", profile.name))
    }

    /// True if `rel_path` matches an include glob and no ignore glob.
    pub fn matches(&self, rel_path: &str) -> bool {
        let name = file_name(rel_path);

        if !(self.include_set.is_match(rel_path) || self.include_set.is_match(name)) {
            return false;
        }
        if let Some(ignore) = &self.ignore_set {
            if ignore.is_match(rel_path) || ignore.is_match(name) {
                return false;
            }
        }
        true
    }

    /// Full filter: directory flag first, then globs.
    pub fn accepts(&self, rel_path: &str, is_directory: bool) -> bool {
        if is_directory && !self.include_directories {
            return false;
        }
        self.matches(rel_path)
    }
}

fn file_name(rel_path: &str) -> &str {
    rel_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(rel_path)
}

fn build_globset(patterns: &[String], case_sensitive: bool) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .case_insensitive(!case_sensitive)
            .literal_separator(false)
            .build()
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn star_crosses_directories() {
        let m = ProfileMatcher::new(&strings(&["*.go"]), None, false, false).unwrap();
        assert!(m.matches("main.go"));
        assert!(m.matches("src/main.go"));
        assert!(!m.matches("node_modules/x.js"));
    }

    #[test]
    fn basename_pattern_matches_nested_file() {
        let m = ProfileMatcher::new(&strings(&["Makefile"]), None, false, false).unwrap();
        assert!(m.matches("build/Makefile"));
    }

    #[test]
    fn ignore_wins_over_include() {
        let m = ProfileMatcher::new(
            &strings(&["*.py"]),
            Some(&strings(&["*_test.py", "venv/*"])),
            false,
            false,
        )
        .unwrap();
        assert!(m.matches("app/models.py"));
        assert!(!m.matches("app/models_test.py"));
        assert!(!m.matches("venv/lib/site.py"));
    }

    #[test]
    fn case_insensitive_by_default() {
        let loose = ProfileMatcher::new(&strings(&["*.py"]), None, false, false).unwrap();
        let strict = ProfileMatcher::new(&strings(&["*.py"]), None, true, false).unwrap();
        assert!(loose.matches("SETUP.PY"));
        assert!(!strict.matches("SETUP.PY"));
    }

    #[test]
    fn directories_excluded_unless_enabled() {
        let files_only = ProfileMatcher::new(&strings(&["*"]), None, false, false).unwrap();
        let with_dirs = ProfileMatcher::new(&strings(&["*"]), None, false, true).unwrap();
        assert!(!files_only.accepts("pkg", true));
        assert!(files_only.accepts("pkg/a.go", false));
        assert!(with_dirs.accepts("pkg", true));
    }

    #[test]
    fn rejects_invalid_glob() {
        assert!(ProfileMatcher::new(&strings(&["a[b"]), None, false, false).is_err());
    }
}
