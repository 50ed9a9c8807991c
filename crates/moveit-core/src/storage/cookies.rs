//! Cookie-style session persistence.
//!
//! The progression trio (`level`, `currentExperience`, `challengesCompleted`)
//! persists as plain decimal strings, one `name=value` pair per line. This is
//! the only progression storage; everything else is session-local.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::StorageError;

pub const LEVEL_COOKIE: &str = "level";
pub const EXPERIENCE_COOKIE: &str = "currentExperience";
pub const COMPLETED_COOKIE: &str = "challengesCompleted";

/// String-keyed persistence surface for the session cookies.
pub trait CookieJar: Send {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&mut self, name: &str, value: &str);
    /// Persist pending values. Trivially succeeds for implementations
    /// without a backing store.
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// In-memory jar for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    values: BTreeMap<String, String>,
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// File-backed jar storing `name=value` lines.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileCookieJar {
    /// Open the jar at `path`, loading any existing values. A missing or
    /// unreadable file starts an empty jar.
    pub fn open(path: PathBuf) -> Self {
        let mut values = BTreeMap::new();
        if let Ok(content) = std::fs::read_to_string(&path) {
            for line in content.lines() {
                if let Some((name, value)) = line.split_once('=') {
                    values.insert(name.trim().to_string(), value.trim().to_string());
                }
            }
        }
        Self { path, values }
    }

    /// The jar under the default data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::open(super::data_dir()?.join("cookies")))
    }
}

impl CookieJar for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        let mut content = String::new();
        for (name, value) in &self.values {
            content.push_str(name);
            content.push('=');
            content.push_str(value);
            content.push('\n');
        }
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

/// The persisted progression trio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileCookies {
    pub level: u32,
    pub current_experience: u32,
    pub challenges_completed: u32,
}

impl Default for ProfileCookies {
    fn default() -> Self {
        Self {
            level: 1,
            current_experience: 0,
            challenges_completed: 0,
        }
    }
}

impl ProfileCookies {
    /// Read the trio from a jar. Missing or non-numeric values fall back to
    /// the defaults.
    pub fn read(jar: &dyn CookieJar) -> Self {
        let defaults = Self::default();
        Self {
            level: read_u32(jar, LEVEL_COOKIE).unwrap_or(defaults.level),
            current_experience: read_u32(jar, EXPERIENCE_COOKIE)
                .unwrap_or(defaults.current_experience),
            challenges_completed: read_u32(jar, COMPLETED_COOKIE)
                .unwrap_or(defaults.challenges_completed),
        }
    }

    /// Write the trio as plain decimal strings and flush.
    pub fn write(&self, jar: &mut dyn CookieJar) -> Result<(), StorageError> {
        jar.set(LEVEL_COOKIE, &self.level.to_string());
        jar.set(EXPERIENCE_COOKIE, &self.current_experience.to_string());
        jar.set(COMPLETED_COOKIE, &self.challenges_completed.to_string());
        jar.flush()
    }
}

fn read_u32(jar: &dyn CookieJar, name: &str) -> Option<u32> {
    jar.get(name)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_jar_reads_defaults() {
        let jar = MemoryCookieJar::default();
        assert_eq!(ProfileCookies::read(&jar), ProfileCookies::default());
    }

    #[test]
    fn trio_round_trips_as_decimal_strings() {
        let mut jar = MemoryCookieJar::default();
        let cookies = ProfileCookies {
            level: 7,
            current_experience: 123,
            challenges_completed: 42,
        };
        cookies.write(&mut jar).unwrap();

        assert_eq!(jar.get(LEVEL_COOKIE).as_deref(), Some("7"));
        assert_eq!(jar.get(EXPERIENCE_COOKIE).as_deref(), Some("123"));
        assert_eq!(jar.get(COMPLETED_COOKIE).as_deref(), Some("42"));
        assert_eq!(ProfileCookies::read(&jar), cookies);
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let mut jar = MemoryCookieJar::default();
        jar.set(LEVEL_COOKIE, "NaN");
        jar.set(EXPERIENCE_COOKIE, "-5");
        jar.set(COMPLETED_COOKIE, "12");

        let cookies = ProfileCookies::read(&jar);
        assert_eq!(cookies.level, 1);
        assert_eq!(cookies.current_experience, 0);
        assert_eq!(cookies.challenges_completed, 12);
    }

    #[test]
    fn file_jar_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies");

        let mut jar = FileCookieJar::open(path.clone());
        ProfileCookies {
            level: 3,
            current_experience: 50,
            challenges_completed: 9,
        }
        .write(&mut jar)
        .unwrap();

        let reopened = FileCookieJar::open(path.clone());
        let cookies = ProfileCookies::read(&reopened);
        assert_eq!(cookies.level, 3);
        assert_eq!(cookies.current_experience, 50);
        assert_eq!(cookies.challenges_completed, 9);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("level=3"));
        assert!(content.contains("currentExperience=50"));
        assert!(content.contains("challengesCompleted=9"));
    }

    #[test]
    fn file_jar_tolerates_junk_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies");
        std::fs::write(&path, "level=4\ngarbage line\n=orphan\nchallengesCompleted=2\n").unwrap();

        let jar = FileCookieJar::open(path);
        let cookies = ProfileCookies::read(&jar);
        assert_eq!(cookies.level, 4);
        assert_eq!(cookies.current_experience, 0);
        assert_eq!(cookies.challenges_completed, 2);
    }
}
