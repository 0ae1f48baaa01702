//! Academic calendar configuration.
//!
//! Loaded once at startup and handed to whatever needs it by reference.

use serde::Serialize;

pub const MAX_SEMESTER: i16 = 8;

const DEFAULT_UNIVERSITY_NAME: &str = "My University";
const DEFAULT_ACADEMIC_YEAR: &str = "2024-2025";
const DEFAULT_SEMESTER: i16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcademicConfig {
    pub university_name: String,
    /// Span such as `"2024-2025"`.
    pub academic_year: String,
    pub current_semester: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl AcademicConfig {
    /// Build from a variable lookup (normally the process environment).
    ///
    /// | Var                | Default         |
    /// |--------------------|-----------------|
    /// | `UNIVERSITY_NAME`  | `My University` |
    /// | `ACADEMIC_YEAR`    | `2024-2025`     |
    /// | `CURRENT_SEMESTER` | `1`             |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let university_name = lookup("UNIVERSITY_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_UNIVERSITY_NAME.to_string());

        let academic_year = match lookup("ACADEMIC_YEAR") {
            Some(raw) => parse_academic_year(&raw)?,
            None => DEFAULT_ACADEMIC_YEAR.to_string(),
        };

        let current_semester = match lookup("CURRENT_SEMESTER") {
            Some(raw) => parse_semester(&raw).ok_or(ConfigError::InvalidValue {
                var: "CURRENT_SEMESTER",
                expected: "a semester between 1 and 8",
                value: raw,
            })?,
            None => DEFAULT_SEMESTER,
        };

        Ok(Self {
            university_name,
            academic_year,
            current_semester,
        })
    }

    /// Resolve a `semester` query value: `"current"` maps to the configured
    /// semester, otherwise a number in `1..=8`.
    pub fn resolve_semester(&self, raw: &str) -> Option<i16> {
        if raw.trim().eq_ignore_ascii_case("current") {
            return Some(self.current_semester);
        }
        parse_semester(raw)
    }
}

fn parse_semester(raw: &str) -> Option<i16> {
    raw.trim()
        .parse::<i16>()
        .ok()
        .filter(|n| (1..=MAX_SEMESTER).contains(n))
}

/// Accepts `YYYY-YYYY` where the second year follows the first.
fn parse_academic_year(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        var: "ACADEMIC_YEAR",
        expected: "a span like 2024-2025",
        value: raw.to_string(),
    };

    let (first, second) = raw.trim().split_once('-').ok_or_else(invalid)?;
    if first.len() != 4 || second.len() != 4 {
        return Err(invalid());
    }
    let first: u16 = first.parse().map_err(|_| invalid())?;
    let second: u16 = second.parse().map_err(|_| invalid())?;
    if second != first + 1 {
        return Err(invalid());
    }
    Ok(format!("{first}-{second}"))
}
