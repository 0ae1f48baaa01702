//! Roles and the capabilities they grant.
//!
//! The role -> capability table lives in [`Role::permits`] and nowhere else.
//! The HTTP layer declares which [`Capability`] a route group needs and asks
//! this table once per request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_FACULTY: &str = "faculty";
pub const ROLE_STUDENT: &str = "student";
pub const ROLE_ACCOUNTANT: &str = "accountant";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Student,
    Accountant,
}

/// An action a route may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ViewTimetable,
    ManageTimetable,
    ViewAcademicConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Faculty, Role::Student, Role::Accountant];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Faculty => ROLE_FACULTY,
            Role::Student => ROLE_STUDENT,
            Role::Accountant => ROLE_ACCOUNTANT,
        }
    }

    pub fn permits(self, capability: Capability) -> bool {
        use Capability::*;

        match self {
            Role::Admin => true,
            Role::Faculty | Role::Student => {
                matches!(capability, ViewTimetable | ViewAcademicConfig)
            }
            Role::Accountant => matches!(capability, ViewAcademicConfig),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so legacy upper-case values (`"ADMIN"`) still resolve.
impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::ViewTimetable => "view_timetable",
            Capability::ManageTimetable => "manage_timetable",
            Capability::ViewAcademicConfig => "view_academic_config",
        };
        f.write_str(name)
    }
}
