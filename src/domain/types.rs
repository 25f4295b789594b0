// ==========================================
// Ministry Performance Tracking - Domain Types
// ==========================================
// Responsibility: role labels, role classes, and subject identities
// Rule: role strings are normalized in exactly ONE place (Role::normalize);
//       fan-out logic and presentation visibility both read the same label
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Role Class
// ==========================================
// Fan-out behavior is decided by class, not by raw label text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleClass {
    /// Strategic oversight: queries on behalf of every known user
    Strategic,
    /// Chief oversight: queries on behalf of sector staff
    Chief,
    /// Frontline / expert staff: queries only on own behalf
    Staff,
}

impl fmt::Display for RoleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleClass::Strategic => write!(f, "STRATEGIC"),
            RoleClass::Chief => write!(f, "CHIEF"),
            RoleClass::Staff => write!(f, "STAFF"),
        }
    }
}

// ==========================================
// Role
// ==========================================
// Labels arrive from upstream as free text ("chief  ceo", "Chief CEO", ...).
// The canonical form is trimmed, whitespace-collapsed, and title-cased with
// ministry acronyms kept uppercase.

/// Acronyms that stay fully uppercase in canonical role labels
const ROLE_ACRONYMS: &[&str] = &["CEO", "CTO", "CFO", "HR", "ICT"];

/// Canonical role label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Role {
    canonical: String,
}

impl Role {
    /// Normalize a raw role label into its canonical form
    ///
    /// # Parameters
    /// - raw: role label as received from upstream (any casing/spacing)
    ///
    /// # Returns
    /// - Role with trimmed, space-collapsed, title-cased label
    ///   (known acronyms uppercased, e.g. "chief  ceo" -> "Chief CEO")
    pub fn normalize(raw: &str) -> Self {
        let canonical = raw
            .split_whitespace()
            .map(canonical_word)
            .collect::<Vec<_>>()
            .join(" ");
        Self { canonical }
    }

    /// Canonical label, as sent to the measurement backend
    pub fn label(&self) -> &str {
        &self.canonical
    }

    /// Role class driving fan-out behavior
    pub fn class(&self) -> RoleClass {
        let first = self.canonical.split(' ').next().unwrap_or("");
        if first.eq_ignore_ascii_case("strategic") {
            RoleClass::Strategic
        } else if first.eq_ignore_ascii_case("chief") {
            RoleClass::Chief
        } else {
            RoleClass::Staff
        }
    }

    /// True for oversight roles (strategic or chief)
    pub fn is_oversight(&self) -> bool {
        matches!(self.class(), RoleClass::Strategic | RoleClass::Chief)
    }
}

/// Title-case one word, keeping known acronyms uppercase
fn canonical_word(word: &str) -> String {
    for acronym in ROLE_ACRONYMS {
        if word.eq_ignore_ascii_case(acronym) {
            return (*acronym).to_string();
        }
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::normalize(&raw)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.canonical
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

// ==========================================
// Subject
// ==========================================
// A user a measurement query is issued on behalf of. When fan-out is in
// effect, each query carries the SUBJECT's own sector/subsector scope,
// not the requester's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// User id
    pub id: String,
    /// Canonical role
    pub role: Role,
    /// Sector the user belongs to (when scoped)
    pub sector_id: Option<String>,
    /// Subsector the user belongs to (when scoped)
    pub subsector_id: Option<String>,
}

impl Subject {
    /// Create a subject with a raw role label (normalized here)
    pub fn new(
        id: impl Into<String>,
        raw_role: &str,
        sector_id: Option<String>,
        subsector_id: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            role: Role::normalize(raw_role),
            sector_id,
            subsector_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_normalization_collapses_spacing_and_case() {
        let role = Role::normalize("  chief   ceo ");
        assert_eq!(role.label(), "Chief CEO");

        let role = Role::normalize("STRATEGIC planning DIRECTOR");
        assert_eq!(role.label(), "Strategic Planning Director");
    }

    #[test]
    fn test_role_normalization_is_idempotent() {
        let once = Role::normalize("chief ceo");
        let twice = Role::normalize(once.label());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_role_class() {
        assert_eq!(Role::normalize("strategic officer").class(), RoleClass::Strategic);
        assert_eq!(Role::normalize("Chief CEO").class(), RoleClass::Chief);
        assert_eq!(Role::normalize("expert").class(), RoleClass::Staff);
        assert_eq!(Role::normalize("").class(), RoleClass::Staff);
    }

    #[test]
    fn test_role_serde_round_trip_normalizes() {
        let json = "\"chief  ceo\"";
        let role: Role = serde_json::from_str(json).unwrap();
        assert_eq!(role.label(), "Chief CEO");
        let back = serde_json::to_string(&role).unwrap();
        assert_eq!(back, "\"Chief CEO\"");
    }
}
