//! The four hidden role types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CardPoolError;

/// A role type a player can be dealt.
///
/// The declaration order is the dealing priority: the Leader slot is always
/// filled first, so a short table never ends up without its Leader.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    /// Publicly known once dealt. At most one per room.
    Leader,
    /// Protects the Leader. The flexible role when presets are resized.
    Guardian,
    /// Wants the Leader dead.
    Assassin,
    /// Wants to be the last one standing.
    Traitor,
}

impl RoleType {
    /// Every role type in dealing priority order.
    pub const ALL: [RoleType; 4] = [
        RoleType::Leader,
        RoleType::Guardian,
        RoleType::Assassin,
        RoleType::Traitor,
    ];

    /// The lowercase name used in configuration data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Guardian => "guardian",
            Self::Assassin => "assassin",
            Self::Traitor => "traitor",
        }
    }

    /// Returns `true` if dealing this role makes it public.
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Leader)
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = CardPoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CardPoolError::UnknownRoleType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_dealing_order() {
        assert_eq!(
            RoleType::ALL,
            [
                RoleType::Leader,
                RoleType::Guardian,
                RoleType::Assassin,
                RoleType::Traitor
            ]
        );
        assert!(RoleType::Leader < RoleType::Traitor);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Guardian".parse::<RoleType>(), Ok(RoleType::Guardian));
        assert_eq!(" TRAITOR ".parse::<RoleType>(), Ok(RoleType::Traitor));
    }

    #[test]
    fn test_parse_unknown_role_type() {
        let err = "jester".parse::<RoleType>().unwrap_err();
        assert_eq!(err, CardPoolError::UnknownRoleType("jester".into()));
        assert_eq!(err.to_string(), "unknown role type 'jester'");
    }

    #[test]
    fn test_only_leader_is_revealed() {
        assert!(RoleType::Leader.is_revealed());
        assert!(!RoleType::Guardian.is_revealed());
        assert!(!RoleType::Assassin.is_revealed());
        assert!(!RoleType::Traitor.is_revealed());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&RoleType::Assassin).unwrap();
        assert_eq!(json, "\"assassin\"");
        let back: RoleType = serde_json::from_str("\"leader\"").unwrap();
        assert_eq!(back, RoleType::Leader);
    }
}
