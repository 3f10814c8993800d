use serde::{Deserialize, Serialize};
use std::fmt;

/// User role. Determines which permission set applies to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Distributor,
    Dealer,
    Sales,
    ExportTeam,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Distributor,
        Role::Dealer,
        Role::Sales,
        Role::ExportTeam,
    ];

    /// Wire name, as stored on user records and in tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Distributor => "distributor",
            Role::Dealer => "dealer",
            Role::Sales => "sales",
            Role::ExportTeam => "exportTeam",
        }
    }

    /// Parse a wire name. Exact match, as role names are case-sensitive on user records.
    pub fn from_name(name: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == name)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_name(s).ok_or_else(|| crate::error::CoreError::UnknownRole(s.to_string()))
    }
}
