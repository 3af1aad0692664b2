//! Tenant selection.
//!
//! The two organizational units are a closed set, each backed by its own
//! store instance. Every store call is scoped to exactly one tenant; there
//! are no cross-tenant reads.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One of the two independent organizational units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tenant {
    Wisuda,
    Sosprom,
}

impl Tenant {
    pub const ALL: [Tenant; 2] = [Tenant::Wisuda, Tenant::Sosprom];

    /// Wire value used as the `db` request parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tenant::Wisuda => "wisuda",
            Tenant::Sosprom => "sosprom",
        }
    }
}

impl core::fmt::Display for Tenant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tenant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wisuda" => Ok(Tenant::Wisuda),
            "sosprom" => Ok(Tenant::Sosprom),
            other => Err(DomainError::validation(format!("unknown tenant: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_wire_value() {
        for tenant in Tenant::ALL {
            assert_eq!(tenant.as_str().parse::<Tenant>().unwrap(), tenant);
        }
    }

    #[test]
    fn rejects_unknown_tenant() {
        assert!("keuangan".parse::<Tenant>().is_err());
    }
}
