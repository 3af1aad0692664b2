//! Strongly-typed identifiers used across the domain.
//!
//! All primary identifiers are store-assigned, human-readable strings
//! (`TT-001`, `BM-001`, ...), so these are string newtypes rather than
//! generated UUIDs. `ItemCode` additionally carries the catalog's
//! normalization rule: trimmed, uppercased, never blank.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Identifier of a receipt (tanda terima), e.g. `TT-001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

/// Identifier of an inbound or outbound movement, e.g. `BM-001` / `BK-001`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(String);

macro_rules! impl_string_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

impl_string_newtype!(ReceiptId);
impl_string_newtype!(MovementId);

/// Primary key of a master catalog item.
///
/// Normalized on construction: surrounding whitespace stripped, ASCII
/// uppercased. A blank code is a validation error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(String);

impl ItemCode {
    pub fn new(raw: &str) -> DomainResult<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::validation("item code cannot be empty"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ItemCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_code_uppercases_and_trims() {
        let code = ItemCode::new("  a001 ").unwrap();
        assert_eq!(code.as_str(), "A001");
        assert_eq!(code, ItemCode::new("A001").unwrap());
    }

    #[test]
    fn blank_item_code_is_rejected() {
        assert!(matches!(
            ItemCode::new("   "),
            Err(DomainError::Validation(_))
        ));
    }
}
