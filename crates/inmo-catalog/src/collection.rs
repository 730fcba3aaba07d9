//! Collection entities
//!
//! Owners and tenants are the only entities a clause can iterate over.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Entity eligible for iteration blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionEntity {
    /// Property owners
    #[default]
    Propietarios,
    /// Tenants
    Inquilinos,
}

impl CollectionEntity {
    /// All collection entities, in display order
    pub const ALL: [CollectionEntity; 2] = [Self::Propietarios, Self::Inquilinos];

    /// Plural name as stored in iteration parts
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Propietarios => "propietarios",
            Self::Inquilinos => "inquilinos",
        }
    }

    /// Singular entity name used for property lookups and variable paths
    #[inline]
    #[must_use]
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Propietarios => "propietario",
            Self::Inquilinos => "inquilino",
        }
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Propietarios => "Propietarios",
            Self::Inquilinos => "Inquilinos",
        }
    }

    /// Match an exact plural name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == name)
    }
}

impl Display for CollectionEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionEntity {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownCollection(s.to_string()))
    }
}

/// Name that is not a collection entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl Display for UnknownCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collection entity: '{}'", self.0)
    }
}

impl std::error::Error for UnknownCollection {}

/// Check if a name is exactly one of the iterable collection entities
#[inline]
#[must_use]
pub fn is_collection_entity(name: &str) -> bool {
    CollectionEntity::from_name(name).is_some()
}
