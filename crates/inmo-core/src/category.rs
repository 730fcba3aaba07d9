//! Clause categories

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::SubmissionError;

/// Grouping shown when browsing the clause library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseCategory {
    /// Rent and payment terms
    #[serde(rename = "Pago")]
    Pago,
    /// Repairs and upkeep
    #[serde(rename = "Mantenimiento")]
    Mantenimiento,
    /// Early termination and notice
    #[serde(rename = "Terminación")]
    Terminacion,
    /// Tenant duties
    #[serde(rename = "Obligaciones del Inquilino")]
    ObligacionesInquilino,
    /// Owner duties
    #[serde(rename = "Obligaciones del Propietario")]
    ObligacionesPropietario,
    /// Anything else
    #[serde(rename = "General")]
    General,
}

impl ClauseCategory {
    /// Every category, in display order
    pub const ALL: [ClauseCategory; 6] = [
        Self::Pago,
        Self::Mantenimiento,
        Self::Terminacion,
        Self::ObligacionesInquilino,
        Self::ObligacionesPropietario,
        Self::General,
    ];

    /// Display label, also the stored value
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pago => "Pago",
            Self::Mantenimiento => "Mantenimiento",
            Self::Terminacion => "Terminación",
            Self::ObligacionesInquilino => "Obligaciones del Inquilino",
            Self::ObligacionesPropietario => "Obligaciones del Propietario",
            Self::General => "General",
        }
    }
}

impl Display for ClauseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClauseCategory {
    type Err = SubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| SubmissionError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for category in ClauseCategory::ALL {
            assert_eq!(category.label().parse::<ClauseCategory>(), Ok(category));
        }
    }

    #[test]
    fn exact_labels_only() {
        assert!("pago".parse::<ClauseCategory>().is_err());
        assert!("Terminacion".parse::<ClauseCategory>().is_err());
        assert_eq!(
            "Otros".parse::<ClauseCategory>(),
            Err(SubmissionError::UnknownCategory("Otros".to_string()))
        );
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&ClauseCategory::ObligacionesInquilino).unwrap();
        assert_eq!(json, "\"Obligaciones del Inquilino\"");
        let back: ClauseCategory = serde_json::from_str("\"Terminación\"").unwrap();
        assert_eq!(back, ClauseCategory::Terminacion);
    }
}
