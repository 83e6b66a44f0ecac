use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Case – one named sample/condition
// ---------------------------------------------------------------------------

/// One measured condition: where its spectrum lives and how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Unique key shown in the case selector.
    pub id: String,
    /// Data-source reference, resolved against the configured data directory
    /// when relative.
    pub file: String,
    /// CSS/SVG color name (`"black"`, `"orange"`, ...).
    pub color: String,
    /// Human-readable description, used as heading and legend name.
    pub description: String,
}

impl Case {
    pub fn new(id: &str, file: &str, color: &str, description: &str) -> Self {
        Case {
            id: id.to_string(),
            file: file.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("case id {0:?} is defined more than once")]
    DuplicateId(String),
    #[error("case id must not be empty")]
    EmptyId,
}

// ---------------------------------------------------------------------------
// CaseRegistry – immutable, ordered set of cases
// ---------------------------------------------------------------------------

/// The cases available for selection, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRegistry {
    cases: Vec<Case>,
}

impl CaseRegistry {
    /// Build a registry, rejecting empty or repeated ids.
    pub fn new(cases: Vec<Case>) -> Result<Self, RegistryError> {
        for (i, case) in cases.iter().enumerate() {
            if case.id.is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if cases[..i].iter().any(|c| c.id == case.id) {
                return Err(RegistryError::DuplicateId(case.id.clone()));
            }
        }
        Ok(CaseRegistry { cases })
    }

    /// The five reference cases: a blank and four FITC-BSA dilutions.
    pub fn reference() -> Self {
        CaseRegistry {
            cases: reference_cases(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == id)
    }

    /// Position of `id` in display order (also its palette slot).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.cases.iter().position(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl Default for CaseRegistry {
    fn default() -> Self {
        Self::reference()
    }
}

pub fn reference_cases() -> Vec<Case> {
    vec![
        Case::new("Blank", "t-white-blank.txt", "black", "Blank"),
        Case::new("Case 1", "t-1white.txt", "red", "10µL FITC-BSA with 290µL water"),
        Case::new("Case 2", "t-2white.txt", "green", "20µL FITC-BSA with 280µL water"),
        Case::new("Case 3", "t-3white.txt", "blue", "30µL FITC-BSA with 270µL water"),
        Case::new("Case 4", "t-4white.txt", "orange", "50µL FITC-BSA with 250µL water"),
    ]
}
