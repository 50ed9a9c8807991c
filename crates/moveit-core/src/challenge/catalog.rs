use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Which part of the body a challenge exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Body,
    Eye,
}

impl ChallengeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChallengeKind::Body => "body",
            ChallengeKind::Eye => "eye",
        }
    }
}

/// One entry of the challenge catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeTemplate {
    #[serde(rename = "type")]
    pub kind: ChallengeKind,
    pub description: String,
    /// XP awarded on completion.
    pub amount: u32,
}

/// Read-only list of challenge templates, loaded once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    templates: Vec<ChallengeTemplate>,
}

const BUILTIN: &str = include_str!("../../assets/challenges.json");

impl Catalog {
    /// The catalog bundled with the crate.
    pub fn builtin() -> Self {
        // Parsing the bundled asset fails only on a packaging bug.
        Self::from_json(BUILTIN).expect("embedded challenge catalog is valid")
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a catalog from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<ChallengeTemplate> = serde_json::from_str(json)?;
        let catalog = Self { templates };
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = self.templates.iter().position(|t| t.amount == 0) {
            return Err(CatalogError::ZeroAmount { index });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChallengeTemplate> {
        self.templates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChallengeTemplate> {
        self.templates.iter()
    }
}
