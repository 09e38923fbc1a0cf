use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;

/// A single requirement in the advancement catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    /// Adventure (category) the requirement belongs to
    pub category: String,
    pub description: String,
    /// True when the owning category must be completed for the rank
    pub mandatory: bool,
}

impl Requirement {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        mandatory: bool,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            description: description.into(),
            mandatory,
        }
    }
}

/// A named group of requirements sharing one mandatory/optional flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub mandatory: bool,
    /// Requirement ids in catalog order
    pub requirement_ids: Vec<String>,
}

/// Validated requirement catalog.
///
/// Requirement order is preserved as given; categories appear in order of
/// first mention. Construction rejects duplicate or empty ids and categories
/// whose requirements disagree on `mandatory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    requirements: Vec<Requirement>,
    categories: Vec<Category>,
    #[serde(skip)]
    by_id: HashMap<String, usize>,
    #[serde(skip)]
    by_category: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(requirements: Vec<Requirement>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for requirement in requirements {
            if let Err(e) = catalog.insert(requirement) {
                warn!(error = %e, subject = %e.subject(), "Rejected requirement catalog");
                return Err(e);
            }
        }
        Ok(catalog)
    }

    fn insert(&mut self, requirement: Requirement) -> Result<(), CatalogError> {
        if requirement.id.is_empty() {
            return Err(CatalogError::EmptyRequirementId);
        }
        if self.by_id.contains_key(&requirement.id) {
            return Err(CatalogError::DuplicateRequirement(requirement.id));
        }

        let category = self.category_slot(&requirement.category, requirement.mandatory)?;
        self.categories[category]
            .requirement_ids
            .push(requirement.id.clone());
        self.by_id
            .insert(requirement.id.clone(), self.requirements.len());
        self.requirements.push(requirement);
        Ok(())
    }

    /// Find or create the category, refusing a conflicting flag
    fn category_slot(&mut self, name: &str, mandatory: bool) -> Result<usize, CatalogError> {
        match self.by_category.get(name) {
            Some(&idx) if self.categories[idx].mandatory != mandatory => {
                Err(CatalogError::MixedCategoryFlags {
                    category: name.to_string(),
                })
            }
            Some(&idx) => Ok(idx),
            None => {
                let idx = self.categories.len();
                self.categories.push(Category {
                    name: name.to_string(),
                    mandatory,
                    requirement_ids: Vec::new(),
                });
                self.by_category.insert(name.to_string(), idx);
                Ok(idx)
            }
        }
    }

    /// Declare a category that may not have any requirements yet.
    ///
    /// Declaring an existing category with the same flag is a no-op.
    pub fn declare_category(&mut self, name: &str, mandatory: bool) -> Result<(), CatalogError> {
        self.category_slot(name, mandatory).map(|_| ())
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: &str) -> Option<&Requirement> {
        self.by_id.get(id).map(|&idx| &self.requirements[idx])
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.by_category.get(name).map(|&idx| &self.categories[idx])
    }

    pub fn mandatory_requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter().filter(|r| r.mandatory)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
