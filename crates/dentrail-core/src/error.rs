use thiserror::Error;

/// Reasons a requirement catalog is refused at ingestion.
///
/// The completion engine itself never fails; these are raised only when a
/// catalog is assembled, so every downstream roll-up can assume one
/// `mandatory` flag per category and unique requirement ids.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate requirement id: {0}")]
    DuplicateRequirement(String),

    #[error("Requirement id must not be empty")]
    EmptyRequirementId,

    #[error("Category {category:?} mixes mandatory and optional requirements")]
    MixedCategoryFlags { category: String },
}

/// Maximum length of a requirement id echoed back in log output
const MAX_LOGGED_ID_LENGTH: usize = 64;

impl CatalogError {
    /// The offending identifier, shortened for log fields
    pub fn subject(&self) -> String {
        let raw = match self {
            CatalogError::DuplicateRequirement(id) => id.as_str(),
            CatalogError::EmptyRequirementId => "",
            CatalogError::MixedCategoryFlags { category } => category.as_str(),
        };
        if raw.chars().count() <= MAX_LOGGED_ID_LENGTH {
            raw.to_string()
        } else {
            let truncated: String = raw.chars().take(MAX_LOGGED_ID_LENGTH).collect();
            format!("{}...", truncated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CatalogError::DuplicateRequirement("Bobcat.1".to_string()).to_string(),
            "Duplicate requirement id: Bobcat.1"
        );
        assert_eq!(
            CatalogError::MixedCategoryFlags { category: "Bobcat".to_string() }.to_string(),
            "Category \"Bobcat\" mixes mandatory and optional requirements"
        );
    }

    #[test]
    fn test_subject_truncates_long_ids() {
        let long = "x".repeat(100);
        let subject = CatalogError::DuplicateRequirement(long).subject();
        assert_eq!(subject.len(), MAX_LOGGED_ID_LENGTH + 3);
        assert!(subject.ends_with("..."));
        assert_eq!(CatalogError::EmptyRequirementId.subject(), "");
    }
}
