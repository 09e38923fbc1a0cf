//! Pre-packaged Cub Scout rank catalogs.
//!
//! Each rank ships its official adventure list as bundled JSON, so a den can
//! start tracking without entering requirements by hand. Loading one replaces
//! the whole catalog.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{RankDefinition, DEFAULT_ELECTIVE_THRESHOLD};
use crate::models::{Catalog, Requirement};

const LION: &str = include_str!("../data/ranks/lion.json");
const TIGER: &str = include_str!("../data/ranks/tiger.json");
const WOLF: &str = include_str!("../data/ranks/wolf.json");
const BEAR: &str = include_str!("../data/ranks/bear.json");
const WEBELOS: &str = include_str!("../data/ranks/webelos.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackagedRank {
    Lion,
    Tiger,
    Wolf,
    Bear,
    Webelos,
}

impl PackagedRank {
    /// Youngest first
    pub const ALL: [PackagedRank; 5] = [
        PackagedRank::Lion,
        PackagedRank::Tiger,
        PackagedRank::Wolf,
        PackagedRank::Bear,
        PackagedRank::Webelos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PackagedRank::Lion => "Lion",
            PackagedRank::Tiger => "Tiger",
            PackagedRank::Wolf => "Wolf",
            PackagedRank::Bear => "Bear",
            PackagedRank::Webelos => "Webelos",
        }
    }

    pub fn grade(&self) -> &'static str {
        match self {
            PackagedRank::Lion => "Kindergarten",
            PackagedRank::Tiger => "1st Grade",
            PackagedRank::Wolf => "2nd Grade",
            PackagedRank::Bear => "3rd Grade",
            PackagedRank::Webelos => "4th Grade",
        }
    }

    /// e.g. "Wolf (2nd Grade)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.grade())
    }

    /// Case-insensitive lookup by rank name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }

    pub fn definition(&self) -> RankDefinition {
        RankDefinition::new(self.name(), DEFAULT_ELECTIVE_THRESHOLD)
    }

    fn source(&self) -> &'static str {
        match self {
            PackagedRank::Lion => LION,
            PackagedRank::Tiger => TIGER,
            PackagedRank::Wolf => WOLF,
            PackagedRank::Bear => BEAR,
            PackagedRank::Webelos => WEBELOS,
        }
    }

    /// Parse and validate the bundled catalog for this rank
    pub fn catalog(&self) -> Result<Catalog> {
        let requirements: Vec<Requirement> = serde_json::from_str(self.source())
            .with_context(|| format!("Failed to parse packaged catalog for {}", self.name()))?;
        let catalog = Catalog::new(requirements)
            .with_context(|| format!("Invalid packaged catalog for {}", self.name()))?;
        debug!(
            rank = self.name(),
            requirements = catalog.len(),
            categories = catalog.categories().len(),
            "Loaded packaged catalog"
        );
        Ok(catalog)
    }
}

impl std::fmt::Display for PackagedRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_packaged_catalog_is_valid() {
        for rank in PackagedRank::ALL {
            let catalog = rank.catalog().unwrap();
            assert!(!catalog.is_empty(), "{} catalog is empty", rank);
            let mandatory = catalog.categories().iter().filter(|c| c.mandatory).count();
            assert_eq!(mandatory, 6, "{} should have six required adventures", rank);
            assert!(catalog.categories().iter().any(|c| !c.mandatory));
        }
    }

    #[test]
    fn test_lion_catalog_contents() {
        let catalog = PackagedRank::Lion.catalog().unwrap();
        assert_eq!(catalog.len(), 70);
        assert_eq!(catalog.categories().len(), 20);
        let first = &catalog.requirements()[0];
        assert_eq!(first.id, "Bobcat.1");
        assert_eq!(first.category, "Bobcat");
        assert!(first.mandatory);
        assert!(!catalog.category("Count On Me").unwrap().mandatory);
    }

    #[test]
    fn test_ids_do_not_collide_across_ranks() {
        let lion = PackagedRank::Lion.catalog().unwrap();
        let wolf = PackagedRank::Wolf.catalog().unwrap();
        assert!(wolf.get("Bobcat.1").is_none());
        assert!(wolf.get("BobcatWolf.1").is_some());
        assert!(lion.get("BobcatWolf.1").is_none());
    }

    #[test]
    fn test_lookup_and_labels() {
        assert_eq!(PackagedRank::from_name("webelos"), Some(PackagedRank::Webelos));
        assert_eq!(PackagedRank::from_name("Arrow of Light"), None);
        assert_eq!(PackagedRank::Wolf.label(), "Wolf (2nd Grade)");
        assert_eq!(PackagedRank::Bear.definition().elective_threshold, 2);
    }
}
