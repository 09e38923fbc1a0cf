//! dentrail-core - advancement completion engine for den attendance tracking.
//!
//! Given a roster, a requirement catalog, a session log and an attendance
//! log, this crate derives which requirements each member has satisfied,
//! rolls that up into category and rank eligibility, and ranks mandatory
//! requirements for session planning.
//!
//! - [`models`]: input records and the validated [`models::Catalog`]
//! - [`engine`]: the pure completion engine
//! - [`cache`]: [`cache::Tracker`], a version-keyed memoizing front
//! - [`config`]: rank definitions and the active rank
//! - [`ranks`]: bundled catalogs for the Cub Scout ranks

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ranks;
pub mod utils;

pub use cache::Tracker;
pub use config::Config;
pub use error::CatalogError;
pub use ranks::PackagedRank;
