//! Input records handed to the completion engine.
//!
//! - `MemberId`: roster entry
//! - `Requirement`, `Catalog`, `Category`: the validated requirement catalog
//! - `Session`, `AttendanceRecord`: the session log and who was present

pub mod member;
pub mod requirement;
pub mod session;

pub use member::MemberId;
pub use requirement::{Catalog, Category, Requirement};
pub use session::{AttendanceRecord, Session, COVERAGE_DELIMITER};
