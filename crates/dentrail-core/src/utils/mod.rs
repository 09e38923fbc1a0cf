//! Display helpers for percentages, dates and roster names.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    cmp_ignore_case, format_date_list, format_date_long, format_date_short, format_percent,
    round_percent,
};
