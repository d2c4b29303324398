//! Metadata filtering and boosting.
//!
//! Three constraints are supported, each `required` (exclude on mismatch) or
//! `preferred` (boost on match). All comparisons are case-insensitive and missing
//! metadata is treated as an empty string, so evaluation never fails.
//!
//! | field            | match rule                       | preferred boost |
//! |------------------|----------------------------------|-----------------|
//! | `classification` | classification starts with value | `+0.10`         |
//! | `title`          | title equals value               | `+0.30`         |
//! | `keyword`        | value in title or abstract       | `+0.15`         |

pub mod engine;
pub mod types;


pub use engine::{FilterEngine, compute_filter_weights};
pub use types::{Constraint, FilterField, FilterMode, FilterWeight, QueryFilters};
