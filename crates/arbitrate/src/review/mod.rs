//! Case-by-case arbitration workflow.

mod case;
mod summary;

pub use case::CaseReview;
pub use summary::{CaseFilter, CaseSummary};
