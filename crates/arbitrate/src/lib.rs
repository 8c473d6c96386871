//! Arbitrate: reconcile two coders' answers into one authoritative dataset.
//!
//! Two coders independently answer the same questions for each case. The
//! arbitrator walks through the cases, settles every question on which the
//! coders disagree, and exports the merged result.
//!
//! # Core Principles
//!
//! - **Coder data is read-only**: arbitration lives in its own store
//! - **Renames propagate**: a question renamed between survey waves is
//!   migrated in every store the moment the mapping is registered
//! - **Conflicts are never dropped**: a rename that meets two different
//!   values reopens the question for review
//!
//! # Example
//!
//! ```no_run
//! use arbitrate::{ProjectMeta, Session};
//!
//! let mut session = Session::new().with_project(
//!     ProjectMeta::new()
//!         .with_case_id_key("Case ID")
//!         .with_coder_id_key("Coder"),
//! );
//! session.import_coder_file("alice.csv").unwrap();
//! session.import_coder_file("bob.csv").unwrap();
//!
//! let mut review = session.open_case("17").unwrap();
//! review.auto_resolve().unwrap();
//! review.accept_coder("Q4 Outcome", "alice").unwrap();
//! drop(review);
//!
//! session.save_to(".").unwrap();
//! session.export_csv_to(".", true).unwrap();
//! ```

pub mod error;
pub mod events;
pub mod input;
pub mod project;
pub mod questions;
pub mod review;
pub mod store;

mod session;

pub use error::{ArbitrationError, Result};
pub use events::{DataSource, EventBus, SessionEvent};
pub use input::{ImportConfig, Parser, RecordSet};
pub use project::{CaseInfo, Flag, ProjectMeta};
pub use questions::{compare_questions, question_order, sorted_keys, QuestionNormalization};
pub use review::{CaseFilter, CaseReview, CaseSummary};
pub use session::{
    ProjectDocument, Session, ARBITRATOR_KEY, PROJECT_META_KEY, QUESTION_NORMALIZATION_KEY,
};
pub use store::{
    ArbitrationEntry, ArbitrationStatus, ArbitratorDataStore, CoderDataStore, ReliabilityReport,
};
