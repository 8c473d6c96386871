//! In-memory stores for coder answers and arbitration decisions.

mod arbitrator;
mod coder;
mod encoding;
mod entry;
mod reliability;

pub use arbitrator::{ArbitratorDataStore, RenameConflict};
pub use coder::{CoderDataStore, ImportSummary};
pub use encoding::SavedArbitration;
pub use entry::{Answers, ArbitratedCase, ArbitrationEntry, ArbitrationStatus, CoderCase};
pub use reliability::{
    CaseAgreement, ReliabilityReport, CASE_AVERAGE_HEADER, CASE_ID_HEADER, QUESTION_AVERAGE_LABEL,
};
