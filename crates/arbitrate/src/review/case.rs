//! Arbitrating a single case.

use indexmap::IndexSet;

use crate::error::{ArbitrationError, Result};
use crate::project::{CaseInfo, Flag};
use crate::session::Session;
use crate::store::{Answers, ArbitrationEntry, ArbitrationStatus};

/// An open case: the first two coders' answers side by side with the
/// arbitrated values.
///
/// Questions are those answered by any coder of the case, the first coder's
/// columns first. Opening a case gives each of them a placeholder entry if
/// it has none. Every change marks the
/// session dirty and publishes a
/// [`CaseChanged`](crate::SessionEvent::CaseChanged) event.
#[derive(Debug)]
pub struct CaseReview<'a> {
    session: &'a mut Session,
    case_id: String,
    question_ids: Vec<String>,
}

impl<'a> CaseReview<'a> {
    pub(crate) fn open(session: &'a mut Session, case_id: &str) -> Result<Self> {
        let coders = session
            .coders
            .case(case_id)
            .ok_or_else(|| ArbitrationError::Validation(format!("Case '{}' not found", case_id)))?;
        let question_ids: Vec<String> = coders
            .values()
            .flat_map(|answers| answers.keys())
            .collect::<IndexSet<_>>()
            .into_iter()
            .cloned()
            .collect();

        session.project.case_info_mut(case_id);
        session.arbitrator.ensure_questions(case_id, &question_ids);

        Ok(Self {
            session,
            case_id: case_id.to_string(),
            question_ids,
        })
    }

    /// Id of the open case.
    pub fn case_id(&self) -> &str {
        &self.case_id
    }

    /// Questions under review, in first-seen column order.
    pub fn question_ids(&self) -> &[String] {
        &self.question_ids
    }

    /// Display title of the case.
    pub fn title(&self) -> String {
        self.session.case_title(&self.case_id)
    }

    /// Names of the coders of this case, in import order.
    pub fn coder_names(&self) -> Vec<&str> {
        self.session
            .coders
            .case(&self.case_id)
            .map(|coders| coders.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Answers of the first coder.
    pub fn first_coder(&self) -> Option<&Answers> {
        self.coder_at(0)
    }

    /// Answers of the second coder, absent on single-coded cases.
    pub fn second_coder(&self) -> Option<&Answers> {
        self.coder_at(1)
    }

    fn coder_at(&self, index: usize) -> Option<&Answers> {
        self.session
            .coders
            .case(&self.case_id)
            .and_then(|coders| coders.get_index(index))
            .map(|(_, answers)| answers)
    }

    fn first_value(&self, question_id: &str) -> Option<&String> {
        self.first_coder().and_then(|a| a.get(question_id))
    }

    fn second_value(&self, question_id: &str) -> Option<&String> {
        self.second_coder().and_then(|a| a.get(question_id))
    }

    /// Current arbitration entry for a question.
    pub fn entry(&self, question_id: &str) -> Option<&ArbitrationEntry> {
        self.session
            .arbitrator
            .case(&self.case_id)
            .and_then(|case| case.get(question_id))
    }

    /// Check whether a question has a final value.
    pub fn is_arbitrated(&self, question_id: &str) -> bool {
        self.entry(question_id)
            .is_some_and(ArbitrationEntry::is_arbitrated)
    }

    /// Both coders gave exactly the same value.
    pub fn is_equivalent(&self, question_id: &str) -> bool {
        self.first_value(question_id) == self.second_value(question_id)
    }

    /// Both coders left the question empty.
    pub fn is_blank(&self, question_id: &str) -> bool {
        self.first_value(question_id).is_some_and(|v| v.is_empty())
            && self.second_value(question_id).is_some_and(|v| v.is_empty())
    }

    /// Percentage of questions arbitrated, rounded down. A case without
    /// questions counts as complete.
    pub fn progress(&self) -> usize {
        if self.question_ids.is_empty() {
            return 100;
        }
        let arbitrated = self
            .question_ids
            .iter()
            .filter(|q| self.is_arbitrated(q))
            .count();
        100 * arbitrated / self.question_ids.len()
    }

    /// Confirm the current value.
    pub fn enable(&mut self, question_id: &str) -> Result<()> {
        self.set_status(question_id, ArbitrationStatus::Arbitrated)
    }

    /// Reopen a question, keeping its value.
    pub fn disable(&mut self, question_id: &str) -> Result<()> {
        self.set_status(question_id, ArbitrationStatus::NotArbitrated)
    }

    /// Flip a question between confirmed and open.
    pub fn toggle(&mut self, question_id: &str) -> Result<()> {
        let status = self.entry_mut(question_id)?.status.toggled();
        self.set_status(question_id, status)
    }

    /// Take a coder's answer as the final value.
    pub fn accept_coder(&mut self, question_id: &str, coder: &str) -> Result<()> {
        let value = {
            let answers = self
                .session
                .coders
                .case(&self.case_id)
                .and_then(|coders| coders.get(coder))
                .ok_or_else(|| {
                    ArbitrationError::Validation(format!(
                        "Coder '{}' did not code case '{}'",
                        coder, self.case_id
                    ))
                })?;
            answers.get(question_id).cloned().unwrap_or_default()
        };

        let entry = self.entry_mut(question_id)?;
        entry.value = value;
        entry.status = ArbitrationStatus::Arbitrated;
        self.changed();
        Ok(())
    }

    /// Replace the value by hand. The question is reopened until confirmed.
    pub fn set_value(&mut self, question_id: &str, value: impl Into<String>) -> Result<()> {
        let entry = self.entry_mut(question_id)?;
        entry.value = value.into();
        entry.status = ArbitrationStatus::NotArbitrated;
        self.changed();
        Ok(())
    }

    /// Open questions on which both coders agree.
    pub fn questions_to_resolve(&self) -> Vec<String> {
        self.question_ids
            .iter()
            .filter(|q| !self.is_arbitrated(q) && self.is_equivalent(q))
            .cloned()
            .collect()
    }

    /// Check whether [`Self::auto_resolve`] would change anything.
    pub fn can_auto_resolve(&self) -> bool {
        !self.questions_to_resolve().is_empty()
    }

    /// Confirm the shared value of every open question the coders agree on.
    /// Returns how many questions were resolved.
    pub fn auto_resolve(&mut self) -> Result<usize> {
        let questions = self.questions_to_resolve();
        if questions.is_empty() {
            return Ok(0);
        }

        for question_id in &questions {
            let value = self.first_value(question_id).cloned().unwrap_or_default();
            let entry = self.entry_mut(question_id)?;
            entry.value = value;
            entry.status = ArbitrationStatus::Arbitrated;
        }
        self.changed();
        Ok(questions.len())
    }

    /// Notes and flag of the case.
    pub fn case_info(&self) -> CaseInfo {
        self.session
            .project
            .case_info
            .get(&self.case_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Advance the case flag, wrapping to unflagged.
    pub fn cycle_flag(&mut self) -> Flag {
        let info = self.session.project.case_info_mut(&self.case_id);
        info.flag = info.flag.next();
        let flag = info.flag;
        self.changed();
        flag
    }

    /// Replace the case notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.session.project.case_info_mut(&self.case_id).notes = notes.into();
        self.changed();
    }

    fn set_status(&mut self, question_id: &str, status: ArbitrationStatus) -> Result<()> {
        self.entry_mut(question_id)?.status = status;
        self.changed();
        Ok(())
    }

    fn entry_mut(&mut self, question_id: &str) -> Result<&mut ArbitrationEntry> {
        self.session
            .arbitrator
            .case_mut(&self.case_id)
            .get_mut(question_id)
            .ok_or_else(|| {
                ArbitrationError::Validation(format!(
                    "Question '{}' not found in case '{}'",
                    question_id, self.case_id
                ))
            })
    }

    fn changed(&mut self) {
        self.session.case_changed(&self.case_id);
    }
}
