//! Inter-rater agreement across double-coded cases.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ArbitrationError, Result};
use crate::questions::sorted_keys;

use super::entry::CoderCase;

/// Header of the first column.
pub const CASE_ID_HEADER: &str = "Case Id";
/// Header of the per-case average column.
pub const CASE_AVERAGE_HEADER: &str = "Case Average";
/// Label of the trailing per-question average row.
pub const QUESTION_AVERAGE_LABEL: &str = "Question Average";

/// Match indicators for one double-coded case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseAgreement {
    pub case_id: String,
    /// `1` where both coders gave the same value, `0` otherwise, in
    /// [`ReliabilityReport::questions`] order.
    pub matches: Vec<u8>,
    /// Fraction of questions that matched.
    pub average: f64,
}

/// Agreement table for every double-coded case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityReport {
    /// Every question seen in the store, sorted.
    pub questions: Vec<String>,
    /// One entry per double-coded case, in store order.
    pub cases: Vec<CaseAgreement>,
    /// Per question, matches divided by the number of double-coded cases.
    pub question_averages: Vec<f64>,
}

impl ReliabilityReport {
    /// Compute agreement over all cases coded by exactly two coders.
    ///
    /// Fails with [`ArbitrationError::InsufficientData`] when no case is
    /// double-coded or no question exists, since every average would divide
    /// by zero.
    pub fn compute(cases: &IndexMap<String, CoderCase>) -> Result<Self> {
        let questions = sorted_keys(cases, 2);
        if questions.is_empty() {
            return Err(ArbitrationError::InsufficientData(
                "no questions to compare".to_string(),
            ));
        }

        let mut match_counts = vec![0usize; questions.len()];
        let mut agreements = Vec::new();

        for (case_id, coders) in cases {
            if coders.len() != 2 {
                continue;
            }
            let first = &coders[0];
            let second = &coders[1];

            let matches: Vec<u8> = questions
                .iter()
                .map(|q| u8::from(first.get(q) == second.get(q)))
                .collect();
            for (count, &m) in match_counts.iter_mut().zip(&matches) {
                *count += usize::from(m);
            }

            let matched: usize = matches.iter().map(|&m| usize::from(m)).sum();
            agreements.push(CaseAgreement {
                case_id: case_id.clone(),
                average: matched as f64 / questions.len() as f64,
                matches,
            });
        }

        if agreements.is_empty() {
            return Err(ArbitrationError::InsufficientData(
                "no double-coded cases".to_string(),
            ));
        }

        let double_coded = agreements.len() as f64;
        let question_averages = match_counts
            .iter()
            .map(|&count| count as f64 / double_coded)
            .collect();

        Ok(Self {
            questions,
            cases: agreements,
            question_averages,
        })
    }

    /// Mean of the per-case averages.
    pub fn overall_agreement(&self) -> f64 {
        let total: f64 = self.cases.iter().map(|c| c.average).sum();
        total / self.cases.len() as f64
    }

    /// Render as table rows: header, one row per case, then question averages.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut header = Vec::with_capacity(self.questions.len() + 2);
        header.push(CASE_ID_HEADER.to_string());
        header.extend(self.questions.iter().cloned());
        header.push(CASE_AVERAGE_HEADER.to_string());

        let mut rows = vec![header];
        for case in &self.cases {
            let mut row = Vec::with_capacity(case.matches.len() + 2);
            row.push(case.case_id.clone());
            row.extend(case.matches.iter().map(|m| m.to_string()));
            row.push(case.average.to_string());
            rows.push(row);
        }

        let mut averages = Vec::with_capacity(self.question_averages.len() + 1);
        averages.push(QUESTION_AVERAGE_LABEL.to_string());
        averages.extend(self.question_averages.iter().map(|a| a.to_string()));
        rows.push(averages);

        rows
    }
}
