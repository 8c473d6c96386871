//! Status command - list cases and arbitration progress.

use arbitrate::{CaseFilter, CaseSummary};
use colored::Colorize;

use super::{open_session, CommandResult};
use crate::cli::Inputs;

pub fn run(inputs: &Inputs, json_output: bool, all: bool) -> CommandResult {
    let session = open_session(inputs)?;
    let filter = if all { CaseFilter::all() } else { CaseFilter::new() };
    let summaries = session.filtered_summaries(&filter);

    let total = session.coders().len();
    let (double_coded, finished) = double_coded_progress(&session.case_summaries());

    if json_output {
        let status = serde_json::json!({
            "project": session.project().display_name(),
            "cases": {
                "total": total,
                "double_coded": double_coded,
                "fully_arbitrated": finished,
            },
            "mappings": session.normalization().sorted_map(),
            "conflicts": session.arbitrator().conflicts(),
            "listed": summaries,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Arbitration status for".cyan().bold(),
        session.project().display_name().white()
    );
    println!();

    println!(
        "Progress: {} {}/{} double-coded cases arbitrated",
        progress_bar(finished, double_coded, 30).cyan(),
        finished.to_string().white().bold(),
        double_coded
    );
    println!(
        "Cases: {} total, {} single-coded, {} question mappings",
        total,
        total - double_coded,
        session.normalization().len()
    );
    println!();

    if summaries.is_empty() {
        println!("{}", "No cases match.".dimmed());
        return Ok(());
    }

    println!("{}", "Cases:".yellow().bold());
    for summary in &summaries {
        println!("  {} {}", state_label(summary), summary.title);
    }

    if all && !session.normalization().is_empty() {
        println!();
        println!("{}", "Question mappings:".yellow().bold());
        for entry in session.normalization().sorted_map() {
            println!("  {} -> {}", entry.old_name, entry.new_name.white());
        }
    }

    Ok(())
}

/// Count double-coded cases and how many of them are fully arbitrated.
fn double_coded_progress(summaries: &[CaseSummary]) -> (usize, usize) {
    summaries
        .iter()
        .filter(|s| !s.is_single_coded())
        .fold((0, 0), |(cases, done), s| {
            (cases + 1, done + usize::from(s.fully_arbitrated))
        })
}

fn progress_bar(finished: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (width * finished / total).min(width)
    };
    "█".repeat(filled) + &"░".repeat(width - filled)
}

fn state_label(summary: &CaseSummary) -> String {
    let state = if summary.is_single_coded() {
        "single ".dimmed()
    } else if summary.fully_arbitrated {
        "done   ".green()
    } else if summary.partially_arbitrated {
        "partial".yellow()
    } else {
        "open   ".red()
    };

    if summary.flag.is_set() {
        format!("{} {}", state, format!("[flag {}]", summary.flag.value()).magenta())
    } else {
        format!("{} {:8}", state, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbitrate::Flag;

    fn summary(id: &str, coder_count: usize, fully_arbitrated: bool) -> CaseSummary {
        CaseSummary {
            id: id.to_string(),
            coder_count,
            fully_arbitrated,
            partially_arbitrated: fully_arbitrated,
            title: format!("Case {}", id),
            flag: Flag::default(),
        }
    }

    #[test]
    fn test_single_coded_cases_do_not_count_as_finished() {
        let summaries = vec![
            summary("1", 2, true),
            summary("2", 1, true),
            summary("3", 1, true),
        ];

        assert_eq!(double_coded_progress(&summaries), (1, 1));
    }

    #[test]
    fn test_progress_bar_stays_within_width() {
        assert_eq!(progress_bar(1, 2, 4), "██░░");
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
        assert_eq!(progress_bar(3, 1, 4), "████");
    }
}
