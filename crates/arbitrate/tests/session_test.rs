//! Integration tests for a full arbitration session.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use arbitrate::store::{CASE_AVERAGE_HEADER, QUESTION_AVERAGE_LABEL};
use arbitrate::{
    ArbitrationError, ArbitrationStatus, CaseFilter, DataSource, ProjectMeta, Session,
    SessionEvent,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn project() -> ProjectMeta {
    ProjectMeta::new()
        .with_name("Elections")
        .with_case_id_key("Case")
        .with_coder_id_key("Coder")
        .with_invariant_headers(vec!["Q2 Country".to_string(), "Q3 Year".to_string()])
}

fn alice() -> NamedTempFile {
    create_test_file(
        "Case,Coder,Q2 Country,Q3 Year,Q10 Outcome,Q4_1 Violence\n\
         101,alice,Chile,1988,Yes,None\n\
         102,alice,Peru,1990,No,Some\n\
         103,alice,Bolivia,1993,Yes,None\n",
    )
}

fn bob() -> NamedTempFile {
    create_test_file(
        "Case,Coder,Q2 Country,Q3 Year,Q10 Outcome,Q4_1 Violence\n\
         101,bob,Chile,1988,Yes,None\n\
         102,bob,Peru,1990,Yes, Some \n",
    )
}

fn loaded_session() -> Session {
    let mut session = Session::new().with_project(project());
    session.import_coder_file(alice().path()).expect("import alice");
    session.import_coder_file(bob().path()).expect("import bob");
    session
}

// =============================================================================
// Import Tests
// =============================================================================

#[test]
fn test_import_two_coders() {
    let session = loaded_session();

    assert_eq!(session.coders().len(), 3);
    assert_eq!(session.coders().coder_count("101"), 2);
    assert_eq!(session.coders().coder_count("103"), 1);
    // Values are trimmed on import
    assert_eq!(
        session.coders().case("102").unwrap()["bob"]["Q4_1 Violence"],
        "Some"
    );
}

#[test]
fn test_import_missing_file() {
    let mut session = Session::new().with_project(project());
    let err = session.import_coder_file("/nonexistent/coder.csv").unwrap_err();
    assert!(matches!(err, ArbitrationError::Io { .. }));
}

// =============================================================================
// Case Summary Tests
// =============================================================================

#[test]
fn test_case_summaries() {
    let mut session = loaded_session();
    session.open_case("101").unwrap().auto_resolve().unwrap();

    let summaries = session.case_summaries();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].title, "Case 101 | Chile 1988");
    assert!(summaries[0].fully_arbitrated);
    assert!(!summaries[1].fully_arbitrated);
    assert!(!summaries[1].partially_arbitrated);

    let open: Vec<String> = session
        .filtered_summaries(&CaseFilter::new())
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(open, vec!["102"]);

    let peru: Vec<String> = session
        .filtered_summaries(&CaseFilter::all().with_text("Peru"))
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(peru, vec!["102"]);
}

// =============================================================================
// Arbitration Workflow Tests
// =============================================================================

#[test]
fn test_arbitrate_case_to_completion() {
    let mut session = loaded_session();
    {
        let mut review = session.open_case("102").unwrap();
        assert_eq!(review.auto_resolve().unwrap(), 4);
        assert_eq!(review.progress(), 80);

        review.accept_coder("Q10 Outcome", "bob").unwrap();
        assert_eq!(review.progress(), 100);
    }

    assert!(session.arbitrator().is_fully_arbitrated("102"));
    assert!(session.is_dirty());

    let rows = session.export_data(true);
    assert_eq!(
        rows[0],
        vec!["Case", "Q2 Country", "Q3 Year", "Q4_1 Violence", "Q10 Outcome"]
    );
    assert_eq!(rows[1], vec!["102", "Peru", "1990", "Some", "Yes"]);
}

#[test]
fn test_case_changes_are_published() {
    let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut session = loaded_session();
    let sink = std::rc::Rc::clone(&events);
    session.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    session.open_case("101").unwrap().cycle_flag();

    assert_eq!(
        events.borrow().as_slice(),
        [SessionEvent::CaseChanged {
            case_id: "101".to_string()
        }]
    );
}

// =============================================================================
// Normalization Tests
// =============================================================================

#[test]
fn test_rename_migrates_all_stores_and_reverses() {
    let mut session = loaded_session();
    session.open_case("101").unwrap().auto_resolve().unwrap();

    session.add_mapping("Q10 Outcome", "Q10_1 Outcome");

    assert_eq!(
        session.coders().case("101").unwrap()["alice"]["Q10_1 Outcome"],
        "Yes"
    );
    let entry = &session.arbitrator().case("101").unwrap()["Q10_1 Outcome"];
    assert_eq!(entry.value, "Yes");
    assert_eq!(entry.status, ArbitrationStatus::Arbitrated);

    session.remove_mapping("Q10 Outcome").unwrap();
    assert_eq!(
        session.arbitrator().case("101").unwrap()["Q10 Outcome"].value,
        "Yes"
    );
    assert!(
        !session.coders().case("101").unwrap()["bob"].contains_key("Q10_1 Outcome")
    );
}

#[test]
fn test_later_imports_are_normalized() {
    let mut session = Session::new().with_project(project());
    session.add_mapping("Q10 Result", "Q10 Outcome");
    session.import_coder_file(alice().path()).unwrap();

    let wave_two = create_test_file("Case,Coder,Q10 Result\n101,carol,No\n");
    session.import_coder_file(wave_two.path()).unwrap();

    assert_eq!(
        session.coders().case("101").unwrap()["carol"]["Q10 Outcome"],
        "No"
    );
}

#[test]
fn test_rename_conflict_reopens_question() {
    let mut session = Session::new().with_project(project());
    let arbitrated = create_test_file("Case,Q10 Result,Q10 Outcome\n101,No,Yes\n");
    session.import_arbitrator_file(arbitrated.path()).unwrap();

    session.add_mapping("Q10 Result", "Q10 Outcome");

    let case = session.arbitrator().case("101").unwrap();
    assert_eq!(case["Q10 Outcome"].value, "Yes");
    assert_eq!(case["Q10 Outcome"].status, ArbitrationStatus::NotArbitrated);
    assert!(!case.contains_key("Q10 Result"));

    let conflicts = session.arbitrator().conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].displaced_value, "No");
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_and_load_project() {
    let dir = TempDir::new().unwrap();
    let mut session = loaded_session();
    session.add_mapping("Q9 Old", "Q9 New");
    {
        let mut review = session.open_case("102").unwrap();
        review.auto_resolve().unwrap();
        review.set_value("Q10 Outcome", "Disputed").unwrap();
        review.set_notes("ask coders");
    }

    let path = session.save_to(dir.path()).unwrap();
    assert!(!session.is_dirty());
    let file_name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(file_name.starts_with("Elections_"));
    assert!(file_name.ends_with(".arb"));

    let mut restored = Session::new();
    restored.load(&path).unwrap();

    assert_eq!(restored.project().name, "Elections");
    assert_eq!(restored.project().case_info["102"].notes, "ask coders");
    assert_eq!(restored.normalization().canonical("Q9 Old"), Some("Q9 New"));
    assert_eq!(restored.arbitrator().cases(), session.arbitrator().cases());
    let entry = &restored.arbitrator().case("102").unwrap()["Q10 Outcome"];
    assert_eq!(entry.value, "Disputed");
    assert_eq!(entry.status, ArbitrationStatus::NotArbitrated);
    assert!(!restored.is_dirty());
}

#[test]
fn test_load_publishes_data_loaded() {
    let mut session = loaded_session();
    session.open_case("101").unwrap().auto_resolve().unwrap();
    let text = session.save_document().unwrap();

    let events = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let mut restored = Session::new();
    let sink = std::rc::Rc::clone(&events);
    restored.subscribe(move |e| sink.borrow_mut().push(e.clone()));
    restored.load_document(&text).unwrap();

    assert!(events.borrow().contains(&SessionEvent::DataLoaded {
        source: DataSource::Arbitrator
    }));
}

#[test]
fn test_load_invalid_project_file() {
    let file = create_test_file("not json");
    let mut session = Session::new();

    let err = session.load(file.path()).unwrap_err();
    assert!(matches!(err, ArbitrationError::Persistence(_)));
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_csv_file() {
    let dir = TempDir::new().unwrap();
    let mut session = loaded_session();
    session.open_case("101").unwrap().auto_resolve().unwrap();
    session.open_case("102").unwrap();

    let path = session.export_csv_to(dir.path(), true).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Case,Q2 Country,Q3 Year,Q4_1 Violence,Q10 Outcome",
            "101,Chile,1988,None,Yes"
        ]
    );
}

#[test]
fn test_export_reliability_file() {
    let dir = TempDir::new().unwrap();
    let session = loaded_session();

    let report = session.reliability().unwrap();
    assert_eq!(report.cases.len(), 2);
    assert_eq!(report.cases[0].average, 1.0);
    assert_eq!(report.cases[1].average, 0.8);

    let path = session.export_reliability_to(dir.path()).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("Reliability_Elections_"));

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with(CASE_AVERAGE_HEADER));
    assert!(lines[3].starts_with(QUESTION_AVERAGE_LABEL));
}

#[test]
fn test_reliability_without_double_coding() {
    let mut session = Session::new().with_project(project());
    session.import_coder_file(alice().path()).unwrap();

    let err = session.reliability().unwrap_err();
    assert!(matches!(err, ArbitrationError::InsufficientData(_)));
}
