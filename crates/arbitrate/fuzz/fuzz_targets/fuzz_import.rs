//! Fuzz target for coder and arbitrator imports.
//!
//! Imports must never panic, and a rejected import must leave the session
//! untouched.

#![no_main]

use arbitrate::{ProjectMeta, Session};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut session = Session::new().with_project(
        ProjectMeta::new()
            .with_case_id_key("Case")
            .with_coder_id_key("Coder"),
    );

    if session.import_coder_data(text).is_err() {
        assert!(session.coders().is_empty());
    }
    let _ = session.import_arbitrator_data(text);
    let _ = session.reliability();
    let _ = session.export_data(false);
});
