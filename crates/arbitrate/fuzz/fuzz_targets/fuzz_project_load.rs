//! Fuzz target for project documents.
//!
//! Loading arbitrary JSON must fail cleanly or produce a session that saves
//! again.

#![no_main]

use arbitrate::Session;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut session = Session::new();
    if session.load_document(text).is_ok() {
        assert!(session.save_document().is_ok());
    }
});
