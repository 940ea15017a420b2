//! Fuzz target for analysis request parsing and validation.
//!
//! Arbitrary bytes through the JSON parser and the arithmetic validator
//! must never panic, only return errors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vf_common::AnalysisRequest;
use vf_core::validate::validate;

fuzz_target!(|data: &[u8]| {
    if let Ok(request) = serde_json::from_slice::<AnalysisRequest>(data) {
        let _ = validate(&request);
    }
});
