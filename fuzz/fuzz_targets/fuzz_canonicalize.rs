#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Canonical text must be a fixed point and must only produce in-domain bigrams
    let once = cgrep::utils::canonicalize(data);
    assert_eq!(cgrep::utils::canonicalize(&once), once);
    let text = cgrep::utils::CanonicalText::new(data);
    assert!(cgrep::utils::bigrams_of(&text).is_ok());
});
