#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    needle: &'a str,
    haystack: &'a str,
    threshold: f32,
}

fuzz_target!(|input: Input<'_>| {
    // Matching never fails on arbitrary text and every kept window meets the threshold
    let matches = cgrep::query::find_scored_matches(input.needle, input.haystack, input.threshold)
        .expect("bigram domain is fixed");
    for window in matches {
        assert!(window.score >= input.threshold);
        assert!((0.0..=1.0).contains(&window.score));
    }
});
