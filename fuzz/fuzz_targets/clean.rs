#![no_main]

use go_removelines::{CleanConfig, clean_with_report};
use libfuzzer_sys::fuzz_target;

fn non_whitespace(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().filter(|c| !c.is_whitespace())
}

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 64 * 1024 {
        &data[..64 * 1024]
    } else {
        data
    };

    let source = String::from_utf8_lossy(data);
    let config = CleanConfig::default();

    // Most inputs are not Go; a syntax error is a valid outcome.
    let Ok(out) = clean_with_report(&source, &config) else {
        return;
    };

    assert!(
        non_whitespace(&out.code).eq(non_whitespace(&source)),
        "cleaning changed non-whitespace content"
    );
    assert_eq!(
        source.lines().count() - out.code.lines().count(),
        out.trims.len(),
        "every trim must remove exactly one line"
    );

    let again = clean_with_report(&out.code, &config).expect("cleaned output must still parse");
    assert!(!again.changed(), "cleaning is not idempotent");
});
