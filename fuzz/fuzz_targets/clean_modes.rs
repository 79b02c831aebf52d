#![no_main]

use go_removelines::{CleanConfig, Mode, clean};
use libfuzzer_sys::fuzz_target;

// The first byte selects the mode, the rest is the source.
fuzz_target!(|data: &[u8]| {
    let Some((&bits, rest)) = data.split_first() else {
        return;
    };
    let rest = if rest.len() > 64 * 1024 {
        &rest[..64 * 1024]
    } else {
        rest
    };

    let source = String::from_utf8_lossy(rest);
    let mode = Mode::from_bits(bits);

    let Ok(partial) = clean(&source, &CleanConfig::from(mode)) else {
        return;
    };
    if mode.is_empty() {
        assert_eq!(partial, source, "an empty mode must not change anything");
    }

    // Cleaning the rest afterwards must land on the same result as cleaning everything at once.
    let full = clean(&source, &CleanConfig::default()).expect("source parsed once already");
    let combined = clean(&partial, &CleanConfig::default()).expect("cleaned output must still parse");
    assert_eq!(combined, full, "mode subsets do not commute with the full clean");
});
