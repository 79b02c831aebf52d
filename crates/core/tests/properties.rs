//! Properties that must hold for every input and mode.

use std::path::PathBuf;

use go_removelines::{Category, CleanConfig, Mode, clean, clean_with_report};

fn fixture_inputs() -> Vec<(String, String)> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures");
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).expect("read fixtures dir") {
        let path = entry.expect("dir entry").path();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if name.ends_with(".go") && !name.contains(".out.") {
            let source = std::fs::read_to_string(&path).expect("read fixture");
            inputs.push((name, source));
        }
    }
    inputs.sort();
    assert!(!inputs.is_empty());
    inputs
}

/// Every single-category mode plus the empty and full modes.
fn modes() -> Vec<Mode> {
    let mut modes = vec![Mode::empty(), Mode::ALL];
    modes.extend(Category::ALL.into_iter().map(Mode::from));
    modes.push(Mode::SWITCH | Mode::CASE);
    modes
}

fn non_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn clean_is_idempotent() {
    for (name, source) in fixture_inputs() {
        for mode in modes() {
            let config = CleanConfig::from(mode);
            let once = clean(&source, &config).unwrap();
            let twice = clean(&once, &config).unwrap();
            assert_eq!(twice, once, "{name} under {mode}");
        }
    }
}

#[test]
fn clean_preserves_non_whitespace_content() {
    for (name, source) in fixture_inputs() {
        for mode in modes() {
            let out = clean(&source, &CleanConfig::from(mode)).unwrap();
            assert_eq!(
                non_whitespace(&out),
                non_whitespace(&source),
                "{name} under {mode}"
            );
        }
    }
}

#[test]
fn clean_never_adds_lines() {
    for (name, source) in fixture_inputs() {
        for mode in modes() {
            let out = clean(&source, &CleanConfig::from(mode)).unwrap();
            assert!(out.lines().count() <= source.lines().count(), "{name} under {mode}");
            assert_eq!(
                out.lines().count() == source.lines().count(),
                out == source,
                "{name} under {mode}"
            );
        }
    }
}

#[test]
fn empty_mode_is_identity() {
    for (name, source) in fixture_inputs() {
        let out = clean(&source, &CleanConfig::from(Mode::empty())).unwrap();
        assert_eq!(out, source, "{name}");
    }
}

#[test]
fn only_removes_blank_lines() {
    for (name, source) in fixture_inputs() {
        let out = clean(&source, &CleanConfig::default()).unwrap();
        let kept: Vec<&str> = source.lines().filter(|l| !l.trim().is_empty()).collect();
        let out_kept: Vec<&str> = out.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(out_kept, kept, "{name}");
    }
}

#[test]
fn single_modes_do_no_more_than_all() {
    for (name, source) in fixture_inputs() {
        let all = clean(&source, &CleanConfig::default()).unwrap().lines().count();
        for category in Category::ALL {
            let out = clean(&source, &CleanConfig::from(Mode::from(category))).unwrap();
            assert!(out.lines().count() >= all, "{name} under {category}");
        }
    }
}

#[test]
fn trims_only_come_from_enabled_categories() {
    for (name, source) in fixture_inputs() {
        for category in Category::ALL {
            let out = clean_with_report(&source, &CleanConfig::from(Mode::from(category))).unwrap();
            for trim in &out.trims {
                assert_eq!(trim.category, category, "{name}: trim at line {}", trim.line);
            }
        }

        let out = clean_with_report(&source, &CleanConfig::from(Mode::SWITCH | Mode::CASE)).unwrap();
        assert!(
            out.trims
                .iter()
                .all(|t| matches!(t.category, Category::Switch | Category::Case)),
            "{name}"
        );
    }
}

#[test]
fn case_and_switch_modes_trim_different_lines() {
    let (_, source) = fixture_inputs()
        .into_iter()
        .find(|(name, _)| name == "case_only.go")
        .expect("case_only.go fixture");

    let case = clean_with_report(&source, &CleanConfig::from(Mode::CASE)).unwrap();
    assert_eq!(case.count(Category::Case), 6);

    let switch = clean_with_report(&source, &CleanConfig::from(Mode::SWITCH)).unwrap();
    assert_eq!(switch.count(Category::Case), 0);
    assert!(switch.count(Category::Switch) > 0);

    // The blank line right after `switch x {` belongs to the switch, not to the first clause.
    assert!(case.code.contains("switch x {\n\n\tcase 1:"));
    assert!(!switch.code.contains("switch x {\n\n\tcase 1:"));
}

#[test]
fn end_to_end_function_scenario() {
    let input = "package p\n\nfunc f() int {\n\n    return 1\n\n}\n";
    let want = "package p\n\nfunc f() int {\n    return 1\n}\n";

    assert_eq!(clean(input, &CleanConfig::from(Mode::FUNC)).unwrap(), want);
    assert_eq!(clean(input, &CleanConfig::from(Mode::empty())).unwrap(), input);
}

#[test]
fn case_mode_keeps_gap_between_clauses() {
    let input = "package p\n\nfunc f(x int) {\n\tswitch x {\n\tcase 1:\n\t\ta()\n\n\tcase 2:\n\t\tb()\n\n\t}\n}\n";
    let want = "package p\n\nfunc f(x int) {\n\tswitch x {\n\tcase 1:\n\t\ta()\n\n\tcase 2:\n\t\tb()\n\t}\n}\n";
    assert_eq!(clean(input, &CleanConfig::from(Mode::CASE)).unwrap(), want);
}
