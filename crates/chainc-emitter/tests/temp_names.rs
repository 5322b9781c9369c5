use super::*;
use std::collections::HashSet;

#[test]
fn fresh_names_count_up_from_bare_hint() {
    let generator = UniqueNameGenerator::new();
    assert_eq!(generator.fresh("ref"), "_ref");
    assert_eq!(generator.fresh("ref"), "_ref2");
    assert_eq!(generator.fresh("ref"), "_ref3");
}

#[test]
fn reserved_identifiers_are_skipped() {
    let generator = UniqueNameGenerator::with_reserved(["_ref", "_ref3"]);
    assert_eq!(generator.fresh("ref"), "_ref2");
    assert_eq!(generator.fresh("ref"), "_ref4");
    assert!(generator.is_reserved("_ref4"));
}

#[test]
fn hints_are_sanitized() {
    assert_eq!(sanitize_hint("ref"), "ref");
    assert_eq!(sanitize_hint("__ref12"), "ref");
    assert_eq!(sanitize_hint("my-temp"), "mytemp");
    assert_eq!(sanitize_hint(""), "ref");
    assert_eq!(sanitize_hint("___"), "ref");
    assert_eq!(sanitize_hint("42"), "ref");
}

#[test]
fn different_hints_have_independent_counters() {
    let generator = UniqueNameGenerator::new();
    assert_eq!(generator.fresh("ref"), "_ref");
    assert_eq!(generator.fresh("tmp"), "_tmp");
    assert_eq!(generator.fresh("ref"), "_ref2");
    assert_eq!(generator.fresh("_ref"), "_ref3");
}

#[test]
fn concurrent_callers_never_share_a_name() {
    let generator = UniqueNameGenerator::with_reserved(["_ref5", "_ref17"]);
    let names: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| (0..50).map(|_| generator.fresh("ref")).collect::<Vec<_>>()))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });

    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(names.len(), 400);
    assert_eq!(unique.len(), 400);
    assert!(!unique.contains(&"_ref5".to_string()));
    assert!(!unique.contains(&"_ref17".to_string()));
}
