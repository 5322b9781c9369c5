use super::*;

#[test]
fn test_format_message_replaces_placeholders() {
    assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
    assert_eq!(
        format_message("{0} and {1} and {0}", &["a", "b"]),
        "a and b and a"
    );
    assert_eq!(format_message("no placeholders", &["x"]), "no placeholders");
}

#[test]
fn test_message_table_has_unique_codes() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    codes.sort_unstable();
    let before = codes.len();
    codes.dedup();
    assert_eq!(before, codes.len(), "duplicate diagnostic code in table");
}

#[test]
fn test_lookup_rewrite_messages() {
    let message = get_diagnostic_message(diagnostic_codes::WRONG_ARGUMENT_COUNT).unwrap();
    assert_eq!(message.category, DiagnosticCategory::Error);
    assert_eq!(
        format_message(message.message, &["idx"]),
        "The `idx` function takes exactly two arguments."
    );
    assert!(get_message_template(4242).is_none());
}

#[test]
fn test_diagnostic_from_message() {
    let diag = Diagnostic::from_message(
        "a.js".to_string(),
        4,
        3,
        &diagnostic_messages::ROOT_MISMATCH,
        &["CHAIN"],
    );
    assert!(diag.is_error());
    assert_eq!(diag.code, 9006);
    assert!(diag.message_text.contains("`CHAIN`"));
    assert!(diag.related_information.is_empty());

    let diag = diag.with_related("a.js".to_string(), 0, 3, "call site".to_string());
    assert_eq!(diag.related_information.len(), 1);
    assert_eq!(
        diag.related_information[0].category,
        DiagnosticCategory::Message
    );
}

#[test]
fn test_diagnostic_serializes_without_empty_related() {
    let diag = Diagnostic::error("a.js".to_string(), 0, 1, "boom".to_string(), 1004);
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["code"], 1004);
    assert_eq!(json["category"], "Error");
    assert!(json.get("related_information").is_none());
}
