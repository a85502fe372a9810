// Tests for the reconciliation engine
// Test cases:
// - add: success appends, duplicate in any casing rejected, validation failures
// - remove: exact-case only (asymmetric with add), empty/unknown names are no-ops
// - import: keep vs replace policies, same-batch collisions, invalid entries dropped
// - save values: whole-mapping replace with sanitizing

use super::*;

fn map(entries: &[(&str, &str, &str)]) -> TokenMap {
    entries
        .iter()
        .map(|(name, label, value)| (name.to_string(), TokenData::new(*label, *value)))
        .collect()
}

fn keys(tokens: &TokenMap) -> Vec<&str> {
    tokens.keys().map(String::as_str).collect()
}

fn import(tokens: Vec<Token>, replace_existing: bool) -> ImportRequest {
    ImportRequest {
        tokens,
        replace_existing,
    }
}

#[test]
fn test_add_to_empty_store() {
    let next = add_token(&TokenMap::new(), &Token::new("PROMO", "Promo Code", "SAVE10")).unwrap();

    assert_eq!(next, map(&[("PROMO", "Promo Code", "SAVE10")]));
}

#[test]
fn test_add_keeps_prior_entries_and_appends() {
    let current = map(&[("A", "Ay", "1"), ("B", "Bee", "2")]);

    let next = add_token(&current, &Token::new("C", "See", "3")).unwrap();

    assert_eq!(keys(&next), vec!["A", "B", "C"]);
    assert_eq!(next["A"], current["A"]);
    assert_eq!(next["B"], current["B"]);
    assert_eq!(next["C"], TokenData::new("See", "3"));
}

#[test]
fn test_add_rejects_duplicate_in_any_casing() {
    let current = map(&[("PROMO", "Promo Code", "SAVE10")]);

    assert_eq!(
        add_token(&current, &Token::new("promo", "x", "y")),
        Err(TokenError::Duplicate("promo".to_string()))
    );
    assert_eq!(
        add_token(&current, &Token::new("PROMO", "x", "y")),
        Err(TokenError::Duplicate("PROMO".to_string()))
    );
}

#[test]
fn test_add_foo_collides_with_existing_lowercase() {
    let current = map(&[("foo", "Foo", "1")]);

    let result = add_token(&current, &Token::new("Foo", "Other", "2"));

    assert!(matches!(result, Err(TokenError::Duplicate(_))));
}

#[test]
fn test_add_validation_failures() {
    let current = TokenMap::new();

    assert_eq!(
        add_token(&current, &Token::new("", "Label", "v")),
        Err(TokenError::EmptyName)
    );
    assert_eq!(
        add_token(&current, &Token::new("bad-name", "Label", "v")),
        Err(TokenError::InvalidName("bad-name".to_string()))
    );
    assert_eq!(
        add_token(&current, &Token::new("GOOD", "   ", "v")),
        Err(TokenError::EmptyLabel)
    );
}

#[test]
fn test_add_sanitizes_fields() {
    let next = add_token(
        &TokenMap::new(),
        &Token::new("  PRICE ", " <b>Price</b>\n", "\t$199/year "),
    )
    .unwrap();

    assert_eq!(next, map(&[("PRICE", "Price", "$199/year")]));
}

#[test]
fn test_add_allows_empty_value() {
    let next = add_token(&TokenMap::new(), &Token::new("BLANK", "Blank", "")).unwrap();
    assert_eq!(next["BLANK"].value, "");
}

#[test]
fn test_remove_exact_name() {
    let current = map(&[("A", "Ay", "1"), ("B", "Bee", "2"), ("C", "See", "3")]);

    let next = remove_token(&current, "B");

    assert_eq!(keys(&next), vec!["A", "C"]);
}

#[test]
fn test_remove_is_case_sensitive_unlike_add() {
    // add treats "promo" and "PROMO" as the same token; remove does not
    let current = map(&[("PROMO", "Promo Code", "SAVE10")]);

    let next = remove_token(&current, "promo");

    assert_eq!(next, current);
}

#[test]
fn test_remove_empty_name_is_noop() {
    let current = map(&[("A", "Ay", "1")]);
    assert_eq!(remove_token(&current, ""), current);
    assert_eq!(remove_token(&current, "  "), current);
}

#[test]
fn test_remove_is_idempotent() {
    let current = map(&[("A", "Ay", "1"), ("B", "Bee", "2")]);

    let once = remove_token(&current, "MISSING");
    let twice = remove_token(&once, "MISSING");
    assert_eq!(once, twice);
    assert_eq!(once, current);

    let once = remove_token(&current, "A");
    let twice = remove_token(&once, "A");
    assert_eq!(once, twice);
}

#[test]
fn test_import_adds_new_tokens_in_order() {
    let current = map(&[("A", "Ay", "1")]);
    let request = import(
        vec![Token::new("B", "Bee", "2"), Token::new("C", "See", "3")],
        false,
    );

    let outcome = import_tokens(&current, &request);

    assert_eq!(keys(&outcome.tokens), vec!["A", "B", "C"]);
    assert_eq!(outcome.summary.added, 2);
}

#[test]
fn test_import_keep_mode_leaves_existing_untouched() {
    let current = map(&[("PROMO", "Promo Code", "SAVE10")]);
    let request = import(vec![Token::new("promo", "New", "SAVE20")], false);

    let outcome = import_tokens(&current, &request);

    assert_eq!(outcome.tokens, current);
    assert_eq!(outcome.summary.skipped, 1);
}

#[test]
fn test_import_replace_adopts_imported_casing() {
    let current = map(&[("A", "Ay", "1"), ("PROMO", "Promo Code", "SAVE10"), ("Z", "Zed", "26")]);
    let request = import(vec![Token::new("Promo", "Promo", "SAVE20")], true);

    let outcome = import_tokens(&current, &request);

    assert!(!outcome.tokens.contains_key("PROMO"));
    assert_eq!(outcome.tokens["Promo"], TokenData::new("Promo", "SAVE20"));
    // The replaced token moves to the end
    assert_eq!(keys(&outcome.tokens), vec!["A", "Z", "Promo"]);
    assert_eq!(outcome.summary.replaced, 1);
}

#[test]
fn test_import_replace_only_touches_colliding_tokens() {
    let current = map(&[("A", "Ay", "1"), ("B", "Bee", "2")]);
    let request = import(vec![Token::new("b", "New Bee", "22")], true);

    let outcome = import_tokens(&current, &request);

    assert_eq!(outcome.tokens["A"], TokenData::new("Ay", "1"));
    assert_eq!(outcome.tokens["b"], TokenData::new("New Bee", "22"));
    assert_eq!(outcome.tokens.len(), 2);
}

#[test]
fn test_import_same_batch_duplicates_first_wins_when_keeping() {
    let request = import(
        vec![Token::new("Dup", "First", "1"), Token::new("DUP", "Second", "2")],
        false,
    );

    let outcome = import_tokens(&TokenMap::new(), &request);

    assert_eq!(outcome.tokens, map(&[("Dup", "First", "1")]));
    assert_eq!(outcome.summary.added, 1);
    assert_eq!(outcome.summary.skipped, 1);
}

#[test]
fn test_import_same_batch_duplicates_last_wins_when_replacing() {
    let current = map(&[("dup", "Stored", "0")]);
    let request = import(
        vec![Token::new("Dup", "First", "1"), Token::new("DUP", "Second", "2")],
        true,
    );

    let outcome = import_tokens(&current, &request);

    assert_eq!(outcome.tokens, map(&[("DUP", "Second", "2")]));
    assert_eq!(outcome.summary.replaced, 2);
}

#[test]
fn test_import_drops_invalid_entries_silently() {
    let request = import(
        vec![
            Token::new("ok", "Ok", "1"),
            Token::new("not ok", "Bad", "2"),
            Token::new("nolabel", "", "3"),
            Token::new("", "Nameless", "4"),
        ],
        false,
    );

    let outcome = import_tokens(&TokenMap::new(), &request);

    assert_eq!(outcome.tokens, map(&[("ok", "Ok", "1")]));
    assert_eq!(outcome.summary.invalid, 3);
}

#[test]
fn test_import_of_own_export_is_identity() {
    let current = map(&[("A", "Ay", "1"), ("b", "Bee", ""), ("C_3", "See, \"quoted\"", "x")]);
    let request = import(crate::tokens::to_tokens(&current), false);

    let outcome = import_tokens(&current, &request);

    assert_eq!(outcome.tokens, current);
    assert_eq!(outcome.summary.skipped, 3);
}

#[test]
fn test_import_empty_batch_is_identity() {
    let current = map(&[("A", "Ay", "1")]);
    let outcome = import_tokens(&current, &import(vec![], true));
    assert_eq!(outcome.tokens, current);
    assert_eq!(outcome.summary, ImportSummary::default());
}

#[test]
fn test_save_values_replaces_mapping() {
    let submitted = map(&[("A", "Ay", " edited "), ("B", "Bee", "2")]);

    let next = save_token_values(&submitted);

    assert_eq!(next, map(&[("A", "Ay", "edited"), ("B", "Bee", "2")]));
}

#[test]
fn test_save_values_drops_invalid_and_colliding_entries() {
    let submitted = map(&[
        ("A", "Ay", "1"),
        ("a", "Lower", "2"),
        ("bad name", "Bad", "3"),
        ("C", "", "4"),
    ]);

    let next = save_token_values(&submitted);

    assert_eq!(next, map(&[("A", "Ay", "1")]));
}
