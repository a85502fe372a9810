use super::*;

#[test]
fn test_keys_round_trip_through_from_key() {
    for message in Message::ALL {
        assert_eq!(Message::from_key(message.key()), Some(message));
    }
}

#[test]
fn test_error_classification_follows_key() {
    assert!(!Message::AddSuccess.is_error());
    assert!(!Message::ImportSuccess.is_error());
    assert!(Message::AddErrorDuplicate.is_error());
    assert!(Message::ImportErrorParse.is_error());
    assert!(Message::ErrorStorage.is_error());
}

#[test]
fn test_unknown_key_falls_back() {
    assert_eq!(message_text("bogus"), UNKNOWN_MESSAGE);
    assert_eq!(message_text("add_success"), "Token added successfully.");
}

#[test]
fn test_redirect_path() {
    assert_eq!(
        AdminPage::ImportExport.redirect_path(Message::ImportSuccess),
        "admin.php?page=custom-tokens-import-export&message=import_success"
    );
    assert_eq!(
        AdminPage::Tokens.redirect_path(Message::AddErrorDuplicate),
        "admin.php?page=custom-tokens&message=add_error_duplicate"
    );
}

#[test]
fn test_display_uses_text() {
    assert_eq!(Message::RemoveSuccess.to_string(), "Token removed successfully.");
}
