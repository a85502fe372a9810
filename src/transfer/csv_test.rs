use super::*;
use crate::tokens::{to_tokens, TokenData};

fn tricky() -> TokenMap {
    let mut tokens = TokenMap::new();
    tokens.insert("PROMO".to_string(), TokenData::new("Promo, Code", "SAVE10"));
    tokens.insert(
        "QUOTE".to_string(),
        TokenData::new("Say \"hi\"", "He said \"no, thanks\""),
    );
    tokens.insert("EMPTY".to_string(), TokenData::new("Empty", ""));
    tokens
}

#[test]
fn test_export_format() {
    let mut tokens = TokenMap::new();
    tokens.insert("QUOTE".to_string(), TokenData::new("Say \"hi\"", "a,b"));

    assert_eq!(
        export_csv(&tokens).unwrap(),
        "name,label,value\n\"QUOTE\",\"Say \"\"hi\"\"\",\"a,b\"\n"
    );
}

#[test]
fn test_export_empty_store_is_header_only() {
    assert_eq!(export_csv(&TokenMap::new()).unwrap(), "name,label,value\n");
}

#[test]
fn test_round_trip_with_commas_and_quotes() {
    let tokens = tricky();
    let parsed = parse_csv(&export_csv(&tokens).unwrap()).unwrap();
    assert_eq!(parsed, to_tokens(&tokens));
}

#[test]
fn test_parse_without_header_and_crlf_lines() {
    let parsed = parse_csv("A,Ay,1\r\nB,Bee,2\r\n").unwrap();
    assert_eq!(parsed, vec![Token::new("A", "Ay", "1"), Token::new("B", "Bee", "2")]);
}

#[test]
fn test_header_detection_is_case_insensitive() {
    let parsed = parse_csv("Token Name,Label,Value\nA,Ay,1\n").unwrap();
    assert_eq!(parsed, vec![Token::new("A", "Ay", "1")]);
}

#[test]
fn test_short_and_nameless_rows_are_dropped() {
    let parsed = parse_csv("name,label,value\nONLYNAME\n,Label,v\nB,Bee\n").unwrap();
    assert_eq!(parsed, vec![Token::new("B", "Bee", "")]);
}

#[test]
fn test_parse_import_csv_carries_replace_flag() {
    let request = parse_import_csv("A,Ay,1\n", true).unwrap();
    assert!(request.replace_existing);
    assert_eq!(request.tokens, vec![Token::new("A", "Ay", "1")]);
}
