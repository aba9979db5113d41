use rotorcrack::alphabet;
use rotorcrack::error::CrackError;
use rotorcrack::scorer::loader::{load_trigrams, load_trigrams_from_file};
use rotorcrack::scorer::trigram_score;
use rstest::rstest;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

#[test]
fn test_loader_parses_valid_corpus() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "THE 300").unwrap();
    writeln!(file, "AND 200").unwrap();
    writeln!(file, "ING 100").unwrap();

    let t = load_trigrams_from_file(file.path()).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(trigram_score(&alphabet::sanitize("THEAND"), &t), 500);
}

#[test]
fn test_loader_tolerates_crlf_and_blank_lines() {
    let data = "THE 300\r\n\r\nAND 200\r\n   \nING 100";
    let t = load_trigrams(Cursor::new(data)).unwrap();
    assert_eq!(t.len(), 3);
    let ing = alphabet::parse_letters("ING").unwrap();
    assert_eq!(t.get([ing[0], ing[1], ing[2]]), Some(100));
}

#[test]
fn test_loader_accepts_lowercase_keys() {
    let t = load_trigrams(Cursor::new("the 7\n")).unwrap();
    assert_eq!(trigram_score(&alphabet::sanitize("THE"), &t), 7);
}

#[test]
fn test_empty_corpus_gives_empty_table() {
    let t = load_trigrams(Cursor::new("")).unwrap();
    assert!(t.is_empty());
}

#[rstest]
#[case::top_bit_set("9223372036854775808")]
#[case::max("18446744073709551615")]
fn test_loader_keeps_full_width_counts(#[case] count: &str) {
    let t = load_trigrams(Cursor::new(format!("THE {}\n", count))).unwrap();
    let the = alphabet::parse_letters("THE").unwrap();
    assert_eq!(t.get([the[0], the[1], the[2]]), Some(count.parse().unwrap()));
}

#[test]
fn test_score_saturates_on_huge_counts() {
    let t = load_trigrams(Cursor::new("THE 18446744073709551615\nHET 5\n")).unwrap();
    assert_eq!(trigram_score(&alphabet::sanitize("THETHE"), &t), u64::MAX);
}

#[rstest]
#[case::missing_separator("THE 3\nAND200\n", 2)]
#[case::short_key("TH 3\n", 1)]
#[case::long_key("THEN 3\n", 1)]
#[case::non_letter_key("TH3 3\n", 1)]
#[case::non_integer_count("THE 3\nAND many\n", 2)]
#[case::negative_count("THE -3\n", 1)]
#[case::extra_field("THE 3 4\n", 1)]
#[case::count_overflows_u64("THE 18446744073709551616\n", 1)]
fn test_malformed_line_is_fatal_and_named(#[case] data: &str, #[case] line: u64) {
    match load_trigrams(Cursor::new(data)) {
        Err(CrackError::Corpus { line: l, .. }) => assert_eq!(l, line),
        other => panic!("expected corpus error on line {}, got {:?}", line, other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_trigrams_from_file(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, CrackError::Io(_)));
}

#[test]
fn test_shipped_corpus_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/english_trigrams.txt");
    let t = load_trigrams_from_file(path).unwrap();
    assert!(t.len() >= 100);
    let the = alphabet::parse_letters("THE").unwrap();
    assert!(t.get([the[0], the[1], the[2]]).unwrap() > 0);
}
