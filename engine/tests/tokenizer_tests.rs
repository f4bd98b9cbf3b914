use search_engine::tokenizer::{is_valid_word, split_into_words, split_into_words_no_stop, StopWords};
use search_engine::SearchError;

#[test]
fn it_splits_on_single_spaces_only() {
    let words: Vec<&str> = split_into_words("Running  Runners\tRUN! café's").collect();
    // Tabs are not delimiters and case is kept as written
    assert_eq!(words, vec!["Running", "Runners\tRUN!", "café's"]);
    assert_eq!(split_into_words("").count(), 0);
    assert_eq!(split_into_words("    ").count(), 0);
}

#[test]
fn it_filters_stopwords() {
    let stop = StopWords::from_text("the and").unwrap();
    let words = split_into_words_no_stop("The quick brown fox and the lazy dog", &stop).unwrap();
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"and"));
    // Matching is exact, so the capitalised form survives
    assert!(words.contains(&"The"));
}

#[test]
fn it_rejects_control_characters() {
    assert!(is_valid_word("plain-word"));
    assert!(is_valid_word("ümlaut"));
    assert!(!is_valid_word("tab\there"));
    let stop = StopWords::default();
    assert!(matches!(split_into_words_no_stop("fine bad\u{1b}word", &stop), Err(SearchError::InvalidArgument(_))));
}
