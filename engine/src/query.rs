//! Query parsing: raw text into required ("plus") and excluded ("minus") words.

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};

const MINUS_MARKER: char = '-';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus_words: Vec<&'q str>,
    pub minus_words: Vec<&'q str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'q> {
    data: &'q str,
    is_minus: bool,
    is_stop: bool,
}

/// Whether parsed word lists are sorted and deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dedup {
    #[default]
    SortUnique,
    /// Keep input order and duplicates; callers must tolerate both.
    Keep,
}

fn parse_query_word<'q>(text: &'q str, stop_words: &StopWords) -> Result<QueryWord<'q>> {
    if text.is_empty() {
        return Err(SearchError::invalid("query word is empty"));
    }
    let (data, is_minus) = match text.strip_prefix(MINUS_MARKER) {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with(MINUS_MARKER) || !is_valid_word(data) {
        return Err(SearchError::invalid(format!("query word {text:?} is invalid")));
    }
    Ok(QueryWord { data, is_minus, is_stop: stop_words.contains(data) })
}

pub fn parse_query<'q>(text: &'q str, stop_words: &StopWords, dedup: Dedup) -> Result<Query<'q>> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word, stop_words)?;
        if word.is_stop {
            continue;
        }
        if word.is_minus {
            query.minus_words.push(word.data);
        } else {
            query.plus_words.push(word.data);
        }
    }
    if dedup == Dedup::SortUnique {
        for words in [&mut query.plus_words, &mut query.minus_words] {
            words.sort_unstable();
            words.dedup();
        }
    }
    Ok(query)
}
