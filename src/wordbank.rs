use crate::dictionary::{Dictionary, DictionaryError};
use rand::seq::IteratorRandom;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(word)
    } else {
        None
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DictionaryError> {
    let path = path.as_ref();
    let io_error = |source| DictionaryError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line.map_err(io_error)?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// An offline dictionary backed by a word list.
///
/// Entries are lowercased; lines with anything other than ASCII letters
/// (proper-noun apostrophes, hyphenated compounds) are skipped.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        let mut index = HashSet::with_capacity(words.len());
        let mut unique = Vec::with_capacity(words.len());
        for word in words.into_iter().filter_map(|w| normalize(&w)) {
            if index.insert(word.clone()) {
                unique.push(word);
            }
        }
        Self {
            words: unique,
            index,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        Ok(Self::new(load_wordbank_from_file(path)?))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn fetch_random_word(&self, length: usize) -> Result<String, DictionaryError> {
        self.words
            .iter()
            .filter(|w| w.chars().count() == length)
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(DictionaryError::NoWordOfLength { length })
    }

    fn word_exists(&self, candidate: &str) -> Result<bool, DictionaryError> {
        Ok(self.index.contains(&candidate.to_lowercase()))
    }
}
