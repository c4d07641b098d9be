//! Wordnik-backed dictionary.
//!
//! Two endpoints are used: `words.json/randomWord` to pick a secret and
//! `word.json/{word}/definitions` to check a guess, where a 404 means the word
//! is unknown.

use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::{ApiKey, WordnikConfig};
use crate::dictionary::{Attempt, Dictionary, DictionaryError, RetryPolicy};
use crate::{debug_log, info_log};

const INCLUDE_PARTS_OF_SPEECH: &[&str] = &[
    "noun",
    "adjective",
    "verb",
    "verb-intransitive",
    "verb-transitive",
    "adverb",
    "pronoun",
    "preposition",
    "past-participle",
];

const EXCLUDE_PARTS_OF_SPEECH: &[&str] = &[
    "family-name",
    "given-name",
    "noun-plural",
    "noun-posessive",
    "proper-noun",
    "proper-noun-plural",
    "proper-noun-posessive",
];

const SOURCE_DICTIONARIES: &str = "ahd-5,century,wiktionary,webster,wordnet";
const MIN_CORPUS_COUNT: &str = "10000";
const MIN_DICTIONARY_COUNT: &str = "20";

#[derive(Debug, Deserialize)]
struct RandomWordResponse {
    word: String,
}

/// How a response status should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Success,
    NotFound,
    Rejected,
    Transient,
}

fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        404 => StatusClass::NotFound,
        401 | 403 => StatusClass::Rejected,
        _ => StatusClass::Transient,
    }
}

/// Extract and validate the word from a `randomWord` body.
fn parse_random_word(body: &str, length: usize) -> Result<String, String> {
    let response: RandomWordResponse =
        serde_json::from_str(body).map_err(|e| format!("malformed response: {e}"))?;
    let word = response.word.trim().to_lowercase();
    if word.chars().count() != length {
        return Err(format!(
            "received '{word}' but asked for {length} letters"
        ));
    }
    Ok(word)
}

pub struct WordnikClient {
    client: Client,
    base_url: Url,
    api_key: ApiKey,
    retry: RetryPolicy,
}

impl std::fmt::Debug for WordnikClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordnikClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key)
            .field("retry", &self.retry)
            .finish()
    }
}

impl WordnikClient {
    pub fn new(config: &WordnikConfig) -> Result<Self, DictionaryError> {
        // Url::join drops the last segment unless the base ends in '/'
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)
            .map_err(|e| DictionaryError::InvalidRequest(format!("bad base URL '{base}': {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DictionaryError::InvalidRequest(format!("HTTP client: {e}")))?;

        info_log!("WordnikClient::new() - base URL {}", base_url);
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            retry: config.retry_policy(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DictionaryError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                DictionaryError::InvalidRequest(format!("cannot-be-a-base URL: {}", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn random_word_url(&self, length: usize) -> Result<Url, DictionaryError> {
        let mut url = self.endpoint(&["words.json", "randomWord"])?;
        let length = length.to_string();
        url.query_pairs_mut()
            .append_pair("hasDictionaryDef", "true")
            .append_pair("includePartOfSpeech", &INCLUDE_PARTS_OF_SPEECH.join(","))
            .append_pair("excludePartOfSpeech", &EXCLUDE_PARTS_OF_SPEECH.join(","))
            .append_pair("minCorpusCount", MIN_CORPUS_COUNT)
            .append_pair("maxCorpusCount", "-1")
            .append_pair("minDictionaryCount", MIN_DICTIONARY_COUNT)
            .append_pair("maxDictionaryCount", "-1")
            .append_pair("minLength", &length)
            .append_pair("maxLength", &length)
            .append_pair("api_key", self.api_key.expose());
        Ok(url)
    }

    fn definitions_url(&self, word: &str) -> Result<Url, DictionaryError> {
        let mut url = self.endpoint(&["word.json", word, "definitions"])?;
        url.query_pairs_mut()
            .append_pair("limit", "200")
            .append_pair("includeRelated", "false")
            .append_pair("sourceDictionaries", SOURCE_DICTIONARIES)
            .append_pair("useCanonical", "false")
            .append_pair("includeTags", "false")
            .append_pair("api_key", self.api_key.expose());
        Ok(url)
    }

    /// Issue one GET, returning the status and body.
    fn get(&self, url: &Url) -> Result<(u16, String), String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| format!("request failed: {}", e.without_url()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| format!("failed to read body: {}", e.without_url()))?;
        Ok((status, body))
    }
}

impl Dictionary for WordnikClient {
    fn fetch_random_word(&self, length: usize) -> Result<String, DictionaryError> {
        let url = self.random_word_url(length)?;
        self.retry.run("random word", |attempt| {
            debug_log!("fetch_random_word() - attempt {} for length {}", attempt, length);
            let (status, body) = match self.get(&url) {
                Ok(reply) => reply,
                Err(reason) => return Attempt::Retry(reason),
            };
            match classify_status(status) {
                StatusClass::Success => match parse_random_word(&body, length) {
                    Ok(word) => Attempt::Done(word),
                    Err(reason) => Attempt::Retry(reason),
                },
                StatusClass::Rejected => Attempt::Fail(DictionaryError::Rejected { status }),
                StatusClass::NotFound | StatusClass::Transient => {
                    Attempt::Retry(format!("HTTP {status}"))
                }
            }
        })
    }

    fn word_exists(&self, candidate: &str) -> Result<bool, DictionaryError> {
        let url = self.definitions_url(candidate)?;
        self.retry.run("word lookup", |attempt| {
            debug_log!("word_exists() - attempt {} for '{}'", attempt, candidate);
            let status = match self.get(&url) {
                Ok((status, _)) => status,
                Err(reason) => return Attempt::Retry(reason),
            };
            match classify_status(status) {
                StatusClass::Success => Attempt::Done(true),
                StatusClass::NotFound => Attempt::Done(false),
                StatusClass::Rejected => Attempt::Fail(DictionaryError::Rejected { status }),
                StatusClass::Transient => Attempt::Retry(format!("HTTP {status}")),
            }
        })
    }
}
