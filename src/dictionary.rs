//! The dictionary boundary used by the game.
//!
//! A [`Dictionary`] supplies secret words and answers whether a guess is a
//! real word. Remote lookups run under a [`RetryPolicy`] so a flaky service
//! surfaces as [`DictionaryError::Unavailable`] instead of hanging the game.

use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to a dictionary.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Dictionary unavailable after {attempts} attempt(s): {reason}")]
    Unavailable { attempts: u32, reason: String },

    #[error("Dictionary rejected the request (HTTP {status}); check the API key")]
    Rejected { status: u16 },

    #[error("No {length}-letter words in the dictionary")]
    NoWordOfLength { length: usize },

    #[error("Invalid dictionary request: {0}")]
    InvalidRequest(String),

    #[error("Failed to read word list '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of secret words and arbiter of which guesses are real words.
pub trait Dictionary {
    /// Return a random lowercase word of exactly `length` letters.
    fn fetch_random_word(&self, length: usize) -> Result<String, DictionaryError>;

    /// Whether `candidate` is a recognized word. "Not found" is `Ok(false)`.
    fn word_exists(&self, candidate: &str) -> Result<bool, DictionaryError>;
}

impl<D: Dictionary + ?Sized> Dictionary for Box<D> {
    fn fetch_random_word(&self, length: usize) -> Result<String, DictionaryError> {
        (**self).fetch_random_word(length)
    }

    fn word_exists(&self, candidate: &str) -> Result<bool, DictionaryError> {
        (**self).word_exists(candidate)
    }
}

/// Result of a single lookup attempt.
#[derive(Debug)]
pub enum Attempt<T> {
    /// A definitive answer
    Done(T),
    /// A transient failure worth trying again
    Retry(String),
    /// A failure that retrying cannot fix
    Fail(DictionaryError),
}

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Total attempts made before giving up, always at least 1.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after the first failed attempt.
    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Delay before the attempt following `attempt` (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(factor)
    }

    /// Run `op` until it yields a definitive answer or attempts run out.
    ///
    /// `op` receives the 1-based attempt number.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, DictionaryError>
    where
        F: FnMut(u32) -> Attempt<T>,
    {
        let mut last_reason = String::from("no attempt made");
        for attempt in 1..=self.max_attempts {
            match op(attempt) {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(err) => return Err(err),
                Attempt::Retry(reason) => {
                    log::warn!(
                        "{what}: attempt {attempt}/{} failed: {reason}",
                        self.max_attempts
                    );
                    last_reason = reason;
                    if attempt < self.max_attempts {
                        thread::sleep(self.delay_after(attempt));
                    }
                }
            }
        }
        Err(DictionaryError::Unavailable {
            attempts: self.max_attempts,
            reason: last_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_retry_returns_first_success() {
        let mut calls = 0;
        let result = instant(5).run("lookup", |attempt| {
            calls += 1;
            if attempt < 3 {
                Attempt::Retry(format!("HTTP 503 on attempt {attempt}"))
            } else {
                Attempt::Done("crane")
            }
        });
        assert_eq!(result.unwrap(), "crane");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_retry_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: Result<(), _> = instant(3).run("lookup", |_| {
            calls += 1;
            Attempt::Retry("connection refused".to_string())
        });
        assert_eq!(calls, 3);
        match result {
            Err(DictionaryError::Unavailable { attempts, reason }) => {
                assert_eq!(attempts, 3);
                assert_eq!(reason, "connection refused");
            }
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_fail_stops_immediately() {
        let mut calls = 0;
        let result: Result<(), _> = instant(5).run("lookup", |_| {
            calls += 1;
            Attempt::Fail(DictionaryError::Rejected { status: 401 })
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(DictionaryError::Rejected { status: 401 })));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::new(0, Duration::ZERO);
        assert_eq!(policy.max_attempts(), 1);

        let mut calls = 0;
        let result: Result<(), _> = policy.run("lookup", |_| {
            calls += 1;
            Attempt::Retry("HTTP 503".to_string())
        });
        assert_eq!(calls, 1);
        assert!(matches!(
            result,
            Err(DictionaryError::Unavailable { attempts: 1, .. })
        ));
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_after(1), Duration::from_millis(100));
        assert_eq!(policy.delay_after(2), Duration::from_millis(200));
        assert_eq!(policy.delay_after(3), Duration::from_millis(400));
    }
}
