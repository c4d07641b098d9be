// Library interface for bagels-with-words
// This allows integration tests to access internal modules

pub mod cli;
pub mod clues;
pub mod config;
pub mod dictionary;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordbank;
pub mod wordnik;

// Re-export commonly used items for easier testing
pub use clues::{Clue, ClueResult, compute_clues};
pub use config::{Config, ConfigError};
pub use dictionary::{Dictionary, DictionaryError, RetryPolicy};
pub use game_state::{GameInterface, GameSession, RoundOutcome, SessionSummary, UserAction};
pub use wordbank::{WordList, load_wordbank_from_file, load_wordbank_from_str};
pub use wordnik::WordnikClient;
