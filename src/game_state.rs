use crate::clues::{ClueResult, compute_clues};
use crate::dictionary::{Dictionary, DictionaryError};
use crate::{debug_log, info_log};

/// What the player did at a guess prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// Input closed or the player asked to leave
    Exit,
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Won { attempts: usize },
    OutOfGuesses { secret: String },
    Abandoned,
}

/// Totals for a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub rounds_played: usize,
    pub rounds_won: usize,
}

/// The front end the game talks to.
///
/// Implemented by the line-oriented CLI and the full-screen TUI.
pub trait GameInterface {
    fn display_intro(&mut self, word_length: usize);
    fn display_round_start(&mut self, max_guesses: usize);
    fn read_guess(&mut self, attempt: usize) -> UserAction;
    fn display_length_reminder(&mut self, word_length: usize);
    fn display_unrecognized_word(&mut self, guess: &str);
    fn display_clues(&mut self, guess: &str, clues: &ClueResult);
    fn display_out_of_guesses(&mut self, secret: &str);
    fn confirm_play_again(&mut self) -> bool;
    fn display_farewell(&mut self);
}

/// Whether a play-again answer means yes.
pub fn is_affirmative(answer: &str) -> bool {
    answer
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}

/// Trim and lowercase raw guess input.
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_lowercase()
}

enum Validation {
    Accepted(String),
    Rejected,
    Exit,
}

/// One game configuration: word length and guesses per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSession {
    word_length: usize,
    max_guesses: usize,
}

impl GameSession {
    pub fn new(word_length: usize, max_guesses: usize) -> Self {
        Self {
            word_length,
            max_guesses,
        }
    }

    /// Play rounds until the player declines another one.
    pub fn run_session<D, I>(
        &self,
        dictionary: &D,
        interface: &mut I,
    ) -> Result<SessionSummary, DictionaryError>
    where
        D: Dictionary + ?Sized,
        I: GameInterface + ?Sized,
    {
        interface.display_intro(self.word_length);
        let mut summary = SessionSummary::default();

        loop {
            let outcome = self.run_round(dictionary, interface)?;
            if outcome == RoundOutcome::Abandoned {
                info_log!("run_session() - round abandoned");
                break;
            }
            summary.rounds_played += 1;
            if matches!(outcome, RoundOutcome::Won { .. }) {
                summary.rounds_won += 1;
            }
            if !interface.confirm_play_again() {
                break;
            }
        }

        interface.display_farewell();
        log::info!(
            "Session over: {} round(s) played, {} won",
            summary.rounds_played,
            summary.rounds_won
        );
        Ok(summary)
    }

    /// Fetch a secret word and play one round with it.
    pub fn run_round<D, I>(
        &self,
        dictionary: &D,
        interface: &mut I,
    ) -> Result<RoundOutcome, DictionaryError>
    where
        D: Dictionary + ?Sized,
        I: GameInterface + ?Sized,
    {
        let secret = dictionary.fetch_random_word(self.word_length)?.to_lowercase();
        debug_log!("run_round() - secret has {} letters", secret.chars().count());
        interface.display_round_start(self.max_guesses);
        self.guess_loop(&secret, dictionary, interface)
    }

    /// Prompt for guesses against `secret` until a win or the guesses run out.
    ///
    /// Guesses of the wrong length or unknown to the dictionary are re-prompted
    /// without using up an attempt.
    pub fn guess_loop<D, I>(
        &self,
        secret: &str,
        dictionary: &D,
        interface: &mut I,
    ) -> Result<RoundOutcome, DictionaryError>
    where
        D: Dictionary + ?Sized,
        I: GameInterface + ?Sized,
    {
        let mut attempt = 1;
        while attempt <= self.max_guesses {
            let guess = match self.read_valid_guess(attempt, dictionary, interface)? {
                Validation::Accepted(guess) => guess,
                Validation::Rejected => continue,
                Validation::Exit => return Ok(RoundOutcome::Abandoned),
            };

            let clues = compute_clues(&guess, secret);
            interface.display_clues(&guess, &clues);
            info_log!("guess_loop() - guess #{} scored: {}", attempt, clues);

            if guess == secret {
                return Ok(RoundOutcome::Won { attempts: attempt });
            }
            attempt += 1;
        }

        interface.display_out_of_guesses(secret);
        Ok(RoundOutcome::OutOfGuesses {
            secret: secret.to_string(),
        })
    }

    fn read_valid_guess<D, I>(
        &self,
        attempt: usize,
        dictionary: &D,
        interface: &mut I,
    ) -> Result<Validation, DictionaryError>
    where
        D: Dictionary + ?Sized,
        I: GameInterface + ?Sized,
    {
        let guess = match interface.read_guess(attempt) {
            UserAction::Guess(raw) => normalize_guess(&raw),
            UserAction::Exit => return Ok(Validation::Exit),
        };

        if guess.chars().count() != self.word_length {
            interface.display_length_reminder(self.word_length);
            return Ok(Validation::Rejected);
        }
        if !dictionary.word_exists(&guess)? {
            interface.display_unrecognized_word(&guess);
            return Ok(Validation::Rejected);
        }
        Ok(Validation::Accepted(guess))
    }
}
