use std::collections::HashMap;
use std::fmt;

/// Feedback for a single letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clue {
    /// Correct letter in the correct position
    Fermi,
    /// Correct letter in the wrong position
    Pico,
    /// Letter not in the secret word (or every copy already credited)
    Bruno,
}

impl Clue {
    pub fn as_str(self) -> &'static str {
        match self {
            Clue::Fermi => "Fermi",
            Clue::Pico => "Pico",
            Clue::Bruno => "Bruno",
        }
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of scoring one guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClueResult {
    /// The guess is the secret word
    AllCorrect,
    /// No letter of the guess is in the secret word
    NoneCorrect,
    /// Per-position labels, one per letter
    Clues(Vec<Clue>),
}

impl ClueResult {
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, ClueResult::AllCorrect)
    }

    /// Per-position labels for a word of `length` letters.
    ///
    /// The sentinel results expand to all `Fermi` or all `Bruno`.
    #[must_use]
    pub fn labels(&self, length: usize) -> Vec<Clue> {
        match self {
            ClueResult::AllCorrect => vec![Clue::Fermi; length],
            ClueResult::NoneCorrect => vec![Clue::Bruno; length],
            ClueResult::Clues(clues) => clues.clone(),
        }
    }
}

impl fmt::Display for ClueResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClueResult::AllCorrect => f.write_str("You got it!"),
            ClueResult::NoneCorrect => f.write_str("Bagels"),
            ClueResult::Clues(clues) => {
                let words: Vec<&str> = clues.iter().map(|c| c.as_str()).collect();
                f.write_str(&words.join(" "))
            }
        }
    }
}

fn letter_frequency(word: &str) -> HashMap<char, usize> {
    let mut freq = HashMap::new();
    for c in word.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Score `guess` against `secret`.
///
/// Both words must have the same length. Exact matches are credited first so
/// that a repeated guess letter never earns more clues than the secret has
/// copies of it.
pub fn compute_clues(guess: &str, secret: &str) -> ClueResult {
    if guess == secret {
        return ClueResult::AllCorrect;
    }

    let guess_chars: Vec<char> = guess.chars().collect();
    let secret_chars: Vec<char> = secret.chars().collect();
    debug_assert_eq!(guess_chars.len(), secret_chars.len());

    let mut remaining = letter_frequency(secret);
    let mut clues: Vec<Option<Clue>> = vec![None; guess_chars.len()];

    // First pass: exact positions
    for (i, (g, s)) in guess_chars.iter().zip(&secret_chars).enumerate() {
        if g == s {
            clues[i] = Some(Clue::Fermi);
            if let Some(count) = remaining.get_mut(g) {
                *count -= 1;
            }
        }
    }

    // Second pass: letters present elsewhere
    for (i, g) in guess_chars.iter().enumerate() {
        if clues[i].is_some() {
            continue;
        }
        clues[i] = match remaining.get_mut(g) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Some(Clue::Pico)
            }
            _ => Some(Clue::Bruno),
        };
    }

    let clues: Vec<Clue> = clues.into_iter().map(|c| c.unwrap_or(Clue::Bruno)).collect();
    if clues.iter().all(|c| *c == Clue::Bruno) {
        ClueResult::NoneCorrect
    } else {
        ClueResult::Clues(clues)
    }
}
