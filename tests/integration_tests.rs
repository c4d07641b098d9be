// Integration tests for bagels-with-words
// These tests drive whole sessions through the CLI front end

use std::io::Cursor;
use bagels_with_words::*;
use bagels_with_words::cli::CliInterface;

/// Dictionary whose secret is fixed, knowing a handful of other words.
struct RiggedDictionary {
    secret: &'static str,
    words: WordList,
}

impl RiggedDictionary {
    fn new(secret: &'static str, other_words: &str) -> Self {
        Self {
            secret,
            words: WordList::new(load_wordbank_from_str(other_words)),
        }
    }
}

impl Dictionary for RiggedDictionary {
    fn fetch_random_word(&self, _length: usize) -> Result<String, DictionaryError> {
        Ok(self.secret.to_string())
    }

    fn word_exists(&self, candidate: &str) -> Result<bool, DictionaryError> {
        Ok(candidate == self.secret || self.words.word_exists(candidate)?)
    }
}

fn play(
    session: GameSession,
    dictionary: &dyn Dictionary,
    input: &str,
) -> (Result<SessionSummary, DictionaryError>, String) {
    let mut interface = CliInterface::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let result = session.run_session(dictionary, &mut interface);
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (result, output)
}

#[test]
fn test_full_round_with_reference_clues() {
    let dictionary = RiggedDictionary::new("taint", "muser\nraspy");
    let input = "twtat\nmuser\nraspy\ntaint\nno\n";
    let (result, output) = play(GameSession::new(5, 10), &dictionary, input);

    let summary = result.unwrap();
    assert_eq!(summary.rounds_played, 1);
    assert_eq!(summary.rounds_won, 1);

    // twtat is not a word, so it costs nothing
    assert!(output.contains("I don't recognize this word."));
    assert!(output.contains("\nBagels\n"));
    assert!(output.contains("Bruno Fermi Bruno Bruno Bruno"));
    assert!(output.contains("You got it!"));
    assert!(output.contains("Guess #3: "));
    assert!(!output.contains("Guess #4: "));
    assert!(output.contains("Thanks for playing!"));
}

#[test]
fn test_wrong_length_guesses_keep_attempt_number() {
    let dictionary = RiggedDictionary::new("taint", "");
    let input = "tai\ntaints\n\ntaint\nn\n";
    let (result, output) = play(GameSession::new(5, 10), &dictionary, input);

    assert_eq!(result.unwrap().rounds_won, 1);
    assert_eq!(output.matches("Remember: 5-letter word.").count(), 3);
    assert_eq!(output.matches("Guess #1: ").count(), 4);
    assert!(!output.contains("Guess #2: "));
}

#[test]
fn test_running_out_of_guesses_reveals_answer() {
    let dictionary = RiggedDictionary::new("rumba", "raspy\nmuser\ntaint");
    let input = "raspy\nmuser\ntaint\nno\n";
    let (result, output) = play(GameSession::new(5, 3), &dictionary, input);

    let summary = result.unwrap();
    assert_eq!(summary.rounds_played, 1);
    assert_eq!(summary.rounds_won, 0);
    assert!(output.contains("Fermi Pico Bruno Bruno Bruno"));
    assert!(output.contains("You ran out of guesses."));
    assert!(output.contains("The answer was rumba."));
    assert!(!output.contains("Guess #4: "));
}

#[test]
fn test_play_again_runs_another_round() {
    let dictionary = RiggedDictionary::new("taint", "");
    let input = "taint\nYES\ntaint\nnope\n";
    let (result, output) = play(GameSession::new(5, 10), &dictionary, input);

    assert_eq!(result.unwrap().rounds_played, 2);
    assert_eq!(output.matches("I have thought up a word.").count(), 2);
    assert_eq!(output.matches("Do you want to play again? (yes or no)").count(), 2);
    // The intro is shown once per session
    assert_eq!(output.matches("Bagels with Words, a deductive logic game.").count(), 1);
}

#[test]
fn test_closed_input_ends_session() {
    let dictionary = RiggedDictionary::new("taint", "");
    let (result, output) = play(GameSession::new(5, 10), &dictionary, "");

    assert_eq!(result.unwrap().rounds_played, 0);
    assert!(output.contains("Thanks for playing!"));
}

#[test]
fn test_offline_word_list_session() {
    // "cat" is the only three-letter word, so it must be the secret
    let words = WordList::new(load_wordbank_from_str("cat\ntaint\nrumba\nbagels"));
    let input = "dog\ncat\nn\n";
    let (result, output) = play(GameSession::new(3, 5), &words, input);

    assert_eq!(result.unwrap().rounds_won, 1);
    assert!(output.contains("I am thinking of a 3-letter word."));
    assert!(output.contains("I don't recognize this word."));
    assert!(output.contains("You got it!"));
}

#[test]
fn test_offline_word_list_from_file() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Apple\ngrape\nlemon\n").unwrap();
    let words = WordList::from_file(file.path()).unwrap();
    assert_eq!(words.len(), 3);

    let secret = words.fetch_random_word(5).unwrap();
    assert!(["apple", "grape", "lemon"].contains(&secret.as_str()));
}

#[test]
fn test_missing_word_length_surfaces_error() {
    let words = WordList::new(load_wordbank_from_str("cat"));
    let (result, _) = play(GameSession::new(9, 5), &words, "");
    assert!(matches!(
        result,
        Err(DictionaryError::NoWordOfLength { length: 9 })
    ));
}

#[test]
fn test_clue_engine_reference_cases() {
    assert_eq!(compute_clues("twtat", "taint").to_string(), "Fermi Bruno Bruno Pico Fermi");
    assert_eq!(compute_clues("muser", "taint").to_string(), "Bagels");
    assert_eq!(compute_clues("raspy", "rumba").to_string(), "Fermi Pico Bruno Bruno Bruno");
    assert_eq!(compute_clues("taint", "taint").to_string(), "You got it!");
}

#[test]
fn test_config_drives_retry_policy() {
    use std::path::Path;

    let content = "[wordnik]\napi_key = \"k\"\nmax_retries = 4\nretry_backoff_ms = 50\n";
    let config = Config::parse(Path::new("config.toml"), content).unwrap();
    let policy = config.wordnik.retry_policy();
    assert_eq!(policy.max_attempts(), 4);
    assert_eq!(policy.backoff(), std::time::Duration::from_millis(50));
    assert!(WordnikClient::new(&config.wordnik).is_ok());
}
