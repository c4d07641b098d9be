use clap::Parser;
use crate::clues::ClueResult;
use crate::game_state::{GameInterface, UserAction, is_affirmative};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Bagels with Words: guess the secret word from Fermi, Pico and Bruno clues
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Letters in the secret word (asked interactively when omitted)
    #[arg(short = 'l', long = "length", value_parser = clap::value_parser!(u16).range(1..))]
    pub word_length: Option<u16>,

    /// Guesses allowed per round [default: from config, 10]
    #[arg(short = 'g', long = "max-guesses", value_parser = clap::value_parser!(u16).range(1..))]
    pub max_guesses: Option<u16>,

    /// Path to a config file (TOML, or JSON if it ends in .json)
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<PathBuf>,

    /// Play offline against a newline-delimited word file
    #[arg(short = 'w', long = "wordlist")]
    pub wordlist_path: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub const INTRO_LEGEND: &str = "\
Here are some clues:

    When I say:   That means:
    Pico          Letter is correct but in the wrong position.
    Fermi         Letter is correct and in the right position.
    Bruno         Letter is not in the secret word.
    Bagels        No letter is correct.

For example, if the secret word was \"rumba\" and your guess was \"raspy\",
the clues would be \"Fermi Pico Bruno Bruno Bruno\".";

/// Parse a word-length answer. Blank means `default`.
pub fn parse_word_length(input: &str, default: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return Some(default);
    }
    match input.parse::<i64>() {
        Ok(n) if n >= 1 => usize::try_from(n).ok(),
        _ => None,
    }
}

/// Line-oriented front end over any reader/writer pair.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl CliInterface<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Read one line; `None` on end of input or a read error.
    fn read_line(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input),
        }
    }

    fn say(&mut self, text: &str) {
        // A closed stdout leaves nothing useful to do with the error
        let _ = writeln!(self.writer, "{text}");
        let _ = self.writer.flush();
    }

    fn prompt(&mut self) {
        let _ = write!(self.writer, "> ");
        let _ = self.writer.flush();
    }

    /// Ask for the word length until a positive integer (or blank) is given.
    ///
    /// Returns `None` if input ends first.
    pub fn read_word_length(&mut self, default: usize) -> Option<usize> {
        loop {
            self.say(&format!(
                "How many letters should the secret word be? (RET defaults to {default})"
            ));
            self.prompt();
            let input = self.read_line()?;
            match parse_word_length(&input, default) {
                Some(length) => return Some(length),
                None => self.say("Please enter a positive integer"),
            }
        }
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_intro(&mut self, word_length: usize) {
        self.say(&format!(
            "\nBagels with Words, a deductive logic game.\n\n\
             Based on Bagels, by Al Sweigart. Inspired by Wordle. Powered by Wordnik.\n\n\
             I am thinking of a {word_length}-letter word.\n\
             Lower case. Not a plural. Try to guess what it is.\n\
             {INTRO_LEGEND}"
        ));
    }

    fn display_round_start(&mut self, max_guesses: usize) {
        self.say("\nI have thought up a word.");
        self.say(&format!("You have {max_guesses} guesses to get it.\n"));
    }

    fn read_guess(&mut self, attempt: usize) -> UserAction {
        self.say(&format!("Guess #{attempt}: "));
        self.prompt();
        match self.read_line() {
            Some(input) => UserAction::Guess(input),
            None => UserAction::Exit,
        }
    }

    fn display_length_reminder(&mut self, word_length: usize) {
        self.say(&format!("Remember: {word_length}-letter word."));
    }

    fn display_unrecognized_word(&mut self, _guess: &str) {
        self.say("I don't recognize this word.");
    }

    fn display_clues(&mut self, _guess: &str, clues: &ClueResult) {
        self.say(&clues.to_string());
    }

    fn display_out_of_guesses(&mut self, secret: &str) {
        self.say("You ran out of guesses.");
        self.say(&format!("The answer was {secret}."));
    }

    fn confirm_play_again(&mut self) -> bool {
        self.say("Do you want to play again? (yes or no)");
        self.prompt();
        self.read_line().is_some_and(|answer| is_affirmative(&answer))
    }

    fn display_farewell(&mut self) {
        self.say("Thanks for playing!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn interface(input: &str) -> CliInterface<Cursor<Vec<u8>>, Vec<u8>> {
        CliInterface::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(interface: CliInterface<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(interface.into_writer()).unwrap()
    }

    #[test]
    fn test_parse_cli_defaults() {
        let cli = Cli::try_parse_from(["bagels-with-words"]).unwrap();
        assert_eq!(cli.word_length, None);
        assert_eq!(cli.max_guesses, None);
        assert!(!cli.tui);
    }

    #[test]
    fn test_parse_cli_with_options() {
        let cli = Cli::try_parse_from([
            "bagels-with-words",
            "--length",
            "6",
            "-g",
            "8",
            "--wordlist",
            "/usr/share/dict/words",
            "--tui",
        ])
        .unwrap();
        assert_eq!(cli.word_length, Some(6));
        assert_eq!(cli.max_guesses, Some(8));
        assert_eq!(
            cli.wordlist_path,
            Some(PathBuf::from("/usr/share/dict/words"))
        );
        assert!(cli.tui);
    }

    #[test]
    fn test_parse_cli_rejects_zero_length() {
        assert!(Cli::try_parse_from(["bagels-with-words", "--length", "0"]).is_err());
        assert!(Cli::try_parse_from(["bagels-with-words", "-g", "0"]).is_err());
    }

    #[test]
    fn test_parse_word_length() {
        assert_eq!(parse_word_length("\n", 5), Some(5));
        assert_eq!(parse_word_length("  ", 5), Some(5));
        assert_eq!(parse_word_length("7\n", 5), Some(7));
        assert_eq!(parse_word_length("0", 5), None);
        assert_eq!(parse_word_length("-3", 5), None);
        assert_eq!(parse_word_length("five", 5), None);
        assert_eq!(parse_word_length("4.5", 5), None);
        assert_eq!(parse_word_length("", 6), Some(6));
    }

    #[test]
    fn test_read_word_length_reprompts() {
        let mut ui = interface("abc\n0\n6\n");
        assert_eq!(ui.read_word_length(5), Some(6));
        let text = output(ui);
        assert_eq!(text.matches("Please enter a positive integer").count(), 2);
    }

    #[test]
    fn test_read_word_length_blank_defaults() {
        let mut ui = interface("\n");
        assert_eq!(ui.read_word_length(5), Some(5));
    }

    #[test]
    fn test_read_word_length_eof() {
        let mut ui = interface("nope\n");
        assert_eq!(ui.read_word_length(5), None);
    }

    #[test]
    fn test_read_guess() {
        let mut ui = interface("crane\n");
        assert_eq!(ui.read_guess(3), UserAction::Guess("crane\n".to_string()));
        assert_eq!(ui.read_guess(3), UserAction::Exit);
        assert!(output(ui).contains("Guess #3: "));
    }

    #[test]
    fn test_confirm_play_again() {
        let mut ui = interface("Yes\nno\n");
        assert!(ui.confirm_play_again());
        assert!(!ui.confirm_play_again());
        assert!(!ui.confirm_play_again());
    }

    #[test]
    fn test_messages() {
        let mut ui = interface("");
        ui.display_length_reminder(5);
        ui.display_unrecognized_word("twtat");
        ui.display_clues("twtat", &ClueResult::NoneCorrect);
        ui.display_out_of_guesses("taint");
        ui.display_farewell();
        let text = output(ui);
        assert!(text.contains("Remember: 5-letter word."));
        assert!(text.contains("I don't recognize this word."));
        assert!(text.contains("Bagels"));
        assert!(text.contains("You ran out of guesses."));
        assert!(text.contains("The answer was taint."));
        assert!(text.contains("Thanks for playing!"));
    }

    #[test]
    fn test_intro_mentions_length() {
        let mut ui = interface("");
        ui.display_intro(7);
        let text = output(ui);
        assert!(text.contains("I am thinking of a 7-letter word."));
        assert!(text.contains("Fermi Pico Bruno Bruno Bruno"));
    }
}
