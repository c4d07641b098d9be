use anyhow::{Context, Result};
use bagels_with_words::cli::{CliInterface, parse_cli};
use bagels_with_words::config::Config;
use bagels_with_words::dictionary::Dictionary;
use bagels_with_words::game_state::GameSession;
use bagels_with_words::logging::{LogTarget, init_logging};
use bagels_with_words::tui::TuiInterface;
use bagels_with_words::{WordList, WordnikClient};

fn build_dictionary(
    config: &Config,
    config_path: &std::path::Path,
    wordlist: Option<&std::path::Path>,
) -> Result<Box<dyn Dictionary>> {
    if let Some(path) = wordlist {
        let words = WordList::from_file(path)?;
        if words.is_empty() {
            anyhow::bail!("Word list '{}' has no usable words", path.display());
        }
        log::info!("Playing offline with {} words from {}", words.len(), path.display());
        return Ok(Box::new(words));
    }

    config.require_api_key(config_path)?;
    let client = WordnikClient::new(&config.wordnik).context("Failed to set up Wordnik client")?;
    Ok(Box::new(client))
}

fn main() -> Result<()> {
    let cli = parse_cli();
    let log_file = init_logging(if cli.tui {
        LogTarget::File
    } else {
        LogTarget::Stderr
    });

    let config_path = Config::resolve_path(cli.config_path.as_deref());
    let config = Config::load(&config_path)?;
    let dictionary = build_dictionary(&config, &config_path, cli.wordlist_path.as_deref())?;

    let max_guesses = cli
        .max_guesses
        .map_or(config.game.max_guesses, usize::from);

    let summary = if cli.tui {
        let mut interface = TuiInterface::new().context("Failed to start the terminal UI")?;
        let word_length = match cli.word_length {
            Some(length) => usize::from(length),
            None => match interface.read_word_length(config.game.word_length) {
                Some(length) => length,
                None => return Ok(()),
            },
        };
        // The terminal is restored when `interface` drops at the end of this block
        GameSession::new(word_length, max_guesses).run_session(&dictionary, &mut interface)
    } else {
        let mut interface = CliInterface::stdio();
        let word_length = match cli.word_length {
            Some(length) => usize::from(length),
            None => match interface.read_word_length(config.game.word_length) {
                Some(length) => length,
                None => return Ok(()),
            },
        };
        GameSession::new(word_length, max_guesses).run_session(&dictionary, &mut interface)
    }?;

    log::info!(
        "Played {} round(s), won {}",
        summary.rounds_played,
        summary.rounds_won
    );
    if let Some(path) = log_file {
        log::debug!("Log written to {}", path.display());
    }
    Ok(())
}
