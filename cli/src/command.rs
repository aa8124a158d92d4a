use blastfield_core::{CellCount, Coord2, Difficulty};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    PowerUp,
    Start,
    Reset,
    Difficulty(Difficulty),
    Mines(CellCount),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `h` for help")]
    Unknown(String),
    #[error("`{0}` needs a row and a column")]
    MissingCoords(String),
    #[error("`{0}` is not a valid number")]
    BadNumber(String),
    #[error("unknown difficulty `{0}`")]
    BadDifficulty(String),
    #[error("too many arguments")]
    TrailingInput,
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  p               arm a power-up for the next reveal
  s               start (or restart) the game
  n               new board, back to setup
  d <difficulty>  easy, medium, hard or difficult
  m <mines>       change the mine count
  h               this help
  q               quit";

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(coords(verb, &mut words)?),
            "f" | "flag" => Self::Flag(coords(verb, &mut words)?),
            "p" | "power" => Self::PowerUp,
            "s" | "start" => Self::Start,
            "n" | "new" | "reset" => Self::Reset,
            "d" | "difficulty" => {
                let name = words
                    .next()
                    .ok_or_else(|| CommandError::BadDifficulty(String::new()))?;
                Self::Difficulty(
                    Difficulty::from_name(name)
                        .ok_or_else(|| CommandError::BadDifficulty(name.to_owned()))?,
                )
            }
            "m" | "mines" => {
                let count = words
                    .next()
                    .ok_or_else(|| CommandError::BadNumber(String::new()))?;
                Self::Mines(number(count)?)
            }
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        };

        if words.next().is_some() {
            return Err(CommandError::TrailingInput);
        }
        Ok(Some(command))
    }
}

fn coords<'a>(
    verb: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    match (words.next(), words.next()) {
        (Some(row), Some(col)) => Ok((number(row)?, number(col)?)),
        _ => Err(CommandError::MissingCoords(verb.to_owned())),
    }
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::BadNumber(word.to_owned()))
}
