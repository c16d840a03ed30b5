//! Parsing of editor command lines.
//!
//! Each line is split on whitespace; the first token names the command and
//! the rest are its arguments. Semantic checks that need the loaded image
//! (coordinate ranges, image kind, effect names) happen in the session.

use std::str::FromStr;

use pnmedit_core::Encoding;
use thiserror::Error;

/// A parsed editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load { path: String },
    Save { path: String, encoding: Encoding },
    SelectAll,
    /// Two corners given as `x1 y1 x2 y2`, in any order.
    Select { x1: i64, y1: i64, x2: i64, y2: i64 },
    Crop,
    Apply { effect: String },
    Histogram { max_stars: u64, bins: usize },
    Equalize,
    Rotate { angle: i32 },
    Exit,
}

/// Reasons a command line is rejected before it reaches the image.
///
/// The display text is the status line printed back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid command")]
    Invalid,
    #[error("Invalid set of parameters")]
    InvalidParameters,
    #[error("Unsupported rotation angle")]
    UnsupportedAngle,
}

impl Command {
    /// First whitespace-separated token of a line, if any.
    pub fn keyword(line: &str) -> Option<&str> {
        line.split_whitespace().next()
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (&keyword, args) = tokens.split_first().ok_or(CommandError::Invalid)?;

        match (keyword, args) {
            ("LOAD", [path, ..]) => Ok(Command::Load {
                path: (*path).to_string(),
            }),
            ("SAVE", [path]) => Ok(Command::Save {
                path: (*path).to_string(),
                encoding: Encoding::Binary,
            }),
            ("SAVE", [path, _]) => Ok(Command::Save {
                path: (*path).to_string(),
                encoding: Encoding::Plain,
            }),
            ("SELECT", ["ALL", ..]) => Ok(Command::SelectAll),
            ("SELECT", [x1, y1, x2, y2, ..]) => Ok(Command::Select {
                x1: parse_arg(x1, CommandError::Invalid)?,
                y1: parse_arg(y1, CommandError::Invalid)?,
                x2: parse_arg(x2, CommandError::Invalid)?,
                y2: parse_arg(y2, CommandError::Invalid)?,
            }),
            ("CROP", _) => Ok(Command::Crop),
            ("APPLY", [effect, ..]) => Ok(Command::Apply {
                effect: (*effect).to_string(),
            }),
            ("HISTOGRAM", [max_stars, bins]) => Ok(Command::Histogram {
                max_stars: parse_arg(max_stars, CommandError::InvalidParameters)?,
                bins: parse_arg(bins, CommandError::InvalidParameters)?,
            }),
            ("EQUALIZE", _) => Ok(Command::Equalize),
            ("ROTATE", [angle, ..]) => Ok(Command::Rotate {
                angle: parse_arg(angle, CommandError::UnsupportedAngle)?,
            }),
            ("EXIT", _) => Ok(Command::Exit),
            _ => Err(CommandError::Invalid),
        }
    }
}

fn parse_arg<T: FromStr>(token: &str, error: CommandError) -> Result<T, CommandError> {
    token.parse().map_err(|_| error)
}
