use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while locating and reading a gameweek window.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Year folder does not exist")]
    SeasonNotFound(PathBuf),

    #[error("failed to read gameweek file {path}: {source}")]
    GameweekRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Rejections from the current gameweek prompt. These are recovered by re-prompting.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameweekInputError {
    #[error("Enter an int")]
    NotAnInt,

    #[error("Enter a valid GW")]
    OutOfRange,
}
