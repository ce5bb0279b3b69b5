use std::{error, fmt::Display, path::PathBuf};

use clap::Parser;

pub mod engine;
pub mod grid;
pub mod path;

pub use engine::{LevelReport, LongestPathEngine, Trail, TrailTable};
pub use grid::{parse_map, read_map, Direction, ElevationMap, Position};
pub use path::{PathStep, SkiPath};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingDimension(&'static str),
    InvalidDimension(&'static str, i64),
    InvalidNumber(String, usize), // (token, line number)
    MissingHeights(usize, usize), // (expected count, given count)
    ExcessHeights(usize, usize),  // (expected count, given count)
    InconsistentSize(usize, usize, usize), // (row count, column count, height count)
    InconsistentRow(usize, usize),         // (expected column count, given column count)
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingDimension(name) => {
                write!(f, "Expect {} of map before end of input.", name)
            }
            Error::InvalidDimension(name, value) => {
                write!(f, "Expect positive {} of map, given {}.", name, value)
            }
            Error::InvalidNumber(token, line) => {
                write!(f, "Invalid number({}) at line {}.", token, line)
            }
            Error::MissingHeights(expect_n, given_n) => write!(
                f,
                "Expect {} height(s) in map, only given {}.",
                expect_n, given_n
            ),
            Error::ExcessHeights(expect_n, given_n) => write!(
                f,
                "Expect {} height(s) in map, given {}.",
                expect_n, given_n
            ),
            Error::InconsistentSize(row_n, col_n, height_n) => write!(
                f,
                "Map of {} row(s) and {} column(s) can't hold {} height(s).",
                row_n, col_n, height_n
            ),
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} height(s) in each row, given {}.",
                expect_col_n, this_col_n
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Map file: width, length, then length rows of width heights.
    #[arg(default_value = "map.txt")]
    pub input_path: PathBuf,
    /// Print one dot per elevation level to stderr while searching.
    #[arg(long)]
    pub progress: bool,
}
