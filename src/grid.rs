use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::Error;

#[derive(Debug, Clone, Copy)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn all_dirs() -> &'static [Direction] {
        static ALL_DIRECTIONS: [Direction; 4] = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];

        &ALL_DIRECTIONS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    r: usize,
    c: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Position {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    pub fn r(&self) -> usize {
        self.r
    }

    pub fn c(&self) -> usize {
        self.c
    }

    /// Only the low side is checked here, the map bounds-checks the high side.
    pub fn neighbor(&self, dir: Direction) -> Option<Position> {
        match dir {
            Direction::Up if self.r > 0 => Some(Position::new(self.r - 1, self.c)),
            Direction::Right => Some(Position::new(self.r, self.c + 1)),
            Direction::Down => Some(Position::new(self.r + 1, self.c)),
            Direction::Left if self.c > 0 => Some(Position::new(self.r, self.c - 1)),
            _ => None,
        }
    }
}

/// Dense elevation grid, stored row-major: `idx = r * col_n + c`.
#[derive(Debug, Clone)]
pub struct ElevationMap {
    heights: Vec<i32>,
    row_n: usize,
    col_n: usize,
}

impl ElevationMap {
    pub fn new(row_n: usize, col_n: usize, heights: Vec<i32>) -> Result<Self, Error> {
        if row_n.checked_mul(col_n) != Some(heights.len()) {
            return Err(Error::InconsistentSize(row_n, col_n, heights.len()));
        }

        Ok(Self {
            heights,
            row_n,
            col_n,
        })
    }

    /// Build a map from rows of heights, mostly for tests and small inputs.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, Error> {
        let row_n = rows.len();
        let col_n = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if let Some(row) = rows.iter().find(|row| row.as_ref().len() != col_n) {
            return Err(Error::InconsistentRow(col_n, row.as_ref().len()));
        }

        let heights = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect::<Vec<_>>();

        Self::new(row_n, col_n, heights)
    }

    pub fn row_n(&self) -> usize {
        self.row_n
    }

    pub fn col_n(&self) -> usize {
        self.col_n
    }

    pub fn cell_n(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn height(&self, pos: &Position) -> Option<i32> {
        self.index_of(pos).map(|ind| self.heights[ind])
    }

    pub fn height_at(&self, ind: usize) -> i32 {
        self.heights[ind]
    }

    pub fn index_of(&self, pos: &Position) -> Option<usize> {
        if pos.r < self.row_n && pos.c < self.col_n {
            Some(pos.r * self.col_n + pos.c)
        } else {
            None
        }
    }

    pub fn position_of(&self, ind: usize) -> Position {
        debug_assert!(ind < self.cell_n(), "index {} out of map", ind);
        Position::new(ind / self.col_n, ind % self.col_n)
    }

    /// Cells one step away from `ind` that are strictly higher, i.e. the DAG edges out of `ind`.
    pub fn ascending_neighbors(&self, ind: usize) -> impl Iterator<Item = usize> + '_ {
        let pos = self.position_of(ind);
        let height = self.heights[ind];
        Direction::all_dirs().iter().filter_map(move |dir| {
            pos.neighbor(*dir)
                .and_then(|next_pos| self.index_of(&next_pos))
                .filter(|next_ind| self.heights[*next_ind] > height)
        })
    }

    pub fn min_height(&self) -> Option<i32> {
        self.heights.iter().copied().min()
    }
}

#[derive(Debug)]
struct MapBuilder {
    heights: Vec<i32>,
    col_n: Option<usize>,
    row_n: Option<usize>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            col_n: None,
            row_n: None,
        }
    }

    pub fn add_line(&mut self, text: &str, line_no: usize) -> Result<(), Error> {
        for token in text.split_whitespace() {
            let value = token
                .parse::<i64>()
                .map_err(|_| Error::InvalidNumber(token.to_string(), line_no))?;
            if self.col_n.is_none() {
                self.col_n = Some(Self::dimension("width", value)?);
            } else if self.row_n.is_none() {
                self.row_n = Some(Self::dimension("length", value)?);
            } else {
                let height = i32::try_from(value)
                    .map_err(|_| Error::InvalidNumber(token.to_string(), line_no))?;
                self.heights.push(height);
            }
        }

        Ok(())
    }

    fn dimension(name: &'static str, value: i64) -> Result<usize, Error> {
        if value <= 0 {
            return Err(Error::InvalidDimension(name, value));
        }

        usize::try_from(value).map_err(|_| Error::InvalidDimension(name, value))
    }

    pub fn build(self) -> Result<ElevationMap, Error> {
        let col_n = self.col_n.ok_or(Error::MissingDimension("width"))?;
        let row_n = self.row_n.ok_or(Error::MissingDimension("length"))?;
        let expect_n = row_n
            .checked_mul(col_n)
            .ok_or(Error::InconsistentSize(row_n, col_n, self.heights.len()))?;
        let given_n = self.heights.len();
        if given_n < expect_n {
            return Err(Error::MissingHeights(expect_n, given_n));
        }
        if given_n > expect_n {
            return Err(Error::ExcessHeights(expect_n, given_n));
        }

        ElevationMap::new(row_n, col_n, self.heights)
    }
}

pub fn parse_map<R: BufRead>(reader: R) -> Result<ElevationMap> {
    let mut builder = MapBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of map.", ind + 1))?;
        builder.add_line(line.as_str(), ind + 1)?;
    }

    Ok(builder.build()?)
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<ElevationMap> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let map = parse_map(BufReader::new(file))
        .with_context(|| format!("Failed to parse given file({}).", path.as_ref().display()))?;
    tracing::debug!(
        row_n = map.row_n(),
        col_n = map.col_n(),
        "read elevation map from {}",
        path.as_ref().display()
    );

    Ok(map)
}
