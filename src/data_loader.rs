use serde::*;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::WindowError;
use crate::window_context::WindowContext;

// Season folder on disk. Only its existence is checked, the files inside are trusted.
#[derive(Debug)]
pub struct SeasonDataset {
    pub season: String,
    pub dir: PathBuf,
}

impl SeasonDataset {
    pub fn locate(ctx: &WindowContext) -> Result<Self, WindowError> {
        let dir = ctx.season_dir();
        if !dir.exists() {
            return Err(WindowError::SeasonNotFound(dir));
        }

        debug!(season = %ctx.season, dir = %dir.display(), "located season folder");
        Ok(Self {
            season: ctx.season.clone(),
            dir,
        })
    }

    pub fn gameweek_path(&self, gameweek: u32) -> PathBuf {
        self.dir.join(format!("gw{gameweek}.csv"))
    }
}

// The `buffer` gameweeks right before the current one. The current gameweek itself is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameweekWindow {
    pub current: u32,
    pub buffer: u32,
}

impl GameweekWindow {
    pub fn new(current: u32, buffer: u32) -> Self {
        debug_assert!(buffer >= 1);
        debug_assert!(current > buffer);
        Self { current, buffer }
    }

    // Oldest first, so gw - buffer comes first and gw - 1 comes last
    pub fn gameweeks(&self) -> RangeInclusive<u32> {
        (self.current - self.buffer)..=(self.current - 1)
    }

    pub fn paths(&self, dataset: &SeasonDataset) -> Vec<PathBuf> {
        self.gameweeks().map(|gw| dataset.gameweek_path(gw)).collect()
    }
}

/// A single CSV field. csv infers bools and numbers before falling back to text,
/// so an empty field ends up as empty text.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Cell {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Number(n) => n.is_nan(),
            Cell::Text(s) => s.is_empty(),
            Cell::Bool(_) => false,
        }
    }

    // Value used when averaging. Bools count as 1/0, same for the capitalised spellings csv doesn't infer.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => match s.as_str() {
                "True" | "TRUE" => Some(1.0),
                "False" | "FALSE" => Some(0.0),
                _ => None,
            },
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.is_missing() || self.as_number().is_some()
    }
}

#[derive(Debug, Clone)]
pub struct GameweekTable {
    pub gameweek: u32,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl GameweekTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub fn load_gameweek(dataset: &SeasonDataset, gameweek: u32) -> Result<GameweekTable, WindowError> {
    let path = dataset.gameweek_path(gameweek);
    let read_err = |source: csv::Error| WindowError::GameweekRead { path: path.clone(), source };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(read_err)?;

    let headers = dedup_headers(rdr.headers().map_err(read_err)?.iter());

    let mut rows = Vec::new();
    for record in rdr.deserialize::<Vec<Cell>>() {
        rows.push(record.map_err(read_err)?);
    }

    info!(gameweek, rows = rows.len(), path = %path.display(), "loaded gameweek");
    Ok(GameweekTable { gameweek, headers, rows })
}

// Repeated names get a numbered suffix, so a, b, a, a reads as a, b, a.1, a.2
fn dedup_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for h in raw {
        let mut name = h.to_string();
        let mut n = 1;
        while out.contains(&name) {
            name = format!("{h}.{n}");
            n += 1;
        }
        out.push(name);
    }
    out
}

// Every file in the window has to be there. The first missing or broken one stops the whole run.
pub fn load_window(dataset: &SeasonDataset, window: &GameweekWindow) -> Result<Vec<GameweekTable>, WindowError> {
    window.gameweeks().map(|gw| load_gameweek(dataset, gw)).collect()
}
