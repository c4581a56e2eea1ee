// Plain-text save-file adapter. Fixed four-line layout, no versioning:
// lives of player one, lives of player two, then one "x y" position line
// per player.

use crate::domain::Vec2;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// The slice of session state that survives a save.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveState {
    pub lives: [u32; 2],
    pub positions: [Vec2; 2],
}

#[derive(Debug)]
pub enum SaveError {
    Io(io::Error),
    /// The file did not match the fixed four-line layout.
    Malformed { line: usize },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "save file i/o: {e}"),
            SaveError::Malformed { line } => write!(f, "save file malformed at line {line}"),
        }
    }
}

impl From<io::Error> for SaveError {
    fn from(e: io::Error) -> Self {
        SaveError::Io(e)
    }
}

pub fn format_save(state: &SaveState) -> String {
    format!(
        "{}\n{}\n{} {}\n{} {}\n",
        state.lives[0],
        state.lives[1],
        state.positions[0].x,
        state.positions[0].y,
        state.positions[1].x,
        state.positions[1].y,
    )
}

pub fn parse_save(text: &str) -> Result<SaveState, SaveError> {
    let mut lines = text.lines();
    let lives_one = parse_lives(lines.next(), 1)?;
    let lives_two = parse_lives(lines.next(), 2)?;
    let position_one = parse_position(lines.next(), 3)?;
    let position_two = parse_position(lines.next(), 4)?;
    Ok(SaveState {
        lives: [lives_one, lives_two],
        positions: [position_one, position_two],
    })
}

pub fn write_save(path: &Path, state: &SaveState) -> Result<(), SaveError> {
    fs::write(path, format_save(state))?;
    Ok(())
}

pub fn read_save(path: &Path) -> Result<SaveState, SaveError> {
    let text = fs::read_to_string(path)?;
    parse_save(&text)
}

fn parse_lives(line: Option<&str>, number: usize) -> Result<u32, SaveError> {
    line.and_then(|l| l.trim().parse().ok())
        .ok_or(SaveError::Malformed { line: number })
}

fn parse_position(line: Option<&str>, number: usize) -> Result<Vec2, SaveError> {
    let line = line.ok_or(SaveError::Malformed { line: number })?;
    let mut parts = line.split_whitespace();
    let x = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or(SaveError::Malformed { line: number })?;
    let y = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or(SaveError::Malformed { line: number })?;
    if parts.next().is_some() {
        return Err(SaveError::Malformed { line: number });
    }
    Ok(Vec2::new(x, y))
}
