//! Plain-text save files
//!
//! ```text
//! Board:
//! OOOOOOOOOOOOOOOOOOO      <- row 19
//! ...
//! OOOOOOOOOOOOOOOOOOO      <- row 1
//!
//! Human:
//! Captured pairs: 0
//! Score: 0
//!
//! Computer:
//! Captured pairs: 0
//! Score: 0
//!
//! Next Player: Human - White
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::board::{Stone, BOARD_SIZE};
use crate::error::PenteError;

use super::player::{Player, PlayerKind};
use super::round::Round;

/// Directory the GUI saves into
pub const SAVE_DIR: &str = "saves";
pub const SAVE_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Could not access the save file: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid save file: {0}")]
    Malformed(String),
    #[error("A save named {} already exists", .0.display())]
    Exists(PathBuf),
    #[error(transparent)]
    Rejected(#[from] PenteError),
}

fn malformed(reason: impl Into<String>) -> SaveError {
    SaveError::Malformed(reason.into())
}

/// Per-player numbers stored in a save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavedPlayer {
    pub captured_pairs: usize,
    pub score: u32,
}

impl SavedPlayer {
    fn of(player: &Player) -> Self {
        Self { captured_pairs: player.captured_pairs(), score: player.tournament_score() }
    }
}

/// Contents of a save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveState {
    /// Row "1" first
    pub rows: Vec<Vec<Stone>>,
    pub human: SavedPlayer,
    pub computer: SavedPlayer,
    pub next: PlayerKind,
    pub next_color: Stone,
}

impl SaveState {
    pub fn from_round(round: &Round) -> Self {
        let next = round.current_player();
        Self {
            rows: round.board().grid(),
            human: SavedPlayer::of(round.player(PlayerKind::Human)),
            computer: SavedPlayer::of(round.player(PlayerKind::Computer)),
            next: next.kind,
            next_color: next.color,
        }
    }

    fn saved(&self, kind: PlayerKind) -> SavedPlayer {
        match kind {
            PlayerKind::Human => self.human,
            PlayerKind::Computer => self.computer,
        }
    }

    /// Both players, the one to move first
    pub fn players(&self) -> [Player; 2] {
        let other = self.next.other();
        let make = |kind, color| {
            let saved = self.saved(kind);
            Player::with_totals(kind, color, saved.captured_pairs, saved.score)
        };
        [make(self.next, self.next_color), make(other, self.next_color.opponent())]
    }
}

pub fn write_save<W: Write>(writer: &mut W, state: &SaveState) -> io::Result<()> {
    writeln!(writer, "Board:")?;
    for row in state.rows.iter().rev() {
        let line: String = row.iter().map(|stone| stone.to_char()).collect();
        writeln!(writer, "{line}")?;
    }
    writeln!(writer)?;

    for kind in [PlayerKind::Human, PlayerKind::Computer] {
        let saved = state.saved(kind);
        writeln!(writer, "{kind}:")?;
        writeln!(writer, "Captured pairs: {}", saved.captured_pairs)?;
        writeln!(writer, "Score: {}", saved.score)?;
        writeln!(writer)?;
    }

    writeln!(writer, "Next Player: {} - {}", state.next, state.next_color)
}

/// Walks the non-blank lines of a save
struct Lines {
    lines: std::vec::IntoIter<String>,
}

impl Lines {
    fn next(&mut self, what: &str) -> Result<String, SaveError> {
        self.lines.next().ok_or_else(|| malformed(format!("missing {what}")))
    }

    fn require(&mut self, header: &str) -> Result<(), SaveError> {
        let line = self.next(header)?;
        if line == header {
            Ok(())
        } else {
            Err(malformed(format!("expected '{header}', found '{line}'")))
        }
    }

    fn field<T: std::str::FromStr>(&mut self, label: &str) -> Result<T, SaveError> {
        let line = self.next(label)?;
        let value = line
            .strip_prefix(label)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(|| malformed(format!("expected '{label}:', found '{line}'")))?;
        value.trim().parse().map_err(|_| malformed(format!("bad value for {label}: '{}'", value.trim())))
    }
}

fn parse_row(line: &str) -> Result<Vec<Stone>, SaveError> {
    let row = line
        .chars()
        .map(Stone::from_char)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| malformed(format!("unknown stone in row '{line}'")))?;
    if row.len() != BOARD_SIZE {
        return Err(malformed(format!("row '{line}' should have {BOARD_SIZE} intersections")));
    }
    Ok(row)
}

fn parse_next(line: &str) -> Result<(PlayerKind, Stone), SaveError> {
    let value = line
        .strip_prefix("Next Player:")
        .ok_or_else(|| malformed(format!("expected 'Next Player:', found '{line}'")))?;
    let (kind, color) = value
        .split_once('-')
        .ok_or_else(|| malformed("next player should read '<player> - <color>'"))?;

    let kind = PlayerKind::from_name(kind.trim())
        .ok_or_else(|| malformed(format!("unknown player '{}'", kind.trim())))?;
    let color = Stone::from_name(color.trim())
        .ok_or_else(|| malformed(format!("unknown color '{}'", color.trim())))?;
    Ok((kind, color))
}

pub fn read_save<R: BufRead>(reader: R) -> Result<SaveState, SaveError> {
    let mut kept = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            kept.push(line.to_string());
        }
    }
    let mut lines = Lines { lines: kept.into_iter() };

    lines.require("Board:")?;
    let mut rows = Vec::with_capacity(BOARD_SIZE);
    for _ in 0..BOARD_SIZE {
        rows.push(parse_row(&lines.next("board row")?)?);
    }
    rows.reverse();

    let mut human = None;
    let mut computer = None;
    for _ in 0..2 {
        let header = lines.next("player section")?;
        let kind = header
            .strip_suffix(':')
            .and_then(PlayerKind::from_name)
            .ok_or_else(|| malformed(format!("expected a player section, found '{header}'")))?;
        let saved = SavedPlayer { captured_pairs: lines.field("Captured pairs")?, score: lines.field("Score")? };

        let slot = match kind {
            PlayerKind::Human => &mut human,
            PlayerKind::Computer => &mut computer,
        };
        if slot.replace(saved).is_some() {
            return Err(malformed(format!("{kind} appears twice")));
        }
    }
    let (Some(human), Some(computer)) = (human, computer) else {
        return Err(malformed("both Human and Computer sections are required"));
    };

    let (next, next_color) = parse_next(&lines.next("next player")?)?;
    if let Some(extra) = lines.lines.next() {
        return Err(malformed(format!("unexpected line '{extra}'")));
    }

    Ok(SaveState { rows, human, computer, next, next_color })
}

/// Path for a save called `name` inside `dir`, `.txt` added when missing
pub fn save_path(dir: &Path, name: &str) -> Result<PathBuf, SaveError> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(malformed(format!("'{name}' is not a usable file name")));
    }
    let mut path = dir.join(name);
    if path.extension().map_or(true, |ext| ext != SAVE_EXTENSION) {
        path = dir.join(format!("{name}.{SAVE_EXTENSION}"));
    }
    Ok(path)
}

/// Write a new save. An existing file is never overwritten.
pub fn save_to_file(dir: &Path, name: &str, state: &SaveState) -> Result<PathBuf, SaveError> {
    let path = save_path(dir, name)?;
    fs::create_dir_all(dir)?;

    let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Err(SaveError::Exists(path)),
        Err(err) => return Err(err.into()),
    };
    let mut writer = BufWriter::new(file);
    write_save(&mut writer, state)?;
    writer.flush()?;
    Ok(path)
}

pub fn load_from_file(path: &Path) -> Result<SaveState, SaveError> {
    let file = fs::File::open(path)?;
    read_save(BufReader::new(file))
}

/// Saves in `dir`, sorted by name. A missing directory has none.
pub fn list_saves(dir: &Path) -> Result<Vec<PathBuf>, SaveError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut saves = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == SAVE_EXTENSION) {
            saves.push(path);
        }
    }
    saves.sort();
    Ok(saves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> SaveState {
        let mut rows = vec![vec![Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        rows[9][9] = Stone::White;
        rows[9][10] = Stone::Black;
        rows[0][0] = Stone::Black;
        SaveState {
            rows,
            human: SavedPlayer { captured_pairs: 1, score: 6 },
            computer: SavedPlayer { captured_pairs: 0, score: 2 },
            next: PlayerKind::Computer,
            next_color: Stone::Black,
        }
    }

    fn text_of(state: &SaveState) -> String {
        let mut out = Vec::new();
        write_save(&mut out, state).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pente-{test}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_written_layout() {
        let text = text_of(&sample());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Board:");
        assert_eq!(lines[1], "O".repeat(BOARD_SIZE));
        // Row 10 is the tenth line from the bottom of the grid
        assert_eq!(lines[10], "OOOOOOOOOWBOOOOOOOO");
        assert_eq!(lines[19], format!("B{}", "O".repeat(BOARD_SIZE - 1)));
        assert_eq!(lines[20], "");
        assert_eq!(&lines[21..24], ["Human:", "Captured pairs: 1", "Score: 6"]);
        assert_eq!(&lines[25..28], ["Computer:", "Captured pairs: 0", "Score: 2"]);
        assert_eq!(lines[29], "Next Player: Computer - Black");
    }

    #[test]
    fn test_read_back() {
        let state = sample();
        let read = read_save(Cursor::new(text_of(&state))).unwrap();
        assert_eq!(read, state);

        let [first, second] = read.players();
        assert_eq!(first.kind, PlayerKind::Computer);
        assert_eq!(first.color, Stone::Black);
        assert_eq!(second.color, Stone::White);
        assert_eq!(second.captured_pairs(), 1);
        assert_eq!(second.tournament_score(), 6);
    }

    #[test]
    fn test_sections_in_any_order_and_loose_spacing() {
        let text = text_of(&sample())
            .replace("Human:\nCaptured pairs: 1\nScore: 6\n\n", "")
            .replace("Next Player", "Human:\nCaptured pairs: 1\nScore:   6\n\n\nNext Player");
        let read = read_save(Cursor::new(text)).unwrap();
        assert_eq!(read, sample());
    }

    #[test]
    fn test_malformed_saves() {
        let good = text_of(&sample());
        let cases = [
            good.replacen("Board:", "Grid:", 1),
            good.replacen("OOOOOOOOOWBOOOOOOOO", "OOOOOOOOOWXOOOOOOOO", 1),
            good.replacen("OOOOOOOOOWBOOOOOOOO", "OOOOOOOOOWBOOOOOOO", 1),
            good.replace("Score: 6", "Score: many"),
            good.replace("Computer:", "Human:"),
            good.replace("Computer - Black", "Computer - Red"),
            good.replace("Computer - Black", "Computer"),
            format!("{good}extra\n"),
            good.lines().take(12).collect::<Vec<_>>().join("\n"),
        ];

        for text in cases {
            let result = read_save(Cursor::new(text.clone()));
            assert!(matches!(result, Err(SaveError::Malformed(_))), "accepted:\n{text}");
        }
    }

    #[test]
    fn test_snapshot_of_round() {
        let players = sample().players();
        let round = Round::from_saved(&sample().rows, players).unwrap();
        assert_eq!(SaveState::from_round(&round), sample());
    }

    #[test]
    fn test_save_path_names() {
        let dir = Path::new(SAVE_DIR);
        assert_eq!(save_path(dir, "game").unwrap(), dir.join("game.txt"));
        assert_eq!(save_path(dir, "game.txt").unwrap(), dir.join("game.txt"));
        assert_eq!(save_path(dir, "v1.2").unwrap(), dir.join("v1.2.txt"));
        assert!(matches!(save_path(dir, "  "), Err(SaveError::Malformed(_))));
        assert!(matches!(save_path(dir, "../game"), Err(SaveError::Malformed(_))));
    }

    #[test]
    fn test_files_are_never_overwritten() {
        let dir = scratch_dir("no-overwrite");
        let state = sample();

        let path = save_to_file(&dir, "round", &state).unwrap();
        assert_eq!(load_from_file(&path).unwrap(), state);

        let mut changed = state.clone();
        changed.human.score = 40;
        assert!(matches!(save_to_file(&dir, "round.txt", &changed), Err(SaveError::Exists(p)) if p == path));
        assert_eq!(load_from_file(&path).unwrap(), state);

        assert_eq!(list_saves(&dir).unwrap(), vec![path]);
        fs::remove_dir_all(&dir).unwrap();
        assert!(list_saves(&dir).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = scratch_dir("missing");
        assert!(matches!(load_from_file(&dir.join("nope.txt")), Err(SaveError::Io(_))));
    }
}
