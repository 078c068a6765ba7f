//! GUI-side game state: the tournament plus what the panels show

use std::path::{Path, PathBuf};

use crate::game::save::{self, SaveError, SAVE_DIR};
use crate::game::{Coin, LogEntry, PlayerKind, Tournament};
use crate::Pos;

/// Main game state
pub struct GameState {
    pub tournament: Tournament,
    pub hint: Option<Pos>,
    /// Last problem to show the user
    pub message: Option<String>,
    /// Set once the human ends the tournament
    pub finished: bool,
    pub save_name: String,
    pub load_path: String,
    pub saves: Vec<PathBuf>,
    save_dir: PathBuf,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tournament::new())
    }
}

impl GameState {
    pub fn new(tournament: Tournament) -> Self {
        Self::with_save_dir(tournament, SAVE_DIR)
    }

    pub fn with_save_dir(tournament: Tournament, save_dir: impl AsRef<Path>) -> Self {
        Self {
            tournament,
            hint: None,
            message: None,
            finished: false,
            save_name: String::new(),
            load_path: String::new(),
            saves: Vec::new(),
            save_dir: save_dir.as_ref().to_path_buf(),
        }
    }

    /// Throw away everything and wait for a new coin toss
    pub fn new_tournament(&mut self) {
        let save_dir = std::mem::take(&mut self.save_dir);
        *self = Self::with_save_dir(Tournament::new(), save_dir);
    }

    pub fn is_human_turn(&self) -> bool {
        let round = self.tournament.round();
        !self.finished
            && !self.tournament.awaiting_toss()
            && !round.is_over()
            && !round.current_player().is_computer()
    }

    pub fn call_coin(&mut self, call: Coin) {
        self.tournament.coin_toss(call);
        self.hint = None;
        self.message = None;
    }

    /// Place the human's stone
    pub fn try_place_stone(&mut self, pos: Pos) -> Result<(), String> {
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        let input = pos.to_string();
        self.tournament.play_turn(Some(input.as_str())).map_err(|err| err.to_string())?;
        self.hint = None;
        self.message = None;
        Ok(())
    }

    /// Let the computer move if it is its turn
    pub fn play_computer_turn(&mut self) {
        if self.finished || !self.tournament.computer_to_move() {
            return;
        }
        if let Err(err) = self.tournament.play_turn(None) {
            self.message = Some(err.to_string());
        }
    }

    pub fn request_hint(&mut self) {
        if !self.is_human_turn() {
            return;
        }
        self.hint = self.tournament.hint().map(|help| help.pos);
        if self.hint.is_none() {
            self.message = Some("The computer has no move to recommend".to_string());
        }
    }

    pub fn undo(&mut self) {
        match self.tournament.undo_turn() {
            Ok(_) => {
                self.hint = None;
                self.message = None;
            }
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    pub fn next_round(&mut self) {
        if self.finished || !self.tournament.round().is_over() {
            return;
        }
        self.tournament.start_round();
        self.hint = None;
        self.message = None;
    }

    pub fn end_tournament(&mut self) {
        if !self.finished {
            self.tournament.finish();
            self.finished = true;
            self.hint = None;
        }
    }

    pub fn save(&mut self) -> Result<PathBuf, SaveError> {
        let state = self.tournament.snapshot();
        let result = save::save_to_file(&self.save_dir, &self.save_name, &state);
        self.report(result.as_ref().ok().cloned().map(LogEntry::Saved), &result);
        result
    }

    pub fn load(&mut self, path: &Path) -> Result<(), SaveError> {
        let result = save::load_from_file(path)
            .and_then(|state| self.tournament.load(&state).map_err(SaveError::from));
        if result.is_ok() {
            self.finished = false;
            self.hint = None;
        }
        self.report(result.as_ref().ok().map(|_| LogEntry::Loaded(path.to_path_buf())), &result);
        result
    }

    fn report<T>(&mut self, entry: Option<LogEntry>, result: &Result<T, SaveError>) {
        match (entry, result) {
            (Some(entry), _) => {
                self.tournament.note(entry);
                self.message = None;
            }
            (None, Err(err)) => self.message = Some(err.to_string()),
            (None, Ok(_)) => {}
        }
    }

    pub fn refresh_saves(&mut self) {
        match save::list_saves(&self.save_dir) {
            Ok(saves) => self.saves = saves,
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// Headline for the turn card
    pub fn status(&self) -> String {
        let round = self.tournament.round();
        if self.finished {
            match self.tournament.winner() {
                Some(PlayerKind::Human) => "You won the tournament!".to_string(),
                Some(PlayerKind::Computer) => "The computer won the tournament".to_string(),
                None => "The tournament is a tie".to_string(),
            }
        } else if self.tournament.awaiting_toss() {
            "Call the coin toss".to_string()
        } else if let Some(end) = round.end() {
            LogEntry::RoundEnd(end).to_string()
        } else {
            format!("{}'s turn", round.current_player().tag())
        }
    }
}
