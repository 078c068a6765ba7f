//! Main application for the Pente GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, ScrollArea, SidePanel, TopBottomPanel};

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::GameState;
use super::theme::*;
use crate::game::round::CAPTURE_WIN_PAIRS;
use crate::game::{Coin, Player};

/// Which modal window is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialog {
    None,
    Save,
    Load,
}

pub struct PenteApp {
    state: GameState,
    board_view: BoardView,
    dialog: Dialog,
}

impl Default for PenteApp {
    fn default() -> Self {
        Self {
            state: GameState::default(),
            board_view: BoardView::default(),
            dialog: Dialog::None,
        }
    }
}

impl PenteApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Tournament").clicked() {
                        self.state.new_tournament();
                        ui.close_menu();
                    }
                    if ui.button("Undo (U)").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Save...").clicked() {
                        self.dialog = Dialog::Save;
                        ui.close_menu();
                    }
                    if ui.button("Load...").clicked() {
                        self.state.refresh_saves();
                        self.dialog = Dialog::Load;
                        ui.close_menu();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let played = self.state.tournament.rounds_played();
                    ui.label(format!("Rounds played: {played}"));
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(260.0)
            .max_width(320.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("PENTE").size(22.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);
                self.render_players_card(ui);
                ui.add_space(10.0);
                self.render_actions_card(ui);

                if let Some(msg) = self.state.message.clone() {
                    ui.add_space(10.0);
                    Frame::new()
                        .fill(MESSAGE_BG)
                        .corner_radius(CornerRadius::same(8))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
                        });
                }

                ui.add_space(10.0);
                self.render_log_card(ui);
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            let color = if self.state.tournament.round().is_over() || self.state.finished {
                ROUND_OVER
            } else if self.state.is_human_turn() {
                STATUS_READY
            } else {
                STATUS_WAITING
            };
            ui.label(RichText::new(self.state.status()).size(15.0).strong().color(color));

            if let Some(restriction) = self.state.tournament.round().restriction() {
                ui.add_space(4.0);
                let notice = crate::game::LogEntry::Restriction(restriction).to_string();
                ui.label(RichText::new(notice).size(10.0).color(TEXT_SECONDARY));
            }
        });
    }

    /// Captured pairs for the round and tournament scores
    fn render_players_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("PLAYERS").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            for player in [self.state.tournament.human(), self.state.tournament.computer()] {
                Self::render_player_row(ui, player);
                ui.add_space(4.0);
            }
        });
    }

    fn render_player_row(ui: &mut egui::Ui, player: &Player) {
        let title = match player.color {
            crate::Stone::Empty => player.name().to_string(),
            _ => player.tag().to_string(),
        };
        ui.label(RichText::new(title).size(13.0).strong().color(TEXT_PRIMARY));
        ui.horizontal(|ui| {
            let pairs = player.captured_pairs();
            let pair_color = if pairs + 1 >= CAPTURE_WIN_PAIRS { STATUS_WAITING } else { TEXT_SECONDARY };
            ui.label(RichText::new(format!("Captured pairs: {pairs}/{CAPTURE_WIN_PAIRS}")).size(11.0).color(pair_color));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let score = player.tournament_score();
                ui.label(RichText::new(format!("Score: {score}")).size(11.0).color(TEXT_SECONDARY));
            });
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let human_turn = self.state.is_human_turn();
            let round = self.state.tournament.round();
            let can_undo = !self.state.finished && round.can_undo();
            let round_over = !self.state.finished && round.is_over();

            ui.horizontal(|ui| {
                if ui.add_enabled(human_turn, egui::Button::new("Hint (H)")).clicked() {
                    self.state.request_hint();
                }
                if ui.add_enabled(can_undo, egui::Button::new("Undo (U)")).clicked() {
                    self.state.undo();
                }
            });
            ui.horizontal(|ui| {
                if ui.add_enabled(round_over, egui::Button::new("Next Round")).clicked() {
                    self.state.next_round();
                }
                if ui.add_enabled(!self.state.finished, egui::Button::new("End Tournament")).clicked() {
                    self.state.end_tournament();
                }
            });
        });
    }

    fn render_log_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("LOG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);
            ScrollArea::vertical().stick_to_bottom(true).auto_shrink([false, false]).show(ui, |ui| {
                for entry in self.state.tournament.log().entries() {
                    ui.label(RichText::new(entry.to_string()).size(11.0).color(TEXT_SECONDARY));
                }
            });
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let round = self.state.tournament.round();
            let overlay = BoardOverlay {
                turn: round.current_player().color,
                last_move: round.board().last_position(),
                hint: self.state.hint,
                accepting_input: self.state.is_human_turn() && self.dialog == Dialog::None,
            };

            if let Some(pos) = self.board_view.show(ui, round.board(), &overlay) {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Shown until the human calls heads or tails
    fn render_coin_toss(&mut self, ctx: &Context) {
        if !self.state.tournament.awaiting_toss() {
            return;
        }
        egui::Window::new("Coin Toss")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Call the coin. The winner plays White and goes first.");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    for call in [Coin::Heads, Coin::Tails] {
                        if ui.button(call.to_string()).clicked() {
                            self.state.call_coin(call);
                        }
                    }
                });
            });
    }

    fn render_dialogs(&mut self, ctx: &Context) {
        let mut open = true;
        match self.dialog {
            Dialog::None => return,
            Dialog::Save => {
                egui::Window::new("Save Game").open(&mut open).collapsible(false).show(ctx, |ui| {
                    ui.label("File name:");
                    ui.text_edit_singleline(&mut self.state.save_name);
                    if ui.button("Save").clicked() && self.state.save().is_ok() {
                        self.dialog = Dialog::None;
                    }
                });
            }
            Dialog::Load => {
                egui::Window::new("Load Game").open(&mut open).collapsible(false).show(ctx, |ui| {
                    let mut chosen = None;
                    for path in &self.state.saves {
                        if ui.button(path.display().to_string()).clicked() {
                            chosen = Some(path.clone());
                        }
                    }
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.state.load_path);
                        if ui.button("Load").clicked() {
                            chosen = Some(self.state.load_path.trim().into());
                        }
                    });
                    if let Some(path) = chosen {
                        if self.state.load(&path).is_ok() {
                            self.dialog = Dialog::None;
                        }
                    }
                });
            }
        }
        if !open {
            self.dialog = Dialog::None;
        }
    }

    fn handle_input(&mut self, ctx: &Context) {
        if self.dialog != Dialog::None {
            return;
        }
        let (hint, undo) = ctx.input(|i| (i.key_pressed(egui::Key::H), i.key_pressed(egui::Key::U)));
        if hint {
            self.state.request_hint();
        }
        if undo {
            self.state.undo();
        }
    }
}

impl eframe::App for PenteApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // The human's last stone was already drawn in the previous frame
        self.state.play_computer_turn();

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
        self.render_coin_toss(ctx);
        self.render_dialogs(ctx);

        if self.state.tournament.computer_to_move() && !self.state.finished {
            ctx.request_repaint();
        }
    }
}
