use macroquad::prelude::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::model::*;
use crate::puzzles;
use crate::renderer::{BUTTON_COLORS, Renderer};
use clipboard_rs::{Clipboard, ClipboardContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    None,
    Pitcher(usize),
}

pub struct GameEngine {
    config: GameConfig,
    puzzles: Vec<Puzzle>,
    /// Leading entries of `puzzles` that came with the game and are never replaced.
    preset_count: usize,
    current_puzzle: usize,
    state: PitcherState,
    buttons: Vec<Button>,
    renderer: Renderer,
    selected: Selection,
    undo_stack: Vec<PitcherState>,
    redo_stack: Vec<PitcherState>,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self::with_puzzles(config, puzzles::catalog())
    }

    pub fn with_puzzles(config: GameConfig, puzzles: Vec<Puzzle>) -> Self {
        let state = puzzles
            .first()
            .map_or_else(|| PitcherState::new(Vec::new()), Puzzle::new_state);
        let preset_count = puzzles.len();
        let mut engine = Self {
            config,
            puzzles,
            preset_count,
            current_puzzle: 0,
            state,
            buttons: Vec::new(),
            renderer: Renderer::new(),
            selected: Selection::None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        };
        engine.rebuild_buttons();
        engine
    }

    fn rebuild_buttons(&mut self) {
        let mut buttons: Vec<Button> = self
            .puzzles
            .iter()
            .enumerate()
            .map(|(i, puzzle)| {
                Button::new(
                    puzzle.get_name(),
                    ControlAction::SelectPuzzle(i),
                    BUTTON_COLORS[1],
                )
            })
            .collect();
        buttons.push(Button::new("Reset", ControlAction::Reset, BUTTON_COLORS[0]));
        if self.config.undo_enable {
            buttons.push(Button::new("Undo", ControlAction::Undo, BUTTON_COLORS[2]));
            buttons.push(Button::new("Redo", ControlAction::Redo, BUTTON_COLORS[3]));
        }
        buttons.push(Button::new("Copy", ControlAction::CopyState, BUTTON_COLORS[4]));
        buttons.push(Button::new("Paste", ControlAction::PasteState, BUTTON_COLORS[5]));
        self.buttons = buttons;
    }

    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.puzzles.get(self.current_puzzle)
    }

    #[allow(dead_code)]
    pub fn get_puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn get_state(&self) -> &PitcherState {
        &self.state
    }

    pub fn selected_pitcher(&self) -> Option<usize> {
        match self.selected {
            Selection::Pitcher(index) => Some(index),
            Selection::None => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.current_puzzle()
            .is_some_and(|puzzle| self.state.is_solved(puzzle.get_goal()))
    }

    pub fn render(&mut self) {
        self.renderer.autoset_viewport();
        let goal = self
            .current_puzzle()
            .map(|p| p.get_goal().to_vec())
            .unwrap_or_default();
        let active_button = self
            .buttons
            .iter()
            .position(|b| b.get_action() == ControlAction::SelectPuzzle(self.current_puzzle));
        let goal_matches = self.state.goal_matches(&goal);
        let selected = self.selected_pitcher();
        let buttons = self.buttons.iter().collect::<Vec<_>>();
        self.renderer.render_game(
            self.state.get_pitchers(),
            &goal,
            &goal_matches,
            &buttons,
            selected,
            active_button,
            self.state.max_capacity(),
            self.config.max_columns,
        );
    }

    pub fn handle_click(&mut self, x: f32, y: f32) {
        if let Some(item) = self.renderer.hit_test(x, y) {
            self.handle_hit_item(item);
        }
    }

    pub fn handle_hit_item(&mut self, item: HitItem) {
        let action = match item {
            HitItem::Button { action } => action,
            HitItem::Pitcher { index } => match self.selected {
                Selection::Pitcher(from_index) if from_index == index => ControlAction::Deselect,
                Selection::Pitcher(from_index) => ControlAction::PourInto(from_index, index),
                Selection::None => ControlAction::SelectPitcher(index),
            },
        };
        self.handle_game_action(action);
    }

    pub fn handle_game_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::SelectPitcher(index) => {
                if index < self.state.len() {
                    debug!("Selected pitcher {}", index);
                    self.selected = Selection::Pitcher(index);
                }
            }
            ControlAction::Deselect => {
                self.selected = Selection::None;
            }
            ControlAction::PourInto(from, to) => {
                self.pour(from, to);
                self.selected = Selection::None;
            }
            ControlAction::SelectPuzzle(index) => {
                self.select_puzzle(index);
            }
            ControlAction::Reset => {
                let Some(puzzle) = self.current_puzzle() else {
                    return;
                };
                let fresh = puzzle.new_state();
                info!("Resetting puzzle {}", puzzle.get_name());
                if fresh != self.state {
                    self.push_undo_state();
                }
                self.load_state(fresh);
            }
            ControlAction::Undo => {
                self.undo();
            }
            ControlAction::Redo => {
                self.redo();
            }
            ControlAction::CopyState => {
                if let Err(err) = self.copy_state() {
                    warn!("Copy failed: {}", err);
                }
            }
            ControlAction::PasteState => {
                if let Err(err) = self.paste_state() {
                    warn!("Paste failed: {}", err);
                }
            }
        }
    }

    fn pour(&mut self, from: usize, to: usize) {
        let before = self.state.clone();
        let moved = self.state.apply_transfer(&TransferAction {
            from_pitcher: from,
            to_pitcher: to,
        });
        if !moved {
            debug!("Pour {} -> {} changed nothing", from, to);
            return;
        }
        debug!(
            "Poured {} -> {}: {} (total {})",
            from,
            to,
            self.state.get_text_representation(),
            self.state.total_volume()
        );
        self.record_undo_state(before);
        if self.is_solved()
            && let Some(puzzle) = self.current_puzzle()
        {
            info!("Solved {}", puzzle.get_name());
        }
    }

    fn select_puzzle(&mut self, index: usize) {
        let Some(puzzle) = self.puzzles.get(index) else {
            return;
        };
        info!("Switching to puzzle {}", puzzle.get_name());
        let fresh = puzzle.new_state();
        self.current_puzzle = index;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.load_state(fresh);
    }

    /// Parses `repr` as a puzzle and makes it active. A name taken by a
    /// preset gets a ` (copy)` suffix; an earlier pasted puzzle of the same
    /// name is replaced.
    pub fn load_puzzle_repr(&mut self, repr: &str) -> Result<(), GameError> {
        let mut puzzle = Puzzle::new_from_repr(repr)?;
        while self.puzzles[..self.preset_count]
            .iter()
            .any(|p| p.get_name() == puzzle.get_name())
        {
            let name = format!("{} (copy)", puzzle.get_name());
            puzzle = puzzle.with_name(name);
        }
        let earlier_paste = self.puzzles[self.preset_count..]
            .iter()
            .position(|p| p.get_name() == puzzle.get_name())
            .map(|offset| self.preset_count + offset);
        let index = match earlier_paste {
            Some(index) => {
                self.puzzles[index] = puzzle;
                index
            }
            None => {
                self.puzzles.push(puzzle);
                self.puzzles.len() - 1
            }
        };
        self.rebuild_buttons();
        self.select_puzzle(index);
        Ok(())
    }

    /// Text for the active puzzle, seeded from the current contents.
    pub fn get_text_representation(&self) -> Option<String> {
        self.current_puzzle()
            .map(|puzzle| puzzle.with_state(&self.state).get_text_representation())
    }

    pub fn load_state(&mut self, state: PitcherState) {
        self.state = state;
        self.selected = Selection::None;
    }

    fn push_undo_state(&mut self) {
        self.record_undo_state(self.state.clone());
    }

    fn record_undo_state(&mut self, snapshot: PitcherState) {
        if self.config.undo_enable {
            self.undo_stack.push(snapshot);
            self.redo_stack.clear();
        }
    }

    fn undo(&mut self) {
        if self.config.undo_enable
            && let Some(previous_state) = self.undo_stack.pop()
        {
            let current = std::mem::replace(&mut self.state, previous_state);
            self.redo_stack.push(current);
            self.selected = Selection::None;
        }
    }

    fn redo(&mut self) {
        if self.config.undo_enable
            && let Some(next_state) = self.redo_stack.pop()
        {
            let current = std::mem::replace(&mut self.state, next_state);
            self.undo_stack.push(current);
            self.selected = Selection::None;
        }
    }

    fn copy_state(&self) -> Result<(), GameError> {
        let Some(repr) = self.get_text_representation() else {
            return Ok(());
        };
        let ctx = ClipboardContext::new().map_err(|e| GameError::Clipboard(e.to_string()))?;
        ctx.set_text(repr)
            .map_err(|e| GameError::Clipboard(e.to_string()))
    }

    fn paste_state(&mut self) -> Result<(), GameError> {
        let ctx = ClipboardContext::new().map_err(|e| GameError::Clipboard(e.to_string()))?;
        let repr = ctx
            .get_text()
            .map_err(|e| GameError::Clipboard(e.to_string()))?;
        self.load_puzzle_repr(&repr)
    }
}
