use macroquad::prelude::{Conf, warn};

const UNDO_ENV_VAR: &str = "PITCHER_PUZZLE_UNDO";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub undo_enable: bool,
    /// Pitchers per row before the layout wraps.
    pub max_columns: usize,
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            undo_enable: true,
            max_columns: 6,
            window_title: "Pitcher Puzzle".to_string(),
            window_width: 1024,
            window_height: 720,
        }
    }
}

impl GameConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_undo_override(std::env::var(UNDO_ENV_VAR).ok().as_deref())
    }

    fn with_undo_override(mut self, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None => {}
            Some("1" | "true" | "on") => self.undo_enable = true,
            Some("0" | "false" | "off") => self.undo_enable = false,
            Some(other) => warn!("Ignoring {UNDO_ENV_VAR}={other:?}, expected 0 or 1"),
        }
        self
    }

    pub fn window_conf(&self) -> Conf {
        Conf {
            window_title: self.window_title.clone(),
            window_width: self.window_width,
            window_height: self.window_height,
            high_dpi: true,
            ..Default::default()
        }
    }
}
