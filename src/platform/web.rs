//! Browser host
//!
//! JS owns the canvas, the render pass and the animation loop. It calls
//! `update(dt)` once per frame, forwards key events, then reads positions
//! and drained event names back out.

use wasm_bindgen::prelude::*;

use crate::highscores::{HighScoreEntry, HighScores};
use crate::input::InputState;
use crate::persistence::LocalStorage;
use crate::progress::GameProgress;
use crate::settings::Settings;
use crate::sim::{Engine, GameEvent, PlayerInput};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Pixel Jumper starting...");
}

/// Game instance exported to JS
#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    input: InputState,
    touch: PlayerInput,
    progress: GameProgress,
    high_scores: HighScores,
    storage: LocalStorage,
    /// Events since the last `drain_events`
    pending: Vec<GameEvent>,
    paused: bool,
    level_completed: bool,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let storage = LocalStorage;
        let settings = Settings::load(&storage);
        let mut progress = GameProgress::load(&storage)
            .unwrap_or_else(|| GameProgress::new(settings.starting_lives));
        let high_scores = HighScores::load(&storage);

        let mut engine = Engine::new(&settings);
        engine.load_level(progress.level);
        progress.level = engine.level_number();

        WebGame {
            engine,
            input: InputState::new(),
            touch: PlayerInput::default(),
            progress,
            high_scores,
            storage,
            pending: Vec::new(),
            paused: false,
            level_completed: false,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32) {
        if self.paused || self.level_completed || self.progress.is_game_over() {
            return;
        }

        let input = self.input.merge(&self.touch);
        let start = self.pending.len();
        self.engine.update(dt, &input, &mut self.pending);
        self.progress.advance(dt);

        for event in &self.pending[start..] {
            self.progress.apply(event);
            if *event == GameEvent::LevelComplete {
                self.level_completed = true;
            }
        }

        if self.level_completed {
            self.record_high_score();
        } else if self.progress.is_game_over() {
            log::info!("Game over (score {})", self.progress.score);
            self.record_high_score();
        }

        self.progress.save(&mut self.storage);
    }

    fn record_high_score(&mut self) {
        let entry = HighScoreEntry {
            score: self.progress.score,
            coins: self.progress.coins,
            level: self.progress.level,
            completion_time: self.progress.game_time.floor(),
            timestamp: js_sys::Date::now(),
        };
        if let Some(rank) = self.high_scores.add_score(entry) {
            log::info!("New high score, rank {}", rank);
            self.high_scores.save(&mut self.storage);
        }
    }

    /// Returns true if the key is bound, so JS can `preventDefault`
    pub fn key_down(&mut self, key: &str) -> bool {
        if matches!(key, "p" | "P" | "Escape") {
            self.paused = !self.paused;
            return true;
        }
        self.input.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Held state of the on-screen buttons
    pub fn set_touch_input(&mut self, left: bool, right: bool, jump: bool) {
        self.touch = PlayerInput { left, right, jump };
    }

    /// Window lost focus: drop held keys and pause
    pub fn blur(&mut self) {
        self.input.clear();
        self.touch = PlayerInput::default();
        self.paused = true;
    }

    pub fn load_level(&mut self, number: u32) {
        self.level_completed = false;
        self.engine.load_level(number);
        self.progress.level = self.engine.level_number();
    }

    pub fn reset_level(&mut self) {
        self.level_completed = false;
        self.engine.reset_level();
    }

    pub fn next_level(&mut self) {
        self.progress.next_level();
        self.load_level(self.progress.level);
    }

    /// Start over from level 1 with fresh counters
    pub fn restart(&mut self) {
        self.progress.reset();
        self.paused = false;
        self.load_level(1);
    }

    /// Event names since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<String> {
        self.pending.drain(..).map(|e| e.name().to_string()).collect()
    }

    pub fn player_x(&self) -> f32 {
        self.engine.player().rect().x
    }

    pub fn player_y(&self) -> f32 {
        self.engine.player().rect().y
    }

    pub fn player_state(&self) -> String {
        format!("{:?}", self.engine.player().state())
    }

    pub fn player_facing_left(&self) -> bool {
        self.engine.player().facing == crate::sim::Facing::Left
    }

    pub fn player_blink_dimmed(&self) -> bool {
        self.engine.player().blink_dimmed()
    }

    pub fn camera_x(&self) -> f32 {
        self.engine.camera().pos.x
    }

    pub fn camera_y(&self) -> f32 {
        self.engine.camera().pos.y
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.engine.camera_mut().resize(width, height);
    }

    pub fn level(&self) -> u32 {
        self.engine.level_number()
    }

    pub fn score(&self) -> u64 {
        self.progress.score
    }

    pub fn lives(&self) -> u8 {
        self.progress.lives
    }

    pub fn coins(&self) -> u32 {
        self.progress.coins
    }

    pub fn game_time(&self) -> f64 {
        self.progress.game_time
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn level_completed(&self) -> bool {
        self.level_completed
    }

    pub fn game_over(&self) -> bool {
        self.progress.is_game_over()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.high_scores.top_score()
    }

    /// Current scene as JSON for the JS renderer
    pub fn scene_json(&self) -> String {
        let scene = serde_json::json!({
            "platforms": self.engine.platforms(),
            "coins": self.engine.coins().iter().map(|c| serde_json::json!({
                "rect": c.rect,
                "squash": c.squash(),
            })).collect::<Vec<_>>(),
            "enemies": self.engine.enemies().iter().map(|e| serde_json::json!({
                "rect": e.rect,
                "frame": e.frame,
                "direction": e.patrol_direction,
            })).collect::<Vec<_>>(),
            "powerUps": self.engine.power_ups().iter().map(|p| serde_json::json!({
                "rect": p.rect,
                "type": p.kind,
                "floatOffset": p.float_offset,
                "dimmed": p.dimmed(),
            })).collect::<Vec<_>>(),
            "goal": self.engine.goal(),
            "playerFrame": self.engine.player().frame,
        });
        scene.to_string()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
