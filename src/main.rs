//! Pixel Jumper entry point
//!
//! Native: a headless runner that plays a level with a scripted pilot and
//! reports the outcome. The browser build is driven from JS through
//! `platform::web::WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result, ensure};
    use clap::Parser;

    use pixel_jumper::highscores::{HighScoreEntry, HighScores};
    use pixel_jumper::persistence::FileStorage;
    use pixel_jumper::sim::{Engine, GameEvent, LevelData, PlayerInput};
    use pixel_jumper::{GameProgress, Settings};

    /// Seconds between pilot hops when nothing else triggers a jump
    const JUMP_CADENCE: f32 = 1.2;
    /// Seconds without horizontal progress before the pilot hops
    const STUCK_THRESHOLD: f32 = 0.1;
    /// Distance at which the pilot hops over an approaching enemy
    const ENEMY_LOOKAHEAD: f32 = 64.0;

    #[derive(Parser)]
    #[command(name = "pixel-jumper")]
    #[command(about = "Run a Pixel Jumper level headlessly with a scripted pilot")]
    struct Args {
        /// Level number to play
        #[arg(long, default_value_t = 1)]
        level: u32,

        /// Play a level exported as JSON instead of a built-in one
        #[arg(long)]
        level_file: Option<PathBuf>,

        /// Simulated seconds before giving up
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,

        /// Simulation updates per second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Directory for progress, high scores and settings
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Write the selected level as JSON to this path and exit
        #[arg(long)]
        export_level: Option<PathBuf>,
    }

    /// Holds right and hops when blocked, near an enemy, or on a cadence
    struct Pilot {
        last_x: f32,
        stuck_time: f32,
        since_jump: f32,
    }

    impl Pilot {
        fn new() -> Self {
            Self {
                last_x: f32::NAN,
                stuck_time: 0.0,
                since_jump: 0.0,
            }
        }

        fn steer(&mut self, engine: &Engine, dt: f32) -> PlayerInput {
            let player = engine.player();
            let rect = *player.rect();

            if (rect.x - self.last_x).abs() < 0.5 {
                self.stuck_time += dt;
            } else {
                self.stuck_time = 0.0;
            }
            self.last_x = rect.x;
            self.since_jump += dt;

            let enemy_ahead = engine.enemies().iter().any(|e| {
                let gap = e.rect.left() - rect.right();
                (0.0..ENEMY_LOOKAHEAD).contains(&gap)
                    && (e.rect.bottom() - rect.bottom()).abs() < rect.height
            });

            let jump = player.grounded()
                && (self.stuck_time > STUCK_THRESHOLD
                    || enemy_ahead
                    || self.since_jump >= JUMP_CADENCE);
            if jump {
                self.since_jump = 0.0;
            }

            PlayerInput {
                left: false,
                right: true,
                jump,
            }
        }
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();
        ensure!(args.fps > 0, "--fps must be positive");
        ensure!(
            args.seconds.is_finite() && args.seconds >= 0.0,
            "--seconds must be a non-negative number"
        );

        let mut storage = args.save_dir.as_ref().map(FileStorage::new);
        let settings = storage.as_ref().map(Settings::load).unwrap_or_default();

        let mut engine = Engine::new(&settings);
        match &args.level_file {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed reading level {}", path.display()))?;
                let data = LevelData::from_json(&json)
                    .with_context(|| format!("invalid level file {}", path.display()))?;
                engine.load_level_data(args.level, data);
            }
            None => engine.load_level(args.level),
        }

        if let Some(path) = &args.export_level {
            let level = engine.catalog().get(engine.level_number());
            let json = level.data.to_json().context("failed serializing level")?;
            fs::write(path, json)
                .with_context(|| format!("failed writing {}", path.display()))?;
            println!("Exported level {} to {}", level.number, path.display());
            return Ok(());
        }

        log::info!("Pixel Jumper (native) starting level {}", engine.level_number());

        let mut progress = GameProgress::new(settings.starting_lives);
        progress.level = engine.level_number();

        let dt = 1.0 / args.fps as f32;
        let max_ticks = (args.seconds * args.fps as f32).ceil() as u64;
        let mut pilot = Pilot::new();
        let mut events = Vec::new();
        let mut completed = false;

        for _ in 0..max_ticks {
            let input = pilot.steer(&engine, dt);
            events.clear();
            engine.update(dt, &input, &mut events);
            progress.advance(dt);

            for event in &events {
                log::debug!("event: {}", event.name());
                progress.apply(event);
                if *event == GameEvent::LevelComplete {
                    completed = true;
                }
            }

            if completed || progress.is_game_over() {
                break;
            }
        }

        let outcome = if completed {
            "COMPLETE"
        } else if progress.is_game_over() {
            "GAME OVER"
        } else {
            "TIMED OUT"
        };

        println!("=== LEVEL {} {} ===", progress.level, outcome);
        println!("  Score:  {}", progress.score);
        println!("  Coins:  {}", progress.coins);
        println!("  Lives:  {}", progress.lives);
        println!("  Time:   {:.2}s", progress.game_time);
        println!(
            "  Player: ({:.1}, {:.1})",
            engine.player().rect().x,
            engine.player().rect().y
        );

        if let Some(storage) = storage.as_mut() {
            let mut high_scores = HighScores::load(&*storage);
            if completed || progress.is_game_over() {
                let entry = HighScoreEntry {
                    score: progress.score,
                    coins: progress.coins,
                    level: progress.level,
                    completion_time: progress.game_time.floor(),
                    timestamp: now_ms(),
                };
                if let Some(rank) = high_scores.add_score(entry) {
                    println!("  New high score! Rank #{rank}");
                    high_scores.save(storage);
                }
            }

            if completed {
                progress.next_level();
            }
            progress.save(storage);
            log::info!("Saved progress to {}", storage.dir().display());
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
