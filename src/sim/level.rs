//! Level layouts
//!
//! `LevelData` is also the export format written by level-authoring tools, so
//! its field names follow that JSON shape (camelCase, `type` for power-ups).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::body::Rect;
use super::player::PowerUpKind;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemySpawn {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub patrol_distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSpawn {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: PowerUpKind,
}

/// Entity placement for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub player_start: Point,
    pub platforms: Vec<Rect>,
    pub coins: Vec<Point>,
    pub enemies: Vec<EnemySpawn>,
    pub power_ups: Vec<PowerUpSpawn>,
    pub goal: Rect,
}

impl LevelData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A level ready to load: its number, world bounds and layout
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub number: u32,
    pub width: f32,
    pub height: f32,
    pub data: LevelData,
}

impl Level {
    pub fn new(number: u32, data: LevelData) -> Self {
        Self {
            number,
            width: LEVEL_WIDTH,
            height: LEVEL_HEIGHT,
            data,
        }
    }

    /// Full-width floor along the bottom of the level
    pub fn ground(&self) -> Rect {
        Rect::new(
            0.0,
            self.height - GROUND_THICKNESS,
            self.width,
            GROUND_THICKNESS,
        )
    }

    /// Ground followed by the authored platforms, in collision order
    pub fn platforms(&self) -> Vec<Rect> {
        std::iter::once(self.ground())
            .chain(self.data.platforms.iter().copied())
            .collect()
    }
}

/// Registry of levels by number
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: BTreeMap<u32, LevelData>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelCatalog {
    /// The levels shipped with the game
    pub fn builtin() -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(1, level_one());
        levels.insert(2, level_two());
        Self { levels }
    }

    /// Look up a level, falling back to level 1 for unknown numbers
    pub fn get(&self, number: u32) -> Level {
        match self.levels.get(&number) {
            Some(data) => Level::new(number, data.clone()),
            None => {
                log::debug!("Level {} not found, falling back to level 1", number);
                let data = self.levels.get(&1).cloned().unwrap_or_else(level_one);
                Level::new(1, data)
            }
        }
    }

    pub fn contains(&self, number: u32) -> bool {
        self.levels.contains_key(&number)
    }

    /// Add or replace a level (e.g. one loaded from an exported file)
    pub fn insert(&mut self, number: u32, data: LevelData) {
        self.levels.insert(number, data);
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, y, width, height)
}

fn point(x: f32, y: f32) -> Point {
    Point { x, y }
}

fn enemy(x: f32, y: f32, speed: f32, patrol_distance: f32) -> EnemySpawn {
    EnemySpawn {
        x,
        y,
        speed,
        patrol_distance,
    }
}

fn power_up(x: f32, y: f32, kind: PowerUpKind) -> PowerUpSpawn {
    PowerUpSpawn { x, y, kind }
}

fn level_one() -> LevelData {
    LevelData {
        player_start: point(50.0, 400.0),
        platforms: vec![
            rect(200.0, 450.0, 200.0, 30.0),
            rect(500.0, 400.0, 150.0, 30.0),
            rect(700.0, 350.0, 200.0, 30.0),
            rect(1000.0, 400.0, 150.0, 30.0),
            rect(1200.0, 350.0, 100.0, 30.0),
            rect(1400.0, 300.0, 200.0, 30.0),
            rect(1700.0, 350.0, 200.0, 30.0),
        ],
        coins: vec![
            point(250.0, 400.0),
            point(300.0, 400.0),
            point(550.0, 350.0),
            point(800.0, 300.0),
            point(1050.0, 350.0),
            point(1230.0, 300.0),
            point(1450.0, 250.0),
            point(1500.0, 250.0),
            point(1780.0, 300.0),
            point(1830.0, 300.0),
        ],
        enemies: vec![
            enemy(300.0, 518.0, 50.0, 150.0),
            enemy(800.0, 318.0, 60.0, 150.0),
            enemy(1500.0, 268.0, 70.0, 150.0),
        ],
        power_ups: vec![
            power_up(600.0, 350.0, PowerUpKind::Speed),
            power_up(1300.0, 300.0, PowerUpKind::Jump),
        ],
        goal: rect(1900.0, 510.0, 40.0, 150.0),
    }
}

fn level_two() -> LevelData {
    LevelData {
        player_start: point(50.0, 400.0),
        platforms: vec![
            rect(180.0, 490.0, 120.0, 30.0),
            rect(380.0, 430.0, 120.0, 30.0),
            rect(580.0, 370.0, 160.0, 30.0),
            rect(820.0, 310.0, 120.0, 30.0),
            rect(1020.0, 350.0, 200.0, 30.0),
            rect(1300.0, 420.0, 120.0, 30.0),
            rect(1480.0, 360.0, 120.0, 30.0),
            rect(1660.0, 300.0, 220.0, 30.0),
        ],
        coins: vec![
            point(220.0, 440.0),
            point(420.0, 380.0),
            point(620.0, 320.0),
            point(680.0, 320.0),
            point(860.0, 260.0),
            point(1080.0, 300.0),
            point(1140.0, 300.0),
            point(1340.0, 370.0),
            point(1520.0, 310.0),
            point(1720.0, 250.0),
            point(1780.0, 250.0),
            point(1840.0, 250.0),
        ],
        enemies: vec![
            enemy(400.0, 518.0, 60.0, 200.0),
            enemy(600.0, 338.0, 50.0, 100.0),
            enemy(1050.0, 318.0, 70.0, 130.0),
            enemy(1300.0, 518.0, 80.0, 250.0),
            enemy(1680.0, 268.0, 70.0, 150.0),
        ],
        power_ups: vec![
            power_up(860.0, 220.0, PowerUpKind::Jump),
            power_up(1100.0, 518.0, PowerUpKind::Speed),
        ],
        goal: rect(1920.0, 402.0, 40.0, 150.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_level_one() {
        let catalog = LevelCatalog::builtin();
        let fallback = catalog.get(9999);
        let first = catalog.get(1);
        assert_eq!(fallback, first);
        assert_eq!(fallback.number, 1);
    }

    #[test]
    fn test_builtin_levels() {
        let catalog = LevelCatalog::builtin();
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.numbers().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(catalog.get(2).number, 2);
    }

    #[test]
    fn test_ground_prepended() {
        let level = LevelCatalog::builtin().get(1);
        let platforms = level.platforms();
        assert_eq!(platforms.len(), level.data.platforms.len() + 1);
        assert_eq!(platforms[0], Rect::new(0.0, 552.0, 2000.0, 48.0));
    }

    #[test]
    fn test_json_round_trip() {
        for number in [1, 2] {
            let data = LevelCatalog::builtin().get(number).data;
            let json = data.to_json().unwrap();
            let parsed = LevelData::from_json(&json).unwrap();
            assert_eq!(parsed, data);
        }
    }

    #[test]
    fn test_parse_exported_shape() {
        let json = r#"{
            "playerStart": {"x": 10, "y": 20},
            "platforms": [{"x": 0, "y": 500, "width": 100, "height": 30}],
            "coins": [{"x": 40, "y": 450}],
            "enemies": [{"x": 60, "y": 468, "speed": 50, "patrolDistance": 80}],
            "powerUps": [{"x": 90, "y": 450, "type": "jump"}],
            "goal": {"x": 300, "y": 400, "width": 40, "height": 150}
        }"#;
        let data = LevelData::from_json(json).unwrap();
        assert_eq!(data.player_start, Point { x: 10.0, y: 20.0 });
        assert_eq!(data.enemies[0].patrol_distance, 80.0);
        assert_eq!(data.power_ups[0].kind, PowerUpKind::Jump);

        let value: serde_json::Value = serde_json::from_str(&data.to_json().unwrap()).unwrap();
        assert_eq!(value["powerUps"][0]["type"], "jump");
        assert_eq!(value["playerStart"]["x"], 10.0);
    }

    #[test]
    fn test_rejects_unknown_power_up() {
        let json = r#"{
            "playerStart": {"x": 0, "y": 0},
            "platforms": [], "coins": [], "enemies": [],
            "powerUps": [{"x": 0, "y": 0, "type": "fly"}],
            "goal": {"x": 0, "y": 0, "width": 1, "height": 1}
        }"#;
        assert!(LevelData::from_json(json).is_err());
    }

    #[test]
    fn test_custom_level_insert() {
        let mut catalog = LevelCatalog::builtin();
        let mut data = catalog.get(1).data;
        data.coins.clear();
        catalog.insert(7, data.clone());
        assert!(catalog.contains(7));
        assert_eq!(catalog.get(7).data, data);
    }
}
