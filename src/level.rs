//! Level data
//!
//! A level is a named set of obstacle rectangles, goal rectangles and a
//! fixed-charge layout, plus the spawn point of the mobile charge. The four
//! boundary walls are not part of the data: every level gets the same ones.
//!
//! Levels are plain serde data so an external loader can supply them as JSON:
//!
//! ```json
//! [
//!   {
//!     "name": "First Contact",
//!     "difficulty": "easy",
//!     "start": [100.0, 300.0],
//!     "obstacles": [{ "x": 200, "y": 150, "width": 25, "height": 100 }],
//!     "goals": [{ "x": 700, "y": 250, "width": 25, "height": 100 }],
//!     "charges": [{ "x": 500, "y": 100, "charge": -1 }]
//!   }
//! ]
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::collision::circle_rect_overlap;

/// Difficulty label shown by level select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectData {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// A fixed charge placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeData {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_fixed_charge")]
    pub charge: f32,
}

impl ChargeData {
    pub const fn new(x: f32, y: f32, charge: f32) -> Self {
        Self { x, y, charge }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

fn default_fixed_charge() -> f32 {
    FIXED_CHARGE
}

fn default_start() -> Vec2 {
    MOBILE_START
}

fn default_goals() -> Vec<RectData> {
    vec![RectData::new(700.0, 250.0, 25.0, 100.0)]
}

fn default_charges() -> Vec<ChargeData> {
    vec![
        ChargeData::new(200.0, 300.0, FIXED_CHARGE),
        ChargeData::new(500.0, 100.0, FIXED_CHARGE),
        ChargeData::new(300.0, 200.0, FIXED_CHARGE),
        ChargeData::new(400.0, 300.0, FIXED_CHARGE),
        ChargeData::new(400.0, 400.0, FIXED_CHARGE),
        ChargeData::new(500.0, 500.0, FIXED_CHARGE),
    ]
}

/// One level as supplied by the loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Spawn point of the mobile charge
    #[serde(default = "default_start")]
    pub start: Vec2,
    pub obstacles: Vec<RectData>,
    #[serde(default = "default_goals")]
    pub goals: Vec<RectData>,
    #[serde(default = "default_charges")]
    pub charges: Vec<ChargeData>,
}

impl LevelData {
    fn invalid(&self, reason: impl Into<String>) -> SimError {
        SimError::InvalidLevel {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }

    /// Check the data can be simulated: finite geometry, positive sizes,
    /// at least one goal, and a spawn point clear of every obstacle and wall
    pub fn validate(&self) -> Result<()> {
        self.validate_with_radius(CHARGE_RADIUS)
    }

    /// Same as [`validate`](Self::validate) for a mobile charge of `radius`
    pub fn validate_with_radius(&self, radius: f32) -> Result<()> {
        if let Some(i) = self.obstacles.iter().position(|r| !r.is_valid()) {
            return Err(self.invalid(format!("obstacle {i} has a bad rectangle")));
        }
        if let Some(i) = self.goals.iter().position(|r| !r.is_valid()) {
            return Err(self.invalid(format!("goal {i} has a bad rectangle")));
        }
        if self.goals.is_empty() {
            return Err(self.invalid("no goal"));
        }
        if let Some(i) = self
            .charges
            .iter()
            .position(|c| !(c.x.is_finite() && c.y.is_finite() && c.charge.is_finite()))
        {
            return Err(self.invalid(format!("charge {i} is not finite")));
        }
        if !(self.start.x.is_finite() && self.start.y.is_finite()) {
            return Err(self.invalid("start is not finite"));
        }
        let blocked = self
            .obstacles
            .iter()
            .chain(boundary_walls().iter())
            .any(|r| circle_rect_overlap(self.start, radius, r.top_left(), r.width, r.height));
        if blocked {
            return Err(self.invalid("start position overlaps an obstacle"));
        }
        Ok(())
    }
}

/// The four walls bounding the play field (left, right, top, bottom)
pub fn boundary_walls() -> [RectData; 4] {
    [
        RectData::new(0.0, 0.0, WALL_THICKNESS, FIELD_HEIGHT),
        RectData::new(FIELD_WIDTH - WALL_THICKNESS, 0.0, WALL_THICKNESS, FIELD_HEIGHT),
        RectData::new(0.0, 0.0, FIELD_WIDTH, WALL_THICKNESS),
        RectData::new(0.0, FIELD_HEIGHT - WALL_THICKNESS, FIELD_WIDTH, WALL_THICKNESS),
    ]
}

/// Ordered, non-empty list of levels
///
/// Deserializing goes through [`LevelSet::new`], so an empty or invalid
/// array is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelData>", into = "Vec<LevelData>")]
pub struct LevelSet {
    levels: Vec<LevelData>,
}

impl LevelSet {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<LevelData>) -> Result<Self> {
        if levels.is_empty() {
            return Err(empty_set());
        }
        for level in &levels {
            level.validate()?;
        }
        log::info!("Loaded {} levels", levels.len());
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self> {
        let levels: Vec<LevelData> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Check every level against a mobile charge of `radius`
    pub fn validate_with_radius(&self, radius: f32) -> Result<()> {
        if self.levels.is_empty() {
            return Err(empty_set());
        }
        self.levels.iter().try_for_each(|level| level.validate_with_radius(radius))
    }

    /// Levels shipped with the game
    pub fn bundled() -> Self {
        Self {
            levels: vec![
                LevelData {
                    name: "First Contact".into(),
                    difficulty: Difficulty::Easy,
                    start: MOBILE_START,
                    obstacles: vec![
                        RectData::new(200.0, 150.0, 25.0, 100.0),
                        RectData::new(400.0, 250.0, 25.0, 100.0),
                        RectData::new(600.0, 350.0, 25.0, 100.0),
                    ],
                    goals: default_goals(),
                    charges: default_charges(),
                },
                LevelData {
                    name: "Slalom".into(),
                    difficulty: Difficulty::Medium,
                    start: Vec2::new(100.0, 500.0),
                    obstacles: vec![
                        RectData::new(250.0, 5.0, 25.0, 350.0),
                        RectData::new(500.0, 245.0, 25.0, 350.0),
                    ],
                    goals: vec![RectData::new(740.0, 40.0, 25.0, 100.0)],
                    charges: vec![
                        ChargeData::new(150.0, 150.0, FIXED_CHARGE),
                        ChargeData::new(380.0, 450.0, FIXED_CHARGE),
                        ChargeData::new(380.0, 120.0, FIXED_CHARGE),
                        ChargeData::new(650.0, 100.0, FIXED_CHARGE),
                    ],
                },
                LevelData {
                    name: "Narrows".into(),
                    difficulty: Difficulty::Hard,
                    start: MOBILE_START,
                    obstacles: vec![
                        RectData::new(300.0, 5.0, 25.0, 260.0),
                        RectData::new(300.0, 335.0, 25.0, 260.0),
                        RectData::new(550.0, 150.0, 25.0, 300.0),
                    ],
                    goals: vec![RectData::new(720.0, 275.0, 25.0, 50.0)],
                    charges: vec![
                        ChargeData::new(200.0, 200.0, FIXED_CHARGE),
                        ChargeData::new(450.0, 300.0, FIXED_CHARGE),
                        ChargeData::new(650.0, 100.0, FIXED_CHARGE),
                        ChargeData::new(650.0, 500.0, FIXED_CHARGE),
                        ChargeData::new(450.0, 80.0, 1.0),
                    ],
                },
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelData> {
        self.levels.iter()
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::bundled()
    }
}

impl TryFrom<Vec<LevelData>> for LevelSet {
    type Error = SimError;

    fn try_from(levels: Vec<LevelData>) -> Result<Self> {
        Self::new(levels)
    }
}

impl From<LevelSet> for Vec<LevelData> {
    fn from(set: LevelSet) -> Self {
        set.levels
    }
}

fn empty_set() -> SimError {
    SimError::InvalidLevel {
        name: String::new(),
        reason: "level set is empty".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_levels_are_valid() {
        let levels = LevelSet::bundled();
        assert_eq!(levels.len(), 3);
        for level in levels.iter() {
            level.validate().unwrap();
        }
    }

    #[test]
    fn test_walls_enclose_field() {
        let walls = boundary_walls();
        assert_eq!(walls[1].x + walls[1].width, FIELD_WIDTH);
        assert_eq!(walls[3].y + walls[3].height, FIELD_HEIGHT);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"[{ "name": "Bare", "obstacles": [{ "x": 200, "y": 150, "width": 25, "height": 100 }] }]"#;
        let levels = LevelSet::from_json(json).unwrap();
        let level = levels.get(0).unwrap();
        assert_eq!(level.difficulty, Difficulty::Easy);
        assert_eq!(level.start, MOBILE_START);
        assert_eq!(level.goals.len(), 1);
        assert_eq!(level.charges.len(), 6);
        assert!(level.charges.iter().all(|c| c.charge == FIXED_CHARGE));
    }

    #[test]
    fn test_json_full() {
        let json = r#"[{
            "name": "Custom",
            "difficulty": "hard",
            "start": [60.0, 60.0],
            "obstacles": [],
            "goals": [{ "x": 700, "y": 500, "width": 50, "height": 50 }],
            "charges": [{ "x": 400, "y": 300, "charge": 2.0 }]
        }]"#;
        let levels = LevelSet::from_json(json).unwrap();
        let level = levels.get(0).unwrap();
        assert_eq!(level.difficulty, Difficulty::Hard);
        assert_eq!(level.start, Vec2::new(60.0, 60.0));
        assert_eq!(level.charges[0].charge, 2.0);
    }

    #[test]
    fn test_rejects_empty_set() {
        assert!(matches!(
            LevelSet::from_json("[]"),
            Err(SimError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_rect() {
        let json = r#"[{ "name": "Flat", "obstacles": [{ "x": 200, "y": 150, "width": 0, "height": 100 }] }]"#;
        let err = LevelSet::from_json(json).unwrap_err();
        assert!(matches!(err, SimError::InvalidLevel { ref name, .. } if name == "Flat"));
    }

    #[test]
    fn test_rejects_blocked_start() {
        let json = r#"[{ "name": "Stuck", "start": [210, 200], "obstacles": [{ "x": 200, "y": 150, "width": 25, "height": 100 }] }]"#;
        assert!(LevelSet::from_json(json).is_err());

        // Inside the left boundary wall
        let json = r#"[{ "name": "Wall", "start": [3, 300], "obstacles": [] }]"#;
        assert!(LevelSet::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_missing_goal() {
        let json = r#"[{ "name": "Endless", "obstacles": [], "goals": [] }]"#;
        assert!(LevelSet::from_json(json).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<LevelSet>("[]").is_err());
        let json = r#"[{ "name": "Endless", "obstacles": [], "goals": [] }]"#;
        assert!(serde_json::from_str::<LevelSet>(json).is_err());

        let levels: LevelSet = serde_json::from_str(r#"[{ "name": "Bare", "obstacles": [] }]"#).unwrap();
        assert_eq!(levels.len(), 1);
        // Serializes back to a plain array
        let json = serde_json::to_value(&levels).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_start_checked_against_radius() {
        // Start 40 units right of the left wall's inner face
        let json = r#"[{ "name": "Near wall", "start": [45, 300], "obstacles": [] }]"#;
        let levels = LevelSet::from_json(json).unwrap();
        levels.validate_with_radius(CHARGE_RADIUS).unwrap();
        assert!(matches!(
            levels.validate_with_radius(50.0),
            Err(SimError::InvalidLevel { .. })
        ));
    }
}
