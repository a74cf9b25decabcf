use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Advanced,
}

/// A pose category shown as a filter chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseCategory {
    pub id: String,
    pub name: String,
}

/// A pose in the inspiration library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// Matches a `PoseCategory::id`.
    pub category: String,
    pub likes: u32,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipCategory {
    pub id: String,
    pub name: String,
}

/// A photography tip article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Display name of the category, e.g. "Lighting".
    pub category: String,
    pub read_time: String,
}

/// An entry in the enhancement picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementOption {
    pub id: String,
    pub name: String,
    pub description: String,
}
