use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::content_models::{EnhancementOption, Pose, PoseCategory, Tip, TipCategory};
use crate::models::error::CaptureError;
use crate::traits::content_source::ContentSource;

/// A content source backed by records loaded once, typically from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticContent {
    pub pose_categories: Vec<PoseCategory>,
    pub poses: Vec<Pose>,
    pub tip_categories: Vec<TipCategory>,
    pub tips: Vec<Tip>,
    pub enhancement_options: Vec<EnhancementOption>,
}

impl StaticContent {
    pub fn from_json(json: &str) -> Result<Self, CaptureError> {
        let content: Self = serde_json::from_str(json)
            .map_err(|e| CaptureError::ContentError(format!("failed to parse content: {}", e)))?;
        content.check_references()?;
        Ok(content)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CaptureError> {
        let json = fs::read_to_string(path)
            .map_err(|e| CaptureError::ContentError(format!("failed to read content: {}", e)))?;
        Self::from_json(&json)
    }

    /// Every pose must point at a known category.
    fn check_references(&self) -> Result<(), CaptureError> {
        for pose in &self.poses {
            if !self.pose_categories.iter().any(|c| c.id == pose.category) {
                return Err(CaptureError::ContentError(format!(
                    "pose {} references unknown category '{}'",
                    pose.id, pose.category
                )));
            }
        }
        Ok(())
    }
}

impl ContentSource for StaticContent {
    fn pose_categories(&self) -> Vec<PoseCategory> {
        self.pose_categories.clone()
    }

    fn poses(&self) -> Vec<Pose> {
        self.poses.clone()
    }

    fn tip_categories(&self) -> Vec<TipCategory> {
        self.tip_categories.clone()
    }

    fn tips(&self) -> Vec<Tip> {
        self.tips.clone()
    }

    fn enhancement_options(&self) -> Vec<EnhancementOption> {
        self.enhancement_options.clone()
    }
}
