use crate::models::content_models::{EnhancementOption, Pose, PoseCategory, Tip, TipCategory};

/// Read-only content shown by the browsing screens.
///
/// Injected so the presentation layer can be tested against any records,
/// not a fixed catalog.
pub trait ContentSource: Send + Sync {
    fn pose_categories(&self) -> Vec<PoseCategory>;

    fn poses(&self) -> Vec<Pose>;

    fn tip_categories(&self) -> Vec<TipCategory>;

    fn tips(&self) -> Vec<Tip>;

    fn enhancement_options(&self) -> Vec<EnhancementOption>;
}
