use crate::models::content_models::{Pose, PoseCategory, Tip};
use crate::traits::content_source::ContentSource;

/// Category id that selects every pose.
pub const ALL_CATEGORIES: &str = "all";

/// Category selected when the library opens.
pub const DEFAULT_CATEGORY: &str = "portrait";

/// Selection state for the pose browser.
pub struct PoseLibrary<S: ContentSource> {
    source: S,
    selected: String,
}

impl<S: ContentSource> PoseLibrary<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            selected: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn selected_category(&self) -> &str {
        &self.selected
    }

    pub fn select_category(&mut self, category_id: &str) {
        self.selected = category_id.to_string();
    }

    /// Categories with the active one flagged, in source order.
    pub fn categories(&self) -> Vec<(PoseCategory, bool)> {
        self.source
            .pose_categories()
            .into_iter()
            .map(|c| {
                let active = c.id == self.selected;
                (c, active)
            })
            .collect()
    }

    /// Poses in the selected category, or all of them for `"all"`.
    pub fn visible_poses(&self) -> Vec<Pose> {
        let poses = self.source.poses();
        if self.selected == ALL_CATEGORIES {
            return poses;
        }
        poses
            .into_iter()
            .filter(|p| p.category == self.selected)
            .collect()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Tips whose category matches the given tip category id or name.
pub fn tips_in_category<S: ContentSource>(source: &S, category: &str) -> Vec<Tip> {
    source
        .tips()
        .into_iter()
        .filter(|t| t.category.eq_ignore_ascii_case(category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::static_source::StaticContent;

    fn library() -> PoseLibrary<StaticContent> {
        let content = StaticContent::from_json(include_str!("../../content/catalog.json")).unwrap();
        PoseLibrary::new(content)
    }

    #[test]
    fn opens_on_portrait() {
        let lib = library();
        assert_eq!(lib.selected_category(), "portrait");
        let titles: Vec<String> = lib.visible_poses().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Natural Portrait", "Classic Pose", "Studio Portrait"]);
    }

    #[test]
    fn selecting_category_moves_active_flag() {
        let mut lib = library();
        lib.select_category("fashion");

        let active: Vec<String> = lib
            .categories()
            .into_iter()
            .filter(|(_, active)| *active)
            .map(|(c, _)| c.id)
            .collect();
        assert_eq!(active, vec!["fashion"]);
        assert_eq!(lib.visible_poses().len(), 2);
    }

    #[test]
    fn all_shows_everything_and_unknown_shows_nothing() {
        let mut lib = library();
        lib.select_category(ALL_CATEGORIES);
        assert_eq!(lib.visible_poses().len(), 6);

        lib.select_category("group");
        assert!(lib.visible_poses().is_empty());
    }

    #[test]
    fn tips_filter_ignores_case() {
        let lib = library();
        let tips = tips_in_category(lib.source(), "lighting");
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "Natural Light Photography");
    }
}
