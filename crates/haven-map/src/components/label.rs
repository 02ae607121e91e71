use glam::{Vec2, Vec3};

use crate::api::types::ObjectId;

/// Billboard text floating above a system in galaxy view.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEntry {
    pub text: String,
    /// The system this label follows.
    pub target: ObjectId,
    /// World position of the billboard center.
    pub position: Vec3,
    /// World-space billboard size.
    pub scale: Vec2,
    pub visible: bool,
}

impl LabelEntry {
    pub const DEFAULT_SCALE: Vec2 = Vec2::new(4.0, 1.0);

    /// A hidden label anchored `lift` units above `anchor`.
    pub fn new(text: impl Into<String>, target: ObjectId, anchor: Vec3, lift: f32) -> Self {
        Self {
            text: text.into(),
            target,
            position: anchor + Vec3::Y * lift,
            scale: Self::DEFAULT_SCALE,
            visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_starts_hidden_above_anchor() {
        let label = LabelEntry::new("Sol", ObjectId(3), Vec3::new(1.0, 2.0, 3.0), 2.5);
        assert!(!label.visible);
        assert_eq!(label.position, Vec3::new(1.0, 4.5, 3.0));
        assert_eq!(label.target, ObjectId(3));
    }
}
