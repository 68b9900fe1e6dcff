//! Common components shared between physics and gameplay.

use glam::Vec2;

/// Category attached to every collider so contact listeners can tell who touched them.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tag {
    #[default]
    Untagged = 0,
    Player = 1,
    Ground = 2,
    Bridge = 3,
    Water = 4,
    Collectable = 5,
}

impl Tag {
    pub fn is_player(self) -> bool {
        self == Tag::Player
    }

    /// Pack into a collider's user data slot.
    pub fn to_user_data(self) -> u128 {
        self as u128
    }

    pub fn from_user_data(data: u128) -> Self {
        match data {
            1 => Tag::Player,
            2 => Tag::Ground,
            3 => Tag::Bridge,
            4 => Tag::Water,
            5 => Tag::Collectable,
            _ => Tag::Untagged,
        }
    }
}

/// Axis-aligned bounds of a collider in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Centre of the lower edge, where the feet are.
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.center().x, self.min.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_survives_user_data_packing() {
        for tag in [Tag::Player, Tag::Ground, Tag::Bridge, Tag::Water, Tag::Collectable] {
            assert_eq!(Tag::from_user_data(tag.to_user_data()), tag);
        }
        assert_eq!(Tag::from_user_data(999), Tag::Untagged);
    }

    #[test]
    fn bottom_center_sits_on_lower_edge() {
        let b = Bounds::from_center_half_extents(Vec2::new(2.0, 3.0), Vec2::new(0.5, 1.0));
        assert_eq!(b.bottom_center(), Vec2::new(2.0, 2.0));
    }
}
