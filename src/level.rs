//! Level table
//!
//! There is a single endless level; its layout comes from the generator,
//! so a level only picks a name and a palette.

use crate::theme::ThemeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub name: &'static str,
    pub theme: ThemeId,
}

pub const LEVELS: &[Level] = &[Level {
    name: "Stereo Maxness",
    theme: ThemeId::Default,
}];

/// Look up a level by index
pub fn level(index: usize) -> Option<&'static Level> {
    LEVELS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_level() {
        assert_eq!(LEVELS.len(), 1);
        assert_eq!(level(0).map(|l| l.name), Some("Stereo Maxness"));
        assert!(level(1).is_none());
    }
}
