use std::collections::HashMap;
use std::sync::LazyLock;

/// Reference vocabulary offered in the save dialog. Color assignment depends on the
/// position of a tag here, so entries are only ever appended.
pub const TAG_VOCABULARY: &[&str] = &[
    "Momentum",
    "Value",
    "Growth",
    "Dividend",
    "Breakout",
    "Oversold",
    "Overbought",
    "Large Cap",
    "Small Cap",
    "Intraday",
    "Swing",
    "Watchlist",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagColor {
    pub background: &'static str,
    pub foreground: &'static str,
}

pub const TAG_PALETTE: [TagColor; 6] = [
    TagColor {
        background: "#dbeafe",
        foreground: "#1e40af",
    },
    TagColor {
        background: "#dcfce7",
        foreground: "#166534",
    },
    TagColor {
        background: "#fef9c3",
        foreground: "#854d0e",
    },
    TagColor {
        background: "#fce7f3",
        foreground: "#9d174d",
    },
    TagColor {
        background: "#ede9fe",
        foreground: "#5b21b6",
    },
    TagColor {
        background: "#ffedd5",
        foreground: "#9a3412",
    },
];

/// Tags outside the vocabulary.
pub const UNLISTED_TAG_COLOR: TagColor = TagColor {
    background: "#f3f4f6",
    foreground: "#374151",
};

static TAG_COLORS: LazyLock<HashMap<&'static str, TagColor>> = LazyLock::new(|| {
    TAG_VOCABULARY
        .iter()
        .enumerate()
        .map(|(idx, tag)| (*tag, TAG_PALETTE[idx % TAG_PALETTE.len()]))
        .collect()
});

pub fn tag_color(tag: &str) -> TagColor {
    TAG_COLORS.get(tag).copied().unwrap_or(UNLISTED_TAG_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_color_follows_vocabulary_index() {
        assert_eq!(tag_color("Momentum"), TAG_PALETTE[0]);
        assert_eq!(tag_color("Value"), TAG_PALETTE[1]);
        assert_eq!(tag_color("Oversold"), TAG_PALETTE[5]);
        assert_eq!(tag_color("Overbought"), TAG_PALETTE[0]);
        assert_eq!(tag_color("Watchlist"), TAG_PALETTE[11 % TAG_PALETTE.len()]);
    }

    #[test]
    fn unlisted_tags_share_neutral_color() {
        assert_eq!(tag_color("my-own-tag"), UNLISTED_TAG_COLOR);
        assert_eq!(tag_color("momentum"), UNLISTED_TAG_COLOR);
    }
}
