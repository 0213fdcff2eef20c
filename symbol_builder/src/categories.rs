//! The fixed group/subgroup -> category table.
//!
//! The table must cover every subgroup in the emoji-test source; an unmapped
//! combination aborts the build so new Unicode releases are noticed.

use symbol_db::Category;

use crate::error::{BuildError, Result};

/// How a canonical label becomes the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRule {
    Keep,
    /// `"grinning face"` -> `"grinning"`.
    StripFaceSuffix,
    /// `"flag: Australia"` -> `"australia"`.
    StripFlagPrefix,
}

impl LabelRule {
    pub fn apply(&self, label: &str) -> String {
        match self {
            LabelRule::Keep => label.to_string(),
            LabelRule::StripFaceSuffix => match label.strip_suffix(" face") {
                Some(stripped) if !stripped.trim().is_empty() => stripped.trim().to_string(),
                _ => label.to_string(),
            },
            LabelRule::StripFlagPrefix => match label.strip_prefix("flag:") {
                Some(stripped) if !stripped.trim().is_empty() => stripped.trim().to_string(),
                _ => label.to_string(),
            },
        }
    }
}

/// One row of the table.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub group: &'static str,
    pub subgroup: &'static str,
    /// Bucket name; a leading `_` marks an internal bucket.
    pub category: &'static str,
    pub label: LabelRule,
}

const fn rule(
    group: &'static str,
    subgroup: &'static str,
    category: &'static str,
    label: LabelRule,
) -> CategoryRule {
    CategoryRule {
        group,
        subgroup,
        category,
        label,
    }
}

use LabelRule::{Keep, StripFaceSuffix, StripFlagPrefix};

const SMILEYS: &str = "Smileys & Emotion";
const PEOPLE: &str = "People & Body";
const COMPONENT: &str = "Component";
const NATURE: &str = "Animals & Nature";
const FOOD: &str = "Food & Drink";
const TRAVEL: &str = "Travel & Places";
const ACTIVITIES: &str = "Activities";
const OBJECTS: &str = "Objects";
const SYMBOLS: &str = "Symbols";
const FLAGS: &str = "Flags";

pub const CATEGORY_TABLE: &[CategoryRule] = &[
    rule(SMILEYS, "face-smiling", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-affection", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-tongue", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-hand", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-neutral-skeptical", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-sleepy", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-unwell", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-hat", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-glasses", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-concerned", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-negative", "faces", StripFaceSuffix),
    rule(SMILEYS, "face-costume", "faces", StripFaceSuffix),
    rule(SMILEYS, "cat-face", "_cat_faces", Keep),
    rule(SMILEYS, "monkey-face", "_monkey_faces", Keep),
    rule(SMILEYS, "heart", "hearts", Keep),
    rule(SMILEYS, "emotion", "symbols", Keep),
    rule(PEOPLE, "hand-fingers-open", "hands", Keep),
    rule(PEOPLE, "hand-fingers-partial", "_hand_gestures", Keep),
    rule(PEOPLE, "hand-single-finger", "hands", Keep),
    rule(PEOPLE, "hand-fingers-closed", "hands", Keep),
    rule(PEOPLE, "hands", "hands", Keep),
    rule(PEOPLE, "hand-prop", "hands", Keep),
    rule(PEOPLE, "body-parts", "body", Keep),
    rule(PEOPLE, "person", "people", Keep),
    rule(PEOPLE, "person-gesture", "people", Keep),
    rule(PEOPLE, "person-role", "people", Keep),
    rule(PEOPLE, "person-fantasy", "people", Keep),
    rule(PEOPLE, "person-activity", "people", Keep),
    rule(PEOPLE, "person-sport", "sports", Keep),
    rule(PEOPLE, "person-resting", "people", Keep),
    rule(PEOPLE, "family", "_family", Keep),
    rule(PEOPLE, "person-symbol", "people", Keep),
    rule(COMPONENT, "skin-tone", "_components", Keep),
    rule(COMPONENT, "hair-style", "_components", Keep),
    rule(NATURE, "animal-mammal", "animals", Keep),
    rule(NATURE, "animal-bird", "animals", Keep),
    rule(NATURE, "animal-amphibian", "animals", Keep),
    rule(NATURE, "animal-reptile", "animals", Keep),
    rule(NATURE, "animal-marine", "animals", Keep),
    rule(NATURE, "animal-bug", "animals", Keep),
    rule(NATURE, "plant-flower", "nature", Keep),
    rule(NATURE, "plant-other", "nature", Keep),
    rule(FOOD, "food-fruit", "food", Keep),
    rule(FOOD, "food-vegetable", "food", Keep),
    rule(FOOD, "food-prepared", "food", Keep),
    rule(FOOD, "food-asian", "food", Keep),
    rule(FOOD, "food-marine", "food", Keep),
    rule(FOOD, "food-sweet", "food", Keep),
    rule(FOOD, "drink", "drinks", Keep),
    rule(FOOD, "dishware", "household", Keep),
    rule(TRAVEL, "place-map", "_maps", Keep),
    rule(TRAVEL, "place-geographic", "places", Keep),
    rule(TRAVEL, "place-building", "places", Keep),
    rule(TRAVEL, "place-religious", "places", Keep),
    rule(TRAVEL, "place-other", "places", Keep),
    rule(TRAVEL, "transport-ground", "vehicles", Keep),
    rule(TRAVEL, "transport-water", "vehicles", Keep),
    rule(TRAVEL, "transport-air", "vehicles", Keep),
    rule(TRAVEL, "hotel", "places", Keep),
    rule(TRAVEL, "time", "time", Keep),
    rule(TRAVEL, "sky & weather", "weather", Keep),
    rule(ACTIVITIES, "event", "celebrations", Keep),
    rule(ACTIVITIES, "award-medal", "sports", Keep),
    rule(ACTIVITIES, "sport", "sports", Keep),
    rule(ACTIVITIES, "game", "games", Keep),
    rule(ACTIVITIES, "arts & crafts", "arts", Keep),
    rule(OBJECTS, "clothing", "clothing", Keep),
    rule(OBJECTS, "sound", "music", Keep),
    rule(OBJECTS, "music", "music", Keep),
    rule(OBJECTS, "musical-instrument", "music", Keep),
    rule(OBJECTS, "phone", "technology", Keep),
    rule(OBJECTS, "computer", "technology", Keep),
    rule(OBJECTS, "light & video", "technology", Keep),
    rule(OBJECTS, "book-paper", "office", Keep),
    rule(OBJECTS, "money", "money", Keep),
    rule(OBJECTS, "mail", "office", Keep),
    rule(OBJECTS, "writing", "office", Keep),
    rule(OBJECTS, "office", "office", Keep),
    rule(OBJECTS, "lock", "tools", Keep),
    rule(OBJECTS, "tool", "tools", Keep),
    rule(OBJECTS, "science", "science", Keep),
    rule(OBJECTS, "medical", "science", Keep),
    rule(OBJECTS, "household", "household", Keep),
    rule(OBJECTS, "other-object", "objects", Keep),
    rule(SYMBOLS, "transport-sign", "symbols", Keep),
    rule(SYMBOLS, "warning", "symbols", Keep),
    rule(SYMBOLS, "arrow", "symbols", Keep),
    rule(SYMBOLS, "religion", "symbols", Keep),
    rule(SYMBOLS, "zodiac", "symbols", Keep),
    rule(SYMBOLS, "av-symbol", "symbols", Keep),
    rule(SYMBOLS, "gender", "symbols", Keep),
    rule(SYMBOLS, "math", "symbols", Keep),
    rule(SYMBOLS, "punctuation", "symbols", Keep),
    rule(SYMBOLS, "currency", "symbols", Keep),
    rule(SYMBOLS, "other-symbol", "symbols", Keep),
    rule(SYMBOLS, "keycap", "symbols", Keep),
    rule(SYMBOLS, "alphanum", "symbols", Keep),
    rule(SYMBOLS, "geometric", "shapes", Keep),
    rule(FLAGS, "flag", "flags", Keep),
    rule(FLAGS, "country-flag", "flags", StripFlagPrefix),
    rule(FLAGS, "subdivision-flag", "flags", StripFlagPrefix),
];

/// Find the table row for a group/subgroup pair.
pub fn lookup_rule(group: &str, subgroup: &str) -> Result<&'static CategoryRule> {
    CATEGORY_TABLE
        .iter()
        .find(|r| r.group == group && r.subgroup == subgroup)
        .ok_or_else(|| BuildError::UnmappedCategory {
            group: group.to_string(),
            subgroup: subgroup.to_string(),
        })
}

impl CategoryRule {
    pub fn category(&self) -> Category {
        Category::new(self.category)
    }
}
