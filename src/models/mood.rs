use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A user-facing emotional state shown in the mood catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodDefinition {
    pub label: &'static str,
    pub emoji: &'static str,
}

/// The mood catalog in display order
pub const MOOD_CATALOG: &[MoodDefinition] = &[
    MoodDefinition { label: "Mutlu", emoji: "😄" },
    MoodDefinition { label: "Heyecanlı", emoji: "😃" },
    MoodDefinition { label: "Hüzünlü", emoji: "😢" },
    MoodDefinition { label: "Sakin", emoji: "😌" },
    MoodDefinition { label: "Korkulu", emoji: "😱" },
    MoodDefinition { label: "Meraklı", emoji: "🤨" },
    MoodDefinition { label: "Şaşırtıcı", emoji: "😲" },
    MoodDefinition { label: "Tuhaf", emoji: "🤪" },
    MoodDefinition { label: "Romantik", emoji: "😍" },
    MoodDefinition { label: "Komik", emoji: "😂" },
    MoodDefinition { label: "Hayalperest", emoji: "🤩" },
    MoodDefinition { label: "Maceraperest", emoji: "🏃" },
    MoodDefinition { label: "Melankolik", emoji: "😞" },
    MoodDefinition { label: "Duygusal", emoji: "😭" },
    MoodDefinition { label: "Aksiyon Dolu", emoji: "💥" },
    MoodDefinition { label: "Vurdulu Kırdılı", emoji: "⚔️" },
    MoodDefinition { label: "Tarihsel", emoji: "🏛︎" },
    MoodDefinition { label: "Sanatsal", emoji: "🎶📻" },
];

/// Looks up a catalog entry by its exact label
pub fn find_mood(label: &str) -> Option<&'static MoodDefinition> {
    MOOD_CATALOG.iter().find(|mood| mood.label == label)
}

impl Display for MoodDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji, self.label)
    }
}

/// Genre identifier understood by the upstream discovery endpoint
///
/// The empty token is the "no genre" sentinel: discovery then runs unfiltered
/// over the popularity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(String);

impl GenreId {
    pub const NONE: GenreId = GenreId(String::new());

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
