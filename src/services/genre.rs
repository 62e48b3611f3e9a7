use std::collections::HashMap;
use std::sync::LazyLock;

use crate::models::GenreId;

/// Mood label → TMDB genre id
const GENRE_TABLE: &[(&str, &str)] = &[
    ("Mutlu", "35"),
    ("Heyecanlı", "53"),
    ("Romantik", "10749"),
    ("Komik", "35"),
    ("Meraklı", "99"),
    ("Korkulu", "27"),
    ("Melankolik", "18"),
    ("Hüzünlü", "10751"),
    ("Sakin", "18"),
    ("Kasvetli", "9648"),
    ("Tuhaf", "878"),
    ("Hayalperest", "878"),
    ("Maceraperest", "12"),
    ("Aksiyon Dolu", "28"),
    ("Duygusal", "10751"),
    ("Vurdulu Kırdılı", "10752"),
    ("Tarihsel", "36"),
    ("Sanatsal", "10402"),
];

/// TMDB movie genre id → Turkish display name
const GENRE_NAMES: &[(u32, &str)] = &[
    (28, "Aksiyon"),
    (12, "Macera"),
    (16, "Animasyon"),
    (35, "Komedi"),
    (80, "Suç"),
    (99, "Belgesel"),
    (18, "Dram"),
    (10751, "Aile"),
    (14, "Fantastik"),
    (36, "Tarih"),
    (27, "Korku"),
    (10402, "Müzik"),
    (9648, "Gizem"),
    (10749, "Romantik"),
    (878, "Bilim-Kurgu"),
    (10770, "TV film"),
    (53, "Gerilim"),
    (10752, "Savaş"),
    (37, "Vahşi Batı"),
];

static GENRES_BY_MOOD: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| GENRE_TABLE.iter().copied().collect());

/// Resolves a mood label to the genre used for discovery
///
/// Unknown labels resolve to [`GenreId::NONE`].
pub fn resolve(mood: &str) -> GenreId {
    GENRES_BY_MOOD
        .get(mood)
        .map(|id| GenreId::new(*id))
        .unwrap_or(GenreId::NONE)
}

pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRE_NAMES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Comma-separated genre names; ids without a known name are shown as-is
pub fn genre_labels(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| genre_name(*id).map_or_else(|| id.to_string(), str::to_string))
        .collect::<Vec<_>>()
        .join(", ")
}
