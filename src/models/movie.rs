use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("markup pattern is valid"));
/// `&amp;` goes last so `&amp;lt;` decodes to the literal text `&lt;`
const HTML_ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("blank pattern is valid"));

/// A movie as returned by the discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl RawMovieSummary {
    /// Rating rendered the way the movie card shows it, e.g. `7.2/10`
    pub fn rating_label(&self) -> String {
        format!("{:.1}/10", self.vote_average)
    }

    /// Release date in Turkish long form (`12 Mart 2024`)
    ///
    /// Falls back to the raw upstream value when it is not an ISO date.
    pub fn release_date_label(&self) -> String {
        match NaiveDate::parse_from_str(&self.release_date, "%Y-%m-%d") {
            Ok(date) => format!(
                "{} {} {}",
                date.day(),
                TURKISH_MONTHS[date.month0() as usize],
                date.year()
            ),
            Err(_) => self.release_date.clone(),
        }
    }

    /// Full poster URL, if the movie has a poster
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| join_url(image_base_url, path))
    }
}

/// A discovered movie with its trailer and reviews attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedMovie {
    #[serde(flatten)]
    pub summary: RawMovieSummary,
    pub video_key: Option<String>,
    pub reviews: Vec<Review>,
}

impl EnrichedMovie {
    /// Wraps a summary with no trailer and no reviews
    pub fn degraded(summary: RawMovieSummary) -> Self {
        Self {
            summary,
            video_key: None,
            reviews: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.summary.id
    }

    /// Embeddable trailer URL, if a trailer was found
    pub fn trailer_url(&self, trailer_base_url: &str) -> Option<String> {
        self.video_key
            .as_deref()
            .map(|key| join_url(trailer_base_url, key))
    }

    /// What the card shows in its media slot: the trailer, else the poster
    pub fn media_url(&self, trailer_base_url: &str, image_base_url: &str) -> Option<String> {
        self.trailer_url(trailer_base_url)
            .or_else(|| self.summary.poster_url(image_base_url))
    }
}

/// A user review of a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub author: String,
    pub author_avatar_path: Option<String>,
    /// Raw upstream content; may contain HTML markup
    pub content: String,
}

impl Review {
    /// Review text with markup removed, ready for display
    pub fn display_content(&self) -> String {
        let stripped = MARKUP_TAG.replace_all(&self.content, "");
        let decoded = HTML_ENTITIES
            .iter()
            .fold(stripped.into_owned(), |text, (entity, plain)| {
                text.replace(entity, plain)
            });
        let collapsed = BLANK_RUN.replace_all(&decoded, " ");
        collapsed
            .lines()
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Resolves the avatar to an absolute URL
    ///
    /// TMDB stores gravatar avatars as `/https://...`; those are unwrapped
    /// rather than prefixed.
    pub fn avatar_url(&self, image_base_url: &str) -> Option<String> {
        let path = self.author_avatar_path.as_deref()?;
        let trimmed = path.trim_start_matches('/');
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Some(trimmed.to_string())
        } else {
            Some(join_url(image_base_url, path))
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /discover/movie
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<RawMovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

/// Generic `{ results: [...] }` envelope used by the videos and reviews endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Entry of GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize)]
pub struct ApiVideo {
    pub key: String,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(rename = "type", default)]
    pub video_type: Option<String>,
}

/// Entry of GET /movie/{id}/reviews
#[derive(Debug, Clone, Deserialize)]
pub struct ApiReview {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_details: Option<ApiAuthorDetails>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAuthorDetails {
    #[serde(default)]
    pub avatar_path: Option<String>,
}

impl From<ApiReview> for Review {
    fn from(review: ApiReview) -> Self {
        Review {
            author: review.author,
            author_avatar_path: review.author_details.and_then(|d| d.avatar_path),
            content: review.content,
        }
    }
}
