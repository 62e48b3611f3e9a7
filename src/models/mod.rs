pub mod mood;
pub mod movie;

pub use mood::{find_mood, GenreId, MoodDefinition, MOOD_CATALOG};
pub use movie::{
    ApiAuthorDetails, ApiListResponse, ApiReview, ApiVideo, DiscoverResponse, EnrichedMovie,
    RawMovieSummary, Review,
};
