use futures::future::join_all;

use crate::{
    models::{EnrichedMovie, RawMovieSummary, Review},
    services::providers::MovieProvider,
};

/// First trailer key for a movie, or `None` when there is none or the lookup fails
async fn trailer_key(provider: &dyn MovieProvider, movie_id: u64) -> Option<String> {
    match provider.fetch_videos(movie_id).await {
        Ok(keys) => {
            if keys.is_empty() {
                tracing::debug!(movie_id = movie_id, "No trailer found");
            }
            keys.into_iter().next()
        }
        Err(e) => {
            tracing::warn!(
                movie_id = movie_id,
                provider = provider.name(),
                error = %e,
                "Trailer lookup failed"
            );
            None
        }
    }
}

/// Reviews for a movie, or an empty list when the lookup fails
async fn reviews(provider: &dyn MovieProvider, movie_id: u64) -> Vec<Review> {
    provider.fetch_reviews(movie_id).await.unwrap_or_else(|e| {
        tracing::warn!(
            movie_id = movie_id,
            provider = provider.name(),
            error = %e,
            "Review lookup failed"
        );
        Vec::new()
    })
}

/// Attaches trailer and reviews to a movie
///
/// Both lookups run concurrently and degrade independently; this never fails.
pub async fn enrich(provider: &dyn MovieProvider, movie: RawMovieSummary) -> EnrichedMovie {
    let (video_key, reviews) = tokio::join!(
        trailer_key(provider, movie.id),
        reviews(provider, movie.id)
    );

    EnrichedMovie {
        summary: movie,
        video_key,
        reviews,
    }
}

/// Enriches every movie, completing once all of them have settled
///
/// Output has the same length and order as the input.
pub async fn enrich_batch(
    provider: &dyn MovieProvider,
    movies: Vec<RawMovieSummary>,
) -> Vec<EnrichedMovie> {
    let count = movies.len();
    let enriched = join_all(movies.into_iter().map(|movie| enrich(provider, movie))).await;

    tracing::info!(
        movies = count,
        with_trailer = enriched.iter().filter(|m| m.video_key.is_some()).count(),
        with_reviews = enriched.iter().filter(|m| !m.reviews.is_empty()).count(),
        "Enrichment completed"
    );

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, services::providers::MockMovieProvider};

    fn movie(id: u64) -> RawMovieSummary {
        RawMovieSummary {
            id,
            title: format!("Movie {}", id),
            overview: "Overview".to_string(),
            vote_average: 7.5,
            release_date: "2021-06-01".to_string(),
            poster_path: Some(format!("/{}.jpg", id)),
            genre_ids: vec![18],
        }
    }

    fn review(author: &str) -> Review {
        Review {
            author: author.to_string(),
            author_avatar_path: None,
            content: "<p>Nice</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_enrich_takes_first_video_key() {
        let mut provider = MockMovieProvider::new();
        provider
            .expect_fetch_videos()
            .returning(|_| Ok(vec!["first".to_string(), "second".to_string()]));
        provider
            .expect_fetch_reviews()
            .returning(|_| Ok(vec![review("ruby")]));

        let enriched = enrich(&provider, movie(1)).await;
        assert_eq!(enriched.video_key, Some("first".to_string()));
        assert_eq!(enriched.reviews, vec![review("ruby")]);
        assert_eq!(enriched.summary, movie(1));
    }

    #[tokio::test]
    async fn test_enrich_without_videos() {
        let mut provider = MockMovieProvider::new();
        provider.expect_fetch_videos().returning(|_| Ok(Vec::new()));
        provider.expect_fetch_reviews().returning(|_| Ok(Vec::new()));

        let enriched = enrich(&provider, movie(1)).await;
        assert_eq!(enriched.video_key, None);
        assert!(enriched.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_trailer_failure_keeps_reviews() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_videos()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        provider
            .expect_fetch_reviews()
            .returning(|_| Ok(vec![review("ruby"), review("ash")]));

        let enriched = enrich(&provider, movie(1)).await;
        assert_eq!(enriched.video_key, None);
        assert_eq!(enriched.reviews.len(), 2);
    }

    #[tokio::test]
    async fn test_review_failure_keeps_trailer() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_videos()
            .returning(|_| Ok(vec!["abc".to_string()]));
        provider
            .expect_fetch_reviews()
            .returning(|_| Err(AppError::ExternalApi("503".to_string())));

        let enriched = enrich(&provider, movie(1)).await;
        assert_eq!(enriched.video_key, Some("abc".to_string()));
        assert!(enriched.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_enrich_batch_keeps_every_movie() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_fetch_videos().returning(|id| {
            if id % 2 == 0 {
                Err(AppError::ExternalApi("fail".to_string()))
            } else {
                Ok(vec![format!("key-{}", id)])
            }
        });
        provider.expect_fetch_reviews().returning(|id| {
            if id == 3 {
                Err(AppError::Internal("fail".to_string()))
            } else {
                Ok(vec![review("ruby")])
            }
        });

        let movies: Vec<RawMovieSummary> = (1..=5).map(movie).collect();
        let enriched = enrich_batch(&provider, movies).await;

        let ids: Vec<u64> = enriched.iter().map(|m| m.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(enriched[0].video_key, Some("key-1".to_string()));
        assert_eq!(enriched[1].video_key, None);
        assert!(enriched[2].reviews.is_empty());
        assert_eq!(enriched[3].reviews.len(), 1);
    }

    #[tokio::test]
    async fn test_enrich_batch_empty() {
        let provider = MockMovieProvider::new();
        assert!(enrich_batch(&provider, Vec::new()).await.is_empty());
    }
}
