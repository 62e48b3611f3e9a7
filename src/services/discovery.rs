use std::collections::HashSet;
use std::ops::RangeInclusive;

use futures::future::join_all;
use rand::Rng;

use crate::{
    models::RawMovieSummary,
    services::{genre, providers::MovieProvider},
};

/// TMDB refuses to serve discovery pages past this one
pub const MAX_ENUMERABLE_PAGES: u32 = 500;

/// Page count that can actually be requested for a listing of `total_pages`
///
/// The reported total is taken modulo the page ceiling. An exact multiple of
/// the ceiling keeps the full ceiling instead of collapsing to zero.
pub fn effective_page_count(total_pages: u32) -> u32 {
    match total_pages % MAX_ENUMERABLE_PAGES {
        0 if total_pages > 0 => MAX_ENUMERABLE_PAGES,
        remainder => remainder,
    }
}

/// Picks a random run of `sample_size` consecutive pages inside the listing
///
/// When the listing has no more pages than requested the window is clamped to
/// `1..=T'`. The returned range is empty when there is nothing to fetch.
pub fn discovery_window<R: Rng + ?Sized>(
    total_pages: u32,
    sample_size: u32,
    rng: &mut R,
) -> RangeInclusive<u32> {
    let effective = effective_page_count(total_pages);

    if effective == 0 || sample_size == 0 {
        return RangeInclusive::new(1, 0);
    }

    if effective <= sample_size {
        return 1..=effective;
    }

    let start = rng.random_range(0..effective - sample_size) + 1;
    start..=start + sample_size - 1
}

/// Fetches a randomized window of discovery pages for a mood
///
/// Never fails: a failed first-page request yields no movies, a failed page contributes
/// nothing. Movies repeated across pages are kept once, first occurrence wins.
pub async fn discover<R: Rng + ?Sized>(
    provider: &dyn MovieProvider,
    mood: &str,
    sample_size: u32,
    rng: &mut R,
) -> Vec<RawMovieSummary> {
    let genre = genre::resolve(mood);

    let first_page = match provider.discover_page(&genre, 1).await {
        Ok(first_page) => first_page,
        Err(e) => {
            tracing::warn!(
                mood = %mood,
                genre = %genre,
                provider = provider.name(),
                error = %e,
                "Discovery first page failed"
            );
            return Vec::new();
        }
    };

    let window = discovery_window(first_page.total_pages, sample_size, rng);

    tracing::debug!(
        mood = %mood,
        genre = %genre,
        total_pages = first_page.total_pages,
        start_page = *window.start(),
        end_page = *window.end(),
        "Discovery window selected"
    );

    let genre = &genre;
    let pages = join_all(window.map(|page| async move {
        (page, provider.discover_page(genre, page).await)
    }))
    .await;

    let mut seen = HashSet::new();
    let mut movies = Vec::new();
    let mut failed_pages = 0;

    for (page, result) in pages {
        match result {
            Ok(response) => movies.extend(
                response
                    .results
                    .into_iter()
                    .filter(|movie| seen.insert(movie.id)),
            ),
            Err(e) => {
                failed_pages += 1;
                tracing::warn!(
                    mood = %mood,
                    page = page,
                    error = %e,
                    "Discovery page failed, skipping"
                );
            }
        }
    }

    tracing::info!(
        mood = %mood,
        genre = %genre,
        movies = movies.len(),
        failed_pages = failed_pages,
        "Discovery completed"
    );

    movies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{DiscoverResponse, GenreId},
        services::providers::MockMovieProvider,
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn movie(id: u64) -> RawMovieSummary {
        RawMovieSummary {
            id,
            title: format!("Movie {}", id),
            overview: "Overview".to_string(),
            vote_average: 7.0,
            release_date: "2020-01-01".to_string(),
            poster_path: None,
            genre_ids: vec![35],
        }
    }

    fn page_of(page: u32, total_pages: u32) -> DiscoverResponse {
        DiscoverResponse {
            page,
            results: vec![movie(page as u64 * 100), movie(page as u64 * 100 + 1)],
            total_pages,
            total_results: total_pages as u64 * 20,
        }
    }

    #[test]
    fn test_effective_page_count() {
        assert_eq!(effective_page_count(0), 0);
        assert_eq!(effective_page_count(100), 100);
        assert_eq!(effective_page_count(742), 242);
        assert_eq!(effective_page_count(500), 500);
        assert_eq!(effective_page_count(1000), 500);
    }

    #[test]
    fn test_window_stays_inside_listing() {
        let mut rng = StdRng::seed_from_u64(7);
        for total in 1..=600 {
            for sample_size in 1..=8 {
                let window = discovery_window(total, sample_size, &mut rng);
                let effective = effective_page_count(total);
                if effective >= sample_size {
                    assert!(*window.start() >= 1);
                    assert!(*window.end() <= effective);
                    assert_eq!(window.clone().count() as u32, sample_size);
                }
            }
        }
    }

    #[test]
    fn test_window_for_hundred_pages() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let window = discovery_window(100, 5, &mut rng);
            assert!((1..=95).contains(window.start()));
            assert_eq!(*window.end(), *window.start() + 4);
        }
    }

    #[test]
    fn test_window_is_deterministic_for_seed() {
        let a = discovery_window(300, 5, &mut StdRng::seed_from_u64(9));
        let b = discovery_window(300, 5, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_window_clamped_when_listing_is_short() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(discovery_window(3, 5, &mut rng), 1..=3);
        assert_eq!(discovery_window(5, 5, &mut rng), 1..=5);
        assert_eq!(discovery_window(501, 5, &mut rng), 1..=1);
    }

    #[test]
    fn test_window_empty_without_pages() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(discovery_window(0, 5, &mut rng).is_empty());
    }

    #[tokio::test]
    async fn test_discover_fetches_window_pages() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_discover_page()
            .withf(|genre, _| genre == &GenreId::new("35"))
            .times(6)
            .returning(|_, page| Ok(page_of(page, 100)));

        let mut rng = StdRng::seed_from_u64(3);
        let movies = discover(&provider, "Mutlu", 5, &mut rng).await;

        assert_eq!(movies.len(), 10);
        let pages: HashSet<u64> = movies.iter().map(|m| m.id / 100).collect();
        assert_eq!(pages.len(), 5);
        assert!(pages.iter().all(|p| (1..=99).contains(p)));
    }

    #[tokio::test]
    async fn test_discover_survives_failed_pages() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_discover_page()
            .returning(|_, page| match page {
                1 => Ok(page_of(1, 3)),
                2 => Err(AppError::ExternalApi("boom".to_string())),
                _ => Ok(page_of(page, 3)),
            });

        let mut rng = StdRng::seed_from_u64(3);
        let movies = discover(&provider, "Korkulu", 5, &mut rng).await;

        let ids: Vec<u64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![100, 101, 300, 301]);
    }

    #[tokio::test]
    async fn test_discover_returns_empty_when_first_page_fails() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_discover_page()
            .times(1)
            .returning(|_, _| Err(AppError::ExternalApi("unavailable".to_string())));

        let mut rng = StdRng::seed_from_u64(3);
        assert!(discover(&provider, "Mutlu", 5, &mut rng).await.is_empty());
    }

    #[tokio::test]
    async fn test_discover_unknown_mood_is_unfiltered() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_discover_page()
            .withf(|genre, _| genre.is_none())
            .returning(|_, page| Ok(page_of(page, 1)));

        let mut rng = StdRng::seed_from_u64(3);
        let movies = discover(&provider, "Şaşırtıcı", 5, &mut rng).await;
        assert_eq!(movies.len(), 2);
    }

    #[tokio::test]
    async fn test_discover_drops_duplicate_ids() {
        let mut provider = MockMovieProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_discover_page().returning(|_, page| {
            Ok(DiscoverResponse {
                page,
                results: vec![movie(1), movie(page as u64 + 10)],
                total_pages: 2,
                total_results: 4,
            })
        });

        let mut rng = StdRng::seed_from_u64(3);
        let ids: Vec<u64> = discover(&provider, "Mutlu", 5, &mut rng)
            .await
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![1, 11, 12]);
    }
}
