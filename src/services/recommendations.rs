use rand::Rng;

use crate::{
    models::EnrichedMovie,
    services::{discovery, enrichment, filter, providers::MovieProvider},
};

/// Runs the full recommendation pipeline for a mood
///
/// discover → filter → enrich. Upstream failures only ever shrink the result;
/// an empty list means nothing survived the filter.
pub async fn get_recommendations<R: Rng + ?Sized>(
    provider: &dyn MovieProvider,
    mood: &str,
    sample_size: u32,
    rng: &mut R,
) -> Vec<EnrichedMovie> {
    let discovered = discovery::discover(provider, mood, sample_size, rng).await;
    let discovered_count = discovered.len();

    let candidates = filter::filter_movies(discovered);
    if candidates.is_empty() {
        tracing::warn!(
            mood = %mood,
            discovered = discovered_count,
            "No movie passed the filter"
        );
        return Vec::new();
    }

    tracing::debug!(
        mood = %mood,
        discovered = discovered_count,
        kept = candidates.len(),
        "Filtered discovery results"
    );

    enrichment::enrich_batch(provider, candidates).await
}
