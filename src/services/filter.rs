use crate::models::RawMovieSummary;

/// Movies at or below this rating are never recommended
pub const MIN_VOTE_AVERAGE: f64 = 5.0;

/// Whether a movie is good enough to show
pub fn is_recommendable(movie: &RawMovieSummary) -> bool {
    movie.vote_average > MIN_VOTE_AVERAGE && !movie.overview.is_empty()
}

/// Drops low-rated movies and movies without a synopsis, keeping order
pub fn filter_movies(movies: Vec<RawMovieSummary>) -> Vec<RawMovieSummary> {
    movies.into_iter().filter(is_recommendable).collect()
}
