// Terminal front-end: mood catalog and movie browser. The pipeline and
// session live in `services`; this module turns user input into session
// operations and renders the movie under the cursor.

use std::fmt::Write as _;

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{find_mood, EnrichedMovie, MoodDefinition, MOOD_CATALOG},
    services::{genre, FetchSession, MovieProvider},
};

const REVIEW_PREVIEW_CHARS: usize = 280;

#[derive(Debug, Parser)]
#[command(name = "film-oner", about = "Movie recommendations for your mood")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// List the mood catalog
    Moods,
    /// Browse recommendations for a mood
    Browse {
        /// Mood label or its number in the catalog
        #[arg(long)]
        mood: Option<String>,
        /// Number of consecutive discovery pages to sample
        #[arg(long)]
        sample_size: Option<u32>,
    },
}

/// A browsing action typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Reload,
    ToggleReviews,
    Back,
    Quit,
}

/// Parses one line of browser input
pub fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_lowercase().as_str() {
        "n" | "next" => Some(Command::Next),
        "p" | "prev" | "previous" => Some(Command::Previous),
        "r" | "reload" | "karıştır" => Some(Command::Reload),
        "v" | "reviews" => Some(Command::ToggleReviews),
        "b" | "back" => Some(Command::Back),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

/// Picks a catalog mood by its 1-based number or exact label
pub fn choose_mood(input: &str) -> AppResult<&'static MoodDefinition> {
    let input = input.trim();

    if let Ok(index) = input.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| MOOD_CATALOG.get(i))
            .ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "Mood number must be between 1 and {}",
                    MOOD_CATALOG.len()
                ))
            });
    }

    find_mood(input).ok_or_else(|| AppError::InvalidInput(format!("Unknown mood: {}", input)))
}

/// The mood catalog as a numbered list
pub fn render_catalog() -> String {
    let mut out = String::from("Şimdi nasıl hissediyorsun?\n");
    for (index, mood) in MOOD_CATALOG.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", index + 1, mood);
    }
    out
}

/// The card for the movie under the cursor
pub fn render_movie(
    movie: &EnrichedMovie,
    position: usize,
    total: usize,
    reviews_expanded: bool,
    config: &Config,
) -> String {
    let summary = &movie.summary;
    let mut out = String::new();

    let _ = writeln!(out, "[{}/{}] {}", position + 1, total, summary.title);
    let _ = writeln!(
        out,
        "⭐ {}   Vizyon Tarihi: {}",
        summary.rating_label(),
        summary.release_date_label()
    );
    if !summary.genre_ids.is_empty() {
        let _ = writeln!(out, "Türler: {}", genre::genre_labels(&summary.genre_ids));
    }
    match movie.media_url(&config.trailer_base_url, &config.image_base_url) {
        Some(url) if movie.video_key.is_some() => {
            let _ = writeln!(out, "Fragman: {}", url);
        }
        Some(url) => {
            let _ = writeln!(out, "Afiş: {}", url);
        }
        None => {}
    }
    let _ = writeln!(out, "\n{}", summary.overview);

    if movie.reviews.is_empty() {
        return out;
    }

    if !reviews_expanded {
        let _ = writeln!(out, "\n{} yorum (v ile göster)", movie.reviews.len());
        return out;
    }

    let _ = writeln!(out, "\nYorumlar:");
    for review in &movie.reviews {
        let content = review.display_content();
        let preview: String = content.chars().take(REVIEW_PREVIEW_CHARS).collect();
        let ellipsis = if content.chars().count() > REVIEW_PREVIEW_CHARS {
            "…"
        } else {
            ""
        };
        let _ = writeln!(out, "- {}: {}{}", review.author, preview, ellipsis);
        if let Some(avatar) = review.avatar_url(&config.image_base_url) {
            let _ = writeln!(out, "  ({})", avatar);
        }
    }

    out
}

fn render_session(session: &FetchSession, config: &Config) -> String {
    match (session.current(), session.cursor()) {
        (Some(movie), Some(cursor)) => render_movie(
            movie,
            cursor,
            session.len(),
            session.reviews_expanded(movie.id()),
            config,
        ),
        _ => "Öneri filmi bulunamadı. Yenilemek için r, geri dönmek için b.\n".to_string(),
    }
}

/// Reads the next non-blank line, `None` on end of input
async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> AppResult<Option<String>> {
    loop {
        match lines
            .next_line()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read input: {}", e)))?
        {
            Some(line) if line.trim().is_empty() => continue,
            other => return Ok(other),
        }
    }
}

/// Outcome of one browsing session
enum BrowseExit {
    Back,
    Quit,
}

async fn browse(
    provider: &dyn MovieProvider,
    mood: &MoodDefinition,
    sample_size: u32,
    config: &Config,
    rng: &mut StdRng,
    lines: &mut Lines<BufReader<Stdin>>,
) -> AppResult<BrowseExit> {
    let mut session = FetchSession::new(mood.label);

    println!("{} için en iyi filmleri getiriyoruz...", mood);
    session.reload(provider, sample_size, rng).await;
    print!("{}", render_session(&session, config));

    loop {
        println!("\n[n] sonraki  [p] önceki  [r] karıştır  [v] yorumlar  [b] modu düzenle  [q] çık");
        let Some(line) = read_line(lines).await? else {
            return Ok(BrowseExit::Quit);
        };

        match parse_command(&line) {
            Some(Command::Next) => {
                session.next();
            }
            Some(Command::Previous) => {
                session.previous();
            }
            Some(Command::Reload) => {
                println!("Yeni filmler getiriliyor...");
                session.reload(provider, sample_size, rng).await;
            }
            Some(Command::ToggleReviews) => {
                if let Some(id) = session.current().map(EnrichedMovie::id) {
                    session.toggle_reviews(id);
                }
            }
            Some(Command::Back) => {
                session.reset();
                return Ok(BrowseExit::Back);
            }
            Some(Command::Quit) => return Ok(BrowseExit::Quit),
            None => {
                println!("Bilinmeyen komut: {}", line.trim());
                continue;
            }
        }

        print!("{}", render_session(&session, config));
    }
}

/// Runs the interactive front-end until the user quits or input ends
pub async fn run(
    provider: &dyn MovieProvider,
    config: &Config,
    mood: Option<String>,
    sample_size: Option<u32>,
) -> AppResult<()> {
    let sample_size = sample_size.unwrap_or(config.sample_size);
    if sample_size == 0 {
        return Err(AppError::InvalidInput(
            "Sample size must be at least 1".to_string(),
        ));
    }

    let mut rng = StdRng::from_os_rng();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut preselected = mood.map(|m| choose_mood(&m)).transpose()?;

    loop {
        let mood = match preselected.take() {
            Some(mood) => mood,
            None => {
                print!("{}", render_catalog());
                let Some(line) = read_line(&mut lines).await? else {
                    return Ok(());
                };
                if parse_command(&line) == Some(Command::Quit) {
                    return Ok(());
                }
                match choose_mood(&line) {
                    Ok(mood) => mood,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                }
            }
        };

        tracing::info!(mood = %mood.label, sample_size = sample_size, "Mood selected");

        match browse(provider, mood, sample_size, config, &mut rng, &mut lines).await? {
            BrowseExit::Back => continue,
            BrowseExit::Quit => return Ok(()),
        }
    }
}
