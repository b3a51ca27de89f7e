//! ml-movies - interactive movie recommender.
//!
//! One-shot interactive session: load the MovieLens catalog, optionally
//! narrow it to one genre, collect a handful of ratings from the
//! operator, fit the SVD engine on history plus those ratings, and
//! print the top-K recommendations. Nothing is persisted between runs.

use anyhow::{Context, Result};
use catalog::Catalog;
use clap::Parser;
use colored::Colorize;
use engine::{SvdModel, SvdParams, Trainset};
use rand::SeedableRng;
use rand::rngs::StdRng;
use session::{
    display_score, filter_by_genre, rank_candidates, top_k, Console, RatingCollector,
    ScoredCandidate, StdConsole,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// ML Movies - interactive movie recommendations
#[derive(Parser)]
#[command(name = "ml-movies")]
#[command(about = "Interactive movie recommender using matrix factorization", long_about = None)]
struct Cli {
    /// Path to the MovieLens ml-latest-small dataset directory
    #[arg(short, long, default_value = "data/ml-latest-small")]
    data_dir: PathBuf,

    /// Number of latent factors for the SVD model
    #[arg(long, default_value_t = 100)]
    factors: usize,

    /// Number of SGD training epochs
    #[arg(long, default_value_t = 35)]
    epochs: usize,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading MovieLens dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_dir(&cli.data_dir)
        .context("Failed to load MovieLens dataset")?;
    let (movies, ratings, links) = catalog.counts();
    info!(
        movies,
        ratings,
        links,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Catalog loaded"
    );
    println!(
        "{} Loaded {} movies and {} ratings in {:?}",
        "✓".green(),
        movies,
        ratings,
        start.elapsed()
    );

    let params = SvdParams {
        n_factors: cli.factors,
        n_epochs: cli.epochs,
        ..SvdParams::default()
    };

    run_session(&catalog, &params, &mut StdConsole)
}

/// Drive one interactive session from genre choice to printed results.
fn run_session(catalog: &Catalog, params: &SvdParams, console: &mut impl Console) -> Result<()> {
    console.say("------------------------");
    console.say(&format!("\n {} \n", "Welcome to ML Movies!".bold().blue()));
    console.say("Let us find your new favorite movie!\n");

    // Stage 1: genre filter
    let genre = prompt_genre(catalog, console)?;
    let candidates = filter_by_genre(catalog, &catalog.all_movie_ids(), genre.as_deref())?;

    // Stage 2: rating collection
    console.say("----------");
    console.say(
        "\nTo calculate the best movies for you, we will need to hear\n\
         what you think of some movies you have already seen.\n",
    );
    console.say("----------");

    let n = prompt_count(
        console,
        "How many movies would you like to rate for the algorithm?",
    )?;

    let synthetic_user = catalog.max_user_id() + 1;
    let collector = RatingCollector::new(catalog, synthetic_user);
    let mut rng = StdRng::from_os_rng();
    let collected = collector.collect(&candidates, n, &mut rng, console)?;

    if collected.cancelled {
        console.say(&format!(
            "Stopped early with {} rating(s) collected.",
            collected.ratings.len()
        ));
    }
    if collected.exhausted {
        console.say(&format!(
            "Ran out of movies to present after {} rating(s).",
            collected.ratings.len()
        ));
    }

    // Stage 3: train on history plus the session's ratings
    let mut all_ratings = catalog.ratings().to_vec();
    all_ratings.extend(collected.ratings.iter().copied());

    console.say("\n working.... \n");
    let start = Instant::now();
    let trainset = Trainset::from_ratings(&all_ratings).context("Building trainset")?;
    let model = SvdModel::fit(trainset, params).context("Training SVD model")?;
    console.say(&format!(
        "\n {} (trained in {:?})\n",
        "Success!".green(),
        start.elapsed()
    ));

    // Stage 4: rank and present
    let ranked = rank_candidates(&model, synthetic_user, &candidates);

    loop {
        let k = prompt_count(
            console,
            "How many movie recommendations would you like to see?",
        )?;
        match top_k(&ranked, k) {
            Ok(top) => {
                print_recommendations(catalog, top, console);
                break;
            }
            Err(err) => console.say(&format!("{}", err.to_string().red())),
        }
    }

    Ok(())
}

/// Ask whether to filter by genre and, if so, which one.
///
/// Loops until the operator names a genre in the catalog vocabulary.
/// Entering `q` falls back to the unfiltered catalog.
fn prompt_genre(catalog: &Catalog, console: &mut impl Console) -> Result<Option<String>> {
    let reply = console.prompt("Limit your search to a specific genre? (y/[n])")?;
    if reply != "y" {
        return Ok(None);
    }

    console.say(&format!("\n {} ", "AVAILABLE GENRES:".bold()));
    console.say(&format!("{}\n", catalog.genres().join(", ")));

    loop {
        let genre = console.prompt("From the list above, what genre do you prefer?")?;
        if genre == "q" {
            return Ok(None);
        }
        if catalog.has_genre(&genre) {
            return Ok(Some(genre));
        }
        console.say(&format!("\n {} \n", "ERROR: check spelling.".red()));
    }
}

/// Prompt for a non-negative integer, re-prompting on malformed input.
fn prompt_count(console: &mut impl Console, text: &str) -> Result<usize> {
    loop {
        let reply = console.prompt(text)?;
        match reply.parse::<usize>() {
            Ok(count) => return Ok(count),
            Err(_) => console.say(&format!(
                "{}",
                format!("not a valid entry: {}", reply).red()
            )),
        }
    }
}

/// Print the top recommendations: rank, predicted score on the 1-10
/// scale, title, plus IMDb id and rating stats where known.
fn print_recommendations(
    catalog: &Catalog,
    top: &[ScoredCandidate],
    console: &mut impl Console,
) {
    console.say(&format!("\n{}", "Movie Recommendations:".bold().blue()));
    for (idx, candidate) in top.iter().enumerate() {
        let rank = idx + 1;
        let title = catalog
            .get_movie(candidate.movie_id)
            .map(|m| m.title.as_str())
            .unwrap_or("(unknown title)");

        let mut extras = Vec::new();
        if let Some(imdb) = catalog.get_link(candidate.movie_id) {
            extras.push(format!("imdb tt{}", imdb));
        }
        if let Some(stats) = catalog.get_movie_stats(candidate.movie_id) {
            extras.push(format!(
                "avg {:.2} over {} ratings",
                stats.avg_rating, stats.rating_count
            ));
        }
        let extras = if extras.is_empty() {
            String::new()
        } else {
            format!(" [{}]", extras.join(", "))
        };

        console.say(&format!(
            "{}. {} - predicted rating {:.2}{}",
            rank.to_string().green(),
            title,
            display_score(candidate.predicted_score),
            extras.dimmed()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Movie;
    use session::ScriptedConsole;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_movie(Movie {
            id: 1,
            title: "A".to_string(),
            genres: vec!["Comedy".to_string()],
        });
        catalog.insert_movie(Movie {
            id: 2,
            title: "B".to_string(),
            genres: vec!["Drama".to_string()],
        });
        catalog
    }

    #[test]
    fn test_prompt_genre_declined() {
        let catalog = create_test_catalog();
        let mut console = ScriptedConsole::new(&["n"]);
        assert_eq!(prompt_genre(&catalog, &mut console).unwrap(), None);
    }

    #[test]
    fn test_prompt_genre_reprompts_until_valid() {
        let catalog = create_test_catalog();
        let mut console = ScriptedConsole::new(&["y", "Comdy", "Comedy"]);

        let genre = prompt_genre(&catalog, &mut console).unwrap();
        assert_eq!(genre, Some("Comedy".to_string()));
        // One misspelling was reported before the valid entry
        assert!(console.output.iter().any(|l| l.contains("check spelling")));
    }

    #[test]
    fn test_prompt_genre_quit_falls_back() {
        let catalog = create_test_catalog();
        let mut console = ScriptedConsole::new(&["y", "q"]);
        assert_eq!(prompt_genre(&catalog, &mut console).unwrap(), None);
    }

    #[test]
    fn test_prompt_count_reprompts_on_garbage() {
        let mut console = ScriptedConsole::new(&["three", "-1", "3"]);
        let count = prompt_count(&mut console, "How many?").unwrap();
        assert_eq!(count, 3);
        assert_eq!(console.prompts.len(), 3);
    }
}
