use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{Book, Catalog};
use pipeline::{FilterCriteria, Strategy};
use session::{
    BookRecommendation, Intent, PreferenceState, PreferenceUpdate, RecommendationSession,
    RecommenderConfig, SessionAction, SessionResponse,
};
use similarity::{CompositeMetric, GenreTaxonomy};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// BookRecs - Book Recommendation Engine
#[derive(Parser)]
#[command(name = "book-recs")]
#[command(about = "Content-based book recommendations from likes, dislikes and filters", long_about = None)]
struct Cli {
    /// Path to the catalog CSV file
    #[arg(short, long, default_value = "data/books.csv")]
    data_path: PathBuf,

    /// Optional JSON recommender config
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend books from liked and disliked titles
    Recommend {
        /// Title of a liked book (repeatable)
        #[arg(long = "like", required = true)]
        likes: Vec<String>,

        /// Title of a disliked book (repeatable)
        #[arg(long = "dislike")]
        dislikes: Vec<String>,

        /// Aggregation strategy: average, union, combined or content_boost
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Dislike penalty factor in [0, 1]
        #[arg(long)]
        penalty: Option<f32>,

        /// Number of recommendations to return
        #[arg(long)]
        limit: Option<usize>,

        /// Show why each book was recommended
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Find books similar to one title
    Similar {
        /// Title to search around (case-insensitive, substring allowed)
        #[arg(long)]
        title: String,

        /// Number of similar books to return
        #[arg(long, default_value = "5")]
        limit: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Compare two books side by side
    Compare {
        #[arg(long)]
        first: String,

        #[arg(long)]
        second: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for books by title
    Search {
        /// Book title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Read parsed intents as JSON, one per line, from stdin
    Chat,
}

/// Catalog filters shared by several commands
#[derive(Args, Default)]
struct FilterArgs {
    #[arg(long)]
    genre: Vec<String>,

    #[arg(long)]
    author: Vec<String>,

    #[arg(long)]
    publisher: Vec<String>,

    #[arg(long)]
    language: Vec<String>,

    #[arg(long)]
    age_restriction: Vec<u32>,

    #[arg(long)]
    year_from: Option<i32>,

    #[arg(long)]
    year_to: Option<i32>,

    #[arg(long)]
    pages_from: Option<u32>,

    #[arg(long)]
    pages_to: Option<u32>,

    #[arg(long)]
    illustrated: Option<bool>,
}

impl FilterArgs {
    fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            author: self.author.clone(),
            publisher: self.publisher.clone(),
            language: self.language.clone(),
            genre: self.genre.clone(),
            age_restriction: self.age_restriction.clone(),
            year_from: self.year_from,
            year_to: self.year_to,
            pages_from: self.pages_from,
            pages_to: self.pages_to,
            has_illustrations: self.illustrated,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecommenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RecommenderConfig::default(),
    };
    debug!("Using config: {:?}", config);

    eprintln!("Loading book catalog from {}...", cli.data_path.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_file(&cli.data_path).context("Failed to load book catalog")?,
    );
    eprintln!(
        "{} Loaded {} books in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    let taxonomy = Arc::new(GenreTaxonomy::standard());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            likes,
            dislikes,
            strategy,
            penalty,
            limit,
            explain,
            filters,
        } => {
            let mut config = config;
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            if let Some(penalty) = penalty {
                config.penalty_factor = penalty;
            }
            if let Some(limit) = limit {
                config.n_recommendations = limit;
            }
            config.validate().context("Invalid recommendation options")?;

            let update = PreferenceUpdate::default()
                .with_filters(filters.to_criteria())
                .with_likes(likes)
                .with_dislikes(dislikes);
            handle_recommend(catalog, taxonomy, &config, update, explain)?
        }
        Commands::Similar {
            title,
            limit,
            filters,
        } => handle_similar(catalog, taxonomy, &config, &title, limit, &filters)?,
        Commands::Compare {
            first,
            second,
            json,
        } => handle_compare(&catalog, taxonomy, &config, &first, &second, json)?,
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::Chat => handle_chat(catalog, taxonomy, &config)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: Arc<Catalog>,
    taxonomy: Arc<GenreTaxonomy>,
    config: &RecommenderConfig,
    update: PreferenceUpdate,
    explain: bool,
) -> Result<()> {
    let mut session = RecommendationSession::from_catalog(catalog, taxonomy, config);
    let response = session.layer(update)?;

    report_unresolved(&response.unresolved);
    if !response.state.has_likes() {
        return Err(anyhow!("None of the liked titles were found in the catalog"));
    }

    print_recommendations(&response.recommendations, explain);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    catalog: Arc<Catalog>,
    taxonomy: Arc<GenreTaxonomy>,
    config: &RecommenderConfig,
    title: &str,
    limit: usize,
    filters: &FilterArgs,
) -> Result<()> {
    let mut session = RecommendationSession::from_catalog(catalog, taxonomy, config);
    let criteria = filters.to_criteria();
    if !criteria.is_empty() {
        session.layer(PreferenceUpdate::default().with_filters(criteria))?;
    }

    let similar = session
        .similar(title, limit)
        .with_context(|| format!("Cannot search around '{}'", title))?;

    println!("{}", format!("Books similar to '{}':", title).bold().blue());
    for (rank, (book, similarity)) in similar.iter().enumerate() {
        println!(
            "{}. {} - similarity {:.3}",
            (rank + 1).to_string().green(),
            describe(book),
            similarity
        );
    }
    Ok(())
}

/// Handle the 'compare' command
fn handle_compare(
    catalog: &Catalog,
    taxonomy: Arc<GenreTaxonomy>,
    config: &RecommenderConfig,
    first: &str,
    second: &str,
    json: bool,
) -> Result<()> {
    let find = |title: &str| {
        catalog
            .find_by_title(title)
            .ok_or_else(|| anyhow!("Book '{}' not found", title))
    };
    let a = find(first)?;
    let b = find(second)?;

    let metric = CompositeMetric::fit(catalog, taxonomy);
    let comparison = metric.compare(a, b, &config.weights);

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("{}", "Comparison:".bold().blue());
    println!("  {}", describe(a));
    println!("  {}", describe(b));
    println!("{}Similarity: {:.3}", "• ".cyan(), comparison.similarity);
    println!("{}In common:", "• ".green());
    for feature in &comparison.common_features {
        println!("    - {}", feature);
    }
    println!("{}Differences:", "• ".yellow());
    for difference in &comparison.differences {
        println!("    - {}", difference);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) {
    let matches = catalog.search(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no books found");
    }
    for book in matches.iter().take(20) {
        println!("{}: {}", book.id, describe(book));
    }
}

/// Handle the 'chat' command
fn handle_chat(
    catalog: Arc<Catalog>,
    taxonomy: Arc<GenreTaxonomy>,
    config: &RecommenderConfig,
) -> Result<()> {
    let mut session = RecommendationSession::from_catalog(catalog, taxonomy, config);
    let stdin = io::stdin();

    prompt()?;
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }

        // Bad lines are reported and skipped
        match Intent::from_json(&line)
            .map_err(anyhow::Error::from)
            .and_then(|intent| session.handle(&intent).map_err(anyhow::Error::from))
        {
            Ok(response) => print_response(&response),
            Err(e) => eprintln!("{} {:#}", "✗".red(), e),
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result<()> {
    print!("{} ", ">".bold());
    io::stdout().flush().context("Failed to flush stdout")
}

fn print_response(response: &SessionResponse) {
    match response.action {
        SessionAction::Layered => {}
        SessionAction::SteppedBack => println!("{}", "Stepped back.".yellow()),
        SessionAction::NothingToUndo => println!("{}", "Nothing to undo.".yellow()),
        SessionAction::Reset => println!("{}", "Starting over.".yellow()),
    }
    report_unresolved(&response.unresolved);
    print_state(&response.state);

    if response.state.has_likes() {
        print_recommendations(&response.recommendations, true);
    } else {
        println!(
            "{}",
            format!("Found {} books:", response.state.candidates.len()).bold().blue()
        );
        for book in &response.listing {
            println!("  - {}", describe(book));
        }
    }
}

fn print_state(state: &PreferenceState) {
    if !state.filters.is_empty() {
        let filters = serde_json::to_string(&state.filters).unwrap_or_default();
        println!("{}Filters: {}", "• ".cyan(), filters);
    }
    if !state.likes.is_empty() {
        println!("{}Likes: {}", "• ".green(), state.likes.join(", "));
    }
    if !state.dislikes.is_empty() {
        println!("{}Dislikes: {}", "• ".red(), state.dislikes.join(", "));
    }
}

fn report_unresolved(unresolved: &[String]) {
    for title in unresolved {
        eprintln!("{} '{}' is not in the catalog, skipped", "!".yellow(), title);
    }
}

fn describe(book: &Book) -> String {
    format!(
        "{} - {} ({}, {}, {} pages)",
        book.title, book.author, book.genre, book.year, book.pages
    )
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[BookRecommendation], explain: bool) {
    println!("{}", "Recommendations:".bold().blue());
    if recommendations.is_empty() {
        println!("  no suitable books found");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (rank + 1).to_string().green(),
            describe(&rec.book),
            rec.score
        );
        if explain {
            if let Some((title, similarity)) = &rec.explanation.similar_to {
                println!("   Similar to: '{}' (similarity {:.3})", title, similarity);
            }
            if !rec.explanation.shared_features.is_empty() {
                println!(
                    "   In common: {}",
                    rec.explanation.shared_features.join(", ")
                );
            }
        }
    }
}
