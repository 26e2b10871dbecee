//! `snippet-press` — prints a fresh edition of story snippets.
use clap::Parser;
use snippet_press::config::Config;
use snippet_press::core::generator::SnippetGenerator;
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const BANNER: &str = "--- The Cowboy Printer Daily - Fresh Off The Data Press! ---";
const DIVIDER: &str = "----------------------------------------------------------";
const TRAILER: [&str; 2] = [
    "To generate new content, simply run this script again!",
    "You can expand the .json files with more characters, settings, events, and templates.",
];

#[derive(Parser)]
#[command(
    name = "snippet-press",
    about = "Print randomized story snippets from JSON data pools",
    version
)]
struct Cli {
    /// RON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding characters.json, settings.json, events.json and story_templates.json
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Number of stories to print (default: 3)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from_ron(path).unwrap_or_else(|e| {
            eprintln!("Error: could not load config '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data.data_dir = dir;
    }
    if let Some(count) = cli.count {
        config.story_count = count;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    info!(
        data_dir = %config.data.data_dir.display(),
        stories = config.story_count,
        seed = ?config.seed,
        "starting press run"
    );

    let mut generator = match config.seed {
        Some(seed) => SnippetGenerator::seeded(config.data, seed),
        None => SnippetGenerator::new(config.data),
    };

    println!("{}\n", BANNER);
    for i in 0..config.story_count {
        let story = generator.generate();
        println!("Story #{}:\n{}\n", i + 1, story);
        println!("{}\n", DIVIDER);
    }

    for line in TRAILER {
        println!("{}", line);
    }
}
