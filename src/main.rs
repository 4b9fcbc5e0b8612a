use clap::{Parser, Subcommand};
use publico_feed::engine::{DetailState, FeedSession};
use publico_feed::ops::telemetry;
use publico_feed::refinery::{ArticleIcon, MetadataRow, NormalizedArticle};
use publico_feed::{FeedConfig, NewsClient, ViewModelBuilder};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "publico-feed", version, about = "Público top news and article previews")]
struct Cli {
    /// TOML file with configuration overrides
    #[arg(long, env = "PUBLICO_FEED_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Emit normalized records as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Pretty debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the latest news
    Top,
    /// Show one article's detail view
    Article {
        /// Article link as shown in the feed
        url: String,
        /// Title shown while loading and when the record has none
        #[arg(long, default_value = "Público")]
        title: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        telemetry::init_tracing_pretty();
    } else {
        telemetry::init_tracing();
    }

    let config = match &cli.config {
        Some(path) => match FeedConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::from(2);
            }
        },
        None => FeedConfig::default(),
    };

    let client = match NewsClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let mut session = FeedSession::new(client, ViewModelBuilder::with_config(config));

    match cli.command {
        Command::Top => {
            session.refresh().await;
            if let Some(err) = session.list_error() {
                eprintln!("Error fetching top news: {}", err);
                return ExitCode::FAILURE;
            }

            if cli.json {
                print_json(session.articles());
            } else {
                for article in session.articles() {
                    print_row(article);
                }
            }
            ExitCode::SUCCESS
        }
        Command::Article { url, title } => {
            let state = session.open_article(&url, &title).await;

            match (cli.json, state) {
                (true, DetailState::Ready(article)) => print_json(std::slice::from_ref(&**article)),
                _ => println!("{}", state.markdown()),
            }

            if matches!(state, DetailState::Failed { .. }) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

fn print_json(articles: &[NormalizedArticle]) {
    match serde_json::to_string_pretty(articles) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{}", e),
    }
}

fn print_row(article: &NormalizedArticle) {
    let icon = match &article.icon {
        ArticleIcon::Image { source } => source.clone(),
        ArticleIcon::Letter { text, tint_color } => format!("[{}] {}", text, tint_color),
    };

    println!("== {}", article.title);
    println!("   icon: {}", icon);
    for row in &article.metadata {
        match row {
            MetadataRow::Label { title, text, .. } => println!("   {}: {}", title, text),
            MetadataRow::TagList { title, tags } => {
                let tags: Vec<String> = tags
                    .iter()
                    .map(|t| format!("{} ({})", t.text, t.color))
                    .collect();
                println!("   {}: {}", title, tags.join(", "));
            }
        }
    }
    println!("   url: {}", article.url);
    println!("{}", article.preview_markdown);
}
