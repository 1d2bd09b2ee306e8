//! Cinelog CLI - command-line client for a remote movie catalog

use clap::{Parser, Subcommand};

use cinelog_core::config::Config;
use cinelog_core::domain::{Id, MovieRecord};
use cinelog_core::gateway::CatalogClient;

mod menu;

#[derive(Parser)]
#[command(name = "cinelog")]
#[command(author, version, about = "Command-line client for a remote movie catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog server API root (overrides configuration)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive catalog session
    Menu,

    /// Browse the catalog without logging in
    Movies {
        #[command(subcommand)]
        action: MovieAction,
    },
}

#[derive(Subcommand)]
enum MovieAction {
    /// List all movies
    List,
    /// Show one movie by id
    Show { id: i64 },
    /// List movies sorted by title
    Sorted,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cinelog=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let gateway = match cli.server {
        Some(server) => CatalogClient::builder()
            .base_url(server)
            .timeout_secs(config.api.timeout_secs)
            .build()?,
        None => CatalogClient::from_config(&config.api)?,
    };
    tracing::debug!(base_url = gateway.base_url(), "Catalog client ready");

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => menu::MenuSession::new(gateway)?.run().await,
        Commands::Movies { action } => match action {
            MovieAction::List => {
                print_records(&gateway.get_movies().await, cli.quiet);
                Ok(())
            }
            MovieAction::Sorted => {
                print_records(&gateway.sort_movies_by_title().await, cli.quiet);
                Ok(())
            }
            MovieAction::Show { id } => cmd_movie_show(&gateway, id, cli.quiet).await,
        },
    }
}

async fn cmd_movie_show(gateway: &CatalogClient, id: i64, quiet: bool) -> anyhow::Result<()> {
    let movie_id = Id::new(id).map_err(anyhow::Error::from)?;

    match gateway.get_movie(movie_id).await {
        Some(record) => match record.to_movie() {
            Ok(movie) => {
                print!("{movie}");
                if !quiet {
                    println!("Poster: {}", record.image_url);
                }
            }
            Err(error) => println!("Movie {movie_id} has an invalid record: {error}"),
        },
        None => println!("No movie with id {movie_id}."),
    }
    Ok(())
}

fn print_records(records: &[MovieRecord], quiet: bool) {
    if records.is_empty() {
        println!("The catalog has no movies right now.");
        return;
    }
    for record in records {
        if quiet {
            println!("{} - {}", record.id, record.title);
            continue;
        }
        match record.to_movie() {
            Ok(movie) => println!("{movie}"),
            Err(error) => {
                println!("{} - {} (invalid record: {error})", record.id, record.title);
            }
        }
    }
}
