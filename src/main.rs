use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use undergroundcli::{
    cli::{self, App},
    config::{self, Config},
    error,
    session::SessionManager,
    spotify::auth::BrowserAuthorizer,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in with Spotify and show your profile
    Auth,

    /// Underground artists related to your Last.fm top artists
    Picks(PicksOptions),

    /// Underground artists related to an artist
    Related(ArtistOptions),

    /// Low-popularity tracks from your favorite artist
    Gems(ArtistOptions),

    /// List your playlists
    Playlists,

    /// Underground tracks inspired by one of your playlists
    Recommend(RecommendOptions),

    /// Show details of a single artist
    Artist(ArtistIdOptions),

    /// Interactive shell keeping one session across commands
    Shell,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PicksOptions {
    /// Last.fm username
    pub username: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistOptions {
    /// Artist name
    #[clap(num_args = 1.., required = true)]
    pub name: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistIdOptions {
    /// Spotify artist id
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Playlist id; defaults to your first playlist
    #[clap(long)]
    pub playlist: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let config = Arc::new(Config::from_env());
    let authorizer = Arc::new(BrowserAuthorizer::new(Arc::clone(&config)));
    let session = Arc::new(SessionManager::new(Arc::clone(&config), authorizer));
    let one_shot = App::new(&config, Arc::clone(&session)).with_auto_sign_in(true);

    let ok = match cli.command {
        Command::Auth => cli::run(&one_shot, cli::sign_in(&one_shot)).await,
        Command::Picks(opt) => cli::run(&one_shot, cli::picks(&one_shot, &opt.username)).await,
        Command::Related(opt) => {
            cli::run(&one_shot, cli::related(&one_shot, &opt.name.join(" "))).await
        }
        Command::Gems(opt) => cli::run(&one_shot, cli::gems(&one_shot, &opt.name.join(" "))).await,
        Command::Playlists => {
            cli::run(&one_shot, async {
                cli::playlists(&one_shot).await.map(|_| ())
            })
            .await
        }
        Command::Recommend(opt) => {
            cli::run(&one_shot, cli::recommend(&one_shot, opt.playlist.as_deref())).await
        }
        Command::Artist(opt) => cli::run(&one_shot, cli::artist(&one_shot, &opt.id)).await,
        Command::Shell => {
            let app = App::new(&config, session);
            cli::run(&app, cli::shell(&app)).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            true
        }
    };

    if !ok {
        std::process::exit(1);
    }
}
