use clap::{
    ArgGroup, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotifeat::{
    cli::{self, FollowAction},
    config,
    discovery::DEFAULT_MAX_ATTEMPTS,
    error,
    ranking::WindowWeights,
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
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the logged in profile
    Me,

    /// Score your top tracks across short, medium and long term history
    Top(TopOptions),

    /// Find a random track by year and genre
    Discover(DiscoverOptions),

    /// List the genres known to discover
    Genres,

    /// List the tracks of a playlist
    Playlist(PlaylistOptions),

    /// Follow, unfollow or check another user
    Follow(FollowOptions),

    /// List playback devices
    Devices,

    /// Pause playback
    Pause,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    /// Number of tracks to show
    #[clap(long, default_value_t = 25)]
    pub limit: usize,

    /// Weight of the last ~4 weeks
    #[clap(long, default_value_t = 1)]
    pub short_weight: u32,

    /// Weight of the last ~6 months
    #[clap(long, default_value_t = 1)]
    pub medium_weight: u32,

    /// Weight of the whole history
    #[clap(long, default_value_t = 1)]
    pub long_weight: u32,

    /// Save the shown tracks to a new private playlist
    #[clap(long)]
    pub save: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Restrict the search to a genre (see `genres`)
    #[clap(long)]
    pub genre: Option<String>,

    /// Random queries to try before giving up
    #[clap(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: u32,

    /// Add the track to this playlist
    #[clap(long)]
    pub playlist: Option<String>,

    /// Start playing the track
    #[clap(long)]
    pub play: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Playlist id
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
#[clap(group(ArgGroup::new("action").args(["remove", "check"])))]
pub struct FollowOptions {
    /// Spotify user id
    pub user: String,

    /// Unfollow instead of follow
    #[clap(long)]
    pub remove: bool,

    /// Only report whether you follow the user
    #[clap(long)]
    pub check: bool,
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

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Me => cli::me().await,
        Command::Top(opt) => {
            let weights = WindowWeights {
                short: opt.short_weight,
                medium: opt.medium_weight,
                long: opt.long_weight,
            };
            cli::top(opt.limit, weights, opt.save).await
        }
        Command::Discover(opt) => {
            cli::discover(opt.genre, opt.attempts, opt.playlist, opt.play).await
        }
        Command::Genres => cli::genres(),
        Command::Playlist(opt) => cli::playlist(opt.id).await,
        Command::Follow(opt) => {
            let action = if opt.check {
                FollowAction::Check
            } else if opt.remove {
                FollowAction::Unfollow
            } else {
                FollowAction::Follow
            };
            cli::follow(opt.user, action).await
        }
        Command::Devices => cli::devices().await,
        Command::Pause => cli::pause().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
