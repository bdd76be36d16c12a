use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "awards-pool",
    version,
    about = "Awards-show prediction pool and scoreboard CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every prediction and render the scoreboard
    Scoreboard(ScoreboardCommand),
    /// Show one category and its nominees
    Categories(CategoriesCommand),
    /// List each category's decided winner
    Winners(WinnersCommand),
    /// Mark the winner of a category (admin)
    SetWinner(SetWinnerCommand),
    /// Clear the winner of a category (admin)
    ClearWinner(ClearWinnerCommand),
    /// Create or update your prediction, or edit one by id (owner or admin)
    Submit(SubmitCommand),
    /// List predictions, optionally filtered by name or e-mail (admin)
    Predictions(PredictionsCommand),
    /// Delete one prediction (owner or admin)
    Delete(DeleteCommand),
    /// Delete every prediction submitted from an e-mail address (admin)
    Purge(PurgeCommand),
    /// Show or change the season's display settings
    Settings(SettingsCommand),
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreboardCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// E-mail of the viewer, used when other participants' picks are hidden
    #[arg(long = "as", value_name = "EMAIL")]
    pub viewer: Option<String>,
}

#[derive(Args)]
pub struct CategoriesCommand {
    pub path: PathBuf,
    /// Zero-based category position; clamped to the last category
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

#[derive(Args)]
pub struct WinnersCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct SetWinnerCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub nominee: String,
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: String,
}

#[derive(Args)]
pub struct ClearWinnerCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub category: String,
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: String,
}

#[derive(Args)]
pub struct SubmitCommand {
    pub path: PathBuf,
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: String,
    /// Edit this prediction instead of the one owned by --as
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: String,
    /// CATEGORY=NOMINEE, repeatable
    #[arg(long = "pick", value_name = "CATEGORY=NOMINEE")]
    pub picks: Vec<String>,
    /// Category whose pick should be removed, repeatable
    #[arg(long = "clear", value_name = "CATEGORY")]
    pub cleared: Vec<String>,
}

#[derive(Args)]
pub struct PredictionsCommand {
    pub path: PathBuf,
    #[arg(long, default_value = "")]
    pub filter: String,
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: String,
}

#[derive(Args)]
pub struct DeleteCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub id: String,
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: String,
}

#[derive(Args)]
pub struct PurgeCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub email: String,
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: String,
}

#[derive(Args)]
pub struct SettingsCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub hide_others_picks: Option<bool>,
    #[arg(long)]
    pub scoreboard_on_top: Option<bool>,
    /// Required when changing a setting
    #[arg(long = "as", value_name = "EMAIL")]
    pub actor: Option<String>,
}
