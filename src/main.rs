mod cli;
mod config;
mod error;
mod pool;
mod report;
mod scoreboard;
mod types;

use crate::error::{PoolError, Result};
use crate::pool::access;
use crate::pool::mutate::{self, PredictionDraft, SettingsPatch, Upsert};
use crate::pool::pager::CategoryPager;
use crate::pool::store::{JsonFileStore, Loaded, Store};
use crate::types::config::PoolConfig;
use crate::types::model::{self, PoolSettings};
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

struct Workspace {
    config: PoolConfig,
    missing_config: bool,
    store: JsonFileStore,
}

impl Workspace {
    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PoolError::PathNotFound(path.display().to_string()));
        }
        let loaded = config::load_config(path)?;
        let missing_config = loaded.is_none();
        if missing_config {
            eprintln!("warning: no pool.toml found in {}", path.display());
        }
        Ok(Self {
            config: loaded.unwrap_or_default(),
            missing_config,
            store: JsonFileStore::in_dir(path),
        })
    }

    fn year(&self) -> i32 {
        self.config.year()
    }

    fn read_code(&self) -> i32 {
        if self.missing_config {
            exit_code::WARNINGS
        } else {
            exit_code::SUCCESS
        }
    }

    /// Loads, applies `change`, and saves against the loaded revision.
    fn mutate<T>(&self, change: impl FnOnce(&mut Loaded, i32) -> Result<T>) -> Result<T> {
        let mut loaded = self.store.load()?;
        let outcome = change(&mut loaded, self.year())?;
        self.store.save(&loaded.snapshot, &loaded.revision)?;
        Ok(outcome)
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn require_manage(
    config: &PoolConfig,
    loaded: &Loaded,
    year: i32,
    id: &str,
    actor: &str,
) -> Result<()> {
    let prediction = loaded
        .snapshot
        .find_prediction(year, id)
        .ok_or_else(|| PoolError::UnknownPrediction(id.to_string()))?;
    access::require_manage(config, actor, prediction)
}

fn print_settings(settings: &PoolSettings) {
    println!("season: {}", settings.year);
    println!("hide_others_picks: {}", settings.hide_others_picks);
    println!("scoreboard_on_top: {}", settings.scoreboard_on_top);
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Scoreboard(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let pool = workspace.store.load()?.snapshot.season(workspace.year());
            let report = report::build_report(&pool, &workspace.config, cmd.viewer.as_deref());

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&report, output_format)?;
            println!("{rendered}");
            Ok(workspace.read_code())
        }
        cli::Commands::Categories(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let pool = workspace.store.load()?.snapshot.season(workspace.year());
            if pool.categories.is_empty() {
                println!("categories: none for season {}", pool.year);
                return Ok(workspace.read_code());
            }

            let pager = CategoryPager::new(pool.categories.len(), cmd.index);
            let category = &pool.categories[pager.index()];
            let grouped = model::group_by_category(&pool.categories, &pool.nominees);
            println!("[{}] {} ({})", pager.progress(), category.label, category.id);
            for nominee in grouped.get(&category.id).into_iter().flatten() {
                let marker = if nominee.is_winner { " (winner)" } else { "" };
                match &nominee.image_url {
                    Some(url) => println!("- {} [{}]{} <{}>", nominee.name, nominee.id, marker, url),
                    None => println!("- {} [{}]{}", nominee.name, nominee.id, marker),
                }
            }
            if pager.has_prev() {
                println!("prev: --index {}", pager.prev().index());
            }
            if pager.has_next() {
                println!("next: --index {}", pager.next().index());
            }
            Ok(workspace.read_code())
        }
        cli::Commands::Winners(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let pool = workspace.store.load()?.snapshot.season(workspace.year());
            let winners = scoreboard::build_winner_index(&pool.nominees);
            for category in &pool.categories {
                match winners.get(category.id.as_str()) {
                    Some(winner) => println!("{}: {}", category.label, winner.name),
                    None => println!("{}: undecided", category.label),
                }
            }
            println!(
                "decided: {} / {}",
                scoreboard::decided_count(&pool.categories, &winners),
                pool.categories.len()
            );
            Ok(workspace.read_code())
        }
        cli::Commands::SetWinner(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            access::require_admin(&workspace.config, &cmd.actor)?;
            workspace.mutate(|loaded, year| {
                mutate::set_winner(&mut loaded.snapshot, year, &cmd.category, &cmd.nominee)
            })?;
            println!("winner set: {} -> {}", cmd.category, cmd.nominee);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::ClearWinner(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            access::require_admin(&workspace.config, &cmd.actor)?;
            let cleared = workspace.mutate(|loaded, year| {
                mutate::clear_winner(&mut loaded.snapshot, year, &cmd.category)
            })?;
            println!("winner cleared: {} ({} flag(s))", cmd.category, cleared);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Submit(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            if cmd.actor.trim().is_empty() {
                return Err(PoolError::MissingIdentity);
            }
            let picks = cmd
                .picks
                .iter()
                .map(|raw| {
                    model::parse_pick(raw).ok_or_else(|| {
                        PoolError::InvalidPick(format!("expected CATEGORY=NOMINEE, got '{raw}'"))
                    })
                })
                .collect::<Result<_>>()?;
            let draft = PredictionDraft {
                name: cmd.name.clone(),
                email: cmd.actor.clone(),
                user_id: None,
                picks,
                cleared: cmd.cleared.clone(),
            };
            if let Some(id) = cmd.id.as_deref() {
                workspace.mutate(|loaded, year| {
                    require_manage(&workspace.config, loaded, year, id, &cmd.actor)?;
                    mutate::edit_prediction(&mut loaded.snapshot, year, id, draft)
                })?;
                println!("edited prediction {id}");
                return Ok(exit_code::SUCCESS);
            }
            let result = workspace.mutate(|loaded, year| {
                mutate::upsert_prediction(&mut loaded.snapshot, year, draft, Utc::now())
            })?;
            match result {
                Upsert::Created(id) => println!("created prediction {id}"),
                Upsert::Updated(id) => println!("updated prediction {id}"),
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Predictions(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            access::require_admin(&workspace.config, &cmd.actor)?;
            let pool = workspace.store.load()?.snapshot.season(workspace.year());
            let matches = pool.filter_predictions(&cmd.filter);
            if matches.is_empty() {
                println!("predictions: none");
                return Ok(exit_code::SUCCESS);
            }
            for prediction in matches {
                println!(
                    "- {} {} <{}> ({} pick(s))",
                    prediction.id,
                    prediction.name,
                    prediction.email.as_deref().unwrap_or("-"),
                    prediction.picks.len()
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Delete(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            workspace.mutate(|loaded, year| {
                require_manage(&workspace.config, loaded, year, &cmd.id, &cmd.actor)?;
                mutate::delete_prediction(&mut loaded.snapshot, year, &cmd.id)
            })?;
            println!("deleted prediction {}", cmd.id);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Purge(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            access::require_admin(&workspace.config, &cmd.actor)?;
            let removed = workspace.mutate(|loaded, year| {
                Ok(mutate::purge_by_email(&mut loaded.snapshot, year, &cmd.email))
            })?;
            println!("purged {removed} prediction(s)");
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Settings(cmd) => {
            let workspace = Workspace::open(&cmd.path)?;
            let patch = SettingsPatch {
                hide_others_picks: cmd.hide_others_picks,
                scoreboard_on_top: cmd.scoreboard_on_top,
            };
            if patch.is_empty() {
                let settings = workspace.store.load()?.snapshot.settings_for(workspace.year());
                print_settings(&settings);
                return Ok(workspace.read_code());
            }

            access::require_admin(&workspace.config, cmd.actor.as_deref().unwrap_or(""))?;
            let settings = workspace.mutate(|loaded, year| {
                Ok(mutate::update_settings(&mut loaded.snapshot, year, patch))
            })?;
            print_settings(&settings);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
