use std::fs::File;
use std::path::PathBuf;
use std::{env, fs, io};

use chrono::NaiveTime;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tokio::runtime;

use insight_crawler::{fetch_listing, parse_listing, FetchConfig};
use insight_snapshot::AbsencePolicy;
use poker_insight::{run_collect, schedule, CollectorConfig};

/// Poker traffic monitor
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum SubCommand {
    #[command(name = "collect")]
    Collect(CollectArgs),
    #[command(name = "scrap")]
    Scrap(ScrapArgs),
    #[command(name = "schedule")]
    Schedule(ScheduleArgs),
    #[command(hide = true)]
    Completion,
}

/// Collect the latest traffic listing and republish the snapshots
#[derive(Debug, clap::Args)]
pub struct CollectArgs {
    /// Optional collector yaml configuration file
    #[arg(env = "POKER_INSIGHT_CONFIG", long)]
    pub config: Option<PathBuf>,
    /// Override the listing source URL
    #[arg(long)]
    pub source_url: Option<String>,
    /// Override the request user agent
    #[arg(long)]
    pub user_agent: Option<String>,
    /// Override the request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Override the snapshot output directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Override the policy for sites missing from a run
    #[arg(value_enum, long)]
    pub absence_policy: Option<AbsencePolicy>,
    /// Override the data period recorded in the detail artifact
    #[arg(long)]
    pub period_days: Option<u32>,
    /// When quiet no logs are outputted
    #[arg(long, short)]
    pub quiet: bool,
}

impl TryFrom<&CollectArgs> for CollectorConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CollectArgs) -> Result<Self, Self::Error> {
        let mut conf = if let Some(file) = args.config.as_ref().map(File::open) {
            serde_yaml::from_reader(file?)?
        } else {
            CollectorConfig::default()
        };
        if let Some(source_url) = &args.source_url {
            conf.fetch.source_url = source_url.to_string();
        }
        if let Some(user_agent) = &args.user_agent {
            conf.fetch.user_agent = user_agent.to_string();
        }
        if let Some(timeout) = args.timeout {
            conf.fetch.timeout_secs = timeout;
        }
        if let Some(out_dir) = &args.out_dir {
            conf.snapshot.out_dir = out_dir.clone();
        }
        if let Some(absence_policy) = args.absence_policy {
            conf.snapshot.absence_policy = absence_policy;
        }
        if let Some(period_days) = args.period_days {
            conf.snapshot.period_days = period_days;
        }
        Ok(conf)
    }
}

pub fn collect(args: CollectArgs) -> anyhow::Result<()> {
    let conf = (&args).try_into()?;
    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    let report = rt.block_on(run_collect(&conf))?;
    println!(
        "Collected {} sites ({} GG network, {} players online)",
        report.total_sites, report.gg_poker_sites, report.latest_total_players
    );
    Ok(())
}

/// Parse a single listing page and print the rows as JSON
#[derive(Debug, clap::Args)]
#[command(group = clap::ArgGroup::new("page").required(true))]
pub struct ScrapArgs {
    /// A local html page to scrap
    #[arg(group = "page", long)]
    pub file: Option<PathBuf>,
    /// A distant html page to scrap
    #[arg(group = "page", long)]
    pub url: Option<String>,
    /// Custom user agent to download the page
    #[arg(long, conflicts_with = "file")]
    pub ua: Option<String>,
}

pub fn scrap(args: ScrapArgs) -> anyhow::Result<()> {
    let page = if let Some(url) = args.url {
        let mut config = FetchConfig {
            source_url: url,
            ..FetchConfig::default()
        };
        if let Some(ua) = args.ua {
            config.user_agent = ua;
        }
        let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
        rt.block_on(fetch_listing(&config))?
    } else if let Some(path) = args.file {
        fs::read_to_string(path)?
    } else {
        anyhow::bail!("Missing `url` or `file`");
    };

    let rows = parse_listing(&page)?;
    serde_json::to_writer_pretty(io::stdout(), &rows)?;
    println!();
    Ok(())
}

/// Run collection now and then daily at a fixed UTC time
#[derive(Debug, clap::Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub collect: CollectArgs,
    /// Time of day (UTC, HH:MM) for the daily collection
    #[arg(long, default_value = "06:00")]
    pub at: String,
}

pub fn run_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let at = NaiveTime::parse_from_str(&args.at, "%H:%M")
        .map_err(|e| anyhow::anyhow!("Invalid --at time {:?}: {e}", args.at))?;
    let conf = (&args.collect).try_into()?;
    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(schedule::run_daily(&conf, at))
}

fn init_logger(quiet: bool) {
    if quiet {
        return;
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var(
            "RUST_LOG",
            "insight_crawler=info,insight_snapshot=info,poker_insight=info",
        );
    }
    env_logger::init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        SubCommand::Collect(args) => {
            init_logger(args.quiet);
            collect(args)
        }
        SubCommand::Scrap(args) => {
            init_logger(false);
            scrap(args)
        }
        SubCommand::Schedule(args) => {
            init_logger(args.collect.quiet);
            run_schedule(args)
        }
        SubCommand::Completion => {
            generate(
                Shell::Bash,
                &mut Args::command(),
                "poker-insight",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
