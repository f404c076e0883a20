mod config;
mod error;
mod logging;
mod render;

use chrono::{Datelike, Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use meridian_core::{HolidayFeed, HolidayFetcher, MonthGrid, RegionId, Selection, YearMonth};
use meridian_nager::NagerClient;
use tracing::info;

use crate::config::{BASE_URL_ENV, Config, load_config, resolve_active_codes, resolve_base_url};
use crate::error::ToolError;

#[derive(Parser)]
#[command(name = "mer")]
#[command(about = "Public holidays across regions on a month calendar", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Holiday API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Which countries are active. Defaults to the config file, then every region.
#[derive(Args)]
struct ActiveArgs {
    /// Region to show (repeatable): east_asia, southeast_asia, oceania, north_america, europe
    #[arg(short, long = "region")]
    regions: Vec<RegionId>,

    /// Country code to show (repeatable), e.g. KR
    #[arg(short, long = "country")]
    countries: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show a month calendar with holiday markers
    Month {
        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12, defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Also list the holidays of this day (YYYY-MM-DD)
        #[arg(long)]
        select: Option<NaiveDate>,

        #[command(flatten)]
        active: ActiveArgs,
    },
    /// List the holidays on one day
    Day {
        /// Date as YYYY-MM-DD
        date: NaiveDate,

        #[command(flatten)]
        active: ActiveArgs,
    },
    /// List regions and their countries
    Regions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config()?;

    match cli.command {
        Command::Month {
            year,
            month,
            select,
            active,
        } => {
            let today = Local::now().date_naive();
            let shown = resolve_year_month(year, month, today)?;
            let codes = resolve_active_codes(&active.regions, &active.countries, &config)?;
            let feed = open_feed(cli.base_url, &config)?;

            feed.update(shown.year(), &codes).await;
            let index = feed.snapshot();
            info!(dates = index.len(), year = shown.year(), "holidays loaded");

            let grid = MonthGrid::build(shown.year(), shown.month(), today, &index)?;
            print!("{}", render::month_grid(&grid));
            println!();
            print!("{}", render::legend());

            if let Some(date) = select {
                if date.year() != shown.year() {
                    feed.update(date.year(), &codes).await;
                }
                let mut selection = Selection::new();
                selection.select(date, &feed.snapshot());
                println!();
                print!("{}", render::day_holidays(date, selection.holidays()));
            }
        }
        Command::Day { date, active } => {
            let codes = resolve_active_codes(&active.regions, &active.countries, &config)?;
            let feed = open_feed(cli.base_url, &config)?;

            feed.update(date.year(), &codes).await;
            let mut selection = Selection::new();
            selection.select(date, &feed.snapshot());
            print!("{}", render::day_holidays(date, selection.holidays()));
        }
        Command::Regions => {
            print!("{}", render::regions_list());
        }
    }

    Ok(())
}

fn open_feed(cli_base_url: Option<String>, config: &Config) -> Result<HolidayFeed<NagerClient>, ToolError> {
    let base_url = resolve_base_url(cli_base_url, std::env::var(BASE_URL_ENV).ok(), config);
    info!(%base_url, "using holiday API");
    let client = NagerClient::with_timeout(base_url, config.timeout())?;
    Ok(HolidayFeed::new(HolidayFetcher::new(client)))
}

/// Year and zero-based month to show; `month` is 1-based as typed by the user.
fn resolve_year_month(
    year: Option<i32>,
    month: Option<u32>,
    today: NaiveDate,
) -> Result<YearMonth, ToolError> {
    let current = YearMonth::from_date(today);
    let month0 = match month {
        Some(m @ 1..=12) => m - 1,
        Some(m) => return Err(ToolError::InvalidMonth(m)),
        None => current.month(),
    };
    Ok(YearMonth::new(year.unwrap_or(current.year()), month0)?)
}
