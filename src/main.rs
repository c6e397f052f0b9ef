use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use housing_filter::catalog::LabelKind;
use housing_filter::calculator::{self, BorrowingInput, MortgageInput, PaymentFrequency, DEFAULT_DEBT_RATIO};
use housing_filter::sources::{AirtableSource, ListingQuery, ListingSource};
use housing_filter::{
    Catalog, CompletionPayload, EmptyFilter, FilterExpressionBuilder, Language, ProfileName, SearchCriteria,
    Settings,
};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "housing-filter", version, about = "Search filter formulas and property calculators")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "HOUSING_FILTER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the filter formula for a search form submission
    Build {
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Print the chat completion payload instead of the bare formula
        #[arg(long)]
        payload: bool,
        /// Also write a JSON build report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Run the filter formula against the configured Airtable table
    Query {
        #[command(flatten)]
        criteria: CriteriaArgs,
        /// Stop after this many listings
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_records: Option<u32>,
        /// Records per request
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        page_size: Option<u32>,
        /// Airtable view to read from
        #[arg(long)]
        view: Option<String>,
    },
    /// List the labels a search form offers
    Labels {
        #[arg(long, value_enum)]
        kind: LabelKind,
        #[arg(long, value_enum, default_value_t = Language::English)]
        language: Language,
    },
    /// Periodic mortgage payment
    Mortgage {
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 0.0)]
        down_payment: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 25)]
        years: u32,
        #[arg(long, value_enum, default_value_t = PaymentFrequency::Monthly)]
        frequency: PaymentFrequency,
    },
    /// Largest loan and purchase price an income supports
    Borrowing {
        /// Gross annual income
        #[arg(long)]
        income: f64,
        #[arg(long, default_value_t = 0.0)]
        debts: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 25)]
        years: u32,
        #[arg(long, default_value_t = 0.0)]
        down_payment: f64,
        #[arg(long, default_value_t = DEFAULT_DEBT_RATIO)]
        debt_ratio: f64,
    },
}

#[derive(Args)]
struct CriteriaArgs {
    /// Criteria JSON file, `-` for stdin
    #[arg(long, default_value = "-")]
    input: PathBuf,
    #[arg(long, value_enum)]
    profile: Option<ProfileName>,
    /// Translate city, category and house-type labels to the profile's language
    #[arg(long)]
    localize: bool,
    /// Rendering of a search with no conditions
    #[arg(long, value_enum)]
    empty_filter: Option<EmptyFilter>,
}

impl CriteriaArgs {
    fn builder(&self, settings: &Settings) -> FilterExpressionBuilder {
        let builder = settings.builder(self.profile);
        match self.empty_filter {
            Some(empty) => builder.with_empty_filter(empty),
            None => builder,
        }
    }
}

#[derive(Serialize)]
struct BuildReport<'a> {
    profile: ProfileName,
    formula: &'a str,
    conditions: Vec<String>,
    generated_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    debug!(?settings, "Loaded settings");

    match cli.command {
        Command::Build {
            criteria,
            payload,
            report,
        } => {
            let builder = criteria.builder(&settings);
            let search = read_criteria(&criteria, &builder).await?;
            let formula = builder.build(&search);
            info!("Built formula with profile {:?}", builder.profile().name);

            if let Some(path) = report {
                let report = BuildReport {
                    profile: builder.profile().name,
                    formula: formula.as_str(),
                    conditions: builder.conditions(&search),
                    generated_at: Utc::now(),
                };
                let json = serde_json::to_string_pretty(&report)?;
                tokio::fs::write(&path, json)
                    .await
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                info!("Saved build report to {}", path.display());
            }

            if payload {
                println!("{}", serde_json::to_string(&CompletionPayload::complete(formula))?);
            } else {
                println!("{}", formula);
            }
        }
        Command::Query {
            criteria,
            max_records,
            page_size,
            view,
        } => {
            let airtable = settings
                .airtable
                .clone()
                .context("No [airtable] section configured")?;
            let builder = criteria.builder(&settings);
            let search = read_criteria(&criteria, &builder).await?;

            let mut query = ListingQuery::new(builder.build(&search));
            if let Some(max) = max_records {
                query = query.with_max_records(max);
            }
            if let Some(page_size) = page_size {
                query = query.with_page_size(page_size);
            }
            if let Some(view) = view {
                query = query.with_view(view);
            }

            let source = AirtableSource::new(airtable)?;
            let listings = source.fetch(&query).await?;
            info!("Found {} listings in {}", listings.len(), source.source_name());
            println!("{}", serde_json::to_string_pretty(&listings)?);
        }
        Command::Labels { kind, language } => {
            for label in Catalog::builtin().labels(kind, language) {
                println!("{}", label);
            }
        }
        Command::Mortgage {
            price,
            down_payment,
            rate,
            years,
            frequency,
        } => {
            let quote = calculator::mortgage(&MortgageInput {
                price,
                down_payment,
                annual_rate_percent: rate,
                amortization_years: years,
                frequency,
            })?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Command::Borrowing {
            income,
            debts,
            rate,
            years,
            down_payment,
            debt_ratio,
        } => {
            let quote = calculator::borrowing_capacity(&BorrowingInput {
                annual_income: income,
                monthly_debts: debts,
                annual_rate_percent: rate,
                amortization_years: years,
                down_payment,
                debt_ratio,
            })?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
    }

    Ok(())
}

/// Read and decode the submitted criteria, localizing labels when asked
async fn read_criteria(args: &CriteriaArgs, builder: &FilterExpressionBuilder) -> Result<SearchCriteria> {
    let raw = read_input(&args.input).await?;
    let criteria: SearchCriteria =
        serde_json::from_str(&raw).context("Criteria must be a JSON object")?;

    if criteria.is_unconstrained() {
        warn!("Submission sets no criteria, the filter will match every listing");
    }
    if args.localize {
        return Ok(Catalog::builtin().localize(&criteria, builder.profile().language));
    }
    Ok(criteria)
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("Failed to read criteria from stdin")?;
        return Ok(raw);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read criteria from {}", path.display()))
}
