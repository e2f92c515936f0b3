//! CLI commands for reports
//!
//! Each command loads nothing itself: it receives a [`ReportContext`] built
//! from one ledger snapshot, runs a report and prints or exports it.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::export::{export_bundle_json, export_bundle_yaml, to_json_pretty, ReportBundle};
use crate::models::{BudgetScope, TransactionType};
use crate::reports::{
    BalanceTrend, BudgetOverview, CategoryBreakdown, DashboardSummary, MonthlySeries,
    RecentTransactions, TransactionFilter, TrendSeed, TrendWindow,
};
use crate::storage::{LedgerSnapshot, LedgerSource};

/// Which expenses count against budgets without a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    AllExpenses,
    #[value(alias = "uncategorized-only")]
    Uncategorized,
}

impl From<ScopeArg> for BudgetScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::AllExpenses => BudgetScope::AllExpenses,
            ScopeArg::Uncategorized => BudgetScope::UncategorizedOnly,
        }
    }
}

/// Starting balance of the trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeedArg {
    Zero,
    AllTime,
}

impl From<SeedArg> for TrendSeed {
    fn from(arg: SeedArg) -> Self {
        match arg {
            SeedArg::Zero => TrendSeed::Zero,
            SeedArg::AllTime => TrendSeed::AllTime,
        }
    }
}

/// Transaction type filter for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TypeArg {
    #[default]
    All,
    Income,
    Expense,
}

impl From<TypeArg> for Option<TransactionType> {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::All => None,
            TypeArg::Income => Some(TransactionType::Income),
            TypeArg::Expense => Some(TransactionType::Expense),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Dashboard summary: balance, totals, averages and savings rate
    #[command(alias = "dashboard")]
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Income and expenses per month
    Monthly {
        /// Number of most recent months to show
        #[arg(short, long)]
        months: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expense totals per category
    #[command(alias = "spending")]
    Categories {
        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Running balance over recent days
    Trend {
        /// Trailing window in days
        #[arg(short, long)]
        days: Option<u32>,

        /// Maximum number of points
        #[arg(short, long)]
        points: Option<usize>,

        /// Where the running balance starts
        #[arg(long, value_enum)]
        seed: Option<SeedArg>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Progress of every budget
    Budgets {
        /// Which expenses count against budgets without a category
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Most recent transactions, optionally searched and filtered
    #[command(alias = "transactions")]
    Recent {
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Case-insensitive text to find in the description or category name
        #[arg(short, long)]
        search: Option<String>,

        /// Only show one transaction type
        #[arg(short = 't', long = "type", value_enum, default_value_t = TypeArg::All)]
        kind: TypeArg,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every report at once
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Everything a report command needs
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub snapshot: LedgerSnapshot,
    pub settings: Settings,
    /// Reference date for the trend window
    pub today: NaiveDate,
}

impl ReportContext {
    /// Load one snapshot from `source`
    pub fn load(
        source: &dyn LedgerSource,
        settings: Settings,
        today: NaiveDate,
    ) -> FintrackResult<Self> {
        Ok(Self {
            snapshot: source.load()?,
            settings,
            today,
        })
    }

    fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Handle report commands
pub fn handle_report_command(ctx: &ReportContext, cmd: ReportCommands) -> FintrackResult<()> {
    match cmd {
        ReportCommands::Summary { json } => handle_summary(ctx, json),
        ReportCommands::Monthly {
            months,
            output,
            json,
        } => handle_monthly(ctx, months, output, json),
        ReportCommands::Categories { top, output, json } => {
            handle_categories(ctx, top, output, json)
        }
        ReportCommands::Trend {
            days,
            points,
            seed,
            json,
        } => handle_trend(ctx, days, points, seed, json),
        ReportCommands::Budgets {
            scope,
            output,
            json,
        } => handle_budgets(ctx, scope, output, json),
        ReportCommands::Recent {
            limit,
            search,
            kind,
            json,
        } => handle_recent(ctx, limit, TransactionFilter::new(search, kind.into()), json),
        ReportCommands::Export { format, output } => handle_export(ctx, format, output),
    }
}

fn handle_summary(ctx: &ReportContext, json: bool) -> FintrackResult<()> {
    let summary = DashboardSummary::generate(
        &ctx.snapshot.transactions,
        &ctx.snapshot.budgets,
        ctx.settings.months_window,
    );

    if json {
        println!("{}", to_json_pretty(&summary)?);
    } else {
        println!("{}", summary.format_terminal(ctx.symbol()));
    }

    Ok(())
}

fn handle_monthly(
    ctx: &ReportContext,
    months: Option<usize>,
    output: Option<PathBuf>,
    json: bool,
) -> FintrackResult<()> {
    let months = months.unwrap_or(ctx.settings.months_window);
    let series = MonthlySeries::generate(&ctx.snapshot.transactions, months);

    if let Some(path) = output {
        series.export_csv(create_export_file(&path)?)?;
        println!("Monthly report exported to: {}", path.display());
    } else if json {
        println!("{}", to_json_pretty(&series)?);
    } else {
        println!("{}", series.format_terminal(ctx.symbol()));
    }

    Ok(())
}

fn handle_categories(
    ctx: &ReportContext,
    top: Option<usize>,
    output: Option<PathBuf>,
    json: bool,
) -> FintrackResult<()> {
    let mut breakdown =
        CategoryBreakdown::generate(&ctx.snapshot.transactions, &ctx.snapshot.categories);

    if let Some(limit) = top {
        breakdown.retain_top(limit);
    }

    if let Some(path) = output {
        breakdown.export_csv(create_export_file(&path)?)?;
        println!("Category report exported to: {}", path.display());
    } else if json {
        println!("{}", to_json_pretty(&breakdown)?);
    } else {
        println!("{}", breakdown.format_terminal(ctx.symbol()));
    }

    Ok(())
}

fn handle_trend(
    ctx: &ReportContext,
    days: Option<u32>,
    points: Option<usize>,
    seed: Option<SeedArg>,
    json: bool,
) -> FintrackResult<()> {
    let window = TrendWindow {
        today: ctx.today,
        days: days.unwrap_or(ctx.settings.trend_window_days),
        max_points: points.unwrap_or(ctx.settings.trend_max_points),
        seed: seed.map(TrendSeed::from).unwrap_or(ctx.settings.trend_seed),
    };
    let trend = BalanceTrend::generate(&ctx.snapshot.transactions, window);

    if json {
        println!("{}", to_json_pretty(&trend)?);
    } else {
        println!("{}", trend.format_terminal(ctx.symbol()));
    }

    Ok(())
}

fn handle_budgets(
    ctx: &ReportContext,
    scope: Option<ScopeArg>,
    output: Option<PathBuf>,
    json: bool,
) -> FintrackResult<()> {
    let scope = scope
        .map(BudgetScope::from)
        .unwrap_or(ctx.settings.budget_scope);
    let overview = BudgetOverview::generate(
        &ctx.snapshot.budgets,
        &ctx.snapshot.transactions,
        scope,
        &ctx.settings.health_thresholds,
    );

    if let Some(path) = output {
        overview.export_csv(create_export_file(&path)?)?;
        println!("Budget report exported to: {}", path.display());
    } else if json {
        println!("{}", to_json_pretty(&overview)?);
    } else {
        println!("{}", overview.format_terminal(ctx.symbol()));

        let over: Vec<_> = overview.over_budget().map(|r| r.budget.name.as_str()).collect();
        if !over.is_empty() {
            println!("Over budget: {}", over.join(", "));
        }
    }

    Ok(())
}

fn handle_recent(
    ctx: &ReportContext,
    limit: Option<usize>,
    filter: TransactionFilter,
    json: bool,
) -> FintrackResult<()> {
    let recent = RecentTransactions::generate_filtered(
        &ctx.snapshot.transactions,
        &ctx.snapshot.categories,
        &filter,
        limit.unwrap_or(ctx.settings.recent_limit),
    );

    if json {
        println!("{}", to_json_pretty(&recent)?);
    } else {
        println!("Recent Transactions");
        print!("{}", recent.format_terminal(ctx.symbol()));
    }

    Ok(())
}

fn handle_export(
    ctx: &ReportContext,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> FintrackResult<()> {
    let bundle = ReportBundle::generate(&ctx.snapshot, &ctx.settings, ctx.today);

    match output {
        Some(path) => {
            let mut writer = create_export_file(&path)?;
            write_bundle(&bundle, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| FintrackError::Export(e.to_string()))?;
            println!("Reports exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_bundle(&bundle, format, &mut writer)?;
            writeln!(writer).map_err(|e| FintrackError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

fn write_bundle<W: Write>(
    bundle: &ReportBundle,
    format: ExportFormat,
    writer: &mut W,
) -> FintrackResult<()> {
    match format {
        ExportFormat::Json => export_bundle_json(bundle, writer, true),
        ExportFormat::Yaml => export_bundle_yaml(bundle, writer),
    }
}

fn create_export_file(path: &Path) -> FintrackResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
