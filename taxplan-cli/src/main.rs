use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use taxplan_cli::app;
use taxplan_core::FilingStatus;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Bracket-aware planning numbers for retirement withdrawals.
///
/// Resolves ordinary brackets, Roth conversion room and the 0/15/20% split of
/// long-term capital gains from the built-in IRS tables, optionally extended
/// with tables loaded from CSV.
#[derive(Debug, Parser)]
#[command(name = "taxplan", version)]
struct Cli {
    /// Filing status (single, mfj, mfs, hoh, qss or the long spellings).
    #[arg(long, global = true, default_value = "single")]
    status: FilingStatus,

    /// Tax year. Defaults to the latest year with tables.
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Ordinary bracket CSV to register at startup.
    #[arg(long = "brackets", global = true, requires = "ltcg_file")]
    brackets_file: Option<PathBuf>,

    /// LTCG threshold CSV to register at startup.
    #[arg(long = "ltcg", global = true, requires = "brackets_file")]
    ltcg_file: Option<PathBuf>,

    /// Print reports as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tax years with tables.
    Years,

    /// Print the ordinary rate schedule.
    Brackets,

    /// Resolve the marginal bracket for a taxable income.
    Resolve {
        #[arg(allow_hyphen_values = true)]
        taxable_income: String,
    },

    /// Room left in the current bracket before the next rate applies.
    RothRoom {
        #[arg(allow_hyphen_values = true)]
        ordinary_income: String,

        /// Short-term capital gains taxed as ordinary income.
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        stcg: String,
    },

    /// Split long-term gains across the 0%, 15% and 20% bands.
    SplitLtcg {
        #[arg(allow_hyphen_values = true)]
        ordinary_taxable: String,

        #[arg(allow_hyphen_values = true)]
        ltcg: String,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    debug!(status = %cli.status, year = ?cli.year, "loading tax tables");
    let tables = app::load_tables(cli.brackets_file.as_deref(), cli.ltcg_file.as_deref())?;

    match &cli.command {
        Command::Years => app::emit(&app::years(&tables), cli.json),
        Command::Brackets => {
            let report = app::brackets(&tables, cli.status, cli.year)?;
            app::emit(&report, cli.json)
        }
        Command::Resolve { taxable_income } => {
            let report = app::resolve(&tables, cli.status, cli.year, taxable_income)?;
            app::emit(&report, cli.json)
        }
        Command::RothRoom {
            ordinary_income,
            stcg,
        } => {
            let report = app::roth_room(&tables, cli.status, cli.year, ordinary_income, stcg)?;
            app::emit(&report, cli.json)
        }
        Command::SplitLtcg {
            ordinary_taxable,
            ltcg,
        } => {
            let report = app::split_ltcg(&tables, cli.status, cli.year, ordinary_taxable, ltcg)?;
            app::emit(&report, cli.json)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_amounts_parse_as_values() {
        let cli = Cli::try_parse_from(["taxplan", "resolve", "-500"]).unwrap();

        assert!(matches!(cli.command, Command::Resolve { ref taxable_income } if taxable_income == "-500"));
    }

    #[test]
    fn status_accepts_irs_codes() {
        let cli = Cli::try_parse_from(["taxplan", "--status", "MFJ", "brackets"]).unwrap();

        assert_eq!(cli.status, FilingStatus::MarriedFilingJointly);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["taxplan", "--status", "couple", "brackets"]).is_err());
    }

    #[test]
    fn table_files_must_come_in_pairs() {
        assert!(Cli::try_parse_from(["taxplan", "--brackets", "b.csv", "years"]).is_err());
    }
}
