//! Tesoro report CLI
//!
//! Loads a JSON ledger snapshot, runs one report cycle, and prints the
//! ledger rows and the pivot table.
//!
//! Usage: `tesoro <snapshot.json> [--from YYYY-MM-DD] [--to YYYY-MM-DD]`

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tesoro_core::currency::round_display;
use tesoro_core::engine::ReportEngine;
use tesoro_core::fetch::{LedgerSnapshot, MemoryRetriever};
use tesoro_core::pivot::AxisColumn;
use tesoro_core::report::{DateWindow, ReportRequest};
use tesoro_shared::AppConfig;

struct Args {
    snapshot_path: String,
    window: DateWindow,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut snapshot_path = None;
    let mut window = DateWindow::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--from" => {
                let value = args.next().context("--from requires a date")?;
                window.from = Some(parse_date(&value)?);
            }
            "--to" => {
                let value = args.next().context("--to requires a date")?;
                window.to = Some(parse_date(&value)?);
            }
            _ => snapshot_path = Some(arg),
        }
    }

    Ok(Args {
        snapshot_path: snapshot_path
            .context("usage: tesoro <snapshot.json> [--from YYYY-MM-DD] [--to YYYY-MM-DD]")?,
        window,
    })
}

fn parse_date(value: &str) -> anyhow::Result<NaiveDate> {
    value
        .parse()
        .with_context(|| format!("invalid date: {value}"))
}

fn column_label(column: &AxisColumn) -> String {
    match column {
        AxisColumn::Date {
            currency,
            group,
            date,
        } => format!("{currency} {group} {date}"),
        AxisColumn::GroupTotal { currency, group } => format!("{currency} {group} TOTAL"),
        AxisColumn::GrandTotal => "GRAND TOTAL".to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tesoro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    let args = parse_args()?;
    let raw = tokio::fs::read_to_string(&args.snapshot_path)
        .await
        .with_context(|| format!("cannot read snapshot {}", args.snapshot_path))?;
    let snapshot: LedgerSnapshot =
        serde_json::from_str(&raw).context("malformed snapshot JSON")?;
    info!(
        movements = snapshot.movements.len(),
        accounts = snapshot.accounts.len(),
        "snapshot loaded"
    );

    let engine = ReportEngine::new(
        MemoryRetriever::new(snapshot),
        config.reporting,
        config.fetch,
    );
    let request = ReportRequest {
        window: args.window,
        ..ReportRequest::default()
    };
    let outcome = engine
        .run(request)
        .await?
        .context("report cycle was superseded")?;

    println!("== Ledger ==");
    for row in outcome.ledger_rows() {
        println!(
            "{}  {:>12}  balance {:>12}",
            row.movement.date,
            round_display(row.movement.net(), 2),
            round_display(row.balance, 2),
        );
    }

    println!();
    println!("== Pivot ({} reporting) ==", outcome.report.rates().reporting());
    let table = outcome.report.materialize();
    for column in &table.columns {
        println!("col: {}", column_label(column));
    }
    for row in &table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| {
                let amount = round_display(cell.amount, 2);
                if cell.is_converted {
                    amount.to_string()
                } else {
                    format!("{amount}*")
                }
            })
            .collect();
        println!("{:<24} {}", row.label, cells.join("  "));
    }
    println!("(* = no FX rate, amount left in its native currency)");

    Ok(())
}
