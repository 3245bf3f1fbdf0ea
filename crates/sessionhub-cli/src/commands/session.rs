//! Session inspection CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use sessionhub_core::error::AppError;
use sessionhub_core::time::LocalClock;
use sessionhub_database::{PgSessionRepository, SessionRepository};
use sessionhub_entity::session::{SessionRecord, SessionStatus};
use sessionhub_service::inactivity_at;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// List sessions with a given status
    List {
        /// Status to filter by (active, inactive, ended, removed_by_system_failure)
        #[arg(short, long, default_value = "active")]
        status: String,
    },
    /// Count sessions per status
    Count,
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct SessionRow {
    /// Session ID
    session_id: String,
    /// Email
    email: String,
    /// Nickname
    nickname: String,
    /// Client IP
    client_ip: String,
    /// Status
    status: String,
    /// Last accessed
    last_accessed: String,
    /// Inactivity
    inactivity: String,
}

impl SessionRow {
    fn from_record(record: SessionRecord, clock: &LocalClock) -> Self {
        let inactivity = inactivity_at(clock, &record.last_accessed, clock.now());
        Self {
            session_id: record.session_id.to_string(),
            email: record.email,
            nickname: record.nickname,
            client_ip: record.client_info.ip,
            status: record.status.to_string(),
            last_accessed: record.last_accessed,
            inactivity: inactivity.formatted,
        }
    }
}

/// Per-status count row
#[derive(Debug, Serialize, Tabled)]
struct CountRow {
    /// Status
    status: String,
    /// Sessions
    count: u64,
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let clock = LocalClock::from_config(&config.session)?;
    let pool = super::connect_store(&config).await?;
    let repo = PgSessionRepository::new(pool.pool().clone());

    match &args.command {
        SessionCommand::List { status } => {
            let status: SessionStatus = status.parse()?;
            let rows: Vec<SessionRow> = repo
                .find_by_status(status)
                .await?
                .into_iter()
                .map(|record| SessionRow::from_record(record, &clock))
                .collect();

            output::print_list(&rows, format);
        }
        SessionCommand::Count => {
            let counts = repo.count_by_status().await?;
            let total: u64 = counts.iter().map(|(_, n)| n).sum();
            let rows: Vec<CountRow> = counts
                .into_iter()
                .map(|(status, count)| CountRow {
                    status: status.to_string(),
                    count,
                })
                .collect();
            output::print_list(&rows, format);

            if format == OutputFormat::Table {
                output::print_kv("Total", &total.to_string());
            }
        }
    }

    pool.close().await;
    Ok(())
}
