//! creativity-sync command line
//!
//! Drives the synchronization core against a running creativity
//! backend: list, add and delete records in either collection.

use anyhow::Result;
use clap::{Parser, Subcommand};
use creativity_sync::models::{Collection, PathDraft, RecordId, UserDraft};
use creativity_sync::{config, ResourceClient, SyncSession};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "creativity-sync", version, about = "Client for the creativity backend")]
struct Cli {
    /// Backend base URL (falls back to CREATIVITY_BACKEND_URL, then the
    /// config file, then http://localhost:5000)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Optional TOML config file with a backend_url key
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enter admin mode (required for delete commands)
    #[arg(long, global = true)]
    admin: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List users
    Users,
    /// Add a user
    AddUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        contact_number: Option<String>,
        #[arg(long, default_value = "")]
        discipline: String,
    },
    /// Delete a user by id
    DeleteUser { id: String },
    /// List creativity paths, joined against the user list
    Paths,
    /// Add a creativity path for an existing user
    AddPath {
        #[arg(long)]
        user_id: String,
        #[arg(long, default_value = "")]
        misfit: String,
        #[arg(long, default_value = "")]
        recall: String,
        #[arg(long, default_value = "")]
        flow: String,
        #[arg(long, default_value = "")]
        wide_path: String,
        #[arg(long, default_value = "")]
        spark: String,
        #[arg(long, default_value = "")]
        strategic_flow: String,
        #[arg(long, default_value = "")]
        narrow_path: String,
        #[arg(long, default_value = "")]
        bright_spark: String,
        #[arg(long, default_value = "")]
        ahh: String,
    },
    /// Delete a creativity path by id
    DeletePath { id: String },
    /// Verify the backend round trip: create a temporary user and
    /// path, then undo the session's additions and report the cleanup
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let backend_url =
        config::resolve_backend_url(cli.backend_url.as_deref(), cli.config.as_deref())?;
    info!(backend_url = %backend_url, "connecting");

    let client = ResourceClient::new(&backend_url)?;
    let mut session = SyncSession::new(client);
    if cli.admin {
        session.grant_admin();
    }

    match cli.command {
        Command::Users => {
            session.refresh_users().await?;
            for user in session.users() {
                println!(
                    "{}  {} - {} - {}",
                    user.id, user.name, user.email, user.discipline
                );
            }
        }
        Command::AddUser {
            name,
            email,
            contact_number,
            discipline,
        } => {
            session.user_form = UserDraft {
                name,
                email,
                contact_number,
                discipline,
            };
            let created = session.submit_user().await?;
            println!("created user {} ({})", created.id, created.name);
        }
        Command::DeleteUser { id } => {
            let id = RecordId::from(id);
            session.delete_user(&id).await?;
            println!("deleted user {}", id);
        }
        Command::Paths => {
            session.refresh_all().await?;
            for row in session.path_rows() {
                let p = row.path;
                println!(
                    "{}  {} | {} | {} | {} | {} | {} | {} | {} | {} | {}",
                    p.id,
                    row.user_label,
                    p.misfit,
                    p.recall,
                    p.flow,
                    p.wide_path,
                    p.spark,
                    p.strategic_flow,
                    p.narrow_path,
                    p.bright_spark,
                    p.ahh
                );
            }
        }
        Command::AddPath {
            user_id,
            misfit,
            recall,
            flow,
            wide_path,
            spark,
            strategic_flow,
            narrow_path,
            bright_spark,
            ahh,
        } => {
            session.path_form = PathDraft {
                user_id: Some(RecordId::from(user_id)),
                misfit,
                recall,
                flow,
                wide_path,
                spark,
                strategic_flow,
                narrow_path,
                bright_spark,
                ahh,
            };
            let created = session.submit_path().await?;
            println!("created path {} for user {}", created.id, created.user_id);
        }
        Command::DeletePath { id } => {
            let id = RecordId::from(id);
            session.delete_path(&id).await?;
            println!("deleted path {}", id);
        }
        Command::Check => {
            session.user_form = UserDraft {
                name: "connectivity check".to_string(),
                email: "check@localhost".to_string(),
                contact_number: None,
                discipline: String::new(),
            };
            let user = session.submit_user().await?;
            println!(
                "created user {} (highlighted: {})",
                user.id,
                session.is_highlighted(Collection::Users, &user.id)
            );

            session.path_form = PathDraft {
                user_id: Some(user.id.clone()),
                misfit: "check".to_string(),
                ..Default::default()
            };
            let path = session.submit_path().await?;
            println!("created path {} for user {}", path.id, path.user_id);

            let report = session.undo_session_additions().await;
            println!(
                "cleanup: {} user(s) and {} path(s) removed, {} failed",
                report.users_deleted,
                report.paths_deleted,
                report.failed.len()
            );
            for (collection, id) in &report.failed {
                println!("  still present: {}/{}", collection, id);
            }
            if !report.is_clean() {
                anyhow::bail!("cleanup left {} record(s) behind", report.failed.len());
            }
        }
    }

    Ok(())
}
