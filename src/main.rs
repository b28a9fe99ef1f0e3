use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use klanotes::client::{HttpNoteApi, NoteApi};
use klanotes::config::{ClientConfig, ServerConfig, DEFAULT_TIMEOUT_SECS};
use klanotes::error::ClientError;
use klanotes::models::{Note, Scope};
use klanotes::state::{fetch_note, NoteCollection, NoteEditor};
use klanotes::{api, db};

#[derive(Parser)]
#[command(name = "klanotes")]
#[command(about = "Personal notes: a note store server and a client for it")]
struct Cli {
    /// Base URL of the note store (client commands)
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Request timeout in seconds (client commands)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the note store server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// SQLite database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    #[command(flatten)]
    Client(ClientCommand),
}

#[derive(Subcommand)]
enum ClientCommand {
    /// List notes
    List {
        /// Which notes to list: active or archived
        #[arg(long, default_value = "active", value_parser = parse_scope)]
        scope: Scope,

        /// Shorthand for `--scope archived`
        #[arg(short, long, conflicts_with = "scope")]
        archived: bool,

        /// Only show notes whose title contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of one line per note
        #[arg(long)]
        json: bool,
    },
    /// Show one note
    Show {
        id: i64,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a note
    New {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },
    /// Edit a note's title or content
    Edit {
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },
    /// Pin or unpin an active note
    Pin { id: i64 },
    /// Archive notes
    Archive {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Move archived notes back to the main listing
    Unarchive {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
    /// Delete notes permanently
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "klanotes=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port, db }) => {
            serve(ServerConfig {
                host,
                port,
                db_path: db,
            })
            .await?;
        }
        None => {
            // Default: start server
            serve(ServerConfig::default()).await?;
        }
        Some(Commands::Client(command)) => {
            let config = ClientConfig::new(cli.server)
                .with_timeout(Duration::from_secs(cli.timeout_secs));
            let api: Arc<dyn NoteApi> = Arc::new(HttpNoteApi::new(&config)?);

            run_client(api, command)
                .await
                .map_err(|err| anyhow::anyhow!(err.user_message()))?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = match &config.db_path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Klanotes server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Klanotes server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}

async fn run_client(api: Arc<dyn NoteApi>, command: ClientCommand) -> Result<(), ClientError> {
    match command {
        ClientCommand::List {
            scope,
            archived,
            search,
            json,
        } => {
            let scope = if archived { Scope::Archived } else { scope };
            let mut notes = NoteCollection::new(api, scope);
            notes.load().await?;
            if let Some(query) = search {
                notes.set_search(query);
            }

            let visible = notes.visible();
            if json {
                println!("{}", to_json(&visible));
            } else {
                for note in visible {
                    println!("{}", summary_line(note));
                }
            }
        }
        ClientCommand::Show { id, json } => {
            let note = fetch_note(api.as_ref(), id).await?;
            if json {
                println!("{}", to_json(&note));
                return Ok(());
            }

            println!("{}", summary_line(&note));
            if !note.content.is_empty() {
                println!();
                println!("{}", note.content);
            }
        }
        ClientCommand::New { title, content } => {
            let mut editor = NoteEditor::new(None);
            editor.set_title(title);
            editor.set_content(content);
            editor.save(api.as_ref()).await?;
            println!("Note created");
        }
        ClientCommand::Edit { id, title, content } => {
            let mut editor = NoteEditor::open(api.as_ref(), id).await?;
            if let Some(title) = title {
                editor.set_title(title);
            }
            if let Some(content) = content {
                editor.set_content(content);
            }
            editor.save(api.as_ref()).await?;
            println!("Note updated");
        }
        ClientCommand::Pin { id } => {
            let mut notes = NoteCollection::new(api, Scope::Active);
            notes.load().await?;
            notes.toggle_pin(id).await?;
            let pinned = notes.note(id).is_some_and(|note| note.pinned);
            println!("Note {} {}", id, if pinned { "pinned" } else { "unpinned" });
        }
        ClientCommand::Archive { ids } => {
            let mut notes = NoteCollection::new(api, Scope::Active);
            notes.bulk_archive(&ids).await?;
            println!("Archived {} note(s)", ids.len());
        }
        ClientCommand::Unarchive { ids } => {
            let mut notes = NoteCollection::new(api, Scope::Archived);
            notes.bulk_unarchive(&ids).await?;
            println!("Unarchived {} note(s)", ids.len());
        }
        ClientCommand::Delete { ids } => {
            let mut notes = NoteCollection::new(api, Scope::Active);
            notes.bulk_delete(&ids).await?;
            println!("Deleted {} note(s)", ids.len());
        }
    }

    Ok(())
}

fn parse_scope(value: &str) -> Result<Scope, String> {
    Scope::from_str(value).ok_or_else(|| format!("unknown scope '{}' (expected active or archived)", value))
}

fn summary_line(note: &Note) -> String {
    let updated = note.updated_at.with_timezone(&chrono::Local);
    format!(
        "{:>5}  {}  {}  {}",
        note.id,
        if note.pinned { "*" } else { " " },
        updated.format("%Y-%m-%d %H:%M"),
        note.title
    )
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\": \"{}\"}}", err))
}
