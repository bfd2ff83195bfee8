use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orgchart::{api, client::OrgChartClient, db, tree_render};

const DEFAULT_PORT: u16 = 3000;

#[derive(Parser)]
#[command(name = "orgchart")]
#[command(about = "Employee directory with reporting-structure resolution")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the OrgChart server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Database file (defaults to $ORGCHART_DB or the platform data directory)
        #[arg(long, conflicts_with = "memory")]
        db: Option<PathBuf>,

        /// Keep all data in memory; nothing survives a restart
        #[arg(long)]
        memory: bool,
    },
    /// Print an employee as JSON (queries a running server at $ORGCHART_URL)
    Employee {
        /// Employee ID
        id: String,
    },
    /// Print an employee's reporting structure (queries a running server at $ORGCHART_URL)
    Reports {
        /// Employee ID
        id: String,

        /// Include the full hierarchy of direct reports
        #[arg(short, long)]
        details: bool,

        /// Print raw JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
}

/// Initialize tracing. Client commands log to stderr so stdout stays clean.
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "orgchart=debug,tower_http=debug".into()),
    );

    if use_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(port: u16, database: db::Database) -> anyhow::Result<()> {
    database.migrate()?;

    let app = api::create_router(database);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("OrgChart server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    match cli.command {
        Some(Commands::Serve {
            port,
            db: db_path,
            memory,
        }) => {
            tracing::info!("Starting OrgChart server on port {}", port);

            let database = if memory {
                db::Database::open_memory()?
            } else {
                match db_path {
                    Some(path) => db::Database::open(path)?,
                    None => db::Database::open_default()?,
                }
            };

            serve(port, database).await?;
        }
        Some(Commands::Employee { id }) => {
            let client = OrgChartClient::from_env();
            let employee = client.get_employee(&id).await?;
            println!("{}", serde_json::to_string_pretty(&employee)?);
        }
        Some(Commands::Reports { id, details, json }) => {
            let client = OrgChartClient::from_env();
            let structure = client.get_reporting_structure(&id, details).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&structure)?);
            } else {
                print!("{}", tree_render::render_reporting_structure(&structure));
            }
        }
        None => {
            tracing::info!("Starting OrgChart server on port {}", DEFAULT_PORT);
            serve(DEFAULT_PORT, db::Database::open_default()?).await?;
        }
    }

    Ok(())
}
