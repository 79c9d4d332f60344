//! teacher-helper server: loads config from the environment (and `.env`), prepares
//! storage, and serves the college API.
//!
//! `teacher-helper serve` (default) runs the server;
//! `teacher-helper issue-token <sub> college:list college:add ...` prints a signed token.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use teacher_helper::{
    app, apply_migrations, ensure_database_exists, telemetry, AppConfig, AppState, Claims,
    CollegeMapper, CollegeRecord, JwtKeys, Mapper, MemoryMapper,
};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "teacher-helper", version, about = "Teacher helper admin backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Sign a bearer token with JWT_SECRET.
    IssueToken {
        /// Subject (user id or name).
        sub: String,
        /// Permission names, e.g. college:list college:add.
        permissions: Vec<String>,
        /// Lifetime in seconds.
        #[arg(long, default_value_t = 86_400)]
        ttl: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    let keys = JwtKeys::from_secret(config.jwt_secret.as_bytes());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, keys).await,
        Command::IssueToken { sub, permissions, ttl } => {
            let exp = usize::try_from(chrono::Utc::now().timestamp() + ttl)?;
            let token = keys.issue_token(&Claims { sub, exp, permissions })?;
            println!("{}", token);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, keys: JwtKeys) -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let colleges: Arc<dyn Mapper<CollegeRecord>> = if config.uses_memory_store() {
        tracing::warn!("DATABASE_URL is memory://; records live in process memory only");
        Arc::new(MemoryMapper::<CollegeRecord>::new())
    } else {
        ensure_database_exists(&config.database_url).await?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await?;
        apply_migrations(&pool, &config.db_schema).await?;
        Arc::new(CollegeMapper::new(pool, config.db_schema.clone()))
    };

    let state = AppState::new(colleges, keys);
    let router = app(state, &config);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        "listening on http://{} (colleges at {})",
        listener.local_addr()?,
        config.colleges_path()
    );
    axum::serve(listener, router).await?;
    Ok(())
}
