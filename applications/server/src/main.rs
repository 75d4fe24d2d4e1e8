/// Kudo Server - music discovery API and accounts
use clap::{Parser, Subcommand};
use kudo_catalog::Catalog;
use kudo_core::User;
use kudo_server::{
    config::ServerConfig,
    create_router,
    services::{AuthService, OtpService, ResendMailer},
    state::AppState,
};
use kudo_storage::users;
use sqlx::SqlitePool;
use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const OTP_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Parser)]
#[command(name = "kudo-server")]
#[command(about = "Kudo music discovery server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "KUDO_CONFIG")]
        config: Option<String>,
    },
    /// Create an account
    AddUser {
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name (defaults to the email's local part)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List all accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kudo_server=info,kudo_catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::AddUser {
            email,
            password,
            name,
        } => {
            add_user(&email, &password, name).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path)?;
    config.validate()?;

    tracing::info!("Starting Kudo Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let pool = open_database(&config).await?;
    tracing::info!("Database connected");

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));
    let otp_service = Arc::new(OtpService::new(config.otp.ttl_minutes));
    let catalog = Arc::new(Catalog::new(&config.upstream)?);
    tracing::info!(
        saavn = %config.upstream.saavn_url,
        freefy = %config.upstream.freefy_url,
        "Catalog initialized"
    );

    let mut app_state = AppState::new(pool.clone(), auth_service, otp_service, catalog)
        .with_otp_in_response(config.otp.return_code_in_response);

    match ResendMailer::from_settings(&config.mail)? {
        Some(mailer) => {
            app_state = app_state.with_mailer(Arc::new(mailer));
            tracing::info!("Verification emails enabled");
        }
        None => tracing::info!("No mail API key, verification emails disabled"),
    }

    if config.otp.return_code_in_response {
        tracing::warn!(
            "Signup codes are returned in send-otp responses; \
             set KUDO_OTP__RETURN_CODE_IN_RESPONSE=false in production"
        );
    }

    tokio::spawn(purge_expired_otps(pool));

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn purge_expired_otps(pool: SqlitePool) {
    let mut interval = tokio::time::interval(OTP_PURGE_INTERVAL);
    loop {
        interval.tick().await;
        match kudo_storage::otps::delete_expired(&pool, chrono::Utc::now()).await {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Purged expired OTPs"),
            Err(e) => tracing::warn!(error = %e, "OTP purge failed"),
        }
    }
}

async fn open_database(config: &ServerConfig) -> anyhow::Result<SqlitePool> {
    // sqlite://./data/kudo.db needs ./data to exist
    if let Some(path) = config.storage.database_url.strip_prefix("sqlite://") {
        let path = Path::new(path.split('?').next().unwrap_or(path));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = kudo_storage::create_pool(&config.storage.database_url).await?;
    kudo_storage::run_migrations(&pool).await?;
    Ok(pool)
}

async fn add_user(email: &str, password: &str, name: Option<String>) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = open_database(&config).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );

    let email = email.trim().to_string();
    let user = users::create(
        &pool,
        users::CreateUser {
            name: name.unwrap_or_else(|| User::default_name(&email)),
            image: Some(User::default_avatar(&email)),
            password_hash: auth_service.hash_password(password)?,
            email,
        },
    )
    .await?;

    println!("Created user {} <{}>", user.id, user.email);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = open_database(&config).await?;

    let users = users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}
