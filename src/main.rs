use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workshop_core::{
    application::{
        commands::{sessions::OpenSessionCommand, users::InstallAdminCommand},
        dto::RequestContext,
        ports::{
            ClockPort, SessionAuthenticatorPort, SessionTokensPort, UnitOfWorkFactoryPort,
        },
        services::ApplicationServices,
    },
    config::AppConfig,
    domain::{audit::AuditLogRepository, user::UserRepository},
    infrastructure::{
        database,
        repositories::{SqliteAuditLogRepository, SqliteUnitOfWorkFactory, SqliteUserRepository},
        security::{session_store::SqliteSessionStore, session_token::Sha256SessionTokens},
        time::SystemClock,
    },
    presentation::http::{routes::build_router, state::HttpState},
};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;

    let clock: Arc<ClockPort> = Arc::new(SystemClock);
    let session_tokens: Arc<SessionTokensPort> = Arc::new(Sha256SessionTokens);
    let unit_of_work: Arc<UnitOfWorkFactoryPort> =
        Arc::new(SqliteUnitOfWorkFactory::new(pool.clone()));
    let audit_log_repo: Arc<dyn AuditLogRepository> =
        Arc::new(SqliteAuditLogRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_authenticator: Arc<SessionAuthenticatorPort> = Arc::new(SqliteSessionStore::new(
        pool.clone(),
        Arc::clone(&session_tokens),
        Arc::clone(&clock),
    ));

    let services = Arc::new(ApplicationServices::new(
        unit_of_work,
        audit_log_repo,
        user_repo,
        session_authenticator,
        session_tokens,
        clock,
        config.session_ttl(),
    ));

    if let Some(admin) = config.bootstrap_admin() {
        let installed = services
            .user_commands
            .install_admin(InstallAdminCommand {
                username: admin.username.clone(),
                email: admin.email.clone(),
            })
            .await?;
        match installed {
            Some(user) => {
                // First bearer token; further sessions go through POST /api/v1/sessions.
                let session = services
                    .session_commands
                    .open_session(
                        &RequestContext::new(None, Some("bootstrap".into())),
                        OpenSessionCommand { user_id: user.id },
                    )
                    .await?;
                tracing::info!(
                    user_id = session.user_id,
                    expires_at = %session.expires_at,
                    token = %session.token,
                    "bootstrap administrator session issued"
                );
            }
            None => tracing::debug!("accounts already exist; installer skipped"),
        }
    }

    let app = build_router(HttpState::new(Arc::clone(&services)));

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
