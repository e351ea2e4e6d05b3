//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::{ApiServer, AuthManager};
use crate::core::cli::{self, CliConfig, Commands, UserCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME, APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::data::TransactionalService;
use crate::utils::crypto;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub database: Arc<TransactionalService>,
    pub auth: Arc<AuthManager>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.debug);
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::init(&cli_config).await?;
        match command {
            Some(Commands::User { command }) => {
                let result = app.handle_user_command(command).await;
                app.database.close().await;
                result
            }
            Some(Commands::Start) | None => Self::start_server(app).await,
        }
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init().await?;

        let database = TransactionalService::init(
            config.database.transactional,
            &storage,
            config.database.postgres.as_ref(),
        )
        .await
        .context("Failed to initialize database")?;
        let database = Arc::new(database);
        tracing::debug!(backend = %database.backend(), "Database initialized");

        let auth = Arc::new(AuthManager::new(&config.auth));
        let shutdown = ShutdownService::new(database.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            database,
            auth,
        })
    }

    async fn handle_user_command(&self, cmd: UserCommands) -> Result<()> {
        match cmd {
            UserCommands::Add {
                username,
                password,
                role,
            } => {
                if username.trim().is_empty() || password.is_empty() {
                    anyhow::bail!("Username and password must not be empty");
                }
                let hash = crypto::hash_password(&password)
                    .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
                let user = self
                    .database
                    .repository()
                    .create_user(username.trim(), &hash, &role)
                    .await
                    .context("Failed to create user")?;
                println!("Created user '{}' (id {}, role {})", user.username, user.id, user.role);
                Ok(())
            }
        }
    }

    fn init_logging(debug: bool) {
        let default_filter = if debug {
            format!("info,{}=debug", APP_NAME_LOWER)
        } else {
            format!("info,{}=info", APP_NAME_LOWER)
        };

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            data_dir = %app.storage.data_dir().display(),
            "{} starting",
            APP_NAME
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    pub async fn start_background_tasks(&self) {
        self.shutdown
            .register(
                self.database
                    .start_checkpoint_task(self.shutdown.subscribe()),
            )
            .await;

        tracing::debug!("Background tasks started");
    }
}
