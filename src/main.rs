//! Lesson planner HTTP server.

use std::sync::Arc;

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use lesson_planner::adapters::ai::{GroqConfig, GroqProvider};
use lesson_planner::adapters::auth::{BcryptPasswordHasher, JwtTokens};
use lesson_planner::adapters::document::{DocxBackend, PdfBackend, UnavailableBackend};
use lesson_planner::adapters::http::{
    app_router, AccountHandlers, ApiHandlers, ExportHandlers, PlanHandlers,
};
use lesson_planner::adapters::memory::{InMemoryCredentialStore, InMemoryPlanStore};
use lesson_planner::adapters::postgres::{self, PostgresCredentialStore, PostgresPlanStore};
use lesson_planner::application::{
    DeleteLessonPlanHandler, DocumentConverter, ExportDraftHandler, ExportLessonPlanHandler,
    GenerateLessonPlanHandler, GenerateStudyMaterialsHandler, ListLessonPlansHandler,
    LoginHandler, RegenerateLessonPlanHandler, SaveLessonPlanHandler, SignupHandler,
};
use lesson_planner::config::{AppConfig, ConfigError, ExportConfig, ValidationError};
use lesson_planner::ports::{
    AIError, CompletionProvider, CredentialStore, ExportFormat, FlowDocumentBackend,
    PageLayoutBackend, PlanStore,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("completion provider: {0}")]
    Completions(#[from] AIError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("lesson-planner failed to start: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let (credentials, plans) = stores(&config).await?;
    let completions = completion_provider(&config)?;
    let converter = Arc::new(converter(&config.export));

    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost));
    let secret = config
        .auth
        .jwt_secret
        .clone()
        .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;
    let tokens = Arc::new(JwtTokens::new(
        secret,
        config.auth.issuer.clone(),
        config.auth.token_ttl(),
    ));

    let handlers = ApiHandlers {
        accounts: AccountHandlers::new(
            Arc::new(SignupHandler::new(credentials.clone(), hasher.clone())),
            Arc::new(LoginHandler::new(credentials, hasher, tokens.clone())),
        ),
        plans: PlanHandlers {
            generate: Arc::new(GenerateLessonPlanHandler::new(completions.clone())),
            save: Arc::new(SaveLessonPlanHandler::new(plans.clone())),
            list: Arc::new(ListLessonPlansHandler::new(plans.clone())),
            delete: Arc::new(DeleteLessonPlanHandler::new(plans.clone())),
            regenerate: Arc::new(RegenerateLessonPlanHandler::new(
                plans.clone(),
                completions.clone(),
            )),
            study_materials: Arc::new(GenerateStudyMaterialsHandler::new(
                plans.clone(),
                completions,
            )),
        },
        exports: ExportHandlers {
            converter: converter.clone(),
            plan_export: Arc::new(ExportLessonPlanHandler::new(plans, converter.clone())),
            draft_export: Arc::new(ExportDraftHandler::new(converter)),
        },
        sessions: tokens,
    };

    let app = app_router(handlers, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, environment = ?config.server.environment, "Lesson planner listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn stores(
    config: &AppConfig,
) -> Result<(Arc<dyn CredentialStore>, Arc<dyn PlanStore>), StartupError> {
    match &config.database {
        Some(database) => {
            let pool = postgres::connect(database).await?;
            tracing::info!(
                max_connections = database.max_connections,
                "Connected to PostgreSQL"
            );
            Ok((
                Arc::new(PostgresCredentialStore::new(pool.clone())),
                Arc::new(PostgresPlanStore::new(pool)),
            ))
        }
        None => {
            tracing::warn!("No database configured; accounts and plans are kept in memory");
            Ok((
                Arc::new(InMemoryCredentialStore::new()),
                Arc::new(InMemoryPlanStore::new()),
            ))
        }
    }
}

fn completion_provider(config: &AppConfig) -> Result<Arc<dyn CompletionProvider>, StartupError> {
    let api_key: &Secret<String> = config
        .ai
        .api_key
        .as_ref()
        .ok_or(ValidationError::MissingRequired("AI__API_KEY"))?;

    let groq = GroqConfig::new(api_key.expose_secret().trim())
        .with_base_url(config.ai.base_url.clone())
        .with_model(config.ai.model.clone())
        .with_temperature(config.ai.temperature)
        .with_timeout(config.ai.timeout());

    Ok(Arc::new(GroqProvider::new(groq)?))
}

fn converter(export: &ExportConfig) -> DocumentConverter {
    let flow: Arc<dyn FlowDocumentBackend> = if export.enable_docx {
        Arc::new(DocxBackend::new())
    } else {
        Arc::new(UnavailableBackend::new(ExportFormat::Docx))
    };
    let page: Arc<dyn PageLayoutBackend> = if export.enable_pdf {
        Arc::new(PdfBackend::new())
    } else {
        Arc::new(UnavailableBackend::new(ExportFormat::Pdf))
    };

    let converter = DocumentConverter::new(flow, page);
    let capabilities = converter.capabilities();
    tracing::info!(
        pdf = capabilities.pdf,
        docx = capabilities.docx,
        "Export backends ready"
    );
    converter
}
