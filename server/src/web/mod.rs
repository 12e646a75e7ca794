use axum::http::StatusCode;
use axum::response::Html;
use migration::MigratorTrait;
use sea_orm::Database;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ai::GeminiGenerator;
use crate::ai::api::AiState;
use crate::config;
use crate::task::web::{TaskState, create_page_router};
use crate::{ai, task};

pub mod api;

/// Custom error type for web handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    /// The specific `askama::Error` is captured as the source of this error.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
}

impl axum::response::IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        let user_facing_error_message =
            "An unexpected error occurred while processing your request. Please try again later.";
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!(
                "<h1>Internal Server Error</h1><p>{}</p>",
                user_facing_error_message
            )),
        )
            .into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        task::api::get_tasks_handler,
        task::api::get_categories_handler,
        task::api::add_task_handler,
        task::api::complete_task_handler,
        task::api::delete_task_handler,
        ai::api::ask_ai_handler,
        ai::api::motivate_me_handler,
    ),
    components(schemas(
        task::api::TaskJson,
        task::api::AddTaskRequest,
        task::api::AddTaskResponse,
        task::api::ToggleTaskResponse,
        task::api::DeleteTaskResponse,
        task::api::MutationErrorResponse,
        ai::api::AskAiRequest,
        ai::api::AskAiResponse,
        ai::api::MotivateResponse,
        api::ServerErrorResponse,
    )),
    tags(
        (name = "Tasks", description = "Task management endpoints"),
        (name = "AI", description = "Text-generation relay endpoints")
    )
)]
struct ApiDoc;

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: config::Config) -> anyhow::Result<()> {
    use axum::Router;

    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = Database::connect(&config.db_url).await?;
    if config.reset_db {
        tracing::warn!("RESET_DB is set, dropping and recreating the task schema");
        migration::Migrator::fresh(&db).await?;
    } else {
        migration::Migrator::up(&db, None).await?;
    }
    tracing::info!("Database migrations applied successfully");

    if config.gemini_api_key.is_none() {
        tracing::warn!(
            "GEMINI_API_KEY is not set, AI endpoints will answer with a configuration error"
        );
    }

    let task_state = Arc::new(TaskState { db: Arc::new(db) });
    let generator = GeminiGenerator::new(config.gemini_api_key, config.gemini_model);
    let ai_state = Arc::new(AiState {
        generator: Arc::new(generator),
    });

    let app = Router::new()
        .merge(create_page_router(task_state.clone()))
        .merge(task::api::create_api_router(task_state))
        .merge(ai::api::create_api_router(ai_state))
        .route("/health", axum::routing::get(health_check_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new()),
        );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn can_handle_template_error_with_internal_server_error() {
        // Simulate a template rendering error using askama::Error::Custom
        let custom_error_message = "Simulated template rendering failure".to_string();
        let template_error = askama::Error::Custom(custom_error_message.into());

        let web_error = WebError::Template(template_error);
        let response = axum::response::IntoResponse::into_response(web_error);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_text = std::str::from_utf8(&body).unwrap();

        assert_eq!(
            body_text,
            "<h1>Internal Server Error</h1><p>An unexpected error occurred while processing your request. Please try again later.</p>"
        );
    }
}
