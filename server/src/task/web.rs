use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use std::sync::Arc;

use crate::task::{Task, TaskService};
use crate::web::WebError;

#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    tasks: Vec<Task>,
}

impl IndexTemplate {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

/// Handler for GET / that renders the task list page.
///
/// A storage failure here is logged and the page renders with an empty
/// list; the listing page never fails visibly on storage errors.
#[tracing::instrument(skip(state))]
async fn index_handler(State(state): State<Arc<TaskState>>) -> Result<Html<String>, WebError> {
    let service = TaskService::new(&state.db);

    let tasks = match service.get_all_tasks().await {
        Ok(tasks) => tasks,
        Err(err) => {
            tracing::error!("Failed to load tasks for the index page: {}", err);
            Vec::new()
        }
    };

    let template = IndexTemplate::new(tasks);
    template.render().map(Html).map_err(WebError::from)
}

/// Creates and returns the page router.
pub fn create_page_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .with_state(state)
}
