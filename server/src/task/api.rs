use crate::task::web::TaskState;
use crate::task::{Task, TaskService, TaskServiceError};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: i32,
    /// The task text
    content: String,
    /// Whether the task has been completed
    completed: bool,
    /// Grouping label for the task
    category: String,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            content: task.content().to_string(),
            completed: task.completed(),
            category: task.category().to_string(),
        }
    }
}

/// Request body for creating a task.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTaskRequest {
    /// The task text; `task` is accepted as a historical alias
    #[serde(alias = "task")]
    content: String,
    /// Optional grouping label
    #[serde(default)]
    category: Option<String>,
}

/// API response for a successfully created task.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddTaskResponse {
    /// Always true on success
    success: bool,
    /// The created task, including its assigned ID
    task: TaskJson,
}

/// API response for a completion toggle.
#[derive(Debug, Serialize, ToSchema)]
pub struct ToggleTaskResponse {
    /// Always true on success
    success: bool,
    /// The new completion value after the toggle
    completed_status: bool,
}

/// API response for a deletion.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteTaskResponse {
    /// Always true on success
    success: bool,
}

/// JSON error body for task mutation endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationErrorResponse {
    /// Always false on failure
    success: bool,
    /// Human-readable error message
    error: String,
}

impl MutationErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}

/// Handler for GET /tasks - Returns all tasks in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TaskJson>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskJson>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.get_all_tasks().await {
        Ok(tasks) => {
            let json_tasks: Vec<TaskJson> = tasks.into_iter().map(TaskJson::from).collect();
            Ok(Json(json_tasks))
        }
        Err(err) => {
            tracing::error!("Failed to get tasks: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve tasks".to_string(),
                )),
            ))
        }
    }
}

/// Handler for GET /categories - Returns every distinct category in use.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Successfully retrieved categories", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_categories_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<String>>, (StatusCode, Json<ServerErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.get_categories().await {
        Ok(categories) => Ok(Json(categories)),
        Err(err) => {
            tracing::error!("Failed to get categories: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve categories".to_string(),
                )),
            ))
        }
    }
}

/// Handler for POST /add - Creates a new task.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/add",
    request_body = AddTaskRequest,
    responses(
        (status = 201, description = "Task created", body = AddTaskResponse),
        (status = 400, description = "Empty content or non-JSON body", body = MutationErrorResponse),
        (status = 500, description = "Internal server error", body = MutationErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn add_task_handler(
    State(state): State<Arc<TaskState>>,
    payload: Result<Json<AddTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddTaskResponse>), (StatusCode, Json<MutationErrorResponse>)> {
    let Ok(Json(request)) = payload else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(MutationErrorResponse::new("Request must be JSON")),
        ));
    };

    let service = TaskService::new(&state.db);

    match service
        .create_task(&request.content, request.category.as_deref())
        .await
    {
        Ok(task) => Ok((
            StatusCode::CREATED,
            Json(AddTaskResponse {
                success: true,
                task: TaskJson::from(task),
            }),
        )),
        Err(TaskServiceError::EmptyContent) => Err((
            StatusCode::BAD_REQUEST,
            Json(MutationErrorResponse::new("Task content cannot be empty")),
        )),
        Err(err) => {
            tracing::error!("Failed to create task: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MutationErrorResponse::new("Internal server error")),
            ))
        }
    }
}

/// Handler for POST /complete/{id} - Flips a task's completion flag.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/complete/{id}",
    params(("id" = i32, Path, description = "ID of the task to toggle")),
    responses(
        (status = 200, description = "Completion flag toggled", body = ToggleTaskResponse),
        (status = 404, description = "Unknown task ID", body = MutationErrorResponse),
        (status = 500, description = "Internal server error", body = MutationErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn complete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i32>,
) -> Result<Json<ToggleTaskResponse>, (StatusCode, Json<MutationErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.toggle_completed(id).await {
        Ok(completed_status) => Ok(Json(ToggleTaskResponse {
            success: true,
            completed_status,
        })),
        Err(TaskServiceError::TaskNotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(MutationErrorResponse::new("Task not found")),
        )),
        Err(err) => {
            tracing::error!("Failed to toggle task {}: {}", id, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MutationErrorResponse::new("Internal server error")),
            ))
        }
    }
}

/// Handler for POST /delete/{id} - Permanently deletes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/delete/{id}",
    params(("id" = i32, Path, description = "ID of the task to delete")),
    responses(
        (status = 200, description = "Task deleted", body = DeleteTaskResponse),
        (status = 404, description = "Unknown task ID", body = MutationErrorResponse),
        (status = 500, description = "Internal server error", body = MutationErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteTaskResponse>, (StatusCode, Json<MutationErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.delete_task(id).await {
        Ok(_) => Ok(Json(DeleteTaskResponse { success: true })),
        Err(TaskServiceError::TaskNotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(MutationErrorResponse::new("Task not found")),
        )),
        Err(err) => {
            tracing::error!("Failed to delete task {}: {}", id, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MutationErrorResponse::new("Internal server error")),
            ))
        }
    }
}

/// Creates and returns the task API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler))
        .route("/categories", get(get_categories_handler))
        .route("/add", post(add_task_handler))
        .route("/complete/{id}", post(complete_task_handler))
        .route("/delete/{id}", post(delete_task_handler))
        .with_state(state)
}
