use crate::entities::*;
use sea_orm::*;

pub mod api;
pub mod web;

/// The category assigned to a task when none is supplied.
pub const DEFAULT_CATEGORY: &str = "default";

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: i32,
    content: String,
    completed: bool,
    category: String,
}

impl Task {
    pub fn new(id: i32, content: String, completed: bool, category: String) -> Self {
        Self {
            id,
            content,
            completed,
            category,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the task content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns whether the task is completed.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the category of the task.
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(model.id, model.content, model.completed, model.category)
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a validation error for empty task content.
    #[error("Task content cannot be empty")]
    EmptyContent,
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService {
        TaskService { db }
    }

    /// Creates a new task in the database.
    ///
    /// # Arguments
    ///
    /// * `content` - The task text; must be non-empty after trimming.
    /// * `category` - Optional grouping label; blank or missing values fall
    ///   back to the default category.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` (with its assigned ID and
    /// `completed` set to false) if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(
        &self,
        content: &str,
        category: Option<&str>,
    ) -> Result<Task, TaskServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(TaskServiceError::EmptyContent);
        }

        let category = category
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        let active_model = task::ActiveModel {
            content: ActiveValue::Set(content.to_string()),
            completed: ActiveValue::Set(false),
            category: ActiveValue::Set(category.to_string()),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Retrieves all tasks from the database, ordered by ascending ID.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Task` if successful, or an error
    /// otherwise. An empty store yields an empty vector.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Retrieves every distinct category currently in use, sorted ascending.
    /// The default category is always present, even against an empty store.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of category names if successful, or an
    /// error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<String>, TaskServiceError> {
        let mut categories: Vec<String> = task::Entity::find()
            .select_only()
            .column(task::Column::Category)
            .distinct()
            .into_tuple()
            .all(self.db)
            .await?;

        if !categories.iter().any(|category| category == DEFAULT_CATEGORY) {
            categories.push(DEFAULT_CATEGORY.to_string());
        }
        categories.sort();
        Ok(categories)
    }

    /// Flips the completion flag of a task by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to toggle.
    ///
    /// # Returns
    ///
    /// A `Result` containing the new completion value if successful, or an
    /// error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_completed(&self, id: i32) -> Result<bool, TaskServiceError> {
        let task_to_toggle = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let new_value = !task_to_toggle.completed;
        let mut active_model: task::ActiveModel = task_to_toggle.into();
        active_model.completed = ActiveValue::Set(new_value);
        active_model.update(self.db).await?;

        Ok(new_value)
    }

    /// Deletes a task by its ID. The removal is permanent.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to delete.
    ///
    /// # Returns
    ///
    /// A `Result` containing the deleted `Task` if successful, or an error
    /// otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i32) -> Result<Task, TaskServiceError> {
        let task_to_delete = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let task_copy = Task::from(task_to_delete);
        task::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(task_copy)
    }
}
