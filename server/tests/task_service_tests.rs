use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, PaginatorTrait};
use tasklist_server::entities::task;
use tasklist_server::task::{DEFAULT_CATEGORY, TaskService, TaskServiceError};
use testcontainers_modules::{postgres, testcontainers};

mod common;

pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let container = common::start_postgres().await?;
    let db = common::connect_and_migrate(&container).await?;
    Ok(TestContext { db, container })
}

#[tokio::test]
async fn can_create_task_with_default_category() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .create_task("Buy milk", None)
        .await
        .expect("Failed to create task");

    assert_eq!(created_task.content(), "Buy milk");
    assert!(!created_task.completed());
    assert_eq!(created_task.category(), DEFAULT_CATEGORY);
}

#[tokio::test]
async fn can_create_task_with_explicit_category() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .create_task("Pay bills", Some("Finance"))
        .await
        .expect("Failed to create task");

    assert_eq!(created_task.category(), "Finance");
}

#[tokio::test]
async fn create_task_trims_content_and_category() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .create_task("  Water plants  ", Some("  Garden  "))
        .await
        .expect("Failed to create task");

    assert_eq!(created_task.content(), "Water plants");
    assert_eq!(created_task.category(), "Garden");
}

#[tokio::test]
async fn create_task_with_blank_category_falls_back_to_default() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .create_task("Sweep floor", Some("   "))
        .await
        .expect("Failed to create task");

    assert_eq!(created_task.category(), DEFAULT_CATEGORY);
}

#[tokio::test]
async fn create_task_with_whitespace_content_fails_and_stores_nothing() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let result = task_service.create_task("   ", None).await;
    assert!(matches!(result, Err(TaskServiceError::EmptyContent)));

    let stored = task::Entity::find()
        .count(&state.db)
        .await
        .expect("Failed to count tasks");
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn can_get_all_tasks_ordered_by_ascending_id() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let first = task_service
        .create_task("First", None)
        .await
        .expect("Failed to create task");
    let second = task_service
        .create_task("Second", None)
        .await
        .expect("Failed to create task");

    let all_tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get tasks");

    assert_eq!(all_tasks.len(), 2);
    assert_eq!(all_tasks[0].id(), first.id());
    assert_eq!(all_tasks[1].id(), second.id());
    assert!(first.id() < second.id());
}

#[tokio::test]
async fn get_all_tasks_on_empty_store_returns_empty_vec() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let all_tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get tasks");
    assert!(all_tasks.is_empty());
}

#[tokio::test]
async fn toggle_completed_is_its_own_inverse() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .create_task("Walk dog", None)
        .await
        .expect("Failed to create task");

    let first_toggle = task_service
        .toggle_completed(created_task.id())
        .await
        .expect("Failed to toggle task");
    assert!(first_toggle);

    let second_toggle = task_service
        .toggle_completed(created_task.id())
        .await
        .expect("Failed to toggle task");
    assert!(!second_toggle);
}

#[tokio::test]
async fn can_handle_toggle_when_task_not_found() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let result = task_service.toggle_completed(99).await;
    assert!(result.is_err());
    if let Err(e) = result {
        assert_eq!(e.to_string(), "Task with ID 99 not found");
    }
}

#[tokio::test]
async fn can_delete_task() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .create_task("Throw away", None)
        .await
        .expect("Failed to create task");

    let deleted_task = task_service
        .delete_task(created_task.id())
        .await
        .expect("Failed to delete task");
    assert_eq!(deleted_task, created_task);

    let remaining = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get tasks");
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn delete_on_missing_id_fails_and_leaves_store_unchanged() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    // Seed one task directly using the entity ActiveModel
    let active_model = task::ActiveModel {
        content: ActiveValue::Set("Keep me".to_string()),
        completed: ActiveValue::Set(false),
        category: ActiveValue::Set(DEFAULT_CATEGORY.to_string()),
        ..Default::default()
    };
    let seeded = active_model
        .insert(&state.db)
        .await
        .expect("Failed to create task");

    let result = task_service.delete_task(seeded.id + 1).await;
    assert!(matches!(result, Err(TaskServiceError::TaskNotFound(_))));

    let remaining = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get tasks");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content(), "Keep me");
}

#[tokio::test]
async fn categories_include_default_against_empty_store() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let categories = task_service
        .get_categories()
        .await
        .expect("Failed to get categories");
    assert_eq!(categories, vec![DEFAULT_CATEGORY.to_string()]);
}

#[tokio::test]
async fn categories_include_every_distinct_category_in_use() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    task_service
        .create_task("Pay bills", Some("Finance"))
        .await
        .expect("Failed to create task");
    task_service
        .create_task("File taxes", Some("Finance"))
        .await
        .expect("Failed to create task");
    task_service
        .create_task("Buy milk", None)
        .await
        .expect("Failed to create task");

    let categories = task_service
        .get_categories()
        .await
        .expect("Failed to get categories");

    assert_eq!(
        categories,
        vec!["Finance".to_string(), DEFAULT_CATEGORY.to_string()]
    );
}
