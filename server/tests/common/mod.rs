use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use testcontainers_modules::postgres::Postgres;
use testcontainers_modules::testcontainers::ContainerAsync;
use testcontainers_modules::testcontainers::runners::AsyncRunner;

/// Starts a throwaway Postgres instance for a single test.
pub async fn start_postgres() -> anyhow::Result<ContainerAsync<Postgres>> {
    Ok(Postgres::default().start().await?)
}

/// Connects to the container's database and applies the task schema.
pub async fn connect_and_migrate(
    container: &ContainerAsync<Postgres>,
) -> anyhow::Result<DatabaseConnection> {
    let host = container.get_host().await?;
    let port = container.get_host_port_ipv4(5432).await?;
    let url = format!("postgres://postgres:postgres@{host}:{port}/postgres");
    let db = Database::connect(&url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
