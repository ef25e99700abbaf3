//! Server-side employee storage on SQLite.
//!
//! Records keep insertion order through the `seq` column; the public
//! identifier is a UUID v4 assigned on create.

use roster_core::{Employee, Gender};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

/// Errors that can occur during server storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error preparing the database directory.
    IoError(PathBuf, std::io::Error),
    /// Error from the database.
    Database(sqlx::Error),
    /// Error applying migrations.
    Migration(sqlx::migrate::MigrateError),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::Database(e) => write!(f, "Database error: {}", e),
            StorageError::Migration(e) => write!(f, "Migration error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            StorageError::Database(e) => Some(e),
            StorageError::Migration(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        StorageError::Database(e)
    }
}

/// Open the database at `path`, creating it if needed, and run migrations.
pub async fn init_db(path: &Path) -> Result<SqlitePool, StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StorageError::IoError(parent.to_path_buf(), e))?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(StorageError::Migration)?;

    Ok(pool)
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    first_name: String,
    last_name: String,
    gender: String,
    email: String,
    phone_number: String,
    job_title: String,
    department: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            gender: row.gender.parse().unwrap_or(Gender::Unset),
            email: row.email,
            phone_number: row.phone_number,
            job_title: row.job_title,
            department: row.department,
        }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, first_name, last_name, gender, email, phone_number, job_title, department FROM employees";

pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All employees in insertion order.
    pub async fn list(&self) -> Result<Vec<Employee>, sqlx::Error> {
        let rows: Vec<EmployeeRow> = sqlx::query_as(&format!("{} ORDER BY seq", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, sqlx::Error> {
        let row: Option<EmployeeRow> =
            sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Employee::from))
    }

    /// Stores a new employee under a fresh identifier. Any identifier on the
    /// input is ignored.
    pub async fn create(&self, employee: &Employee) -> Result<Employee, sqlx::Error> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO employees (id, first_name, last_name, gender, email, phone_number, job_title, department)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.gender.to_string())
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(&employee.job_title)
        .bind(&employee.department)
        .execute(&self.pool)
        .await?;

        self.get_by_id(&id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Overwrites the employee stored under `id`. Returns `None` if there is
    /// no such employee.
    pub async fn update(
        &self,
        id: &str,
        employee: &Employee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, gender = ?, email = ?,
                phone_number = ?, job_title = ?, department = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.gender.to_string())
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(&employee.job_title)
        .bind(&employee.department)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Deletes the employee stored under `id`. Returns false if there was none.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup() -> (EmployeeRepository, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        (EmployeeRepository::new(pool), temp_dir)
    }

    fn employee(first_name: &str) -> Employee {
        Employee::new(first_name, "Lee", format!("{}@example.com", first_name.to_lowercase()))
            .with_gender(Gender::Female)
            .with_phone_number("5550001111")
            .with_job_title("Engineer")
            .with_department("Platform")
    }

    #[tokio::test]
    async fn test_init_db_creates_employees_table() {
        let temp_dir = tempdir().unwrap();
        let pool = init_db(&temp_dir.path().join("nested").join("test.db"))
            .await
            .unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name = 'employees'",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables.len(), 1);
    }

    #[tokio::test]
    async fn test_create_assigns_identifier_and_keeps_order() {
        let (repo, _dir) = setup().await;

        let ann = repo.create(&employee("Ann")).await.unwrap();
        let bo = repo.create(&employee("Bo").with_id("client-chosen")).await.unwrap();

        assert!(ann.has_id());
        assert_ne!(bo.id, "client-chosen");
        assert_eq!(bo.gender, Gender::Female);

        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.first_name)
            .collect();
        assert_eq!(names, vec!["Ann", "Bo"]);
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let (repo, _dir) = setup().await;
        let ann = repo.create(&employee("Ann")).await.unwrap();

        let mut changed = ann.clone();
        changed.department = "Research".to_string();
        let updated = repo.update(&ann.id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.department, "Research");
        assert_eq!(updated.id, ann.id);

        assert!(repo.update("missing", &changed).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _dir) = setup().await;
        let ann = repo.create(&employee("Ann")).await.unwrap();

        assert!(repo.delete(&ann.id).await.unwrap());
        assert!(!repo.delete(&ann.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }
}
