//! Employee Repository

use super::{RepoError, RepoResult};
use serde_json::{Map, Value};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::{new_record_id, now_millis};
use sqlx::SqlitePool;
use sqlx::types::Json;

const EMPLOYEE_SELECT: &str =
    "SELECT id, name, position, level, extra, created_at, updated_at FROM employee";

const EMPLOYEE_INSERT: &str = "INSERT INTO employee (id, name, position, level, extra, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)";

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    name: String,
    position: String,
    level: String,
    extra: Json<Map<String, Value>>,
    created_at: i64,
    updated_at: i64,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            position: row.position,
            level: row.level,
            created_at: row.created_at,
            updated_at: row.updated_at,
            extra: row.extra.0,
        }
    }
}

/// All records in insertion order
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} ORDER BY created_at, rowid");
    let rows = sqlx::query_as::<_, EmployeeRow>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Employee::from).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Employee>> {
    let sql = format!("{EMPLOYEE_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, EmployeeRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Employee::from))
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    let id = new_record_id();
    let now = now_millis();
    sqlx::query(EMPLOYEE_INSERT)
        .bind(&id)
        .bind(&data.name)
        .bind(&data.position)
        .bind(&data.level)
        .bind(Json(&data.extra))
        .bind(now)
        .execute(pool)
        .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

/// Insert every row inside one transaction.
///
/// Either all rows are committed and their ids returned in input order,
/// or the transaction is rolled back and nothing is persisted.
pub async fn insert_many(pool: &SqlitePool, rows: Vec<EmployeeCreate>) -> RepoResult<Vec<String>> {
    if rows.is_empty() {
        return Err(RepoError::Validation("No records to insert".into()));
    }

    let now = now_millis();
    let mut ids = Vec::with_capacity(rows.len());
    let mut tx = pool.begin().await?;

    for data in &rows {
        let id = new_record_id();
        sqlx::query(EMPLOYEE_INSERT)
            .bind(&id)
            .bind(&data.name)
            .bind(&data.position)
            .bind(&data.level)
            .bind(Json(&data.extra))
            .bind(now)
            .execute(&mut *tx)
            .await?;
        ids.push(id);
    }

    // Dropping `tx` on an early return above rolls the batch back
    tx.commit().await?;
    Ok(ids)
}

pub async fn update(pool: &SqlitePool, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE employee SET name = COALESCE(?1, name), position = COALESCE(?2, position), level = COALESCE(?3, level), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.position)
    .bind(data.level)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Hard delete an employee
pub async fn delete(pool: &SqlitePool, id: &str) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
