use anyhow::Result;
use rust_sqlite_orm::{Executor, OrmError, Params, SqlQuery, SqliteExecutor, Value};
use tempfile::NamedTempFile;

#[derive(Debug, PartialEq)]
struct User {
    name: String,
    email: String,
    age: Option<i64>,
}

// Helper function to create an in-memory database for testing
async fn create_test_db() -> Result<SqliteExecutor> {
    let executor = SqliteExecutor::open_in_memory()?;
    initialize_schema(&executor).await?;
    Ok(executor)
}

// Helper function to create a temporary file-based database
async fn create_temp_db() -> Result<(SqliteExecutor, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let executor = SqliteExecutor::open(temp_file.path())?;
    initialize_schema(&executor).await?;
    Ok((executor, temp_file))
}

async fn initialize_schema(executor: &SqliteExecutor) -> Result<()> {
    executor
        .execute(&SqlQuery::new(
            "CREATE TABLE users (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT UNIQUE NOT NULL,
                age INTEGER
            )",
        ))
        .await?;
    Ok(())
}

fn insert_user(name: &str, email: &str, age: Option<i64>) -> SqlQuery {
    SqlQuery::new("INSERT INTO users (name, email, age) VALUES (@name, @email, @age)").with_params(
        Params::new()
            .with_value("@name", name)
            .with_value("@email", email)
            .with_value("@age", age),
    )
}

async fn find_user(executor: &SqliteExecutor, id: i64) -> Result<Option<User>> {
    let query = SqlQuery::new("SELECT name, email, age FROM users WHERE id = @id")
        .with_params(Params::new().with_value("@id", id));
    let rows = executor.query(&query).await?;
    Ok(match rows.first() {
        Some(row) => Some(User {
            name: row.field("name")?.unwrap_or_default(),
            email: row.field("email")?.unwrap_or_default(),
            age: row.field("age")?,
        }),
        None => None,
    })
}

#[tokio::test]
async fn test_basic_operations() -> Result<()> {
    let executor = create_test_db().await?;

    let inserted = executor
        .execute(&insert_user("John Doe", "john@example.com", Some(30)))
        .await?;
    assert_eq!(inserted, 1);

    let user = find_user(&executor, 1).await?.expect("user exists");
    assert_eq!(
        user,
        User {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            age: Some(30),
        }
    );

    let update = SqlQuery::new("UPDATE users SET age = @age WHERE id = @id")
        .with_params(Params::new().with_value("@age", 31).with_value("@id", 1));
    assert_eq!(executor.execute(&update).await?, 1);
    assert_eq!(find_user(&executor, 1).await?.and_then(|u| u.age), Some(31));

    let delete = SqlQuery::new("DELETE FROM users WHERE id = @id")
        .with_params(Params::new().with_value("@id", 1));
    executor.execute(&delete).await?;
    assert!(find_user(&executor, 1).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_null_and_constraint_errors() -> Result<()> {
    let executor = create_test_db().await?;
    executor
        .execute(&insert_user("Ann", "ann@example.com", None))
        .await?;
    assert_eq!(find_user(&executor, 1).await?.and_then(|u| u.age), None);

    let err = executor
        .execute(&insert_user("Ann Again", "ann@example.com", None))
        .await
        .unwrap_err();
    assert!(matches!(err, OrmError::Sqlite(_)));
    Ok(())
}

#[tokio::test]
async fn test_rows_keep_cursor_order_and_raw_values() -> Result<()> {
    let executor = create_test_db().await?;
    for (name, age) in [("c", 3), ("a", 1), ("b", 2)] {
        executor
            .execute(&insert_user(name, &format!("{name}@example.com"), Some(age)))
            .await?;
    }

    let rows = executor
        .query(&SqlQuery::new("SELECT name, age FROM users ORDER BY age DESC"))
        .await?;
    let names: Vec<_> = rows.iter().map(|r| r.get("name").cloned()).collect();
    assert_eq!(
        names,
        vec![
            Some(Value::from("c")),
            Some(Value::from("b")),
            Some(Value::from("a"))
        ]
    );
    assert_eq!(rows[0].get("age"), Some(&Value::Integer(3)));
    assert_eq!(rows[0].len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_file_database() -> Result<()> {
    let (executor, temp_file) = create_temp_db().await?;
    executor
        .execute(&insert_user("Jane", "jane@example.com", Some(41)))
        .await?;
    drop(executor);

    let reopened = SqliteExecutor::open(temp_file.path())?;
    let user = find_user(&reopened, 1).await?;
    assert_eq!(user.map(|u| u.name), Some("Jane".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_explicit_and_generated_names_bind_separately() -> Result<()> {
    let executor = SqliteExecutor::open_in_memory()?;
    let mut params = Params::new().with_value("@p1", "hand");
    let generated = params.bind("auto");
    let rows = executor
        .query(
            &SqlQuery::new(format!("SELECT @p1 AS x, {generated} AS y")).with_params(params),
        )
        .await?;
    assert_eq!(rows[0].get("x"), Some(&Value::from("hand")));
    assert_eq!(rows[0].get("y"), Some(&Value::from("auto")));
    Ok(())
}

#[tokio::test]
async fn test_boolean_binds_as_integer() -> Result<()> {
    let executor = SqliteExecutor::open_in_memory()?;
    let rows = executor
        .query(
            &SqlQuery::new("SELECT @flag AS flag")
                .with_params(Params::new().with_value("@flag", true)),
        )
        .await?;
    assert_eq!(rows[0].get("flag"), Some(&Value::Integer(1)));
    Ok(())
}
