use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    // Every pooled connection would otherwise open its own empty in-memory database
    if database_url.contains(":memory:") {
        options.max_connections(1);
    }

    let db = Database::connect(options).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    tracing::info!("Database connected and migrated");
    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            email TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        )
        "#,
    )
    .await?;

    // Uniqueness only applies to live accounts, so a soft-deleted username can be reused
    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users(username) WHERE deleted_at IS NULL",
    )
    .await?;
    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email) WHERE deleted_at IS NULL",
    )
    .await?;

    // Favorites. Hard-deleting a user that still owns rows is refused (RESTRICT);
    // account removal goes through the soft-delete path instead.
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS favorite_movies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            tmdb_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            overview TEXT NOT NULL DEFAULT '',
            release_date TEXT,
            poster_path TEXT,
            genre_ids TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL DEFAULT 'por_ver'
                CHECK (status IN ('por_ver', 'vista', 'recomendada')),
            rating INTEGER CHECK (rating IS NULL OR (rating >= 1 AND rating <= 10)),
            notes TEXT NOT NULL DEFAULT '',
            recommended_by TEXT NOT NULL DEFAULT '',
            added_at TEXT NOT NULL,
            watched_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE RESTRICT
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_favorite_movies_user ON favorite_movies(user_id)",
    )
    .await?;
    execute(
        db,
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_favorite_movies_user_tmdb ON favorite_movies(user_id, tmdb_id) WHERE deleted_at IS NULL",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;
    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)",
    )
    .await?;

    Ok(())
}
