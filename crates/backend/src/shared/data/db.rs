use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const BASE_COLUMNS: &str = r#"
    id TEXT PRIMARY KEY NOT NULL,
    code TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL,
    comment TEXT,
"#;

const META_COLUMNS: &str = r#"
    is_deleted INTEGER NOT NULL DEFAULT 0,
    created_at TEXT,
    updated_at TEXT,
    version INTEGER NOT NULL DEFAULT 0
"#;

/// Таблицы агрегатов: (имя, специфичные колонки)
const AGGREGATE_TABLES: &[(&str, &str)] = &[
    ("a001_country", "nationality TEXT,"),
    (
        "a002_city",
        r#"
        country_id TEXT NOT NULL,
        state TEXT,
        "#,
    ),
    (
        "a003_company",
        r#"
        tax_id TEXT,
        city_id TEXT,
        address TEXT,
        email TEXT,
        phone TEXT,
        "#,
    ),
    (
        "a004_person",
        r#"
        birth_date TEXT,
        nationality_id TEXT,
        email TEXT,
        phone TEXT,
        cpf TEXT,
        "#,
    ),
    (
        "a005_passport",
        r#"
        person_id TEXT NOT NULL,
        issuing_country_id TEXT,
        issue_date TEXT NOT NULL,
        expiry_date TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1,
        "#,
    ),
    (
        "a006_document_type",
        r#"
        category TEXT,
        field_requirements_json TEXT NOT NULL DEFAULT '[]',
        is_active INTEGER NOT NULL DEFAULT 1,
        "#,
    ),
    (
        "a007_legal_framework",
        r#"
        law_reference TEXT,
        info_requirements_json TEXT NOT NULL DEFAULT '[]',
        is_active INTEGER NOT NULL DEFAULT 1,
        "#,
    ),
    (
        "a008_process_type",
        r#"
        legal_framework_id TEXT,
        sort_order INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        "#,
    ),
    (
        "a009_case_status",
        r#"
        category TEXT NOT NULL,
        color TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 0,
        fillable_fields_json TEXT NOT NULL DEFAULT '[]',
        is_active INTEGER NOT NULL DEFAULT 1,
        "#,
    ),
    (
        "a010_main_process",
        r#"
        company_id TEXT NOT NULL,
        process_type_id TEXT,
        status TEXT NOT NULL DEFAULT 'draft',
        requested_at TEXT,
        notes TEXT,
        "#,
    ),
    (
        "a011_individual_process",
        r#"
        main_process_id TEXT NOT NULL,
        person_id TEXT NOT NULL,
        case_status_id TEXT,
        passport_id TEXT,
        process_type_id TEXT,
        legal_framework_id TEXT,
        protocol_number TEXT,
        rnm_number TEXT,
        rnm_deadline TEXT,
        appointment_date TEXT,
        deadline_date TEXT,
        cbo_code TEXT,
        salary REAL,
        notes TEXT,
        "#,
    ),
    (
        "a013_task",
        r#"
        individual_process_id TEXT,
        main_process_id TEXT,
        assigned_to TEXT,
        due_date TEXT,
        priority TEXT NOT NULL DEFAULT 'medium',
        status TEXT NOT NULL DEFAULT 'todo',
        completed_at TEXT,
        "#,
    ),
    (
        "a014_notification",
        r#"
        message TEXT NOT NULL,
        recipient TEXT,
        entity_type TEXT,
        entity_id TEXT,
        is_read INTEGER NOT NULL DEFAULT 0,
        read_at TEXT,
        "#,
    ),
];

/// Таблицы без базовых колонок агрегата
const RECORD_TABLES: &[(&str, &str)] = &[
    (
        "a012_individual_process_status",
        r#"
        CREATE TABLE a012_individual_process_status (
            id TEXT PRIMARY KEY NOT NULL,
            individual_process_id TEXT NOT NULL,
            case_status_id TEXT NOT NULL,
            status_code TEXT NOT NULL,
            date TEXT,
            notes TEXT,
            is_active INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a015_activity_log",
        r#"
        CREATE TABLE a015_activity_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            actor TEXT NOT NULL,
            entity_type TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            action TEXT NOT NULL,
            details TEXT
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_a009_case_status_code ON a009_case_status(code) WHERE is_deleted = 0;",
    "CREATE INDEX IF NOT EXISTS ix_a012_process ON a012_individual_process_status(individual_process_id);",
    "CREATE INDEX IF NOT EXISTS ix_a012_case_status ON a012_individual_process_status(case_status_id);",
    "CREATE INDEX IF NOT EXISTS ix_a011_main_process ON a011_individual_process(main_process_id);",
    "CREATE INDEX IF NOT EXISTS ix_a015_entity ON a015_activity_log(entity_type, entity_id);",
];

fn sqlite_url(db_file: &str) -> anyhow::Result<String> {
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    Ok(format!("sqlite://{}{}?mode=rwc", prefix, normalized))
}

async fn table_exists(conn: &DatabaseConnection, table: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [table.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn execute(conn: &DatabaseConnection, sql: &str) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
        .await?;
    Ok(())
}

/// Создать недостающие таблицы и индексы
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, columns) in AGGREGATE_TABLES {
        if !table_exists(conn, table).await? {
            tracing::info!("Creating {} table", table);
            let sql = format!(
                "CREATE TABLE {} ({}{}{});",
                table, BASE_COLUMNS, columns, META_COLUMNS
            );
            execute(conn, &sql).await?;
        }
    }

    for (table, ddl) in RECORD_TABLES {
        if !table_exists(conn, table).await? {
            tracing::info!("Creating {} table", table);
            execute(conn, ddl).await?;
        }
    }

    for ddl in INDEXES {
        execute(conn, ddl).await?;
    }

    Ok(())
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let db_url = sqlite_url(db_file)?;
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
