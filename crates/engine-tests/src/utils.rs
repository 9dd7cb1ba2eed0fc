use sqlx::{
    ConnectOptions, Connection,
    sqlite::{SqliteConnectOptions, SqliteConnection},
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// DDL mirroring the log table of a HomeSeer `HomeSeerLog.hsd` database.
pub const LOG_TABLE_DDL: &str = r#"CREATE TABLE Log (
  ID INTEGER PRIMARY KEY,
  Log_DateTime DATETIME NOT NULL,
  Log_Time_Fraction INTEGER,
  Log_Type TEXT,
  Log_Entry TEXT,
  Log_From TEXT,
  Log_Priority INTEGER,
  ErrorCode INTEGER,
  Log_ClassColor TEXT
);"#;

const INSERT_ROW_SQL: &str = r#"
    INSERT INTO Log (ID, Log_DateTime, Log_Time_Fraction, Log_Type, Log_Entry,
                     Log_From, Log_Priority, ErrorCode, Log_ClassColor)
    VALUES (?1, ?2, 0, 'Event', ?3, 'HomeSeer', 1, 0, '#000000')
"#;

/// Default wall-clock text stored for seeded rows.
pub const DEFAULT_LOGGED_AT: &str = "2024-01-10 08:30:00";

/// A throwaway SQLite log database.
pub struct LogDb {
    dir: TempDir,
    path: PathBuf,
}

impl LogDb {
    pub async fn create() -> Self {
        let dir = tempfile::tempdir().expect("create db dir");
        let path = dir.path().join("HomeSeerLog.hsd");
        let db = LogDb { dir, path };

        let mut conn = db.connect().await;
        sqlx::query(LOG_TABLE_DDL)
            .execute(&mut conn)
            .await
            .expect("create Log table");
        conn.close().await.expect("close db");
        db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn insert_ids(&self, ids: impl IntoIterator<Item = i64>) {
        let mut conn = self.connect().await;
        for id in ids {
            insert(&mut conn, id, DEFAULT_LOGGED_AT).await;
        }
        conn.close().await.expect("close db");
    }

    pub async fn insert_at(&self, id: i64, logged_at: &str) {
        let mut conn = self.connect().await;
        insert(&mut conn, id, logged_at).await;
        conn.close().await.expect("close db");
    }

    async fn connect(&self) -> SqliteConnection {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .connect()
            .await
            .expect("connect sqlite")
    }
}

async fn insert(conn: &mut SqliteConnection, id: i64, logged_at: &str) {
    sqlx::query(INSERT_ROW_SQL)
        .bind(id)
        .bind(logged_at)
        .bind(format!("entry {id}"))
        .execute(conn)
        .await
        .expect("insert log row");
}
