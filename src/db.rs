use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection SQLite settings. Foreign keys are off by default, and a
/// writer that finds the database locked waits up to five seconds instead of
/// failing at once.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(r2d2::Error::QueryError)
    }
}

/// Opens the database at `url`, creating the file if needed.
pub fn connect(url: &str, size: u32) -> Result<DbPool, ::r2d2::Error> {
    DbPool::builder()
        .max_size(size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(ConnectionManager::new(url))
}
