//! Row sources.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use super::{DbConfig, Result};

/// One result row: column names paired with stringified values, in column
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Value of the first column called `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<C: Into<String>, V: Into<String>> FromIterator<(C, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}

/// Something that can run a query and hand back rows one at a time.
pub trait RowSource {
    /// Run `query`, calling `visit` for each row in result order.
    ///
    /// Stops at the first error from the source or from `visit`. Returns the
    /// number of rows visited.
    fn for_each_row(
        &mut self,
        query: &str,
        visit: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<usize>;
}

/// Row source backed by a SQLite database.
pub struct SqliteSource {
    conn: Connection,
}

impl SqliteSource {
    /// Open the database named by `config` read-only.
    pub fn open(config: &DbConfig) -> Result<Self> {
        config.validate()?;
        Self::open_path(Path::new(&config.name))
    }

    /// Open an existing SQLite file read-only.
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!("Opened database at {:?}", path);
        Ok(Self { conn })
    }

    /// Open an empty in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        debug!("Opened in-memory database");
        Ok(Self { conn })
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection, e.g. for seeding test data.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl RowSource for SqliteSource {
    fn for_each_row(
        &mut self,
        query: &str,
        visit: &mut dyn FnMut(Row) -> Result<()>,
    ) -> Result<usize> {
        let mut stmt = self.conn.prepare(query)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query([])?;
        let mut count = 0;
        while let Some(row) = rows.next()? {
            let mut out = Row::with_capacity(columns.len());
            for (idx, column) in columns.iter().enumerate() {
                out.push(column.as_str(), render_value(row.get_ref(idx)?));
            }
            visit(out)?;
            count += 1;
        }
        Ok(count)
    }
}

/// Stringify a column value for logging.
///
/// NULL renders as `None`; reals always keep a decimal point (`-1.0`);
/// blobs render as lowercase hex.
pub fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "None".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format!("{:?}", f),
        ValueRef::Text(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Blob(bytes) => hex::encode(bytes),
    }
}
