//! The database engine seam.
//!
//! sqlpad does not execute SQL itself. It talks to an [`Engine`], which only
//! has to run statement batches, return rows, and run a prepared insert once
//! per row. [`SqliteEngine`] is the implementation backed by SQLite.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params_from_iter, Batch, Connection};
use tracing::debug;

use crate::error::Result;
use crate::types::Value;
use crate::{QueryResult, Row};

/// A database that sqlpad can drive.
pub trait Engine {
    /// Runs one or more statements, discarding any rows they produce.
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// Runs a batch of statements and returns one [`QueryResult`] per
    /// statement that produces columns, in order.
    fn query(&mut self, sql: &str) -> Result<Vec<QueryResult>>;

    /// Prepares `template` once and runs it once per row, binding the row's
    /// fields positionally as text. Returns the number of rows inserted.
    fn insert_rows(&mut self, template: &str, rows: &[Vec<String>]) -> Result<usize>;
}

/// An [`Engine`] over a SQLite connection.
pub struct SqliteEngine {
    conn: Connection,
}

impl SqliteEngine {
    /// A fresh private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(SqliteEngine {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Open or create a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(SqliteEngine {
            conn: Connection::open(path)?,
        })
    }
}

impl Engine for SqliteEngine {
    fn execute(&mut self, sql: &str) -> Result<()> {
        debug!("execute: {}", sql);
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<Vec<QueryResult>> {
        debug!("query: {}", sql);
        let mut results = Vec::new();
        let mut batch = Batch::new(&self.conn, sql);

        while let Some(mut stmt) = batch.next()? {
            let column_count = stmt.column_count();
            if column_count == 0 {
                stmt.execute([])?;
                continue;
            }

            let columns: Arc<Vec<String>> = Arc::new(
                stmt.column_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            );
            let mut rows = Vec::new();
            let mut cursor = stmt.query([])?;
            while let Some(row) = cursor.next()? {
                let values = (0..column_count)
                    .map(|i| row.get_ref(i).map(Value::from))
                    .collect::<rusqlite::Result<Vec<Value>>>()?;
                rows.push(Row {
                    columns: Arc::clone(&columns),
                    values,
                });
            }
            results.push(QueryResult { columns, rows });
        }

        Ok(results)
    }

    fn insert_rows(&mut self, template: &str, rows: &[Vec<String>]) -> Result<usize> {
        debug!("insert {} rows: {}", rows.len(), template);
        let mut stmt = self.conn.prepare(template)?;
        let mut inserted = 0;
        for row in rows {
            inserted += stmt.execute(params_from_iter(row.iter()))?;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqlpadError;

    fn engine() -> SqliteEngine {
        let mut engine = SqliteEngine::open_in_memory().unwrap();
        engine
            .execute("CREATE TABLE t (id INTEGER, name TEXT, score REAL);")
            .unwrap();
        engine
    }

    #[test]
    fn query_returns_rows_and_columns() {
        let mut engine = engine();
        engine
            .execute("INSERT INTO t VALUES (1, 'a', 1.5), (2, NULL, 2);")
            .unwrap();

        let results = engine.query("SELECT id, name, score FROM t ORDER BY id").unwrap();
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(*result.columns, vec!["id", "name", "score"]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[0].values, vec![Value::Integer(1), Value::Text("a".into()), Value::Real(1.5)]);
        assert_eq!(result.rows[1].get("name"), Some(&Value::Null));
        assert_eq!(result.rows[1].get("score"), Some(&Value::Real(2.0)));
    }

    #[test]
    fn query_batch_returns_one_result_per_select() {
        let mut engine = engine();
        let results = engine
            .query("INSERT INTO t VALUES (1, 'x', 0); SELECT COUNT(*) FROM t; SELECT name FROM t;")
            .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rows[0].values[0], Value::Integer(1));
        assert_eq!(results[1].rows[0].values[0], Value::Text("x".into()));
    }

    #[test]
    fn select_without_rows_keeps_columns() {
        let mut engine = engine();
        let results = engine.query("SELECT * FROM t").unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_empty());
        assert_eq!(results[0].columns.len(), 3);
    }

    #[test]
    fn insert_rows_binds_text_positionally() {
        let mut engine = engine();
        let rows = vec![
            vec!["1".to_string(), "ana".to_string(), "2.5".to_string()],
            vec!["2".to_string(), "bo".to_string(), "".to_string()],
        ];
        let inserted = engine
            .insert_rows("INSERT INTO t (id, name, score) VALUES (?, ?, ?);", &rows)
            .unwrap();
        assert_eq!(inserted, 2);

        let results = engine.query("SELECT id, score FROM t ORDER BY id").unwrap();
        // INTEGER and REAL affinity convert the bound text.
        assert_eq!(results[0].rows[0].values, vec![Value::Integer(1), Value::Real(2.5)]);
        assert_eq!(results[0].rows[1].values[1], Value::Text(String::new()));
    }

    #[test]
    fn engine_errors_are_reported() {
        let mut engine = engine();
        assert!(matches!(engine.execute("SELEC 1"), Err(SqlpadError::Engine(_))));
        assert!(matches!(engine.query("SELECT * FROM missing"), Err(SqlpadError::Engine(_))));
    }
}
