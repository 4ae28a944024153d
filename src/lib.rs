//! # sqlpad
//!
//! A SQL playground: import CSV files as tables, highlight SQL as HTML, and
//! run queries against an in-memory SQLite database.
//!
//! The two core pieces are independent and pure:
//! - [`import`] turns delimited text into `CREATE TABLE` / `INSERT` SQL;
//! - [`sql`] scans SQL into classified spans and renders them as HTML.
//!
//! [`Playground`] wires them to an [`Engine`].

pub mod engine;
pub mod error;
pub mod import;
pub mod sql;
pub mod types;

pub use engine::{Engine, SqliteEngine};
pub use error::{Result, SqlpadError};
pub use import::{ImportPlan, ImportSummary};
pub use types::{ColumnType, Value};

use std::path::Path;
use std::sync::Arc;

use tracing::info;

/// A row returned from a query.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Arc<Vec<String>>,
    pub values: Vec<Value>,
}

impl Row {
    /// Get a value by column name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|i| self.values.get(i))
    }

    /// Get a value by column index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Result set of one statement.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Arc<Vec<String>>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for QueryResult {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Demo table every in-memory session starts with.
const SEED_SQL: &str = "CREATE TABLE users (id INTEGER, name TEXT);\n\
                        INSERT INTO users VALUES (1, 'Leonardo'), (2, 'Agata');";

/// A playground session: one database plus the tables imported into it.
pub struct Playground<E: Engine = SqliteEngine> {
    engine: E,
    imported: Vec<ImportSummary>,
}

impl Playground<SqliteEngine> {
    /// A new in-memory session holding the demo `users` table.
    pub fn in_memory() -> Result<Self> {
        let mut playground = Playground::with_engine(SqliteEngine::open_in_memory()?);
        playground.engine.execute(SEED_SQL)?;
        Ok(playground)
    }

    /// A session over a database file. Nothing is seeded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Playground::with_engine(SqliteEngine::open(path)?))
    }
}

impl<E: Engine> Playground<E> {
    /// A session over any engine. Nothing is seeded.
    pub fn with_engine(engine: E) -> Self {
        Playground {
            engine,
            imported: Vec::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run a batch of SQL, returning one result per row-producing statement.
    pub fn run(&mut self, sql: &str) -> Result<Vec<QueryResult>> {
        self.engine.query(sql)
    }

    /// Import delimited `text` into `table`.
    ///
    /// The table is created with `IF NOT EXISTS`, so importing into an
    /// existing table appends rows to it.
    pub fn import_csv(&mut self, table: &str, text: &str) -> Result<ImportSummary> {
        let plan = ImportPlan::from_text(table, text)?;

        self.engine.execute(&plan.create_sql)?;
        if !plan.insert_sql.is_empty() {
            self.engine
                .insert_rows(&plan.insert_sql, &plan.document.rows)?;
        }

        let summary = plan.summary();
        info!(
            "imported table '{}': {} columns, {} rows",
            summary.table, summary.columns, summary.rows
        );
        self.imported.push(summary.clone());
        Ok(summary)
    }

    /// Read a CSV file and import it.
    ///
    /// Without an explicit `table`, the name is derived from the file name
    /// with [`import::table_name_from_file_name`].
    pub fn import_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        table: Option<&str>,
    ) -> Result<ImportSummary> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let table = match table {
            Some(name) => name.to_string(),
            None => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let name = import::table_name_from_file_name(&file_name);
                if name.is_empty() {
                    return Err(SqlpadError::InvalidTableName(file_name));
                }
                name
            }
        };
        self.import_csv(&table, &text)
    }

    /// Tables imported during this session, oldest first.
    pub fn imported_tables(&self) -> &[ImportSummary] {
        &self.imported
    }

    /// Names of all tables in the database, in creation order.
    pub fn table_names(&mut self) -> Result<Vec<String>> {
        let results = self
            .engine
            .query("SELECT name FROM sqlite_master WHERE type = 'table';")?;
        Ok(results
            .into_iter()
            .flatten()
            .filter_map(|row| row.get_index(0).and_then(Value::as_text).map(str::to_string))
            .collect())
    }

    /// SQL text listing every table as a comment, followed by a preview
    /// query of the first one. `None` when the database has no tables.
    pub fn tables_overview(&mut self) -> Result<Option<String>> {
        let names = self.table_names()?;
        let first = match names.first() {
            Some(first) => first,
            None => return Ok(None),
        };

        let mut text = String::from("-- Tables in this database:\n");
        for name in &names {
            text.push_str("-- * ");
            text.push_str(name);
            text.push('\n');
        }
        text.push_str("\n-- Example query:\n");
        text.push_str(&preview_query(first));
        Ok(Some(text))
    }
}

/// The query suggested after importing or selecting `table`.
pub fn preview_query(table: &str) -> String {
    format!("SELECT * FROM {table} LIMIT 10;")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records statements instead of running them.
    #[derive(Default)]
    struct RecordingEngine {
        executed: Vec<String>,
        inserts: Vec<(String, usize)>,
    }

    impl Engine for RecordingEngine {
        fn execute(&mut self, sql: &str) -> Result<()> {
            self.executed.push(sql.to_string());
            Ok(())
        }

        fn query(&mut self, _sql: &str) -> Result<Vec<QueryResult>> {
            Ok(Vec::new())
        }

        fn insert_rows(&mut self, template: &str, rows: &[Vec<String>]) -> Result<usize> {
            self.inserts.push((template.to_string(), rows.len()));
            Ok(rows.len())
        }
    }

    #[test]
    fn import_runs_create_then_prepared_insert() {
        let mut playground = Playground::with_engine(RecordingEngine::default());
        let summary = playground
            .import_csv("people", "name,age\nAlice,30\nBob,twenty\nbad\n")
            .unwrap();

        assert_eq!(summary, ImportSummary { table: "people".into(), columns: 2, rows: 2 });
        assert_eq!(
            playground.engine().executed,
            vec!["CREATE TABLE IF NOT EXISTS people (name TEXT, age TEXT);"]
        );
        assert_eq!(
            playground.engine().inserts,
            vec![("INSERT INTO people (name, age) VALUES (?, ?);".to_string(), 2)]
        );
        assert_eq!(playground.imported_tables(), &[summary]);
    }

    #[test]
    fn import_without_rows_skips_insert() {
        let mut playground = Playground::with_engine(RecordingEngine::default());
        playground.import_csv("empty", "a,b\n").unwrap();
        assert_eq!(playground.engine().executed.len(), 1);
        assert!(playground.engine().inserts.is_empty());
    }

    #[test]
    fn failed_import_records_nothing() {
        let mut playground = Playground::with_engine(RecordingEngine::default());
        assert!(matches!(
            playground.import_csv("t", "   \n"),
            Err(SqlpadError::EmptyInput)
        ));
        assert!(playground.engine().executed.is_empty());
        assert!(playground.imported_tables().is_empty());
    }

    #[test]
    fn in_memory_session_is_seeded() {
        let mut playground = Playground::in_memory().unwrap();
        assert_eq!(playground.table_names().unwrap(), vec!["users"]);
        let results = playground.run("SELECT name FROM users ORDER BY id").unwrap();
        assert_eq!(results[0].len(), 2);
        assert_eq!(results[0].rows[0].get("NAME"), Some(&Value::Text("Leonardo".into())));
    }

    #[test]
    fn tables_overview_lists_tables() {
        let mut playground = Playground::in_memory().unwrap();
        playground.import_csv("scores", "who,points\nana,3\n").unwrap();
        assert_eq!(
            playground.tables_overview().unwrap().unwrap(),
            "-- Tables in this database:\n-- * users\n-- * scores\n\n-- Example query:\nSELECT * FROM users LIMIT 10;"
        );
    }

    #[test]
    fn tables_overview_of_empty_database() {
        let mut playground = Playground::open(":memory:").unwrap();
        assert_eq!(playground.tables_overview().unwrap(), None);
    }

    #[test]
    fn preview_query_text() {
        assert_eq!(preview_query("users"), "SELECT * FROM users LIMIT 10;");
    }
}
