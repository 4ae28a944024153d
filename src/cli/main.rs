//! # sqlpad CLI
//!
//! An interactive SQL playground, similar to the `sqlite3` shell, with CSV
//! import and HTML syntax highlighting.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use sqlpad::sql::{format_sql, highlight, scan, FormatStyle, SpanKind};
use sqlpad::{preview_query, Playground, QueryResult};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Database file. Defaults to a private in-memory database.
    db: Option<PathBuf>,

    /// CSV file to import before the prompt opens (repeatable).
    #[arg(long = "import", value_name = "CSV")]
    imports: Vec<PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,

    /// Echo each executed statement as highlighted HTML.
    #[arg(long)]
    html: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    println!("sqlpad v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter \".help\" for usage hints.");

    let opened = match &args.db {
        Some(path) => {
            println!("Connected to {}", path.display());
            Playground::open(path)
        }
        None => {
            println!("Connected to a transient in-memory database.");
            Playground::in_memory()
        }
    };
    let mut playground = match opened {
        Ok(playground) => playground,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    for path in &args.imports {
        import(&mut playground, path, None);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut sql_buffer = String::new();

    loop {
        let prompt = if sql_buffer.is_empty() {
            "sqlpad> "
        } else {
            "   ...> "
        };
        print!("{}", prompt);
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                error!("failed to read input: {}", e);
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() && sql_buffer.is_empty() {
            continue;
        }

        if sql_buffer.is_empty() && trimmed.starts_with('.') {
            handle_dot_command(trimmed, &mut playground);
            continue;
        }

        sql_buffer.push_str(&line);
        if !is_complete_statement(&sql_buffer) {
            continue;
        }

        let sql = sql_buffer.trim().to_string();
        sql_buffer.clear();

        if args.html {
            println!("{}", highlight(&sql));
        }
        execute_sql(&mut playground, &sql);
    }

    println!();
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// A buffer is complete once its last token outside comments and whitespace
/// is a `;`. Semicolons inside strings or comments do not count.
fn is_complete_statement(sql: &str) -> bool {
    scan(sql)
        .iter()
        .filter(|span| match span.kind {
            SpanKind::Comment => false,
            SpanKind::Plain => !span.text(sql).trim().is_empty(),
            _ => true,
        })
        .last()
        .map_or(false, |span| {
            span.kind == SpanKind::Punctuation && span.text(sql) == ";"
        })
}

fn execute_sql(playground: &mut Playground, sql: &str) {
    match playground.run(sql) {
        Ok(results) => {
            for result in results {
                print_result(result);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }
}

fn print_result(result: QueryResult) {
    let headers: Vec<&str> = result.columns.iter().map(|s| s.as_str()).collect();
    println!("{}", headers.join("|"));

    let count = result.len();
    for row in result {
        let vals: Vec<String> = row.values.iter().map(|v| format!("{}", v)).collect();
        println!("{}", vals.join("|"));
    }
    println!("({} rows)", count);
}

fn import(playground: &mut Playground, path: &std::path::Path, table: Option<&str>) {
    match playground.import_file(path, table) {
        Ok(summary) => {
            println!(
                "Table '{}' imported: {} columns, {} rows inserted.",
                summary.table, summary.columns, summary.rows
            );
            println!("Try: {}", preview_query(&summary.table));
        }
        Err(e) => {
            eprintln!("Error importing {}: {}", path.display(), e);
        }
    }
}

/// Splits `.import` arguments into a file path and an optional table name.
/// A path containing spaces may be wrapped in double or single quotes.
fn split_import_args(rest: &str) -> Option<(&str, Option<&str>)> {
    let rest = rest.trim();
    let (path, tail) = match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &rest[1..];
            let close = inner.find(quote)?;
            (&inner[..close], &inner[close + 1..])
        }
        _ => rest.split_once(char::is_whitespace).unwrap_or((rest, "")),
    };
    if path.is_empty() {
        return None;
    }
    Some((path, tail.split_whitespace().next()))
}

fn handle_dot_command(cmd: &str, playground: &mut Playground) {
    let (command, rest) = match cmd.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (cmd.to_lowercase(), ""),
    };

    match command.as_str() {
        ".help" => {
            println!(".help                 Show this help");
            println!(".tables               List all tables with an example query");
            println!(".import FILE [TABLE]  Import a CSV file as a table (quote FILE if it has spaces)");
            println!(".imports              Show tables imported in this session (JSON)");
            println!(".highlight SQL        Print SQL as highlighted HTML");
            println!(".format SQL           Put each major clause on its own line");
            println!(".pretty SQL           Pretty-print SQL with indentation");
            println!(".quit                 Exit this program");
            println!(".exit                 Exit this program");
        }
        ".tables" => match playground.tables_overview() {
            Ok(Some(overview)) => println!("{}", overview),
            Ok(None) => println!("(no tables)"),
            Err(e) => eprintln!("Error: {}", e),
        },
        ".import" => match split_import_args(rest) {
            Some((file, table)) => import(playground, std::path::Path::new(file), table),
            None => eprintln!("Usage: .import FILE [TABLE]  (quote FILE if it has spaces)"),
        },
        ".imports" => match serde_json::to_string_pretty(playground.imported_tables()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: {}", e),
        },
        ".highlight" => println!("{}", highlight(rest)),
        ".format" => println!("{}", format_sql(rest, FormatStyle::ClauseBreaks)),
        ".pretty" => println!("{}", format_sql(rest, FormatStyle::Indented)),
        ".quit" | ".exit" => {
            std::process::exit(0);
        }
        _ => {
            eprintln!("Error: unknown command: {}", command);
            eprintln!("Use .help for a list of commands.");
        }
    }
}
