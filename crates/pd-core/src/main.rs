//! Personal Data Core - redacting log pipeline
//!
//! The main entry point for pd-core, handling:
//! - Streaming user rows from a database into the redacting `user_data` logger
//! - Redacting `key=value;` lines from stdin

use clap::{Args, Parser, Subcommand, ValueEnum};
use pd_core::exit_codes::ExitCode;
use pd_core::ingest::{DbConfig, RowIngestor, SqliteSource, DEFAULT_QUERY};
use pd_core::logging::{init_logging, LogConfig, LogLevel, Logger, LoggerRegistry};
use pd_redact::{
    pii_fields, FieldRedactor, FieldSet, LiteralFieldRedactor, RegexFieldRedactor, REDACTION,
    SEPARATOR,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Personal Data Core - log user data without leaking PII
#[derive(Parser)]
#[command(name = "pd-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Increase diagnostics verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report diagnostics errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Read user rows and log them through the redacting `user_data` logger
    Ingest(IngestArgs),

    /// Redact PII field values in lines read from stdin
    Filter(FilterArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct IngestArgs {
    /// Query to run
    #[arg(long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Database to read (SQLite file path); overrides PERSONAL_DATA_DB_NAME
    #[arg(long)]
    db_name: Option<String>,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Comma-separated field names to redact (default: the PII fields)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Replacement for redacted values
    #[arg(long, default_value = REDACTION)]
    redaction: String,

    /// Literal terminator of each key=value pair
    #[arg(long, default_value = SEPARATOR)]
    separator: String,

    /// Redaction engine
    #[arg(long, value_enum, default_value_t = Engine::Regex)]
    engine: Engine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Engine {
    /// Compiled per-field patterns
    Regex,
    /// Substring scanning
    Literal,
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    let log_config = LogConfig::from_env(cli_level);

    // The user_data logger exists before the subscriber so its target is
    // never routed to diagnostics.
    let registry = Arc::new(LoggerRegistry::new());
    let logger = match registry.default_logger() {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("pd-core: {}", err);
            std::process::exit(ExitCode::from(&err).as_i32());
        }
    };
    if let Err(err) = init_logging(&log_config, Arc::clone(&registry)) {
        eprintln!("pd-core: {}", err);
        std::process::exit(ExitCode::from(&err).as_i32());
    }

    let exit_code = match cli.command {
        Commands::Ingest(args) => run_ingest(logger, &args),
        Commands::Filter(args) => run_filter(&args),
        Commands::Version => {
            println!("pd-core {}", env!("CARGO_PKG_VERSION"));
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_ingest(logger: Arc<Logger>, args: &IngestArgs) -> ExitCode {
    let mut config = DbConfig::from_env();
    if let Some(name) = &args.db_name {
        config.name = name.clone();
    }
    tracing::debug!(?config, "database settings");

    let result = SqliteSource::open(&config)
        .and_then(|mut source| RowIngestor::new(logger).ingest(&mut source, &args.query));

    match result {
        Ok(stats) => {
            tracing::debug!(rows = stats.rows, "ingest complete");
            ExitCode::Clean
        }
        Err(err) => {
            eprintln!("pd-core ingest: {}", err);
            ExitCode::from(&err)
        }
    }
}

fn run_filter(args: &FilterArgs) -> ExitCode {
    let fields = if args.fields.is_empty() {
        pii_fields()
    } else {
        FieldSet::new(args.fields.iter().cloned())
    };

    let redactor: Box<dyn FieldRedactor> = match args.engine {
        Engine::Regex => match RegexFieldRedactor::new(fields, args.separator.as_str()) {
            Ok(redactor) => Box::new(redactor),
            Err(err) => {
                eprintln!("pd-core filter: {}", err);
                return ExitCode::ArgsError;
            }
        },
        Engine::Literal => Box::new(LiteralFieldRedactor::new(fields, args.separator.as_str())),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match filter_lines(
        redactor.as_ref(),
        &args.redaction,
        stdin.lock(),
        io::BufWriter::new(stdout.lock()),
    ) {
        Ok(lines) => {
            tracing::debug!(lines, "filter complete");
            ExitCode::Clean
        }
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => ExitCode::Clean,
        Err(err) => {
            eprintln!("pd-core filter: {}", err);
            ExitCode::IoError
        }
    }
}

/// Redact each input line and write it out. Returns the number of lines.
fn filter_lines<R: BufRead, W: Write>(
    redactor: &dyn FieldRedactor,
    redaction: &str,
    reader: R,
    mut writer: W,
) -> io::Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        writeln!(writer, "{}", redactor.filter(redaction, &line))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}
