//! rawtable CLI
//!
//! Command-line tool for inspecting header-addressed CSV tables, reading typed
//! values, dumping key-value tables and applying override patches.

use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use rawtable_core::names::eq_ignore_case;
use rawtable_core::{
    apply_patch, load_family, parse_csv, row_to_json, rows_to_json, scan_directory, write_csv,
    Edit, Error, KeyValueTable, PatchFile, RowView, TableOptions,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rawtable")]
#[command(about = "Header-addressed CSV table tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Log library events at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan directories for CSV files and list table families
    Scan {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,

        /// Show member files for each family
        #[arg(short, long)]
        members: bool,
    },

    /// Parse and display a single CSV table
    Show {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only show columns starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Strip the prefix from displayed column names
        #[arg(short, long, requires = "prefix")]
        strip: bool,

        /// Drop rows whose cells are all blank
        #[arg(long)]
        remove_empty: bool,
    },

    /// Load a family (base file plus variants) as one table and export it
    Family {
        /// Root directories to scan
        #[arg(short, long, required = true)]
        root: Vec<PathBuf>,

        /// Family name
        #[arg(short, long)]
        name: String,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Read a key/value table as a single row and print it
    KeyValue {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Key column name
        #[arg(short, long, default_value = "Key")]
        key: String,

        /// Value column name
        #[arg(long, default_value = "Value")]
        value: String,

        /// Print as JSON instead of `name = value` lines
        #[arg(long)]
        json: bool,
    },

    /// Read one typed cell value
    Get {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Data row index (header excluded, 0-based)
        #[arg(long)]
        row: usize,

        /// Column name
        #[arg(short, long)]
        column: String,

        /// Value type (string, int, long, float, double, bool, date)
        #[arg(long = "as", default_value = "string")]
        kind: String,

        /// chrono format used when reading dates
        #[arg(long, default_value = "%Y-%m-%d")]
        date_format: String,
    },

    /// Apply a patch file to a table and export the patched rows
    Patch {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to patch file (JSON)
        #[arg(short, long)]
        patch: PathBuf,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Create a patch file template
    CreatePatch {
        /// Table name for the patch
        #[arg(short, long)]
        table: String,

        /// Output path for the patch file
        #[arg(short, long)]
        output: PathBuf,

        /// Example edits to include (row:column:value)
        #[arg(short, long)]
        example: Vec<String>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> rawtable_core::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Scan { root, members } => cmd_scan(&root, members),
        Commands::Show {
            file,
            limit,
            prefix,
            strip,
            remove_empty,
        } => cmd_show(&file, limit, prefix.as_deref(), strip, remove_empty),
        Commands::Family {
            root,
            name,
            format,
            output,
        } => cmd_family(&root, &name, &format, &output),
        Commands::KeyValue {
            file,
            key,
            value,
            json,
        } => cmd_key_value(&file, &key, &value, json),
        Commands::Get {
            file,
            row,
            column,
            kind,
            date_format,
        } => cmd_get(&file, row, &column, &kind, &date_format),
        Commands::Patch {
            file,
            patch,
            format,
            output,
        } => cmd_patch(&file, &patch, &format, &output),
        Commands::CreatePatch {
            table,
            output,
            example,
        } => cmd_create_patch(&table, &output, &example),
    }
}

fn cmd_scan(roots: &[PathBuf], members: bool) -> rawtable_core::Result<()> {
    let result = scan_directory(roots)?;

    println!("Scanned {} root(s):", result.roots.len());
    for root in &result.roots {
        println!("  {}", root.display());
    }
    println!();
    println!(
        "Found {} files in {} families",
        result.total_files,
        result.families.len()
    );
    println!("Families: {}", result.family_names().join(", "));

    if !members {
        return Ok(());
    }

    for family in &result.families {
        println!();
        println!("{} ({} files)", family.name, family.members.len());
        match family.base_file() {
            Some(base) => println!("  {} [base]", base.path.display()),
            None => println!("  (no base file)"),
        }
        for variant in family.variants() {
            println!(
                "  {} [{}]",
                variant.path.display(),
                variant.suffix.as_deref().unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn cmd_show(
    file: &Path,
    limit: Option<usize>,
    prefix: Option<&str>,
    strip: bool,
    remove_empty: bool,
) -> rawtable_core::Result<()> {
    let options = TableOptions {
        remove_empty_rows: remove_empty,
    };
    let table = parse_csv(file, options)?;

    println!("File: {}", file.display());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();

    let rows: Vec<RowView<'_>> = table
        .rows()
        .map(|row| match prefix {
            Some(p) => row.select_columns(p, strip),
            None => row,
        })
        .collect();

    let header: Vec<String> = match rows.first() {
        Some(row) => row.headers().into_iter().map(str::to_string).collect(),
        None => table.headers().map(str::to_string).collect(),
    };
    println!("{}", header.join("\t"));
    println!("{}", "-".repeat(header.len() * 12));

    let row_limit = limit.unwrap_or(rows.len());
    for row in rows.iter().take(row_limit) {
        let values: Vec<&str> = header
            .iter()
            .map(|column| row.raw_cell(column).flatten().unwrap_or_default())
            .collect();
        println!("{}", values.join("\t"));
    }

    if rows.len() > row_limit {
        println!("... ({} more rows)", rows.len() - row_limit);
    }

    Ok(())
}

fn cmd_family(
    roots: &[PathBuf],
    family_name: &str,
    format: &str,
    output: &Path,
) -> rawtable_core::Result<()> {
    let scan_result = scan_directory(roots)?;

    let family = scan_result
        .find_family(family_name)
        .ok_or_else(|| Error::TableNotFound(family_name.to_string()))?;

    let table = load_family(family, TableOptions::default())?;
    println!(
        "Loaded {} rows from {} source files",
        table.row_count(),
        table.full_names().len()
    );

    let rows: Vec<RowView<'_>> = table.rows().collect();
    write_rows(&rows, format, output)?;

    println!("Exported {} rows to {}", rows.len(), output.display());

    Ok(())
}

fn cmd_key_value(file: &Path, key: &str, value: &str, json: bool) -> rawtable_core::Result<()> {
    let table = parse_csv(file, TableOptions::default())?;
    let key_value = KeyValueTable::from_table(&table, key, value)?;
    let row = key_value.row();

    if json {
        println!("{}", serde_json::to_string_pretty(&row_to_json(&row))?);
        return Ok(());
    }

    for column in row.headers() {
        println!("{} = {}", column, row.raw_value(column).unwrap_or_default());
    }

    Ok(())
}

fn cmd_get(
    file: &Path,
    index: usize,
    column: &str,
    kind: &str,
    date_format: &str,
) -> rawtable_core::Result<()> {
    let table = parse_csv(file, TableOptions::default())?;
    let row = table.get_row(index)?;

    let text = match kind.to_lowercase().as_str() {
        "string" => row.get_string(column)?.to_string(),
        "int" => row.get_int(column)?.to_string(),
        "long" => row.get_long(column)?.to_string(),
        "float" => row.get_float(column)?.to_string(),
        "double" => row.get_double(column)?.to_string(),
        "bool" => row.get_bool(column)?.to_string(),
        "date" => row
            .get_datetime_utc(column, date_format)?
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        other => {
            return Err(Error::InvalidArgument(format!(
                "unknown value type '{}', supported types: string, int, long, float, double, bool, date",
                other
            )))
        }
    };
    println!("{}", text);

    Ok(())
}

fn cmd_patch(
    file: &Path,
    patch_path: &Path,
    format: &str,
    output: &Path,
) -> rawtable_core::Result<()> {
    let patch = PatchFile::load(patch_path)?;
    println!(
        "Loaded patch for table '{}' with {} edits",
        patch.table,
        patch.edits.len()
    );

    let table = parse_csv(file, TableOptions::default())?;
    if !eq_ignore_case(&patch.table, table.name()) {
        warn!(patch = %patch.table, table = %table.name(), "patch targets a different table name");
    }

    let rows = apply_patch(&table, &patch)?;

    println!("\nRows modified:");
    for row in &rows {
        if let RowView::Replace(replaced) = row {
            let columns: Vec<&str> = replaced.overridden().collect();
            println!("  {}: {}", row.location(), columns.join(", "));
        }
    }

    write_rows(&rows, format, output)?;
    println!("\nExported {} rows to {}", rows.len(), output.display());

    Ok(())
}

fn cmd_create_patch(table: &str, output: &Path, examples: &[String]) -> rawtable_core::Result<()> {
    let mut patch = PatchFile::new(table);

    // Parse example edits: "row:column:value"
    for example in examples {
        let parts: Vec<&str> = example.splitn(3, ':').collect();
        if parts.len() != 3 {
            eprintln!(
                "Warning: Invalid example format '{}', expected 'row:column:value'",
                example
            );
            continue;
        }

        let row: usize = match parts[0].parse() {
            Ok(row) => row,
            Err(_) => {
                eprintln!("Warning: Invalid row index '{}' in example", parts[0]);
                continue;
            }
        };

        patch.add_edit(Edit::new(row, parts[1], parts[2]));
    }

    if patch.edits.is_empty() {
        patch.add_edit(Edit::new(0, "ColumnName", "NewValue"));
    }

    patch.save(output)?;
    println!("Created patch file: {}", output.display());
    println!("Table: {}", table);
    println!("Edits: {}", patch.edits.len());
    println!();
    println!("Edit the file to add your changes, then run:");
    println!(
        "  rawtable patch --file <csv> --patch {} --output <file>",
        output.display()
    );

    Ok(())
}

/// Write rows to a file as CSV or JSON
fn write_rows(rows: &[RowView<'_>], format: &str, output: &Path) -> rawtable_core::Result<()> {
    let format = format.to_lowercase();
    if format != "csv" && format != "json" {
        return Err(Error::InvalidArgument(format!(
            "unknown format '{}', supported formats: csv, json",
            format
        )));
    }

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);

    if format == "csv" {
        write_csv(rows, &mut writer)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, &rows_to_json(rows))?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
