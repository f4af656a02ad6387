//! pbdebug command-line tool for converting protobuf debug strings.
//!
//! Usage: pbdebug [OPTIONS] [FILE|DIR]
//!
//! Options:
//!   -t, --to <FORMAT>      Output format (json, json-compact, text, short, yaml, toml, cbor, diag)
//!   -w, --write            Write output next to the input with the format's extension
//!                          (text formats use .txt; the input itself is never overwritten)
//!   -o, --output <FILE>    Write output to specified file
//!       --check            Only check that the input parses (exit 0 if it does, 1 if not)
//!       --strict           Treat any recovered malformation as an error
//!       --lenient-numbers  Read malformed numbers as null instead of failing
//!       --max-depth <N>    Maximum brace nesting [default: 128]
//!   -v, --verbose          Raise log verbosity (repeatable); RUST_LOG takes precedence
//!   -h, --help             Print help
//!   -V, --version          Print version

use clap::{ArgAction, Parser, ValueEnum};
use libpbdebug::{
    encode, line_col, parse_with_options, Document, Format, NumberPolicy, ParseOptions,
    DEFAULT_MAX_DEPTH,
};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

mod transcode;

/// Extensions read from a directory input.
const INPUT_EXTENSIONS: &[&str] = &["txtpb", "pbtxt"];

#[derive(Parser, Debug)]
#[command(
    name = "pbdebug",
    version,
    about = "Convert protobuf debug strings to JSON and other formats",
    after_help = r#"EXAMPLES:
    # Convert a debug string to JSON
    pbdebug message.txtpb

    # Read from stdin, write single-line JSON
    echo 'User { id: 1 }' | pbdebug -t json-compact

    # Check every .txtpb and .pbtxt file in a directory, rejecting partial parses
    pbdebug --check --strict ./dumps/

    # Write message.yaml next to message.txtpb
    pbdebug -t yaml -w message.txtpb"#
)]
struct Cli {
    /// Input file or directory (reads from stdin if absent or `-`)
    #[arg(value_name = "FILE|DIR")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Json)]
    to: OutputFormat,

    /// Write output next to the input, with the format's extension
    #[arg(short, long, conflicts_with = "output")]
    write: bool,

    /// Write output to the specified file (not valid with directory input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only check that the input parses
    #[arg(long)]
    check: bool,

    /// Treat unclosed braces, stray characters and other recovered input as errors
    #[arg(long)]
    strict: bool,

    /// Read malformed numbers as null instead of failing
    #[arg(long)]
    lenient_numbers: bool,

    /// Maximum brace nesting
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    JsonCompact,
    /// Multi-line debug string
    Text,
    /// Single-line debug string
    #[value(alias = "short-text")]
    Short,
    #[value(alias = "yml")]
    Yaml,
    Toml,
    Cbor,
    /// CBOR diagnostic notation
    Diag,
}

/// Encoded output, ready to write.
#[derive(Debug, PartialEq)]
enum Rendered {
    Text(String),
    Binary(Vec<u8>),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    process::exit(run(&cli));
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> i32 {
    let input_path = cli.input.as_deref().filter(|p| *p != Path::new("-"));

    if let Some(path) = input_path {
        if path.is_dir() {
            if cli.output.is_some() {
                eprintln!("Error: --output cannot be used with directory input");
                return 1;
            }
            return process_directory(path, cli);
        }
    }

    let input = match input_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                return 1;
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                return 1;
            }
            buffer
        }
    };

    process_input(&input, input_path, cli)
}

fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json | OutputFormat::JsonCompact => "json",
        OutputFormat::Text | OutputFormat::Short => "txt",
        OutputFormat::Yaml => "yaml",
        OutputFormat::Toml => "toml",
        OutputFormat::Cbor => "cbor",
        OutputFormat::Diag => "diag",
    }
}

fn is_input_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.contains(&e))
}

fn process_directory(dir_path: &Path, cli: &Cli) -> i32 {
    let entries = match fs::read_dir(dir_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path.display(), e);
            return 1;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_input_file(path))
        .collect();
    paths.sort();
    info!("{} input files in {}", paths.len(), dir_path.display());

    let mut had_errors = false;
    for path in &paths {
        let input = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                had_errors = true;
                continue;
            }
        };
        if process_input(&input, Some(path.as_path()), cli) != 0 {
            had_errors = true;
        }
    }

    if had_errors {
        1
    } else {
        0
    }
}

fn parse_options(cli: &Cli, input_file: Option<&Path>) -> ParseOptions {
    let mut options = ParseOptions::new().max_depth(cli.max_depth);
    if cli.lenient_numbers {
        options = options.number_policy(NumberPolicy::Null);
    }
    if let Some(name) = input_file.and_then(Path::file_name) {
        options = options.filename(name.to_string_lossy());
    }
    options
}

fn process_input(input: &str, input_file: Option<&Path>, cli: &Cli) -> i32 {
    let label = input_file
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    debug!("parsing {} ({} bytes)", label, input.len());

    let parsed = match parse_with_options(input, &parse_options(cli, input_file)) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}: {}", label, e);
            return 1;
        }
    };

    for recovery in &parsed.recoveries {
        let (line, col) = line_col(input, recovery.offset);
        if cli.strict {
            eprintln!("{}:{}:{}: {}", label, line, col, recovery.kind);
        } else {
            warn!("{}:{}:{}: {}", label, line, col, recovery.kind);
        }
    }
    if cli.strict && !parsed.is_complete() {
        return 1;
    }

    if cli.check {
        println!("{}: ok", label);
        return 0;
    }

    let result = render(&parsed.document, cli.to).and_then(|rendered| {
        let destination = output_destination(cli, input_file)?;
        write_output(&rendered, destination.as_deref())
    });
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}: {}", label, e);
            1
        }
    }
}

fn render(doc: &Document, format: OutputFormat) -> Result<Rendered, String> {
    let rendered = match format {
        OutputFormat::Json => Rendered::Text(encode(doc, Format::Json)),
        OutputFormat::JsonCompact => Rendered::Text(encode(doc, Format::JsonCompact)),
        OutputFormat::Text => Rendered::Text(encode(doc, Format::Text)),
        OutputFormat::Short => Rendered::Text(encode(doc, Format::ShortText)),
        OutputFormat::Yaml => Rendered::Text(
            transcode::yaml::encode(doc).map_err(|e| format!("Cannot convert to YAML: {}", e))?,
        ),
        OutputFormat::Toml => Rendered::Text(
            transcode::toml::encode(doc).map_err(|e| format!("Cannot convert to TOML: {}", e))?,
        ),
        OutputFormat::Cbor => Rendered::Binary(
            transcode::cbor::encode(doc).map_err(|e| format!("Cannot convert to CBOR: {}", e))?,
        ),
        OutputFormat::Diag => {
            let bytes = transcode::cbor::encode(doc)
                .map_err(|e| format!("Cannot convert to CBOR: {}", e))?;
            Rendered::Text(transcode::cbor::diagnostic(&bytes).map_err(|e| {
                format!("Cannot render CBOR diagnostic notation: {}", e)
            })?)
        }
    };
    Ok(rendered)
}

/// Where output goes: a file, or `None` for stdout.
///
/// The input file is never a destination: parsing may drop malformed input,
/// so writing over it could lose data.
fn output_destination(cli: &Cli, input_file: Option<&Path>) -> Result<Option<PathBuf>, String> {
    let destination = if let Some(path) = &cli.output {
        path.clone()
    } else if !cli.write {
        return Ok(None);
    } else {
        match input_file {
            Some(input_path) => input_path.with_extension(format_extension(cli.to)),
            None => return Err("--write requires an input file".to_string()),
        }
    };
    if input_file == Some(destination.as_path()) {
        return Err(format!(
            "refusing to overwrite input file {}",
            destination.display()
        ));
    }
    Ok(Some(destination))
}

fn write_output(rendered: &Rendered, destination: Option<&Path>) -> Result<(), String> {
    let bytes: Vec<u8> = match rendered {
        // Text output always ends with a newline.
        Rendered::Text(text) if text.ends_with('\n') => text.clone().into_bytes(),
        Rendered::Text(text) => format!("{}\n", text).into_bytes(),
        Rendered::Binary(bytes) => bytes.clone(),
    };

    match destination {
        Some(path) => {
            fs::write(path, &bytes).map_err(|e| format!("Error writing {}: {}", path.display(), e))?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&bytes)
                .map_err(|e| format!("Error writing to stdout: {}", e))?;
        }
    }
    Ok(())
}
