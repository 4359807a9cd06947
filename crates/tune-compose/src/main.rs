use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tune_compose::{array_name, compile, CompileError, CompileOptions, OutputFormat};

/// Exit code reported when the tune notation cannot be parsed
const PARSE_FAILURE: i32 = 255;

#[derive(Parser, Debug)]
#[command(name = "tune-compose")]
#[command(about = "Compile tune notation into a PROGMEM opcode table", long_about = None)]
struct Args {
    /// Tune notation file, `-` reads stdin
    source: String,

    /// Output file, `-` writes to stdout
    #[arg(short, long, default_value = "-")]
    out: String,

    /// Shape of the generated table
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Cpp)]
    format: OutputFormat,

    /// Array name (default: derived from the output file name)
    #[arg(long)]
    name: Option<String>,

    /// Play the encoded table back and check it against the source
    #[arg(long)]
    verify: bool,

    /// Suppress informational messages (only errors)
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log each compilation stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    let source = read_source(&args.source)?;

    let options = CompileOptions {
        format: args.format,
        name: args.name.clone().unwrap_or_else(|| array_name(&args.out)),
        verify: args.verify,
    };

    let compiled = match compile(&source, &options) {
        Ok(compiled) => compiled,
        Err(CompileError::Parse(e)) => {
            log::debug!("{}", e);
            eprintln!("Error on line {}", e.line(&source));
            std::process::exit(PARSE_FAILURE);
        }
        Err(e) => return Err(e).context("Failed to compile tune"),
    };

    // Output is only opened once compilation succeeded
    if args.out == "-" {
        io::stdout()
            .lock()
            .write_all(compiled.output.as_bytes())
            .context("Failed to write to stdout")?;
    } else {
        let path = Path::new(&args.out);
        fs::write(path, &compiled.output)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!(
            "Output saved to {} ({} opcodes)",
            path.display(),
            compiled.table.len()
        );
    }

    Ok(())
}

fn init_logger(args: &Args) {
    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };

    env_logger::Builder::new()
        .parse_filters(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read tune from stdin")?;
        return Ok(text);
    }

    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!("Tune file not found: {}", path.display());
    }
    log::info!("Processing tune file: {}", path.display());
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
