use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codec::EncoderConfig;
use vtxc_tools::{
    collect_stats, decode_records, encode_records, format_stats_pretty, Format, Records,
};

#[derive(Parser)]
#[command(
    name = "vtxc-tools",
    version,
    about = "vtxc vertex buffer encoding tools"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode raw vertex records.
    Encode {
        /// Record size in bytes.
        #[arg(long)]
        stride: usize,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::V1)]
        format: Format,
        /// Stream version written into the format byte.
        #[arg(long, default_value_t = wire::VERSION)]
        version: u8,
        /// Keep only the first N bytes of every record before encoding.
        #[arg(long)]
        prefix: Option<usize>,
        /// Output path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Input path (stdin if omitted).
        input: Option<PathBuf>,
    },
    /// Decode an encoded stream into raw vertex records.
    Decode {
        /// Record size in bytes.
        #[arg(long)]
        stride: usize,
        /// Number of records in the stream.
        #[arg(long)]
        count: usize,
        /// Input format.
        #[arg(long, value_enum, default_value_t = Format::V1)]
        format: Format,
        /// Output path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Input path (stdin if omitted).
        input: Option<PathBuf>,
    },
    /// Encode raw vertex records and print per-channel statistics.
    Stats {
        /// Record size in bytes.
        #[arg(long)]
        stride: usize,
        /// Keep only the first N bytes of every record before encoding.
        #[arg(long)]
        prefix: Option<usize>,
        /// Print JSON instead of the text table.
        #[arg(long)]
        json: bool,
        /// Input path (stdin if omitted).
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Encode {
            stride,
            format,
            version,
            prefix,
            output,
            input,
        } => {
            let records = load_records(input.as_deref(), stride, prefix)?;
            let config = EncoderConfig::with_version(version);
            let encoded = encode_records(&records, format, &config)?;
            log::info!(
                "encoded {} records ({} bytes) into {} bytes",
                records.count,
                records.data.len(),
                encoded.len()
            );
            write_output(output.as_deref(), &encoded)?;
        }
        Command::Decode {
            stride,
            count,
            format,
            output,
            input,
        } => {
            let encoded = read_input(input.as_deref())?;
            let decoded = decode_records(&encoded, stride, count, format)?;
            write_output(output.as_deref(), &decoded)?;
        }
        Command::Stats {
            stride,
            prefix,
            json,
            input,
        } => {
            let records = load_records(input.as_deref(), stride, prefix)?;
            let report = collect_stats(&records, &EncoderConfig::default())?;
            if json {
                let json = serde_json::to_string_pretty(&report).context("serialize json")?;
                println!("{json}");
            } else {
                print!("{}", format_stats_pretty(&report));
            }
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path).with_context(|| format!("read input {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("read stdin")?;
            Ok(bytes)
        }
    }
}

fn load_records(path: Option<&Path>, stride: usize, prefix: Option<usize>) -> Result<Records> {
    let records = Records::from_bytes(read_input(path)?, stride)?;
    match prefix {
        Some(prefix) => records.project_prefix(prefix),
        None => Ok(records),
    }
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("write output {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}
