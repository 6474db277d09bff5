//! Command-line tooling for the vtxc codec.
//!
//! This crate provides the operations behind the `vtxc-tools` binary:
//!
//! - Encode raw vertex records in the primary or bit-plane format
//! - Decode an encoded stream back to raw records
//! - Report per-channel statistics for an encoding
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use anyhow::{ensure, Context, Result};
use codec::{
    decode_bitplane, decode_vertex_buffer, encode_bitplane, encode_bitplane_bound,
    encode_vertex_buffer_bound, encode_vertex_buffer_with, EncodeStats, EncoderConfig, NoStats,
};
use serde::Serialize;

/// Stream format produced or consumed by a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Block-structured delta stream with a format byte and tail.
    V1,
    /// Bit-plane transposition of 32-bit words.
    Bitplane,
}

/// Raw records ready for encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Records {
    pub data: Vec<u8>,
    pub stride: usize,
    pub count: usize,
}

impl Records {
    /// Splits `input` into whole records of `stride` bytes.
    ///
    /// Trailing bytes that do not form a whole record are dropped.
    pub fn from_bytes(mut input: Vec<u8>, stride: usize) -> Result<Self> {
        ensure!(stride > 0, "stride must be positive");
        let count = input.len() / stride;
        let extra = input.len() % stride;
        if extra != 0 {
            log::warn!("ignoring {extra} trailing bytes after {count} records of {stride} bytes");
            input.truncate(count * stride);
        }
        Ok(Self {
            data: input,
            stride,
            count,
        })
    }

    /// Keeps only the first `prefix` bytes of every record.
    pub fn project_prefix(&self, prefix: usize) -> Result<Self> {
        ensure!(
            prefix > 0 && prefix <= self.stride,
            "prefix {prefix} outside 1..={}",
            self.stride
        );
        let data = self
            .data
            .chunks_exact(self.stride)
            .flat_map(|record| &record[..prefix])
            .copied()
            .collect();
        Ok(Self {
            data,
            stride: prefix,
            count: self.count,
        })
    }
}

/// Encodes `records` in `format`.
pub fn encode_records(records: &Records, format: Format, config: &EncoderConfig) -> Result<Vec<u8>> {
    encode_with_stats(records, format, config, &mut NoStats)
}

fn encode_with_stats<S>(
    records: &Records,
    format: Format,
    config: &EncoderConfig,
    stats: &mut S,
) -> Result<Vec<u8>>
where
    S: codec::StatsSink,
{
    let Records {
        data,
        stride,
        count,
    } = records;

    let (mut out, len) = match format {
        Format::V1 => {
            let mut out = vec![0u8; encode_vertex_buffer_bound(*count, *stride)?];
            let len = encode_vertex_buffer_with(&mut out, data, *count, *stride, config, stats)
                .context("encode vertex buffer")?;
            (out, len)
        }
        Format::Bitplane => {
            let mut out = vec![0u8; encode_bitplane_bound(*count, *stride)?];
            let len = encode_bitplane(&mut out, data, *count, *stride).context("encode bitplane")?;
            (out, len)
        }
    };
    out.truncate(len);
    Ok(out)
}

/// Decodes `count` records of `stride` bytes from `encoded`.
pub fn decode_records(encoded: &[u8], stride: usize, count: usize, format: Format) -> Result<Vec<u8>> {
    let len = count
        .checked_mul(stride)
        .context("record count overflows the address space")?;
    let mut out = vec![0u8; len];
    match format {
        Format::V1 => {
            decode_vertex_buffer(&mut out, count, stride, encoded).context("decode vertex buffer")?;
        }
        Format::Bitplane => {
            decode_bitplane(&mut out, count, stride, encoded).context("decode bitplane")?;
        }
    }
    Ok(out)
}

/// Statistics for one primary-format encoding.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub stride: usize,
    pub vertex_count: usize,
    pub input_bytes: usize,
    pub encoded_bytes: usize,
    pub ratio: f64,
    pub stats: EncodeStats,
}

/// Encodes `records` in the primary format and collects per-channel statistics.
pub fn collect_stats(records: &Records, config: &EncoderConfig) -> Result<StatsReport> {
    let mut stats = EncodeStats::new(records.stride);
    let encoded = encode_with_stats(records, Format::V1, config, &mut stats)?;

    #[allow(clippy::cast_precision_loss)]
    let ratio = if encoded.is_empty() {
        0.0
    } else {
        records.data.len() as f64 / encoded.len() as f64
    };

    Ok(StatsReport {
        stride: records.stride,
        vertex_count: records.count,
        input_bytes: records.data.len(),
        encoded_bytes: encoded.len(),
        ratio,
        stats,
    })
}

/// Renders a report the way the encoder's trace output reads.
pub fn format_stats_pretty(report: &StatsReport) -> String {
    format!(
        "{} vertices, stride {}: {} -> {} bytes ({:.2}x)\n{}",
        report.vertex_count,
        report.stride,
        report.input_bytes,
        report.encoded_bytes,
        report.ratio,
        report.stats
    )
}
