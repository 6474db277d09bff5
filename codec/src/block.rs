//! Vertex block encoding.
//!
//! A block is up to [`BLOCK_MAX_VERTICES`] consecutive vertices. Each byte
//! offset (channel) is delta-coded against the previous vertex, zigzagged, and
//! written as a group sequence; channels are written in ascending order.

use bytestream::{ByteReader, ByteWriter};
use wire::{padded_group_len, BLOCK_MAX_VERTICES, BYTE_GROUP_SIZE, MAX_VERTEX_SIZE};

use crate::bytes::{decode_bytes, encode_bytes};
use crate::error::{CodecError, CodecResult};
use crate::group::ByteGroup;
use crate::stats::StatsSink;
use crate::zigzag::{unzigzag8, zigzag8};

const BLOCK_GROUPS: usize = BLOCK_MAX_VERTICES / BYTE_GROUP_SIZE;

/// The vertex every channel is predicted from.
///
/// Starts as the first vertex of the stream and becomes the last vertex of
/// each block once the whole block has been coded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predictor {
    bytes: [u8; MAX_VERTEX_SIZE],
    vertex_size: usize,
}

impl Predictor {
    /// Creates a predictor seeded with `vertex`.
    pub fn new(vertex: &[u8]) -> CodecResult<Self> {
        if vertex.is_empty() || vertex.len() > MAX_VERTEX_SIZE {
            return Err(CodecError::InvalidVertexSize {
                vertex_size: vertex.len(),
            });
        }
        let mut bytes = [0u8; MAX_VERTEX_SIZE];
        bytes[..vertex.len()].copy_from_slice(vertex);
        Ok(Self {
            bytes,
            vertex_size: vertex.len(),
        })
    }

    /// Returns the vertex size this predictor was created for.
    #[must_use]
    pub const fn vertex_size(&self) -> usize {
        self.vertex_size
    }

    /// Returns the current reference vertex.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.vertex_size]
    }

    fn advance(&mut self, vertex: &[u8]) {
        self.bytes[..self.vertex_size].copy_from_slice(vertex);
    }
}

fn block_vertex_count(len: usize, vertex_size: usize) -> CodecResult<usize> {
    let vertex_count = len / vertex_size;
    if vertex_count == 0 || vertex_count > BLOCK_MAX_VERTICES {
        return Err(CodecError::InvalidBlockLength {
            vertex_count,
            max: BLOCK_MAX_VERTICES,
        });
    }
    if len % vertex_size != 0 {
        return Err(CodecError::SourceTooSmall {
            needed: (vertex_count + 1) * vertex_size,
            available: len,
        });
    }
    Ok(vertex_count)
}

/// Encodes one block of vertices and advances `predictor` to its last vertex.
///
/// `block` holds `1..=256` whole vertices of `predictor.vertex_size()` bytes.
/// Any channel failure fails the block.
pub fn encode_vertex_block<S>(
    block: &[u8],
    predictor: &mut Predictor,
    writer: &mut ByteWriter<'_>,
    stats: &mut S,
) -> CodecResult<()>
where
    S: StatsSink + ?Sized,
{
    let vertex_size = predictor.vertex_size();
    let vertex_count = block_vertex_count(block.len(), vertex_size)?;
    let group_count = padded_group_len(vertex_count) / BYTE_GROUP_SIZE;

    // Entries past vertex_count stay zero for every channel.
    let mut groups: [ByteGroup; BLOCK_GROUPS] = [[0; BYTE_GROUP_SIZE]; BLOCK_GROUPS];

    for k in 0..vertex_size {
        let start = writer.position();

        let mut p = predictor.bytes[k];
        for (i, vertex) in block.chunks_exact(vertex_size).enumerate() {
            groups[i / BYTE_GROUP_SIZE][i % BYTE_GROUP_SIZE] = zigzag8(vertex[k].wrapping_sub(p));
            p = vertex[k];
        }

        if stats.is_enabled() {
            record_consistency(block, k, predictor, stats);
        }

        encode_bytes(&groups[..group_count], k, writer, stats)?;

        stats.record_channel(k, writer.position() - start);
    }

    predictor.advance(&block[block.len() - vertex_size..]);
    Ok(())
}

fn record_consistency<S>(block: &[u8], k: usize, predictor: &Predictor, stats: &mut S)
where
    S: StatsSink + ?Sized,
{
    let vertex_size = predictor.vertex_size();
    let vertex_count = block.len() / vertex_size;

    for ig in (0..vertex_count).step_by(BYTE_GROUP_SIZE) {
        let last = if ig == 0 {
            predictor.bytes[k]
        } else {
            block[vertex_size * (ig - 1) + k]
        };
        let end = (ig + BYTE_GROUP_SIZE).min(vertex_count);
        let shared = (ig..end).fold(0xFFu8, |acc, i| acc & !(block[vertex_size * i + k] ^ last));
        stats.record_consistency(k, shared, end - ig);
    }
}

/// Decodes one block into `block` and advances `predictor` to its last vertex.
pub fn decode_vertex_block(
    reader: &mut ByteReader<'_>,
    block: &mut [u8],
    predictor: &mut Predictor,
) -> CodecResult<()> {
    let vertex_size = predictor.vertex_size();
    let vertex_count = block_vertex_count(block.len(), vertex_size)?;
    let group_count = padded_group_len(vertex_count) / BYTE_GROUP_SIZE;

    let mut groups: [ByteGroup; BLOCK_GROUPS] = [[0; BYTE_GROUP_SIZE]; BLOCK_GROUPS];

    for k in 0..vertex_size {
        decode_bytes(reader, &mut groups[..group_count])?;

        let mut p = predictor.bytes[k];
        for (i, vertex) in block.chunks_exact_mut(vertex_size).enumerate() {
            p = p.wrapping_add(unzigzag8(groups[i / BYTE_GROUP_SIZE][i % BYTE_GROUP_SIZE]));
            vertex[k] = p;
        }
    }

    predictor.advance(&block[block.len() - vertex_size..]);
    Ok(())
}
