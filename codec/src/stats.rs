//! Optional per-channel encoding statistics.
//!
//! The encoder reports into a [`StatsSink`]. [`NoStats`] discards everything
//! and lets the encoder skip the extra bookkeeping; [`EncodeStats`] keeps
//! per-channel totals for inspection.

use std::fmt;

use wire::GroupWidth;

/// Receiver for encoder statistics.
pub trait StatsSink {
    /// Returns `false` if the sink ignores all records.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Selector header bytes written for one channel of one block.
    fn record_header(&mut self, channel: usize, bytes: usize);

    /// Payload bytes written for one group.
    fn record_group(&mut self, channel: usize, width: GroupWidth, bytes: usize);

    /// `values` values of one group that share the bits set in `shared_bits`
    /// with the value preceding the group.
    fn record_consistency(&mut self, channel: usize, shared_bits: u8, values: usize);

    /// Total bytes written for one channel of one block.
    fn record_channel(&mut self, channel: usize, bytes: usize);

    /// Called once after a stream is complete.
    fn record_stream(&mut self, _vertex_count: usize, _total_bytes: usize) {}
}

/// A sink that records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStats;

impl StatsSink for NoStats {
    fn is_enabled(&self) -> bool {
        false
    }

    fn record_header(&mut self, _channel: usize, _bytes: usize) {}

    fn record_group(&mut self, _channel: usize, _width: GroupWidth, _bytes: usize) {}

    fn record_consistency(&mut self, _channel: usize, _shared_bits: u8, _values: usize) {}

    fn record_channel(&mut self, _channel: usize, _bytes: usize) {}
}

/// Totals for one channel across all blocks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelStats {
    /// Bytes written for this channel, header included.
    pub size: usize,
    /// Selector header bytes.
    pub header: usize,
    /// Payload bytes per selector code.
    pub group_bytes: [usize; 4],
    /// Number of groups per selector code.
    pub group_counts: [usize; 4],
    /// Per bit, how many values kept that bit equal to the value before their group.
    pub shared_bits: [usize; 8],
}

impl ChannelStats {
    /// Header plus payload bytes as counted per group.
    #[must_use]
    pub fn counted_bytes(&self) -> usize {
        self.header + self.group_bytes.iter().sum::<usize>()
    }
}

/// Statistics collected over one encode call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodeStats {
    /// Number of vertices encoded.
    pub vertex_count: usize,
    /// Total stream size in bytes.
    pub total_size: usize,
    /// Per-channel totals, indexed by byte offset within the vertex.
    pub channels: Vec<ChannelStats>,
}

impl EncodeStats {
    /// Creates an empty collector sized for `vertex_size` channels.
    #[must_use]
    pub fn new(vertex_size: usize) -> Self {
        Self {
            vertex_count: 0,
            total_size: 0,
            channels: vec![ChannelStats::default(); vertex_size],
        }
    }

    fn channel_mut(&mut self, channel: usize) -> &mut ChannelStats {
        if self.channels.len() <= channel {
            self.channels.resize(channel + 1, ChannelStats::default());
        }
        &mut self.channels[channel]
    }

    /// Bytes of all channels, excluding the format byte and the tail.
    #[must_use]
    pub fn block_bytes(&self) -> usize {
        self.channels.iter().map(|c| c.size).sum()
    }

    /// Average encoded bits per vertex for `channel`.
    #[must_use]
    pub fn bits_per_vertex(&self, channel: usize) -> f64 {
        if self.vertex_count == 0 {
            return 0.0;
        }
        ratio(self.channels[channel].size * 8, self.vertex_count)
    }
}

impl StatsSink for EncodeStats {
    fn record_header(&mut self, channel: usize, bytes: usize) {
        self.channel_mut(channel).header += bytes;
    }

    fn record_group(&mut self, channel: usize, width: GroupWidth, bytes: usize) {
        let stats = self.channel_mut(channel);
        stats.group_bytes[width.code() as usize] += bytes;
        stats.group_counts[width.code() as usize] += 1;
    }

    fn record_consistency(&mut self, channel: usize, shared_bits: u8, values: usize) {
        let stats = self.channel_mut(channel);
        for (bit, total) in stats.shared_bits.iter_mut().enumerate() {
            if shared_bits & (1 << bit) != 0 {
                *total += values;
            }
        }
    }

    fn record_channel(&mut self, channel: usize, bytes: usize) {
        self.channel_mut(channel).size += bytes;
    }

    fn record_stream(&mut self, vertex_count: usize, total_bytes: usize) {
        self.vertex_count = vertex_count;
        self.total_size = total_bytes;
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl fmt::Display for EncodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, c) in self.channels.iter().enumerate() {
            let counted = c.counted_bytes();
            write!(
                f,
                "{k:2}: {:7} bytes [{:4.1}%] {:.1} bpv",
                c.size,
                ratio(c.size, self.total_size) * 100.0,
                self.bits_per_vertex(k)
            )?;
            write!(
                f,
                " |\thdr [{:5.1}%] bitg 1-3 [{:4.1}% {:4.1}% {:4.1}%]",
                ratio(c.header, counted) * 100.0,
                ratio(c.group_bytes[1], counted) * 100.0,
                ratio(c.group_bytes[2], counted) * 100.0,
                ratio(c.group_bytes[3], counted) * 100.0
            )?;
            write!(f, " |\tbitc [")?;
            for (bit, shared) in c.shared_bits.iter().enumerate() {
                if bit > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:3.0}%", ratio(*shared, self.vertex_count) * 100.0)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_stats_is_disabled() {
        assert!(!NoStats.is_enabled());
        assert!(EncodeStats::default().is_enabled());
    }

    #[test]
    fn groups_accumulate_per_code() {
        let mut stats = EncodeStats::new(4);
        stats.record_group(2, GroupWidth::Bits4, 9);
        stats.record_group(2, GroupWidth::Bits4, 8);
        stats.record_group(2, GroupWidth::Bits1, 0);
        stats.record_header(2, 1);
        let channel = &stats.channels[2];
        assert_eq!(channel.group_bytes, [0, 0, 17, 0]);
        assert_eq!(channel.group_counts, [1, 0, 2, 0]);
        assert_eq!(channel.counted_bytes(), 18);
    }

    #[test]
    fn consistency_counts_set_bits() {
        let mut stats = EncodeStats::new(1);
        stats.record_consistency(0, 0b1000_0001, 16);
        stats.record_consistency(0, 0b1000_0000, 4);
        assert_eq!(stats.channels[0].shared_bits, [16, 0, 0, 0, 0, 0, 0, 20]);
    }

    #[test]
    fn channels_grow_on_demand() {
        let mut stats = EncodeStats::default();
        stats.record_channel(5, 10);
        assert_eq!(stats.channels.len(), 6);
        assert_eq!(stats.block_bytes(), 10);
    }

    #[test]
    fn bits_per_vertex() {
        let mut stats = EncodeStats::new(1);
        stats.record_channel(0, 32);
        stats.record_stream(64, 100);
        assert!((stats.bits_per_vertex(0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn display_one_line_per_channel() {
        let mut stats = EncodeStats::new(3);
        stats.record_stream(16, 100);
        let text = stats.to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("bpv"));
        assert!(text.contains("bitc"));
    }
}
