//! Host bus layout negotiation.
//!
//! The signal path runs on mono or stereo buses with matching input and
//! output channel sets. Hosts query [`ChannelLayout::is_supported`] before
//! activating the processor; `process` assumes only approved layouts reach it.

/// Supported main-bus channel sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// One channel.
    Mono,
    /// Two channels (left, right).
    Stereo,
}

impl ChannelLayout {
    /// Map a channel count onto a supported layout.
    pub fn from_channel_count(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Mono),
            2 => Some(Self::Stereo),
            _ => None,
        }
    }

    /// Number of channels in this layout.
    pub const fn channel_count(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    /// Whether a host bus configuration is accepted.
    ///
    /// The output must be mono or stereo and the input must match it.
    ///
    /// ```rust
    /// use softclip_core::ChannelLayout;
    ///
    /// assert!(ChannelLayout::is_supported(2, 2));
    /// assert!(ChannelLayout::is_supported(1, 1));
    /// assert!(!ChannelLayout::is_supported(1, 2));
    /// assert!(!ChannelLayout::is_supported(6, 6));
    /// ```
    pub fn is_supported(input_channels: usize, output_channels: usize) -> bool {
        Self::from_channel_count(output_channels).is_some() && input_channels == output_channels
    }
}
