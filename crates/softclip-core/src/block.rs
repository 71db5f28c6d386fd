//! Caller-owned audio buffers at the host callback boundary.
//!
//! An [`AudioBlock`] borrows one mutable slice per channel for the duration
//! of a single `process` call. The processor writes results back in place
//! and keeps no reference once the call returns.

/// Planar channel × sample view over host buffers.
///
/// Channels at index `>= input_channels` have no corresponding input bus
/// channel; their contents are undefined on entry and they are cleared to
/// silence before processing.
///
/// ```rust
/// use softclip_core::AudioBlock;
///
/// let mut left = [0.1f32, 0.2, 0.3];
/// let mut right = [0.0f32; 3];
/// let mut channels = [&mut left[..], &mut right[..]];
/// let block = AudioBlock::new(&mut channels);
/// assert_eq!(block.num_channels(), 2);
/// assert_eq!(block.num_samples(), 3);
/// ```
pub struct AudioBlock<'a, 'b> {
    channels: &'a mut [&'b mut [f32]],
    input_channels: usize,
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    /// Wrap per-channel buffers; every channel carries input.
    pub fn new(channels: &'a mut [&'b mut [f32]]) -> Self {
        let input_channels = channels.len();
        Self {
            channels,
            input_channels,
        }
    }

    /// Declare how many leading channels carry input.
    ///
    /// Values above the channel count are capped.
    pub fn with_input_channels(mut self, input_channels: usize) -> Self {
        self.input_channels = input_channels.min(self.channels.len());
        self
    }

    /// Number of channels in the block.
    #[inline]
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of leading channels that carry input.
    #[inline]
    pub fn num_input_channels(&self) -> usize {
        self.input_channels
    }

    /// Samples per channel (the shortest channel when lengths differ).
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.channels.iter().map(|c| c.len()).min().unwrap_or(0)
    }

    /// Whether the block holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_samples() == 0
    }

    /// Read-only access to one channel.
    #[inline]
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|c| &**c)
    }

    /// Mutable access to one channel.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(|c| &mut **c)
    }

    /// Iterate mutably over all channels.
    #[inline]
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(|c| &mut **c)
    }

    /// Zero every channel.
    pub fn clear(&mut self) {
        for channel in self.channels.iter_mut() {
            channel.fill(0.0);
        }
    }

    /// Zero the channels that have no input counterpart.
    pub fn clear_unused_outputs(&mut self) {
        for channel in self.channels.iter_mut().skip(self.input_channels) {
            channel.fill(0.0);
        }
    }
}

/// A short MIDI message delivered with an audio block.
///
/// Accepted at the host boundary and ignored by the signal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    /// Sample offset within the block.
    pub offset: u32,
    /// Raw status and data bytes.
    pub data: [u8; 3],
}
