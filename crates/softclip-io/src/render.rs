//! Offline rendering through the block-based processor.

use softclip_core::{AudioBlock, SignalProcessor};

use crate::wav::frame_count;
use crate::{Error, Result};

/// Process planar buffers in place, `block_size` frames at a time.
///
/// The processor must already be prepared for at least `buffers.len()`
/// channels and `block_size` frames; its errors are returned unchanged.
/// The last block may be shorter.
pub fn render(
    processor: &mut SignalProcessor,
    buffers: &mut [Vec<f32>],
    block_size: usize,
) -> Result<()> {
    render_with_progress(processor, buffers, block_size, |_| {})
}

/// Like [`render`], calling `on_block` with the frames done after each block.
pub fn render_with_progress<F>(
    processor: &mut SignalProcessor,
    buffers: &mut [Vec<f32>],
    block_size: usize,
    mut on_block: F,
) -> Result<()>
where
    F: FnMut(usize),
{
    if block_size == 0 {
        return Err(Error::InvalidBlockSize);
    }
    let frames = frame_count(buffers)?;
    tracing::debug!(frames, channels = buffers.len(), block_size, "render");

    let mut start = 0;
    while start < frames {
        let end = (start + block_size).min(frames);
        let mut slices: Vec<&mut [f32]> = buffers.iter_mut().map(|b| &mut b[start..end]).collect();
        processor.process(&mut AudioBlock::new(&mut slices))?;
        start = end;
        on_block(start);
    }
    Ok(())
}
