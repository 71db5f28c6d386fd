//! WAV file reading and writing.
//!
//! Samples are kept planar: one `Vec<f32>` per channel, the layout the
//! signal processor works on.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// One buffer per channel, all the same length.
pub type PlanarSamples = Vec<Vec<f32>>;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16 or 24 (PCM) or 32 (float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

fn check_bit_depth(bits: u16) -> Result<()> {
    match bits {
        16 | 24 | 32 => Ok(()),
        other => Err(Error::UnsupportedBitDepth(other)),
    }
}

/// Read a WAV file into planar channels along with its spec.
///
/// Integer PCM is scaled to \[-1, 1).
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(PlanarSamples, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let format = reader.spec().sample_format;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels);

    let interleaved: Vec<f32> = match format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            check_bit_depth(spec.bits_per_sample)?;
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels.max(1);
    let mut planar: PlanarSamples = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels.max(1)) {
        for (buf, &sample) in planar.iter_mut().zip(frame) {
            buf.push(sample);
        }
    }

    tracing::debug!(
        path = %path.display(),
        channels,
        frames,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        "read wav"
    );
    Ok((planar, spec))
}

/// Write planar channels to a WAV file.
///
/// `spec.channels` must equal the number of buffers and every buffer must
/// have the same length. Integer formats clip to full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    check_bit_depth(spec.bits_per_sample)?;
    if channels.len() != usize::from(spec.channels) {
        return Err(Error::ChannelMismatch {
            expected: usize::from(spec.channels),
            got: channels.len(),
        });
    }
    let frames = frame_count(channels)?;

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    if spec.bits_per_sample == 32 {
        for i in 0..frames {
            for channel in channels {
                writer.write_sample(channel[i])?;
            }
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for i in 0..frames {
            for channel in channels {
                let int_sample = (channel[i] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }
    writer.finalize()?;

    tracing::debug!(path = %path.display(), frames, "wrote wav");
    Ok(())
}

/// Length shared by every buffer.
pub(crate) fn frame_count(channels: &[Vec<f32>]) -> Result<usize> {
    let expected = channels.first().map_or(0, Vec::len);
    for (channel, buf) in channels.iter().enumerate().skip(1) {
        if buf.len() != expected {
            return Err(Error::RaggedChannels {
                channel,
                expected,
                got: buf.len(),
            });
        }
    }
    Ok(expected)
}
