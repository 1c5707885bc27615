//! WAV decoding for lecture recordings.
//!
//! Decodes a WAV file into the 16kHz mono i16 sample stream Whisper expects.
//! Arbitrary input sample rates and channel counts are accepted; stereo is
//! downmixed and other rates are resampled with linear interpolation.

use crate::defaults::SAMPLE_RATE;
use crate::error::{LecternError, Result};
use std::io::Read;
use std::path::Path;

/// Load a WAV file from disk and decode it to 16kHz mono samples.
pub fn load_wav(path: &Path) -> Result<Vec<i16>> {
    if !path.exists() {
        return Err(LecternError::AudioFileNotFound {
            path: path.to_string_lossy().to_string(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| LecternError::AudioDecode {
        message: format!("Failed to open {}: {}", path.display(), e),
    })?;

    decode_wav(std::io::BufReader::new(file))
}

/// Decode WAV data from any reader to 16kHz mono samples.
pub fn decode_wav(reader: impl Read) -> Result<Vec<i16>> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| LecternError::AudioDecode {
        message: format!("Failed to parse WAV file: {}", e),
    })?;

    let spec = wav_reader.spec();
    let source_rate = spec.sample_rate;
    let source_channels = spec.channels;

    let raw_samples: Vec<i16> = wav_reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| LecternError::AudioDecode {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

    // Convert to mono if stereo
    let mono_samples = if source_channels == 2 {
        raw_samples
            .chunks_exact(2)
            .map(|chunk| {
                let left = chunk[0] as i32;
                let right = chunk[1] as i32;
                ((left + right) / 2) as i16
            })
            .collect()
    } else {
        raw_samples
    };

    // Resample to 16kHz if needed
    let samples = if source_rate != SAMPLE_RATE {
        resample(&mono_samples, source_rate, SAMPLE_RATE)
    } else {
        mono_samples
    };

    Ok(samples)
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx.min(samples.len() - 1)]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
