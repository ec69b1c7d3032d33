//! Deterministic mono WAV encoding.
//!
//! Output is 16-bit PCM with a fixed 44-byte header and no metadata chunks,
//! so identical samples always produce identical files. The BLAKE3 hash of
//! the PCM payload is reported alongside the bytes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use formantic_spec::Normalization;

use crate::buffer::WaveformBuffer;
use crate::error::SynthResult;

/// Size of the canonical RIFF/WAVE header.
pub const WAV_HEADER_LEN: usize = 44;

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (always 1).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a mono 16-bit format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Writes a complete WAV file to a writer.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "PCM data exceeds 4 GiB"))?;
    let riff_size = data_size
        .checked_add(36)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "PCM data exceeds 4 GiB"))?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Writes a WAV file into a byte vector.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Brings samples into [-1, 1] according to `policy`.
///
/// `Peak` divides by the peak magnitude only when it exceeds 1.0, so quiet
/// buffers pass through untouched. `Clip` hard-limits each sample. Non-finite
/// samples become silence under both policies.
pub fn normalize(samples: &[f64], policy: Normalization) -> Vec<f64> {
    let finite = samples.iter().map(|&s| if s.is_finite() { s } else { 0.0 });
    match policy {
        Normalization::Peak => {
            let peak = finite.clone().fold(0.0_f64, |acc, s| acc.max(s.abs()));
            if peak > 1.0 {
                finite.map(|s| s / peak).collect()
            } else {
                finite.collect()
            }
        }
        Normalization::Clip => finite.map(|s| s.clamp(-1.0, 1.0)).collect(),
    }
}

/// Converts samples to little-endian 16-bit PCM.
///
/// Values are clamped to [-1, 1] and scaled by 32767.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16;
        pcm.extend_from_slice(&value.to_le_bytes());
    }
    pcm
}

/// Encodes waveform buffers under a fixed normalization policy.
#[derive(Debug, Clone, Copy)]
pub struct WavWriter {
    normalization: Normalization,
}

impl WavWriter {
    /// Creates a writer using `normalization`.
    pub fn new(normalization: Normalization) -> Self {
        Self { normalization }
    }

    /// Returns the PCM bytes for `buffer` after normalization.
    pub fn pcm(&self, buffer: &WaveformBuffer) -> Vec<u8> {
        samples_to_pcm16(&normalize(buffer.samples(), self.normalization))
    }

    /// Encodes `buffer` as a complete WAV file.
    pub fn encode(&self, buffer: &WaveformBuffer) -> SynthResult<WavResult> {
        WavResult::from_buffer(buffer, self.normalization)
    }
}

impl Default for WavWriter {
    fn default() -> Self {
        Self::new(Normalization::default())
    }
}

/// An encoded WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Normalizes and encodes a waveform buffer.
    pub fn from_buffer(buffer: &WaveformBuffer, normalization: Normalization) -> SynthResult<Self> {
        let pcm = WavWriter::new(normalization).pcm(buffer);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(buffer.sample_rate()), &pcm)?;

        Ok(Self {
            wav_data,
            pcm_hash,
            sample_rate: buffer.sample_rate(),
            num_samples: buffer.len(),
        })
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Writes the WAV bytes to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> SynthResult<()> {
        fs::write(path, &self.wav_data)?;
        Ok(())
    }
}

/// Locates the PCM payload of a WAV file.
///
/// Returns `None` if the RIFF structure is malformed or has no data chunk.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 || &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let size_bytes: [u8; 4] = wav_data[pos + 4..pos + 8].try_into().ok()?;
        let chunk_size = u32::from_le_bytes(size_bytes) as usize;
        let data_start = pos + 8;

        if chunk_id == b"data" {
            return wav_data.get(data_start..data_start.checked_add(chunk_size)?);
        }

        // chunks are word aligned
        pos = data_start.checked_add(chunk_size + chunk_size % 2)?;
    }

    None
}

/// BLAKE3 hash of a WAV file's PCM payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
