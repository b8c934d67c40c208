use std::io::{Read, Seek};

use hound::{WavReader, WavSpec};

use crate::error::{Error, Result};

/// Sample rate expected by whisper.cpp.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Load WAV audio from a reader and return normalized audio samples.
///
/// What we return:
/// - A `Vec<f32>` containing mono audio samples normalized to `[-1.0, 1.0]`
/// - The associated `WavSpec` so callers still have access to metadata
///
/// Format requirements:
/// - Mono (1 channel)
/// - 16 kHz sample rate (whisper.cpp's expected input)
///
/// Anything else fails with [`Error::InvalidAudio`]; converting other media
/// to this shape is the uploader's job, not ours.
pub fn read_samples<R>(reader: R) -> Result<(Vec<f32>, WavSpec)>
where
    R: Read + Seek,
{
    let mut reader = WavReader::new(reader)
        .map_err(|err| Error::InvalidAudio(format!("failed to read WAV data: {err}")))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(Error::InvalidAudio(format!(
            "expected mono WAV (1 channel), got {} channels",
            spec.channels
        )));
    }

    if spec.sample_rate != TARGET_SAMPLE_RATE {
        return Err(Error::InvalidAudio(format!(
            "expected {TARGET_SAMPLE_RATE} Hz sample rate, got {} Hz",
            spec.sample_rate
        )));
    }

    // Read samples and normalize from i16 PCM to f32 in [-1.0, 1.0].
    let mut samples = Vec::new();
    for sample in reader.samples::<i16>() {
        let pcm =
            sample.map_err(|err| Error::InvalidAudio(format!("failed to decode sample: {err}")))?;
        samples.push(pcm as f32 / i16::MAX as f32);
    }

    Ok((samples, spec))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn wav_bytes(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn reads_and_normalizes_mono_16k() -> Result<()> {
        let bytes = wav_bytes(TARGET_SAMPLE_RATE, 1, &[0, i16::MAX, -i16::MAX]);
        let (samples, spec) = read_samples(Cursor::new(bytes))?;

        assert_eq!(spec.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], 1.0);
        assert_eq!(samples[2], -1.0);
        Ok(())
    }

    #[test]
    fn rejects_stereo() {
        let bytes = wav_bytes(TARGET_SAMPLE_RATE, 2, &[0, 0]);
        let err = read_samples(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, Error::InvalidAudio(_)));
        assert!(err.to_string().contains("2 channels"));
    }

    #[test]
    fn rejects_wrong_sample_rate() {
        let bytes = wav_bytes(44_100, 1, &[0]);
        let err = read_samples(Cursor::new(bytes)).unwrap_err();
        assert!(err.to_string().contains("44100 Hz"));
    }

    #[test]
    fn rejects_non_wav_bytes() {
        let err = read_samples(Cursor::new(b"not a wav".to_vec())).unwrap_err();
        assert!(matches!(err, Error::InvalidAudio(_)));
    }
}
