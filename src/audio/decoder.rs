// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, Packet};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};
use tracing::debug;

use super::error::DecodeError;
use super::{AudioDecoder, DecodedAudio};

/// Decodes audio files (WAV, FLAC, MP3, etc.) with symphonia.
/// Only the first channel is kept and no resampling is done.
#[derive(Debug, Default, Clone, Copy)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> SymphoniaDecoder {
        SymphoniaDecoder
    }

    /// Helper function to read the next packet with common error handling.
    /// Returns:
    /// - `Ok(Some(packet))` if a packet was successfully read
    /// - `Ok(None)` if EOF was reached (UnexpectedEof or DecodeError)
    /// - `Err(...)` for anything else, including ResetRequired
    fn read_next_packet(
        format_reader: &mut dyn FormatReader,
    ) -> Result<Option<Packet>, DecodeError> {
        match format_reader.next_packet() {
            Ok(packet) => Ok(Some(packet)),
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Ok(None)
            }
            // Some decoders return DecodeError at EOF instead of IoError
            Err(SymphoniaError::DecodeError(_)) => Ok(None),
            Err(e) => Err(DecodeError::AudioError(e)),
        }
    }

    /// Reads every packet of the given track and appends its first channel to `samples`.
    fn decode_track(
        format_reader: &mut dyn FormatReader,
        decoder: &mut dyn Decoder,
        track_id: u32,
        samples: &mut Vec<f32>,
    ) -> Result<(), DecodeError> {
        loop {
            let packet = match Self::read_next_packet(format_reader) {
                Ok(Some(packet)) => packet,
                Ok(None) => return Ok(()),
                Err(DecodeError::AudioError(SymphoniaError::ResetRequired)) => {
                    decoder.reset();
                    continue;
                }
                Err(e) => return Err(e),
            };
            if packet.track_id() != track_id {
                continue;
            }
            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    decoder.decode(&packet)?
                }
                Err(e) => return Err(DecodeError::AudioError(e)),
            };
            Self::append_first_channel(decoded, samples);
        }
    }

    /// Converts a decoded buffer to f32 and appends its first channel.
    ///
    /// Integer formats are scaled by symphonia's sample conversions, so a full
    /// scale signed sample maps to -1.0 and unsigned samples are re-centred.
    fn append_first_channel(decoded: AudioBufferRef, samples: &mut Vec<f32>) {
        let frames = decoded.frames();
        if frames == 0 || decoded.spec().channels.count() == 0 {
            return;
        }
        let mut planar = SampleBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
        planar.copy_planar_ref(decoded);
        // Planar layout puts the whole first channel up front.
        samples.extend_from_slice(&planar.samples()[..frames]);
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedAudio, DecodeError> {
        // Include the path in the error so the caller sees which file failed.
        let file = File::open(path).map_err(|e| {
            DecodeError::IoError(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(extension);
        }

        let file_path = path.to_string_lossy().to_string();
        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();
        let probed = get_probe()
            .format(&hint, mss, &fmt_opts, &meta_opts)
            .map_err(|e| DecodeError::Unsupported(format!("'{}': {}", file_path, e)))?;
        let mut format_reader = probed.format;

        let track = format_reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| DecodeError::NoAudioTrack(file_path.clone()))?;
        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| DecodeError::MissingSampleRate(file_path.clone()))?;
        let capacity = track.codec_params.n_frames.unwrap_or(0) as usize;

        let decoder_opts: DecoderOptions = Default::default();
        let mut decoder = get_codecs()
            .make(&track.codec_params, &decoder_opts)
            .map_err(|e| DecodeError::Unsupported(format!("'{}': {}", file_path, e)))?;

        let mut samples = Vec::with_capacity(capacity);
        Self::decode_track(
            format_reader.as_mut(),
            decoder.as_mut(),
            track_id,
            &mut samples,
        )?;

        debug!(
            path = file_path,
            frames = samples.len(),
            sample_rate,
            "Decoded audio file"
        );

        Ok(DecodedAudio {
            samples,
            sample_rate,
        })
    }
}
