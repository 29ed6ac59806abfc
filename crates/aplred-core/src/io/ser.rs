use std::fs::File;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array3;

use crate::error::{AplError, Result};
use crate::frame::{ColorMode, Frame, FrameMetadata, SourceInfo};

pub const SER_HEADER_SIZE: usize = 178;
pub const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";
/// Byte offset of the frame-count field, patched on finalize by the writer.
pub const SER_FRAME_COUNT_OFFSET: usize = 38;

const COLOR_ID_MONO: i32 = 0;
const COLOR_ID_RGB: i32 = 100;
const COLOR_ID_BGR: i32 = 101;

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Samples per pixel (1 for mono, 3 for RGB/BGR).
    pub fn channels(&self) -> usize {
        match self.color_id {
            COLOR_ID_RGB | COLOR_ID_BGR => 3,
            _ => 1,
        }
    }

    /// Total bytes per 8-bit frame.
    pub fn frame_byte_size(&self) -> usize {
        self.width as usize * self.height as usize * self.channels()
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.color_id {
            COLOR_ID_RGB => ColorMode::Rgb,
            COLOR_ID_BGR => ColorMode::Bgr,
            _ => ColorMode::Mono,
        }
    }
}

/// Memory-mapped SER video reader: a lazy, forward-iterable frame source.
///
/// Only 8-bit mono and packed RGB/BGR data are accepted; anything else
/// (16-bit, Bayer mosaics) is rejected at open time.
#[derive(Debug)]
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
}

impl SerReader {
    /// Open a SER file and parse its header.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        if mmap.len() < SER_HEADER_SIZE {
            return Err(AplError::InvalidSer("File too small for SER header".into()));
        }
        if &mmap[0..14] != SER_MAGIC {
            return Err(AplError::InvalidSer("Missing LUCAM-RECORDER magic".into()));
        }

        let header = parse_header(&mmap[..SER_HEADER_SIZE])?;

        if header.pixel_depth > 8 {
            return Err(AplError::UnsupportedFormat(format!(
                "{}-bit samples (only 8-bit SER is supported)",
                header.pixel_depth
            )));
        }
        if !matches!(
            header.color_id,
            COLOR_ID_MONO | COLOR_ID_RGB | COLOR_ID_BGR
        ) {
            return Err(AplError::UnsupportedColorMode(format!(
                "SER color id {}",
                header.color_id
            )));
        }

        let expected_data_size =
            SER_HEADER_SIZE + header.frame_byte_size() * header.frame_count as usize;
        if mmap.len() < expected_data_size {
            return Err(AplError::InvalidSer(format!(
                "File truncated: expected at least {} bytes, got {}",
                expected_data_size,
                mmap.len()
            )));
        }

        Ok(Self { mmap, header })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Raw bytes of a single frame (zero-copy from the mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(AplError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = SER_HEADER_SIZE + index * self.header.frame_byte_size();
        let end = offset + self.header.frame_byte_size();
        Ok(&self.mmap[offset..end])
    }

    /// Decode a single frame. BGR sources are swizzled so in-memory frames
    /// are always channel-ordered R, G, B.
    pub fn read_frame(&self, index: usize) -> Result<Frame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let channels = self.header.channels();

        let mut data = Array3::<u8>::zeros((h, w, channels));
        if channels == 1 {
            for y in 0..h {
                for x in 0..w {
                    data[[y, x, 0]] = raw[y * w + x];
                }
            }
        } else {
            let bgr = self.header.color_mode() == ColorMode::Bgr;
            for y in 0..h {
                for x in 0..w {
                    let p = (y * w + x) * 3;
                    let (r, g, b) = if bgr {
                        (raw[p + 2], raw[p + 1], raw[p])
                    } else {
                        (raw[p], raw[p + 1], raw[p + 2])
                    };
                    data[[y, x, 0]] = r;
                    data[[y, x, 1]] = g;
                    data[[y, x, 2]] = b;
                }
            }
        }

        let mut frame = Frame::new(data);
        frame.metadata = FrameMetadata {
            frame_index: index,
            timestamp_us: self.read_timestamp(index),
        };
        Ok(frame)
    }

    /// Per-frame timestamp from the optional trailer.
    fn read_timestamp(&self, index: usize) -> Option<u64> {
        let trailer_offset =
            SER_HEADER_SIZE + self.header.frame_byte_size() * self.header.frame_count as usize;
        let ts_offset = trailer_offset + index * 8;
        if ts_offset + 8 <= self.mmap.len() {
            let bytes = &self.mmap[ts_offset..ts_offset + 8];
            Some(u64::from_le_bytes(bytes.try_into().ok()?))
        } else {
            None
        }
    }

    /// All trailer timestamps, if the file carries them.
    pub fn timestamps(&self) -> Option<Vec<u64>> {
        (0..self.frame_count())
            .map(|i| self.read_timestamp(i))
            .collect()
    }

    /// Header for the output file of a run over this source. BGR inputs are
    /// written back as RGB, since frames are normalized at decode.
    pub fn output_header(&self) -> SerHeader {
        let mut header = self.header.clone();
        if header.color_id == COLOR_ID_BGR {
            header.color_id = COLOR_ID_RGB;
        }
        header
    }

    /// Build SourceInfo from the header.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo {
            filename: path.to_path_buf(),
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            bit_depth: self.header.pixel_depth as u8,
            color_mode: self.header.color_mode(),
            observer: non_empty(&self.header.observer),
            telescope: non_empty(&self.header.telescope),
            instrument: non_empty(&self.header.instrument),
        }
    }

    /// Forward-only iterator over all frames.
    pub fn frames(&self) -> impl Iterator<Item = Result<Frame>> + '_ {
        (0..self.frame_count()).map(move |i| self.read_frame(i))
    }
}

fn parse_header(buf: &[u8]) -> Result<SerHeader> {
    let mut cursor = std::io::Cursor::new(&buf[14..]); // skip magic

    let _lu_id = cursor.read_i32::<LittleEndian>()?;
    let color_id = cursor.read_i32::<LittleEndian>()?;
    let _le_flag = cursor.read_i32::<LittleEndian>()?;
    let width = cursor.read_i32::<LittleEndian>()? as u32;
    let height = cursor.read_i32::<LittleEndian>()? as u32;
    let pixel_depth = cursor.read_i32::<LittleEndian>()? as u32;
    let frame_count = cursor.read_i32::<LittleEndian>()? as u32;

    let observer = read_fixed_string(&buf[42..82]);
    let instrument = read_fixed_string(&buf[82..122]);
    let telescope = read_fixed_string(&buf[122..162]);

    let mut cursor = std::io::Cursor::new(&buf[162..]);
    let date_time = cursor.read_u64::<LittleEndian>()?;
    let date_time_utc = cursor.read_u64::<LittleEndian>()?;

    if width == 0 || height == 0 {
        return Err(AplError::InvalidDimensions { width, height });
    }

    Ok(SerHeader {
        color_id,
        width,
        height,
        pixel_depth,
        frame_count,
        observer,
        instrument,
        telescope,
        date_time,
        date_time_utc,
    })
}

fn read_fixed_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_end_matches('\0')
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
