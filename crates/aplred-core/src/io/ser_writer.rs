use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::Result;
use crate::frame::Frame;
use crate::io::ser::{SerHeader, SER_FRAME_COUNT_OFFSET, SER_HEADER_SIZE, SER_MAGIC};

/// Writes a valid 8-bit SER file: the frame sink of the pipeline.
///
/// Frames must be written in emission order. On finalize the header's frame
/// count is patched to the number actually written, so a cancelled run still
/// produces a well-formed file.
pub struct SerWriter {
    writer: BufWriter<File>,
    header: SerHeader,
    frames_written: u32,
}

impl SerWriter {
    /// Create a new SER file and write the header.
    pub fn create(path: &Path, header: &SerHeader) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&encode_header(header))?;
        Ok(Self {
            writer,
            header: header.clone(),
            frames_written: 0,
        })
    }

    /// Write one frame. Dimensions and channel count must match the header.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let (h, w, c) = frame.data.dim();
        debug_assert_eq!(h, self.header.height as usize);
        debug_assert_eq!(w, self.header.width as usize);
        debug_assert_eq!(c, self.header.channels());

        let mut buf = Vec::with_capacity(h * w * c);
        for y in 0..h {
            for x in 0..w {
                for ch in 0..c {
                    buf.push(frame.data[[y, x, ch]]);
                }
            }
        }
        self.writer.write_all(&buf)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Write the optional timestamp trailer (one u64 per frame, little-endian).
    pub fn write_timestamps(&mut self, timestamps: &[u64]) -> Result<()> {
        for &ts in timestamps {
            self.writer.write_all(&ts.to_le_bytes())?;
        }
        Ok(())
    }

    pub fn frames_written(&self) -> u32 {
        self.frames_written
    }

    /// Flush, patch the header frame count, and close the file.
    pub fn finalize(mut self) -> Result<()> {
        self.writer.flush()?;
        let mut file = self.writer.into_inner().map_err(|e| e.into_error())?;
        file.seek(SeekFrom::Start(SER_FRAME_COUNT_OFFSET as u64))?;
        file.write_all(&(self.frames_written as i32).to_le_bytes())?;
        file.flush()?;
        Ok(())
    }
}

fn encode_header(header: &SerHeader) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);
    buf.extend_from_slice(SER_MAGIC);
    buf.extend_from_slice(&0i32.to_le_bytes()); // LuID
    buf.extend_from_slice(&header.color_id.to_le_bytes());
    buf.extend_from_slice(&0i32.to_le_bytes()); // LittleEndian flag (Siril convention)
    buf.extend_from_slice(&(header.width as i32).to_le_bytes());
    buf.extend_from_slice(&(header.height as i32).to_le_bytes());
    buf.extend_from_slice(&(header.pixel_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(header.frame_count as i32).to_le_bytes());
    push_fixed_string(&mut buf, &header.observer, 40);
    push_fixed_string(&mut buf, &header.instrument, 40);
    push_fixed_string(&mut buf, &header.telescope, 40);
    buf.extend_from_slice(&header.date_time.to_le_bytes());
    buf.extend_from_slice(&header.date_time_utc.to_le_bytes());
    debug_assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

fn push_fixed_string(buf: &mut Vec<u8>, s: &str, len: usize) {
    let bytes = s.as_bytes();
    let to_write = bytes.len().min(len);
    buf.extend_from_slice(&bytes[..to_write]);
    buf.resize(buf.len() + (len - to_write), 0);
}
