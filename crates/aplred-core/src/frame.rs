use ndarray::Array3;
use std::path::PathBuf;

/// A single video frame.
/// Samples are 8-bit, row-major, shape = (height, width, channels).
/// Channels is 1 (luma) or 3 (RGB); BGR sources are swizzled at decode.
#[derive(Clone, Debug)]
pub struct Frame {
    pub data: Array3<u8>,
    /// Optional per-frame metadata
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array3<u8>) -> Self {
        Self {
            data,
            metadata: FrameMetadata::default(),
        }
    }

    /// New frame with the same metadata but different pixel data.
    pub fn with_data(&self, data: Array3<u8>) -> Self {
        Self {
            data,
            metadata: self.metadata.clone(),
        }
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    pub frame_index: usize,
    pub timestamp_us: Option<u64>,
}

/// Color mode of the source data. Only 8-bit mono and packed RGB/BGR are
/// supported; frames are held as RGB internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColorMode {
    Mono,
    Rgb,
    Bgr,
}

/// Metadata about the source file.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_mode: ColorMode,
    pub observer: Option<String>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
}
