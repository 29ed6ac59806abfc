use std::path::Path;

use image::{GrayImage, Rgb, RgbImage};

use crate::error::Result;
use crate::frame::Frame;

/// Save a single frame as a PNG (or any format `image` infers from the
/// extension). Used for before/after previews.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let (h, w, c) = frame.data.dim();
    if c == 3 {
        let mut img = RgbImage::new(w as u32, h as u32);
        for y in 0..h {
            for x in 0..w {
                img.put_pixel(
                    x as u32,
                    y as u32,
                    Rgb([
                        frame.data[[y, x, 0]],
                        frame.data[[y, x, 1]],
                        frame.data[[y, x, 2]],
                    ]),
                );
            }
        }
        img.save(path)?;
    } else {
        let mut img = GrayImage::new(w as u32, h as u32);
        for y in 0..h {
            for x in 0..w {
                img.put_pixel(x as u32, y as u32, image::Luma([frame.data[[y, x, 0]]]));
            }
        }
        img.save(path)?;
    }
    Ok(())
}
