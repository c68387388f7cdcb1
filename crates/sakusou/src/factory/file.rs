//! Random fixture files: zeroed binaries, ASCII text, noise images and videos
//!
//! Every function creates missing parent directories, overwrites an existing
//! file and returns the absolute path written.

use super::string::alphanumeric_symbol;
use crate::error::{Error, Result};
use image::codecs::gif::GifEncoder;
use image::{Delay, DynamicImage, Frame, GrayImage, ImageFormat, Luma};
use rand::Rng;
use sakusou_core::CoreError;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default path of [`make_binary_file`]
pub const DEFAULT_BINARY_OUTPUT: &str = "output.bin";
/// Default path of [`make_ascii_file`]
pub const DEFAULT_ASCII_OUTPUT: &str = "output.txt";
/// Default path of [`make_image_file`]
pub const DEFAULT_IMAGE_OUTPUT: &str = "output.png";
/// Default path of [`make_video_file`]
pub const DEFAULT_VIDEO_OUTPUT: &str = "output.gif";

/// Video frame rate
pub const VIDEO_FPS: u32 = 20;

/// Upper bound (exclusive) of noise pixel intensity
const NOISE_CEILING: u8 = 128;

fn prepare_output(path: &Path) -> Result<PathBuf> {
    let path = std::path::absolute(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CoreError::io(parent, e))?;
    }
    Ok(path)
}

/// Write `size` zero bytes to `path`.
pub fn make_binary_file(size: usize, path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = prepare_output(path.as_ref())?;
    fs::write(&path, vec![0u8; size]).map_err(|e| CoreError::io(&path, e))?;
    debug!(path = %path.display(), size, "Wrote binary fixture");
    Ok(path)
}

/// Write `size` random printable ASCII characters (letters, digits,
/// punctuation) to `path`.
pub fn make_ascii_file<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = prepare_output(path.as_ref())?;
    fs::write(&path, alphanumeric_symbol(rng, size))
        .map_err(|e| CoreError::io(&path, e))?;
    debug!(path = %path.display(), size, "Wrote ASCII fixture");
    Ok(path)
}

fn noise_image<R: Rng + ?Sized>(rng: &mut R, (height, width): (u32, u32)) -> GrayImage {
    GrayImage::from_fn(width, height, |_, _| {
        Luma([rng.gen_range(0..NOISE_CEILING)])
    })
}

/// Write a `(height, width)` grayscale noise image to `path`.
///
/// The encoding follows the file extension (`.png` or `.gif`).
///
/// # Errors
///
/// Returns [`Error::Image`] for an unknown extension or encoding failure.
pub fn make_image_file<R: Rng + ?Sized>(
    rng: &mut R,
    size: (u32, u32),
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let path = prepare_output(path.as_ref())?;
    let image = noise_image(rng, size);

    match ImageFormat::from_path(&path)? {
        ImageFormat::Png => image.save_with_format(&path, ImageFormat::Png)?,
        format => DynamicImage::ImageLuma8(image)
            .into_rgba8()
            .save_with_format(&path, format)?,
    }

    debug!(path = %path.display(), height = size.0, width = size.1, "Wrote image fixture");
    Ok(path)
}

/// Write a `(height, width, frames)` noise video to `path` as an animated
/// GIF at [`VIDEO_FPS`].
///
/// Frames are first rendered as PNG files into a temporary `images*`
/// directory beside `path`; each is deleted once encoded and the directory
/// is removed afterwards.
///
/// # Errors
///
/// Fails for a path not ending in `.gif`, for a video without frames, or on
/// any I/O or encoding error.
pub fn make_video_file<R: Rng + ?Sized>(
    rng: &mut R,
    (height, width, frames): (u32, u32, u32),
    path: impl AsRef<Path>,
) -> Result<PathBuf> {
    let is_gif = path
        .as_ref()
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if !is_gif {
        return Err(Error::Other(anyhow::anyhow!(
            "videos are written as animated GIF, expected a .gif path: {}",
            path.as_ref().display()
        )));
    }
    if frames == 0 {
        return Err(Error::Other(anyhow::anyhow!(
            "a video needs at least one frame"
        )));
    }

    let path = prepare_output(path.as_ref())?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let image_directory = tempfile::Builder::new()
        .prefix("images")
        .tempdir_in(parent)?;

    let frame_files = (0..frames)
        .map(|index| {
            let frame_path = image_directory.path().join(format!("{:08}.png", index));
            make_image_file(rng, (height, width), frame_path)
        })
        .collect::<Result<Vec<_>>>()?;

    let output = fs::File::create(&path).map_err(|e| CoreError::io(&path, e))?;
    let mut encoder = GifEncoder::new(BufWriter::new(output));
    let delay = Delay::from_numer_denom_ms(1000, VIDEO_FPS);

    for frame_path in &frame_files {
        let pixels = image::open(frame_path)?.into_rgba8();
        encoder.encode_frame(Frame::from_parts(pixels, 0, 0, delay))?;
        fs::remove_file(frame_path).map_err(|e| CoreError::io(frame_path, e))?;
    }
    drop(encoder);
    image_directory.close()?;

    debug!(path = %path.display(), height, width, frames, "Wrote video fixture");
    Ok(path)
}
