use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channels {
    Red,
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(&self) -> usize {
        match self {
            Channels::Red => 1,
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Decoded 8-bit image, rows top to bottom.
#[derive(Clone, Debug)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub pixels: Vec<u8>,
}

impl ImageData {
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels.count()
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Could not open {path:?}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid PNG data: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("Could not write PNG: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("Unsupported pixel layout {0:?}")]
    Unsupported(png::ColorType),
    #[error("Pixel buffer of {len} bytes does not match {width}x{height}")]
    InvalidLength { len: usize, width: u32, height: u32 },
}

pub fn load_png<P: AsRef<Path>>(path: P) -> Result<ImageData, ImageError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImageError::Input {
        path: path.to_owned(),
        source,
    })?;

    decode_png(BufReader::new(file))
}

pub fn decode_png<R: Read>(reader: R) -> Result<ImageData, ImageError> {
    let mut decoder = png::Decoder::new(reader);
    // palette and sub-byte depths come out as plain 8-bit samples
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let channels = match info.color_type {
        png::ColorType::Grayscale => Channels::Red,
        png::ColorType::Rgb => Channels::Rgb,
        png::ColorType::Rgba => Channels::Rgba,
        other => return Err(ImageError::Unsupported(other)),
    };

    // rows may carry padding when the line size differs from the tight width
    let row_len = info.width as usize * channels.count();
    let pixels = if info.line_size == row_len {
        buf
    } else {
        buf.chunks(info.line_size)
            .flat_map(|row| row[..row_len].iter().copied())
            .collect()
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        channels,
        pixels,
    })
}

/// Writes tightly packed RGBA rows.
pub fn encode_png<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> Result<(), ImageError> {
    if rgba.len() != width as usize * height as usize * 4 {
        return Err(ImageError::InvalidLength {
            len: rgba.len(),
            width,
            height,
        });
    }

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;

    Ok(())
}

/// Swaps row order in place; GL reads pixels bottom to top.
pub fn flip_rows(pixels: &mut [u8], row_len: usize) {
    if row_len == 0 {
        return;
    }

    let rows = pixels.len() / row_len;

    for i in 0..rows / 2 {
        let (top, bottom) = pixels.split_at_mut((rows - 1 - i) * row_len);
        top[i * row_len..(i + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}

/// Six cube map faces in GL order: +X, -X, +Y, -Y, +Z, -Z.
#[derive(Clone, Debug)]
pub struct CubeFaces {
    pub paths: [PathBuf; 6],
}

impl CubeFaces {
    pub const NAMES: [&'static str; 6] = ["right", "left", "top", "bottom", "front", "back"];

    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();

        Self {
            paths: Self::NAMES.map(|name| dir.join(format!("{name}.png"))),
        }
    }

    pub fn load(&self) -> Result<Vec<ImageData>, ImageError> {
        self.paths.iter().map(load_png).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn decodes_rgb() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
        let bytes = encode(2, 2, png::ColorType::Rgb, &data);

        let image = decode_png(bytes.as_slice()).unwrap();

        assert_eq!(image.channels, Channels::Rgb);
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixels, data);
        assert_eq!(image.row_len(), 6);
    }

    #[test]
    fn decodes_grayscale_as_red() {
        let bytes = encode(3, 1, png::ColorType::Grayscale, &[1, 2, 3]);

        let image = decode_png(bytes.as_slice()).unwrap();

        assert_eq!(image.channels, Channels::Red);
        assert_eq!(image.pixels, vec![1, 2, 3]);
    }

    #[test]
    fn rejects_gray_alpha() {
        let bytes = encode(1, 1, png::ColorType::GrayscaleAlpha, &[1, 2]);

        let err = decode_png(bytes.as_slice()).unwrap_err();

        assert!(matches!(err, ImageError::Unsupported(png::ColorType::GrayscaleAlpha)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_png(&b"definitely not a png"[..]).unwrap_err();

        assert!(matches!(err, ImageError::Decode(_)));
    }

    #[test]
    fn encode_checks_length() {
        let mut out = Vec::new();

        let err = encode_png(&mut out, 2, 2, &[0; 15]).unwrap_err();
        assert!(matches!(err, ImageError::InvalidLength { len: 15, .. }));

        encode_png(&mut out, 2, 2, &[7; 16]).unwrap();
        let image = decode_png(out.as_slice()).unwrap();
        assert_eq!(image.channels, Channels::Rgba);
        assert_eq!(image.pixels, vec![7; 16]);
    }

    #[test]
    fn flip_rows_reverses_order() {
        let mut pixels = vec![1, 1, 2, 2, 3, 3];
        flip_rows(&mut pixels, 2);
        assert_eq!(pixels, vec![3, 3, 2, 2, 1, 1]);

        let mut even = vec![1, 2, 3, 4];
        flip_rows(&mut even, 1);
        assert_eq!(even, vec![4, 3, 2, 1]);
    }

    #[test]
    fn cube_faces_order() {
        let faces = CubeFaces::in_dir("sky");

        assert_eq!(faces.paths[0], Path::new("sky").join("right.png"));
        assert_eq!(faces.paths[3], Path::new("sky").join("bottom.png"));
        assert_eq!(faces.paths[5], Path::new("sky").join("back.png"));
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = load_png("does/not/exist.png").unwrap_err();

        assert!(matches!(err, ImageError::Input { .. }));
    }
}
