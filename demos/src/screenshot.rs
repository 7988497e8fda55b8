use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use cookbook::image::{encode_png, flip_rows, ImageError};

/// Writes bottom-up RGBA pixels from `glReadPixels` as a PNG in `dir`.
pub fn save_png(dir: &Path, width: u32, height: u32, mut pixels: Vec<u8>) -> Result<PathBuf, ImageError> {
    let io_err = |path: &Path| {
        let path = path.to_owned();
        move |source: std::io::Error| ImageError::Input { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_err(dir))?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(format!("screenshot-{stamp}.png"));

    flip_rows(&mut pixels, width as usize * 4);

    let file = File::create(&path).map_err(io_err(&path))?;
    encode_png(BufWriter::new(file), width, height, &pixels)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookbook::image::load_png;

    #[test]
    fn rows_are_stored_top_down() {
        let dir = std::env::temp_dir().join(format!("gl-demos-shot-{}", std::process::id()));

        // bottom row red, top row blue, as GL hands them over
        let pixels = vec![
            255, 0, 0, 255, //
            0, 0, 255, 255,
        ];

        let path = save_png(&dir, 1, 2, pixels).unwrap();
        let image = load_png(&path).unwrap();

        assert_eq!(image.pixels, vec![0, 0, 255, 255, 255, 0, 0, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn short_buffer_is_rejected() {
        let dir = std::env::temp_dir().join(format!("gl-demos-short-{}", std::process::id()));

        let res = save_png(&dir, 4, 4, vec![0; 10]);

        assert!(matches!(res, Err(ImageError::InvalidLength { len: 10, .. })));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
