//! Load the input image into a `Frame`.

use color_eyre::eyre::{Result, WrapErr as _};

/// The input image couldn't be read or decoded.
#[derive(Debug)]
pub struct LoadFailure {
    /// Where we looked.
    pub path: std::path::PathBuf,
}

impl core::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Could not load image: {}", self.path.display())
    }
}

/// Read and decode an image.
///
/// 3-channel images of any bit depth become 8-bit RGB. Other channel counts are kept as they are,
/// so that the kernels can reject them, unless `convert` is set, in which case everything becomes
/// 8-bit RGB.
pub fn load(path: &std::path::Path, convert: bool) -> Result<brightness_kernel::Frame> {
    tracing::info!("Loading image from: {}", path.display());
    let image = image::open(path).wrap_err_with(|| LoadFailure {
        path: path.to_path_buf(),
    })?;

    let color = image.color();
    tracing::debug!("Decoded {}x{} {color:?}", image.width(), image.height());

    let channels = color.channel_count();
    let frame = if convert || channels == brightness_kernel::SUPPORTED_CHANNELS {
        if channels != brightness_kernel::SUPPORTED_CHANNELS {
            tracing::warn!("Converting {channels}-channel {color:?} image to RGB");
        }
        let rgb = image.into_rgb8();
        brightness_kernel::Frame::rgb(rgb.width(), rgb.height(), rgb.into_raw())?
    } else {
        let (width, height) = (image.width(), image.height());
        let data = match channels {
            1 => image.into_luma8().into_raw(),
            2 => image.into_luma_alpha8().into_raw(),
            _ => image.into_rgba8().into_raw(),
        };
        brightness_kernel::Frame::new(width, height, channels, data)?
    };

    tracing::info!(
        "Loaded {}x{} image with {} channel(s)",
        frame.width(),
        frame.height(),
        frame.channels()
    );
    Ok(frame)
}

#[expect(clippy::unwrap_used, reason = "They're just tests")]
#[cfg(test)]
mod test {
    use super::*;

    fn save_png(
        directory: &std::path::Path,
        name: &str,
        image: &image::DynamicImage,
    ) -> std::path::PathBuf {
        let path = directory.join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn loads_rgb() {
        let directory = tempfile::tempdir().unwrap();
        let rgb = image::RgbImage::from_raw(2, 1, vec![10, 20, 30, 250, 0, 5]).unwrap();
        let path = save_png(directory.path(), "rgb.png", &rgb.into());

        let frame = load(&path, false).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.as_bytes(), [10, 20, 30, 250, 0, 5]);
    }

    #[test]
    fn keeps_grayscale_so_it_can_be_rejected() {
        let directory = tempfile::tempdir().unwrap();
        let gray = image::GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let path = save_png(directory.path(), "gray.png", &gray.into());

        let frame = load(&path, false).unwrap();
        assert_eq!(frame.channels(), 1);
        assert_eq!(
            frame.ensure_supported(),
            Err(brightness_kernel::Error::UnsupportedFormat { channels: 1 })
        );
    }

    #[test]
    fn keeps_alpha_so_it_can_be_rejected() {
        let directory = tempfile::tempdir().unwrap();
        let rgba = image::RgbaImage::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
        let path = save_png(directory.path(), "rgba.png", &rgba.into());

        let frame = load(&path, false).unwrap();
        assert_eq!(frame.channels(), 4);
        assert_eq!(frame.as_bytes(), [1, 2, 3, 4]);
    }

    #[test]
    fn converts_when_asked() {
        let directory = tempfile::tempdir().unwrap();
        let gray = image::GrayImage::from_raw(2, 1, vec![9, 200]).unwrap();
        let path = save_png(directory.path(), "gray.png", &gray.into());

        let frame = load(&path, true).unwrap();
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.as_bytes(), [9, 9, 9, 200, 200, 200]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("nope.png");

        let error = load(&path, false).unwrap_err();
        let failure = error.downcast_ref::<LoadFailure>().unwrap();
        assert_eq!(failure.path, path);
        assert!(error.to_string().contains("nope.png"));
    }

    #[test]
    fn undecodable_file_is_a_load_failure() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("garbage.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let error = load(&path, false).unwrap_err();
        assert!(error.downcast_ref::<LoadFailure>().is_some());
    }
}
