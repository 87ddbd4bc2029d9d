//! A side by side comparison of the original and every strategy's output.
//!
//! ```text
//! +----------+----------+
//! | Original | Baseline |
//! +----------+----------+
//! |   Wide   |  Narrow  |
//! +----------+----------+
//! ```

use color_eyre::{eyre::ContextCompat as _, Result};

/// Width of each tile in the grid.
pub const TILE_WIDTH: u32 = 640;
/// Height of each tile in the grid.
pub const TILE_HEIGHT: u32 = 480;

/// Render the grid and save it. The image format is decided by the file extension.
pub fn save(
    original: &brightness_kernel::Frame,
    outputs: &[(brightness_kernel::Strategy, brightness_kernel::Frame)],
    path: &std::path::Path,
) -> Result<()> {
    let grid = render(original, outputs, TILE_WIDTH, TILE_HEIGHT)?;
    grid.save(path)?;
    tracing::info!("Saved comparison image to: {}", path.display());
    Ok(())
}

/// Resize the original and each output into one tile each, filling the grid row by row.
pub fn render(
    original: &brightness_kernel::Frame,
    outputs: &[(brightness_kernel::Strategy, brightness_kernel::Frame)],
    tile_width: u32,
    tile_height: u32,
) -> Result<image::RgbImage> {
    let columns = 2;
    let frames = core::iter::once(original).chain(outputs.iter().map(|(_, frame)| frame));
    let mut grid = image::RgbImage::new(tile_width * columns, tile_height * columns);

    for (index, frame) in (0u32..).zip(frames) {
        if index >= columns * columns {
            tracing::warn!("Only {} frames fit in the comparison grid", columns * columns);
            break;
        }
        let tile = to_tile(frame, tile_width, tile_height)?;
        let x = i64::from((index % columns) * tile_width);
        let y = i64::from((index / columns) * tile_height);
        image::imageops::replace(&mut grid, &tile, x, y);
    }

    Ok(grid)
}

/// Convert a frame to an image and scale it to the tile size.
fn to_tile(
    frame: &brightness_kernel::Frame,
    tile_width: u32,
    tile_height: u32,
) -> Result<image::RgbImage> {
    frame.ensure_supported()?;
    if frame.width() == 0 || frame.height() == 0 {
        color_eyre::eyre::bail!("Can't make a comparison tile from an empty image");
    }

    let (width, height) = (frame.width(), frame.height());
    let image = image::RgbImage::from_raw(width, height, frame.as_bytes().to_vec()).context(
        format!("Dimensions ({width}x{height}) don't match the amount of data."),
    )?;

    Ok(image::imageops::resize(
        &image,
        tile_width,
        tile_height,
        image::imageops::FilterType::Triangle,
    ))
}

#[expect(clippy::unwrap_used, reason = "They're just tests")]
#[cfg(test)]
mod test {
    use brightness_kernel::{Frame, Strategy};

    fn solid(value: u8) -> Frame {
        Frame::rgb(4, 2, vec![value; 4 * 2 * 3]).unwrap()
    }

    fn outputs() -> Vec<(Strategy, Frame)> {
        vec![
            (Strategy::Baseline, solid(60)),
            (Strategy::Wide, solid(120)),
            (Strategy::Narrow, solid(240)),
        ]
    }

    #[test]
    fn tiles_are_placed_row_by_row() {
        let grid = super::render(&solid(10), &outputs(), 8, 6).unwrap();
        assert_eq!(grid.dimensions(), (16, 12));
        assert_eq!(grid.get_pixel(3, 3).0, [10, 10, 10]);
        assert_eq!(grid.get_pixel(11, 3).0, [60, 60, 60]);
        assert_eq!(grid.get_pixel(3, 9).0, [120, 120, 120]);
        assert_eq!(grid.get_pixel(11, 9).0, [240, 240, 240]);
    }

    #[test]
    fn saves_to_disk() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("comparison.png");
        super::save(&solid(10), &outputs(), &path).unwrap();

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.width(), super::TILE_WIDTH * 2);
        assert_eq!(saved.height(), super::TILE_HEIGHT * 2);
    }

    #[test]
    fn refuses_unsupported_frames() {
        let gray = Frame::new(2, 2, 1, vec![0; 4]).unwrap();
        assert!(super::render(&gray, &outputs(), 8, 6).is_err());
    }

    #[test]
    fn refuses_empty_frames() {
        let empty = Frame::rgb(0, 0, vec![]).unwrap();
        assert!(super::render(&empty, &outputs(), 8, 6).is_err());
    }
}
