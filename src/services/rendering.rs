use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::{core::CellTag, error::GameError};

/// Width in pixels of the border drawn after every block
pub const BORDER_WIDTH: u32 = 1;

/// Largest accepted block side, in pixels
pub const MAX_BLOCK_SIZE: u32 = 256;

/// Largest image the server will encode
pub const MAX_IMAGE_PIXELS: u64 = 4096 * 4096;

/// Colours and block geometry of a board snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub head_colour: [u8; 3],
    pub body_colour: [u8; 3],
    pub apple_colour: [u8; 3],
    pub background_colour: [u8; 3],
    pub border_colour: [u8; 3],
    pub block_width: u32,
    pub block_height: u32,
}

impl RenderConfig {
    fn colour_for(&self, cell: CellTag) -> Rgb<u8> {
        Rgb(match cell {
            CellTag::Empty => self.background_colour,
            CellTag::Head => self.head_colour,
            CellTag::Body => self.body_colour,
            CellTag::Apple => self.apple_colour,
        })
    }
}

/// Draw a grid as a PNG image
///
/// Every cell becomes a `block_width` x `block_height` block followed by a
/// one pixel border column and row.
///
/// # Errors
///
/// Returns an error for an empty or ragged grid, an oversized image, or a
/// failed encode
pub fn render_png(grid: &[Vec<CellTag>], config: &RenderConfig) -> Result<Vec<u8>, GameError> {
    let columns = grid.first().map_or(0, |row| row.len());
    if columns == 0 {
        return Err(GameError::MissingBoard);
    }
    if grid.iter().any(|row| row.len() != columns) {
        return Err(GameError::InconsistentRowWidth);
    }

    let cell_width = u64::from(config.block_width + BORDER_WIDTH);
    let cell_height = u64::from(config.block_height + BORDER_WIDTH);
    let image_width = columns as u64 * cell_width;
    let image_height = grid.len() as u64 * cell_height;

    if image_width * image_height > MAX_IMAGE_PIXELS {
        return Err(GameError::ImageTooLarge);
    }

    let mut img = RgbImage::from_pixel(
        image_width as u32,
        image_height as u32,
        Rgb(config.border_colour),
    );

    for (row_index, row) in grid.iter().enumerate() {
        let top = row_index as u32 * cell_height as u32;

        for (column_index, &cell) in row.iter().enumerate() {
            let left = column_index as u32 * cell_width as u32;
            let colour = config.colour_for(cell);

            for y in top..top + config.block_height {
                for x in left..left + config.block_width {
                    img.put_pixel(x, y, colour);
                }
            }
        }
    }

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
