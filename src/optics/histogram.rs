use image::{Rgba, RgbaImage, imageops};

pub const DEFAULT_NATIVE_HEIGHT: u32 = 1024;
pub const MAX_TILE_WIDTH: u32 = 4096;

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const NORMAL: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const UNREACHABLE_COLOR: Rgba<u8> = Rgba([144, 238, 144, 255]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnStyle {
    Unreachable,
    Bar { height: u32 },
}

pub fn column_style(value: f32, hist_max: f32, native_height: u32) -> ColumnStyle {
    if value < 0.0 {
        return ColumnStyle::Unreachable;
    }
    if hist_max <= 0.0 {
        return ColumnStyle::Bar { height: 0 };
    }

    let percent = value / hist_max;
    let height = (percent * native_height as f32) as u32;
    ColumnStyle::Bar {
        height: height.min(native_height),
    }
}

/// One pixel column per OPTICS position, bars anchored at the bottom.
pub fn render_histogram(reachabilities: &[f32], hist_max: f32, native_height: u32) -> RgbaImage {
    let width = reachabilities.len() as u32;
    let mut bitmap = RgbaImage::from_pixel(width, native_height, BACKGROUND);

    for (x, &value) in reachabilities.iter().enumerate() {
        let x = x as u32;
        match column_style(value, hist_max, native_height) {
            ColumnStyle::Unreachable => {
                for y in 0..native_height {
                    bitmap.put_pixel(x, y, UNREACHABLE_COLOR);
                }
            }
            ColumnStyle::Bar { height } => {
                for y in (native_height - height)..native_height {
                    bitmap.put_pixel(x, y, NORMAL);
                }
            }
        }
    }

    bitmap
}

/// A horizontal slice of the native bitmap, small enough to upload as one texture.
pub struct HistogramTile {
    pub x_offset: u32,
    pub image: RgbaImage,
}

pub fn split_into_tiles(bitmap: &RgbaImage, max_width: u32) -> Vec<HistogramTile> {
    let max_width = max_width.max(1);
    let (width, height) = bitmap.dimensions();

    (0..width)
        .step_by(max_width as usize)
        .map(|x_offset| {
            let tile_width = max_width.min(width - x_offset);
            HistogramTile {
                x_offset,
                image: imageops::crop_imm(bitmap, x_offset, 0, tile_width, height).to_image(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn column(bitmap: &RgbaImage, x: u32) -> Vec<Rgba<u8>> {
        (0..bitmap.height()).map(|y| *bitmap.get_pixel(x, y)).collect()
    }

    #[test]
    fn bars_scale_with_hist_max() {
        let bitmap = render_histogram(&[-1.0, 0.5, 2.0, 0.0], 2.0, 8);

        assert_eq!(bitmap.dimensions(), (4, 8));
        assert!(column(&bitmap, 0).iter().all(|&p| p == UNREACHABLE_COLOR));

        let half = column(&bitmap, 1);
        assert_eq!(half.iter().filter(|&&p| p == NORMAL).count(), 2);
        assert_eq!(half[7], NORMAL);
        assert_eq!(half[0], BACKGROUND);

        assert!(column(&bitmap, 2).iter().all(|&p| p == NORMAL));
        assert!(column(&bitmap, 3).iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn non_positive_hist_max_draws_empty_bars() {
        assert_eq!(column_style(0.0, 0.0, 16), ColumnStyle::Bar { height: 0 });
        assert_eq!(column_style(-1.0, -1.0, 16), ColumnStyle::Unreachable);
    }

    #[test]
    fn tiles_cover_the_bitmap_without_overlap() {
        let values = (0..10).map(|i| i as f32).collect::<Vec<_>>();
        let bitmap = render_histogram(&values, 9.0, 4);
        let tiles = split_into_tiles(&bitmap, 4);

        let offsets = tiles.iter().map(|tile| tile.x_offset).collect::<Vec<_>>();
        let widths = tiles.iter().map(|tile| tile.image.width()).collect::<Vec<_>>();
        assert_eq!(offsets, vec![0, 4, 8]);
        assert_eq!(widths, vec![4, 4, 2]);
        assert_eq!(tiles[2].image.get_pixel(1, 0), bitmap.get_pixel(9, 0));
    }

    proptest! {
        #[test]
        fn prop_width_matches_point_count(
            values in prop::collection::vec(prop_oneof![Just(-1.0f32), 0.0f32..50.0], 1..200)
        ) {
            let hist_max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            let bitmap = render_histogram(&values, hist_max, 32);
            prop_assert_eq!(bitmap.width() as usize, values.len());
        }

        #[test]
        fn prop_sentinel_columns_are_fully_unreachable(
            values in prop::collection::vec(prop_oneof![Just(-1.0f32), 0.0f32..50.0], 1..100),
            hist_max in -1.0f32..100.0
        ) {
            let bitmap = render_histogram(&values, hist_max, 16);
            for (x, &value) in values.iter().enumerate() {
                if value < 0.0 {
                    prop_assert!(column(&bitmap, x as u32).iter().all(|&p| p == UNREACHABLE_COLOR));
                }
            }
        }
    }
}
