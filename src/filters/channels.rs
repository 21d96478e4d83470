//! Channel permutation: Channel Swap (RGB).

use ndarray::{ArrayD, ArrayViewD, Axis, Ix3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::FilterResult;
use crate::raster::{channel_count, Sample};

/// Swap red and blue (channels 0 and 2).
///
/// Green and any channel past the third (alpha, extra planes) stay where
/// they are. Rasters with fewer than 3 channels are returned unchanged.
///
/// # Arguments
/// * `input` - Raster shaped (height, width) or (height, width, channels)
/// * `parallel` - Swap rows on the rayon pool
///
/// # Returns
/// New raster of the same shape and element type
pub fn swap_red_blue<T: Sample>(
    input: &ArrayViewD<T>,
    parallel: bool,
) -> FilterResult<ArrayD<T>> {
    let mut output = input.to_owned();
    if channel_count(input.shape()) < 3 {
        tracing::warn!(
            shape = ?input.shape(),
            "channel swap needs 3 channels, returning input unchanged"
        );
        return Ok(output);
    }

    let mut pixels = output.view_mut().into_dimensionality::<Ix3>()?;

    #[cfg(feature = "parallel")]
    if parallel {
        pixels
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                for mut px in row.lanes_mut(Axis(1)) {
                    px.swap(0, 2);
                }
            });
        return Ok(output);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for mut px in pixels.lanes_mut(Axis(2)) {
        px.swap(0, 2);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_swap_rgb_pixel() {
        let img = array![[[10u8, 20, 30]]].into_dyn();

        let result = swap_red_blue(&img.view(), false).unwrap();

        assert_eq!(result, array![[[30u8, 20, 10]]].into_dyn());
    }

    #[test]
    fn test_swap_preserves_alpha() {
        let img = array![[[1u8, 2, 3, 4], [5, 6, 7, 8]]].into_dyn();

        let result = swap_red_blue(&img.view(), false).unwrap();

        assert_eq!(result, array![[[3u8, 2, 1, 4], [7, 6, 5, 8]]].into_dyn());
        assert_eq!(result.shape(), &[1, 2, 4]);
    }

    #[test]
    fn test_swap_noop_below_three_channels() {
        let gray = array![[1u16, 2], [3, 4]].into_dyn();
        assert_eq!(swap_red_blue(&gray.view(), false).unwrap(), gray);

        let gray_alpha = array![[[1u16, 2], [3, 4]]].into_dyn();
        assert_eq!(swap_red_blue(&gray_alpha.view(), false).unwrap(), gray_alpha);
    }

    #[test]
    fn test_swap_is_its_own_inverse() {
        let img = Array3::<f32>::from_shape_fn((5, 7, 4), |(y, x, c)| {
            (y * 100 + x * 10 + c) as f32
        })
        .into_dyn();

        let once = swap_red_blue(&img.view(), true).unwrap();
        let twice = swap_red_blue(&once.view(), false).unwrap();

        assert_ne!(once, img);
        assert_eq!(twice, img);
    }

    #[test]
    fn test_swap_parallel_matches_sequential() {
        let img = Array3::<u8>::from_shape_fn((9, 11, 3), |(y, x, c)| (y * 20 + x + c * 7) as u8)
            .into_dyn();
        assert_eq!(
            swap_red_blue(&img.view(), true).unwrap(),
            swap_red_blue(&img.view(), false).unwrap()
        );
    }
}
