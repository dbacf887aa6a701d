#[cfg(test)]
mod tests {
    use crate::image_pipeline::common::error::ConversionError;
    use crate::image_pipeline::pixel::{Pixel, blend_frames, composite_row, flip_vertically};

    #[test]
    fn test_rgb_pixel_reads_as_opaque() {
        let pixel = Pixel::rgb(10, 20, 30);
        assert!(!pixel.has_alpha());
        assert_eq!(pixel.channels(), 3);
        assert_eq!(pixel.to_rgba(), [10, 20, 30, 255]);
    }

    #[test]
    fn test_premultiply_scales_colour_channels() {
        let pixel = Pixel::rgba(255, 128, 0, 128).premultiply();
        assert_eq!(pixel, Pixel::rgba(128, 64, 0, 128));

        let opaque = Pixel::rgba(12, 34, 56, 255).premultiply();
        assert_eq!(opaque, Pixel::rgba(12, 34, 56, 255));
    }

    #[test]
    fn test_source_over_opaque_source_replaces_destination() {
        let dst = Pixel::rgba(1, 2, 3, 4);
        let src = Pixel::rgba(200, 100, 50, 255);
        assert_eq!(Pixel::source_over(dst, src), src);
    }

    #[test]
    fn test_source_over_transparent_source_keeps_destination() {
        for dst in [Pixel::rgba(0, 0, 0, 0), Pixel::rgba(17, 99, 254, 3), Pixel::rgba(255, 255, 255, 255)] {
            let out = Pixel::source_over(dst, Pixel::rgba(90, 80, 70, 0));
            assert_eq!(out, dst);
        }
    }

    #[test]
    fn test_source_over_half_alpha() {
        let out = Pixel::source_over(Pixel::rgba(0, 0, 0, 255), Pixel::rgba(255, 255, 255, 128));
        assert_eq!(out.to_rgba(), [128, 128, 128, 255]);
    }

    #[test]
    fn test_from_normalized_clamps() {
        let pixel = Pixel::from_normalized(-0.5, 2.0, 0.5, 1.0);
        assert_eq!(pixel.to_rgba(), [0, 255, 128, 255]);
    }

    #[test]
    fn test_lerp_boundaries() {
        let a = Pixel::rgba(10, 20, 30, 40);
        let b = Pixel::rgba(250, 0, 128, 255);
        assert_eq!(Pixel::lerp(a, b, 0.0), a);
        assert_eq!(Pixel::lerp(a, b, 1.0), b);
    }

    #[test]
    fn test_blend_frames_boundaries() {
        let a: Vec<u8> = (0..64).map(|v| (v * 3) as u8).collect();
        let b: Vec<u8> = (0..64).map(|v| 255 - (v * 2) as u8).collect();

        assert_eq!(blend_frames(&a, &b, 0.0).unwrap(), a);
        assert_eq!(blend_frames(&a, &b, 1.0).unwrap(), b);
    }

    #[test]
    fn test_blend_frames_empty_previous_passes_current() {
        let current = vec![9u8; 16];
        assert_eq!(blend_frames(&[], &current, 0.0).unwrap(), current);
    }

    #[test]
    fn test_blend_frames_rejects_length_mismatch() {
        let result = blend_frames(&[0u8; 8], &[0u8; 12], 0.5);
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::SizeMismatchError { expected: 8, actual: 12 }
        ));
    }

    #[test]
    fn test_composite_row_touches_only_overlap() {
        let mut dst = vec![0u8; 12];
        let src = [255, 0, 0, 255];
        composite_row(&mut dst, &src);
        assert_eq!(dst, [255, 0, 0, 255, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_flip_vertically_reverses_rows() {
        let pixels: Vec<u8> = (0..24).collect();
        let flipped = flip_vertically(&pixels, 2, 3);
        assert_eq!(&flipped[0..8], &pixels[16..24]);
        assert_eq!(&flipped[8..16], &pixels[8..16]);
        assert_eq!(&flipped[16..24], &pixels[0..8]);
    }
}
