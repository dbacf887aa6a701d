#[cfg(test)]
mod tests {
    use crate::image_pipeline::bitmap::{DecodedBitmap, PixelFormat};
    use crate::image_pipeline::common::error::ConversionError;
    use crate::image_pipeline::pixel::Pixel;
    use crate::image_pipeline::rew::{BitsPerPixel, HEADER_LEN, RewHeader, RewImage};

    fn patterned(width: i32, height: i32, bpp: BitsPerPixel) -> RewImage {
        let len = (width * height) as usize * bpp.channels();
        let pixels: Vec<u8> = (0..len).map(|i| (i * 7 % 251) as u8).collect();
        RewImage::from_raw(width, height, &pixels, bpp).unwrap()
    }

    #[test]
    fn test_header_layout_is_little_endian() {
        let image = RewImage::empty(3, 2, BitsPerPixel::Rgba32);
        assert_eq!(
            &image.data()[..HEADER_LEN],
            &[3, 0, 2, 0, 34, 0, 0, 0, 32, 0]
        );
    }

    #[test]
    fn test_empty_honours_length_invariant() {
        for (w, h, bpp) in [(0, 0, BitsPerPixel::Rgb24), (1, 1, BitsPerPixel::Rgba32), (7, 3, BitsPerPixel::Rgb24)] {
            let image = RewImage::empty(w, h, bpp);
            assert_eq!(image.data().len(), HEADER_LEN + (w * h) as usize * bpp.channels());
            assert!(image.pixel_bytes().iter().all(|&b| b == 0));
        }
    }

    #[test]
    fn test_solid_fill_drops_alpha_for_24_bit() {
        let color = Pixel::rgba(9, 8, 7, 6);

        let rgba = RewImage::solid(2, 2, color, BitsPerPixel::Rgba32);
        assert!(rgba.pixel_bytes().chunks_exact(4).all(|p| p == [9, 8, 7, 6]));

        let rgb = RewImage::solid(2, 2, color, BitsPerPixel::Rgb24);
        assert_eq!(rgb.pixel_bytes().len(), 12);
        assert!(rgb.pixel_bytes().chunks_exact(3).all(|p| p == [9, 8, 7]));
    }

    #[test]
    fn test_from_raw_rejects_length_mismatch() {
        let result = RewImage::from_raw(2, 2, &[0u8; 15], BitsPerPixel::Rgba32);
        assert!(matches!(
            result.unwrap_err(),
            ConversionError::SizeMismatchError { expected: 16, actual: 15 }
        ));
    }

    #[test]
    fn test_oversized_extents_wrap() {
        let image = RewImage::empty(32768 + 2, 1, BitsPerPixel::Rgb24);
        assert_eq!(image.width(), i16::MIN + 2);
        assert_eq!(image.data().len(), HEADER_LEN);

        let image = RewImage::empty(65536 + 4, 2, BitsPerPixel::Rgb24);
        assert_eq!(image.width(), 4);
        assert_eq!(image.data().len(), HEADER_LEN + 24);
    }

    #[test]
    fn test_round_trip_preserves_header_and_pixels() {
        for (w, h, bpp) in [(1, 1, BitsPerPixel::Rgb24), (5, 3, BitsPerPixel::Rgb24), (4, 4, BitsPerPixel::Rgba32)] {
            let image = patterned(w, h, bpp);

            let mut encoded = Vec::new();
            image.write(&mut encoded).unwrap();
            assert_eq!(encoded.len(), image.data().len());

            let decoded = RewImage::read(&mut encoded.as_slice()).unwrap();
            assert_eq!(decoded, image);
            assert_eq!(decoded.header(), image.header());
        }
    }

    #[test]
    fn test_read_rejects_short_stream() {
        let result = RewImage::from_bytes(&[1, 0, 1, 0, 14]);
        assert!(matches!(result.unwrap_err(), ConversionError::FormatError(_)));
    }

    #[test]
    fn test_read_rejects_unsupported_bits_per_pixel() {
        let mut bytes = RewImage::empty(1, 1, BitsPerPixel::Rgba32).to_bytes();
        bytes[8] = 16;
        let result = RewImage::from_bytes(&bytes);
        assert!(matches!(result.unwrap_err(), ConversionError::UnsupportedBitsPerPixel(16)));
    }

    #[test]
    fn test_read_rejects_truncated_pixels() {
        let bytes = patterned(2, 2, BitsPerPixel::Rgba32).to_bytes();
        let result = RewImage::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result.unwrap_err(), ConversionError::FormatError(_)));
    }

    #[test]
    fn test_read_huge_header_without_pixels_is_truncated() {
        let header = RewHeader::new(i16::MAX, i16::MAX, BitsPerPixel::Rgba32);
        assert_eq!(header.total_length, -262130);

        let mut bytes = header.to_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let result = RewImage::read(&mut bytes.as_slice());

        match result.unwrap_err() {
            ConversionError::FormatError(message) => assert!(message.contains("got 3")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_read_rejects_inconsistent_total_length() {
        let mut bytes = patterned(2, 2, BitsPerPixel::Rgb24).to_bytes();
        bytes[4] = 99;
        let result = RewImage::from_bytes(&bytes);
        assert!(matches!(result.unwrap_err(), ConversionError::FormatError(_)));
    }

    #[test]
    fn test_header_parse_matches_image() {
        let image = patterned(6, 2, BitsPerPixel::Rgb24);
        let header = RewHeader::parse(image.data()).unwrap();
        assert_eq!(header.width, 6);
        assert_eq!(header.height, 2);
        assert_eq!(header.total_length, 46);
        assert_eq!(header.bits_per_pixel, BitsPerPixel::Rgb24);
    }

    #[test]
    fn test_padded_pixels_width_five_24_bit() {
        let image = patterned(5, 3, BitsPerPixel::Rgb24);
        let padded = image.padded_pixels();

        assert_eq!(padded.len(), 3 * 16);
        for (row, chunk) in padded.chunks_exact(16).enumerate() {
            assert_eq!(&chunk[..15], &image.pixel_bytes()[row * 15..][..15]);
            assert_eq!(chunk[15], 0);
        }
    }

    #[test]
    fn test_padded_pixels_skip_aligned_and_32_bit() {
        let aligned = patterned(4, 2, BitsPerPixel::Rgb24);
        assert_eq!(aligned.padded_pixels(), aligned.pixel_bytes());

        let rgba = patterned(3, 3, BitsPerPixel::Rgba32);
        assert_eq!(rgba.padded_pixels(), rgba.pixel_bytes());
    }

    #[test]
    fn test_get_and_set_pixel() {
        let mut image = RewImage::empty(3, 3, BitsPerPixel::Rgba32);
        image.set_pixel(1, 2, Pixel::rgba(1, 2, 3, 4));

        assert_eq!(image.pixel(1, 2), Pixel::rgba(1, 2, 3, 4));
        assert_eq!(&image.pixel_bytes()[28..32], &[1, 2, 3, 4]);
        assert_eq!(image.pixel(0, 0), Pixel::rgba(0, 0, 0, 0));
    }

    #[test]
    fn test_out_of_range_access_clamps_to_last_byte() {
        let mut image = patterned(2, 2, BitsPerPixel::Rgb24);
        let last = *image.data().last().unwrap();

        assert_eq!(image.pixel(100, 100), Pixel::rgb(last, last, last));

        image.set_pixel(5, 5, Pixel::rgb(1, 2, 3));
        assert_eq!(*image.data().last().unwrap(), 3);
        assert_eq!(image.data().len(), HEADER_LEN + 12);
    }

    #[test]
    fn test_negative_index_uses_default_pixel() {
        let mut image = RewImage::solid(2, 2, Pixel::rgb(5, 5, 5), BitsPerPixel::Rgb24);
        let before = image.clone();

        assert_eq!(image.pixel(-1, 0), Pixel::default());
        image.set_pixel(0, -1, Pixel::rgb(9, 9, 9));
        assert_eq!(image, before);
    }

    #[test]
    fn test_negative_column_on_later_row_wraps_back() {
        let mut image = RewImage::empty(4, 2, BitsPerPixel::Rgb24);
        image.set_pixel(-1, 1, Pixel::rgb(7, 7, 7));
        assert_eq!(image.pixel(3, 0), Pixel::rgb(7, 7, 7));
    }

    #[test]
    fn test_ingest_converts_strided_bgra_source() {
        let bitmap = DecodedBitmap {
            width: 2,
            height: 2,
            format: PixelFormat::Bgra8,
            stride: 12,
            pixels: vec![
                1, 2, 3, 4, 5, 6, 7, 8, 0xEE, 0xEE, 0xEE, 0xEE,
                9, 10, 11, 12, 13, 14, 15, 16, 0xEE, 0xEE, 0xEE, 0xEE,
            ],
        };

        let rgba = RewImage::ingest(&bitmap, BitsPerPixel::Rgba32).unwrap();
        assert_eq!(
            rgba.pixel_bytes(),
            &[3, 2, 1, 4, 7, 6, 5, 8, 11, 10, 9, 12, 15, 14, 13, 16]
        );

        let rgb = RewImage::ingest(&bitmap, BitsPerPixel::Rgb24).unwrap();
        assert_eq!(rgb.pixel_bytes(), &[3, 2, 1, 7, 6, 5, 11, 10, 9, 15, 14, 13]);
    }

    #[test]
    fn test_ingest_rgb_source_into_32_bit_is_opaque() {
        let bitmap = DecodedBitmap {
            width: 1,
            height: 1,
            format: PixelFormat::Rgb8,
            stride: 3,
            pixels: vec![20, 30, 40],
        };
        let image = RewImage::ingest(&bitmap, BitsPerPixel::Rgba32).unwrap();
        assert_eq!(image.pixel_bytes(), &[20, 30, 40, 255]);
    }

    #[test]
    fn test_extract_rewrites_header() {
        let mut image = RewImage::solid(8, 8, Pixel::rgb(1, 1, 1), BitsPerPixel::Rgb24);
        let bitmap = DecodedBitmap {
            width: 1,
            height: 2,
            format: PixelFormat::Rgba8,
            stride: 4,
            pixels: vec![1, 2, 3, 4, 5, 6, 7, 8],
        };

        image.extract_from(&bitmap).unwrap();

        assert_eq!((image.width(), image.height()), (1, 2));
        assert_eq!(RewHeader::parse(image.data()).unwrap(), image.header());
        assert_eq!(image.pixel_bytes(), &[1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_to_rgba_expands_24_bit() {
        let image = RewImage::solid(2, 1, Pixel::rgb(4, 5, 6), BitsPerPixel::Rgb24);
        assert_eq!(image.to_rgba(), vec![4, 5, 6, 255, 4, 5, 6, 255]);
    }
}
