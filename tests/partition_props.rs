// Property tests for batch partitioning and normalization geometry
use images_to_stickers::sticker::pipeline::{center_offset, scaled_dimensions};
use images_to_stickers::sticker::{partition, SourceImage, CANVAS_SIZE};
use proptest::prelude::*;

fn sources(count: usize) -> Vec<SourceImage> {
    (0..count)
        .map(|i| SourceImage::from_path(format!("input/{:05}.jpg", i)).expect("valid path"))
        .collect()
}

proptest! {
    #[test]
    fn prop_partition_preserves_order_and_capacity(count in 0..200usize, capacity in 1..40usize) {
        let batches = partition(sources(count), capacity);

        prop_assert_eq!(batches.len(), count.div_ceil(capacity));

        let real: Vec<String> = batches
            .iter()
            .flat_map(|batch| batch.items.iter())
            .filter(|item| !item.is_blank())
            .map(|item| item.stem().to_string())
            .collect();
        let expected: Vec<String> = (0..count).map(|i| format!("{:05}", i)).collect();
        prop_assert_eq!(real, expected);

        for batch in &batches {
            let original = batch.len() - batch.blank_count();
            prop_assert!(original >= 1 && original <= capacity);
            if original < 3 {
                prop_assert_eq!(batch.blank_count(), original);
            } else {
                prop_assert_eq!(batch.blank_count(), 0);
            }
        }
    }

    #[test]
    fn prop_scaled_image_fits_canvas(width in 1..5000u32, height in 1..5000u32) {
        let (scaled_width, scaled_height) = scaled_dimensions(width, height);

        if width < height {
            prop_assert_eq!(scaled_height, CANVAS_SIZE);
            prop_assert_eq!(scaled_width, ((width as u64 * 512) / height as u64).max(1) as u32);
        } else {
            prop_assert_eq!(scaled_width, CANVAS_SIZE);
            prop_assert_eq!(scaled_height, ((height as u64 * 512) / width as u64).max(1) as u32);
        }

        let (x, y) = center_offset(scaled_width, scaled_height);
        prop_assert!(x + scaled_width <= CANVAS_SIZE);
        prop_assert!(y + scaled_height <= CANVAS_SIZE);
        prop_assert!(CANVAS_SIZE - (x + scaled_width) - x <= 1);
        prop_assert!(CANVAS_SIZE - (y + scaled_height) - y <= 1);
    }
}
