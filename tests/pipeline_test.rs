// End-to-end run over a temporary input folder
use std::fs::File;
use std::io::Read;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba};
use images_to_stickers::sticker::{
    PackMetadata, PackSummary, StickerConfig, StickerError, StickerHandler, WorkArea,
};
use tempfile::TempDir;
use zip::ZipArchive;

fn write_image(path: &Path, width: u32, height: u32) {
    let image = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(x % 255) as u8, (y % 255) as u8, 200, 255])
    });
    // JPEG 不支持透明通道，统一按 RGB 写出
    DynamicImage::ImageRgba8(image)
        .to_rgb8()
        .save(path)
        .expect("failed to write test image");
}

fn entry_names(path: &Path) -> Vec<String> {
    let archive = ZipArchive::new(File::open(path).expect("open archive failed"))
        .expect("read archive failed");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).expect("open archive failed"))
        .expect("read archive failed");
    let mut content = String::new();
    archive
        .by_name(name)
        .expect("entry should exist")
        .read_to_string(&mut content)
        .expect("entry should be utf-8");
    content
}

fn run(input: &Path, root: &Path, author: &str, name: &str) -> Result<Vec<PackSummary>, StickerError> {
    let handler = StickerHandler::new(StickerConfig::default());
    let prepared = handler.prepare_inputs(input)?;

    let work_area = WorkArea::open(root.join("temp"))?;
    handler.convert_icon(&prepared.icon, &work_area)?;

    let out_dir = root.join(name);
    std::fs::create_dir_all(&out_dir).expect("create out dir failed");
    let metadata = PackMetadata::new(author, name);

    let mut seen = Vec::new();
    let summaries = handler.build_packs(prepared.images, &work_area, &out_dir, &metadata, |summary| {
        seen.push(summary.path.clone())
    })?;
    assert_eq!(seen.len(), summaries.len());

    work_area.teardown()?;
    Ok(summaries)
}

#[test]
fn thirty_one_images_produce_two_packs() {
    let dir = TempDir::new().expect("tempdir failed");
    let input = dir.path().join("input");
    std::fs::create_dir(&input).expect("create input failed");

    write_image(&input.join("icon.png"), 200, 100);
    for i in 0..31 {
        let (width, height) = if i % 2 == 0 { (40, 90) } else { (120, 30) };
        write_image(&input.join(format!("img{:02}.png", i)), width, height);
    }

    let summaries = run(&input, dir.path(), "Jane", "Pack").expect("pipeline failed");

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].path, dir.path().join("Pack").join("Pack.wastickers"));
    assert_eq!(summaries[1].path, dir.path().join("Pack").join("Pack-2.wastickers"));

    assert_eq!(entry_names(&summaries[0].path).len(), 30 + 3);
    assert_eq!(
        entry_names(&summaries[1].path),
        vec!["author.txt", "blank0.webp", "icon.png", "img30.webp", "title.txt"]
    );
    assert_eq!(read_entry(&summaries[1].path, "title.txt"), "Pack-2");
    assert_eq!(read_entry(&summaries[1].path, "author.txt"), "Jane");

    assert!(!dir.path().join("temp").exists());
}

#[test]
fn stickers_in_archive_are_512_canvases() {
    let dir = TempDir::new().expect("tempdir failed");
    let input = dir.path().join("input");
    std::fs::create_dir(&input).expect("create input failed");
    write_image(&input.join("icon.jpg"), 50, 50);
    for name in ["a.jpg", "b.png", "c.png"] {
        write_image(&input.join(name), 300, 600);
    }

    let summaries = run(&input, dir.path(), "Jane", "Solo").expect("pipeline failed");
    assert_eq!(summaries.len(), 1);

    let mut archive = ZipArchive::new(File::open(&summaries[0].path).expect("open failed"))
        .expect("read archive failed");
    assert_eq!(archive.len(), 3 + 3);

    let mut bytes = Vec::new();
    archive
        .by_name("a.webp")
        .expect("sticker should exist")
        .read_to_end(&mut bytes)
        .expect("read sticker failed");
    let sticker = image::load_from_memory(&bytes).expect("sticker should decode");
    assert_eq!((sticker.width(), sticker.height()), (512, 512));

    let mut icon = Vec::new();
    archive
        .by_name("icon.png")
        .expect("icon should exist")
        .read_to_end(&mut icon)
        .expect("read icon failed");
    let icon = image::load_from_memory(&icon).expect("icon should decode");
    assert_eq!((icon.width(), icon.height()), (96, 96));
}

#[test]
fn missing_icon_stops_before_any_output() {
    let dir = TempDir::new().expect("tempdir failed");
    let input = dir.path().join("input");
    std::fs::create_dir(&input).expect("create input failed");
    write_image(&input.join("a.png"), 10, 10);

    let result = run(&input, dir.path(), "Jane", "Pack");

    assert!(matches!(result, Err(StickerError::MissingIcon)));
    assert!(!dir.path().join("temp").exists());
    assert!(!dir.path().join("Pack").exists());
}
