use rgb::FromSlice;
use svgshelf::{
    rasterize, Background, Catalog, DirectorySink, Error, ExportFormat, Gallery, PixelSize,
    SkiaBackend, Size,
};

mod scenarios;

pub struct Rgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Rgba {
    pub fn pixel(&self, x: u32, y: u32) -> rgb::RGBA8 {
        self.data.as_rgba()[(y * self.width + x) as usize]
    }
}

pub fn load_png(data: &[u8]) -> Rgba {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().unwrap();
    let mut img_data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut img_data).unwrap();
    assert_eq!(info.color_type, png::ColorType::Rgba);

    Rgba {
        width: info.width,
        height: info.height,
        data: img_data,
    }
}

pub fn load_jpeg(data: &[u8]) -> image::RgbImage {
    image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
        .unwrap()
        .to_rgb8()
}

pub fn is_close(c1: [u8; 3], c2: [u8; 3], tolerance: i32) -> bool {
    c1.iter()
        .zip(c2.iter())
        .all(|(a, b)| (*a as i32 - *b as i32).abs() <= tolerance)
}

fn transparent() -> Background {
    Background {
        color: None,
        transparent: true,
    }
}

// A 10x10 image with a red left half.
const HALF_RED: &str = r#"<svg viewBox="0 0 10 10"><rect width="5" height="10" fill="red"/></svg>"#;

#[test]
fn image_is_stretched() {
    let backend = SkiaBackend::default();
    let size = Size::from_wh(40.0, 10.0).unwrap();
    let blob = rasterize(&backend, HALF_RED, size, ExportFormat::Png, transparent()).unwrap();

    let img = load_png(&blob.data);
    assert_eq!((img.width, img.height), (40, 10));
    assert_eq!(img.pixel(5, 5), rgb::RGBA8::new(255, 0, 0, 255));
    assert_eq!(img.pixel(15, 5), rgb::RGBA8::new(255, 0, 0, 255));
    assert_eq!(img.pixel(35, 5).a, 0);
}

#[test]
fn opaque_png_background() {
    let backend = SkiaBackend::default();
    let bg = Background {
        color: Some(svgtypes::Color::new_rgb(0, 0, 255)),
        transparent: false,
    };
    let size = Size::from_wh(20.0, 20.0).unwrap();
    let blob = rasterize(&backend, HALF_RED, size, ExportFormat::Png, bg).unwrap();

    let img = load_png(&blob.data);
    assert_eq!(img.pixel(2, 2), rgb::RGBA8::new(255, 0, 0, 255));
    assert_eq!(img.pixel(18, 2), rgb::RGBA8::new(0, 0, 255, 255));
}

#[test]
fn opaque_png_default_background_is_white() {
    let backend = SkiaBackend::default();
    let size = Size::from_wh(20.0, 20.0).unwrap();
    let bg = Background::default();
    let blob = rasterize(&backend, HALF_RED, size, ExportFormat::Png, bg).unwrap();

    let img = load_png(&blob.data);
    assert_eq!(img.pixel(18, 2), rgb::RGBA8::new(255, 255, 255, 255));
}

#[test]
fn jpeg_ignores_transparency() {
    let backend = SkiaBackend::default();
    let size = Size::from_wh(64.0, 64.0).unwrap();
    let blob = rasterize(&backend, HALF_RED, size, ExportFormat::Jpeg, transparent()).unwrap();

    assert_eq!(blob.mime_type(), "image/jpeg");
    let img = load_jpeg(&blob.data);
    assert_eq!(img.dimensions(), (64, 64));
    assert!(is_close(img.get_pixel(60, 32).0, [255, 255, 255], 8));
    assert!(is_close(img.get_pixel(4, 32).0, [255, 0, 0], 16));
}

#[test]
fn fractional_size_is_rounded() {
    let backend = SkiaBackend::default();
    let size = Size::from_wh(100.4, 99.6).unwrap();
    let blob = rasterize(&backend, HALF_RED, size, ExportFormat::Png, transparent()).unwrap();

    assert_eq!(blob.size, PixelSize::from_wh(100, 100).unwrap());
    let img = load_png(&blob.data);
    assert_eq!((img.width, img.height), (100, 100));
}

#[test]
fn malformed_markup() {
    let backend = SkiaBackend::default();
    let size = Size::from_wh(10.0, 10.0).unwrap();
    let markup = "<svg viewBox=";
    let res = rasterize(&backend, markup, size, ExportFormat::Png, transparent());
    assert!(matches!(res, Err(Error::Decode(_))));
}

#[test]
fn svg_tag_in_leading_comment() {
    let backend = SkiaBackend::default();
    let markup = format!("<!-- <svg> icon -->{}", HALF_RED);
    let size = Size::from_wh(10.0, 10.0).unwrap();
    let blob = rasterize(&backend, &markup, size, ExportFormat::Png, transparent()).unwrap();

    let img = load_png(&blob.data);
    assert_eq!(img.pixel(2, 5), rgb::RGBA8::new(255, 0, 0, 255));
}

#[test]
fn huge_surface() {
    let backend = SkiaBackend::default();
    let size = Size::from_wh(1e9, 1e9).unwrap();
    let res = rasterize(&backend, HALF_RED, size, ExportFormat::Png, transparent());
    assert!(matches!(res, Err(Error::ContextUnavailable { .. })));
}

#[test]
fn catalog_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b_icon.svg"), HALF_RED).unwrap();
    std::fs::write(dir.path().join("a-logo.SVG"), HALF_RED).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

    let catalog = Catalog::from_dir(dir.path()).unwrap();
    let ids: Vec<_> = catalog.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["a-logo", "b_icon"]);
    assert_eq!(catalog.get("b_icon").unwrap().name, "b icon");
    assert_eq!(catalog.get("a-logo").unwrap().markup, HALF_RED);
}

#[test]
fn missing_catalog_dir() {
    let res = Catalog::from_dir(std::path::Path::new("/svgshelf/does/not/exist"));
    assert!(matches!(res, Err(Error::Io(_))));
}

#[test]
fn export_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut gallery = Gallery::new(Catalog::builtin());
    gallery.controls_mut("gelombang-batik").unwrap().set_width(120.0);

    let sink = DirectorySink::new(dir.path());
    let path = gallery
        .export("gelombang-batik", &SkiaBackend::default(), &sink)
        .unwrap();

    assert_eq!(path, dir.path().join("gelombang-batik-120x60.png"));
    let img = load_png(&std::fs::read(&path).unwrap());
    assert_eq!((img.width, img.height), (120, 60));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn parallel_exports() {
    let backend = SkiaBackend::default();
    let catalog = Catalog::builtin();

    let sizes: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = catalog
            .items()
            .iter()
            .map(|item| {
                let backend = &backend;
                s.spawn(move || {
                    let size = Size::from_wh(32.0, 16.0).unwrap();
                    let markup = &item.markup;
                    rasterize(backend, markup, size, ExportFormat::Png, transparent())
                        .unwrap()
                        .size
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sizes.len(), catalog.len());
    assert!(sizes.iter().all(|s| *s == PixelSize::from_wh(32, 16).unwrap()));
}

#[test]
fn parallel_exports_of_one_item() {
    let dir = tempfile::tempdir().unwrap();
    let mut gallery = Gallery::new(Catalog::builtin());
    gallery.controls_mut("masjid-siluet").unwrap().set_width(64.0);

    let backend = SkiaBackend::default();
    let sink = DirectorySink::new(dir.path());
    let paths: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| gallery.export("masjid-siluet", &backend, &sink)))
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for path in paths {
        assert_eq!(path.unwrap(), dir.path().join("masjid-siluet-64x43.png"));
    }

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, ["masjid-siluet-64x43.png"]);

    let img = load_png(&std::fs::read(dir.path().join("masjid-siluet-64x43.png")).unwrap());
    assert_eq!((img.width, img.height), (64, 43));
}
