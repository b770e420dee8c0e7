use svgshelf::{Catalog, ExportFormat, ExportState, Gallery, SkiaBackend};

use crate::{is_close, load_jpeg, load_png};

#[test]
fn ornamen_png_transparent() {
    let gallery = Gallery::new(Catalog::builtin());
    let controls = gallery.controls("ornamen-geometrik").unwrap();
    assert_eq!(controls.size().width(), 1024.0);
    assert_eq!(controls.size().height(), 1024.0);

    let mut job = gallery.export_job("ornamen-geometrik").unwrap();
    assert_eq!(job.filename(), "ornamen-geometrik-1024x1024.png");

    let blob = job.run(&SkiaBackend::default()).unwrap();
    assert_eq!(blob.mime_type(), "image/png");

    let img = load_png(&blob.data);
    assert_eq!((img.width, img.height), (1024, 1024));
    // Rounded corner is outside the shape.
    assert_eq!(img.pixel(0, 0).a, 0);
    assert_eq!(img.pixel(512, 512), rgb::RGBA8::new(0x0f, 0x76, 0x6e, 255));
}

#[test]
fn ornamen_jpeg_white_background() {
    let mut gallery = Gallery::new(Catalog::builtin());
    {
        let controls = gallery.controls_mut("ornamen-geometrik").unwrap();
        controls.set_format(ExportFormat::Jpeg);
        assert!(!controls.is_transparent());
    }

    let mut job = gallery.export_job("ornamen-geometrik").unwrap();
    assert_eq!(job.filename(), "ornamen-geometrik-1024x1024.jpg");

    let blob = job.run(&SkiaBackend::default()).unwrap();
    assert_eq!(blob.mime_type(), "image/jpeg");

    let img = load_jpeg(&blob.data);
    assert_eq!(img.dimensions(), (1024, 1024));
    assert!(is_close(img.get_pixel(0, 0).0, [255, 255, 255], 8));
    assert!(is_close(img.get_pixel(512, 512).0, [0x0f, 0x76, 0x6e], 8));
}

#[test]
fn zero_width_is_one_pixel() {
    let mut gallery = Gallery::new(Catalog::builtin());
    gallery.controls_mut("masjid-siluet").unwrap().set_width(0.0);

    let mut job = gallery.export_job("masjid-siluet").unwrap();
    assert_eq!(job.filename(), "masjid-siluet-1x1.png");

    let blob = job.run(&SkiaBackend::default()).unwrap();
    let img = load_png(&blob.data);
    assert_eq!((img.width, img.height), (1, 1));
}

#[test]
fn masjid_jpeg_filename() {
    let mut gallery = Gallery::new(Catalog::builtin());
    {
        let controls = gallery.controls_mut("masjid-siluet").unwrap();
        controls.set_width(512.0);
        controls.set_format(ExportFormat::Jpeg);
    }

    let mut job = gallery.export_job("masjid-siluet").unwrap();
    assert_eq!(job.filename(), "masjid-siluet-512x341.jpg");

    let blob = job.run(&SkiaBackend::default()).unwrap();
    assert_eq!(load_jpeg(&blob.data).dimensions(), (512, 341));
}

#[test]
fn item_without_namespace_renders() {
    // `bintang-delapan` has no `xmlns` and no `viewBox`.
    let gallery = Gallery::new(Catalog::builtin());
    let mut job = gallery.export_job("bintang-delapan").unwrap();
    job.run(&SkiaBackend::default()).unwrap();
    assert!(matches!(job.state(), ExportState::Ready(_)));
}
