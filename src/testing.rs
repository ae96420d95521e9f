//! Synthetic asset fixtures shared by the unit tests.

use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::catalog::{AssetCatalog, MemorySource};
use crate::gender::Gender;
use crate::layer::{CANVAS_SIZE, Category};

/// File-name suffixes per category; deliberately not in natural order.
const SUFFIXES: [u32; 4] = [10, 2, 1, 3];

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Region painted by each category, as `(x0, y0, x1, y1, alpha)`.
fn region(category: Category) -> (u32, u32, u32, u32, u8) {
    match category {
        Category::Background => (0, 0, CANVAS_SIZE, CANVAS_SIZE, 255),
        Category::Face => (100, 80, 300, 340, 255),
        Category::Clothes => (40, 300, 360, 400, 220),
        Category::Mouth => (170, 250, 230, 270, 255),
        Category::Hair => (90, 40, 310, 120, 200),
        Category::Eye => (140, 160, 260, 190, 255),
    }
}

fn layer_image(gender: Gender, category: Category, suffix: u32) -> RgbaImage {
    let (x0, y0, x1, y1, alpha) = region(category);
    let c = category as u32;
    let g = gender as u32;
    let color = Rgba([
        ((suffix * 53 + c * 31 + g * 17) % 256) as u8,
        ((suffix * 97 + c * 67 + g * 101) % 256) as u8,
        ((suffix * 29 + c * 113 + g * 7) % 256) as u8,
        alpha,
    ]);

    let mut img = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
    for y in y0..y1 {
        for x in x0..x1 {
            // Stripe pattern so different suffixes differ in shape too.
            if category == Category::Background || (x + y) % (suffix + 1) != 0 {
                img.put_pixel(x, y, color);
            }
        }
    }
    img
}

fn fixture_files() -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::new();
    for suffix in SUFFIXES {
        files.push((
            format!("background/background{suffix}.png"),
            png_bytes(&layer_image(Gender::Male, Category::Background, suffix)),
        ));
    }
    for gender in Gender::ALL {
        for category in Category::PERSON {
            for suffix in SUFFIXES {
                files.push((
                    format!(
                        "{}/{}/{}{}.png",
                        gender.dir_name(),
                        category.dir_name(),
                        category.dir_name(),
                        suffix
                    ),
                    png_bytes(&layer_image(gender, category, suffix)),
                ));
            }
        }
    }
    files
}

/// A complete in-memory asset tree with four layers per category.
pub fn fixture_source() -> MemorySource {
    static SOURCE: OnceLock<MemorySource> = OnceLock::new();
    SOURCE
        .get_or_init(|| {
            fixture_files()
                .into_iter()
                .fold(MemorySource::new(), |source, (name, bytes)| {
                    source.with(name, bytes)
                })
        })
        .clone()
}

pub fn fixture_catalog() -> AssetCatalog {
    AssetCatalog::load(fixture_source()).unwrap()
}

/// Writes the fixture tree under `root`.
pub fn write_fixture_dir(root: &Path) {
    for (name, bytes) in fixture_files() {
        let path = root.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }
}
