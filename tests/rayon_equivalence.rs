#![cfg(feature = "rayon")]

use image::{Rgba, RgbaImage};
use std::sync::Arc;
use visauto::backend::{RecordingActuator, StaticScreen};
use visauto::kernel::correlate;
use visauto::{Desktop, ImageMatch, ImageView, Region, Settings, Template};

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

#[test]
fn parallel_scores_equal_sequential_scores() {
    let (width, height) = (97, 71);
    let data = make_image(width, height);
    let image = ImageView::from_slice(&data, width, height).unwrap();

    let mut patch = Vec::new();
    for y in 20..33 {
        patch.extend_from_slice(&data[y * width + 40..y * width + 57]);
    }
    let template = Template::new("patch", patch, 17, 13).unwrap();

    let sequential = correlate(image, template.plan(), false);
    let parallel = correlate(image, template.plan(), true);
    assert_eq!(sequential.width(), parallel.width());
    assert_eq!(sequential.height(), parallel.height());
    assert_eq!(sequential.as_slice(), parallel.as_slice());
    assert_eq!(sequential.max_loc(), parallel.max_loc());
}

#[test]
fn parallel_setting_yields_identical_matches() {
    let (width, height) = (80usize, 60usize);
    let data = make_image(width, height);
    let frame = RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        let v = data[y as usize * width + x as usize];
        Rgba([v, v, v, 255])
    });
    let patch = image::imageops::crop_imm(&frame, 31, 17, 14, 11).to_image();
    let template = Template::from_rgba("patch", &patch).unwrap();

    let screen = Arc::new(StaticScreen::new(frame));
    let run = |parallel: bool| {
        let desktop = Desktop::new(screen.clone(), RecordingActuator::new())
            .with_settings(Settings::default().with_parallel(parallel))
            .shared();
        let mut region = Region::full_screen(&desktop).unwrap();
        region
            .find_all(&template, 0.5, false)
            .unwrap()
            .iter()
            .map(|m| (m.x(), m.y(), m.similarity()))
            .collect::<Vec<_>>()
    };

    let sequential = run(false);
    assert!(sequential.iter().any(|&(x, y, _)| (x, y) == (31, 17)));
    assert_eq!(sequential, run(true));
}
