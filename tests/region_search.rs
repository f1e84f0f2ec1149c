use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use visauto::backend::{RecordingActuator, StaticScreen};
use visauto::{Desktop, ImageMatch, Rect, Region, Template, VisautoError};

fn noise_frame(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbaImage::from_fn(width, height, |_, _| {
        let v: u8 = rng.random();
        Rgba([v, v, v, 255])
    })
}

fn crop_template(frame: &RgbaImage, name: &str, x: u32, y: u32, w: u32, h: u32) -> Template {
    let patch = image::imageops::crop_imm(frame, x, y, w, h).to_image();
    Template::from_rgba(name, &patch).unwrap()
}

fn desktop_for(frame: RgbaImage) -> (Arc<Desktop>, Arc<StaticScreen>) {
    let screen = Arc::new(StaticScreen::new(frame));
    let desktop = Desktop::new(screen.clone(), RecordingActuator::new()).shared();
    (desktop, screen)
}

#[test]
fn find_locates_exact_copy_in_screen_coordinates() {
    let frame = noise_frame(120, 90, 7);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::new(&desktop, 10, 20, 80, 50).unwrap();

    for &(dx, dy) in &[(0u32, 0u32), (13, 7), (68, 41)] {
        let tpl = crop_template(&frame, "patch", 10 + dx, 20 + dy, 12, 9);
        let found = region.find(&tpl, 0.95, false).unwrap();
        assert_eq!(found.rect(), Rect::new(10 + dx as i32, 20 + dy as i32, 12, 9).unwrap());
        assert!((found.similarity() - 1.0).abs() < 1e-4, "{}", found.similarity());
        assert_eq!(found.name(), "patch");
    }
}

#[test]
fn find_fails_when_threshold_exceeds_best_score() {
    let frame = noise_frame(64, 48, 11);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();

    let stranger = crop_template(&noise_frame(16, 16, 99), "stranger", 0, 0, 10, 10);
    let err = region.find(&stranger, 0.9, false).unwrap_err();
    match err {
        VisautoError::NotFound { target, region: rect, best } => {
            assert_eq!(target, "stranger");
            assert_eq!(rect, Rect::new(0, 0, 64, 48).unwrap());
            assert!(best.unwrap() < 0.9);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let own = crop_template(&frame, "own", 5, 5, 10, 10);
    assert!(region.find(&own, 1.01, false).unwrap_err().is_not_found());
}

#[test]
fn exists_mirrors_find_without_raising() {
    let frame = noise_frame(64, 48, 3);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();

    let own = crop_template(&frame, "own", 20, 10, 8, 8);
    let stranger = crop_template(&noise_frame(8, 8, 4), "stranger", 0, 0, 8, 8);
    for tpl in [&own, &stranger] {
        let found = region.find(tpl, 0.9, false);
        let exists = region.exists(tpl, 0.9, false).unwrap();
        assert_eq!(exists, found.is_ok());
    }
    assert!(region.exists(&own, 0.9, true).unwrap());
    assert!(!region.exists(&stranger, 0.9, true).unwrap());
}

#[test]
fn find_all_count_is_monotonic_in_threshold() {
    let frame = noise_frame(50, 40, 21);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();
    let tpl = crop_template(&frame, "p", 30, 12, 6, 6);

    let loose = region.find_all(&tpl, 0.0, false).unwrap();
    let strict = region.find_all(&tpl, 0.9, true).unwrap();
    assert!(loose.len() >= strict.len());
    assert!(strict.iter().any(|m| m.rect() == Rect::new(30, 12, 6, 6).unwrap()));
    assert!(strict.iter().all(|m| m.similarity() >= 0.9));

    let none = region.find_all(&tpl, 1.5, true).unwrap();
    assert!(none.is_empty());
}

#[test]
fn find_all_keeps_overlapping_neighbours_in_scan_order() {
    // Smooth blob: one-pixel shifts of the template still correlate highly.
    let frame = RgbaImage::from_fn(60, 60, |x, y| {
        let dx = x as f32 - 30.0;
        let dy = y as f32 - 30.0;
        let v = 40.0 + 200.0 * (-(dx * dx + dy * dy) / (2.0 * 8.0 * 8.0)).exp();
        Rgba([v as u8, v as u8, v as u8, 255])
    });
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();
    let tpl = crop_template(&frame, "blob", 20, 20, 20, 20);

    let matches = region.find_all(&tpl, 0.95, false).unwrap();
    assert!(matches.len() > 1, "expected clustered matches, got {}", matches.len());
    assert!(matches.iter().any(|m| (m.x(), m.y()) == (20, 20)));

    let coords: Vec<(i32, i32)> = matches.iter().map(|m| (m.y(), m.x())).collect();
    let mut sorted = coords.clone();
    sorted.sort();
    assert_eq!(coords, sorted);
}

#[test]
fn oversized_template_is_not_found() {
    let frame = noise_frame(40, 40, 5);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::new(&desktop, 0, 0, 10, 10).unwrap();
    let tpl = crop_template(&frame, "big", 0, 0, 12, 8);

    match region.find(&tpl, 0.0, false).unwrap_err() {
        VisautoError::NotFound { best, .. } => assert!(best.is_none()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(region.find_all(&tpl, 0.0, false).unwrap().is_empty());
    assert!(!region.exists(&tpl, 0.0, false).unwrap());
}

#[test]
fn missing_asset_is_distinct_from_not_found() {
    let (desktop, _) = desktop_for(noise_frame(20, 20, 1));
    let mut region = Region::full_screen(&desktop).unwrap();

    let err = region.find("no/such/asset.png", 0.5, false).unwrap_err();
    assert!(matches!(err, VisautoError::AssetLoad { .. }));
    let err = region.exists("no/such/asset.png", 0.5, false).unwrap_err();
    assert!(matches!(err, VisautoError::AssetLoad { .. }));
}

#[test]
fn path_targets_load_from_disk_and_name_the_match() {
    let frame = noise_frame(48, 32, 8);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon.png");
    image::imageops::crop_imm(&frame, 17, 9, 10, 7)
        .to_image()
        .save(&path)
        .unwrap();

    let found = region.find(&path, 0.95, false).unwrap();
    assert_eq!((found.x(), found.y(), found.w(), found.h()), (17, 9, 10, 7));
    assert_eq!(found.name(), path.display().to_string());
}

#[test]
fn cached_search_reuses_previous_capture() {
    let frame = noise_frame(40, 30, 12);
    let (desktop, screen) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();
    let tpl = crop_template(&frame, "p", 4, 6, 8, 8);

    assert!(!region.has_cache());
    region.find(&tpl, 0.95, false).unwrap();
    assert!(region.has_cache());

    screen.set_frame(RgbaImage::from_pixel(40, 30, Rgba([0, 0, 0, 255])));
    assert!(region.find(&tpl, 0.95, true).is_ok());
    assert!(region.find(&tpl, 0.95, false).unwrap_err().is_not_found());
    assert!(!region.exists(&tpl, 0.95, true).unwrap());

    screen.set_frame(frame);
    region.invalidate_cache();
    assert!(region.find(&tpl, 0.95, true).is_ok());
}

#[test]
fn shift_region_searches_new_coordinates() {
    let frame = noise_frame(100, 80, 31);
    let (desktop, _) = desktop_for(frame.clone());
    let tpl = crop_template(&frame, "p", 70, 50, 12, 9);

    let mut region = Region::new(&desktop, 0, 0, 40, 30).unwrap();
    assert!(!region.exists(&tpl, 0.95, false).unwrap());

    region.shift_region(60, 40);
    let found = region.find(&tpl, 0.95, false).unwrap();
    assert_eq!(found.rect(), Rect::new(70, 50, 12, 9).unwrap());

    // The cache survives the shift: stale pixels, new origin.
    region.shift_region(0, 0);
    let stale = region.find(&tpl, 0.95, true).unwrap();
    assert_eq!((stale.x(), stale.y()), (10, 10));
    assert!(!region.exists(&tpl, 0.95, false).unwrap());
}

#[test]
fn matches_support_nested_searches() {
    let frame = noise_frame(80, 60, 17);
    let (desktop, _) = desktop_for(frame.clone());
    let mut region = Region::full_screen(&desktop).unwrap();
    let outer = crop_template(&frame, "outer", 20, 15, 30, 20);
    let inner = crop_template(&frame, "inner", 31, 22, 6, 5);

    let mut found = region.find(&outer, 0.95, false).unwrap();
    let nested = found.find(&inner, 0.95, false).unwrap();
    assert_eq!(nested.rect(), Rect::new(31, 22, 6, 5).unwrap());
    assert!(found.exists(&inner, 0.95, true).unwrap());

    let same = found.find(&outer, 0.95, true).unwrap();
    assert_eq!(same.rect(), found.rect());
}

#[test]
fn full_screen_search_finds_patches_at_the_far_edges() {
    let frame = noise_frame(400, 300, 41);
    let (desktop, _) = desktop_for(frame.clone());
    assert_eq!(desktop.settings().parallel, cfg!(feature = "rayon"));
    let mut region = Region::full_screen(&desktop).unwrap();

    for &(x, y) in &[(0u32, 0u32), (384, 284), (0, 284), (384, 0), (201, 133)] {
        let tpl = crop_template(&frame, "edge", x, y, 16, 16);
        let found = region.find(&tpl, 0.99, false).unwrap();
        assert_eq!((found.x(), found.y()), (x as i32, y as i32));
        assert!((found.similarity() - 1.0).abs() < 1e-4);
    }
}
