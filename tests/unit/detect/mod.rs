use super::*;

#[test]
fn static_detector_replays_then_repeats_last() {
    let a = vec![FaceRect::new(1, 1, 5, 5)];
    let b = vec![FaceRect::new(2, 2, 6, 6), FaceRect::new(9, 9, 3, 3)];
    let mut det = StaticDetector::scripted(vec![a.clone(), b.clone()]);
    let frame = image::RgbImage::new(4, 4);
    assert_eq!(det.detect(&frame).unwrap(), a);
    assert_eq!(det.detect(&frame).unwrap(), b);
    assert_eq!(det.detect(&frame).unwrap(), b);

    let mut empty = StaticDetector::default();
    assert!(empty.detect(&frame).unwrap().is_empty());
}

#[test]
fn memory_source_yields_frames_failures_then_end() {
    let mut src = MemoryFrameSource::new([image::RgbImage::new(2, 2)]);
    src.push_failure("camera unplugged");
    src.push_frame(image::RgbImage::new(3, 3));

    assert_eq!(src.next_frame().unwrap().unwrap().width(), 2);
    assert!(matches!(src.next_frame(), Err(CatfaceError::Capture(_))));
    assert_eq!(src.next_frame().unwrap().unwrap().width(), 3);
    assert!(src.next_frame().unwrap().is_none());
}

#[test]
fn locate_cascade_prefers_explicit_then_search_order() {
    let dir = PathBuf::from("target").join("unit_detect");
    std::fs::create_dir_all(&dir).unwrap();
    let present = dir.join("model.xml");
    std::fs::write(&present, "<opencv_storage/>").unwrap();
    let missing = dir.join("nope.xml");

    assert_eq!(locate_cascade(Some(present.as_path()), &[]).unwrap(), present);
    assert_eq!(
        locate_cascade(Some(missing.as_path()), &[present.clone()]).unwrap(),
        present
    );
    assert_eq!(
        locate_cascade(None, &[missing.clone(), present.clone()]).unwrap(),
        present
    );
}

#[test]
fn locate_cascade_failure_lists_everything_tried() {
    let a = PathBuf::from("target/unit_detect/absent_a.xml");
    let b = PathBuf::from("target/unit_detect/absent_b.xml");
    let err = locate_cascade(Some(a.as_path()), std::slice::from_ref(&b)).unwrap_err();
    match err {
        CatfaceError::CascadeUnavailable { name, tried } => {
            assert_eq!(name, "absent_a.xml");
            assert_eq!(tried, vec![a, b]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = locate_cascade(None, &[]).unwrap_err();
    assert!(err.to_string().contains(DEFAULT_CASCADE_NAME));
}

#[test]
fn default_search_paths_cover_system_and_local() {
    let paths = default_cascade_search_paths(DEFAULT_CASCADE_NAME);
    assert_eq!(
        paths[0],
        PathBuf::from("/usr/share/opencv4/haarcascades/haarcascade_frontalface_default.xml")
    );
    assert!(paths.contains(&PathBuf::from(DEFAULT_CASCADE_NAME)));
}
