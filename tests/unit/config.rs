use super::*;

#[test]
fn default_layout_matches_calibration() {
    let l = SheetLayout::default();
    assert_eq!(l.row_bounds, vec![0, 189, 438, 667, 997]);
    assert_eq!(l.col_bounds, vec![0, 250, 500, 750, 1000]);
    assert_eq!(l.count, 16);
    l.validate().unwrap();
}

#[test]
fn uniform_layout_divides_evenly() {
    let l = SheetLayout::uniform(2, 3, 30, 20);
    assert_eq!(l.row_bounds, vec![0, 10, 20]);
    assert_eq!(l.col_bounds, vec![0, 10, 20, 30]);
    assert_eq!(l.count, 6);
    l.validate().unwrap();
}

#[test]
fn layout_rejects_bad_bounds() {
    let mut l = SheetLayout::default();
    l.row_bounds = vec![0, 200, 100, 667, 997];
    assert!(l.validate().is_err());

    let mut l = SheetLayout::default();
    l.col_bounds.pop();
    assert!(l.validate().is_err());

    let mut l = SheetLayout::default();
    l.count = 17;
    assert!(l.validate().is_err());

    let mut l = SheetLayout::default();
    l.col_bounds = vec![0, 250, 500, 750, 1200];
    assert!(l.validate().is_err());
}

#[test]
fn scale_limits_validate() {
    ScaleLimits::default().validate().unwrap();
    let bad = ScaleLimits {
        initial: 4.0,
        ..ScaleLimits::default()
    };
    assert!(bad.validate().is_err());
    assert!(ScaleLimits::default().contains(0.5));
    assert!(ScaleLimits::default().contains(3.0));
    assert!(!ScaleLimits::default().contains(3.5));
    assert!(!ScaleLimits::default().contains(f64::NAN));
}

#[test]
fn config_json_partial_override_uses_defaults() {
    let cfg = EffectConfig::from_json_str(
        r#"{ "key": { "max_saturation": 40 }, "resize_filter": "nearest" }"#,
    )
    .unwrap();
    assert_eq!(cfg.key.max_saturation, 40);
    assert_eq!(cfg.key.min_value, 180);
    assert_eq!(cfg.resize_filter, ResizeFilter::Nearest);
    assert_eq!(cfg.sheet, SheetLayout::default());
    assert_eq!(cfg.snapshot_dir, PathBuf::from("outputs"));
}

#[test]
fn config_json_rejects_unknown_fields_and_bad_iou() {
    assert!(EffectConfig::from_json_str(r#"{ "bogus": 1 }"#).is_err());
    assert!(EffectConfig::from_json_str(r#"{ "suppress_overlap_iou": 1.5 }"#).is_err());
    let cfg = EffectConfig::from_json_str(r#"{ "suppress_overlap_iou": 0.4 }"#).unwrap();
    assert_eq!(cfg.suppress_overlap_iou, Some(0.4));
}

#[test]
fn info_panel_defaults_and_shade_range() {
    let cfg = EffectConfig::from_json_str(r#"{ "info_panel": { "height": 120 } }"#).unwrap();
    assert_eq!(
        cfg.info_panel,
        Some(InfoPanel {
            height: 120,
            shade: 0.6
        })
    );
    assert_eq!(EffectConfig::default().info_panel, None);
    assert!(EffectConfig::from_json_str(r#"{ "info_panel": { "shade": 1.2 } }"#).is_err());
    assert!(EffectConfig::from_json_str(r#"{ "info_panel": { "alpha": 0.5 } }"#).is_err());
}
