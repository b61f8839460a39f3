use super::*;

fn layer(n: u8) -> LayerConfig {
    LayerConfig {
        image: format!("layer{n}.png"),
        item_layer: n,
        ..LayerConfig::default()
    }
}

#[test]
fn sanitize_clamps_and_reports() {
    let mut cfg = layer(1);
    cfg.size = 5000.0;
    cfg.rotation1.speed = 0.0;
    cfg.rotation2.axis_x = f64::NAN;
    cfg.timezone.utc_offset = -20.0;

    let out = sanitize_layer(cfg);
    assert_eq!(out.config.size, MAX_SIZE);
    assert_eq!(out.config.rotation1.speed, MIN_SPEED);
    assert_eq!(out.config.rotation2.axis_x, 0.0);
    assert_eq!(out.config.timezone.utc_offset, -12.0);

    let paths: Vec<String> = out.adjustments.iter().map(|a| a.to_string()).collect();
    assert!(paths.iter().any(|p| p.starts_with("$.size:")));
    assert!(paths.iter().any(|p| p.starts_with("$.rotation1.speed:")));
    assert!(paths.iter().any(|p| p.starts_with("$.rotation2.axisX:")));
    assert!(paths.iter().any(|p| p.starts_with("$.timezone.utcOffset:")));
    assert_eq!(out.adjustments.len(), 4);
}

#[test]
fn sanitize_leaves_valid_layer_alone() {
    let out = sanitize_layer(layer(3));
    assert!(out.adjustments.is_empty());
    assert_eq!(out.config, layer(3));
}

#[test]
fn non_finite_size_reads_default() {
    let mut cfg = layer(1);
    cfg.size = f64::INFINITY;
    let out = sanitize_layer(cfg);
    assert_eq!(out.config.size, 100.0);
    assert_eq!(out.adjustments.len(), 1);
}

#[test]
fn validate_collects_all_errors() {
    let layers = vec![layer(1), layer(0), layer(1), layer(21), layer(2)];
    let errs = validate_layer_set(&layers).unwrap_err();
    assert_eq!(errs.errors.len(), 3);
    let text = errs.to_string();
    assert!(text.contains("$[1].itemLayer: 0 is outside 1..=20"));
    assert!(text.contains("$[2].itemLayer: itemLayer 1 already used by layer at index 0"));
    assert!(text.contains("$[3].itemLayer: 21 is outside"));
}

#[test]
fn validate_rejects_oversized_set() {
    let layers: Vec<LayerConfig> = (0..21).map(|i| layer((i % 20) + 1)).collect();
    let errs = validate_layer_set(&layers).unwrap_err();
    assert!(errs.errors[0].to_string().contains("21 layers given"));
}

#[test]
fn parse_layer_set_prefixes_indices() {
    let set = parse_layer_set(
        r#"{"layers": [
            {"image": "a.png", "itemLayer": 2},
            {"image": "b.png", "itemLayer": 5, "size": 0.1}
        ]}"#,
    )
    .unwrap();
    assert_eq!(set.layers.len(), 2);
    assert_eq!(set.adjustments.len(), 1);
    assert!(set.adjustments[0].to_string().starts_with("$[1].size:"));
    let ids: Vec<u8> = set.with_ids().map(|(id, _)| id.get()).collect();
    assert_eq!(ids, vec![2, 5]);
}

#[test]
fn parse_layer_set_reports_bad_json() {
    let err = parse_layer_set("{ nope").unwrap_err();
    assert!(matches!(err, crate::HorologeError::Serde(_)));
    let err = parse_layer_set(r#"[{"itemLayer": 1}, {"itemLayer": 1}]"#).unwrap_err();
    assert!(matches!(err, crate::HorologeError::Config(_)));
}
