use super::*;
use crate::config::model::EffectFlags;

fn dual() -> LayerConfig {
    let mut cfg = LayerConfig {
        image: "gear.png".to_string(),
        ..LayerConfig::default()
    };
    cfg.rotation1.enabled = true;
    cfg.rotation2.enabled = true;
    cfg
}

#[test]
fn infer_roles() {
    let mut cfg = dual();
    assert_eq!(LayerProfile::infer(&cfg).role, LayerRole::Generic);
    cfg.rotation1.enabled = false;
    assert_eq!(LayerProfile::infer(&cfg).role, LayerRole::OrbitalSpecialist);
    cfg.rotation1.enabled = true;
    cfg.rotation2.enabled = false;
    assert_eq!(LayerProfile::infer(&cfg).role, LayerRole::SpinSpecialist);
    cfg.hand_type = HandType::Second;
    assert_eq!(LayerProfile::infer(&cfg).role, LayerRole::Hand);
}

#[test]
fn specialists_force_single_rotation() {
    let cfg = dual();
    let orbital = LayerProfile::new(LayerRole::OrbitalSpecialist).apply(&cfg);
    assert!(!orbital.rotation1.enabled && orbital.rotation2.enabled);
    let spin = LayerProfile::new(LayerRole::SpinSpecialist).apply(&cfg);
    assert!(spin.rotation1.enabled && !spin.rotation2.enabled);
    // Stored config untouched.
    assert!(cfg.rotation1.enabled && cfg.rotation2.enabled);
}

#[test]
fn generic_profile_borrows() {
    let cfg = dual();
    assert!(matches!(
        LayerProfile::default().apply(&cfg),
        Cow::Borrowed(_)
    ));
}

#[test]
fn pulse_yields_to_glow() {
    let mut cfg = dual();
    cfg.effects = EffectFlags {
        glow: true,
        pulse: true,
        ..EffectFlags::default()
    };
    let profile = LayerProfile {
        role: LayerRole::Generic,
        rules: ProfileRules {
            pulse_yields_to_glow: true,
            ..ProfileRules::default()
        },
    };
    let out = profile.apply(&cfg);
    assert!(out.effects.glow);
    assert!(!out.effects.pulse);
}

#[test]
fn speed_quantization_snaps_enabled_rotations_only() {
    let mut cfg = dual();
    cfg.rotation1.speed = 47.0;
    cfg.rotation2.speed = 13.0;
    let profile = LayerProfile {
        role: LayerRole::Generic,
        rules: ProfileRules {
            quantize_speed: Some(vec![]),
            ..ProfileRules::default()
        },
    };
    let out = profile.apply(&cfg);
    assert_eq!(out.rotation1.speed, 60.0);
    assert_eq!(out.rotation2.speed, 15.0);

    cfg.rotation2.enabled = false;
    let out = profile.apply(&cfg);
    assert_eq!(out.rotation2.speed, 13.0);

    let custom = LayerProfile {
        role: LayerRole::Generic,
        rules: ProfileRules {
            quantize_speed: Some(vec![10.0, 100.0]),
            ..ProfileRules::default()
        },
    };
    assert_eq!(custom.apply(&cfg).rotation1.speed, 10.0);
}
