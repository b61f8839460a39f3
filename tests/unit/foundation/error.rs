use super::*;
use crate::config::validate::{ConfigIssue, PathElem};

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HorologeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HorologeError::computation("x")
            .to_string()
            .contains("computation error:")
    );
    assert!(
        HorologeError::orchestrator("x")
            .to_string()
            .contains("orchestrator error:")
    );
    assert!(
        HorologeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HorologeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn config_errors_list_every_path() {
    let errs = ConfigErrors {
        errors: vec![
            ConfigIssue::at(
                &[PathElem::Index(0), PathElem::Field("itemLayer")],
                "out of range",
            ),
            ConfigIssue::at(&[PathElem::Index(2), PathElem::Field("itemLayer")], "dup"),
        ],
    };
    let msg = HorologeError::from(errs).to_string();
    assert!(msg.contains("$[0].itemLayer: out of range"));
    assert!(msg.contains("$[2].itemLayer: dup"));
}

#[test]
fn json_errors_become_serde() {
    let err: HorologeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, HorologeError::Serde(_)));
}
