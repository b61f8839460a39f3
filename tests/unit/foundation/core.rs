use super::*;

#[test]
fn layer_id_bounds() {
    assert!(LayerId::new(0).is_err());
    assert!(LayerId::new(1).is_ok());
    assert!(LayerId::new(20).is_ok());
    assert!(LayerId::new(21).is_err());
}

#[test]
fn layer_id_slot_mapping() {
    let id = LayerId::new(7).unwrap();
    assert_eq!(id.slot(), 6);
    assert_eq!(LayerId::from_slot(6), Some(id));
    assert_eq!(LayerId::from_slot(MAX_LAYERS), None);
    assert_eq!(LayerId::all().count(), MAX_LAYERS);
}

#[test]
fn layer_id_serde_rejects_out_of_range() {
    let id: LayerId = serde_json::from_str("3").unwrap();
    assert_eq!(id.get(), 3);
    assert_eq!(serde_json::to_string(&id).unwrap(), "3");
    assert!(serde_json::from_str::<LayerId>("25").is_err());
}
