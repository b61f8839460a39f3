use super::*;

fn id(n: u8) -> LayerId {
    LayerId::new(n).unwrap()
}

#[test]
fn insert_replace_remove_tracks_len() {
    let mut slots = LayerSlots::new();
    assert!(slots.is_empty());
    assert_eq!(slots.insert(id(3), "a"), None);
    assert_eq!(slots.insert(id(3), "b"), Some("a"));
    assert_eq!(slots.len(), 1);
    assert_eq!(slots.get(id(3)), Some(&"b"));
    assert!(!slots.contains(id(4)));
    assert_eq!(slots.remove(id(3)), Some("b"));
    assert_eq!(slots.remove(id(3)), None);
    assert!(slots.is_empty());
}

#[test]
fn iteration_is_in_z_order() {
    let mut slots = LayerSlots::new();
    for n in [20, 1, 7] {
        slots.insert(id(n), u32::from(n) * 10);
    }
    let order: Vec<u8> = slots.iter().map(|(k, _)| k.get()).collect();
    assert_eq!(order, vec![1, 7, 20]);

    for (_, v) in slots.iter_mut() {
        *v += 1;
    }
    assert_eq!(slots.get(id(20)), Some(&201));
}

#[test]
fn every_id_has_a_slot() {
    let mut slots = LayerSlots::new();
    for k in LayerId::all() {
        slots.insert(k, ());
    }
    assert_eq!(slots.len(), MAX_LAYERS);
    slots.clear();
    assert!(slots.is_empty());
    assert_eq!(slots.iter().count(), 0);
}
