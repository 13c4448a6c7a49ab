use super::*;

/// Three 40px cards with 8px gaps: midpoints at 20, 68, 116.
fn cards() -> Vec<ElementBounds> {
    vec![ElementBounds::new(0.0, 40.0), ElementBounds::new(48.0, 40.0), ElementBounds::new(96.0, 40.0)]
}

#[test]
fn above_first_midpoint_inserts_at_top() {
    assert_eq!(insertion_index(-10.0, &cards()), 0);
    assert_eq!(insertion_index(19.9, &cards()), 0);
}

#[test]
fn between_midpoints_picks_next_card() {
    assert_eq!(insertion_index(21.0, &cards()), 1);
    assert_eq!(insertion_index(67.0, &cards()), 1);
    assert_eq!(insertion_index(70.0, &cards()), 2);
}

#[test]
fn exactly_on_midpoint_falls_through() {
    assert_eq!(insertion_index(20.0, &cards()), 1);
    assert_eq!(insertion_index(116.0, &cards()), 3);
}

#[test]
fn below_last_midpoint_appends() {
    assert_eq!(insertion_index(500.0, &cards()), 3);
}

#[test]
fn empty_column_appends_at_zero() {
    assert_eq!(insertion_index(42.0, &[]), 0);
}

#[test]
fn nan_pointer_appends() {
    assert_eq!(insertion_index(f64::NAN, &cards()), 3);
}

#[test]
fn client_coordinates_convert_to_container_space() {
    let container_top = 200.0;
    let client: Vec<ElementBounds> = cards()
        .into_iter()
        .map(|b| ElementBounds::new(b.top + container_top, b.height).relative_to(container_top))
        .collect();
    assert_eq!(client, cards());
    assert_eq!(pointer_offset(270.0, container_top), 70.0);
    assert_eq!(insertion_index(pointer_offset(270.0, container_top), &client), 2);
}

#[test]
fn midpoint_is_half_height_below_top() {
    assert_eq!(ElementBounds::new(10.0, 30.0).midpoint(), 25.0);
}
