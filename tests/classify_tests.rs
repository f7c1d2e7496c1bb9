use allocation_view::{AllocationState, Percentage, classify};

#[test]
fn boundary_is_exact() {
    assert_eq!(classify(Percentage::from_f64(99.999)), AllocationState::Under);
    assert_eq!(classify(Percentage::from_f64(100.0)), AllocationState::Exact);
    assert_eq!(classify(Percentage::from_whole(100)), AllocationState::Exact);
    assert_eq!(classify(Percentage::from_f64(100.001)), AllocationState::Over);
}

#[test]
fn zero_and_large_values() {
    assert_eq!(classify(Percentage::ZERO), AllocationState::Under);
    assert_eq!(classify(Percentage::from_whole(250)), AllocationState::Over);
}

#[test]
fn fractional_parts_sum_to_exactly_full() {
    // 0.1 + 0.2 style drift must not leak into the boundary test
    let parts = [33.3, 33.3, 33.4];
    let total: Percentage = parts.iter().map(|p| Percentage::from_f64(*p)).sum();
    assert_eq!(total, Percentage::FULL);
    assert_eq!(classify(total), AllocationState::Exact);
}

#[test]
fn state_names_are_snake_case() {
    assert_eq!(AllocationState::Under.to_string(), "under");
    assert_eq!(
        serde_json::to_string(&AllocationState::Over).unwrap(),
        "\"over\""
    );
}

#[test]
fn whole_percent_saturates_instead_of_overflowing() {
    assert_eq!(Percentage::from_whole(i64::MAX), Percentage::from_units(i64::MAX));
    assert_eq!(Percentage::from_whole(i64::MIN), Percentage::from_units(i64::MIN));
    assert_eq!(classify(Percentage::from_whole(i64::MAX)), AllocationState::Over);
}
