//! Assertion helpers for window state.

use reel_core::InstanceFactory;
use reel_foundation::RecyclerLayout;
use std::collections::HashSet;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that live items hold distinct instances and that each data index
/// follows the previous one, wrapping to 0 only when `wraps` allows it.
pub fn assert_window_consistent<F: InstanceFactory>(layout: &RecyclerLayout<F>, wraps: bool) {
    let items = layout.items();
    let instances: HashSet<_> = items.iter().map(|item| item.instance).collect();
    assert_eq!(
        instances.len(),
        items.len(),
        "instance used twice in window {:?}",
        indices(layout)
    );

    let total = layout.item_total();
    for pair in items.iter().collect::<Vec<_>>().windows(2) {
        let (prev, next) = (pair[0].data_index, pair[1].data_index);
        let expected = if wraps { (prev + 1) % total } else { prev + 1 };
        assert_eq!(
            next,
            expected,
            "window indices not contiguous: {:?}",
            indices(layout)
        );
    }
    for item in items {
        assert!(item.data_index < total, "index {} >= total {}", item.data_index, total);
    }
}

/// Assert that consecutive lines do not overlap along the flow and keep at
/// least `spacing` between them.
pub fn assert_lines_ordered<F: InstanceFactory>(layout: &RecyclerLayout<F>, spacing: f32) {
    let flow = layout.flow();
    let items = layout.items();
    for pair in items.iter().collect::<Vec<_>>().windows(2) {
        if pair[1].cross_slot == 0 {
            let gap = flow.leading_edge(&pair[1].bounds) - flow.trailing_edge(&pair[0].bounds);
            assert!(
                gap >= spacing - 1e-3,
                "items {} and {} are {} apart, expected at least {}",
                pair[0].data_index,
                pair[1].data_index,
                gap,
                spacing
            );
        }
    }
}

pub fn indices<F: InstanceFactory>(layout: &RecyclerLayout<F>) -> Vec<usize> {
    layout.items().iter().map(|item| item.data_index).collect()
}
