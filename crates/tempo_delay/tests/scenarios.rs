//! End-to-end delay scenarios over a real stackup and profile store.

use std::sync::Arc;
use tempo_board::{
    GeometryContext, LineChain, MergeStatus, NetClass, RoutedItem, Stackup, StackupGeometry,
    StackupLayer,
};
use tempo_common::{LayerId, IU_PER_MM};
use tempo_delay::{DelayBreakdown, TimeDomainParameters, UserDefinedTimeDomain};
use tempo_profile::{
    DelayProfile, DelayProfileStore, SettingsObserver, ViaOverrideEntry, ViaOverrideKey,
};

const MM: i64 = 1_000_000;
const UM: i64 = 1_000;

fn l(n: u32) -> LayerId {
    LayerId::from_raw(n)
}

/// Four copper layers of zero thickness so heights are pure dielectric:
/// L0 / 0.2mm / L1 / 1.6mm / L2 / 0.2mm / L3.
fn stackup() -> Stackup {
    let copper = |id: u32, name: &str| StackupLayer::Copper {
        id: l(id),
        name: name.to_string(),
        thickness: 0,
    };
    let dielectric = |thickness: i64| StackupLayer::Dielectric {
        name: "core".to_string(),
        thickness,
    };
    Stackup::new(vec![
        copper(0, "F.Cu"),
        dielectric(200 * UM),
        copper(1, "In1.Cu"),
        dielectric(1600 * UM),
        copper(2, "In2.Cu"),
        dielectric(200 * UM),
        copper(3, "B.Cu"),
    ])
    .unwrap()
}

fn fast_profile() -> DelayProfile {
    DelayProfile::new("Fast")
        .with_layer_delay(l(0), 5.0)
        .with_layer_delay(l(1), 6.7)
        .with_layer_delay(l(3), 5.0)
        .with_via_delay(10.0)
        .with_via_override(ViaOverrideEntry::new(
            ViaOverrideKey::new((l(0), l(3)), (l(0), l(3))),
            120,
        ))
}

fn store() -> DelayProfileStore {
    std::iter::once(fast_profile()).collect()
}

fn params() -> UserDefinedTimeDomain<Stackup> {
    UserDefinedTimeDomain::with_store(stackup(), &store())
}

fn fast() -> Arc<NetClass> {
    Arc::new(NetClass::new("DDR", "Fast"))
}

fn track(class: &Arc<NetClass>, layer: u32, length: i64) -> RoutedItem {
    RoutedItem::line(
        Arc::clone(class),
        l(layer),
        LineChain::segment((0, 0), (length, 0)),
    )
}

#[test]
fn line_delay_on_layer_zero() {
    let class = fast();
    let item = track(&class, 0, 10 * MM);
    let ctx = GeometryContext::new(class, l(0));
    assert_eq!(params().propagation_delay(&item, &ctx), 50);
}

#[test]
fn via_override_beats_stackup_height() {
    let p = params();
    assert_eq!(p.geometry().stackup_height(l(0), l(3)), 2 * MM);

    let class = fast();
    let via = RoutedItem::via(Arc::clone(&class), l(0), l(3));
    let ctx = GeometryContext::new(class, l(0));
    assert_eq!(p.propagation_delay(&via, &ctx), 120);
}

#[test]
fn via_default_uses_height_between_signal_layers() {
    let p = params();
    let class = fast();
    let via = RoutedItem::via(Arc::clone(&class), l(1), l(2));
    let ctx = GeometryContext::new(class, l(1));
    assert_eq!(p.geometry().stackup_height(l(1), l(2)), 1600 * UM);
    assert_eq!(p.propagation_delay(&via, &ctx), 16);
}

#[test]
fn via_default_is_exact_formula() {
    let p = params();
    let class = fast();
    let via = RoutedItem::via_with_stack(Arc::clone(&class), (l(0), l(2)), (l(0), l(3)));
    let ctx = GeometryContext::new(class, l(0));
    let height = p.geometry().stackup_height(l(0), l(2));
    let expected = (10.0 * (height as f64 / IU_PER_MM)) as i64;
    assert_eq!(p.propagation_delay(&via, &ctx), expected);
    assert_eq!(expected, 18);
}

#[test]
fn pad_delay_with_and_without_profile() {
    let p = params();
    let timed = RoutedItem::pad(fast(), 25);
    let untimed_class = Arc::new(NetClass::new("GPIO", ""));
    let untimed = RoutedItem::pad(Arc::clone(&untimed_class), 25);
    assert_eq!(p.propagation_delay(&timed, &GeometryContext::new(fast(), l(0))), 25);
    assert_eq!(
        p.propagation_delay(&untimed, &GeometryContext::new(untimed_class, l(0))),
        25
    );
}

#[test]
fn batch_with_retired_tail() {
    let p = params();
    let class = fast();
    let slow = Arc::new(NetClass::new("Other", "Slow"));
    let line_a = track(&class, 0, 10 * MM);
    let line_b = track(&slow, 3, 4 * MM);
    let retired_c = track(&class, 0, 7 * MM).with_merge_status(MergeStatus::MergedRetired);

    let ctx = GeometryContext::new(Arc::clone(&class), l(0));
    let delays = p.propagation_delays(&[line_a.clone(), line_b.clone(), retired_c], &ctx);

    assert_eq!(delays.len(), 3);
    assert_eq!(delays[0], p.propagation_delay(&line_a, &ctx));
    // line_b's own class has no profile; the batch times it with "Fast".
    assert_eq!(p.propagation_delay(&line_b, &ctx), 0);
    assert_eq!(delays[1], 20);
    assert_eq!(delays[2], 0);
}

#[test]
fn batch_with_unresolved_first_item_is_all_zero() {
    let p = params();
    let untimed = Arc::new(NetClass::new("GPIO", "Missing"));
    let items = vec![
        track(&untimed, 0, MM),
        track(&fast(), 0, MM),
        RoutedItem::pad(fast(), 25),
    ];
    let ctx = GeometryContext::new(untimed, l(0));
    assert_eq!(p.propagation_delays(&items, &ctx), vec![0, 0, 0]);
}

#[test]
fn empty_batch_is_empty() {
    let ctx = GeometryContext::new(fast(), l(0));
    assert!(params().propagation_delays(&[], &ctx).is_empty());
}

#[test]
fn unknown_profile_length_for_delay_is_zero() {
    let ctx = GeometryContext::new(Arc::new(NetClass::new("X", "Unknown")), l(0));
    assert_eq!(params().track_length_for_delay(1000, &ctx), 0);
}

#[test]
fn retired_items_are_zero_whatever_the_profile() {
    let p = params();
    let class = fast();
    let ctx = GeometryContext::new(Arc::clone(&class), l(0));
    let retired = [
        track(&class, 0, 10 * MM),
        RoutedItem::via(Arc::clone(&class), l(0), l(3)),
        RoutedItem::via(Arc::clone(&class), l(1), l(2)),
        RoutedItem::pad(Arc::clone(&class), 25),
    ];
    for item in retired {
        let item = item.with_merge_status(MergeStatus::MergedRetired);
        assert_eq!(p.propagation_delay(&item, &ctx), 0);
    }
}

#[test]
fn length_round_trip_within_one_time_unit() {
    let p = params();
    let class = fast();
    let ctx = GeometryContext::new(Arc::clone(&class), l(1));
    let rate = 6.7;

    for length in [MM, 12_345_000, 37 * MM + 123, 250 * MM] {
        let item = track(&class, 1, length);
        let delay = p.propagation_delay(&item, &ctx);
        assert_eq!(delay, (rate * (length as f64 / IU_PER_MM)) as i64);

        let recovered = p.track_length_for_delay(delay, &ctx);
        let tolerance = (IU_PER_MM / rate).ceil() as i64;
        assert!(
            (length - recovered).abs() <= tolerance,
            "length {length} recovered as {recovered}"
        );
    }
}

#[test]
fn shape_delay_matches_committed_track() {
    let p = params();
    let class = fast();
    let ctx = GeometryContext::new(Arc::clone(&class), l(0));
    let shape = LineChain::new(vec![(0, 0), (3 * MM, 0), (3 * MM, 4 * MM), (6 * MM, 4 * MM)]);
    let item = RoutedItem::line(Arc::clone(&class), l(0), shape.clone());
    assert_eq!(p.delay_for_shape(&shape, &ctx), 50);
    assert_eq!(p.delay_for_shape(&shape, &ctx), p.propagation_delay(&item, &ctx));
}

#[test]
fn settings_change_is_visible_to_next_calculation() {
    let mut p = params();
    let class = fast();
    let ctx = GeometryContext::new(Arc::clone(&class), l(0));
    let item = track(&class, 0, 10 * MM);
    let via = RoutedItem::via(Arc::clone(&class), l(0), l(3));
    assert_eq!(p.propagation_delay(&item, &ctx), 50);
    assert_eq!(p.propagation_delay(&via, &ctx), 120);

    let mut edited = store();
    {
        let profile = &mut edited.profiles_mut()[0];
        profile.layer_delays.insert(l(0), 7.0);
        profile.via_overrides.clear();
    }
    p.on_settings_changed(&edited);

    assert_eq!(p.propagation_delay(&item, &ctx), 70);
    assert_eq!(p.propagation_delay(&via, &ctx), 20);
    assert_eq!(p.track_length_for_delay(70, &ctx), 10 * MM);
}

#[test]
fn breakdown_over_a_net() {
    let p = params();
    let class = fast();
    let ctx = GeometryContext::new(Arc::clone(&class), l(0));
    let items = vec![
        RoutedItem::pad(Arc::clone(&class), 25),
        track(&class, 0, 10 * MM),
        RoutedItem::via(Arc::clone(&class), l(0), l(3)),
        track(&class, 3, 2 * MM),
        RoutedItem::pad(Arc::clone(&class), 40),
    ];
    let b = DelayBreakdown::compute(&p, &items, &ctx);
    assert_eq!(b.track_delay, 60);
    assert_eq!(b.via_delay, 120);
    assert_eq!(b.pad_to_die_delay, 65);
    assert_eq!(b.total(), 245);
}

#[test]
fn provider_works_behind_trait_object() {
    let p: Box<dyn TimeDomainParameters> = Box::new(params());
    let class = fast();
    let ctx = GeometryContext::new(Arc::clone(&class), l(0));
    assert_eq!(p.propagation_delay(&track(&class, 0, 10 * MM), &ctx), 50);
    let b = DelayBreakdown::compute(p.as_ref(), &[track(&class, 0, MM)], &ctx);
    assert_eq!(b.total(), 5);
}
