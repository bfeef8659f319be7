//! Tests for the chamber tree, ability stack, orb, event bus, and the
//! full engine pipeline.

use glam::DVec2;
use proptest::prelude::*;

use chroma_core::commands::OrbCommand;
use chroma_core::constants::*;
use chroma_core::enums::*;
use chroma_core::error::ChamberError;
use chroma_core::events::{EventKind, GameEvent};
use chroma_core::types::Rect;

use crate::abilities::{fold_layers, AbilityLayer, AbilitySet};
use crate::bus::EventBus;
use crate::chamber::ChamberTree;
use crate::engine::SimulationEngine;
use crate::level::Level;
use crate::objective::Objective;
use crate::objects::{Buff, Essence, Hazard};
use crate::orb::{DamageOutcome, Orb};

const ARENA: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1000.0,
    height: 800.0,
};

/// A single-leaf level with the orb spawning at the arena center.
fn leaf_level() -> Level {
    let tree = ChamberTree::with_leaf_root("Test Chamber", ARENA);
    Level::new(1, "Test Chamber", tree)
}

fn spawn() -> DVec2 {
    ARENA.center()
}

/// Start an engine on the given level and run the first tick.
fn start_engine(level: Level) -> SimulationEngine {
    let mut engine = SimulationEngine::new();
    engine.load_level(level);
    engine.queue_command(OrbCommand::StartSession);
    engine
}

fn event_kinds(events: &[GameEvent]) -> Vec<EventKind> {
    events.iter().map(|e| e.kind).collect()
}

// ---- Chamber tree ----

#[test]
fn test_leaf_rejects_children() {
    let mut tree = ChamberTree::with_leaf_root("Solo", ARENA);
    let root = tree.root();
    let err = tree
        .add_leaf(root, "Nested", Rect::new(0.0, 0.0, 10.0, 10.0))
        .unwrap_err();
    assert_eq!(err, ChamberError::LeafChild { id: root.0 });
}

#[test]
fn test_counts_and_completion_recursive() {
    let mut tree = ChamberTree::with_compound_root("Root", ARENA);
    let root = tree.root();
    let left = tree
        .add_leaf(root, "Left", Rect::new(0.0, 0.0, 500.0, 800.0))
        .unwrap();
    let right = tree
        .add_leaf(root, "Right", Rect::new(500.0, 0.0, 500.0, 800.0))
        .unwrap();

    for i in 0..3 {
        tree.add_essence(
            left,
            Essence::new(EssenceColor::Red, DVec2::new(100.0 + i as f64, 100.0), 10),
        )
        .unwrap();
        tree.add_essence(
            right,
            Essence::new(EssenceColor::Blue, DVec2::new(600.0 + i as f64, 100.0), 10),
        )
        .unwrap();
    }

    assert_eq!(tree.total_essences(root), 6);
    assert_eq!(tree.remaining_essences(root), 6);
    assert!(!tree.is_complete(root));
    assert_eq!(tree.completion_percent(root), 0.0);

    // Collect all three on the left, one on the right.
    for essence in &mut tree.chamber_mut(left).essences {
        essence.collected = true;
    }
    tree.chamber_mut(right).essences[0].collected = true;

    assert_eq!(tree.remaining_essences(root), 2);
    assert_eq!(tree.collected_essences(root), 4);
    assert_eq!(
        tree.remaining_essences(root) + tree.collected_essences(root),
        tree.total_essences(root)
    );
    // (3 + 1) / (3 + 3) = 66.67%
    assert!((tree.completion_percent(root) - 400.0 / 6.0).abs() < 1e-9);

    // Left subtree alone is done.
    assert!(tree.is_complete(left));
    assert_eq!(tree.completion_percent(left), 100.0);
}

#[test]
fn test_chamber_without_essences_is_complete() {
    let mut tree = ChamberTree::with_compound_root("Root", ARENA);
    let root = tree.root();
    tree.add_hazard(
        root,
        Hazard::new(HazardKind::Stationary, DVec2::new(10.0, 10.0), DVec2::new(50.0, 50.0)),
    )
    .unwrap();

    assert_eq!(tree.total_essences(root), 0);
    assert!(tree.is_complete(root));
    assert_eq!(tree.completion_percent(root), 100.0);
}

#[test]
fn test_pre_order_lists_parent_before_subtree() {
    let mut tree = ChamberTree::with_compound_root("Root", ARENA);
    let root = tree.root();
    let a = tree
        .add_compound(root, "A", Rect::new(0.0, 0.0, 500.0, 800.0))
        .unwrap();
    let a1 = tree
        .add_leaf(a, "A1", Rect::new(0.0, 0.0, 250.0, 800.0))
        .unwrap();
    let b = tree
        .add_leaf(root, "B", Rect::new(500.0, 0.0, 500.0, 800.0))
        .unwrap();

    assert_eq!(tree.pre_order(), vec![root, a, a1, b]);

    // Content union follows the same order.
    tree.add_essence(b, Essence::new(EssenceColor::Red, DVec2::new(600.0, 10.0), 1))
        .unwrap();
    tree.add_essence(a1, Essence::new(EssenceColor::Blue, DVec2::new(10.0, 10.0), 1))
        .unwrap();
    tree.add_essence(root, Essence::new(EssenceColor::Green, DVec2::new(1.0, 1.0), 1))
        .unwrap();

    let colors: Vec<EssenceColor> = tree.all_essences(root).iter().map(|e| e.color).collect();
    assert_eq!(
        colors,
        vec![EssenceColor::Green, EssenceColor::Blue, EssenceColor::Red]
    );
}

#[test]
fn test_remove_essence_searches_whole_subtree() {
    let mut tree = ChamberTree::with_compound_root("Root", ARENA);
    let root = tree.root();
    let inner = tree
        .add_compound(root, "Inner", Rect::new(0.0, 0.0, 500.0, 800.0))
        .unwrap();
    let deep = tree
        .add_leaf(inner, "Deep", Rect::new(0.0, 0.0, 250.0, 800.0))
        .unwrap();

    let id = tree
        .add_essence(deep, Essence::new(EssenceColor::Red, DVec2::new(10.0, 10.0), 5))
        .unwrap();

    // Removal is issued at the root; the owner is two levels down.
    assert!(tree.remove_essence(root, id));
    assert_eq!(tree.total_essences(root), 0);
    // Second removal finds nothing.
    assert!(!tree.remove_essence(root, id));

    // Buff removal walks the subtree the same way.
    let buff_id = tree
        .add_buff(deep, Buff::new(BuffKind::Magnet, DVec2::new(20.0, 20.0), 12.0))
        .unwrap();
    assert!(tree.remove_buff(root, buff_id));
    assert!(tree.all_buffs(root).is_empty());
}

#[test]
fn test_deepest_chamber_lookup() {
    let mut tree = ChamberTree::with_compound_root("Root", ARENA);
    let root = tree.root();
    let inner = tree
        .add_compound(root, "Inner", Rect::new(100.0, 100.0, 400.0, 400.0))
        .unwrap();
    let deep = tree
        .add_leaf(inner, "Deep", Rect::new(150.0, 150.0, 100.0, 100.0))
        .unwrap();

    assert_eq!(tree.deepest_chamber_at(DVec2::new(200.0, 200.0)), Some(deep));
    assert_eq!(tree.deepest_chamber_at(DVec2::new(120.0, 120.0)), Some(inner));
    assert_eq!(tree.deepest_chamber_at(DVec2::new(900.0, 700.0)), Some(root));
    assert_eq!(tree.deepest_chamber_at(DVec2::new(-5.0, 0.0)), None);
}

// ---- Game objects ----

#[test]
fn test_patrol_hazard_ping_pongs() {
    let mut hazard = Hazard::new(
        HazardKind::Patrol,
        DVec2::new(0.0, 0.0),
        DVec2::new(40.0, 40.0),
    )
    .with_patrol(DVec2::new(100.0, 0.0), 100.0);

    // One second to reach the end.
    for _ in 0..61 {
        hazard.update(DT);
    }
    assert!(!hazard.moving_to_end, "should have reversed at the endpoint");
    assert!(hazard.position.x <= 100.0);

    // Another second to come back.
    for _ in 0..61 {
        hazard.update(DT);
    }
    assert!(hazard.moving_to_end, "should have reversed at the start");
}

#[test]
fn test_rotating_hazard_wraps() {
    let mut hazard = Hazard::new(
        HazardKind::Rotating,
        DVec2::new(0.0, 0.0),
        DVec2::new(40.0, 40.0),
    );
    // 90 deg/s: five seconds = 450 degrees, wrapped to 90.
    for _ in 0..5 * TICK_RATE {
        hazard.update(DT);
    }
    assert!(hazard.rotation_deg >= 0.0 && hazard.rotation_deg < 360.0);
    assert!((hazard.rotation_deg - 90.0).abs() < 1.0);
}

#[test]
fn test_pulsing_hazard_collides_with_visual_extent() {
    let mut hazard = Hazard::new(
        HazardKind::Pulsing,
        DVec2::new(0.0, 0.0),
        DVec2::new(100.0, 100.0),
    );
    // Drive the pulse to its maximum (sin = 1 at phase PI/2).
    hazard.pulse_phase = std::f64::consts::FRAC_PI_2;
    let visual = hazard.visual_extent();
    assert!((visual.x - 130.0).abs() < 1e-9);

    // A circle just beyond the base extent but inside the swollen one.
    let probe = DVec2::new(115.0, 50.0);
    assert!(hazard.collides_with_circle(probe, 5.0));

    // At minimum pulse the same probe is clear.
    hazard.pulse_phase = -std::f64::consts::FRAC_PI_2;
    assert!(!hazard.collides_with_circle(probe, 5.0));
}

#[test]
fn test_essence_pull_toward() {
    let mut essence = Essence::new(EssenceColor::Red, DVec2::new(100.0, 0.0), 10);
    let target = DVec2::ZERO;
    let before = essence.position.distance(target);
    essence.pull_toward(target, 150.0, 0.1);
    let after = essence.position.distance(target);
    assert!((before - after - 15.0).abs() < 1e-9, "pull moves at strength * dt");
}

// ---- Ability stack ----

#[test]
fn test_base_set() {
    let base = AbilitySet::base();
    assert_eq!(base.speed, BASE_SPEED);
    assert_eq!(base.absorption_range, BASE_ABSORPTION_RANGE);
    assert_eq!(base.mitigation_pct, 0.0);
    assert_eq!(base.score_multiplier, 1.0);
    assert_eq!(base.magnet_strength, 0.0);
    assert!(!base.multi_absorb);
}

#[test]
fn test_layer_combinators() {
    let layers = vec![
        AbilityLayer::permanent(BuffKind::SpeedBoost),
        AbilityLayer::permanent(BuffKind::Shield),
        AbilityLayer::permanent(BuffKind::Magnet),
        AbilityLayer::permanent(BuffKind::MultiAbsorb),
        AbilityLayer::permanent(BuffKind::ScoreMultiplier),
        AbilityLayer::permanent(BuffKind::RangeBoost),
    ];
    let set = fold_layers(&layers);
    assert_eq!(set.speed, BASE_SPEED * 1.5);
    assert_eq!(set.mitigation_pct, 50.0);
    assert_eq!(set.magnet_strength, 150.0);
    assert!(set.multi_absorb);
    assert_eq!(set.score_multiplier, 2.0);
    // Magnet widens range 1.5x, RangeBoost doubles it.
    assert_eq!(set.absorption_range, BASE_ABSORPTION_RANGE * 1.5 * 2.0);
}

#[test]
fn test_shield_stacking_caps_at_90() {
    let layers: Vec<AbilityLayer> = (0..5)
        .map(|_| AbilityLayer::permanent(BuffKind::Shield))
        .collect();
    let set = fold_layers(&layers);
    assert_eq!(set.mitigation_pct, 90.0);
}

#[test]
fn test_magnet_strength_stacks_additively() {
    let layers = vec![
        AbilityLayer::permanent(BuffKind::Magnet),
        AbilityLayer::permanent(BuffKind::Magnet),
    ];
    let set = fold_layers(&layers);
    assert_eq!(set.magnet_strength, 300.0);
}

#[test]
fn test_permanent_layer_never_expires() {
    let mut layer = AbilityLayer::permanent(BuffKind::MultiAbsorb);
    for _ in 0..100_000 {
        assert!(layer.tick(1.0));
    }
}

#[test]
fn test_expiry_rebuild_preserves_survivors() {
    // SpeedBoost (10s) then RangeBoost (permanent): after the boost
    // expires, the doubled range survives and speed returns to base.
    let mut orb = Orb::new(DVec2::ZERO);
    orb.push_layer(AbilityLayer::timed(BuffKind::SpeedBoost, 10.0));
    orb.push_layer(AbilityLayer::permanent(BuffKind::RangeBoost));

    assert_eq!(orb.abilities().speed, BASE_SPEED * 1.5);
    assert_eq!(orb.abilities().absorption_range, BASE_ABSORPTION_RANGE * 2.0);

    let mut expired = Vec::new();
    for _ in 0..11 * TICK_RATE {
        expired.extend(orb.update(DT));
    }
    assert_eq!(expired, vec![BuffKind::SpeedBoost]);
    assert_eq!(orb.layers().len(), 1);
    assert_eq!(orb.abilities().speed, BASE_SPEED);
    assert_eq!(orb.abilities().absorption_range, BASE_ABSORPTION_RANGE * 2.0);
}

proptest! {
    /// The per-field combinators are commutative: any ordering of the
    /// same layer multiset folds to the same scalars.
    #[test]
    fn prop_fold_is_order_independent(
        kinds in proptest::collection::vec(0usize..6, 0..12).prop_shuffle()
    ) {
        let layers: Vec<AbilityLayer> = kinds
            .iter()
            .map(|&i| AbilityLayer::permanent(BuffKind::ALL[i]))
            .collect();
        let mut sorted = kinds.clone();
        sorted.sort_unstable();
        let sorted_layers: Vec<AbilityLayer> = sorted
            .iter()
            .map(|&i| AbilityLayer::permanent(BuffKind::ALL[i]))
            .collect();

        prop_assert_eq!(fold_layers(&layers), fold_layers(&sorted_layers));
    }

    /// Letting one layer expire on the orb and rebuilding the chain
    /// yields the same scalars as if that layer had never been applied.
    #[test]
    fn prop_expired_layer_leaves_no_trace(
        kinds in proptest::collection::vec(0usize..6, 1..10),
        remove in 0usize..10,
    ) {
        let remove = remove % kinds.len();
        let mut orb = Orb::new(DVec2::ZERO);
        for (i, &k) in kinds.iter().enumerate() {
            // The chosen layer gets a short timer; the rest are permanent.
            let layer = if i == remove {
                AbilityLayer::timed(BuffKind::ALL[k], 0.5)
            } else {
                AbilityLayer::permanent(BuffKind::ALL[k])
            };
            orb.push_layer(layer);
        }

        // One simulated second: the timed layer expires and the chain
        // is rebuilt oldest-first from the base.
        for _ in 0..TICK_RATE {
            orb.update(DT);
        }

        let never_applied: Vec<AbilityLayer> = kinds
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != remove)
            .map(|(_, &k)| AbilityLayer::permanent(BuffKind::ALL[k]))
            .collect();

        prop_assert_eq!(*orb.abilities(), fold_layers(&never_applied));
    }

    /// Mitigation never exceeds the cap, whatever the stack holds.
    #[test]
    fn prop_mitigation_capped(
        kinds in proptest::collection::vec(0usize..6, 0..32)
    ) {
        let layers: Vec<AbilityLayer> = kinds
            .iter()
            .map(|&i| AbilityLayer::permanent(BuffKind::ALL[i]))
            .collect();
        let set = fold_layers(&layers);
        prop_assert!(set.mitigation_pct <= MITIGATION_CAP_PCT);
        prop_assert!(set.mitigation_pct >= 0.0);
    }
}

// ---- Orb ----

#[test]
fn test_damage_mitigation_and_floor() {
    let mut orb = Orb::new(DVec2::ZERO);
    orb.push_layer(AbilityLayer::permanent(BuffKind::Shield));

    match orb.take_damage(20) {
        DamageOutcome::Taken { dealt, died } => {
            assert_eq!(dealt, 10, "50% mitigation halves the hit");
            assert!(!died);
        }
        other => panic!("expected damage, got {other:?}"),
    }
    assert_eq!(orb.health(), 90);
}

#[test]
fn test_invincibility_window_after_hit() {
    let mut orb = Orb::new(DVec2::ZERO);

    assert!(matches!(
        orb.take_damage(20),
        DamageOutcome::Taken { dealt: 20, died: false }
    ));
    assert_eq!(orb.health(), 80);
    assert!(orb.is_invincible());

    // Immediate second hit is swallowed.
    assert_eq!(orb.take_damage(50), DamageOutcome::Blocked);
    assert_eq!(orb.health(), 80);

    // Window expires after 1.5 seconds of updates.
    let ticks = (INVINCIBILITY_SECS / DT) as u32 + 2;
    for _ in 0..ticks {
        orb.update(DT);
    }
    assert!(!orb.is_invincible());
    assert!(matches!(orb.take_damage(20), DamageOutcome::Taken { .. }));
    assert_eq!(orb.health(), 60);
}

#[test]
fn test_health_floors_at_zero_and_signals_death() {
    let mut orb = Orb::new(DVec2::ZERO);
    match orb.take_damage(500) {
        DamageOutcome::Taken { died, .. } => assert!(died),
        other => panic!("expected lethal damage, got {other:?}"),
    }
    assert_eq!(orb.health(), 0);
    assert!(!orb.is_alive());
}

#[test]
fn test_heal_clamps_to_max() {
    let mut orb = Orb::new(DVec2::ZERO);
    orb.take_damage(30);
    assert_eq!(orb.heal(100), 30);
    assert_eq!(orb.health(), ORB_MAX_HEALTH);
}

#[test]
fn test_score_multiplier_floors_to_integer() {
    let mut orb = Orb::new(DVec2::ZERO);
    orb.push_layer(AbilityLayer::permanent(BuffKind::ScoreMultiplier));
    assert_eq!(orb.add_score(7), 14);
    assert_eq!(orb.score(), 14);
}

#[test]
fn test_movement_normalizes_diagonals() {
    let mut orb = Orb::new(DVec2::ZERO);
    orb.input.right = true;
    orb.input.down = true;
    orb.update(1.0);

    // Fire state: 200 * 1.2 = 240 units in one second, along the diagonal.
    let expected = 240.0;
    assert!((orb.velocity.length() - expected).abs() < 1e-9);
    assert!((orb.position.length() - expected).abs() < 1e-9);
    assert!((orb.position.x - orb.position.y).abs() < 1e-9);
}

#[test]
fn test_fire_burst_doubles_speed_temporarily() {
    let mut orb = Orb::new(DVec2::ZERO);
    let base = orb.effective_speed();
    orb.use_special();
    assert!((orb.effective_speed() - base * 2.0).abs() < 1e-9);

    for _ in 0..(FIRE_BURST_SECS / DT) as u32 + 2 {
        orb.update(DT);
    }
    assert!((orb.effective_speed() - base).abs() < 1e-9);
}

#[test]
fn test_earth_bulwark_blocks_all_damage() {
    let mut orb = Orb::new(DVec2::ZERO);
    orb.transmute(Element::Earth);
    orb.use_special();
    assert!(orb.is_shielded());
    assert_eq!(orb.take_damage(80), DamageOutcome::Blocked);
    assert_eq!(orb.health(), ORB_MAX_HEALTH);

    for _ in 0..(EARTH_SHIELD_SECS / DT) as u32 + 2 {
        orb.update(DT);
    }
    assert!(!orb.is_shielded());
}

#[test]
fn test_air_dash_overrides_input_movement() {
    let mut orb = Orb::new(DVec2::ZERO);
    orb.transmute(Element::Air);
    orb.input.up = true;
    orb.use_special();
    assert!(orb.is_dashing());

    // Idle at activation, so the dash heads +X; input is ignored while
    // the dash runs. The dash advances in whole steps, so allow a
    // couple of extra ticks for the terminal step and the flag flip.
    let dash_ticks = (AIR_DASH_DISTANCE / (DASH_SPEED * DT)).ceil() as u32 + 2;
    for _ in 0..dash_ticks {
        orb.update(DT);
    }
    assert!(!orb.is_dashing());
    assert!(orb.position.x >= AIR_DASH_DISTANCE - 1e-6);
    // Vertical drift only resumes once the dash has finished.
    let x_after_dash = orb.position.x;
    orb.update(DT);
    assert!((orb.position.x - x_after_dash).abs() < 1e-9);
    assert!(orb.position.y < 0.0);
}

#[test]
fn test_transmute_records_previous_element() {
    let mut orb = Orb::new(DVec2::ZERO);
    assert_eq!(orb.previous_element(), None);
    assert_eq!(orb.transmute(Element::Water), Some(Element::Fire));
    assert_eq!(orb.previous_element(), Some(Element::Fire));
    // No-op switch leaves the bookkeeping alone.
    assert_eq!(orb.transmute(Element::Water), None);
    assert_eq!(orb.previous_element(), Some(Element::Fire));
}

// ---- Event bus ----

#[test]
fn test_bus_kind_subscribers_before_global() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let mut bus = EventBus::new();

    let o1 = Rc::clone(&order);
    bus.subscribe_all_fn(move |_| {
        o1.borrow_mut().push("global");
        Ok(())
    });
    let o2 = Rc::clone(&order);
    bus.subscribe_fn(EventKind::ScoreChanged, move |_| {
        o2.borrow_mut().push("kind-first");
        Ok(())
    });
    let o3 = Rc::clone(&order);
    bus.subscribe_fn(EventKind::ScoreChanged, move |_| {
        o3.borrow_mut().push("kind-second");
        Ok(())
    });

    let event = GameEvent::new(EventKind::ScoreChanged, Default::default());
    bus.publish(&event);

    assert_eq!(
        *order.borrow(),
        vec!["kind-first", "kind-second", "global"],
        "kind subscribers run in subscription order, before globals"
    );
}

#[test]
fn test_bus_failing_subscriber_does_not_stop_dispatch() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let reached: Rc<RefCell<bool>> = Rc::new(RefCell::new(false));
    let mut bus = EventBus::new();

    bus.subscribe_fn(EventKind::OrbDied, |_| Err("subscriber exploded".into()));
    let flag = Rc::clone(&reached);
    bus.subscribe_fn(EventKind::OrbDied, move |_| {
        *flag.borrow_mut() = true;
        Ok(())
    });

    bus.publish(&GameEvent::new(EventKind::OrbDied, Default::default()));
    assert!(*reached.borrow(), "later subscribers still notified");
}

#[test]
fn test_bus_unsubscribe_and_counts() {
    let mut bus = EventBus::new();
    let id = bus.subscribe_fn(EventKind::HazardHit, |_| Ok(()));
    bus.subscribe_all_fn(|_| Ok(()));
    assert_eq!(bus.subscriber_count(EventKind::HazardHit), 2);

    bus.unsubscribe(id);
    assert_eq!(bus.subscriber_count(EventKind::HazardHit), 1);
}

#[test]
fn test_bus_history_is_bounded() {
    let mut bus = EventBus::new();
    for _ in 0..EVENT_HISTORY_MAX + 50 {
        bus.publish(&GameEvent::new(EventKind::ScoreChanged, Default::default()));
    }
    assert_eq!(bus.history().count(), EVENT_HISTORY_MAX);
}

// ---- Engine scenarios ----

#[test]
fn test_compatible_essence_absorbed_on_first_tick() {
    // Fire orb at the spawn, one RED essence 5 units away, absorption
    // range 30.
    let mut level = leaf_level();
    let root = level.tree.root();
    level
        .tree
        .add_essence(
            root,
            Essence::new(EssenceColor::Red, spawn() + DVec2::new(5.0, 0.0), 10),
        )
        .unwrap();

    let mut engine = start_engine(level);
    let snap = engine.tick();

    assert_eq!(snap.orb.essences_collected, 1);
    assert_eq!(snap.orb.score, 10, "pointValue x multiplier 1.0");
    assert!(snap.chambers[0].essences[0].collected);
    let kinds = event_kinds(&snap.events);
    assert!(kinds.contains(&EventKind::EssenceAbsorbed));
    assert!(kinds.contains(&EventKind::ScoreChanged));
}

#[test]
fn test_incompatible_color_never_absorbed() {
    // BLUE essence right next to a Fire orb: never absorbed.
    let mut level = leaf_level();
    let root = level.tree.root();
    level
        .tree
        .add_essence(
            root,
            Essence::new(EssenceColor::Blue, spawn() + DVec2::new(5.0, 0.0), 10),
        )
        .unwrap();

    let mut engine = start_engine(level);
    for _ in 0..120 {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.orb.essences_collected, 0);
    assert!(!snap.chambers[0].essences[0].collected);
}

#[test]
fn test_single_absorption_per_tick_without_multi() {
    // Three eligible essences in range at once: one per tick.
    let mut level = leaf_level();
    let root = level.tree.root();
    for i in 0..3 {
        level
            .tree
            .add_essence(
                root,
                Essence::new(
                    EssenceColor::Red,
                    spawn() + DVec2::new(10.0 + i as f64, 0.0),
                    10,
                ),
            )
            .unwrap();
    }

    let mut engine = start_engine(level);
    let snap = engine.tick();
    assert_eq!(snap.orb.essences_collected, 1);
    let snap = engine.tick();
    assert_eq!(snap.orb.essences_collected, 2);
    let snap = engine.tick();
    assert_eq!(snap.orb.essences_collected, 3);
}

#[test]
fn test_multi_absorb_collects_several_in_one_tick() {
    let mut level = leaf_level();
    let root = level.tree.root();
    // The pickup sits on the spawn point; essences wait outside
    // absorption range until the orb walks over.
    level
        .tree
        .add_buff(root, Buff::new(BuffKind::MultiAbsorb, spawn(), 30.0))
        .unwrap();
    for i in 0..3 {
        level
            .tree
            .add_essence(
                root,
                Essence::new(
                    EssenceColor::Red,
                    spawn() + DVec2::new(100.0 + i as f64, 0.0),
                    10,
                ),
            )
            .unwrap();
    }

    let mut engine = start_engine(level);
    let snap = engine.tick();
    assert_eq!(snap.orb.essences_collected, 0);
    assert!(
        snap.orb.layers.iter().any(|l| l.kind == BuffKind::MultiAbsorb),
        "pickup granted the layer"
    );

    // Walk right until all three are inside the absorption range.
    engine.queue_command(OrbCommand::SetMoveRight { pressed: true });
    let mut collected_jump = false;
    for _ in 0..120 {
        let before = engine.orb().essences_collected();
        let snap = engine.tick();
        if snap.orb.essences_collected >= before + 2 {
            collected_jump = true;
            break;
        }
    }
    assert!(
        collected_jump,
        "multi-absorb should collect several essences in a single tick"
    );
}

#[test]
fn test_magnet_pulls_distant_essence_into_range() {
    let mut level = leaf_level();
    let root = level.tree.root();
    level
        .tree
        .add_buff(root, Buff::new(BuffKind::Magnet, spawn(), 60.0))
        .unwrap();
    // Inside the pull radius (150) but outside even the widened
    // absorption range (30 * 1.5 = 45 + essence radius).
    level
        .tree
        .add_essence(
            root,
            Essence::new(EssenceColor::Red, spawn() + DVec2::new(120.0, 0.0), 10),
        )
        .unwrap();

    let mut engine = start_engine(level);
    engine.tick();
    let d0 = engine.level().unwrap().tree.all_essences(root)[0]
        .position
        .distance(spawn());

    engine.tick();
    let d1 = engine.level().unwrap().tree.all_essences(root)[0]
        .position
        .distance(spawn());
    assert!(d1 < d0, "magnet pulls the essence closer each tick");

    // 120 units at 150 u/s: absorbed well within two simulated seconds.
    let mut absorbed = false;
    for _ in 0..2 * TICK_RATE {
        let snap = engine.tick();
        if snap.orb.essences_collected == 1 {
            absorbed = true;
            break;
        }
    }
    assert!(absorbed, "pulled essence ends up absorbed");
}

#[test]
fn test_hazard_hit_and_invincibility_window() {
    let mut level = leaf_level();
    let root = level.tree.root();
    // A rotating hazard (damage 20) squarely on the spawn point.
    level
        .tree
        .add_hazard(
            root,
            Hazard::new(
                HazardKind::Rotating,
                spawn() - DVec2::new(20.0, 20.0),
                DVec2::new(40.0, 40.0),
            ),
        )
        .unwrap();

    let mut engine = start_engine(level);
    let snap = engine.tick();
    assert_eq!(snap.orb.health, 80);
    assert!(snap.orb.invincible);
    let kinds = event_kinds(&snap.events);
    assert!(kinds.contains(&EventKind::HazardHit));
    assert!(kinds.contains(&EventKind::OrbDamaged));

    // Still overlapping on the next tick, but inside the window.
    let snap = engine.tick();
    assert_eq!(snap.orb.health, 80, "no further loss inside the window");
    let kinds = event_kinds(&snap.events);
    assert!(kinds.contains(&EventKind::HazardHit), "hit still registers");
    assert!(!kinds.contains(&EventKind::OrbDamaged));

    // After the window expires the next overlap bites again.
    for _ in 0..(INVINCIBILITY_SECS / DT) as u32 + 2 {
        engine.tick();
    }
    assert_eq!(engine.orb().health(), 60);
}

#[test]
fn test_phasing_skips_hazard_pass() {
    let mut level = leaf_level();
    let root = level.tree.root();
    level
        .tree
        .add_hazard(
            root,
            Hazard::new(
                HazardKind::Stationary,
                spawn() - DVec2::new(20.0, 20.0),
                DVec2::new(40.0, 40.0),
            ),
        )
        .unwrap();

    let mut engine = start_engine(level);
    engine.queue_command(OrbCommand::Transmute {
        element: Element::Water,
    });
    engine.queue_command(OrbCommand::UseSpecial);

    // Phasing for 3 seconds: no hit at all.
    for _ in 0..(WATER_PHASE_SECS / DT) as u32 - 2 {
        let snap = engine.tick();
        assert!(snap.orb.phasing);
        assert!(!event_kinds(&snap.events).contains(&EventKind::HazardHit));
        assert_eq!(snap.orb.health, ORB_MAX_HEALTH);
    }
}

#[test]
fn test_death_halts_ticks_until_restart() {
    let mut level = leaf_level();
    let root = level.tree.root();
    level
        .tree
        .add_hazard(
            root,
            Hazard::new(
                HazardKind::Rotating,
                spawn() - DVec2::new(20.0, 20.0),
                DVec2::new(40.0, 40.0),
            ),
        )
        .unwrap();

    let mut engine = start_engine(level);

    // 100 health / 20 per window: five windows kill the orb.
    let mut died_events = 0;
    for _ in 0..10 * TICK_RATE {
        let snap = engine.tick();
        died_events += snap
            .events
            .iter()
            .filter(|e| e.kind == EventKind::OrbDied)
            .count();
        if snap.phase == GamePhase::GameOver {
            break;
        }
    }
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.orb().health(), 0);
    assert_eq!(died_events, 1, "death announced exactly once");

    // Time is frozen until the session restarts.
    let frozen = engine.time().tick;
    for _ in 0..30 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, frozen);

    engine.queue_command(OrbCommand::StartSession);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.orb.health, ORB_MAX_HEALTH);
    assert_eq!(snap.orb.score, 0);
}

#[test]
fn test_buff_pickup_requires_body_contact() {
    let mut level = leaf_level();
    let root = level.tree.root();
    // 45 units out: inside absorption range (30 + essence radius) but
    // outside body contact (20 + 18 = 38).
    level
        .tree
        .add_buff(
            root,
            Buff::new(BuffKind::SpeedBoost, spawn() + DVec2::new(45.0, 0.0), 10.0),
        )
        .unwrap();

    let mut engine = start_engine(level);
    let snap = engine.tick();
    assert!(snap.orb.layers.is_empty(), "absorption range must not collect buffs");

    // Walk into it.
    engine.queue_command(OrbCommand::SetMoveRight { pressed: true });
    let mut collected = false;
    for _ in 0..TICK_RATE {
        let snap = engine.tick();
        if !snap.orb.layers.is_empty() {
            assert_eq!(snap.orb.layers[0].kind, BuffKind::SpeedBoost);
            let kinds = event_kinds(&snap.events);
            assert!(kinds.contains(&EventKind::BuffCollected));
            assert!(kinds.contains(&EventKind::LayerApplied));
            collected = true;
            break;
        }
    }
    assert!(collected);
}

#[test]
fn test_transmute_emits_event_and_noop_is_silent() {
    let mut engine = start_engine(leaf_level());
    engine.tick();

    engine.queue_command(OrbCommand::UseSpecial); // start Fire's cooldown
    engine.tick();
    let cooldown = engine.orb().special_cooldown_secs();
    assert!(cooldown > 0.0);

    // Naming the active element: nothing happens, cooldown untouched
    // (minus the tick that elapses).
    engine.queue_command(OrbCommand::Transmute {
        element: Element::Fire,
    });
    let snap = engine.tick();
    assert!(!event_kinds(&snap.events).contains(&EventKind::OrbTransmuted));
    assert!((engine.orb().special_cooldown_secs() - (cooldown - DT)).abs() < 1e-9);

    // A real switch fires the event and resets the cooldown.
    engine.queue_command(OrbCommand::Transmute {
        element: Element::Air,
    });
    let snap = engine.tick();
    let transmutes: Vec<&GameEvent> = snap
        .events
        .iter()
        .filter(|e| e.kind == EventKind::OrbTransmuted)
        .collect();
    assert_eq!(transmutes.len(), 1);
    assert_eq!(transmutes[0].get_str("oldElement"), Some("FIRE"));
    assert_eq!(transmutes[0].get_str("newElement"), Some("AIR"));
    assert_eq!(engine.orb().special_cooldown_secs(), 0.0);
}

#[test]
fn test_orb_clamped_to_arena() {
    let mut engine = start_engine(leaf_level());
    engine.queue_command(OrbCommand::SetMoveLeft { pressed: true });
    engine.queue_command(OrbCommand::SetMoveUp { pressed: true });

    // Long enough to cross the whole arena.
    for _ in 0..10 * TICK_RATE {
        engine.tick();
    }
    let snap = engine.tick();
    assert_eq!(snap.orb.position.x, ARENA.x + ORB_RADIUS);
    assert_eq!(snap.orb.position.y, ARENA.y + ORB_RADIUS);
}

#[test]
fn test_objective_gates_on_aggregate_count_not_color() {
    // The requirement map names RED, but collecting two BLUE essences
    // satisfies it: completion is keyed on the aggregate count and the
    // per-color breakdown is informational only.
    let mut level = leaf_level();
    let root = level.tree.root();
    for i in 0..2 {
        level
            .tree
            .add_essence(
                root,
                Essence::new(EssenceColor::Blue, spawn() + DVec2::new(8.0 + i as f64, 0.0), 10),
            )
            .unwrap();
    }
    level.add_objective(Objective::new("Crimson Pair", "Collect 2 red essences", 100).require(EssenceColor::Red, 2));

    let mut engine = start_engine(level);
    engine.queue_command(OrbCommand::Transmute {
        element: Element::Water,
    });

    let mut completed = false;
    for _ in 0..TICK_RATE {
        let snap = engine.tick();
        if event_kinds(&snap.events).contains(&EventKind::ObjectiveCompleted) {
            assert_eq!(snap.orb.essences_collected, 2);
            assert!(snap.objectives[0].satisfied);
            // 2 x 10 points + 100 bonus
            assert_eq!(snap.orb.score, 120);
            completed = true;
            break;
        }
    }
    assert!(completed);
}

#[test]
fn test_level_completion_announced_once() {
    let mut level = leaf_level();
    let root = level.tree.root();
    level
        .tree
        .add_essence(
            root,
            Essence::new(EssenceColor::Red, spawn() + DVec2::new(5.0, 0.0), 10),
        )
        .unwrap();

    let mut engine = start_engine(level);
    let snap = engine.tick();
    let kinds = event_kinds(&snap.events);
    assert!(kinds.contains(&EventKind::ChamberCleared));
    assert!(kinds.contains(&EventKind::LevelCompleted));
    assert_eq!(snap.completion_percent, 100.0);

    // Further ticks stay quiet.
    for _ in 0..30 {
        let snap = engine.tick();
        assert!(!event_kinds(&snap.events).contains(&EventKind::LevelCompleted));
    }
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = start_engine(leaf_level());
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10);

    engine.queue_command(OrbCommand::Pause);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 10, "time frozen while paused");
    assert_eq!(engine.phase(), GamePhase::Paused);

    engine.queue_command(OrbCommand::Resume);
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, 20);
}

#[test]
fn test_start_session_requires_level() {
    let mut engine = SimulationEngine::new();
    engine.queue_command(OrbCommand::StartSession);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Menu);
}

#[test]
fn test_determinism_same_command_sequence() {
    let build = || {
        let mut level = leaf_level();
        let root = level.tree.root();
        for i in 0..5 {
            level
                .tree
                .add_essence(
                    root,
                    Essence::new(
                        EssenceColor::ALL[i % 8],
                        spawn() + DVec2::new(60.0 * i as f64 - 120.0, 40.0),
                        10,
                    ),
                )
                .unwrap();
        }
        level
            .tree
            .add_hazard(
                root,
                Hazard::new(
                    HazardKind::Patrol,
                    DVec2::new(100.0, 100.0),
                    DVec2::new(40.0, 40.0),
                )
                .with_patrol(DVec2::new(800.0, 100.0), 120.0),
            )
            .unwrap();
        level
            .tree
            .add_buff(
                root,
                Buff::new(BuffKind::Magnet, spawn() + DVec2::new(0.0, 60.0), 12.0),
            )
            .unwrap();
        level
    };

    let mut engine_a = start_engine(build());
    let mut engine_b = start_engine(build());

    let script = |engine: &mut SimulationEngine, tick: u32| {
        if tick == 10 {
            engine.queue_command(OrbCommand::SetMoveDown { pressed: true });
        }
        if tick == 40 {
            engine.queue_command(OrbCommand::Transmute {
                element: Element::Air,
            });
            engine.queue_command(OrbCommand::UseSpecial);
        }
        if tick == 80 {
            engine.queue_command(OrbCommand::SetMoveDown { pressed: false });
            engine.queue_command(OrbCommand::SetMoveRight { pressed: true });
        }
    };

    for tick in 0..300 {
        script(&mut engine_a, tick);
        script(&mut engine_b, tick);
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_snapshot_chambers_in_pre_order_with_parents() {
    let mut tree = ChamberTree::with_compound_root("Root", ARENA);
    let root = tree.root();
    let inner = tree
        .add_compound(root, "Inner", Rect::new(100.0, 100.0, 600.0, 600.0))
        .unwrap();
    tree.add_leaf(inner, "Deep", Rect::new(150.0, 150.0, 200.0, 200.0))
        .unwrap();
    tree.add_leaf(root, "Side", Rect::new(750.0, 100.0, 200.0, 200.0))
        .unwrap();

    let level = Level::new(3, "Nested", tree);
    let mut engine = start_engine(level);
    let snap = engine.tick();

    let names: Vec<&str> = snap.chambers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Root", "Inner", "Deep", "Side"]);
    assert_eq!(snap.chambers[0].parent, None);
    assert_eq!(snap.chambers[1].parent, Some(snap.chambers[0].id));
    assert_eq!(snap.chambers[2].parent, Some(snap.chambers[1].id));
    assert_eq!(snap.chambers[3].parent, Some(snap.chambers[0].id));
    assert!(snap.chambers[0].is_compound);
    assert!(!snap.chambers[2].is_compound);
}

#[test]
fn test_victory_phase_freezes_session() {
    let mut engine = start_engine(leaf_level());
    engine.tick();
    engine.complete_session();
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Victory);
    assert!(event_kinds(&snap.events).contains(&EventKind::Victory));

    let frozen = engine.time().tick;
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.time().tick, frozen);
}
