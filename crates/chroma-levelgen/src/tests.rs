use chroma_core::enums::{EssenceColor, HazardKind};

use crate::{campaign, generate_level};

const WIDTH: f64 = 1280.0;
const HEIGHT: f64 = 800.0;

#[test]
fn test_campaign_has_five_levels_in_order() {
    let levels = campaign(WIDTH, HEIGHT, 1, 7);
    assert_eq!(levels.len(), 5);
    for (i, level) in levels.iter().enumerate() {
        assert_eq!(level.number, i as u32 + 1);
        assert!(!level.objectives.is_empty(), "every level carries an objective");
    }
}

#[test]
fn test_same_seed_same_layout() {
    let a = generate_level(3, WIDTH, HEIGHT, 2, 99);
    let b = generate_level(3, WIDTH, HEIGHT, 2, 99);

    let positions_a: Vec<_> = a
        .tree
        .all_essences(a.tree.root())
        .iter()
        .map(|e| (e.color, e.position))
        .collect();
    let positions_b: Vec<_> = b
        .tree
        .all_essences(b.tree.root())
        .iter()
        .map(|e| (e.color, e.position))
        .collect();
    assert_eq!(positions_a, positions_b);
}

#[test]
fn test_different_seeds_differ() {
    let a = generate_level(1, WIDTH, HEIGHT, 1, 1);
    let b = generate_level(1, WIDTH, HEIGHT, 1, 2);

    let positions_a: Vec<_> = a
        .tree
        .all_essences(a.tree.root())
        .iter()
        .map(|e| e.position)
        .collect();
    let positions_b: Vec<_> = b
        .tree
        .all_essences(b.tree.root())
        .iter()
        .map(|e| e.position)
        .collect();
    assert_ne!(positions_a, positions_b);
}

#[test]
fn test_difficulty_scales_level_one() {
    let easy = generate_level(1, WIDTH, HEIGHT, 1, 5);
    let hard = generate_level(1, WIDTH, HEIGHT, 3, 5);
    assert_eq!(easy.tree.total_essences(easy.tree.root()), 10);
    assert_eq!(hard.tree.total_essences(hard.tree.root()), 14);

    // Out-of-range difficulty clamps instead of exploding.
    let clamped = generate_level(1, WIDTH, HEIGHT, 99, 5);
    assert_eq!(
        clamped.tree.total_essences(clamped.tree.root()),
        hard.tree.total_essences(hard.tree.root())
    );
}

#[test]
fn test_level_one_is_single_leaf_with_fire_palette() {
    let level = generate_level(1, WIDTH, HEIGHT, 1, 11);
    let root = level.tree.root();
    assert_eq!(level.tree.len(), 1);
    assert!(!level.tree.chamber(root).is_compound());
    assert!(level.tree.all_hazards(root).is_empty(), "no hazards in the opener");
    for essence in level.tree.all_essences(root) {
        assert!(matches!(
            essence.color,
            EssenceColor::Red | EssenceColor::Orange
        ));
    }
}

#[test]
fn test_level_four_nests_compounds() {
    let level = generate_level(4, WIDTH, HEIGHT, 2, 3);
    let tree = &level.tree;
    let root = tree.root();
    assert!(tree.chamber(root).is_compound());

    // Root -> inner compound -> three leaves.
    let inner = tree.chamber(root).children()[0];
    assert!(tree.chamber(inner).is_compound());
    assert_eq!(tree.chamber(inner).children().len(), 3);
    for &lab in tree.chamber(inner).children() {
        assert!(!tree.chamber(lab).is_compound());
    }

    let patrols = tree
        .all_hazards(root)
        .iter()
        .filter(|h| h.kind == HazardKind::Patrol)
        .count();
    assert_eq!(patrols, 9, "three labs with 1 + difficulty patrols each");
}

#[test]
fn test_level_five_contains_all_hazard_kinds_except_patrol() {
    let level = generate_level(5, WIDTH, HEIGHT, 2, 3);
    let hazards = level.tree.all_hazards(level.tree.root());
    for kind in [
        HazardKind::Stationary,
        HazardKind::Rotating,
        HazardKind::Pulsing,
    ] {
        assert!(
            hazards.iter().any(|h| h.kind == kind),
            "expected at least one {kind:?} hazard"
        );
    }
}

#[test]
fn test_content_stays_inside_owning_chambers() {
    for number in 1..=5 {
        let level = generate_level(number, WIDTH, HEIGHT, 3, 42);
        let tree = &level.tree;
        for id in tree.pre_order() {
            let chamber = tree.chamber(id);
            for essence in &chamber.essences {
                assert!(
                    chamber.bounds.contains_point(essence.position),
                    "level {number}: essence outside {}",
                    chamber.name
                );
            }
            for buff in &chamber.buffs {
                assert!(
                    chamber.bounds.contains_point(buff.position),
                    "level {number}: buff outside {}",
                    chamber.name
                );
            }
        }

        let root_bounds = tree.chamber(tree.root()).bounds;
        assert!(
            root_bounds.contains_point(level.spawn),
            "level {number}: spawn outside the arena"
        );
    }
}

#[test]
fn test_fresh_levels_start_incomplete() {
    for number in 1..=5 {
        let level = generate_level(number, WIDTH, HEIGHT, 1, 8);
        assert!(!level.is_complete());
        assert_eq!(level.completion_percent(), 0.0);
    }
}
