//! Level factory for CHROMA.
//!
//! Builds the five campaign levels as chamber trees with essences,
//! hazards, buffs, and objectives. Placement is scattered with a seeded
//! RNG, so the same seed always produces the same layout — the engine
//! itself contains no randomness.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use chroma_core::enums::{BuffKind, EssenceColor, HazardKind};
use chroma_core::types::Rect;
use chroma_sim::chamber::{ChamberId, ChamberTree};
use chroma_sim::level::Level;
use chroma_sim::objective::Objective;
use chroma_sim::objects::{Buff, Essence, Hazard};

use std::f64::consts::TAU;

#[cfg(test)]
mod tests;

/// Build the whole five-level campaign.
pub fn campaign(width: f64, height: f64, difficulty: u32, seed: u64) -> Vec<Level> {
    (1..=5)
        .map(|number| generate_level(number, width, height, difficulty, seed))
        .collect()
}

/// Build one level. `difficulty` (clamped to 1-3) scales essence and
/// hazard counts; `seed` pins the scatter.
pub fn generate_level(number: u32, width: f64, height: f64, difficulty: u32, seed: u64) -> Level {
    let difficulty = difficulty.clamp(1, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(number as u64));
    log::debug!("generating level {number} (difficulty {difficulty})");

    match number {
        1 => kindling_hall(width, height, difficulty, &mut rng),
        2 => twin_sanctums(width, height, difficulty, &mut rng),
        3 => crossing_of_four(width, height, difficulty, &mut rng),
        4 => sunken_works(width, height, difficulty, &mut rng),
        _ => chromatic_crown(width, height, difficulty, &mut rng),
    }
}

/// Level 1: a single leaf chamber, fire-palette essences, no hazards.
fn kindling_hall(width: f64, height: f64, difficulty: u32, rng: &mut ChaCha8Rng) -> Level {
    let bounds = Rect::new(50.0, 50.0, width - 100.0, height - 100.0);
    let mut tree = ChamberTree::with_leaf_root("Kindling Hall", bounds);
    let root = tree.root();
    tree.chamber_mut(root).border = "#4a4aff".to_string();

    let count = 8 + difficulty * 2;
    scatter_essences(
        &mut tree,
        root,
        rng,
        count,
        &[EssenceColor::Red, EssenceColor::Orange],
        10,
    );
    add_buff(&mut tree, root, BuffKind::SpeedBoost, bounds.center(), 10.0);

    let mut level = Level::new(1, "Kindling Hall", tree)
        .with_spawn(DVec2::new(bounds.x + 100.0, bounds.y + bounds.height / 2.0));
    level.add_objective(
        Objective::new("First Flicker", "Gather 5 fire-touched essences", 100)
            .require(EssenceColor::Red, 3)
            .require(EssenceColor::Orange, 2),
    );
    level
}

/// Level 2: a compound root with two leaf wings, fire and water.
fn twin_sanctums(width: f64, height: f64, difficulty: u32, rng: &mut ChaCha8Rng) -> Level {
    let bounds = Rect::new(30.0, 30.0, width - 60.0, height - 60.0);
    let mut tree = ChamberTree::with_compound_root("Twin Sanctums", bounds);
    let root = tree.root();
    tree.chamber_mut(root).border = "#6a6aff".to_string();

    let wing_width = (bounds.width - 60.0) / 2.0;
    let wing_height = bounds.height - 40.0;

    let ember = tree
        .add_leaf(
            root,
            "Ember Wing",
            Rect::new(bounds.x + 20.0, bounds.y + 20.0, wing_width, wing_height),
        )
        .expect("root is compound");
    tree.chamber_mut(ember).background = "#2a1a1a".to_string();
    tree.chamber_mut(ember).border = "#ff4444".to_string();

    let tide = tree
        .add_leaf(
            root,
            "Tide Wing",
            Rect::new(
                bounds.x + wing_width + 40.0,
                bounds.y + 20.0,
                wing_width,
                wing_height,
            ),
        )
        .expect("root is compound");
    tree.chamber_mut(tide).background = "#1a1a2a".to_string();
    tree.chamber_mut(tide).border = "#4444ff".to_string();

    let count = 6 + difficulty;
    scatter_essences(
        &mut tree,
        ember,
        rng,
        count,
        &[EssenceColor::Red, EssenceColor::Orange],
        15,
    );
    scatter_essences(
        &mut tree,
        tide,
        rng,
        count,
        &[EssenceColor::Blue, EssenceColor::Cyan],
        15,
    );

    let ember_center = tree.chamber(ember).bounds.center();
    let tide_center = tree.chamber(tide).bounds.center();
    add_buff(&mut tree, ember, BuffKind::Shield, ember_center, 15.0);
    add_buff(&mut tree, tide, BuffKind::Magnet, tide_center, 12.0);

    let mut level = Level::new(2, "Twin Sanctums", tree);
    level.add_objective(
        Objective::new("Steam Rising", "Master flame and flood alike", 200)
            .require(EssenceColor::Red, 4)
            .require(EssenceColor::Blue, 4),
    );
    level
}

/// Level 3: four quadrants, one per element, with stationary hazards.
fn crossing_of_four(width: f64, height: f64, difficulty: u32, rng: &mut ChaCha8Rng) -> Level {
    let bounds = Rect::new(20.0, 20.0, width - 40.0, height - 40.0);
    let mut tree = ChamberTree::with_compound_root("Crossing of Four", bounds);
    let root = tree.root();
    tree.chamber_mut(root).background = "#0a0a15".to_string();
    tree.chamber_mut(root).border = "#8888ff".to_string();

    let quad_width = (bounds.width - 30.0) / 2.0;
    let quad_height = (bounds.height - 30.0) / 2.0;
    let padding = 10.0;

    let quads = [
        (
            "Ember Quadrant",
            [EssenceColor::Red, EssenceColor::Orange],
            "#2a1515",
            "#ff6600",
            BuffKind::ScoreMultiplier,
            15.0,
            DVec2::new(bounds.x + padding, bounds.y + padding),
        ),
        (
            "Tide Quadrant",
            [EssenceColor::Blue, EssenceColor::Cyan],
            "#151525",
            "#0066ff",
            BuffKind::RangeBoost,
            12.0,
            DVec2::new(bounds.x + quad_width + padding * 2.0, bounds.y + padding),
        ),
        (
            "Loam Quadrant",
            [EssenceColor::Green, EssenceColor::Brown],
            "#1a2a15",
            "#00aa00",
            BuffKind::Shield,
            15.0,
            DVec2::new(bounds.x + padding, bounds.y + quad_height + padding * 2.0),
        ),
        (
            "Gale Quadrant",
            [EssenceColor::White, EssenceColor::Yellow],
            "#252525",
            "#ffff00",
            BuffKind::SpeedBoost,
            10.0,
            DVec2::new(
                bounds.x + quad_width + padding * 2.0,
                bounds.y + quad_height + padding * 2.0,
            ),
        ),
    ];

    for (name, palette, background, border, buff_kind, buff_secs, origin) in quads {
        let quad = tree
            .add_leaf(root, name, Rect::new(origin.x, origin.y, quad_width, quad_height))
            .expect("root is compound");
        tree.chamber_mut(quad).background = background.to_string();
        tree.chamber_mut(quad).border = border.to_string();

        scatter_essences(&mut tree, quad, rng, 5 + difficulty, &palette, 20);
        add_stationary_hazards(&mut tree, quad, rng, 2);

        let quad_bounds = tree.chamber(quad).bounds;
        add_buff(
            &mut tree,
            quad,
            buff_kind,
            DVec2::new(quad_bounds.x + quad_bounds.width / 2.0, quad_bounds.y + 50.0),
            buff_secs,
        );
    }

    let mut level = Level::new(3, "Crossing of Four", tree);
    level.add_objective(
        Objective::new("Four-Way Accord", "Draw from every element", 300)
            .require(EssenceColor::Red, 3)
            .require(EssenceColor::Blue, 3)
            .require(EssenceColor::Green, 3)
            .require(EssenceColor::White, 3),
    );
    level
}

/// Level 4: a compound nested inside a compound, patrol hazards.
fn sunken_works(width: f64, height: f64, difficulty: u32, rng: &mut ChaCha8Rng) -> Level {
    let bounds = Rect::new(15.0, 15.0, width - 30.0, height - 30.0);
    let mut tree = ChamberTree::with_compound_root("Sunken Works", bounds);
    let root = tree.root();
    tree.chamber_mut(root).background = "#050510".to_string();
    tree.chamber_mut(root).border = "#aa88ff".to_string();

    let inner = tree
        .add_compound(
            root,
            "Inner Gallery",
            Rect::new(
                bounds.x + 50.0,
                bounds.y + 50.0,
                bounds.width - 100.0,
                bounds.height - 100.0,
            ),
        )
        .expect("root is compound");
    tree.chamber_mut(inner).background = "#0a0a1a".to_string();
    tree.chamber_mut(inner).border = "#6666aa".to_string();

    let inner_bounds = tree.chamber(inner).bounds;
    let lab_width = (inner_bounds.width - 40.0) / 3.0;
    let lab_height = inner_bounds.height - 40.0;

    let labs = [
        (
            "Prism Bench",
            [EssenceColor::Red, EssenceColor::Blue],
            "#1a1020",
            "#ff00ff",
            BuffKind::MultiAbsorb,
            8.0,
            inner_bounds.x + 10.0,
        ),
        (
            "Verdant Still",
            [EssenceColor::Green, EssenceColor::Orange],
            "#102010",
            "#00ff00",
            BuffKind::Magnet,
            12.0,
            inner_bounds.x + lab_width + 20.0,
        ),
        (
            "Pale Hollow",
            [EssenceColor::White, EssenceColor::Cyan],
            "#202020",
            "#ffffff",
            BuffKind::Shield,
            15.0,
            inner_bounds.x + lab_width * 2.0 + 30.0,
        ),
    ];

    for (name, palette, background, border, buff_kind, buff_secs, x) in labs {
        let lab = tree
            .add_leaf(
                inner,
                name,
                Rect::new(x, inner_bounds.y + 20.0, lab_width, lab_height),
            )
            .expect("inner is compound");
        tree.chamber_mut(lab).background = background.to_string();
        tree.chamber_mut(lab).border = border.to_string();

        scatter_essences(&mut tree, lab, rng, 6 + difficulty, &palette, 25);
        add_patrol_hazards(&mut tree, lab, rng, 1 + difficulty);

        let center = tree.chamber(lab).bounds.center();
        add_buff(&mut tree, lab, buff_kind, center, buff_secs);
    }

    // A few strays directly in the outer ring.
    scatter_essences(
        &mut tree,
        root,
        rng,
        4,
        &[EssenceColor::Yellow, EssenceColor::Brown],
        30,
    );

    let mut level = Level::new(4, "Sunken Works", tree)
        .with_spawn(DVec2::new(bounds.x + 100.0, bounds.y + bounds.height / 2.0));
    level.add_objective(
        Objective::new("Deep Sequence", "Work the galleries in order", 400)
            .require(EssenceColor::Red, 4)
            .require(EssenceColor::Green, 4)
            .require(EssenceColor::White, 4),
    );
    level
}

/// Level 5: the full spread — three nesting levels, corner alcoves, and
/// every hazard kind.
fn chromatic_crown(width: f64, height: f64, difficulty: u32, rng: &mut ChaCha8Rng) -> Level {
    let bounds = Rect::new(10.0, 10.0, width - 20.0, height - 20.0);
    let mut tree = ChamberTree::with_compound_root("Chromatic Crown", bounds);
    let root = tree.root();
    tree.chamber_mut(root).background = "#000005".to_string();
    tree.chamber_mut(root).border = "#ffcc00".to_string();

    let crucible = tree
        .add_compound(
            root,
            "Grand Crucible",
            Rect::new(
                bounds.x + bounds.width / 4.0,
                bounds.y + bounds.height / 4.0,
                bounds.width / 2.0,
                bounds.height / 2.0,
            ),
        )
        .expect("root is compound");
    tree.chamber_mut(crucible).background = "#100510".to_string();
    tree.chamber_mut(crucible).border = "#ff8800".to_string();

    let crucible_bounds = tree.chamber(crucible).bounds;
    let heart = tree
        .add_leaf(
            crucible,
            "Heart of Hue",
            Rect::new(
                crucible_bounds.x + crucible_bounds.width / 4.0,
                crucible_bounds.y + crucible_bounds.height / 4.0,
                crucible_bounds.width / 2.0,
                crucible_bounds.height / 2.0,
            ),
        )
        .expect("crucible is compound");
    tree.chamber_mut(heart).background = "#201010".to_string();
    tree.chamber_mut(heart).border = "#ffff00".to_string();

    scatter_essences(
        &mut tree,
        heart,
        rng,
        5 + difficulty * 2,
        &[EssenceColor::Yellow, EssenceColor::Orange],
        50,
    );
    add_pulsing_hazards(&mut tree, heart, rng, difficulty);
    let heart_center = tree.chamber(heart).bounds.center();
    add_buff(&mut tree, heart, BuffKind::ScoreMultiplier, heart_center, 20.0);

    scatter_essences(
        &mut tree,
        crucible,
        rng,
        8 + difficulty,
        &[
            EssenceColor::Red,
            EssenceColor::Blue,
            EssenceColor::Green,
            EssenceColor::White,
        ],
        30,
    );
    add_rotating_hazards(&mut tree, crucible, rng, difficulty);

    let alcove_size = bounds.width / 5.0;
    let alcoves = [
        (
            "Ember Alcove",
            EssenceColor::Red,
            "#200505",
            "#ff0000",
            BuffKind::SpeedBoost,
            10.0,
            DVec2::new(bounds.x + 20.0, bounds.y + 20.0),
        ),
        (
            "Tide Alcove",
            EssenceColor::Blue,
            "#050520",
            "#0000ff",
            BuffKind::Magnet,
            12.0,
            DVec2::new(bounds.x + bounds.width - alcove_size - 20.0, bounds.y + 20.0),
        ),
        (
            "Loam Alcove",
            EssenceColor::Green,
            "#052005",
            "#00ff00",
            BuffKind::Shield,
            15.0,
            DVec2::new(bounds.x + 20.0, bounds.y + bounds.height - alcove_size - 20.0),
        ),
        (
            "Gale Alcove",
            EssenceColor::White,
            "#202020",
            "#ffffff",
            BuffKind::MultiAbsorb,
            8.0,
            DVec2::new(
                bounds.x + bounds.width - alcove_size - 20.0,
                bounds.y + bounds.height - alcove_size - 20.0,
            ),
        ),
    ];

    for (name, color, background, border, buff_kind, buff_secs, origin) in alcoves {
        let alcove = tree
            .add_leaf(root, name, Rect::new(origin.x, origin.y, alcove_size, alcove_size))
            .expect("root is compound");
        tree.chamber_mut(alcove).background = background.to_string();
        tree.chamber_mut(alcove).border = border.to_string();

        scatter_essences(&mut tree, alcove, rng, 4, &[color], 25);
        add_stationary_hazards(&mut tree, alcove, rng, 1);

        let center = tree.chamber(alcove).bounds.center();
        add_buff(&mut tree, alcove, buff_kind, center, buff_secs);
    }

    scatter_essences(
        &mut tree,
        root,
        rng,
        6,
        &[EssenceColor::Cyan, EssenceColor::Brown, EssenceColor::Yellow],
        35,
    );

    let mut level = Level::new(5, "Chromatic Crown", tree)
        .with_spawn(DVec2::new(bounds.x + 80.0, bounds.y + bounds.height / 2.0));
    level.add_objective(
        Objective::new("Full Spectrum", "Bind all five chromatic strands", 1000)
            .require(EssenceColor::Red, 5)
            .require(EssenceColor::Blue, 5)
            .require(EssenceColor::Green, 5)
            .require(EssenceColor::White, 5)
            .require(EssenceColor::Yellow, 5),
    );
    level
}

// ---- Placement helpers ----

fn scatter_essences(
    tree: &mut ChamberTree,
    chamber: ChamberId,
    rng: &mut ChaCha8Rng,
    count: u32,
    palette: &[EssenceColor],
    point_value: i64,
) {
    let margin = 40.0;
    let bounds = tree.chamber(chamber).bounds;
    for _ in 0..count {
        let color = palette[rng.gen_range(0..palette.len())];
        let position = DVec2::new(
            bounds.x + margin + rng.gen::<f64>() * (bounds.width - margin * 2.0),
            bounds.y + margin + rng.gen::<f64>() * (bounds.height - margin * 2.0),
        );
        let essence = Essence::new(color, position, point_value)
            .with_phases(rng.gen_range(0.0..TAU), rng.gen_range(0.0..TAU));
        tree.add_essence(chamber, essence)
            .expect("chamber id from this tree");
    }
}

fn add_stationary_hazards(
    tree: &mut ChamberTree,
    chamber: ChamberId,
    rng: &mut ChaCha8Rng,
    count: u32,
) {
    let margin = 60.0;
    let bounds = tree.chamber(chamber).bounds;
    for _ in 0..count {
        let position = DVec2::new(
            bounds.x + margin + rng.gen::<f64>() * (bounds.width - margin * 2.0 - 60.0).max(1.0),
            bounds.y + margin + rng.gen::<f64>() * (bounds.height - margin * 2.0 - 30.0).max(1.0),
        );
        tree.add_hazard(
            chamber,
            Hazard::new(HazardKind::Stationary, position, DVec2::new(60.0, 30.0)),
        )
        .expect("chamber id from this tree");
    }
}

fn add_patrol_hazards(
    tree: &mut ChamberTree,
    chamber: ChamberId,
    rng: &mut ChaCha8Rng,
    count: u32,
) {
    let margin = 80.0;
    let bounds = tree.chamber(chamber).bounds;
    for _ in 0..count {
        let y = bounds.y + margin + rng.gen::<f64>() * (bounds.height - margin * 2.0).max(1.0);
        let start = DVec2::new(bounds.x + margin, y);
        let end = DVec2::new(bounds.x + bounds.width - margin - 40.0, y);
        let speed = 80.0 + rng.gen::<f64>() * 60.0;
        tree.add_hazard(
            chamber,
            Hazard::new(HazardKind::Patrol, start, DVec2::new(40.0, 40.0)).with_patrol(end, speed),
        )
        .expect("chamber id from this tree");
    }
}

fn add_rotating_hazards(
    tree: &mut ChamberTree,
    chamber: ChamberId,
    rng: &mut ChaCha8Rng,
    count: u32,
) {
    let margin = 80.0;
    let bounds = tree.chamber(chamber).bounds;
    for _ in 0..count {
        let position = DVec2::new(
            bounds.x + margin + rng.gen::<f64>() * (bounds.width - margin * 2.0 - 50.0).max(1.0),
            bounds.y + margin + rng.gen::<f64>() * (bounds.height - margin * 2.0 - 50.0).max(1.0),
        );
        let speed = 60.0 + rng.gen::<f64>() * 60.0;
        tree.add_hazard(
            chamber,
            Hazard::new(HazardKind::Rotating, position, DVec2::new(50.0, 15.0))
                .with_rotation_speed(speed),
        )
        .expect("chamber id from this tree");
    }
}

fn add_pulsing_hazards(
    tree: &mut ChamberTree,
    chamber: ChamberId,
    rng: &mut ChaCha8Rng,
    count: u32,
) {
    let margin = 60.0;
    let bounds = tree.chamber(chamber).bounds;
    for _ in 0..count {
        let position = DVec2::new(
            bounds.x + margin + rng.gen::<f64>() * (bounds.width - margin * 2.0 - 40.0).max(1.0),
            bounds.y + margin + rng.gen::<f64>() * (bounds.height - margin * 2.0 - 40.0).max(1.0),
        );
        tree.add_hazard(
            chamber,
            Hazard::new(HazardKind::Pulsing, position, DVec2::new(40.0, 40.0)),
        )
        .expect("chamber id from this tree");
    }
}

fn add_buff(tree: &mut ChamberTree, chamber: ChamberId, kind: BuffKind, at: DVec2, secs: f64) {
    tree.add_buff(chamber, Buff::new(kind, at, secs))
        .expect("chamber id from this tree");
}
