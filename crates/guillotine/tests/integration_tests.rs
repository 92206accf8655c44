//! Layout properties and reference scenarios for the sheet optimizers.

use rand::prelude::*;
use sheetcut_core::{
    can_place_with_grain, Algorithm, CutSettings, EdgePadding, GaConfig, Grain, OptimizeResult,
    Optimizer, Part, Rect, StockSheet, TabConfig,
};
use sheetcut_guillotine::{
    exclusion_zones, optimize, optimize_by_material, optimize_genetic, CutOptimizer,
    GeneticOptimizer, GreedyOptimizer,
};

fn quick_ga() -> GaConfig {
    GaConfig::default()
        .with_population_size(16)
        .with_generations(15)
}

fn both(settings: &CutSettings, parts: &[Part], stocks: &[StockSheet]) -> Vec<OptimizeResult> {
    vec![
        GreedyOptimizer::new(settings.clone()).optimize(parts, stocks),
        GeneticOptimizer::new(settings.clone(), 42)
            .with_ga_config(quick_ga())
            .optimize(parts, stocks),
    ]
}

fn requested(parts: &[Part]) -> usize {
    parts.iter().map(Part::quantity).sum()
}

/// Checks conservation, pairwise disjointness, containment and grain.
fn assert_valid_layout(settings: &CutSettings, parts: &[Part], result: &OptimizeResult) {
    assert_eq!(
        result.placed_count() + result.unplaced_count(),
        requested(parts),
        "units lost or duplicated"
    );

    let kerf = settings.effective_kerf();
    for sheet in &result.sheets {
        let bounds = sheet.stock.trimmed_bounds(settings.effective_trim());
        let zones = exclusion_zones(&sheet.stock, sheet.stock.effective_tabs(&settings.default_tabs));
        let boxes: Vec<Rect> = sheet.placements.iter().map(|p| p.kerf_rect(kerf)).collect();

        for (i, placement) in sheet.placements.iter().enumerate() {
            let boxed = boxes[i];
            assert!(
                bounds.contains_rect(&boxed, 1e-6),
                "{:?} leaves usable area {:?}",
                boxed,
                bounds
            );
            for zone in &zones {
                assert!(!boxed.intersects(zone), "{:?} overlaps tab {:?}", boxed, zone);
            }
            for other in &boxes[i + 1..] {
                assert!(!boxed.intersects(other), "{:?} overlaps {:?}", boxed, other);
            }
            assert!(can_place_with_grain(
                placement.part.grain(),
                sheet.stock.grain(),
                placement.rotated
            ));
        }
    }
}

fn random_job(seed: u64) -> (Vec<Part>, Vec<StockSheet>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let grains = [Grain::None, Grain::None, Grain::Horizontal, Grain::Vertical];

    let parts = (0..rng.gen_range(3..9))
        .map(|i| {
            Part::new(
                format!("P{}", i),
                rng.gen_range(50..900) as f64,
                rng.gen_range(50..600) as f64,
            )
            .with_quantity(rng.gen_range(1..5))
            .with_grain(grains[rng.gen_range(0..grains.len())])
        })
        .collect();

    let stocks = vec![
        StockSheet::new("full", 2440.0, 1220.0)
            .with_quantity(rng.gen_range(1..4))
            .with_grain(Grain::Horizontal),
        StockSheet::new("half", 1220.0, 1220.0).with_quantity(rng.gen_range(1..4)),
    ];
    (parts, stocks)
}

#[test]
fn test_layout_invariants_on_random_jobs() {
    for seed in 0..12 {
        let (parts, stocks) = random_job(seed);
        let settings = CutSettings::new()
            .with_kerf((seed % 4) as f64)
            .with_edge_trim((seed % 3 * 5) as f64);

        for result in both(&settings, &parts, &stocks) {
            assert_valid_layout(&settings, &parts, &result);
        }
    }
}

#[test]
fn test_layout_invariants_with_tabs() {
    let (parts, stocks) = random_job(99);
    let settings = CutSettings::new()
        .with_kerf(3.0)
        .with_edge_trim(5.0)
        .with_default_tabs(TabConfig::simple(EdgePadding {
            top: 40.0,
            bottom: 40.0,
            left: 0.0,
            right: 25.0,
        }));
    let mut stocks = stocks;
    stocks.push(
        StockSheet::new("clamped", 2000.0, 1000.0)
            .with_quantity(2)
            .with_tabs(TabConfig::advanced(vec![
                Rect::new(500.0, 0.0, 60.0, 60.0),
                Rect::new(1400.0, 940.0, 60.0, 60.0),
            ])),
    );

    for result in both(&settings, &parts, &stocks) {
        assert_valid_layout(&settings, &parts, &result);
    }
}

#[test]
fn test_tab_bands_move_first_placement() {
    let settings =
        CutSettings::new().with_default_tabs(TabConfig::simple(EdgePadding::uniform(50.0)));
    let result = optimize(
        &settings,
        &[Part::new("P", 200.0, 100.0)],
        &[StockSheet::new("S", 1000.0, 600.0)],
    );
    let placement = &result.sheets[0].placements[0];
    assert_eq!((placement.x, placement.y), (50.0, 50.0));
}

#[test]
fn test_genetic_is_deterministic() {
    let (parts, stocks) = random_job(5);
    let settings = CutSettings::new().with_kerf(3.0);
    let run = || {
        GeneticOptimizer::new(settings.clone(), 1234)
            .with_ga_config(quick_ga())
            .optimize(&parts, &stocks)
    };
    assert_eq!(run(), run());
}

#[test]
fn test_genetic_places_at_least_as_many_as_greedy() {
    // Ample stock, so every unit that fits some sheet is eventually placed.
    let parts = vec![
        Part::new("side", 720.0, 560.0).with_quantity(4),
        Part::new("top", 1200.0, 600.0).with_quantity(2),
        Part::new("door", 715.0, 396.0).with_quantity(4),
        Part::new("back", 1180.0, 700.0).with_grain(Grain::Vertical),
        Part::new("shelf", 764.0, 300.0).with_quantity(6),
    ];
    let stocks = vec![StockSheet::new("S", 2440.0, 1220.0).with_quantity(10)];
    let settings = CutSettings::new().with_kerf(4.0).with_edge_trim(10.0);

    let greedy = GreedyOptimizer::new(settings.clone()).optimize(&parts, &stocks);
    let genetic = GeneticOptimizer::new(settings.clone(), 42)
        .with_ga_config(quick_ga())
        .optimize(&parts, &stocks);

    assert!(genetic.placed_count() >= greedy.placed_count());
    assert!(genetic.best_fitness.unwrap_or(0.0) >= sheetcut_guillotine::layout_fitness(&greedy));
}

#[test]
fn test_genetic_keeps_every_unit_with_scarce_mixed_grain_stock() {
    // The ungrained sheet only takes the panel, the vertical sheet only takes
    // the rails (rotated), and the small horizontal sheet takes nothing.
    let parts = vec![
        Part::new("rail", 200.0, 900.0)
            .with_quantity(2)
            .with_grain(Grain::Horizontal),
        Part::new("panel", 600.0, 400.0),
    ];
    let stocks = vec![
        StockSheet::new("plain", 1100.0, 400.0),
        StockSheet::new("offcut", 600.0, 300.0).with_grain(Grain::Horizontal),
        StockSheet::new("veneer", 1100.0, 600.0).with_grain(Grain::Vertical),
    ];
    let settings = CutSettings::new();

    let greedy = GreedyOptimizer::new(settings.clone()).optimize(&parts, &stocks);
    assert!(greedy.all_placed());
    assert_eq!(greedy.sheets_used(), 2);

    for seed in [42, 7, 607] {
        let genetic = GeneticOptimizer::new(settings.clone(), seed)
            .with_ga_config(
                GaConfig::default()
                    .with_population_size(20)
                    .with_generations(20),
            )
            .optimize(&parts, &stocks);
        assert_valid_layout(&settings, &parts, &genetic);
        assert!(genetic.placed_count() >= greedy.placed_count());
        assert!(genetic.all_placed());
    }
}

#[test]
fn test_negative_edge_trim_stays_on_sheet() {
    let settings = CutSettings::new().with_edge_trim(-50.0).with_kerf(-3.0);
    let stocks = vec![StockSheet::new("S", 1000.0, 600.0)];

    let too_wide = vec![Part::new("wide", 1100.0, 100.0)];
    for result in both(&settings, &too_wide, &stocks) {
        assert_eq!(result.sheets_used(), 0);
        assert_eq!(result.unplaced_count(), 1);
    }

    let parts = vec![Part::new("strip", 1000.0, 100.0).with_quantity(6)];
    for result in both(&settings, &parts, &stocks) {
        assert_valid_layout(&settings, &parts, &result);
        assert!(result.all_placed());
        for placement in result.placements() {
            let rect = placement.rect();
            assert!(rect.x >= 0.0 && rect.y >= 0.0);
            assert!(rect.right() <= 1000.0 && rect.bottom() <= 600.0);
        }
    }
}

#[test]
fn test_fitness_history_is_monotone() {
    let (parts, stocks) = random_job(17);
    let result = optimize_genetic(
        &CutSettings::new().with_algorithm(Algorithm::Genetic),
        &parts,
        &stocks,
        8,
    );
    let history = result.fitness_history.unwrap_or_default();
    assert!(!history.is_empty());
    assert!(history.windows(2).all(|w| w[1] >= w[0]));
}

#[test]
fn test_scenario_single_part() {
    let parts = vec![Part::new("P", 500.0, 300.0)];
    let stocks = vec![StockSheet::new("S", 1000.0, 600.0)];

    for result in both(&CutSettings::default(), &parts, &stocks) {
        assert_eq!(result.sheets_used(), 1);
        assert_eq!(result.placed_count(), 1);
        assert_eq!(result.unplaced_count(), 0);
    }
}

#[test]
fn test_scenario_rotation_to_fit() {
    let parts = vec![Part::new("P", 800.0, 400.0)];
    let stocks = vec![StockSheet::new("S", 500.0, 1000.0)];

    for result in both(&CutSettings::default(), &parts, &stocks) {
        assert_eq!(result.placed_count(), 1);
        assert!(result.sheets[0].placements[0].rotated);
    }
}

#[test]
fn test_scenario_grain_blocks_rotation() {
    let parts = vec![Part::new("P", 800.0, 400.0).with_grain(Grain::Horizontal)];
    let stocks = vec![StockSheet::new("S", 500.0, 1000.0)];

    for result in both(&CutSettings::default(), &parts, &stocks) {
        assert_eq!(result.sheets_used(), 0);
        assert_eq!(result.unplaced_count(), 1);
    }
}

#[test]
fn test_scenario_smaller_sheet_preferred() {
    let parts = vec![Part::new("A", 400.0, 200.0), Part::new("B", 300.0, 200.0)];
    let stocks = vec![
        StockSheet::new("full", 2440.0, 1220.0).with_quantity(2),
        StockSheet::new("quarter", 1220.0, 610.0).with_quantity(2),
    ];

    for result in both(&CutSettings::default(), &parts, &stocks) {
        assert_eq!(result.sheets_used(), 1);
        assert_eq!(result.sheets[0].stock.id(), "quarter");
        assert_eq!(result.sheets[0].placements.len(), 2);
    }
}

#[test]
fn test_scenario_oversized_part() {
    let parts = vec![Part::new("P", 5000.0, 3000.0)];
    let stocks = vec![StockSheet::new("S", 1000.0, 500.0)];

    for result in both(&CutSettings::default(), &parts, &stocks) {
        assert_eq!(result.sheets_used(), 0);
        assert_eq!(result.unplaced_count(), 1);
    }
}

#[test]
fn test_kerf_can_push_part_off_sheet() {
    let parts = vec![Part::new("P", 500.0, 500.0).with_quantity(2)];
    let stocks = vec![StockSheet::new("S", 1000.0, 500.0)];

    let exact = optimize(&CutSettings::default(), &parts, &stocks);
    assert_eq!(exact.placed_count(), 2);

    let with_kerf = optimize(&CutSettings::new().with_kerf(3.0), &parts, &stocks);
    assert_eq!(with_kerf.placed_count(), 0);
    assert_eq!(with_kerf.unplaced_count(), 2);
}

#[test]
fn test_degenerate_part_is_unplaced() {
    let parts = vec![Part::new("flat", 100.0, 0.0)];
    let stocks = vec![StockSheet::new("S", 1000.0, 1000.0)];

    for result in both(&CutSettings::default(), &parts, &stocks) {
        assert_eq!(result.unplaced_count(), 1);
        assert_eq!(result.efficiency(), 0.0);
    }
}

#[test]
fn test_dispatching_optimizer_honours_settings() {
    let (parts, stocks) = random_job(3);
    let settings = CutSettings::new().with_algorithm(Algorithm::Genetic);
    let result = CutOptimizer::new(settings.clone())
        .with_seed(9)
        .with_ga_config(quick_ga())
        .optimize(&parts, &stocks);
    assert_eq!(result.algorithm.as_deref(), Some("Genetic"));
    assert_valid_layout(&settings, &parts, &result);
}

#[test]
fn test_material_groups_conserve_units() {
    let parts = vec![
        Part::new("oak-door", 700.0, 400.0)
            .with_quantity(3)
            .with_material("oak"),
        Part::new("mdf-back", 900.0, 600.0)
            .with_quantity(2)
            .with_material("mdf"),
        Part::new("spacer", 100.0, 50.0).with_quantity(5),
    ];
    let stocks = vec![
        StockSheet::new("oak", 2440.0, 1220.0).with_material("oak"),
        StockSheet::new("mdf", 2440.0, 1220.0).with_material("mdf"),
        StockSheet::new("scrap", 600.0, 600.0),
    ];
    let settings = CutSettings::new().with_kerf(3.0);

    let result = optimize_by_material(&settings, &parts, &stocks, 42);
    assert_valid_layout(&settings, &parts, &result);
    assert!(result.all_placed());

    for sheet in &result.sheets {
        for placement in &sheet.placements {
            if let (Some(part), Some(stock)) = (placement.part.material(), sheet.stock.material()) {
                assert_eq!(part, stock);
            }
        }
    }
}
