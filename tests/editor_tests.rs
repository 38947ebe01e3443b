use accretion::{
    fill_cuboid, BlockPos, FillPattern, FillSession, FillSessionOptions, FullBlockId, Inserter,
    MemoryWorld,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_fill_cuboid_writes_every_cell() {
    let world = MemoryWorld::new();
    let mut rng = StdRng::seed_from_u64(11);
    let pattern = FillPattern::parse("stone", world.registry()).unwrap();

    let report = fill_cuboid(
        &world,
        BlockPos::new(0, 60, 0),
        BlockPos::new(20, 62, 9),
        &pattern,
        &mut rng,
        FillSessionOptions::default(),
    )
    .unwrap();

    assert_eq!(report.blocks_changed, 21 * 3 * 10);

    let mut session = FillSession::new(&world, FillSessionOptions::default());
    assert_eq!(session.get_block_at(20, 62, 9), Some(FullBlockId::new(1, 0)));
    assert_eq!(session.get_block_at(0, 60, 0), Some(FullBlockId::new(1, 0)));
    // One above the cuboid stays air
    assert_eq!(session.get_block_at(5, 63, 5), Some(FullBlockId::AIR));
}

#[test]
fn test_fill_cuboid_clamps_vertical_range() {
    let world = MemoryWorld::new();
    let mut rng = StdRng::seed_from_u64(3);
    let pattern = FillPattern::single(FullBlockId::new(7, 0));

    let report = fill_cuboid(
        &world,
        BlockPos::new(0, -10, 0),
        BlockPos::new(0, 2, 0),
        &pattern,
        &mut rng,
        FillSessionOptions::default(),
    )
    .unwrap();

    assert_eq!(report.blocks_changed, 3);
}

#[test]
fn test_fill_cuboid_undo_restores_prior_state() {
    let world = MemoryWorld::new();
    let mut rng = StdRng::seed_from_u64(5);

    // Seed a block the fill will overwrite
    let seed = fill_cuboid(
        &world,
        BlockPos::new(4, 64, 4),
        BlockPos::new(4, 64, 4),
        &FillPattern::single(FullBlockId::new(49, 0)),
        &mut rng,
        FillSessionOptions::default().with_save_changes(false),
    )
    .unwrap();
    assert!(seed.action.is_none());

    let pattern = FillPattern::parse("50%stone,50%dirt", world.registry()).unwrap();
    let report = fill_cuboid(
        &world,
        BlockPos::new(0, 64, 0),
        BlockPos::new(9, 64, 9),
        &pattern,
        &mut rng,
        FillSessionOptions::default(),
    )
    .unwrap();
    assert_eq!(report.blocks_changed, 100);

    let action = report.action.unwrap();
    assert_eq!(action.len(), 100);

    let outcome = Inserter::new(&action).insert(&world).unwrap();
    assert_eq!(outcome.blocks_changed, 100);

    let mut session = FillSession::new(&world, FillSessionOptions::default());
    assert_eq!(session.get_block_at(4, 64, 4), Some(FullBlockId::new(49, 0)));
    assert_eq!(session.get_block_at(0, 64, 0), Some(FullBlockId::AIR));
}

#[test]
fn test_fill_cuboid_mix_only_places_pattern_blocks() {
    let world = MemoryWorld::new();
    let mut rng = StdRng::seed_from_u64(23);
    let pattern = FillPattern::parse("75%sand,25%gravel", world.registry()).unwrap();

    fill_cuboid(
        &world,
        BlockPos::new(0, 70, 0),
        BlockPos::new(15, 70, 15),
        &pattern,
        &mut rng,
        FillSessionOptions::default(),
    )
    .unwrap();

    let sand = FullBlockId::new(12, 0);
    let gravel = FullBlockId::new(13, 0);
    let mut session = FillSession::new(&world, FillSessionOptions::default());
    let mut sand_count = 0;
    for x in 0..16 {
        for z in 0..16 {
            let id = session.get_block_at(x, 70, z).unwrap();
            assert!(id == sand || id == gravel, "unexpected block {}", id);
            if id == sand {
                sand_count += 1;
            }
        }
    }
    // With 256 draws at 75%, sand dominating is a safe bet
    assert!(sand_count > 128);
}
