use ski_path::{ElevationMap, LevelReport, LongestPathEngine, Position};

fn best_path_of(rows: &[&[i32]]) -> (ElevationMap, ski_path::SkiPath) {
    let map = ElevationMap::from_rows(rows).unwrap();
    let path = LongestPathEngine::new(&map).run().best_path(&map).unwrap();
    (map, path)
}

fn positions(path: &ski_path::SkiPath) -> Vec<Position> {
    path.steps().iter().map(|step| step.pos).collect()
}

#[test]
fn increasing_row_is_climbed_end_to_end() {
    let (_, path) = best_path_of(&[&[1, 2, 3, 4]]);

    assert_eq!(path.node_n(), 4);
    assert_eq!(path.edge_n(), 3);
    assert_eq!(path.ascent(), 3);
    assert_eq!(
        positions(&path),
        vec![
            Position::new(0, 3),
            Position::new(0, 2),
            Position::new(0, 1),
            Position::new(0, 0)
        ]
    );
}

#[test]
fn flat_map_has_no_edges() {
    let map = ElevationMap::from_rows(&[[5, 5, 5], [5, 5, 5]]).unwrap();
    assert!(!map.is_empty());
    let table = LongestPathEngine::new(&map).run();

    assert!(table
        .trails()
        .iter()
        .all(|trail| trail.edge_n() == 0 && trail.prev().is_none()));
    assert_eq!(table.champion(), Some(0));

    let path = table.best_path(&map).unwrap();
    assert_eq!(path.node_n(), 1);
    assert_eq!(path.ascent(), 0);
}

#[test]
fn equally_long_paths_keep_first_found_when_ascent_ties() {
    // Both 1 -> 3 -> 4 and 1 -> 2 -> 4 climb 3 over two edges.
    let (_, path) = best_path_of(&[&[1, 3], &[2, 4]]);

    assert_eq!(path.edge_n(), 2);
    assert_eq!(path.ascent(), 3);
    assert_eq!(
        positions(&path),
        vec![Position::new(1, 1), Position::new(1, 0), Position::new(0, 0)]
    );
    let drops = path.steps().iter().map(|step| step.drop).collect::<Vec<_>>();
    assert_eq!(drops, vec![0, 2, 3]);
}

#[test]
fn relaxation_prefers_steeper_source_at_equal_length() {
    // 4 is reached in one edge from both 3 and 0, the climb from 0 is kept.
    let map = ElevationMap::from_rows(&[[3, 4, 0, 9]]).unwrap();
    let table = LongestPathEngine::new(&map).run();

    let trail = table.trail(&Position::new(0, 1)).unwrap();
    assert_eq!(trail.edge_n(), 1);
    assert_eq!(trail.ascent(), 4);
    assert_eq!(trail.prev(), Some(2));
}

#[test]
fn champion_is_steepest_among_longest() {
    // Every path has one edge; 0 -> 9 is the steepest of them.
    let map = ElevationMap::from_rows(&[[3, 4, 0, 9]]).unwrap();
    let table = LongestPathEngine::new(&map).run();

    assert_eq!(table.champion(), Some(3));
    let path = table.best_path(&map).unwrap();
    assert_eq!(path.ascent(), 9);
    assert_eq!(
        positions(&path),
        vec![Position::new(0, 3), Position::new(0, 2)]
    );
}

#[test]
fn longer_path_beats_steeper_one() {
    // 1 -> 2 -> 3 -> 4 climbs 3 in three edges, -100 -> 100 climbs 200 in one.
    let (_, path) = best_path_of(&[&[1, 2, 3, 4, 4, -100, 100]]);

    assert_eq!(path.edge_n(), 3);
    assert_eq!(path.ascent(), 3);
    assert_eq!(path.end().map(|step| step.pos), Some(Position::new(0, 3)));
}

#[test]
fn cell_finished_early_is_improved_by_later_level() {
    // 10 is finished while relaxing from 1, then the level seeded at 2 finds
    // the longer climb 2 -> 3 -> 4 -> 10 and has to visit it again.
    let map = ElevationMap::from_rows(&[[1, 10, 4, 3, 2]]).unwrap();
    let table = LongestPathEngine::new(&map).run();

    let top = table.trail(&Position::new(0, 1)).unwrap();
    assert_eq!(top.edge_n(), 3);
    assert_eq!(top.ascent(), 8);
    assert_eq!(top.prev(), Some(2));

    let path = table.best_path(&map).unwrap();
    assert_eq!(path.start().map(|step| step.height), Some(2));
    assert_eq!(path.end().map(|step| step.height), Some(10));
}

#[test]
fn empty_map_has_no_path() {
    let map = ElevationMap::new(0, 0, Vec::new()).unwrap();
    assert!(map.is_empty());
    let table = LongestPathEngine::new(&map).run();

    assert_eq!(table.cell_n(), 0);
    assert_eq!(table.champion(), None);
    assert!(table.best_path(&map).is_none());
}

#[test]
fn observer_sees_every_level_in_ascending_height() {
    let map = ElevationMap::from_rows(&[[1, 5, 3, 7]]).unwrap();
    let mut reports = Vec::new();
    LongestPathEngine::new(&map).run_with(|report| reports.push(report.clone()));

    assert_eq!(
        reports,
        vec![
            LevelReport {
                level_no: 1,
                height: 1,
                seed_n: 1,
                visited_n: 2,
            },
            LevelReport {
                level_no: 2,
                height: 3,
                seed_n: 1,
                visited_n: 2,
            },
        ]
    );
}
