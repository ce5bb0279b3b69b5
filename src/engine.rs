use std::{
    cmp::Reverse,
    collections::{BTreeSet, BinaryHeap, HashSet},
};

use crate::grid::{ElevationMap, Position};

/// Best known ascending path ending at one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trail {
    edge_n: usize,
    ascent: i64,
    prev: Option<usize>,
}

impl Trail {
    /// Number of edges on the path, zero for a cell only reachable as a start.
    pub fn edge_n(&self) -> usize {
        self.edge_n
    }

    pub fn ascent(&self) -> i64 {
        self.ascent
    }

    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    // Longer wins outright, equal length goes to the steeper one.
    fn is_improved_by(&self, edge_n: usize, ascent: i64) -> bool {
        self.prev.is_none()
            || edge_n > self.edge_n
            || (edge_n == self.edge_n && ascent > self.ascent)
    }
}

/// Per-cell result of [`LongestPathEngine::run`], indexed like the map it came from.
#[derive(Debug, Clone)]
pub struct TrailTable {
    trails: Vec<Trail>,
    row_n: usize,
    col_n: usize,
}

impl TrailTable {
    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn trail_at(&self, ind: usize) -> &Trail {
        &self.trails[ind]
    }

    pub fn trail(&self, pos: &Position) -> Option<&Trail> {
        if pos.r() < self.row_n && pos.c() < self.col_n {
            self.trails.get(pos.r() * self.col_n + pos.c())
        } else {
            None
        }
    }

    pub fn cell_n(&self) -> usize {
        self.trails.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    pub level_no: usize,
    pub height: i32,
    pub seed_n: usize,
    pub visited_n: usize,
}

pub struct LongestPathEngine<'a> {
    map: &'a ElevationMap,
    min_height: i32,
}

impl<'a> LongestPathEngine<'a> {
    pub fn new(map: &'a ElevationMap) -> Self {
        Self {
            map,
            min_height: map.min_height().unwrap_or(0),
        }
    }

    pub fn run(&self) -> TrailTable {
        self.run_with(|_| ())
    }

    /// Run the search, calling `observer` after each level of equal height is processed.
    pub fn run_with<F: FnMut(&LevelReport)>(&self, mut observer: F) -> TrailTable {
        let cell_n = self.map.cell_n();
        let mut trails = vec![Trail::default(); cell_n];
        let mut unvisited = (0..cell_n)
            .map(|ind| (self.map.height_at(ind), ind))
            .collect::<BTreeSet<_>>();

        let mut level_no = 0;
        while let Some(&(height, _)) = unvisited.first() {
            level_no += 1;
            let seeds = unvisited
                .range((height, 0)..=(height, usize::MAX))
                .map(|(_, ind)| *ind)
                .collect::<Vec<_>>();
            let visited_n = self.relax_level(&seeds, &mut trails, &mut unvisited);
            let report = LevelReport {
                level_no,
                height,
                seed_n: seeds.len(),
                visited_n,
            };
            tracing::debug!(
                level_no,
                height,
                seed_n = report.seed_n,
                visited_n,
                remain_n = unvisited.len(),
                "relaxed level"
            );
            observer(&report);
        }

        TrailTable {
            trails,
            row_n: self.map.row_n(),
            col_n: self.map.col_n(),
        }
    }

    /// Returns how many cells were dequeued, which may exceed the seed count.
    fn relax_level(
        &self,
        seeds: &[usize],
        trails: &mut [Trail],
        unvisited: &mut BTreeSet<(i32, usize)>,
    ) -> usize {
        let cell_n = self.map.cell_n();
        let mut to_visit = BinaryHeap::with_capacity(seeds.len());
        let mut pending = HashSet::with_capacity(seeds.len());
        for &ind in seeds {
            to_visit.push(Reverse((self.map.height_at(ind), ind)));
            pending.insert(ind);
        }

        let mut visited_n = 0;
        while let Some(Reverse((height, ind))) = to_visit.pop() {
            pending.remove(&ind);
            unvisited.remove(&(height, ind));
            visited_n += 1;

            let trail = trails[ind];
            tracing::trace!(
                ind,
                edge_n = trail.edge_n,
                ascent = trail.ascent,
                prev = ?trail.prev,
                "visit cell"
            );
            debug_assert!(
                trail.ascent <= i64::from(height) - i64::from(self.min_height),
                "ascent({}) of cell {} climbs above its height({})",
                trail.ascent,
                ind,
                height
            );

            for next_ind in self.map.ascending_neighbors(ind) {
                let next_height = self.map.height_at(next_ind);
                debug_assert!(
                    next_height > height,
                    "edge {} -> {} is not ascending",
                    ind,
                    next_ind
                );

                let edge_n = trail.edge_n + 1;
                let ascent = trail.ascent + (i64::from(next_height) - i64::from(height));
                if trails[next_ind].is_improved_by(edge_n, ascent) {
                    trails[next_ind] = Trail {
                        edge_n,
                        ascent,
                        prev: Some(ind),
                    };
                    if pending.insert(next_ind) {
                        to_visit.push(Reverse((next_height, next_ind)));
                    }
                }
            }

            debug_assert!(
                to_visit.len() == pending.len() && to_visit.len() <= cell_n,
                "pending cells({}) exceed map size({})",
                to_visit.len(),
                cell_n
            );
        }

        visited_n
    }
}
