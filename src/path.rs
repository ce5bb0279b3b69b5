use std::{fmt::Display, iter};

use crate::{
    engine::TrailTable,
    grid::{ElevationMap, Position},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub pos: Position,
    pub height: i32,
    /// Ascent still left above this step on the way to the end of the path.
    pub drop: i64,
}

impl Display for PathStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} drop:{} h:{}", self.pos, self.drop, self.height)
    }
}

/// Ascending path, listed from its highest cell back down to where it starts.
#[derive(Debug, Clone)]
pub struct SkiPath {
    steps: Vec<PathStep>,
    ascent: i64,
}

impl SkiPath {
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn ascent(&self) -> i64 {
        self.ascent
    }

    pub fn node_n(&self) -> usize {
        self.steps.len()
    }

    pub fn edge_n(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn end(&self) -> Option<&PathStep> {
        self.steps.first()
    }

    pub fn start(&self) -> Option<&PathStep> {
        self.steps.last()
    }
}

impl TrailTable {
    /// Index of the cell ending the longest path, the steepest one among equally long paths.
    ///
    /// Ties on both keys go to the cell scanned first, so the result is deterministic.
    pub fn champion(&self) -> Option<usize> {
        let trails = self.trails();
        let max_edge_n = trails.iter().map(|trail| trail.edge_n()).max()?;
        let mut champion = trails
            .iter()
            .position(|trail| trail.edge_n() == max_edge_n)?;

        for (ind, trail) in trails.iter().enumerate() {
            if trail.edge_n() == trails[champion].edge_n()
                && trail.ascent() > trails[champion].ascent()
            {
                champion = ind;
            }
        }

        Some(champion)
    }

    pub fn path_to(&self, ind: usize, map: &ElevationMap) -> SkiPath {
        let end = *self.trail_at(ind);
        let steps = iter::successors(Some(ind), |cur_ind| self.trail_at(*cur_ind).prev())
            .take(end.edge_n() + 1)
            .map(|cur_ind| PathStep {
                pos: map.position_of(cur_ind),
                height: map.height_at(cur_ind),
                drop: end.ascent() - self.trail_at(cur_ind).ascent(),
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(steps.len(), end.edge_n() + 1);

        SkiPath {
            steps,
            ascent: end.ascent(),
        }
    }

    pub fn best_path(&self, map: &ElevationMap) -> Option<SkiPath> {
        self.champion().map(|ind| self.path_to(ind, map))
    }
}
