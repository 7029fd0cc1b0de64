//! Residual liquidity bookkeeping shared by all route candidates of one
//! virtual book side.

use super::candidate::{EdgeLevel, RouteCandidate};
use crate::graph::PairGraph;
use crate::market::Side;
use crate::num;
use std::collections::HashMap;

/// Remaining quantity per edge level.
///
/// Candidates touching the same edge level draw from the same residual, so
/// liquidity consumed by one route is no longer available to any other
/// route crossing that level, regardless of which path either route came
/// from.
#[derive(Debug)]
pub struct Inventory(HashMap<EdgeLevel, f64>);

impl Inventory {
    /// Seeds residuals with the original level quantities for every edge
    /// level referenced by the given candidates.
    pub fn from_candidates(
        graph: &PairGraph,
        side: Side,
        candidates: &[RouteCandidate],
    ) -> Self {
        let mut residuals = HashMap::new();
        for candidate in candidates {
            for &edge_level in &candidate.levels {
                residuals
                    .entry(edge_level)
                    .or_insert_with(|| graph.book(edge_level.edge).side(side)[edge_level.level].amount);
            }
        }
        Inventory(residuals)
    }

    /// Returns the volume a candidate can still carry: the minimum residual
    /// over its edge levels, clamped at zero.
    ///
    /// This is not the candidate's original volume, as earlier assignments
    /// may have depleted some of its levels.
    pub fn usable_volume(&self, candidate: &RouteCandidate) -> f64 {
        let mut volume = candidate.max_volume;
        for edge_level in &candidate.levels {
            volume = num::min(volume, self.0[edge_level]);
        }
        volume.max(0.0)
    }

    /// Deducts a consumed volume from every edge level of a candidate.
    pub fn consume(&mut self, candidate: &RouteCandidate, volume: f64) {
        for edge_level in &candidate.levels {
            let residual = self
                .0
                .get_mut(edge_level)
                .expect("candidate level missing from inventory");
            *residual -= volume;
        }
    }
}
