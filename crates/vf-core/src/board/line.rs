//! Line descriptors and solution-set enumeration.
//!
//! A line is one row or column together with its two clue targets. Its
//! *solution set* is every assignment of the five cells, drawn from their
//! current domains, that hits both the sum target and the voltorb count
//! exactly. The raw space is 4^5 = 1024 tuples; suffix bounds on the
//! remaining sum and the remaining zero-capable cells prune it to the
//! handful that matter.

use crate::board::domain::DomainMask;
use vf_common::{Axis, Position, GRID_SIZE};

/// Identifier of one of the ten lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    pub axis: Axis,
    pub index: u8,
}

impl LineId {
    pub fn row(index: u8) -> Self {
        LineId {
            axis: Axis::Row,
            index,
        }
    }

    pub fn col(index: u8) -> Self {
        LineId {
            axis: Axis::Col,
            index,
        }
    }

    /// All ten line ids in the deterministic propagation seed order:
    /// rows 0..5, then columns 0..5.
    pub fn all() -> impl Iterator<Item = LineId> {
        (0..GRID_SIZE as u8)
            .map(LineId::row)
            .chain((0..GRID_SIZE as u8).map(LineId::col))
    }

    /// Dense index in 0..10 (rows first) for queue bookkeeping.
    pub fn ordinal(&self) -> usize {
        match self.axis {
            Axis::Row => self.index as usize,
            Axis::Col => GRID_SIZE + self.index as usize,
        }
    }

    /// The five board positions of this line, in cell order.
    pub fn positions(&self) -> [Position; GRID_SIZE] {
        let mut positions = [Position(0, 0); GRID_SIZE];
        for (k, slot) in positions.iter_mut().enumerate() {
            *slot = match self.axis {
                Axis::Row => Position(self.index, k as u8),
                Axis::Col => Position(k as u8, self.index),
            };
        }
        positions
    }
}

/// One line's clue targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpec {
    pub id: LineId,
    /// Required sum of the five cell values.
    pub sum_target: u32,
    /// Required count of zeros among the five cells.
    pub zero_target: u32,
}

impl LineSpec {
    /// Enumerate the solution set under the given per-cell domains.
    ///
    /// Depth-first over the five positions. At depth `k` the partial sum and
    /// zero count are checked against suffix bounds: the minimum and maximum
    /// sum the remaining cells can contribute, and how many of them can
    /// still be zero.
    pub fn solutions(&self, domains: &[DomainMask; GRID_SIZE]) -> Vec<[u8; GRID_SIZE]> {
        if domains.iter().any(|d| d.is_empty()) {
            return Vec::new();
        }

        // Suffix bounds over positions k..5.
        let mut min_sum = [0u32; GRID_SIZE + 1];
        let mut max_sum = [0u32; GRID_SIZE + 1];
        let mut zero_capable = [0u32; GRID_SIZE + 1];
        for k in (0..GRID_SIZE).rev() {
            // Emptiness was ruled out above.
            let lo = domains[k].min_value().unwrap_or(0) as u32;
            let hi = domains[k].max_value().unwrap_or(0) as u32;
            min_sum[k] = min_sum[k + 1] + lo;
            max_sum[k] = max_sum[k + 1] + hi;
            zero_capable[k] = zero_capable[k + 1] + u32::from(domains[k].contains(0));
        }

        let mut out = Vec::new();
        let mut tuple = [0u8; GRID_SIZE];
        self.descend(domains, &min_sum, &max_sum, &zero_capable, 0, 0, 0, &mut tuple, &mut out);
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn descend(
        &self,
        domains: &[DomainMask; GRID_SIZE],
        min_sum: &[u32; GRID_SIZE + 1],
        max_sum: &[u32; GRID_SIZE + 1],
        zero_capable: &[u32; GRID_SIZE + 1],
        depth: usize,
        sum: u32,
        zeros: u32,
        tuple: &mut [u8; GRID_SIZE],
        out: &mut Vec<[u8; GRID_SIZE]>,
    ) {
        if sum + min_sum[depth] > self.sum_target || sum + max_sum[depth] < self.sum_target {
            return;
        }
        if zeros > self.zero_target || zeros + zero_capable[depth] < self.zero_target {
            return;
        }
        if depth == GRID_SIZE {
            // The bounds above are exact at depth 5, so both targets hold.
            out.push(*tuple);
            return;
        }
        for v in domains[depth].values() {
            tuple[depth] = v;
            self.descend(
                domains,
                min_sum,
                max_sum,
                zero_capable,
                depth + 1,
                sum + v as u32,
                zeros + u32::from(v == 0),
                tuple,
                out,
            );
        }
    }

    /// Whether any assignment meets the sum target alone (zero count
    /// relaxed). Distinguishes which clue killed an empty solution set.
    pub fn sum_reachable(&self, domains: &[DomainMask; GRID_SIZE]) -> bool {
        if domains.iter().any(|d| d.is_empty()) {
            return false;
        }
        let hi: u32 = domains.iter().map(|d| d.max_value().unwrap_or(0) as u32).sum();
        if self.sum_target > hi {
            return false;
        }
        self.any_sum(domains, 0, 0)
    }

    fn any_sum(&self, domains: &[DomainMask; GRID_SIZE], depth: usize, sum: u32) -> bool {
        if depth == GRID_SIZE {
            return sum == self.sum_target;
        }
        domains[depth]
            .values()
            .any(|v| sum + v as u32 <= self.sum_target && self.any_sum(domains, depth + 1, sum + v as u32))
    }

    /// Project a solution set back onto per-position value unions.
    pub fn projection(solutions: &[[u8; GRID_SIZE]]) -> [DomainMask; GRID_SIZE] {
        let mut union = [DomainMask::EMPTY; GRID_SIZE];
        for tuple in solutions {
            for (mask, &v) in union.iter_mut().zip(tuple.iter()) {
                mask.insert(v);
            }
        }
        union
    }
}
