/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! The MODI (modified distribution) method.
//!
//! Given a feasible allocation the dual potentials `u` (rows) and `v`
//! (columns) are computed from the basic cells, i.e. the cells with a
//! positive allocation, such that `cost = u + v` on each basic cell.
//! The allocation is optimal if all reduced costs `cost - (u + v)` of
//! the non-basic cells are non-negative. Otherwise the non-basic cell
//! with the most negative reduced cost enters the basis and the
//! allocation is shifted along the stepping-stone cycle through this
//! cell.
//!
//! One call performs at most one pivot. Repeating the call on the new
//! allocation until it is optimal yields an optimal solution.
//!
//! # Example
//!
//! ```
//! use rs_transport::{Matrix, Problem};
//! use rs_transport::initial::northwest_corner;
//! use rs_transport::modi::modi;
//!
//! let p = Problem::from_rows(vec![30, 20], vec![10, 25, 15],
//!                            &[vec![8, 6, 10], vec![9, 12, 13]]).unwrap();
//! let mut allocations = northwest_corner(&p).allocations;
//! loop {
//!     let step = modi(p.costs(), &allocations).unwrap();
//!     if step.is_optimal {
//!         assert_eq!(step.new_total_cost, 420);
//!         break;
//!     }
//!     assert!(step.improved);
//!     allocations = step.new_allocations;
//! }
//! ```

use crate::error::{Error, Location, Result};
use crate::matrix::Matrix;
use crate::num::{is_nonnegative, Value};
use crate::problem::{check_costs, total_cost};

use log::{debug, trace, warn};
use num_traits::Signed;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The dual potentials of a basis.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Potentials<F> {
    /// The row potentials.
    pub u: Vec<F>,
    /// The column potentials.
    pub v: Vec<F>,
    /// `true` if some potential could not be derived from the basic
    /// cells and has been set to zero.
    pub degenerate: bool,
}

/// The result of one MODI step.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ModiStep<F> {
    pub u: Vec<F>,
    pub v: Vec<F>,
    /// The reduced cost of every cell.
    pub deltas: Matrix<F>,
    /// The non-basic cell with the most negative reduced cost.
    pub entering: Option<(usize, usize)>,
    /// The reduced cost of the entering cell (zero if optimal).
    pub most_negative: F,
    pub is_optimal: bool,
    /// `true` if a pivot has been performed.
    pub improved: bool,
    /// `true` if the basis did not determine all potentials.
    pub degenerate: bool,
    /// The stepping-stone cycle starting at the entering cell.
    pub cycle: Option<Vec<(usize, usize)>>,
    /// The quantity shifted along the cycle.
    pub pivot: Option<F>,
    pub new_allocations: Matrix<F>,
    pub new_total_cost: F,
}

/// The MODI optimality test.
#[derive(Clone, Debug)]
pub struct Modi<F> {
    /// Reduced costs `>= -tolerance` are considered non-negative.
    ///
    /// The default is zero, which is fine for integer costs.
    pub tolerance: F,
}

impl<F> Default for Modi<F>
where
    F: Value + Signed,
{
    fn default() -> Self {
        Modi { tolerance: F::zero() }
    }
}

impl<F> Modi<F>
where
    F: Value + Signed,
{
    pub fn new() -> Self {
        Modi::default()
    }

    /// Test the allocation for optimality and perform one pivot if it
    /// is not optimal.
    ///
    /// The allocation must have the same shape as the costs.
    pub fn step(&self, costs: &Matrix<F>, allocations: &Matrix<F>) -> Result<ModiStep<F>> {
        check_costs(costs)?;
        if allocations.shape() != costs.shape() {
            return Err(Error::ShapeMismatch {
                expected: costs.shape(),
                actual: allocations.shape(),
            });
        }
        if let Some((i, j, _)) = allocations.cells().find(|&(_, _, x)| !is_nonnegative(x)) {
            return Err(Error::InvalidValue(Location::Allocation(i, j)));
        }

        let pots = potentials(costs, allocations);
        let deltas = reduced_costs(costs, &pots);

        // most negative reduced cost of a non-basic cell
        let mut most_negative = F::zero();
        let mut entering = None;
        for (i, j, d) in deltas.cells() {
            if !is_basic(allocations[(i, j)]) && d < most_negative && d < -self.tolerance {
                most_negative = d;
                entering = Some((i, j));
            }
        }

        let current_cost = total_cost(allocations, costs);
        let mut result = ModiStep {
            u: pots.u,
            v: pots.v,
            deltas,
            entering,
            most_negative,
            is_optimal: entering.is_none(),
            improved: false,
            degenerate: pots.degenerate,
            cycle: None,
            pivot: None,
            new_allocations: allocations.clone(),
            new_total_cost: current_cost,
        };

        let start = match entering {
            Some(cell) => cell,
            None => {
                debug!("MODI: allocation with cost {:?} is optimal", current_cost);
                return Ok(result);
            }
        };
        trace!("MODI: entering cell {:?} with reduced cost {:?}", start, most_negative);

        let mut cells = basic_cells(allocations);
        cells.push(start);
        let cycle = match find_cycle(&cells, start) {
            Some(cycle) => cycle,
            None => {
                warn!("MODI: no cycle through entering cell {:?}, basis is malformed", start);
                return Ok(result);
            }
        };

        // "-" cells are at odd positions, all of them are basic
        let theta = cycle
            .iter()
            .skip(1)
            .step_by(2)
            .map(|&cell| allocations[cell])
            .fold(None, |acc: Option<F>, x| match acc {
                Some(m) if m <= x => Some(m),
                _ => Some(x),
            })
            .unwrap_or_else(F::zero);

        let mut new_allocations = allocations.clone();
        for (k, &cell) in cycle.iter().enumerate() {
            if k % 2 == 0 {
                new_allocations[cell] += theta;
            } else {
                new_allocations[cell] -= theta;
            }
            if new_allocations[cell].is_negative() {
                new_allocations[cell] = F::zero();
            }
        }

        result.new_total_cost = total_cost(&new_allocations, costs);
        debug!(
            "MODI: pivot {:?} along {:?}, cost {:?} -> {:?}",
            theta, cycle, current_cost, result.new_total_cost
        );

        result.improved = true;
        result.cycle = Some(cycle);
        result.pivot = Some(theta);
        result.new_allocations = new_allocations;
        Ok(result)
    }
}

/// Perform one MODI step with default settings.
pub fn modi<F>(costs: &Matrix<F>, allocations: &Matrix<F>) -> Result<ModiStep<F>>
where
    F: Value + Signed,
{
    Modi::default().step(costs, allocations)
}

fn is_basic<F>(x: F) -> bool
where
    F: Value,
{
    x > F::zero()
}

/// Return the cells with positive allocation in row-major order.
fn basic_cells<F>(allocations: &Matrix<F>) -> Vec<(usize, usize)>
where
    F: Value,
{
    allocations
        .cells()
        .filter(|&(_, _, x)| is_basic(x))
        .map(|(i, j, _)| (i, j))
        .collect()
}

/// Compute the potentials of the basis given by the allocation.
///
/// `u[0]` is fixed to zero and the potentials are propagated along
/// the basic cells until nothing changes. Rows and columns that are
/// not reached get potential zero.
pub fn potentials<F>(costs: &Matrix<F>, allocations: &Matrix<F>) -> Potentials<F>
where
    F: Value + Signed,
{
    let (m, n) = costs.shape();
    let basics = basic_cells(allocations);

    let mut u: Vec<Option<F>> = vec![None; m];
    let mut v: Vec<Option<F>> = vec![None; n];
    if m > 0 {
        u[0] = Some(F::zero());
    }

    let mut changed = true;
    while changed {
        changed = false;
        for &(i, j) in &basics {
            if let (Some(ui), None) = (u[i], v[j]) {
                v[j] = Some(costs[(i, j)] - ui);
                changed = true;
            }
            if let (None, Some(vj)) = (u[i], v[j]) {
                u[i] = Some(costs[(i, j)] - vj);
                changed = true;
            }
        }
    }

    let degenerate = u.iter().chain(v.iter()).any(Option::is_none);
    if degenerate {
        trace!("MODI: degenerate basis with {} basic cells", basics.len());
    }

    Potentials {
        u: u.into_iter().map(|x| x.unwrap_or_else(F::zero)).collect(),
        v: v.into_iter().map(|x| x.unwrap_or_else(F::zero)).collect(),
        degenerate,
    }
}

/// Compute the reduced costs `cost - (u + v)` of all cells.
pub fn reduced_costs<F>(costs: &Matrix<F>, pots: &Potentials<F>) -> Matrix<F>
where
    F: Value + Signed,
{
    Matrix::from_fn(costs.num_rows(), costs.num_cols(), |i, j| {
        costs[(i, j)] - (pots.u[i] + pots.v[j])
    })
}

/// Find a stepping-stone cycle through `start`.
///
/// The cycle consists of cells from `cells` (`start` is added if
/// missing) and alternates between moves within a row and moves
/// within a column. It has even length of at least 4 and is returned
/// starting with `start`, without repeating it at the end.
///
/// # Example
///
/// ```
/// use rs_transport::modi::find_cycle;
///
/// let cells = [(0, 0), (0, 1), (1, 1), (1, 2), (2, 0), (2, 2)];
/// let cycle = find_cycle(&cells, (0, 0)).unwrap();
/// assert_eq!(cycle, vec![(0, 0), (0, 1), (1, 1), (1, 2), (2, 2), (2, 0)]);
/// ```
pub fn find_cycle(cells: &[(usize, usize)], start: (usize, usize)) -> Option<Vec<(usize, usize)>> {
    let mut cells = cells.to_vec();
    if !cells.contains(&start) {
        cells.push(start);
    }
    cells.sort_unstable();
    cells.dedup();

    let nrows = cells.iter().map(|&(i, _)| i + 1).max().unwrap_or(0);
    let ncols = cells.iter().map(|&(_, j)| j + 1).max().unwrap_or(0);
    let mut rows = vec![vec![]; nrows];
    let mut cols = vec![vec![]; ncols];
    for &(i, j) in &cells {
        rows[i].push((i, j));
        cols[j].push((i, j));
    }

    let search = CycleSearch { rows, cols, start };
    let mut path = vec![start];
    for &in_row in &[true, false] {
        if search.dfs(start, &mut path, in_row) {
            return Some(path);
        }
    }
    None
}

/// Depth-first search for a stepping-stone cycle.
struct CycleSearch {
    /// The cells of each row, sorted by column.
    rows: Vec<Vec<(usize, usize)>>,
    /// The cells of each column, sorted by row.
    cols: Vec<Vec<(usize, usize)>>,
    start: (usize, usize),
}

impl CycleSearch {
    /// Extend `path` ending in `pos` by a move within the row of `pos`
    /// (if `in_row`) or within its column.
    fn dfs(&self, pos: (usize, usize), path: &mut Vec<(usize, usize)>, in_row: bool) -> bool {
        let neighbors = if in_row { &self.rows[pos.0] } else { &self.cols[pos.1] };
        for &next in neighbors {
            if next == pos {
                continue;
            }
            if next == self.start {
                // closing the cycle must keep the moves alternating
                if path.len() >= 4 && path.len() % 2 == 0 {
                    return true;
                }
                continue;
            }
            if path.contains(&next) {
                continue;
            }
            path.push(next);
            if self.dfs(next, path, !in_row) {
                return true;
            }
            path.pop();
        }
        false
    }
}
