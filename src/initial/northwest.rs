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

//! The Northwest Corner rule.

use super::{Solution, Tableau};
use crate::balance::{balance, Balanced};
use crate::num::Value;
use crate::problem::Problem;

/// Compute an initial solution with the Northwest Corner rule.
///
/// The problem is balanced first. Starting in the top-left cell the
/// rule allocates as much as possible and moves down if the supply
/// of the current row is exhausted and right if the demand of the
/// current column is exhausted.
///
/// # Example
///
/// ```
/// use rs_transport::Problem;
/// use rs_transport::initial::northwest_corner;
///
/// let p = Problem::from_rows(vec![30, 20], vec![10, 25, 15],
///                            &[vec![8, 6, 10], vec![9, 12, 13]]).unwrap();
/// let sol = northwest_corner(&p);
/// assert_eq!(sol.allocations.to_rows(), vec![vec![10, 20, 0], vec![0, 5, 15]]);
/// assert_eq!(sol.total_cost, 455);
/// ```
pub fn northwest_corner<F>(problem: &Problem<F>) -> Solution<F>
where
    F: Value,
{
    northwest_corner_balanced(&balance(problem))
}

/// Run the Northwest Corner rule on an already balanced problem.
pub fn northwest_corner_balanced<F>(balanced: &Balanced<F>) -> Solution<F>
where
    F: Value,
{
    let (m, n) = (balanced.num_rows(), balanced.num_cols());
    let mut tableau = Tableau::new(balanced);
    let mut steps = Vec::with_capacity((m + n).saturating_sub(1));

    let (mut i, mut j) = (0, 0);
    while i < m && j < n {
        let step = tableau.allocate(i, j);
        let row_done = step.supply_after.is_zero();
        let col_done = step.demand_after.is_zero();
        steps.push(step);
        // Both may be exhausted at once, then we move diagonally.
        if row_done {
            i += 1;
        }
        if col_done {
            j += 1;
        }
    }

    tableau.finish(steps, balanced)
}
