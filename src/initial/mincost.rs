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

//! The Minimum Cost (least cost) method.

use super::{Solution, Tableau};
use crate::balance::{balance, Balanced};
use crate::num::Value;
use crate::problem::Problem;

/// Compute an initial solution with the Minimum Cost method.
///
/// The problem is balanced first. In each step the cheapest cell
/// whose row and column both have remaining supply resp. demand
/// receives as much as possible. Ties are broken by the first cell in
/// row-major order.
///
/// # Example
///
/// ```
/// use rs_transport::Problem;
/// use rs_transport::initial::minimum_cost;
///
/// let p = Problem::from_rows(vec![30, 20], vec![10, 25, 15],
///                            &[vec![8, 6, 10], vec![9, 12, 13]]).unwrap();
/// let sol = minimum_cost(&p);
/// assert_eq!(sol.allocations.to_rows(), vec![vec![5, 25, 0], vec![5, 0, 15]]);
/// assert_eq!(sol.total_cost, 430);
/// ```
pub fn minimum_cost<F>(problem: &Problem<F>) -> Solution<F>
where
    F: Value,
{
    minimum_cost_balanced(&balance(problem))
}

/// Run the Minimum Cost method on an already balanced problem.
pub fn minimum_cost_balanced<F>(balanced: &Balanced<F>) -> Solution<F>
where
    F: Value,
{
    let mut tableau = Tableau::new(balanced);
    let mut steps = Vec::new();

    while let Some((i, j)) = cheapest_active_cell(&tableau) {
        steps.push(tableau.allocate(i, j));
    }

    tableau.finish(steps, balanced)
}

/// Return the first cheapest cell with positive supply and demand.
fn cheapest_active_cell<F>(tableau: &Tableau<F>) -> Option<(usize, usize)>
where
    F: Value,
{
    let zero = F::zero();
    let mut best: Option<(usize, usize, F)> = None;
    for (i, j, c) in tableau.costs().cells() {
        if tableau.supply(i) > zero && tableau.demand(j) > zero && best.map(|(_, _, b)| c < b).unwrap_or(true) {
            best = Some((i, j, c));
        }
    }
    best.map(|(i, j, _)| (i, j))
}

#[cfg(test)]
mod tests {
    use super::minimum_cost;
    use crate::problem::Problem;

    #[test]
    fn test_minimum_cost_steps() {
        let p = Problem::from_rows(vec![30, 20], vec![10, 25, 15], &[vec![8, 6, 10], vec![9, 12, 13]]).unwrap();
        let sol = minimum_cost(&p);
        let cells: Vec<_> = sol.steps.iter().map(|s| (s.row, s.col, s.quantity)).collect();
        assert_eq!(cells, vec![(0, 1, 25), (0, 0, 5), (1, 0, 5), (1, 2, 15)]);
        assert_eq!(sol.total_cost, 430);
        assert!(sol.num_basic() <= 4);
    }

    #[test]
    fn test_minimum_cost_ties() {
        // All costs equal: the cells are filled in row-major order.
        let p = Problem::from_rows(vec![5, 5], vec![5, 5], &[vec![3, 3], vec![3, 3]]).unwrap();
        let sol = minimum_cost(&p);
        let cells: Vec<_> = sol.steps.iter().map(|s| (s.row, s.col)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 1)]);
        assert_eq!(sol.total_cost, 30);
    }

    #[test]
    fn test_minimum_cost_dummy() {
        let p = Problem::from_rows(vec![4, 4], vec![10], &[vec![2], vec![1]]).unwrap();
        let sol = minimum_cost(&p);
        assert_eq!(sol.allocations.to_rows(), vec![vec![4], vec![4], vec![2]]);
        // The dummy row is free.
        assert_eq!(sol.steps[0].cost, 0);
        assert_eq!(sol.total_cost, 12);
    }

    #[test]
    fn test_minimum_cost_float() {
        let p = Problem::from_rows(vec![1.5, 2.5], vec![2.0, 2.0], &[vec![1.0, 0.5], vec![2.0, 4.0]]).unwrap();
        let sol = minimum_cost(&p);
        assert_eq!(sol.allocations.to_rows(), vec![vec![0.0, 1.5], vec![2.0, 0.5]]);
        assert!((sol.total_cost - 6.75f64).abs() < 1e-12);
    }
}
