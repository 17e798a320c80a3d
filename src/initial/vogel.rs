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

//! Vogel's Approximation Method.
//!
//! In each iteration the penalty of every active row and column is
//! computed as the difference between its two smallest costs (over
//! the active cross lines). The line with the largest penalty is
//! chosen (rows win ties) and its cheapest active cell receives as
//! much as possible. Rows and columns are deactivated as soon as
//! their supply resp. demand is exhausted.

use super::{Solution, Step, Tableau};
use crate::balance::{balance, Balanced};
use crate::num::Value;
use crate::problem::Problem;

use log::trace;

use std::cmp::Ordering;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A row or column of the cost matrix.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Line {
    Row(usize),
    Column(usize),
}

/// A step of Vogel's method.
///
/// Besides the allocation itself the step records the complete
/// penalty computation that justifies the choice of the cell.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VogelStep<F> {
    pub allocation: Step<F>,
    /// The line with the largest penalty.
    pub line: Line,
    /// The penalty of the chosen line.
    pub penalty: F,
    /// The penalty of each row, `None` for inactive rows.
    pub row_penalties: Vec<Option<F>>,
    /// The penalty of each column, `None` for inactive columns.
    pub col_penalties: Vec<Option<F>>,
    /// The `(cost, col)` pairs of each active row, sorted by cost.
    pub row_candidates: Vec<Vec<(F, usize)>>,
    /// The `(cost, row)` pairs of each active column, sorted by cost.
    pub col_candidates: Vec<Vec<(F, usize)>>,
    /// `true` if the largest row and column penalties were equal.
    pub tie: bool,
    /// The smallest cost in the chosen line.
    pub min_cost_in_line: F,
    /// The position (column resp. row index) of the smallest cost in
    /// the chosen line.
    pub min_cost_position: usize,
}

/// Compute an initial solution with Vogel's Approximation Method.
///
/// # Example
///
/// ```
/// use rs_transport::Problem;
/// use rs_transport::initial::{vogel, Line};
///
/// let p = Problem::from_rows(vec![10, 10], vec![10, 10],
///                            &[vec![1, 9], vec![9, 1]]).unwrap();
/// let sol = vogel(&p);
/// assert_eq!(sol.steps[0].line, Line::Row(0));
/// assert!(sol.steps[0].tie);
/// assert_eq!(sol.allocations.to_rows(), vec![vec![10, 0], vec![0, 10]]);
/// assert_eq!(sol.total_cost, 20);
/// ```
pub fn vogel<F>(problem: &Problem<F>) -> Solution<F, VogelStep<F>>
where
    F: Value,
{
    vogel_balanced(&balance(problem))
}

/// Run Vogel's method on an already balanced problem.
pub fn vogel_balanced<F>(balanced: &Balanced<F>) -> Solution<F, VogelStep<F>>
where
    F: Value,
{
    let costs = &balanced.costs;
    let mut tableau = Tableau::new(balanced);
    let mut active_rows = vec![true; balanced.num_rows()];
    let mut active_cols = vec![true; balanced.num_cols()];
    let mut steps = Vec::new();

    while active_rows.iter().any(|&a| a) && active_cols.iter().any(|&a| a) {
        let row_candidates: Vec<_> = (0..costs.num_rows())
            .map(|i| {
                if active_rows[i] {
                    sorted_candidates(costs.row(i).iter().cloned(), &active_cols)
                } else {
                    vec![]
                }
            })
            .collect();
        let col_candidates: Vec<_> = (0..costs.num_cols())
            .map(|j| {
                if active_cols[j] {
                    sorted_candidates(costs.column(j), &active_rows)
                } else {
                    vec![]
                }
            })
            .collect();

        let row_penalties = penalties(&row_candidates, &active_rows);
        let col_penalties = penalties(&col_candidates, &active_cols);

        // Both lists contain at least one active line.
        let (max_row, row_penalty) = match largest(&row_penalties) {
            Some(r) => r,
            None => break,
        };
        let (max_col, col_penalty) = match largest(&col_penalties) {
            Some(c) => c,
            None => break,
        };

        let (line, penalty, tie, (min_cost_in_line, min_cost_position)) = if row_penalty >= col_penalty {
            (
                Line::Row(max_row),
                row_penalty,
                row_penalty == col_penalty,
                row_candidates[max_row][0],
            )
        } else {
            (
                Line::Column(max_col),
                col_penalty,
                false,
                col_candidates[max_col][0],
            )
        };
        let (i, j) = match line {
            Line::Row(i) => (i, min_cost_position),
            Line::Column(j) => (min_cost_position, j),
        };

        trace!(
            "Vogel: penalty {:?} on {:?} (tie: {}), cell ({}, {})",
            penalty,
            line,
            tie,
            i,
            j
        );

        let allocation = tableau.allocate(i, j);
        if allocation.supply_after.is_zero() {
            active_rows[i] = false;
        }
        if allocation.demand_after.is_zero() {
            active_cols[j] = false;
        }

        steps.push(VogelStep {
            allocation,
            line,
            penalty,
            row_penalties,
            col_penalties,
            row_candidates,
            col_candidates,
            tie,
            min_cost_in_line,
            min_cost_position,
        });
    }

    tableau.finish(steps, balanced)
}

/// Return the `(cost, index)` pairs of the active cross lines sorted
/// by cost.
///
/// The sort is stable, so equal costs stay in index order.
fn sorted_candidates<F, I>(costs: I, active: &[bool]) -> Vec<(F, usize)>
where
    F: Value,
    I: Iterator<Item = F>,
{
    let mut cands: Vec<_> = costs
        .enumerate()
        .filter(|&(k, _)| active[k])
        .map(|(k, c)| (c, k))
        .collect();
    cands.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    cands
}

/// Compute the penalty of each active line from its sorted candidates.
///
/// The penalty is the difference of the two smallest costs. If only
/// one cross line is active, the penalty is that single cost.
fn penalties<F>(candidates: &[Vec<(F, usize)>], active: &[bool]) -> Vec<Option<F>>
where
    F: Value,
{
    candidates
        .iter()
        .zip(active)
        .map(|(cands, &a)| {
            if !a {
                None
            } else if cands.len() >= 2 {
                Some(cands[1].0 - cands[0].0)
            } else if let Some(&(c, _)) = cands.first() {
                Some(c)
            } else {
                Some(F::zero())
            }
        })
        .collect()
}

/// Return the first line with the largest penalty.
fn largest<F>(penalties: &[Option<F>]) -> Option<(usize, F)>
where
    F: Value,
{
    let mut best: Option<(usize, F)> = None;
    for (k, p) in penalties.iter().enumerate() {
        if let Some(p) = *p {
            if best.map(|(_, b)| p > b).unwrap_or(true) {
                best = Some((k, p));
            }
        }
    }
    best
}
