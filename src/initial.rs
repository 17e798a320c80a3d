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

//! Heuristics for an initial basic feasible solution.
//!
//! All heuristics balance the problem first and then allocate the
//! minimum of the remaining supply and demand to a sequence of cells.
//! They differ only in the order in which the cells are chosen.

pub mod mincost;
pub mod northwest;
pub mod vogel;

pub use self::mincost::minimum_cost;
pub use self::northwest::northwest_corner;
pub use self::vogel::{vogel, Line, VogelStep};

use crate::balance::Balanced;
use crate::matrix::Matrix;
use crate::num::{min, Value};

use log::{debug, trace};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A single allocation of an initial solution heuristic.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Step<F> {
    /// The number of the step, starting at 1.
    pub step: usize,
    pub row: usize,
    pub col: usize,
    /// The allocated quantity.
    pub quantity: F,
    /// The unit cost of the cell.
    pub cost: F,
    /// The cost of this allocation, `quantity * cost`.
    pub step_cost: F,
    pub supply_before: F,
    pub demand_before: F,
    pub supply_after: F,
    pub demand_after: F,
}

/// The result of an initial solution heuristic.
///
/// The allocation matrix has the shape of the balanced problem, i.e.
/// it contains the dummy line if one has been added.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Solution<F, S = Step<F>> {
    pub allocations: Matrix<F>,
    pub total_cost: F,
    pub steps: Vec<S>,
    /// The balanced problem, only present if a dummy line was added.
    pub adjusted: Option<Balanced<F>>,
}

impl<F, S> Solution<F, S>
where
    F: Value,
{
    /// Return the number of cells with a positive allocation.
    pub fn num_basic(&self) -> usize {
        self.allocations.cells().filter(|&(_, _, x)| x > F::zero()).count()
    }
}

/// The remaining supplies and demands during a heuristic.
pub(crate) struct Tableau<'a, F> {
    costs: &'a Matrix<F>,
    supply: Vec<F>,
    demand: Vec<F>,
    allocations: Matrix<F>,
    total_cost: F,
    nsteps: usize,
}

impl<'a, F> Tableau<'a, F>
where
    F: Value,
{
    pub(crate) fn new(balanced: &'a Balanced<F>) -> Self {
        Tableau {
            costs: &balanced.costs,
            supply: balanced.supplies.clone(),
            demand: balanced.demands.clone(),
            allocations: Matrix::new(balanced.num_rows(), balanced.num_cols(), F::zero()),
            total_cost: F::zero(),
            nsteps: 0,
        }
    }

    pub(crate) fn costs(&self) -> &'a Matrix<F> {
        self.costs
    }

    pub(crate) fn supply(&self, i: usize) -> F {
        self.supply[i]
    }

    pub(crate) fn demand(&self, j: usize) -> F {
        self.demand[j]
    }

    /// Allocate as much as possible to cell `(i, j)`.
    ///
    /// Afterwards the remaining supply of `i` or the remaining demand
    /// of `j` (or both) is zero.
    pub(crate) fn allocate(&mut self, i: usize, j: usize) -> Step<F> {
        let supply = self.supply[i];
        let demand = self.demand[j];
        let quantity = min(supply, demand);
        let cost = self.costs[(i, j)];
        let step_cost = quantity * cost;

        self.allocations[(i, j)] += quantity;
        self.total_cost += step_cost;
        self.supply[i] -= quantity;
        self.demand[j] -= quantity;
        self.nsteps += 1;

        trace!("Step {}: allocate {:?} to ({}, {}) at cost {:?}", self.nsteps, quantity, i, j, cost);

        Step {
            step: self.nsteps,
            row: i,
            col: j,
            quantity,
            cost,
            step_cost,
            supply_before: supply,
            demand_before: demand,
            supply_after: self.supply[i],
            demand_after: self.demand[j],
        }
    }

    pub(crate) fn finish<S>(self, steps: Vec<S>, balanced: &Balanced<F>) -> Solution<F, S> {
        debug!(
            "Initial solution with {} steps, total cost {:?}",
            self.nsteps, self.total_cost
        );
        Solution {
            allocations: self.allocations,
            total_cost: self.total_cost,
            steps,
            adjusted: if balanced.adjusted() {
                Some(balanced.clone())
            } else {
                None
            },
        }
    }
}
