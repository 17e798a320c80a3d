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

//! Balancing of supply and demand.
//!
//! The initial solution heuristics require that total supply equals
//! total demand. An unbalanced problem is balanced by adding a dummy
//! destination (excess supply) or a dummy origin (excess demand)
//! whose quantity is the difference and whose costs are all zero.
//!
//! # Example
//!
//! ```
//! use rs_transport::{balance, Dummy, Problem};
//!
//! let p = Problem::from_rows(vec![5, 10], vec![20, 0], &[vec![1, 2], vec![3, 4]]).unwrap();
//! let b = balance(&p);
//! assert_eq!(b.dummy, Some(Dummy::Origin(5)));
//! assert_eq!(b.supplies, vec![5, 10, 5]);
//! assert_eq!(b.costs.row(2), &[0, 0]);
//! ```

use crate::matrix::Matrix;
use crate::num::Value;
use crate::problem::{sum, Problem};

use log::debug;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The dummy line added to balance a problem.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Dummy<F> {
    /// A dummy origin (last row) with the given supply.
    Origin(F),
    /// A dummy destination (last column) with the given demand.
    Destination(F),
}

impl<F> Dummy<F>
where
    F: Copy,
{
    /// The supply resp. demand of the dummy line.
    pub fn quantity(&self) -> F {
        match *self {
            Dummy::Origin(q) | Dummy::Destination(q) => q,
        }
    }
}

/// A balanced problem.
///
/// Total supply and total demand are always equal.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Balanced<F> {
    pub supplies: Vec<F>,
    pub demands: Vec<F>,
    pub costs: Matrix<F>,
    /// The dummy line, `None` if the problem was already balanced.
    pub dummy: Option<Dummy<F>>,
}

impl<F> Balanced<F>
where
    F: Value,
{
    /// Return `true` if a dummy line has been added.
    pub fn adjusted(&self) -> bool {
        self.dummy.is_some()
    }

    pub fn num_rows(&self) -> usize {
        self.supplies.len()
    }

    pub fn num_cols(&self) -> usize {
        self.demands.len()
    }

    /// The common value of total supply and total demand.
    pub fn total(&self) -> F {
        sum(&self.supplies)
    }
}

/// Balance a problem.
///
/// If total supply exceeds total demand a dummy destination is
/// appended, if total demand exceeds total supply a dummy origin is
/// appended. Otherwise the data is returned unchanged.
pub fn balance<F>(problem: &Problem<F>) -> Balanced<F>
where
    F: Value,
{
    let total_supply = problem.total_supply();
    let total_demand = problem.total_demand();

    let mut supplies = problem.supplies().to_vec();
    let mut demands = problem.demands().to_vec();

    let (costs, dummy) = if total_supply > total_demand {
        let q = total_supply - total_demand;
        demands.push(q);
        (problem.costs().with_column(F::zero()), Some(Dummy::Destination(q)))
    } else if total_supply < total_demand {
        let q = total_demand - total_supply;
        supplies.push(q);
        (problem.costs().with_row(F::zero()), Some(Dummy::Origin(q)))
    } else {
        (problem.costs().clone(), None)
    };

    debug!(
        "Balance {}x{} problem: supply {:?}, demand {:?}, dummy {:?}",
        problem.num_origins(),
        problem.num_destinations(),
        total_supply,
        total_demand,
        dummy
    );

    Balanced {
        supplies,
        demands,
        costs,
        dummy,
    }
}
