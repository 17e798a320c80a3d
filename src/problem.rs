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

//! Validated transportation problems.

use crate::error::{Error, Location, Result};
use crate::matrix::Matrix;
use crate::num::{is_nonnegative, Value};

#[cfg(feature = "serialize")]
use serde_derive::Serialize;

/// A transportation problem.
///
/// The problem consists of the supplies of the origins, the demands
/// of the destinations and the cost of shipping one unit from each
/// origin to each destination. A `Problem` can only be created from
/// valid data and is never modified afterwards.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Problem<F> {
    supplies: Vec<F>,
    demands: Vec<F>,
    costs: Matrix<F>,
}

impl<F> Problem<F>
where
    F: Value,
{
    /// Create a new problem.
    ///
    /// There must be one supply per row and one demand per column of
    /// the cost matrix and all values must be non-negative.
    pub fn new(supplies: Vec<F>, demands: Vec<F>, costs: Matrix<F>) -> Result<Self> {
        check_costs(&costs)?;
        if supplies.len() != costs.num_rows() {
            return Err(Error::LengthMismatch {
                what: "supplies",
                len: supplies.len(),
                expected: costs.num_rows(),
            });
        }
        if demands.len() != costs.num_cols() {
            return Err(Error::LengthMismatch {
                what: "demands",
                len: demands.len(),
                expected: costs.num_cols(),
            });
        }

        if let Some(i) = supplies.iter().position(|&s| !is_nonnegative(s)) {
            return Err(Error::InvalidValue(Location::Supply(i)));
        }
        if let Some(j) = demands.iter().position(|&d| !is_nonnegative(d)) {
            return Err(Error::InvalidValue(Location::Demand(j)));
        }

        Ok(Problem {
            supplies,
            demands,
            costs,
        })
    }

    /// Create a new problem with the cost matrix given as rows.
    pub fn from_rows<R>(supplies: Vec<F>, demands: Vec<F>, costs: &[R]) -> Result<Self>
    where
        R: AsRef<[F]>,
    {
        Problem::new(supplies, demands, Matrix::from_rows(costs)?)
    }

    pub fn supplies(&self) -> &[F] {
        &self.supplies
    }

    pub fn demands(&self) -> &[F] {
        &self.demands
    }

    pub fn costs(&self) -> &Matrix<F> {
        &self.costs
    }

    pub fn num_origins(&self) -> usize {
        self.supplies.len()
    }

    pub fn num_destinations(&self) -> usize {
        self.demands.len()
    }

    pub fn total_supply(&self) -> F {
        sum(&self.supplies)
    }

    pub fn total_demand(&self) -> F {
        sum(&self.demands)
    }

    /// Return `true` if total supply equals total demand.
    pub fn is_balanced(&self) -> bool {
        self.total_supply() == self.total_demand()
    }

    /// Return the absolute difference of total supply and total demand.
    ///
    /// This is the quantity of the dummy origin or destination that
    /// balances the problem.
    pub fn imbalance(&self) -> F {
        let (s, d) = (self.total_supply(), self.total_demand());
        if s >= d {
            s - d
        } else {
            d - s
        }
    }
}

/// Check that the cost matrix is not empty and all costs are
/// non-negative numbers.
pub(crate) fn check_costs<F>(costs: &Matrix<F>) -> Result<()>
where
    F: Value,
{
    if costs.num_rows() == 0 || costs.num_cols() == 0 {
        return Err(Error::EmptyMatrix);
    }
    match costs.cells().find(|&(_, _, c)| !is_nonnegative(c)) {
        Some((i, j, _)) => Err(Error::InvalidValue(Location::Cost(i, j))),
        None => Ok(()),
    }
}

pub(crate) fn sum<F>(values: &[F]) -> F
where
    F: Value,
{
    values.iter().fold(F::zero(), |acc, &x| acc + x)
}

/// Return `sum(allocations[i][j] * costs[i][j])`.
pub(crate) fn total_cost<F>(allocations: &Matrix<F>, costs: &Matrix<F>) -> F
where
    F: Value,
{
    allocations
        .cells()
        .fold(F::zero(), |acc, (i, j, x)| acc + x * costs[(i, j)])
}
