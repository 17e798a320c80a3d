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

//! Dispatch of a solve request to the selected method.

use crate::assignment::{Assignment, Hungarian};
use crate::error::{Error, Result};
use crate::initial::{self, minimum_cost, northwest_corner, vogel, VogelStep};
use crate::matrix::Matrix;
use crate::num::Value;
use crate::problem::Problem;

use log::debug;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The solution method.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum Method {
    Northwest,
    MinimumCost,
    Vogel,
    Hungarian,
    HungarianMaximize,
}

impl Method {
    /// Return the name of the method.
    pub fn name(self) -> &'static str {
        match self {
            Method::Northwest => "northwest",
            Method::MinimumCost => "minimum_cost",
            Method::Vogel => "vogel",
            Method::Hungarian => "hungarian",
            Method::HungarianMaximize => "hungarian_maximize",
        }
    }

    /// Return `true` if this is an assignment method.
    ///
    /// Assignment methods ignore supplies and demands.
    pub fn is_assignment(self) -> bool {
        matches!(self, Method::Hungarian | Method::HungarianMaximize)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        write!(fmt, "{}", self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "northwest" => Ok(Method::Northwest),
            "minimum_cost" => Ok(Method::MinimumCost),
            "vogel" => Ok(Method::Vogel),
            "hungarian" => Ok(Method::Hungarian),
            "hungarian_maximize" => Ok(Method::HungarianMaximize),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// A solve request.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Request<F> {
    pub supplies: Vec<F>,
    pub demands: Vec<F>,
    /// The cost matrix as list of rows.
    pub costs: Vec<Vec<F>>,
    pub method: Method,
    /// The declared dimensions `(rows, cols)` of the cost matrix.
    ///
    /// If present, they must match the actual shape.
    #[cfg_attr(feature = "serialize", serde(default))]
    pub dimensions: Option<(usize, usize)>,
}

impl<F> Request<F> {
    /// Create a new request without declared dimensions.
    pub fn new(supplies: Vec<F>, demands: Vec<F>, costs: Vec<Vec<F>>, method: Method) -> Self {
        Request {
            supplies,
            demands,
            costs,
            method,
            dimensions: None,
        }
    }

    /// Return the request with declared dimensions.
    pub fn with_dimensions(self, nrows: usize, ncols: usize) -> Self {
        Request {
            dimensions: Some((nrows, ncols)),
            ..self
        }
    }
}

/// The solution of a request.
///
/// Each variant carries the result of its method, including the
/// method-specific steps.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "snake_case"))]
pub enum Solution<F> {
    Northwest(initial::Solution<F>),
    MinimumCost(initial::Solution<F>),
    Vogel(initial::Solution<F, VogelStep<F>>),
    Hungarian(Assignment<F>),
    HungarianMaximize(Assignment<F>),
}

impl<F> Solution<F>
where
    F: Value,
{
    /// Return the method that produced this solution.
    pub fn method(&self) -> Method {
        match self {
            Solution::Northwest(_) => Method::Northwest,
            Solution::MinimumCost(_) => Method::MinimumCost,
            Solution::Vogel(_) => Method::Vogel,
            Solution::Hungarian(_) => Method::Hungarian,
            Solution::HungarianMaximize(_) => Method::HungarianMaximize,
        }
    }

    pub fn total_cost(&self) -> F {
        match self {
            Solution::Northwest(sol) | Solution::MinimumCost(sol) => sol.total_cost,
            Solution::Vogel(sol) => sol.total_cost,
            Solution::Hungarian(a) | Solution::HungarianMaximize(a) => a.total_cost,
        }
    }

    /// Return the allocation matrix.
    ///
    /// For heuristics this has the shape of the balanced problem, for
    /// assignments the shape of the cost matrix.
    pub fn allocations(&self) -> &Matrix<F> {
        match self {
            Solution::Northwest(sol) | Solution::MinimumCost(sol) => &sol.allocations,
            Solution::Vogel(sol) => &sol.allocations,
            Solution::Hungarian(a) | Solution::HungarianMaximize(a) => &a.allocations,
        }
    }
}

/// Solver front end.
#[derive(Clone, Default, Debug)]
pub struct Solver {
    /// Settings of the Hungarian method.
    pub hungarian: Hungarian,
}

impl Solver {
    pub fn new() -> Self {
        Solver::default()
    }

    /// Validate the request and solve it with the requested method.
    pub fn solve<F>(&self, request: &Request<F>) -> Result<Solution<F>>
    where
        F: Value,
    {
        let costs = Matrix::from_rows(&request.costs)?;
        if let Some((nrows, ncols)) = request.dimensions {
            costs.check_dimensions(nrows, ncols)?;
        }
        debug!(
            "Solve {}x{} problem with method {}",
            costs.num_rows(),
            costs.num_cols(),
            request.method
        );

        if request.method.is_assignment() {
            return Ok(match request.method {
                Method::HungarianMaximize => Solution::HungarianMaximize(self.hungarian.maximize(&costs)?),
                _ => Solution::Hungarian(self.hungarian.minimize(&costs)?),
            });
        }

        let problem = Problem::new(request.supplies.clone(), request.demands.clone(), costs)?;
        Ok(match request.method {
            Method::Northwest => Solution::Northwest(northwest_corner(&problem)),
            Method::MinimumCost => Solution::MinimumCost(minimum_cost(&problem)),
            _ => Solution::Vogel(vogel(&problem)),
        })
    }
}

/// Solve a request with default settings.
pub fn solve<F>(request: &Request<F>) -> Result<Solution<F>>
where
    F: Value,
{
    Solver::default().solve(request)
}
