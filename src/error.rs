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

//! Errors reported by the solvers.

use std::error;
use std::fmt;

/// The position of an invalid input value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Location {
    /// The supply of an origin.
    Supply(usize),
    /// The demand of a destination.
    Demand(usize),
    /// An entry of a cost matrix.
    Cost(usize, usize),
    /// An entry of an allocation matrix.
    Allocation(usize, usize),
}

impl fmt::Display for Location {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        match self {
            Location::Supply(i) => write!(fmt, "supply {}", i),
            Location::Demand(j) => write!(fmt, "demand {}", j),
            Location::Cost(i, j) => write!(fmt, "cost ({}, {})", i, j),
            Location::Allocation(i, j) => write!(fmt, "allocation ({}, {})", i, j),
        }
    }
}

/// Error when validating or solving a problem.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The matrix has no rows or no columns.
    EmptyMatrix,
    /// A row of the matrix has a different length than the first one.
    RaggedRow { row: usize, len: usize, expected: usize },
    /// The declared dimensions `(rows, cols)` do not match the matrix.
    DimensionMismatch {
        declared: (usize, usize),
        actual: (usize, usize),
    },
    /// The supply or demand vector does not fit the cost matrix.
    LengthMismatch {
        what: &'static str,
        len: usize,
        expected: usize,
    },
    /// Two matrices that must have the same shape differ.
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// A value is negative or not a number.
    InvalidValue(Location),
    /// The name of a solution method is not known.
    UnknownMethod(String),
    /// The assignment search could not complete a perfect assignment.
    ///
    /// This cannot happen on valid reduced matrices and indicates a
    /// defect (or an exhausted search budget). The best partial
    /// assignment found is included for inspection.
    IncompleteAssignment {
        found: usize,
        required: usize,
        partial: Vec<(usize, usize)>,
    },
}

impl Error {
    /// Return `true` if this error has been raised by input validation.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::IncompleteAssignment { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            EmptyMatrix => write!(fmt, "Validation error: empty matrix"),
            RaggedRow { row, len, expected } => write!(
                fmt,
                "Validation error: row {} has length {}, expected {}",
                row, len, expected
            ),
            DimensionMismatch { declared, actual } => write!(
                fmt,
                "Validation error: declared dimensions {}x{} do not match matrix of size {}x{}",
                declared.0, declared.1, actual.0, actual.1
            ),
            LengthMismatch { what, len, expected } => write!(
                fmt,
                "Validation error: {} has length {}, expected {}",
                what, len, expected
            ),
            ShapeMismatch { expected, actual } => write!(
                fmt,
                "Validation error: matrix of size {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            InvalidValue(loc) => write!(fmt, "Validation error: invalid value at {}", loc),
            UnknownMethod(name) => write!(fmt, "Validation error: unknown method '{}'", name),
            IncompleteAssignment { found, required, .. } => write!(
                fmt,
                "Incomplete assignment: found {} of {} pairs",
                found, required
            ),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
