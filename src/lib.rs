// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Classical algorithms for transportation and assignment problems.
//!
//! Every algorithm returns not only the final allocation but also the
//! complete sequence of decisions that led to it, so the solution can
//! be replayed and explained step by step.
//!
//! # Example
//!
//! ```
//! use rs_transport::{solve, Method, Request};
//!
//! let request = Request::new(
//!     vec![10, 10],
//!     vec![10, 10],
//!     vec![vec![1, 9], vec![9, 1]],
//!     Method::Vogel,
//! );
//! let solution = solve(&request).unwrap();
//! assert_eq!(solution.total_cost(), 20);
//! ```

mod num {
    pub use num_traits as traits;

    use std::fmt::Debug;

    /// The numeric type of supplies, demands, costs and allocations.
    ///
    /// This is implemented for all primitive integer and floating
    /// point types.
    pub trait Value: traits::NumAssign + Copy + PartialOrd + Debug {}

    impl<T> Value for T where T: traits::NumAssign + Copy + PartialOrd + Debug {}

    /// Return `true` if `x` is a valid non-negative number.
    ///
    /// This fails for negative numbers as well as for NaN.
    pub fn is_nonnegative<F: Value>(x: F) -> bool {
        x >= F::zero()
    }

    /// Return the smaller of two values (the first one on ties).
    pub fn min<F: Value>(a: F, b: F) -> F {
        if b < a {
            b
        } else {
            a
        }
    }
}

pub use self::num::Value;

// # Data structures

pub mod error;
pub use self::error::{Error, Location, Result};

pub mod matrix;
pub use self::matrix::Matrix;

pub mod problem;
pub use self::problem::Problem;

pub mod balance;
pub use self::balance::{balance, Balanced, Dummy};

// # Algorithms

pub mod assignment;
pub mod initial;
pub mod modi;

pub mod solver;
pub use self::solver::{solve, Method, Request, Solution, Solver};
