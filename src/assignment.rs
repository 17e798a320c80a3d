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

//! Assignment algorithms.

pub mod hungarian;
pub use self::hungarian::{hungarian, hungarian_maximize, Assignment, Conversion, Hungarian, HungarianStep};

/// Check that `pairs` is a complete assignment of size `n`.
///
/// Every row and every column in `0..n` must appear exactly once.
///
/// # Example
///
/// ```
/// use rs_transport::assignment::validate_assignment;
///
/// assert!(validate_assignment(&[(0, 1), (1, 0)], 2));
/// assert!(!validate_assignment(&[(0, 1), (1, 1)], 2));
/// assert!(!validate_assignment(&[(0, 0)], 2));
/// ```
pub fn validate_assignment(pairs: &[(usize, usize)], n: usize) -> bool {
    if pairs.len() != n {
        return false;
    }

    let mut rows = vec![false; n];
    let mut cols = vec![false; n];
    for &(i, j) in pairs {
        if i >= n || j >= n || rows[i] || cols[j] {
            return false;
        }
        rows[i] = true;
        cols[j] = true;
    }

    true
}
