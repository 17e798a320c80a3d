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

//! The Hungarian method for the assignment problem.
//!
//! A rectangular cost matrix is padded to a square matrix with zero
//! costs. After subtracting the row and column minima the algorithm
//! repeatedly looks for a complete assignment on the zero entries. If
//! there is none, the zeros are covered by lines and the smallest
//! uncovered value is moved to the doubly covered entries, creating
//! new zeros.
//!
//! The zeros are covered greedily (line with most uncovered zeros
//! first), which does not always give a minimum cover. Therefore, if
//! the cover has at least `n` lines, an exhaustive search for a
//! complete assignment is run. If this fails too, the greedy cover is
//! replaced by a minimum cover (König's theorem) so that the
//! adjustment can always proceed.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::num::Value;
use crate::problem::check_costs;

use log::{debug, trace, warn};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A step of the Hungarian method.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum HungarianStep<F> {
    /// The minimum of each row has been subtracted from the row.
    RowReduction {
        minima: Vec<F>,
        before: Matrix<F>,
        after: Matrix<F>,
    },
    /// The minimum of each column has been subtracted from the column.
    ColumnReduction {
        minima: Vec<F>,
        before: Matrix<F>,
        after: Matrix<F>,
    },
    /// The zeros have been covered by lines.
    Cover {
        iteration: usize,
        matrix: Matrix<F>,
        /// The (incomplete) greedy assignment found before covering.
        assignment: Vec<(usize, usize)>,
        rows: Vec<usize>,
        cols: Vec<usize>,
        num_lines: usize,
        required: usize,
        /// `true` if this is a minimum cover replacing a greedy one.
        exact: bool,
    },
    /// The smallest uncovered value has been subtracted from all
    /// uncovered entries and added to all doubly covered entries.
    Adjust {
        iteration: usize,
        value: F,
        rows: Vec<usize>,
        cols: Vec<usize>,
        before: Matrix<F>,
        after: Matrix<F>,
    },
    /// A complete assignment on zero entries has been found.
    Optimal {
        matrix: Matrix<F>,
        assignment: Vec<(usize, usize)>,
        /// `true` if the assignment was found by exhaustive search.
        exhaustive: bool,
    },
}

/// The cost transformation of the maximization variant.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Conversion<F> {
    /// The largest (padded) cost, every cost `c` is replaced by
    /// `max_value - c`.
    pub max_value: F,
    /// The transformed square matrix.
    pub converted_costs: Matrix<F>,
}

/// The result of the Hungarian method.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Assignment<F> {
    /// The assigned pairs within the original dimensions, sorted by row.
    pub assignment: Vec<(usize, usize)>,
    /// The complete assignment of the padded square matrix.
    pub raw_assignment: Vec<(usize, usize)>,
    /// `1` at assigned cells, `0` elsewhere (original dimensions).
    pub allocations: Matrix<F>,
    /// `true` at assigned cells (original dimensions).
    pub mask: Matrix<bool>,
    /// The sum of the original costs of the assigned cells.
    pub total_cost: F,
    pub steps: Vec<HungarianStep<F>>,
    pub original_costs: Matrix<F>,
    pub padded_costs: Matrix<F>,
    /// The final reduced matrix.
    pub reduced_matrix: Matrix<F>,
    /// The cost transformation, only for maximization problems.
    pub conversion: Option<Conversion<F>>,
}

/// The Hungarian method.
///
/// The public fields configure the search budgets.
#[derive(Clone, Debug, Default)]
pub struct Hungarian {
    /// The maximal number of cover/adjust rounds.
    ///
    /// If `None` (the default) this is `3 * n` for an `n x n` matrix.
    pub max_rounds: Option<usize>,
    /// The maximal number of nodes of the exhaustive assignment search.
    ///
    /// The search is exponential in the worst case. If `None` (the
    /// default) it is unlimited.
    pub backtrack_limit: Option<usize>,
}

impl Hungarian {
    pub fn new() -> Self {
        Hungarian::default()
    }

    /// Solve the assignment problem minimizing the total cost.
    pub fn minimize<F>(&self, costs: &Matrix<F>) -> Result<Assignment<F>>
    where
        F: Value,
    {
        check_costs(costs)?;
        let padded = pad(costs);
        debug!(
            "Hungarian: minimize {}x{} problem (padded to {})",
            costs.num_rows(),
            costs.num_cols(),
            padded.num_rows()
        );

        let (raw, reduced, steps) = self.run(padded.clone())?;
        Ok(finish(costs, padded, raw, reduced, steps, None))
    }

    /// Solve the assignment problem maximizing the total cost.
    ///
    /// Every cost `c` is replaced by `max - c` where `max` is the
    /// largest cost, then the minimization problem is solved. The
    /// reported total is the sum of the original costs.
    pub fn maximize<F>(&self, costs: &Matrix<F>) -> Result<Assignment<F>>
    where
        F: Value,
    {
        check_costs(costs)?;
        let padded = pad(costs);
        let max_value = padded
            .cells()
            .fold(F::zero(), |acc, (_, _, c)| if c > acc { c } else { acc });
        let converted = padded.map(|c| max_value - c);
        debug!(
            "Hungarian: maximize {}x{} problem (padded to {}, max value {:?})",
            costs.num_rows(),
            costs.num_cols(),
            padded.num_rows(),
            max_value
        );

        let (raw, reduced, steps) = self.run(converted.clone())?;
        Ok(finish(
            costs,
            padded,
            raw,
            reduced,
            steps,
            Some(Conversion {
                max_value,
                converted_costs: converted,
            }),
        ))
    }

    /// Run the algorithm on a square matrix.
    ///
    /// Returns the complete assignment, the final reduced matrix and
    /// the steps.
    #[allow(clippy::type_complexity)]
    fn run<F>(&self, mut matrix: Matrix<F>) -> Result<(Vec<(usize, usize)>, Matrix<F>, Vec<HungarianStep<F>>)>
    where
        F: Value,
    {
        let n = matrix.num_rows();
        let mut steps = Vec::new();

        // subtract row minima
        let before = matrix.clone();
        let minima: Vec<F> = (0..n).map(|i| minimum(matrix.row(i).iter().cloned())).collect();
        for (i, &rmin) in minima.iter().enumerate() {
            for x in matrix.row_mut(i) {
                *x -= rmin;
            }
        }
        steps.push(HungarianStep::RowReduction {
            minima,
            before,
            after: matrix.clone(),
        });

        // subtract column minima
        let before = matrix.clone();
        let minima: Vec<F> = (0..n).map(|j| minimum(matrix.column(j))).collect();
        for i in 0..n {
            for (j, &cmin) in minima.iter().enumerate() {
                matrix[(i, j)] -= cmin;
            }
        }
        steps.push(HungarianStep::ColumnReduction {
            minima,
            before,
            after: matrix.clone(),
        });

        let max_rounds = self.max_rounds.unwrap_or(3 * n);
        let mut result = None;

        for iteration in 1..=max_rounds {
            let assignment = greedy_assignment(&matrix);
            if assignment.len() == n {
                steps.push(HungarianStep::Optimal {
                    matrix: matrix.clone(),
                    assignment: assignment.clone(),
                    exhaustive: false,
                });
                result = Some(assignment);
                break;
            }

            let (mut rows, mut cols) = cover_zeros(&matrix);
            trace!(
                "Hungarian round {}: {} assigned, cover rows {:?} cols {:?}",
                iteration,
                assignment.len(),
                rows,
                cols
            );
            steps.push(HungarianStep::Cover {
                iteration,
                matrix: matrix.clone(),
                assignment: assignment.clone(),
                num_lines: rows.len() + cols.len(),
                rows: rows.clone(),
                cols: cols.clone(),
                required: n,
                exact: false,
            });

            if rows.len() + cols.len() >= n {
                match self.backtrack(&matrix) {
                    Ok(full) => {
                        steps.push(HungarianStep::Optimal {
                            matrix: matrix.clone(),
                            assignment: full.clone(),
                            exhaustive: true,
                        });
                        result = Some(full);
                        break;
                    }
                    Err(_) => {
                        // The greedy cover was too large.
                        let (r, c) = minimum_cover(&matrix);
                        rows = r;
                        cols = c;
                        trace!("Hungarian round {}: minimum cover rows {:?} cols {:?}", iteration, rows, cols);
                        steps.push(HungarianStep::Cover {
                            iteration,
                            matrix: matrix.clone(),
                            assignment,
                            num_lines: rows.len() + cols.len(),
                            rows: rows.clone(),
                            cols: cols.clone(),
                            required: n,
                            exact: true,
                        });
                    }
                }
            }

            let value = match min_uncovered(&matrix, &rows, &cols) {
                Some(value) if !value.is_zero() => value,
                _ => break,
            };
            let before = matrix.clone();
            adjust(&mut matrix, &rows, &cols, value);
            steps.push(HungarianStep::Adjust {
                iteration,
                value,
                rows,
                cols,
                before,
                after: matrix.clone(),
            });
        }

        let assignment = match result {
            Some(assignment) => assignment,
            None => {
                warn!("Hungarian: no assignment after {} rounds, running exhaustive search", max_rounds);
                match self.backtrack(&matrix) {
                    Ok(full) => {
                        steps.push(HungarianStep::Optimal {
                            matrix: matrix.clone(),
                            assignment: full.clone(),
                            exhaustive: true,
                        });
                        full
                    }
                    Err(partial) => {
                        return Err(Error::IncompleteAssignment {
                            found: partial.len(),
                            required: n,
                            partial,
                        })
                    }
                }
            }
        };

        Ok((assignment, matrix, steps))
    }

    /// Search a complete assignment on the zero entries.
    ///
    /// Returns the best partial assignment if there is none (or the
    /// node budget is exhausted).
    fn backtrack<F>(&self, matrix: &Matrix<F>) -> std::result::Result<Vec<(usize, usize)>, Vec<(usize, usize)>>
    where
        F: Value,
    {
        let n = matrix.num_rows();
        let mut search = Backtrack {
            matrix,
            n,
            used: vec![false; n],
            current: Vec::with_capacity(n),
            best: Vec::new(),
            limit: self.backtrack_limit,
            nodes: 0,
            exhausted: false,
        };
        search.search(0);

        if search.exhausted {
            warn!("Hungarian: exhaustive search stopped after {} nodes", search.nodes);
        }

        if search.best.len() == n {
            Ok(search.best)
        } else {
            Err(search.best)
        }
    }
}

/// Solve an assignment problem (minimization) with default settings.
///
/// # Example
///
/// ```
/// use rs_transport::Matrix;
/// use rs_transport::assignment::hungarian;
///
/// let costs = Matrix::from_rows(&[vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]]).unwrap();
/// let sol = hungarian(&costs).unwrap();
/// assert_eq!(sol.assignment, vec![(0, 1), (1, 0), (2, 2)]);
/// assert_eq!(sol.total_cost, 5);
/// ```
pub fn hungarian<F>(costs: &Matrix<F>) -> Result<Assignment<F>>
where
    F: Value,
{
    Hungarian::default().minimize(costs)
}

/// Solve an assignment problem (maximization) with default settings.
pub fn hungarian_maximize<F>(costs: &Matrix<F>) -> Result<Assignment<F>>
where
    F: Value,
{
    Hungarian::default().maximize(costs)
}

fn pad<F>(costs: &Matrix<F>) -> Matrix<F>
where
    F: Value,
{
    let n = costs.num_rows().max(costs.num_cols());
    costs.padded(n, n, F::zero())
}

fn finish<F>(
    original: &Matrix<F>,
    padded: Matrix<F>,
    mut raw: Vec<(usize, usize)>,
    reduced: Matrix<F>,
    steps: Vec<HungarianStep<F>>,
    conversion: Option<Conversion<F>>,
) -> Assignment<F>
where
    F: Value,
{
    raw.sort_unstable();
    let (nrows, ncols) = original.shape();
    let assignment: Vec<_> = raw.iter().cloned().filter(|&(i, j)| i < nrows && j < ncols).collect();

    let mut allocations = Matrix::new(nrows, ncols, F::zero());
    let mut mask = Matrix::new(nrows, ncols, false);
    let mut total_cost = F::zero();
    for &(i, j) in &assignment {
        allocations[(i, j)] = F::one();
        mask[(i, j)] = true;
        total_cost += original[(i, j)];
    }

    debug!("Hungarian: assignment {:?}, total cost {:?}", assignment, total_cost);

    Assignment {
        assignment,
        raw_assignment: raw,
        allocations,
        mask,
        total_cost,
        steps,
        original_costs: original.clone(),
        padded_costs: padded,
        reduced_matrix: reduced,
        conversion,
    }
}

fn minimum<F, I>(values: I) -> F
where
    F: Value,
    I: Iterator<Item = F>,
{
    values
        .fold(None, |acc: Option<F>, x| match acc {
            Some(m) if m <= x => Some(m),
            _ => Some(x),
        })
        .unwrap_or_else(F::zero)
}

/// Compute a greedy assignment on the zero entries.
///
/// First every row with exactly one available zero is assigned, then
/// each remaining row takes its first available zero.
fn greedy_assignment<F>(matrix: &Matrix<F>) -> Vec<(usize, usize)>
where
    F: Value,
{
    let n = matrix.num_rows();
    let mut assignment = Vec::with_capacity(n);
    let mut row_used = vec![false; n];
    let mut col_used = vec![false; n];

    for i in 0..n {
        let mut zeros = (0..n).filter(|&j| !col_used[j] && matrix[(i, j)].is_zero());
        if let (Some(j), None) = (zeros.next(), zeros.next()) {
            assignment.push((i, j));
            row_used[i] = true;
            col_used[j] = true;
        }
    }

    for i in 0..n {
        if row_used[i] {
            continue;
        }
        if let Some(j) = (0..n).find(|&j| !col_used[j] && matrix[(i, j)].is_zero()) {
            assignment.push((i, j));
            row_used[i] = true;
            col_used[j] = true;
        }
    }

    assignment
}

/// Cover all zeros greedily by lines.
///
/// In each step the uncovered row or column with the most uncovered
/// zeros is covered, rows win ties. Returns the sorted covered rows
/// and columns.
fn cover_zeros<F>(matrix: &Matrix<F>) -> (Vec<usize>, Vec<usize>)
where
    F: Value,
{
    let n = matrix.num_rows();
    let mut covered_rows = vec![false; n];
    let mut covered_cols = vec![false; n];

    let uncovered_zero =
        |i: usize, j: usize, rows: &[bool], cols: &[bool]| !rows[i] && !cols[j] && matrix[(i, j)].is_zero();

    loop {
        let best_row = (0..n)
            .filter(|&i| !covered_rows[i])
            .map(|i| {
                let cnt = (0..n).filter(|&j| uncovered_zero(i, j, &covered_rows, &covered_cols)).count();
                (i, cnt)
            })
            .fold(None, |best: Option<(usize, usize)>, (i, cnt)| match best {
                Some((_, b)) if b >= cnt => best,
                _ => Some((i, cnt)),
            });
        let best_col = (0..n)
            .filter(|&j| !covered_cols[j])
            .map(|j| {
                let cnt = (0..n).filter(|&i| uncovered_zero(i, j, &covered_rows, &covered_cols)).count();
                (j, cnt)
            })
            .fold(None, |best: Option<(usize, usize)>, (j, cnt)| match best {
                Some((_, b)) if b >= cnt => best,
                _ => Some((j, cnt)),
            });

        let (row, row_cnt) = best_row.unwrap_or((0, 0));
        let (col, col_cnt) = best_col.unwrap_or((0, 0));
        if row_cnt > 0 && row_cnt >= col_cnt {
            covered_rows[row] = true;
        } else if col_cnt > 0 {
            covered_cols[col] = true;
        } else {
            break;
        }
    }

    (indices(&covered_rows), indices(&covered_cols))
}

/// Compute a minimum cover of the zeros.
///
/// A maximum matching on the zeros is computed with augmenting paths.
/// Starting from the unmatched rows all rows and columns reachable by
/// alternating paths are marked. The cover consists of the unmarked
/// rows and the marked columns, its size equals the matching size.
fn minimum_cover<F>(matrix: &Matrix<F>) -> (Vec<usize>, Vec<usize>)
where
    F: Value,
{
    let n = matrix.num_rows();

    // matched row of each column
    let mut col_match: Vec<Option<usize>> = vec![None; n];
    for i in 0..n {
        let mut seen = vec![false; n];
        augment(matrix, i, &mut seen, &mut col_match);
    }

    let mut row_matched = vec![false; n];
    for &i in col_match.iter().flatten() {
        row_matched[i] = true;
    }

    let mut marked_rows = vec![false; n];
    let mut marked_cols = vec![false; n];
    let mut stack: Vec<usize> = (0..n).filter(|&i| !row_matched[i]).collect();
    for &i in &stack {
        marked_rows[i] = true;
    }

    while let Some(i) = stack.pop() {
        for j in 0..n {
            if marked_cols[j] || !matrix[(i, j)].is_zero() {
                continue;
            }
            marked_cols[j] = true;
            if let Some(k) = col_match[j] {
                if !marked_rows[k] {
                    marked_rows[k] = true;
                    stack.push(k);
                }
            }
        }
    }

    let rows = (0..n).filter(|&i| !marked_rows[i]).collect();
    (rows, indices(&marked_cols))
}

/// Try to find an augmenting path on zeros starting at row `i`.
fn augment<F>(matrix: &Matrix<F>, i: usize, seen: &mut [bool], col_match: &mut [Option<usize>]) -> bool
where
    F: Value,
{
    for j in 0..matrix.num_cols() {
        if seen[j] || !matrix[(i, j)].is_zero() {
            continue;
        }
        seen[j] = true;
        let free = match col_match[j] {
            None => true,
            Some(k) => augment(matrix, k, seen, col_match),
        };
        if free {
            col_match[j] = Some(i);
            return true;
        }
    }
    false
}

fn indices(flags: &[bool]) -> Vec<usize> {
    flags.iter().enumerate().filter(|&(_, &f)| f).map(|(k, _)| k).collect()
}

/// Return the smallest entry not covered by any line.
fn min_uncovered<F>(matrix: &Matrix<F>, rows: &[usize], cols: &[usize]) -> Option<F>
where
    F: Value,
{
    matrix
        .cells()
        .filter(|&(i, j, _)| !rows.contains(&i) && !cols.contains(&j))
        .fold(None, |acc: Option<F>, (_, _, x)| match acc {
            Some(m) if m <= x => Some(m),
            _ => Some(x),
        })
}

fn adjust<F>(matrix: &mut Matrix<F>, rows: &[usize], cols: &[usize], value: F)
where
    F: Value,
{
    let (nrows, ncols) = matrix.shape();
    for i in 0..nrows {
        let row_covered = rows.contains(&i);
        for j in 0..ncols {
            let col_covered = cols.contains(&j);
            if !row_covered && !col_covered {
                matrix[(i, j)] -= value;
            } else if row_covered && col_covered {
                matrix[(i, j)] += value;
            }
        }
    }
}

/// Exhaustive search for an assignment on zero entries.
struct Backtrack<'a, F> {
    matrix: &'a Matrix<F>,
    n: usize,
    used: Vec<bool>,
    current: Vec<(usize, usize)>,
    best: Vec<(usize, usize)>,
    limit: Option<usize>,
    nodes: usize,
    exhausted: bool,
}

impl<'a, F> Backtrack<'a, F>
where
    F: Value,
{
    fn search(&mut self, row: usize) {
        if self.exhausted || self.best.len() == self.n {
            return;
        }

        self.nodes += 1;
        if self.limit.map(|limit| self.nodes > limit).unwrap_or(false) {
            self.exhausted = true;
            return;
        }

        if row == self.n {
            if self.current.len() > self.best.len() {
                self.best = self.current.clone();
            }
            return;
        }

        // even assigning all remaining rows would not improve
        if self.current.len() + (self.n - row) <= self.best.len() {
            return;
        }

        for col in 0..self.n {
            if self.used[col] || !self.matrix[(row, col)].is_zero() {
                continue;
            }
            self.used[col] = true;
            self.current.push((row, col));
            self.search(row + 1);
            self.current.pop();
            self.used[col] = false;
            if self.best.len() == self.n {
                return;
            }
        }

        // leave this row unassigned
        self.search(row + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::{cover_zeros, greedy_assignment, hungarian, hungarian_maximize, minimum_cover, Hungarian, HungarianStep};
    use crate::assignment::validate_assignment;
    use crate::error::Error;
    use crate::matrix::Matrix;

    fn matrix(rows: &[Vec<i32>]) -> Matrix<i32> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_diagonal() {
        let sol = hungarian(&matrix(&[vec![1, 2], vec![2, 1]])).unwrap();
        assert_eq!(sol.assignment, vec![(0, 0), (1, 1)]);
        assert_eq!(sol.total_cost, 2);
        assert_eq!(sol.steps.len(), 3);
        match &sol.steps[0] {
            HungarianStep::RowReduction { minima, after, .. } => {
                assert_eq!(minima, &vec![1, 1]);
                assert_eq!(after.to_rows(), vec![vec![0, 1], vec![1, 0]]);
            }
            step => panic!("Unexpected step {:?}", step),
        }
    }

    #[test]
    fn test_adjustment() {
        let sol = hungarian(&matrix(&[vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]])).unwrap();

        match &sol.steps[1] {
            HungarianStep::ColumnReduction { minima, after, .. } => {
                assert_eq!(minima, &vec![1, 0, 0]);
                assert_eq!(after.to_rows(), vec![vec![2, 0, 2], vec![1, 0, 5], vec![0, 0, 0]]);
            }
            step => panic!("Unexpected step {:?}", step),
        }
        match &sol.steps[2] {
            HungarianStep::Cover {
                assignment,
                rows,
                cols,
                num_lines,
                exact,
                ..
            } => {
                assert_eq!(assignment, &vec![(0, 1), (2, 0)]);
                assert_eq!(rows, &vec![2]);
                assert_eq!(cols, &vec![1]);
                assert_eq!(*num_lines, 2);
                assert!(!exact);
            }
            step => panic!("Unexpected step {:?}", step),
        }
        match &sol.steps[3] {
            HungarianStep::Adjust { value, after, .. } => {
                assert_eq!(*value, 1);
                assert_eq!(after.to_rows(), vec![vec![1, 0, 1], vec![0, 0, 4], vec![0, 1, 0]]);
            }
            step => panic!("Unexpected step {:?}", step),
        }
        assert!(matches!(sol.steps[4], HungarianStep::Optimal { exhaustive: false, .. }));

        assert_eq!(sol.assignment, vec![(0, 1), (1, 0), (2, 2)]);
        assert_eq!(sol.total_cost, 5);
        assert!(validate_assignment(&sol.raw_assignment, 3));
        assert_eq!(sol.reduced_matrix.to_rows(), vec![vec![1, 0, 1], vec![0, 0, 4], vec![0, 1, 0]]);
    }

    #[test]
    fn test_rectangular() {
        let sol = hungarian(&matrix(&[vec![3, 1, 2], vec![2, 4, 6]])).unwrap();
        assert_eq!(sol.padded_costs.shape(), (3, 3));
        assert_eq!(sol.raw_assignment.len(), 3);
        assert_eq!(sol.assignment, vec![(0, 1), (1, 0)]);
        assert_eq!(sol.total_cost, 3);
        assert_eq!(sol.allocations.to_rows(), vec![vec![0, 1, 0], vec![1, 0, 0]]);
        assert_eq!(sol.mask.to_rows(), vec![vec![false, true, false], vec![true, false, false]]);
    }

    #[test]
    fn test_maximize() {
        let sol = hungarian_maximize(&matrix(&[vec![1, 2], vec![2, 1]])).unwrap();
        assert_eq!(sol.assignment, vec![(0, 1), (1, 0)]);
        assert_eq!(sol.total_cost, 4);
        let conversion = sol.conversion.unwrap();
        assert_eq!(conversion.max_value, 2);
        assert_eq!(conversion.converted_costs.to_rows(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_invalid_costs() {
        assert_eq!(
            hungarian(&matrix(&[vec![1, -2], vec![2, 1]])).unwrap_err(),
            Error::InvalidValue(crate::error::Location::Cost(0, 1))
        );
    }

    #[test]
    fn test_greedy_assignment() {
        let m = matrix(&[vec![0, 0, 1], vec![0, 1, 1], vec![1, 1, 0]]);
        // row 1 and row 2 have a single zero, row 0 takes what is left
        assert_eq!(greedy_assignment(&m), vec![(1, 0), (2, 2), (0, 1)]);
    }

    #[test]
    fn test_cover() {
        let m = matrix(&[vec![0, 0, 0], vec![0, 1, 1], vec![0, 1, 1]]);
        assert_eq!(cover_zeros(&m), (vec![0], vec![0]));
        assert_eq!(minimum_cover(&m), (vec![0], vec![0]));

        // There is a perfect matching, so every cover has four lines.
        let m = matrix(&[
            vec![0, 1, 1, 0],
            vec![0, 0, 0, 1],
            vec![1, 0, 1, 1],
            vec![1, 1, 0, 1],
        ]);
        let (rows, cols) = cover_zeros(&m);
        assert_eq!(rows.len() + cols.len(), 4);
        let (rows, cols) = minimum_cover(&m);
        assert_eq!(rows.len() + cols.len(), 4);
    }

    #[test]
    fn test_backtrack() {
        let m = matrix(&[vec![0, 0], vec![0, 1]]);
        assert_eq!(Hungarian::new().backtrack(&m), Ok(vec![(0, 1), (1, 0)]));

        let m = matrix(&[vec![0, 1, 1], vec![0, 1, 1], vec![1, 0, 0]]);
        assert_eq!(Hungarian::new().backtrack(&m).map_err(|p| p.len()), Err(2));

        let limited = Hungarian {
            backtrack_limit: Some(1),
            ..Hungarian::default()
        };
        assert!(limited.backtrack(&matrix(&[vec![0, 1], vec![1, 0]])).is_err());
    }

    #[test]
    fn test_fallback() {
        let costs = matrix(&[vec![1, 2], vec![2, 1]]);

        let solver = Hungarian {
            max_rounds: Some(0),
            ..Hungarian::default()
        };
        let sol = solver.minimize(&costs).unwrap();
        assert_eq!(sol.assignment, vec![(0, 0), (1, 1)]);
        assert!(matches!(sol.steps.last(), Some(HungarianStep::Optimal { exhaustive: true, .. })));

        let solver = Hungarian {
            max_rounds: Some(0),
            backtrack_limit: Some(1),
        };
        match solver.minimize(&costs) {
            Err(Error::IncompleteAssignment { found, required, .. }) => {
                assert_eq!(found, 0);
                assert_eq!(required, 2);
            }
            res => panic!("Unexpected result {:?}", res),
        }
    }

    #[test]
    fn test_exhaustive_in_round() {
        // The greedy cover uses all four rows, but a complete
        // assignment on the zeros exists.
        let sol = hungarian(&matrix(&[vec![3, 1, 1, 3], vec![2, 2, 1, 0], vec![3, 3, 1, 1], vec![3, 1, 2, 0]])).unwrap();

        assert_eq!(sol.steps.len(), 4);
        match &sol.steps[2] {
            HungarianStep::Cover {
                iteration,
                rows,
                cols,
                num_lines,
                exact,
                ..
            } => {
                assert_eq!(*iteration, 1);
                assert_eq!(rows, &vec![0, 1, 2, 3]);
                assert!(cols.is_empty());
                assert_eq!(*num_lines, 4);
                assert!(!exact);
            }
            step => panic!("Unexpected step {:?}", step),
        }
        match &sol.steps[3] {
            HungarianStep::Optimal {
                assignment,
                exhaustive,
                ..
            } => {
                assert!(*exhaustive);
                assert_eq!(assignment, &vec![(0, 1), (1, 0), (2, 2), (3, 3)]);
            }
            step => panic!("Unexpected step {:?}", step),
        }

        assert_eq!(sol.assignment, vec![(0, 1), (1, 0), (2, 2), (3, 3)]);
        assert_eq!(sol.total_cost, 4);
    }

    #[test]
    fn test_exact_cover() {
        // The greedy cover has four lines but only three zeros can be
        // assigned, so it is replaced by a minimum cover.
        let sol = hungarian(&matrix(&[vec![2, 1, 1, 1], vec![2, 0, 1, 3], vec![0, 1, 1, 1], vec![1, 1, 3, 2]])).unwrap();

        assert_eq!(sol.steps.len(), 6);
        match &sol.steps[2] {
            HungarianStep::Cover {
                num_lines,
                assignment,
                exact,
                ..
            } => {
                assert_eq!(*num_lines, 4);
                assert_eq!(assignment.len(), 3);
                assert!(!exact);
            }
            step => panic!("Unexpected step {:?}", step),
        }
        match &sol.steps[3] {
            HungarianStep::Cover {
                iteration,
                rows,
                cols,
                num_lines,
                required,
                exact,
                ..
            } => {
                assert_eq!(*iteration, 1);
                assert_eq!(rows, &vec![0]);
                assert_eq!(cols, &vec![0, 1]);
                assert_eq!(*num_lines, 3);
                assert_eq!(*required, 4);
                assert!(exact);
            }
            step => panic!("Unexpected step {:?}", step),
        }
        match &sol.steps[4] {
            HungarianStep::Adjust {
                value, rows, cols, after, ..
            } => {
                assert_eq!(*value, 1);
                assert_eq!(rows, &vec![0]);
                assert_eq!(cols, &vec![0, 1]);
                assert_eq!(
                    after.to_rows(),
                    vec![vec![2, 1, 0, 0], vec![2, 0, 0, 2], vec![0, 1, 0, 0], vec![0, 0, 1, 0]]
                );
            }
            step => panic!("Unexpected step {:?}", step),
        }
        assert!(matches!(sol.steps[5], HungarianStep::Optimal { exhaustive: false, .. }));

        assert_eq!(sol.assignment, vec![(0, 2), (1, 1), (2, 0), (3, 3)]);
        assert_eq!(sol.total_cost, 3);
    }

    #[test]
    fn test_float() {
        let costs = Matrix::from_rows(&[vec![2.5, 4.0, 1.0], vec![3.0, 0.5, 2.0], vec![1.5, 3.5, 4.5]]).unwrap();
        let sol = hungarian(&costs).unwrap();
        assert_eq!(sol.assignment, vec![(0, 2), (1, 1), (2, 0)]);
        assert!((sol.total_cost - 3.0f64).abs() < 1e-12);
    }
}
