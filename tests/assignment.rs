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

use std::cmp::{max, min};
use std::error::Error;

use rs_transport::assignment::{hungarian, hungarian_maximize, validate_assignment, HungarianStep};
use rs_transport::Matrix;

fn instances() -> Vec<Vec<Vec<i64>>> {
    vec![
        vec![vec![1, 2], vec![2, 1]],
        vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]],
        vec![
            vec![82, 83, 69, 92],
            vec![77, 37, 49, 92],
            vec![11, 69, 5, 86],
            vec![8, 9, 98, 23],
        ],
        vec![vec![9, 2, 7, 8], vec![6, 4, 3, 7], vec![5, 8, 1, 8], vec![7, 6, 9, 4]],
        vec![vec![5, 5, 5], vec![5, 5, 5], vec![5, 5, 5]],
        vec![vec![10, 19, 8, 15], vec![10, 18, 7, 17], vec![13, 16, 9, 14]],
        vec![vec![3, 8], vec![5, 2], vec![4, 4]],
    ]
}

/// Return all permutations of `0..n`.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    if n == 0 {
        return vec![vec![]];
    }
    let mut perms = vec![];
    for p in permutations(n - 1) {
        for k in 0..n {
            let mut q = p.clone();
            q.insert(k, n - 1);
            perms.push(q);
        }
    }
    perms
}

/// Compute the best total cost over all assignments by enumeration.
fn brute_force(costs: &Matrix<i64>, maximize: bool) -> i64 {
    let (m, n) = costs.shape();
    let size = max(m, n);
    let values = permutations(size).into_iter().map(|p| {
        p.iter()
            .enumerate()
            .filter(|&(i, &j)| i < m && j < n)
            .map(|(i, &j)| costs[(i, j)])
            .sum::<i64>()
    });
    if maximize {
        values.max().unwrap_or(0)
    } else {
        values.min().unwrap_or(0)
    }
}

#[test]
fn test_hungarian() -> Result<(), Box<dyn Error>> {
    for rows in instances() {
        let costs = Matrix::from_rows(&rows)?;
        let (m, n) = costs.shape();
        let sol = hungarian(&costs)?;

        assert_eq!(sol.total_cost, brute_force(&costs, false), "costs {:?}", rows);
        assert!(validate_assignment(&sol.raw_assignment, max(m, n)));
        assert_eq!(sol.assignment.len(), min(m, n));
        assert_eq!(sol.padded_costs.shape(), (max(m, n), max(m, n)));

        let total: i64 = sol.allocations.cells().map(|(i, j, x)| x * costs[(i, j)]).sum();
        assert_eq!(total, sol.total_cost);
        for &(i, j) in &sol.assignment {
            assert!(sol.mask[(i, j)]);
            assert_eq!(sol.reduced_matrix[(i, j)], 0);
        }
        assert_eq!(sol.mask.cells().filter(|&(_, _, b)| b).count(), sol.assignment.len());

        assert!(matches!(sol.steps.first(), Some(HungarianStep::RowReduction { .. })));
        assert!(matches!(sol.steps.last(), Some(HungarianStep::Optimal { .. })));
    }
    Ok(())
}

#[test]
fn test_hungarian_maximize() -> Result<(), Box<dyn Error>> {
    for rows in instances() {
        let costs = Matrix::from_rows(&rows)?;
        let sol = hungarian_maximize(&costs)?;
        assert_eq!(sol.total_cost, brute_force(&costs, true), "costs {:?}", rows);

        let conversion = sol.conversion.as_ref().ok_or("missing conversion")?;
        let max_value = costs.cells().map(|(_, _, c)| c).max().unwrap_or(0);
        assert_eq!(conversion.max_value, max_value);
        for (i, j, c) in costs.cells() {
            assert_eq!(conversion.converted_costs[(i, j)], max_value - c);
        }
    }
    Ok(())
}

#[test]
fn test_two_by_two() -> Result<(), Box<dyn Error>> {
    let costs = Matrix::from_rows(&[vec![1, 2], vec![2, 1]])?;
    let sol = hungarian(&costs)?;
    assert_eq!(sol.assignment, vec![(0, 0), (1, 1)]);
    assert_eq!(sol.total_cost, 2);
    Ok(())
}
