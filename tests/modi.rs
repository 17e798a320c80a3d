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

use std::error::Error;

use rs_transport::initial::{minimum_cost, northwest_corner};
use rs_transport::modi::{modi, ModiStep};
use rs_transport::{Matrix, Problem};

/// Check the optimality conditions reported by a step.
fn check_step(step: &ModiStep<i64>, allocations: &Matrix<i64>) {
    let min_delta = step.deltas.cells().map(|(_, _, d)| d).min().unwrap_or(0);
    if step.is_optimal {
        assert!(step.entering.is_none());
        for (i, j, d) in step.deltas.cells() {
            assert!(allocations[(i, j)] > 0 || d >= 0, "delta ({}, {}) = {}", i, j, d);
        }
    } else {
        let (i, j) = step.entering.expect("entering cell");
        assert_eq!(allocations[(i, j)], 0);
        assert_eq!(step.deltas[(i, j)], min_delta);
        assert_eq!(step.most_negative, min_delta);
    }
    // basic cells have reduced cost zero
    for (i, j, x) in allocations.cells() {
        if x > 0 {
            assert_eq!(step.deltas[(i, j)], 0);
        }
    }
}

/// Pivot until optimal, returns the final cost and the number of pivots.
fn converge(problem: &Problem<i64>, mut allocations: Matrix<i64>) -> (i64, usize) {
    let costs = problem.costs();
    let (m, n) = costs.shape();
    let mut pivots = 0;
    loop {
        let step = modi(costs, &allocations).expect("valid allocation");
        check_step(&step, &allocations);
        assert!(!step.degenerate);
        if step.is_optimal {
            return (step.new_total_cost, pivots);
        }
        assert!(step.improved);
        let current: i64 = allocations.cells().map(|(i, j, x)| x * costs[(i, j)]).sum();
        assert!(step.new_total_cost < current);

        // the row and column sums are preserved
        for i in 0..m {
            assert_eq!(
                step.new_allocations.row(i).iter().sum::<i64>(),
                allocations.row(i).iter().sum::<i64>()
            );
        }
        for j in 0..n {
            assert_eq!(
                step.new_allocations.column(j).sum::<i64>(),
                allocations.column(j).sum::<i64>()
            );
        }

        allocations = step.new_allocations;
        pivots += 1;
        assert!(pivots <= m + n - 1);
    }
}

#[test]
fn test_convergence() -> Result<(), Box<dyn Error>> {
    let instances = vec![
        (vec![30, 20], vec![10, 25, 15], vec![vec![8, 6, 10], vec![9, 12, 13]], 420),
        (
            vec![7, 9, 18],
            vec![5, 8, 7, 14],
            vec![vec![19, 30, 50, 10], vec![70, 30, 40, 60], vec![40, 8, 70, 20]],
            743,
        ),
    ];

    for (supplies, demands, costs, optimum) in instances {
        let problem = Problem::from_rows(supplies, demands, &costs)?;
        let (value, pivots) = converge(&problem, northwest_corner(&problem).allocations);
        assert_eq!(value, optimum);
        assert_eq!(pivots, 2);
        let (value, _) = converge(&problem, minimum_cost(&problem).allocations);
        assert_eq!(value, optimum);
    }

    Ok(())
}

#[test]
fn test_degenerate_basis() -> Result<(), Box<dyn Error>> {
    let costs = Matrix::from_rows(&[vec![1, 9], vec![9, 1]])?;
    let allocations = Matrix::from_rows(&[vec![10, 0], vec![0, 10]])?;
    let step = modi(&costs, &allocations)?;

    assert_eq!(step.u[0], 0);
    assert_eq!(step.v[0], 1);
    assert!(step.degenerate);
    assert!(step.deltas[(0, 1)] >= 0);
    assert!(step.deltas[(1, 0)] >= 0);
    assert!(step.is_optimal);
    assert!(!step.improved);
    assert_eq!(step.cycle, None);
    assert_eq!(step.new_total_cost, 20);

    Ok(())
}

#[test]
fn test_cycle_signs() -> Result<(), Box<dyn Error>> {
    let costs = Matrix::from_rows(&[vec![8, 6, 10], vec![9, 12, 13]])?;
    let allocations = Matrix::from_rows(&[vec![10, 20, 0], vec![0, 5, 15]])?;
    let step = modi(&costs, &allocations)?;

    let cycle = step.cycle.clone().ok_or("missing cycle")?;
    assert_eq!(cycle.len() % 2, 0);
    assert_eq!(cycle[0], step.entering.ok_or("missing entering cell")?);
    let theta = step.pivot.ok_or("missing pivot")?;
    for (k, &cell) in cycle.iter().enumerate() {
        // consecutive cells share a row or a column
        let next = cycle[(k + 1) % cycle.len()];
        assert!(cell.0 == next.0 || cell.1 == next.1);
        let diff = step.new_allocations[cell] - allocations[cell];
        assert_eq!(diff, if k % 2 == 0 { theta } else { -theta });
    }

    Ok(())
}
