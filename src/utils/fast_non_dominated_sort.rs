use crate::core::OError;

/// The preferred solution when two points are compared by Pareto dominance.
#[derive(Debug, PartialEq)]
pub enum PreferredSolution {
    /// The first point dominates the second one.
    First,
    /// The second point dominates the first one.
    Second,
    /// Neither point dominates the other one.
    MutuallyPreferred,
}

/// Compare two points by Pareto dominance when all objectives are minimised. A point `a`
/// dominates `b` when all its coordinates are smaller or equal than the coordinates of `b` and at
/// least one coordinate is strictly smaller.
///
/// # Arguments
///
/// * `a`: The first point.
/// * `b`: The second point. This must have the same size of `a`.
///
/// returns: `PreferredSolution`
pub fn dominance(a: &[f64], b: &[f64]) -> PreferredSolution {
    let mut a_better = false;
    let mut b_better = false;
    for (va, vb) in a.iter().zip(b) {
        if va < vb {
            a_better = true;
        } else if vb < va {
            b_better = true;
        }
        if a_better && b_better {
            return PreferredSolution::MutuallyPreferred;
        }
    }

    match (a_better, b_better) {
        (true, false) => PreferredSolution::First,
        (false, true) => PreferredSolution::Second,
        _ => PreferredSolution::MutuallyPreferred,
    }
}

/// Outputs of the non-dominated sort algorithm.
#[derive(Debug)]
pub struct NonDominatedSortResults {
    /// A vector containing sub-vectors. Each child vector represents a front (with the first being
    /// the primary non-dominated front with solutions of rank 1); each child vector contains
    /// the indexes of the points passed to [`fast_non_dominated_sort`] belonging to that front.
    pub front_indexes: Vec<Vec<usize>>,
    /// Number of points that dominates a solution at a given vector index. When the counter
    /// is 0, the solution is non-dominated. This is `n_p` in the paper.
    pub domination_counter: Vec<usize>,
}

/// Non-dominated fast sorting from NSGA2 paper (with complexity $O(M * N^2)$, where `M` is the
/// number of objectives and `N` the number of points).
///
/// This sorts points into fronts. Points that are not dominated by any other point will belong
/// to the first front.
///
/// Implemented based on paragraph 3A in:
/// > K. Deb, A. Pratap, S. Agarwal and T. Meyarivan, "A fast and elitist multi-objective genetic
/// > algorithm: NSGA-II," in IEEE Transactions on Evolutionary Computation, vol. 6, no. 2, pp.
/// > 182-197, April 2002, doi: 10.1109/4235.996017.
///
/// # Arguments
///
/// * `points`: The objective values of each solution to sort by dominance.
/// * `first_front_only`: Return the first front only with the rank 1 (i.e. containing only
///   non-dominated points). If you need only the first front set this to true to avoid
///   ranking the remaining points.
///
/// returns: `Result<NonDominatedSortResults, OError>`.
pub fn fast_non_dominated_sort(
    points: &[Vec<f64>],
    first_front_only: bool,
) -> Result<NonDominatedSortResults, OError> {
    if points.is_empty() {
        return Err(OError::Generic(
            "At least 1 point is needed for the fast non-dominated sort, but 0 given".to_string(),
        ));
    }

    // this set contains all the points being dominated by a point `p`. This is `S_p` in the paper
    let mut dominated_solutions: Vec<Vec<usize>> = points.iter().map(|_| Vec::new()).collect();
    // number of points that dominates `p`. When the counter is 0, `p` is non-dominated. This
    // is `n_p` in the paper
    let mut domination_counter: Vec<usize> = points.iter().map(|_| 0).collect();

    for pi in 0..points.len() {
        for qi in pi + 1..points.len() {
            match dominance(&points[pi], &points[qi]) {
                PreferredSolution::First => {
                    // `p` dominates `q` - add `q` to the set of solutions dominated by `p`
                    dominated_solutions[pi].push(qi);
                    domination_counter[qi] += 1;
                }
                PreferredSolution::Second => {
                    // q dominates p
                    dominated_solutions[qi].push(pi);
                    domination_counter[pi] += 1;
                }
                PreferredSolution::MutuallyPreferred => {}
            }
        }
    }

    // points not dominated by any other belong to the first front
    let mut current_front: Vec<usize> = (0..points.len())
        .filter(|pi| domination_counter[*pi] == 0)
        .collect();

    if first_front_only {
        return Ok(NonDominatedSortResults {
            front_indexes: vec![current_front],
            domination_counter,
        });
    }

    let mut all_fronts: Vec<Vec<usize>> = vec![current_front.clone()];
    let e_domination_counter = domination_counter.clone();
    loop {
        let mut next_front: Vec<usize> = Vec::new();
        for pi in current_front.iter() {
            for qi in dominated_solutions[*pi].iter() {
                domination_counter[*qi] -= 1;

                // no point in the following fronts dominates `q`
                if domination_counter[*qi] == 0 {
                    next_front.push(*qi);
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        next_front.sort();
        all_fronts.push(next_front.clone());
        current_front = next_front;
    }

    Ok(NonDominatedSortResults {
        front_indexes: all_fronts,
        domination_counter: e_domination_counter,
    })
}
