pub use fast_non_dominated_sort::{
    dominance, fast_non_dominated_sort, NonDominatedSortResults, PreferredSolution,
};
pub use vectors::{argsort, vector_max, vector_min, Sort};

mod fast_non_dominated_sort;
mod vectors;
