use crate::core::OError;
use crate::utils::fast_non_dominated_sort;

/// A type that can group its individuals into Pareto fronts and provide their fitness vectors.
/// This is used by [`crate::core::PointSet::from_population`] to collect the points of one front.
pub trait ParetoFrontSource {
    /// Sort the individuals into Pareto fronts. The first front contains the non-dominated
    /// individuals; each front is given as a vector of individual indexes.
    ///
    /// returns: `Result<Vec<Vec<usize>>, OError>`
    fn compute_pareto_fronts(&self) -> Result<Vec<Vec<usize>>, OError>;

    /// Get the fitness (or objective) values of an individual.
    ///
    /// # Arguments
    ///
    /// * `index`: The individual index.
    ///
    /// returns: `Result<Vec<f64>, OError>`
    fn fitness_of(&self, index: usize) -> Result<Vec<f64>, OError>;
}

/// A population of individuals described by their fitness vectors. All objectives are minimised.
#[derive(Clone, Debug, Default)]
pub struct Population(pub Vec<Vec<f64>>);

impl Population {
    /// Initialise a population with some individuals.
    ///
    /// # Arguments
    ///
    /// * `fitness`: The fitness vector of each individual.
    ///
    /// returns: `Self`
    pub fn new(fitness: Vec<Vec<f64>>) -> Self {
        Self(fitness)
    }

    /// Get the population size.
    ///
    /// return: `usize`
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if the population is empty.
    ///
    /// return: `bool`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ParetoFrontSource for Population {
    fn compute_pareto_fronts(&self) -> Result<Vec<Vec<usize>>, OError> {
        Ok(fast_non_dominated_sort(&self.0, false)?.front_indexes)
    }

    fn fitness_of(&self, index: usize) -> Result<Vec<f64>, OError> {
        self.0
            .get(index)
            .cloned()
            .ok_or(OError::OutOfRange("individual".to_string(), index, self.len()))
    }
}
