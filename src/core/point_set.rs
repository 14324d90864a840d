use serde::{Deserialize, Serialize};

use crate::core::{OError, ParetoFrontSource};

/// A validated set of points (or fitness vectors) in the objective space. Each point is a vector
/// of objective values and all the points share the same dimension, which must be at least `2`.
/// The set is validated once when it is created and it cannot be changed afterwards; use
/// [`PointSet::clone`] to get an independent copy.
///
/// When serialised, the set is exported as an array of arrays of numbers. Deserialisation runs
/// the same validation as [`PointSet::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PointSet {
    /// The points. The size of this vector is the number of points and the size of each nested
    /// vector is the number of objectives.
    points: Vec<Vec<f64>>,
}

impl PointSet {
    /// Create a new set of points.
    ///
    /// # Arguments
    ///
    /// * `points`: The points. Each item is a point whose size is equal to the number of
    ///   objectives.
    ///
    /// returns: `Result<PointSet, OError>`. This returns an error if `points` is empty, the points
    /// have less than `2` coordinates, the point dimensions differ or a coordinate is not a
    /// finite number.
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self, OError> {
        let set = Self { points };
        set.verify_after_construct()?;
        Ok(set)
    }

    /// Create a new set of points using the individuals belonging to one Pareto front of a
    /// population. The population is queried once and the fitness vectors are copied into the
    /// set, so no reference to the population is kept.
    ///
    /// # Arguments
    ///
    /// * `source`: The population or any type able to sort its individuals into Pareto fronts.
    /// * `front_index`: The index of the front to use (`0` is the non-dominated front).
    ///
    /// returns: `Result<PointSet, OError>`
    pub fn from_population<S: ParetoFrontSource + ?Sized>(
        source: &S,
        front_index: usize,
    ) -> Result<Self, OError> {
        let fronts = source.compute_pareto_fronts()?;
        let front = fronts.get(front_index).ok_or(OError::OutOfRange(
            "Pareto front".to_string(),
            front_index,
            fronts.len(),
        ))?;

        let points = front
            .iter()
            .map(|idx| source.fitness_of(*idx))
            .collect::<Result<Vec<Vec<f64>>, OError>>()?;
        Self::new(points)
    }

    /// Check the set after its creation.
    ///
    /// returns: `Result<(), OError>`
    fn verify_after_construct(&self) -> Result<(), OError> {
        let name = "point set".to_string();
        let first = self
            .points
            .first()
            .ok_or(OError::Validation(name.clone(), "The set cannot be empty".to_string()))?;

        let dimension = first.len();
        if dimension <= 1 {
            return Err(OError::Validation(
                name,
                format!("The points must have 2 or more dimensions, but {dimension} given"),
            ));
        }

        for (idx, point) in self.points.iter().enumerate() {
            if point.len() != dimension {
                return Err(OError::Validation(
                    name,
                    format!(
                        "All the points must have the same dimension. Point #{} has {} coordinates, but {} expected",
                        idx,
                        point.len(),
                        dimension
                    ),
                ));
            }
            if point.iter().any(|v| !v.is_finite()) {
                return Err(OError::Validation(
                    name,
                    format!("Point #{idx} contains a non-finite coordinate: {point:?}"),
                ));
            }
        }
        Ok(())
    }

    /// Get the number of points in the set.
    ///
    /// returns: `usize`
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set has no points. This is always `false` because an empty set cannot be
    /// created.
    ///
    /// returns: `bool`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the number of coordinates of each point.
    ///
    /// returns: `usize`
    pub fn dimension(&self) -> usize {
        self.points[0].len()
    }

    /// Get a point by its index.
    ///
    /// # Arguments
    ///
    /// * `index`: The point index.
    ///
    /// returns: `Result<&[f64], OError>`
    pub fn point(&self, index: usize) -> Result<&[f64], OError> {
        self.points
            .get(index)
            .map(|p| p.as_slice())
            .ok_or(OError::OutOfRange("point".to_string(), index, self.len()))
    }

    /// Get all the points.
    ///
    /// returns: `&[Vec<f64>]`
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }
}

impl TryFrom<Vec<Vec<f64>>> for PointSet {
    type Error = OError;

    fn try_from(points: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        PointSet::new(points)
    }
}

impl From<PointSet> for Vec<Vec<f64>> {
    fn from(set: PointSet) -> Self {
        set.points
    }
}
