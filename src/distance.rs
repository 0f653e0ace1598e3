use crate::entity::Entity;

/// Full pairwise distance matrix over one entity set.
///
/// The index borrows the entity slice it was built from, so it cannot outlive a
/// change to that set: once entities are removed or moved the old index is gone
/// and a new one has to be built.
#[derive(Debug)]
pub struct DistanceIndex<'a> {
    entities: &'a [Entity],
    /// Row-major `len * len` matrix.
    distances: Vec<f32>,
}

impl<'a> DistanceIndex<'a> {
    /// Computes every pairwise Euclidean distance. O(N²); the diagonal is zero
    /// and each value is computed once and mirrored, so the matrix is exactly symmetric.
    pub fn build(entities: &'a [Entity]) -> Self {
        let n = entities.len();
        let mut distances = vec![0.0f32; n * n];
        for i in 0..n {
            let pos_i = entities[i].position();
            for j in (i + 1)..n {
                let d = pos_i.distance(entities[j].position());
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }
        DistanceIndex { entities, distances }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The entity set this index describes, in row order.
    pub fn entities(&self) -> &'a [Entity] {
        self.entities
    }

    /// Distance between the entities at rows `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f32 {
        self.distances[i * self.len() + j]
    }

    /// All distances from row `i`, indexed by the other entity's row.
    pub fn row(&self, i: usize) -> &[f32] {
        let n = self.len();
        &self.distances[i * n..(i + 1) * n]
    }

    /// Rows of every other entity within `max_dist` (inclusive) of row `i`,
    /// paired with the distance, in row order.
    pub fn neighbors_within(&self, i: usize, max_dist: f32) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.row(i)
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(j, d)| j != i && d <= max_dist)
    }
}
