/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for faster neighbor lookups.
 * It divides the cube around the boundary sphere into cells at least as
 * large as the largest perception radius, so every neighbor of a boid is
 * in its own cell or one of the 26 cells around it.
 *
 * The grid never has more than MAX_CELLS_PER_AXIS cells along an axis.
 * When the requested cells are finer than that, cells grow to fit, which
 * only widens each query.
 *
 * Cell coordinates are clamped to the grid on both insert and query. The
 * clamp is monotone and never pulls two cells further apart, so boids that
 * stray outside the cube are still found. Query results come back sorted
 * so rules visit neighbors in the same order as the all-pairs scan.
 */

use nannou::prelude::*;

pub const MAX_CELLS_PER_AXIS: usize = 64;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub half_extent: f32,
    pub grid_size: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, half_extent: f32) -> Self {
        let extent = 2.0 * half_extent;
        let cell_size = cell_size.max(extent / MAX_CELLS_PER_AXIS as f32);
        // Float casts saturate, so a huge ratio still lands on the cap
        let grid_size = ((extent / cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS);
        let cells = (0..grid_size * grid_size * grid_size)
            .map(|_| Vec::new())
            .collect();

        Self {
            cell_size,
            half_extent,
            grid_size,
            cells,
        }
    }

    // Clamped cell coordinate along one axis
    #[inline]
    fn axis_cell(&self, value: f32) -> usize {
        let max_cell = (self.grid_size - 1) as f32;
        // NaN falls through `clamp` and casts to 0
        ((value + self.half_extent) / self.cell_size)
            .floor()
            .clamp(0.0, max_cell) as usize
    }

    #[inline]
    pub fn cell_coords(&self, position: Vec3) -> [usize; 3] {
        [
            self.axis_cell(position.x),
            self.axis_cell(position.y),
            self.axis_cell(position.z),
        ]
    }

    #[inline]
    fn flat_index(&self, [x, y, z]: [usize; 3]) -> usize {
        (z * self.grid_size + y) * self.grid_size + x
    }

    // Clear the grid
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    // Insert a boid into the grid
    pub fn insert(&mut self, boid_index: usize, position: Vec3) {
        let index = self.flat_index(self.cell_coords(position));
        if let Some(cell) = self.cells.get_mut(index) {
            cell.push(boid_index);
        }
    }

    // Clear and refill from a full set of positions
    pub fn rebuild<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec3>,
    {
        self.clear();
        for (i, position) in positions.into_iter().enumerate() {
            self.insert(i, position);
        }
    }

    // Boid indices in the cell containing `position` and the 26 around it, ascending
    pub fn nearby_indices(&self, position: Vec3) -> Vec<usize> {
        let [cx, cy, cz] = self.cell_coords(position);
        let last = self.grid_size - 1;
        let mut result = Vec::new();

        for z in cz.saturating_sub(1)..=(cz + 1).min(last) {
            for y in cy.saturating_sub(1)..=(cy + 1).min(last) {
                for x in cx.saturating_sub(1)..=(cx + 1).min(last) {
                    if let Some(cell) = self.cells.get(self.flat_index([x, y, z])) {
                        result.extend_from_slice(cell);
                    }
                }
            }
        }

        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_the_cube() {
        let grid = SpatialGrid::new(40.0, 500.0);
        assert_eq!(grid.grid_size, 25);
        assert_eq!(grid.cell_coords(vec3(-500.0, -500.0, -500.0)), [0, 0, 0]);
        assert_eq!(grid.cell_coords(vec3(499.0, 0.0, 0.0)), [24, 12, 12]);
    }

    #[test]
    fn fine_cells_are_capped() {
        let grid = SpatialGrid::new(1.0, 500.0);
        assert_eq!(grid.grid_size, MAX_CELLS_PER_AXIS);
        assert!(grid.cell_size >= 1000.0 / MAX_CELLS_PER_AXIS as f32);

        let huge = SpatialGrid::new(40.0, 1.0e30);
        assert_eq!(huge.grid_size, MAX_CELLS_PER_AXIS);
    }

    #[test]
    fn capped_grid_still_finds_close_neighbors() {
        let mut grid = SpatialGrid::new(1.0, 500.0);
        grid.rebuild([
            vec3(0.0, 0.0, 0.0),
            vec3(0.5, 0.0, 0.0),
            vec3(0.0, -0.9, 0.0),
            vec3(300.0, 0.0, 0.0),
        ]);
        assert_eq!(grid.nearby_indices(Vec3::ZERO), vec![0, 1, 2]);
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        let grid = SpatialGrid::new(40.0, 500.0);
        assert_eq!(grid.cell_coords(vec3(9000.0, -9000.0, f32::NAN)), [24, 0, 0]);
    }

    #[test]
    fn nearby_finds_adjacent_cells_only() {
        let mut grid = SpatialGrid::new(40.0, 500.0);
        grid.rebuild([
            vec3(0.0, 0.0, 0.0),
            vec3(39.0, 0.0, 0.0),
            vec3(0.0, 0.0, -39.0),
            vec3(200.0, 0.0, 0.0),
        ]);
        assert_eq!(grid.nearby_indices(Vec3::ZERO), vec![0, 1, 2]);
    }

    #[test]
    fn strays_outside_the_cube_still_meet() {
        let mut grid = SpatialGrid::new(40.0, 500.0);
        grid.rebuild([vec3(620.0, 0.0, 0.0), vec3(590.0, 0.0, 0.0)]);
        assert_eq!(grid.nearby_indices(vec3(620.0, 0.0, 0.0)), vec![0, 1]);
    }

    #[test]
    fn results_are_sorted() {
        let mut grid = SpatialGrid::new(40.0, 500.0);
        grid.insert(5, vec3(41.0, 0.0, 0.0));
        grid.insert(2, vec3(1.0, 0.0, 0.0));
        grid.insert(9, vec3(-1.0, 0.0, 0.0));
        assert_eq!(grid.nearby_indices(vec3(1.0, 0.0, 0.0)), vec![2, 5, 9]);
    }
}
