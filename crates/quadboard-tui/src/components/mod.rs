pub mod quadrant_grid;
