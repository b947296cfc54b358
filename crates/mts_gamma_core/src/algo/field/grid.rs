/// Square density grid stored row-major; row `r` holds cells with `y == r`.
///
/// Fields are only built by this crate; callers get read access.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    size: usize,
    cells: Vec<f64>,
}

impl Field {
    pub(crate) fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    pub(crate) fn from_cells(size: usize, cells: Vec<f64>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Side length in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.size + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Total density over all cells.
    pub fn mass(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.cells.iter().copied().fold(0.0_f64, f64::max)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    pub(crate) fn into_cells(self) -> Vec<f64> {
        self.cells
    }
}
