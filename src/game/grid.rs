use super::symbol::Symbol;

/// A `(row, col)` cell address. Row 0 is the top.
pub type Coord = (usize, usize);

/// Scan directions: horizontal, vertical, diagonal `\`, anti-diagonal `/`.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A straight run of cells in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    cells: Vec<Coord>,
    direction: (isize, isize),
}

impl Line {
    pub fn new(cells: Vec<Coord>, direction: (isize, isize)) -> Self {
        Line { cells, direction }
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn direction(&self) -> (isize, isize) {
        self.direction
    }

    /// Number of cells this line shares with `other`.
    pub fn shared_cells(&self, other: &Line) -> usize {
        self.cells
            .iter()
            .filter(|c| other.cells.contains(c))
            .count()
    }
}

/// Fixed-size 2D storage of symbols.
///
/// Dimensions are set at construction and never change. Only boards write
/// cells; everything else reads through [`Grid::get`] or [`Grid::to_matrix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<S> {
    rows: usize,
    cols: usize,
    cells: Vec<S>,
}

impl<S: Symbol> Grid<S> {
    /// Create a grid with every cell blank.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![S::BLANK; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get the symbol at a position. Panics when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> S {
        assert!(self.in_bounds(row, col), "cell ({row}, {col}) out of bounds");
        self.cells[row * self.cols + col]
    }

    /// Get the symbol at a position, or `None` when out of bounds.
    pub fn try_get(&self, row: usize, col: usize) -> Option<S> {
        self.in_bounds(row, col)
            .then(|| self.cells[row * self.cols + col])
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, symbol: S) {
        assert!(self.in_bounds(row, col), "cell ({row}, {col}) out of bounds");
        self.cells[row * self.cols + col] = symbol;
    }

    /// Copy the grid out as nested rows.
    pub fn to_matrix(&self) -> Vec<Vec<S>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Count the cells that are not blank.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|s| !s.is_blank()).count()
    }

    /// Iterate over all blank cells in row-major order.
    pub fn blank_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
            .filter(move |&(r, c)| self.get(r, c).is_blank())
    }

    /// True when every cell of `line` holds `symbol`.
    pub fn line_is(&self, line: &Line, symbol: S) -> bool {
        line.cells().iter().all(|&(r, c)| self.get(r, c) == symbol)
    }

    /// The symbols along `line`, in order.
    pub fn line_symbols(&self, line: &Line) -> Vec<S> {
        line.cells().iter().map(|&(r, c)| self.get(r, c)).collect()
    }

    /// Number of lines in `lines` fully held by `symbol`.
    pub fn count_lines(&self, lines: &[Line], symbol: S) -> usize {
        lines.iter().filter(|l| self.line_is(l, symbol)).count()
    }
}

/// Every straight window of `len` cells that fits in a `rows` x `cols` grid,
/// keeping only windows whose cells all satisfy `playable`.
///
/// Windows are produced start-cell-major, then in [`DIRECTIONS`] order.
pub fn windows(
    rows: usize,
    cols: usize,
    len: usize,
    playable: impl Fn(usize, usize) -> bool,
) -> Vec<Line> {
    let mut lines = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            for &(dr, dc) in &DIRECTIONS {
                let cells: Option<Vec<Coord>> = (0..len as isize)
                    .map(|k| {
                        let r = row as isize + k * dr;
                        let c = col as isize + k * dc;
                        if r < 0 || c < 0 || r >= rows as isize || c >= cols as isize {
                            return None;
                        }
                        let (r, c) = (r as usize, c as usize);
                        playable(r, c).then_some((r, c))
                    })
                    .collect();
                if let Some(cells) = cells {
                    lines.push(Line::new(cells, (dr, dc)));
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_blank() {
        let grid: Grid<char> = Grid::new(3, 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.occupied(), 0);
        assert_eq!(grid.blank_cells().count(), 12);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid: Grid<char> = Grid::new(3, 3);
        grid.set(1, 2, 'X');
        assert_eq!(grid.get(1, 2), 'X');
        assert_eq!(grid.try_get(3, 0), None);
        assert_eq!(grid.to_matrix()[1], vec!['.', '.', 'X']);
    }

    #[test]
    fn test_three_by_three_has_eight_lines() {
        let lines = windows(3, 3, 3, |_, _| true);
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_connect_four_window_count() {
        // 24 horizontal + 21 vertical + 12 + 12 diagonal
        let lines = windows(6, 7, 4, |_, _| true);
        assert_eq!(lines.len(), 69);
    }

    #[test]
    fn test_mask_excludes_windows() {
        let lines = windows(3, 3, 3, |r, c| (r, c) != (1, 1));
        // Center blocked: both diagonals, middle row and middle column drop.
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_count_lines() {
        let mut grid: Grid<char> = Grid::new(3, 3);
        for c in 0..3 {
            grid.set(0, c, 'X');
        }
        let lines = windows(3, 3, 3, |_, _| true);
        assert_eq!(grid.count_lines(&lines, 'X'), 1);
        assert_eq!(grid.count_lines(&lines, 'O'), 0);
    }

    #[test]
    fn test_shared_cells() {
        let a = Line::new(vec![(0, 0), (0, 1), (0, 2)], (0, 1));
        let b = Line::new(vec![(0, 0), (1, 0), (2, 0)], (1, 0));
        assert_eq!(a.shared_cells(&b), 1);
    }
}
