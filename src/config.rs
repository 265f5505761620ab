//! Tunable tolerances and dispatcher limits.

/// Tolerances used by the geometric predicates in [`crate::geometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Maximum cross-product magnitude for three points to count as collinear.
    pub collinear: f64,
    /// Tolerance for right angles and side comparisons in rectangle/square tests.
    pub rectangle: f64,
    /// Minimum squared length of a square's diagonal.
    pub square_diagonal: f64,
}

impl Tolerances {
    pub const COLLINEAR: f64 = 1e-6;
    pub const RECTANGLE: f64 = 1e-6;
    pub const SQUARE_DIAGONAL: f64 = 1e-9;
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            collinear: Self::COLLINEAR,
            rectangle: Self::RECTANGLE,
            square_diagonal: Self::SQUARE_DIAGONAL,
        }
    }
}

/// Settings for a [`crate::Dispatcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    pub tolerances: Tolerances,
    /// How many `execute_file` calls may be nested before the innermost is refused.
    pub max_script_depth: usize,
}

impl DispatcherConfig {
    pub const MAX_SCRIPT_DEPTH: usize = 16;

    pub fn with_max_script_depth(mut self, depth: usize) -> Self {
        self.max_script_depth = depth;
        self
    }

    pub fn with_tolerances(mut self, tolerances: Tolerances) -> Self {
        self.tolerances = tolerances;
        self
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            max_script_depth: Self::MAX_SCRIPT_DEPTH,
        }
    }
}
