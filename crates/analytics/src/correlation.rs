use crate::view::FilteredView;
use core_types::NumericColumn;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Pearson correlation of the numeric columns of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Correlation {
    /// Fewer than two rows; no coefficient is defined.
    InsufficientData { rows: usize },
    Matrix(CorrelationMatrix),
}

impl Correlation {
    pub fn matrix(&self) -> Option<&CorrelationMatrix> {
        match self {
            Correlation::Matrix(matrix) => Some(matrix),
            Correlation::InsufficientData { .. } => None,
        }
    }
}

/// Square, symmetric matrix over `NumericColumn::ALL`.
///
/// A cell is `None` when either column is constant within the view, diagonal included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericColumn>,
    pub coefficients: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: NumericColumn, b: NumericColumn) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        self.coefficients[i][j]
    }
}

/// One column's values, plus whether every value is identical.
struct Series {
    values: Vec<f64>,
    mean: f64,
    constant: bool,
}

impl Series {
    fn collect(view: &FilteredView<'_>, column: NumericColumn) -> Self {
        let exact: Vec<Decimal> = view.rows().map(|row| column.value_of(row)).collect();
        // Constancy is decided on the exact decimals, not on their float images.
        let constant = exact.windows(2).all(|w| w[0] == w[1]);
        let values: Vec<f64> = exact.iter().map(|v| v.to_f64().unwrap_or(f64::NAN)).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Self {
            values,
            mean,
            constant,
        }
    }
}

fn pearson(x: &Series, y: &Series) -> Option<f64> {
    if x.constant || y.constant {
        return None;
    }
    let (mut covariance, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in x.values.iter().zip(&y.values) {
        let dx = a - x.mean;
        let dy = b - y.mean;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some((covariance / denominator).clamp(-1.0, 1.0))
}

/// Correlates every pair of `unit_price`, `quantity`, `tax`, `total` and `rating`.
///
/// Categorical columns never take part. Only the upper triangle is computed and mirrored,
/// so the matrix is exactly symmetric.
pub fn correlate(view: &FilteredView<'_>) -> Correlation {
    if view.len() < 2 {
        return Correlation::InsufficientData { rows: view.len() };
    }

    let columns = NumericColumn::ALL.to_vec();
    let series: Vec<Series> = columns.iter().map(|c| Series::collect(view, *c)).collect();

    let n = columns.len();
    let mut coefficients = vec![vec![None; n]; n];
    for i in 0..n {
        // Same variance test as the off-diagonal cells, so a column is either fully defined or not.
        coefficients[i][i] = pearson(&series[i], &series[i]).map(|_| 1.0);
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            coefficients[i][j] = r;
            coefficients[j][i] = r;
        }
    }

    tracing::debug!(rows = view.len(), "Correlation matrix computed.");
    Correlation::Matrix(CorrelationMatrix {
        columns,
        coefficients,
    })
}
