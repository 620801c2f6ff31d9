use crate::error::{DamageError, DamageResult};
use nalgebra::storage::RawStorage;
use nalgebra::{DMatrix, DVector, Dim, Matrix};
use std::collections::HashMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Quadrature quantities that are exchanged with the finite element code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Q {
    Strain,
    NonlocalEeq,
    Stress,
    DstressDstrain,
    Eeq,
    DeeqDstrain,
    DstressDnonlocalEeq,
    Kappa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QDim {
    Scalar,
    Vector(usize),
    Matrix(usize, usize),
}

impl QDim {
    pub const fn rows(&self) -> usize {
        match self {
            QDim::Scalar => 1,
            QDim::Vector(n) => *n,
            QDim::Matrix(rows, _) => *rows,
        }
    }
    pub const fn cols(&self) -> usize {
        match self {
            QDim::Scalar | QDim::Vector(_) => 1,
            QDim::Matrix(_, cols) => *cols,
        }
    }
    /// Number of values stored per quadrature point.
    pub const fn size(&self) -> usize {
        self.rows() * self.cols()
    }
}

/// Stores `n x rows x cols` values in one flat buffer. The block of point `i`
/// starts at `i * rows * cols`, matrices are stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct QValues {
    rows: usize,
    cols: usize,
    data: DVector<f64>,
}

impl QValues {
    pub fn new(dim: QDim) -> Self {
        Self {
            rows: dim.rows(),
            cols: dim.cols(),
            data: DVector::zeros(0),
        }
    }

    pub fn dim(&self) -> QDim {
        match (self.rows, self.cols) {
            (1, 1) => QDim::Scalar,
            (rows, 1) => QDim::Vector(rows),
            (rows, cols) => QDim::Matrix(rows, cols),
        }
    }

    /// Reallocates storage for `n` points and fills it with zeros.
    pub fn resize(&mut self, n: usize) {
        self.data = DVector::zeros(n * self.rows * self.cols);
    }

    pub fn n(&self) -> usize {
        self.data.len() / (self.rows * self.cols)
    }

    fn block(&self, i: usize) -> DamageResult<std::ops::Range<usize>> {
        let n = self.n();
        if i >= n {
            return Err(DamageError::IndexOutOfBounds { index: i, n });
        }
        let size = self.rows * self.cols;
        Ok(i * size..(i + 1) * size)
    }

    pub fn set_scalar(&mut self, i: usize, value: f64) -> DamageResult<()> {
        assert!(
            self.rows == 1 && self.cols == 1,
            "scalar written to a {}x{} quantity",
            self.rows,
            self.cols
        );
        let range = self.block(i)?;
        self.data[range.start] = value;
        Ok(())
    }

    pub fn set<R: Dim, C: Dim, S: RawStorage<f64, R, C>>(
        &mut self,
        i: usize,
        value: &Matrix<f64, R, C, S>,
    ) -> DamageResult<()> {
        assert!(
            value.nrows() == self.rows && value.ncols() == self.cols,
            "{}x{} block written to a {}x{} quantity",
            value.nrows(),
            value.ncols(),
            self.rows,
            self.cols
        );
        let range = self.block(i)?;
        for (target, source) in self.data.as_mut_slice()[range].iter_mut().zip(value.iter()) {
            *target = *source;
        }
        Ok(())
    }

    pub fn get_scalar(&self, i: usize) -> DamageResult<f64> {
        assert!(
            self.rows == 1 && self.cols == 1,
            "scalar read from a {}x{} quantity",
            self.rows,
            self.cols
        );
        let range = self.block(i)?;
        Ok(self.data[range.start])
    }

    pub fn get(&self, i: usize) -> DamageResult<DMatrix<f64>> {
        let range = self.block(i)?;
        Ok(DMatrix::from_column_slice(
            self.rows,
            self.cols,
            &self.data.as_slice()[range],
        ))
    }

    pub fn as_slice(&self) -> &[f64] {
        self.data.as_slice()
    }
}

/// Caller supplied per-point inputs, checked against the model definition.
#[derive(Debug)]
pub struct QValueInput<'a> {
    values: HashMap<Q, (QDim, &'a [f64])>,
}

impl<'a> QValueInput<'a> {
    /// Every quantity in `definition` must be present with `n` blocks.
    /// Additional quantities are ignored.
    pub fn new(
        definition: &HashMap<Q, QDim>,
        values: &[(Q, &'a [f64])],
        n: usize,
    ) -> DamageResult<Self> {
        let mut checked = HashMap::with_capacity(definition.len());
        for (q, dim) in definition {
            let data = values
                .iter()
                .find(|(key, _)| key == q)
                .map(|(_, data)| *data)
                .ok_or(DamageError::MissingInput(*q))?;
            let expected = n * dim.size();
            if data.len() != expected {
                return Err(DamageError::InputLength {
                    q: *q,
                    expected,
                    actual: data.len(),
                });
            }
            checked.insert(*q, (*dim, data));
        }
        Ok(Self { values: checked })
    }

    fn block(&self, q: Q, i: usize) -> DamageResult<&'a [f64]> {
        let (dim, data) = *self.values.get(&q).ok_or(DamageError::MissingInput(q))?;
        let size = dim.size();
        let n = data.len() / size;
        if i >= n {
            return Err(DamageError::IndexOutOfBounds { index: i, n });
        }
        Ok(&data[i * size..(i + 1) * size])
    }

    pub fn get_vector(&self, q: Q, i: usize) -> DamageResult<DVector<f64>> {
        Ok(DVector::from_column_slice(self.block(q, i)?))
    }

    pub fn get_scalar(&self, q: Q, i: usize) -> DamageResult<f64> {
        Ok(self.block(q, i)?[0])
    }
}

/// Named output buffers of a model.
#[derive(Debug, Clone)]
pub struct QValueOutput {
    values: HashMap<Q, QValues>,
}

impl QValueOutput {
    pub fn new(definition: &HashMap<Q, QDim>) -> Self {
        Self {
            values: definition
                .iter()
                .map(|(q, dim)| (*q, QValues::new(*dim)))
                .collect(),
        }
    }

    pub fn resize(&mut self, n: usize) {
        for values in self.values.values_mut() {
            values.resize(n);
        }
    }

    pub fn is_some(&self, q: Q) -> bool {
        self.values.contains_key(&q)
    }

    pub fn get(&self, q: Q) -> DamageResult<&QValues> {
        self.values.get(&q).ok_or(DamageError::UnknownOutput(q))
    }

    fn get_mut(&mut self, q: Q) -> DamageResult<&mut QValues> {
        self.values.get_mut(&q).ok_or(DamageError::UnknownOutput(q))
    }

    pub fn set_scalar(&mut self, q: Q, i: usize, value: f64) -> DamageResult<()> {
        self.get_mut(q)?.set_scalar(i, value)
    }

    pub fn set<R: Dim, C: Dim, S: RawStorage<f64, R, C>>(
        &mut self,
        q: Q,
        i: usize,
        value: &Matrix<f64, R, C, S>,
    ) -> DamageResult<()> {
        self.get_mut(q)?.set(i, value)
    }
}

/// Constitutive law evaluated independently at every integration point.
/// `evaluate_ip` must not change the history, only `update_ip` may.
pub trait ConstitutiveModel: Send + Sync {
    /// Size of the reduced strain vector.
    fn q_dim(&self) -> usize;

    /// Allocates zeroed history for `n` points.
    fn resize(&mut self, n: usize);

    fn n_quadrature_points(&self) -> usize;

    /// Returns the physical quantities that are required as input for the
    /// constitutive model together with their dimensions.
    fn define_input(&self) -> HashMap<Q, QDim>;

    /// Returns the physical quantities that are written by `evaluate_ip`.
    fn define_output(&self) -> HashMap<Q, QDim>;

    fn evaluate_ip(
        &self,
        ip: usize,
        input: &QValueInput,
        output: &mut QValueOutput,
    ) -> DamageResult<()>;

    /// History variables of all points, e.g. `Q::Kappa`.
    fn history_values(&self, q: Q) -> DamageResult<&QValues> {
        Err(DamageError::UnknownOutput(q))
    }

    /// Commits the history of point `ip`. Returns `true` on the loading branch.
    fn update_ip(&mut self, ip: usize, input: &QValueInput) -> DamageResult<bool>;

    fn evaluate(&self, input: &QValueInput, output: &mut QValueOutput) -> DamageResult<()> {
        for ip in 0..self.n_quadrature_points() {
            self.evaluate_ip(ip, input, output)?;
        }
        Ok(())
    }

    /// Evaluates only the points in `ips`, the blocks of all other points
    /// are left untouched.
    fn evaluate_some(
        &self,
        input: &QValueInput,
        output: &mut QValueOutput,
        ips: &[usize],
    ) -> DamageResult<()> {
        for ip in ips {
            self.evaluate_ip(*ip, input, output)?;
        }
        Ok(())
    }

    /// Returns the number of points on the loading branch.
    fn update(&mut self, input: &QValueInput) -> DamageResult<usize> {
        let mut loading = 0;
        for ip in 0..self.n_quadrature_points() {
            if self.update_ip(ip, input)? {
                loading += 1;
            }
        }
        Ok(loading)
    }
}
