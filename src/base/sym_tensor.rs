use super::Real;
use russell_tensor::{Mandel, Tensor2};
use std::ops::{Add, Sub};

/// Square root of 3/2
pub(crate) const SQRT_3_BY_2: f64 = 1.224744871391589;

/// Holds a symmetric second-order tensor generic on the scalar type
///
/// The components are stored as `[xx, yy, zz, xy, yz, zx]`. Unlike [Tensor2], the
/// components may be dual numbers, thus the tensor can carry a derivative throughout
/// the return map. Conversion to and from [Tensor2] is available for `SymTensor<f64>`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SymTensor<T: Real> {
    /// Holds the components [xx, yy, zz, xy, yz, zx]
    pub comps: [T; 6],
}

/// Maps (i,j) to the position in the component array
const IJ_TO_M: [[usize; 3]; 3] = [[0, 3, 5], [3, 1, 4], [5, 4, 2]];

impl<T: Real> SymTensor<T> {
    /// Allocates a new instance with all components equal to zero
    pub fn new() -> Self {
        SymTensor { comps: [T::zero(); 6] }
    }

    /// Allocates a new instance from the six independent components
    pub fn from_components(xx: T, yy: T, zz: T, xy: T, yz: T, zx: T) -> Self {
        SymTensor {
            comps: [xx, yy, zz, xy, yz, zx],
        }
    }

    /// Allocates an isotropic tensor `a I`
    pub fn isotropic(a: T) -> Self {
        let z = T::zero();
        SymTensor::from_components(a, a, a, z, z, z)
    }

    /// Allocates a tensor from plain values (zero derivative)
    pub fn from_values(values: &SymTensor<f64>) -> Self {
        let mut res = SymTensor::new();
        for m in 0..6 {
            res.comps[m] = T::real(values.comps[m]);
        }
        res
    }

    /// Returns the real part of each component
    pub fn values(&self) -> SymTensor<f64> {
        let mut res = SymTensor::<f64>::new();
        for m in 0..6 {
            res.comps[m] = self.comps[m].value();
        }
        res
    }

    /// Returns the (i,j) component
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.comps[IJ_TO_M[i][j]]
    }

    /// Sets the (i,j) component (and the symmetric (j,i) one)
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.comps[IJ_TO_M[i][j]] = value;
    }

    /// Returns the trace
    pub fn trace(&self) -> T {
        self.comps[0] + self.comps[1] + self.comps[2]
    }

    /// Returns the mean value `tr(σ)/3` (positive in tension)
    pub fn invariant_sigma_m(&self) -> T {
        self.trace() / T::real(3.0)
    }

    /// Returns the deviatoric part
    pub fn deviator(&self) -> Self {
        let m = self.invariant_sigma_m();
        let c = &self.comps;
        SymTensor::from_components(c[0] - m, c[1] - m, c[2] - m, c[3], c[4], c[5])
    }

    /// Returns the Frobenius norm
    ///
    /// Returns exactly zero (with zero derivative) for the zero tensor.
    pub fn norm(&self) -> T {
        let c = &self.comps;
        let two = T::real(2.0);
        let sum = c[0] * c[0] + c[1] * c[1] + c[2] * c[2] + two * (c[3] * c[3] + c[4] * c[4] + c[5] * c[5]);
        if sum.value() == 0.0 {
            T::zero()
        } else {
            sum.sqrt()
        }
    }

    /// Returns the von Mises equivalent value `σd = √(3/2) ‖dev(σ)‖`
    pub fn invariant_sigma_d(&self) -> T {
        T::real(SQRT_3_BY_2) * self.deviator().norm()
    }

    /// Returns a scaled copy `a σ`
    pub fn scaled(&self, a: T) -> Self {
        let mut res = *self;
        for m in 0..6 {
            res.comps[m] = a * res.comps[m];
        }
        res
    }

    /// Performs the update `self += a other`
    pub fn update(&mut self, a: T, other: &SymTensor<T>) {
        for m in 0..6 {
            self.comps[m] = self.comps[m] + a * other.comps[m];
        }
    }

    /// Adds `a I` to the diagonal
    pub fn add_isotropic(&mut self, a: T) {
        for m in 0..3 {
            self.comps[m] = self.comps[m] + a;
        }
    }

    /// Returns the largest absolute difference of real parts
    pub fn max_abs_diff(&self, other: &SymTensor<T>) -> f64 {
        let mut max = 0.0;
        for m in 0..6 {
            let d = f64::abs(self.comps[m].value() - other.comps[m].value());
            if d > max {
                max = d;
            }
        }
        max
    }
}

impl SymTensor<f64> {
    /// Allocates a new instance from a russell [Tensor2]
    pub fn from_tensor2(tt: &Tensor2) -> Self {
        SymTensor::from_components(
            tt.get(0, 0),
            tt.get(1, 1),
            tt.get(2, 2),
            tt.get(0, 1),
            tt.get(1, 2),
            tt.get(2, 0),
        )
    }

    /// Returns a russell [Tensor2] with symmetric Mandel representation
    pub fn to_tensor2(&self) -> Tensor2 {
        let mut tt = Tensor2::new(Mandel::Symmetric);
        for i in 0..3 {
            for j in i..3 {
                tt.sym_set(i, j, self.get(i, j));
            }
        }
        tt
    }
}

impl<T: Real> Add for SymTensor<T> {
    type Output = SymTensor<T>;
    fn add(self, rhs: SymTensor<T>) -> SymTensor<T> {
        let mut res = self;
        res.update(T::one(), &rhs);
        res
    }
}

impl<T: Real> Sub for SymTensor<T> {
    type Output = SymTensor<T>;
    fn sub(self, rhs: SymTensor<T>) -> SymTensor<T> {
        let mut res = self;
        res.update(-T::one(), &rhs);
        res
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
