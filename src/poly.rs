/*!
 * Polynomials, Vectors and Matrices over Z_q[X]/(X^256 + 1)
 *
 * Whether a value is in coefficient ("normal") form or NTT form is a
 * per-call convention documented on each operation; conversions go through
 * [`Poly::ntt`] / [`Poly::intt`] only. Pointwise multiplication and matrix
 * multiplication require NTT form, the rounding family (power2round,
 * decompose, hints) requires normal form with canonical coefficients.
 */

use zeroize::Zeroize;

use crate::field::{Zq, Q};
use crate::ntt;

pub use crate::ntt::N;

/// Split a coefficient as a = a1*2^d + a0 with a0 in (-2^(d-1), 2^(d-1)]
pub(crate) fn power2round_coeff(a: Zq, d: u32) -> (Zq, Zq) {
    let r = a.raw();
    let a1 = (r + (1 << (d - 1)) - 1) >> d;
    let a0 = r as i64 - ((a1 as i64) << d);
    (Zq::new(a1), Zq::from_signed(a0))
}

/// Split a coefficient as r = r1*alpha + r0 with r0 in (-alpha/2, alpha/2]
/// and r1 in [0, (q-1)/alpha); the corner r - r0 = q - 1 folds to r1 = 0
/// with r0 decremented
fn decompose_coeff(r: Zq, alpha: u32) -> (u32, i64) {
    let r = r.raw();
    let mut r0 = (r % alpha) as i64;
    if r0 > (alpha / 2) as i64 {
        r0 -= alpha as i64;
    }
    let rr = r as i64 - r0;
    let mut r1 = (rr / alpha as i64) as u32;
    if rr == Q as i64 - 1 {
        r1 = 0;
        r0 -= 1;
    }
    (r1, r0)
}

fn make_hint_coeff(z: Zq, r: Zq, alpha: u32) -> Zq {
    let (r1, _) = decompose_coeff(r, alpha);
    let (v1, _) = decompose_coeff(r + z, alpha);
    if r1 == v1 {
        Zq::ZERO
    } else {
        Zq::ONE
    }
}

fn use_hint_coeff(hint: Zq, r: Zq, alpha: u32) -> Zq {
    let m = (Q - 1) / alpha;
    let (r1, r0) = decompose_coeff(r, alpha);
    if hint.raw() == 0 {
        return Zq::new(r1);
    }
    if r0 > 0 {
        Zq::new((r1 + 1) % m)
    } else {
        Zq::new((r1 + m - 1) % m)
    }
}

/// A polynomial with 256 coefficients
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Poly {
    pub coeffs: [Zq; N],
}

impl Default for Poly {
    fn default() -> Self {
        Poly {
            coeffs: [Zq::ZERO; N],
        }
    }
}

impl Zeroize for Poly {
    fn zeroize(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = Zq::ZERO;
        }
    }
}

impl Poly {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Coefficient-wise addition
    pub fn add_assign(&mut self, rhs: &Poly) {
        for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a += *b;
        }
    }

    /// Coefficient-wise subtraction
    pub fn sub_assign(&mut self, rhs: &Poly) {
        for (a, b) in self.coeffs.iter_mut().zip(rhs.coeffs.iter()) {
            *a -= *b;
        }
    }

    /// Coefficient-wise negation
    pub fn negate(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = -*c;
        }
    }

    /// Forward transform into NTT form
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Inverse transform back to normal form
    pub fn intt(&mut self) {
        ntt::intt(&mut self.coeffs);
    }

    /// Pointwise product; both inputs must be in NTT form
    pub fn pointwise(&self, rhs: &Poly) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = self.coeffs[i] * rhs.coeffs[i];
        }
        out
    }

    /// Multiply every coefficient by 2^d
    pub fn shl(&mut self, d: u32) {
        let factor = Zq::new(1 << d);
        for c in self.coeffs.iter_mut() {
            *c *= factor;
        }
    }

    /// Replace every coefficient a with x - a; maps signed ranges to the
    /// unsigned packing domain and is its own inverse
    pub fn sub_from(&mut self, x: u32) {
        let x = Zq::new(x);
        for c in self.coeffs.iter_mut() {
            *c = x - *c;
        }
    }

    /// Largest signed-representative magnitude over all coefficients
    pub fn infinity_norm(&self) -> u32 {
        self.coeffs.iter().map(|c| c.norm()).max().unwrap_or(0)
    }

    /// Hamming weight; meaningful for hint polynomials with 0/1 coefficients
    pub fn count_ones(&self) -> usize {
        self.coeffs.iter().filter(|c| c.raw() == 1).count()
    }

    /// Split every coefficient as a1*2^d + a0; returns (high, low)
    pub fn power2round(&self, d: u32) -> (Poly, Poly) {
        let mut high = Poly::zero();
        let mut low = Poly::zero();
        for i in 0..N {
            let (a1, a0) = power2round_coeff(self.coeffs[i], d);
            high.coeffs[i] = a1;
            low.coeffs[i] = a0;
        }
        (high, low)
    }

    /// High bits of the alpha-decomposition of every coefficient
    pub fn highbits(&self, alpha: u32) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = Zq::new(decompose_coeff(self.coeffs[i], alpha).0);
        }
        out
    }

    /// Low bits of the alpha-decomposition of every coefficient
    pub fn lowbits(&self, alpha: u32) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = Zq::from_signed(decompose_coeff(self.coeffs[i], alpha).1);
        }
        out
    }

    /// Hint bit per coefficient: 1 where adding z changes the high bits of r
    pub fn make_hint(z: &Poly, r: &Poly, alpha: u32) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = make_hint_coeff(z.coeffs[i], r.coeffs[i], alpha);
        }
        out
    }

    /// Recover the high bits of the hinted value from r and the hint bits
    pub fn use_hint(hint: &Poly, r: &Poly, alpha: u32) -> Poly {
        let mut out = Poly::zero();
        for i in 0..N {
            out.coeffs[i] = use_hint_coeff(hint.coeffs[i], r.coeffs[i], alpha);
        }
        out
    }
}

/// An ordered sequence of polynomials
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolyVec {
    pub polys: Vec<Poly>,
}

impl Zeroize for PolyVec {
    fn zeroize(&mut self) {
        for p in self.polys.iter_mut() {
            p.zeroize();
        }
    }
}

impl PolyVec {
    pub fn zero(len: usize) -> Self {
        PolyVec {
            polys: vec![Poly::zero(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn add_assign(&mut self, rhs: &PolyVec) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            a.add_assign(b);
        }
    }

    pub fn sub_assign(&mut self, rhs: &PolyVec) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            a.sub_assign(b);
        }
    }

    pub fn negate(&mut self) {
        for p in self.polys.iter_mut() {
            p.negate();
        }
    }

    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    pub fn intt(&mut self) {
        for p in self.polys.iter_mut() {
            p.intt();
        }
    }

    /// Pointwise-multiply one polynomial with every element; all in NTT form
    pub fn pointwise_poly(&self, c: &Poly) -> PolyVec {
        PolyVec {
            polys: self.polys.iter().map(|p| p.pointwise(c)).collect(),
        }
    }

    pub fn shl(&mut self, d: u32) {
        for p in self.polys.iter_mut() {
            p.shl(d);
        }
    }

    pub fn sub_from(&mut self, x: u32) {
        for p in self.polys.iter_mut() {
            p.sub_from(x);
        }
    }

    pub fn infinity_norm(&self) -> u32 {
        self.polys.iter().map(|p| p.infinity_norm()).max().unwrap_or(0)
    }

    pub fn count_ones(&self) -> usize {
        self.polys.iter().map(|p| p.count_ones()).sum()
    }

    pub fn power2round(&self, d: u32) -> (PolyVec, PolyVec) {
        let mut high = PolyVec::zero(self.len());
        let mut low = PolyVec::zero(self.len());
        for (i, p) in self.polys.iter().enumerate() {
            let (a1, a0) = p.power2round(d);
            high.polys[i] = a1;
            low.polys[i] = a0;
        }
        (high, low)
    }

    pub fn highbits(&self, alpha: u32) -> PolyVec {
        PolyVec {
            polys: self.polys.iter().map(|p| p.highbits(alpha)).collect(),
        }
    }

    pub fn lowbits(&self, alpha: u32) -> PolyVec {
        PolyVec {
            polys: self.polys.iter().map(|p| p.lowbits(alpha)).collect(),
        }
    }

    pub fn make_hint(z: &PolyVec, r: &PolyVec, alpha: u32) -> PolyVec {
        PolyVec {
            polys: z
                .polys
                .iter()
                .zip(r.polys.iter())
                .map(|(zp, rp)| Poly::make_hint(zp, rp, alpha))
                .collect(),
        }
    }

    pub fn use_hint(hint: &PolyVec, r: &PolyVec, alpha: u32) -> PolyVec {
        PolyVec {
            polys: hint
                .polys
                .iter()
                .zip(r.polys.iter())
                .map(|(hp, rp)| Poly::use_hint(hp, rp, alpha))
                .collect(),
        }
    }
}

/// A row-major k x l matrix of polynomials in NTT form
#[derive(Clone, Debug)]
pub struct PolyMatrix {
    rows: usize,
    cols: usize,
    polys: Vec<Poly>,
}

impl PolyMatrix {
    pub fn zero(rows: usize, cols: usize) -> Self {
        PolyMatrix {
            rows,
            cols,
            polys: vec![Poly::zero(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn poly(&self, row: usize, col: usize) -> &Poly {
        &self.polys[row * self.cols + col]
    }

    pub fn poly_mut(&mut self, row: usize, col: usize) -> &mut Poly {
        &mut self.polys[row * self.cols + col]
    }

    /// Matrix-vector product accumulated pointwise; matrix and vector must be
    /// in NTT form and the result stays in NTT form
    pub fn mul_vec(&self, v: &PolyVec) -> PolyVec {
        debug_assert_eq!(self.cols, v.len());
        let mut out = PolyVec::zero(self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let prod = self.poly(row, col).pointwise(&v.polys[col]);
                out.polys[row].add_assign(&prod);
            }
        }
        out
    }
}
