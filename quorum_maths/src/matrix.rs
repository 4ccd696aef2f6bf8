//! Square matrices over the integers modulo a prime. The determinant is computed by fraction-free Gaussian
//! elimination: instead of dividing by a pivot, every row below it is scaled by the pivot before the pivot row is
//! subtracted. The accumulated scaling is divided out once at the end, and every intermediate product is reduced
//! modulo the prime so entries never grow beyond two prime lengths.

use num::{BigUint, One, Zero};

use crate::error::MathError;
use crate::modular::{add_mod, inverse_mod, mul_mod, neg_mod, sub_mod};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquareMatrix {
    rows: Vec<Vec<BigUint>>,
}

impl SquareMatrix {
    /// Create a matrix from its rows. Every row must have as many entries as there are rows.
    pub fn from_rows(rows: Vec<Vec<BigUint>>) -> Result<Self, MathError> {
        let order = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != order) {
            return Err(MathError::DimensionMismatch {
                expected: order,
                found: row.len(),
            });
        }
        Ok(SquareMatrix { rows })
    }

    pub fn order(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<BigUint>] {
        &self.rows
    }

    /// The matrix with `row` and `column` removed.
    pub fn minor(&self, row: usize, column: usize) -> SquareMatrix {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != row)
            .map(|(_, entries)| {
                entries
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| *index != column)
                    .map(|(_, entry)| entry.clone())
                    .collect()
            })
            .collect();
        SquareMatrix { rows }
    }

    /// The determinant modulo `prime`. A singular matrix has determinant zero.
    pub fn determinant_mod(&self, prime: &BigUint) -> Result<BigUint, MathError> {
        match self.eliminate(prime) {
            Err(MathError::SingularMatrix) => Ok(BigUint::zero()),
            result => result,
        }
    }

    /// The cofactor `(-1)^(row + column) * det(minor(row, column))` modulo `prime`.
    pub fn cofactor_mod(&self, row: usize, column: usize, prime: &BigUint) -> Result<BigUint, MathError> {
        let minor = self.minor(row, column).determinant_mod(prime)?;
        if (row + column) % 2 == 0 {
            Ok(minor)
        } else {
            Ok(neg_mod(&minor, prime))
        }
    }

    /// The cofactors of every entry of `column`, ordered by row.
    pub fn cofactor_column_mod(&self, column: usize, prime: &BigUint) -> Result<Vec<BigUint>, MathError> {
        (0..self.order())
            .map(|row| self.cofactor_mod(row, column, prime))
            .collect()
    }

    /// Solve `self * x = rhs` for the single unknown `x[column]` with Cramer's rule: expanding the determinant of
    /// the matrix whose `column` is replaced by `rhs` along that column gives `x[column] = det^-1 * sum(C_i * rhs_i)`
    /// where `C_i` are the cofactors of `column`.
    ///
    /// # Returns
    /// The unknown reduced modulo `prime`, or `MathError::SingularMatrix` if the determinant vanishes.
    pub fn solve_unknown_mod(&self, column: usize, rhs: &[BigUint], prime: &BigUint) -> Result<BigUint, MathError> {
        let order = self.order();
        if order == 0 {
            return Err(MathError::EmptySystem);
        }
        if rhs.len() != order {
            return Err(MathError::DimensionMismatch {
                expected: order,
                found: rhs.len(),
            });
        }
        if column >= order {
            return Err(MathError::DimensionMismatch {
                expected: order,
                found: column + 1,
            });
        }

        let determinant = self.eliminate(prime)?;
        let inverse = inverse_mod(&determinant, prime).ok_or(MathError::SingularMatrix)?;

        let cofactors = self.cofactor_column_mod(column, prime)?;
        Ok(cofactors
            .iter()
            .zip(rhs)
            .fold(BigUint::zero(), |sum, (cofactor, value)| {
                let weight = mul_mod(cofactor, &inverse, prime);
                add_mod(&sum, &mul_mod(&weight, &(value % prime), prime), prime)
            }))
    }

    /// Fraction-free elimination into upper triangular form.
    ///
    /// # Returns
    /// The determinant modulo `prime`, `MathError::SingularMatrix` as soon as a column without a non-zero pivot is
    /// found, or `MathError::NotInvertible` if `prime` is not actually prime and the scaling cannot be divided out.
    fn eliminate(&self, prime: &BigUint) -> Result<BigUint, MathError> {
        let order = self.order();
        let mut rows: Vec<Vec<BigUint>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|entry| entry % prime).collect())
            .collect();

        let mut negate = false;
        let mut scaling = BigUint::one();

        for column in 0..order {
            let pivot_index = (column..order)
                .find(|&row| !rows[row][column].is_zero())
                .ok_or(MathError::SingularMatrix)?;

            if pivot_index != column {
                rows.swap(pivot_index, column);
                negate = !negate;
            }

            let (upper, lower) = rows.split_at_mut(column + 1);
            let pivot_row = &upper[column];
            let pivot = &pivot_row[column];

            for row in lower.iter_mut().filter(|row| !row[column].is_zero()) {
                let factor = row[column].clone();
                for k in column..order {
                    let scaled = mul_mod(pivot, &row[k], prime);
                    let subtrahend = mul_mod(&factor, &pivot_row[k], prime);
                    row[k] = sub_mod(&scaled, &subtrahend, prime);
                }
                scaling = mul_mod(&scaling, pivot, prime);
            }
        }

        let diagonal = (0..order).fold(BigUint::one() % prime, |product, index| {
            mul_mod(&product, &rows[index][index], prime)
        });
        let unscale = inverse_mod(&scaling, prime).ok_or(MathError::NotInvertible)?;
        let determinant = mul_mod(&diagonal, &unscale, prime);

        if negate {
            Ok(neg_mod(&determinant, prime))
        } else {
            Ok(determinant)
        }
    }
}

#[cfg(test)]
mod tests {
    use num::{BigInt, FromPrimitive};
    use rand::thread_rng;

    use super::*;
    use crate::modular::{random_below, reduce_signed};

    fn big(value: u64) -> BigUint {
        BigUint::from_u64(value).unwrap()
    }

    fn matrix(rows: &[&[u64]]) -> SquareMatrix {
        SquareMatrix::from_rows(rows.iter().map(|row| row.iter().map(|v| big(*v)).collect()).collect()).unwrap()
    }

    /// Laplace expansion along the first row over the integers, used as a reference.
    fn laplace(matrix: &SquareMatrix) -> BigInt {
        if matrix.order() == 0 {
            return BigInt::one();
        }
        (0..matrix.order())
            .map(|column| {
                let term = BigInt::from(matrix.rows()[0][column].clone()) * laplace(&matrix.minor(0, column));
                if column % 2 == 0 {
                    term
                } else {
                    -term
                }
            })
            .sum()
    }

    #[test]
    fn test_two_by_two() {
        let prime = big(101);
        // 3 * 7 - 5 * 2 = 11
        assert_eq!(matrix(&[&[3, 5], &[2, 7]]).determinant_mod(&prime).unwrap(), big(11));
        // 2 * 3 - 9 * 4 = -30 = 71 mod 101
        assert_eq!(matrix(&[&[2, 9], &[4, 3]]).determinant_mod(&prime).unwrap(), big(71));
        // entries are reduced before elimination
        assert_eq!(matrix(&[&[104, 5], &[2, 209]]).determinant_mod(&prime).unwrap(), big(11));
    }

    #[test]
    fn test_two_by_two_large_prime() {
        let prime = (BigUint::one() << 89usize) - 1u32;
        let (a, b, c, d) = (
            big(618_970_019_642),
            big(690_137_449),
            big(562_111_000_123),
            big(999_999_999_989),
        );
        let m = SquareMatrix::from_rows(vec![vec![a.clone(), b.clone()], vec![c.clone(), d.clone()]]).unwrap();
        let expected = sub_mod(&((&a * &d) % &prime), &((&b * &c) % &prime), &prime);
        assert_eq!(m.determinant_mod(&prime).unwrap(), expected);
    }

    #[test]
    fn test_row_swap_flips_sign() {
        let prime = big(13);
        assert_eq!(matrix(&[&[0, 1], &[1, 0]]).determinant_mod(&prime).unwrap(), big(12));
        // two swaps cancel out
        assert_eq!(matrix(&[&[0, 1, 0], &[0, 0, 1], &[1, 0, 0]]).determinant_mod(&prime).unwrap(), big(1));
        assert_eq!(matrix(&[&[0, 0, 1], &[0, 1, 0], &[1, 0, 0]]).determinant_mod(&prime).unwrap(), big(12));
    }

    #[test]
    fn test_three_by_three() {
        // det = 2(0*1 - 4*2) - 3(1*1 - 4*5) + 1(1*2 - 0*5) = -16 + 57 + 2 = 43
        let m = matrix(&[&[2, 3, 1], &[1, 0, 4], &[5, 2, 1]]);
        assert_eq!(m.determinant_mod(&big(1009)).unwrap(), big(43));
        assert_eq!(m.determinant_mod(&big(7)).unwrap(), big(1));
    }

    #[test]
    fn test_singular() {
        let prime = big(97);
        assert_eq!(matrix(&[&[2, 4], &[1, 2]]).determinant_mod(&prime).unwrap(), big(0));
        assert_eq!(matrix(&[&[0, 4], &[0, 2]]).determinant_mod(&prime).unwrap(), big(0));
        // singular modulo the prime although the integer determinant is 97
        assert_eq!(matrix(&[&[97, 0], &[0, 1]]).determinant_mod(&prime).unwrap(), big(0));
        assert_eq!(
            matrix(&[&[2, 4], &[1, 2]]).solve_unknown_mod(0, &[big(1), big(1)], &prime),
            Err(MathError::SingularMatrix)
        );
    }

    #[test]
    fn test_random_matrices_against_laplace() {
        let mut rng = thread_rng();
        let prime = big(2_305_843_009_213_693_951);
        for order in 1..6 {
            let rows = (0..order)
                .map(|_| (0..order).map(|_| random_below(&mut rng, &prime)).collect())
                .collect();
            let m = SquareMatrix::from_rows(rows).unwrap();
            assert_eq!(m.determinant_mod(&prime).unwrap(), reduce_signed(&laplace(&m), &prime));
        }
    }

    #[test]
    fn test_cofactors() {
        let prime = big(1009);
        let m = matrix(&[&[2, 3, 1], &[1, 0, 4], &[5, 2, 1]]);
        // C_00 = 0*1 - 4*2 = -8, C_10 = -(3*1 - 1*2) = -1, C_20 = 3*4 - 1*0 = 12
        assert_eq!(
            m.cofactor_column_mod(0, &prime).unwrap(),
            vec![big(1001), big(1008), big(12)]
        );
        // C_12 = -(2*2 - 3*5) = 11
        assert_eq!(m.cofactor_mod(1, 2, &prime).unwrap(), big(11));
    }

    #[test]
    fn test_cramer() {
        let prime = big(1009);
        // 2x + 3y + z = 13, x + 4z = 21, 5x + 2y + z = 14
        let m = matrix(&[&[2, 3, 1], &[1, 0, 4], &[5, 2, 1]]);
        let solution = [big(1), big(2), big(5)];
        let rhs: Vec<BigUint> = m
            .rows()
            .iter()
            .map(|row| row.iter().zip(solution.iter()).map(|(a, x)| a * x).sum::<BigUint>() % &prime)
            .collect();
        for (column, expected) in solution.iter().enumerate() {
            assert_eq!(&m.solve_unknown_mod(column, &rhs, &prime).unwrap(), expected);
        }
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            SquareMatrix::from_rows(vec![vec![big(1), big(2)], vec![big(3)]]),
            Err(MathError::DimensionMismatch { expected: 2, found: 1 })
        );
        let m = matrix(&[&[1, 0], &[0, 1]]);
        assert_eq!(
            m.solve_unknown_mod(0, &[big(1)], &big(7)),
            Err(MathError::DimensionMismatch { expected: 2, found: 1 })
        );
        assert_eq!(
            SquareMatrix::from_rows(vec![]).unwrap().solve_unknown_mod(0, &[], &big(7)),
            Err(MathError::EmptySystem)
        );
    }
}
