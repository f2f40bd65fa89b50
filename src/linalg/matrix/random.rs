/* ************************************************************************ **
** This file is part of geomx, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use super::Matrix;
use crate::scalar::Semiring;

use rand::{Rng, SeedableRng, StdRng};

impl<T: Semiring> Matrix<T> {
    /// Overwrite every element with a uniform sample from `[lo, hi)`.
    ///
    /// The same seed always produces the same matrix. Samples are drawn as
    /// `f64` and converted, so integer matrices are truncated toward zero.
    pub fn set_random(&mut self, seed: usize, (lo, hi): (T, T))
    {
        let mut rng: StdRng = SeedableRng::from_seed(&[seed][..]);
        self.fill_random_with(&mut rng, (lo, hi));
    }

    pub fn fill_random_with<R: Rng>(&mut self, rng: &mut R, (lo, hi): (T, T))
    {
        let (lo, hi) = (lo.to_f64(), hi.to_f64());
        for x in &mut self.data {
            let alpha: f64 = rng.gen();
            *x = T::from_f64(lo + (hi - lo) * alpha);
        }
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;

    #[test]
    fn seeded_fill_is_reproducible() {
        let mut a = Matrix::<f64>::new(4, 5);
        let mut b = Matrix::<f64>::new(4, 5);
        a.set_random(42, (-2.0, 3.0));
        b.set_random(42, (-2.0, 3.0));
        assert_eq!(a.row_major_data(), b.row_major_data());
        assert!(a.row_major_data().iter().all(|&x| -2.0 <= x && x < 3.0));

        b.set_random(43, (-2.0, 3.0));
        assert!(a.row_major_data() != b.row_major_data());
    }

    #[test]
    fn integer_fill_stays_in_range() {
        let mut m = Matrix::<u32>::new(10, 10);
        m.set_random(7, (3, 9));
        assert!(m.row_major_data().iter().all(|&x| 3 <= x && x < 9));
    }
}
