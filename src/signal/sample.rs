//! Realization sampling for Monte-Carlo comparisons.
//!
//! A realization is one precise signal consistent with an [`IntervalSignal`]:
//! every sample is drawn independently and uniformly from its own interval.
//! Draws are exposed as a finite iterator borrowing a caller-supplied RNG, so the
//! sequence can be restarted by asking for a new iterator and reproduced by
//! seeding the RNG (`StdRng::seed_from_u64`).

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::math::IntervalNumber;
use crate::signal::IntervalSignal;

/// Per-sample distribution: fixed for degenerate intervals, uniform otherwise.
#[derive(Debug, Clone)]
enum SampleLaw {
    Fixed(f64),
    Uniform(Uniform<f64>),
    /// `mid + radius·u` with `u ~ U[-1, 1]`, for intervals whose width overflows `f64`.
    Scaled {
        mid: f64,
        radius: f64,
        lo: f64,
        hi: f64,
        unit: Uniform<f64>,
    },
}

impl SampleLaw {
    fn for_interval(iv: &IntervalNumber) -> Self {
        if iv.is_degenerate() {
            SampleLaw::Fixed(iv.lo())
        } else if iv.width().is_finite() {
            SampleLaw::Uniform(Uniform::new_inclusive(iv.lo(), iv.hi()))
        } else {
            SampleLaw::Scaled {
                mid: iv.mid(),
                radius: iv.radius(),
                lo: iv.lo(),
                hi: iv.hi(),
                unit: Uniform::new_inclusive(-1.0, 1.0),
            }
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            SampleLaw::Fixed(x) => *x,
            SampleLaw::Uniform(u) => u.sample(rng),
            SampleLaw::Scaled {
                mid,
                radius,
                lo,
                hi,
                unit,
            } => (mid + radius * unit.sample(rng)).clamp(*lo, *hi),
        }
    }
}

/// Finite iterator of independent realizations.
pub struct Realizations<'a, R: Rng + ?Sized> {
    laws: Vec<SampleLaw>,
    rng: &'a mut R,
    remaining: usize,
}

impl<R: Rng + ?Sized> Iterator for Realizations<'_, R> {
    type Item = Vec<f64>;

    fn next(&mut self) -> Option<Vec<f64>> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let rng = &mut *self.rng;
        Some(self.laws.iter().map(|law| law.draw(rng)).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for Realizations<'_, R> {}

impl IntervalSignal {
    /// Lazily draw `count` independent realizations using `rng`.
    pub fn realizations<'a, R: Rng + ?Sized>(&self, rng: &'a mut R, count: usize) -> Realizations<'a, R> {
        let laws = self.iter().map(SampleLaw::for_interval).collect();

        Realizations {
            laws,
            rng,
            remaining: count,
        }
    }

    /// Draw a single realization.
    pub fn draw_realization<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.realizations(rng, 1).next().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn realizations_stay_inside_their_intervals() {
        let signal = IntervalSignal::from_bounds(&[-1.0, 0.0, 2.0, 5.0], &[1.0, 0.0, 2.5, 5.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let draws: Vec<Vec<f64>> = signal.realizations(&mut rng, 50).collect();
        assert_eq!(draws.len(), 50);
        for draw in &draws {
            assert!(signal.admits(draw));
            assert_eq!(draw[1], 0.0);
            assert_eq!(draw[3], 5.0);
        }
    }

    #[test]
    fn intervals_wider_than_f64_range_still_sample() {
        let wide = IntervalNumber::new(-1e308, 1e308).unwrap();
        let signal = IntervalSignal::new(vec![wide; 4]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let draws: Vec<Vec<f64>> = signal.realizations(&mut rng, 3).collect();
        assert_eq!(draws.len(), 3);
        for draw in &draws {
            assert!(draw.iter().all(|x| x.is_finite()));
            assert!(signal.admits(draw));
        }
        // Draws spread over the interval rather than collapsing onto the midpoint.
        assert!(draws.iter().flatten().any(|x| x.abs() > 1e300));
    }

    #[test]
    fn same_seed_reproduces_the_sequence() {
        let signal = IntervalSignal::from_bounds(&[0.0, 1.0], &[1.0, 2.0]).unwrap();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first: Vec<Vec<f64>> = signal.realizations(&mut a, 5).collect();
        let second: Vec<Vec<f64>> = signal.realizations(&mut b, 5).collect();
        assert_eq!(first, second);

        // A restarted iterator on the same RNG continues with fresh draws.
        let third: Vec<Vec<f64>> = signal.realizations(&mut a, 5).collect();
        assert_ne!(first, third);
    }

    #[test]
    fn iterator_reports_exact_length() {
        let signal = IntervalSignal::from_bounds(&[0.0], &[1.0]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut it = signal.realizations(&mut rng, 3);
        assert_eq!(it.len(), 3);
        it.next();
        assert_eq!(it.len(), 2);
        assert_eq!(signal.draw_realization(&mut rng).len(), 1);
    }
}
