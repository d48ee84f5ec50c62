use rand::Rng;

use super::Re;
use crate::Sample;

/// Nonparametric bootstrap: resampling with replacement at the original size.
///
/// The generator is cloned into every iterator produced by [`Re::re`], so two
/// iterators built from the same `Bootstrap` replay the same draws.
#[derive(Clone, Copy, Default, Debug)]
pub struct Bootstrap<R: Rng> {
    /// Initial generator state shared by every iterator.
    pub rng: R,
}

impl<R: Rng> Bootstrap<R> {
    /// A bootstrap scheme starting from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Clone> Bootstrap<R> {
    /// Paired resamples of two borrowed groups; same stream as `re(&(a, b))`.
    pub fn pairs<'a, T: Copy>(&self, a: &'a Sample<T>, b: &'a Sample<T>) -> PairedBootstrapIter<'a, T, R> {
        PairedBootstrapIter {
            a: &a.data,
            b: &b.data,
            rng: self.rng.clone(),
        }
    }
}

/// Fills `buffer` with `data.len()` values drawn uniformly with replacement.
#[inline]
fn draw_into<T: Copy, R: Rng>(rng: &mut R, data: &[T], buffer: &mut Vec<T>) {
    let n = data.len();
    buffer.clear();
    buffer.reserve_exact(n);
    buffer.extend((0..n).filter_map(|_| data.get(rng.gen_range(0..n)).copied()));
}

impl<T: Copy, R: Rng + Clone> Re<Sample<T>> for Bootstrap<R> {
    type Item = Sample<T>;

    fn re(&self, sample: &Sample<T>) -> impl Iterator<Item = Self::Item> {
        BootstrapIter::new(&sample.data, self.rng.clone())
    }
}

/// Two groups resampled independently from one generator stream.
///
/// Each round draws all of group A, then all of group B, so the whole sequence
/// is determined by the generator's initial state.
impl<T: Copy, R: Rng + Clone> Re<(Sample<T>, Sample<T>)> for Bootstrap<R> {
    type Item = (Sample<T>, Sample<T>);

    fn re(&self, (a, b): &(Sample<T>, Sample<T>)) -> impl Iterator<Item = Self::Item> {
        self.pairs(a, b)
    }
}

/// Endless resamples of one sample; empty input yields nothing.
pub struct BootstrapIter<'a, T, R: Rng> {
    data: &'a [T],
    rng: R,
}

impl<'a, T: Copy, R: Rng> BootstrapIter<'a, T, R> {
    fn new(data: &'a [T], rng: R) -> Self {
        Self { data, rng }
    }
}

impl<T: Copy, R: Rng> Iterator for BootstrapIter<'_, T, R> {
    type Item = Sample<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }
        let mut buffer = Vec::new();
        draw_into(&mut self.rng, self.data, &mut buffer);
        Some(Sample::new(buffer))
    }
}

/// Endless `(a, b)` resamples; stops at once if either group is empty.
pub struct PairedBootstrapIter<'a, T, R: Rng> {
    a: &'a [T],
    b: &'a [T],
    rng: R,
}

impl<T: Copy, R: Rng> Iterator for PairedBootstrapIter<'_, T, R> {
    type Item = (Sample<T>, Sample<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.a.is_empty() || self.b.is_empty() {
            return None;
        }
        let mut left = Vec::new();
        let mut right = Vec::new();
        draw_into(&mut self.rng, self.a, &mut left);
        draw_into(&mut self.rng, self.b, &mut right);
        Some((Sample::new(left), Sample::new(right)))
    }
}
