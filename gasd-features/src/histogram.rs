//! Dense multi-dimensional histograms with interpolated accumulation
//!
//! Bins are stored in a flat row-major buffer: the last axis varies fastest.
//! Continuous bin coordinates are mapped to integer bins either by flooring
//! (nearest) or by a linear split between the two closest bin centres. Indices
//! outside the grid are clamped back onto the border, except on circular axes
//! where they wrap around, so a sample never loses weight.

/// Maximum number of axes a [`GridHistogram`] supports
pub const MAX_AXES: usize = 4;

/// Row-major strides for the given dimensions
pub fn strides_for(dims: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; dims.len()];
    for axis in (0..dims.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * dims[axis + 1];
    }
    strides
}

/// Flat buffer position of a bin index tuple
#[inline]
pub fn flat_index(strides: &[usize], index: &[usize]) -> usize {
    debug_assert_eq!(strides.len(), index.len());
    strides.iter().zip(index).map(|(s, i)| s * i).sum()
}

/// Boundary behavior of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisBoundary {
    /// Out of range indices are clamped onto the first or last bin.
    Clamp,
    /// Out of range indices wrap around (angles, hue).
    Wrap,
}

impl AxisBoundary {
    #[inline]
    fn resolve(self, bin: i64, dim: usize) -> usize {
        let dim = dim as i64;
        match self {
            AxisBoundary::Clamp => bin.clamp(0, dim - 1) as usize,
            AxisBoundary::Wrap => bin.rem_euclid(dim) as usize,
        }
    }
}

/// A dense histogram over up to [`MAX_AXES`] axes
#[derive(Debug, Clone, PartialEq)]
pub struct GridHistogram {
    dims: Vec<usize>,
    strides: Vec<usize>,
    boundaries: Vec<AxisBoundary>,
    bins: Vec<f32>,
}

impl GridHistogram {
    /// Create a zeroed histogram with clamped axes
    ///
    /// # Panics
    /// If `dims` is empty, longer than [`MAX_AXES`], or contains a zero.
    pub fn new(dims: &[usize]) -> Self {
        assert!(
            !dims.is_empty() && dims.len() <= MAX_AXES,
            "histogram must have between 1 and {} axes",
            MAX_AXES
        );
        assert!(dims.iter().all(|&d| d > 0), "histogram dimensions must be positive");

        let len = dims.iter().product();
        Self {
            dims: dims.to_vec(),
            strides: strides_for(dims),
            boundaries: vec![AxisBoundary::Clamp; dims.len()],
            bins: vec![0.0; len],
        }
    }

    /// Set the boundary behavior of one axis
    pub fn with_boundary(mut self, axis: usize, boundary: AxisBoundary) -> Self {
        self.boundaries[axis] = boundary;
        self
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The flat bin buffer
    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    /// Value stored at a bin index tuple
    pub fn get(&self, index: &[usize]) -> f32 {
        self.bins[flat_index(&self.strides, index)]
    }

    /// Sum of all bins
    pub fn total(&self) -> f32 {
        self.bins.iter().sum()
    }

    /// Add `weight` at continuous bin coordinates
    ///
    /// `coords[a]` lies in `[0, dims[a])` for in-range samples; bin `k` covers
    /// `[k, k + 1)`. Axes with `interpolate[a]` set share the weight between the
    /// two bins whose centres (`k + 0.5`) surround the coordinate, the others
    /// use the bin the coordinate falls into. The whole weight is always
    /// deposited.
    pub fn add(&mut self, coords: &[f32], interpolate: &[bool], weight: f32) {
        let axes = self.dims.len();
        debug_assert_eq!(coords.len(), axes);
        debug_assert_eq!(interpolate.len(), axes);

        // up to two (bin, fraction) contributions per axis
        let mut lower = [0usize; MAX_AXES];
        let mut upper = [0usize; MAX_AXES];
        let mut frac = [0.0f32; MAX_AXES];

        for a in 0..axes {
            let boundary = self.boundaries[a];
            if interpolate[a] {
                let u = coords[a] - 0.5;
                let base = u.floor();
                frac[a] = u - base;
                let base = base as i64;
                lower[a] = boundary.resolve(base, self.dims[a]);
                upper[a] = boundary.resolve(base + 1, self.dims[a]);
            } else {
                let bin = boundary.resolve(coords[a].floor() as i64, self.dims[a]);
                lower[a] = bin;
                upper[a] = bin;
            }
        }

        // split the weight axis by axis, keeping each split exact: w = lo + hi
        let mut cells = [(0usize, 0.0f32); 1 << MAX_AXES];
        cells[0] = (0, weight);
        let mut count = 1;

        for a in 0..axes {
            let stride = self.strides[a];
            if interpolate[a] {
                for c in 0..count {
                    let (offset, w) = cells[c];
                    let hi = w * frac[a];
                    let lo = w - hi;
                    cells[c] = (offset + lower[a] * stride, lo);
                    cells[c + count] = (offset + upper[a] * stride, hi);
                }
                count *= 2;
            } else {
                for cell in cells.iter_mut().take(count) {
                    cell.0 += lower[a] * stride;
                }
            }
        }

        for &(index, w) in cells.iter().take(count) {
            self.bins[index] += w;
        }
    }

    /// Add `weight` to the bin each coordinate falls into
    pub fn add_nearest(&mut self, coords: &[f32], weight: f32) {
        let interpolate = [false; MAX_AXES];
        self.add(coords, &interpolate[..coords.len()], weight);
    }

    /// Rescale all bins so they sum to `target`
    ///
    /// An empty (all zero) histogram is left untouched.
    pub fn normalize(&mut self, target: f32) {
        let total: f64 = self.bins.iter().map(|&b| b as f64).sum();
        if total <= 0.0 {
            return;
        }

        let scale = target as f64 / total;
        for bin in &mut self.bins {
            *bin = (*bin as f64 * scale) as f32;
        }
    }

    /// Consume the histogram, returning the flat bin buffer
    pub fn into_vec(self) -> Vec<f32> {
        self.bins
    }
}
