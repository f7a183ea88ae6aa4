//! Uniform sample grids.

/// Returns `count` evenly spaced values over `[start, end]`, both ends included.
///
/// The last value is pinned to `end` exactly so accumulated rounding never
/// pushes the grid past its bound. A `count` of zero gives an empty grid and a
/// `count` of one gives `[start]`.
///
/// # Example
///
/// ```rust
/// use kinematics::linspace;
///
/// let t = linspace(0.0, 4.5, 10);
/// assert_eq!(t.len(), 10);
/// assert_eq!(t[0], 0.0);
/// assert_eq!(t[9], 4.5);
/// ```
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = end;
            values
        }
    }
}
