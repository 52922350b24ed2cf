//! Attribute-to-geometry mapping.
//!
//! A named column is rescaled into the fixed normalized cube the scene
//! lives in ([-10, 10] per axis); the raw value range is kept per axis
//! so tick labels can be translated back into real units.

use crate::data::Table;
use crate::error::StrewError;

/// Half-width of the normalized scene cube: mapped coordinates span
/// `[-AXIS_EXTENT, AXIS_EXTENT]`.
pub const AXIS_EXTENT: f32 = 10.0;

/// One of the three spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Depth axis.
    Y,
    /// Vertical axis.
    Z,
}

impl Axis {
    /// All axes, in x/y/z order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];
}

/// Raw (pre-normalization) value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    /// Smallest finite value of the mapped column.
    pub min: f32,
    /// Largest finite value of the mapped column.
    pub max: f32,
}

impl Default for AxisRange {
    /// Range used when the axis has no attribute (or no finite values).
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl AxisRange {
    /// Translate a normalized coordinate in `[-AXIS_EXTENT, AXIS_EXTENT]`
    /// back into raw units. Inverse of the rescale in [`map_column`].
    #[must_use]
    pub fn denormalize(&self, norm: f32) -> f32 {
        (norm + AXIS_EXTENT) / (2.0 * AXIS_EXTENT) * (self.max - self.min)
            + self.min
    }
}

/// Per-axis raw ranges, recomputed on every replot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisRanges {
    /// Raw range behind the x axis.
    pub x: AxisRange,
    /// Raw range behind the y axis.
    pub y: AxisRange,
    /// Raw range behind the z axis.
    pub z: AxisRange,
}

impl AxisRanges {
    /// Range for one axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Result of mapping one column onto an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisMapping {
    /// Rescaled coordinates, one per table row (invalid rows hold
    /// whatever the rescale produced — they are masked, never read).
    pub values: Vec<f32>,
    /// Per-row validity: `false` where the raw value was non-finite.
    pub valid: Vec<bool>,
    /// Raw value range of the finite entries.
    pub range: AxisRange,
}

/// Map a column onto an axis.
///
/// With no attribute assigned every row sits at coordinate 0 and is
/// valid. Otherwise finite values are linearly rescaled into
/// `[-AXIS_EXTENT, AXIS_EXTENT]` by their min/max; a constant column
/// collapses to coordinate 0 (translated, not divided — the degenerate
/// policy the widget has always had); a column with no finite values is
/// returned unscaled with an all-false mask.
///
/// # Errors
///
/// Returns [`StrewError::ColumnRead`] when the column cannot be read.
pub fn map_column<T: Table + ?Sized>(
    table: &T,
    attr: Option<&str>,
) -> Result<AxisMapping, StrewError> {
    let Some(name) = attr else {
        return Ok(AxisMapping {
            values: vec![0.0; table.n_rows()],
            valid: vec![true; table.n_rows()],
            range: AxisRange::default(),
        });
    };

    let mut values = table.column(name)?;
    let valid: Vec<bool> = values.iter().map(|v| v.is_finite()).collect();

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for (&v, &ok) in values.iter().zip(&valid) {
        if ok {
            min = min.min(v);
            max = max.max(v);
        }
    }

    if min > max {
        // No finite values at all; the caller masks every row out.
        return Ok(AxisMapping {
            values,
            valid,
            range: AxisRange::default(),
        });
    }

    if max > min {
        let span = max - min;
        for v in &mut values {
            *v = (*v - min) / span * (2.0 * AXIS_EXTENT) - AXIS_EXTENT;
        }
    } else {
        // Constant column: translate to 0.
        for v in &mut values {
            *v -= min;
        }
    }

    Ok(AxisMapping {
        values,
        valid,
        range: AxisRange { min, max },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemTable;

    fn table_with(name: &str, values: Vec<f32>) -> MemTable {
        let mut t = MemTable::new();
        t.push_continuous(name, values).unwrap();
        t
    }

    #[test]
    fn unset_attribute_maps_to_origin() {
        let t = table_with("a", vec![1.0, 2.0, 3.0]);
        let m = map_column(&t, None).unwrap();
        assert_eq!(m.values, vec![0.0, 0.0, 0.0]);
        assert!(m.valid.iter().all(|&v| v));
        assert_eq!(m.range, AxisRange::default());
    }

    #[test]
    fn rescale_hits_cube_corners() {
        let t = table_with("a", vec![0.0, 5.0, 10.0]);
        let m = map_column(&t, Some("a")).unwrap();
        assert_eq!(m.values, vec![-10.0, 0.0, 10.0]);
        assert_eq!(m.range, AxisRange { min: 0.0, max: 10.0 });
    }

    #[test]
    fn mapped_values_stay_in_bounds() {
        let t = table_with("a", vec![3.0, -7.5, 12.25, 0.5, 3.0]);
        let m = map_column(&t, Some("a")).unwrap();
        for &v in &m.values {
            assert!((-10.0..=10.0).contains(&v), "{v} out of bounds");
        }
    }

    #[test]
    fn constant_column_translates_to_zero() {
        let t = table_with("a", vec![4.2, 4.2, 4.2]);
        let m = map_column(&t, Some("a")).unwrap();
        assert_eq!(m.values, vec![0.0, 0.0, 0.0]);
        assert_eq!(m.range, AxisRange { min: 4.2, max: 4.2 });
    }

    #[test]
    fn non_finite_values_are_masked_not_ranged() {
        let t = table_with("a", vec![1.0, f32::NAN, 3.0, f32::INFINITY]);
        let m = map_column(&t, Some("a")).unwrap();
        assert_eq!(m.valid, vec![true, false, true, false]);
        assert_eq!(m.range, AxisRange { min: 1.0, max: 3.0 });
        assert_eq!(m.values[0], -10.0);
        assert_eq!(m.values[2], 10.0);
    }

    #[test]
    fn all_invalid_column_keeps_raw_values() {
        let t = table_with("a", vec![f32::NAN, f32::NAN]);
        let m = map_column(&t, Some("a")).unwrap();
        assert!(m.valid.iter().all(|&v| !v));
        assert_eq!(m.range, AxisRange::default());
        assert!(m.values.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn missing_column_is_a_read_error() {
        let t = table_with("a", vec![1.0]);
        assert!(matches!(
            map_column(&t, Some("b")),
            Err(StrewError::ColumnRead(_))
        ));
    }

    #[test]
    fn denormalize_inverts_the_rescale() {
        let range = AxisRange { min: 2.0, max: 8.0 };
        assert_eq!(range.denormalize(-10.0), 2.0);
        assert_eq!(range.denormalize(10.0), 8.0);
        assert_eq!(range.denormalize(0.0), 5.0);
    }
}
