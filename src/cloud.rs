//! Scene encoding: turning mapped columns into the point-cloud payload.
//!
//! One [`build_cloud`] call produces everything a replot hands to the
//! render backend, plus the visible-index → row-index mapping every
//! downstream component (picking, selection, output) relies on.

use glam::{Vec3, Vec4};

use crate::data::{Table, VarKind};
use crate::error::StrewError;
use crate::mapping::{self, AxisRanges};
use crate::selection::Selection;

/// Base point color when no color attribute is assigned (cyan).
const BASE_COLOR: Vec3 = Vec3::new(0.0, 1.0, 1.0);
/// Color of categorical cells with a missing value.
const MISSING_CATEGORY_COLOR: Vec3 = Vec3::new(0.5, 0.5, 0.5);
/// Size-unit divisor for compatibility mode (world-space primitives use
/// a different unit than pixel sprites).
const COMPAT_SIZE_DIVISOR: f32 = 30.0;
/// Halo size relative to the selected point.
const HALO_SIZE_FACTOR: f32 = 1.2;
/// Halo translucency.
const HALO_ALPHA: f32 = 0.6;

/// Attribute assignment for one plot: which columns drive position,
/// color, and size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotAxes {
    /// Column mapped to the x axis.
    pub x: Option<String>,
    /// Column mapped to the y axis.
    pub y: Option<String>,
    /// Column mapped to the z axis.
    pub z: Option<String>,
    /// Column mapped to point color.
    pub color: Option<String>,
    /// Column mapped to point size.
    pub size: Option<String>,
}

impl PlotAxes {
    /// Number of spatial axes with an attribute assigned.
    #[must_use]
    pub fn assigned_spatial(&self) -> usize {
        [&self.x, &self.y, &self.z]
            .iter()
            .filter(|a| a.is_some())
            .count()
    }

    /// All assigned attribute names, deduplicated, in x/y/z/color/size
    /// order (the tooltip row order).
    #[must_use]
    pub fn assigned_unique(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for attr in [&self.x, &self.y, &self.z, &self.color, &self.size] {
            if let Some(name) = attr.as_deref() {
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen
    }
}

/// Appearance parameters of one encode call.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudStyle {
    /// Base point size (slider units).
    pub point_size: f32,
    /// Point opacity in percent (10-100).
    pub opacity: u8,
    /// Whether points render as world-space primitives instead of
    /// pixel-sized sprites.
    pub compat_mode: bool,
}

impl Default for CloudStyle {
    fn default() -> Self {
        Self {
            point_size: 15.0,
            opacity: 100,
            compat_mode: true,
        }
    }
}

impl CloudStyle {
    /// Effective base size in the active render mode's unit.
    ///
    /// Compatibility mode draws geometric primitives whose size unit is
    /// roughly 1/30 of a sprite pixel, so the slider value is converted
    /// here rather than at the render boundary.
    #[must_use]
    pub fn base_size(&self) -> f32 {
        if self.compat_mode {
            self.point_size / COMPAT_SIZE_DIVISOR
        } else {
            self.point_size
        }
    }

    /// Alpha channel value derived from the opacity percentage.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        f32::from(self.opacity) / 100.0
    }
}

/// One rendering frame's worth of visible data.
///
/// All four sequences are index-aligned; `row_index[i]` is the source
/// row behind visible point `i`, ascending. Rebuilt wholesale on every
/// replot and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// World-space positions in the normalized scene cube.
    pub positions: Vec<Vec3>,
    /// Per-point RGBA colors.
    pub colors: Vec<Vec4>,
    /// Per-point sizes in the active render mode's unit.
    pub sizes: Vec<f32>,
    /// Visible-point slot → source row index.
    pub row_index: Vec<usize>,
}

impl PointCloud {
    /// Number of visible points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the cloud holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Mean of all positions; the camera centers here after a replot.
    #[must_use]
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        self.positions.iter().sum::<Vec3>() / self.positions.len() as f32
    }

    /// Positions as a flat `x y z` float slice for backend upload.
    #[must_use]
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat `r g b a` float slice for backend upload.
    #[must_use]
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Encode the visible point cloud for the current attribute assignment.
///
/// Rows where any spatial axis is non-finite are dropped; the surviving
/// rows keep their relative order. The returned [`AxisRanges`] feed the
/// tick labels.
///
/// # Errors
///
/// [`StrewError::NoValidPoints`] when the combined validity mask selects
/// zero rows, [`StrewError::ColumnRead`] when a column cannot be read.
pub fn build_cloud<T: Table + ?Sized>(
    table: &T,
    axes: &PlotAxes,
    style: &CloudStyle,
) -> Result<(PointCloud, AxisRanges), StrewError> {
    let mx = mapping::map_column(table, axes.x.as_deref())?;
    let my = mapping::map_column(table, axes.y.as_deref())?;
    let mz = mapping::map_column(table, axes.z.as_deref())?;
    let ranges = AxisRanges {
        x: mx.range,
        y: my.range,
        z: mz.range,
    };

    let rows: Vec<usize> = (0..table.n_rows())
        .filter(|&i| mx.valid[i] && my.valid[i] && mz.valid[i])
        .collect();
    if rows.is_empty() {
        return Err(StrewError::NoValidPoints);
    }

    let positions = rows
        .iter()
        .map(|&i| Vec3::new(mx.values[i], my.values[i], mz.values[i]))
        .collect();
    let colors = encode_colors(table, axes.color.as_deref(), &rows, style)?;
    let sizes = encode_sizes(table, axes.size.as_deref(), &rows, style)?;

    Ok((
        PointCloud {
            positions,
            colors,
            sizes,
            row_index: rows,
        },
        ranges,
    ))
}

/// Per-point colors for the visible rows.
///
/// Base color is cyan. A categorical attribute looks rows up in its
/// palette (out-of-range indices clamp to the last entry, missing values
/// go gray); a continuous attribute maps min-max normalized finite
/// values onto a red-blue gradient. Alpha is overwritten for every point
/// afterwards.
fn encode_colors<T: Table + ?Sized>(
    table: &T,
    attr: Option<&str>,
    rows: &[usize],
    style: &CloudStyle,
) -> Result<Vec<Vec4>, StrewError> {
    let alpha = style.alpha();
    let mut colors = vec![BASE_COLOR.extend(alpha); rows.len()];

    if let Some(name) = attr {
        let variable = table
            .variable(name)
            .ok_or_else(|| StrewError::ColumnRead(name.to_owned()))?;
        let column = table.column(name)?;
        let cells: Vec<f32> = rows
            .iter()
            .map(|&r| column.get(r).copied().unwrap_or(f32::NAN))
            .collect();

        match &variable.kind {
            VarKind::Categorical { palette, .. } => {
                apply_palette(&mut colors, &cells, palette);
            }
            VarKind::Continuous => {
                apply_gradient(&mut colors, &cells);
            }
        }

        for c in &mut colors {
            c.w = alpha;
        }
    }

    Ok(colors)
}

/// Categorical coloring: palette lookup by category index.
fn apply_palette(colors: &mut [Vec4], cells: &[f32], palette: &[[u8; 3]]) {
    for (color, &cell) in colors.iter_mut().zip(cells) {
        let rgb = if cell.is_nan() {
            MISSING_CATEGORY_COLOR
        } else if let Some(last) = palette.len().checked_sub(1) {
            let idx = (cell.max(0.0) as usize).min(last);
            let [r, g, b] = palette[idx];
            Vec3::new(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            )
        } else {
            MISSING_CATEGORY_COLOR
        };
        *color = rgb.extend(color.w);
    }
}

/// Continuous coloring: min-max normalize finite cells onto the
/// red-blue gradient `(t, 0, 1-t)`; non-finite cells keep the base
/// color.
fn apply_gradient(colors: &mut [Vec4], cells: &[f32]) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in cells.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return;
    }

    for (color, &cell) in colors.iter_mut().zip(cells) {
        if cell.is_finite() {
            let t = if max > min { (cell - min) / (max - min) } else { 0.0 };
            *color = Vec4::new(t, 0.0, 1.0 - t, color.w);
        }
    }
}

/// Per-point sizes: base size, optionally modulated by a size attribute
/// into `base * [0.5, 2.0]`. Degenerate columns and non-finite cells
/// keep the base size.
fn encode_sizes<T: Table + ?Sized>(
    table: &T,
    attr: Option<&str>,
    rows: &[usize],
    style: &CloudStyle,
) -> Result<Vec<f32>, StrewError> {
    let base = style.base_size();
    let mut sizes = vec![base; rows.len()];

    let Some(name) = attr else {
        return Ok(sizes);
    };
    let column = table.column(name)?;
    let cells: Vec<f32> = rows
        .iter()
        .map(|&r| column.get(r).copied().unwrap_or(f32::NAN))
        .collect();

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in cells.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min < max {
        for (size, &cell) in sizes.iter_mut().zip(&cells) {
            if cell.is_finite() {
                let norm = (cell - min) / (max - min);
                *size = base * (0.5 + 1.5 * norm);
            }
        }
    }

    Ok(sizes)
}

/// Build the two-layer selection highlight payload.
///
/// Layer one is an oversized, semi-transparent halo in a fixed glow
/// color (purple on a white background, cyan otherwise); layer two
/// repeats the selected points with their original color and size so
/// the encoding stays readable underneath the halo. Returns `None` when
/// no selected row is visible in the cloud.
#[must_use]
pub fn highlight_cloud(
    cloud: &PointCloud,
    selection: &Selection,
    white_background: bool,
) -> Option<PointCloud> {
    let picked: Vec<usize> = (0..cloud.len())
        .filter(|&i| selection.contains(cloud.row_index[i]))
        .collect();
    if picked.is_empty() {
        return None;
    }

    let glow = if white_background {
        Vec4::new(0.5, 0.0, 1.0, HALO_ALPHA)
    } else {
        Vec4::new(0.0, 1.0, 1.0, HALO_ALPHA)
    };

    let mut positions = Vec::with_capacity(picked.len() * 2);
    let mut colors = Vec::with_capacity(picked.len() * 2);
    let mut sizes = Vec::with_capacity(picked.len() * 2);
    let mut row_index = Vec::with_capacity(picked.len() * 2);

    // Halo layer first so the core layer draws over it.
    for &i in &picked {
        positions.push(cloud.positions[i]);
        colors.push(glow);
        sizes.push(cloud.sizes[i] * HALO_SIZE_FACTOR);
        row_index.push(cloud.row_index[i]);
    }
    for &i in &picked {
        positions.push(cloud.positions[i]);
        colors.push(cloud.colors[i]);
        sizes.push(cloud.sizes[i]);
        row_index.push(cloud.row_index[i]);
    }

    Some(PointCloud {
        positions,
        colors,
        sizes,
        row_index,
    })
}
