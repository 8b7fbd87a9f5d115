use smallvec::SmallVec;
use trellis_ui_layout::{
    Alignment, Constraints, IntPx, IntrinsicKind, IntrinsicScope, LayoutError, MeasurePolicy,
    MeasureResult, MeasureScope, Measurable, Placeable, Placement, Position, Size,
};

/// Width of a column that does not take part in sharing the remaining space.
#[derive(Clone, Debug, PartialEq)]
pub enum InflexibleWidth {
    /// As wide as the widest cell measured with loose constraints.
    Wrap,
    /// The largest min intrinsic width of the column's cells.
    MinIntrinsic,
    /// The largest max intrinsic width of the column's cells.
    MaxIntrinsic,
    Fixed(IntPx),
    /// A fraction of the table's bounded max width; zero when unbounded.
    Fraction(f32),
    Min(Box<InflexibleWidth>, Box<InflexibleWidth>),
    Max(Box<InflexibleWidth>, Box<InflexibleWidth>),
}

impl InflexibleWidth {
    pub fn min(a: InflexibleWidth, b: InflexibleWidth) -> Self {
        InflexibleWidth::Min(Box::new(a), Box::new(b))
    }

    pub fn max(a: InflexibleWidth, b: InflexibleWidth) -> Self {
        InflexibleWidth::Max(Box::new(a), Box::new(b))
    }

    /// Turns the width into the base of a flexible column.
    pub fn flexible(self, weight: f32) -> TableColumnWidth {
        TableColumnWidth::Flexible { weight, base: self }
    }

    fn resolve(&self, cells: &dyn Fn(IntrinsicKind) -> IntPx, max_width: IntPx) -> IntPx {
        match self {
            InflexibleWidth::Wrap | InflexibleWidth::MaxIntrinsic => {
                cells(IntrinsicKind::MaxWidth(IntPx::INFINITY))
            }
            InflexibleWidth::MinIntrinsic => cells(IntrinsicKind::MinWidth(IntPx::INFINITY)),
            InflexibleWidth::Fixed(width) => *width,
            InflexibleWidth::Fraction(fraction) => {
                if max_width.is_finite() {
                    max_width * *fraction
                } else {
                    IntPx::ZERO
                }
            }
            InflexibleWidth::Min(a, b) => {
                a.resolve(cells, max_width).min(b.resolve(cells, max_width))
            }
            InflexibleWidth::Max(a, b) => {
                a.resolve(cells, max_width).max(b.resolve(cells, max_width))
            }
        }
    }
}

/// Sizing rule for one table column.
#[derive(Clone, Debug, PartialEq)]
pub enum TableColumnWidth {
    Inflexible(InflexibleWidth),
    /// `base` plus a `weight`ed share of the bounded width the other columns
    /// leave over.
    Flexible { weight: f32, base: InflexibleWidth },
}

impl TableColumnWidth {
    pub fn flex(weight: f32) -> Self {
        TableColumnWidth::Flexible {
            weight,
            base: InflexibleWidth::Fixed(IntPx::ZERO),
        }
    }

    pub fn wrap() -> Self {
        TableColumnWidth::Inflexible(InflexibleWidth::Wrap)
    }

    pub fn fixed(width: i32) -> Self {
        TableColumnWidth::Inflexible(InflexibleWidth::Fixed(IntPx(width)))
    }

    pub fn fraction(fraction: f32) -> Self {
        TableColumnWidth::Inflexible(InflexibleWidth::Fraction(fraction))
    }

    fn weight(&self) -> f32 {
        match self {
            TableColumnWidth::Flexible { weight, .. } => weight.max(0.0),
            TableColumnWidth::Inflexible(_) => 0.0,
        }
    }

    fn base(&self) -> &InflexibleWidth {
        match self {
            TableColumnWidth::Inflexible(width) => width,
            TableColumnWidth::Flexible { base, .. } => base,
        }
    }
}

impl Default for TableColumnWidth {
    fn default() -> Self {
        TableColumnWidth::flex(1.0)
    }
}

/// Grid of cells laid out row-major, `columns` per row.
///
/// Column widths are resolved first; every row is then as tall as its tallest
/// cell and cells are aligned inside their slot by `cell_alignment`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableMeasurePolicy {
    pub columns: usize,
    /// Width rule per column; columns past the end use the default flexible width.
    pub column_widths: Vec<TableColumnWidth>,
    pub cell_alignment: Alignment,
}

impl TableMeasurePolicy {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            column_widths: Vec::new(),
            cell_alignment: Alignment::TOP_START,
        }
    }

    pub fn with_column_widths(
        mut self,
        widths: impl IntoIterator<Item = TableColumnWidth>,
    ) -> Self {
        self.column_widths = widths.into_iter().collect();
        self
    }

    pub fn with_cell_alignment(mut self, alignment: Alignment) -> Self {
        self.cell_alignment = alignment;
        self
    }

    fn column_width(&self, column: usize) -> TableColumnWidth {
        self.column_widths.get(column).cloned().unwrap_or_default()
    }

    fn column_count(&self) -> usize {
        self.columns.max(1)
    }

    /// Resolves every column's width. `wrapped` holds widths already known from
    /// measuring a top-level `Wrap` column; `cells` answers intrinsic queries
    /// over a column's cells.
    fn resolve_widths(
        &self,
        max_width: IntPx,
        wrapped: &[Option<IntPx>],
        cells: &dyn Fn(usize, IntrinsicKind) -> IntPx,
    ) -> SmallVec<[IntPx; 8]> {
        let columns = self.column_count();
        let mut widths: SmallVec<[IntPx; 8]> = SmallVec::with_capacity(columns);
        let mut total_weight = 0.0f32;
        for column in 0..columns {
            let declared = self.column_width(column);
            total_weight += declared.weight();
            let width = match wrapped.get(column).copied().flatten() {
                Some(width) => width,
                None => declared
                    .base()
                    .resolve(&|kind| cells(column, kind), max_width),
            };
            widths.push(width.coerce_at_least(IntPx::ZERO));
        }
        if total_weight > 0.0 && max_width.is_finite() {
            let used = widths.iter().fold(IntPx::ZERO, |sum, width| sum + *width);
            let remaining = (max_width - used).coerce_at_least(IntPx::ZERO);
            for (column, width) in widths.iter_mut().enumerate() {
                let weight = self.column_width(column).weight();
                if weight > 0.0 {
                    *width += IntPx::round(remaining.to_f32() * weight / total_weight);
                }
            }
        }
        widths
    }

    fn cells_of(&self, measurables: &[Measurable], column: usize) -> SmallVec<[Measurable; 8]> {
        measurables
            .iter()
            .copied()
            .skip(column)
            .step_by(self.column_count())
            .collect()
    }
}

impl MeasurePolicy for TableMeasurePolicy {
    fn measure(
        &self,
        scope: &mut dyn MeasureScope,
        measurables: &[Measurable],
        constraints: Constraints,
    ) -> Result<MeasureResult, LayoutError> {
        let columns = self.column_count();
        let mut placeables: SmallVec<[Option<Placeable>; 16]> =
            SmallVec::from_elem(None, measurables.len());

        let mut wrapped: SmallVec<[Option<IntPx>; 8]> = SmallVec::from_elem(None, columns);
        for (column, slot) in wrapped.iter_mut().enumerate() {
            if self.column_width(column) != TableColumnWidth::wrap() {
                continue;
            }
            let mut width = IntPx::ZERO;
            for index in (column..measurables.len()).step_by(columns) {
                let placeable = scope.measure(
                    measurables[index],
                    Constraints::loose(constraints.max_width, IntPx::INFINITY),
                )?;
                width = width.max(placeable.width());
                placeables[index] = Some(placeable);
            }
            *slot = Some(width);
        }

        let widths = {
            let intrinsics = scope.intrinsics();
            self.resolve_widths(constraints.max_width, &wrapped, &|column, kind| {
                self.cells_of(measurables, column)
                    .into_iter()
                    .map(|cell| intrinsics.intrinsic(cell, kind))
                    .fold(IntPx::ZERO, IntPx::max)
            })
        };

        for (index, measurable) in measurables.iter().enumerate() {
            if placeables[index].is_some() {
                continue;
            }
            let width = widths[index % columns];
            placeables[index] =
                Some(scope.measure(*measurable, Constraints::loose(width, IntPx::INFINITY))?);
        }

        let rows = measurables.len().div_ceil(columns);
        let mut row_heights: SmallVec<[IntPx; 8]> = SmallVec::from_elem(IntPx::ZERO, rows);
        for (index, placeable) in placeables.iter().enumerate() {
            if let Some(placeable) = placeable {
                let row = &mut row_heights[index / columns];
                *row = (*row).max(placeable.height());
            }
        }

        let content_width = widths.iter().fold(IntPx::ZERO, |sum, width| sum + *width);
        let content_height = row_heights.iter().fold(IntPx::ZERO, |sum, height| sum + *height);
        let size = constraints.constrain(Size::new(content_width, content_height));

        let mut column_offsets: SmallVec<[IntPx; 8]> = SmallVec::with_capacity(columns);
        let mut offset = IntPx::ZERO;
        for width in &widths {
            column_offsets.push(offset);
            offset += *width;
        }

        let mut placements = Vec::with_capacity(placeables.len());
        let mut row_top = IntPx::ZERO;
        for (row, height) in row_heights.iter().enumerate() {
            for column in 0..columns {
                let index = row * columns + column;
                let Some(Some(placeable)) = placeables.get(index) else {
                    continue;
                };
                let slot = Size::new(widths[column], *height);
                let aligned = self.cell_alignment.align(slot, placeable.size());
                placements.push(Placement::new(
                    *placeable,
                    Position::new(column_offsets[column] + aligned.x, row_top + aligned.y),
                ));
            }
            row_top += *height;
        }

        Ok(MeasureResult::with_placements(size, placements))
    }

    fn min_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        self.intrinsic_width(scope, measurables, IntrinsicKind::MinWidth(height))
    }

    fn max_intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        height: IntPx,
    ) -> IntPx {
        self.intrinsic_width(scope, measurables, IntrinsicKind::MaxWidth(height))
    }

    fn min_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        self.intrinsic_height(scope, measurables, IntrinsicKind::MinHeight(width))
    }

    fn max_intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        width: IntPx,
    ) -> IntPx {
        self.intrinsic_height(scope, measurables, IntrinsicKind::MaxHeight(width))
    }

    fn debug_name(&self) -> &str {
        "Table"
    }
}

impl TableMeasurePolicy {
    /// Sum of the column bases with an unbounded table width.
    fn intrinsic_width(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        kind: IntrinsicKind,
    ) -> IntPx {
        self.resolve_widths(IntPx::INFINITY, &[], &|column, column_kind| {
            let kind = match column_kind {
                IntrinsicKind::MinWidth(_) => IntrinsicKind::MinWidth(kind.cross_size()),
                _ => IntrinsicKind::MaxWidth(kind.cross_size()),
            };
            self.cells_of(measurables, column)
                .into_iter()
                .map(|cell| scope.intrinsic(cell, kind))
                .fold(IntPx::ZERO, IntPx::max)
        })
        .iter()
        .fold(IntPx::ZERO, |sum, width| sum + *width)
    }

    /// Sum over rows of the tallest cell at its column's width inside `width`.
    fn intrinsic_height(
        &self,
        scope: &dyn IntrinsicScope,
        measurables: &[Measurable],
        kind: IntrinsicKind,
    ) -> IntPx {
        let columns = self.column_count();
        let widths = self.resolve_widths(kind.cross_size(), &[], &|column, column_kind| {
            self.cells_of(measurables, column)
                .into_iter()
                .map(|cell| scope.intrinsic(cell, column_kind))
                .fold(IntPx::ZERO, IntPx::max)
        });
        measurables
            .chunks(columns)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(column, cell)| {
                        scope.intrinsic(*cell, kind.with_cross_size(widths[column]))
                    })
                    .fold(IntPx::ZERO, IntPx::max)
            })
            .fold(IntPx::ZERO, |sum, height| sum + height)
    }
}
