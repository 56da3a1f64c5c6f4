//! Tile-grid enumeration across zoom levels.
//!
//! A tile pyramid is anchored at its furthest (coarsest) zoom level: the
//! caller supplies the upper-left tile index and the grid extent there, and
//! every finer level is derived by power-of-two scaling. Whatever the zoom,
//! the enumerated tiles cover the same geographic surface.

use crate::geom::Point;

/// Tile-grid origin and extent at the furthest (reference) zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurthestZoom {
    /// Upper-left corner of the grid, as absolute tile indices.
    pub ul_corner: Point,
    /// The furthest (coarsest) zoom level of the pyramid.
    pub zoom: u8,
    /// Grid extent in tiles (width, height).
    pub extent: Point,
}

impl FurthestZoom {
    /// Creates a reference-level grid description.
    pub const fn new(ul_corner: Point, zoom: u8, extent: Point) -> Self {
        Self {
            ul_corner,
            zoom,
            extent,
        }
    }
}

/// The rectangle of tiles one zoom level contributes to the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLevel {
    zoom: u8,
    factor: i64,
    origin: Point,
    extent: Point,
}

impl GridLevel {
    /// Derives the tile rectangle for `zoom` from the reference level.
    ///
    /// Returns `None` for zoom levels below the reference zoom: those levels
    /// are outside the pyramid and are skipped, not treated as errors.
    pub fn from_furthest(furthest: &FurthestZoom, zoom: u8) -> Option<GridLevel> {
        if zoom < furthest.zoom {
            return None;
        }
        let factor = 1i64 << (zoom - furthest.zoom);
        Some(GridLevel {
            zoom,
            factor,
            origin: furthest.ul_corner * factor,
            extent: furthest.extent * factor,
        })
    }

    /// The zoom level of this rectangle.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Power-of-two scale factor relative to the reference level.
    pub fn factor(&self) -> i64 {
        self.factor
    }

    /// Absolute tile index of the upper-left corner.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Extent in tiles (width, height).
    pub fn extent(&self) -> Point {
        self.extent
    }

    /// Total number of tiles in the rectangle.
    pub fn total_tiles(&self) -> i64 {
        self.extent.x * self.extent.y
    }

    /// Iterates the rectangle's tiles in column-major order.
    ///
    /// For a fixed column the row advances through the full vertical extent
    /// before the column increments. Consumers may rely on this ordering for
    /// deterministic output.
    pub fn tiles(&self) -> GridTiles {
        GridTiles {
            level: *self,
            col: 0,
            row: 0,
        }
    }
}

/// One tile produced by [`GridLevel::tiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTile {
    /// Zero-based position within the level's rectangle.
    pub offset: Point,
    /// Absolute tile index (grid origin plus offset), used in file names.
    pub index: Point,
}

/// Column-major iterator over the tiles of a [`GridLevel`].
#[derive(Debug, Clone)]
pub struct GridTiles {
    level: GridLevel,
    col: i64,
    row: i64,
}

impl Iterator for GridTiles {
    type Item = GridTile;

    fn next(&mut self) -> Option<GridTile> {
        if self.level.extent.y <= 0 || self.col >= self.level.extent.x {
            return None;
        }
        let offset = Point::new(self.col, self.row);
        self.row += 1;
        if self.row == self.level.extent.y {
            self.row = 0;
            self.col += 1;
        }
        Some(GridTile {
            offset,
            index: self.level.origin + offset,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.level.extent.y <= 0 || self.col >= self.level.extent.x {
            return (0, Some(0));
        }
        let remaining =
            (self.level.extent.x - self.col) * self.level.extent.y - self.row;
        (remaining as usize, Some(remaining as usize))
    }
}

impl ExactSizeIterator for GridTiles {}
