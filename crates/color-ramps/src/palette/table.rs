//! Color table: palette ids mapped to colors and their pixel positions

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::api::ConfigError;
use crate::{Color, ColorId};

/// A borrowed row-major RGBA8 image.
///
/// The buffer is only ever read.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    /// Wrap raw RGBA8 bytes. Fails when the length is not `width * height * 4`.
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Result<Self, ConfigError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ConfigError::invalid(
                "image",
                format!(
                    "{}x{} RGBA needs {} bytes, got {}",
                    width,
                    height,
                    expected,
                    data.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`. Caller guarantees the coordinate is in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Color::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        )
    }

    /// Iterate `(x, y, color)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width;
        self.data.chunks_exact(4).enumerate().map(move |(i, px)| {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            (x, y, Color::new(px[0], px[1], px[2], px[3]))
        })
    }
}

/// One palette entry: a color and every pixel that carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGroup {
    pub color: Color,
    #[serde(default)]
    pub positions: Vec<[u32; 2]>,
}

impl ColorGroup {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            positions: Vec::new(),
        }
    }
}

/// Mapping from palette id to [`ColorGroup`].
///
/// Serialized as a plain map keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ColorId, ColorGroup>", into = "BTreeMap<ColorId, ColorGroup>")]
pub struct ColorTable {
    groups: BTreeMap<ColorId, ColorGroup>,
    #[serde(skip)]
    by_color: HashMap<Color, ColorId>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from every non-transparent color in `image`.
    ///
    /// Ids are assigned from 0 in `(a, r, g, b)` order, so the same image
    /// always yields the same ids.
    ///
    /// # Example
    /// ```
    /// use color_ramps::{Color, ColorTable, PixelBuffer};
    ///
    /// let bytes = [10, 10, 10, 255, 0, 0, 0, 0, 5, 5, 5, 255, 10, 10, 10, 255];
    /// let image = PixelBuffer::new(4, 1, &bytes).unwrap();
    /// let table = ColorTable::from_image(&image);
    ///
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.id_of(Color::rgb(5, 5, 5)), Some(0));
    /// assert_eq!(table.group(1).unwrap().positions, vec![[0, 0], [3, 0]]);
    /// ```
    pub fn from_image(image: &PixelBuffer<'_>) -> Self {
        let mut positions: BTreeMap<(u8, u8, u8, u8), Vec<[u32; 2]>> = BTreeMap::new();
        for (x, y, color) in image.pixels() {
            if color.is_transparent() {
                continue;
            }
            positions
                .entry((color.a, color.r, color.g, color.b))
                .or_default()
                .push([x, y]);
        }

        let mut table = Self::new();
        for (id, ((a, r, g, b), positions)) in positions.into_iter().enumerate() {
            table.insert(
                id as ColorId,
                ColorGroup {
                    color: Color::new(r, g, b, a),
                    positions,
                },
            );
        }
        tracing::debug!(colors = table.len(), "Built color table from image");
        table
    }

    /// Insert or replace the group for `id`.
    ///
    /// When several ids share a color, [`id_of`](Self::id_of) returns the
    /// smallest of them.
    pub fn insert(&mut self, id: ColorId, group: ColorGroup) {
        let color = group.color;
        if let Some(old) = self.groups.insert(id, group) {
            if old.color != color && self.by_color.get(&old.color) == Some(&id) {
                match self.lowest_id_with(old.color) {
                    Some(other) => self.by_color.insert(old.color, other),
                    None => self.by_color.remove(&old.color),
                };
            }
        }
        let slot = self.by_color.entry(color).or_insert(id);
        if id < *slot {
            *slot = id;
        }
    }

    fn lowest_id_with(&self, color: Color) -> Option<ColorId> {
        self.groups
            .iter()
            .find(|(_, g)| g.color == color)
            .map(|(id, _)| *id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, id: ColorId) -> Option<&ColorGroup> {
        self.groups.get(&id)
    }

    pub fn color(&self, id: ColorId) -> Option<Color> {
        self.groups.get(&id).map(|g| g.color)
    }

    /// Palette id of `color`, if it is in the table.
    pub fn id_of(&self, color: Color) -> Option<ColorId> {
        self.by_color.get(&color).copied()
    }

    /// Iterate `(id, group)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorId, &ColorGroup)> {
        self.groups.iter().map(|(id, g)| (*id, g))
    }

    pub fn ids(&self) -> impl Iterator<Item = ColorId> + '_ {
        self.groups.keys().copied()
    }
}

impl From<BTreeMap<ColorId, ColorGroup>> for ColorTable {
    fn from(groups: BTreeMap<ColorId, ColorGroup>) -> Self {
        let mut table = Self::new();
        for (id, group) in groups {
            table.insert(id, group);
        }
        table
    }
}

impl From<ColorTable> for BTreeMap<ColorId, ColorGroup> {
    fn from(table: ColorTable) -> Self {
        table.groups
    }
}

impl FromIterator<(ColorId, Color)> for ColorTable {
    fn from_iter<T: IntoIterator<Item = (ColorId, Color)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (id, color) in iter {
            table.insert(id, ColorGroup::new(color));
        }
        table
    }
}
