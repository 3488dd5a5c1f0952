use serde::{Deserialize, Serialize};

/// One cell of the world map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldTile {
    pub province_id: String,
    #[serde(default)]
    pub terrain_id: String,
}

impl WorldTile {
    pub fn new(province_id: impl Into<String>, terrain_id: impl Into<String>) -> Self {
        Self {
            province_id: province_id.into(),
            terrain_id: terrain_id.into(),
        }
    }
}

/// Dense `width × height` tile grid, stored row-major.
///
/// Serialized as a list of rows so content files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<WorldTile>>", try_from = "Vec<Vec<WorldTile>>")]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<WorldTile>,
}

impl TileGrid {
    /// A grid with every tile set to `fill`.
    pub fn filled(width: u32, height: u32, fill: WorldTile) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&WorldTile> {
        if x < self.width && y < self.height {
            self.tiles.get(self.index(x, y))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut WorldTile> {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.tiles.get_mut(index)
        } else {
            None
        }
    }

    /// Every tile with its coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &WorldTile)> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| ((i as u32) % width, (i as u32) / width, tile))
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl TryFrom<Vec<Vec<WorldTile>>> for TileGrid {
    type Error = String;

    fn try_from(rows: Vec<Vec<WorldTile>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err("tile grid cannot be empty".to_string());
        }
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(format!(
                "tile grid row {y} has {} tiles, expected {width}",
                rows[y].len()
            ));
        }
        let width = u32::try_from(width).map_err(|_| "tile grid too wide".to_string())?;
        let height = u32::try_from(height).map_err(|_| "tile grid too tall".to_string())?;
        Ok(Self {
            width,
            height,
            tiles: rows.into_iter().flatten().collect(),
        })
    }
}

impl From<TileGrid> for Vec<Vec<WorldTile>> {
    fn from(grid: TileGrid) -> Self {
        let width = grid.width.max(1) as usize;
        let mut rows = Vec::with_capacity(grid.height as usize);
        let mut tiles = grid.tiles.into_iter();
        for _ in 0..grid.height {
            rows.push(tiles.by_ref().take(width).collect());
        }
        rows
    }
}

/// World metadata, balance constants and map. Read-only after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub base_province_income: i64,
    #[serde(default)]
    pub base_province_recruitment: u32,
    #[serde(default)]
    pub base_faction_recruitment: u32,
    #[serde(default)]
    pub min_troops_per_attack: u32,
    #[serde(default)]
    pub holding_slots_per_faction: u32,
    #[serde(default)]
    pub starting_wealth: i64,
    #[serde(default)]
    pub starting_troops: u32,
    #[serde(default)]
    pub holdings_price: i64,
    pub tiles: TileGrid,
}

impl World {
    pub fn new(id: impl Into<String>, tiles: TileGrid) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            author: String::new(),
            version: String::new(),
            base_province_income: 0,
            base_province_recruitment: 0,
            base_faction_recruitment: 0,
            min_troops_per_attack: 0,
            holding_slots_per_faction: 0,
            starting_wealth: 0,
            starting_troops: 0,
            holdings_price: 0,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.tiles.width()
    }

    pub fn height(&self) -> u32 {
        self.tiles.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(p: &str) -> WorldTile {
        WorldTile::new(p, "plains")
    }

    #[test]
    fn grid_indexing_is_x_then_y() {
        let grid = TileGrid::try_from(vec![
            vec![tile("a"), tile("b"), tile("c")],
            vec![tile("d"), tile("e"), tile("f")],
        ])
        .unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(2, 0).unwrap().province_id, "c");
        assert_eq!(grid.get(0, 1).unwrap().province_id, "d");
        assert!(grid.get(3, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = TileGrid::try_from(vec![vec![tile("a"), tile("b")], vec![tile("c")]]);
        assert!(err.unwrap_err().contains("row 1"));
        assert!(TileGrid::try_from(Vec::new()).is_err());
    }

    #[test]
    fn iter_reports_coordinates() {
        let grid = TileGrid::filled(2, 2, tile("a"));
        let coords: Vec<(u32, u32)> = grid.iter().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn serializes_as_rows() {
        let mut grid = TileGrid::filled(2, 1, tile("a"));
        grid.get_mut(1, 0).unwrap().province_id = "b".to_string();
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json[0][1]["province_id"], "b");
        let back: TileGrid = serde_json::from_value(json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn contains_handles_negative_offsets() {
        let grid = TileGrid::filled(5, 5, tile("a"));
        assert!(grid.contains(0, 4));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, 5));
    }
}
