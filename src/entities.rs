//! All game entity types, plus the two pure constructors that build them.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// Terminal: either an enemy reached the ship or the grid was cleared.
    GameOver,
}

/// Horizontal heading shared by the whole enemy grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

// ── Player ship ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Horizontal velocity applied each tick; written only by the input handler.
    pub dx: f64,
}

impl Ship {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A bullet centred on the ship's horizontal centre, sitting on its top edge.
pub fn spawn_bullet(ship: &Ship, width: f64, height: f64) -> Bullet {
    Bullet {
        x: ship.center_x() - width / 2.0,
        y: ship.y,
        width,
        height,
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Tombstone; dead enemies stay in the grid so row/col indexing holds.
    pub alive: bool,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Fixed `rows × cols` formation, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyGrid {
    rows: usize,
    cols: usize,
    /// Vertical drop applied to every enemy when the grid changes direction.
    pub cell_height: f64,
    cells: Vec<Enemy>,
}

impl EnemyGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of slots, dead or alive.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Enemy> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Enemy> {
        if row < self.rows && col < self.cols {
            self.cells.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Every slot in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.cells.iter_mut()
    }

    pub fn live(&self) -> impl Iterator<Item = &Enemy> {
        self.cells.iter().filter(|e| e.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.live().count()
    }
}

/// Lay out a `rows × cols` grid with every enemy alive.
///
/// Pure: the same arguments always yield the same grid.
pub fn create_enemy_grid(
    rows: usize,
    cols: usize,
    cell_width: f64,
    cell_height: f64,
    padding: f64,
    offset_x: f64,
    offset_y: f64,
) -> EnemyGrid {
    let mut cells = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            cells.push(Enemy {
                x: col as f64 * (cell_width + padding) + offset_x,
                y: row as f64 * (cell_height + padding) + offset_y,
                width: cell_width,
                height: cell_height,
                alive: true,
            });
        }
    }
    EnemyGrid {
        rows,
        cols,
        cell_height,
        cells,
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole world.  Cloneable so the pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub ship: Ship,
    /// Active bullets; order carries no meaning.
    pub bullets: Vec<Bullet>,
    pub enemies: EnemyGrid,
    pub enemy_speed: f64,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Playfield bounds.
    pub width: f64,
    pub height: f64,
    pub bullet_speed: f64,
    pub bullet_width: f64,
    pub bullet_height: f64,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Enemies a renderer should draw.
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.live()
    }

    /// Score at which the grid counts as cleared.
    pub fn winning_score(&self) -> u32 {
        self.enemies.len() as u32
    }
}
