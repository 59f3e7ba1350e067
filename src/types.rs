//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;
/// Hidden rows above the visible field (spawn area / game-over zone)
pub const BUFFER_ZONE: u8 = 4;
/// Total stored rows including the buffer zone
pub const TOTAL_HEIGHT: u8 = BOARD_HEIGHT + BUFFER_ZONE;

/// Piece queue sizing
pub const QUEUE_LEN: usize = 7;
pub const PREVIEW_LEN: usize = 5;

/// Cell value of an empty board position
pub const EMPTY_CELL: Cell = 0;
/// Cell value written when merging opponent garbage (never a piece color)
pub const GARBAGE_CELL: Cell = 8;

/// Normal line clears needed before an item piece is queued (item mode)
pub const LINES_PER_ITEM: u32 = 10;
/// Minimum simultaneous clears that send garbage to the opponent
pub const ATTACK_THRESHOLD: usize = 2;

/// Columns swept by the weight item effect
pub const WEIGHT_SPAN: u8 = 4;
/// The bomb blast covers rows -R..=R+1 and columns -R..=R+1 of the trigger
pub const BOMB_RADIUS: i8 = 2;

/// Cell on the board: 0 = empty, 1..=7 = locked piece color, 8 = garbage
pub type Cell = u8;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order (color index order)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Index into the catalog tables
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Locked-cell color code, 1..=7
    pub fn color_index(&self) -> Cell {
        self.index() as Cell + 1
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states (Spawn = initial orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Spawn,
    Right,
    Reverse,
    Left,
}

impl Rotation {
    /// Numeric rotation index 0..=3
    pub fn index(&self) -> usize {
        match self {
            Rotation::Spawn => 0,
            Rotation::Right => 1,
            Rotation::Reverse => 2,
            Rotation::Left => 3,
        }
    }

    /// Rotate clockwise
    pub fn cw(&self) -> Self {
        match self {
            Rotation::Spawn => Rotation::Right,
            Rotation::Right => Rotation::Reverse,
            Rotation::Reverse => Rotation::Left,
            Rotation::Left => Rotation::Spawn,
        }
    }

    /// Rotate counter-clockwise
    pub fn ccw(&self) -> Self {
        match self {
            Rotation::Spawn => Rotation::Left,
            Rotation::Left => Rotation::Reverse,
            Rotation::Reverse => Rotation::Right,
            Rotation::Right => Rotation::Spawn,
        }
    }
}

/// Item block kinds carried by pieces and board cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Clears the row it locks into, full or not
    LineClear,
    /// Clears the column it locks into
    ColumnClear,
    /// Clears both the row and the column
    CrossClear,
    /// Sweeps a strip from the item down to the floor
    Weight,
    /// Blasts a square region around the item
    Bomb,
    /// No item
    None,
}

impl ItemKind {
    /// Display symbol used in the wire frame encoding
    pub fn symbol(&self) -> char {
        match self {
            ItemKind::LineClear => 'L',
            ItemKind::ColumnClear => 'I',
            ItemKind::CrossClear => 'X',
            ItemKind::Weight => 'W',
            ItemKind::Bomb => 'B',
            ItemKind::None => ' ',
        }
    }

    pub fn is_item(&self) -> bool {
        !matches!(self, ItemKind::None)
    }
}

/// Abstract input actions consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Hold,
    Pause,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
        }
    }
}

/// Game difficulty; scales piece weights, leveling speed, and scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Lines required per level step
    pub fn level_factor(&self) -> u32 {
        match self {
            Difficulty::Easy => 12,
            Difficulty::Normal => 10,
            Difficulty::Hard => 8,
        }
    }

    /// Score multiplier as an integer percentage
    pub fn score_percent(&self) -> i64 {
        match self {
            Difficulty::Easy => 80,
            Difficulty::Normal => 100,
            Difficulty::Hard => 120,
        }
    }

    /// Draw weight for the I piece (harder games see fewer I pieces)
    pub fn i_piece_weight(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.2,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.8,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Normal
    }
}
