use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Yellow,
}

impl Side {
    /// Both sides, in turn order.
    pub const ALL: [Side; 2] = [Side::Red, Side::Yellow];

    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Red => Side::Yellow,
            Side::Yellow => Side::Red,
        }
    }

    /// Convert side to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Side::Red => Cell::Red,
            Side::Yellow => Cell::Yellow,
        }
    }

    /// Colour name
    pub fn name(self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Yellow => "Yellow",
        }
    }
}
