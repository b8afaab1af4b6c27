use super::types::GridPos;
use crate::error::GameError;

/// Playfield in cells, derived from the canvas the client draws on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
  pub width: i32,
  pub height: i32,
}

impl Board {
  pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Result<Self, GameError> {
    if cell_size == 0 {
      return Err(GameError::InvalidConstruction("cell size must be non-zero".to_string()));
    }
    let width = canvas_width / cell_size;
    let height = canvas_height / cell_size;
    if width == 0 || height == 0 {
      return Err(GameError::InvalidConstruction(format!(
        "canvas {canvas_width}x{canvas_height} holds no {cell_size}px cells"
      )));
    }
    let width = i32::try_from(width)
      .map_err(|_| GameError::InvalidConstruction("board too wide".to_string()))?;
    let height = i32::try_from(height)
      .map_err(|_| GameError::InvalidConstruction("board too tall".to_string()))?;
    Ok(Self { width, height })
  }

  pub fn contains(&self, pos: GridPos) -> bool {
    pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
  }

  pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
    (0..self.height).flat_map(move |y| (0..self.width).map(move |x| GridPos::new(x, y)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn board_size_is_canvas_divided_by_cell() {
    let board = Board::from_canvas(600, 400, 20).expect("board");
    assert_eq!(board, Board { width: 30, height: 20 });
    assert_eq!(board.cells().count(), 600);
  }

  #[test]
  fn contains_is_half_open() {
    let board = Board { width: 30, height: 30 };
    assert!(board.contains(GridPos::new(0, 0)));
    assert!(board.contains(GridPos::new(29, 29)));
    assert!(!board.contains(GridPos::new(30, 0)));
    assert!(!board.contains(GridPos::new(0, 30)));
    assert!(!board.contains(GridPos::new(-1, 5)));
  }

  #[test]
  fn degenerate_canvas_fails_fast() {
    assert!(matches!(
      Board::from_canvas(600, 600, 0),
      Err(GameError::InvalidConstruction(_))
    ));
    assert!(matches!(
      Board::from_canvas(10, 600, 20),
      Err(GameError::InvalidConstruction(_))
    ));
  }
}
