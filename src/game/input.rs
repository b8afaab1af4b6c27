use super::types::{GridDir, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    RollLeft,
    RollRight,
    Ascend,
    Descend,
    Restart,
}

impl Command {
    /// Browser `KeyboardEvent.key` names, case-insensitive. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" | "k" => Command::Up,
            "arrowdown" | "s" | "j" => Command::Down,
            "arrowleft" | "a" | "h" => Command::Left,
            "arrowright" | "d" | "l" => Command::Right,
            "q" => Command::RollLeft,
            "e" => Command::RollRight,
            " " | "space" => Command::Ascend,
            "shift" => Command::Descend,
            "r" => Command::Restart,
            _ => return None,
        };
        Some(command)
    }

    pub fn grid_direction(self) -> Option<GridDir> {
        match self {
            Command::Up => Some(GridDir::Up),
            Command::Down => Some(GridDir::Down),
            Command::Left => Some(GridDir::Left),
            Command::Right => Some(GridDir::Right),
            _ => None,
        }
    }

    /// Forward is -z, matching a camera behind the board looking toward the origin.
    pub fn space_direction(self) -> Option<Point> {
        match self {
            Command::Up => Some(Point::new(0.0, 0.0, -1.0)),
            Command::Down => Some(Point::new(0.0, 0.0, 1.0)),
            Command::Left => Some(Point::new(-1.0, 0.0, 0.0)),
            Command::Right => Some(Point::new(1.0, 0.0, 0.0)),
            Command::Ascend => Some(Point::new(0.0, 1.0, 0.0)),
            Command::Descend => Some(Point::new(0.0, -1.0, 0.0)),
            _ => None,
        }
    }

    pub fn roll_quarter_turns(self) -> Option<i8> {
        match self {
            Command::RollLeft => Some(1),
            Command::RollRight => Some(-1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_wasd_and_vim_keys_share_commands() {
        for key in ["ArrowUp", "w", "K"] {
            assert_eq!(Command::from_key(key), Some(Command::Up));
        }
        for key in ["arrowleft", "A", "h"] {
            assert_eq!(Command::from_key(key), Some(Command::Left));
        }
        assert_eq!(Command::from_key("q"), Some(Command::RollLeft));
        assert_eq!(Command::from_key(" "), Some(Command::Ascend));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(Command::from_key("invalid_key"), None);
        assert_eq!(Command::from_key(""), None);
    }

    #[test]
    fn space_mapping_uses_z_for_forward() {
        assert_eq!(Command::Up.space_direction(), Some(Point::new(0.0, 0.0, -1.0)));
        assert_eq!(Command::Down.space_direction(), Some(Point::new(0.0, 0.0, 1.0)));
        assert_eq!(Command::RollLeft.space_direction(), None);
        assert_eq!(Command::Ascend.grid_direction(), None);
    }
}
