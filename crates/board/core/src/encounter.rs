//! Encounter description: board layout, starting setup, environment and the
//! maneuvers the game service offers per placement.

use std::collections::BTreeMap;

use strum::{Display, EnumString};

use crate::movement::Maneuver;
use crate::notation::Placement;
use crate::topology::BoardShape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PieceColor {
    White,
    Black,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: u32,
    /// Piece role, e.g. `shah` or `piyade`.
    pub role: String,
    pub color: PieceColor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
}

impl Character {
    /// Scene node name for this character's piece.
    pub fn node_name(&self) -> String {
        format!("piece:{}-{}", self.role, self.color)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetupEntry {
    pub character: Character,
    /// Owning player, e.g. `H1` for the human or `C1` for the computer.
    pub owner: String,
    /// Marks the placement the cursor starts on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cursor: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSpec {
    pub shape: BoardShape,
    #[cfg_attr(feature = "serde", serde(default))]
    pub setup: BTreeMap<Placement, SetupEntry>,
}

impl BoardSpec {
    /// The setup entry flagged as the cursor start, else the first
    /// occupiable placement of the shape.
    pub fn initial_cursor(&self) -> Option<Placement> {
        self.setup
            .iter()
            .find(|(_, entry)| entry.cursor)
            .map(|(placement, _)| *placement)
            .or_else(|| self.shape.cells().next().map(|cell| cell.placement))
    }

    pub fn piece_at(&self, placement: Placement) -> Option<&SetupEntry> {
        self.setup.get(&placement)
    }

    /// Where `character_id` stands in the starting setup.
    pub fn placement_of(&self, character_id: u32) -> Option<Placement> {
        self.setup
            .iter()
            .find(|(_, entry)| entry.character.id == character_id)
            .map(|(placement, _)| *placement)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setting {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Environment {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub setting: Setting,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub name: String,
    pub board: BoardSpec,
    #[cfg_attr(feature = "serde", serde(default))]
    pub environment: Environment,
    /// Maneuvers available to the piece on each placement.
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement_options: BTreeMap<Placement, Vec<Maneuver>>,
}

impl Encounter {
    pub fn maneuvers_at(&self, placement: Placement) -> &[Maneuver] {
        self.movement_options
            .get(&placement)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn maneuver(&self, placement: Placement, name: &str) -> Option<&Maneuver> {
        self.maneuvers_at(placement)
            .iter()
            .find(|maneuver| maneuver.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(notation: &str) -> Placement {
        notation.parse().unwrap()
    }

    fn entry(id: u32, role: &str, color: PieceColor, cursor: bool) -> SetupEntry {
        SetupEntry {
            character: Character {
                id,
                role: role.into(),
                color,
                name: String::new(),
            },
            owner: "H1".into(),
            cursor,
        }
    }

    fn board() -> BoardSpec {
        BoardSpec {
            shape: BoardShape::new(["3011", "2111", "1111", " abc"]).unwrap(),
            setup: BTreeMap::new(),
        }
    }

    #[test]
    fn initial_cursor_prefers_the_flagged_entry() {
        let mut board = board();
        board.setup.insert(placement("a1"), entry(1, "piyade", PieceColor::White, false));
        board.setup.insert(placement("b2"), entry(2, "shah", PieceColor::White, true));
        assert_eq!(board.initial_cursor(), Some(placement("b2")));
        assert_eq!(board.placement_of(1), Some(placement("a1")));
    }

    #[test]
    fn initial_cursor_falls_back_to_the_first_open_cell() {
        assert_eq!(board().initial_cursor(), Some(placement("b3")));
    }

    #[test]
    fn piece_nodes_are_named_by_role_and_color() {
        let shah = entry(7, "shah", PieceColor::Black, false);
        assert_eq!(shah.character.node_name(), "piece:shah-black");
    }
}
