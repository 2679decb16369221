//! Builds the board scene for an encounter.
//!
//! Layout of the generated subtree:
//!
//! ```text
//! Board                      group, offset to centre the shape on the origin
//! ├── MovementOptions        group, filled by `show_movement_options`
//! ├── tile:<placement>       one per occupiable cell
//! ├── piece:<role>-<color>   one per setup entry
//! └── cursor                 group holding the `cursor-<color>` mesh
//! ```

use std::collections::BTreeSet;
use std::fmt;

use glam::Vec3;

use crate::coords::placement_to_coordinate;
use crate::encounter::{BoardSpec, Environment, PieceColor};
use crate::interaction::TILE_TAG;
use crate::notation::Placement;
use crate::scene::{Material, Model, NodeId, NodeKind, Scene};
use crate::topology::BoardShape;

pub const BOARD_NODE: &str = "Board";
pub const MOVEMENT_OPTIONS_NODE: &str = "MovementOptions";
pub const CURSOR_NODE: &str = "cursor";

pub const TILE_LIGHT: Material = Material::opaque(0xffffff);
pub const TILE_DARK: Material = Material::opaque(0x666666);
pub const PIECE_WHITE: Material = Material::opaque(0xf0f0f0);
pub const PIECE_BLACK: Material = Material::opaque(0x101010);
pub const CURSOR_MATERIAL: Material = Material::translucent(0x006e93, 0.5);

/// What the board builder asks the asset provider for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKey<'a> {
    Tile,
    Piece { role: &'a str, color: PieceColor },
    Environment { name: &'a str },
}

impl fmt::Display for AssetKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tile => f.write_str("tile"),
            Self::Piece { role, color } => write!(f, "piece {role}-{color}"),
            Self::Environment { name } => write!(f, "environment {name}"),
        }
    }
}

/// Supplies models per setting; `None` means "use a placeholder".
pub trait AssetProvider {
    fn model(&self, setting: &str, key: AssetKey<'_>) -> Option<Model>;
}

/// Provider with no models at all; every lookup falls back to placeholders.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderAssets;

impl AssetProvider for PlaceholderAssets {
    fn model(&self, _setting: &str, _key: AssetKey<'_>) -> Option<Model> {
        None
    }
}

/// Handles to the nodes the engine keeps driving after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardNodes {
    pub board: NodeId,
    pub movement_options: NodeId,
    pub cursor: NodeId,
    pub environment: Option<NodeId>,
}

/// Offset that centres the shape, header row and label column included.
pub fn board_offset(shape: &BoardShape) -> Vec3 {
    Vec3::new(
        -((shape.height() - 1) as f32 / 2.0),
        0.0,
        (shape.width() - 1) as f32 / 2.0,
    )
}

/// Checkerboard colouring by shape row and column.
pub fn tile_material(row: usize, column: usize) -> Material {
    if (row + column.saturating_sub(1)) % 2 == 1 {
        TILE_DARK
    } else {
        TILE_LIGHT
    }
}

pub fn placeholder_tile() -> Model {
    let mut plane = Model::new(NodeKind::cuboid(0.96, 0.1, 0.96, TILE_LIGHT));
    plane.offset = Vec3::new(0.0, -0.05, 0.0);
    Model::new(NodeKind::Group).with_child("Plane", plane)
}

pub fn placeholder_piece() -> Model {
    let mut body = Model::new(NodeKind::cuboid(0.5, 0.5, 0.5, PIECE_WHITE));
    body.offset = Vec3::new(0.0, 0.25, 0.0);
    Model::new(NodeKind::Group).with_child("body", body)
}

/// Adds the board subtree for `spec` under the scene root.
pub fn build_board(
    scene: &mut Scene,
    spec: &BoardSpec,
    environment: &Environment,
    assets: &dyn AssetProvider,
    cursor: Placement,
) -> BoardNodes {
    let setting = environment.setting.name.as_str();
    let mut fallbacks = BTreeSet::new();
    let mut lookup = |key: AssetKey<'_>, placeholder: fn() -> Model| {
        assets.model(setting, key).unwrap_or_else(|| {
            fallbacks.insert(key.to_string());
            placeholder()
        })
    };

    let root = scene.root();
    let board = scene.add(
        root,
        BOARD_NODE,
        NodeKind::Group,
        board_offset(&spec.shape),
    );
    let movement_options = scene.add(board, MOVEMENT_OPTIONS_NODE, NodeKind::Group, Vec3::ZERO);

    let tile = lookup(AssetKey::Tile, placeholder_tile);
    for cell in spec.shape.cells() {
        let node = scene.instantiate(
            board,
            format!("{TILE_TAG}{}", cell.placement),
            &tile,
            placement_to_coordinate(cell.placement).to_vec3(),
        );
        paint(scene, node, tile_material(cell.row, cell.column));
    }

    for (placement, entry) in &spec.setup {
        if !spec.shape.is_occupiable(*placement) {
            tracing::warn!(
                %placement,
                role = %entry.character.role,
                "setup entry off the board shape"
            );
        }
        let character = &entry.character;
        let model = lookup(
            AssetKey::Piece {
                role: &character.role,
                color: character.color,
            },
            placeholder_piece,
        );
        let node = scene.instantiate(
            board,
            character.node_name(),
            &model,
            placement_to_coordinate(*placement).to_vec3(),
        );
        paint(
            scene,
            node,
            match character.color {
                PieceColor::White => PIECE_WHITE,
                PieceColor::Black => PIECE_BLACK,
            },
        );
    }

    let cursor_color = spec
        .piece_at(cursor)
        .map_or(PieceColor::White, |entry| entry.character.color);
    let cursor_node = scene.add(
        board,
        CURSOR_NODE,
        NodeKind::Group,
        placement_to_coordinate(cursor).to_vec3(),
    );
    scene.add(
        cursor_node,
        format!("cursor-{cursor_color}"),
        NodeKind::cuboid(0.8, 0.2, 0.8, CURSOR_MATERIAL),
        Vec3::ZERO,
    );

    let environment_node = assets
        .model(
            setting,
            AssetKey::Environment {
                name: &environment.name,
            },
        )
        .map(|model| scene.instantiate(root, environment.name.clone(), &model, Vec3::ZERO));

    for key in &fallbacks {
        tracing::warn!(setting, asset = %key, "asset unavailable, using placeholder");
    }

    BoardNodes {
        board,
        movement_options,
        cursor: cursor_node,
        environment: environment_node,
    }
}

/// Applies `material` to every mesh in the subtree at `id`.
fn paint(scene: &mut Scene, id: NodeId, material: Material) {
    let subtree: Vec<NodeId> = std::iter::once(id).chain(scene.descendants(id)).collect();
    for node in subtree {
        if let Some(NodeKind::Mesh { material: slot, .. }) =
            scene.node_mut(node).map(|node| &mut node.kind)
        {
            *slot = material;
        }
    }
}
