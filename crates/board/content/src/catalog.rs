//! Primitive asset catalog.
//!
//! Stands in for a model store: every piece role maps to a stack of boxes
//! sized by the role's rank, tiles are thin plates, and the environment is a
//! ground slab under the board. The same shapes serve every setting.

use std::collections::BTreeMap;

use board_core::{AssetKey, AssetProvider, Material, Model, NodeKind};
use glam::Vec3;

/// Footprint and height of a piece role.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleShape {
    pub width: f32,
    pub height: f32,
}

impl RoleShape {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug)]
pub struct PrimitiveCatalog {
    roles: BTreeMap<String, RoleShape>,
    ground: Option<Material>,
}

impl Default for PrimitiveCatalog {
    fn default() -> Self {
        let roles = [
            ("shah", RoleShape::new(0.5, 0.9)),
            ("vizier", RoleShape::new(0.5, 0.8)),
            ("fil", RoleShape::new(0.45, 0.7)),
            ("asp", RoleShape::new(0.45, 0.6)),
            ("rukh", RoleShape::new(0.5, 0.6)),
            ("piyade", RoleShape::new(0.35, 0.4)),
        ]
        .into_iter()
        .map(|(role, shape)| (role.to_owned(), shape))
        .collect();

        Self {
            roles,
            ground: Some(Material::opaque(0x3b2f2f)),
        }
    }
}

impl PrimitiveCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the shape used for `role`.
    pub fn with_role(mut self, role: impl Into<String>, shape: RoleShape) -> Self {
        self.roles.insert(role.into(), shape);
        self
    }

    /// Drops the ground slab so no environment is added to scenes.
    pub fn without_ground(mut self) -> Self {
        self.ground = None;
        self
    }

    pub fn role(&self, role: &str) -> Option<RoleShape> {
        self.roles.get(role).copied()
    }

    fn piece(shape: RoleShape) -> Model {
        let base_height = 0.1;
        let body_height = (shape.height - base_height).max(0.05);
        let mut base = Model::new(NodeKind::cuboid(
            shape.width + 0.1,
            base_height,
            shape.width + 0.1,
            Material::opaque(0xffffff),
        ));
        base.offset = Vec3::new(0.0, base_height / 2.0, 0.0);
        let mut body = Model::new(NodeKind::cuboid(
            shape.width,
            body_height,
            shape.width,
            Material::opaque(0xffffff),
        ));
        body.offset = Vec3::new(0.0, base_height + body_height / 2.0, 0.0);

        Model::new(NodeKind::Group)
            .with_child("base", base)
            .with_child("body", body)
    }

    fn tile() -> Model {
        let mut plate = Model::new(NodeKind::cuboid(0.98, 0.04, 0.98, Material::opaque(0xffffff)));
        plate.offset = Vec3::new(0.0, -0.02, 0.0);
        Model::new(NodeKind::Group).with_child("Plane", plate)
    }

    fn ground(material: Material) -> Model {
        let mut slab = Model::new(NodeKind::cuboid(14.0, 0.1, 14.0, material));
        slab.offset = Vec3::new(0.0, -0.3, 0.0);
        slab
    }
}

impl AssetProvider for PrimitiveCatalog {
    fn model(&self, _setting: &str, key: AssetKey<'_>) -> Option<Model> {
        match key {
            AssetKey::Tile => Some(Self::tile()),
            AssetKey::Piece { role, .. } => self.role(role).map(Self::piece),
            AssetKey::Environment { .. } => self.ground.map(Self::ground),
        }
    }
}
