//! Minimal scene graph: named nodes, translation-only transforms, box meshes.
//!
//! The graph is the shared mutable resource between the engine and the render
//! host. Game logic never stores state on nodes; nodes only mirror state owned
//! elsewhere (cursor placement, camera pose, visible movement options).

use glam::Vec3;

use crate::geometry::{Aabb, Ray};

/// Handle to a node in a [`Scene`].
///
/// Slots are recycled once a node is removed; the generation makes handles to
/// the removed node stale instead of aliasing whatever took its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    fn slot(self) -> usize {
        self.index as usize
    }
}

/// Surface colour and transparency of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// `0xRRGGBB`.
    pub color: u32,
    pub opacity: f32,
}

impl Material {
    pub const fn opaque(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
        }
    }

    pub const fn translucent(color: u32, opacity: f32) -> Self {
        Self { color, opacity }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Group,
    /// Axis-aligned box centred on the node position.
    Mesh { half_extents: Vec3, material: Material },
}

impl NodeKind {
    pub fn cuboid(width: f32, height: f32, depth: f32, material: Material) -> Self {
        Self::Mesh {
            half_extents: Vec3::new(width, height, depth) * 0.5,
            material,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Offset relative to the parent node.
    pub position: Vec3,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Clonable node template, as handed out by an asset provider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    pub kind: NodeKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: Vec3,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<(String, Model)>,
}

impl Model {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            offset: Vec3::ZERO,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, name: impl Into<String>, child: Model) -> Self {
        self.children.push((name.into(), child));
        self
    }
}

/// A ray hit against a mesh node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-backed node tree rooted at a single group.
#[derive(Clone, Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let root = Node {
            name: "Scene".to_owned(),
            kind: NodeKind::Group,
            position: Vec3::ZERO,
            parent: None,
            children: Vec::new(),
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.slot())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.slot())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Slots allocated so far, live or vacant.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a node under `parent`.
    ///
    /// A stale `parent` handle attaches the node to the root instead.
    pub fn add(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: NodeKind,
        position: Vec3,
    ) -> NodeId {
        let parent = if self.node(parent).is_some() {
            parent
        } else {
            self.root
        };
        let node = Node {
            name: name.into(),
            kind,
            position,
            parent: Some(parent),
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        id
    }

    /// Clones `model` under `parent`, naming the top node `name`.
    pub fn instantiate(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        model: &Model,
        position: Vec3,
    ) -> NodeId {
        let id = self.add(parent, name, model.kind.clone(), position + model.offset);
        for (child_name, child) in &model.children {
            self.instantiate(id, child_name.clone(), child, Vec3::ZERO);
        }
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or_default()
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Removes every descendant of `id`, keeping `id` itself. Vacated slots
    /// are handed out again by later [`add`](Self::add) calls.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = match self.node_mut(id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.clear_children(child);
            self.release(child);
        }
    }

    fn release(&mut self, id: NodeId) {
        let Some(slot) = self.slots.get_mut(id.slot()) else {
            return;
        };
        if slot.generation != id.generation || slot.node.take().is_none() {
            return;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    /// Depth-first search for the first node called `name` below `from`.
    pub fn find_by_name_from(&self, from: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&id| self.node(id).is_some_and(|node| node.name == name))
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find_by_name_from(self.root, name)
    }

    /// Pre-order walk of everything below `from`, excluding `from`.
    pub fn descendants(&self, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev().copied());
            Some(id)
        })
    }

    /// Position of `id` in world space (sum of ancestor offsets).
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut position = Vec3::ZERO;
        let mut cursor = self.node(id);
        while let Some(node) = cursor {
            position += node.position;
            cursor = node.parent.and_then(|parent| self.node(parent));
        }
        position
    }

    /// Casts `ray` against every mesh in the scene, nearest hit first.
    pub fn raycast(&self, ray: &Ray) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = self
            .descendants(self.root)
            .filter_map(|id| {
                let node = self.node(id)?;
                let NodeKind::Mesh { half_extents, .. } = node.kind else {
                    return None;
                };
                let bounds = Aabb::from_center(self.world_position(id), half_extents);
                let distance = bounds.intersect(ray)?;
                Some(Intersection {
                    node: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> NodeKind {
        NodeKind::cuboid(1.0, 1.0, 1.0, Material::opaque(0xffffff))
    }

    #[test]
    fn world_position_accumulates_parent_offsets() {
        let mut scene = Scene::new();
        let board = scene.add(scene.root(), "Board", NodeKind::Group, Vec3::new(-4.0, 0.0, 4.0));
        let tile = scene.add(board, "tile:d3", cube(), Vec3::new(3.0, 0.0, -3.0));
        assert_eq!(scene.world_position(tile), Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(scene.find_by_name("tile:d3"), Some(tile));
        assert_eq!(scene.find_by_name_from(board, "Board"), None);
    }

    #[test]
    fn clear_children_drops_the_whole_subtree() {
        let mut scene = Scene::new();
        let group = scene.add(scene.root(), "MovementOptions", NodeKind::Group, Vec3::ZERO);
        let inner = scene.add(group, "inner", NodeKind::Group, Vec3::ZERO);
        scene.add(inner, "leaf", cube(), Vec3::ZERO);
        assert_eq!(scene.len(), 4);

        scene.clear_children(group);
        assert_eq!(scene.len(), 2);
        assert!(scene.children(group).is_empty());
        assert!(scene.find_by_name("leaf").is_none());

        scene.clear_children(group);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn cleared_slots_are_reused_and_old_handles_go_stale() {
        let mut scene = Scene::new();
        let group = scene.add(scene.root(), "MovementOptions", NodeKind::Group, Vec3::ZERO);
        let first = scene.add(group, "moveTo:a2", cube(), Vec3::ZERO);

        scene.clear_children(group);
        let second = scene.add(group, "moveTo:b2", cube(), Vec3::ZERO);
        assert_eq!(scene.capacity(), 3);
        assert_ne!(first, second);
        assert!(scene.node(first).is_none());
        assert!(!scene.set_position(first, Vec3::X));
        assert_eq!(scene.node(second).unwrap().name, "moveTo:b2");
    }

    #[test]
    fn repeated_clear_and_refill_keeps_the_arena_bounded() {
        let mut scene = Scene::new();
        let group = scene.add(scene.root(), "MovementOptions", NodeKind::Group, Vec3::ZERO);
        for _ in 0..1_000 {
            scene.clear_children(group);
            for file in ["a", "b", "c", "d", "e", "f", "g", "h"] {
                let name = format!("moveTo:{file}3");
                let indicator = scene.add(group, name, NodeKind::Group, Vec3::ZERO);
                scene.add(indicator, "mesh", cube(), Vec3::ZERO);
            }
        }
        assert_eq!(scene.len(), 2 + 16);
        assert_eq!(scene.capacity(), 2 + 16);
    }

    #[test]
    fn raycast_orders_hits_nearest_first() {
        let mut scene = Scene::new();
        let low = scene.add(scene.root(), "low", cube(), Vec3::ZERO);
        let high = scene.add(scene.root(), "high", cube(), Vec3::new(0.0, 3.0, 0.0));
        scene.add(scene.root(), "aside", cube(), Vec3::new(5.0, 0.0, 0.0));

        let hits = scene.raycast(&Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y));
        let order: Vec<NodeId> = hits.iter().map(|hit| hit.node).collect();
        assert_eq!(order, vec![high, low]);
    }

    #[test]
    fn instantiate_clones_model_children() {
        let mut scene = Scene::new();
        let model = Model::new(NodeKind::Group).with_child("body", Model::new(cube()));
        let first = scene.instantiate(scene.root(), "piece:shah-white", &model, Vec3::X);
        let second = scene.instantiate(scene.root(), "piece:shah-black", &model, Vec3::Z);
        assert_ne!(first, second);
        assert_eq!(scene.children(first).len(), 1);
        let body = scene.children(second)[0];
        assert_eq!(scene.world_position(body), Vec3::Z);
    }
}
