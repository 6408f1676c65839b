//! The die's visual node graph.
//!
//! A [`DieModel`] is a small arena of named nodes: one carries the renderable
//! triangle mesh, others act as markers (face anchors) or grouping nodes.
//! Handles are plain indices into the arena, so nothing here relies on
//! reference identity, and the graph can be cloned or sent across threads.

use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Stable handle to a node inside a [`DieModel`] arena.
///
/// Handles are only minted by the arena that owns the node; indexing with a
/// handle from a different model is a logic error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Local translation/rotation/scale of a node, composed parent-to-child.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::repeat(1.0),
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vector3<f32>) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Apply scale, then rotation, then translation to a point.
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let scaled = Point3::from(point.coords.component_mul(&self.scale));
        self.rotation.transform_point(&scaled) + self.translation
    }

    /// Compose `self * child`, with `self` on the parent side.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self
                .transform_point(&Point3::from(child.translation))
                .coords,
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }
}

/// Triangle mesh attached to a node.
///
/// `positions` is the vertex buffer. When `indices` is present it holds
/// triangle index triples; when absent the positions are an unindexed
/// triangle list (three consecutive vertices per triangle).
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Point3<f32>>,
    pub indices: Option<Vec<u32>>,
}

/// One node of the graph: a name, a local transform, an optional mesh.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<MeshData>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Arena-backed node hierarchy for one die.
#[derive(Clone, Debug)]
pub struct DieModel {
    nodes: Vec<Node>,
}

impl DieModel {
    /// Create a model containing only a root node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                name: name.into(),
                transform: Transform::default(),
                mesh: None,
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child node under `parent` and return its handle.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.into(),
            transform: Transform::default(),
            mesh: None,
            parent: Some(parent),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate all nodes in arena order (root first).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// The node carrying the renderable mesh. When several nodes carry one,
    /// the last wins, matching a depth-first overwrite scan.
    pub fn mesh_node(&self) -> Option<NodeId> {
        self.nodes()
            .filter(|(_, node)| node.mesh.is_some())
            .map(|(id, _)| id)
            .last()
    }

    /// Transform of `id` composed down from the root, root included.
    pub fn world_transform(&self, id: NodeId) -> Transform {
        let node = self.node(id);
        match node.parent {
            Some(parent) => self.world_transform(parent).mul_transform(&node.transform),
            None => node.transform.clone(),
        }
    }

    /// Transform of `id` composed down from (but excluding) the root.
    ///
    /// The root's own transform tracks the rigid body pose at runtime, so
    /// anything baked against the rest pose must leave it out.
    pub fn root_relative_transform(&self, id: NodeId) -> Transform {
        let node = self.node(id);
        match node.parent {
            Some(parent) => self
                .root_relative_transform(parent)
                .mul_transform(&node.transform),
            None => Transform::default(),
        }
    }
}
