//! Fixed-depth balanced kd-tree, arena-backed.
//!
//! The source builds this with heap nodes linked by raw pointers and tears it
//! down explicitly. Here the whole tree lives in one contiguous `Vec<Node>`
//! addressed by index; it is released automatically when the tree (and with
//! it, the owning bin) drops.

use crate::item::ItemHandle;

#[derive(Debug)]
struct Node {
    is_leaf: bool,
    partition_point: [f64; 3],
    left: u32,
    right: u32,
    children: Vec<ItemHandle>,
}

#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<Node>,
    requested_depth: u32,
}

impl KdTree {
    /// `max_dims` is the bin's `(width, depth, height)`. `requested_depth`
    /// bounds how many axis splits are made before a node becomes a leaf.
    pub fn new(requested_depth: u32, max_dims: [f64; 3]) -> Self {
        let mut tree = KdTree {
            nodes: Vec::new(),
            requested_depth,
        };
        let root_point = [max_dims[0] / 2.0, max_dims[1] / 2.0, max_dims[2] / 2.0];
        let mins = [0.0, 0.0, 0.0];
        tree.build(0, root_point, mins, max_dims, 0);
        tree
    }

    /// Returns the index of the node just created.
    fn build(&mut self, depth: u32, partition_point: [f64; 3], mins: [f64; 3], maxs: [f64; 3], previous_axis: usize) -> u32 {
        let axis = (depth % 3) as usize;
        let mut point = partition_point;
        if depth > 0 {
            point[previous_axis] = (mins[previous_axis] + maxs[previous_axis]) / 2.0;
        }

        let idx = self.nodes.len() as u32;
        self.nodes.push(Node {
            is_leaf: depth > self.requested_depth,
            partition_point: point,
            left: u32::MAX,
            right: u32::MAX,
            children: Vec::new(),
        });

        if depth > self.requested_depth {
            return idx;
        }

        let mut left_maxs = maxs;
        left_maxs[axis] = point[axis];
        let mut right_mins = mins;
        right_mins[axis] = point[axis];

        let left = self.build(depth + 1, point, mins, left_maxs, axis);
        let right = self.build(depth + 1, point, right_mins, maxs, axis);
        self.nodes[idx as usize].left = left;
        self.nodes[idx as usize].right = right;
        idx
    }

    pub fn insert(&mut self, handle: ItemHandle, max_position: [f64; 3]) {
        let mut idx = 0u32;
        let mut depth = 0u32;
        loop {
            let node = &self.nodes[idx as usize];
            if node.is_leaf {
                self.nodes[idx as usize].children.push(handle);
                return;
            }
            let axis = (depth % 3) as usize;
            idx = if max_position[axis] < node.partition_point[axis] {
                node.left
            } else {
                node.right
            };
            depth += 1;
        }
    }

    /// Gathers a super-set of items whose furthest point could intersect the
    /// axis-aligned box `[start, start + extent]`. Callers must still run an
    /// exact intersection check on every candidate returned.
    pub fn query(&self, start: [f64; 3], extent: [f64; 3], out: &mut Vec<ItemHandle>) {
        self.query_node(0, 0, start, extent, out);
    }

    fn query_node(&self, idx: u32, depth: u32, start: [f64; 3], extent: [f64; 3], out: &mut Vec<ItemHandle>) {
        let node = &self.nodes[idx as usize];
        if node.is_leaf {
            out.extend_from_slice(&node.children);
            return;
        }
        let axis = (depth % 3) as usize;
        let p = node.partition_point[axis];
        if start[axis] < p {
            self.query_node(node.left, depth + 1, start, extent, out);
        }
        if p < start[axis] + extent[axis] {
            self.query_node(node.right, depth + 1, start, extent, out);
        }
    }
}
