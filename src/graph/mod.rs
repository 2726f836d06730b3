// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Declarative resource graph.
//!
//! Nodes are declared with explicit dependency edges. The graph knows nothing
//! about Kubernetes: it only validates the edges and hands out a deterministic
//! submission order. Every node added is stamped with the graph's owner so the
//! whole set can be found and torn down together.

mod node;

pub use node::{ResourceId, ResourceNode};

use crate::error::{DirectoryError, Result};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Implemented by node payloads that can carry an ownership tag
pub trait Owned {
    fn tag_owner(&mut self, owner: &str);
}

#[derive(Clone, Debug)]
pub struct ResourceGraph<T> {
    owner: String,
    nodes: Vec<ResourceNode<T>>,
    index: HashMap<ResourceId, usize>,
}

impl<T: Owned> ResourceGraph<T> {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Declare a node. Dependencies may reference nodes declared later;
    /// they are only checked by [`ResourceGraph::validate`].
    pub fn add(&mut self, mut node: ResourceNode<T>) -> Result<ResourceId> {
        if self.index.contains_key(&node.id) {
            return Err(DirectoryError::DuplicateNode(node.id));
        }
        node.spec.tag_owner(&self.owner);
        let id = node.id.clone();
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }
}

impl<T> ResourceGraph<T> {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&ResourceNode<T>> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = &ResourceNode<T>> {
        self.nodes.iter()
    }

    /// Nodes that declare a direct dependency on `id`
    pub fn dependents_of<'a>(&'a self, id: &'a ResourceId) -> impl Iterator<Item = &'a ResourceId> {
        self.nodes
            .iter()
            .filter(move |n| n.depends_on.contains(id))
            .map(|n| &n.id)
    }

    pub fn has_dependents(&self, id: &ResourceId) -> bool {
        self.dependents_of(id).next().is_some()
    }

    /// Reject dangling references and cycles.
    pub fn validate(&self) -> Result<()> {
        self.topological_order().map(|_| ())
    }

    /// Submission order: every node comes after all of its dependencies.
    /// Ties are broken by declaration order so the result is stable.
    pub fn topological_order(&self) -> Result<Vec<&ResourceNode<T>>> {
        let mut in_degree = vec![0usize; self.nodes.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];

        for (i, node) in self.nodes.iter().enumerate() {
            for dep in &node.depends_on {
                let Some(&d) = self.index.get(dep) else {
                    return Err(DirectoryError::DanglingDependency {
                        node: node.id.clone(),
                        missing: dep.clone(),
                    });
                };
                in_degree[i] += 1;
                dependents[d].push(i);
            }
        }

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 0)
            .map(|(i, _)| Reverse(i))
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(i)) = ready.pop() {
            order.push(&self.nodes[i]);
            for &dependent in &dependents[i] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if order.len() < self.nodes.len() {
            let stuck = in_degree
                .iter()
                .enumerate()
                .filter(|&(_, &deg)| deg > 0)
                .map(|(i, _)| self.nodes[i].id.clone())
                .collect();
            return Err(DirectoryError::DependencyCycle(stuck));
        }

        Ok(order)
    }
}
