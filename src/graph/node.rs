// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

/// Identity of a declared resource, unique within a graph
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId {
    kind: String,
    name: String,
}

impl ResourceId {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

#[derive(Clone, Debug)]
pub struct ResourceNode<T> {
    pub id: ResourceId,
    pub spec: T,
    pub depends_on: Vec<ResourceId>,
    /// Protected nodes are never deleted on teardown
    pub protect: bool,
}

impl<T> ResourceNode<T> {
    pub fn new(id: ResourceId, spec: T) -> Self {
        Self {
            id,
            spec,
            depends_on: Vec::new(),
            protect: false,
        }
    }

    /// Add a dependency edge. Repeated edges are collapsed.
    pub fn depends_on(mut self, id: ResourceId) -> Self {
        if !self.depends_on.contains(&id) {
            self.depends_on.push(id);
        }
        self
    }

    pub fn protected(mut self, protect: bool) -> Self {
        self.protect = protect;
        self
    }
}
