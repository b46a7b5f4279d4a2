//! The body tree. A catalog is built once by the caller and passed by reference
//! into every computation that needs cross-body information.

use std::collections::HashMap;

use thiserror::Error;

use crate::body::{Body, BodyDescriptor, BodyId};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("body '{0}' appears more than once in the catalog")]
    DuplicateName(String),
    #[error("body '{body}' references unknown parent '{parent}'")]
    UnknownParent { body: String, parent: String },
    #[error("catalog has no root body")]
    NoRoot,
    #[error("catalog has more than one root body: '{0}' and '{1}'")]
    MultipleRoots(String, String),
    #[error("body '{0}' orbits a parent but has no orbit")]
    MissingOrbit(String),
    #[error("body '{0}' is part of a parent cycle")]
    Cycle(String),
    #[error("unknown body id {0:?}")]
    UnknownBody(BodyId),
}

/// Incrementally collects bodies and parent links before validating the tree.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    bodies: Vec<Body>,
    parents: HashMap<BodyId, BodyId>,
}

impl CatalogBuilder {
    pub fn add_body(&mut self, descriptor: BodyDescriptor) -> BodyId {
        let id = BodyId(self.bodies.len());
        self.bodies.push(Body::from_descriptor(id, descriptor));
        id
    }

    /// Record that `child` orbits `parent`. A later call for the same child replaces the link.
    pub fn attach(&mut self, child: BodyId, parent: BodyId) -> &mut Self {
        self.parents.insert(child, parent);
        self
    }

    /// Look up a body added so far by name (case-insensitive).
    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
            .map(|b| b.id)
    }

    /// Validate the tree and link primaries and secondaries.
    pub fn build(mut self) -> Result<Catalog, CatalogError> {
        let mut names = HashMap::new();
        for body in &self.bodies {
            if names
                .insert(body.name.to_ascii_uppercase(), body.id)
                .is_some()
            {
                return Err(CatalogError::DuplicateName(body.name.clone()));
            }
        }

        let mut root: Option<BodyId> = None;
        for index in 0..self.bodies.len() {
            let id = BodyId(index);
            match self.parents.get(&id).copied() {
                Some(parent) => {
                    if parent.0 >= self.bodies.len() {
                        return Err(CatalogError::UnknownBody(parent));
                    }
                    let body = &mut self.bodies[index];
                    if body.orbit.is_none() {
                        return Err(CatalogError::MissingOrbit(body.name.clone()));
                    }
                    if let Some(orbit) = body.orbit.as_mut() {
                        orbit.primary = Some(parent);
                    }
                    body.primary = Some(parent);
                    self.bodies[parent.0].secondaries.insert(id);
                }
                None => {
                    if let Some(existing) = root {
                        return Err(CatalogError::MultipleRoots(
                            self.bodies[existing.0].name.clone(),
                            self.bodies[index].name.clone(),
                        ));
                    }
                    root = Some(id);
                }
            }
        }
        let root = root.ok_or(CatalogError::NoRoot)?;

        let catalog = Catalog {
            bodies: self.bodies,
            root,
        };
        for body in &catalog.bodies {
            // every chain must end at the root within `len` hops
            let mut current = body.id;
            let mut hops = 0;
            while let Some(parent) = catalog.bodies[current.0].primary {
                current = parent;
                hops += 1;
                if hops > catalog.bodies.len() {
                    return Err(CatalogError::Cycle(body.name.clone()));
                }
            }
            if current != root {
                return Err(CatalogError::Cycle(body.name.clone()));
            }
        }
        Ok(catalog)
    }
}

/// Tree of bodies rooted at the system's star.
#[derive(Debug, Clone)]
pub struct Catalog {
    bodies: Vec<Body>,
    root: BodyId,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// As [`Catalog::body`] but with an error for unknown ids.
    pub fn get(&self, id: BodyId) -> Result<&Body, CatalogError> {
        self.body(id).ok_or(CatalogError::UnknownBody(id))
    }

    /// Find a body by name, ignoring ASCII case.
    pub fn by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub fn root(&self) -> &Body {
        &self.bodies[self.root.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn primary_of(&self, id: BodyId) -> Option<&Body> {
        self.body(self.body(id)?.primary?)
    }

    /// Chain of primaries from the body's parent up to the root.
    pub fn ancestors(&self, id: BodyId) -> Vec<BodyId> {
        let mut chain = Vec::new();
        let mut current = self.body(id).and_then(|b| b.primary);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.body(parent).and_then(|b| b.primary);
        }
        chain
    }

    /// Nearest body that both `a` and `b` descend from (or are).
    pub fn common_ancestor(&self, a: BodyId, b: BodyId) -> Option<BodyId> {
        let mut lineage_a = vec![a];
        lineage_a.extend(self.ancestors(a));
        std::iter::once(b)
            .chain(self.ancestors(b))
            .find(|candidate| lineage_a.contains(candidate))
    }
}
