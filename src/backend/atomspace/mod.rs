//! AtomSpace: the shared hypergraph store.
//!
//! Interns atoms by structural identity so that every distinct term is held
//! once, and keeps an incoming-set index (child → parents) for recursive
//! removal and definition lookup.
//!
//! `AtomSpace` is a handle: cloning it is O(1) and every clone sees the same
//! tables, guarded by a `parking_lot::RwLock`. Distinct instantiators can
//! therefore share one store across threads.


use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::grounded::{ExecError, ExecResult};
use super::models::{Handle, HandleSeq, TruthValue};
use super::types::Type;

/// Store usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtomSpaceStats {
    /// Atoms currently held.
    pub atoms: usize,
    /// `add_atom` calls.
    pub adds: u64,
    /// `remove_atom` calls that removed the requested atom.
    pub removals: u64,
}

#[derive(Default)]
struct AtomTable {
    /// Canonical handle for every interned atom.
    atoms: HashSet<Handle>,
    /// Child → parents that contain it.
    incoming: HashMap<Handle, HashSet<Handle>>,
    adds: u64,
    removals: u64,
}

impl AtomTable {
    fn intern(&mut self, h: &Handle) -> Handle {
        if let Some(existing) = self.atoms.get(h) {
            let tv = h.truth_value();
            if !tv.is_default() && !existing.same_ref(h) {
                existing.set_truth_value(tv);
            }
            return existing.clone();
        }

        let canonical = if h.is_link() {
            let mut changed = false;
            let outgoing: HandleSeq = h
                .outgoing()
                .iter()
                .map(|child| {
                    let c = self.intern(child);
                    changed |= !c.same_ref(child);
                    c
                })
                .collect();
            if changed {
                Handle::link_with_tv(h.ty(), outgoing, h.truth_value())
            } else {
                h.clone()
            }
        } else {
            h.clone()
        };

        for child in canonical.outgoing() {
            self.incoming
                .entry(child.clone())
                .or_default()
                .insert(canonical.clone());
        }
        self.atoms.insert(canonical.clone());
        canonical
    }

    fn extract(&mut self, h: &Handle, recursive: bool) -> bool {
        let canonical = match self.atoms.get(h) {
            Some(c) => c.clone(),
            None => return false,
        };

        let parents: Vec<Handle> = self
            .incoming
            .get(&canonical)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        if !parents.is_empty() {
            if !recursive {
                return false;
            }
            for parent in &parents {
                self.extract(parent, true);
            }
        }

        for child in canonical.outgoing() {
            if let Some(set) = self.incoming.get_mut(child) {
                set.remove(&canonical);
                if set.is_empty() {
                    self.incoming.remove(child);
                }
            }
        }
        self.incoming.remove(&canonical);
        self.atoms.remove(&canonical);
        true
    }
}

/// Thread-safe, cheaply clonable hypergraph store.
#[derive(Clone, Default)]
pub struct AtomSpace {
    table: Arc<RwLock<AtomTable>>,
}

impl AtomSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `h` (and, bottom-up, its outgoing set), returning the canonical handle.
    ///
    /// If an equal atom is already present, that atom is returned; a
    /// non-default truth value on `h` overwrites the stored one.
    pub fn add_atom(&self, h: &Handle) -> Handle {
        let mut table = self.table.write();
        table.adds += 1;
        let canonical = table.intern(h);
        trace!(target: "atomese_instantiator::atomspace::add_atom", atom = %canonical);
        canonical
    }

    /// Build and intern a node.
    pub fn add_node(&self, ty: Type, name: impl Into<String>) -> Handle {
        self.add_atom(&Handle::node(ty, name))
    }

    /// Build and intern a link.
    pub fn add_link(&self, ty: Type, outgoing: HandleSeq) -> Handle {
        self.add_atom(&Handle::link(ty, outgoing))
    }

    /// Remove `h` from the store.
    ///
    /// Returns false if `h` is absent, or if it still has an incoming set and
    /// `recursive` is false. With `recursive`, every atom containing `h` is
    /// removed first.
    pub fn remove_atom(&self, h: &Handle, recursive: bool) -> bool {
        let mut table = self.table.write();
        let removed = table.extract(h, recursive);
        if removed {
            table.removals += 1;
        }
        debug!(
            target: "atomese_instantiator::atomspace::remove_atom",
            atom = %h, recursive, removed
        );
        removed
    }

    pub fn contains(&self, h: &Handle) -> bool {
        self.table.read().atoms.contains(h)
    }

    /// Canonical handle of an atom equal to `h`, if present.
    pub fn get(&self, h: &Handle) -> Option<Handle> {
        self.table.read().atoms.get(h).cloned()
    }

    /// Atoms whose outgoing set contains `h`.
    pub fn incoming(&self, h: &Handle) -> HandleSeq {
        self.table
            .read()
            .incoming
            .get(h)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of every atom in the store, in no particular order.
    pub fn atoms(&self) -> HandleSeq {
        self.table.read().atoms.iter().cloned().collect()
    }

    /// Atoms whose type is-a `ty`.
    pub fn atoms_of_type(&self, ty: Type) -> HandleSeq {
        self.table
            .read()
            .atoms
            .iter()
            .filter(|h| h.ty().is_a(ty))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.read().atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().atoms.is_empty()
    }

    pub fn stats(&self) -> AtomSpaceStats {
        let table = self.table.read();
        AtomSpaceStats {
            atoms: table.atoms.len(),
            adds: table.adds,
            removals: table.removals,
        }
    }

    /// Body of the `DefineLink` whose first member is `name`.
    pub fn definition_of(&self, name: &Handle) -> ExecResult<Handle> {
        let table = self.table.read();
        table
            .incoming
            .get(name)
            .and_then(|parents| {
                parents.iter().find(|link| {
                    link.ty() == Type::DefineLink
                        && link.arity() == 2
                        && link.outgoing_atom(0) == Some(name)
                })
            })
            .and_then(|define| define.outgoing_atom(1).cloned())
            .ok_or_else(|| ExecError::MissingDefinition(name.to_string()))
    }

    /// Intern `(DefineLink name body)`.
    pub fn define(&self, name: &Handle, body: &Handle) -> Handle {
        self.add_link(Type::DefineLink, vec![name.clone(), body.clone()])
    }

    /// Set the truth value of the stored copy of `h`, interning it if needed.
    pub fn set_truth_value(&self, h: &Handle, tv: TruthValue) -> Handle {
        let canonical = self.add_atom(h);
        canonical.set_truth_value(tv);
        canonical
    }
}

impl fmt::Debug for AtomSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomSpace")
            .field("stats", &self.stats())
            .finish()
    }
}
