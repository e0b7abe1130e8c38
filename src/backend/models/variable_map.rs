//! Variable groundings handed to the instantiator.
//!
//! Most instantiations bind a handful of variables, so the map adapts to
//! its size the same way pattern-match bindings do:
//! - Empty: no allocation
//! - Single: one inline pair
//! - Small: `SmallVec` with 8 inline slots, spilling to the heap beyond that
//!
//! Keys are compared structurally, so a freshly built `(VariableNode "$x")`
//! finds the grounding registered under an interned one.

use smallvec::SmallVec;

use super::Handle;

/// Map from variables (`VariableNode` / `GlobNode`) to their groundings.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum VariableMap {
    #[default]
    Empty,
    Single((Handle, Handle)),
    Small(Box<SmallVec<[(Handle, Handle); 8]>>),
}

impl VariableMap {
    #[inline]
    pub fn new() -> Self {
        VariableMap::Empty
    }

    /// Grounding of `var`, if any.
    #[inline]
    pub fn get(&self, var: &Handle) -> Option<&Handle> {
        match self {
            VariableMap::Empty => None,
            VariableMap::Single((k, v)) => (k == var).then_some(v),
            VariableMap::Small(pairs) => pairs.iter().find(|(k, _)| k == var).map(|(_, v)| v),
        }
    }

    #[inline]
    pub fn contains(&self, var: &Handle) -> bool {
        self.get(var).is_some()
    }

    /// Bind `var` to `value`, replacing an earlier grounding of the same variable.
    ///
    /// Transitions: Empty → Single → Small.
    pub fn insert(&mut self, var: Handle, value: Handle) {
        match self {
            VariableMap::Empty => {
                *self = VariableMap::Single((var, value));
            }
            VariableMap::Single((k, v)) => {
                if *k == var {
                    *v = value;
                    return;
                }
                let mut pairs = SmallVec::new();
                pairs.push((k.clone(), v.clone()));
                pairs.push((var, value));
                *self = VariableMap::Small(Box::new(pairs));
            }
            VariableMap::Small(pairs) => {
                if let Some(slot) = pairs.iter_mut().find(|(k, _)| *k == var) {
                    slot.1 = value;
                } else {
                    pairs.push((var, value));
                }
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            VariableMap::Empty => 0,
            VariableMap::Single(_) => 1,
            VariableMap::Small(pairs) => pairs.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(variable, grounding)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Handle, &Handle)> {
        let slice: &[(Handle, Handle)] = match self {
            VariableMap::Empty => &[],
            VariableMap::Single(pair) => std::slice::from_ref(pair),
            VariableMap::Small(pairs) => pairs.as_slice(),
        };
        slice.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(Handle, Handle)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (Handle, Handle)>>(iter: I) -> Self {
        let mut map = VariableMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map() {
        let map = VariableMap::new();
        assert!(map.is_empty());
        assert_eq!(map.get(&Handle::variable("$x")), None);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_single_binding() {
        let mut map = VariableMap::new();
        map.insert(Handle::variable("$x"), Handle::concept("A"));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Handle::variable("$x")), Some(&Handle::concept("A")));
        assert_eq!(map.get(&Handle::variable("$y")), None);
        assert!(matches!(map, VariableMap::Single(_)));
    }

    #[test]
    fn test_transition_to_small() {
        let mut map = VariableMap::new();
        map.insert(Handle::variable("$x"), Handle::concept("A"));
        map.insert(Handle::variable("$y"), Handle::concept("B"));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Handle::variable("$y")), Some(&Handle::concept("B")));
        assert!(matches!(map, VariableMap::Small(_)));
    }

    #[test]
    fn test_insert_replaces() {
        let mut map = VariableMap::new();
        map.insert(Handle::variable("$x"), Handle::concept("A"));
        map.insert(Handle::variable("$x"), Handle::concept("B"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Handle::variable("$x")), Some(&Handle::concept("B")));

        map.insert(Handle::variable("$y"), Handle::concept("C"));
        map.insert(Handle::variable("$y"), Handle::concept("D"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Handle::variable("$y")), Some(&Handle::concept("D")));
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let map: VariableMap = (0..12)
            .map(|i| (Handle::variable(format!("$v{}", i)), Handle::number(i as f64)))
            .collect();
        assert_eq!(map.len(), 12);
        assert_eq!(
            map.get(&Handle::variable("$v11")),
            Some(&Handle::number(11.0))
        );
        let order: Vec<_> = map.iter().map(|(k, _)| k.name().unwrap_or_default().to_string()).collect();
        assert_eq!(order[0], "$v0");
        assert_eq!(order[11], "$v11");
    }

    #[test]
    fn test_variable_and_glob_are_distinct_keys() {
        let mut map = VariableMap::new();
        map.insert(Handle::variable("$x"), Handle::concept("A"));
        assert_eq!(map.get(&Handle::glob("$x")), None);
    }
}
