// WNet: Typed IP-over-WDM Network Model
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Attribute bag
//!
//! Every element of the substrate carries a bag of free-form string attributes. The typed
//! domain model stores its own state in these bags, but only at the boundary: reading is done
//! with typed getters, which fall back to a default if the attribute is missing or cannot be
//! parsed.

use std::collections::btree_map::Iter;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Key-value store of string attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute bag
    pub fn new() -> Self {
        Self { values: BTreeMap::new() }
    }

    /// Set an attribute. Any value that can be displayed can be stored, it is converted into its
    /// string representation.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) {
        self.values.insert(key.into(), value.to_string());
    }

    /// Remove an attribute, returning the old value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Returns the raw string value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Returns true if the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the attribute as string, or the default if it is missing.
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Returns the attribute parsed as `f64`. If the attribute is missing or is not a number, the
    /// default is returned.
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        self.get_f64_opt(key).unwrap_or(default)
    }

    /// Returns the attribute parsed as `f64`, or `None` if it is missing or is not a number.
    pub fn get_f64_opt(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|s| s.trim().parse().ok())
    }

    /// Returns the attribute parsed as boolean. Accepts `true` / `false` as well as `1` / `0`.
    /// If the attribute is missing or cannot be parsed, the default is returned.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|s| s.trim()) {
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            _ => default,
        }
    }

    /// Iterate over all attributes, ordered by key.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.values.iter()
    }

    /// Number of attributes stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no attributes stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn typed_defaults() {
        let mut a = Attributes::new();
        assert_eq!(a.get_f64("x", 5.0), 5.0);
        assert!(!a.get_bool("b", false));
        assert_eq!(a.get_str("s", "default"), "default");

        a.set("x", 1.5);
        a.set("b", true);
        a.set("s", "hello");
        a.set("n", "not a number");
        assert_eq!(a.get_f64("x", 5.0), 1.5);
        assert!(a.get_bool("b", false));
        assert_eq!(a.get_str("s", "default"), "hello");
        assert_eq!(a.get_f64("n", 2.0), 2.0);
        assert_eq!(a.get_f64_opt("n"), None);

        a.set("b", 0);
        assert!(!a.get_bool("b", true));
    }
}
