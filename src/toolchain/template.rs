//! Flake templates with named substitution slots
//!
//! Templates are `.nix` files embedded at compile time. A slot is written
//! `@name@` where `name` is lowercase ASCII, digits or underscores. Any other
//! `@` is copied through verbatim. Rendering is strict: every slot in the
//! template must be given a value and every value must name a slot.

use crate::error::{EnvsError, EnvsResult};
use std::collections::BTreeSet;

/// An embedded flake template
#[derive(Debug, Clone, Copy)]
pub struct Template {
    name: &'static str,
    source: &'static str,
}

impl Template {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }

    /// Slot names referenced by the template, sorted
    pub fn slots(&self) -> BTreeSet<&'static str> {
        let mut slots = BTreeSet::new();
        let mut rest = self.source;
        while let Some(start) = rest.find('@') {
            let after = &rest[start + 1..];
            match slot_name(after) {
                Some(name) => {
                    slots.insert(name);
                    rest = &after[name.len() + 1..];
                }
                None => rest = after,
            }
        }
        slots
    }

    /// Substitute `values` into the template
    pub fn render(&self, values: &[(&str, &str)]) -> EnvsResult<String> {
        let mut out = String::with_capacity(self.source.len() + 256);
        let mut used = BTreeSet::new();
        let mut rest = self.source;

        while let Some(start) = rest.find('@') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match slot_name(after) {
                Some(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            EnvsError::Internal(format!(
                                "template {}: no value for slot @{}@",
                                self.name, name
                            ))
                        })?;
                    out.push_str(value);
                    used.insert(name);
                    rest = &after[name.len() + 1..];
                }
                None => {
                    out.push('@');
                    rest = after;
                }
            }
        }
        out.push_str(rest);

        if let Some((key, _)) = values.iter().find(|(key, _)| !used.contains(key)) {
            return Err(EnvsError::Internal(format!(
                "template {}: unknown slot @{}@",
                self.name, key
            )));
        }

        Ok(out)
    }
}

/// Parse a slot name at the start of `s`, which must be followed by a closing `@`
fn slot_name(s: &str) -> Option<&str> {
    let len = s
        .bytes()
        .take_while(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_')
        .count();
    if len == 0 || s.as_bytes().get(len) != Some(&b'@') {
        return None;
    }
    Some(&s[..len])
}

/// Format a package list as `pkgs.<name>` lines for a `packages = [ ... ]` block.
///
/// The first line carries no indent since the template already positions it.
pub fn package_lines(packages: &[&str], indent: usize) -> String {
    let pad = " ".repeat(indent);
    packages
        .iter()
        .map(|p| format!("pkgs.{}", p))
        .collect::<Vec<_>>()
        .join(&format!("\n{}", pad))
}
