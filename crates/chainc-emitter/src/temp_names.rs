//! Collision-free temporary names.
//!
//! Names follow the `_ref`, `_ref2`, `_ref3`, ... pattern. The generator
//! starts out reserving every identifier spelled in the file, so a temporary
//! can never shadow a binding or a global the file reads.

use dashmap::{DashMap, DashSet};
use tracing::trace;

const DEFAULT_HINT: &str = "ref";

/// Supplies a fresh binding name for each rewritten call site.
pub trait TempNameProvider: Send + Sync {
    /// A name no earlier call returned and no reserved identifier uses.
    fn fresh(&self, hint: &str) -> String;
}

/// Thread-safe `TempNameProvider`.
///
/// Inserting a candidate into `reserved` claims it; concurrent callers never
/// receive the same name.
#[derive(Default)]
pub struct UniqueNameGenerator {
    reserved: DashSet<String>,
    /// Next suffix to try per sanitized hint
    counters: DashMap<String, u32>,
}

impl UniqueNameGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that never returns any of `names`.
    pub fn with_reserved<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let generator = Self::new();
        for name in names {
            generator.reserve(name);
        }
        generator
    }

    /// Mark `name` as taken.
    pub fn reserve(&self, name: impl Into<String>) {
        self.reserved.insert(name.into());
    }

    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    fn next_suffix(&self, base: &str) -> u32 {
        let mut counter = self.counters.entry(base.to_string()).or_insert(1);
        let suffix = *counter;
        *counter += 1;
        suffix
    }
}

impl TempNameProvider for UniqueNameGenerator {
    fn fresh(&self, hint: &str) -> String {
        let base = sanitize_hint(hint);
        loop {
            let suffix = self.next_suffix(&base);
            let name = if suffix <= 1 {
                format!("_{base}")
            } else {
                format!("_{base}{suffix}")
            };
            if self.reserved.insert(name.clone()) {
                trace!(hint, name = %name, "allocated temporary");
                return name;
            }
        }
    }
}

/// Reduce `hint` to identifier characters without leading underscores or
/// trailing digits, so `_ref2` and `ref` share a counter.
fn sanitize_hint(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        .collect();
    let trimmed = cleaned
        .trim_start_matches('_')
        .trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.is_empty() {
        DEFAULT_HINT.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "../tests/temp_names.rs"]
mod tests;
