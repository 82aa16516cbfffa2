//! Sub-case naming
//!
//! A sub-case name becomes one `/`-separated segment of its full name.
//! Whitespace turns into `_` so names stay one token wide in logs. An empty
//! name becomes `#00`, and a name already used under the same parent gets
//! a `#01`, `#02`, ... suffix, so no two sub-cases of a parent share a full
//! name.

use std::collections::HashMap;

/// Turn a sub-case name into a single path segment
///
/// `/` is left alone so callers can address nested levels explicitly.
pub(crate) fn sanitize_segment(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Segments handed out under one parent
#[derive(Debug, Default)]
pub(crate) struct SubNames {
    // next suffix number per segment already handed out
    seen: HashMap<String, u32>,
}

impl SubNames {
    /// Unique segment for the sub-case called `name`
    pub(crate) fn unique(&mut self, name: &str) -> String {
        let mut segment = sanitize_segment(name);
        let mut empty = segment.is_empty();

        loop {
            match self.seen.get(&segment).copied() {
                None if !empty => {
                    self.seen.insert(segment.clone(), 1);
                    return segment;
                }
                next => {
                    let next = next.unwrap_or(0);
                    self.seen.insert(segment.clone(), next + 1);
                    segment = format!("{segment}#{next:02}");
                    empty = false;
                }
            }
        }
    }
}
