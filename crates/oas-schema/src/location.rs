//! # Instance Locations
//!
//! An [`InstanceLocation`] is a stack-allocated linked list from a nested
//! value back to the instance root. Validators extend it as they recurse and
//! only render it to a string when a failure is reported.
//!
//! ## Rendering
//!
//! | Position                      | Rendered      |
//! |-------------------------------|---------------|
//! | root                          | `.`           |
//! | property `id` of the root     | `id`          |
//! | property `id` of `owner`      | `owner.id`    |
//! | element 1 of the root         | `[1]`         |
//! | property `x` of `items[0]`    | `items[0].x`  |
//! | property `a b` of the root    | `['a b']`     |

use std::fmt;

/// One step from a parent value to a child value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// An object property.
    Property(&'a str),
    /// An array element.
    Index(usize),
}

/// The position of a value within its root instance.
#[derive(Debug, Clone, Copy)]
pub struct InstanceLocation<'a> {
    parent: Option<&'a InstanceLocation<'a>>,
    segment: Option<Segment<'a>>,
}

impl Default for InstanceLocation<'_> {
    fn default() -> Self {
        Self::root()
    }
}

impl<'a> InstanceLocation<'a> {
    /// The instance root.
    pub const fn root() -> Self {
        Self {
            parent: None,
            segment: None,
        }
    }

    /// The location of property `name` of the value at `self`.
    pub fn property<'b>(&'b self, name: &'b str) -> InstanceLocation<'b> {
        InstanceLocation {
            parent: Some(self),
            segment: Some(Segment::Property(name)),
        }
    }

    /// The location of element `index` of the array at `self`.
    pub fn index<'b>(&'b self, index: usize) -> InstanceLocation<'b> {
        InstanceLocation {
            parent: Some(self),
            segment: Some(Segment::Index(index)),
        }
    }

    /// Whether this is the instance root.
    pub fn is_root(&self) -> bool {
        self.segment.is_none()
    }

    /// Segments from the root down to this location.
    pub fn segments(&self) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(location) = current {
            if let Some(segment) = location.segment {
                segments.push(segment);
            }
            current = location.parent;
        }
        segments.reverse();
        segments
    }
}

/// Whether a property name must be written in bracket form.
fn needs_brackets(name: &str) -> bool {
    name.is_empty()
        || name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '.' | '\'' | '"' | '/' | '\\' | '[' | ']' | '(' | ')')
        })
}

impl fmt::Display for InstanceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self.segments();
        if segments.is_empty() {
            return f.write_str(".");
        }
        for (i, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Property(name) if needs_brackets(name) => {
                    write!(f, "['{}']", name.replace('\'', "\\'"))?;
                }
                Segment::Property(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
