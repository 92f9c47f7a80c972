use core::fmt;

use crate::KeyValue;

/// One step from a composite value into one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A string key of a map or object shape.
    Key(String),
    /// An index of an array or tuple element.
    Index(usize),
    /// A set element, identified by its own value.
    Value(KeyValue),
}

/// The sequence of segments locating a sub-value inside the top-level input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath(pub Vec<PathSegment>);

impl ValuePath {
    /// An empty path representing the input root.
    pub fn root() -> Self {
        ValuePath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_segments(segments: &[PathSegment]) -> Self {
        ValuePath(segments.to_vec())
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// `prefix` followed by all of `self`'s segments.
    pub fn prepended(&self, prefix: &ValuePath) -> ValuePath {
        let mut segments = prefix.0.clone();
        segments.extend(self.0.iter().cloned());
        ValuePath(segments)
    }

    /// True when `prefix` is a leading run of this path.
    pub fn starts_with(&self, prefix: &ValuePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Value(value) => write!(f, "{{{value}}}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "[{index}]"),
            PathSegment::Value(value) => write!(f, "{{{value}}}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root() {
        assert_eq!(ValuePath::root().to_string(), "(root)");
    }

    #[test]
    fn test_display_mixed_segments() {
        let path = ValuePath(vec![
            PathSegment::Key("user".to_string()),
            PathSegment::Key("addresses".to_string()),
            PathSegment::Index(2),
            PathSegment::Key("street".to_string()),
        ]);
        assert_eq!(path.to_string(), "user.addresses[2].street");
    }

    #[test]
    fn test_display_set_element() {
        let path = ValuePath(vec![
            PathSegment::Key("tags".to_string()),
            PathSegment::Value(KeyValue::I64(-1)),
        ]);
        assert_eq!(path.to_string(), "tags{-1}");
    }

    #[test]
    fn test_starts_with() {
        let prefix = ValuePath(vec![PathSegment::Key("a".to_string())]);
        let full = ValuePath(vec![
            PathSegment::Key("a".to_string()),
            PathSegment::Index(0),
        ]);
        assert!(full.starts_with(&prefix));
        assert!(!prefix.starts_with(&full));
    }
}
