use std::fmt::{Display, Formatter};

/// Width of the AS numbers carried in an AS path attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsnLength {
    Bits16,
    Bits32,
}

impl AsnLength {
    pub const fn from_as4_capable(as4_capable: bool) -> AsnLength {
        match as4_capable {
            true => AsnLength::Bits32,
            false => AsnLength::Bits16,
        }
    }

    pub const fn byte_len(&self) -> usize {
        match self {
            AsnLength::Bits16 => 2,
            AsnLength::Bits32 => 4,
        }
    }
}

/// Enum of AS path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsPathSegment {
    AsSequence(Vec<u32>),
    AsSet(Vec<u32>),
    /// <https://datatracker.ietf.org/doc/html/rfc5065>
    ConfedSequence(Vec<u32>),
    ConfedSet(Vec<u32>),
}

impl AsPathSegment {
    pub fn asns(&self) -> &[u32] {
        match self {
            AsPathSegment::AsSequence(v)
            | AsPathSegment::AsSet(v)
            | AsPathSegment::ConfedSequence(v)
            | AsPathSegment::ConfedSet(v) => v,
        }
    }

    /// Number of ASNs this segment adds to the route length: a set counts once and
    /// confederation segments do not count.
    pub fn route_len(&self) -> usize {
        match self {
            AsPathSegment::AsSequence(v) => v.len(),
            AsPathSegment::AsSet(_) => 1,
            AsPathSegment::ConfedSequence(_) | AsPathSegment::ConfedSet(_) => 0,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, AsPathSegment::AsSet(_) | AsPathSegment::ConfedSet(_))
    }
}

impl Display for AsPathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = itertools::join(self.asns(), " ");
        match self {
            AsPathSegment::AsSequence(_) => write!(f, "{}", joined),
            AsPathSegment::AsSet(_) => write!(f, "{{{}}}", itertools::join(self.asns(), ",")),
            AsPathSegment::ConfedSequence(_) => write!(f, "({})", joined),
            AsPathSegment::ConfedSet(_) => write!(f, "[{}]", joined),
        }
    }
}

/// Flatten segments into one AS number list in wire order, sets included as-is.
pub fn flatten_segments(segments: &[AsPathSegment]) -> Vec<u32> {
    segments
        .iter()
        .flat_map(|seg| seg.asns().iter().copied())
        .collect()
}

fn route_len(segments: &[AsPathSegment]) -> usize {
    segments.iter().map(AsPathSegment::route_len).sum()
}

/// Rebuild the AS path from AS_PATH and AS4_PATH, RFC 6793 section 4.2.3.
///
/// ```text
///    If the number of AS numbers in the AS_PATH attribute is less than the
///    number of AS numbers in the AS4_PATH attribute, then the AS4_PATH
///    attribute SHALL be ignored, and the AS_PATH attribute SHALL be taken
///    as the AS path information.
///
///    If the number of AS numbers in the AS_PATH attribute is larger than
///    or equal to the number of AS numbers in the AS4_PATH attribute, then
///    the AS path information SHALL be constructed by taking as many AS
///    numbers and path segments as necessary from the leading part of the
///    AS_PATH attribute, and then prepending them to the AS4_PATH attribute
///    so that the AS path information has a number of AS numbers identical
///    to that of the AS_PATH attribute.
/// ```
pub fn merge_as4_path(as_path: &[AsPathSegment], as4_path: &[AsPathSegment]) -> Vec<AsPathSegment> {
    let as_len = route_len(as_path);
    let as4_len = route_len(as4_path);
    if as4_path.is_empty() || as_len < as4_len {
        return as_path.to_vec();
    }

    let mut missing = as_len - as4_len;
    let mut merged = Vec::with_capacity(as_path.len() + as4_path.len());
    for segment in as_path {
        match segment {
            AsPathSegment::ConfedSequence(_) | AsPathSegment::ConfedSet(_) => {
                merged.push(segment.clone());
                continue;
            }
            _ if missing == 0 => break,
            AsPathSegment::AsSet(_) => {
                merged.push(segment.clone());
                missing -= 1;
            }
            AsPathSegment::AsSequence(v) if v.len() <= missing => {
                merged.push(segment.clone());
                missing -= v.len();
            }
            AsPathSegment::AsSequence(v) => {
                merged.push(AsPathSegment::AsSequence(v[..missing].to_vec()));
                missing = 0;
            }
        }
    }
    merged.extend(as4_path.iter().cloned());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_keeps_set_members() {
        let segments = vec![
            AsPathSegment::AsSequence(vec![1, 2]),
            AsPathSegment::AsSet(vec![3, 3, 4]),
        ];
        assert_eq!(flatten_segments(&segments), vec![1, 2, 3, 3, 4]);
        assert!(segments[1].is_set());
        assert_eq!(segments[1].to_string(), "{3,3,4}");
        assert_eq!(segments[0].to_string(), "1 2");
    }

    #[test]
    fn test_merge_as4_path() {
        const AS_TRANS: u32 = 23456;
        let as_path = vec![AsPathSegment::AsSequence(vec![65001, AS_TRANS, AS_TRANS])];
        let as4_path = vec![AsPathSegment::AsSequence(vec![400000, 400001])];
        assert_eq!(
            flatten_segments(&merge_as4_path(&as_path, &as4_path)),
            vec![65001, 400000, 400001]
        );

        // longer AS4_PATH is ignored
        let as4_path = vec![AsPathSegment::AsSequence(vec![1, 2, 3, 4])];
        assert_eq!(merge_as4_path(&as_path, &as4_path), as_path);

        // leading confederation segment is kept
        let as_path = vec![
            AsPathSegment::ConfedSequence(vec![65100]),
            AsPathSegment::AsSequence(vec![AS_TRANS]),
        ];
        let as4_path = vec![AsPathSegment::AsSequence(vec![400000])];
        assert_eq!(
            merge_as4_path(&as_path, &as4_path),
            vec![
                AsPathSegment::ConfedSequence(vec![65100]),
                AsPathSegment::AsSequence(vec![400000])
            ]
        );
        assert_eq!(merge_as4_path(&as_path, &[]), as_path);
    }
}
