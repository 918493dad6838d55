use crate::ir::{TargetType, TransformKind, TypeRef};

/// Map a discovery `type` + `format` pair to a target primitive.
///
/// Returns `None` for any pair outside the table; callers then fall back to
/// the object/array/reference rules.
pub fn target_type(discovery_type: Option<&str>, format: Option<&str>) -> Option<TargetType> {
    let ty = match (discovery_type?, format) {
        ("boolean", _) => TargetType::Bool,
        ("integer", Some("int32")) => TargetType::Int,
        ("integer", Some("uint32")) => TargetType::UInt,
        ("number", Some("double")) => TargetType::Double,
        ("number", Some("float")) => TargetType::Float,
        ("string", None) => TargetType::String,
        ("string", Some("byte")) => TargetType::Bytes,
        ("string", Some("date" | "date-time")) => TargetType::DateTime,
        ("string", Some("int64")) => TargetType::Int64,
        ("string", Some("uint64")) => TargetType::UInt64,
        ("any", _) => TargetType::Any,
        _ => return None,
    };
    Some(ty)
}

/// Which transform, if any, a primitive needs at encode/decode time.
pub fn transform_requirement(ty: TargetType) -> Option<TransformKind> {
    match ty {
        TargetType::Url => Some(TransformKind::Url),
        TargetType::DateTime => Some(TransformKind::DateTime),
        TargetType::Bytes => Some(TransformKind::Bytes),
        _ => None,
    }
}

/// Transform requirement of a resolved type; only direct primitives qualify.
pub fn transform_for(type_ref: &TypeRef) -> Option<TransformKind> {
    match type_ref {
        TypeRef::Primitive(ty) => transform_requirement(*ty),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let cases = [
            (("boolean", None), TargetType::Bool),
            (("integer", Some("int32")), TargetType::Int),
            (("integer", Some("uint32")), TargetType::UInt),
            (("number", Some("double")), TargetType::Double),
            (("number", Some("float")), TargetType::Float),
            (("string", None), TargetType::String),
            (("string", Some("byte")), TargetType::Bytes),
            (("string", Some("date")), TargetType::DateTime),
            (("string", Some("date-time")), TargetType::DateTime),
            (("string", Some("int64")), TargetType::Int64),
            (("string", Some("uint64")), TargetType::UInt64),
            (("any", None), TargetType::Any),
        ];
        for ((ty, format), expected) in cases {
            assert_eq!(target_type(Some(ty), format), Some(expected), "{ty} {format:?}");
        }
    }

    #[test]
    fn test_no_mapping() {
        assert_eq!(target_type(None, None), None);
        assert_eq!(target_type(Some("integer"), None), None);
        assert_eq!(target_type(Some("number"), None), None);
        assert_eq!(target_type(Some("string"), Some("google-fieldmask")), None);
        assert_eq!(target_type(Some("object"), None), None);
        assert_eq!(target_type(Some("array"), None), None);
    }

    #[test]
    fn test_transform_requirement() {
        assert_eq!(transform_requirement(TargetType::Url), Some(TransformKind::Url));
        assert_eq!(
            transform_requirement(TargetType::DateTime),
            Some(TransformKind::DateTime)
        );
        assert_eq!(transform_requirement(TargetType::Bytes), Some(TransformKind::Bytes));
        assert_eq!(transform_requirement(TargetType::String), None);
        assert_eq!(transform_requirement(TargetType::Int64), None);
        assert_eq!(
            transform_for(&TypeRef::list(TypeRef::Primitive(TargetType::DateTime))),
            None
        );
    }
}
