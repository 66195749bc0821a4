//! Content fingerprints used to skip rebuilding unchanged forms.

use super::{SessionError, SessionResult};
use crate::codec::CodecError;
use crate::repo::document_repo::RepoError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 (lowercase hex) of the JSON encoding of `fields`.
pub fn fingerprint<T: Serialize>(fields: &T) -> SessionResult<String> {
    let encoded = serde_json::to_vec(fields)
        .map_err(|err| SessionError::Persistence(RepoError::Codec(CodecError::from(err))))?;
    Ok(format!("{:x}", Sha256::digest(&encoded)))
}

/// Whether `fields` differ from the form that produced `loaded`.
///
/// A missing fingerprint counts as changed.
pub fn is_dirty<T: Serialize>(fields: &T, loaded: Option<&str>) -> SessionResult<bool> {
    match loaded {
        Some(loaded) => Ok(fingerprint(fields)? != loaded),
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::{fingerprint, is_dirty};
    use crate::builder::keyword::KeywordFields;

    #[test]
    fn equal_fields_share_a_fingerprint() {
        let fields = KeywordFields {
            keyword: "soil".to_string(),
            keyword_type: None,
        };
        let loaded = fingerprint(&fields).unwrap();
        assert_eq!(loaded.len(), 64);
        assert!(!is_dirty(&fields, Some(&loaded)).unwrap());

        let changed = KeywordFields {
            keyword: "soils".to_string(),
            ..fields
        };
        assert!(is_dirty(&changed, Some(&loaded)).unwrap());
        assert!(is_dirty(&changed, None).unwrap());
    }
}
