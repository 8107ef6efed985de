//! Request-level validation of access group identifiers

use common::error::{ErrorExt, Result};
use common::model::{AccessGroupId, GroupKeyName, PublicKey};

/// Decodes a Base58Check public key and checks it is a point on the curve.
pub fn decode_and_validate_public_key(encoded: &str) -> Result<PublicKey> {
    PublicKey::from_base58_check(encoded.trim())
}

/// Validates an access group owner key together with the group's name.
///
/// The name must be 1 to 32 bytes and cannot be the reserved base name.
pub fn validate_access_group_public_key_and_name(
    owner_public_key: &str,
    key_name: &str,
) -> Result<AccessGroupId> {
    let owner = decode_and_validate_public_key(owner_public_key)
        .with_context(|| format!("access group owner {}", owner_public_key))?;
    let key_name = GroupKeyName::from_name(key_name)
        .with_context(|| format!("access group key name '{}'", key_name))?;
    Ok(AccessGroupId::new(owner, key_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error;

    const GENERATOR: &str = "BC1YLgbVFc5DfB5NtFtrZZ7AhqNqEknVFkq8GqG721es666NmqS9hbB";

    #[test]
    fn test_valid_group() {
        let group = validate_access_group_public_key_and_name(GENERATOR, "default-key").unwrap();
        assert_eq!(group.key_name.trimmed(), b"default-key");
        assert_eq!(
            group.owner_public_key,
            decode_and_validate_public_key(GENERATOR).unwrap()
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(decode_and_validate_public_key(&format!("  {} ", GENERATOR)).is_ok());
    }

    #[test]
    fn test_bad_owner_key() {
        let result = validate_access_group_public_key_and_name("not-a-key", "friends");
        assert!(matches!(result, Err(Error::InvalidPublicKey(_))));
    }

    #[test]
    fn test_off_curve_owner_key() {
        let zero_key = "BC1YLbnP7rndL92x7DbLp6bkUpCgKmgoHgz7xEbwhgHTps3ZrXA6LtQ";
        assert!(matches!(
            decode_and_validate_public_key(zero_key),
            Err(Error::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_bad_group_names() {
        assert!(matches!(
            validate_access_group_public_key_and_name(GENERATOR, ""),
            Err(Error::InvalidAccessGroup(_))
        ));
        assert!(matches!(
            validate_access_group_public_key_and_name(GENERATOR, &"x".repeat(33)),
            Err(Error::InvalidAccessGroup(_))
        ));
        assert!(matches!(
            validate_access_group_public_key_and_name(GENERATOR, "\0\0\0"),
            Err(Error::InvalidAccessGroup(_))
        ));
    }
}
