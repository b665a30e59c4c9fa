use std::fmt;

/// Hashing schemes a stored credential can be recorded under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordScheme {
    Argon2,
    /// Hashes carried over from the previous credential store
    Bcrypt,
}

impl PasswordScheme {
    /// Leading bytes of a PHC string produced by this scheme
    pub fn marker(self) -> &'static str {
        match self {
            PasswordScheme::Argon2 => "$argon2",
            PasswordScheme::Bcrypt => "$2",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PasswordScheme::Argon2 => "argon2",
            PasswordScheme::Bcrypt => "bcrypt",
        }
    }

    fn sniff(stored: &str) -> Option<Self> {
        [PasswordScheme::Argon2, PasswordScheme::Bcrypt]
            .into_iter()
            .find(|scheme| stored.starts_with(scheme.marker()))
    }
}

/// Value of `accounts.password_scheme` for plaintext rows
pub const PLAIN_SCHEME: &str = "plain";

/// A password as it is kept in the credential store.
///
/// Accounts created before hashing was introduced hold their password in
/// plaintext; everything written since is a salted hash.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Legacy(String),
    Hashed {
        scheme: PasswordScheme,
        digest: String,
    },
}

impl Credential {
    /// Rebuild a credential from its stored columns.
    ///
    /// A recorded scheme is authoritative. Rows without one (written before
    /// the column existed) fall back to the scheme's marker prefix, so a
    /// legacy plaintext password that happens to start with `$argon2` or `$2`
    /// is read as a hash for those rows only.
    pub fn from_stored(scheme: Option<&str>, stored: String) -> Self {
        match scheme {
            Some(PLAIN_SCHEME) => Credential::Legacy(stored),
            Some("argon2") => Credential::Hashed {
                scheme: PasswordScheme::Argon2,
                digest: stored,
            },
            Some("bcrypt") => Credential::Hashed {
                scheme: PasswordScheme::Bcrypt,
                digest: stored,
            },
            _ => match PasswordScheme::sniff(&stored) {
                Some(scheme) => Credential::Hashed {
                    scheme,
                    digest: stored,
                },
                None => Credential::Legacy(stored),
            },
        }
    }

    /// Value for the `password_scheme` column
    pub fn scheme_name(&self) -> &'static str {
        match self {
            Credential::Legacy(_) => PLAIN_SCHEME,
            Credential::Hashed { scheme, .. } => scheme.as_str(),
        }
    }

    /// Value for the `password` column
    pub fn as_stored(&self) -> &str {
        match self {
            Credential::Legacy(plaintext) => plaintext,
            Credential::Hashed { digest, .. } => digest,
        }
    }

    pub fn is_hashed(&self) -> bool {
        matches!(self, Credential::Hashed { .. })
    }
}

// Never print secrets, not even hashes
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Legacy(_) => f.write_str("Credential::Legacy(<redacted>)"),
            Credential::Hashed { scheme, .. } => {
                write!(f, "Credential::Hashed({}, <redacted>)", scheme.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g";
    const BCRYPT_DIGEST: &str = "$2b$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

    #[test]
    fn test_recorded_scheme_wins_over_prefix() {
        let credential = Credential::from_stored(Some("plain"), "$argon2-looking".to_string());
        assert_eq!(credential, Credential::Legacy("$argon2-looking".to_string()));

        let credential = Credential::from_stored(Some("argon2"), DIGEST.to_string());
        assert!(credential.is_hashed());
    }

    #[test]
    fn test_missing_scheme_falls_back_to_marker() {
        assert!(Credential::from_stored(None, DIGEST.to_string()).is_hashed());
        assert_eq!(
            Credential::from_stored(None, "hunter2".to_string()),
            Credential::Legacy("hunter2".to_string())
        );
    }

    #[test]
    fn test_missing_scheme_recognises_bcrypt() {
        let credential = Credential::from_stored(None, BCRYPT_DIGEST.to_string());
        assert_eq!(
            credential,
            Credential::Hashed {
                scheme: PasswordScheme::Bcrypt,
                digest: BCRYPT_DIGEST.to_string(),
            }
        );
        assert_eq!(credential.scheme_name(), "bcrypt");

        let credential = Credential::from_stored(Some("bcrypt"), BCRYPT_DIGEST.to_string());
        assert!(credential.is_hashed());
    }

    #[test]
    fn test_storage_columns() {
        let hashed = Credential::from_stored(None, DIGEST.to_string());
        assert_eq!(hashed.scheme_name(), "argon2");
        assert_eq!(hashed.as_stored(), DIGEST);

        let legacy = Credential::Legacy("pw".to_string());
        assert_eq!(legacy.scheme_name(), "plain");
        assert_eq!(legacy.as_stored(), "pw");
    }

    #[test]
    fn test_debug_is_redacted() {
        let rendered = format!("{:?}", Credential::Legacy("hunter2".to_string()));
        assert!(!rendered.contains("hunter2"));
    }
}
