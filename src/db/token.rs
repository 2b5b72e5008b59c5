use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes in a token
pub const TOKEN_BYTES: usize = 32;

/// A client access token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token, lowercase hex
    pub token: String,
    /// The token's creation time (Unix timestamp in seconds)
    pub created_at: i64,
}

impl Token {
    #[cfg(test)]
    pub fn new<S: AsRef<str> + ?Sized>(token: &S, created_at: i64) -> Self {
        Self {
            token: token.as_ref().to_owned(),
            created_at,
        }
    }

    /// Generate a new token from the operating system's random source.
    ///
    /// Fails if the OS can not provide entropy. No weaker source is tried.
    pub fn generate() -> Result<Self, rand::Error> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(Self {
            token: hex::encode(bytes),
            created_at: Utc::now().timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate() {
        let before = Utc::now().timestamp();
        let token = Token::generate().unwrap();
        let after = Utc::now().timestamp();
        assert_eq!(token.token.len(), TOKEN_BYTES * 2);
        assert!(token
            .token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert!(token.created_at >= before - 2 && token.created_at <= after + 2);
    }

    #[test]
    fn test_generate_unique() {
        let mut seen = HashSet::new();
        for _ in 0..10000 {
            let token = Token::generate().unwrap();
            assert!(seen.insert(token.token));
        }
    }
}
