//! Anti-forgery tokens ("nonces") for admin forms.
//!
//! A token is a keyed BLAKE3 hash of `(tick, action, user)`, hex-encoded
//! and cut to 10 characters. The lifetime is split into two ticks; a
//! token verifies during the tick it was issued in and the one after.
//!
//! Without a secret the key would be public, so an issuer built from an
//! empty secret issues nothing and rejects every token.

use crate::config::SecurityConfig;

/// Length of the hex token handed to forms.
const TOKEN_LEN: usize = 10;

/// Context string for deriving the hashing key from the configured secret.
const KEY_CONTEXT: &str = "stnvp 2026-01-01 anti-forgery token key";

/// How old a verified token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceAge {
    /// Issued in the current tick.
    Fresh,
    /// Issued in the previous tick.
    Aging,
}

/// Issues and verifies tokens for one secret.
#[derive(Clone)]
pub struct NonceIssuer {
    key: Option<[u8; 32]>,
    tick_len: u64,
}

impl NonceIssuer {
    /// `lifetime` is in seconds and is clamped to at least 2.
    pub fn new(secret: &str, lifetime: u64) -> Self {
        Self {
            key: (!secret.is_empty()).then(|| blake3::derive_key(KEY_CONTEXT, secret.as_bytes())),
            tick_len: (lifetime.max(2)) / 2,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.secret, security.nonce_lifetime)
    }

    /// Tick counter for a timestamp; rounds up like the issuing side.
    pub fn tick(&self, now: u64) -> u64 {
        now.div_ceil(self.tick_len)
    }

    /// Whether a secret is configured.
    pub fn is_keyed(&self) -> bool {
        self.key.is_some()
    }

    /// Token for `action` on behalf of `user_id` at time `now`.
    ///
    /// `None` when no secret is configured.
    pub fn create(&self, action: &str, user_id: u64, now: u64) -> Option<String> {
        let key = self.key.as_ref()?;
        Some(token_for_tick(key, self.tick(now), action, user_id))
    }

    /// Check a submitted token. `None` means it is forged or expired.
    pub fn verify(&self, token: &str, action: &str, user_id: u64, now: u64) -> Option<NonceAge> {
        let key = self.key.as_ref()?;
        if token.len() != TOKEN_LEN {
            return None;
        }

        let tick = self.tick(now);
        if constant_time_eq(token, &token_for_tick(key, tick, action, user_id)) {
            return Some(NonceAge::Fresh);
        }
        if tick > 0 && constant_time_eq(token, &token_for_tick(key, tick - 1, action, user_id)) {
            return Some(NonceAge::Aging);
        }
        None
    }
}

fn token_for_tick(key: &[u8; 32], tick: u64, action: &str, user_id: u64) -> String {
    let message = format!("{tick}|{action}|{user_id}");
    let hash = blake3::keyed_hash(key, message.as_bytes());
    let mut token = hex::encode(hash.as_bytes());
    token.truncate(TOKEN_LEN);
    token
}

impl std::fmt::Debug for NonceIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceIssuer")
            .field("keyed", &self.is_keyed())
            .field("tick_len", &self.tick_len)
            .finish_non_exhaustive()
    }
}

/// Compare without an early exit on the first differing byte.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTION: &str = "stn_video_performance_settings";
    const DAY: u64 = 86_400;

    #[test]
    fn test_token_shape() {
        let issuer = NonceIssuer::new("secret", DAY);
        let token = issuer.create(ACTION, 1, 1_000_000).unwrap();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_fresh_and_aging() {
        let issuer = NonceIssuer::new("secret", DAY);
        let issued_at = 1_000_000;
        let token = issuer.create(ACTION, 1, issued_at).unwrap();

        assert_eq!(
            issuer.verify(&token, ACTION, 1, issued_at),
            Some(NonceAge::Fresh)
        );
        assert_eq!(
            issuer.verify(&token, ACTION, 1, issued_at + DAY / 2),
            Some(NonceAge::Aging)
        );
        assert_eq!(issuer.verify(&token, ACTION, 1, issued_at + DAY + 1), None);
    }

    #[test]
    fn test_verify_rejects_other_action_user_or_secret() {
        let issuer = NonceIssuer::new("secret", DAY);
        let now = 1_000_000;
        let token = issuer.create(ACTION, 1, now).unwrap();

        assert_eq!(issuer.verify(&token, "other_action", 1, now), None);
        assert_eq!(issuer.verify(&token, ACTION, 2, now), None);
        assert_eq!(
            NonceIssuer::new("another", DAY).verify(&token, ACTION, 1, now),
            None
        );
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let issuer = NonceIssuer::new("secret", DAY);
        assert_eq!(issuer.verify("", ACTION, 1, 5), None);
        assert_eq!(issuer.verify("zzzzzzzzzz", ACTION, 1, 5), None);
        assert_eq!(issuer.verify("0123456789abcdef", ACTION, 1, 5), None);
    }

    #[test]
    fn test_empty_secret_issues_and_accepts_nothing() {
        let now = 1_000_000;
        let unkeyed = NonceIssuer::new("", DAY);
        assert!(!unkeyed.is_keyed());
        assert_eq!(unkeyed.create(ACTION, 1, now), None);

        // A token derived from the public context alone.
        let public_key = blake3::derive_key(KEY_CONTEXT, b"");
        let forged = token_for_tick(&public_key, unkeyed.tick(now), ACTION, 1);
        assert_eq!(unkeyed.verify(&forged, ACTION, 1, now), None);
        assert_eq!(
            NonceIssuer::new("secret", DAY).verify(&forged, ACTION, 1, now),
            None
        );
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
    }
}
