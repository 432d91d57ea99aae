//! Endpoint URL construction from the album token.
//!
//! Apple shards shared streams across numbered hosts. The partition is
//! derived from the token's first character: its base62 value mod 40, plus
//! one, gives the `pNN` host number.

use crate::error::ConfigError;

fn char_to_base62(c: char) -> Result<u32, ConfigError> {
    match c {
        '0'..='9' => Ok(c as u32 - '0' as u32),
        'A'..='Z' => Ok(c as u32 - 'A' as u32 + 10),
        'a'..='z' => Ok(c as u32 - 'a' as u32 + 36),
        _ => Err(ConfigError::InvalidTokenChar(c)),
    }
}

/// Server partition (1-40) for a token.
fn partition(token: &str) -> Result<u32, ConfigError> {
    let first = token.chars().next().ok_or(ConfigError::EmptyToken)?;
    Ok(1 + (char_to_base62(first)? % 40))
}

/// Base URL for all sharedstreams calls for this token, in the form
/// `https://pNN-sharedstreams.icloud.com/{token}/sharedstreams/`.
pub fn base_url(token: &str) -> Result<String, ConfigError> {
    Ok(format!(
        "https://p{:02}-sharedstreams.icloud.com/{}/sharedstreams/",
        partition(token)?,
        token
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base62_values() {
        assert_eq!(char_to_base62('0').unwrap(), 0);
        assert_eq!(char_to_base62('9').unwrap(), 9);
        assert_eq!(char_to_base62('A').unwrap(), 10);
        assert_eq!(char_to_base62('Z').unwrap(), 35);
        assert_eq!(char_to_base62('a').unwrap(), 36);
        assert_eq!(char_to_base62('z').unwrap(), 61);
        assert!(matches!(
            char_to_base62('!'),
            Err(ConfigError::InvalidTokenChar('!'))
        ));
    }

    #[test]
    fn partition_from_first_char() {
        assert_eq!(partition("A0z5qAGN1JIFd3y").unwrap(), 11);
        assert_eq!(partition("B0z5qAGN1JIFd3y").unwrap(), 12);
        assert_eq!(partition("a0z5qAGN1JIFd3y").unwrap(), 37);
        // 61 % 40 + 1
        assert_eq!(partition("z0z5qAGN1JIFd3y").unwrap(), 22);
        assert!(matches!(partition(""), Err(ConfigError::EmptyToken)));
    }

    #[test]
    fn full_url() {
        assert_eq!(
            base_url("A0z5qAGN1JIFd3y").unwrap(),
            "https://p11-sharedstreams.icloud.com/A0z5qAGN1JIFd3y/sharedstreams/"
        );
        assert!(matches!(
            base_url("!invalid"),
            Err(ConfigError::InvalidTokenChar('!'))
        ));
    }
}
