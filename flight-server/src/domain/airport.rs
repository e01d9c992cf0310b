//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `AirportCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use flight_server::domain::AirportCode;
///
/// let jfk = AirportCode::parse("JFK").unwrap();
/// assert_eq!(jfk.as_str(), "JFK");
///
/// // Lowercase is rejected
/// assert!(AirportCode::parse("jfk").is_err());
///
/// // Wrong length is rejected
/// assert!(AirportCode::parse("JF").is_err());
/// assert!(AirportCode::parse("JFKX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidAirportCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse an airport code, trimming whitespace and folding to uppercase.
    ///
    /// Useful at the web boundary where users type `"jfk "`.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidAirportCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the airport code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_code() {
        assert!(AirportCode::parse("JFK").is_ok());
        assert!(AirportCode::parse("LAX").is_ok());
        assert!(AirportCode::parse("ORD").is_ok());
        assert!(AirportCode::parse("AAA").is_ok());
        assert!(AirportCode::parse("ZZZ").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(AirportCode::parse("jfk").is_err());
        assert!(AirportCode::parse("Jfk").is_err());
        assert!(AirportCode::parse("JFk").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(AirportCode::parse("").is_err());
        assert!(AirportCode::parse("J").is_err());
        assert!(AirportCode::parse("JF").is_err());
        assert!(AirportCode::parse("JFKX").is_err());
        assert!(AirportCode::parse("KENNEDY").is_err());
    }

    #[test]
    fn reject_non_ascii() {
        assert!(AirportCode::parse("J1K").is_err());
        assert!(AirportCode::parse("J-K").is_err());
        assert!(AirportCode::parse("J K").is_err());
        assert!(AirportCode::parse("JÖK").is_err());
    }

    #[test]
    fn parse_normalized_accepts_lowercase_and_whitespace() {
        assert_eq!(
            AirportCode::parse_normalized(" jfk ").unwrap(),
            AirportCode::parse("JFK").unwrap()
        );
        assert_eq!(
            AirportCode::parse_normalized("Lax").unwrap(),
            AirportCode::parse("LAX").unwrap()
        );
        assert!(AirportCode::parse_normalized("j f").is_err());
    }

    #[test]
    fn as_str_roundtrip() {
        let code = AirportCode::parse("JFK").unwrap();
        assert_eq!(code.as_str(), "JFK");
    }

    #[test]
    fn display() {
        let code = AirportCode::parse("LHR").unwrap();
        assert_eq!(format!("{}", code), "LHR");
    }

    #[test]
    fn debug() {
        let code = AirportCode::parse("FRA").unwrap();
        assert_eq!(format!("{:?}", code), "AirportCode(FRA)");
    }

    #[test]
    fn equality() {
        let a = AirportCode::parse("JFK").unwrap();
        let b = AirportCode::parse("JFK").unwrap();
        let c = AirportCode::parse("LAX").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(AirportCode::parse("JFK").unwrap());
        assert!(set.contains(&AirportCode::parse("JFK").unwrap()));
        assert!(!set.contains(&AirportCode::parse("LAX").unwrap()));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let atl = AirportCode::parse("ATL").unwrap();
        let jfk = AirportCode::parse("JFK").unwrap();
        assert!(atl < jfk);
    }
}
