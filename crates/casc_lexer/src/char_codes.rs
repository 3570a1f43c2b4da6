//! Character classification used by the lexer.

pub const NULL_CHARACTER: char = '\0';
pub const MAX_ASCII_CHARACTER: u32 = 0x7F;

/// Letters start identifiers and keywords. Outside ASCII this is XID_Start,
/// which includes the logographic script.
#[inline]
pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || (ch as u32 > MAX_ASCII_CHARACTER && unicode_xid::UnicodeXID::is_xid_start(ch))
}

#[inline]
pub fn is_white_space(ch: char) -> bool {
    ch.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_letter() {
        assert!(is_letter('a'));
        assert!(is_letter('Z'));
        assert!(is_letter('如'));
        assert!(is_letter('一'));
        assert!(!is_letter('_'));
        assert!(!is_letter('1'));
        assert!(!is_letter('@'));
        assert!(!is_letter(NULL_CHARACTER));
    }

    #[test]
    fn test_is_white_space() {
        assert!(is_white_space(' '));
        assert!(is_white_space('\t'));
        assert!(is_white_space('\u{3000}'));
        assert!(!is_white_space('x'));
    }
}
