//! Numeral classification and parsing for ASCII and logographic digits.
//!
//! Two forms are accepted. A run without magnitude markers is positional
//! (`一二` is 12, like `12`). A run with markers is grouped: `十`/`拾`, `百`
//! and `千` scale the digit before them inside a section, `萬` closes a
//! section of ten-thousands and `億` closes everything so far as
//! hundred-millions. `零` only holds a place.

const TEN_THOUSAND: i64 = 10_000;
const HUNDRED_MILLION: i64 = 100_000_000;

/// Whether a character can appear in a numeric literal.
pub fn is_digit(ch: char) -> bool {
    unit_value(ch).is_some() || marker_value(ch).is_some()
}

/// The value of a single unit digit, ASCII or logographic.
pub fn unit_value(ch: char) -> Option<i64> {
    let value = match ch {
        '0'..='9' => ch as i64 - '0' as i64,
        '零' => 0,
        '一' | '壹' => 1,
        '二' | '貳' => 2,
        '三' | '參' => 3,
        '四' | '肆' => 4,
        '五' | '伍' => 5,
        '六' | '陆' => 6,
        '七' | '柒' => 7,
        '八' | '捌' => 8,
        '九' | '玖' => 9,
        _ => return None,
    };
    Some(value)
}

/// The multiplier of a magnitude marker.
pub fn marker_value(ch: char) -> Option<i64> {
    match ch {
        '十' | '拾' => Some(10),
        '百' => Some(100),
        '千' => Some(1_000),
        '萬' => Some(TEN_THOUSAND),
        '億' => Some(HUNDRED_MILLION),
        _ => None,
    }
}

/// Parse a digit run into its value. `None` means the run is not a valid
/// numeral (or does not fit in an `i64`).
pub fn parse_numeral(text: &str) -> Option<i64> {
    if text.is_empty() {
        return None;
    }
    if text.chars().any(|ch| marker_value(ch).is_some()) {
        parse_grouped(text)
    } else {
        parse_positional(text)
    }
}

fn parse_positional(text: &str) -> Option<i64> {
    text.chars().try_fold(0i64, |value, ch| {
        value.checked_mul(10)?.checked_add(unit_value(ch)?)
    })
}

fn parse_grouped(text: &str) -> Option<i64> {
    // Hundred-million groups already closed.
    let mut total: i64 = 0;
    // Ten-thousands inside the current hundred-million group.
    let mut upper: i64 = 0;
    // The section below ten-thousand being built.
    let mut section: i64 = 0;
    let mut pending: Option<i64> = None;
    let mut last_small: Option<i64> = None;
    // `零` holds a place before a digit, never before a marker.
    let mut after_zero = false;

    for ch in text.chars() {
        if let Some(digit) = unit_value(ch) {
            if pending.is_some() {
                return None;
            }
            if digit != 0 {
                pending = Some(digit);
            }
            after_zero = digit == 0;
            continue;
        }

        if after_zero {
            return None;
        }
        match marker_value(ch)? {
            TEN_THOUSAND => {
                let closed = section.checked_add(pending.take().unwrap_or(0))?;
                if closed == 0 || upper != 0 {
                    return None;
                }
                upper = closed.checked_mul(TEN_THOUSAND)?;
                section = 0;
                last_small = None;
            }
            HUNDRED_MILLION => {
                let group = upper
                    .checked_add(section)?
                    .checked_add(pending.take().unwrap_or(0))?;
                // Only one hundred-million group.
                if group == 0 || total != 0 {
                    return None;
                }
                total = group.checked_mul(HUNDRED_MILLION)?;
                upper = 0;
                section = 0;
                last_small = None;
            }
            small => {
                let digit = match pending.take() {
                    Some(digit) => digit,
                    None if small == 10 => 1,
                    None => return None,
                };
                if last_small.is_some_and(|last| small >= last) {
                    return None;
                }
                last_small = Some(small);
                section = section.checked_add(digit * small)?;
            }
        }
    }

    total
        .checked_add(upper)?
        .checked_add(section)?
        .checked_add(pending.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_matches_ascii() {
        assert_eq!(parse_numeral("12"), Some(12));
        assert_eq!(parse_numeral("一二"), Some(12));
        assert_eq!(parse_numeral("壹貳參"), Some(123));
        assert_eq!(parse_numeral("一〇"), None);
        assert_eq!(parse_numeral("零"), Some(0));
        assert_eq!(parse_numeral("1二"), Some(12));
    }

    #[test]
    fn test_grouped() {
        assert_eq!(parse_numeral("十"), Some(10));
        assert_eq!(parse_numeral("十二"), Some(12));
        assert_eq!(parse_numeral("二十"), Some(20));
        assert_eq!(parse_numeral("拾伍"), Some(15));
        assert_eq!(parse_numeral("一百零五"), Some(105));
        assert_eq!(parse_numeral("三千二百一十"), Some(3210));
        assert_eq!(parse_numeral("一萬二千"), Some(12_000));
        assert_eq!(parse_numeral("二十萬"), Some(200_000));
        assert_eq!(parse_numeral("三億"), Some(300_000_000));
        assert_eq!(parse_numeral("一億二千萬"), Some(120_000_000));
        assert_eq!(parse_numeral("一千零五"), Some(1005));
        assert_eq!(parse_numeral("一萬零三百"), Some(10_300));
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_numeral(""), None);
        assert_eq!(parse_numeral("二三十"), None);
        assert_eq!(parse_numeral("百"), None);
        assert_eq!(parse_numeral("萬"), None);
        assert_eq!(parse_numeral("十百"), None);
        assert_eq!(parse_numeral("一十一百"), None);
        assert_eq!(parse_numeral("一萬一萬"), None);
        assert_eq!(parse_numeral("一億二億"), None);
        assert_eq!(parse_numeral("億"), None);
        assert_eq!(parse_numeral("零十"), None);
        assert_eq!(parse_numeral("一百零萬"), None);
        assert_eq!(parse_numeral("99999999999999999999"), None);
    }

    #[test]
    fn test_is_digit() {
        assert!(is_digit('7'));
        assert!(is_digit('九'));
        assert!(is_digit('億'));
        assert!(!is_digit('a'));
        assert!(!is_digit('數'));
    }
}
