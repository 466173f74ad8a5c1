// src/core/sanitize.rs
//
// Text cleanup for scraped strings. No HTML knowledge lives here.

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// `"$2.50"`, `"2.5"`, `"$ 12"` → cents. Takes the first number in the string.
pub fn parse_cents(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let num: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    let num = num.trim_end_matches('.');
    let (whole, frac) = match num.split_once('.') {
        Some((w, f)) => (w, f),
        None => (num, ""),
    };
    let whole: u32 = whole.parse().ok()?;
    let frac = match frac.len() {
        0 => 0,
        1 => frac.parse::<u32>().ok()? * 10,
        _ => frac[..2].parse::<u32>().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

/// Rated `(down, up)` from a plan name such as `"Home Fast (100/40)"` or
/// `"Superfast (1000/50 Mbps) $3.00/day"`. The first parenthesized group
/// holding a `digits/digits` pair wins.
pub fn speed_pair(name: &str) -> Option<(u32, u32)> {
    let mut rest = name;
    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        let close = after.find(')')?;
        if let Some(pair) = pair_in(&after[..close]) {
            return Some(pair);
        }
        rest = &after[close + 1..];
    }
    None
}

fn pair_in(group: &str) -> Option<(u32, u32)> {
    let (left, right) = group.split_once('/')?;
    let left = left.trim_end();
    let down_start = left.len() - left.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    let down: u32 = left[down_start..].parse().ok()?;
    let up: String = right.trim_start().chars().take_while(|c| c.is_ascii_digit()).collect();
    Some((down, up.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_ws("  Home \n\t Fast  "), "Home Fast");
    }

    #[test]
    fn cents_from_prices() {
        assert_eq!(parse_cents("$2.50"), Some(250));
        assert_eq!(parse_cents("$2.5/day"), Some(250));
        assert_eq!(parse_cents("10"), Some(1000));
        assert_eq!(parse_cents("$1,234.05"), Some(123_405));
        assert_eq!(parse_cents("free"), None);
    }

    #[test]
    fn speed_pairs() {
        assert_eq!(speed_pair("Home Fast (100/40)"), Some((100, 40)));
        assert_eq!(speed_pair("Superfast (1000/50 Mbps) $3.00/day"), Some((1000, 50)));
        assert_eq!(speed_pair("Promo (limited) Ultrafast (1000/ 400)"), Some((1000, 400)));
        assert_eq!(speed_pair("Standby"), None);
        assert_eq!(speed_pair("Broken (100/"), None);
    }
}
