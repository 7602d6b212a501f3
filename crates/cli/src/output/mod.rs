//! Output formatting (terminal tables and JSON)

pub mod json;
pub mod terminal;

/// Dollar amount with two decimals, e.g. `$22.00`.
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Shortens `s` to `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(22.0), "$22.00");
        assert_eq!(money(7.333), "$7.33");
        assert_eq!(money(-1.5), "-$1.50");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Enterprise", 20), "Enterprise");
        assert_eq!(truncate("Enterprise", 5), "Ente…");
    }
}
