//! Priority-ordered keyword decision tables
//!
//! Every keyword dispatch in the crate (style detection, answer categories)
//! is a list of `(pattern, result)` rows evaluated top to bottom. The first
//! matching row wins, so row order is the tie-break.

use regex::Regex;

/// Ordered `(pattern, result)` rows with a fallback
pub struct DecisionTable<T: Copy> {
    rows: Vec<(Regex, T)>,
    fallback: T,
}

impl<T: Copy> DecisionTable<T> {
    pub fn new(rows: Vec<(Regex, T)>, fallback: T) -> Self {
        Self { rows, fallback }
    }

    /// Result of the first row whose pattern matches `text`
    pub fn first_match(&self, text: &str) -> Option<T> {
        self.rows
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map(|(_, result)| *result)
    }

    /// First matching result, or the fallback
    pub fn decide(&self, text: &str) -> T {
        self.first_match(text).unwrap_or(self.fallback)
    }

    /// Row results in evaluation order
    pub fn order(&self) -> Vec<T> {
        self.rows.iter().map(|(_, result)| *result).collect()
    }

    pub fn fallback(&self) -> T {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DecisionTable<u8> {
        DecisionTable::new(
            vec![
                (Regex::new(r"(?i)\balpha\b").unwrap(), 1),
                (Regex::new(r"(?i)\bbeta\b").unwrap(), 2),
            ],
            0,
        )
    }

    #[test]
    fn test_first_row_wins() {
        assert_eq!(table().decide("beta then ALPHA"), 1);
        assert_eq!(table().decide("only beta"), 2);
    }

    #[test]
    fn test_fallback() {
        let t = table();
        assert_eq!(t.first_match("gamma"), None);
        assert_eq!(t.decide("gamma"), t.fallback());
        assert_eq!(t.order(), vec![1, 2]);
    }
}
