use itertools::Itertools;

use crate::math::Map;

/// A symbol of an [`Alphabet`]. Symbols are opaque, non-empty strings.
pub type Symbol = String;

/// An ordered alphabet of distinct symbols.
///
/// The order in which symbols are given is significant: it determines the order in which
/// successors are explored during reachability analysis and canonical renumbering, the layout of
/// state signatures during partition refinement and the order in which the alphabet is emitted.
/// Internally, symbols are mostly referred to by their position in this order.
///
/// # Example
/// ```
/// use dfa_minimizer::Alphabet;
///
/// let alphabet = Alphabet::try_from_symbols(["b", "a"]).unwrap();
/// assert_eq!(alphabet.position("a"), Some(1));
/// assert_eq!(alphabet.nth(0), Some("b"));
/// assert!(Alphabet::try_from_symbols(["a", "a"]).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    positions: Map<Symbol, usize>,
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}
impl Eq for Alphabet {}

impl Alphabet {
    /// Attempts to build an alphabet from the given symbols, keeping their order. If some symbol
    /// occurs more than once, that symbol is returned as the error.
    pub fn try_from_symbols<I, S>(symbols: I) -> Result<Self, Symbol>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut alphabet = Self::default();
        for sym in symbols {
            let sym = sym.into();
            if alphabet.positions.contains_key(&sym) {
                return Err(sym);
            }
            alphabet.positions.insert(sym.clone(), alphabet.symbols.len());
            alphabet.symbols.push(sym);
        }
        Ok(alphabet)
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if and only if the alphabet contains no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the position of `symbol` in the alphabet, or `None` if it is not contained.
    pub fn position(&self, symbol: &str) -> Option<usize> {
        self.positions.get(symbol).copied()
    }

    /// Returns the symbol at position `pos`, if it exists.
    pub fn nth(&self, pos: usize) -> Option<&str> {
        self.symbols.get(pos).map(|s| s.as_str())
    }

    /// Iterates over the symbols in their declared order.
    pub fn universe(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(|s| s.as_str())
    }

    /// Returns the symbols as a slice, in declared order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Converts a word given as a sequence of symbols into the positions of these symbols.
    /// Returns `None` if some symbol does not belong to the alphabet.
    pub fn positions_of<'a, W>(&self, word: W) -> Option<Vec<usize>>
    where
        W: IntoIterator<Item = &'a str>,
    {
        word.into_iter().map(|sym| self.position(sym)).collect()
    }

    /// Renders a word given as symbol positions, joining the symbols with spaces if some symbol
    /// is longer than a single character.
    pub fn show_word(&self, word: &[usize]) -> String {
        let symbols = word.iter().filter_map(|&p| self.nth(p)).collect_vec();
        if symbols.iter().all(|s| s.chars().count() == 1) {
            format!("\"{}\"", symbols.join(""))
        } else {
            format!("\"{}\"", symbols.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Alphabet;

    #[test]
    fn order_is_preserved() {
        let alphabet = Alphabet::try_from_symbols(["x", "a", "m"]).unwrap();
        assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!["x", "a", "m"]);
        assert_eq!(alphabet.position("m"), Some(2));
        assert_eq!(alphabet.position("b"), None);
        assert_eq!(alphabet.positions_of(["a", "x"]), Some(vec![1, 0]));
        assert_eq!(alphabet.positions_of(["a", "q"]), None);
    }

    #[test]
    fn duplicates_are_reported() {
        assert_eq!(
            Alphabet::try_from_symbols(["a", "b", "a"]),
            Err("a".to_string())
        );
    }

    #[test]
    fn word_display() {
        let chars = Alphabet::try_from_symbols(["a", "b"]).unwrap();
        assert_eq!(chars.show_word(&[0, 1, 1]), "\"abb\"");
        let long = Alphabet::try_from_symbols(["go", "stop"]).unwrap();
        assert_eq!(long.show_word(&[1, 0]), "\"stop go\"");
        assert_eq!(chars.show_word(&[]), "\"\"");
    }
}
