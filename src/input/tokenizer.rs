use thiserror::Error;

/// Characters that separate words on a command line.
pub const WHITESPACE: &[char] = &[' ', '\t', '\r', '\n'];

/// Most arguments a single line may carry, sentinel slot included.
pub const DEFAULT_CAPACITY: usize = 2048;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("exceeded length: at most {kept} words are accepted")]
    Overflow { kept: usize },
}

/// A bounded, ordered list of views into a borrowed line.
///
/// A sequence with capacity `n` holds at most `n - 1` tokens; the slot right
/// after the last token always reads as `None`.
#[derive(Debug, Clone)]
pub struct TokenSequence<'a> {
    tokens: Vec<&'a str>,
    capacity: usize,
}

impl<'a> TokenSequence<'a> {
    /// A capacity of zero is raised to one, which holds only the sentinel.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            tokens: Vec::with_capacity(capacity - 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tokens.len() == self.capacity - 1
    }

    /// Slot lookup; index `len()` is the sentinel.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    pub fn first(&self) -> Option<&'a str> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&'a str> {
        self.tokens.last().copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    fn push(&mut self, token: &'a str) -> bool {
        if self.is_full() {
            return false;
        }
        self.tokens.push(token);
        true
    }
}

/// Splits `input` on any of `delimiters` into `tokens`, replacing whatever
/// the sequence held before.
///
/// Returns the number of tokens stored. When the line holds more words than
/// fit, the sequence keeps the first `capacity - 1` and the overflow is
/// reported as an error.
pub fn tokenize<'a>(
    input: &'a str,
    delimiters: &[char],
    tokens: &mut TokenSequence<'a>,
) -> Result<usize, TokenizeError> {
    tokens.clear();

    for word in input.split(delimiters).filter(|w| !w.is_empty()) {
        if !tokens.push(word) {
            return Err(TokenizeError::Overflow { kept: tokens.len() });
        }
    }

    Ok(tokens.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence<'a>(capacity: usize) -> TokenSequence<'a> {
        TokenSequence::with_capacity(capacity)
    }

    #[test]
    fn test_words_in_order_with_sentinel() {
        let mut tokens = sequence(DEFAULT_CAPACITY);
        let count = tokenize("ls  -la\t/tmp\n", WHITESPACE, &mut tokens).unwrap();

        assert_eq!(count, 3);
        assert_eq!(tokens.as_slice(), &["ls", "-la", "/tmp"]);
        assert_eq!(tokens.get(3), None);
    }

    #[test]
    fn test_empty_and_blank_input() {
        let mut tokens = sequence(8);
        assert_eq!(tokenize("", WHITESPACE, &mut tokens), Ok(0));
        assert_eq!(tokenize(" \t \n", WHITESPACE, &mut tokens), Ok(0));
        assert!(tokens.is_empty());
        assert_eq!(tokens.first(), None);
    }

    #[test]
    fn test_exactly_capacity_minus_one_fits() {
        let mut tokens = sequence(4);
        assert_eq!(tokenize("a b c", WHITESPACE, &mut tokens), Ok(3));
        assert!(tokens.is_full());
        assert_eq!(tokens.get(3), None);
    }

    #[test]
    fn test_overflow_truncates() {
        let mut tokens = sequence(4);
        let result = tokenize("a b c d e", WHITESPACE, &mut tokens);

        assert_eq!(result, Err(TokenizeError::Overflow { kept: 3 }));
        assert_eq!(tokens.as_slice(), &["a", "b", "c"]);
        assert_eq!(tokens.get(3), None);
    }

    #[test]
    fn test_overflow_at_default_capacity() {
        let line = vec!["w"; DEFAULT_CAPACITY].join(" ");
        let mut tokens = sequence(DEFAULT_CAPACITY);

        assert!(tokenize(&line, WHITESPACE, &mut tokens).is_err());
        assert_eq!(tokens.len(), DEFAULT_CAPACITY - 1);
    }

    #[test]
    fn test_retokenize_resets_slots() {
        let mut tokens = sequence(8);
        tokenize("one two three", WHITESPACE, &mut tokens).unwrap();
        tokenize("four", WHITESPACE, &mut tokens).unwrap();

        assert_eq!(tokens.as_slice(), &["four"]);
        assert_eq!(tokens.get(1), None);
    }

    #[test]
    fn test_custom_delimiter() {
        let mut tokens = sequence(8);
        tokenize("//usr//local/bin/", &['/'], &mut tokens).unwrap();
        assert_eq!(tokens.as_slice(), &["usr", "local", "bin"]);
    }

    #[test]
    fn test_single_slot_holds_nothing() {
        let mut tokens = sequence(1);
        assert_eq!(
            tokenize("x", WHITESPACE, &mut tokens),
            Err(TokenizeError::Overflow { kept: 0 })
        );
        assert_eq!(TokenSequence::with_capacity(0).capacity(), 1);
    }
}
