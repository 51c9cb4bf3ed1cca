// Typed-phrase buffer for key sequences (cheat codes)

/// Matches a fixed phrase typed one letter at a time.
///
/// A letter that does not continue the phrase empties the buffer; if that
/// letter is the phrase's first one it starts a fresh attempt.
#[derive(Debug, Clone)]
pub struct PhraseBuffer {
    phrase: Vec<char>,
    typed: Vec<char>,
}

impl PhraseBuffer {
    /// Create a buffer for `phrase` (case-insensitive)
    pub fn new(phrase: &str) -> Self {
        let phrase: Vec<char> = phrase.chars().map(|c| c.to_ascii_uppercase()).collect();
        Self {
            typed: Vec::with_capacity(phrase.len()),
            phrase,
        }
    }

    /// Feed one letter. Returns true when the phrase has just been completed,
    /// in which case the buffer is already empty again.
    pub fn push(&mut self, letter: char) -> bool {
        if self.phrase.is_empty() {
            return false;
        }

        let letter = letter.to_ascii_uppercase();
        if self.phrase.get(self.typed.len()) == Some(&letter) {
            self.typed.push(letter);
        } else {
            self.typed.clear();
            if self.phrase[0] == letter {
                self.typed.push(letter);
            }
        }

        if self.typed.len() == self.phrase.len() {
            self.typed.clear();
            return true;
        }
        false
    }

    /// Drop everything typed so far
    pub fn reset(&mut self) {
        self.typed.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.typed.is_empty()
    }
}
