mod cooccurrence;
mod filter;
mod lemmatizer;
mod lexicon;
mod scorer;
pub mod tokenizer;

pub use cooccurrence::*;
pub use filter::*;
pub use lemmatizer::*;
pub use lexicon::*;
pub use scorer::*;
use shared_states::Token;

/// Lemmatize represents an entity that turns raw sentence text into lemmatized tokens.
pub trait Lemmatize {
    /// Lemmatizes a sentence.
    ///
    /// * `sentence` - raw sentence text.
    ///
    /// # Returns
    /// * Tokens in sentence order, punctuation included.
    fn lemmatize(&self, sentence: &str) -> Vec<Token>;
}
