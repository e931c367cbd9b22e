//! Corpus, vocabulary, and minibatch construction.

mod batch;
mod corpus;
mod vocab;

pub use batch::{get_minibatch, Minibatch};
pub use corpus::Corpus;
pub use vocab::{TokenId, Vocab, END_TOKEN, PAD_TOKEN, START_TOKEN, UNK_TOKEN};
