//! Word-level vocabulary with reserved tokens.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{EvalError, Result};

/// Token ID type
pub type TokenId = u32;

/// Sentence start marker
pub const START_TOKEN: &str = "<s>";
/// Sentence end marker
pub const END_TOKEN: &str = "</s>";
/// Padding token
pub const PAD_TOKEN: &str = "<pad>";
/// Out-of-vocabulary token
pub const UNK_TOKEN: &str = "<unk>";

/// Reserved tokens in the order they receive ids in [`Vocab::build`].
const RESERVED: [&str; 4] = [START_TOKEN, PAD_TOKEN, END_TOKEN, UNK_TOKEN];

/// Bidirectional word/id mapping.
#[derive(Debug, Clone)]
pub struct Vocab {
    word2id: HashMap<String, TokenId>,
    id2word: HashMap<TokenId, String>,
    start_id: TokenId,
    end_id: TokenId,
    pad_id: TokenId,
    unk_id: TokenId,
}

impl Vocab {
    /// Build from an existing word-to-id map.
    ///
    /// # Errors
    ///
    /// Fails if any of `<s>`, `</s>`, `<pad>`, `<unk>` is absent, or if the
    /// ids are not exactly `0..len` with each id used once.
    pub fn from_word2id(word2id: HashMap<String, TokenId>) -> Result<Self> {
        let reserved = |token: &str| {
            word2id.get(token).copied().ok_or_else(|| EvalError::MissingSpecialToken {
                token: token.to_string(),
            })
        };
        let start_id = reserved(START_TOKEN)?;
        let end_id = reserved(END_TOKEN)?;
        let pad_id = reserved(PAD_TOKEN)?;
        let unk_id = reserved(UNK_TOKEN)?;

        let id2word = index_ids(&word2id)?;

        Ok(Self { word2id, id2word, start_id, end_id, pad_id, unk_id })
    }

    /// Build from tokenized sentences, most frequent words first.
    ///
    /// Ties are broken lexicographically so the result is deterministic.
    /// `max_size` caps the number of non-reserved words.
    pub fn build<S: AsRef<str>>(sentences: &[Vec<S>], max_size: Option<usize>) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for sentence in sentences {
            for token in sentence {
                let token = token.as_ref();
                if !RESERVED.contains(&token) {
                    *counts.entry(token).or_insert(0) += 1;
                }
            }
        }

        let mut words: Vec<(&str, usize)> = counts.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(limit) = max_size {
            words.truncate(limit);
        }

        let word2id: HashMap<String, TokenId> = RESERVED
            .iter()
            .copied()
            .chain(words.into_iter().map(|(w, _)| w))
            .enumerate()
            .map(|(id, w)| (w.to_string(), id as TokenId))
            .collect();

        Self {
            id2word: word2id.iter().map(|(w, &id)| (id, w.clone())).collect(),
            word2id,
            start_id: 0,
            pad_id: 1,
            end_id: 2,
            unk_id: 3,
        }
    }

    /// Load a JSON object mapping words to ids.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EvalError::io(format!("reading vocabulary: {}", path.display()), e))?;
        let word2id: HashMap<String, TokenId> = serde_json::from_str(&content)
            .map_err(|e| EvalError::Serialization { message: e.to_string() })?;
        Self::from_word2id(word2id)
    }

    /// Serialize the word-to-id map as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.word2id)
            .map_err(|e| EvalError::Serialization { message: e.to_string() })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.word2id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word2id.is_empty()
    }

    pub fn token_to_id(&self, token: &str) -> Option<TokenId> {
        self.word2id.get(token).copied()
    }

    pub fn id_to_token(&self, id: TokenId) -> Option<&str> {
        self.id2word.get(&id).map(String::as_str)
    }

    /// Map a token to its id, falling back to `<unk>`.
    pub fn lookup(&self, token: &str) -> TokenId {
        self.token_to_id(token).unwrap_or(self.unk_id)
    }

    /// Map ids back to tokens.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidTokenId`] for an id with no entry.
    pub fn decode_ids(&self, ids: impl IntoIterator<Item = TokenId>) -> Result<Vec<String>> {
        ids.into_iter()
            .map(|id| {
                self.id_to_token(id)
                    .map(String::from)
                    .ok_or(EvalError::InvalidTokenId { id, vocab_size: self.len() })
            })
            .collect()
    }

    pub fn start_id(&self) -> TokenId {
        self.start_id
    }

    pub fn end_id(&self) -> TokenId {
        self.end_id
    }

    pub fn pad_id(&self) -> TokenId {
        self.pad_id
    }

    pub fn unk_id(&self) -> TokenId {
        self.unk_id
    }
}

/// Invert a word-to-id map, rejecting gaps, out-of-range ids and duplicates.
///
/// Entries are visited in `(id, word)` order so the reported word does not
/// depend on hash order.
fn index_ids(word2id: &HashMap<String, TokenId>) -> Result<HashMap<TokenId, String>> {
    let size = word2id.len();
    let mut entries: Vec<(&String, TokenId)> = word2id.iter().map(|(w, &id)| (w, id)).collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut id2word = HashMap::with_capacity(size);
    for (word, id) in entries {
        if id as usize >= size {
            return Err(EvalError::InvalidVocab {
                word: word.clone(),
                id,
                message: format!("id is outside 0..{size}"),
            });
        }
        if let Some(previous) = id2word.insert(id, word.clone()) {
            return Err(EvalError::InvalidVocab {
                word: word.clone(),
                id,
                message: format!("id is already assigned to '{previous}'"),
            });
        }
    }
    Ok(id2word)
}
