//! # `OpenAI` Encodings

pub mod patterns;
pub mod specials;

use std::path::Path;

use crate::errors::{Result, TokchunkError};
use crate::regex::ConstRegexPattern;
use crate::vocab::io::load_base64_rank_vocab_path;
use crate::vocab::{SpecialVocab, Vocabulary};

/// The published `OpenAI` encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenAiEncoding {
    /// The GPT-2 era "`r50k_base`" encoding.
    R50kBase,

    /// The "`p50k_base`" encoding.
    P50kBase,

    /// The "`p50k_edit`" encoding, with fill-in-the-middle markers.
    P50kEdit,

    /// The GPT-3.5/GPT-4 "`cl100k_base`" encoding.
    Cl100kBase,

    /// The GPT-4o "`o200k_base`" encoding.
    O200kBase,
}

/// Models resolved by exact name.
const MODEL_TO_ENCODING: &[(&str, OpenAiEncoding)] = &[
    ("gpt-4o", OpenAiEncoding::O200kBase),
    ("gpt-4", OpenAiEncoding::Cl100kBase),
    ("gpt-3.5-turbo", OpenAiEncoding::Cl100kBase),
    ("gpt-3.5", OpenAiEncoding::Cl100kBase),
    ("davinci-002", OpenAiEncoding::Cl100kBase),
    ("babbage-002", OpenAiEncoding::Cl100kBase),
    ("text-embedding-3-large", OpenAiEncoding::Cl100kBase),
    ("text-embedding-3-small", OpenAiEncoding::Cl100kBase),
    ("text-embedding-ada-002", OpenAiEncoding::Cl100kBase),
    ("text-davinci-003", OpenAiEncoding::P50kBase),
    ("text-davinci-002", OpenAiEncoding::P50kBase),
    ("text-davinci-edit-001", OpenAiEncoding::P50kEdit),
    ("code-davinci-edit-001", OpenAiEncoding::P50kEdit),
    ("davinci", OpenAiEncoding::R50kBase),
    ("curie", OpenAiEncoding::R50kBase),
    ("babbage", OpenAiEncoding::R50kBase),
    ("ada", OpenAiEncoding::R50kBase),
    ("gpt2", OpenAiEncoding::R50kBase),
];

/// Models resolved by name prefix (dated and fine-tuned releases).
const MODEL_PREFIX_TO_ENCODING: &[(&str, OpenAiEncoding)] = &[
    ("gpt-4o-", OpenAiEncoding::O200kBase),
    ("gpt-4-", OpenAiEncoding::Cl100kBase),
    ("gpt-3.5-turbo-", OpenAiEncoding::Cl100kBase),
    ("ft:gpt-4o", OpenAiEncoding::O200kBase),
    ("ft:gpt-4", OpenAiEncoding::Cl100kBase),
    ("ft:gpt-3.5-turbo", OpenAiEncoding::Cl100kBase),
];

/// Resolve a model name to its encoding.
///
/// Exact names are checked first, then dated/fine-tuned prefixes;
/// an encoding name itself (e.g. ``"o200k_base"``) also resolves.
pub fn encoding_for_model(model: &str) -> Result<OpenAiEncoding> {
    if let Some(&(_, encoding)) = MODEL_TO_ENCODING.iter().find(|(name, _)| *name == model) {
        return Ok(encoding);
    }

    if let Some(&(_, encoding)) = MODEL_PREFIX_TO_ENCODING
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
    {
        return Ok(encoding);
    }

    OpenAiEncoding::from_name(model)
        .ok_or_else(|| TokchunkError::UnknownModel(model.to_string()))
}

/// List the known encoding names.
pub fn list_encodings() -> Vec<&'static str> {
    ALL_ENCODINGS.iter().map(|e| e.name()).collect()
}

const ALL_ENCODINGS: &[OpenAiEncoding] = &[
    OpenAiEncoding::R50kBase,
    OpenAiEncoding::P50kBase,
    OpenAiEncoding::P50kEdit,
    OpenAiEncoding::Cl100kBase,
    OpenAiEncoding::O200kBase,
];

impl OpenAiEncoding {
    /// The encoding name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::R50kBase => "r50k_base",
            Self::P50kBase => "p50k_base",
            Self::P50kEdit => "p50k_edit",
            Self::Cl100kBase => "cl100k_base",
            Self::O200kBase => "o200k_base",
        }
    }

    /// Look up an encoding by name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_ENCODINGS.iter().find(|e| e.name() == name).copied()
    }

    /// The piece pre-split pattern.
    pub fn pattern(&self) -> ConstRegexPattern {
        match self {
            Self::R50kBase => patterns::OA_R50K_BASE_PATTERN,
            Self::P50kBase | Self::P50kEdit => patterns::OA_P50K_BASE_PATTERN,
            Self::Cl100kBase => patterns::OA_CL100K_BASE_PATTERN,
            Self::O200kBase => patterns::OA_O200K_BASE_PATTERN,
        }
    }

    /// The special-token table.
    pub fn special_tokens(&self) -> &'static [(&'static str, u32)] {
        match self {
            Self::R50kBase => specials::OA_R50K_BASE_SPECIALS,
            Self::P50kBase => specials::OA_P50K_BASE_SPECIALS,
            Self::P50kEdit => specials::OA_P50K_EDIT_SPECIALS,
            Self::Cl100kBase => specials::OA_CL100K_BASE_SPECIALS,
            Self::O200kBase => specials::OA_O200K_BASE_SPECIALS,
        }
    }

    /// The declared vocabulary size, where the encoding declares one.
    pub fn explicit_n_vocab(&self) -> Option<usize> {
        match self {
            Self::R50kBase => Some(50257),
            Self::P50kBase => Some(50281),
            _ => None,
        }
    }

    /// The conventional rank-table file name.
    pub fn vocab_file(&self) -> String {
        format!("{}.tiktoken", self.name())
    }

    /// The mergeable rank-table file name within `vocab_dir`.
    ///
    /// `p50k_edit` shares the `p50k_base` rank table.
    fn rank_file(&self) -> String {
        match self {
            Self::P50kEdit => Self::P50kBase.vocab_file(),
            _ => self.vocab_file(),
        }
    }

    /// Load this encoding's vocabulary from a local directory.
    ///
    /// ## Arguments
    /// * `vocab_dir` - Directory holding the ``*.tiktoken`` rank files.
    pub fn load_vocab<P: AsRef<Path>>(
        &self,
        vocab_dir: P,
    ) -> Result<Vocabulary<u32>> {
        let path = vocab_dir.as_ref().join(self.rank_file());

        log::info!("loading {} ranks from {}", self.name(), path.display());
        let ranks = load_base64_rank_vocab_path(&path)?;

        let specials = SpecialVocab::from_words(self.special_tokens().iter().copied());

        Vocabulary::init(
            self.name(),
            self.pattern(),
            ranks,
            specials,
            self.explicit_n_vocab(),
        )
    }
}
