//! # `OpenAI` Special Tokens

pub use crate::vocab::vocabulary::ENDOFTEXT;

/// The end-of-prompt marker.
pub const ENDOFPROMPT: &str = "<|endofprompt|>";

/// The fill-in-the-middle prefix marker.
pub const FIM_PREFIX: &str = "<|fim_prefix|>";

/// The fill-in-the-middle middle marker.
pub const FIM_MIDDLE: &str = "<|fim_middle|>";

/// The fill-in-the-middle suffix marker.
pub const FIM_SUFFIX: &str = "<|fim_suffix|>";

/// The "`r50k_base`" special tokens.
pub const OA_R50K_BASE_SPECIALS: &[(&str, u32)] = &[(ENDOFTEXT, 50256)];

/// The "`p50k_base`" special tokens.
pub const OA_P50K_BASE_SPECIALS: &[(&str, u32)] = &[(ENDOFTEXT, 50256)];

/// The "`p50k_edit`" special tokens.
pub const OA_P50K_EDIT_SPECIALS: &[(&str, u32)] = &[
    (ENDOFTEXT, 50256),
    (FIM_PREFIX, 50281),
    (FIM_MIDDLE, 50282),
    (FIM_SUFFIX, 50283),
];

/// The "`cl100k_base`" special tokens.
pub const OA_CL100K_BASE_SPECIALS: &[(&str, u32)] = &[
    (ENDOFTEXT, 100257),
    (FIM_PREFIX, 100258),
    (FIM_MIDDLE, 100259),
    (FIM_SUFFIX, 100260),
    (ENDOFPROMPT, 100276),
];

/// The "`o200k_base`" special tokens.
pub const OA_O200K_BASE_SPECIALS: &[(&str, u32)] =
    &[(ENDOFTEXT, 199999), (ENDOFPROMPT, 200018)];
