use thiserror::Error;

use crate::plugin::PluginKind;

/// Errors reported by the viewport API.
///
/// Runtime degradation (missing sizes, zero speeds) is never an error; these
/// cover programming mistakes such as naming a plugin or easing curve that
/// does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown plugin kind `{0}`")]
    UnknownPlugin(String),

    #[error("plugin installed as `{expected}` but the instance is a `{found}`")]
    PluginKindMismatch { expected: PluginKind, found: PluginKind },

    #[error("unknown easing curve `{0}`")]
    UnknownEase(String),

    #[error("unknown direction `{0}` (expected all, x or y)")]
    UnknownDirection(String),

    #[error("unknown underflow `{0}`")]
    UnknownUnderflow(String),

    #[error("unknown sides `{0}`")]
    UnknownSides(String),
}

pub type Result<T> = std::result::Result<T, Error>;
