use thiserror::Error;

/// Why a vote row was dropped during normalization.
///
/// These are recovered locally: the engine logs the defect and skips the row,
/// other votes are unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteDefect {
    #[error("vote row missing restaurant id")]
    MissingRestaurant,

    #[error("vote row missing user id")]
    MissingUser,

    #[error("vote row missing collection id")]
    MissingCollection,

    #[error("vote row missing vote value")]
    MissingValue,

    #[error("vote row scoped to foreign collection {0}")]
    ForeignCollection(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid ranking policy: {0}")]
    InvalidPolicy(String),
}
