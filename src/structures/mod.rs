/// A submodule that provides the [Election] record assembled from a parsed
/// record table. These are what ultimately become CSV rows.
mod election;
pub use election::{Election, ElectionError};

/// A submodule that parses the candidate roster of one election, including
/// the shared parameter block and the ordering rules.
mod candidate;

/// A submodule for the mayor and minister sub-records.
mod official;

/// A submodule that normalizes perk token lists.
mod perks;
