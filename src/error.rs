use thiserror::Error;

/// Enumeration of terminal failures of the assignment search.
#[derive(Error, Debug)]
pub enum AssignError {
    /// The search exhausted every branch without completing an assignment:
    /// no bijection over the roster satisfies all forbidden-pair constraints.
    ///
    /// Infeasibility depends only on the roster and the prior-round data,
    /// never on the random candidate order, so retrying an infeasible
    /// instance cannot succeed.
    #[error("no valid assignment exists for this roster and prior-round data")]
    Infeasible,
}

/// Enumeration of errors while writing the output table.
///
/// Unlike input-parsing problems, which degrade to empty record sets with a
/// warning, output failures are always propagated: the output file is either
/// written in full or not at all.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to encode {0} as CSV: {1}")]
    Encode(&'static str, csv::Error),
    #[error("failed to write the output table: {0}")]
    Write(#[from] std::io::Error),
}
