//! CSV record source and result sink.
//!
//! Input parsing is best-effort: an unreadable or malformed table, or one
//! that lacks the required columns, degrades to an empty record set with a
//! warning, and rows missing a required field are dropped individually. The
//! caller decides what an empty roster means. Writing the result is the
//! opposite: any failure is propagated, and the output file is built in
//! memory first so a failure never leaves a partial file behind.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::assignment::Assignment;
use crate::error::TableError;
use crate::roster::{PriorRound, Roster};

/// Column names fixed by the exchange's tabular data format.
const NAME_COLUMN: &str = "Employee_Name";
const EMAIL_COLUMN: &str = "Employee_EmailID";
const CHILD_NAME_COLUMN: &str = "Secret_Child_Name";
const CHILD_EMAIL_COLUMN: &str = "Secret_Child_EmailID";

/// Loads the roster table, keeping the row order of the file.
///
/// Each usable row contributes one member with a display name and an
/// identifier; a repeated identifier updates the earlier member in place
/// (see [`Roster::insert`]). Problems degrade to an empty or partial roster
/// as described in the [module documentation](`self`).
pub fn load_roster(path: &Path) -> Roster {
    let mut roster = Roster::new();
    for (name, email) in read_pairs(path, NAME_COLUMN, EMAIL_COLUMN) {
        roster.insert(name, email);
    }
    roster
}

/// Loads the prior-round table mapping each giver to last round's receiver.
///
/// An absent or empty table is valid and yields no constraints. A giver
/// listed twice keeps the last listed receiver.
pub fn load_prior_round(path: &Path) -> PriorRound {
    let mut prior = PriorRound::new();
    for (giver, receiver) in read_pairs(path, EMAIL_COLUMN, CHILD_EMAIL_COLUMN) {
        prior.insert(giver, receiver);
    }
    prior
}

/// Reads two named columns out of a CSV table, dropping rows in which either
/// field is missing or empty.
///
/// Returns an empty list if the table cannot be read, is malformed, or does
/// not contain both columns; each of these cases is logged as a warning
/// rather than surfaced as an error.
fn read_pairs(path: &Path, first: &str, second: &str) -> Vec<(String, String)> {
    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => reader,
        Err(error) => {
            warn!(path = %path.display(), %error, "input table is unreadable; treating it as empty");
            return Vec::new();
        }
    };
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(error) => {
            warn!(path = %path.display(), %error, "input table has no readable header; treating it as empty");
            return Vec::new();
        }
    };
    let Some(first_ix) = headers.iter().position(|h| h == first) else {
        warn!(path = %path.display(), column = first, "required column is missing; no usable rows");
        return Vec::new();
    };
    let Some(second_ix) = headers.iter().position(|h| h == second) else {
        warn!(path = %path.display(), column = second, "required column is missing; no usable rows");
        return Vec::new();
    };
    let mut pairs = Vec::new();
    for (ix, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                warn!(path = %path.display(), %error, "input table is malformed; treating it as empty");
                return Vec::new();
            }
        };
        let first_field = record.get(first_ix).unwrap_or_default();
        let second_field = record.get(second_ix).unwrap_or_default();
        if first_field.is_empty() || second_field.is_empty() {
            // Header row is line 1, so the first record is line 2.
            warn!(path = %path.display(), line = ix + 2, "row is missing a required field; dropped");
            continue;
        }
        pairs.push((first_field.to_owned(), second_field.to_owned()));
    }
    pairs
}

/// One row of the output table, in the exchange's column order.
#[derive(Serialize)]
struct AssignmentRow<'r> {
    #[serde(rename = "Employee_Name")]
    giver_name: &'r str,
    #[serde(rename = "Employee_EmailID")]
    giver_email: &'r str,
    #[serde(rename = "Secret_Child_Name")]
    receiver_name: &'r str,
    #[serde(rename = "Secret_Child_EmailID")]
    receiver_email: &'r str,
}

/// Writes the completed assignment to a CSV table at the given path, one row
/// per giver in roster order.
///
/// All rows are encoded into an in-memory buffer before the file is touched,
/// so on error the destination is either untouched or left from a previous
/// run, never truncated halfway.
pub fn write_assignments(path: &Path, assignment: &Assignment<'_>) -> Result<(), TableError> {
    let mut buffer = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for pairing in assignment.pairings() {
            writer
                .serialize(AssignmentRow {
                    giver_name: &pairing.giver.name,
                    giver_email: &pairing.giver.email,
                    receiver_name: &pairing.receiver.name,
                    receiver_email: &pairing.receiver.email,
                })
                .map_err(|error| TableError::Encode("assignment row", error))?;
        }
        writer.flush()?;
    }
    fs::write(path, buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::Assigner;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_roster_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(
            &dir,
            "employees.csv",
            "Employee_Name,Employee_EmailID\n\
             John Doe,john.doe@example.com\n\
             Jane Smith,jane.smith@example.com\n",
        );
        let roster = load_roster(&path);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.members()[0].name, "John Doe");
        assert_eq!(roster.members()[1].email, "jane.smith@example.com");
    }

    #[test]
    fn parsing_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(
            &dir,
            "employees.csv",
            "Employee_Name,Employee_EmailID\nAda,ada@x\nGrace,grace@x\n",
        );
        assert_eq!(load_roster(&path), load_roster(&path));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(
            &dir,
            "previous.csv",
            "Employee_Name,Employee_EmailID,Secret_Child_Name,Secret_Child_EmailID\n\
             Ada,ada@x,Grace,grace@x\n",
        );
        let prior = load_prior_round(&path);
        assert_eq!(prior.recipient_of("ada@x"), Some("grace@x"));
    }

    #[test]
    fn rows_missing_a_field_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(
            &dir,
            "employees.csv",
            "Employee_Name,Employee_EmailID\n\
             Ada,ada@x\n\
             No Email,\n\
             ,ghost@x\n\
             Grace,grace@x\n",
        );
        let roster = load_roster(&path);
        assert_eq!(roster.len(), 2);
        assert!(roster.position("ghost@x").is_none());
    }

    #[test]
    fn missing_required_column_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "employees.csv", "Name,Email\nAda,ada@x\n");
        assert!(load_roster(&path).is_empty());
    }

    #[test]
    fn unreadable_table_yields_no_rows() {
        let path = Path::new("does/not/exist.csv");
        assert!(load_roster(path).is_empty());
        assert!(load_prior_round(path).is_empty());
    }

    #[test]
    fn malformed_table_yields_no_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(
            &dir,
            "employees.csv",
            b"Employee_Name,Employee_EmailID\nAda,\xff\xfe\n".as_slice(),
        );
        assert!(load_roster(&path).is_empty());
    }

    #[test]
    fn empty_prior_table_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(
            &dir,
            "previous.csv",
            "Employee_EmailID,Secret_Child_EmailID\n",
        );
        assert!(load_prior_round(&path).is_empty());
    }

    #[test]
    fn output_has_the_exchange_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let roster: Roster = [("Ada", "ada@x"), ("Grace", "grace@x")].into_iter().collect();
        let assignment = Assigner::with_rng(&roster, &PriorRound::new(), StdRng::seed_from_u64(0))
            .solve()
            .unwrap();
        let out = dir.path().join("out.csv");
        write_assignments(&out, &assignment).unwrap();
        let contents = fs::read_to_string(&out).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "Employee_Name,Employee_EmailID,Secret_Child_Name,Secret_Child_EmailID"
        );
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn written_assignments_read_back_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let roster: Roster = [
            ("Ada", "ada@x"),
            ("Grace", "grace@x"),
            ("Edsger", "edsger@x"),
            ("Barbara", "barbara@x"),
        ]
        .into_iter()
        .collect();
        let assignment = Assigner::with_rng(&roster, &PriorRound::new(), StdRng::seed_from_u64(11))
            .solve()
            .unwrap();
        let out = dir.path().join("out.csv");
        write_assignments(&out, &assignment).unwrap();

        // Reading the giver and receiver identifier columns back must
        // reconstruct the original mapping exactly.
        let mut read_back = HashMap::new();
        let mut reader = csv::Reader::from_path(&out).unwrap();
        for record in reader.records() {
            let record = record.unwrap();
            read_back.insert(record[1].to_owned(), record[3].to_owned());
        }
        let original: HashMap<String, String> = assignment
            .pairings()
            .map(|p| (p.giver.email.clone(), p.receiver.email.clone()))
            .collect();
        assert_eq!(read_back, original);
    }

    #[test]
    fn write_failure_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let roster: Roster = [("Ada", "ada@x"), ("Grace", "grace@x")].into_iter().collect();
        let assignment = Assigner::with_rng(&roster, &PriorRound::new(), StdRng::seed_from_u64(0))
            .solve()
            .unwrap();
        // The destination's parent directory does not exist.
        let out = dir.path().join("missing").join("out.csv");
        assert!(matches!(
            write_assignments(&out, &assignment),
            Err(TableError::Write(_))
        ));
    }
}
