// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Functions to glob files.

use std::path::PathBuf;

use glob::glob;
use thiserror::Error;

/// Given a glob pattern, get all of the matches from the filesystem. The
/// matches are sorted, so results don't depend on directory iteration order.
/// No matches is not an error.
pub fn get_all_matches_from_glob(g: &str) -> Result<Vec<PathBuf>, GlobError> {
    let mut entries = vec![];
    for entry in glob(g)? {
        match entry {
            Ok(e) => entries.push(e),
            Err(e) => return Err(GlobError::GlobCrate(e)),
        }
    }
    entries.sort();
    Ok(entries)
}

#[derive(Error, Debug)]
/// Error type associated with glob helper functions.
pub enum GlobError {
    #[error(transparent)]
    GlobCrate(#[from] glob::GlobError),

    #[error(transparent)]
    PatternError(#[from] glob::PatternError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_cargo() {
        let result = get_all_matches_from_glob("./Cargo*");
        assert!(result.is_ok());
        let entries = result.unwrap();
        assert!(&entries.contains(&PathBuf::from("Cargo.toml")));
    }

    #[test]
    fn test_sorted_matches() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["c.spec", "a.spec", "b.spec", "a.mod"] {
            std::fs::write(tmp.path().join(name), "").unwrap();
        }
        let pattern = tmp.path().join("*.spec");
        let entries = get_all_matches_from_glob(&pattern.display().to_string()).unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|e| e.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.spec", "b.spec", "c.spec"]);
    }

    #[test]
    fn test_no_matches_and_bad_patterns() {
        let result = get_all_matches_from_glob("src/definitely_not_here_*");
        assert!(result.unwrap().is_empty());

        let result = get_all_matches_from_glob("src/[");
        assert!(matches!(result, Err(GlobError::PatternError(_))));
    }
}
