// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::NamedTempFile;

use super::*;

fn write_tmp(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("couldn't make tmp file");
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn test_read_table_skips_comments_and_blank_lines() {
    let f = write_tmp(indoc! {"
        # t[days] a b
        0.5 1 2

        1.5   3\t4
        # trailing comment
    "});
    let table = read_table(f.path(), 0).unwrap();
    assert_eq!(table.dim(), (2, 3));
    assert_abs_diff_eq!(table[(1, 0)], 1.5);
    assert_abs_diff_eq!(table[(1, 2)], 4.0);
}

#[test]
fn test_read_table_skip_rows() {
    let f = write_tmp(indoc! {"
        time wavelength flux
        1 2 3
    "});
    assert!(matches!(
        read_table(f.path(), 0),
        Err(ReadError::Parse { line: 1, .. })
    ));
    let table = read_table(f.path(), 1).unwrap();
    assert_eq!(table.dim(), (1, 3));
}

#[test]
fn test_read_table_nan_and_exponents() {
    let f = write_tmp("1.0 nan 1.5e+44 -inf\n");
    let table = read_table(f.path(), 0).unwrap();
    assert!(table[(0, 1)].is_nan());
    assert_abs_diff_eq!(table[(0, 2)], 1.5e44);
    assert!(table[(0, 3)].is_infinite());
}

#[test]
fn test_read_table_ragged() {
    let f = write_tmp("1 2 3\n4 5\n");
    match read_table(f.path(), 0) {
        Err(ReadError::Ragged {
            line,
            expected,
            got,
            ..
        }) => {
            assert_eq!(line, 2);
            assert_eq!(expected, 3);
            assert_eq!(got, 2);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_read_table_missing_and_empty() {
    assert!(matches!(
        read_table(Path::new("/definitely/not/here.dat"), 0),
        Err(ReadError::DoesNotExist(_))
    ));

    let f = write_tmp("# only a header\n");
    assert!(matches!(read_table(f.path(), 0), Err(ReadError::Empty(_))));
}

#[test]
fn test_read_table_with_columns() {
    let f = write_tmp("1 2\n");
    assert!(matches!(
        read_table_with_columns(f.path(), 0, 3),
        Err(ReadError::TooFewColumns {
            expected: 3,
            got: 2,
            ..
        })
    ));
    assert!(read_table_with_columns(f.path(), 0, 2).is_ok());
}
