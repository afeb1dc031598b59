//! DDL canonicalization
//!
//! `SHOW CREATE` output embeds session and server state: the definer
//! account, the current auto-increment counter, the connection charset,
//! the view algorithm and the storage row format. None of it changes what
//! the object is, so it is removed before two definitions are compared.
//! `ENGINE=` is kept.

use regex::Regex;
use std::sync::LazyLock;

static DEFINER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DEFINER=[^ ]* ").expect("valid regex"));
static AUTO_INCREMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AUTO_INCREMENT=[^ ]* ").expect("valid regex"));
static DEFAULT_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DEFAULT CHARSET=[^ ]* ").expect("valid regex"));
static ALGORITHM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ALGORITHM=[^ ]* ").expect("valid regex"));
static ROW_FORMAT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ROW_FORMAT=[^ ]* ").expect("valid regex"));

const SQL_SECURITY_DEFINER: &str = "SQL SECURITY DEFINER ";

fn strip_once(script: &str) -> String {
    let clauses: [&LazyLock<Regex>; 5] = [
        &DEFINER_REGEX,
        &AUTO_INCREMENT_REGEX,
        &DEFAULT_CHARSET_REGEX,
        &ALGORITHM_REGEX,
        &ROW_FORMAT_REGEX,
    ];

    let mut result = script.to_string();
    for clause in clauses {
        result = clause.replace_all(&result, "").into_owned();
    }
    result.replace(SQL_SECURITY_DEFINER, "")
}

/// Strip environment-specific clauses from a generated definition and trim it.
///
/// The stripping pass repeats until nothing more is removed, so a clause
/// that only becomes visible after another one is cut out is removed too
/// and `canonicalize(canonicalize(s)) == canonicalize(s)`.
pub fn canonicalize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current.trim().to_string()
}
