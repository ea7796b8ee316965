//! Line-based request input: user id, transaction type, month-year.

use anyhow::{Context, Result};
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub user_id: i64,
    pub txn_type: String,
    pub month_year: String,
}

/// Read the three request lines. Missing lines read as empty strings and are
/// rejected later by validation.
pub fn read_request(reader: &mut impl BufRead) -> Result<Request> {
    let uid = read_line(reader)?;
    let user_id = parse_user_id(&uid)?;
    let txn_type = read_line(reader)?;
    let month_year = read_line(reader)?;

    Ok(Request {
        user_id,
        txn_type,
        month_year,
    })
}

pub fn parse_user_id(s: &str) -> Result<i64> {
    s.trim()
        .parse()
        .with_context(|| format!("invalid userId: {s:?}"))
}

fn read_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("read stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// `[1, 2, 3]`
pub fn render_ids(ids: &[i64]) -> String {
    format!("{ids:?}")
}
