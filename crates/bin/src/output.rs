//! Output formatting helpers for human-readable and JSON output.

use roster::user::UserProfile;
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print `value` as a single line of JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print users as an aligned `ID  EMAIL  ROLE` table.
///
/// Documents stored without an email or role show `-` in that column.
pub fn print_user_table(users: &[UserProfile]) {
    const HEADERS: [&str; 3] = ["ID", "EMAIL", "ROLE"];

    let rows: Vec<[&str; 3]> = users
        .iter()
        .map(|u| {
            [
                u.id.as_str(),
                u.email.as_deref().unwrap_or("-"),
                u.role_id.as_deref().unwrap_or("-"),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    for row in std::iter::once(&HEADERS).chain(&rows) {
        println!("{}", format_row(row, &widths));
    }
}

fn format_row(cells: &[&str; 3], widths: &[usize; 3]) -> String {
    let [id, email, role] = cells;
    let [id_w, email_w, _] = *widths;
    // Last column is not padded so lines carry no trailing spaces
    format!("{id:<id_w$}  {email:<email_w$}  {role}")
}
