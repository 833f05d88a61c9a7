use std::io::{self, Write};

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Two-column table of a ranked aggregate.
pub fn write_ranked_table(
    out: &mut dyn Write,
    heading: &str,
    key_header: &str,
    value_header: &str,
    rows: &[(String, u64)],
) -> io::Result<()> {
    writeln!(out, "{}", heading)?;
    writeln!(out, "  {:<32} {:>8}", key_header, value_header)?;
    writeln!(out, "  {}", "─".repeat(41))?;
    for (key, value) in rows {
        writeln!(out, "  {:<32} {:>8}", truncate(key, 32), value)?;
    }
    Ok(())
}
