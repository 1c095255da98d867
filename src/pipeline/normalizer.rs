/// Country code prepended to every record.
pub const COUNTRY_PREFIX: &str = "971";

/// Trims whitespace and stray byte order marks, which concatenated CSV
/// files carry into the middle of the text.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Normalizes one trimmed data line: drops a single leading `0`, then
/// prepends the country code. Applied unconditionally, so it is not
/// idempotent.
pub fn normalize_line(line: &str) -> String {
    let trimmed = trim_line(line);
    let local = trimmed.strip_prefix('0').unwrap_or(trimmed);

    let mut record = String::with_capacity(COUNTRY_PREFIX.len() + local.len());
    record.push_str(COUNTRY_PREFIX);
    record.push_str(local);
    record
}

/// Turns one file's raw text into its normalized records.
///
/// Lines are split on `\n` and blank lines are dropped. The first surviving
/// line is the header and never produces a record.
pub fn normalize_file(text: &str) -> Vec<String> {
    text.split('\n')
        .map(trim_line)
        .filter(|line| !line.is_empty())
        .skip(1)
        .map(normalize_line)
        .collect()
}
