use crate::model::IssueRecord;

/// Outcome of parsing one normalized diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Issue(IssueRecord),
    /// Noise: an empty line, a line without a `:`, or a line whose kind
    /// trims to nothing. Dropped, not recorded.
    NoIssue,
}

/// Total over any input — never fails. Splits on the FIRST `:`: the left
/// part (trimmed) is the issue kind, the right part is the description,
/// kept verbatim so colons inside the explanation survive.
pub fn parse(line: &str) -> ParsedLine {
    let Some((kind, description)) = line.split_once(':') else {
        return ParsedLine::NoIssue;
    };
    let kind = kind.trim();
    if kind.is_empty() {
        return ParsedLine::NoIssue;
    }
    ParsedLine::Issue(IssueRecord {
        kind: kind.to_string(),
        description: description.to_string(),
    })
}
