//! Description fields: summary line plus reconstructed verbose text.
//!
//! dpkg stores the long description word-wrapped with a one-space indent.
//! Reconstruction undoes the wrapping: a line containing only `.` is a
//! paragraph break, a line starting with two spaces is a literal line
//! break that keeps one space of indentation, and every other
//! continuation line keeps its single leading space so it reads as the
//! word separator when lines are joined.

use serde::Serialize;

/// A decoded `Description` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    /// The first line of the field value
    summary: String,

    /// The unwrapped multi-line text
    #[serde(rename = "verbose")]
    body: String,
}

impl Description {
    /// Decode a raw `Description` field value.
    ///
    /// The first line is always the summary; the remainder is unwrapped
    /// per the rules above. The `.` paragraph markers themselves never
    /// appear in the decoded body.
    pub fn parse(value: &str) -> Description {
        let (summary, rest) = match value.split_once('\n') {
            Some((summary, rest)) => (summary, rest.trim_start()),
            None => (value, ""),
        };

        let mut body = String::new();
        // The line after a paragraph marker carries extra indentation
        // that must not survive into the decoded text.
        let mut after_break = false;

        if !rest.is_empty() {
            for line in rest.split('\n') {
                if line.trim() == "." {
                    body.push_str("\n\n");
                    after_break = true;
                    continue;
                }

                if line.starts_with("  ") {
                    body.push('\n');
                    body.push_str(&line[1..]);
                    after_break = false;
                    continue;
                }

                if after_break {
                    body.push_str(line.trim());
                } else {
                    body.push_str(line);
                }
                after_break = false;
            }
        }

        Description {
            summary: summary.to_string(),
            body,
        }
    }

    /// Get the summary line.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Get the reconstructed body text.
    pub fn body(&self) -> &str {
        &self.body
    }
}
