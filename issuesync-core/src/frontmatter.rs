//! Front-matter splitting for issue files.
//!
//! # Format
//!
//! ```markdown
//! ---
//! title: Welcome {{ repo.repo }}
//! labels: onboarding
//! ---
//! Body text, itself a template.
//! ```
//!
//! The block must start on the first line. It closes on the next line that
//! reads `---` or `...`. Text without an opening line is all body.

use crate::error::FrontMatterError;
use crate::types::{FrontMatter, IssueFile};

const OPEN: &str = "---";
const CLOSE: [&str; 2] = ["---", "..."];

/// Split `content` into attributes and body.
///
/// Returns [`FrontMatterError::Unterminated`] when the block never closes and
/// [`FrontMatterError::Yaml`] when it does not parse.
pub fn parse(content: &str) -> Result<IssueFile, FrontMatterError> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = text.split_inclusive('\n');

    let opens = lines.next().is_some_and(|first| first.trim_end() == OPEN);
    if !opens {
        return Ok(IssueFile {
            attributes: FrontMatter::default(),
            body: text.to_string(),
        });
    }

    let yaml_start = text.find('\n').map_or(text.len(), |i| i + 1);
    let mut offset = yaml_start;
    for line in lines {
        if CLOSE.contains(&line.trim_end()) {
            let yaml = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            return Ok(IssueFile {
                attributes: parse_attributes(yaml)?,
                body: body.to_string(),
            });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

fn parse_attributes(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}
