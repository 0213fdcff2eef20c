//! Parser for the Unicode `emoji-test.txt` format.
//!
//! ```text
//! # group: Smileys & Emotion
//! # subgroup: face-smiling
//! 1F600 ; fully-qualified # 😀 E1.0 grinning face
//! ```

use crate::error::{BuildError, Result};

/// Qualification status of an emoji-test line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualification {
    FullyQualified,
    MinimallyQualified,
    Unqualified,
    Component,
}

impl Qualification {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "fully-qualified" => Some(Qualification::FullyQualified),
            "minimally-qualified" => Some(Qualification::MinimallyQualified),
            "unqualified" => Some(Qualification::Unqualified),
            "component" => Some(Qualification::Component),
            _ => None,
        }
    }

    /// Only fully-qualified symbols and components make it into the database.
    pub fn is_kept(&self) -> bool {
        matches!(
            self,
            Qualification::FullyQualified | Qualification::Component
        )
    }
}

/// One data line, with the group and subgroup it was listed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiTestLine {
    pub symbol: String,
    pub status: Qualification,
    pub group: String,
    pub subgroup: String,
    /// The CLDR short name from the trailing comment.
    pub name: String,
}

/// Parse a whole emoji-test document.
///
/// Malformed data lines and data lines outside any group are errors.
pub fn parse_emoji_test(source_name: &str, text: &str) -> Result<Vec<EmojiTestLine>> {
    let mut group: Option<String> = None;
    let mut subgroup: Option<String> = None;
    let mut lines = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(name) = comment.strip_prefix("group:") {
                group = Some(name.trim().to_string());
                subgroup = None;
            } else if let Some(name) = comment.strip_prefix("subgroup:") {
                subgroup = Some(name.trim().to_string());
            }
            continue;
        }

        let parse_err = |message: String| BuildError::Parse {
            source_name: source_name.to_string(),
            line: line_no,
            message,
        };

        let (codepoints, rest) = line
            .split_once(';')
            .ok_or_else(|| parse_err("missing ';'".to_string()))?;
        let (status, comment) = rest
            .split_once('#')
            .ok_or_else(|| parse_err("missing '#'".to_string()))?;

        let status = Qualification::parse(status.trim())
            .ok_or_else(|| parse_err(format!("unknown status '{}'", status.trim())))?;
        let symbol = decode_codepoints(codepoints).map_err(parse_err)?;
        let name = comment_name(comment)
            .ok_or_else(|| parse_err("missing name in comment".to_string()))?;

        let (Some(group), Some(subgroup)) = (&group, &subgroup) else {
            return Err(parse_err("data line outside a group/subgroup".to_string()));
        };

        lines.push(EmojiTestLine {
            symbol,
            status,
            group: group.clone(),
            subgroup: subgroup.clone(),
            name,
        });
    }

    Ok(lines)
}

fn decode_codepoints(field: &str) -> std::result::Result<String, String> {
    let mut symbol = String::new();
    for hex in field.split_whitespace() {
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| format!("bad code point '{}'", hex))?;
        let c = char::from_u32(value).ok_or_else(|| format!("invalid code point {}", hex))?;
        symbol.push(c);
    }
    if symbol.is_empty() {
        return Err("no code points".to_string());
    }
    Ok(symbol)
}

/// `"😀 E1.0 grinning face"` -> `"grinning face"`.
fn comment_name(comment: &str) -> Option<String> {
    let mut tokens = comment.split_whitespace();
    tokens.next()?;

    let mut rest: Vec<&str> = tokens.collect();
    if rest
        .first()
        .is_some_and(|t| t.starts_with('E') && t[1..].starts_with(|c: char| c.is_ascii_digit()))
    {
        rest.remove(0);
    }
    if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# emoji-test.txt
# Version: 15.1

# group: Smileys & Emotion

# subgroup: face-smiling
1F600                                                  ; fully-qualified     # 😀 E1.0 grinning face
263A FE0F                                              ; fully-qualified     # ☺️ E0.6 smiling face
263A                                                   ; unqualified         # ☺ E0.6 smiling face

# group: Component

# subgroup: skin-tone
1F3FB                                                  ; component           # 🏻 E1.0 light skin tone

#EOF
";

    #[test]
    fn test_parse_sample() {
        let lines = parse_emoji_test("emoji-test.txt", SAMPLE).unwrap();
        assert_eq!(lines.len(), 4);

        assert_eq!(lines[0].symbol, "😀");
        assert_eq!(lines[0].name, "grinning face");
        assert_eq!(lines[0].group, "Smileys & Emotion");
        assert_eq!(lines[0].subgroup, "face-smiling");
        assert_eq!(lines[0].status, Qualification::FullyQualified);

        assert_eq!(lines[1].symbol, "\u{263A}\u{FE0F}");
        assert_eq!(lines[2].status, Qualification::Unqualified);

        assert_eq!(lines[3].group, "Component");
        assert_eq!(lines[3].status, Qualification::Component);
        assert_eq!(lines[3].name, "light skin tone");
    }

    #[test]
    fn test_kept_statuses() {
        assert!(Qualification::FullyQualified.is_kept());
        assert!(Qualification::Component.is_kept());
        assert!(!Qualification::MinimallyQualified.is_kept());
        assert!(!Qualification::Unqualified.is_kept());
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let text = "# group: Flags\n# subgroup: flag\n1F3C1 fully-qualified # 🏁 E0.6 chequered flag\n";
        match parse_emoji_test("emoji-test.txt", text) {
            Err(BuildError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let text = "# group: Flags\n# subgroup: flag\n1F3C1 ; maybe-qualified # 🏁 E0.6 chequered flag\n";
        assert!(parse_emoji_test("emoji-test.txt", text).is_err());
    }

    #[test]
    fn test_data_outside_group_rejected() {
        let text = "1F3C1 ; fully-qualified # 🏁 E0.6 chequered flag\n";
        assert!(parse_emoji_test("emoji-test.txt", text).is_err());
    }

    #[test]
    fn test_name_without_version_token() {
        assert_eq!(comment_name("🏁 chequered flag").as_deref(), Some("chequered flag"));
        assert_eq!(comment_name("🏁 E0.6 chequered flag").as_deref(), Some("chequered flag"));
        assert_eq!(comment_name("🏁 E0.6"), None);
    }
}
