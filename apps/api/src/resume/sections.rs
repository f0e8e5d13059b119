//! Section classifier — partitions extracted résumé text into labeled sections.
//!
//! A single-pass line scanner with one mutable state: the current label.
//! A line whose lowercased form contains a label keyword switches the state;
//! any other non-empty line is appended to the current section. The matcher
//! deliberately favors false negatives over false positives — a résumé with
//! no recognizable headings still lands entirely in Personal Information, so
//! downstream search degrades gracefully instead of failing.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The closed set of résumé section labels.
/// Declaration order is the tie-break order when a line matches more than one
/// label, and the traversal order for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLabel {
    PersonalInformation,
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
    Links,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 8] = [
        SectionLabel::PersonalInformation,
        SectionLabel::Summary,
        SectionLabel::Skills,
        SectionLabel::Experience,
        SectionLabel::Education,
        SectionLabel::Projects,
        SectionLabel::Certifications,
        SectionLabel::Links,
    ];

    /// Human-readable heading used in responses and rendered text blocks.
    pub fn heading(self) -> &'static str {
        match self {
            SectionLabel::PersonalInformation => "Personal Information",
            SectionLabel::Summary => "Summary",
            SectionLabel::Skills => "Skills",
            SectionLabel::Experience => "Experience",
            SectionLabel::Education => "Education",
            SectionLabel::Projects => "Projects",
            SectionLabel::Certifications => "Certifications",
            SectionLabel::Links => "Links",
        }
    }

    /// Lowercased keyword the scanner matches against each line.
    fn keyword(self) -> &'static str {
        match self {
            SectionLabel::PersonalInformation => "personal information",
            SectionLabel::Summary => "summary",
            SectionLabel::Skills => "skills",
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Projects => "projects",
            SectionLabel::Certifications => "certifications",
            SectionLabel::Links => "links",
        }
    }

    /// Skills and Links collect individual items; every other label
    /// accumulates paragraph text.
    fn is_list(self) -> bool {
        matches!(self, SectionLabel::Skills | SectionLabel::Links)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl Serialize for SectionLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.heading())
    }
}

/// Content of one section: accumulated paragraph text or an ordered list of
/// short items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionContent {
    Paragraph(String),
    Items(Vec<String>),
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Paragraph(text) => text.is_empty(),
            SectionContent::Items(items) => items.is_empty(),
        }
    }

    /// Content fragments for embedding: one per list item, or the whole
    /// paragraph as a single fragment.
    pub fn fragments(&self) -> Vec<&str> {
        match self {
            SectionContent::Paragraph(text) => vec![text.as_str()],
            SectionContent::Items(items) => items.iter().map(String::as_str).collect(),
        }
    }

    fn rendered(&self) -> String {
        match self {
            SectionContent::Paragraph(text) => text.trim_end().to_string(),
            SectionContent::Items(items) => items.join("\n"),
        }
    }
}

/// Labeled résumé content, kept in label declaration order.
/// Invariant: every label present has non-empty content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionSet {
    entries: Vec<(SectionLabel, SectionContent)>,
}

impl SectionSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, label: SectionLabel) -> Option<&SectionContent> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, content)| content)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionLabel, &SectionContent)> {
        self.entries.iter().map(|(label, content)| (*label, content))
    }

    /// Renders the set as plain `Heading:` blocks for prompt construction.
    pub fn to_prompt_text(&self) -> String {
        self.entries
            .iter()
            .map(|(label, content)| format!("{}:\n{}", label.heading(), content.rendered()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Serialize for SectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, content) in &self.entries {
            map.serialize_entry(label.heading(), content)?;
        }
        map.end()
    }
}

/// Splits résumé text into a `SectionSet`.
///
/// The scanner starts in Personal Information. A heading line switches the
/// current label and is not itself appended; Skills lines are split on comma
/// or semicolon into trimmed tokens; other list sections take the whole line
/// as one item; paragraph sections accumulate the line plus a newline.
/// Labels that end up with no content are dropped, so empty input yields an
/// empty set. Pure function: identical text always yields an identical set.
pub fn split_sections(text: &str) -> SectionSet {
    let mut buckets: Vec<SectionContent> = SectionLabel::ALL
        .iter()
        .map(|label| {
            if label.is_list() {
                SectionContent::Items(Vec::new())
            } else {
                SectionContent::Paragraph(String::new())
            }
        })
        .collect();
    let mut current = SectionLabel::PersonalInformation;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if let Some(next) = transition(line) {
            current = next;
            continue;
        }
        if line.is_empty() {
            continue;
        }
        match &mut buckets[current.index()] {
            SectionContent::Items(items) => {
                if current == SectionLabel::Skills {
                    for token in line.split([',', ';']) {
                        let token = token.trim();
                        if !token.is_empty() {
                            items.push(token.to_string());
                        }
                    }
                } else {
                    items.push(line.to_string());
                }
            }
            SectionContent::Paragraph(text) => {
                text.push_str(line);
                text.push('\n');
            }
        }
    }

    let entries = SectionLabel::ALL
        .iter()
        .zip(buckets)
        .filter(|(_, content)| !content.is_empty())
        .map(|(label, content)| (*label, content))
        .collect();

    SectionSet { entries }
}

/// Transition function of the scanner: the first label (in declaration order)
/// whose keyword occurs in the lowercased line, if any.
fn transition(line: &str) -> Option<SectionLabel> {
    if line.is_empty() {
        return None;
    }
    let lower = line.to_lowercase();
    SectionLabel::ALL
        .iter()
        .copied()
        .find(|label| lower.contains(label.keyword()))
}
