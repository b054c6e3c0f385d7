//! Form submission data model: the event being announced and the post kinds requested for it.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a form label does not name any known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {field} '{value}'")]
pub struct UnknownLabel {
    pub field: &'static str,
    pub value: String,
}

fn match_label<T: Copy, L: AsRef<[&'static str]>>(
    field: &'static str,
    value: &str,
    options: &[T],
    labels: impl Fn(&T) -> L,
) -> Result<T, UnknownLabel> {
    let wanted = value.trim();
    options
        .iter()
        .find(|option| {
            labels(*option)
                .as_ref()
                .iter()
                .any(|label| label.eq_ignore_ascii_case(wanted))
        })
        .copied()
        .ok_or_else(|| UnknownLabel {
            field,
            value: wanted.to_string(),
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Focus area
// ────────────────────────────────────────────────────────────────────────────

/// Who the event is about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    #[default]
    Students,
    Teachers,
    Schools,
}

impl FocusArea {
    pub const ALL: [FocusArea; 3] = [FocusArea::Students, FocusArea::Teachers, FocusArea::Schools];

    pub fn label(&self) -> &'static str {
        match self {
            FocusArea::Students => "Students",
            FocusArea::Teachers => "Teachers",
            FocusArea::Schools => "Schools",
        }
    }
}

impl fmt::Display for FocusArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FocusArea {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_label("focus area", s, &Self::ALL, |f| [f.label()])
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WhatsApp audience
// ────────────────────────────────────────────────────────────────────────────

/// Readership of a WhatsApp message. Serialized with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Audience {
    Students,
    Teachers,
    Principals,
    #[serde(rename = "Field Team", alias = "FieldTeam")]
    FieldTeam,
    #[serde(rename = "Leadership Team", alias = "LeadershipTeam")]
    LeadershipTeam,
    Peers,
}

impl Audience {
    pub const ALL: [Audience; 6] = [
        Audience::Students,
        Audience::Teachers,
        Audience::Principals,
        Audience::FieldTeam,
        Audience::LeadershipTeam,
        Audience::Peers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Audience::Students => "Students",
            Audience::Teachers => "Teachers",
            Audience::Principals => "Principals",
            Audience::FieldTeam => "Field Team",
            Audience::LeadershipTeam => "Leadership Team",
            Audience::Peers => "Peers",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Audience::FieldTeam => "FieldTeam",
            Audience::LeadershipTeam => "LeadershipTeam",
            other => other.label(),
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Audience {
    type Err = UnknownLabel;

    /// Accepts the display label ("Field Team") or the variant name ("FieldTeam").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_label("WhatsApp audience", s, &Self::ALL, |a| {
            [a.label(), a.variant_name()]
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output kinds
// ────────────────────────────────────────────────────────────────────────────

/// The post formats the generator knows how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    LinkedIn,
    WhatsApp,
    Newspaper,
}

impl OutputKind {
    pub const ALL: [OutputKind; 3] = [OutputKind::LinkedIn, OutputKind::WhatsApp, OutputKind::Newspaper];

    pub fn label(&self) -> &'static str {
        match self {
            OutputKind::LinkedIn => "LinkedIn",
            OutputKind::WhatsApp => "WhatsApp",
            OutputKind::Newspaper => "Newspaper",
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputKind {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_label("output kind", s, &Self::ALL, |k| [k.label()])
    }
}

/// A single requested post. WhatsApp always carries its audience, so a
/// WhatsApp request without one cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRequest {
    LinkedIn,
    WhatsApp { audience: Audience },
    Newspaper,
}

impl OutputRequest {
    /// Pairs a kind with the form's audience selection.
    /// Returns `None` for WhatsApp when no audience was chosen.
    pub fn from_kind(kind: OutputKind, audience: Option<Audience>) -> Option<Self> {
        match kind {
            OutputKind::LinkedIn => Some(OutputRequest::LinkedIn),
            OutputKind::WhatsApp => audience.map(|audience| OutputRequest::WhatsApp { audience }),
            OutputKind::Newspaper => Some(OutputRequest::Newspaper),
        }
    }

    pub fn kind(&self) -> OutputKind {
        match self {
            OutputRequest::LinkedIn => OutputKind::LinkedIn,
            OutputRequest::WhatsApp { .. } => OutputKind::WhatsApp,
            OutputRequest::Newspaper => OutputKind::Newspaper,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Event description
// ────────────────────────────────────────────────────────────────────────────

/// Everything the user told us about the event. Built once per submission.
///
/// `image_count` is all that survives of uploaded photos; image bytes are never
/// forwarded to the completion API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescription {
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub focus_area: FocusArea,
    /// Comma-separated partner/supporter names.
    #[serde(default)]
    pub partners: String,
    /// Comma-separated people or organizations to tag. LinkedIn only.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub highlights: String,
    #[serde(default)]
    pub image_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_accepts_label_and_variant_name() {
        assert_eq!("Field Team".parse::<Audience>().unwrap(), Audience::FieldTeam);
        assert_eq!("FieldTeam".parse::<Audience>().unwrap(), Audience::FieldTeam);
        assert_eq!(
            " leadership team ".parse::<Audience>().unwrap(),
            Audience::LeadershipTeam
        );
    }

    #[test]
    fn test_audience_serializes_with_display_label() {
        let json = serde_json::to_string(&Audience::LeadershipTeam).unwrap();
        assert_eq!(json, "\"Leadership Team\"");
        let parsed: Audience = serde_json::from_str("\"FieldTeam\"").unwrap();
        assert_eq!(parsed, Audience::FieldTeam);
    }

    #[test]
    fn test_single_label_enums_match_ignoring_case() {
        assert_eq!(" whatsapp".parse::<OutputKind>().unwrap(), OutputKind::WhatsApp);
        assert_eq!("SCHOOLS".parse::<FocusArea>().unwrap(), FocusArea::Schools);
        let err = "Parents".parse::<FocusArea>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown focus area 'Parents'");
    }

    #[test]
    fn test_unknown_output_kind_is_reported() {
        let err = "Instagram".parse::<OutputKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown output kind 'Instagram'");
    }

    #[test]
    fn test_whatsapp_request_requires_audience() {
        assert!(OutputRequest::from_kind(OutputKind::WhatsApp, None).is_none());
        assert_eq!(
            OutputRequest::from_kind(OutputKind::WhatsApp, Some(Audience::Peers)),
            Some(OutputRequest::WhatsApp {
                audience: Audience::Peers
            })
        );
        // Audience is irrelevant for the other kinds
        assert_eq!(
            OutputRequest::from_kind(OutputKind::Newspaper, Some(Audience::Peers)),
            Some(OutputRequest::Newspaper)
        );
    }

    #[test]
    fn test_event_description_defaults_optional_fields() {
        let json = serde_json::json!({
            "name": "Science Fair",
            "date": "2024-02-28"
        });
        let event: EventDescription = serde_json::from_value(json).unwrap();
        assert_eq!(event.focus_area, FocusArea::Students);
        assert_eq!(event.image_count, 0);
        assert!(event.tags.is_empty());
    }

    #[test]
    fn test_event_description_rejects_negative_image_count() {
        let json = serde_json::json!({
            "name": "Science Fair",
            "date": "2024-02-28",
            "image_count": -1
        });
        assert!(serde_json::from_value::<EventDescription>(json).is_err());
    }
}
