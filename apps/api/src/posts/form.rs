//! Form intake. Turns a raw submission (JSON body or multipart form) into one
//! immutable `Submission`.
//!
//! This is where presence checks live. The prompt builder never validates.

use std::collections::HashSet;

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::posts::models::{Audience, EventDescription, FocusArea, OutputKind, OutputRequest};

pub const MAX_EVENT_NAME_CHARS: usize = 100;

const IMAGE_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];

// ────────────────────────────────────────────────────────────────────────────
// Request / submission types
// ────────────────────────────────────────────────────────────────────────────

/// Raw request body for `POST /api/v1/posts/generate`.
/// Output kinds and audience stay as labels until `Submission::from_request`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub event: EventDescription,
    #[serde(default)]
    pub outputs: Vec<String>,
    #[serde(default)]
    pub whatsapp_audience: Option<String>,
}

/// One entry of the user's output selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedOutput {
    Known(OutputRequest),
    /// Only produced when unknown kinds are allowed through.
    Unrecognized(String),
}

impl RequestedOutput {
    pub fn label(&self) -> &str {
        match self {
            RequestedOutput::Known(request) => request.kind().label(),
            RequestedOutput::Unrecognized(label) => label,
        }
    }
}

/// A validated form submission: the event plus outputs in selection order.
#[derive(Debug, Clone)]
pub struct Submission {
    pub event: EventDescription,
    pub outputs: Vec<RequestedOutput>,
}

impl Submission {
    pub fn from_request(request: GenerateRequest, allow_unknown_kinds: bool) -> Result<Self, AppError> {
        validate_event(&request.event)?;
        let audience = parse_audience(request.whatsapp_audience.as_deref())?;
        let outputs = resolve_outputs(&request.outputs, audience, allow_unknown_kinds)?;

        Ok(Submission {
            event: request.event,
            outputs,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn validate_event(event: &EventDescription) -> Result<(), AppError> {
    if event.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".to_string()));
    }
    let name_chars = event.name.chars().count();
    if name_chars > MAX_EVENT_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "Event name must be at most {MAX_EVENT_NAME_CHARS} characters (got {name_chars})"
        )));
    }
    Ok(())
}

fn parse_audience(raw: Option<&str>) -> Result<Option<Audience>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => Ok(Some(label.parse::<Audience>()?)),
    }
}

/// Resolves labels in order. Duplicates (compared case-insensitively) collapse to
/// their first occurrence and blank labels are skipped. The audience only matters when WhatsApp is selected.
fn resolve_outputs(
    labels: &[String],
    audience: Option<Audience>,
    allow_unknown_kinds: bool,
) -> Result<Vec<RequestedOutput>, AppError> {
    let mut seen = HashSet::new();
    let mut outputs = Vec::with_capacity(labels.len());

    for raw in labels {
        let label = raw.trim();
        if label.is_empty() {
            continue;
        }

        match label.parse::<OutputKind>() {
            Ok(kind) => {
                if !seen.insert(kind.label().to_ascii_lowercase()) {
                    continue;
                }
                let request = OutputRequest::from_kind(kind, audience).ok_or_else(|| {
                    AppError::Validation(
                        "A WhatsApp audience is required when WhatsApp output is selected"
                            .to_string(),
                    )
                })?;
                outputs.push(RequestedOutput::Known(request));
            }
            Err(_) if allow_unknown_kinds => {
                if seen.insert(label.to_ascii_lowercase()) {
                    debug!("Passing through unrecognized output kind '{label}'");
                    outputs.push(RequestedOutput::Unrecognized(label.to_string()));
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(outputs)
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart intake
// ────────────────────────────────────────────────────────────────────────────

/// Reads the multipart form into a `GenerateRequest`.
///
/// Image parts are counted and discarded. Empty file parts (a file input left
/// blank) are ignored. Unknown fields are skipped.
pub async fn read_multipart(mut multipart: Multipart) -> Result<GenerateRequest, AppError> {
    let mut name = String::new();
    let mut date: Option<String> = None;
    let mut location = String::new();
    let mut focus_area = FocusArea::default();
    let mut partners = String::new();
    let mut tags = String::new();
    let mut highlights = String::new();
    let mut image_count: u32 = 0;
    let mut outputs = Vec::new();
    let mut whatsapp_audience = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "event_name" => name = field.text().await?,
            "event_date" => date = Some(field.text().await?),
            "location" => location = field.text().await?,
            "focus_area" => {
                let raw = field.text().await?;
                if !raw.trim().is_empty() {
                    focus_area = raw.parse()?;
                }
            }
            "partner_names" => partners = field.text().await?,
            "tags" => tags = field.text().await?,
            "highlights" => highlights = field.text().await?,
            "output_types" => outputs.push(field.text().await?),
            "whatsapp_audience" => whatsapp_audience = Some(field.text().await?),
            "images" => {
                if count_image(field).await? {
                    image_count += 1;
                }
            }
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    let date = date
        .map(|raw| parse_event_date(&raw))
        .transpose()?
        .ok_or_else(|| AppError::Validation("Event date is required".to_string()))?;

    Ok(GenerateRequest {
        event: EventDescription {
            name,
            date,
            location,
            focus_area,
            partners,
            tags,
            highlights,
            image_count,
        },
        outputs,
        whatsapp_audience,
    })
}

fn parse_event_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("Event date must be YYYY-MM-DD, got '{}'", raw.trim()))
    })
}

/// Returns whether the part is a real image upload. Rejects non-image files.
async fn count_image(field: Field<'_>) -> Result<bool, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
    let bytes = field.bytes().await?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(false);
    }

    if !is_accepted_image(&file_name, &content_type) {
        return Err(AppError::Validation(format!(
            "Only PNG and JPEG images are accepted (got '{file_name}')"
        )));
    }

    Ok(true)
}

fn is_accepted_image(file_name: &str, content_type: &str) -> bool {
    let file_name = file_name.to_ascii_lowercase();
    IMAGE_CONTENT_TYPES.contains(&content_type)
        || IMAGE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
}
