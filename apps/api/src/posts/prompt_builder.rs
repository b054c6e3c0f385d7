//! Prompt Builder. Turns an event description and a requested post kind into
//! the plain-text instruction sent to the completion API.
//!
//! Pure functions only: no I/O, no validation. Empty fields are interpolated as
//! empty strings; rejecting them is the form layer's job.

use crate::posts::models::{Audience, EventDescription, OutputKind, OutputRequest};
use crate::posts::prompts::{
    LINKEDIN_INSTRUCTIONS, NEWSPAPER_INSTRUCTIONS, NO_IMAGES_NOTE, PREAMBLE_DATE_FORMAT,
    WHATSAPP_INSTRUCTIONS_TEMPLATE,
};

/// Human-readable note on the attached photos. Only the count is ever used.
pub fn image_note(image_count: u32) -> String {
    match image_count {
        0 => NO_IMAGES_NOTE.to_string(),
        n => format!("{n} image(s) showing the event"),
    }
}

/// The kind-independent block listing every event field, one per line.
///
/// Fields are substituted positionally so user text containing braces is kept verbatim.
pub fn build_preamble(event: &EventDescription) -> String {
    format!(
        "\nEvent Name: {}\nDate: {}\nLocation: {}\nFocus Area: {}\nHighlights: {}\nPartners: {}\nTags: {}\nImages: {}\n",
        event.name,
        event.date.format(PREAMBLE_DATE_FORMAT),
        event.location,
        event.focus_area,
        event.highlights,
        event.partners,
        event.tags,
        image_note(event.image_count),
    )
}

fn instruction_block(request: &OutputRequest) -> String {
    match request {
        OutputRequest::LinkedIn => LINKEDIN_INSTRUCTIONS.to_string(),
        OutputRequest::WhatsApp { audience } => {
            WHATSAPP_INSTRUCTIONS_TEMPLATE.replace("{audience}", audience.label())
        }
        OutputRequest::Newspaper => NEWSPAPER_INSTRUCTIONS.to_string(),
    }
}

/// Builds the full prompt: preamble followed by the kind's instruction block.
pub fn build_prompt(event: &EventDescription, request: &OutputRequest) -> String {
    let mut prompt = build_preamble(event);
    prompt.push_str(&instruction_block(request));
    prompt
}

/// Label-driven variant for callers holding a raw kind name.
///
/// An unrecognized label, or `WhatsApp` without an audience, contributes no
/// instruction block: the result is the preamble alone.
pub fn build_prompt_for_label(
    event: &EventDescription,
    label: &str,
    audience: Option<Audience>,
) -> String {
    let request = label
        .parse::<OutputKind>()
        .ok()
        .and_then(|kind| OutputRequest::from_kind(kind, audience));

    match request {
        Some(request) => build_prompt(event, &request),
        None => build_preamble(event),
    }
}
