/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Extraction of data from the portal's HTML
//!
//! Everything that depends on the portal's markup lives here. The flows in
//! [`session`](crate::session) and [`application`](crate::application) only
//! see the tagged results these functions return.
//!
//! The profile page renders the name as
//!
//! ```html
//! <div class="person_name"><h3>Иванов Иван Иванович</h3></div>
//! ```
//!
//! and every other field as a label/value pair
//!
//! ```html
//! <span class="person__label">Группа:</span>
//! <span class="person__value">БИВТ-21-1</span>
//! ```
//!
//! Other elements may sit between a label and its value, and values may
//! contain nested spans.

use crate::constants::INVALID_CREDENTIALS_MESSAGE;
use crate::error::AppError;
use crate::presentation::student::ProfileFields;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

static CSRF_META: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*name\s*=\s*["']csrf-token["'][^>]*>"#).expect("csrf meta regex")
});

static CONTENT_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bcontent\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("content attr regex")
});

static PERSON_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<div\b[^>]*\bclass\s*=\s*["'][^"']*\bperson_name\b[^"']*["'][^>]*>.*?<h3\b[^>]*>(.*?)</h3>"#,
    )
    .expect("person name regex")
});

static LABEL_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<span\b[^>]*\bclass\s*=\s*["'][^"']*\bperson__label\b[^"']*["'][^>]*>"#)
        .expect("label regex")
});

static VALUE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<span\b[^>]*\bclass\s*=\s*["'][^"']*\bperson__value\b[^"']*["'][^>]*>"#)
        .expect("value regex")
});

static SPAN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)span\b[^>]*>").expect("span tag regex"));

static AU_API_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"var\s+au_api_url\s*=\s*["']/ru/([^/"']+)/"#).expect("au_api_url regex")
});

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<\s*/?\s*([a-zA-Z0-9]*)[^>]*>").expect("tag regex"));

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity regex"));

/// Reason the markup could not be understood
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// The sign-in page has no `csrf-token` meta tag
    MissingCsrfToken,
    /// The `csrf-token` meta tag has no usable content
    EmptyCsrfToken,
    /// The profile page has no name block
    MissingName,
    /// A required label is absent from the profile page
    MissingField {
        /// Field of [`ProfileFields`]
        field: &'static str,
        /// Label the portal shows for it
        label: &'static str,
    },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::MissingCsrfToken => write!(f, "csrf token not found on the sign-in page"),
            ParseFailure::EmptyCsrfToken => write!(f, "csrf token is empty"),
            ParseFailure::MissingName => write!(f, "name block not found on the profile page"),
            ParseFailure::MissingField { field, label } => {
                write!(f, "required field '{field}' (label '{label}') not found")
            }
        }
    }
}

impl From<ParseFailure> for AppError {
    fn from(failure: ParseFailure) -> Self {
        AppError::Parse(failure.to_string())
    }
}

fn decode_entity(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    let decoded = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some(' '),
            _ => None,
        }
    };
    decoded.map_or_else(|| caps[0].to_string(), String::from)
}

fn tag_separator(caps: &Captures<'_>) -> &'static str {
    match caps[1].to_ascii_lowercase().as_str() {
        "br" | "p" | "div" | "li" | "tr" | "td" | "th" | "h1" | "h2" | "h3" | "h4" | "h5"
        | "h6" => " ",
        _ => "",
    }
}

/// Turns an HTML fragment into plain text
///
/// Strips tags, decodes character references and collapses whitespace.
/// Inline elements join their text directly; line breaks and block
/// elements separate it with a space.
#[must_use]
pub fn clean_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, tag_separator);
    let decoded = ENTITY.replace_all(&without_tags, decode_entity);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the CSRF token from the sign-in page
///
/// # Errors
/// [`ParseFailure::MissingCsrfToken`] without a `csrf-token` meta tag,
/// [`ParseFailure::EmptyCsrfToken`] when its content is blank
pub fn extract_csrf_token(html: &str) -> Result<String, ParseFailure> {
    let tag = CSRF_META
        .find(html)
        .ok_or(ParseFailure::MissingCsrfToken)?
        .as_str();
    let token = CONTENT_ATTR
        .captures(tag)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();
    if token.is_empty() {
        return Err(ParseFailure::EmptyCsrfToken);
    }
    Ok(token)
}

/// Extracts the account segment from a post-login redirect
///
/// `https://lk.misis.ru/ru/12345/student` yields `12345`.
#[must_use]
pub fn extract_api_id_from_location(location: &str) -> Option<String> {
    let (_, rest) = location.split_once("/ru/")?;
    let segment = rest.split(['/', '?', '#']).next()?.trim();
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

/// Extracts the account segment from the inline `au_api_url` script
#[must_use]
pub fn extract_api_id_from_script(html: &str) -> Option<String> {
    AU_API_URL
        .captures(html)
        .map(|caps| caps[1].trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Whether the page is the sign-in form re-rendered with the
/// "invalid login or password" message
#[must_use]
pub fn looks_like_invalid_credentials(html: &str) -> bool {
    html.contains(INVALID_CREDENTIALS_MESSAGE)
}

/// Content of the span opened just before `start`, up to its matching close
///
/// Nested spans are balanced; `None` when the span is never closed.
fn span_content(html: &str, start: usize) -> Option<&str> {
    let mut depth = 1usize;
    for caps in SPAN_TAG.captures_iter(&html[start..]) {
        let tag = caps.get(0)?;
        if caps[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(&html[start..start + tag.start()]);
            }
        }
    }
    None
}

fn normalize_label(raw: &str) -> String {
    clean_text(raw).trim_end_matches(':').trim().to_string()
}

fn slot<'a>(fields: &'a mut ProfileFields, label: &str) -> Option<&'a mut Option<String>> {
    let slot = match label {
        "Номер зачетки" => &mut fields.record_book_number,
        "Форма обучения" => &mut fields.study_form,
        "Уровень подготовки" => &mut fields.preparation_level,
        "Специализация" => &mut fields.specialization,
        "Специальность" => &mut fields.specialty,
        "Факультет" => &mut fields.faculty,
        "Курс" => &mut fields.course,
        "Группа" => &mut fields.group,
        "Форма финансирования" => &mut fields.financing_form,
        "Общежитие" => &mut fields.dormitory,
        "Дата окончания" => &mut fields.end_date,
        "Личная почта" => &mut fields.personal_email,
        "Личный номер телефона" => &mut fields.personal_phone,
        "Корпоративная почта" => &mut fields.corporate_email,
        _ => return None,
    };
    Some(slot)
}

/// Extracts the profile fields from the profile page
///
/// The first occurrence of a label wins. Unknown labels are ignored.
///
/// # Errors
/// [`ParseFailure::MissingName`] without a name block, and
/// [`ParseFailure::MissingField`] when the faculty or group label is absent.
/// Present-but-blank values are returned as they are; rejecting them is
/// left to [`StudentInfo`](crate::presentation::student::StudentInfo).
pub fn extract_profile(html: &str) -> Result<ProfileFields, ParseFailure> {
    let full_name = PERSON_NAME
        .captures(html)
        .map(|caps| clean_text(&caps[1]))
        .ok_or(ParseFailure::MissingName)?;

    let mut fields = ProfileFields {
        full_name: Some(full_name),
        ..ProfileFields::default()
    };

    let labels: Vec<_> = LABEL_OPEN.find_iter(html).collect();
    for (i, open) in labels.iter().enumerate() {
        let Some(raw_label) = span_content(html, open.end()) else {
            continue;
        };
        // the value is the next value span before the following label
        let row_end = labels.get(i + 1).map_or(html.len(), |next| next.start());
        let row = &html[open.end()..row_end];
        let Some(value_open) = VALUE_OPEN.find(row) else {
            continue;
        };
        let Some(raw_value) = span_content(row, value_open.end()) else {
            continue;
        };

        let label = normalize_label(raw_label);
        if let Some(target) = slot(&mut fields, &label) {
            if target.is_none() {
                *target = Some(clean_text(raw_value));
            }
        }
    }

    if fields.faculty.is_none() {
        return Err(ParseFailure::MissingField {
            field: "faculty",
            label: "Факультет",
        });
    }
    if fields.group.is_none() {
        return Err(ParseFailure::MissingField {
            field: "group",
            label: "Группа",
        });
    }

    Ok(fields)
}
