/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::error::AppError;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Profile fields as found on the portal's profile page
///
/// Every field is optional here; [`StudentInfo`] decides which ones are
/// required and validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFields {
    /// Full name of the student
    pub full_name: Option<String>,
    /// Record book (student card) number
    pub record_book_number: Option<String>,
    /// Form of study (full-time, part-time, ...)
    pub study_form: Option<String>,
    /// Degree level
    pub preparation_level: Option<String>,
    /// Specialization
    pub specialization: Option<String>,
    /// Specialty code and name
    pub specialty: Option<String>,
    /// Faculty or institute
    pub faculty: Option<String>,
    /// Year of study
    pub course: Option<String>,
    /// Study group
    pub group: Option<String>,
    /// Funding (budget or contract)
    pub financing_form: Option<String>,
    /// Dormitory status
    pub dormitory: Option<String>,
    /// Expected end of studies
    pub end_date: Option<String>,
    /// Personal email
    pub personal_email: Option<String>,
    /// Personal phone number
    pub personal_phone: Option<String>,
    /// University email
    pub corporate_email: Option<String>,
}

/// Validated student profile
///
/// `full_name`, `group` and `faculty` are always non-empty. The remaining
/// fields are present only when the portal shows a non-blank value. The
/// record is immutable; use the accessors to read it.
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileFields")]
pub struct StudentInfo {
    full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    record_book_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    study_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preparation_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specialty: Option<String>,
    faculty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    course: Option<String>,
    group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    financing_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dormitory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personal_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    personal_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corporate_email: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    let value = value.map(|v| v.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn email(value: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match optional(value) {
        Some(address) if !address.contains('@') => Err(AppError::Validation(format!(
            "{field} is not a valid email address: {address}"
        ))),
        other => Ok(other),
    }
}

impl TryFrom<ProfileFields> for StudentInfo {
    type Error = AppError;

    fn try_from(fields: ProfileFields) -> Result<Self, Self::Error> {
        Ok(Self {
            full_name: required(fields.full_name, "full_name")?,
            record_book_number: optional(fields.record_book_number),
            study_form: optional(fields.study_form),
            preparation_level: optional(fields.preparation_level),
            specialization: optional(fields.specialization),
            specialty: optional(fields.specialty),
            faculty: required(fields.faculty, "faculty")?,
            course: optional(fields.course),
            group: required(fields.group, "group")?,
            financing_form: optional(fields.financing_form),
            dormitory: optional(fields.dormitory),
            end_date: optional(fields.end_date),
            personal_email: email(fields.personal_email, "personal_email")?,
            personal_phone: optional(fields.personal_phone),
            corporate_email: email(fields.corporate_email, "corporate_email")?,
        })
    }
}

impl StudentInfo {
    /// Builds a profile from the three required fields
    ///
    /// # Errors
    /// `AppError::Validation` when any of them is blank
    pub fn new(full_name: &str, group: &str, faculty: &str) -> Result<Self, AppError> {
        Self::try_from(ProfileFields {
            full_name: Some(full_name.to_string()),
            group: Some(group.to_string()),
            faculty: Some(faculty.to_string()),
            ..ProfileFields::default()
        })
    }

    /// Full name
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Study group
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Faculty or institute
    #[must_use]
    pub fn faculty(&self) -> &str {
        &self.faculty
    }

    /// Record book number
    #[must_use]
    pub fn record_book_number(&self) -> Option<&str> {
        self.record_book_number.as_deref()
    }

    /// Form of study
    #[must_use]
    pub fn study_form(&self) -> Option<&str> {
        self.study_form.as_deref()
    }

    /// Degree level
    #[must_use]
    pub fn preparation_level(&self) -> Option<&str> {
        self.preparation_level.as_deref()
    }

    /// Specialization
    #[must_use]
    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }

    /// Specialty
    #[must_use]
    pub fn specialty(&self) -> Option<&str> {
        self.specialty.as_deref()
    }

    /// Year of study
    #[must_use]
    pub fn course(&self) -> Option<&str> {
        self.course.as_deref()
    }

    /// Funding
    #[must_use]
    pub fn financing_form(&self) -> Option<&str> {
        self.financing_form.as_deref()
    }

    /// Dormitory status
    #[must_use]
    pub fn dormitory(&self) -> Option<&str> {
        self.dormitory.as_deref()
    }

    /// Expected end of studies
    #[must_use]
    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    /// Personal email
    #[must_use]
    pub fn personal_email(&self) -> Option<&str> {
        self.personal_email.as_deref()
    }

    /// Personal phone number
    #[must_use]
    pub fn personal_phone(&self) -> Option<&str> {
        self.personal_phone.as_deref()
    }

    /// University email
    #[must_use]
    pub fn corporate_email(&self) -> Option<&str> {
        self.corporate_email.as_deref()
    }

    /// Label and value of every present field, in display order
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let all: [(&'static str, Option<&str>); 15] = [
            ("Full name", Some(self.full_name())),
            ("Record book", self.record_book_number()),
            ("Study form", self.study_form()),
            ("Level", self.preparation_level()),
            ("Specialization", self.specialization()),
            ("Specialty", self.specialty()),
            ("Faculty", Some(self.faculty())),
            ("Course", self.course()),
            ("Group", Some(self.group())),
            ("Financing", self.financing_form()),
            ("Dormitory", self.dormitory()),
            ("End date", self.end_date()),
            ("Personal email", self.personal_email()),
            ("Personal phone", self.personal_phone()),
            ("Corporate email", self.corporate_email()),
        ];
        all.into_iter()
            .filter_map(|(label, value)| value.map(|v| (label, v)))
            .collect()
    }
}
