use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Field;

/// The 21 stored attributes of a contact, all plain text.
///
/// Doubles as the insert payload: attributes left at their default persist
/// as empty strings, and the store accepts any string in any attribute
/// (the status enumerations are advisory only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub date_captured: String,
    pub state: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub full_name: String,
    pub phone_number: String,
    pub interest_level: String,
    pub assigned_to: String,
    pub action_taken: String,
    pub next_action: String,
    pub lead_temperature: String,
    pub communication_status: String,
    pub sponsor_name: String,
    pub lead_type: String,
    pub associate_status: String,
    pub registration_status: String,
    pub apl_go_id: String,
    pub account_password: String,
    pub email_address: String,
    pub tags: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::DateCaptured => &self.date_captured,
            Field::State => &self.state,
            Field::Country => &self.country,
            Field::Province => &self.province,
            Field::City => &self.city,
            Field::FullName => &self.full_name,
            Field::PhoneNumber => &self.phone_number,
            Field::InterestLevel => &self.interest_level,
            Field::AssignedTo => &self.assigned_to,
            Field::ActionTaken => &self.action_taken,
            Field::NextAction => &self.next_action,
            Field::LeadTemperature => &self.lead_temperature,
            Field::CommunicationStatus => &self.communication_status,
            Field::SponsorName => &self.sponsor_name,
            Field::LeadType => &self.lead_type,
            Field::AssociateStatus => &self.associate_status,
            Field::RegistrationStatus => &self.registration_status,
            Field::AplGoId => &self.apl_go_id,
            Field::AccountPassword => &self.account_password,
            Field::EmailAddress => &self.email_address,
            Field::Tags => &self.tags,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::DateCaptured => self.date_captured = value,
            Field::State => self.state = value,
            Field::Country => self.country = value,
            Field::Province => self.province = value,
            Field::City => self.city = value,
            Field::FullName => self.full_name = value,
            Field::PhoneNumber => self.phone_number = value,
            Field::InterestLevel => self.interest_level = value,
            Field::AssignedTo => self.assigned_to = value,
            Field::ActionTaken => self.action_taken = value,
            Field::NextAction => self.next_action = value,
            Field::LeadTemperature => self.lead_temperature = value,
            Field::CommunicationStatus => self.communication_status = value,
            Field::SponsorName => self.sponsor_name = value,
            Field::LeadType => self.lead_type = value,
            Field::AssociateStatus => self.associate_status = value,
            Field::RegistrationStatus => self.registration_status = value,
            Field::AplGoId => self.apl_go_id = value,
            Field::AccountPassword => self.account_password = value,
            Field::EmailAddress => self.email_address = value,
            Field::Tags => self.tags = value,
        }
    }

    /// Builder-style `set`, handy when assembling drafts inline.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

/// A stored contact row: surrogate id, attributes, store-owned timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ContactFields,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl Contact {
    pub fn get(&self, field: Field) -> &str {
        self.fields.get(field)
    }
}

/// A partial edit to one contact: only the attributes present are written.
///
/// A patch with no id (or id 0) or no attributes is skipped silently by
/// `update_rows` — tolerant of half-filled rows from an edit grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub id: Option<i64>,
    fields: BTreeMap<Field, String>,
}

impl ContactPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id: Some(id),
            fields: BTreeMap::new(),
        }
    }

    /// A patch carrying attributes but no id; `update_rows` skips it.
    pub fn unkeyed() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.insert(field, value.into());
        self
    }

    pub fn fields(&self) -> &BTreeMap<Field, String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
