use serde::{Deserialize, Serialize};

/// The closed set of stored contact attributes.
///
/// Filter and search SQL is generated from this enum only — caller-supplied
/// attribute names never reach the query text. Enum order is the declared
/// column order, which also drives import/export header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DateCaptured,
    State,
    Country,
    Province,
    City,
    FullName,
    PhoneNumber,
    InterestLevel,
    AssignedTo,
    ActionTaken,
    NextAction,
    LeadTemperature,
    CommunicationStatus,
    SponsorName,
    LeadType,
    AssociateStatus,
    RegistrationStatus,
    AplGoId,
    AccountPassword,
    EmailAddress,
    Tags,
}

impl Field {
    /// All stored attributes in declared column order.
    pub const ALL: [Field; 21] = [
        Field::DateCaptured,
        Field::State,
        Field::Country,
        Field::Province,
        Field::City,
        Field::FullName,
        Field::PhoneNumber,
        Field::InterestLevel,
        Field::AssignedTo,
        Field::ActionTaken,
        Field::NextAction,
        Field::LeadTemperature,
        Field::CommunicationStatus,
        Field::SponsorName,
        Field::LeadType,
        Field::AssociateStatus,
        Field::RegistrationStatus,
        Field::AplGoId,
        Field::AccountPassword,
        Field::EmailAddress,
        Field::Tags,
    ];

    /// Attributes probed by free-text search tokens.
    pub const SEARCHABLE: [Field; 10] = [
        Field::FullName,
        Field::PhoneNumber,
        Field::EmailAddress,
        Field::SponsorName,
        Field::AplGoId,
        Field::City,
        Field::Province,
        Field::Country,
        Field::InterestLevel,
        Field::Tags,
    ];

    /// Column name used in the schema and generated SQL.
    pub fn key(self) -> &'static str {
        match self {
            Field::DateCaptured => "date_captured",
            Field::State => "state",
            Field::Country => "country",
            Field::Province => "province",
            Field::City => "city",
            Field::FullName => "full_name",
            Field::PhoneNumber => "phone_number",
            Field::InterestLevel => "interest_level",
            Field::AssignedTo => "assigned_to",
            Field::ActionTaken => "action_taken",
            Field::NextAction => "next_action",
            Field::LeadTemperature => "lead_temperature",
            Field::CommunicationStatus => "communication_status",
            Field::SponsorName => "sponsor_name",
            Field::LeadType => "lead_type",
            Field::AssociateStatus => "associate_status",
            Field::RegistrationStatus => "registration_status",
            Field::AplGoId => "apl_go_id",
            Field::AccountPassword => "account_password",
            Field::EmailAddress => "email_address",
            Field::Tags => "tags",
        }
    }

    /// Human label used for import mapping and export headers.
    pub fn label(self) -> &'static str {
        match self {
            Field::DateCaptured => "Date Captured",
            Field::State => "State",
            Field::Country => "Country",
            Field::Province => "Province",
            Field::City => "City",
            Field::FullName => "Full Name",
            Field::PhoneNumber => "Phone Number",
            Field::InterestLevel => "Interest Level",
            Field::AssignedTo => "Assigned To",
            Field::ActionTaken => "Action Taken",
            Field::NextAction => "Next Action",
            Field::LeadTemperature => "Lead Temperature",
            Field::CommunicationStatus => "Communication Status",
            Field::SponsorName => "Sponsor Name",
            Field::LeadType => "Lead Type",
            Field::AssociateStatus => "Associate Status",
            Field::RegistrationStatus => "Registration Status",
            Field::AplGoId => "APL Go ID",
            Field::AccountPassword => "Account Password",
            Field::EmailAddress => "Email Address",
            Field::Tags => "Tags",
        }
    }

    /// Look up a field by its column name.
    pub fn parse(key: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Date-valued attributes; import normalizes these to `YYYY-MM-DD`.
    pub fn is_date(self) -> bool {
        matches!(self, Field::DateCaptured)
    }

    /// Advisory option set for status-like attributes. Presentation draws
    /// drop-downs from these; storage itself accepts any string.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Field::LeadTemperature => Some(&["Hot", "Warm", "Cold"]),
            Field::CommunicationStatus => Some(&["New", "In Progress", "Pending", "Completed"]),
            Field::RegistrationStatus => Some(&["Activated", "Registered", "Not Registered"]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for &field in &Field::ALL {
            assert_eq!(Field::parse(field.key()), Some(field));
        }
        assert_eq!(Field::parse("no_such_column"), None);
    }

    #[test]
    fn test_searchable_is_subset() {
        for &field in &Field::SEARCHABLE {
            assert!(Field::ALL.contains(&field));
        }
    }

    #[test]
    fn test_serde_uses_column_keys() {
        let json = serde_json::to_string(&Field::AplGoId).unwrap();
        assert_eq!(json, "\"apl_go_id\"");
        let back: Field = serde_json::from_str("\"lead_temperature\"").unwrap();
        assert_eq!(back, Field::LeadTemperature);
    }
}
