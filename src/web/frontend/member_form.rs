use crate::member::record::{Answer, MaritalStatus, MemberRecord, MembershipType, Sex};
use rocket::form::Context;
use rocket::fs::TempFile;
use serde::Serialize;
use std::collections::BTreeMap;

/// Form fields, by name, with the value they're initialized with on an empty form.
const FORM_FIELDS: [(&str, &str); 24] = [
    ("id", ""),
    ("last_name", ""),
    ("first_name", ""),
    ("middle_name", ""),
    ("date_of_birth", ""),
    ("place_of_birth", ""),
    ("nationality", ""),
    ("age", "0"),
    ("sex", "Male"),
    ("home_address", ""),
    ("contact_number_1", ""),
    ("contact_number_2", ""),
    ("position_rank", ""),
    ("occupation", ""),
    ("marital_status", "Single"),
    ("spouse_name", ""),
    ("date_of_marriage", ""),
    ("born_again", "Yes"),
    ("baptized", "Yes"),
    ("membership_type", "Full Membership"),
    ("joined_year", ""),
    ("email", ""),
    ("emergency_contact_name", ""),
    ("emergency_contact_cell", ""),
];

#[derive(FromForm)]
pub struct MemberForm<'r> {
    id: String,
    last_name: String,
    first_name: String,
    middle_name: String,
    date_of_birth: String,
    place_of_birth: String,
    nationality: String,
    #[field(validate = range(0..=120))]
    age: u8,
    sex: Sex,
    home_address: String,
    contact_number_1: String,
    contact_number_2: String,
    position_rank: String,
    occupation: String,
    marital_status: MaritalStatus,
    spouse_name: String,
    date_of_marriage: String,
    born_again: Answer,
    baptized: Answer,
    membership_type: MembershipType,
    joined_year: String,
    email: String,
    emergency_contact_name: String,
    emergency_contact_cell: String,
    image: Option<TempFile<'r>>,
}

impl<'r> MemberForm<'r> {
    /// Split the form into the member it describes and its uploaded image, if any.
    pub fn into_record(self) -> (MemberRecord, Option<TempFile<'r>>) {
        let record = MemberRecord::new(
            self.id,
            self.last_name,
            self.first_name,
            self.middle_name,
            self.date_of_birth,
            self.place_of_birth,
            self.nationality,
            self.age,
            self.sex,
            self.home_address,
            self.contact_number_1,
            self.contact_number_2,
            self.position_rank,
            self.occupation,
            self.marital_status,
            self.spouse_name,
            self.date_of_marriage,
            self.born_again,
            self.baptized,
            self.membership_type,
            self.joined_year,
            self.email,
            self.emergency_contact_name,
            self.emergency_contact_cell,
        );
        (record, self.image)
    }

    pub fn values(&self) -> FormValues {
        FormValues::from_iter([
            ("id", self.id.clone()),
            ("last_name", self.last_name.clone()),
            ("first_name", self.first_name.clone()),
            ("middle_name", self.middle_name.clone()),
            ("date_of_birth", self.date_of_birth.clone()),
            ("place_of_birth", self.place_of_birth.clone()),
            ("nationality", self.nationality.clone()),
            ("age", self.age.to_string()),
            ("sex", self.sex.to_string()),
            ("home_address", self.home_address.clone()),
            ("contact_number_1", self.contact_number_1.clone()),
            ("contact_number_2", self.contact_number_2.clone()),
            ("position_rank", self.position_rank.clone()),
            ("occupation", self.occupation.clone()),
            ("marital_status", self.marital_status.to_string()),
            ("spouse_name", self.spouse_name.clone()),
            ("date_of_marriage", self.date_of_marriage.clone()),
            ("born_again", self.born_again.to_string()),
            ("baptized", self.baptized.to_string()),
            ("membership_type", self.membership_type.to_string()),
            ("joined_year", self.joined_year.clone()),
            ("email", self.email.clone()),
            ("emergency_contact_name", self.emergency_contact_name.clone()),
            ("emergency_contact_cell", self.emergency_contact_cell.clone()),
        ])
    }
}

/// Values the form is filled with when rendered.
/// Every field is always present, so that templates never hit an undefined value.
#[derive(Debug, Serialize, PartialEq)]
pub struct FormValues(BTreeMap<&'static str, String>);

impl Default for FormValues {
    fn default() -> Self {
        Self(
            FORM_FIELDS
                .iter()
                .map(|(name, value)| (*name, (*value).to_owned()))
                .collect(),
        )
    }
}

impl FromIterator<(&'static str, String)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (&'static str, String)>>(iter: I) -> Self {
        let mut values = Self::default();
        values.0.extend(iter);
        values
    }
}

impl FormValues {
    /// Values as they have been sent, for a form that couldn't be parsed.
    pub fn from_context(context: &Context<'_>) -> Self {
        FORM_FIELDS
            .iter()
            .filter_map(|(name, _)| {
                context
                    .field_value(*name)
                    .map(|value| (*name, value.to_owned()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl FormValues {
        fn get(&self, name: &str) -> Option<&str> {
            self.0.get(name).map(String::as_str)
        }
    }

    #[test]
    fn should_initialize_every_field() {
        let values = FormValues::default();

        assert_eq!(Some(""), values.get("id"));
        assert_eq!(Some("0"), values.get("age"));
        assert_eq!(Some("Full Membership"), values.get("membership_type"));
        assert_eq!(FORM_FIELDS.len(), values.0.len());
    }

    #[test]
    fn should_override_defaults_with_given_values() {
        let values =
            FormValues::from_iter([("id", "007".to_owned()), ("sex", "Female".to_owned())]);

        assert_eq!(Some("007"), values.get("id"));
        assert_eq!(Some("Female"), values.get("sex"));
        assert_eq!(Some(""), values.get("last_name"));
        assert_eq!(FORM_FIELDS.len(), values.0.len());
    }
}
