use derive_getters::Getters;
use rocket::FromFormField;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Column headers of the members file, in storage order.
pub const COLUMNS: [&str; 25] = [
    "ID",
    "Last Name",
    "First Name",
    "Middle Name",
    "Date of Birth",
    "Place of Birth",
    "Nationality",
    "Age",
    "Sex",
    "Home Address",
    "Contact Number 1",
    "Contact Number 2",
    "Position/Rank",
    "Occupation",
    "Marital Status",
    "Spouse Name",
    "Date of Marriage",
    "Born Again",
    "Baptized",
    "Membership Type",
    "Joined Year",
    "Email",
    "Emergency Contact Name",
    "Emergency Contact Cell",
    "Image Path",
];

/// One membership entry, as stored in a row of the members file.
///
/// Identifiers, phone numbers and years are kept as text:
/// a value such as `007` is never turned into a number.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct MemberRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Last Name")]
    last_name: String,
    #[serde(rename = "First Name")]
    first_name: String,
    #[serde(rename = "Middle Name")]
    middle_name: String,
    #[serde(rename = "Date of Birth")]
    date_of_birth: String,
    #[serde(rename = "Place of Birth")]
    place_of_birth: String,
    #[serde(rename = "Nationality")]
    nationality: String,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Sex")]
    sex: Sex,
    #[serde(rename = "Home Address")]
    home_address: String,
    #[serde(rename = "Contact Number 1")]
    contact_number_1: String,
    #[serde(rename = "Contact Number 2")]
    contact_number_2: String,
    #[serde(rename = "Position/Rank")]
    position_rank: String,
    #[serde(rename = "Occupation")]
    occupation: String,
    #[serde(rename = "Marital Status")]
    marital_status: MaritalStatus,
    #[serde(rename = "Spouse Name")]
    spouse_name: String,
    #[serde(rename = "Date of Marriage")]
    date_of_marriage: String,
    #[serde(rename = "Born Again")]
    born_again: Answer,
    #[serde(rename = "Baptized")]
    baptized: Answer,
    #[serde(rename = "Membership Type")]
    membership_type: MembershipType,
    #[serde(rename = "Joined Year")]
    joined_year: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Emergency Contact Name")]
    emergency_contact_name: String,
    #[serde(rename = "Emergency Contact Cell")]
    emergency_contact_cell: String,
    #[serde(rename = "Image Path")]
    image_path: String,
}

impl MemberRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        last_name: String,
        first_name: String,
        middle_name: String,
        date_of_birth: String,
        place_of_birth: String,
        nationality: String,
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
    ) -> Self {
        Self {
            id,
            last_name,
            first_name,
            middle_name,
            date_of_birth,
            place_of_birth,
            nationality,
            age,
            sex,
            home_address,
            contact_number_1,
            contact_number_2,
            position_rank,
            occupation,
            marital_status,
            spouse_name,
            date_of_marriage,
            born_again,
            baptized,
            membership_type,
            joined_year,
            email,
            emergency_contact_name,
            emergency_contact_cell,
            image_path: String::new(),
        }
    }

    pub fn set_image_path(&mut self, image_path: String) {
        self.image_path = image_path;
    }

    /// Names of the required fields that are left empty, using column headers.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("ID", &self.id),
            ("Last Name", &self.last_name),
            ("First Name", &self.first_name),
            ("Date of Birth", &self.date_of_birth),
            ("Place of Birth", &self.place_of_birth),
            ("Contact Number 1", &self.contact_number_1),
            ("Email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(column, _)| column)
        .collect()
    }

    /// One-line description used above each image.
    pub fn summary(&self) -> String {
        format!(
            "Name: {} {}, Age: {}, Email: {}",
            self.first_name, self.last_name, self.age, self.email
        )
    }

    /// Cell values for display, in the same order as [COLUMNS].
    pub fn cells(&self) -> [String; 25] {
        [
            self.id.clone(),
            self.last_name.clone(),
            self.first_name.clone(),
            self.middle_name.clone(),
            self.date_of_birth.clone(),
            self.place_of_birth.clone(),
            self.nationality.clone(),
            self.age.to_string(),
            self.sex.to_string(),
            self.home_address.clone(),
            self.contact_number_1.clone(),
            self.contact_number_2.clone(),
            self.position_rank.clone(),
            self.occupation.clone(),
            self.marital_status.to_string(),
            self.spouse_name.clone(),
            self.date_of_marriage.clone(),
            self.born_again.to_string(),
            self.baptized.to_string(),
            self.membership_type.to_string(),
            self.joined_year.clone(),
            self.email.clone(),
            self.emergency_contact_name.clone(),
            self.emergency_contact_cell.clone(),
            self.image_path.clone(),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, FromFormField, PartialEq, Eq, Clone, Copy)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Serialize, Deserialize, FromFormField, PartialEq, Eq, Clone, Copy)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Separated,
}

#[derive(Debug, Serialize, Deserialize, FromFormField, PartialEq, Eq, Clone, Copy)]
pub enum Answer {
    Yes,
    No,
}

#[derive(Debug, Serialize, Deserialize, FromFormField, PartialEq, Eq, Clone, Copy)]
pub enum MembershipType {
    #[serde(rename = "Full Membership")]
    #[field(value = "Full Membership")]
    Full,
    #[serde(rename = "Associate Membership")]
    #[field(value = "Associate Membership")]
    Associate,
}

impl Display for Sex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sex::Male => write!(f, "Male"),
            Sex::Female => write!(f, "Female"),
        }
    }
}

impl Display for MaritalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MaritalStatus::Single => write!(f, "Single"),
            MaritalStatus::Married => write!(f, "Married"),
            MaritalStatus::Divorced => write!(f, "Divorced"),
            MaritalStatus::Separated => write!(f, "Separated"),
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::Yes => write!(f, "Yes"),
            Answer::No => write!(f, "No"),
        }
    }
}

impl Display for MembershipType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MembershipType::Full => write!(f, "Full Membership"),
            MembershipType::Associate => write!(f, "Associate Membership"),
        }
    }
}
