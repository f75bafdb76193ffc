use crate::member::image::{ImageStatus, inspect_image};
use crate::member::record::MemberRecord;
use serde::Serialize;

/// A member as shown when images are displayed.
/// `image_url` is `None` whenever the image can't be displayed,
/// in which case a placeholder is shown instead.
#[derive(Debug, Serialize, PartialEq)]
pub struct MemberCard {
    summary: String,
    caption: String,
    image_url: Option<String>,
}

impl MemberCard {
    pub fn new(index: usize, record: &MemberRecord) -> Self {
        let image_url = match inspect_image(record.image_path()) {
            ImageStatus::Available(_) => Some(format!("/members/{index}/image")),
            ImageStatus::NotProvided | ImageStatus::NotFound | ImageStatus::Undecodable => None,
        };

        Self {
            summary: record.summary(),
            caption: format!("{} {}", record.first_name(), record.last_name()),
            image_url,
        }
    }
}

pub fn build_member_cards(records: &[MemberRecord]) -> Vec<MemberCard> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| MemberCard::new(index, record))
        .collect()
}
