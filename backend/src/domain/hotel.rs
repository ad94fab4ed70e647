//! Hotel aggregate.
//!
//! A hotel has exactly one landlord, fixed at creation. Its rooms are not held
//! on the struct; they are looked up by `hotel_id` whenever a read needs them.

use super::validation::{self, DetailsValidationError};
use super::{HotelId, UserId};

/// Public-facing hotel details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelDetails {
    name: String,
    description: String,
    address: String,
    phone_number: String,
    two_gis_url: Option<String>,
    google_maps_url: Option<String>,
    telegram: Option<String>,
    photos: Vec<String>,
}

/// Unvalidated hotel details as submitted by a landlord.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HotelDetailsDraft {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone_number: String,
    pub two_gis_url: Option<String>,
    pub google_maps_url: Option<String>,
    pub telegram: Option<String>,
    pub photos: Vec<String>,
}

impl TryFrom<HotelDetailsDraft> for HotelDetails {
    type Error = DetailsValidationError;

    fn try_from(draft: HotelDetailsDraft) -> Result<Self, Self::Error> {
        let HotelDetailsDraft {
            name,
            description,
            address,
            phone_number,
            two_gis_url,
            google_maps_url,
            telegram,
            photos,
        } = draft;
        Ok(Self {
            name: validation::required_text("name", name)?,
            description: validation::required_text("description", description)?,
            address: validation::required_text("address", address)?,
            phone_number: validation::required_text("phoneNumber", phone_number)?,
            two_gis_url: validation::optional_http_url("twoGisUrl", two_gis_url)?,
            google_maps_url: validation::optional_http_url("googleMapsUrl", google_maps_url)?,
            telegram: telegram.filter(|handle| !handle.trim().is_empty()),
            photos: validation::photo_urls("photos", photos)?,
        })
    }
}

impl HotelDetails {
    /// Rebuild details loaded from storage.
    #[must_use]
    pub fn from_stored(draft: HotelDetailsDraft) -> Self {
        let HotelDetailsDraft {
            name,
            description,
            address,
            phone_number,
            two_gis_url,
            google_maps_url,
            telegram,
            photos,
        } = draft;
        Self {
            name,
            description,
            address,
            phone_number,
            two_gis_url,
            google_maps_url,
            telegram,
            photos,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// 2GIS map link.
    #[must_use]
    pub fn two_gis_url(&self) -> Option<&str> {
        self.two_gis_url.as_deref()
    }

    /// Google Maps link.
    #[must_use]
    pub fn google_maps_url(&self) -> Option<&str> {
        self.google_maps_url.as_deref()
    }

    /// Telegram handle or link.
    #[must_use]
    pub fn telegram(&self) -> Option<&str> {
        self.telegram.as_deref()
    }

    #[must_use]
    pub fn photos(&self) -> &[String] {
        &self.photos
    }
}

/// Stored hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    id: HotelId,
    landlord_id: UserId,
    details: HotelDetails,
}

impl Hotel {
    /// Assemble a hotel from stored parts.
    #[must_use]
    pub fn new(id: HotelId, landlord_id: UserId, details: HotelDetails) -> Self {
        Self {
            id,
            landlord_id,
            details,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> HotelId {
        self.id
    }

    /// The single landlord owning this hotel and all of its rooms.
    #[must_use]
    pub fn landlord_id(&self) -> UserId {
        self.landlord_id
    }

    /// Whether `user` is the owning landlord.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.landlord_id == user
    }

    #[must_use]
    pub fn details(&self) -> &HotelDetails {
        &self.details
    }
}

/// Data needed to insert a new hotel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHotel {
    /// Landlord creating the hotel.
    pub landlord_id: UserId,
    /// Validated details.
    pub details: HotelDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> HotelDetailsDraft {
        HotelDetailsDraft {
            name: "Seaside".to_owned(),
            description: "Quiet rooms by the beach".to_owned(),
            address: "1 Shore Road".to_owned(),
            phone_number: "+7 700 000 0000".to_owned(),
            two_gis_url: Some("https://2gis.kz/almaty/firm/1".to_owned()),
            google_maps_url: None,
            telegram: Some(String::new()),
            photos: vec![],
        }
    }

    #[rstest]
    fn valid_draft_keeps_links(draft: HotelDetailsDraft) {
        let details = HotelDetails::try_from(draft).expect("valid draft");
        assert_eq!(details.two_gis_url(), Some("https://2gis.kz/almaty/firm/1"));
        assert_eq!(details.telegram(), None);
    }

    #[rstest]
    fn blank_address_is_rejected(mut draft: HotelDetailsDraft) {
        draft.address = "   ".to_owned();
        let err = HotelDetails::try_from(draft).expect_err("blank address");
        assert_eq!(err.field(), "address");
    }

    #[rstest]
    fn bad_map_link_is_rejected(mut draft: HotelDetailsDraft) {
        draft.google_maps_url = Some("maps".to_owned());
        let err = HotelDetails::try_from(draft).expect_err("bad link");
        assert_eq!(err.field(), "googleMapsUrl");
    }

    #[rstest]
    fn ownership_is_checked_by_id(draft: HotelDetailsDraft) {
        let owner = UserId::new(1).expect("valid id");
        let hotel = Hotel::new(
            HotelId::new(3).expect("valid id"),
            owner,
            HotelDetails::try_from(draft).expect("valid draft"),
        );
        assert!(hotel.is_owned_by(owner));
        assert!(!hotel.is_owned_by(UserId::new(2).expect("valid id")));
    }
}
