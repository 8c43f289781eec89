//! The text encoded into the scannable codes shown for coupons and discount
//! cards. Drawing the code itself is left to the UI.

use serde::Serialize;

use crate::{Error, coupon::Coupon, discount_card::DiscountCard, record_id::RecordId};

/// The JSON payload of a scannable code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanPayload {
    /// Identifies a coupon and the discount it gives.
    Coupon {
        /// The id of the coupon.
        id: RecordId,
        /// The name of the coupon.
        name: String,
        /// The store the coupon is for.
        store: String,
        /// The discount label, e.g. "20%" or "5,00 €".
        discount: String,
    },
    /// Identifies a discount card.
    DiscountCard {
        /// The id of the card.
        id: RecordId,
        /// The name of the card.
        name: String,
        /// The store that issued the card.
        store: String,
        /// The description of the card.
        description: String,
    },
}

impl ScanPayload {
    /// The payload for a coupon. Fixed discounts are labelled in `currency`.
    pub fn for_coupon(coupon: &Coupon, currency: &str) -> Self {
        ScanPayload::Coupon {
            id: coupon.id.clone(),
            name: coupon.name.clone(),
            store: coupon.store.clone(),
            discount: coupon.discount_label(currency),
        }
    }

    /// The payload for a discount card.
    pub fn for_discount_card(card: &DiscountCard) -> Self {
        ScanPayload::DiscountCard {
            id: card.id.clone(),
            name: card.name.clone(),
            store: card.store.clone(),
            description: card.description.clone(),
        }
    }

    /// Encode the payload as the JSON text that goes into the code.
    ///
    /// # Errors
    /// Returns [Error::PayloadEncoding] if serialisation fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|error| Error::PayloadEncoding(error.to_string()))
    }
}
