//! Loyalty and discount cards.

use serde::Deserialize;

use crate::record_id::RecordId;

/// A store loyalty card the user can show as a scannable code.
///
/// Cards are never edited after they are created, so rows from the store map
/// straight onto this type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscountCard {
    /// The id the store assigned to the card.
    pub id: RecordId,
    /// A short name for the card.
    pub name: String,
    /// Free text describing the card.
    #[serde(default)]
    pub description: String,
    /// The store that issued the card.
    pub store: String,
    /// The number printed on the card, if the user entered one.
    #[serde(default)]
    pub card_number: Option<String>,
}
