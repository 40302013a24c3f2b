//! Messages for shop purchases and spending entry.
use bevy::prelude::{Event, Message};

use super::items::ItemId;

/// Request to buy one unit of a catalogue item.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct PurchaseRequested {
    pub item_id: ItemId,
}

/// Request to commit a real-currency spend (원) against the budget.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct RecordSpendingRequested {
    pub amount: i64,
}
