//! Economy plugin wiring the shop, spending ledger, and progress systems.
use bevy::prelude::*;

use crate::core::save::load_save_state;

use super::{
    budget::{PendingSpend, SpendingLedger, UserSetup},
    events::{PurchaseRequested, RecordSpendingRequested},
    items::{ItemCatalog, OwnedItems},
    progress::Progress,
    systems::{grant_daily_bonus, handle_purchases, handle_spending},
    wallet::Wallet,
};

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemCatalog>()
            .init_resource::<OwnedItems>()
            .init_resource::<Wallet>()
            .init_resource::<Progress>()
            .init_resource::<UserSetup>()
            .init_resource::<SpendingLedger>()
            .init_resource::<PendingSpend>()
            .add_message::<PurchaseRequested>()
            .add_message::<RecordSpendingRequested>()
            .add_systems(Startup, grant_daily_bonus.after(load_save_state))
            .add_systems(Update, (handle_purchases, handle_spending));
    }
}
