//! Systems handling purchases, spending entry, and the attendance bonus.
use bevy::prelude::*;

use crate::core::{
    clock::{epoch_day, epoch_millis},
    notice::Notice,
};

use super::{
    budget::{PenaltySeverity, SpendingLedger, SpendingRecord, UserSetup},
    events::{PurchaseRequested, RecordSpendingRequested},
    items::{ItemCatalog, OwnedItems},
    progress::{Progress, DAILY_BONUS_EXP},
    wallet::Wallet,
};

/// Validates and applies shop purchases. Rejections leave the wallet and
/// inventory untouched.
pub fn handle_purchases(
    mut requests: MessageReader<PurchaseRequested>,
    catalog: Res<ItemCatalog>,
    mut wallet: ResMut<Wallet>,
    mut owned: ResMut<OwnedItems>,
    mut notices: MessageWriter<Notice>,
) {
    for request in requests.read() {
        let Some(item) = catalog.get(request.item_id) else {
            warn!("Purchase rejected: unknown id {}", request.item_id);
            notices.write(Notice::new("알 수 없는 아이템이다냥."));
            continue;
        };

        if let Err(err) = wallet.try_spend(item.price) {
            debug!("Purchase of {} rejected: {err}", item.name);
            notices.write(Notice::new(format!(
                "냥이 부족하다냥! {} 구매에는 {}냥이 필요하다냥.",
                item.name, item.price
            )));
            continue;
        }

        owned.add(item.id, 1);
        info!(
            "Purchased {} for {}냥 (balance {}냥)",
            item.name,
            item.price,
            wallet.money()
        );
        notices.write(Notice::new(format!(
            "{} 구매 완료! 남은 냥: {}냥",
            item.name,
            wallet.money()
        )));
    }
}

/// Converts a committed spend into a wallet penalty and a ledger entry.
/// An uncomputable penalty still records the spend, just without deduction.
pub fn handle_spending(
    mut requests: MessageReader<RecordSpendingRequested>,
    setup: Res<UserSetup>,
    mut wallet: ResMut<Wallet>,
    mut ledger: ResMut<SpendingLedger>,
    mut notices: MessageWriter<Notice>,
) {
    for request in requests.read() {
        if request.amount <= 0 {
            notices.write(Notice::new("소비 금액을 먼저 올려 달라냥."));
            continue;
        }

        let penalty = setup.penalty_for(request.amount);
        ledger.push(SpendingRecord {
            amount: request.amount,
            penalty,
            recorded_at_ms: epoch_millis(),
        });

        match penalty {
            Some(nyang) => {
                wallet.apply_penalty(nyang);
                info!(
                    "Spending recorded: {}원, penalty {}냥 (balance {}냥)",
                    request.amount,
                    nyang,
                    wallet.money()
                );
                notices.write(Notice::new(format!(
                    "{}원 소비 기록! 냥이 {}냥 줄었다냥. {}",
                    request.amount,
                    nyang,
                    PenaltySeverity::classify(nyang).message()
                )));
            }
            None => {
                warn!(
                    "Spending recorded without penalty: usable budget is not positive ({}원)",
                    request.amount
                );
                notices.write(Notice::new(
                    "예산 정보로는 냥을 계산할 수 없어서 기록만 했다냥.",
                ));
            }
        }
    }
}

/// Startup attendance check: the first visit of each UTC day pays out exp.
pub fn grant_daily_bonus(mut progress: ResMut<Progress>, mut notices: MessageWriter<Notice>) {
    let today = epoch_day(epoch_millis());
    if progress.register_visit(today) {
        info!(
            "Daily bonus granted: +{DAILY_BONUS_EXP} exp (level {})",
            progress.level()
        );
        notices.write(Notice::new(format!(
            "출석 보너스! 경험치 +{DAILY_BONUS_EXP} 받았다냥!"
        )));
    }
}
