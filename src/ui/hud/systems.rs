// src/ui/hud/systems.rs
//
// Systems for spawning and updating the status HUD.

use bevy::prelude::*;

use crate::chat::types::BOT_NAME;
use crate::core::notice::Notice;
use crate::economy::budget::{PendingSpend, PenaltySeverity, UserSetup};
use crate::economy::events::{PurchaseRequested, RecordSpendingRequested};
use crate::economy::items::ItemId;
use crate::economy::progress::Progress;
use crate::economy::wallet::Wallet;
use crate::pet::events::UseItemRequested;
use crate::pet::state::{PetState, GAUGE_MAX};

use super::components::{
    HudSettings, LevelBarFill, NoticeBoard, NoticeReadout, SpendPreviewReadout, StatusReadout,
};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.9);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
const TEXT_COLOR: Color = Color::WHITE;
const PREVIEW_COLOR: Color = Color::srgb(0.8, 0.9, 1.0);
const NOTICE_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const HELP_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);
const BAR_BACKGROUND_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
const BAR_FILL_COLOR: Color = Color::srgb(0.4, 0.8, 0.4);

const FEED_KEYS: [(KeyCode, ItemId); 3] = [
    (KeyCode::F1, ItemId::new(1)),
    (KeyCode::F2, ItemId::new(2)),
    (KeyCode::F3, ItemId::new(3)),
];

const PURCHASE_KEYS: [(KeyCode, ItemId); 5] = [
    (KeyCode::F5, ItemId::new(1)),
    (KeyCode::F6, ItemId::new(2)),
    (KeyCode::F7, ItemId::new(3)),
    (KeyCode::F8, ItemId::new(101)),
    (KeyCode::F9, ItemId::new(102)),
];

const HELP_TEXT: &str = "F1-F3 먹이 주기 | F5-F9 구매 | ↑/↓ 소비 금액 | F4 소비 기록 | Enter 전송";

/// Spawn the 2D camera, the status panel, and the notice line.
pub fn spawn_hud(mut commands: Commands, settings: Res<HudSettings>) {
    commands.spawn(Camera2d);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(settings.panel_offset),
                left: Val::Px(settings.panel_offset),
                width: Val::Px(settings.panel_width),
                padding: UiRect::all(Val::Px(settings.padding)),
                border: UiRect::all(Val::Px(1.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
            BorderColor::from(BORDER_COLOR),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.status_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                StatusReadout,
            ));

            // Experience bar: dark track with a fill that tracks level progress.
            panel
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(settings.level_bar_height),
                        ..default()
                    },
                    BackgroundColor(BAR_BACKGROUND_COLOR),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(BAR_FILL_COLOR),
                        LevelBarFill,
                    ));
                });

            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.status_font_size,
                    ..default()
                },
                TextColor(PREVIEW_COLOR),
                SpendPreviewReadout,
            ));
        });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(settings.panel_offset),
            right: Val::Px(settings.panel_offset),
            max_width: Val::Px(440.0),
            padding: UiRect::all(Val::Px(settings.padding)),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: settings.notice_font_size,
            ..default()
        },
        TextColor(NOTICE_COLOR),
        NoticeReadout,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(4.0),
            right: Val::Px(settings.panel_offset),
            ..default()
        },
        Text::new(HELP_TEXT),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(HELP_COLOR),
    ));
}

/// Rewrite the gauge/balance/level readout whenever any of them change.
pub fn update_status_readout(
    pet: Res<PetState>,
    wallet: Res<Wallet>,
    progress: Res<Progress>,
    mut query: Query<&mut Text, With<StatusReadout>>,
) {
    if !pet.is_changed() && !wallet.is_changed() && !progress.is_changed() {
        return;
    }
    let Ok(mut text) = query.single_mut() else {
        return;
    };

    text.0 = format!(
        "{} Lv.{}\n허기 {:>3} / {}\n애정 {:>3} / {}\n잔액 {}냥",
        BOT_NAME,
        progress.level(),
        pet.hunger(),
        GAUGE_MAX,
        pet.love(),
        GAUGE_MAX,
        wallet.money(),
    );
}

/// Resize the experience bar fill to the current level progress.
pub fn update_level_bar(
    progress: Res<Progress>,
    mut query: Query<&mut Node, With<LevelBarFill>>,
) {
    if !progress.is_changed() {
        return;
    }
    let Ok(mut node) = query.single_mut() else {
        return;
    };
    node.width = Val::Percent(progress.level_ratio() * 100.0);
}

/// Rewrite the pending-spend line with the projected penalty and its band.
pub fn update_spend_preview(
    pending: Res<PendingSpend>,
    setup: Res<UserSetup>,
    mut query: Query<&mut Text, With<SpendPreviewReadout>>,
) {
    if !pending.is_changed() && !setup.is_changed() {
        return;
    }
    let Ok(mut text) = query.single_mut() else {
        return;
    };

    let amount = pending.amount();
    text.0 = if amount == 0 {
        "↑/↓ 키로 소비 금액을 정하고 F4로 기록한다냥.".to_string()
    } else {
        match setup.penalty_for(amount) {
            Some(penalty) => format!(
                "소비 예정 {}원 → -{}냥 | {}",
                amount,
                penalty,
                PenaltySeverity::classify(penalty).message()
            ),
            None => format!("소비 예정 {}원 → 냥 계산 불가", amount),
        }
    };
}

/// Pull newly published notices onto the board and expire the current one.
pub fn update_notice_board(
    time: Res<Time>,
    settings: Res<HudSettings>,
    mut notices: MessageReader<Notice>,
    mut board: ResMut<NoticeBoard>,
) {
    for notice in notices.read() {
        board.show(notice.text().to_string(), settings.notice_seconds);
    }
    board.tick(time.delta());
}

/// Mirror the notice board into its text node.
pub fn render_notice_text(
    board: Res<NoticeBoard>,
    mut query: Query<&mut Text, With<NoticeReadout>>,
) {
    let Ok(mut text) = query.single_mut() else {
        return;
    };
    if text.0 != board.text() {
        text.0 = board.text().to_string();
    }
}

/// Translate HUD key presses into pet and economy requests.
pub fn handle_action_keys(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<HudSettings>,
    mut pending: ResMut<PendingSpend>,
    mut item_uses: MessageWriter<UseItemRequested>,
    mut purchases: MessageWriter<PurchaseRequested>,
    mut spends: MessageWriter<RecordSpendingRequested>,
) {
    for (key, item_id) in FEED_KEYS {
        if keys.just_pressed(key) {
            item_uses.write(UseItemRequested { item_id });
        }
    }

    for (key, item_id) in PURCHASE_KEYS {
        if keys.just_pressed(key) {
            purchases.write(PurchaseRequested { item_id });
        }
    }

    if keys.just_pressed(KeyCode::ArrowUp) {
        pending.adjust(settings.spend_step_won);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        pending.adjust(-settings.spend_step_won);
    }

    if keys.just_pressed(KeyCode::F4) {
        let amount = pending.take();
        spends.write(RecordSpendingRequested { amount });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn key_app() -> App {
        let mut app = App::new();
        app.insert_resource(ButtonInput::<KeyCode>::default())
            .insert_resource(HudSettings::default())
            .init_resource::<PendingSpend>()
            .add_message::<UseItemRequested>()
            .add_message::<PurchaseRequested>()
            .add_message::<RecordSpendingRequested>()
            .add_systems(Update, handle_action_keys);
        app
    }

    fn tap(app: &mut App, key: KeyCode) {
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.reset_all();
        input.press(key);
        app.update();
    }

    #[test]
    fn function_keys_write_the_mapped_requests() {
        let mut app = key_app();

        tap(&mut app, KeyCode::F1);
        let uses: Vec<_> = app
            .world_mut()
            .resource_mut::<Messages<UseItemRequested>>()
            .drain()
            .collect();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].item_id, ItemId::new(1));

        tap(&mut app, KeyCode::F9);
        let purchases: Vec<_> = app
            .world_mut()
            .resource_mut::<Messages<PurchaseRequested>>()
            .drain()
            .collect();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].item_id, ItemId::new(102));
    }

    #[test]
    fn arrows_shape_the_pending_amount_and_f4_commits_it() {
        let mut app = key_app();

        tap(&mut app, KeyCode::ArrowUp);
        tap(&mut app, KeyCode::ArrowUp);
        tap(&mut app, KeyCode::ArrowDown);
        assert_eq!(app.world().resource::<PendingSpend>().amount(), 1_000);

        tap(&mut app, KeyCode::F4);
        assert_eq!(
            app.world().resource::<PendingSpend>().amount(),
            0,
            "committing must clear the staged amount"
        );
        let spends: Vec<_> = app
            .world_mut()
            .resource_mut::<Messages<RecordSpendingRequested>>()
            .drain()
            .collect();
        assert_eq!(spends.len(), 1);
        assert_eq!(spends[0].amount, 1_000);
    }

    #[test]
    fn notices_reach_the_board_and_expire() {
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(HudSettings::default())
            .init_resource::<NoticeBoard>()
            .add_message::<Notice>()
            .add_systems(Update, update_notice_board);

        app.world_mut()
            .resource_mut::<Messages<Notice>>()
            .write(Notice::new("출석 보너스!"));
        app.update();
        assert_eq!(app.world().resource::<NoticeBoard>().text(), "출석 보너스!");

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(5));
        app.update();
        assert_eq!(app.world().resource::<NoticeBoard>().text(), "");
    }

    #[test]
    fn spend_preview_shows_the_projected_penalty_band() {
        let mut app = App::new();
        app.init_resource::<PendingSpend>()
            .init_resource::<UserSetup>()
            .add_systems(Update, update_spend_preview);
        app.world_mut().spawn((Text::new(""), SpendPreviewReadout));

        app.update();
        let text = |app: &mut App| {
            app.world_mut()
                .query_filtered::<&Text, With<SpendPreviewReadout>>()
                .single(app.world())
                .expect("preview text should exist")
                .0
                .clone()
        };
        assert!(text(&mut app).contains("↑/↓"));

        app.world_mut()
            .resource_mut::<PendingSpend>()
            .adjust(10_000);
        app.update();
        let preview = text(&mut app);
        // Default budget: 10,000원 costs 60냥, which lands in the middle band.
        assert!(preview.contains("10000원"), "got: {preview}");
        assert!(preview.contains("-60냥"), "got: {preview}");
        assert!(preview.contains("조금만 아껴보면 어때요?"), "got: {preview}");
    }
}
