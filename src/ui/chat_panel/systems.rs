// src/ui/chat_panel/systems.rs
//
// Systems for spawning the conversation panel, capturing typed input, and
// mirroring the session into its text nodes.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::prelude::*;

use crate::chat::composer::ChatComposer;
use crate::chat::session::ChatSession;
use crate::chat::types::{ChatEntry, ChatRole, BOT_NAME};

use super::components::{ChatInputReadout, ChatLogReadout, ChatPanelSettings};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.9);
const BORDER_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
const LOG_COLOR: Color = Color::WHITE;
const INPUT_COLOR: Color = Color::srgb(0.6, 1.0, 0.6);

/// Spawn the bottom-left conversation panel.
pub fn spawn_chat_panel(mut commands: Commands, settings: Res<ChatPanelSettings>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(settings.corner_offset),
                left: Val::Px(settings.corner_offset),
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
                    font_size: settings.log_font_size,
                    ..default()
                },
                TextColor(LOG_COLOR),
                ChatLogReadout,
            ));

            panel.spawn((
                Text::new("> _"),
                TextFont {
                    font_size: settings.input_font_size,
                    ..default()
                },
                TextColor(INPUT_COLOR),
                ChatInputReadout,
            ));
        });
}

/// Feed keyboard input into the composer. Characters and Space extend the
/// draft, Backspace shortens it, Enter sends it without waiting for the
/// idle countdown.
pub fn capture_chat_input(
    mut keystrokes: MessageReader<KeyboardInput>,
    mut composer: ResMut<ChatComposer>,
) {
    for keystroke in keystrokes.read() {
        if !keystroke.state.is_pressed() {
            continue;
        }

        match &keystroke.logical_key {
            Key::Enter => {
                composer.on_send();
            }
            Key::Backspace => {
                let mut draft = composer.input().to_string();
                if draft.pop().is_some() {
                    composer.on_input_change(draft);
                }
            }
            Key::Space => {
                let mut draft = composer.input().to_string();
                draft.push(' ');
                composer.on_input_change(draft);
            }
            Key::Character(typed) => {
                let mut draft = composer.input().to_string();
                draft.push_str(typed);
                composer.on_input_change(draft);
            }
            _ => {}
        }
    }
}

fn speaker_prefix(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "나",
        ChatRole::Assistant => BOT_NAME,
    }
}

/// Mirror the visible tail of the conversation into the log text.
pub fn update_chat_log(
    session: Res<ChatSession>,
    settings: Res<ChatPanelSettings>,
    mut query: Query<&mut Text, With<ChatLogReadout>>,
) {
    let Ok(mut text) = query.single_mut() else {
        return;
    };

    let entries = session.entries();
    let start = entries.len().saturating_sub(settings.visible_entries);
    let rendered = entries[start..]
        .iter()
        .map(|entry| match entry {
            ChatEntry::Message(message) => {
                format!("{}: {}", speaker_prefix(message.role), message.content)
            }
            ChatEntry::TypingIndicator => format!("{}: …", BOT_NAME),
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.0 != rendered {
        text.0 = rendered;
    }
}

/// Mirror the composer draft into the input line.
pub fn update_chat_input(
    composer: Res<ChatComposer>,
    mut query: Query<&mut Text, With<ChatInputReadout>>,
) {
    let Ok(mut text) = query.single_mut() else {
        return;
    };

    let rendered = format!("> {}_", composer.input());
    if text.0 != rendered {
        text.0 = rendered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::{ChatIdAllocator, ChatMessage};
    use bevy::input::ButtonState;

    fn input_app() -> App {
        let mut app = App::new();
        app.add_message::<KeyboardInput>()
            .insert_resource(ChatComposer::new(3.0))
            .add_systems(Update, capture_chat_input);
        app
    }

    fn keystroke(app: &mut App, logical_key: Key, state: ButtonState) {
        app.world_mut()
            .resource_mut::<Messages<KeyboardInput>>()
            .write(KeyboardInput {
                key_code: KeyCode::KeyA,
                logical_key,
                state,
                text: None,
                repeat: false,
                window: Entity::PLACEHOLDER,
            });
    }

    #[test]
    fn typed_keys_build_the_draft() {
        let mut app = input_app();
        keystroke(&mut app, Key::Character("배".into()), ButtonState::Pressed);
        keystroke(&mut app, Key::Character("고".into()), ButtonState::Pressed);
        keystroke(&mut app, Key::Character("팡".into()), ButtonState::Pressed);
        keystroke(&mut app, Key::Backspace, ButtonState::Pressed);
        keystroke(&mut app, Key::Character("파".into()), ButtonState::Pressed);
        app.update();

        let composer = app.world().resource::<ChatComposer>();
        assert_eq!(composer.input(), "배고파");
        assert!(composer.debounce_pending());
    }

    #[test]
    fn enter_commits_the_draft_immediately() {
        let mut app = input_app();
        keystroke(&mut app, Key::Character("안녕".into()), ButtonState::Pressed);
        keystroke(&mut app, Key::Space, ButtonState::Pressed);
        keystroke(&mut app, Key::Character("머냥이".into()), ButtonState::Pressed);
        keystroke(&mut app, Key::Enter, ButtonState::Pressed);
        app.update();

        let mut composer = app.world_mut().resource_mut::<ChatComposer>();
        assert_eq!(composer.take_fragments(), vec!["안녕 머냥이".to_string()]);
        assert!(composer.input().is_empty());
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut app = input_app();
        keystroke(&mut app, Key::Character("냥".into()), ButtonState::Released);
        app.update();

        assert!(app.world().resource::<ChatComposer>().input().is_empty());
    }

    #[test]
    fn log_renders_prefixes_and_the_typing_indicator() {
        let mut app = App::new();
        app.insert_resource(ChatSession::default())
            .insert_resource(ChatPanelSettings::default())
            .add_systems(Update, update_chat_log);
        app.world_mut().spawn((Text::new(""), ChatLogReadout));

        let mut ids = ChatIdAllocator::default();
        {
            let mut session = app.world_mut().resource_mut::<ChatSession>();
            session.push_user_message(ChatMessage {
                id: ids.allocate(),
                role: ChatRole::User,
                content: "안녕".to_string(),
                sent_at_ms: 0,
            });
            session.begin_awaiting();
        }
        app.update();

        let text = app
            .world_mut()
            .query_filtered::<&Text, With<ChatLogReadout>>()
            .single(app.world())
            .expect("log text should exist")
            .0
            .clone();
        assert_eq!(text, format!("나: 안녕\n{}: …", BOT_NAME));
    }
}
