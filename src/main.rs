use std::path::Path;

use bevy::prelude::*;

mod chat;
mod core;
mod economy;
mod pet;
mod ui;

use crate::{
    chat::ChatPlugin, core::CorePlugin, economy::EconomyPlugin, pet::PetPlugin, ui::UiPlugin,
};

fn main() {
    load_secrets_env();

    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            PetPlugin,
            EconomyPlugin,
            ChatPlugin,
            UiPlugin, // After ChatPlugin so panels read the freshly ticked session
        ))
        .run();
}

fn load_secrets_env() {
    const SECRETS_FILE: &str = "secrets.env";

    let path = Path::new(SECRETS_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", SECRETS_FILE, err);
    }
}
