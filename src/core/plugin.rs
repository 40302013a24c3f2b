//! CorePlugin wires persistence, window-focus tracking, and the shared
//! notice channel the HUD listens on.
use bevy::prelude::*;
use std::path::PathBuf;

use super::lifecycle::{detect_foreground_transitions, FocusTracker, ForegroundTransition};
use super::notice::Notice;
use super::save::{
    final_save_on_exit, load_save_state, sync_save_state, SaveStore, SaveSyncTimer,
};

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Registers the save store, focus lifecycle, and the notice message.
#[derive(Debug, Clone, Default)]
pub struct CorePlugin {
    save_path: Option<PathBuf>,
}

impl CorePlugin {
    /// Overrides the save file location; tooling and tests point this at a
    /// scratch directory.
    #[allow(dead_code)]
    pub fn with_save_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: Some(path.into()),
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let store = match &self.save_path {
            Some(path) => SaveStore::new(path.clone()),
            None => SaveStore::default(),
        };

        app.insert_resource(store)
            .init_resource::<SaveSyncTimer>()
            .init_resource::<FocusTracker>()
            .add_message::<ForegroundTransition>()
            .add_message::<Notice>()
            .add_systems(Startup, (log_save_location, load_save_state).chain())
            .add_systems(Update, (detect_foreground_transitions, sync_save_state))
            .add_systems(Last, final_save_on_exit);

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_state_heartbeat);
        }
    }
}

fn log_save_location(store: Res<SaveStore>) {
    info!("CorePlugin initialised; save location: {:?}", store.path());
}

#[cfg(feature = "core_debug")]
fn log_state_heartbeat(
    time: Res<Time>,
    mut ticker: ResMut<DebugTickTimer>,
    pet: Res<crate::pet::state::PetState>,
    wallet: Res<crate::economy::wallet::Wallet>,
) {
    if ticker.timer.tick(time.delta()).just_finished() {
        info!(
            target: "core_debug",
            "hunger: {} | love: {} | balance: {}냥",
            pet.hunger(),
            pet.love(),
            wallet.money(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::config::ChatConfig;
    use crate::chat::types::ChatHistory;
    use crate::core::save::{SaveData, SavedItemCount};
    use crate::economy::budget::{SpendingLedger, UserSetup};
    use crate::economy::items::{ItemId, OwnedItems};
    use crate::economy::progress::Progress;
    use crate::economy::wallet::Wallet;
    use crate::pet::config::PetConfig;
    use crate::pet::state::{MemoryLog, PetState};
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_save_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock should be past the epoch")
            .subsec_nanos();
        std::env::temp_dir().join(format!("monyang_core_{label}_{nanos}.json"))
    }

    fn app_with_fresh_state(store: SaveStore) -> App {
        let pet_config = PetConfig::default();
        let mut app = App::new();
        app.insert_resource(store)
            .insert_resource(ChatConfig::default())
            .insert_resource(PetState::first_run(&pet_config))
            .init_resource::<MemoryLog>()
            .init_resource::<Wallet>()
            .init_resource::<Progress>()
            .init_resource::<OwnedItems>()
            .init_resource::<UserSetup>()
            .init_resource::<SpendingLedger>()
            .insert_resource(ChatHistory::new(20))
            .add_systems(Update, load_save_state);
        app
    }

    #[test]
    fn startup_load_applies_saved_state() {
        let path = temp_save_path("load");
        let store = SaveStore::new(&path);
        let data = SaveData {
            hunger: 55,
            love: 45,
            money: 420,
            exp: 230,
            items: vec![SavedItemCount {
                id: ItemId::new(3),
                count: 2,
            }],
            ..SaveData::default()
        };
        store.write(&data).expect("seed save should write");

        let mut app = app_with_fresh_state(store);
        app.update();

        let pet = app.world().resource::<PetState>();
        assert_eq!(pet.hunger(), 55);
        assert_eq!(pet.love(), 45);
        assert_eq!(app.world().resource::<Wallet>().money(), 420);
        assert_eq!(app.world().resource::<Progress>().level(), 3);
        assert_eq!(
            app.world().resource::<OwnedItems>().count(ItemId::new(3)),
            2
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_save_leaves_fresh_defaults_standing() {
        let mut app = app_with_fresh_state(SaveStore::new(temp_save_path("none")));
        app.update();

        let pet = app.world().resource::<PetState>();
        assert_eq!(pet.hunger(), 100);
        assert_eq!(pet.last_update_ms(), None);
        assert_eq!(app.world().resource::<Wallet>().money(), 150);
    }
}
