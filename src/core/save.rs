//! One-file JSON save: a typed snapshot loaded once at startup and written
//! back on a short timer whenever any persisted resource changed.
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chat::config::ChatConfig;
use crate::chat::types::{ChatHistory, ChatLogLine};
use crate::economy::budget::{SpendingLedger, SpendingRecord, UserSetup};
use crate::economy::items::{ItemId, OwnedItems};
use crate::economy::progress::Progress;
use crate::economy::wallet::{Wallet, STARTING_MONEY};
use crate::pet::state::{MemoryEntry, MemoryLog, PetMood, PetState, GAUGE_MAX};

pub const DEFAULT_SAVE_PATH: &str = "saves/monyang.json";

const SAVE_SYNC_INTERVAL_SECONDS: f32 = 2.0;

/// Owned count of a single catalogue item, as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItemCount {
    pub id: ItemId,
    pub count: u32,
}

/// Everything the game persists, in one document.
///
/// Every field falls back to its fresh-run default when absent, so saves
/// written by older builds keep loading after new fields are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub hunger: i64,
    pub love: i64,
    pub mood: PetMood,
    pub last_update_ms: Option<i64>,
    pub money: i64,
    pub exp: i64,
    pub last_visit_day: Option<i64>,
    pub items: Vec<SavedItemCount>,
    pub memories: Vec<MemoryEntry>,
    pub setup: UserSetup,
    pub ledger: Vec<SpendingRecord>,
    pub chat_log: Vec<ChatLogLine>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            hunger: GAUGE_MAX,
            love: GAUGE_MAX,
            mood: PetMood::default(),
            last_update_ms: None,
            money: STARTING_MONEY,
            exp: 0,
            last_visit_day: None,
            items: Vec::new(),
            memories: Vec::new(),
            setup: UserSetup::default(),
            ledger: Vec::new(),
            chat_log: Vec::new(),
        }
    }
}

impl SaveData {
    /// Snapshots the live resources into a persistable document.
    #[allow(clippy::too_many_arguments)]
    pub fn capture(
        pet: &PetState,
        memories: &MemoryLog,
        wallet: &Wallet,
        progress: &Progress,
        owned: &OwnedItems,
        setup: &UserSetup,
        ledger: &SpendingLedger,
        history: &ChatHistory,
    ) -> Self {
        Self {
            hunger: pet.hunger(),
            love: pet.love(),
            mood: pet.mood(),
            last_update_ms: pet.last_update_ms(),
            money: wallet.money(),
            exp: progress.exp(),
            last_visit_day: progress.last_visit_day(),
            items: owned
                .iter()
                .map(|(id, count)| SavedItemCount { id, count })
                .collect(),
            memories: memories.entries().to_vec(),
            setup: setup.clone(),
            ledger: ledger.records().to_vec(),
            chat_log: history.to_vec(),
        }
    }
}

/// Location of the save file plus the read/write primitives around it.
#[derive(Resource, Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the save file, returning `None` when it is missing or unusable.
    /// A corrupt file is never fatal; the game falls back to fresh state.
    pub fn load(&self) -> Option<SaveData> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("Failed to read save file {:?}: {}", self.path, err);
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(data) => Some(data),
            Err(err) => {
                warn!("Failed to parse save file {:?}: {}", self.path, err);
                None
            }
        }
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }

    pub fn write(&self, data: &SaveData) -> std::io::Result<()> {
        self.ensure_directory()?;
        let mut file = File::create(&self.path)?;
        serde_json::to_writer_pretty(&mut file, data)?;
        file.write_all(b"\n")?;
        file.flush()?;
        Ok(())
    }
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_PATH)
    }
}

/// Batches writes: any change flips the dirty flag, the timer decides when
/// the flag actually reaches disk.
#[derive(Resource)]
pub struct SaveSyncTimer {
    timer: Timer,
    dirty: bool,
}

impl Default for SaveSyncTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(SAVE_SYNC_INTERVAL_SECONDS, TimerMode::Repeating),
            dirty: false,
        }
    }
}

/// Startup system: replaces the fresh-run resources with the saved state.
/// When no save exists the plugin-inserted defaults simply stand.
#[allow(clippy::too_many_arguments)]
pub fn load_save_state(
    store: Res<SaveStore>,
    chat_config: Res<ChatConfig>,
    mut pet: ResMut<PetState>,
    mut memories: ResMut<MemoryLog>,
    mut wallet: ResMut<Wallet>,
    mut progress: ResMut<Progress>,
    mut owned: ResMut<OwnedItems>,
    mut setup: ResMut<UserSetup>,
    mut ledger: ResMut<SpendingLedger>,
    mut history: ResMut<ChatHistory>,
) {
    let Some(data) = store.load() else {
        info!(
            "No save data at {:?}; starting with fresh state",
            store.path()
        );
        return;
    };

    *pet = PetState::new(data.hunger, data.love, data.mood, data.last_update_ms);
    *memories = MemoryLog::from_entries(data.memories);
    *wallet = Wallet::new(data.money);
    *progress = Progress::new(data.exp, data.last_visit_day);
    *owned = OwnedItems::from_counts(data.items.into_iter().map(|item| (item.id, item.count)));
    *setup = data.setup;
    *ledger = SpendingLedger::from_records(data.ledger);
    *history = ChatHistory::from_lines(data.chat_log, chat_config.history_limit);

    info!(
        "Save loaded from {:?}: hunger {}, love {}, {}냥, level {}",
        store.path(),
        pet.hunger(),
        pet.love(),
        wallet.money(),
        progress.level(),
    );
}

/// Update system: marks the snapshot dirty on any resource change and writes
/// it out when the sync timer fires.
#[allow(clippy::too_many_arguments)]
pub fn sync_save_state(
    time: Res<Time>,
    mut sync: ResMut<SaveSyncTimer>,
    store: Res<SaveStore>,
    pet: Res<PetState>,
    memories: Res<MemoryLog>,
    wallet: Res<Wallet>,
    progress: Res<Progress>,
    owned: Res<OwnedItems>,
    setup: Res<UserSetup>,
    ledger: Res<SpendingLedger>,
    history: Res<ChatHistory>,
) {
    if pet.is_changed()
        || memories.is_changed()
        || wallet.is_changed()
        || progress.is_changed()
        || owned.is_changed()
        || setup.is_changed()
        || ledger.is_changed()
        || history.is_changed()
    {
        sync.dirty = true;
    }

    if !sync.timer.tick(time.delta()).just_finished() || !sync.dirty {
        return;
    }

    let data = SaveData::capture(
        &pet, &memories, &wallet, &progress, &owned, &setup, &ledger, &history,
    );
    match store.write(&data) {
        Ok(()) => {
            sync.dirty = false;
            debug!("Save synced to {:?}", store.path());
        }
        Err(err) => warn!("Failed to write save file {:?}: {}", store.path(), err),
    }
}

/// Last-schedule system: one unconditional write on the frame the app exits,
/// so nothing committed between sync ticks is lost.
#[allow(clippy::too_many_arguments)]
pub fn final_save_on_exit(
    mut exits: MessageReader<AppExit>,
    store: Res<SaveStore>,
    pet: Res<PetState>,
    memories: Res<MemoryLog>,
    wallet: Res<Wallet>,
    progress: Res<Progress>,
    owned: Res<OwnedItems>,
    setup: Res<UserSetup>,
    ledger: Res<SpendingLedger>,
    history: Res<ChatHistory>,
) {
    if exits.read().count() == 0 {
        return;
    }

    let data = SaveData::capture(
        &pet, &memories, &wallet, &progress, &owned, &setup, &ledger, &history,
    );
    match store.write(&data) {
        Ok(()) => info!("Final save written to {:?}", store.path()),
        Err(err) => warn!("Failed to write final save to {:?}: {}", store.path(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::ChatRole;
    use crate::economy::budget::SavingLevel;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_save_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock should be past the epoch")
            .subsec_nanos();
        std::env::temp_dir().join(format!("monyang_save_{label}_{nanos}.json"))
    }

    fn sample_data() -> SaveData {
        SaveData {
            hunger: 72,
            love: 64,
            mood: PetMood::Neutral,
            last_update_ms: Some(1_700_000_000_000),
            money: 420,
            exp: 180,
            last_visit_day: Some(20_100),
            items: vec![SavedItemCount {
                id: ItemId::new(2),
                count: 3,
            }],
            memories: vec![MemoryEntry {
                content: "인기 츄르 아이템 사용".to_string(),
                created_at_ms: 1_699_999_000_000,
            }],
            setup: UserSetup {
                income: 3_000_000,
                fixed_expenditure: 1_200_000,
                saving_level: SavingLevel::Medium,
            },
            ledger: vec![SpendingRecord {
                amount: 10_000,
                penalty: Some(60),
                recorded_at_ms: 1_699_999_500_000,
            }],
            chat_log: vec![ChatLogLine {
                role: ChatRole::User,
                content: "배고파?".to_string(),
                sent_at_ms: 1_699_999_800_000,
            }],
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let path = temp_save_path("round_trip");
        let store = SaveStore::new(&path);
        let data = sample_data();

        store.write(&data).expect("write should succeed");
        let loaded = store.load().expect("saved file should load");
        assert_eq!(loaded, data);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_loads_nothing() {
        let store = SaveStore::new(temp_save_path("missing"));
        assert!(store.load().is_none());
    }

    #[test]
    fn partial_save_falls_back_to_field_defaults() {
        let path = temp_save_path("partial");
        fs::write(&path, r#"{"money": 700, "exp": 120}"#).expect("seed file");

        let loaded = SaveStore::new(&path)
            .load()
            .expect("partial save should still load");
        assert_eq!(loaded.money, 700);
        assert_eq!(loaded.exp, 120);
        assert_eq!(loaded.hunger, GAUGE_MAX);
        assert_eq!(loaded.last_update_ms, None);
        assert!(loaded.items.is_empty());
        assert_eq!(loaded.setup, UserSetup::default());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn corrupt_save_is_discarded() {
        let path = temp_save_path("corrupt");
        fs::write(&path, "definitely not json {{{").expect("seed file");

        assert!(SaveStore::new(&path).load().is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn capture_mirrors_the_live_resources() {
        let pet = PetState::new(72, 64, PetMood::Neutral, Some(1_700_000_000_000));
        let memories = MemoryLog::from_entries(vec![MemoryEntry {
            content: "값 싼 츄르 아이템 사용".to_string(),
            created_at_ms: 5,
        }]);
        let wallet = Wallet::new(420);
        let progress = Progress::new(180, Some(20_100));
        let owned = OwnedItems::from_counts([(ItemId::new(1), 2)]);
        let setup = UserSetup::default();
        let ledger = SpendingLedger::from_records(vec![]);
        let history = ChatHistory::new(20);

        let data = SaveData::capture(
            &pet, &memories, &wallet, &progress, &owned, &setup, &ledger, &history,
        );

        assert_eq!(data.hunger, 72);
        assert_eq!(data.love, 64);
        assert_eq!(data.money, 420);
        assert_eq!(data.exp, 180);
        assert_eq!(data.last_visit_day, Some(20_100));
        assert_eq!(
            data.items,
            vec![SavedItemCount {
                id: ItemId::new(1),
                count: 2
            }]
        );
        assert_eq!(data.memories.len(), 1);
        assert!(data.chat_log.is_empty());
    }
}
