use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::models::battle::{Battle, NewBattle};
use crate::models::monster::{Monster, MonsterChanges, NewMonster};
use crate::repository::error::{RepositoryError, Result};
use crate::repository::{BattleOfMonstersRepository, Storage};

/// In-process storage, used when no database is configured and in tests.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn repository(&self) -> Result<Box<dyn BattleOfMonstersRepository>> {
        Ok(Box::new(MemoryRepository {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        }))
    }
}

#[derive(Clone, Default)]
struct MemoryState {
    monsters: BTreeMap<i32, Monster>,
    battles: BTreeMap<i32, Battle>,
    // Ids are handed out when a record is staged, so an uncommitted record
    // still burns its id.
    last_monster_id: i32,
    last_battle_id: i32,
}

#[derive(Clone)]
enum PendingChange {
    InsertMonster(Monster),
    UpdateMonster(Monster),
    RemoveMonster(i32),
    InsertBattle(Battle),
    RemoveBattle(i32),
}

impl MemoryState {
    /// Fails with [`RepositoryError::NotFound`] when a record the change
    /// relies on is gone, e.g. removed by another unit of work since it was
    /// staged.
    fn apply(&mut self, change: PendingChange) -> Result<()> {
        match change {
            PendingChange::InsertMonster(monster) => {
                self.monsters.insert(monster.id, monster);
            }
            PendingChange::UpdateMonster(monster) => {
                let existing = self.monsters.get_mut(&monster.id).ok_or(RepositoryError::NotFound)?;
                *existing = monster;
            }
            PendingChange::RemoveMonster(id) => {
                self.monsters.remove(&id).ok_or(RepositoryError::NotFound)?;
                self.battles
                    .retain(|_, battle| battle.monster_a != id && battle.monster_b != id);
            }
            PendingChange::InsertBattle(battle) => {
                if !self.monsters.contains_key(&battle.monster_a)
                    || !self.monsters.contains_key(&battle.monster_b)
                {
                    return Err(RepositoryError::NotFound);
                }
                self.battles.insert(battle.id, battle);
            }
            PendingChange::RemoveBattle(id) => {
                self.battles.remove(&id).ok_or(RepositoryError::NotFound)?;
            }
        }
        Ok(())
    }
}

pub struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
    pending: Vec<PendingChange>,
}

impl MemoryRepository {
    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| RepositoryError::LockPoisoned)
    }

    /// Committed state with this unit of work's pending changes on top.
    /// Only used for listings; single lookups go through the pending log.
    fn view(&self) -> Result<MemoryState> {
        let mut view = self.lock()?.clone();
        for change in &self.pending {
            // Stale changes are reported by commit_changes.
            let _ = view.apply(change.clone());
        }
        Ok(view)
    }

    fn monster_removed(&self, id: i32) -> bool {
        self.pending
            .iter()
            .any(|change| matches!(change, PendingChange::RemoveMonster(removed) if *removed == id))
    }

    fn next_monster_id(&self) -> Result<i32> {
        let mut state = self.lock()?;
        state.last_monster_id += 1;
        Ok(state.last_monster_id)
    }

    fn next_battle_id(&self) -> Result<i32> {
        let mut state = self.lock()?;
        state.last_battle_id += 1;
        Ok(state.last_battle_id)
    }
}

impl BattleOfMonstersRepository for MemoryRepository {
    fn list_monsters(&mut self) -> Result<Vec<Monster>> {
        Ok(self.view()?.monsters.into_values().collect())
    }

    fn find_monster(&mut self, id: i32) -> Result<Option<Monster>> {
        for change in self.pending.iter().rev() {
            match change {
                PendingChange::InsertMonster(monster) | PendingChange::UpdateMonster(monster)
                    if monster.id == id =>
                {
                    return Ok(Some(monster.clone()));
                }
                PendingChange::RemoveMonster(removed) if *removed == id => return Ok(None),
                _ => {}
            }
        }
        Ok(self.lock()?.monsters.get(&id).cloned())
    }

    fn save_monster(&mut self, monster: NewMonster) -> Result<Monster> {
        let monster = Monster {
            id: self.next_monster_id()?,
            name: monster.name,
            image_url: monster.image_url,
            attack: monster.attack,
            defense: monster.defense,
            hp: monster.hp,
            speed: monster.speed,
            created_at: Some(Utc::now().naive_utc()),
            updated_at: None,
        };
        self.pending.push(PendingChange::InsertMonster(monster.clone()));
        Ok(monster)
    }

    fn update_monster(&mut self, id: i32, monster: NewMonster) -> Result<Monster> {
        let mut existing = self.find_monster(id)?.ok_or(RepositoryError::NotFound)?;
        MonsterChanges::new(monster, Utc::now().naive_utc()).apply_to(&mut existing);
        self.pending.push(PendingChange::UpdateMonster(existing.clone()));
        Ok(existing)
    }

    fn delete_monster(&mut self, id: i32) -> Result<()> {
        if self.find_monster(id)?.is_none() {
            return Err(RepositoryError::NotFound);
        }
        self.pending.push(PendingChange::RemoveMonster(id));
        Ok(())
    }

    fn list_battles(&mut self) -> Result<Vec<Battle>> {
        Ok(self.view()?.battles.into_values().collect())
    }

    fn find_battle(&mut self, id: i32) -> Result<Option<Battle>> {
        let mut staged = None;
        for change in self.pending.iter().rev() {
            match change {
                PendingChange::InsertBattle(battle) if battle.id == id => {
                    staged = Some(battle.clone());
                    break;
                }
                PendingChange::RemoveBattle(removed) if *removed == id => return Ok(None),
                _ => {}
            }
        }
        let battle = match staged {
            Some(battle) => Some(battle),
            None => self.lock()?.battles.get(&id).cloned(),
        };
        Ok(battle.filter(|battle| {
            !self.monster_removed(battle.monster_a) && !self.monster_removed(battle.monster_b)
        }))
    }

    fn save_battle(&mut self, battle: NewBattle) -> Result<Battle> {
        let battle = Battle {
            id: self.next_battle_id()?,
            monster_a: battle.monster_a,
            monster_b: battle.monster_b,
            winner: battle.winner,
            created_at: Some(Utc::now().naive_utc()),
        };
        self.pending.push(PendingChange::InsertBattle(battle.clone()));
        Ok(battle)
    }

    fn delete_battle(&mut self, id: i32) -> Result<()> {
        if self.find_battle(id)?.is_none() {
            return Err(RepositoryError::NotFound);
        }
        self.pending.push(PendingChange::RemoveBattle(id));
        Ok(())
    }

    /// Replays the pending changes against the latest committed state. If any
    /// of them no longer applies nothing is written and the whole unit of
    /// work is discarded.
    fn commit_changes(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        let mut state = self.lock()?;
        let mut next = state.clone();
        for change in pending {
            next.apply(change)?;
        }
        *state = next;
        Ok(())
    }
}
