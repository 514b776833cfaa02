use crate::models::monster::Monster;

/// Which of the two monsters passed to the engine a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// Working copy of a monster's combat stats for a single fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combatant {
    pub id: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub hp: i32,
}

impl From<&Monster> for Combatant {
    fn from(monster: &Monster) -> Self {
        Combatant {
            id: monster.id,
            attack: monster.attack,
            defense: monster.defense,
            speed: monster.speed,
            hp: monster.hp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleOutcome {
    pub winner: i32,
    pub first_attacker: i32,
    pub rounds: u32,
}

/// Higher speed strikes first, then higher attack. When both are tied,
/// monster A strikes first.
pub fn first_attacker(monster_a: &Combatant, monster_b: &Combatant) -> Side {
    let a = (monster_a.speed, monster_a.attack);
    let b = (monster_b.speed, monster_b.attack);
    if b > a {
        Side::B
    } else {
        Side::A
    }
}

/// Damage never goes below zero, so a strong defense cannot heal.
pub fn damage(attack: i32, defense: i32) -> i32 {
    attack.saturating_sub(defense).max(0)
}

/// Fights round after round until either side is at or below zero hp.
///
/// Each round the first attacker hits, then the second attacker hits back
/// even if it was just knocked out. The first attacker wins only if it is
/// still standing, so a double knockout goes to the second attacker. When
/// neither side can hurt the other a single round is fought and the same
/// rule decides.
pub fn simulate(monster_a: &Monster, monster_b: &Monster) -> BattleOutcome {
    let monster_a = Combatant::from(monster_a);
    let monster_b = Combatant::from(monster_b);

    let (mut first, mut second) = match first_attacker(&monster_a, &monster_b) {
        Side::A => (monster_a, monster_b),
        Side::B => (monster_b, monster_a),
    };

    let first_damage = damage(first.attack, second.defense);
    let second_damage = damage(second.attack, first.defense);
    let stalemate = first_damage == 0 && second_damage == 0;

    let mut rounds = 0;
    loop {
        rounds += 1;
        second.hp = second.hp.saturating_sub(first_damage);
        first.hp = first.hp.saturating_sub(second_damage);

        if first.hp <= 0 || second.hp <= 0 || stalemate {
            break;
        }
    }

    let winner = if first.hp > 0 { first.id } else { second.id };
    BattleOutcome {
        winner,
        first_attacker: first.id,
        rounds,
    }
}

/// Returns the id of the winning monster.
pub fn resolve(monster_a: &Monster, monster_b: &Monster) -> i32 {
    simulate(monster_a, monster_b).winner
}
