//! Attack and grenade resolution
//!
//! The formula pieces are pure functions; the `DuelState` methods fetch
//! stat and kit snapshots, roll, apply, and log.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{clamp_f, clamp_i, Side};
use crate::duel::constants::*;
use crate::duel::range::RangeGate;
use crate::duel::state::{DuelState, HitKind, PendingGrenade};
use crate::provider::{
    BaseAttributes, CombatKit, LoadoutRange, WeaponClass, WeaponProfile, WeaponSlot,
};

/// Damage category, decides how much armor soaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageKind {
    Melee,
    SmallRanged,
    LargeRanged,
    Grenade,
}

impl DamageKind {
    pub fn of_class(class: WeaponClass) -> Self {
        match class {
            WeaponClass::Melee => DamageKind::Melee,
            WeaponClass::Pistol | WeaponClass::Smg => DamageKind::SmallRanged,
            WeaponClass::Shotgun | WeaponClass::Rifle => DamageKind::LargeRanged,
        }
    }

    pub fn armor_factor(self) -> f64 {
        match self {
            DamageKind::Melee => ARMOR_FACTOR_MELEE,
            DamageKind::SmallRanged => ARMOR_FACTOR_SMALL_RANGED,
            DamageKind::LargeRanged => ARMOR_FACTOR_LARGE_RANGED,
            DamageKind::Grenade => ARMOR_FACTOR_GRENADE,
        }
    }
}

/// Resolved weapon numbers for one attack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackNumbers {
    pub slot: WeaponSlot,
    pub weapon: WeaponProfile,
    /// Percent, 5-95
    pub accuracy: i32,
    pub damage: i32,
}

impl AttackNumbers {
    pub fn is_unarmed(&self) -> bool {
        self.slot == WeaponSlot::Unarmed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    Hit { damage: i32, mitigated: i32 },
    Miss,
    /// Nothing usable at this range
    NoWeapon,
    /// Only fists, and not at Hands On
    TooFar,
}

fn fists() -> WeaponProfile {
    WeaponProfile {
        name: UNARMED_NAME.to_string(),
        class: WeaponClass::Melee,
        ranges: vec![LoadoutRange::Close],
        base_accuracy: UNARMED_ACCURACY,
        base_damage: UNARMED_DAMAGE,
    }
}

/// Pick a weapon for the range and compute accuracy and damage.
///
/// Falls back to fists at Close; `None` anywhere else.
pub fn compute_attack_numbers(
    kit: &CombatKit,
    range: LoadoutRange,
    disarmed: &[WeaponSlot],
) -> Option<AttackNumbers> {
    let (slot, weapon) = match kit.pick_for_range(range, disarmed) {
        Some((slot, weapon)) => (slot, weapon.clone()),
        None if range == LoadoutRange::Close => (WeaponSlot::Unarmed, fists()),
        None => return None,
    };
    let accuracy = clamp_i(
        weapon.base_accuracy + kit.mods.accuracy + range.accuracy_modifier(),
        ACCURACY_MIN_PCT,
        ACCURACY_MAX_PCT,
    );
    let damage = (weapon.base_damage + kit.mods.damage).max(1);
    Some(AttackNumbers {
        slot,
        weapon,
        accuracy,
        damage,
    })
}

/// Final hit probability.
///
/// Cover scales accuracy down, the stat edge shifts it, the result is
/// capped. A hidden defender cannot be hit at all.
pub fn hit_probability(
    accuracy: i32,
    attacker: &BaseAttributes,
    defender: &BaseAttributes,
    defender_cover: Option<u8>,
    defender_hidden: bool,
) -> f64 {
    if defender_hidden {
        return 0.0;
    }
    let mut p = accuracy as f64 / 100.0;
    if let Some(percent) = defender_cover {
        p *= 1.0 - percent as f64 / 100.0;
    }
    p += COMBAT_EDGE_PER_POINT * (attacker.combat - defender.combat)
        + FITNESS_EDGE_PER_POINT * (attacker.fitness - defender.fitness);
    clamp_f(p, 0.0, HIT_CHANCE_CAP)
}

/// Armor soak. Returns (damage dealt, damage absorbed); at least 1 gets through.
pub fn mitigate(armor: f64, damage: i32, kind: DamageKind) -> (i32, i32) {
    let raw = (armor * kind.armor_factor()).round_ties_even() as i32;
    let absorbed = clamp_i(raw, 0, (damage - 1).max(0));
    (damage - absorbed, absorbed)
}

/// Critical chance and multiplier. Not applied by hit resolution.
pub fn crit_params(attacker: &BaseAttributes) -> (f64, f64) {
    let chance = clamp_f(
        CRIT_CHANCE_BASE + 0.005 * (attacker.combat - 10.0) + attacker.crit_bonus,
        CRIT_CHANCE_MIN,
        CRIT_CHANCE_MAX,
    );
    let mult = clamp_f(
        CRIT_MULT_BASE + 0.005 * attacker.combat + attacker.crit_mult_bonus,
        CRIT_MULT_BASE,
        CRIT_MULT_MAX,
    );
    (chance, mult)
}

/// Chance a thrown grenade lands close enough to arm
pub fn grenade_chance(range_idx: usize, thrower_fitness: f64, target_fitness: f64) -> f64 {
    clamp_f(
        GRENADE_BASE_CHANCE - GRENADE_PENALTY_PER_GATE * range_idx as f64
            + GRENADE_FITNESS_EDGE * (thrower_fitness - target_fitness),
        GRENADE_CHANCE_MIN,
        GRENADE_CHANCE_MAX,
    )
}

fn armor_note(absorbed: i32) -> String {
    if absorbed > 0 {
        format!(" (−{} armor)", absorbed)
    } else {
        String::new()
    }
}

impl DuelState {
    /// Fists only work at Hands On or in a grapple
    pub fn fists_too_far(&self) -> bool {
        !self.is_grappling() && self.gate() != RangeGate::Hands
    }

    /// What `side` would attack with right now
    pub fn attack_plan(&self, side: Side) -> Option<AttackNumbers> {
        let kit = self.collaborators.kit(self.fighter(side).id);
        compute_attack_numbers(&kit, self.gate().loadout_range(), &self.side(side).disarmed)
    }

    pub fn attack(&mut self, actor: Side) -> AttackOutcome {
        let foe = actor.other();
        let tag = self.fighter(actor).tag();
        let range = self.gate().loadout_range();

        let Some(numbers) = self.attack_plan(actor) else {
            let line = format!(
                "No viable weapon at {} range. {} is unarmed; advance to **Close** to use **Fists**.",
                range.label(),
                tag
            );
            self.log.push(line);
            return AttackOutcome::NoWeapon;
        };
        if numbers.is_unarmed() && self.fists_too_far() {
            self.log.push(format!("{} is too far away to **swing** their fists.", tag));
            return AttackOutcome::TooFar;
        }

        let attacker = self.collaborators.attributes(self.fighter(actor).id);
        let defender = self.collaborators.attributes(self.fighter(foe).id);
        let target = self.side(foe);
        let cover = target.in_cover.then_some(target.cover_percent);
        let p = hit_probability(numbers.accuracy, &attacker, &defender, cover, target.hidden);
        let roll: f64 = self.rng.gen();
        tracing::debug!("{} attacks with {}: p={:.3} roll={:.3}", tag, numbers.weapon.name, p, roll);

        if p <= 0.0 || roll > p {
            let line = if numbers.is_unarmed() {
                format!("{} **swings** and **misses**.", tag)
            } else {
                format!("{} fires and **misses**.", tag)
            };
            self.log.push(line);
            return AttackOutcome::Miss;
        }

        let kind = DamageKind::of_class(numbers.weapon.class);
        let (damage, mitigated) = mitigate(defender.armor, numbers.damage, kind);
        self.fighter_mut(foe).take_damage(damage);
        let foe_name = self.fighter(foe).name.clone();
        let line = if numbers.is_unarmed() {
            format!(
                "{} **swings** and hits {} for **{}**{}.",
                tag,
                foe_name,
                damage,
                armor_note(mitigated)
            )
        } else {
            format!(
                "{} hits {} with **{}** for **{}**{}.",
                tag,
                foe_name,
                numbers.weapon.name,
                damage,
                armor_note(mitigated)
            )
        };
        self.log.push(line);
        self.record_hit(foe, actor, HitKind::Shot, &numbers.weapon.name);
        AttackOutcome::Hit { damage, mitigated }
    }

    /// Arm a grenade against the opponent. Returns true if it landed.
    pub fn throw_grenade(&mut self, actor: Side) -> bool {
        let foe = actor.other();
        let tag = self.fighter(actor).tag();
        let kit = self.collaborators.kit(self.fighter(actor).id);
        if !kit.has_grenade {
            self.log.push(format!("{} fumbles for a grenade, but has none.", tag));
            return false;
        }

        let thrower = self.collaborators.attributes(self.fighter(actor).id);
        let target = self.collaborators.attributes(self.fighter(foe).id);
        let p = grenade_chance(self.range_idx, thrower.fitness, target.fitness);
        if self.rng.gen::<f64>() > p {
            self.log.push(format!("💣 {} throws a grenade but it **misses** the mark.", tag));
            return false;
        }

        let damage = self.rng.gen_range(GRENADE_DAMAGE_MIN..=GRENADE_DAMAGE_MAX);
        self.side_mut(foe).pending_grenade = Some(PendingGrenade {
            from: actor,
            damage,
        });
        let line = format!(
            "💣 {} lobs a grenade! It lands near {} and will detonate at the start of their turn.",
            tag,
            self.fighter(foe).name
        );
        self.log.push(line);
        true
    }

    /// Set off a grenade waiting on `side`. Returns damage dealt.
    pub fn detonate_pending_grenade(&mut self, side: Side) -> Option<i32> {
        let pending = self.side_mut(side).pending_grenade.take()?;
        let defender = self.collaborators.attributes(self.fighter(side).id);
        let (damage, mitigated) = mitigate(defender.armor, pending.damage, DamageKind::Grenade);
        self.fighter_mut(side).take_damage(damage);
        self.record_hit(side, pending.from, HitKind::Grenade, "grenade");
        let line = format!(
            "💥 Grenade detonates on {}: **{}** damage{}.",
            self.fighter(side).name,
            damage,
            armor_note(mitigated)
        );
        self.log.push(line);
        Some(damage)
    }
}
