//! Acquired skills and their cooldown state.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::Player;

use super::{SkillError, SkillId, SkillTemplate};

/// One acquired skill with its live cooldown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillInstance {
    pub id: SkillId,
    /// Answer submissions left before the skill is usable again.
    pub remaining_cooldown: u32,
}

/// The player's acquired skills, in acquisition order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillBook {
    skills: ArrayVec<SkillInstance, { GameConfig::MAX_SKILLS }>,
}

impl SkillBook {
    pub fn empty() -> Self {
        Self {
            skills: ArrayVec::new(),
        }
    }

    /// Adds a skill with a cold cooldown. Re-acquiring is a no-op.
    pub fn acquire(&mut self, id: SkillId) {
        if self.has(&id) || self.skills.is_full() {
            return;
        }
        self.skills.push(SkillInstance {
            id,
            remaining_cooldown: 0,
        });
    }

    pub fn has(&self, id: &SkillId) -> bool {
        self.skills.iter().any(|s| &s.id == id)
    }

    pub fn get(&self, id: &SkillId) -> Option<&SkillInstance> {
        self.skills.iter().find(|s| &s.id == id)
    }

    /// Checks every gate for using a skill right now.
    ///
    /// Order matters for the message the player sees: acquisition, then
    /// cooldown, then MP.
    pub fn check_usable(&self, template: &SkillTemplate, player: &Player) -> Result<(), SkillError> {
        let Some(instance) = self.get(&template.id) else {
            return Err(SkillError::NotAcquired(template.id.clone()));
        };
        if instance.remaining_cooldown > 0 {
            return Err(SkillError::OnCooldown {
                skill: template.id.clone(),
                remaining: instance.remaining_cooldown,
            });
        }
        if player.mp < template.mp_cost {
            return Err(SkillError::InsufficientMp {
                skill: template.id.clone(),
                required: template.mp_cost,
                available: player.mp,
            });
        }
        Ok(())
    }

    /// Starts a skill's cooldown after it has executed.
    pub fn start_cooldown(&mut self, id: &SkillId, cooldown: u32) {
        if let Some(instance) = self.skills.iter_mut().find(|s| &s.id == id) {
            instance.remaining_cooldown = cooldown;
        }
    }

    /// Advances every cooldown by one answer submission.
    pub fn tick_cooldowns(&mut self) {
        for instance in &mut self.skills {
            instance.remaining_cooldown = instance.remaining_cooldown.saturating_sub(1);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillInstance> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{SkillActivation, SkillKind, SkillTargeting, SkillType};

    fn template(id: &str, mp_cost: u32) -> SkillTemplate {
        SkillTemplate {
            id: SkillId::from(id),
            name: id.to_owned(),
            skill_type: SkillType::Damage,
            kind: SkillKind::Strike { power: 15 },
            mp_cost,
            cooldown: 2,
            activation: SkillActivation::OnCorrectAnswer,
            targeting: SkillTargeting::SingleEnemy,
        }
    }

    #[test]
    fn acquire_is_idempotent() {
        let mut book = SkillBook::empty();
        book.acquire(SkillId::from("fire_bolt"));
        book.acquire(SkillId::from("fire_bolt"));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn gating_rejects_low_mp() {
        let mut book = SkillBook::empty();
        book.acquire(SkillId::from("fire_bolt"));
        let player = Player::create_default().with_mp(10);

        let err = book.check_usable(&template("fire_bolt", 20), &player).unwrap_err();
        assert_eq!(
            err,
            SkillError::InsufficientMp {
                skill: SkillId::from("fire_bolt"),
                required: 20,
                available: 10,
            }
        );
    }

    #[test]
    fn gating_rejects_active_cooldown_until_ticked_down() {
        let mut book = SkillBook::empty();
        book.acquire(SkillId::from("fire_bolt"));
        book.start_cooldown(&SkillId::from("fire_bolt"), 2);
        let player = Player::create_default();
        let tpl = template("fire_bolt", 5);

        assert!(matches!(
            book.check_usable(&tpl, &player),
            Err(SkillError::OnCooldown { remaining: 2, .. })
        ));

        book.tick_cooldowns();
        book.tick_cooldowns();
        assert!(book.check_usable(&tpl, &player).is_ok());
    }

    #[test]
    fn unacquired_skill_is_rejected() {
        let book = SkillBook::empty();
        let player = Player::create_default();
        assert!(matches!(
            book.check_usable(&template("heal", 1), &player),
            Err(SkillError::NotAcquired(_))
        ));
    }
}
