//! Built-in demo roster.
//!
//! Two teams of two. Between them the four characters use every action
//! variant, every target calculator and every numeric calculator the engine
//! offers, so a default battle exercises the whole rule set.

use battle_core::{
    ActionConfig, BaseStats, CharacterConfig, Controller, DamageCalculator, HealCalculator,
    HealthBasis, Item, MoveConfig, PowerTransform, RETALIATION_TAG, ScriptedPolicy, StatDelta,
    StatKind, StatTransform, SuccessCalculator, TargetCalculator, UseCount,
};

pub const HEROES: &str = "heroes";
pub const RAIDERS: &str = "raiders";

/// The default battle: Aria and Bram against Grusk and Vex.
///
/// Aria is player-controlled; the others follow scripted policies.
pub fn default_roster() -> Vec<CharacterConfig> {
    vec![aria(), bram(), grusk(), vex()]
}

fn aria() -> CharacterConfig {
    let ember_charm = Item::new("Ember Charm", "Mends its wearer and hardens every blow")
        .with_start_of_turn(ActionConfig::heal(
            TargetCalculator::User,
            HealCalculator::MaxHealthPercent(10),
        ))
        .with_end_of_turn(ActionConfig::buff(
            TargetCalculator::User,
            [StatDelta::new(StatKind::Speed, 0.05)],
        ))
        .with_power_transform(PowerTransform::Percent(150))
        .with_power_transform(PowerTransform::AtLeast(2));

    CharacterConfig::new("Aria", HEROES, 40, BaseStats::new(14, 8, 12))
        .with_controller(Controller::Player)
        .with_item(ember_charm)
        .with_move(
            MoveConfig::new("Slash", 15)
                .with_description("A measured cut at a foe of your choosing")
                .with_success(SuccessCalculator::Accuracy { percent: 90 })
                .with_action(ActionConfig::damage(
                    TargetCalculator::Chosen,
                    1,
                    DamageCalculator::StatDifference,
                )),
        )
        .with_move(
            MoveConfig::new("Riposte", 5)
                .with_description("Answer the last blow taken with half again its force")
                .with_priority(-1)
                .with_action(
                    ActionConfig::damage(
                        TargetCalculator::LastAttacker,
                        0,
                        DamageCalculator::LastReceivedPercent { percent: 150 },
                    )
                    .with_tag(RETALIATION_TAG),
                ),
        )
        .with_move(
            MoveConfig::new("Guard", 5)
                .with_description("Stand in front of an ally for the next hit")
                .with_priority(2)
                .with_action(ActionConfig::protect(TargetCalculator::SingleAlly)),
        )
        .with_move(
            MoveConfig::new("Rally", 3)
                .with_description("Raise the whole team's attack")
                .with_action(ActionConfig::buff(
                    TargetCalculator::UserTeam,
                    [StatDelta::new(StatKind::Attack, 0.2)],
                )),
        )
}

fn bram() -> CharacterConfig {
    CharacterConfig::new("Bram", HEROES, 35, BaseStats::new(9, 10, 8))
        .with_controller(Controller::Scripted(ScriptedPolicy::Cycle))
        .with_move(
            MoveConfig::new("Mend", 6)
                .with_description("Close an ally's wounds")
                .with_action(ActionConfig::heal(
                    TargetCalculator::SingleAlly,
                    HealCalculator::Absolute(12),
                )),
        )
        .with_move(
            MoveConfig::new("Bulwark", 2)
                .with_description("Let the team accept one more protector each")
                .with_action(ActionConfig::protect_limit_change(
                    TargetCalculator::UserTeam,
                    1,
                )),
        )
        .with_move(
            MoveConfig::new("Smite", 10)
                .with_description("Strike for a fifth of a foe's remaining health")
                .with_success(SuccessCalculator::Accuracy { percent: 80 })
                .with_action(ActionConfig::damage(
                    TargetCalculator::SingleEnemy,
                    0,
                    DamageCalculator::TargetHealthPercent {
                        percent: 20,
                        basis: HealthBasis::Current,
                    },
                )),
        )
}

fn grusk() -> CharacterConfig {
    CharacterConfig::new("Grusk", RAIDERS, 45, BaseStats::new(16, 9, 7))
        .with_controller(Controller::Scripted(ScriptedPolicy::Random))
        .with_move(
            MoveConfig::new("Whirlwind", 3)
                .with_description("Hit everyone nearby, friend or foe")
                .with_action(ActionConfig::damage(
                    TargetCalculator::AllOthers,
                    1,
                    DamageCalculator::StatDifference,
                )),
        )
        .with_move(
            MoveConfig::new("Crush", 12)
                .with_description("A heavy overhead blow")
                .with_action(ActionConfig::damage(
                    TargetCalculator::SingleEnemy,
                    2,
                    DamageCalculator::StatDifference,
                )),
        )
        .with_move(
            MoveConfig::new("Frenzy", 8)
                .with_description("Hits harder each time it lands, but grows harder to land")
                .with_success(SuccessCalculator::LinearByUses {
                    start: 100,
                    step: -20,
                    floor: 20,
                    ceiling: 100,
                    counted: UseCount::Successes,
                })
                .with_action(ActionConfig::damage(
                    TargetCalculator::RandomOther,
                    1,
                    DamageCalculator::LinearByUses {
                        step: 1,
                        min_power: 1,
                        max_power: 4,
                        counted: UseCount::Successes,
                    },
                )),
        )
}

fn vex() -> CharacterConfig {
    let quick_boots = Item::new("Quick Boots", "Light on the feet")
        .with_stat_transform(StatTransform::new(StatKind::Speed, PowerTransform::Add(3)));

    CharacterConfig::new("Vex", RAIDERS, 30, BaseStats::new(11, 7, 15))
        .with_controller(Controller::Scripted(ScriptedPolicy::Random))
        .with_item(quick_boots)
        .with_move(
            MoveConfig::new("Hex", 4)
                .with_description("Sap a foe's attack and defence")
                .with_action(ActionConfig::buff(
                    TargetCalculator::SingleEnemy,
                    [
                        StatDelta::new(StatKind::Attack, -0.1),
                        StatDelta::new(StatKind::Defence, -0.2),
                    ],
                )),
        )
        .with_move(
            MoveConfig::new("Dagger", 12)
                .with_description("A quick stab that ignores armour")
                .with_success(SuccessCalculator::Accuracy { percent: 85 })
                .with_action(ActionConfig::damage(
                    TargetCalculator::SingleEnemy,
                    6,
                    DamageCalculator::Absolute,
                )),
        )
        .with_move(
            MoveConfig::new("Drain", 6)
                .with_description("Bleed a tenth of a foe's full health and keep some")
                .with_action(ActionConfig::damage(
                    TargetCalculator::SingleEnemy,
                    0,
                    DamageCalculator::TargetHealthPercent {
                        percent: 10,
                        basis: HealthBasis::Max,
                    },
                ))
                .with_action(ActionConfig::heal(
                    TargetCalculator::User,
                    HealCalculator::Absolute(3),
                )),
        )
        .with_move(
            MoveConfig::new("Shroud", 4)
                .with_description("Cover an ally from the next hit")
                .with_priority(1)
                .with_action(ActionConfig::protect(TargetCalculator::SingleAlly)),
        )
}
