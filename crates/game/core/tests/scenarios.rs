use std::collections::BTreeSet;

use battle_core::action::DamageRoll;
use battle_core::{
    Action, ActionConfig, ActionContext, ActionHistory, ActionRecord, ActionSource, BaseStats,
    Character, CharacterConfig, CharacterId, DamageCalculator, DamageIntake, HealCalculator,
    Move, MoveConfig, MoveOutcome, MoveUse, MoveUseResult, ProtectOutcome, RETALIATION_TAG,
    Roster, ScriptedRandom, StatDelta, StatKind, TargetCalculator, TargetEffect,
};

fn fighter(name: &str, team: &str, max_health: i32) -> CharacterConfig {
    CharacterConfig::new(name, team, max_health, BaseStats::new(10, 10, 10))
}

const NOBODY: CharacterId = CharacterId(0);

#[test]
fn scenario_a_unprotected_damage_lowers_health() {
    let mut target = Character::new(fighter("Target", "blue", 5));

    let intake = target.receive_damage(2, NOBODY);

    assert_eq!(target.current_health(), 3);
    assert!(intake.is_applied());
}

#[test]
fn scenario_b_protector_absorbs_hit() {
    let mut target = Character::new(fighter("Target", "blue", 5));
    let guard = CharacterId(42);
    assert_eq!(target.add_protect(guard), ProtectOutcome::Added);

    let intake = target.receive_damage(4, NOBODY);

    assert_eq!(target.current_health(), 5);
    assert_eq!(intake.protected_by(), Some(guard));
    assert!(target.protect_queue().is_empty());
}

#[test]
fn scenario_c_buff_action_raises_attack() {
    let mut roster = Roster::new(vec![Character::new(fighter("Bard", "red", 10))]);
    let bard = roster.ids()[0];
    let mut history = ActionHistory::new();
    let mut rng = ScriptedRandom::new([0]);
    let mut ctx = ActionContext::new(
        1,
        bard,
        ActionSource::Move("Rally".into()),
        &mut roster,
        &mut history,
        &mut rng,
    );

    let config = ActionConfig::buff(
        TargetCalculator::User,
        [StatDelta::new(StatKind::Attack, 0.2)],
    );
    let outcome = Action::trigger(&config, &mut ctx).unwrap();

    assert!(outcome.success());
    let bard = roster.get(bard).unwrap();
    assert_eq!(bard.stats().attack.base_value(), 10);
    assert_eq!(bard.stat(StatKind::Attack), 12);
}

#[test]
fn scenario_d_retaliation_deals_150_percent_of_last_hit() {
    let mut roster = Roster::new(vec![
        Character::new(fighter("Duelist", "blue", 50)),
        Character::new(fighter("Striker", "red", 50)),
    ]);
    let ids = roster.ids();
    let (duelist, striker) = (ids[0], ids[1]);

    let mut history = ActionHistory::new();
    history.record_action(ActionRecord {
        round: 1,
        user: striker,
        source: ActionSource::Move("Strike".into()),
        tags: BTreeSet::new(),
        effects: vec![TargetEffect::Damage {
            target: duelist,
            amount: 10,
            intake: DamageIntake::Applied { amount: 10 },
        }],
    });

    let mut rng = ScriptedRandom::new([0]);
    let mut ctx = ActionContext::new(
        2,
        duelist,
        ActionSource::Move("Riposte".into()),
        &mut roster,
        &mut history,
        &mut rng,
    );

    let calculator = DamageCalculator::LastReceivedPercent { percent: 150 };
    let rolls = calculator.calculate(&ctx, 0, &[striker]).unwrap();
    assert_eq!(
        rolls,
        vec![DamageRoll {
            target: striker,
            success: true,
            amount: 15,
        }]
    );

    let mut riposte = Action::new(
        ActionConfig::damage(TargetCalculator::LastAttacker, 0, calculator)
            .with_tag(RETALIATION_TAG),
    );
    let outcome = riposte.use_action(&mut ctx).unwrap();

    assert!(outcome.has_tag(RETALIATION_TAG));
    assert_eq!(roster.get(striker).unwrap().current_health(), 35);
    assert_eq!(history.actions_tagged(RETALIATION_TAG).count(), 1);
}

#[test]
fn retaliation_fails_without_prior_damage() {
    let mut roster = Roster::new(vec![
        Character::new(fighter("Duelist", "blue", 50)),
        Character::new(fighter("Striker", "red", 50)),
    ]);
    let ids = roster.ids();
    let mut history = ActionHistory::new();
    let mut rng = ScriptedRandom::new([0]);
    let ctx = ActionContext::new(
        1,
        ids[0],
        ActionSource::Move("Riposte".into()),
        &mut roster,
        &mut history,
        &mut rng,
    );

    let rolls = DamageCalculator::LastReceivedPercent { percent: 150 }
        .calculate(&ctx, 0, &[ids[1]])
        .unwrap();

    assert!(!rolls[0].success);
}

#[test]
fn scenario_e_second_protect_is_rejected() {
    let mut target = Character::new(fighter("Target", "blue", 5));
    assert_eq!(target.protect_limit(), 1);

    assert!(target.add_protect(CharacterId(7)).is_added());
    let second = target.add_protect(CharacterId(8));

    assert_eq!(second, ProtectOutcome::Rejected);
    assert_eq!(target.protect_queue().len(), 1);
}

#[test]
fn scenario_f_single_use_move_is_rejected_after_use() {
    let finisher = MoveConfig::new("Finisher", 1).with_action(ActionConfig::damage(
        TargetCalculator::SingleEnemy,
        3,
        DamageCalculator::Absolute,
    ));
    let mut roster = Roster::new(vec![
        Character::new(fighter("Hero", "red", 10).with_move(finisher)),
        Character::new(fighter("Orc", "blue", 10)),
    ]);
    let ids = roster.ids();
    let mut history = ActionHistory::new();
    let mut rng = ScriptedRandom::new([0]);
    let mut ctx = ActionContext::new(
        1,
        ids[0],
        ActionSource::Move("Finisher".into()),
        &mut roster,
        &mut history,
        &mut rng,
    );

    let first = MoveUse::declare(0, &mut ctx).unwrap();
    assert_eq!(first.resolve(&mut ctx).unwrap().outcome(), Some(MoveOutcome::Success));
    assert!(!ctx.roster.get(ids[0]).unwrap().moves()[0].can_use());

    let second = MoveUse::declare(0, &mut ctx).unwrap();
    assert_eq!(second.resolve(&mut ctx).unwrap(), MoveUseResult::Unavailable);

    assert_eq!(roster.get(ids[1]).unwrap().current_health(), 7);
    assert_eq!(history.actions().count(), 1);
}

#[test]
fn protectors_are_consumed_in_order_offered() {
    let mut target = Character::new(fighter("Target", "blue", 5).with_protect_limit(2));
    let (x, y) = (CharacterId(100), CharacterId(101));
    target.add_protect(x);
    target.add_protect(y);

    let first = target.receive_damage(3, NOBODY);
    let second = target.receive_damage(3, NOBODY);

    assert_eq!(first.protected_by(), Some(x));
    assert_eq!(second.protected_by(), Some(y));
    assert_eq!(target.current_health(), 5);
}

#[test]
fn heal_never_exceeds_max_health() {
    for (damage, heal, expected) in [(4, 1, 7), (4, 4, 10), (4, 50, 10), (0, 3, 10)] {
        let mut character = Character::new(fighter("Cleric", "red", 10));
        character.receive_damage(damage, NOBODY);
        character.heal(heal, NOBODY);
        assert_eq!(character.current_health(), expected);
    }
}

#[test]
fn percent_heal_rounds_against_max_health() {
    let mut roster = Roster::new(vec![Character::new(fighter("Cleric", "red", 30))]);
    let cleric = roster.ids()[0];
    roster
        .get_mut(cleric)
        .unwrap()
        .receive_damage(20, NOBODY);

    let mut history = ActionHistory::new();
    let mut rng = ScriptedRandom::new([0]);
    let mut ctx = ActionContext::new(
        1,
        cleric,
        ActionSource::Move("Mend".into()),
        &mut roster,
        &mut history,
        &mut rng,
    );
    let config = ActionConfig::heal(TargetCalculator::User, HealCalculator::MaxHealthPercent(25));
    let outcome = Action::trigger(&config, &mut ctx).unwrap();

    // 25% of 30 is 7.5, rounded to 8.
    assert_eq!(
        outcome.effects,
        vec![TargetEffect::Heal {
            target: cleric,
            amount: 8,
        }]
    );
    assert_eq!(roster.get(cleric).unwrap().current_health(), 18);
}

#[test]
fn move_budget_matches_uses() {
    let mut mv = Move::new(MoveConfig::new("Volley", 3));
    for expected in [2, 1, 0, 0] {
        mv.consume_use();
        assert_eq!(mv.remaining_uses(), expected);
    }
}
