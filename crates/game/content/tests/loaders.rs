#![cfg(feature = "loaders")]

use std::fs;
use std::path::{Path, PathBuf};

use battle_content::{ConfigLoader, RosterLoader, default_roster};
use battle_core::{
    ActionKind, BattleConfig, Controller, DamageCalculator, HealCalculator, PowerTransform,
    ScriptedPolicy, StatKind, SuccessCalculator, TargetCalculator,
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn data_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

const DUEL: &str = r#"[
    (
        name: "Ash",
        team: "red",
        max_health: 20,
        stats: (attack: 9, defence: 4, speed: 6),
        moves: [
            (
                name: "Cut",
                max_uses: 3,
                actions: [(kind: Damage(power: 1, calculator: StatDifference), targeting: SingleEnemy)],
            ),
        ],
    ),
    (
        name: "Birch",
        team: "blue",
        max_health: 25,
        stats: (attack: 6, defence: 5, speed: 4),
        controller: Scripted(FirstUsable),
    ),
]"#;

#[test]
fn loads_roster_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "duel.ron", DUEL);

    let roster = RosterLoader::load(&path).unwrap();

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "Ash");
    assert_eq!(roster[0].moves[0].priority, 0);
    assert_eq!(roster[0].moves[0].success, SuccessCalculator::Always);
    assert!(roster[0].moves[0].actions[0].tags.is_empty());
    assert_eq!(roster[0].controller, Controller::default());
    assert!(roster[1].moves.is_empty());
    assert_eq!(
        roster[1].controller,
        Controller::Scripted(ScriptedPolicy::FirstUsable)
    );
}

#[test]
fn rejects_single_team_roster() {
    let content = DUEL.replace("\"blue\"", "\"red\"");

    let err = RosterLoader::parse(&content).unwrap_err();

    assert!(err.to_string().contains("at least two teams"));
}

#[test]
fn rejects_non_positive_max_health() {
    let content = DUEL.replace("max_health: 25", "max_health: 0");

    let err = RosterLoader::parse(&content).unwrap_err();

    assert!(err.to_string().contains("Birch"));
}

#[test]
fn rejects_buff_naming_a_stat_twice() {
    let content = r#"[
        (
            name: "Ash",
            team: "red",
            max_health: 20,
            stats: (attack: 9, defence: 4, speed: 6),
            moves: [
                (
                    name: "Focus",
                    max_uses: 1,
                    actions: [(
                        kind: Buff([(stat: speed, delta: 0.1), (stat: speed, delta: 0.2)]),
                        targeting: User,
                    )],
                ),
            ],
        ),
        (name: "Birch", team: "blue", max_health: 25, stats: (attack: 1, defence: 1, speed: 1)),
    ]"#;

    let err = RosterLoader::parse(content).unwrap_err();

    assert!(err.to_string().contains("speed twice"));
}

#[test]
fn malformed_roster_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "broken.ron", "[ (name: \"Ash\", ");

    let err = RosterLoader::load(&path).unwrap_err();

    assert!(err.to_string().contains("broken.ron"));
}

#[test]
fn missing_roster_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    assert!(RosterLoader::load(&dir.path().join("absent.ron")).is_err());
}

#[test]
fn bundled_sample_roster_parses() {
    let roster = RosterLoader::load(&data_file("roster.ron")).unwrap();

    assert_eq!(roster.len(), 4);

    let sable = &roster[0];
    assert!(sable.controller.is_player());
    let whetstone = sable.item.as_ref().unwrap();
    assert_eq!(
        whetstone.power_transforms,
        vec![PowerTransform::Add(1), PowerTransform::AtMost(12)]
    );
    assert!(whetstone.start_of_turn.is_none());

    let counter = &sable.moves[1].actions[0];
    assert_eq!(counter.targeting, TargetCalculator::LastAttacker);
    assert!(counter.tags.contains("retaliation"));
    assert_eq!(
        counter.kind,
        ActionKind::Damage {
            power: 0,
            calculator: DamageCalculator::LastReceivedPercent { percent: 150 },
        }
    );

    let salve = &roster[1].moves[1].actions[0];
    assert_eq!(salve.kind, ActionKind::Heal(HealCalculator::MaxHealthPercent(25)));

    let ActionKind::Buff(deltas) = &roster[2].moves[1].actions[0].kind else {
        panic!("Roar should be a buff");
    };
    assert_eq!(deltas[0].stat, StatKind::Attack);

    assert_eq!(roster[3].protect_limit, Some(2));
}

#[test]
fn builtin_roster_passes_validation() {
    RosterLoader::validate(&default_roster()).unwrap();
}

#[test]
fn empty_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "battle.toml", "");

    let config = ConfigLoader::load(&path).unwrap();

    assert_eq!(config, BattleConfig::default());
}

#[test]
fn partial_config_overrides_named_keys() {
    let config = ConfigLoader::parse("max_rounds = 12\n").unwrap();

    assert_eq!(config.max_rounds, 12);
    assert_eq!(
        config.default_protect_limit,
        BattleConfig::DEFAULT_PROTECT_LIMIT
    );
}

#[test]
fn bundled_config_parses() {
    let config = ConfigLoader::load(&data_file("battle.toml")).unwrap();

    assert_eq!(config.max_rounds, 50);
    assert_eq!(config.seed, 2024);
}

#[test]
fn config_rejects_wrong_types() {
    assert!(ConfigLoader::parse("max_rounds = \"many\"").is_err());
}
