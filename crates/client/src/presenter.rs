//! Plain-text battle log.

use std::io::{self, Write};

use battle_core::{
    ActionSource, ActionStatus, BattleEvent, BattleStatus, ItemPhase, MoveOutcome, PassReason,
    PresentationSink, Roster, RoundReport, StatDelta,
};

/// Renders round reports as English sentences.
///
/// Write failures are logged and otherwise ignored; a broken pipe must not
/// abort the battle itself.
pub struct TextPresenter<W: Write = io::Stdout> {
    out: W,
    show_health: bool,
}

impl TextPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_health: true,
        }
    }

    /// Skip the per-round health summary.
    #[must_use]
    pub fn without_health(mut self) -> Self {
        self.show_health = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(&mut self, report: &RoundReport, roster: &Roster) -> io::Result<()> {
        writeln!(self.out, "=== Round {} ===", report.round)?;
        for event in &report.events {
            if let Some(line) = describe(event, roster) {
                writeln!(self.out, "{line}")?;
            }
        }
        if self.show_health {
            for character in roster.iter() {
                let state = if character.is_dead() { " (down)" } else { "" };
                writeln!(
                    self.out,
                    "  {} [{}] {}/{}{}",
                    character.name(),
                    character.team(),
                    character.current_health(),
                    character.max_health(),
                    state
                )?;
            }
        }
        self.out.flush()
    }

    fn write_result(&mut self, status: &BattleStatus) -> io::Result<()> {
        match status {
            BattleStatus::Won { team } => writeln!(self.out, "Team {team} wins!")?,
            BattleStatus::Draw => writeln!(self.out, "The battle ends in a draw.")?,
            BattleStatus::Ongoing => writeln!(self.out, "The battle was left unfinished.")?,
        }
        self.out.flush()
    }
}

impl<W: Write> PresentationSink for TextPresenter<W> {
    fn present(&mut self, report: &RoundReport, roster: &Roster) {
        if let Err(e) = self.write_report(report, roster) {
            tracing::warn!("Failed to write round {} report: {}", report.round, e);
        }
    }

    fn finish(&mut self, status: &BattleStatus, _roster: &Roster) {
        if let Err(e) = self.write_result(status) {
            tracing::warn!("Failed to write battle result: {}", e);
        }
    }
}

/// One line for an event, or `None` for events that are not worth showing.
fn describe(event: &BattleEvent, roster: &Roster) -> Option<String> {
    let name = |id| roster.name_of(id);

    let line = match event {
        BattleEvent::ItemTriggered {
            character,
            item,
            phase,
        } => {
            let when = match phase {
                ItemPhase::StartOfTurn => "start",
                ItemPhase::EndOfTurn => "end",
            };
            format!("{}'s {} stirs at the {} of the round.", name(*character), item, when)
        }
        BattleEvent::MoveChosen { .. } => return None,
        BattleEvent::MoveUnavailable {
            character,
            move_name,
        } => format!("{} has no uses of {} left.", name(*character), move_name),
        BattleEvent::MoveResolved {
            character,
            move_name,
            outcome,
        } => match outcome {
            MoveOutcome::Success => format!("{} uses {}.", name(*character), move_name),
            MoveOutcome::Miss => format!("{} uses {}, but it misses!", name(*character), move_name),
            MoveOutcome::Failure => {
                format!("{} tries {}, but it fails!", name(*character), move_name)
            }
        },
        BattleEvent::Damaged { target, amount, .. } => {
            format!("{} takes {} damage.", name(*target), amount)
        }
        BattleEvent::Protected {
            target,
            protector,
            amount,
            ..
        } => format!(
            "{} shields {} from {} damage.",
            name(*protector),
            name(*target),
            amount
        ),
        BattleEvent::DamageFailed { target, .. } => {
            format!("The attack on {} has nothing to draw on.", name(*target))
        }
        BattleEvent::Healed { target, amount, .. } => {
            format!("{} recovers {} health.", name(*target), amount)
        }
        BattleEvent::Buffed { target, deltas, .. } => {
            format!("{}: {}.", name(*target), describe_deltas(deltas))
        }
        BattleEvent::ProtectAdded { protector, target } if protector == target => {
            format!("{} braces.", name(*protector))
        }
        BattleEvent::ProtectAdded { protector, target } => {
            format!("{} stands guard over {}.", name(*protector), name(*target))
        }
        BattleEvent::ProtectRejected { protector, target } => format!(
            "{} cannot guard {}: too many protectors already.",
            name(*protector),
            name(*target)
        ),
        BattleEvent::ProtectLimitChanged {
            target,
            delta,
            limit,
        } => format!(
            "{} can now take {} protector(s) ({:+}).",
            name(*target),
            limit,
            delta
        ),
        BattleEvent::ActionSkipped {
            character,
            source,
            status,
        } => {
            let what = match source {
                ActionSource::Move(label) | ActionSource::Item(label) => label,
            };
            match status {
                ActionStatus::NoTargets => {
                    format!("{}'s {} finds no target.", name(*character), what)
                }
                ActionStatus::TargetsUnset | ActionStatus::Applied => return None,
            }
        }
        BattleEvent::Died { character } => format!("{} falls!", name(*character)),
        BattleEvent::Passed { character, reason } => match reason {
            PassReason::NoUsableMoves => format!("{} has nothing left to do.", name(*character)),
            PassReason::Dead => return None,
        },
    };
    Some(line)
}

fn describe_deltas(deltas: &[StatDelta]) -> String {
    deltas
        .iter()
        .map(|d| {
            let direction = if d.delta >= 0.0 { "rises" } else { "falls" };
            format!("{} {} by {:.0}%", d.stat, direction, d.delta.abs() * 100.0)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use battle_core::{
        ActionConfig, BaseStats, Battle, BattleConfig, CharacterConfig, DamageCalculator,
        MoveConfig, ScriptedRandom, TargetCalculator,
    };

    use super::*;

    fn duel() -> Battle {
        let striker = CharacterConfig::new("Striker", "red", 30, BaseStats::new(10, 5, 9))
            .with_move(MoveConfig::new("Jab", 10).with_action(ActionConfig::damage(
                TargetCalculator::SingleEnemy,
                12,
                DamageCalculator::Absolute,
            )));
        let dummy = CharacterConfig::new("Dummy", "blue", 20, BaseStats::new(1, 1, 1));
        Battle::from_configs([striker, dummy], BattleConfig::new())
            .with_random(ScriptedRandom::new([0]))
    }

    #[test]
    fn renders_rounds_and_result() {
        let mut battle = duel();
        let mut presenter = TextPresenter::new(Vec::new());

        battle.run(&mut presenter).unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert!(text.contains("=== Round 1 ==="));
        assert!(text.contains("Striker uses Jab."));
        assert!(text.contains("Dummy takes 12 damage."));
        assert!(text.contains("Dummy falls!"));
        assert!(text.contains("Team red wins!"));
    }

    #[test]
    fn health_summary_can_be_hidden() {
        let mut battle = duel();
        let mut presenter = TextPresenter::new(Vec::new()).without_health();

        battle.run(&mut presenter).unwrap();
        let text = String::from_utf8(presenter.into_inner()).unwrap();

        assert!(!text.contains("[red]"));
    }

    #[test]
    fn describes_buffs_as_percentages() {
        let text = describe_deltas(&[
            StatDelta::new(battle_core::StatKind::Attack, 0.2),
            StatDelta::new(battle_core::StatKind::Defence, -0.1),
        ]);

        assert_eq!(text, "attack rises by 20%, defence falls by 10%");
    }
}
