//! Terminal input for player-controlled characters.

use std::io::{self, BufRead, Write};

use battle_core::{Character, ChoiceProvider, MoveOption};

/// Asks the player for move and target indices on a line-based terminal.
///
/// Invalid input is re-prompted here, so the engine only ever sees in-range
/// indices. End of input answers 0 for every remaining question.
pub struct StdinChoiceProvider<R = io::StdinLock<'static>, W = io::Stdout> {
    input: R,
    prompt: W,
    closed: bool,
}

impl StdinChoiceProvider {
    pub fn new() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl Default for StdinChoiceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write> StdinChoiceProvider<R, W> {
    pub fn with_io(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            closed: false,
        }
    }

    fn ask(&mut self, question: &str, labels: &[String]) -> usize {
        if labels.len() <= 1 || self.closed {
            return 0;
        }

        loop {
            if let Err(e) = self.show(question, labels) {
                tracing::warn!("Failed to write prompt: {}", e);
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    tracing::info!("Input closed; defaulting remaining choices to the first option");
                    self.closed = true;
                    return 0;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Failed to read choice: {}", e);
                    self.closed = true;
                    return 0;
                }
            }

            match line.trim().parse::<usize>() {
                Ok(n) if (1..=labels.len()).contains(&n) => return n - 1,
                _ => {
                    let _ = writeln!(
                        self.prompt,
                        "Please enter a number between 1 and {}.",
                        labels.len()
                    );
                }
            }
        }
    }

    fn show(&mut self, question: &str, labels: &[String]) -> io::Result<()> {
        writeln!(self.prompt, "{question}")?;
        for (i, label) in labels.iter().enumerate() {
            writeln!(self.prompt, "  {}) {}", i + 1, label)?;
        }
        write!(self.prompt, "> ")?;
        self.prompt.flush()
    }
}

impl<R: BufRead, W: Write> ChoiceProvider for StdinChoiceProvider<R, W> {
    fn choose_move(&mut self, user: &Character, options: &[MoveOption]) -> usize {
        let labels: Vec<String> = options
            .iter()
            .map(|o| {
                format!(
                    "{} ({}/{}) {}",
                    o.name, o.remaining_uses, o.max_uses, o.description
                )
                .trim_end()
                .to_string()
            })
            .collect();
        self.ask(
            &format!(
                "{} ({}/{} hp), choose a move:",
                user.name(),
                user.current_health(),
                user.max_health()
            ),
            &labels,
        )
    }

    fn choose_target(&mut self, user: &Character, candidates: &[&Character]) -> usize {
        let labels: Vec<String> = candidates
            .iter()
            .map(|c| {
                format!(
                    "{} [{}] {}/{} hp",
                    c.name(),
                    c.team(),
                    c.current_health(),
                    c.max_health()
                )
            })
            .collect();
        self.ask(&format!("{}, choose a target:", user.name()), &labels)
    }
}
