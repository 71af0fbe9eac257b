use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::population::Generation;
use crate::error::{MarioGaError, Result};
use crate::types::{Action, ACTION_COUNT};
use std::fmt::Write;

const GENERATION_HEADER: &str = "Generation - ";
const CHROMOSOME_PREFIX: &str = "CHROMOSOME:";
const SOLUTION_PREFIX: &str = "SOLUTION:";

/// `[a, b, c]`
pub fn format_solution(actions: &[Action]) -> String {
    let items: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn write_header(out: &mut String, generation_number: usize, level_id: &str) {
    let _ = writeln!(out, "{}{}", GENERATION_HEADER, generation_number);
    let _ = writeln!(out, "World - {}", level_id);
    let _ = writeln!(out);
}

fn write_chromosome(out: &mut String, index: usize, chromosome: &Chromosome, time_budget: f64) {
    let _ = writeln!(out, "{} {}", CHROMOSOME_PREFIX, index);
    let _ = writeln!(out, "{} {}", SOLUTION_PREFIX, format_solution(chromosome.actions()));
    match chromosome.outcome() {
        Some(outcome) => {
            let _ = writeln!(out, "COINS: {}", outcome.coins);
            let _ = writeln!(out, "TIME_LEFT: {}", outcome.time_left);
            let _ = writeln!(out, "X_POS: {}", outcome.x_pos);
            let _ = writeln!(out, "SPEED: {}", outcome.speed(time_budget));
            let _ = writeln!(out, "SCORE: {}", outcome.score);
            let _ = writeln!(out, "FLAG: {}", outcome.flag_get);
            let _ = writeln!(out, "REASON_FINISH: {}", outcome.reason_finish);
            let _ = writeln!(out, "STATUS: {}", outcome.status);
            let _ = writeln!(out, "COMMANDS_USED: {}", outcome.commands_used);
        }
        None => {
            let _ = writeln!(out, "OUTCOME: none");
        }
    }
    let _ = writeln!(out, "FITNESS VALUE: {}", chromosome.fitness());
    let _ = writeln!(out);
}

/// Full log entry for one scored generation.
///
/// Opens with the `Generation - n` / `World - id` header, lists each
/// chromosome with its outcome and ends with the generation averages.
pub fn render_log(
    generation: &Generation,
    generation_number: usize,
    level_id: &str,
    time_budget: f64,
) -> String {
    let mut out = String::new();
    write_header(&mut out, generation_number, level_id);

    for (i, chromosome) in generation.iter().enumerate() {
        write_chromosome(&mut out, i + 1, chromosome, time_budget);
    }

    let stats = generation.stats(time_budget);
    let _ = writeln!(out, "Average Generation Time: {}", stats.average_time);
    let _ = writeln!(out, "Average Generation Speed: {}", stats.average_speed);
    let _ = writeln!(out, "Average Generation Pos: {}", stats.average_position);
    let _ = writeln!(out, "Average Generation Coins: {}", stats.average_coins);
    let _ = writeln!(out, "Average Generation Score: {}", stats.average_score);
    let _ = writeln!(out, "Average Generation Fitness Score: {}", stats.average_fitness);
    out
}

/// Resumable entry: solutions and fitness only.
pub fn render_import(generation: &Generation, generation_number: usize, level_id: &str) -> String {
    let mut out = String::new();
    write_header(&mut out, generation_number, level_id);

    for (i, chromosome) in generation.iter().enumerate() {
        let _ = writeln!(out, "{} {}", CHROMOSOME_PREFIX, i + 1);
        let _ = writeln!(out, "{} {}", SOLUTION_PREFIX, format_solution(chromosome.actions()));
        let _ = writeln!(out, "FITNESS VALUE: {}", chromosome.fitness());
        let _ = writeln!(out);
    }
    out
}

/// Action sequences of the last generation recorded in an import file.
///
/// Lines other than generation headers and solutions are ignored. Files
/// without any header are read as a single generation.
pub fn parse_import(text: &str) -> Result<Vec<Vec<Action>>> {
    let mut solutions = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.starts_with(GENERATION_HEADER.trim_end()) {
            solutions.clear();
        } else if let Some(rest) = line.strip_prefix(SOLUTION_PREFIX) {
            let actions = parse_solution(rest).map_err(|e| {
                MarioGaError::Import(format!("line {}: {}", number + 1, e))
            })?;
            solutions.push(actions);
        }
    }

    Ok(solutions)
}

fn parse_solution(raw: &str) -> std::result::Result<Vec<Action>, String> {
    let inner = raw
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim();
    if inner.is_empty() {
        return Err("empty solution".to_string());
    }

    inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            let action: Action = item
                .parse()
                .map_err(|_| format!("'{}' is not an action code", item))?;
            if usize::from(action) >= ACTION_COUNT {
                return Err(format!("action code {} out of range", action));
            }
            Ok(action)
        })
        .collect()
}
