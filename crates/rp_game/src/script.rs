//! Scripted input runs for regression tests.
//!
//! A script is a list of steps, each holding a set of keys for some number of
//! ticks. Keys are spelled as letters: `L` left, `R` right, `J` jump; an empty
//! string means no keys held. An optional `expect` block pins the outcome.
//!
//! ```json
//! { "name": "walk_right",
//!   "steps": [ { "hold": "R", "ticks": 400 } ],
//!   "expect": { "score": 20, "tokens_collected": 2 } }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::controller::ControllerInput;
use crate::game::GameState;

#[derive(Debug, Deserialize, Clone)]
pub struct InputScript {
    pub name: String,
    pub steps: Vec<ScriptStep>,
    #[serde(default)]
    pub expect: Option<ScriptExpectation>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptStep {
    #[serde(default)]
    pub hold: String,
    pub ticks: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ScriptExpectation {
    pub score: Option<u32>,
    pub tokens_collected: Option<usize>,
    pub respawns: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub ticks: u32,
    pub score: u32,
    pub tokens_collected: usize,
    pub respawns: u32,
}

fn parse_hold(hold: &str) -> Result<ControllerInput, String> {
    let mut input = ControllerInput::default();
    for c in hold.chars() {
        match c.to_ascii_uppercase() {
            'L' => input.left = true,
            'R' => input.right = true,
            'J' => input.jump = true,
            other => return Err(format!("unknown key '{other}' in hold \"{hold}\"")),
        }
    }
    Ok(input)
}

impl InputScript {
    /// Runs the script against `state`, ticking once per scripted tick.
    pub fn run(&self, state: &mut GameState) -> Result<ScriptOutcome, String> {
        let mut ticks = 0;
        for step in &self.steps {
            let input = parse_hold(&step.hold)?;
            for _ in 0..step.ticks {
                state.tick(input);
            }
            ticks += step.ticks;
        }
        Ok(ScriptOutcome {
            ticks,
            score: state.score.value(),
            tokens_collected: state.tokens_collected(),
            respawns: state.respawns,
        })
    }

    /// Compares an outcome with the `expect` block; fields left out always pass.
    pub fn check(&self, outcome: &ScriptOutcome) -> Result<(), String> {
        let Some(expect) = self.expect else {
            return Ok(());
        };
        let mismatch = |what: &str, want: String, got: String| {
            Err(format!(
                "Script '{}' mismatch: {what} expected {want}, got {got}",
                self.name
            ))
        };
        if let Some(score) = expect.score {
            if score != outcome.score {
                return mismatch("score", score.to_string(), outcome.score.to_string());
            }
        }
        if let Some(n) = expect.tokens_collected {
            if n != outcome.tokens_collected {
                return mismatch(
                    "tokens_collected",
                    n.to_string(),
                    outcome.tokens_collected.to_string(),
                );
            }
        }
        if let Some(n) = expect.respawns {
            if n != outcome.respawns {
                return mismatch("respawns", n.to_string(), outcome.respawns.to_string());
            }
        }
        Ok(())
    }
}

pub fn load_script_from_path(path: &Path) -> Result<InputScript, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let script: InputScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse input script {}: {e}", path.display()))?;
    if script.steps.is_empty() {
        return Err(format!("Script '{}' has no steps", script.name));
    }
    for (i, step) in script.steps.iter().enumerate() {
        if step.ticks == 0 {
            return Err(format!("Script '{}' step {i} has zero ticks", script.name));
        }
        parse_hold(&step.hold).map_err(|e| format!("Script '{}' step {i}: {e}", script.name))?;
    }
    Ok(script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelFile;
    use std::path::PathBuf;

    fn script_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets/scripts")
    }

    fn script(json: &str) -> InputScript {
        serde_json::from_str(json).expect("script json")
    }

    #[test]
    fn hold_letters_map_to_controller_input() {
        let input = parse_hold("rJ").expect("valid hold");
        assert!(input.right && input.jump && !input.left);
        assert_eq!(parse_hold("").expect("idle"), ControllerInput::default());
        assert!(parse_hold("X").is_err());
    }

    #[test]
    fn shipped_walk_right_script_meets_expectations() {
        let script =
            load_script_from_path(&script_dir().join("walk_right.json")).expect("script loads");
        let mut state = GameState::from_level(&LevelFile::builtin());
        let outcome = script.run(&mut state).expect("script runs");
        assert_eq!(outcome.ticks, 400);
        script.check(&outcome).expect("expectations hold");
    }

    #[test]
    fn expectation_mismatch_names_the_field() {
        let s = script(
            r#"{ "name": "idle", "steps": [ { "ticks": 10 } ],
                 "expect": { "score": 50 } }"#,
        );
        let mut state = GameState::from_level(&LevelFile::builtin());
        let outcome = s.run(&mut state).expect("runs");
        let err = s.check(&outcome).expect_err("score should not match");
        assert!(err.contains("score expected 50, got 0"));
    }

    #[test]
    fn zero_tick_step_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "rp_script_zero_ticks_{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "name": "bad", "steps": [ { "hold": "R", "ticks": 0 } ] }"#,
        )
        .expect("write script");
        let err = load_script_from_path(&path).expect_err("zero ticks should fail");
        assert!(err.contains("zero ticks"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn same_script_same_result() {
        let s = script(
            r#"{ "name": "mixed", "steps": [
                 { "hold": "R", "ticks": 45 },
                 { "hold": "RJ", "ticks": 30 },
                 { "hold": "R", "ticks": 120 },
                 { "hold": "LJ", "ticks": 90 },
                 { "hold": "", "ticks": 60 } ] }"#,
        );
        let level = LevelFile::builtin();
        let mut run_a = GameState::from_level(&level);
        let mut run_b = GameState::from_level(&level);
        let a = s.run(&mut run_a).expect("runs");
        let b = s.run(&mut run_b).expect("runs");

        assert_eq!(a, b);
        assert_eq!(run_a.player, run_b.player);
        assert_eq!(run_a.tokens, run_b.tokens);
        assert!((0.0..=770.0).contains(&run_a.player.position.x));
    }
}
