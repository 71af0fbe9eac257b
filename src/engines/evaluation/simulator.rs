use crate::error::Result;
use crate::types::{Action, Outcome};
use serde::{Serialize, Serializer};

/// One run to execute: the actions, the level to play them on, and whether
/// the simulator should draw the run on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRequest {
    pub commands: Vec<Action>,
    pub level: String,
    #[serde(serialize_with = "render_flag")]
    pub render: bool,
}

impl SimulationRequest {
    pub fn new(commands: &[Action], level: impl Into<String>, render: bool) -> Self {
        Self {
            commands: commands.to_vec(),
            level: level.into(),
            render,
        }
    }
}

// The simulator reads the flag as text.
fn render_flag<S: Serializer>(render: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(if *render { "true" } else { "false" })
}

/// Something that can play an action sequence and report how it went
pub trait Simulator: Send + Sync {
    fn run(&self, request: &SimulationRequest) -> Result<Outcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let request = SimulationRequest::new(&[1, 1, 3], "SuperMarioBros-1-1-v0", false);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "commands": [1, 1, 3],
                "level": "SuperMarioBros-1-1-v0",
                "render": "false"
            })
        );
    }
}
