use crate::config::SimulatorConfig;
use crate::engines::evaluation::simulator::{SimulationRequest, Simulator};
use crate::error::{MarioGaError, Result};
use crate::types::Outcome;
use log::debug;
use reqwest::blocking::Client;
use std::time::Duration;

/// Simulator reached over HTTP: one JSON POST per run
#[derive(Debug, Clone)]
pub struct HttpSimulator {
    client: Client,
    url: String,
}

impl HttpSimulator {
    pub fn new(config: &SimulatorConfig) -> Result<Self> {
        // No timeout_secs means no timeout at all.
        let client = Client::builder()
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!(
                "{}{}",
                config.url.trim_end_matches('/'),
                config.endpoint
            ),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Simulator for HttpSimulator {
    fn run(&self, request: &SimulationRequest) -> Result<Outcome> {
        debug!(
            "POST {} ({} commands, level {})",
            self.url,
            request.commands.len(),
            request.level
        );
        let response = self.client.post(&self.url).json(request).send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(MarioGaError::Simulation(format!(
                "Simulator returned {}: {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            MarioGaError::Simulation(format!("Malformed simulator response: {}", e))
        })
    }
}
