use crate::assignment::AssignmentMap;
use crate::board::OptimizerError;
use crate::submission::Volunteer;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

/// Endpoint the original deployment posts optimize requests to.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/optimize-schedule";

#[derive(Serialize)]
struct OptimizeRequest<'a> {
    volunteers: &'a [Volunteer],
}

/// HTTP client for the black-box optimizer service. The request is the
/// week's volunteer roster; the response is the label map adapted into an
/// [`AssignmentMap`].
#[derive(Debug, Clone)]
pub struct OptimizerClient {
    client: Client,
    endpoint: String,
}

impl OptimizerClient {
    pub fn new(endpoint: impl Into<String>) -> OptimizerClient {
        OptimizerClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_default_endpoint() -> OptimizerClient {
        OptimizerClient::new(DEFAULT_ENDPOINT)
    }

    /// Posts the roster and decodes the optimized schedule. Transport and
    /// decode failures surface as [`OptimizerError`]; the caller applies
    /// the result through the board, which keeps prior assignments on
    /// failure.
    pub async fn optimize(&self, volunteers: &[Volunteer]) -> Result<AssignmentMap, OptimizerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&OptimizeRequest { volunteers })
            .send()
            .await?
            .error_for_status()?;
        let labels: BTreeMap<String, Vec<String>> = response.json().await?;
        Ok(AssignmentMap::from_labels(&labels)?)
    }
}
