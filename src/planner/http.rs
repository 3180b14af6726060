//! HTTP 规划器客户端
//!
//! 以 JSON 调用外部规划服务：POST {base_url}/plan，请求体携带 agent / beliefs / goals / mode（1|2），
//! 响应体为 {"plan": ["action", ...]}。服务端找不到计划时返回空数组。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::planner::{PlannerClient, PlannerError, PlanningMode};

#[derive(Debug, Serialize)]
struct PlanRequest<'a> {
    agent: &'a str,
    beliefs: &'a [String],
    goals: &'a [String],
    mode: u8,
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    plan: Vec<String>,
}

/// HTTP 客户端：持有 reqwest Client 与服务地址
pub struct HttpPlanner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPlanner {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, PlannerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PlannerError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/plan", self.base_url)
    }
}

#[async_trait]
impl PlannerClient for HttpPlanner {
    async fn run(
        &self,
        agent: &str,
        beliefs: &[String],
        goals: &[String],
        mode: PlanningMode,
    ) -> Result<Vec<String>, PlannerError> {
        let request = PlanRequest {
            agent,
            beliefs,
            goals,
            mode: mode.wire_code(),
        };
        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| PlannerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PlannerError::Transport(format!(
                "planner service returned {}",
                response.status()
            )));
        }

        let body: PlanResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::Malformed(e.to_string()))?;
        Ok(body.plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload_shape() {
        let beliefs = vec!["atHome".to_string()];
        let goals = vec!["hasMoney".to_string()];
        let request = PlanRequest {
            agent: "ag1",
            beliefs: &beliefs,
            goals: &goals,
            mode: PlanningMode::Online.wire_code(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["agent"], "ag1");
        assert_eq!(json["mode"], 2);
        assert_eq!(json["goals"][0], "hasMoney");
    }

    #[test]
    fn test_response_parsing() {
        let body: PlanResponse =
            serde_json::from_str(r#"{"plan": ["earnsalary", "buyphone"]}"#).unwrap();
        assert_eq!(body.plan, vec!["earnsalary", "buyphone"]);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let planner = HttpPlanner::new("http://localhost:8080/", 5).unwrap();
        assert_eq!(planner.endpoint(), "http://localhost:8080/plan");
    }
}
