//! A blocking HTTP [`Transport`] for the solving service.

use std::fmt::{Debug, Formatter};

use super::{SolveError, SolveRequest, SolverConfig, Transport};

/// Sends [`SolveRequest`]s to a solving service over HTTP, as `POST {base_url}/jigsaw/solve`
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(config: &SolverConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            agent: builder.build(),
        }
    }

    /// The full URL that `request` will be sent to
    pub fn url(&self, request: &SolveRequest) -> String {
        format!("{}{}", self.base_url, request.path())
    }
}

impl Debug for HttpTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &SolveRequest) -> Result<String, SolveError> {
        let url = self.url(request);
        log::info!("POST {} ({} pieces)", url, request.lines().len());
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "text/plain; charset=utf-8")
            .send_string(&request.body());
        match result {
            Ok(response) => response
                .into_string()
                .map_err(|e| SolveError::Transport(e.to_string())),
            Err(ureq::Error::Status(code, response)) => Err(SolveError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(e)) => Err(SolveError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Board;

    #[test]
    fn url_joins_base_and_route() {
        let config = SolverConfig {
            base_url: "http://solver.local:9000/".to_owned(),
            ..SolverConfig::default()
        };
        let transport = HttpTransport::new(&config);
        let request = SolveRequest::new(&Board::empty(), &config).unwrap();
        assert_eq!(
            transport.url(&request),
            "http://solver.local:9000/jigsaw/solve?M=0&N=0"
        );
    }
}
