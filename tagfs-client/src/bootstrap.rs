use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    client::{Client, ClientFactory},
    config::ClientConfiguration,
};

/// Lifecycle of a bootstrapped client. `Running` is terminal once the
/// client's start call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootState {
    Configured,
    Running,
}

/// Constructs one client from `config` and runs it to completion.
///
/// The client's outcome is returned as-is; nothing is retried or restarted.
pub fn bootstrap<F: ClientFactory>(factory: &F, config: ClientConfiguration) -> Result<()> {
    let mut state = BootState::Configured;
    debug!(?state, address = config.address(), "client configured");

    let mut client = factory
        .create(config)
        .context("failed to construct client")?;

    state = BootState::Running;
    info!(?state, "starting client");
    let result = client.start();
    debug!(success = result.is_ok(), "client returned");
    result
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, path::Path};

    use anyhow::anyhow;

    use super::*;
    use crate::cli::ClientArgs;

    fn config() -> ClientConfiguration {
        let args = ClientArgs {
            address: Some("127.0.0.1".into()),
            data_dir: Some("data".into()),
            capacity: "10K".into(),
            replication: 40,
            time_server: None,
        };
        ClientConfiguration::from_args_in(args, Path::new("/tmp/tagfs"))
            .expect("valid configuration")
    }

    struct FailingFactory;

    struct NeverStarted;

    impl Client for NeverStarted {
        fn start(&mut self) -> Result<()> {
            panic!("client must not start when construction fails");
        }
    }

    impl ClientFactory for FailingFactory {
        type Client = NeverStarted;

        fn create(&self, _config: ClientConfiguration) -> Result<NeverStarted> {
            Err(anyhow!("address already in use"))
        }
    }

    #[test]
    fn construction_failure_is_reported_with_context() {
        let err = bootstrap(&FailingFactory, config()).expect_err("construction fails");
        assert_eq!(err.to_string(), "failed to construct client");
        assert_eq!(err.root_cause().to_string(), "address already in use");
    }

    struct CountingFactory<'a> {
        starts: &'a Cell<u32>,
    }

    struct CountingClient<'a> {
        starts: &'a Cell<u32>,
    }

    impl Client for CountingClient<'_> {
        fn start(&mut self) -> Result<()> {
            self.starts.set(self.starts.get() + 1);
            Err(anyhow!("peer unreachable"))
        }
    }

    impl<'a> ClientFactory for CountingFactory<'a> {
        type Client = CountingClient<'a>;

        fn create(&self, _config: ClientConfiguration) -> Result<CountingClient<'a>> {
            Ok(CountingClient { starts: self.starts })
        }
    }

    #[test]
    fn failing_start_is_not_retried() {
        let starts = Cell::new(0);
        let factory = CountingFactory { starts: &starts };
        let err = bootstrap(&factory, config()).expect_err("start fails");
        assert_eq!(err.to_string(), "peer unreachable");
        assert_eq!(starts.get(), 1);
    }
}
