use {
    std::{
        fmt::{self, Display, Formatter},
        net::SocketAddr,
    },
    tracing::level_filters::LevelFilter,
    url::Url,
};

#[derive(clap::Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    #[clap(long, env, default_value = "0.0.0.0:8080")]
    pub bind_address: SocketAddr,

    #[clap(
        long,
        env,
        default_value_t = SocketAddr::from(([0, 0, 0, 0], observe::metrics::DEFAULT_METRICS_PORT))
    )]
    pub metrics_address: SocketAddr,

    /// The Ethereum node used to look up transactions and receipts.
    #[clap(
        long,
        env = "ETHEREUM_URL",
        alias = "ethereum-url",
        default_value = "http://localhost:8545"
    )]
    pub node_url: Url,
}

#[derive(clap::Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,gatekeeper=debug,order_validation=debug")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Emit log events as JSON objects.
    #[clap(long, env, action = clap::ArgAction::Set, default_value = "false")]
    pub use_json_logs: bool,
}

impl LoggingArguments {
    pub fn config(&self) -> observe::Config {
        observe::Config::new(
            &self.log_filter,
            self.log_stderr_threshold.into_level(),
            self.use_json_logs,
        )
    }
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            logging,
            bind_address,
            metrics_address,
            node_url,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "bind_address: {bind_address}")?;
        writeln!(f, "metrics_address: {metrics_address}")?;
        writeln!(f, "node_url: {node_url}")?;
        Ok(())
    }
}
