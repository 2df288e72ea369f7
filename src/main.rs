use std::{net::SocketAddr, process, sync::Arc};
use transcoder::{create_server, Configuration, Error, ErrorKind, Logger, State};

fn run(configuration: Configuration) -> Result<(), Error> {
    let logger = Logger::new(configuration.log_requests());
    let state = Arc::new(State::new(configuration.max_input_length()));
    let server = create_server(state, logger).map_err(|error| Error::new(ErrorKind::Configuration, error.to_string()))?;
    let address = SocketAddr::new(configuration.host(), configuration.port());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(configuration.threads())
        .enable_all()
        .build()
        .map_err(|error| Error::new(ErrorKind::Configuration, error.to_string()))?;

    runtime
        .block_on(server.run(address))
        .map_err(|error| Error::new(ErrorKind::Server, error.to_string()))
}

fn main() {
    let result = Configuration::new().and_then(run);
    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(1);
    }
}
