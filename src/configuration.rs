use crate::error::{Error, ErrorKind};
use std::{env, net::IpAddr, str::FromStr};

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    threads: usize,
    max_input_length: usize,
    log_requests: bool,
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn var_map<T: FromStr>(key: &str, default: T) -> Result<T, Error> {
    match var(key) {
        Some(value) => value
            .parse()
            .map_err(|_| Error::new(ErrorKind::Configuration, format!("Invalid {} {}", key, value))),
        None => Ok(default),
    }
}

impl Configuration {
    pub fn new() -> Result<Self, Error> {
        let host = var_map("HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = var_map("PORT", 8000)?;
        let threads = var_map("THREADS", 1)?;
        let max_input_length = var_map("MAX_INPUT_LENGTH", 4096)?;
        let log_requests = var_map("LOG_REQUESTS", true)?;
        if threads == 0 {
            return Err(Error::new(ErrorKind::Configuration, "Invalid THREADS 0"));
        }
        Ok(Self {
            host,
            port,
            threads,
            max_input_length,
            log_requests,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn max_input_length(&self) -> usize {
        self.max_input_length
    }

    pub fn log_requests(&self) -> bool {
        self.log_requests
    }
}
