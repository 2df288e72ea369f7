use std::{fmt::Display, time::Instant};

#[derive(Clone, Copy, Debug)]
pub struct Logger {
    start: Instant,
    enabled: bool,
}

fn format_elapsed(elapsed: u128) -> String {
    format!("{:02}:{:02}.{:03}", elapsed / 60000, (elapsed % 60000) / 1000, elapsed % 1000)
}

impl Logger {
    pub fn new(enabled: bool) -> Self {
        Self {
            start: Instant::now(),
            enabled,
        }
    }

    pub fn elapsed(&self) -> String {
        format_elapsed(self.start.elapsed().as_millis())
    }

    pub fn log(&self, value: impl Display) {
        if self.enabled {
            println!("{} ({} elapsed)", value, self.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn format_elapsed() {
        assert_eq!(super::format_elapsed(0), "00:00.000");
        assert_eq!(super::format_elapsed(61_005), "01:01.005");
        assert_eq!(super::format_elapsed(3_599_999), "59:59.999");
    }
}
