// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

use std::fmt;

/// The highest percentage an upload can show before the server accepts it.
pub const IN_FLIGHT_CEILING: u8 = 99;

/// Upload progress of a single file in a batch.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct ProgressInfo {
    file_name: String,
    percentage: u8,
}

impl ProgressInfo {
    pub fn new<S: Into<String>>(file_name: S) -> Self {
        Self {
            file_name: file_name.into(),
            percentage: 0,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Completion percentage, 0 through 100.
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Applies a transport progress report. The percentage never moves
    /// backwards and stays below 100 until `complete` is called.
    pub fn advance(&mut self, percentage: u8) {
        let percentage = percentage.min(IN_FLIGHT_CEILING);
        if percentage > self.percentage {
            self.percentage = percentage;
        }
    }

    pub fn complete(&mut self) {
        self.percentage = 100;
    }

    pub fn reset(&mut self) {
        self.percentage = 0;
    }
}

impl fmt::Display for ProgressInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}%", self.file_name, self.percentage)
    }
}
