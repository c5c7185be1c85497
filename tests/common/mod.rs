#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use sales_report::ReportConfig;
use tempfile::TempDir;

/// Isolated directory holding a sales file and a reports folder.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn sales_path(&self) -> PathBuf {
        self.root().join("sales.json")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root().join("reports")
    }

    pub fn write_sales(&self, json: &str) {
        fs::write(self.sales_path(), json).expect("write sales file");
    }

    pub fn config(&self) -> ReportConfig {
        ReportConfig {
            sales_file: self.sales_path(),
            output_dir: self.reports_dir(),
            ..ReportConfig::default()
        }
    }

    pub fn read_report(&self, year: i32, month: u32) -> String {
        let path = self
            .reports_dir()
            .join(format!("report_{year}_{month}.txt"));
        fs::read_to_string(path).expect("read report")
    }
}

pub const MARCH_APRIL_SALES: &str = r#"[
    {"date": "2024-03-15T00:00:00", "amount": 100, "currency": "USD"},
    {"date": "2024-03-20T00:00:00", "amount": 50, "currency": "EUR"},
    {"date": "2024-04-01T00:00:00", "amount": 10, "currency": "USD"}
]"#;
