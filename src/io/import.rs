use std::io::Read;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::application::TradingService;
use crate::domain::NewProject;

/// Result of a catalogue import.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred while importing one row.
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// The catalogue the original deployment shipped with; used when no CSV
/// file is supplied at startup.
pub fn default_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            name: "Amazon Rainforest Conservation".into(),
            description: "Protecting vital rainforest ecosystems".into(),
            location: "Brazil".into(),
            credits: Decimal::from(10_000),
            price: Decimal::from(25),
            image_url: "https://images.unsplash.com/photo-1465146344425-f00d5f5c8f07".into(),
        },
        NewProject {
            name: "Wind Farm Initiative".into(),
            description: "Clean energy generation project".into(),
            location: "Texas, USA".into(),
            credits: Decimal::from(5_000),
            price: Decimal::from(20),
            image_url: "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05".into(),
        },
    ]
}

/// Importer for loading the project catalogue at startup.
pub struct Importer<'a> {
    service: &'a TradingService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a TradingService) -> Self {
        Self { service }
    }

    /// Import projects from CSV with the columns
    /// `name,description,location,credits,price,image_url`.
    /// Rows that fail to parse are collected, not fatal.
    pub async fn import_projects_csv<R: Read>(&self, reader: R) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let name = record.get(0).unwrap_or("").to_string();
            if name.is_empty() {
                errors.push(ImportError {
                    line,
                    field: Some("name".to_string()),
                    error: "Name is required".to_string(),
                });
                continue;
            }

            let credits = match record.get(3).unwrap_or("").parse::<Decimal>() {
                Ok(c) => c,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("credits".to_string()),
                        error: format!("Invalid credits: {}", e),
                    });
                    continue;
                }
            };

            let price = match record.get(4).unwrap_or("").parse::<Decimal>() {
                Ok(p) => p,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: Some("price".to_string()),
                        error: format!("Invalid price: {}", e),
                    });
                    continue;
                }
            };

            self.service
                .create_project(NewProject {
                    name,
                    description: record.get(1).unwrap_or("").to_string(),
                    location: record.get(2).unwrap_or("").to_string(),
                    credits,
                    price,
                    image_url: record.get(5).unwrap_or("").to_string(),
                })
                .await;
            imported += 1;
        }

        Ok(ImportResult { imported, errors })
    }
}
