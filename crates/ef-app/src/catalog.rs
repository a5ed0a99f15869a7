//! Read-only introspection used by listing commands.

use std::path::Path;

use ef_io::load_table;
use ef_model::ModelRegistry;

use crate::error::AppResult;

/// Summary of a registered model for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub id: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub year_count: Option<String>,
    pub series: Vec<String>,
}

/// Summary of a data file for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub periods: usize,
    pub years: Vec<f64>,
    pub series: Vec<String>,
}

pub fn list_models(registry: &ModelRegistry) -> Vec<ModelSummary> {
    registry
        .entries()
        .iter()
        .map(|entry| {
            let descriptor = &entry.descriptor;
            ModelSummary {
                id: descriptor.id().to_string(),
                aliases: entry.aliases.clone(),
                description: descriptor.description().to_string(),
                year_count: descriptor.year_count_slot().map(|slot| slot.name.clone()),
                series: descriptor.series_slots().map(|slot| slot.name.clone()).collect(),
            }
        })
        .collect()
}

pub fn check_data(path: &Path) -> AppResult<DataSummary> {
    let table = load_table(path)?;
    Ok(DataSummary {
        periods: table.period_count(),
        years: table.years().to_vec(),
        series: table.names().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_listing() {
        let registry = ModelRegistry::builtin().unwrap();
        let models = list_models(&registry);
        assert_eq!(models.len(), 1);
        let gdp = &models[0];
        assert_eq!(gdp.id, "gdp");
        assert_eq!(gdp.aliases, vec!["Model1".to_string()]);
        assert_eq!(gdp.year_count.as_deref(), Some("LL"));
        assert_eq!(gdp.series.first().map(String::as_str), Some("twKI"));
        assert_eq!(gdp.series.last().map(String::as_str), Some("PKB"));
    }

    #[test]
    fn data_summary() {
        let path = std::env::temp_dir().join("ef_app_catalog_data.txt");
        std::fs::write(&path, "LATA 2015 2016\nKI 1\nKS 2 3\n").unwrap();
        let summary = check_data(&path).unwrap();
        assert_eq!(summary.periods, 2);
        assert_eq!(summary.years, vec![2015.0, 2016.0]);
        assert_eq!(summary.series, vec!["KI".to_string(), "KS".to_string()]);
        let _ = std::fs::remove_file(&path);
    }
}
