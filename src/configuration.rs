use std::cell::Cell;
use std::fs::File;
use std::io::BufReader;

use serde::Deserialize;
use tracing::debug;

use crate::function::univariatefunction::UnivariateFunction;
use crate::interpolation::functionmanager::FunctionManager;
use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::ManagerError;
use crate::time::dateconversion::DateConversion;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    date_conversion: DateConversion,
    #[serde(default)]
    functions: Vec<serde_json::Value>
}

pub struct Configuration {
    date_conversion_cell: Cell<DateConversion>,
    function_manager: Manager<UnivariateFunction>
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            date_conversion_cell: Cell::new(DateConversion::default()),
            function_manager: FunctionManager::new()
        }
    }

    pub fn date_conversion(&self) -> DateConversion {
        self.date_conversion_cell.get()
    }

    pub fn function_manager(&self) -> &Manager<UnivariateFunction> {
        &self.function_manager
    }

    pub fn function(&self, name: &str) -> Result<UnivariateFunction, ManagerError> {
        self.function_manager.get(name)
    }

    pub fn from_reader(&self, file_path: &str) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.from_json_value(json_value)
    }

    pub fn from_json_value(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
        debug!(
            global_base_date = %json_prop.date_conversion.global_base_date(),
            functions = json_prop.functions.len(),
            "loading configuration"
        );
        self.date_conversion_cell.set(json_prop.date_conversion);
        self.function_manager.insert_obj_from_json_vec(&json_prop.functions)
    }
}
