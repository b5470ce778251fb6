use serde::Deserialize;

use crate::function::piecewisefunction::ExtrapolationScheme;
use crate::function::univariatefunction::UnivariateFunction;
use crate::interpolation::interpolation::{
    create_interpolation,
    InterpolationType,
    Point2D
};
use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;

fn default_extrapolation() -> (ExtrapolationScheme, ExtrapolationScheme) {
    (ExtrapolationScheme::Curve, ExtrapolationScheme::Curve)
}

#[derive(Deserialize)]
struct FunctionJsonProp {
    interpolation_type: InterpolationType,
    points: Vec<Point2D>,
    #[serde(default = "default_extrapolation")]
    extrapolation: (ExtrapolationScheme, ExtrapolationScheme)
}

fn get_function_from_json(json_value: serde_json::Value) -> Result<UnivariateFunction, ManagerError> {
    let json_prop: FunctionJsonProp = ManagerError::from_json_or_json_parse_error(json_value)?;
    let function = create_interpolation(
        json_prop.interpolation_type,
        &json_prop.points,
        json_prop.extrapolation,
    )?;
    Ok(function)
}

pub struct FunctionManager;

impl FunctionManager {
    pub fn new() -> Manager<UnivariateFunction> {
        Manager::new(get_function_from_json)
    }
}
