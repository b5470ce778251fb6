pub mod configuration;

pub mod function {
    pub mod functionerror;
    pub mod term;
    pub mod compositesum;
    pub mod piecewisefunction;
    pub mod univariatefunction;
    pub mod arithmetic;
    pub mod basechange;
    pub mod rescale;
}

pub mod interpolation {
    pub mod interpolation;
    pub mod quadraticspline;
    pub mod functionmanager;
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod chebyshev;
    pub mod ols;
}

pub mod time {
    pub mod period;
    pub mod dateconversion;
}

pub use function::functionerror::FunctionError;
pub use function::piecewisefunction::{
    ExtrapolationScheme,
    PiecewiseFunction
};
pub use function::compositesum::CompositeSum;
pub use function::term::Term;
pub use function::univariatefunction::UnivariateFunction;
