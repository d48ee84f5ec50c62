mod variance;

pub use variance::Variance;
