pub mod binding;
pub mod filter;

pub use binding::{ServiceBinding, parse_vcap_services};
pub use filter::ActivationFilter;
