//! Service façade over the persistence port.

mod crud;
mod validation;
pub use crud::{CollegeService, CrudService};
pub use validation::RequestValidator;
