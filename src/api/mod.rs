//! HTTP API module for the Payroll Calculation Engine.
//!
//! This module provides the REST API endpoints for calculating monthly pay
//! for one employee or a batch of employees.

mod cache;
mod handlers;
mod request;
mod response;
mod state;

pub use cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, TtlCache};
pub use handlers::create_router;
pub use request::{
    BatchCalculationRequest, CalculationInput, CalculationRequest, ContractRequest,
    EmployeeRequest, PeriodRequest, ShiftRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BatchCalculationResponse, BatchItemResponse, CalculationResponse,
    ENGINE_VERSION,
};
pub use state::AppState;
